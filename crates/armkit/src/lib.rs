//! # Armkit
//!
//! 机器人控制环支持库，统一出口 crate。
//!
//! ## 组成
//!
//! - [`sync`]: 线程交接原语（`AtomicBuffer` / `AtomicQueue` /
//!   `AtomicCell` / `ThreadPool`），控制环线程与 IO 线程之间的
//!   值交接机制
//! - [`tree`]: 键值化层级注册表（`Tree`），坐标系 / 连杆树
//! - [`RateTimer`]: 控制环节拍器
//!
//! ## 典型接线
//!
//! IO 线程把最新传感器快照 push 进 `AtomicBuffer`（最新值获胜），
//! 控制环线程把控制命令 push 进 `AtomicQueue`（不丢值），两个线程
//! 各自用 `RateTimer` 锁频。坐标系拓扑放在 `Tree` 里，由单个线程
//! 维护或调用方自行加锁。
//!
//! ```
//! use armkit::{AtomicBuffer, RateTimer};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let snapshot = Arc::new(AtomicBuffer::new());
//!
//! let io = {
//!     let snapshot = Arc::clone(&snapshot);
//!     thread::spawn(move || {
//!         let _ = snapshot.push([0.1_f64; 6]); // 最新关节读数
//!         snapshot.close();
//!     })
//! };
//!
//! while let Ok(joints) = snapshot.pop() {
//!     assert_eq!(joints.len(), 6);
//! }
//! io.join().unwrap();
//! ```

pub use armkit_sync as sync;
pub use armkit_tree as tree;

mod timer;

pub use armkit_sync::{
    AtomicBuffer, AtomicCell, AtomicQueue, JobHandle, PopError, PushError, ThreadPool,
    ThreadPoolConfig, TryPushError,
};
pub use armkit_tree::{SearchOrder, Tree, TreeError};
pub use timer::RateTimer;
