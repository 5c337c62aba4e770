//! # Armkit Sync
//!
//! 机器人控制环与 IO 线程之间的值交接原语（无硬件依赖）。
//!
//! ## 模块
//!
//! - `buffer`: 单槽缓冲，最新值获胜（状态快照）
//! - `queue`: FIFO 队列，不丢值（命令流）
//! - `cell`: 锁保护的共享值单元
//! - `thread_pool`: 基于 `AtomicQueue` 的固定线程池
//!
//! ## 选型
//!
//! | 原语 | 覆盖旧值 | 阻塞 pop | 典型用途 |
//! |------|---------|---------|----------|
//! | [`AtomicBuffer`] | 是 | 是 | 最新传感器快照 |
//! | [`AtomicQueue`] | 否 | 是 | 控制命令流 |
//! | [`AtomicCell`] | 是 | 否 | 共享配置/标定参数 |
//!
//! 两个交接原语都独占持有入队的值，`pop` 成功即完成一次独占的
//! 所有权转移；阻塞等待可被 [`close`](AtomicQueue::close) 取消，
//! 等待方得到可区分的 [`PopError::Closed`] 而不是永久挂起。

pub mod buffer;
pub mod cell;
pub mod error;
pub mod queue;
pub mod thread_pool;

pub use buffer::AtomicBuffer;
pub use cell::AtomicCell;
pub use error::{PopError, PushError, TryPushError};
pub use queue::AtomicQueue;
pub use thread_pool::{JobHandle, ThreadPool, ThreadPoolConfig};
