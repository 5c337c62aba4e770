//! 控制环 / IO 线程交接示例
//!
//! 演示典型接线：
//! - IO 线程高频写入最新"传感器快照"（AtomicBuffer，最新值获胜）
//! - 控制环按 100 Hz 节拍读快照、算控制量，把命令推入 AtomicQueue
//! - 命令线程阻塞消费命令队列（不丢值）
//!
//! 运行：`cargo run --example control_handoff`

use armkit::{AtomicBuffer, AtomicQueue, PopError, RateTimer};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct JointSnapshot {
    seq: u64,
    position: [f64; 6],
}

#[derive(Debug)]
struct JointCommand {
    seq: u64,
    torque: [f64; 6],
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let snapshot: Arc<AtomicBuffer<JointSnapshot>> = Arc::new(AtomicBuffer::new());
    let commands: Arc<AtomicQueue<JointCommand>> = Arc::new(AtomicQueue::new());

    // IO 线程：1 kHz 写入最新快照
    let io_thread = {
        let snapshot = Arc::clone(&snapshot);
        thread::spawn(move || {
            let mut timer = RateTimer::new(1000.0);
            for seq in 0..1000u64 {
                let angle = seq as f64 * 1e-3;
                let _ = snapshot.push(JointSnapshot {
                    seq,
                    position: [angle; 6],
                });
                timer.sleep();
            }
            snapshot.close();
            tracing::info!("io thread done");
        })
    };

    // 命令线程：阻塞消费，逐条下发
    let command_thread = {
        let commands = Arc::clone(&commands);
        thread::spawn(move || {
            let mut sent = 0u64;
            loop {
                match commands.pop() {
                    Ok(cmd) => {
                        sent += 1;
                        if sent % 25 == 0 {
                            tracing::info!(seq = cmd.seq, "command sent: {:?}", cmd.torque[0]);
                        }
                    },
                    Err(PopError::Closed) => break,
                    Err(e) => {
                        tracing::error!("command pop failed: {e}");
                        break;
                    },
                }
            }
            tracing::info!(sent, "command thread done");
        })
    };

    // 控制环：100 Hz 读最新快照，算个假 PD 输出
    let mut timer = RateTimer::new(100.0);
    loop {
        match snapshot.pop_timeout(Duration::from_millis(50)) {
            Ok(state) => {
                let torque = state.position.map(|q| -10.0 * q);
                commands
                    .push(JointCommand {
                        seq: state.seq,
                        torque,
                    })
                    .expect("command queue closed unexpectedly");
            },
            Err(PopError::Closed) => break,
            Err(PopError::Timeout) => {
                tracing::warn!("no fresh snapshot within 50ms");
                continue;
            },
        }
        timer.sleep();
    }

    commands.close();
    io_thread.join().unwrap();
    command_thread.join().unwrap();
    tracing::info!(avg_hz = timer.average_frequency(), "control loop finished");
}
