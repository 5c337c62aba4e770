//! 线程池与控制环节拍集成测试

use armkit::{AtomicBuffer, PopError, RateTimer, ThreadPool, ThreadPoolConfig};
use rand::Rng;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// 随机时长的作业在多 worker 下全部完成，结果与作业一一对应。
#[test]
fn test_pool_completes_jittered_jobs() {
    let pool = ThreadPool::new(ThreadPoolConfig {
        num_threads: 4,
        thread_name: "jitter-worker".to_string(),
    })
    .unwrap();

    let handles: Vec<_> = (0..64u64)
        .map(|i| {
            pool.submit(move || {
                let delay = rand::thread_rng().gen_range(0..500);
                thread::sleep(Duration::from_micros(delay));
                i * 2
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.wait(), Ok(i as u64 * 2));
    }
}

/// 关闭时已入队的作业先执行完，之后提交的作业得到 Closed。
#[test]
fn test_pool_shutdown_is_graceful() {
    let mut pool = ThreadPool::new(ThreadPoolConfig {
        num_threads: 1,
        ..Default::default()
    })
    .unwrap();

    let queued: Vec<_> = (0..8usize).map(|i| pool.submit(move || i)).collect();
    pool.shutdown();

    for (i, handle) in queued.into_iter().enumerate() {
        assert_eq!(handle.wait(), Ok(i));
    }
    assert_eq!(pool.submit(|| 0).wait(), Err(PopError::Closed));
}

/// 典型接线：IO 线程高频写快照缓冲，控制环按固定节拍读最新值。
/// 控制环每个周期都能拿到值（轮询 + 限时阻塞组合），且不落后于
/// 生产端太多。
#[test]
fn test_rate_limited_consumer_sees_fresh_snapshots() {
    let snapshot: Arc<AtomicBuffer<u64>> = Arc::new(AtomicBuffer::new());

    let io_thread = {
        let snapshot = Arc::clone(&snapshot);
        thread::spawn(move || {
            let mut timer = RateTimer::new(2000.0); // 2 kHz 传感器
            for seq in 0..400u64 {
                snapshot.push(seq).unwrap();
                timer.sleep();
            }
            snapshot.close();
        })
    };

    let mut timer = RateTimer::new(500.0); // 500 Hz 控制环
    let mut observed = Vec::new();
    loop {
        match snapshot.pop_timeout(Duration::from_millis(100)) {
            Ok(seq) => observed.push(seq),
            Err(PopError::Closed) => break,
            Err(PopError::Timeout) => panic!("producer stalled"),
        }
        timer.sleep();
    }
    io_thread.join().unwrap();

    // 消费端慢于生产端，必然跳过一些序号（最新值获胜），
    // 但看到的序号必须严格递增
    assert!(!observed.is_empty());
    assert!(observed.windows(2).all(|w| w[0] < w[1]));
}
