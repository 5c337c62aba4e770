//! # ThreadPool - 固定线程池
//!
//! 一组 worker 线程消费同一个 [`AtomicQueue`] 作业队列。
//! 作业结果通过容量为 1 的 crossbeam 通道回传给 [`JobHandle`]。
//!
//! 关闭是优雅的：`shutdown()` 关闭作业队列，worker 把已入队的作业
//! 全部执行完（队列的 drain-on-close 规则）再退出，因此关闭前拿到的
//! 所有 handle 都能等到结果。

use crate::error::PopError;
use crate::queue::AtomicQueue;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{trace, warn};

type JobFn<T> = Box<dyn FnOnce() -> T + Send + 'static>;

/// 线程池配置
///
/// # Example
///
/// ```
/// use armkit_sync::ThreadPoolConfig;
///
/// // 默认配置：线程数 = 硬件并行度
/// let config = ThreadPoolConfig::default();
///
/// // 自定义配置
/// let config = ThreadPoolConfig {
///     num_threads: 2,
///     thread_name: "ik-solver".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadPoolConfig {
    /// worker 线程数，0 表示取硬件支持的最大并行度
    pub num_threads: usize,
    /// worker 线程名前缀（利于日志和调试器定位）
    pub thread_name: String,
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            num_threads: 0,
            thread_name: "armkit-worker".to_string(),
        }
    }
}

/// 等待作业结果的句柄
///
/// 池在作业执行前就被整体关闭（作业在 `shutdown` 之后才提交）时，
/// `wait` 返回 [`PopError::Closed`]。
pub struct JobHandle<T> {
    rx: Receiver<T>,
}

impl<T> JobHandle<T> {
    /// 阻塞等待作业结果
    pub fn wait(self) -> Result<T, PopError> {
        self.rx.recv().map_err(|_| PopError::Closed)
    }

    /// 限时等待作业结果
    pub fn wait_timeout(&self, timeout: Duration) -> Result<T, PopError> {
        match self.rx.recv_timeout(timeout) {
            Ok(value) => Ok(value),
            Err(RecvTimeoutError::Timeout) => Err(PopError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(PopError::Closed),
        }
    }

    /// 结果是否已就绪（非阻塞）
    pub fn is_ready(&self) -> bool {
        !self.rx.is_empty()
    }
}

/// 固定大小的 worker 线程池
///
/// `T` 是作业返回值类型；不同返回类型的作业请使用不同的池实例。
pub struct ThreadPool<T: Send + 'static> {
    jobs: Arc<AtomicQueue<(JobFn<T>, Sender<T>)>>,
    workers: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> ThreadPool<T> {
    /// 按配置创建线程池
    ///
    /// 线程创建失败时返回底层 IO 错误（已创建的线程随池一起回收）。
    pub fn new(config: ThreadPoolConfig) -> std::io::Result<Self> {
        let num_threads = if config.num_threads == 0 {
            thread::available_parallelism().map(usize::from).unwrap_or(1)
        } else {
            config.num_threads
        };

        let jobs = Arc::new(AtomicQueue::new());
        let mut workers = Vec::with_capacity(num_threads);
        for i in 0..num_threads {
            let jobs = Arc::clone(&jobs);
            let handle = thread::Builder::new()
                .name(format!("{}-{}", config.thread_name, i))
                .spawn(move || worker_loop(jobs))?;
            workers.push(handle);
        }

        Ok(Self { jobs, workers })
    }

    /// 提交一个作业，返回等待结果的句柄
    ///
    /// 池已关闭时作业被丢弃，句柄等待时得到 [`PopError::Closed`]。
    pub fn submit<F>(&self, job: F) -> JobHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = bounded(1);
        let job: JobFn<T> = Box::new(job);
        if self.jobs.push((job, tx)).is_err() {
            warn!("job submitted to a shut-down thread pool, dropping");
        }
        JobHandle { rx }
    }

    /// 待执行的作业数
    pub fn pending_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// 关闭线程池并等待 worker 退出（幂等）
    ///
    /// 已入队的作业会先被执行完。
    pub fn shutdown(&mut self) {
        self.jobs.close();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("thread pool worker panicked");
            }
        }
    }
}

impl<T: Send + 'static> Drop for ThreadPool<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop<T: Send + 'static>(jobs: Arc<AtomicQueue<(JobFn<T>, Sender<T>)>>) {
    trace!("worker started");
    while let Ok((job, tx)) = jobs.pop() {
        // 句柄可能已被丢弃（调用方不关心结果），发送失败直接忽略
        let _ = tx.send(job());
    }
    trace!("worker exiting: job queue closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_jobs_run_and_deliver_results() {
        let pool = ThreadPool::new(ThreadPoolConfig {
            num_threads: 2,
            ..Default::default()
        })
        .unwrap();

        let handles: Vec<_> = (0..8).map(|i| pool.submit(move || i * i)).collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.wait().unwrap()).collect();
        assert_eq!(results, vec![0, 1, 4, 9, 16, 25, 36, 49]);
    }

    #[test]
    fn test_queued_jobs_complete_before_shutdown() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut pool = ThreadPool::new(ThreadPoolConfig {
            num_threads: 1,
            ..Default::default()
        })
        .unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let counter = Arc::clone(&counter);
                pool.submit(move || counter.fetch_add(1, Ordering::Relaxed))
            })
            .collect();

        // 关闭前入队的作业全部执行完
        pool.shutdown();
        assert_eq!(counter.load(Ordering::Relaxed), 16);
        for handle in handles {
            assert!(handle.wait().is_ok());
        }
    }

    #[test]
    fn test_submit_after_shutdown_resolves_closed() {
        let mut pool = ThreadPool::new(ThreadPoolConfig {
            num_threads: 1,
            ..Default::default()
        })
        .unwrap();
        pool.shutdown();

        let handle = pool.submit(|| 42);
        assert_eq!(handle.wait(), Err(PopError::Closed));
    }

    #[test]
    fn test_wait_timeout_on_slow_job() {
        let pool = ThreadPool::new(ThreadPoolConfig {
            num_threads: 1,
            ..Default::default()
        })
        .unwrap();

        let handle = pool.submit(|| {
            thread::sleep(Duration::from_millis(100));
            1
        });
        assert_eq!(
            handle.wait_timeout(Duration::from_millis(10)),
            Err(PopError::Timeout)
        );
        // 作业最终还是会完成
        assert_eq!(handle.wait_timeout(Duration::from_secs(5)), Ok(1));
    }

    #[test]
    fn test_zero_threads_uses_available_parallelism() {
        let pool: ThreadPool<u32> = ThreadPool::new(ThreadPoolConfig::default()).unwrap();
        assert!(!pool.workers.is_empty());
    }
}
