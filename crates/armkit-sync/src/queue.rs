//! # AtomicQueue - 线程安全 FIFO 队列
//!
//! 生产者线程与消费者线程之间的命令交接原语。
//!
//! 与 [`AtomicBuffer`](crate::AtomicBuffer) 的核心区别：**不丢值**。
//! 每个 push 进来的值都会保留到被 pop 取走为止，严格 FIFO。
//! 适合命令流（每条指令都必须送达）；状态快照请用 `AtomicBuffer`。
//!
//! 有界模式下采用"生产者阻塞"背压策略：`push` 在队列满时挂起而不是
//! 报错或丢值，保证至少一次交接。

use crate::error::{PopError, PushError, TryPushError};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::trace;

struct Inner<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// 线程安全 FIFO 队列（默认无界，可配置容量上限）
///
/// 所有修改操作都在内部互斥锁下执行；阻塞 `pop` 在等待期间释放锁，
/// 不会卡住其他生产者/消费者。支持多生产者多消费者；每次 push 保证
/// 至少唤醒一个等待中的消费者。
///
/// # Example
///
/// ```
/// use armkit_sync::AtomicQueue;
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue = Arc::new(AtomicQueue::new());
/// let producer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || {
///         for i in 0..3 {
///             queue.push(i).unwrap();
///         }
///     })
/// };
///
/// assert_eq!(queue.pop(), Ok(0));
/// assert_eq!(queue.pop(), Ok(1));
/// assert_eq!(queue.pop(), Ok(2));
/// producer.join().unwrap();
/// ```
pub struct AtomicQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: Option<usize>,
}

impl<T> AtomicQueue<T> {
    /// 创建无界队列
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::new(),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity: None,
        }
    }

    /// 创建容量为 `capacity` 的有界队列
    ///
    /// 队列满时 `push` 阻塞生产者（不丢值），`try_push` 返回
    /// [`TryPushError::Full`]。
    ///
    /// # Panics
    ///
    /// `capacity` 为 0 时 panic。
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "AtomicQueue capacity must be at least 1");
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity: Some(capacity),
        }
    }

    /// 追加一个值到队尾，并唤醒一个等待中的消费者
    ///
    /// 有界队列满时阻塞，直到有空位或队列被关闭。
    /// 队列已关闭时返回 [`PushError`]，值原样退回。
    pub fn push(&self, value: T) -> Result<(), PushError<T>> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(PushError(value));
        }
        if let Some(capacity) = self.capacity {
            while inner.items.len() >= capacity {
                self.not_full.wait(&mut inner);
                if inner.closed {
                    return Err(PushError(value));
                }
            }
        }
        inner.items.push_back(value);
        drop(inner);
        self.not_empty.notify_one();
        Ok(())
    }

    /// 非阻塞 push
    ///
    /// 队列满 / 已关闭时立即返回，值退回给调用方。
    pub fn try_push(&self, value: T) -> Result<(), TryPushError<T>> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(TryPushError::Closed(value));
        }
        if let Some(capacity) = self.capacity
            && inner.items.len() >= capacity
        {
            return Err(TryPushError::Full(value));
        }
        inner.items.push_back(value);
        drop(inner);
        self.not_empty.notify_one();
        Ok(())
    }

    /// 阻塞直到队首有值，取走并返回（严格 FIFO）
    ///
    /// 队列关闭后，剩余元素仍按序可取；取空之后才返回
    /// [`PopError::Closed`]——已 push 的值永不丢失。
    pub fn pop(&self) -> Result<T, PopError> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(value) = inner.items.pop_front() {
                drop(inner);
                self.not_full.notify_one();
                return Ok(value);
            }
            if inner.closed {
                return Err(PopError::Closed);
            }
            self.not_empty.wait(&mut inner);
        }
    }

    /// 非阻塞 pop：队列为空时立即返回 `None`
    pub fn try_pop(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        let value = inner.items.pop_front()?;
        drop(inner);
        self.not_full.notify_one();
        Some(value)
    }

    /// 限时 pop：最多等待 `timeout`，超时返回 [`PopError::Timeout`]
    ///
    /// 超时返回后队列仍然可用，调用方可以继续轮询。
    pub fn pop_timeout(&self, timeout: Duration) -> Result<T, PopError> {
        let deadline = Instant::now() + timeout;
        let mut inner = self.inner.lock();
        loop {
            if let Some(value) = inner.items.pop_front() {
                drop(inner);
                self.not_full.notify_one();
                return Ok(value);
            }
            if inner.closed {
                return Err(PopError::Closed);
            }
            if self.not_empty.wait_until(&mut inner, deadline).timed_out() {
                // 超时唤醒和 push 可能同时发生，最后再检查一次
                return match inner.items.pop_front() {
                    Some(value) => {
                        drop(inner);
                        self.not_full.notify_one();
                        Ok(value)
                    },
                    None if inner.closed => Err(PopError::Closed),
                    None => Err(PopError::Timeout),
                };
            }
        }
    }

    /// 关闭队列（幂等）
    ///
    /// 所有阻塞中的消费者被唤醒；队列取空后它们得到
    /// [`PopError::Closed`]。阻塞中的生产者立即拿回自己的值。
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }
        inner.closed = true;
        let remaining = inner.items.len();
        drop(inner);
        trace!(remaining, "AtomicQueue closed");
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// 队列是否已关闭
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// 当前元素个数
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    /// 队列是否为空
    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// 容量上限（无界队列返回 `None`）
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

impl<T> Default for AtomicQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
