//! # AtomicBuffer - 单槽状态交接缓冲
//!
//! "最新值获胜"语义：`push` 覆盖并丢弃未被消费的旧值。
//! 适合状态快照（最新传感器读数、最新目标位姿）——控制环只关心
//! 当前状态，不关心历史；命令流请用 [`AtomicQueue`](crate::AtomicQueue)。
//!
//! 覆盖丢弃是设计语义而不是错误，不会向调用方报告。

use crate::error::{PopError, PushError};
use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};
use tracing::trace;

struct Inner<T> {
    slot: Option<T>,
    closed: bool,
}

/// 单槽线程安全值容器
///
/// 槽内值由缓冲独占持有，`pop` 成功后所有权原子地转移给调用方；
/// 生产者和消费者不会同时持有同一个值。阻塞 `pop` 在等待期间释放
/// 内部锁。每次 `push` 唤醒一个等待中的消费者（槽里只有一个值，
/// 多余的等待者继续睡）。
pub struct AtomicBuffer<T> {
    inner: Mutex<Inner<T>>,
    ready: Condvar,
}

impl<T> AtomicBuffer<T> {
    /// 创建空缓冲
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                slot: None,
                closed: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// 写入新值，覆盖并丢弃槽内未被消费的旧值
    ///
    /// 缓冲已关闭时返回 [`PushError`]，值原样退回；其余情况总是成功。
    pub fn push(&self, value: T) -> Result<(), PushError<T>> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(PushError(value));
        }
        if inner.slot.replace(value).is_some() {
            // 旧值未被消费就被覆盖：latest-value-wins，设计语义
            trace!("AtomicBuffer overwrote an unconsumed value");
        }
        drop(inner);
        self.ready.notify_one();
        Ok(())
    }

    /// 阻塞直到槽内有值，取走并清空槽
    ///
    /// 缓冲被关闭时返回 [`PopError::Closed`]，不会无限期挂起。
    pub fn pop(&self) -> Result<T, PopError> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(value) = inner.slot.take() {
                return Ok(value);
            }
            if inner.closed {
                return Err(PopError::Closed);
            }
            self.ready.wait(&mut inner);
        }
    }

    /// 非阻塞 pop：槽为空时立即返回 `None`
    ///
    /// 消费者轮询而不愿无限期阻塞时的主要入口。
    pub fn try_pop(&self) -> Option<T> {
        self.inner.lock().slot.take()
    }

    /// 限时 pop：最多等待 `timeout`，超时返回 [`PopError::Timeout`]
    pub fn pop_timeout(&self, timeout: Duration) -> Result<T, PopError> {
        let deadline = Instant::now() + timeout;
        let mut inner = self.inner.lock();
        loop {
            if let Some(value) = inner.slot.take() {
                return Ok(value);
            }
            if inner.closed {
                return Err(PopError::Closed);
            }
            if self.ready.wait_until(&mut inner, deadline).timed_out() {
                return match inner.slot.take() {
                    Some(value) => Ok(value),
                    None if inner.closed => Err(PopError::Closed),
                    None => Err(PopError::Timeout),
                };
            }
        }
    }

    /// 关闭缓冲（幂等），唤醒所有阻塞中的消费者
    ///
    /// 与队列不同，关闭时槽内残留的值直接丢弃——单槽语义下它
    /// 本来就随时可能被覆盖。
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }
        inner.closed = true;
        inner.slot = None;
        drop(inner);
        trace!("AtomicBuffer closed");
        self.ready.notify_all();
    }

    /// 缓冲是否已关闭
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// 槽是否为空
    pub fn is_empty(&self) -> bool {
        self.inner.lock().slot.is_none()
    }
}

impl<T> Default for AtomicBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_latest_value_wins() {
        let buffer = AtomicBuffer::new();
        buffer.push(1).unwrap();
        buffer.push(2).unwrap();

        // v1 被覆盖丢弃，只能取到 v2
        assert_eq!(buffer.pop(), Ok(2));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_try_pop_empty() {
        let buffer: AtomicBuffer<u32> = AtomicBuffer::new();
        assert_eq!(buffer.try_pop(), None);

        buffer.push(5).unwrap();
        assert_eq!(buffer.try_pop(), Some(5));
        assert_eq!(buffer.try_pop(), None);
    }

    #[test]
    fn test_pop_timeout_expires() {
        let buffer: AtomicBuffer<u32> = AtomicBuffer::new();
        assert_eq!(
            buffer.pop_timeout(Duration::from_millis(20)),
            Err(PopError::Timeout)
        );
    }

    #[test]
    fn test_blocked_pop_wakes_on_push() {
        let buffer: Arc<AtomicBuffer<u32>> = Arc::new(AtomicBuffer::new());
        let consumer = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || buffer.pop())
        };

        thread::sleep(Duration::from_millis(10));
        buffer.push(33).unwrap();
        assert_eq!(consumer.join().unwrap(), Ok(33));
    }

    #[test]
    fn test_close_wakes_blocked_consumer() {
        let buffer: Arc<AtomicBuffer<u32>> = Arc::new(AtomicBuffer::new());
        let consumer = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || buffer.pop())
        };

        thread::sleep(Duration::from_millis(10));
        buffer.close();
        assert_eq!(consumer.join().unwrap(), Err(PopError::Closed));
    }

    #[test]
    fn test_push_after_close_returns_value() {
        let buffer = AtomicBuffer::new();
        buffer.push(1).unwrap();
        buffer.close();
        assert_eq!(buffer.push(2), Err(PushError(2)));
        assert_eq!(buffer.pop(), Err(PopError::Closed));
    }
}
