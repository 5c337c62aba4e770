//! 同步原语错误类型定义

use std::fmt;
use thiserror::Error;

/// 阻塞式 / 限时 pop 的失败原因
///
/// 成功的 pop 返回值本身，失败时必须能区分"原语已关闭"和"等待超时"，
/// 调用方据此决定退出循环还是继续轮询。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopError {
    /// 原语已关闭，且没有剩余数据可取
    #[error("channel closed")]
    Closed,

    /// 等待超时，期间没有值到达
    #[error("pop timed out")]
    Timeout,
}

/// 阻塞式 push 失败（目标已关闭）
///
/// 值不会被静默丢弃，而是原样退回给调用方（`.0`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushError<T>(pub T);

impl<T> PushError<T> {
    /// 取回被退回的值
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pushing into a closed channel")
    }
}

impl<T: fmt::Debug> std::error::Error for PushError<T> {}

/// 非阻塞式 push 失败
///
/// 有界队列满时不丢值也不阻塞，把值退回并报告 `Full`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryPushError<T> {
    /// 队列已满（仅有界队列会出现）
    Full(T),

    /// 队列已关闭
    Closed(T),
}

impl<T> TryPushError<T> {
    /// 取回被退回的值
    pub fn into_inner(self) -> T {
        match self {
            TryPushError::Full(value) | TryPushError::Closed(value) => value,
        }
    }

    /// 是否因队列已满而失败
    pub fn is_full(&self) -> bool {
        matches!(self, TryPushError::Full(_))
    }
}

impl<T> fmt::Display for TryPushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryPushError::Full(_) => write!(f, "pushing into a full channel"),
            TryPushError::Closed(_) => write!(f, "pushing into a closed channel"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for TryPushError<T> {}
