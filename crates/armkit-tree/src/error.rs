//! 树容器错误类型定义

use thiserror::Error;

/// 树操作错误
///
/// 所有错误都是调用点的同步前置条件失败，容器内部不做重试；
/// 失败的操作不会留下部分生效的状态。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// 键已存在（全树扁平命名空间，不是按子树去重）
    #[error("key already exists in the tree")]
    DuplicateKey,

    /// 指定的父节点不存在
    #[error("parent key does not exist in the tree")]
    UnknownParent,

    /// 指定的节点不存在
    #[error("key does not exist in the tree")]
    UnknownKey,
}
