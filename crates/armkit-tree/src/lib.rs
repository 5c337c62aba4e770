//! # Armkit Tree
//!
//! 键值化的层级注册表，面向机器人场景中的坐标系 / 连杆树。
//!
//! 树由三张扁平映射表示：`key -> value`（唯一持有全部节点负载）、
//! `key -> Option<parent_key>`（父指针回溯链）、`key -> Vec<child_key>`
//! （子键列表）。节点之间不存在结构指针，所有关系都是键查找，
//! 以内存换 O(depth) 的祖先判定，完全绕开生命周期/别名问题。
//!
//! 插入和按键访问 O(1)；祖先链遍历 O(depth)；子树遍历 O(子树规模)。
//! 深度只受插入方式约束，链式退化到 O(n) 是已知复杂度特性。
//!
//! 本容器**不是线程安全的**：单写者，或由调用方做外部同步。
//! 生命周期为插入 + 重新挂接（`set_parent` 等），没有删除操作。

mod error;
mod iter;

pub use error::TreeError;
pub use iter::{Ancestors, Children, Descendants, Roots};

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// 子树遍历顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    /// 广度优先：先访问所有子节点，再访问孙节点
    BreadthFirst,
    /// 深度优先：先访问完一个子节点的整棵子树，再访问下一个兄弟
    DepthFirst,
}

/// 键值化的层级容器
///
/// 键在全树范围内唯一（扁平命名空间）；除根之外每个节点恰有一个
/// 父节点；父子关系无环。值的生命周期等于其键在树中的生命周期。
///
/// # Example
///
/// ```
/// use armkit_tree::Tree;
///
/// let mut tree = Tree::new();
/// tree.insert("base", 0).unwrap();
/// tree.insert_child(&"base", "shoulder", 1).unwrap();
/// tree.insert_child(&"shoulder", "elbow", 2).unwrap();
///
/// assert_eq!(tree.parent(&"elbow").unwrap(), Some(&"shoulder"));
/// assert!(tree.is_ancestor(&"base", &"elbow").unwrap());
/// assert!(!tree.is_ancestor(&"elbow", &"base").unwrap());
/// ```
pub struct Tree<K, V> {
    /// 全部节点的扁平映射，唯一持有所有值
    pub(crate) nodes: HashMap<K, V>,
    /// 每个节点到其（可选）父节点的映射
    pub(crate) parents: HashMap<K, Option<K>>,
    /// 每个节点到其子节点列表的映射（按插入顺序）
    pub(crate) children: HashMap<K, Vec<K>>,
}

impl<K: Eq + Hash + Clone, V> Tree<K, V> {
    /// 创建空树
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            parents: HashMap::new(),
            children: HashMap::new(),
        }
    }

    /// 节点总数
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// 树是否为空
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 是否存在键为 `key` 的节点，O(1)
    pub fn contains(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    /// 按键取值，O(1)
    pub fn get(&self, key: &K) -> Option<&V> {
        self.nodes.get(key)
    }

    /// 按键取可变值，O(1)
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.nodes.get_mut(key)
    }

    /// 插入一个无父节点的根节点，O(1)
    ///
    /// 键已存在时返回 [`TreeError::DuplicateKey`]，树保持原样。
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TreeError> {
        if self.contains(&key) {
            return Err(TreeError::DuplicateKey);
        }
        self.parents.insert(key.clone(), None);
        self.children.insert(key.clone(), Vec::new());
        self.nodes.insert(key, value);
        Ok(())
    }

    /// 在 `parent` 下插入一个子节点，O(1)
    ///
    /// 父节点不存在返回 [`TreeError::UnknownParent`]，键已存在返回
    /// [`TreeError::DuplicateKey`]；两种失败都不产生任何副作用。
    /// 成功时父指针和父节点的子列表作为一个逻辑操作同时更新，
    /// 不存在"已创建未挂接"的中间状态。
    pub fn insert_child(&mut self, parent: &K, key: K, value: V) -> Result<(), TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownParent);
        }
        if self.contains(&key) {
            return Err(TreeError::DuplicateKey);
        }
        self.parents.insert(key.clone(), Some(parent.clone()));
        self.children.insert(key.clone(), Vec::new());
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(key.clone());
        }
        self.nodes.insert(key, value);
        Ok(())
    }

    /// 返回节点的父键（根节点为 `None`），O(1)
    ///
    /// 键不存在时返回 [`TreeError::UnknownKey`]。
    pub fn parent(&self, key: &K) -> Result<Option<&K>, TreeError> {
        self.parents
            .get(key)
            .map(Option::as_ref)
            .ok_or(TreeError::UnknownKey)
    }

    /// 节点深度（根为 0），O(depth)
    pub fn depth(&self, key: &K) -> Result<usize, TreeError> {
        if !self.contains(key) {
            return Err(TreeError::UnknownKey);
        }
        // 祖先链含节点自身
        Ok(self.ancestors(key).count() - 1)
    }

    /// 判定 `candidate` 是否为 `key` 的祖先，O(depth)
    ///
    /// 沿 `key` 的父指针链上行；节点是自身的祖先。`key` 不存在时
    /// 返回 [`TreeError::UnknownKey`]（严格前置条件约定）；
    /// `candidate` 不存在只是永远找不到，返回 `Ok(false)`。
    pub fn is_ancestor(&self, candidate: &K, key: &K) -> Result<bool, TreeError> {
        if !self.contains(key) {
            return Err(TreeError::UnknownKey);
        }
        Ok(self.ancestors(key).any(|(k, _)| k == candidate))
    }

    /// 判定 `candidate` 是否为 `key` 的后代，O(candidate 的深度)
    ///
    /// 逆关系，等价于 `is_ancestor(key, candidate)`。
    pub fn is_descendant(&self, candidate: &K, key: &K) -> Result<bool, TreeError> {
        self.is_ancestor(key, candidate)
    }

    /// 祖先链迭代器：从 `key`（含自身）沿父指针走到根
    ///
    /// 键不存在时迭代器为空（严格判定请用 [`Tree::is_ancestor`]）。
    pub fn ancestors(&self, key: &K) -> Ancestors<'_, K, V> {
        Ancestors::new(self, key)
    }

    /// 直接子节点迭代器，按插入顺序
    pub fn children(&self, key: &K) -> Children<'_, K, V> {
        Children::new(self, key)
    }

    /// 子树遍历迭代器（含 `key` 自身），深度以 `key` 为 0 计
    pub fn descendants(
        &self,
        key: &K,
        order: SearchOrder,
        max_depth: usize,
    ) -> Descendants<'_, K, V> {
        Descendants::new(self, key, order, max_depth)
    }

    /// 整树遍历迭代器：从所有根出发
    ///
    /// 根之间的顺序跟随底层 HashMap，不保证确定性。
    pub fn iter_search(&self, order: SearchOrder, max_depth: usize) -> Descendants<'_, K, V> {
        Descendants::from_roots(self, order, max_depth)
    }

    /// 根节点迭代器（O(n) 扫描）
    pub fn roots(&self) -> Roots<'_, K, V> {
        Roots::new(self)
    }

    /// 解除节点与其父节点的关联，节点成为根
    ///
    /// O(兄弟数)。键不存在时返回 [`TreeError::UnknownKey`]。
    pub fn clear_parent(&mut self, key: &K) -> Result<(), TreeError> {
        let slot = self.parents.get_mut(key).ok_or(TreeError::UnknownKey)?;
        let old_parent = slot.take();
        if let Some(old_parent) = old_parent
            && let Some(siblings) = self.children.get_mut(&old_parent)
            && let Some(position) = siblings.iter().position(|k| k == key)
        {
            siblings.remove(position);
        }
        Ok(())
    }

    /// 解除节点与其所有子节点的关联，子节点各自成为根
    ///
    /// O(子节点数)。键不存在时返回 [`TreeError::UnknownKey`]。
    pub fn clear_children(&mut self, key: &K) -> Result<(), TreeError> {
        let kids = self.children.get_mut(key).ok_or(TreeError::UnknownKey)?;
        for child in std::mem::take(kids) {
            if let Some(slot) = self.parents.get_mut(&child) {
                *slot = None;
            }
        }
        Ok(())
    }

    /// 把节点挂接到新的父节点下，并解除旧的父子关联
    ///
    /// O(兄弟数)。`key` 不存在返回 [`TreeError::UnknownKey`]，
    /// `parent` 不存在返回 [`TreeError::UnknownParent`]。
    ///
    /// 调用方必须保证不把节点挂到自己的后代下面（无环不变量），
    /// 容器只在 debug 构建中断言。
    pub fn set_parent(&mut self, key: &K, parent: &K) -> Result<(), TreeError> {
        if !self.contains(key) {
            return Err(TreeError::UnknownKey);
        }
        if !self.contains(parent) {
            return Err(TreeError::UnknownParent);
        }
        debug_assert!(
            !self.is_ancestor(key, parent).unwrap_or(false),
            "set_parent would create a cycle"
        );

        self.clear_parent(key)?;
        self.parents.insert(key.clone(), Some(parent.clone()));
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(key.clone());
        }
        Ok(())
    }

    /// 把 `child` 挂接为 `key` 的子节点（[`Tree::set_parent`] 的别名视角）
    pub fn add_child(&mut self, key: &K, child: &K) -> Result<(), TreeError> {
        self.set_parent(child, key)
    }
}

impl<K: Eq + Hash + Clone, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// 深度优先、按深度缩进的树形打印
impl<K: Eq + Hash + Clone + fmt::Display, V: fmt::Display> fmt::Display for Tree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter_search(SearchOrder::DepthFirst, usize::MAX) {
            let depth = self.depth(key).unwrap_or(0);
            for _ in 0..depth {
                write!(f, "  ")?;
            }
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}
