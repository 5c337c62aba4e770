//! 树的遍历迭代器
//!
//! [`Ancestors`] 沿父指针链惰性上行；其余视图在构造时一次性收集
//! 键序列（和节点总数同阶的临时内存），迭代期间借用整棵树，
//! 保证遍历过程中树不会被修改。

use crate::Tree;
use std::collections::VecDeque;
use std::hash::Hash;

/// 祖先链迭代器：从起始节点（含自身）沿父指针走到根
///
/// 每步 O(1)，整条链 O(depth)。起始键不存在时迭代器为空。
pub struct Ancestors<'a, K, V> {
    tree: &'a Tree<K, V>,
    current: Option<&'a K>,
}

impl<'a, K: Eq + Hash + Clone, V> Ancestors<'a, K, V> {
    pub(crate) fn new(tree: &'a Tree<K, V>, start: &K) -> Self {
        // 用树内存储的键引用，保证生命周期跟随树
        let current = tree.nodes.get_key_value(start).map(|(k, _)| k);
        Self { tree, current }
    }
}

impl<'a, K: Eq + Hash + Clone, V> Iterator for Ancestors<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.current?;
        let value = self.tree.nodes.get(key)?;
        self.current = self.tree.parents.get(key).and_then(|p| p.as_ref());
        Some((key, value))
    }
}

/// 直接子节点迭代器（不含起始节点本身）
pub struct Children<'a, K, V> {
    tree: &'a Tree<K, V>,
    keys: &'a [K],
    index: usize,
}

impl<'a, K: Eq + Hash + Clone, V> Children<'a, K, V> {
    pub(crate) fn new(tree: &'a Tree<K, V>, parent: &K) -> Self {
        let keys = tree.children.get(parent).map(Vec::as_slice).unwrap_or(&[]);
        Self {
            tree,
            keys,
            index: 0,
        }
    }
}

impl<'a, K: Eq + Hash + Clone, V> Iterator for Children<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.get(self.index)?;
        self.index += 1;
        Some((key, self.tree.nodes.get(key)?))
    }
}

/// 子树遍历迭代器（含起始节点），支持 BFS/DFS 和最大深度
///
/// 构造时按遍历顺序一次性收集键序列，构造 O(子树规模)。
pub struct Descendants<'a, K, V> {
    tree: &'a Tree<K, V>,
    keys: Vec<&'a K>,
    index: usize,
}

impl<'a, K: Eq + Hash + Clone, V> Descendants<'a, K, V> {
    pub(crate) fn new(
        tree: &'a Tree<K, V>,
        start: &K,
        order: crate::SearchOrder,
        max_depth: usize,
    ) -> Self {
        let mut keys = Vec::new();
        if let Some((start, _)) = tree.nodes.get_key_value(start) {
            collect(tree, start, order, max_depth, &mut keys);
        }
        Self {
            tree,
            keys,
            index: 0,
        }
    }

    /// 整树遍历：从所有根出发
    pub(crate) fn from_roots(
        tree: &'a Tree<K, V>,
        order: crate::SearchOrder,
        max_depth: usize,
    ) -> Self {
        let mut keys = Vec::with_capacity(tree.nodes.len());
        for (key, parent) in &tree.parents {
            if parent.is_none() {
                collect(tree, key, order, max_depth, &mut keys);
            }
        }
        Self {
            tree,
            keys,
            index: 0,
        }
    }
}

impl<'a, K: Eq + Hash + Clone, V> Iterator for Descendants<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = *self.keys.get(self.index)?;
        self.index += 1;
        Some((key, self.tree.nodes.get(key)?))
    }
}

fn collect<'a, K: Eq + Hash + Clone, V>(
    tree: &'a Tree<K, V>,
    start: &'a K,
    order: crate::SearchOrder,
    max_depth: usize,
    out: &mut Vec<&'a K>,
) {
    match order {
        crate::SearchOrder::BreadthFirst => {
            let mut frontier = VecDeque::new();
            frontier.push_back((0usize, start));
            while let Some((depth, key)) = frontier.pop_front() {
                out.push(key);
                if depth >= max_depth {
                    continue;
                }
                if let Some(kids) = tree.children.get(key) {
                    for child in kids {
                        frontier.push_back((depth + 1, child));
                    }
                }
            }
        },
        crate::SearchOrder::DepthFirst => {
            let mut stack = vec![(0usize, start)];
            while let Some((depth, key)) = stack.pop() {
                out.push(key);
                if depth >= max_depth {
                    continue;
                }
                if let Some(kids) = tree.children.get(key) {
                    // 逆序入栈，保证按插入顺序访问子节点
                    for child in kids.iter().rev() {
                        stack.push((depth + 1, child));
                    }
                }
            }
        },
    }
}

/// 根节点迭代器（没有父节点的节点）
///
/// 构造时 O(n) 扫描全树；顺序跟随底层 HashMap，不保证确定性。
pub struct Roots<'a, K, V> {
    tree: &'a Tree<K, V>,
    keys: Vec<&'a K>,
    index: usize,
}

impl<'a, K: Eq + Hash + Clone, V> Roots<'a, K, V> {
    pub(crate) fn new(tree: &'a Tree<K, V>) -> Self {
        let keys = tree
            .parents
            .iter()
            .filter(|(_, parent)| parent.is_none())
            .map(|(key, _)| key)
            .collect();
        Self {
            tree,
            keys,
            index: 0,
        }
    }
}

impl<'a, K: Eq + Hash + Clone, V> Iterator for Roots<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.get(self.index)?;
        self.index += 1;
        Some((*key, self.tree.nodes.get(*key)?))
    }
}
