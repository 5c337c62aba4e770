//! 锁保护的共享值单元
//!
//! 槽位永远有值，不阻塞，适合多线程共享的配置/标定参数。
//! 需要交接所有权时用 [`AtomicBuffer`](crate::AtomicBuffer)。

use parking_lot::Mutex;

/// 互斥锁保护的值单元
///
/// `load` 返回克隆（`T: Clone`），`store`/`swap`/`update` 整体替换或
/// 原地修改。所有操作都是短临界区，无条件变量、无等待。
pub struct AtomicCell<T> {
    value: Mutex<T>,
}

impl<T> AtomicCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
        }
    }

    /// 整体替换当前值
    pub fn store(&self, value: T) {
        *self.value.lock() = value;
    }

    /// 替换当前值并返回旧值
    pub fn swap(&self, value: T) -> T {
        std::mem::replace(&mut *self.value.lock(), value)
    }

    /// 在锁内原地修改当前值
    ///
    /// 闭包执行期间持有内部锁，应保持简短。
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut *self.value.lock());
    }

    /// 消耗单元，取回内部值
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }
}

impl<T: Clone> AtomicCell<T> {
    /// 取当前值的克隆
    pub fn load(&self) -> T {
        self.value.lock().clone()
    }
}

impl<T: Default> Default for AtomicCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_store_load() {
        let cell = AtomicCell::new(1);
        assert_eq!(cell.load(), 1);
        cell.store(2);
        assert_eq!(cell.load(), 2);
    }

    #[test]
    fn test_swap_returns_old_value() {
        let cell = AtomicCell::new("old");
        assert_eq!(cell.swap("new"), "old");
        assert_eq!(cell.load(), "new");
    }

    #[test]
    fn test_update_in_place() {
        let cell = AtomicCell::new(vec![1, 2]);
        cell.update(|v| v.push(3));
        assert_eq!(cell.load(), vec![1, 2, 3]);
    }

    #[test]
    fn test_concurrent_updates() {
        let cell = Arc::new(AtomicCell::new(0u64));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let cell = Arc::clone(&cell);
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    cell.update(|v| *v += 1);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cell.load(), 4000);
    }
}
