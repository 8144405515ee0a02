//! 优先级排序
//!
//! 数值越小越靠前；未声明优先级的条目视为 [`LOWEST_PRECEDENCE`]。
//! 排序是稳定的，相同优先级保持原有的发现顺序。

/// 最高优先级
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;

/// 最低优先级，也是未声明优先级时的默认值
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// 可排序条目 trait
pub trait Ordered {
    /// 显式声明的优先级
    fn priority(&self) -> Option<i32>;

    /// 参与排序的实际优先级
    fn effective_priority(&self) -> i32 {
        effective_priority(self.priority())
    }
}

/// 将可选优先级转换为实际优先级
pub fn effective_priority(priority: Option<i32>) -> i32 {
    priority.unwrap_or(LOWEST_PRECEDENCE)
}

/// 对实现了 [`Ordered`] 的条目进行稳定排序
pub fn sort_ordered<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(Ordered::effective_priority);
}

/// 按附带的优先级对条目进行稳定排序，并丢弃优先级
pub fn sort_by_priority<T>(mut items: Vec<(Option<i32>, T)>) -> Vec<T> {
    items.sort_by_key(|(priority, _)| effective_priority(*priority));
    items.into_iter().map(|(_, item)| item).collect()
}
