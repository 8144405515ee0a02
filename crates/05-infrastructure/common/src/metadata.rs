//! 工厂类型元数据
//!
//! 资源文件中的键是工厂类型标识字符串，这里把 Rust 类型（通常是 trait object）
//! 与该标识关联起来。

/// 工厂类型标识 trait
///
/// 为 `dyn Trait` 实现此 trait 后，即可通过 `load_factories::<dyn Trait>` 加载实现。
/// 默认标识为 [`std::any::type_name`]，资源文件通常需要一个稳定的名称，
/// 推荐使用 [`factory_type!`](crate::factory_type) 显式声明。
pub trait FactoryType: 'static {
    /// 资源文件中使用的类型标识
    fn factory_type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// 为类型声明工厂类型标识
///
/// ```rust
/// use factories_common::{factory_type, FactoryType};
///
/// pub trait ApplicationListener {
///     fn on_event(&self, event: &str);
/// }
///
/// factory_type!(dyn ApplicationListener => "org.example.ApplicationListener");
///
/// assert_eq!(
///     <dyn ApplicationListener>::factory_type_name(),
///     "org.example.ApplicationListener"
/// );
/// ```
#[macro_export]
macro_rules! factory_type {
    ($ty:ty => $name:expr) => {
        impl $crate::FactoryType for $ty {
            fn factory_type_name() -> &'static str {
                $name
            }
        }
    };
    ($ty:ty) => {
        impl $crate::FactoryType for $ty {}
    };
}

/// 获取简短的类型名称（不包含模块路径）
pub fn short_type_name(name: &str) -> &str {
    name.rsplit(['.', ':']).next().unwrap_or(name)
}
