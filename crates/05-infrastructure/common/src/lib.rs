//! # Factories Common
//!
//! 这个 crate 提供了 Lorn Factories 工厂加载机制的公共类型和工具。
//!
//! ## 核心内容
//!
//! - [`FactoriesError`] - 工厂加载错误类型
//! - [`ResourceError`] - 资源枚举、读取与解析错误
//! - [`FactoryType`] - 工厂类型标识
//! - [`Ordered`] - 显式优先级排序
//!
//! ## 设计原则
//!
//! - 编译时注册的工厂函数替代运行时反射
//! - 显式的优先级字段替代注解扫描
//! - 所有错误同步返回给调用方

pub mod errors;
pub mod metadata;
pub mod ordering;

pub use errors::*;
pub use metadata::*;
pub use ordering::*;
