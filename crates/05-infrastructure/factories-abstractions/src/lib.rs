//! # Factories Abstractions
//!
//! 工厂发现抽象层，定义资源定位、加载作用域、工厂注册和加载的核心接口。
//!
//! ## 核心接口
//!
//! - [`ResourceLocator`] - 资源定位器接口
//! - [`LoaderScope`] - 加载作用域
//! - [`FactoryNames`] - 工厂类型到实现标识的有序映射
//! - [`FactoryCatalog`] - 工厂定义目录接口
//! - [`FactoriesLoader`] - 工厂加载器接口

pub mod factory;
pub mod loader;
pub mod locator;
pub mod registry;
pub mod scope;

pub use factory::*;
pub use loader::*;
pub use locator::*;
pub use registry::*;
pub use scope::*;

/// 默认的工厂资源位置，可以存在于多个资源根目录中
pub const FACTORIES_RESOURCE_LOCATION: &str = "META-INF/spring.factories";
