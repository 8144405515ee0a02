//! # 工厂加载具体实现
//!
//! 提供 Properties 格式解析、资源定位器、工厂定义目录和带缓存的工厂加载器实现
//!
//! ## 主要组件
//!
//! - [`FactoriesLoaderImpl`] - 按作用域缓存注册表的工厂加载器
//! - [`FactoryCatalogImpl`] - 线程安全的工厂定义目录
//! - [`DirectoryResourceLocator`] - 基于目录的资源定位器
//! - [`InMemoryResourceLocator`] - 内存资源定位器
//! - [`LoaderConfig`] - 加载器配置

pub mod catalog;
pub mod loader;
pub mod locators;
pub mod properties;
pub mod settings;

pub use catalog::*;
pub use loader::*;
pub use locators::*;
pub use properties::parse_properties;
pub use settings::*;
