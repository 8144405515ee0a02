//! 资源定位器抽象接口
//!
//! 提供在一个加载作用域内枚举和读取同名配置资源的能力

use factories_common::ResourceError;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// 资源定位器 trait
///
/// 同一个资源位置可能出现在多个根目录下，`find_resources` 按发现顺序返回全部匹配。
pub trait ResourceLocator: Send + Sync + Debug {
    /// 查找指定位置的所有资源
    fn find_resources(&self, location: &str) -> Result<Vec<ResourceHandle>, ResourceError>;

    /// 读取资源内容
    fn read_resource(&self, handle: &ResourceHandle) -> Result<String, ResourceError>;

    /// 获取定位器名称
    fn name(&self) -> &str;
}

/// 资源句柄
///
/// `origin` 是资源的可读来源描述，出错时用于定位具体资源。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    origin: String,
    path: Option<PathBuf>,
}

impl ResourceHandle {
    /// 创建新的资源句柄
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            path: None,
        }
    }

    /// 创建指向文件系统路径的资源句柄
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            origin: path.display().to_string(),
            path: Some(path),
        }
    }

    /// 资源来源
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// 文件系统路径（如果有）
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl std::fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.origin)
    }
}
