//! 加载作用域
//!
//! 作用域决定了哪些资源可见，同时也是注册表缓存的键。

use crate::locator::ResourceLocator;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// 作用域标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(Uuid);

impl ScopeId {
    /// 生成新的作用域标识
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ScopeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// 加载作用域
///
/// 克隆后的作用域共享同一个标识；分别创建的作用域即使使用相同的定位器，
/// 也拥有各自独立的缓存。
#[derive(Debug, Clone)]
pub struct LoaderScope {
    id: ScopeId,
    name: String,
    locator: Arc<dyn ResourceLocator>,
}

impl LoaderScope {
    /// 创建新的加载作用域
    pub fn new(name: impl Into<String>, locator: Arc<dyn ResourceLocator>) -> Self {
        Self {
            id: ScopeId::new(),
            name: name.into(),
            locator,
        }
    }

    /// 作用域标识
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// 作用域名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 作用域内的资源定位器
    pub fn locator(&self) -> &dyn ResourceLocator {
        self.locator.as_ref()
    }
}

impl fmt::Display for LoaderScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
