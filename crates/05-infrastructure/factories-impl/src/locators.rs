//! 资源定位器实现

use factories_abstractions::{ResourceHandle, ResourceLocator};
use factories_common::ResourceError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 基于目录的资源定位器
///
/// 每个根目录相当于一个类路径条目，按添加顺序查找 `root/location`。
#[derive(Debug, Clone)]
pub struct DirectoryResourceLocator {
    roots: Vec<PathBuf>,
}

impl DirectoryResourceLocator {
    /// 创建新的目录资源定位器
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// 从 glob 模式创建定位器
    ///
    /// 每个模式的匹配结果按字典序展开，只保留目录；不含通配符的模式原样保留。
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, ResourceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roots = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if !is_glob_pattern(pattern) {
                roots.push(PathBuf::from(pattern));
                continue;
            }

            let paths = glob::glob(pattern)
                .map_err(|e| ResourceError::enumeration(pattern, e.to_string()))?;
            for entry in paths {
                match entry {
                    Ok(path) if path.is_dir() => roots.push(path),
                    Ok(path) => debug!("跳过非目录匹配: {}", path.display()),
                    Err(e) => warn!("无法访问匹配路径: {}", e),
                }
            }
        }

        debug!("展开资源根目录 {} 个", roots.len());
        Ok(Self { roots })
    }

    /// 所有根目录
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ResourceLocator for DirectoryResourceLocator {
    fn find_resources(&self, location: &str) -> Result<Vec<ResourceHandle>, ResourceError> {
        if Path::new(location).is_absolute() {
            return Err(ResourceError::enumeration(location, "资源位置必须是相对路径"));
        }

        let mut handles = Vec::new();
        for root in &self.roots {
            if !root.is_dir() {
                debug!("资源根目录不存在，跳过: {}", root.display());
                continue;
            }
            let candidate = root.join(location);
            if candidate.is_file() {
                debug!("发现工厂资源: {}", candidate.display());
                handles.push(ResourceHandle::from_path(candidate));
            }
        }
        Ok(handles)
    }

    fn read_resource(&self, handle: &ResourceHandle) -> Result<String, ResourceError> {
        let path = handle.path().ok_or_else(|| ResourceError::NotFound {
            origin: handle.origin().to_string(),
        })?;
        std::fs::read_to_string(path).map_err(|source| ResourceError::Read {
            origin: handle.origin().to_string(),
            source,
        })
    }

    fn name(&self) -> &str {
        "DirectoryResourceLocator"
    }
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// 内存资源
#[derive(Debug, Clone)]
struct InMemoryResource {
    origin: String,
    location: String,
    content: String,
}

/// 内存资源定位器
///
/// 用于通过 `include_str!` 嵌入的资源以及测试。
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceLocator {
    resources: Vec<InMemoryResource>,
}

impl InMemoryResourceLocator {
    /// 创建空的内存资源定位器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加资源
    ///
    /// `source` 相当于资源所在的归档名称，用于生成 `memory:{source}!/{location}` 形式的来源。
    /// 来源重复时追加 `#{序号}`，保证每个资源可以被单独读取。
    pub fn with_resource(
        mut self,
        source: impl AsRef<str>,
        location: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let location = location.into();
        let mut origin = format!("memory:{}!/{}", source.as_ref(), location);
        if self.resources.iter().any(|resource| resource.origin == origin) {
            origin = format!("{}#{}", origin, self.resources.len());
        }
        self.resources.push(InMemoryResource {
            origin,
            location,
            content: content.into(),
        });
        self
    }

    /// 资源数量
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// 是否没有资源
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceLocator for InMemoryResourceLocator {
    fn find_resources(&self, location: &str) -> Result<Vec<ResourceHandle>, ResourceError> {
        Ok(self
            .resources
            .iter()
            .filter(|resource| resource.location == location)
            .map(|resource| ResourceHandle::new(resource.origin.clone()))
            .collect())
    }

    fn read_resource(&self, handle: &ResourceHandle) -> Result<String, ResourceError> {
        self.resources
            .iter()
            .find(|resource| resource.origin == handle.origin())
            .map(|resource| resource.content.clone())
            .ok_or_else(|| ResourceError::NotFound {
                origin: handle.origin().to_string(),
            })
    }

    fn name(&self) -> &str {
        "InMemoryResourceLocator"
    }
}
