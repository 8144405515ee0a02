//! 带缓存的工厂加载器实现
//!
//! 每个加载作用域的注册表只构建一次：枚举资源 → 解析 → 合并 → 缓存。
//! 构建失败时不缓存任何内容，后续调用会重新尝试。

use crate::catalog::FactoryCatalogImpl;
use crate::locators::DirectoryResourceLocator;
use crate::properties::parse_properties;
use crate::settings::LoaderConfig;
use dashmap::DashMap;
use factories_abstractions::{
    FactoriesLoader, FactoryCatalog, FactoryNames, LoaderScope, RegistryEntry, ResourceHandle,
    ResourceLocator, ScopeId, FACTORIES_RESOURCE_LOCATION,
};
use factories_common::{
    short_type_name, sort_by_priority, FactoriesError, FactoriesResult, FactoryType, Ordered,
    ResourceError,
};
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// 工厂加载器实现
pub struct FactoriesLoaderImpl {
    /// 工厂资源位置
    resource_location: String,
    /// 未指定作用域时使用的默认作用域
    default_scope: LoaderScope,
    /// 工厂定义目录
    catalog: Arc<dyn FactoryCatalog>,
    /// 作用域 -> 注册表快照
    cache: DashMap<ScopeId, Arc<FactoryNames>>,
}

impl FactoriesLoaderImpl {
    /// 创建使用默认资源位置的加载器
    pub fn new(default_scope: LoaderScope, catalog: Arc<dyn FactoryCatalog>) -> Self {
        Self {
            resource_location: FACTORIES_RESOURCE_LOCATION.to_string(),
            default_scope,
            catalog,
            cache: DashMap::new(),
        }
    }

    /// 创建加载器构建器
    pub fn builder() -> FactoriesLoaderBuilder {
        FactoriesLoaderBuilder::new()
    }

    /// 工厂资源位置
    pub fn resource_location(&self) -> &str {
        &self.resource_location
    }

    /// 默认作用域
    pub fn default_scope(&self) -> &LoaderScope {
        &self.default_scope
    }

    /// 工厂定义目录
    pub fn catalog(&self) -> &Arc<dyn FactoryCatalog> {
        &self.catalog
    }

    fn scope_or_default<'a>(&'a self, scope: Option<&'a LoaderScope>) -> &'a LoaderScope {
        scope.unwrap_or(&self.default_scope)
    }

    /// 获取作用域的注册表，首次访问时构建并缓存
    fn registry(&self, scope: &LoaderScope) -> FactoriesResult<Arc<FactoryNames>> {
        if let Some(cached) = self.cache.get(&scope.id()) {
            trace!("命中注册表缓存: {}", scope);
            return Ok(Arc::clone(cached.value()));
        }

        debug!("构建注册表: {}", scope);
        let names = Arc::new(self.build_registry(scope)?);

        // 并发构建时以先写入的快照为准
        let stored = self.cache.entry(scope.id()).or_insert(names);
        let snapshot = Arc::clone(stored.value());
        drop(stored);

        info!(
            "作用域 {} 注册表构建完成，共 {} 个工厂类型",
            scope,
            snapshot.len()
        );
        Ok(snapshot)
    }

    fn build_registry(&self, scope: &LoaderScope) -> FactoriesResult<FactoryNames> {
        let locator = scope.locator();
        let handles = locator
            .find_resources(&self.resource_location)
            .map_err(|source| self.configuration_read_error(source))?;

        debug!(
            "作用域 {} 通过 {} 发现 {} 个工厂资源",
            scope,
            locator.name(),
            handles.len()
        );

        let mut names = FactoryNames::new();
        for handle in &handles {
            let entries = read_entries(locator, handle)
                .map_err(|source| self.configuration_read_error(source))?;
            names.extend(entries);
        }
        Ok(names)
    }

    fn configuration_read_error(&self, source: ResourceError) -> FactoriesError {
        error!("加载工厂资源失败: {}", source);
        FactoriesError::ConfigurationRead {
            location: self.resource_location.clone(),
            source,
        }
    }
}

/// 读取并解析单个资源
fn read_entries(
    locator: &dyn ResourceLocator,
    handle: &ResourceHandle,
) -> Result<Vec<RegistryEntry>, ResourceError> {
    let content = locator.read_resource(handle)?;
    let properties = parse_properties(&content).map_err(|e| ResourceError::Parse {
        origin: handle.origin().to_string(),
        line: e.line,
        message: e.message,
    })?;

    // 空值不产生条目；非空值中的空标识保留，在实例化时报告
    Ok(properties
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| {
            let implementations = value.split(',').map(str::trim).map(str::to_string).collect();
            RegistryEntry::new(key.trim(), implementations)
        })
        .collect())
}

impl FactoriesLoader for FactoriesLoaderImpl {
    fn load_factory_names(
        &self,
        factory_type: &str,
        scope: Option<&LoaderScope>,
    ) -> FactoriesResult<Vec<String>> {
        let scope = self.scope_or_default(scope);
        Ok(self.registry(scope)?.get(factory_type).to_vec())
    }

    fn load_factories<T>(&self, scope: Option<&LoaderScope>) -> FactoriesResult<Vec<Box<T>>>
    where
        T: FactoryType + ?Sized,
    {
        let factory_type = T::factory_type_name();
        let names = self.load_factory_names(factory_type, scope)?;
        trace!("已加载 [{}] 的实现: {:?}", short_type_name(factory_type), names);

        let mut instances = Vec::with_capacity(names.len());
        for name in &names {
            let definition = self
                .catalog
                .definition(name)
                .ok_or_else(|| FactoriesError::type_resolution(name, factory_type))?;
            let instance = definition.instantiate::<T>()?;
            instances.push((definition.priority(), instance));
        }

        Ok(sort_by_priority(instances))
    }

    fn load_all(&self, scope: Option<&LoaderScope>) -> FactoriesResult<Arc<FactoryNames>> {
        self.registry(self.scope_or_default(scope))
    }

    fn is_cached(&self, scope: Option<&LoaderScope>) -> bool {
        self.cache.contains_key(&self.scope_or_default(scope).id())
    }
}

impl std::fmt::Debug for FactoriesLoaderImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoriesLoaderImpl")
            .field("resource_location", &self.resource_location)
            .field("default_scope", &self.default_scope)
            .field("cached_scopes", &self.cache.len())
            .finish()
    }
}

/// 加载器构建器
#[derive(Default)]
pub struct FactoriesLoaderBuilder {
    resource_location: Option<String>,
    default_scope: Option<LoaderScope>,
    catalog: Option<Arc<dyn FactoryCatalog>>,
}

impl FactoriesLoaderBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 根据配置创建构建器，默认作用域使用配置中的资源根目录
    pub fn from_config(config: &LoaderConfig) -> FactoriesResult<Self> {
        config.validate().map_err(|e| FactoriesError::ConfigurationRead {
            location: config.resource_location.clone(),
            source: ResourceError::enumeration(&config.resource_location, e.to_string()),
        })?;

        let locator = DirectoryResourceLocator::from_patterns(&config.search_paths).map_err(
            |source| FactoriesError::ConfigurationRead {
                location: config.resource_location.clone(),
                source,
            },
        )?;

        Ok(Self::new()
            .with_resource_location(config.resource_location.trim())
            .with_default_scope(LoaderScope::new(
                config.scope_name.clone(),
                Arc::new(locator),
            )))
    }

    /// 设置资源位置
    pub fn with_resource_location(mut self, location: impl Into<String>) -> Self {
        self.resource_location = Some(location.into());
        self
    }

    /// 设置默认作用域
    pub fn with_default_scope(mut self, scope: LoaderScope) -> Self {
        self.default_scope = Some(scope);
        self
    }

    /// 设置工厂定义目录
    pub fn with_catalog(mut self, catalog: Arc<dyn FactoryCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// 构建加载器
    ///
    /// 未设置默认作用域时使用没有任何资源根目录的作用域；
    /// 未设置目录时使用空目录。
    pub fn build(self) -> FactoriesLoaderImpl {
        let default_scope = self.default_scope.unwrap_or_else(|| {
            LoaderScope::new(
                "default",
                Arc::new(DirectoryResourceLocator::new(Vec::<std::path::PathBuf>::new())),
            )
        });
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(FactoryCatalogImpl::new()));

        let mut loader = FactoriesLoaderImpl::new(default_scope, catalog);
        if let Some(location) = self.resource_location {
            loader.resource_location = location;
        }
        debug!(
            "工厂加载器已创建: location={}, scope={}",
            loader.resource_location, loader.default_scope
        );
        loader
    }
}
