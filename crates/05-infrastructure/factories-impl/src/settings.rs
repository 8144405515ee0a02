//! 加载器配置
//!
//! 配置来源优先级：环境变量（前缀 `FACTORIES`）高于配置文件，配置文件高于默认值。

use factories_abstractions::FACTORIES_RESOURCE_LOCATION;
use factories_common::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "FACTORIES";

/// 加载器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// 工厂资源的相对位置
    pub resource_location: String,
    /// 资源根目录，支持 glob 模式
    pub search_paths: Vec<String>,
    /// 默认作用域名称
    pub scope_name: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            resource_location: FACTORIES_RESOURCE_LOCATION.to_string(),
            search_paths: Vec::new(),
            scope_name: "default".to_string(),
        }
    }
}

impl LoaderConfig {
    /// 从可选的 TOML 配置文件和环境变量加载配置
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载加载器配置文件: {}", path.display());
            builder = builder.add_source(
                ::config::File::from(path).format(::config::FileFormat::Toml),
            );
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("search_paths"),
            )
            .build()
            .map_err(|e| {
                error!("加载器配置构建失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        let config: Self = settings.try_deserialize().map_err(|e| {
            error!("加载器配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        let location = self.resource_location.trim();
        if location.is_empty() {
            return Err(ConfigError::validation("resource_location 不能为空"));
        }
        if Path::new(location).is_absolute() {
            return Err(ConfigError::validation(format!(
                "resource_location 必须是相对路径: {location}"
            )));
        }
        if self.scope_name.trim().is_empty() {
            return Err(ConfigError::validation("scope_name 不能为空"));
        }
        Ok(())
    }

    /// 设置资源位置
    pub fn with_resource_location(mut self, location: impl Into<String>) -> Self {
        self.resource_location = location.into();
        self
    }

    /// 添加资源根目录
    pub fn add_search_path(mut self, path: impl Into<String>) -> Self {
        self.search_paths.push(path.into());
        self
    }
}
