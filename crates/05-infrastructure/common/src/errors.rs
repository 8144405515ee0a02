//! 错误类型定义

use thiserror::Error;

/// 装箱的通用错误类型，用于承载工厂构造函数返回的原始错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError { source: BoxError },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// 资源错误类型
///
/// 每个变体都携带出错资源的位置或来源，便于定位具体文件。
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("资源枚举失败: {location}, 原因: {message}")]
    Enumeration { location: String, message: String },

    #[error("资源读取失败: {origin}, 原因: {source}")]
    Read {
        origin: String,
        source: std::io::Error,
    },

    #[error("资源格式无效: {origin} 第 {line} 行, 原因: {message}")]
    Parse {
        origin: String,
        line: usize,
        message: String,
    },

    #[error("资源不存在: {origin}")]
    NotFound { origin: String },
}

impl ResourceError {
    /// 创建枚举错误
    pub fn enumeration(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Enumeration {
            location: location.into(),
            message: message.into(),
        }
    }

    /// 出错资源的来源（枚举错误时为资源位置）
    pub fn origin(&self) -> &str {
        match self {
            Self::Enumeration { location, .. } => location,
            Self::Read { origin, .. } | Self::Parse { origin, .. } | Self::NotFound { origin } => {
                origin
            }
        }
    }
}

/// 工厂加载错误类型
#[derive(Error, Debug)]
pub enum FactoriesError {
    #[error("无法从位置 [{location}] 加载工厂配置: {source}")]
    ConfigurationRead {
        location: String,
        source: ResourceError,
    },

    #[error("无法解析工厂实现: {implementation} (工厂类型: {factory_type})")]
    TypeResolution {
        implementation: String,
        factory_type: String,
    },

    #[error("实现类型 [{implementation}] 不能赋值给 [{factory_type}]")]
    TypeMismatch {
        implementation: String,
        factory_type: String,
    },

    #[error("无法实例化工厂实现: {implementation} (工厂类型: {factory_type}), 原因: {source}")]
    Instantiation {
        implementation: String,
        factory_type: String,
        source: BoxError,
    },

    #[error("工厂定义注册失败: {implementation}, 原因: {message}")]
    Registration {
        implementation: String,
        message: String,
    },
}

impl FactoriesError {
    /// 创建类型解析错误
    pub fn type_resolution(
        implementation: impl Into<String>,
        factory_type: impl Into<String>,
    ) -> Self {
        Self::TypeResolution {
            implementation: implementation.into(),
            factory_type: factory_type.into(),
        }
    }

    /// 创建类型不匹配错误
    pub fn type_mismatch(
        implementation: impl Into<String>,
        factory_type: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            implementation: implementation.into(),
            factory_type: factory_type.into(),
        }
    }

    /// 创建注册错误
    pub fn registration(implementation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Registration {
            implementation: implementation.into(),
            message: message.into(),
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ResourceResult<T> = Result<T, ResourceError>;
pub type FactoriesResult<T> = Result<T, FactoriesError>;
