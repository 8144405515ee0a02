//! 工厂加载器抽象接口
//!
//! 提供按工厂类型加载实现标识和实例化实现的能力

use crate::registry::FactoryNames;
use crate::scope::LoaderScope;
use factories_common::{FactoriesResult, FactoryType};
use std::sync::Arc;

/// 工厂加载器 trait
///
/// `scope` 为 `None` 时使用加载器的默认作用域。
pub trait FactoriesLoader: Send + Sync {
    /// 加载工厂类型对应的实现标识
    ///
    /// 未声明的工厂类型返回空列表；只有资源读取或解析失败时才会返回错误。
    fn load_factory_names(
        &self,
        factory_type: &str,
        scope: Option<&LoaderScope>,
    ) -> FactoriesResult<Vec<String>>;

    /// 加载并实例化工厂类型 `T` 的所有实现，按优先级排序
    ///
    /// 任意一个实现无法解析、类型不匹配或构造失败时，整个调用失败。
    fn load_factories<T>(&self, scope: Option<&LoaderScope>) -> FactoriesResult<Vec<Box<T>>>
    where
        T: FactoryType + ?Sized;

    /// 获取作用域内的完整注册表快照
    fn load_all(&self, scope: Option<&LoaderScope>) -> FactoriesResult<Arc<FactoryNames>>;

    /// 作用域的注册表是否已缓存
    fn is_cached(&self, scope: Option<&LoaderScope>) -> bool;

    /// 加载工厂类型 `T` 对应的实现标识
    fn load_factory_names_of<T>(&self, scope: Option<&LoaderScope>) -> FactoriesResult<Vec<String>>
    where
        T: FactoryType + ?Sized,
    {
        self.load_factory_names(T::factory_type_name(), scope)
    }
}
