//! 工厂定义抽象接口
//!
//! 用编译时注册的构造函数替代按名称反射加载类型：
//! 一个实现标识对应一个 [`FactoryDefinition`]，定义中为每个可赋值的工厂类型
//! 保存一个无参构造函数。

use factories_common::{BoxError, FactoriesError, FactoriesResult, FactoryType, Ordered};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// 类型擦除后的构造函数
///
/// 返回值是装在 `Box<dyn Any>` 中的 `Box<T>`，`T` 为工厂类型。
pub type ErasedConstructor = Arc<dyn Fn() -> Result<Box<dyn Any>, BoxError> + Send + Sync>;

/// 工厂定义
#[derive(Clone)]
pub struct FactoryDefinition {
    /// 实现标识
    name: String,
    /// 显式优先级
    priority: Option<i32>,
    /// 工厂类型 -> 构造函数
    constructors: HashMap<TypeId, ErasedConstructor>,
    /// 可赋值的工厂类型标识
    factory_types: Vec<&'static str>,
}

impl FactoryDefinition {
    /// 创建新的工厂定义
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: None,
            constructors: HashMap::new(),
            factory_types: Vec::new(),
        }
    }

    /// 设置优先级，数值越小越靠前
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// 声明该实现可以作为工厂类型 `T` 构造
    pub fn provides<T, F>(mut self, constructor: F) -> Self
    where
        T: FactoryType + ?Sized,
        F: Fn() -> Result<Box<T>, BoxError> + Send + Sync + 'static,
    {
        let erased: ErasedConstructor =
            Arc::new(move || constructor().map(|instance| Box::new(instance) as Box<dyn Any>));

        if self.constructors.insert(TypeId::of::<T>(), erased).is_none() {
            self.factory_types.push(T::factory_type_name());
        }
        self
    }

    /// 实现标识
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 可赋值的工厂类型标识
    pub fn factory_types(&self) -> &[&'static str] {
        &self.factory_types
    }

    /// 是否可以赋值给工厂类型 `T`
    pub fn is_assignable_to<T: FactoryType + ?Sized>(&self) -> bool {
        self.constructors.contains_key(&TypeId::of::<T>())
    }

    /// 构造工厂类型 `T` 的实例
    pub fn instantiate<T: FactoryType + ?Sized>(&self) -> FactoriesResult<Box<T>> {
        let factory_type = T::factory_type_name();
        let constructor = self
            .constructors
            .get(&TypeId::of::<T>())
            .ok_or_else(|| FactoriesError::type_mismatch(&self.name, factory_type))?;

        trace!("实例化工厂: {} ({})", self.name, factory_type);

        let erased = constructor().map_err(|source| FactoriesError::Instantiation {
            implementation: self.name.clone(),
            factory_type: factory_type.to_string(),
            source,
        })?;

        erased
            .downcast::<Box<T>>()
            .map(|instance| *instance)
            .map_err(|_| FactoriesError::type_mismatch(&self.name, factory_type))
    }
}

impl Ordered for FactoryDefinition {
    fn priority(&self) -> Option<i32> {
        self.priority
    }
}

impl std::fmt::Debug for FactoryDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryDefinition")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("factory_types", &self.factory_types)
            .field("constructors", &"<function>")
            .finish()
    }
}

/// 工厂定义目录 trait
///
/// 实现标识到工厂定义的映射，通常在启动时由应用填充。
pub trait FactoryCatalog: Send + Sync {
    /// 注册工厂定义
    fn register(&self, definition: FactoryDefinition) -> FactoriesResult<()>;

    /// 根据实现标识查找工厂定义
    fn definition(&self, implementation: &str) -> Option<Arc<FactoryDefinition>>;

    /// 检查实现标识是否已注册
    fn contains(&self, implementation: &str) -> bool {
        self.definition(implementation).is_some()
    }

    /// 所有已注册的实现标识
    fn implementation_names(&self) -> Vec<String>;
}
