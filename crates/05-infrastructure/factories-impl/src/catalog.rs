//! 工厂定义目录实现

use factories_abstractions::{FactoryCatalog, FactoryDefinition};
use factories_common::{FactoriesError, FactoriesResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 线程安全的工厂定义目录
#[derive(Debug, Default)]
pub struct FactoryCatalogImpl {
    definitions: RwLock<HashMap<String, Arc<FactoryDefinition>>>,
}

impl FactoryCatalogImpl {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 批量注册工厂定义
    pub fn with_definitions<I>(definitions: I) -> FactoriesResult<Self>
    where
        I: IntoIterator<Item = FactoryDefinition>,
    {
        let catalog = Self::new();
        for definition in definitions {
            catalog.register(definition)?;
        }
        Ok(catalog)
    }

    /// 已注册的定义数量
    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }
}

impl FactoryCatalog for FactoryCatalogImpl {
    fn register(&self, definition: FactoryDefinition) -> FactoriesResult<()> {
        let name = definition.name().trim().to_string();
        if name.is_empty() {
            return Err(FactoriesError::registration(
                definition.name(),
                "实现标识不能为空",
            ));
        }
        if name != definition.name() {
            return Err(FactoriesError::registration(
                definition.name(),
                "实现标识不能包含首尾空白",
            ));
        }

        let mut definitions = self.definitions.write();
        if definitions.contains_key(&name) {
            return Err(FactoriesError::registration(name, "实现标识已注册"));
        }

        debug!(
            "注册工厂定义: {} -> {:?}",
            name,
            definition.factory_types()
        );
        definitions.insert(name, Arc::new(definition));
        Ok(())
    }

    fn definition(&self, implementation: &str) -> Option<Arc<FactoryDefinition>> {
        self.definitions.read().get(implementation).cloned()
    }

    fn implementation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.definitions.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_and_resolves_definitions() {
        let catalog = FactoryCatalogImpl::with_definitions([
            FactoryDefinition::new("example.B"),
            FactoryDefinition::new("example.A"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("example.A"));
        assert!(catalog.definition("example.missing").is_none());
        assert_eq!(catalog.implementation_names(), vec!["example.A", "example.B"]);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let catalog = FactoryCatalogImpl::new();
        catalog.register(FactoryDefinition::new("example.A")).unwrap();

        let error = catalog
            .register(FactoryDefinition::new("example.A"))
            .unwrap_err();
        assert!(matches!(error, FactoriesError::Registration { .. }));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn blank_or_padded_names_are_rejected() {
        let catalog = FactoryCatalogImpl::new();

        assert!(catalog.register(FactoryDefinition::new("  ")).is_err());
        assert!(catalog.register(FactoryDefinition::new(" example.A")).is_err());
        assert!(catalog.is_empty());
    }
}
