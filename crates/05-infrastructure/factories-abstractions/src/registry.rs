//! 工厂名称注册表
//!
//! 工厂类型标识到实现标识列表的有序映射，是一个作用域全部资源解析后的快照。

use indexmap::IndexMap;
use serde::Serialize;

/// 单个资源贡献的注册条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// 工厂类型标识
    pub factory_type: String,
    /// 按声明顺序排列的实现标识
    pub implementations: Vec<String>,
}

impl RegistryEntry {
    /// 创建新的注册条目
    pub fn new(factory_type: impl Into<String>, implementations: Vec<String>) -> Self {
        Self {
            factory_type: factory_type.into(),
            implementations,
        }
    }
}

/// 工厂名称注册表
///
/// 同一工厂类型的多次贡献按顺序追加，不去重。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FactoryNames {
    entries: IndexMap<String, Vec<String>>,
}

impl FactoryNames {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个实现标识
    pub fn add(&mut self, factory_type: impl Into<String>, implementation: impl Into<String>) {
        self.entries
            .entry(factory_type.into())
            .or_default()
            .push(implementation.into());
    }

    /// 合并一个注册条目，没有实现标识的条目不产生映射
    pub fn add_entry(&mut self, entry: RegistryEntry) {
        if entry.implementations.is_empty() {
            return;
        }
        self.entries
            .entry(entry.factory_type)
            .or_default()
            .extend(entry.implementations);
    }

    /// 获取工厂类型对应的实现标识，未注册时返回空切片
    pub fn get(&self, factory_type: &str) -> &[String] {
        self.entries
            .get(factory_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 是否包含工厂类型
    pub fn contains(&self, factory_type: &str) -> bool {
        self.entries.contains_key(factory_type)
    }

    /// 所有工厂类型标识（按首次出现顺序）
    pub fn factory_types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// 遍历所有条目
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// 工厂类型数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<RegistryEntry> for FactoryNames {
    fn extend<I: IntoIterator<Item = RegistryEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.add_entry(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contributions_append_in_order() {
        let mut names = FactoryNames::new();
        names.add_entry(RegistryEntry::new(
            "A",
            vec!["impl1".to_string(), "impl2".to_string()],
        ));
        names.add_entry(RegistryEntry::new("B", vec!["other".to_string()]));
        names.add_entry(RegistryEntry::new("A", vec!["impl3".to_string()]));

        assert_eq!(names.get("A"), ["impl1", "impl2", "impl3"]);
        assert_eq!(names.factory_types().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn empty_entry_adds_no_type() {
        let mut names = FactoryNames::new();
        names.add_entry(RegistryEntry::new("A", Vec::new()));
        assert!(!names.contains("A"));
    }

    #[test]
    fn duplicates_are_preserved() {
        let mut names = FactoryNames::new();
        names.add("A", "impl1");
        names.add("A", "impl1");

        assert_eq!(names.get("A").len(), 2);
    }

    #[test]
    fn missing_type_is_empty() {
        let names = FactoryNames::new();
        assert!(names.get("missing").is_empty());
        assert!(!names.contains("missing"));
        assert!(names.is_empty());
    }

    #[test]
    fn serializes_as_ordered_map() {
        let mut names = FactoryNames::new();
        names.add("z.Type", "z.Impl");
        names.add("a.Type", "a.Impl");

        let json = serde_json::to_string(&names).unwrap();
        assert_eq!(json, r#"{"z.Type":["z.Impl"],"a.Type":["a.Impl"]}"#);
    }
}
