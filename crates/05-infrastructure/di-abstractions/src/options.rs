//! 配置选项存储

use infrastructure_common::{ConfigError, ConfigSection};
use serde::de::DeserializeOwned;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// 按类型存放的配置选项
///
/// 模块通过配置节绑定或代码动作填充选项，外部容器再按类型读取。
#[derive(Default)]
pub struct OptionsStore {
    entries: HashMap<TypeId, (&'static str, Box<dyn Any + Send + Sync>)>,
}

impl OptionsStore {
    /// 创建空的选项存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入选项，覆盖已有值
    pub fn insert<T>(&mut self, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.entries.insert(
            TypeId::of::<T>(),
            (std::any::type_name::<T>(), Box::new(value)),
        );
    }

    /// 在已有值（或默认值）上执行配置动作
    pub fn configure<T>(&mut self, action: impl FnOnce(&mut T))
    where
        T: Default + Send + Sync + 'static,
    {
        let entry = self
            .entries
            .entry(TypeId::of::<T>())
            .or_insert_with(|| (std::any::type_name::<T>(), Box::new(T::default())));
        if let Some(value) = entry.1.downcast_mut::<T>() {
            action(value);
        }
    }

    /// 从配置节绑定选项
    pub fn bind<T>(&mut self, section: &ConfigSection) -> Result<(), ConfigError>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let value: T = section.bind()?;
        self.insert(value);
        Ok(())
    }

    /// 从配置节绑定选项，配置节不存在时写入默认值
    pub fn bind_or_default<T>(&mut self, section: &ConfigSection) -> Result<(), ConfigError>
    where
        T: DeserializeOwned + Default + Send + Sync + 'static,
    {
        let value: T = section.bind_or_default()?;
        self.insert(value);
        Ok(())
    }

    /// 读取选项
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|(_, value)| value.downcast_ref::<T>())
    }

    /// 是否存在指定类型的选项
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// 选项数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 已存储选项的类型名称
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.values().map(|(name, _)| *name)
    }
}

impl fmt::Debug for OptionsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.type_names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Option1 {
        value: String,
    }

    #[test]
    fn test_configure_starts_from_default() {
        let mut store = OptionsStore::new();
        store.configure::<Option1>(|o| o.value.push_str("Hello"));
        store.configure::<Option1>(|o| o.value.push_str(" World"));

        assert_eq!(store.get::<Option1>().unwrap().value, "Hello World");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_bind_from_section() {
        let mut store = OptionsStore::new();
        let section = ConfigSection::new("Module1:Option1", json!({ "value": "bound" }));
        store.bind::<Option1>(&section).unwrap();
        assert_eq!(store.get::<Option1>().unwrap().value, "bound");
    }

    #[test]
    fn test_missing_section_does_not_insert() {
        let mut store = OptionsStore::new();
        let result = store.bind::<Option1>(&ConfigSection::empty("Module1:Option1"));

        assert!(matches!(result, Err(ConfigError::KeyNotFound { .. })));
        assert!(!store.contains::<Option1>());

        store
            .bind_or_default::<Option1>(&ConfigSection::empty("Module1:Option1"))
            .unwrap();
        assert_eq!(store.get::<Option1>(), Some(&Option1::default()));
    }
}
