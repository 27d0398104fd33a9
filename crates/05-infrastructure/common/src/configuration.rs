//! 配置节定义
//!
//! 配置以 `serde_json::Value` 树表示，路径分隔符支持 `:` 与 `.`，
//! 键的匹配不区分大小写。

use crate::errors::ConfigError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 拆分配置路径
pub fn split_config_path(path: &str) -> impl Iterator<Item = &str> {
    path.split([':', '.']).filter(|segment| !segment.is_empty())
}

/// 在配置树中按路径查找值
pub fn lookup_config_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in split_config_path(path) {
        current = lookup_child(current, segment)?;
    }
    Some(current)
}

fn lookup_child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key).or_else(|| {
            map.iter()
                .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
                .map(|(_, child)| child)
        }),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

/// 配置节
///
/// 不存在的配置节是空节（值为 `Null`），而不是错误。
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSection {
    path: String,
    value: Value,
}

impl ConfigSection {
    /// 创建新的配置节
    pub fn new(path: impl Into<String>, value: Value) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }

    /// 创建空配置节
    pub fn empty(path: impl Into<String>) -> Self {
        Self::new(path, Value::Null)
    }

    /// 配置节路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 配置节的原始值
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// 配置节是否存在
    pub fn exists(&self) -> bool {
        !self.value.is_null()
    }

    /// 获取配置项
    pub fn get(&self, key: &str) -> Option<&Value> {
        lookup_config_path(&self.value, key)
    }

    /// 获取子配置节
    pub fn section(&self, key: &str) -> ConfigSection {
        let path = if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.path, key)
        };
        match self.get(key) {
            Some(value) => ConfigSection::new(path, value.clone()),
            None => ConfigSection::empty(path),
        }
    }

    /// 绑定到具体类型
    pub fn bind<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        if !self.exists() {
            return Err(ConfigError::KeyNotFound {
                key: self.path.clone(),
            });
        }
        serde_json::from_value(self.value.clone())
            .map_err(|e| ConfigError::SerializationError { source: e })
    }

    /// 绑定到具体类型，配置节不存在时使用默认值
    pub fn bind_or_default<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        if self.exists() {
            self.bind()
        } else {
            Ok(T::default())
        }
    }
}
