//! 内存配置源

use config_abstractions::ConfigurationSource;
use infrastructure_common::lookup_config_path;
use serde_json::Value;

/// 内存配置源
///
/// 直接持有一棵 `serde_json::Value` 配置树，其余配置源加载后也转换成它。
#[derive(Debug, Clone)]
pub struct MemoryConfiguration {
    name: String,
    root: Value,
}

impl MemoryConfiguration {
    /// 创建新的内存配置源
    pub fn new(root: Value) -> Self {
        Self::named("MemoryConfiguration", root)
    }

    /// 创建带名称的内存配置源
    pub fn named(name: impl Into<String>, root: Value) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// 配置树根节点
    pub fn root(&self) -> &Value {
        &self.root
    }
}

impl ConfigurationSource for MemoryConfiguration {
    fn get_value(&self, key: &str) -> Option<Value> {
        lookup_config_path(&self.root, key).cloned()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
