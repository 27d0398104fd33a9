//! 配置源抽象接口

use infrastructure_common::ConfigSection;
use serde_json::Value;

/// 配置源 trait
///
/// 同步、只读的层级键值查找。路径分隔符支持 `:`（如 `Module1:Option1`）与 `.`。
pub trait ConfigurationSource: Send + Sync {
    /// 获取配置值
    fn get_value(&self, key: &str) -> Option<Value>;

    /// 获取配置节，不存在时返回空节
    fn get_section(&self, path: &str) -> ConfigSection {
        match self.get_value(path) {
            Some(value) => ConfigSection::new(path, value),
            None => ConfigSection::empty(path),
        }
    }

    /// 检查配置键是否存在
    fn contains_key(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    /// 获取配置源名称
    fn name(&self) -> &str;
}
