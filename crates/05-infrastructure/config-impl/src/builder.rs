//! 分层配置构建器
//!
//! 使用 `config` crate 合并多个配置源，后添加的配置源覆盖先添加的。

use crate::providers::MemoryConfiguration;
use config::{Environment, File, FileFormat};
use infrastructure_common::ConfigError;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// 配置源描述
#[derive(Debug, Clone)]
enum SourceDescriptor {
    File {
        path: PathBuf,
        format: FileFormat,
        required: bool,
    },
    Environment {
        prefix: String,
    },
}

/// 分层配置构建器
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    sources: Vec<SourceDescriptor>,
}

impl ConfigurationBuilder {
    /// 创建新的配置构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加 TOML 配置文件
    pub fn add_toml_file(self, path: impl Into<PathBuf>, required: bool) -> Self {
        self.add_file(path, FileFormat::Toml, required)
    }

    /// 添加 JSON 配置文件
    pub fn add_json_file(self, path: impl Into<PathBuf>, required: bool) -> Self {
        self.add_file(path, FileFormat::Json, required)
    }

    /// 添加 YAML 配置文件
    pub fn add_yaml_file(self, path: impl Into<PathBuf>, required: bool) -> Self {
        self.add_file(path, FileFormat::Yaml, required)
    }

    /// 添加环境变量配置源
    ///
    /// 变量名格式为 `{PREFIX}_{SECTION}__{KEY}`，例如 `LILY_MODULE1__OPTION1__VALUE`。
    /// 数字与布尔值会按类型解析。
    pub fn add_environment(mut self, prefix: impl Into<String>) -> Self {
        self.sources.push(SourceDescriptor::Environment {
            prefix: prefix.into(),
        });
        self
    }

    fn add_file(mut self, path: impl Into<PathBuf>, format: FileFormat, required: bool) -> Self {
        self.sources.push(SourceDescriptor::File {
            path: path.into(),
            format,
            required,
        });
        self
    }

    /// 配置源数量
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// 构建配置
    pub fn build(self) -> Result<MemoryConfiguration, ConfigError> {
        info!("构建分层配置，共 {} 个配置源", self.sources.len());

        let mut builder = config::Config::builder();
        for source in &self.sources {
            match source {
                SourceDescriptor::File {
                    path,
                    format,
                    required,
                } => {
                    if *required && !path.exists() {
                        return Err(ConfigError::FileNotFound {
                            path: path.display().to_string(),
                        });
                    }
                    debug!("添加配置文件: {} ({:?})", path.display(), format);
                    builder = builder.add_source(
                        File::from(path.as_path())
                            .format(*format)
                            .required(*required),
                    );
                }
                SourceDescriptor::Environment { prefix } => {
                    debug!("添加环境变量配置源: {}", prefix);
                    builder = builder.add_source(
                        Environment::with_prefix(prefix)
                            .prefix_separator("_")
                            .separator("__")
                            .try_parsing(true),
                    );
                }
            }
        }

        let settings = builder.build().map_err(|e| {
            error!("配置构建失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        let root: Value = settings
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;

        info!("分层配置构建完成");
        Ok(MemoryConfiguration::named("LayeredConfiguration", root))
    }
}
