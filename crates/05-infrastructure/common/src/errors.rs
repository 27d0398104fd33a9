//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("配置键不存在: {key}")]
    KeyNotFound { key: String },
}

/// 模块错误类型
///
/// 模块的创建和配置失败都会被扫描过程捕获，不会中断扫描。
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("模块实例化失败: {type_name}, 原因: {message}")]
    InstantiationFailed { type_name: String, message: String },

    #[error("模块配置失败: {message}")]
    ConfigurationFailed { message: String },

    #[error("模块执行时发生 panic: {type_name}, 信息: {message}")]
    Panicked { type_name: String, message: String },

    #[error("模块配置绑定失败: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

impl ModuleError {
    /// 创建配置失败错误
    pub fn configuration_failed(message: impl Into<String>) -> Self {
        Self::ConfigurationFailed {
            message: message.into(),
        }
    }

    /// 创建实例化失败错误
    pub fn instantiation_failed(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InstantiationFailed {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// 注册错误类型
///
/// 只用于调用方直接提供的无效输入，单个类型的问题不会产生错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("定义单元不存在: {unit}")]
    UnknownUnit { unit: String },

    #[error("定义单元重复: {unit}")]
    DuplicateUnit { unit: String },

    #[error("类型 {type_name} 已在定义单元 {unit} 中定义")]
    DuplicateType { type_name: String, unit: String },
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("注册错误: {source}")]
    RegistrationError {
        #[from]
        source: RegistrationError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type RegistrationResult<T> = Result<T, RegistrationError>;
