//! # Configuration Abstractions
//!
//! 配置源抽象层，定义模块读取层级配置的统一接口。
//!
//! ## 核心接口
//!
//! - [`ConfigurationSource`] - 层级键值配置源
//!
//! 注册引擎本身从不读取配置，配置源只会原样传递给模块的配置回调。

pub mod provider;

pub use provider::*;
