//! # Configuration Implementation
//!
//! 配置源的具体实现。
//!
//! ## 主要组件
//!
//! - [`MemoryConfiguration`] - 内存配置源
//! - [`ConfigurationBuilder`] - 基于 `config` crate 的分层配置构建器

pub mod builder;
pub mod providers;

pub use builder::*;
pub use providers::*;
