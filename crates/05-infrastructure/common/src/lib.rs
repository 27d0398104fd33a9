//! # Infrastructure Common
//!
//! 这个 crate 提供了自动注册层各个 crate 共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`Lifetime`] - 服务生命周期
//! - [`TypeKey`] - 类型标识（具体类型、trait object 或泛型定义）
//! - [`ConfigSection`] - 层级配置节
//! - [`ConfigError`] / [`ModuleError`] / [`RegistrationError`] - 错误类型
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 不依赖运行时反射，类型信息由声明显式提供
//! - 无全局状态

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
