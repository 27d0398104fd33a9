//! # 基础设施组合层
//!
//! 负责把配置源、定义单元和注册引擎组合成一个可用的应用：
//! 构建配置、初始化日志、执行一次扫描会话并返回填充好的服务集合。
//!
//! ## 基本使用
//!
//! ```rust,ignore
//! use infrastructure_composition::{ApplicationBuilder, LoggingConfig};
//!
//! let application = ApplicationBuilder::new()
//!     .add_config_toml("config/app.toml")?
//!     .with_logging(LoggingConfig::development())
//!     .add_unit(api_unit())
//!     .load::<ApiModule>()
//!     .build()?;
//!
//! for binding in application.services() {
//!     println!("{}", binding);
//! }
//! ```

pub mod application;
pub mod builder;

// 重新导出主要类型
pub use application::{Application, ScanReport};
pub use builder::{ApplicationBuilder, LoggingConfig};

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
