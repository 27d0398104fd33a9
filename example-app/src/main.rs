//! # 示例应用程序
//!
//! 演示基于声明的自动注册：加载 `ApiModule` 后，
//! 两个功能模块所在的定义单元会被递归扫描，模块把配置绑定到选项中。

mod samples;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use infrastructure_composition::{Application, ApplicationBuilder};
use samples::api::{greeting, ApiModule};
use samples::module1::{Hello, Option1};
use samples::module2::{Option2, World};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "自动注册示例应用")]
struct Args {
    /// 配置文件路径（.toml / .json / .yaml）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 环境变量前缀，例如 LILY_MODULE1__OPTION1__VALUE
    #[arg(long, default_value = "LILY")]
    env_prefix: String,

    /// 只扫描指定的定义单元，而不是从 ApiModule 开始
    #[arg(long)]
    unit: Option<String>,

    /// 输出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 绑定的输出视图
#[derive(Debug, Serialize)]
struct BindingView {
    service: String,
    implementation: String,
    lifetime: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("启动自动注册示例应用");

    let application = build_application(&args)?;
    print_bindings(&application, args.format)?;
    demonstrate_greeting(&application);

    for (module, message) in application.report().failed_modules() {
        warn!("模块 {} 配置失败: {}", module.short_name(), message);
    }

    info!("应用已退出");
    Ok(())
}

/// 构建应用
fn build_application(args: &Args) -> anyhow::Result<Application> {
    let mut builder = ApplicationBuilder::new().with_units(samples::units());

    if let Some(config) = &args.config {
        builder = match config.extension().and_then(|ext| ext.to_str()) {
            Some("json") => builder.add_config_json(config)?,
            Some("yaml") | Some("yml") => builder.add_config_yaml(config)?,
            _ => builder.add_config_toml(config)?,
        };
    }
    builder = builder.add_config_env_vars(args.env_prefix.as_str());

    builder = match &args.unit {
        Some(unit) => builder.load_unit(unit.as_str()),
        None => builder.load::<ApiModule>(),
    };

    builder.build().context("构建应用失败")
}

/// 输出绑定
fn print_bindings(application: &Application, format: OutputFormat) -> anyhow::Result<()> {
    let views: Vec<BindingView> = application
        .services()
        .iter()
        .map(|binding| BindingView {
            service: binding.service_type.to_string(),
            implementation: binding.implementation_type.to_string(),
            lifetime: binding.lifetime.to_string(),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            println!("共 {} 个绑定:", views.len());
            for binding in application.services() {
                println!("  {}", binding);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&views)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&views)?),
    }
    Ok(())
}

/// 使用模块写入的选项构造服务，输出问候语
fn demonstrate_greeting(application: &Application) {
    let (Some(option1), Some(option2)) = (
        application.options::<Option1>(),
        application.options::<Option2>(),
    ) else {
        warn!("选项未配置，跳过问候");
        return;
    };

    let hello = Hello::new(option1.clone());
    let world = World::new(option2.clone());
    println!("{}", greeting(&hello, &world));
}
