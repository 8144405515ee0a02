//! # factories 命令行工具
//!
//! 查看资源根目录中声明的工厂类型和实现标识

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use factories_abstractions::{FactoriesLoader, FactoryNames};
use factories_impl::{FactoriesLoaderBuilder, LoaderConfig};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "factories")]
#[command(about = "查看工厂资源声明", version)]
struct Cli {
    /// 加载器配置文件路径（TOML）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 工厂资源的相对位置
    #[arg(short, long)]
    location: Option<String>,

    /// 资源根目录或 glob 模式，可重复指定
    #[arg(short, long = "path")]
    paths: Vec<String>,

    /// 以 JSON 格式输出
    #[arg(long)]
    json: bool,

    /// 日志详细程度（-v、-vv、-vvv）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 列出某个工厂类型的实现标识
    Names {
        /// 工厂类型标识
        factory_type: String,
    },
    /// 输出完整的注册表
    Dump,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.verbose)?;
    run(&cli)
}

/// 初始化日志，`RUST_LOG` 优先于 `-v`
fn initialize_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("日志初始化失败: {}", e))
}

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = build_config(cli)?;
    debug!("加载器配置: {:?}", config);

    let loader = FactoriesLoaderBuilder::from_config(&config)
        .context("创建工厂加载器失败")?
        .build();

    match &cli.command {
        Command::Names { factory_type } => {
            let names = loader
                .load_factory_names(factory_type, None)
                .with_context(|| format!("加载工厂类型 {} 失败", factory_type))?;
            info!("[{}] 共 {} 个实现", factory_type, names.len());
            print_names(&names, cli.json)
        }
        Command::Dump => {
            let registry = loader.load_all(None).context("加载工厂注册表失败")?;
            info!("共 {} 个工厂类型", registry.len());
            print_registry(&registry, cli.json)
        }
    }
}

/// 合并配置文件、环境变量和命令行参数
fn build_config(cli: &Cli) -> anyhow::Result<LoaderConfig> {
    let mut config = LoaderConfig::load(cli.config.as_deref()).context("读取加载器配置失败")?;

    if let Some(location) = &cli.location {
        config = config.with_resource_location(location.clone());
    }
    for path in &cli.paths {
        config = config.add_search_path(path.clone());
    }

    config.validate().context("加载器配置无效")?;
    Ok(config)
}

fn print_names(names: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(names)?);
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}

fn print_registry(registry: &FactoryNames, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(registry)?);
        return Ok(());
    }
    for (factory_type, implementations) in registry.iter() {
        println!("{}", factory_type);
        for implementation in implementations {
            println!("  {}", implementation);
        }
    }
    Ok(())
}
