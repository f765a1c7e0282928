use anyhow::Context;
use clap::Parser;
use stay_scout::core::ConfigProvider;
use stay_scout::utils::error::ErrorSeverity;
use stay_scout::utils::{logger, validation::Validate};
use stay_scout::{EtlEngine, LocalStorage, ScoutPipeline, TomlConfig};
use std::path::Path;

#[derive(Parser)]
#[command(name = "toml-scout")]
#[command(about = "Listing analysis driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "stay-scout.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - check inputs and show the query without analysing
    #[arg(long)]
    dry_run: bool,
}

fn load_config(path: &str) -> anyhow::Result<TomlConfig> {
    let config = TomlConfig::from_file(path)
        .with_context(|| format!("Failed to load config file '{}'", path))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in '{}'", path))?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置 (日誌尚未初始化，錯誤直接輸出)
    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        let level = if args.verbose { "debug" } else { config.log_level() };
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based stay-scout");
    tracing::info!("✅ Configuration loaded from: {}", args.config);

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No analysis will run");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.data_dir(), config.output_path());
    let pipeline = ScoutPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            tracing::info!("✅ Analysis completed successfully!");
            println!("{}", outcome.report);
            println!("📁 Report bundle saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Report: {}", config.report.name);
    if let Some(description) = &config.report.description {
        println!("  Description: {}", description);
    }
    println!("  Data dir: {}", config.data_dir());
    println!(
        "  Query: {} / {} guest(s) / max ${:.2}",
        config.query.neighborhood, config.query.capacity, config.query.max_price
    );
    println!("  Padding: {}°", config.padding_degrees());
    println!("  Output: {}/{}", config.output_path(), config.bundle_name());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    // 檢查輸入檔案
    println!("📂 Input Files:");
    let data_dir = Path::new(config.data_dir());
    for (label, file) in [
        ("Listings", config.listings_file()),
        ("Incidents", config.incidents_file()),
        ("Neighborhoods", config.neighborhoods_file()),
    ] {
        let full_path = data_dir.join(file);
        let status = if full_path.is_file() { "✅" } else { "❌ missing" };
        println!("  {}: {} {}", label, full_path.display(), status);
    }

    println!();
    println!("  Delimiter: {:?}", config.delimiter() as char);

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
