use clap::Parser;
use wakatime_stats::utils::{logger, monitor::RunMonitor, validation::Validate};
use wakatime_stats::{
    CliConfig, ConfigProvider, ErrorSeverity, StatsError, StatsFetcher, WakaTimeStats,
};

async fn run(config: &CliConfig) -> Result<String, StatsError> {
    config.validate()?;

    let fetcher = StatsFetcher::from_config(config)?;
    let data = fetcher.fetch_stats(&config.to_request()).await?;
    render_output(config, data)
}

fn render_output(config: &CliConfig, data: serde_json::Value) -> Result<String, StatsError> {
    if config.summary {
        if data.is_null() {
            return Ok("No stats available".to_string());
        }
        return Ok(WakaTimeStats::from_value(data)?.summary(config.top));
    }

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&data)?
    } else {
        serde_json::to_string(&data)?
    };
    Ok(rendered)
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting wakatime-stats");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let mut monitor = RunMonitor::new(config.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let result = match config.resolve() {
        Ok(config) => run(&config).await,
        Err(e) => Err(e),
    };
    monitor.log_stats("Final Stats");

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ Stats lookup failed: {} (Code: {}, Severity: {:?})",
                e,
                e.code(),
                e.severity()
            );
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Invalid => 1,
                ErrorSeverity::Remote => 2,
                ErrorSeverity::System => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
