use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;
use wakatime_stats::config::lambda::LambdaConfig;
use wakatime_stats::utils::{logger, validation::Validate};
use wakatime_stats::{StatsFetcher, StatsRequest};

#[derive(Serialize)]
pub struct Response {
    pub data: serde_json::Value,
}

async fn function_handler(
    fetcher: &StatsFetcher,
    event: LambdaEvent<StatsRequest>,
) -> Result<Response, Error> {
    let request = event.payload;
    tracing::info!(
        username = request.username.as_deref().unwrap_or(""),
        "Fetching WakaTime stats"
    );

    match fetcher.fetch_stats(&request).await {
        Ok(data) => Ok(Response { data }),
        Err(e) => {
            tracing::error!(code = e.code(), "Stats lookup failed: {}", e);
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    // 在冷啟動時建立一次，之後的呼叫共用連線池
    let fetcher = StatsFetcher::from_config(&config)?;

    run(service_fn(move |event| {
        let fetcher = fetcher.clone();
        async move { function_handler(&fetcher, event).await }
    }))
    .await
}
