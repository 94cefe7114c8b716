use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use url::Url;
use wakatime_stats::{
    ApiDomainAllowList, StatsError, StatsFetcher, StatsRequest, StatsSource, TomlConfig,
    WakaTimeStats,
};

const STATS_PATH: &str = "/api/v1/users/alice/stats";

fn fetcher_for(server: &MockServer) -> Result<StatsFetcher> {
    let base = Url::parse(&server.base_url())?;
    Ok(StatsFetcher::default().with_endpoint_override(base))
}

#[tokio::test]
async fn test_success_returns_inner_data() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path(STATS_PATH)
            .query_param("is_including_today", "true");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"data": {"total_seconds": 123}}));
    });

    let data = fetcher_for(&server)?
        .fetch_stats(&StatsRequest::new("alice"))
        .await?;

    api_mock.assert();
    assert_eq!(data, json!({"total_seconds": 123}));
    Ok(())
}

#[tokio::test]
async fn test_success_without_json_body_yields_null() -> Result<()> {
    let no_content = MockServer::start();
    no_content.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(204);
    });

    let html = MockServer::start();
    html.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>ok</html>");
    });

    for server in [&no_content, &html] {
        let data = fetcher_for(server)?
            .fetch_stats(&StatsRequest::new("alice"))
            .await?;
        assert!(data.is_null());
    }
    Ok(())
}

#[tokio::test]
async fn test_canonical_host_with_trailing_slash_is_accepted() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(200).json_body(json!({"data": {"username": "alice"}}));
    });

    let request = StatsRequest::new("alice").with_api_domain("wakatime.com/");
    let data = fetcher_for(&server)?.fetch_stats(&request).await?;

    api_mock.assert();
    assert_eq!(data["username"], "alice");
    Ok(())
}

#[tokio::test]
async fn test_rejected_inputs_never_reach_the_server() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(json!({"data": {}}));
    });
    let fetcher = fetcher_for(&server)?;

    let cases = [
        (StatsRequest::default(), "MISSING_PARAM"),
        (StatsRequest::new(""), "MISSING_PARAM"),
        (StatsRequest::new("alice smith"), "WAKATIME_USERNAME_INVALID"),
        (StatsRequest::new("alice?x=1"), "WAKATIME_USERNAME_INVALID"),
        (
            StatsRequest::new("alice").with_api_domain("evil.example.com"),
            "WAKATIME_API_DOMAIN_INVALID",
        ),
        (
            StatsRequest::new("alice").with_api_domain("api.wakatime.com"),
            "WAKATIME_API_DOMAIN_INVALID",
        ),
    ];

    for (request, code) in cases {
        let err = fetcher.fetch_stats(&request).await.unwrap_err();
        assert_eq!(err.code(), code, "request: {:?}", request);
    }

    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_username_checked_before_domain() {
    let fetcher = StatsFetcher::default();
    let request = StatsRequest {
        username: None,
        api_domain: Some("evil.example.com".to_string()),
    };

    let err = fetcher.fetch_stats(&request).await.unwrap_err();
    assert!(matches!(err, StatsError::MissingParameter { .. }));
}

#[tokio::test]
async fn test_not_found_references_username() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(404).json_body(json!({"error": "Not found."}));
    });

    let err = fetcher_for(&server)?
        .fetch_stats(&StatsRequest::new("alice"))
        .await
        .unwrap_err();

    assert_eq!(err.code(), "WAKATIME_USER_NOT_FOUND");
    assert_eq!(
        err.to_string(),
        "Could not resolve to a User with the login of 'alice'"
    );
    assert!(matches!(err, StatsError::UserNotFound { status: 404, .. }));
    Ok(())
}

#[tokio::test]
async fn test_network_failure_propagates_transport_error() -> Result<()> {
    // 取得一個沒有人在聽的埠
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);

    let base = Url::parse(&format!("http://127.0.0.1:{}", port))?;
    let fetcher = StatsFetcher::default().with_endpoint_override(base);

    let err = fetcher
        .fetch_stats(&StatsRequest::new("alice"))
        .await
        .unwrap_err();

    match err {
        StatsError::Transport(ref inner) => {
            assert!(inner.is_connect());
            assert_eq!(err.to_string(), inner.to_string());
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_configured_timeout_applies() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(json!({"data": {}}));
    });

    let config = TomlConfig::from_toml_str("[http]\ntimeout_seconds = 1\n")?;
    let fetcher =
        StatsFetcher::from_config(&config)?.with_endpoint_override(Url::parse(&server.base_url())?);

    let err = fetcher
        .fetch_stats(&StatsRequest::new("alice"))
        .await
        .unwrap_err();

    assert!(matches!(err, StatsError::Transport(ref e) if e.is_timeout()));
    Ok(())
}

#[tokio::test]
async fn test_extended_allow_list_from_config() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path(STATS_PATH)
            .header("user-agent", "stats-card/1.0");
        then.status(200).json_body(json!({"data": {"range": "last_7_days"}}));
    });

    let config = TomlConfig::from_toml_str(
        r#"
[wakatime]
allowed_api_domains = ["waka.example.org"]

[http]
user_agent = "stats-card/1.0"
"#,
    )?;
    let fetcher =
        StatsFetcher::from_config(&config)?.with_endpoint_override(Url::parse(&server.base_url())?);
    assert_eq!(
        fetcher.allow_list(),
        &ApiDomainAllowList::with_additional(["waka.example.org"])
    );

    let request = StatsRequest::new("alice").with_api_domain("waka.example.org/");
    let data = fetcher.fetch_stats(&request).await?;

    api_mock.assert();
    assert_eq!(data["range"], "last_7_days");
    Ok(())
}

#[tokio::test]
async fn test_fetcher_as_stats_source_with_typed_view() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(200).json_body(json!({
            "data": {
                "username": "alice",
                "human_readable_total": "5 hrs",
                "languages": [
                    {"name": "Go", "percent": 40.0, "text": "2 hrs"},
                    {"name": "Rust", "percent": 60.0, "text": "3 hrs"}
                ]
            }
        }));
    });

    let source: Box<dyn StatsSource> = Box::new(fetcher_for(&server)?);
    let data = source.fetch_stats(&StatsRequest::new("alice")).await?;
    let stats = WakaTimeStats::from_value(data)?;

    assert_eq!(stats.top_languages(1)[0].name, "Rust");
    assert!(stats.summary(5).contains("Total: 5 hrs"));
    Ok(())
}
