use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid request url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
}

pub fn build_client(
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .read_timeout(read_timeout)
        .build()
}

pub fn parse_request_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

/// Issues one GET and returns the whole body as text. Only `200 OK` counts as success.
pub async fn fetch_search_body(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let url = parse_request_url(url)?;
    tracing::debug!(%url, "requesting search results");

    let response = client.get(url).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let body = response.bytes().await?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::get;
    use axum::Router;

    async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
        let app = Router::new()
            .route(
                "/search",
                get(|| async { include_str!("../../../fixtures/guardian-samples/search.json") }),
            )
            .route(
                "/unauthorized",
                get(|| async { (AxumStatus::UNAUTHORIZED, r#"{"message":"Unauthorized"}"#) }),
            )
            .route("/accepted", get(|| async { (AxumStatus::ACCEPTED, "{}") }))
            .route(
                "/latin1",
                get(|| async { b"{\"webTitle\":\"caf\xe9\"}".to_vec() }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        let join_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server should run");
        });
        (format!("http://{address}"), join_handle)
    }

    fn test_client() -> reqwest::Client {
        build_client(Duration::from_secs(15), Duration::from_secs(10)).expect("client should build")
    }

    #[tokio::test]
    async fn fetch_reads_body_on_ok() {
        let (base, server_task) = spawn_test_server().await;

        let body = fetch_search_body(&test_client(), &format!("{base}/search?q=debates"))
            .await
            .expect("search should succeed");
        assert!(body.trim_start().starts_with('{'));
        assert!(body.contains("webPublicationDate"));

        server_task.abort();
    }

    #[tokio::test]
    async fn fetch_rejects_every_status_but_ok() {
        let (base, server_task) = spawn_test_server().await;
        let client = test_client();

        let unauthorized = fetch_search_body(&client, &format!("{base}/unauthorized")).await;
        assert!(matches!(unauthorized, Err(FetchError::HttpStatus(401))));

        let accepted = fetch_search_body(&client, &format!("{base}/accepted")).await;
        assert!(matches!(accepted, Err(FetchError::HttpStatus(202))));

        let missing = fetch_search_body(&client, &format!("{base}/nowhere")).await;
        assert!(matches!(missing, Err(FetchError::HttpStatus(404))));

        server_task.abort();
    }

    #[tokio::test]
    async fn fetch_replaces_invalid_utf8() {
        let (base, server_task) = spawn_test_server().await;

        let body = fetch_search_body(&test_client(), &format!("{base}/latin1"))
            .await
            .expect("non-utf8 body should still be read");
        assert_eq!(body, "{\"webTitle\":\"caf\u{FFFD}\"}");

        server_task.abort();
    }

    #[tokio::test]
    async fn fetch_rejects_malformed_url() {
        let result = fetch_search_body(&test_client(), "not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }
}
