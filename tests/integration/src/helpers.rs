//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use mood_api::{create_app, create_app_state, AppState};
use mood_cache::DailyRateLimiter;
use mood_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, RateLimitConfig,
    ServerConfig, StorageConfig,
};
use mood_db::JsonFileStore;
use mood_service::ServiceContextBuilder;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{MemoryMoodRepository, ScratchDir};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Primary store behind the server
    pub moods: Arc<MemoryMoodRepository>,
    pub fallback: Arc<JsonFileStore>,
    scratch: ScratchDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over an in-memory primary store and a scratch fallback file
    pub async fn start() -> Result<Self> {
        Self::start_with_limit(5).await
    }

    pub async fn start_with_limit(daily_limit: u32) -> Result<Self> {
        let scratch = ScratchDir::new()?;
        let fallback_file = scratch.file("moods.json");
        let config = test_config(
            "postgres://unused@localhost/unused",
            &fallback_file.to_string_lossy(),
            daily_limit,
        );

        let moods = Arc::new(MemoryMoodRepository::default());
        let fallback = Arc::new(JsonFileStore::new(&fallback_file));
        let context = ServiceContextBuilder::new()
            .mood_repo(moods.clone())
            .fallback_store(fallback.clone())
            .rate_limiter(DailyRateLimiter::from(&config.rate_limit))
            .storage_timeout(Duration::from_millis(500))
            .fallback_location(fallback_file.to_string_lossy())
            .build()?;

        let state = AppState::new(context, config);
        let (addr, handle) = serve(state).await?;

        Ok(Self {
            addr,
            client: client()?,
            moods,
            fallback,
            scratch,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn scratch(&self) -> &ScratchDir {
        &self.scratch
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request as a client behind a proxy
    pub async fn post_from<T: Serialize>(
        &self,
        path: &str,
        forwarded_for: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("x-forwarded-for", forwarded_for)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with a raw body
    pub async fn post_raw(&self, path: &str, content_type: &str, body: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await?)
    }
}

/// Server wired to PostgreSQL through `create_app_state`
pub struct PostgresTestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _scratch: ScratchDir,
    _handle: JoinHandle<()>,
}

impl PostgresTestServer {
    pub async fn start(database_url: &str) -> Result<Self> {
        let scratch = ScratchDir::new()?;
        let fallback_file = scratch.file("moods.json");
        let config = test_config(database_url, &fallback_file.to_string_lossy(), 1000);

        let state = create_app_state(config)?;
        let (addr, handle) = serve(state).await?;

        Ok(Self {
            addr,
            client: client()?,
            _scratch: scratch,
            _handle: handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Configuration for a loopback test server
pub fn test_config(database_url: &str, fallback_file: &str, daily_limit: u32) -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "mood-map-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: database_url.to_string(),
            max_connections: 2,
            min_connections: 0,
            query_timeout_secs: 2,
        },
        rate_limit: RateLimitConfig {
            daily_limit,
            ..RateLimitConfig::default()
        },
        cors: CorsConfig::default(),
        storage: StorageConfig {
            fallback_file: fallback_file.to_string(),
        },
    }
}

async fn serve(state: AppState) -> Result<(SocketAddr, JoinHandle<()>)> {
    let app = create_app(state);
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok((addr, handle))
}

fn client() -> Result<Client> {
    Ok(Client::builder().timeout(Duration::from_secs(10)).build()?)
}

/// DATABASE_URL when a PostgreSQL instance is available
pub fn database_url() -> Option<String> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            None
        }
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
