use std::sync::Arc;

use supplylink_server::AppState;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;


/// A server bound to an ephemeral localhost port for one test.
pub struct TestServer {
    pub base: String,
    pub state: Arc<AppState>,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::boot(false).await
    }

    /// Start with the demo vendor and directory supplier accounts registered.
    pub async fn start_with_demo() -> Self {
        Self::boot(true).await
    }

    async fn boot(seed_demo: bool) -> Self {
        init_tracing();
        let state = AppState::in_memory();
        if seed_demo {
            supplylink_server::demo::seed_accounts(&state).expect("demo accounts");
        }
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let task = tokio::spawn({
            let state = state.clone();
            async move {
                if let Err(e) = supplylink_server::serve(listener, state, CorsLayer::permissive()).await {
                    tracing::error!("test server stopped: {e}");
                }
            }
        });
        Self {
            base: format!("http://{addr}"),
            state,
            task,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn ws_url(&self, path: &str, token: &str) -> String {
        format!("{}{path}?token={token}", self.base.replacen("http", "ws", 1))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}
