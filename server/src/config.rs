use axum::http::{header, HeaderValue, Method};
use clap::Parser;
use tower_http::cors::{AllowOrigin, CorsLayer};

#[derive(Parser, Debug, Clone)]
#[command(name = "supplylink-server", about = "SupplyLink marketplace API")]
pub struct Cli {
    /// Interface to bind.
    #[arg(long, env = "SUPPLYLINK_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP port to listen on.
    #[arg(long, env = "SUPPLYLINK_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Comma-separated origins allowed by CORS. Any origin when omitted.
    #[arg(long, env = "SUPPLYLINK_ALLOWED_ORIGIN", value_delimiter = ',')]
    pub allowed_origin: Vec<String>,

    /// Register demo accounts for the directory suppliers and one vendor.
    #[arg(long, env = "SUPPLYLINK_SEED_DEMO")]
    pub seed_demo: bool,
}

impl Cli {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cors(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .allowed_origin
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        let allow_origin = if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
    }
}
