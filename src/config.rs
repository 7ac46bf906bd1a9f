// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;
use url::Url;

/// Number of answer options every generated question carries (a-d).
pub const OPTION_COUNT: u8 = 4;

/// Question count requested from the generator when the client does not pick one.
pub const DEFAULT_QUESTION_COUNT: u32 = 30;
pub const MAX_QUESTION_COUNT: u32 = 100;

/// Durations (minutes) offered by the generator wizard.
pub const DURATIONS: [u32; 4] = [30, 60, 90, 120];
pub const DEFAULT_DURATION: u32 = 60;

/// Countdown resolution of a test-taking session, in seconds.
pub const TICK_SECONDS: u64 = 1;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: Url,
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .expect("GEMINI_API_KEY must be set");

        let gemini_model = env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string())
            .parse::<Url>()
            .expect("GEMINI_BASE_URL must be a valid URL");

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .expect("BIND_ADDR must be a socket address, e.g. 0.0.0.0:3000");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        Self {
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            bind_addr,
            rust_log,
            log_dir,
        }
    }

    /// Configuration pointing the generator at `base_url`, used by tests and local fakes.
    #[doc(hidden)]
    pub fn for_endpoint(base_url: Url) -> Self {
        Self {
            gemini_api_key: "test-key".to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: base_url,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            rust_log: "error".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}
