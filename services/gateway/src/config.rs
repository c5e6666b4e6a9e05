use std::env;
use std::time::Duration;

pub const FATHOM_API_BASE: &str = "https://api.fathom.ai/external/v1";
pub const DEFAULT_NOTEMAKER_URL: &str = "http://localhost:5678/webhook-test/notemaker";

/// Fixed page size for the meeting list. Embedded transcripts are not
/// requested on list calls; they are fetched separately per recording.
pub const MEETINGS_PAGE_SIZE: u32 = 20;

/// Successful list pages are cached this long so a rapid refresh does not
/// hammer the recording service. Failures are never cached.
pub const MEETINGS_CACHE_TTL: Duration = Duration::from_secs(60);

/// The downstream automation pipeline has its own payload and latency
/// limits; longer transcripts are rejected before any upstream call.
pub const MAX_TRANSCRIPT_CHARS: usize = 200_000;

/// Upper bound on the notes webhook call. Long-form processing is slow.
pub const NOTEMAKER_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub fathom: FathomConfig,
    pub notemaker: NotemakerConfig,
}

#[derive(Debug, Clone)]
pub struct FathomConfig {
    pub base_url: String,
    /// Absence is a configuration error surfaced on every request, distinct
    /// from per-request upstream failures.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NotemakerConfig {
    pub webhook_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("GATEWAY_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("GATEWAY_PORT must be a valid port number"),
            fathom: FathomConfig {
                base_url: env::var("FATHOM_API_BASE")
                    .unwrap_or_else(|_| FATHOM_API_BASE.to_string()),
                api_key: env::var("FATHOM_API_KEY").ok(),
            },
            notemaker: NotemakerConfig {
                webhook_url: env::var("N8N_WEBHOOK_URL")
                    .unwrap_or_else(|_| DEFAULT_NOTEMAKER_URL.to_string()),
                timeout: NOTEMAKER_TIMEOUT,
            },
        }
    }
}
