use std::path::PathBuf;
use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API server, without a trailing slash.
    pub base_url: String,
    /// Directory holding the local project cache.
    pub cache_dir: PathBuf,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                 |
    /// |-----------------------------------|-------------------------|
    /// | `PROJBOARD_API_URL`               | `http://localhost:3000` |
    /// | `PROJBOARD_CACHE_DIR`             | `.cache`                |
    /// | `PROJBOARD_REQUEST_TIMEOUT_SECS`  | unset (no timeout)      |
    pub fn from_env() -> Self {
        let base_url = std::env::var("PROJBOARD_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let cache_dir: PathBuf = std::env::var("PROJBOARD_CACHE_DIR")
            .unwrap_or_else(|_| ".cache".into())
            .into();

        let request_timeout = std::env::var("PROJBOARD_REQUEST_TIMEOUT_SECS")
            .ok()
            .map(|secs| {
                secs.parse()
                    .expect("PROJBOARD_REQUEST_TIMEOUT_SECS must be a valid u64")
            })
            .map(Duration::from_secs);

        Self {
            base_url,
            cache_dir,
            request_timeout,
        }
    }
}
