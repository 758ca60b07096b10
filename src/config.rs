use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file replacing the bundled recipe catalog
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Identity provider base URL, guest-only mode when unset
    #[serde(default)]
    pub auth_url: Option<String>,

    /// Public API key sent to the identity provider
    #[serde(default)]
    pub auth_api_key: Option<String>,

    /// Text-to-image API endpoint
    #[serde(default = "default_image_api_url")]
    pub image_api_url: String,

    /// Image shown when no recipe image can be resolved
    #[serde(default = "default_image_placeholder_url")]
    pub image_placeholder_url: String,

    /// How long image resolution may stay pending before falling back
    #[serde(default = "default_image_resolve_timeout_ms")]
    pub image_resolve_timeout_ms: u64,

    /// Maximum number of memoized suggestion results
    #[serde(default = "default_suggestion_cache_capacity")]
    pub suggestion_cache_capacity: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_image_api_url() -> String {
    "https://api.runware.ai/v1".to_string()
}

fn default_image_placeholder_url() -> String {
    "/placeholder.svg".to_string()
}

fn default_image_resolve_timeout_ms() -> u64 {
    2000
}

fn default_suggestion_cache_capacity() -> usize {
    256
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: None,
            auth_url: None,
            auth_api_key: None,
            image_api_url: default_image_api_url(),
            image_placeholder_url: default_image_placeholder_url(),
            image_resolve_timeout_ms: default_image_resolve_timeout_ms(),
            suggestion_cache_capacity: default_suggestion_cache_capacity(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
