use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Public domain the frontend is served from; used by the referrer check.
    pub domain: String,
    /// POI search radius in kilometers. Guaranteed >= 1 by config parsing;
    /// the site display-radius formula divides by this value.
    pub max_distance_km: u32,
    pub overpass_url: String,
    pub open_weather_api_key: String,
    /// Analytics beacon endpoint. `None` disables tracking.
    pub tracking_url: Option<String>,
    /// Timeout applied to every outbound HTTP request.
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("domain", &self.domain)
            .field("max_distance_km", &self.max_distance_km)
            .field("overpass_url", &self.overpass_url)
            .field("open_weather_api_key", &"[redacted]")
            .field("tracking_url", &self.tracking_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
