use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("forecast has {count} entries, need at least 2")]
    MissingForecast { count: usize },
}
