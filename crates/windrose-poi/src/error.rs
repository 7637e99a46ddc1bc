use thiserror::Error;

use crate::category::Category;

/// Failure of one category fetch against the point-data service.
#[derive(Debug, Error)]
pub enum PoiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("{element_type} element has no usable geometry")]
    MissingGeometry { element_type: &'static str },
}

/// A [`PoiError`] tagged with the category whose fetch produced it.
///
/// This is what `aggregate` surfaces: the first category failure observed,
/// after all in-flight category tasks have been drained.
#[derive(Debug, Error)]
#[error("fetching {category} sites failed: {source}")]
pub struct CategoryError {
    pub category: Category,
    #[source]
    pub source: PoiError,
}
