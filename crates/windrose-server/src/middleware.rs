use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use windrose_core::{AppConfig, Environment};

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub(crate) async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Referrer-based same-origin gate for the POST endpoints.
///
/// The `Referer` header must start with the expected origin. This is not a
/// real security boundary (the header is trivially spoofed); it only stops
/// casual cross-site calls to the data endpoints.
#[derive(Debug, Clone)]
pub struct SameOriginState {
    expected_origin: Arc<str>,
}

impl SameOriginState {
    /// Builds the gate from configuration: `https://<domain>` in production,
    /// `http://localhost` during local development.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let origin = match config.env {
            Environment::Production => format!("https://{}", config.domain),
            Environment::Development | Environment::Test => "http://localhost".to_string(),
        };
        Self::new(origin)
    }

    #[must_use]
    pub fn new(expected_origin: impl Into<String>) -> Self {
        Self {
            expected_origin: Arc::from(expected_origin.into()),
        }
    }
}

pub(crate) async fn enforce_same_origin(
    State(state): State<SameOriginState>,
    request: Request,
    next: Next,
) -> Response {
    let referrer = request
        .headers()
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !referrer.starts_with(state.expected_origin.as_ref()) {
        tracing::warn!(
            path = %request.uri().path(),
            referrer,
            "blocked request with invalid referrer"
        );
        return (
            StatusCode::FORBIDDEN,
            Json(MiddlewareErrorBody {
                error: MiddlewareError {
                    code: "forbidden",
                    message: "invalid referrer",
                },
            }),
        )
            .into_response();
    }

    next.run(request).await
}

/// Analytics beacon emission for the data endpoints.
///
/// Disabled unless a tracking URL is configured and the environment is
/// production. Beacons are sent off the request path; a failing analytics
/// host degrades to a warning, never a failed user request.
#[derive(Debug, Clone)]
pub struct TrackingState {
    inner: Option<Arc<TrackingInner>>,
}

#[derive(Debug)]
struct TrackingInner {
    client: reqwest::Client,
    url: String,
    domain: String,
}

#[derive(Debug, Serialize)]
struct TrackingBody {
    name: &'static str,
    url: String,
    domain: String,
    referrer: String,
}

impl TrackingState {
    /// Builds the beacon emitter from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the beacon HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let enabled = config.env == Environment::Production;
        match (&config.tracking_url, enabled) {
            (Some(url), true) => {
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.request_timeout_secs))
                    .build()?;
                Ok(Self {
                    inner: Some(Arc::new(TrackingInner {
                        client,
                        url: url.clone(),
                        domain: config.domain.clone(),
                    })),
                })
            }
            _ => Ok(Self::disabled()),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { inner: None }
    }
}

pub(crate) async fn emit_tracking_beacon(
    State(state): State<TrackingState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(inner) = &state.inner {
        let headers = request.headers();
        let body = TrackingBody {
            name: "pageview",
            url: request.uri().path().to_string(),
            domain: inner.domain.clone(),
            referrer: header_string(headers, header::REFERER.as_str()),
        };
        let user_agent = header_string(headers, header::USER_AGENT.as_str());
        let forwarded_for = header_string(headers, "x-forwarded-for");

        let inner = Arc::clone(inner);
        tokio::spawn(async move {
            if let Err(error) = inner.send_beacon(body, &user_agent, &forwarded_for).await {
                tracing::warn!(error = %error, "tracking beacon failed");
            }
        });
    }

    next.run(request).await
}

impl TrackingInner {
    async fn send_beacon(
        &self,
        body: TrackingBody,
        user_agent: &str,
        forwarded_for: &str,
    ) -> Result<(), reqwest::Error> {
        self.client
            .post(&self.url)
            .header(header::USER_AGENT, user_agent)
            .header("X-Forwarded-For", forwarded_for)
            .header(header::REFERER, body.referrer.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

fn header_string(headers: &axum::http::HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
