//! HTTP client for the Overpass interpreter endpoint.

use std::time::Duration;

use serde::Deserialize;

use crate::category::Category;
use crate::error::PoiError;
use crate::geo::Location;
use crate::site::Site;

/// Client for the external point-data service.
///
/// Holds the interpreter URL and the configured search radius; every outbound
/// request carries the construction-time timeout so one slow category cannot
/// stall an aggregate indefinitely. Cloning is cheap (`reqwest::Client` is a
/// shared handle), which is what lets each category task own a client.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    url: String,
    max_distance_km: u32,
}

/// Wire shape of an interpreter response: a flat `elements` array.
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

/// One found map feature. Nodes carry a point directly; ways and relations
/// carry a bounding box whose centroid stands in for the feature.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OverpassElement {
    Node {
        lon: Option<f64>,
        lat: Option<f64>,
        #[serde(default)]
        tags: ElementTags,
    },
    Way {
        bounds: Option<Bounds>,
        #[serde(default)]
        tags: ElementTags,
    },
    Relation {
        bounds: Option<Bounds>,
        #[serde(default)]
        tags: ElementTags,
    },
}

#[derive(Debug, Default, Deserialize)]
struct ElementTags {
    name: Option<String>,
    website: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Bounds {
    #[serde(rename = "minlat")]
    min_lat: f64,
    #[serde(rename = "minLon")]
    min_lon: f64,
    #[serde(rename = "maxLat")]
    max_lat: f64,
    #[serde(rename = "maxLon")]
    max_lon: f64,
}

impl Bounds {
    fn centroid(&self) -> Location {
        Location::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

impl OverpassElement {
    /// Resolve the representative point and tags of this element.
    ///
    /// # Errors
    ///
    /// Returns [`PoiError::MissingGeometry`] when a node lacks coordinates or
    /// a way/relation lacks bounds.
    fn into_point_and_tags(self) -> Result<(Location, ElementTags), PoiError> {
        match self {
            OverpassElement::Node {
                lon: Some(lon),
                lat: Some(lat),
                tags,
            } => Ok((Location::new(lon, lat), tags)),
            OverpassElement::Node { .. } => Err(PoiError::MissingGeometry {
                element_type: "node",
            }),
            OverpassElement::Way {
                bounds: Some(bounds),
                tags,
            } => Ok((bounds.centroid(), tags)),
            OverpassElement::Way { .. } => Err(PoiError::MissingGeometry {
                element_type: "way",
            }),
            OverpassElement::Relation {
                bounds: Some(bounds),
                tags,
            } => Ok((bounds.centroid(), tags)),
            OverpassElement::Relation { .. } => Err(PoiError::MissingGeometry {
                element_type: "relation",
            }),
        }
    }
}

impl OverpassClient {
    /// Creates a client with the interpreter URL, search radius, and request
    /// timeout fixed for its lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`PoiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed (e.g., invalid TLS config).
    pub fn new(
        url: impl Into<String>,
        max_distance_km: u32,
        timeout_secs: u64,
    ) -> Result<Self, PoiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            max_distance_km,
        })
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PoiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn from_config(config: &windrose_core::AppConfig) -> Result<Self, PoiError> {
        Self::new(
            config.overpass_url.clone(),
            config.max_distance_km,
            config.request_timeout_secs,
        )
    }

    #[must_use]
    pub fn max_distance_km(&self) -> u32 {
        self.max_distance_km
    }

    /// Fetches one category's sites around `center` and converts them into
    /// unranked site records, in the order the interpreter returned them.
    ///
    /// All-or-nothing per category: any transport, status, decode, or
    /// geometry failure aborts the whole category.
    ///
    /// # Errors
    ///
    /// - [`PoiError::Http`] — transport failure or timeout.
    /// - [`PoiError::UnexpectedStatus`] — non-2xx interpreter response.
    /// - [`PoiError::Deserialize`] — body is not a valid `elements` document.
    /// - [`PoiError::MissingGeometry`] — an element lacks a usable point.
    pub async fn fetch_category(
        &self,
        category: Category,
        center: Location,
    ) -> Result<Vec<Site>, PoiError> {
        let radius_meters = u64::from(self.max_distance_km) * 1000;
        let query = category.overpass_query(center, radius_meters);

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PoiError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(PoiError::Deserialize)?;

        tracing::debug!(
            category = %category,
            count = parsed.elements.len(),
            "decoded interpreter elements"
        );

        let max_distance_km = f64::from(self.max_distance_km);
        let mut sites = Vec::with_capacity(parsed.elements.len());
        for element in parsed.elements {
            let (point, tags) = element.into_point_and_tags()?;
            let mut site = Site::new(point, center, max_distance_km);
            site.name = tags.name.unwrap_or_default();
            site.website = tags.website.unwrap_or_default();
            sites.push(site);
        }

        Ok(sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_element_resolves_to_its_own_point() {
        let element: OverpassElement = serde_json::from_str(
            r#"{"type":"node","lon":10.5,"lat":52.5,"tags":{"name":"Spring","website":"https://spring.example"}}"#,
        )
        .expect("decode node");

        let (point, tags) = element.into_point_and_tags().expect("node has a point");
        assert!((point.lon.0 - 10.5).abs() < 1e-12);
        assert!((point.lat.0 - 52.5).abs() < 1e-12);
        assert_eq!(tags.name.as_deref(), Some("Spring"));
        assert_eq!(tags.website.as_deref(), Some("https://spring.example"));
    }

    #[test]
    fn way_element_resolves_to_bounds_centroid() {
        let element: OverpassElement = serde_json::from_str(
            r#"{"type":"way","bounds":{"minlat":52.0,"minLon":10.0,"maxLat":52.2,"maxLon":10.4}}"#,
        )
        .expect("decode way");

        let (point, _) = element.into_point_and_tags().expect("way has bounds");
        assert!((point.lon.0 - 10.2).abs() < 1e-12);
        assert!((point.lat.0 - 52.1).abs() < 1e-12);
    }

    #[test]
    fn relation_element_uses_the_same_centroid_rule() {
        let element: OverpassElement = serde_json::from_str(
            r#"{"type":"relation","bounds":{"minlat":-1.0,"minLon":-2.0,"maxLat":1.0,"maxLon":2.0}}"#,
        )
        .expect("decode relation");

        let (point, _) = element.into_point_and_tags().expect("relation has bounds");
        assert!(point.lon.0.abs() < 1e-12);
        assert!(point.lat.0.abs() < 1e-12);
    }

    #[test]
    fn node_without_coordinates_is_missing_geometry() {
        let element: OverpassElement =
            serde_json::from_str(r#"{"type":"node","tags":{"name":"ghost"}}"#).expect("decode");

        let result = element.into_point_and_tags();
        assert!(
            matches!(result, Err(PoiError::MissingGeometry { element_type: "node" })),
            "got: {result:?}"
        );
    }

    #[test]
    fn way_without_bounds_is_missing_geometry() {
        let element: OverpassElement =
            serde_json::from_str(r#"{"type":"way"}"#).expect("decode");

        let result = element.into_point_and_tags();
        assert!(
            matches!(result, Err(PoiError::MissingGeometry { element_type: "way" })),
            "got: {result:?}"
        );
    }

    #[test]
    fn unknown_element_type_fails_to_decode() {
        let result = serde_json::from_str::<OverpassElement>(r#"{"type":"area","lon":1.0,"lat":2.0}"#);
        assert!(result.is_err(), "unknown element type must not decode");
    }

    #[test]
    fn response_without_elements_decodes_empty() {
        let parsed: OverpassResponse = serde_json::from_str("{}").expect("decode empty response");
        assert!(parsed.elements.is_empty());
    }
}
