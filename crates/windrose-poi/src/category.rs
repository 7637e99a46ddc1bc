//! Point-of-interest categories and their Overpass QL query templates.

use serde::{Deserialize, Serialize};

use crate::geo::Location;

/// A class of point of interest, each with its own fixed Overpass filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Camping,
    Water,
    Cafe,
    Observation,
}

impl Category {
    /// Every supported category, in the order they are aggregated.
    pub const ALL: [Category; 4] = [
        Category::Camping,
        Category::Water,
        Category::Cafe,
        Category::Observation,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Camping => "camping",
            Category::Water => "water",
            Category::Cafe => "cafe",
            Category::Observation => "observation",
        }
    }

    /// Build the Overpass QL query for this category around `center`.
    ///
    /// `radius_meters` is the search radius; Overpass `around` filters take
    /// the radius first, then `lat,lon`.
    #[must_use]
    pub(crate) fn overpass_query(self, center: Location, radius_meters: u64) -> String {
        let lat = center.lat.0;
        let lon = center.lon.0;

        match self {
            Category::Camping => format!(
                r#"[out:json];nwr["tourism"="camp_site"]["tent"!="no"](around:{radius_meters},{lat},{lon});out geom;"#
            ),
            Category::Water => format!(
                r#"[out:json];(nwr["amenity"="drinking_water"]["access"!="permissive"]["access"!="private"](around:{radius_meters},{lat},{lon});nwr["drinking_water"="yes"]["access"!="permissive"]["access"!="private"](around:{radius_meters},{lat},{lon});nwr["disused:amenity"="drinking_water"]["access"!="permissive"]["access"!="private"](around:{radius_meters},{lat},{lon}););out geom;"#
            ),
            Category::Cafe => format!(
                r#"[out:json];nwr["amenity"="cafe"](around:{radius_meters},{lat},{lon});out geom;"#
            ),
            Category::Observation => format!(
                r#"[out:json];(nwr["man_made"="tower"]["tower:type"="observation"](around:{radius_meters},{lat},{lon});nwr["leisure"="bird_hide"](around:{radius_meters},{lat},{lon}););out geom;"#
            ),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
