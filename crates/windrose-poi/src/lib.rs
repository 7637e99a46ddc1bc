pub mod aggregate;
pub mod category;
pub mod error;
pub mod geo;
pub mod overpass;
pub mod rank;
pub mod site;

pub use aggregate::AggregateSites;
pub use category::Category;
pub use error::{CategoryError, PoiError};
pub use geo::{Coordinate, Location};
pub use overpass::OverpassClient;
pub use site::Site;
