//! Ward boundaries delivered as GeoJSON and the choropleth styling applied to them.
//!
//! - [`ward`]: typed FeatureCollection, parsing, peak ward and bounds.
//! - [`style`]: per-ward path style and the styled collection for JSON export.
//! - [`mock`]: static forecast used when the service is unavailable.

pub mod mock;
pub mod style;
pub mod ward;

pub use style::styled_collection;
pub use ward::{parse_wards, peak_ward, Bounds, GeoError, Ward, WardCollection};
