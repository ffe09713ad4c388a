//! Location resolution for Clima
//!
//! Turns user input or IP-based auto-detection into a canonical location,
//! with debounced, ranked city suggestions while typing.

pub mod debounce;
pub mod detect;
pub mod geocode;
pub mod types;

pub use debounce::{PendingQuery, SuggestionDebouncer};
pub use detect::IpLocator;
pub use geocode::Geocoder;
pub use types::{Location, LocationError, PlaceSuggestion};
