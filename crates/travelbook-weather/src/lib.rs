//! Weather lookups for itinerary days.
//!
//! Maps a free-text place name to coordinates via tiered matching against a
//! static city table with a geocoding fallback, then queries Open-Meteo's
//! forecast or archive API depending on how far the target date is from
//! today. The public entry point never fails: any error degrades to a
//! placeholder report so weather can never block itinerary usage.

pub mod cities;
pub mod geocode;
pub mod provider;
pub mod types;

pub use cities::{Coord, DEFAULT_COORD};
pub use provider::{WeatherProvider, FORECAST_HORIZON_DAYS};
pub use types::{WeatherError, WeatherReport, WeatherSource};
