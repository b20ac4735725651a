//! Core types and logic for TravelBook
//!
//! Holds the itinerary data model and its invariants, blank/demo itinerary
//! generation, JSON export/import, the session context and configuration.

pub mod config;
pub mod demo;
pub mod error;
pub mod itinerary;
pub mod session;

pub use config::{Config, DriveConfig};
pub use error::ItineraryError;
pub use itinerary::{
    Day, DetailEntry, Event, EventType, Itinerary, DRAFT_ID_PREFIX, SETTINGS_DAY_ID,
};
pub use session::{Session, SessionStore};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("TravelBook core initialized");
    Ok(())
}
