//! Day-by-day itinerary model.
//!
//! Wire format matches the persisted JSON of the original data files
//! (camelCase field names, `type` for the event kind), so previously
//! exported itineraries load unchanged.
//!
//! Invariants maintained here:
//! - events within a day stay sorted ascending by `time` after every upsert
//! - day id 0 is a reserved sentinel and never appears in iteration
//! - event ids are immutable; draft ids carry the `new-` prefix

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ItineraryError;

/// Reserved day id for the non-itinerary settings view.
pub const SETTINGS_DAY_ID: u32 = 0;

/// Prefix for ids of events that have not been persisted yet.
pub const DRAFT_ID_PREFIX: &str = "new-";

/// Region label for freshly generated days.
const BLANK_REGION: &str = "待定地點";

/// Weekday suffixes for display dates, indexed from Sunday.
const WEEKDAYS: [&str; 7] = ["(日)", "(一)", "(二)", "(三)", "(四)", "(五)", "(六)"];

/// Closed set of event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Flight,
    Train,
    Bus,
    Hotel,
    Sightseeing,
    Food,
    Shopping,
    Walking,
}

/// One extra-info block shown in an event's detail view
/// (ticket number, booking code, markdown text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailEntry {
    pub title: String,
    pub content: String,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A single itinerary event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Start time, "HH:MM". Sort key within a day.
    pub time: String,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub title: String,
    #[serde(rename = "locationName", default)]
    pub location_name: String,
    #[serde(rename = "locationUrl", skip_serializing_if = "Option::is_none")]
    pub location_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: EventType,
    #[serde(default)]
    pub description: String,
    /// Cost in whole currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<DetailEntry>,
}

impl Event {
    /// Mint an id for a not-yet-persisted event.
    pub fn draft_id() -> String {
        format!("{}{}", DRAFT_ID_PREFIX, Utc::now().timestamp_millis())
    }

    /// True if this event has never been persisted.
    pub fn is_draft(&self) -> bool {
        self.id.starts_with(DRAFT_ID_PREFIX)
    }
}

/// One calendar day of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    #[serde(rename = "dayId")]
    pub day_id: u32,
    /// Calendar date, "YYYY-MM-DD".
    #[serde(rename = "dateStr")]
    pub date_str: String,
    /// Formatted label, e.g. "2/13 (五)".
    #[serde(rename = "displayDate")]
    pub display_date: String,
    pub region: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Ordered sequence of days; sequence order is chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary {
    days: Vec<Day>,
}

impl Itinerary {
    /// Build a blank itinerary: `day_count` consecutive days starting at
    /// `start`, day ids 1..=n, no events.
    pub fn blank(day_count: u32, start: NaiveDate) -> Self {
        let days = (0..day_count)
            .map(|i| {
                let date = start + chrono::Duration::days(i64::from(i));
                Day {
                    day_id: i + 1,
                    date_str: format_date(date),
                    display_date: format_display_date(date),
                    region: BLANK_REGION.to_string(),
                    events: Vec::new(),
                }
            })
            .collect();
        Self { days }
    }

    pub(crate) fn from_days(days: Vec<Day>) -> Self {
        Self { days }
    }

    /// Iterate days in order, excluding the reserved settings sentinel.
    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.days.iter().filter(|d| d.day_id != SETTINGS_DAY_ID)
    }

    /// Number of real (non-sentinel) days.
    pub fn day_count(&self) -> usize {
        self.days().count()
    }

    /// Look up a day by id. The sentinel id is never found.
    pub fn day(&self, day_id: u32) -> Option<&Day> {
        if day_id == SETTINGS_DAY_ID {
            return None;
        }
        self.days.iter().find(|d| d.day_id == day_id)
    }

    fn day_mut(&mut self, day_id: u32) -> Result<&mut Day, ItineraryError> {
        if day_id == SETTINGS_DAY_ID {
            return Err(ItineraryError::DayNotFound(day_id));
        }
        self.days
            .iter_mut()
            .find(|d| d.day_id == day_id)
            .ok_or(ItineraryError::DayNotFound(day_id))
    }

    /// Id of the day after `current` in sequence order, skipping the sentinel.
    pub fn next_day_id(&self, current: u32) -> Option<u32> {
        let mut ids = self.days().map(|d| d.day_id);
        ids.find(|id| *id == current)?;
        ids.next()
    }

    /// Id of the day before `current` in sequence order, skipping the sentinel.
    pub fn prev_day_id(&self, current: u32) -> Option<u32> {
        let mut prev = None;
        for day in self.days() {
            if day.day_id == current {
                return prev;
            }
            prev = Some(day.day_id);
        }
        None
    }

    /// Insert a new event or replace the one with the same id.
    ///
    /// Events are re-sorted ascending by `time` before returning; the fixed
    /// "HH:MM" format makes lexicographic order chronological.
    pub fn upsert_event(&mut self, day_id: u32, event: Event) -> Result<(), ItineraryError> {
        validate_event(&event)?;
        let day = self.day_mut(day_id)?;
        match day.events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => day.events.push(event),
        }
        day.events.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(())
    }

    /// Remove an event by id. Removing an already-absent event is a no-op.
    pub fn remove_event(&mut self, day_id: u32, event_id: &str) -> Result<(), ItineraryError> {
        let day = self.day_mut(day_id)?;
        day.events.retain(|e| e.id != event_id);
        Ok(())
    }

    /// Replace a day's region label.
    pub fn rename_region(
        &mut self,
        day_id: u32,
        region: impl Into<String>,
    ) -> Result<(), ItineraryError> {
        self.day_mut(day_id)?.region = region.into();
        Ok(())
    }

    /// Append one blank day after the last one, returning its id.
    pub fn append_day(&mut self) -> Result<u32, ItineraryError> {
        let last = self
            .days()
            .last()
            .ok_or_else(|| ItineraryError::validation("Cannot extend an empty itinerary"))?;
        let date = parse_date(&last.date_str)? + chrono::Duration::days(1);
        let day_id = self.days().map(|d| d.day_id).max().unwrap_or(0) + 1;
        self.days.push(Day {
            day_id,
            date_str: format_date(date),
            display_date: format_display_date(date),
            region: BLANK_REGION.to_string(),
            events: Vec::new(),
        });
        Ok(day_id)
    }

    /// Remove the last real day, returning it. The sentinel is never removed.
    pub fn remove_last_day(&mut self) -> Option<Day> {
        let last_id = self.days().last()?.day_id;
        let pos = self.days.iter().position(|d| d.day_id == last_id)?;
        Some(self.days.remove(pos))
    }

    /// Export as a pretty-printed JSON array of day records.
    pub fn to_json_pretty(&self) -> Result<String, ItineraryError> {
        Ok(serde_json::to_string_pretty(&self.days)?)
    }

    /// Parse an itinerary from exported JSON.
    ///
    /// The document must be an array of day records with unique, non-zero
    /// day ids; anything else is rejected without partial application.
    pub fn from_json(json: &str) -> Result<Self, ItineraryError> {
        let days: Vec<Day> = serde_json::from_str(json)
            .map_err(|e| ItineraryError::import(format!("not a valid itinerary array: {e}")))?;

        let mut seen = HashSet::new();
        for day in &days {
            if day.day_id == SETTINGS_DAY_ID {
                return Err(ItineraryError::import("day id 0 is reserved"));
            }
            if !seen.insert(day.day_id) {
                return Err(ItineraryError::import(format!(
                    "duplicate day id {}",
                    day.day_id
                )));
            }
        }

        Ok(Self { days })
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Display label like "2/13 (五)": month/day without zero padding plus the
/// weekday suffix.
fn format_display_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    format!("{}/{} {}", date.month(), date.day(), weekday)
}

fn parse_date(s: &str) -> Result<NaiveDate, ItineraryError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| ItineraryError::validation(format!("invalid date {s:?}: {e}")))
}

fn validate_event(event: &Event) -> Result<(), ItineraryError> {
    if event.title.trim().is_empty() {
        return Err(ItineraryError::validation("Event title cannot be empty"));
    }
    if !is_valid_time(&event.time) {
        return Err(ItineraryError::validation(format!(
            "Invalid time {:?}, expected HH:MM",
            event.time
        )));
    }
    if let Some(end) = &event.end_time {
        if !is_valid_time(end) {
            return Err(ItineraryError::validation(format!(
                "Invalid end time {end:?}, expected HH:MM"
            )));
        }
    }
    Ok(())
}

fn is_valid_time(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hour < 24 && minute < 60
}
