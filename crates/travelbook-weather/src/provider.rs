//! Open-Meteo backed weather reports.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use reqwest::Client;
use serde::Deserialize;

use crate::cities::{self, Coord, DEFAULT_COORD};
use crate::geocode::geocode_first;
use crate::types::{advice_for, condition_label, WeatherError, WeatherReport, WeatherSource};

const FORECAST_URL: &str = "https://api.open-meteo.com";
const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com";
const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Open-Meteo serves forecasts up to this many days ahead. Dates beyond the
/// horizon are answered from the archive for the same calendar day one year
/// earlier.
pub const FORECAST_HORIZON_DAYS: i64 = 16;

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";

#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weathercode: Vec<i32>,
}

/// Weather client for itinerary days.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    forecast_base: String,
    archive_base: String,
    geocode_base: String,
}

impl WeatherProvider {
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_urls(FORECAST_URL, ARCHIVE_URL, GEOCODE_URL)
    }

    /// Construct against explicit endpoints. Tests point all three at a
    /// mock server.
    pub fn with_base_urls(
        forecast_base: &str,
        archive_base: &str,
        geocode_base: &str,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client: Arc::new(client),
            forecast_base: forecast_base.trim_end_matches('/').to_string(),
            archive_base: archive_base.trim_end_matches('/').to_string(),
            geocode_base: geocode_base.trim_end_matches('/').to_string(),
        })
    }

    /// Weather for a place on a date. Never fails: on any error the caller
    /// gets a placeholder report and the itinerary renders without weather.
    pub async fn report_for(&self, location: &str, date: NaiveDate) -> WeatherReport {
        self.report_for_on(location, date, Local::now().date_naive())
            .await
    }

    /// Same as [`report_for`](Self::report_for) with an explicit "today",
    /// which anchors the forecast-or-archive decision.
    pub async fn report_for_on(
        &self,
        location: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> WeatherReport {
        match self.try_report(location, date, today).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Weather lookup for '{}' on {} failed: {}", location, date, e);
                WeatherReport::unavailable()
            }
        }
    }

    async fn try_report(
        &self,
        location: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<WeatherReport, WeatherError> {
        let coord = self.resolve_coordinates(location).await;
        let delta = (date - today).num_days();

        if delta < 0 {
            // already happened, the archive has the real numbers
            self.archive_report(coord, date).await
        } else if delta <= FORECAST_HORIZON_DAYS {
            self.forecast_report(coord, date).await
        } else {
            // beyond the horizon: use the same calendar day last year as a proxy
            let proxy = previous_year_same_day(date);
            tracing::debug!(
                "Date {} exceeds forecast horizon, using archive for {}",
                date,
                proxy
            );
            self.archive_report(coord, proxy).await
        }
    }

    /// Place name to coordinates. Static table first, then geocoding on the
    /// leading token, then the default. Never fails.
    async fn resolve_coordinates(&self, location: &str) -> Coord {
        if let Some(coord) = cities::lookup(location) {
            return coord;
        }
        let first = cities::tokens(location).next().unwrap_or(location);
        if let Some(coord) = geocode_first(&self.client, &self.geocode_base, first).await {
            return coord;
        }
        tracing::debug!("Could not resolve '{}', using default coordinates", location);
        DEFAULT_COORD
    }

    async fn forecast_report(
        &self,
        coord: Coord,
        date: NaiveDate,
    ) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/v1/forecast", self.forecast_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coord.latitude.to_string()),
                ("longitude", coord.longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", FORECAST_HORIZON_DAYS.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body: DailyResponse = response.json().await?;
        report_at(&body.daily, date, WeatherSource::Forecast)
    }

    async fn archive_report(
        &self,
        coord: Coord,
        date: NaiveDate,
    ) -> Result<WeatherReport, WeatherError> {
        let day = date.format("%Y-%m-%d").to_string();
        let url = format!("{}/v1/archive", self.archive_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coord.latitude.to_string()),
                ("longitude", coord.longitude.to_string()),
                ("start_date", day.clone()),
                ("end_date", day),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body: DailyResponse = response.json().await?;
        report_at(&body.daily, date, WeatherSource::Historical)
    }
}

/// Pick the row for `date` out of a daily block, falling back to the first
/// row when the exact date is missing.
fn report_at(
    daily: &DailyBlock,
    date: NaiveDate,
    source: WeatherSource,
) -> Result<WeatherReport, WeatherError> {
    let target = date.format("%Y-%m-%d").to_string();
    let index = daily.time.iter().position(|t| *t == target).unwrap_or(0);

    let max = *daily
        .temperature_2m_max
        .get(index)
        .ok_or_else(|| WeatherError::Parse("daily series is empty".to_string()))?;
    let min = *daily
        .temperature_2m_min
        .get(index)
        .ok_or_else(|| WeatherError::Parse("temperature_2m_min is missing".to_string()))?;
    let code = *daily
        .weathercode
        .get(index)
        .ok_or_else(|| WeatherError::Parse("weathercode is missing".to_string()))?;

    Ok(WeatherReport {
        temperature: format!("{}°C - {}°C", min.round() as i64, max.round() as i64),
        condition: condition_label(code).to_string(),
        advice: advice_for(code, max).to_string(),
        source,
    })
}

/// Same calendar day one year earlier. Feb 29 maps to Feb 28.
fn previous_year_same_day(date: NaiveDate) -> NaiveDate {
    let year = date.year() - 1;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}
