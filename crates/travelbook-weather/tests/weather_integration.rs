//! Integration tests for the weather provider against mocked Open-Meteo
//! endpoints.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use travelbook_weather::{WeatherProvider, WeatherReport, WeatherSource};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn provider_for(server: &MockServer) -> WeatherProvider {
    let uri = server.uri();
    WeatherProvider::with_base_urls(&uri, &uri, &uri).unwrap()
}

fn forecast_body(days: &[(&str, f64, f64, i32)]) -> String {
    let time: Vec<String> = days.iter().map(|(t, ..)| format!("\"{t}\"")).collect();
    let max: Vec<String> = days.iter().map(|(_, mx, ..)| mx.to_string()).collect();
    let min: Vec<String> = days.iter().map(|(_, _, mn, _)| mn.to_string()).collect();
    let code: Vec<String> = days.iter().map(|(.., c)| c.to_string()).collect();
    format!(
        r#"{{"daily": {{"time": [{}], "temperature_2m_max": [{}], "temperature_2m_min": [{}], "weathercode": [{}]}}}}"#,
        time.join(", "),
        max.join(", "),
        min.join(", "),
        code.join(", ")
    )
}

#[tokio::test]
async fn known_city_is_resolved_without_geocoding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"results": []}"#, "application/json"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "34.3428"))
        .and(query_param("longitude", "134.0434"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            forecast_body(&[("2026-08-27", 28.0, 22.0, 1)]),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let report = provider
        .report_for_on("高松 Takamatsu", date(2026, 8, 27), date(2026, 8, 26))
        .await;

    assert_eq!(report.temperature, "22°C - 28°C");
    assert_eq!(report.condition, "大致晴朗");
    assert_eq!(report.source, WeatherSource::Forecast);
}

#[tokio::test]
async fn forecast_picks_the_requested_day_from_the_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            forecast_body(&[
                ("2026-08-26", 30.0, 24.0, 0),
                ("2026-08-27", 26.0, 20.0, 61),
                ("2026-08-28", 25.0, 19.0, 3),
            ]),
            "application/json",
        ))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let report = provider
        .report_for_on("東京", date(2026, 8, 27), date(2026, 8, 26))
        .await;

    assert_eq!(report.temperature, "20°C - 26°C");
    assert_eq!(report.condition, "小陣雨");
    assert_eq!(report.advice, "記得攜帶雨具");
    assert_eq!(report.source, WeatherSource::Forecast);
}

#[tokio::test]
async fn unknown_place_falls_back_to_default_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    // default is Tokyo
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "35.6762"))
        .and(query_param("longitude", "139.6503"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            forecast_body(&[("2026-08-27", 31.0, 25.0, 0)]),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let report = provider
        .report_for_on("Atlantis Resort", date(2026, 8, 27), date(2026, 8, 26))
        .await;

    assert_eq!(report.advice, "天氣炎熱，注意防曬");
    assert_eq!(report.source, WeatherSource::Forecast);
}

#[tokio::test]
async fn geocoded_place_uses_returned_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Sapporo"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"results": [{"latitude": 43.0618, "longitude": 141.3545}]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "43.0618"))
        .and(query_param("longitude", "141.3545"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            forecast_body(&[("2026-08-27", 22.0, 15.0, 2)]),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let report = provider
        .report_for_on("Sapporo 雪祭", date(2026, 8, 27), date(2026, 8, 26))
        .await;

    assert_eq!(report.temperature, "15°C - 22°C");
}

#[tokio::test]
async fn date_beyond_horizon_is_answered_from_last_years_archive() {
    let server = MockServer::start().await;
    // 2026-09-30 is 35 days out from 2026-08-26; expect the 2025 archive day
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .and(query_param("start_date", "2025-09-30"))
        .and(query_param("end_date", "2025-09-30"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            forecast_body(&[("2025-09-30", 24.0, 17.0, 3)]),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let report = provider
        .report_for_on("高松", date(2026, 9, 30), date(2026, 8, 26))
        .await;

    assert_eq!(report.temperature, "17°C - 24°C");
    assert_eq!(report.condition, "多雲");
    assert_eq!(report.source, WeatherSource::Historical);
}

#[tokio::test]
async fn horizon_boundary_splits_forecast_from_archive() {
    let server = MockServer::start().await;
    // 16 days out is still a forecast
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            forecast_body(&[("2026-09-11", 27.0, 21.0, 1)]),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;
    // 17 days out crosses the horizon: archive, last year's calendar day
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .and(query_param("start_date", "2025-09-12"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            forecast_body(&[("2025-09-12", 26.0, 20.0, 2)]),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let today = date(2026, 8, 26);

    let within = provider.report_for_on("高松", date(2026, 9, 11), today).await;
    assert_eq!(within.source, WeatherSource::Forecast);

    let beyond = provider.report_for_on("高松", date(2026, 9, 12), today).await;
    assert_eq!(beyond.source, WeatherSource::Historical);
    assert_eq!(beyond.temperature, "20°C - 26°C");
}

#[tokio::test]
async fn past_date_is_answered_from_the_archive_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .and(query_param("start_date", "2026-08-20"))
        .and(query_param("end_date", "2026-08-20"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            forecast_body(&[("2026-08-20", 33.0, 26.0, 95)]),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let report = provider
        .report_for_on("大阪", date(2026, 8, 20), date(2026, 8, 26))
        .await;

    assert_eq!(report.condition, "雷雨");
    assert_eq!(report.advice, "有雷雨風險，注意安全");
    assert_eq!(report.source, WeatherSource::Historical);
}

#[tokio::test]
async fn backend_failure_degrades_to_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let report = provider
        .report_for_on("高松", date(2026, 8, 27), date(2026, 8, 26))
        .await;

    assert_eq!(report, WeatherReport::unavailable());
    assert_eq!(report.temperature, "--");
    assert_eq!(report.condition, "無法取得");
}
