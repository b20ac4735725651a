use serde::{Deserialize, Serialize};

/// Where a report's numbers came from. Long-range queries answered from the
/// archive are labeled historical, never forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSource {
    Forecast,
    Historical,
}

/// Renderable weather summary for one itinerary day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Display range, e.g. "5°C - 12°C"; "--" when unavailable.
    pub temperature: String,
    pub condition: String,
    pub advice: String,
    pub source: WeatherSource,
}

impl WeatherReport {
    /// Placeholder returned when the weather backend cannot be reached.
    pub fn unavailable() -> Self {
        Self {
            temperature: "--".to_string(),
            condition: "無法取得".to_string(),
            advice: String::new(),
            source: WeatherSource::Historical,
        }
    }
}

/// Internal weather pipeline errors; absorbed before reaching callers.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// WMO weather code to display label. Fixed table; codes outside it
/// render as 未知.
pub fn condition_label(code: i32) -> &'static str {
    match code {
        0 => "晴天",
        1 => "大致晴朗",
        2 => "部分多雲",
        3 => "多雲",
        45 => "有霧",
        48 => "霧淞",
        51 => "小雨",
        53 => "中雨",
        55 => "大雨",
        61 => "小陣雨",
        63 => "中陣雨",
        65 => "大陣雨",
        71 => "小雪",
        73 => "中雪",
        75 => "大雪",
        77 => "雪粒",
        80 => "陣雨",
        81 => "中陣雨",
        82 => "大陣雨",
        85 => "陣雪",
        86 => "大陣雪",
        95 => "雷雨",
        96 => "雷雨夾冰雹",
        99 => "強雷雨夾冰雹",
        _ => "未知",
    }
}

/// Advisory text from weather code and daily maximum. Threshold order is
/// part of the fixed contract.
pub fn advice_for(code: i32, temp_max: f64) -> &'static str {
    if code >= 95 {
        return "有雷雨風險，注意安全";
    }
    if code >= 71 {
        return "天氣寒冷，注意保暖";
    }
    if code >= 61 {
        return "記得攜帶雨具";
    }
    if temp_max > 30.0 {
        return "天氣炎熱，注意防曬";
    }
    if temp_max < 10.0 {
        return "氣溫較低，多穿衣物";
    }
    if code <= 1 {
        return "天氣晴朗，適合戶外活動";
    }
    "天氣穩定，適合旅遊"
}
