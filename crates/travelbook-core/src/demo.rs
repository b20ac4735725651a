//! Built-in demo itinerary.
//!
//! A condensed two-day Shikoku trip used when no persisted file is selected,
//! and as seed content when creating a new cloud file.

use crate::itinerary::{Day, DetailEntry, Event, EventType, Itinerary};

impl Itinerary {
    /// The built-in demo dataset.
    pub fn demo() -> Self {
        Itinerary::from_days(vec![
            Day {
                day_id: 1,
                date_str: "2026-02-13".to_string(),
                display_date: "2/13 (五)".to_string(),
                region: "高松 Takamatsu".to_string(),
                events: vec![
                    Event {
                        id: "d1-1".to_string(),
                        time: "11:15".to_string(),
                        end_time: None,
                        title: "抵達高松機場".to_string(),
                        location_name: "高松機場".to_string(),
                        location_url: None,
                        kind: EventType::Flight,
                        description: "CI 278 抵達，出關後前往 2號乘車處".to_string(),
                        cost: None,
                        details: vec![DetailEntry {
                            title: "交通".to_string(),
                            content: "搭乘 12:00 發車的利木津巴士".to_string(),
                            image_url: None,
                        }],
                    },
                    Event {
                        id: "d1-2".to_string(),
                        time: "14:30".to_string(),
                        end_time: None,
                        title: "栗林公園".to_string(),
                        location_name: "栗林公園".to_string(),
                        location_url: None,
                        kind: EventType::Sightseeing,
                        description: "米其林三星庭園，必搭「和船」遊湖".to_string(),
                        cost: Some(410),
                        details: vec![DetailEntry {
                            title: "交通".to_string(),
                            content: "搭琴電：高松築港 -> 栗林公園站".to_string(),
                            image_url: None,
                        }],
                    },
                    Event {
                        id: "d1-3".to_string(),
                        time: "18:30".to_string(),
                        end_time: None,
                        title: "一鶴 骨付鳥 (高松店)".to_string(),
                        location_name: "一鶴 高松店".to_string(),
                        location_url: None,
                        kind: EventType::Food,
                        description: "香川名物烤雞腿，推薦點「雛鳥」".to_string(),
                        cost: None,
                        details: vec![DetailEntry {
                            title: "備註".to_string(),
                            content: "排隊名店，建議提早去".to_string(),
                            image_url: None,
                        }],
                    },
                    Event {
                        id: "d1-4".to_string(),
                        time: "22:00".to_string(),
                        end_time: None,
                        title: "入住：WeBase Takamatsu".to_string(),
                        location_name: "WeBase 高松".to_string(),
                        location_url: None,
                        kind: EventType::Hotel,
                        description: "位於瓦町鬧區，方便移動".to_string(),
                        cost: None,
                        details: vec![DetailEntry {
                            title: "訂房代號".to_string(),
                            content: "待更新".to_string(),
                            image_url: None,
                        }],
                    },
                ],
            },
            Day {
                day_id: 2,
                date_str: "2026-02-14".to_string(),
                display_date: "2/14 (六)".to_string(),
                region: "鳴門 Naruto".to_string(),
                events: vec![
                    Event {
                        id: "d2-1".to_string(),
                        time: "09:00".to_string(),
                        end_time: None,
                        title: "搭乘 JR 前往鳴門".to_string(),
                        location_name: "高松站".to_string(),
                        location_url: None,
                        kind: EventType::Train,
                        description: "高德線特急，池谷站轉鳴門線".to_string(),
                        cost: Some(1430),
                        details: Vec::new(),
                    },
                    Event {
                        id: "d2-2".to_string(),
                        time: "11:00".to_string(),
                        end_time: Some("12:30".to_string()),
                        title: "鳴門漩渦觀潮船".to_string(),
                        location_name: "鳴門觀光港".to_string(),
                        location_url: None,
                        kind: EventType::Sightseeing,
                        description: "配合潮汐時刻表搭乘，建議大型觀潮船".to_string(),
                        cost: Some(1800),
                        details: vec![DetailEntry {
                            title: "備註".to_string(),
                            content: "出發前確認當日滿潮時間".to_string(),
                            image_url: None,
                        }],
                    },
                ],
            },
        ])
    }
}
