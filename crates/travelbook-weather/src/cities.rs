//! Static city coordinate table and tiered place-name matching.
//!
//! Covers the Shikoku region plus a few common cities, keyed by both the
//! Chinese and romaji spellings. Romaji keys are stored lowercase; lookups
//! normalize input the same way.

/// Geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub latitude: f64,
    pub longitude: f64,
}

/// Hard fallback when no strategy resolves a location: Tokyo.
pub const DEFAULT_COORD: Coord = Coord {
    latitude: 35.6762,
    longitude: 139.6503,
};

const CITY_TABLE: &[(&str, Coord)] = &[
    // Shikoku
    ("高松", Coord { latitude: 34.3428, longitude: 134.0434 }),
    ("takamatsu", Coord { latitude: 34.3428, longitude: 134.0434 }),
    ("鳴門", Coord { latitude: 34.1734, longitude: 134.6096 }),
    ("naruto", Coord { latitude: 34.1734, longitude: 134.6096 }),
    ("祖谷", Coord { latitude: 33.9167, longitude: 133.8167 }),
    ("高知", Coord { latitude: 33.5597, longitude: 133.5311 }),
    ("kochi", Coord { latitude: 33.5597, longitude: 133.5311 }),
    ("宇和島", Coord { latitude: 33.2233, longitude: 132.5606 }),
    ("uwajima", Coord { latitude: 33.2233, longitude: 132.5606 }),
    ("道後", Coord { latitude: 33.8520, longitude: 132.7859 }),
    ("道後溫泉", Coord { latitude: 33.8520, longitude: 132.7859 }),
    ("dogo", Coord { latitude: 33.8520, longitude: 132.7859 }),
    ("松山", Coord { latitude: 33.8391, longitude: 132.7656 }),
    ("matsuyama", Coord { latitude: 33.8391, longitude: 132.7656 }),
    ("觀音寺", Coord { latitude: 34.1290, longitude: 133.6630 }),
    ("kanonji", Coord { latitude: 34.1290, longitude: 133.6630 }),
    ("丸龜", Coord { latitude: 34.2899, longitude: 133.7975 }),
    ("marugame", Coord { latitude: 34.2899, longitude: 133.7975 }),
    // Common cities
    ("東京", Coord { latitude: 35.6762, longitude: 139.6503 }),
    ("tokyo", Coord { latitude: 35.6762, longitude: 139.6503 }),
    ("大阪", Coord { latitude: 34.6937, longitude: 135.5023 }),
    ("osaka", Coord { latitude: 34.6937, longitude: 135.5023 }),
    ("京都", Coord { latitude: 35.0116, longitude: 135.7681 }),
    ("kyoto", Coord { latitude: 35.0116, longitude: 135.7681 }),
];

fn table_get(key: &str) -> Option<Coord> {
    CITY_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, coord)| *coord)
}

/// Separators treated as token boundaries in place names.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '&' | ',' | '、' | '/')
}

/// Split a place name into candidate tokens.
pub fn tokens(location: &str) -> impl Iterator<Item = &str> {
    location.split(is_separator).filter(|t| !t.is_empty())
}

/// Match a free-text place name against the table. Ordered strategies,
/// first match wins:
/// 1. exact match of the whole normalized string,
/// 2. exact match of any token,
/// 3. substring containment in either direction.
///
/// Returns `None` when the table has nothing; the caller may then try
/// geocoding and finally [`DEFAULT_COORD`].
pub fn lookup(location: &str) -> Option<Coord> {
    let normalized = location.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if let Some(coord) = table_get(&normalized) {
        return Some(coord);
    }

    for token in tokens(&normalized) {
        if let Some(coord) = table_get(token) {
            return Some(coord);
        }
    }

    CITY_TABLE
        .iter()
        .find(|(name, _)| normalized.contains(name) || name.contains(&normalized))
        .map(|(_, coord)| *coord)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_exact_match_full_string() {
        let coord = lookup("高松").unwrap();
        assert_eq!(coord.latitude, 34.3428);
        assert_eq!(coord.longitude, 134.0434);
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert_eq!(lookup("Takamatsu"), lookup("takamatsu"));
        assert!(lookup("TOKYO").is_some());
    }

    #[test]
    fn test_token_match_on_bilingual_label() {
        // "高松 Takamatsu" hits the table through its tokens, no geocoding
        let coord = lookup("高松 Takamatsu").unwrap();
        assert_eq!(coord.latitude, 34.3428);
        assert_eq!(coord.longitude, 134.0434);
    }

    #[test]
    fn test_token_match_with_ampersand() {
        assert!(lookup("鳴門&大塚美術館").is_some());
    }

    #[test]
    fn test_substring_containment() {
        // place contains a table key
        let coord = lookup("道後溫泉本館").unwrap();
        assert_eq!(coord.latitude, 33.8520);
    }

    #[test]
    fn test_no_match() {
        assert!(lookup("Reykjavik").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("   ").is_none());
    }

    #[test]
    fn test_tokens_split_on_separators() {
        let toks: Vec<_> = tokens("高松 Takamatsu、栗林公園").collect();
        assert_eq!(toks, vec!["高松", "Takamatsu", "栗林公園"]);
    }
}
