//! Meeting-place helpers: type-flavoured cafe keywords, a plausibility filter
//! for location strings and offline coordinates.
//!
//! [`plan_meeting`] ties them together into a search a maps client can run.
//! No geocoding service is called; unknown places resolve to the campus default.

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::personality::MbtiType;

pub const DEFAULT_CAFE_KEYWORD: &str = "best cafe";

/// Place searched around when no usable location is given
pub const DEFAULT_LOCATION: &str = "National Cheng Kung University, Tainan";

/// Search radius handed to the maps client, in meters
pub const SEARCH_RADIUS_M: u32 = 1000;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// Words that mark a phrase as something other than a place
const NON_LOCATION_WORDS: &[&str] = &[
    "person", "infp", "enfp", "infj", "intp", "isfp", "isfj", "entp", "esfp", "estp", "intj",
    "entj", "istj", "estj", "enfj", "esfj", "mbti", "people", "recommend", "cafe", "coffee",
    "from",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

const NCKU: Coordinates = Coordinates {
    lat: 22.9977,
    lng: 120.2173,
};

const KNOWN_LOCATIONS: &[(&str, Coordinates)] = &[
    ("ncku", NCKU),
    ("ncku campus", NCKU),
    ("near ncku", NCKU),
    ("national cheng kung university", NCKU),
    ("national cheng kung university, tainan", NCKU),
    (
        "tainan",
        Coordinates {
            lat: 22.9908,
            lng: 120.2133,
        },
    ),
];

/// Ambience words that suit a type's cafe taste
pub fn cafe_traits(mbti: &MbtiType) -> &'static [&'static str] {
    match mbti.as_string().as_str() {
        "INFP" => &["quiet", "aesthetic", "cozy", "indie", "artsy"],
        "INFJ" => &["quiet", "minimal", "calm", "focus"],
        "INTP" => &["quiet", "study", "wifi", "minimal"],
        "ISFP" => &["aesthetic", "hand drip", "cozy", "artsy"],
        "ISFJ" => &["calm", "comfortable", "traditional"],
        "ENFP" => &["vibrant", "creative", "brunch", "aesthetic"],
        "ENTP" => &["creative", "trendy", "discussion"],
        "ESFP" => &["lively", "instagram", "dessert"],
        "ESTP" => &["lively", "social", "open space"],
        "INTJ" => &["minimal", "quiet", "workspace"],
        "ENTJ" => &["spacious", "meeting", "modern"],
        "ISTJ" => &["quiet", "structured", "classic"],
        "ESTJ" => &["spacious", "efficient", "business"],
        "ENFJ" => &["warm", "social", "comfortable"],
        "ESFJ" => &["friendly", "popular", "group"],
        _ => &[],
    }
}

/// Search keyword such as "minimal quiet cafe"
pub fn cafe_keyword(mbti: Option<&MbtiType>) -> String {
    let traits = mbti.map(cafe_traits).unwrap_or_default();
    if traits.is_empty() {
        return DEFAULT_CAFE_KEYWORD.to_string();
    }
    format!("{} cafe", traits[..traits.len().min(2)].join(" "))
}

/// Reject phrases that name a type, people or the venue instead of a place
pub fn is_real_location(text: &str) -> bool {
    let lowered = text.to_lowercase();
    !NON_LOCATION_WORDS.iter().any(|w| lowered.contains(w))
}

/// Offline coordinates for a handful of well-known places
pub fn known_location(name: &str) -> Option<Coordinates> {
    let key = name.trim().to_lowercase();
    KNOWN_LOCATIONS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, coords)| *coords)
}

/// Average of the given points; the campus default when there are none
pub fn meeting_point(points: &[Coordinates]) -> Coordinates {
    if points.is_empty() {
        return NCKU;
    }
    let n = points.len() as f64;
    Coordinates {
        lat: points.iter().map(|p| p.lat).sum::<f64>() / n,
        lng: points.iter().map(|p| p.lng).sum::<f64>() / n,
    }
}

/// Maps place category for a free-form request; cafe when nothing matches
pub fn normalize_place_type(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    if lowered.contains("cafe") || lowered.contains("coffee") {
        "cafe"
    } else if lowered.contains("restaurant") || lowered.contains("food") {
        "restaurant"
    } else if lowered.contains("bar") {
        "bar"
    } else if lowered.contains("park") {
        "park"
    } else {
        "cafe"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    pub name: String,
    pub coordinates: Coordinates,
    /// False when the name was unknown and the default was used
    pub known: bool,
}

/// Where and what to search for a meet-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingPlan {
    pub place_type: &'static str,
    pub keyword: String,
    pub locations: Vec<ResolvedLocation>,
    /// Phrases dropped by [`is_real_location`]
    pub rejected: Vec<String>,
    pub meeting_point: Coordinates,
    pub radius_m: u32,
    pub maps_link: Option<String>,
}

/// Build a meeting plan from a query such as "Tainan and NCKU".
///
/// Locations are split on " and ", implausible ones are dropped, and the
/// search centers on the average of what remains.
pub fn plan_meeting(query: &str, place_type: Option<&str>, mbti: Option<&MbtiType>) -> MeetingPlan {
    let (kept, rejected): (Vec<&str>, Vec<&str>) = query
        .split(" and ")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .partition(|part| is_real_location(part));

    let names = if kept.is_empty() {
        vec![DEFAULT_LOCATION]
    } else {
        kept
    };
    let locations: Vec<ResolvedLocation> = names
        .into_iter()
        .map(|name| {
            let known = known_location(name);
            ResolvedLocation {
                name: name.to_string(),
                coordinates: known.unwrap_or(NCKU),
                known: known.is_some(),
            }
        })
        .collect();

    let points: Vec<Coordinates> = locations.iter().map(|l| l.coordinates).collect();
    let center = meeting_point(&points);
    let place_type = normalize_place_type(place_type.unwrap_or("cafe"));
    let keyword = if place_type == "cafe" {
        cafe_keyword(mbti)
    } else {
        place_type.to_string()
    };
    debug!(
        "Meeting plan: {} location(s), {} rejected, keyword {:?}",
        locations.len(),
        rejected.len(),
        keyword
    );

    let search = format!("{} near {:.4},{:.4}", keyword, center.lat, center.lng);
    let maps_link = url::Url::parse_with_params(MAPS_SEARCH_URL, &[("api", "1"), ("query", search.as_str())])
        .map(String::from)
        .ok();

    MeetingPlan {
        place_type,
        keyword,
        locations,
        rejected: rejected.into_iter().map(str::to_string).collect(),
        meeting_point: center,
        radius_m: SEARCH_RADIUS_M,
        maps_link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cafe_keyword() {
        let intj: MbtiType = "INTJ".parse().unwrap();
        let istp: MbtiType = "ISTP".parse().unwrap();
        assert_eq!(cafe_keyword(Some(&intj)), "minimal quiet cafe");
        assert_eq!(cafe_keyword(Some(&istp)), DEFAULT_CAFE_KEYWORD);
        assert_eq!(cafe_keyword(None), DEFAULT_CAFE_KEYWORD);
    }

    #[test]
    fn test_is_real_location() {
        assert!(is_real_location("Tainan Station"));
        assert!(!is_real_location("somewhere for an INFP"));
        assert!(!is_real_location("Coffee near me"));
    }

    #[test]
    fn test_known_locations() {
        assert_eq!(known_location("  NCKU Campus "), Some(NCKU));
        assert_eq!(known_location("Tainan").map(|c| c.lat), Some(22.9908));
        assert_eq!(known_location("Taipei 101"), None);
    }

    #[test]
    fn test_meeting_point() {
        let a = Coordinates { lat: 10.0, lng: 20.0 };
        let b = Coordinates { lat: 20.0, lng: 40.0 };
        assert_eq!(meeting_point(&[a, b]), Coordinates { lat: 15.0, lng: 30.0 });
        assert_eq!(meeting_point(&[]), NCKU);
    }

    #[test]
    fn test_normalize_place_type() {
        assert_eq!(normalize_place_type("Coffee please"), "cafe");
        assert_eq!(normalize_place_type("street food"), "restaurant");
        assert_eq!(normalize_place_type("a quiet bar"), "bar");
        assert_eq!(normalize_place_type("anything"), "cafe");
    }

    #[test]
    fn test_plan_meeting_averages_known_places() {
        let infp: MbtiType = "INFP".parse().unwrap();
        let plan = plan_meeting("NCKU and Tainan", None, Some(&infp));

        assert_eq!(plan.keyword, "quiet aesthetic cafe");
        assert_eq!(plan.locations.len(), 2);
        assert!(plan.locations.iter().all(|l| l.known));
        assert!((plan.meeting_point.lat - 22.99425).abs() < 1e-9);
        assert!(plan.rejected.is_empty());
        let link = plan.maps_link.unwrap();
        assert!(link.starts_with("https://www.google.com/maps/search/?api=1&query=quiet+aesthetic+cafe"));
    }

    #[test]
    fn test_plan_meeting_falls_back_to_default() {
        let plan = plan_meeting("a place for an ENFP", Some("restaurant"), None);

        assert_eq!(plan.rejected, ["a place for an ENFP"]);
        assert_eq!(plan.locations[0].name, DEFAULT_LOCATION);
        assert!(plan.locations[0].known);
        assert_eq!(plan.meeting_point, NCKU);
        assert_eq!(plan.keyword, "restaurant");

        let plan = plan_meeting("Taipei 101", None, None);
        assert!(!plan.locations[0].known);
        assert_eq!(plan.keyword, DEFAULT_CAFE_KEYWORD);
    }
}
