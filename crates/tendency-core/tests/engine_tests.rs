// Integration tests for the tendency engine.
//
// These drive `calculate_tendencies` through the public API with realistic,
// sparse and malformed bundles and check the shape and key values of the
// resulting maps.

use serde_json::json;
use tendency_core::catalog::{self, RELATIONAL_RULES};
use tendency_core::{calculate_tendencies, StatBundle, TendencyMap};

// ===========================================================================
// Test helpers
// ===========================================================================

fn tendencies(v: serde_json::Value, position: Option<&str>) -> TendencyMap {
    calculate_tendencies(&StatBundle::from_value(v), position)
}

fn assert_well_formed(map: &TendencyMap) {
    assert!(map.is_canonical(), "output is not the canonical name set");
    for (name, value) in map.iter() {
        assert!(value <= 100, "{name} = {value}");
        assert_eq!(value % 5, 0, "{name} = {value} is off the grid");
        assert!(value <= catalog::hard_cap(name), "{name} over hard cap");
    }
    for rule in RELATIONAL_RULES {
        assert!(map.get(rule.lesser) <= map.get(rule.greater));
    }
}

fn zone_names() -> Vec<&'static str> {
    catalog::names()
        .filter(|n| {
            ["Shot Close ", "Shot Mid ", "Shot Three "]
                .iter()
                .any(|p| n.starts_with(p))
        })
        .collect()
}

// ===========================================================================
// Profiles
// ===========================================================================

#[test]
fn high_usage_point_guard() {
    let map = tendencies(
        json!({
            "per_game": {"pts": 27.1, "ast": 8.4, "tov": 3.1, "fga": 20.3, "fg3a": 7.9},
            "advanced": {"usg_pct": 32, "ast_pct": 35},
            "tracking": {"drives_per_game": 9}
        }),
        Some("PG"),
    );
    assert_well_formed(&map);
    assert_eq!(map.get("Shot"), Some(55));
    assert_eq!(map.get("Dish to Open Man"), Some(50));
    assert_eq!(map.get("Post Up"), Some(10));
    assert_eq!(map.get("Drive"), Some(50));
    // creator: usage >= 25 and drives >= 5
    assert_eq!(map.get("Drive and Crossover"), Some(30));
    assert_eq!(map.get("Isolation vs Poor"), Some(30));
    let zones = zone_names();
    assert_eq!(zones.len(), 13);
    for name in zones {
        assert!(map.get(name).unwrap_or(0) > 0, "{name} not populated");
    }
}

#[test]
fn traditional_center() {
    let map = tendencies(
        json!({
            "per_game": {"blk": 2.4, "pf": 3.1, "fga": 9, "fg3a": 0.1},
            "advanced": {"usg_pct": 18, "orb_pct": 12.5},
            "shooting_splits": {"pct_fga_0_3": 0.55, "pct_fga_3_10": 0.25}
        }),
        Some("Center"),
    );
    assert_well_formed(&map);
    assert_eq!(map.get("Post Up"), Some(40));
    assert_eq!(map.get("Stand & Dunk"), Some(50));
    assert_eq!(map.get("Roll vs Pop"), Some(60));
    assert_eq!(map.get("Shot Under"), Some(60));
    // 12.5 * 3 = 37.5 -> 40
    assert_eq!(map.get("Putback"), Some(40));
    assert_eq!(map.get("Drive and Spin"), Some(5));
}

#[test]
fn zone_data_shapes_directional_split() {
    let map = tendencies(
        json!({
            "shooting_splits": {"pct_fga_3_10": 0.3},
            "zone_area_close": {"Left Side(L)": 0.1, "Center(C)": 0.8, "Right Side(R)": 0.1}
        }),
        Some("SF"),
    );
    assert_well_formed(&map);
    // parent 55 -> cap 45; center share 0.8 * 135 = 108 -> 45; sides 13.5 -> 15
    assert_eq!(map.get("Shot Close Middle"), Some(45));
    assert_eq!(map.get("Shot Close Left"), Some(15));
    assert_eq!(map.get("Shot Close Right"), Some(15));
}

// ===========================================================================
// Degenerate input
// ===========================================================================

#[test]
fn empty_bundle_without_position() {
    let map = tendencies(json!({}), None);
    assert_well_formed(&map);
    // blank position resolves to SG
    assert_eq!(map.get("Triple Threat Pump Fake"), Some(25));
}

#[test]
fn malformed_values_are_absorbed() {
    let map = tendencies(
        json!({
            "per_game": {"fga": "n/a", "fg3a": null, "ast": [1, 2], "tov": "0"},
            "advanced": {"usg_pct": "NaN"},
            "tracking": "oops",
            "shot_zones": {"Mid-Range|Center(C)": "bad"}
        }),
        Some("Forward-Center"),
    );
    assert_well_formed(&map);
    assert_eq!(map.get("Shot"), Some(35));
}

#[test]
fn non_object_bundle_matches_empty_bundle() {
    let garbage = tendencies(json!([1, 2, 3]), Some("PF"));
    let empty = tendencies(json!({}), Some("PF"));
    assert_eq!(garbage, empty);
}

#[test]
fn unknown_position_still_yields_full_map() {
    let map = tendencies(json!({}), Some("Swingman"));
    assert_well_formed(&map);
}

#[test]
fn locked_attributes_stay_under_ceilings() {
    let map = tendencies(
        json!({"moves": {"stepback_mid": 50, "stepback_3": 50, "alley_oop_finish": 50}}),
        Some("SG"),
    );
    assert_eq!(map.get("Step-Back Jumper Mid"), Some(40));
    assert_eq!(map.get("Step-Back Jumper Three"), Some(35));
    assert_eq!(map.get("Alley-Oop"), Some(55));
}

#[test]
fn spot_up_mid_never_exceeds_shot_mid() {
    let map = tendencies(
        json!({
            "shooting_splits": {"pct_fga_10_16": 0.02, "pct_fga_16_3pt": 0.02},
            "tracking": {"catch_shoot_mid_fga": 9}
        }),
        Some("SG"),
    );
    assert_eq!(map.get("Shot Mid"), Some(10));
    assert_eq!(map.get("Spot-Up Shot Mid"), Some(10));
}

#[test]
fn output_serializes_in_canonical_order() {
    let map = tendencies(json!({}), Some("PG"));
    let value = serde_json::to_value(&map).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), catalog::TENDENCIES.len());
    let json = serde_json::to_string(&map).unwrap();
    assert!(json.starts_with(r#"{"Shot":"#));
    let touch = json.find(r#""Touch""#).unwrap();
    let contest = json.find(r#""Contest Shot""#).unwrap();
    assert!(touch < contest);
}
