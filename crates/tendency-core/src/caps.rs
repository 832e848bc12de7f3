// Caps enforcement: raw derived values -> canonical, bounded TendencyMap.

use tracing::{debug, warn};

use crate::catalog::{self, TendencyAttribute, RELATIONAL_RULES};
use crate::numeric::round5;
use crate::tendency::{RawTendencies, TendencyMap};

/// Bound one raw value by the attribute's ceilings.
///
/// Non-finite input becomes 0. The value is rounded to the grid, then limited
/// by the hard cap, the locked absolute and the locked cap in that order, and
/// finally floored at 0. Every ceiling is a multiple of 5, so the result stays
/// on the grid.
pub fn cap_value(attr: &TendencyAttribute, raw: f64) -> u32 {
    let v = if raw.is_finite() { raw } else { 0.0 };
    let mut v = round5(v).min(attr.hard_cap as f64);
    if let Some(ceiling) = attr.locked_absolute {
        v = v.min(ceiling as f64);
    }
    if let Some(ceiling) = attr.locked_cap {
        v = v.min(ceiling as f64);
    }
    v.max(0.0) as u32
}

/// Produce the final map: every canonical name in catalog order, capped, with
/// the ordering rules applied once each in declaration order.
///
/// Names missing from `raw` come out as 0. Names in `raw` that are not in the
/// catalog are dropped.
pub fn enforce_caps(raw: &RawTendencies) -> TendencyMap {
    for (name, _) in raw.iter() {
        if catalog::attribute(name).is_none() {
            warn!(name, "dropping non-canonical tendency");
        }
    }

    let entries = catalog::TENDENCIES
        .iter()
        .map(|attr| {
            let value = match raw.get(attr.name) {
                Some(v) => cap_value(attr, v),
                None => {
                    warn!(name = attr.name, "tendency was not derived, defaulting to 0");
                    0
                }
            };
            (attr.name, value)
        })
        .collect();
    let mut map = TendencyMap::from_entries(entries);

    for rule in RELATIONAL_RULES {
        if let (Some(lesser), Some(greater)) = (map.get(rule.lesser), map.get(rule.greater)) {
            if lesser > greater {
                debug!(
                    lesser = rule.lesser,
                    greater = rule.greater,
                    from = lesser,
                    to = greater,
                    "ordering rule lowered value"
                );
                map.set(rule.lesser, greater);
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::attribute;

    fn full_raw(value: f64) -> RawTendencies {
        let mut raw = RawTendencies::new();
        for name in catalog::names() {
            raw.set(name, value);
        }
        raw
    }

    fn attr(name: &str) -> &'static TendencyAttribute {
        attribute(name).unwrap()
    }

    #[test]
    fn rounds_then_caps() {
        assert_eq!(cap_value(attr("Shot"), 54.4), 55);
        assert_eq!(cap_value(attr("Shot"), 97.0), 75);
        assert_eq!(cap_value(attr("Touch"), 12.5), 15);
    }

    #[test]
    fn non_finite_and_negative_become_zero() {
        assert_eq!(cap_value(attr("Drive"), f64::NAN), 0);
        assert_eq!(cap_value(attr("Drive"), f64::INFINITY), 0);
        assert_eq!(cap_value(attr("Drive"), -20.0), 0);
    }

    #[test]
    fn locked_ceilings_apply() {
        assert_eq!(cap_value(attr("Step-Back Jumper Mid"), 80.0), 40);
        assert_eq!(cap_value(attr("Step-Back Jumper Three"), 80.0), 35);
        assert_eq!(cap_value(attr("Putback"), 80.0), 55);
    }

    #[test]
    fn output_is_canonical_and_complete() {
        let map = enforce_caps(&full_raw(30.0));
        assert!(map.is_canonical());
        assert!(map.iter().all(|(_, v)| v % 5 == 0));
    }

    #[test]
    fn missing_names_default_to_zero_and_extras_are_dropped() {
        let mut raw = RawTendencies::new();
        raw.set("Shot", 50.0);
        raw.set("Made Up Tendency", 50.0);
        let map = enforce_caps(&raw);
        assert!(map.is_canonical());
        assert_eq!(map.get("Shot"), Some(50));
        assert_eq!(map.get("Drive"), Some(0));
        assert_eq!(map.get("Made Up Tendency"), None);
    }

    #[test]
    fn ordering_rule_lowers_the_lesser_side() {
        let mut raw = full_raw(20.0);
        raw.set("Spot-Up Shot Mid", 45.0);
        raw.set("Shot Mid", 30.0);
        let map = enforce_caps(&raw);
        assert_eq!(map.get("Spot-Up Shot Mid"), Some(30));
        assert_eq!(map.get("Shot Mid"), Some(30));
    }

    #[test]
    fn ordering_rule_leaves_satisfied_pairs_alone() {
        let mut raw = full_raw(20.0);
        raw.set("Spot-Up Shot Mid", 15.0);
        raw.set("Shot Mid", 40.0);
        let map = enforce_caps(&raw);
        assert_eq!(map.get("Spot-Up Shot Mid"), Some(15));
    }

    #[test]
    fn every_value_respects_its_hard_cap() {
        let map = enforce_caps(&full_raw(1000.0));
        for (name, value) in map.iter() {
            assert_eq!(value, attr(name).hard_cap.min(
                attr(name).locked_absolute.unwrap_or(u32::MAX)
            ).min(attr(name).locked_cap.unwrap_or(u32::MAX)), "{name}");
        }
    }
}
