// Tendency containers: the unbounded derivation scratch map and the final
// ordered output map.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::catalog;

// ---------------------------------------------------------------------------
// RawTendencies
// ---------------------------------------------------------------------------

/// Unbounded derived values keyed by canonical name, before caps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTendencies {
    values: HashMap<&'static str, f64>,
}

impl RawTendencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, returning the previous value if there was one.
    pub fn set(&mut self, name: &'static str, value: f64) -> Option<f64> {
        self.values.insert(name, value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

// ---------------------------------------------------------------------------
// TendencyMap
// ---------------------------------------------------------------------------

/// Final tendencies in canonical catalog order.
///
/// Every value is a multiple of 5 within `[0, hard_cap]`. Serializes as an
/// ordered JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TendencyMap {
    entries: Vec<(&'static str, u32)>,
}

impl TendencyMap {
    pub(crate) fn from_entries(entries: Vec<(&'static str, u32)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub(crate) fn set(&mut self, name: &str, value: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// True when the names match the catalog exactly, in order.
    pub fn is_canonical(&self) -> bool {
        self.entries.len() == catalog::TENDENCIES.len()
            && self.entries.iter().map(|(n, _)| *n).eq(catalog::names())
    }
}

impl<'a> IntoIterator for &'a TendencyMap {
    type Item = &'a (&'static str, u32);
    type IntoIter = std::slice::Iter<'a, (&'static str, u32)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for TendencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_set_reports_overwrite() {
        let mut raw = RawTendencies::new();
        assert_eq!(raw.set("Shot", 40.0), None);
        assert_eq!(raw.set("Shot", 45.0), Some(40.0));
        assert_eq!(raw.get("Shot"), Some(45.0));
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn map_serializes_in_entry_order() {
        let map = TendencyMap::from_entries(vec![("Shot", 55), ("Touch", 40), ("Drive", 60)]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Shot":55,"Touch":40,"Drive":60}"#);
    }

    #[test]
    fn set_only_touches_existing_names() {
        let mut map = TendencyMap::from_entries(vec![("Shot", 55)]);
        map.set("Shot", 50);
        map.set("Unknown", 10);
        assert_eq!(map.get("Shot"), Some(50));
        assert_eq!(map.get("Unknown"), None);
        assert!(!map.is_canonical());
    }
}
