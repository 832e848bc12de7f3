// Directional zone distribution.
//
// Splits a parent shot tendency (close, mid-range, three) across its
// directional sub-zones. Each sub-zone is bounded by a cap derived from the
// parent; the shares bound the parent but are not a partition of it.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::normalize::{ZoneCell, ZoneInputs};
use crate::numeric::round5;

// ---------------------------------------------------------------------------
// Families and directions
// ---------------------------------------------------------------------------

/// A parent shooting zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ZoneFamily {
    Close,
    Mid,
    Three,
}

/// One directional sub-zone of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneDirection {
    /// Output tendency name.
    pub tendency: &'static str,
    /// Area label used by area-frequency inputs.
    pub area: &'static str,
    /// Zone-basic filter for count inputs (case-insensitive substring).
    pub basic_filter: &'static str,
    /// Zone-area filter for count inputs; `None` matches any area.
    pub area_filter: Option<&'static str>,
}

const LEFT: &str = "Left Side(L)";
const LEFT_CENTER: &str = "Left Side Center(LC)";
const CENTER: &str = "Center(C)";
const RIGHT_CENTER: &str = "Right Side Center(RC)";
const RIGHT: &str = "Right Side(R)";

const fn dir(
    tendency: &'static str,
    area: &'static str,
    basic_filter: &'static str,
    area_filter: Option<&'static str>,
) -> ZoneDirection {
    ZoneDirection {
        tendency,
        area,
        basic_filter,
        area_filter,
    }
}

const CLOSE_DIRECTIONS: &[ZoneDirection] = &[
    dir("Shot Close Left", LEFT, "Restricted Area", Some(LEFT)),
    dir("Shot Close Middle", CENTER, "Restricted Area", Some(CENTER)),
    dir("Shot Close Right", RIGHT, "Restricted Area", Some(RIGHT)),
];

const MID_DIRECTIONS: &[ZoneDirection] = &[
    dir("Shot Mid Left", LEFT, "Mid-Range", Some(LEFT)),
    dir("Shot Mid Left-Center", LEFT_CENTER, "Mid-Range", Some(LEFT_CENTER)),
    dir("Shot Mid Center", CENTER, "Mid-Range", Some(CENTER)),
    dir("Shot Mid Right-Center", RIGHT_CENTER, "Mid-Range", Some(RIGHT_CENTER)),
    dir("Shot Mid Right", RIGHT, "Mid-Range", Some(RIGHT)),
];

// Corner threes are identified by their zone-basic label alone.
const THREE_DIRECTIONS: &[ZoneDirection] = &[
    dir("Shot Three Left", LEFT, "Left Corner 3", None),
    dir("Shot Three Left-Center", LEFT_CENTER, "Above the Break 3", Some(LEFT_CENTER)),
    dir("Shot Three Center", CENTER, "Above the Break 3", Some(CENTER)),
    dir("Shot Three Right-Center", RIGHT_CENTER, "Above the Break 3", Some(RIGHT_CENTER)),
    dir("Shot Three Right", RIGHT, "Right Corner 3", None),
];

impl ZoneFamily {
    pub const ALL: [ZoneFamily; 3] = [ZoneFamily::Close, ZoneFamily::Mid, ZoneFamily::Three];

    pub fn directions(&self) -> &'static [ZoneDirection] {
        match self {
            ZoneFamily::Close => CLOSE_DIRECTIONS,
            ZoneFamily::Mid => MID_DIRECTIONS,
            ZoneFamily::Three => THREE_DIRECTIONS,
        }
    }

    /// Parent value assumed when the parent tendency is zero.
    pub fn default_parent(&self) -> u32 {
        match self {
            ZoneFamily::Close => 50,
            ZoneFamily::Mid => 30,
            ZoneFamily::Three => 40,
        }
    }

    /// The parent tendency whose magnitude this family distributes.
    pub fn parent_tendency(&self) -> &'static str {
        match self {
            ZoneFamily::Close => "Shot Close",
            ZoneFamily::Mid => "Shot Mid",
            ZoneFamily::Three => "Shot Three",
        }
    }

    fn area_frequencies<'a>(&self, inputs: &'a ZoneInputs) -> &'a BTreeMap<String, f64> {
        match self {
            ZoneFamily::Close => &inputs.area_close,
            ZoneFamily::Mid => &inputs.area_mid,
            ZoneFamily::Three => &inputs.area_three,
        }
    }
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// Which data regime produced a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZoneRegime {
    /// Real per-direction attempt fractions.
    DirectFrequency,
    /// Attempt volume and accuracy from raw zone counts.
    VolumeAccuracy,
    /// No location data: every direction sits at the cap.
    NoData,
}

/// Sub-zone values for one family, in direction order.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDistribution {
    pub family: ZoneFamily,
    pub regime: ZoneRegime,
    pub cap: u32,
    pub shares: Vec<(&'static str, u32)>,
}

impl ZoneDistribution {
    pub fn get(&self, tendency: &str) -> Option<u32> {
        self.shares
            .iter()
            .find(|(name, _)| *name == tendency)
            .map(|(_, v)| *v)
    }
}

/// Per-direction cap: `max(floor((parent - 10) / 5) * 5, 15)`.
pub fn zone_cap(parent: u32) -> u32 {
    (parent.saturating_sub(10) / 5 * 5).max(15)
}

/// Distribute `parent` across the directions of `family`.
///
/// Regime selection: area frequencies if any are present for the family,
/// else zone counts if any exist, else the no-data default.
pub fn distribute(family: ZoneFamily, parent: u32, inputs: &ZoneInputs) -> ZoneDistribution {
    let parent = if parent == 0 {
        family.default_parent()
    } else {
        parent
    };
    let cap = zone_cap(parent);
    let directions = family.directions();
    let areas = family.area_frequencies(inputs);

    let (regime, shares) = if !areas.is_empty() {
        (ZoneRegime::DirectFrequency, from_area_frequencies(directions, areas, cap))
    } else if !inputs.cells.is_empty() {
        (ZoneRegime::VolumeAccuracy, from_zone_counts(directions, &inputs.cells, cap))
    } else {
        (
            ZoneRegime::NoData,
            directions.iter().map(|d| (d.tendency, cap)).collect(),
        )
    };

    debug!(?family, ?regime, parent, cap, "zone distribution");
    ZoneDistribution {
        family,
        regime,
        cap,
        shares,
    }
}

fn finish(raw: f64, cap: u32) -> u32 {
    let capped = raw.min(cap as f64).max(0.0);
    round5(capped).max(0.0) as u32
}

fn from_area_frequencies(
    directions: &[ZoneDirection],
    areas: &BTreeMap<String, f64>,
    cap: u32,
) -> Vec<(&'static str, u32)> {
    let n = directions.len() as f64;
    let freq = |d: &ZoneDirection| areas.get(d.area).copied().unwrap_or(0.0);
    let total: f64 = directions.iter().map(freq).sum();
    directions
        .iter()
        .map(|d| {
            let share = if total > 0.0 { freq(d) / total } else { 1.0 / n };
            (d.tendency, finish(share * cap as f64 * n, cap))
        })
        .collect()
}

/// Sum attempts and makes over cells matching a direction's filters.
fn zone_totals(cells: &[ZoneCell], d: &ZoneDirection) -> (f64, f64) {
    let basic_filter = d.basic_filter.to_lowercase();
    let area_filter = d.area_filter.map(str::to_lowercase);
    cells
        .iter()
        .filter(|c| c.basic.to_lowercase().contains(&basic_filter))
        .filter(|c| {
            area_filter
                .as_deref()
                .map_or(true, |f| c.area.to_lowercase().contains(f))
        })
        .fold((0.0, 0.0), |(fga, fgm), c| (fga + c.fga, fgm + c.fgm))
}

fn from_zone_counts(
    directions: &[ZoneDirection],
    cells: &[ZoneCell],
    cap: u32,
) -> Vec<(&'static str, u32)> {
    let n = directions.len() as f64;
    let totals: Vec<(f64, f64)> = directions.iter().map(|d| zone_totals(cells, d)).collect();
    let total_fga: f64 = totals.iter().map(|(fga, _)| fga).sum();
    directions
        .iter()
        .zip(totals)
        .map(|(d, (fga, fgm))| {
            let volume = if total_fga > 0.0 { fga / total_fga } else { 1.0 / n };
            let accuracy = if fga > 0.0 { fgm / fga } else { 0.0 };
            let preference = 0.7 * volume + 0.3 * accuracy;
            (d.tendency, finish(preference * cap as f64 * n, cap))
        })
        .collect()
}
