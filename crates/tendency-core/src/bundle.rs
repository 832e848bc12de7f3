// Raw stat bundle: every input the engine understands, each field optional.
//
// Deserialization is lenient at every level. A numeric field holding null,
// a non-numeric string, or a non-finite number becomes `None`; a section that
// is not a mapping becomes its empty default; a top-level value that is not a
// mapping becomes `StatBundle::default()`.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::numeric::coerce_f64;

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(coerce_f64(&value))
}

fn lenient_section<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(d)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_freq_map<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, f64>, D::Error> {
    let value = Value::deserialize(d)?;
    let Value::Object(map) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(k, v)| coerce_f64(&v).map(|f| (k, f)))
        .collect())
}

fn lenient_zone_map<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<BTreeMap<String, ZoneCount>, D::Error> {
    let value = Value::deserialize(d)?;
    let Value::Object(map) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(k, v)| {
            serde_json::from_value::<ZoneCount>(v)
                .ok()
                .map(|zone| (k, zone))
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Per-game box score counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerGame {
    #[serde(deserialize_with = "lenient_f64")]
    pub pts: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub reb: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub ast: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub tov: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub stl: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub blk: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pf: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub fga: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub fg3a: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub fta: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub ft_pct: Option<f64>,
    /// Free-throw attempts per field-goal attempt.
    #[serde(deserialize_with = "lenient_f64")]
    pub ft_rate: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub mp: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub g: Option<f64>,
}

/// Advanced rate stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Advanced {
    #[serde(deserialize_with = "lenient_f64")]
    pub usg_pct: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub ast_pct: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub orb_pct: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub ts_pct: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub per: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub bpm: Option<f64>,
}

/// Fraction of field-goal attempts by shot distance band.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootingSplits {
    #[serde(deserialize_with = "lenient_f64")]
    pub pct_fga_0_3: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pct_fga_3_10: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pct_fga_10_16: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pct_fga_16_3pt: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pct_fga_3pt: Option<f64>,
}

/// Player-tracking and play-type rates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tracking {
    #[serde(deserialize_with = "lenient_f64")]
    pub touches_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub drives_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pull_up_mid_fga: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pull_up_3_fga: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub catch_shoot_mid_fga: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub catch_shoot_3_fga: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub off_screen_fga: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub off_screen_3_fga: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub spot_up_drive_freq: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub off_screen_drive_freq: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub contested_mid_fga_pct: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub contested_3_fga_pct: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub transition_3_fga: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub post_up_freq: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub iso_freq: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pnr_roll_pct: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_dribbles_before_shot: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub and1_rate: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub deflections_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub contested_shots_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub charges_drawn_per_game: Option<f64>,
}

/// Attempt/make counts for one (zone-basic, zone-area) cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneCount {
    #[serde(deserialize_with = "lenient_f64")]
    pub fga: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub fgm: Option<f64>,
}

/// Per-game move frequencies extracted from play-by-play action types.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveFrequencies {
    #[serde(deserialize_with = "lenient_f64")]
    pub stepback_mid: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub stepback_3: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub spin_jumper: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub spin_layup: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub euro_step: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub hop_step: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub floater: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub step_through: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub alley_oop_finish: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub alley_oop_pass: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub driving_layup: Option<f64>,
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Fully merged inputs for one player, as assembled by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBundle {
    #[serde(deserialize_with = "lenient_section")]
    pub per_game: PerGame,
    #[serde(deserialize_with = "lenient_section")]
    pub advanced: Advanced,
    #[serde(deserialize_with = "lenient_section")]
    pub shooting_splits: ShootingSplits,
    #[serde(deserialize_with = "lenient_section")]
    pub tracking: Tracking,
    /// Zone counts keyed by `"<zone-basic>|<zone-area>"`.
    #[serde(deserialize_with = "lenient_zone_map")]
    pub shot_zones: BTreeMap<String, ZoneCount>,
    /// Close-range attempt fractions keyed by area label, e.g. `"Center(C)"`.
    #[serde(deserialize_with = "lenient_freq_map")]
    pub zone_area_close: BTreeMap<String, f64>,
    #[serde(deserialize_with = "lenient_freq_map")]
    pub zone_area_mid: BTreeMap<String, f64>,
    #[serde(deserialize_with = "lenient_freq_map")]
    pub zone_area_three: BTreeMap<String, f64>,
    #[serde(alias = "pbp_moves", deserialize_with = "lenient_section")]
    pub moves: MoveFrequencies,
}

impl StatBundle {
    /// Build a bundle from an arbitrary JSON value. Never fails: anything that
    /// is not a JSON object yields the empty bundle.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return StatBundle::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Merge another partial bundle into this one. Present fields in `other`
    /// win; absent fields leave `self` untouched.
    pub fn merge(&mut self, other: StatBundle) {
        macro_rules! take {
            ($section:ident: $($field:ident),+ $(,)?) => {
                $(
                    if other.$section.$field.is_some() {
                        self.$section.$field = other.$section.$field;
                    }
                )+
            };
        }
        take!(per_game: pts, reb, ast, tov, stl, blk, pf, fga, fg3a, fta, ft_pct, ft_rate, mp, g);
        take!(advanced: usg_pct, ast_pct, orb_pct, ts_pct, per, bpm);
        take!(shooting_splits: pct_fga_0_3, pct_fga_3_10, pct_fga_10_16, pct_fga_16_3pt, pct_fga_3pt);
        take!(tracking:
            touches_per_game, drives_per_game, pull_up_mid_fga, pull_up_3_fga,
            catch_shoot_mid_fga, catch_shoot_3_fga, off_screen_fga, off_screen_3_fga,
            spot_up_drive_freq, off_screen_drive_freq, contested_mid_fga_pct,
            contested_3_fga_pct, transition_3_fga, post_up_freq, iso_freq, pnr_roll_pct,
            avg_dribbles_before_shot, and1_rate, deflections_per_game,
            contested_shots_per_game, charges_drawn_per_game,
        );
        take!(moves:
            stepback_mid, stepback_3, spin_jumper, spin_layup, euro_step, hop_step,
            floater, step_through, alley_oop_finish, alley_oop_pass, driving_layup,
        );
        self.shot_zones.extend(other.shot_zones);
        self.zone_area_close.extend(other.zone_area_close);
        self.zone_area_mid.extend(other.zone_area_mid);
        self.zone_area_three.extend(other.zone_area_three);
    }
}
