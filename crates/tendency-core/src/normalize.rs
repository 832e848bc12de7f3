// Data normalization: StatBundle -> fully-populated PlayerRecord.
//
// Every metric resolves to a finite number. Missing values take a
// position-conditioned default so that players without tracking coverage
// still get an archetype-shaped profile. A few signals stay optional because
// their absence selects a different formula branch downstream.

use std::collections::BTreeMap;

use crate::bundle::StatBundle;
use crate::numeric::{clamp, safe};
use crate::position::Position;

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// Box-score counts per game.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxScore {
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub tov: f64,
    pub stl: f64,
    pub blk: f64,
    pub pf: f64,
    pub fga: f64,
    pub fg3a: f64,
    pub fta: f64,
    pub ft_pct: f64,
    pub ft_rate: f64,
    pub minutes: f64,
    pub games: f64,
}

/// Advanced rates.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvancedRates {
    pub usage: f64,
    pub assist_pct: f64,
    pub oreb_pct: f64,
    pub ts_pct: f64,
    pub per: f64,
    pub bpm: f64,
}

/// Fraction of attempts by distance band.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceSplits {
    pub at_rim: f64,
    pub short: f64,
    pub mid_short: f64,
    pub mid_long: f64,
    pub three: f64,
}

/// Tracking rates with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingRates {
    pub touches: f64,
    pub drives: f64,
    pub pull_up_mid: f64,
    pub pull_up_three: f64,
    pub catch_shoot_mid: f64,
    pub catch_shoot_three: f64,
    pub off_screen: f64,
    pub off_screen_three: f64,
    pub spot_up_drive: f64,
    pub off_screen_drive: f64,
    pub contested_mid: f64,
    pub contested_three: f64,
    pub transition_three: f64,
    pub deflections: f64,
    pub contested_shots: f64,
    pub charges: f64,
    pub and1_rate: f64,
}

/// Signals that are only meaningful when actually observed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservedSignals {
    /// Raw catch-and-shoot volume (mid + three), when either was reported.
    pub catch_shoot_volume: Option<f64>,
    pub post_up_freq: Option<f64>,
    pub iso_freq: Option<f64>,
    pub roll_pct: Option<f64>,
    pub avg_dribbles: Option<f64>,
}

/// Per-game move frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRates {
    pub stepback_mid: f64,
    pub stepback_three: f64,
    pub spin_jumper: f64,
    pub spin_layup: f64,
    pub euro_step: f64,
    pub hop_step: f64,
    pub floater: f64,
    pub step_through: f64,
    pub alley_oop_finish: f64,
    pub alley_oop_pass: f64,
    /// Only present when observed; there is no positional prior.
    pub driving_layup: Option<f64>,
}

/// One (zone-basic, zone-area) cell of attempt/make counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneCell {
    pub basic: String,
    pub area: String,
    pub fga: f64,
    pub fgm: f64,
}

/// Shot-location inputs for the zone distributor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneInputs {
    pub cells: Vec<ZoneCell>,
    pub area_close: BTreeMap<String, f64>,
    pub area_mid: BTreeMap<String, f64>,
    pub area_three: BTreeMap<String, f64>,
}

/// A fully-populated player record, ready for derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub position: Position,
    pub box_score: BoxScore,
    pub advanced: AdvancedRates,
    pub splits: DistanceSplits,
    pub tracking: TrackingRates,
    pub observed: ObservedSignals,
    pub moves: MoveRates,
    pub zones: ZoneInputs,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Merge `bundle` with position-conditioned defaults. Never fails.
pub fn normalize(bundle: &StatBundle, position: &Position) -> PlayerRecord {
    let box_score = normalize_box_score(bundle);
    let advanced = normalize_advanced(bundle);
    let splits = normalize_splits(bundle, position);
    let tracking = normalize_tracking(bundle, position, &box_score);
    let observed = ObservedSignals {
        catch_shoot_volume: match (
            finite(bundle.tracking.catch_shoot_3_fga),
            finite(bundle.tracking.catch_shoot_mid_fga),
        ) {
            (None, None) => None,
            (three, mid) => Some(three.unwrap_or(0.0) + mid.unwrap_or(0.0)),
        },
        post_up_freq: finite(bundle.tracking.post_up_freq),
        iso_freq: finite(bundle.tracking.iso_freq),
        roll_pct: finite(bundle.tracking.pnr_roll_pct),
        avg_dribbles: finite(bundle.tracking.avg_dribbles_before_shot),
    };
    let moves = normalize_moves(bundle, position);
    let zones = normalize_zones(bundle);

    PlayerRecord {
        position: position.clone(),
        box_score,
        advanced,
        splits,
        tracking,
        observed,
        moves,
        zones,
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

fn normalize_box_score(bundle: &StatBundle) -> BoxScore {
    let pg = &bundle.per_game;
    let ast = safe(pg.ast, 3.0);
    let fga = safe(pg.fga, 12.0);
    let fta = safe(pg.fta, 3.0);
    BoxScore {
        pts: safe(pg.pts, 15.0),
        reb: safe(pg.reb, 4.0),
        ast,
        tov: safe(pg.tov, ast * 0.3),
        stl: safe(pg.stl, 0.8),
        blk: safe(pg.blk, 0.5),
        pf: safe(pg.pf, 2.5),
        fga,
        fg3a: safe(pg.fg3a, 3.0),
        fta,
        ft_pct: safe(pg.ft_pct, 0.75),
        ft_rate: safe(pg.ft_rate, if fga > 0.0 { fta / fga } else { 0.0 }),
        minutes: safe(pg.mp, 25.0),
        games: safe(pg.g, 60.0),
    }
}

fn normalize_advanced(bundle: &StatBundle) -> AdvancedRates {
    let adv = &bundle.advanced;
    AdvancedRates {
        usage: safe(adv.usg_pct, 20.0),
        assist_pct: safe(adv.ast_pct, 15.0),
        oreb_pct: safe(adv.orb_pct, 5.0),
        ts_pct: safe(adv.ts_pct, 0.55),
        per: safe(adv.per, 15.0),
        bpm: safe(adv.bpm, 0.0),
    }
}

fn normalize_splits(bundle: &StatBundle, pos: &Position) -> DistanceSplits {
    let s = &bundle.shooting_splits;
    let at_rim_default = if pos.is_big() {
        0.35
    } else if pos.is_guard() {
        0.25
    } else {
        0.28
    };
    let three_default = if pos.is_big() {
        0.05
    } else if pos.is_guard() {
        0.38
    } else {
        0.30
    };
    DistanceSplits {
        at_rim: safe(s.pct_fga_0_3, at_rim_default),
        short: safe(s.pct_fga_3_10, if pos.is_big() { 0.20 } else { 0.15 }),
        mid_short: safe(s.pct_fga_10_16, if pos.is_guard() { 0.12 } else { 0.14 }),
        mid_long: safe(s.pct_fga_16_3pt, if pos.is_guard() { 0.12 } else { 0.10 }),
        three: safe(s.pct_fga_3pt, three_default),
    }
}

fn normalize_tracking(bundle: &StatBundle, pos: &Position, bx: &BoxScore) -> TrackingRates {
    let t = &bundle.tracking;
    let touches_default = if pos.is_guard() {
        60.0
    } else if pos.is_wing() {
        45.0
    } else {
        40.0
    };
    let drives_default = match pos {
        Position::PG => 8.0,
        Position::SG => 5.0,
        Position::SF => 4.0,
        _ => 2.0,
    };
    let drives = safe(t.drives_per_game, drives_default);

    TrackingRates {
        touches: safe(t.touches_per_game, touches_default),
        drives,
        pull_up_mid: safe(t.pull_up_mid_fga, bx.fga * 0.15),
        pull_up_three: safe(t.pull_up_3_fga, bx.fg3a * 0.10),
        catch_shoot_mid: safe(t.catch_shoot_mid_fga, bx.fga * 0.15),
        catch_shoot_three: safe(t.catch_shoot_3_fga, bx.fg3a * 0.4),
        off_screen: safe(t.off_screen_fga, bx.fga * 0.08),
        off_screen_three: safe(t.off_screen_3_fga, bx.fg3a * 0.1),
        spot_up_drive: safe(t.spot_up_drive_freq, drives * 0.1),
        off_screen_drive: safe(t.off_screen_drive_freq, drives * 0.05),
        contested_mid: safe(t.contested_mid_fga_pct, 0.25),
        contested_three: safe(t.contested_3_fga_pct, 0.20),
        transition_three: safe(t.transition_3_fga, bx.fg3a * 0.05),
        deflections: safe(t.deflections_per_game, bx.stl * 0.8),
        contested_shots: safe(
            t.contested_shots_per_game,
            clamp(bx.blk * 2.0 + bx.stl, 0.5, 6.0),
        ),
        charges: safe(t.charges_drawn_per_game, 0.1),
        and1_rate: safe(t.and1_rate, 0.0),
    }
}

/// Positional move-frequency priors, used when play-by-play data is missing.
/// Order: stepback mid, stepback three, spin jumper, spin layup, euro step,
/// hop step, floater, step through, alley-oop finish, alley-oop pass.
fn move_priors(pos: &Position) -> [f64; 10] {
    match pos {
        Position::PG => [0.4, 0.3, 0.1, 0.3, 0.4, 0.3, 0.5, 0.1, 0.1, 0.2],
        Position::SF => [0.2, 0.2, 0.1, 0.2, 0.2, 0.2, 0.2, 0.2, 0.2, 0.1],
        Position::PF => [0.1, 0.1, 0.1, 0.2, 0.2, 0.2, 0.1, 0.2, 0.3, 0.0],
        Position::C => [0.0, 0.0, 0.0, 0.2, 0.1, 0.1, 0.0, 0.3, 0.5, 0.0],
        Position::SG | Position::Unlisted(_) => [0.3, 0.3, 0.1, 0.3, 0.3, 0.3, 0.3, 0.1, 0.2, 0.1],
    }
}

fn normalize_moves(bundle: &StatBundle, pos: &Position) -> MoveRates {
    let m = &bundle.moves;
    let [sb_mid, sb_three, spin_j, spin_l, euro, hop, floater, step_through, oop, oop_pass] =
        move_priors(pos);
    MoveRates {
        stepback_mid: safe(m.stepback_mid, sb_mid),
        stepback_three: safe(m.stepback_3, sb_three),
        spin_jumper: safe(m.spin_jumper, spin_j),
        spin_layup: safe(m.spin_layup, spin_l),
        euro_step: safe(m.euro_step, euro),
        hop_step: safe(m.hop_step, hop),
        floater: safe(m.floater, floater),
        step_through: safe(m.step_through, step_through),
        alley_oop_finish: safe(m.alley_oop_finish, oop),
        alley_oop_pass: safe(m.alley_oop_pass, oop_pass),
        driving_layup: finite(m.driving_layup),
    }
}

fn normalize_zones(bundle: &StatBundle) -> ZoneInputs {
    let cells = bundle
        .shot_zones
        .iter()
        .map(|(key, count)| {
            let mut parts = key.splitn(2, '|');
            let basic = parts.next().unwrap_or("").to_string();
            let area = parts.next().unwrap_or("").to_string();
            ZoneCell {
                basic,
                area,
                fga: safe(count.fga, 0.0).max(0.0),
                fgm: safe(count.fgm, 0.0).max(0.0),
            }
        })
        .collect();

    fn clean(map: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
        map.iter()
            .filter(|(_, v)| v.is_finite())
            .map(|(k, v)| (k.clone(), v.max(0.0)))
            .collect()
    }

    ZoneInputs {
        cells,
        area_close: clean(&bundle.zone_area_close),
        area_mid: clean(&bundle.zone_area_mid),
        area_three: clean(&bundle.zone_area_three),
    }
}
