// Attacking the basket: drive volume, finishes and dunks.

use super::{Derivation, DerivationStep};
use crate::numeric::{bounded, scaled};
use crate::percentile::DRIVES;
use crate::position::Position;

pub(super) const DRIVING: DerivationStep = DerivationStep {
    name: "driving",
    produces: &["Drive", "Spot-Up Drive", "Off-Screen Drive"],
    needs: &[],
    provides: &[],
    run: driving,
};

fn driving(ctx: &mut Derivation<'_>) {
    let t = &ctx.record.tracking;
    let (drives, spot_up, off_screen) = (t.drives, t.spot_up_drive, t.off_screen_drive);
    ctx.set("Drive", DRIVES.tendency(drives, 60, 15) as f64);
    ctx.set("Spot-Up Drive", scaled(spot_up, 50.0, 10.0, 55.0));
    ctx.set("Off-Screen Drive", scaled(off_screen, 50.0, 5.0, 50.0));
}

pub(super) const FINISHING: DerivationStep = DerivationStep {
    name: "finishing",
    produces: &[
        "Use Glass",
        "Driving Layup",
        "Step Through Shot",
        "Spin Layup",
        "Eurostep Layup",
        "Hop Step Layup",
        "Floater",
    ],
    needs: &[],
    provides: &[],
    run: finishing,
};

fn finishing(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    let m = &r.moves;
    let glass = match r.position {
        Position::C => 25.0,
        Position::PF | Position::SF => 20.0,
        _ => 15.0,
    };
    ctx.set("Use Glass", glass);

    let layup = match m.driving_layup {
        Some(freq) => scaled(freq, 40.0, 10.0, 60.0),
        None => DRIVES.tendency(r.tracking.drives, 55, 15) as f64,
    };
    ctx.set("Driving Layup", layup);

    ctx.set("Step Through Shot", scaled(m.step_through, 40.0, 5.0, 45.0));
    ctx.set("Spin Layup", scaled(m.spin_layup, 40.0, 5.0, 55.0));
    ctx.set("Eurostep Layup", scaled(m.euro_step, 40.0, 5.0, 55.0));
    ctx.set("Hop Step Layup", scaled(m.hop_step, 40.0, 5.0, 55.0));

    let floater = if m.floater > 0.0 {
        m.floater
    } else if r.position.is_guard() {
        0.5
    } else {
        0.2
    };
    ctx.set("Floater", scaled(floater, 50.0, 5.0, 55.0));
}

pub(super) const DUNKS: DerivationStep = DerivationStep {
    name: "dunks",
    produces: &[
        "Stand & Dunk",
        "Drive & Dunk",
        "Flashy Dunk",
        "Alley-Oop",
        "Putback",
        "Crash",
    ],
    needs: &[],
    provides: &[],
    run: dunks,
};

fn dunks(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    let pos = &r.position;
    let drives = r.tracking.drives;

    let mut stand: f64 = match pos {
        Position::C => 40.0,
        Position::PF => 35.0,
        Position::SF => 20.0,
        Position::PG => 10.0,
        Position::SG | Position::Unlisted(_) => 15.0,
    };
    if r.splits.at_rim > 0.3 {
        stand = (stand + 10.0).min(60.0);
    }
    ctx.set("Stand & Dunk", bounded(stand, 0.0, 60.0));

    let drive_dunk = DRIVES.tendency(drives, 60, 10) as f64 * 0.6;
    ctx.set("Drive & Dunk", bounded(drive_dunk, 5.0, 60.0));

    let flashy = if drives >= 7.0 && !pos.is_big() {
        25.0
    } else if drives >= 5.0 {
        20.0
    } else {
        15.0
    };
    ctx.set("Flashy Dunk", flashy);

    ctx.set("Alley-Oop", scaled(r.moves.alley_oop_finish, 50.0, 5.0, 55.0));
    ctx.set("Putback", scaled(r.advanced.oreb_pct, 3.0, 5.0, 55.0));

    let crash = if pos.is_big() {
        30.0
    } else if drives >= 6.0 {
        25.0
    } else {
        20.0
    };
    ctx.set("Crash", crash);
}
