// Shooting: volume, distance bands, zone splits, contested and off-dribble
// jumpers.

use super::{Base, Derivation, DerivationStep};
use crate::numeric::{bounded, ratio_or, scaled};
use crate::percentile::TOUCHES;
use crate::zones::{distribute, ZoneFamily};

// Usage 33 maps onto the Shot hard cap of 75.
const SHOT_PER_USAGE: f64 = 0.75 * (75.0 / 33.0);

pub(super) const SHOT_VOLUME: DerivationStep = DerivationStep {
    name: "shot_volume",
    produces: &["Shot", "Touch"],
    needs: &[],
    provides: &[],
    run: shot_volume,
};

fn shot_volume(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    ctx.set("Shot", scaled(r.advanced.usage, SHOT_PER_USAGE, 20.0, 75.0));
    ctx.set("Touch", TOUCHES.tendency(r.tracking.touches, 65, 20) as f64);
}

pub(super) const INSIDE_SHOTS: DerivationStep = DerivationStep {
    name: "inside_shots",
    produces: &["Shot Close", "Shot Under"],
    needs: &[],
    provides: &[Base::CloseParent],
    run: inside_shots,
};

fn inside_shots(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    let s = &r.splits;
    let close = scaled(s.short, 180.0, 10.0, 60.0);
    ctx.set("Shot Close", close);
    ctx.set("Shot Under", scaled(s.at_rim, 180.0, 15.0, 60.0));
    ctx.provide(Base::CloseParent, close);
}

pub(super) const MID_RANGE: DerivationStep = DerivationStep {
    name: "mid_range",
    produces: &["Shot Mid", "Spot-Up Shot Mid", "Off-Screen Mid"],
    needs: &[],
    provides: &[Base::MidParent],
    run: mid_range,
};

fn mid_range(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    let mid = scaled(r.splits.mid_short + r.splits.mid_long, 200.0, 10.0, 55.0);
    ctx.set("Shot Mid", mid);
    ctx.set("Spot-Up Shot Mid", scaled(r.tracking.catch_shoot_mid, 5.0, 10.0, 45.0));
    ctx.set("Off-Screen Mid", scaled(r.tracking.off_screen, 6.0, 5.0, 40.0));
    ctx.provide(Base::MidParent, mid);
}

pub(super) const THREE_POINT: DerivationStep = DerivationStep {
    name: "three_point",
    produces: &["Shot Three", "Spot-Up Three", "Off-Screen Three"],
    needs: &[],
    provides: &[Base::ThreeParent],
    run: three_point,
};

fn three_point(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    let three_rate = ratio_or(r.box_score.fg3a, r.box_score.fga, 0.0);
    let three = scaled(three_rate, 120.0, 5.0, 60.0);
    ctx.set("Shot Three", three);
    ctx.set("Spot-Up Three", scaled(r.tracking.catch_shoot_three, 8.0, 5.0, 60.0));
    ctx.set("Off-Screen Three", scaled(r.tracking.off_screen_three, 10.0, 5.0, 55.0));
    ctx.provide(Base::ThreeParent, three);
}

pub(super) const SHOT_ZONES: DerivationStep = DerivationStep {
    name: "shot_zones",
    produces: &[
        "Shot Close Left",
        "Shot Close Middle",
        "Shot Close Right",
        "Shot Mid Left",
        "Shot Mid Left-Center",
        "Shot Mid Center",
        "Shot Mid Right-Center",
        "Shot Mid Right",
        "Shot Three Left",
        "Shot Three Left-Center",
        "Shot Three Center",
        "Shot Three Right-Center",
        "Shot Three Right",
    ],
    needs: &[Base::CloseParent, Base::MidParent, Base::ThreeParent],
    provides: &[],
    run: shot_zones,
};

fn shot_zones(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    for (family, base) in [
        (ZoneFamily::Close, Base::CloseParent),
        (ZoneFamily::Mid, Base::MidParent),
        (ZoneFamily::Three, Base::ThreeParent),
    ] {
        let parent = ctx.base(base).max(0.0) as u32;
        let distribution = distribute(family, parent, &r.zones);
        for (name, value) in distribution.shares {
            ctx.set(name, value as f64);
        }
    }
}

pub(super) const CONTESTED_JUMPERS: DerivationStep = DerivationStep {
    name: "contested_jumpers",
    produces: &["Contested Jumper Mid", "Contested Jumper Three"],
    needs: &[],
    provides: &[],
    run: contested_jumpers,
};

fn contested_jumpers(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    let t = &r.tracking;
    ctx.set("Contested Jumper Mid", scaled(t.contested_mid, 100.0, 10.0, 45.0));
    ctx.set("Contested Jumper Three", scaled(t.contested_three, 80.0, 5.0, 40.0));
}

pub(super) const PULL_UPS: DerivationStep = DerivationStep {
    name: "pull_ups",
    produces: &[
        "Step-Back Jumper Mid",
        "Step-Back Jumper Three",
        "Spin Jumper",
        "Transition Pull-Up Three",
        "Dribble Pull-Up Mid",
        "Dribble Pull-Up Three",
    ],
    needs: &[],
    provides: &[],
    run: pull_ups,
};

fn pull_ups(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    let m = &r.moves;
    ctx.set("Step-Back Jumper Mid", scaled(m.stepback_mid, 30.0, 5.0, 40.0));
    ctx.set("Step-Back Jumper Three", scaled(m.stepback_three, 25.0, 5.0, 35.0));
    ctx.set("Spin Jumper", scaled(m.spin_jumper, 40.0, 5.0, 45.0));
    ctx.set(
        "Transition Pull-Up Three",
        scaled(r.tracking.transition_three, 15.0, 5.0, 45.0),
    );
    ctx.set("Dribble Pull-Up Mid", scaled(r.tracking.pull_up_mid, 6.0, 10.0, 50.0));
    ctx.set(
        "Dribble Pull-Up Three",
        bounded(r.tracking.pull_up_three * 8.0, 5.0, 40.0),
    );
}
