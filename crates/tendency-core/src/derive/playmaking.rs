// Ball handling and playmaking: triple threat, dribble setup, drive moves,
// passing, isolation and discipline.

use super::{Base, Derivation, DerivationStep};
use crate::numeric::{bounded, scaled};
use crate::percentile::ASSIST_RATE;

/// Usage and drive thresholds marking a primary creator.
const CREATOR_USAGE: f64 = 25.0;
const CREATOR_DRIVES: f64 = 5.0;

pub(super) const TRIPLE_THREAT: DerivationStep = DerivationStep {
    name: "triple_threat",
    produces: &[
        "Drive Right",
        "Triple Threat Pump Fake",
        "Triple Threat Jab Step",
        "Triple Threat Idle",
        "Triple Threat Shoot",
    ],
    needs: &[],
    provides: &[],
    run: triple_threat,
};

fn triple_threat(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    // No handedness data; slight right bias.
    ctx.set("Drive Right", 55.0);

    let (pump, jab) = if r.position.is_guard() {
        (25.0, 20.0)
    } else if r.position.is_wing() {
        (20.0, 20.0)
    } else {
        (15.0, 15.0)
    };
    ctx.set("Triple Threat Pump Fake", pump);
    ctx.set("Triple Threat Jab Step", jab);
    ctx.set("Triple Threat Idle", 20.0);

    let catch_and_shoot = r.observed.catch_shoot_volume.unwrap_or(0.0);
    let shoot = if catch_and_shoot > 3.0 {
        35.0
    } else if catch_and_shoot > 1.0 {
        25.0
    } else {
        20.0
    };
    ctx.set("Triple Threat Shoot", shoot);
}

pub(super) const CREATOR_PROFILE: DerivationStep = DerivationStep {
    name: "creator_profile",
    produces: &["Set Up with Size Up", "Set Up with Hesitation", "No Set Up Dribble"],
    needs: &[],
    provides: &[Base::Creator],
    run: creator_profile,
};

fn creator_profile(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    let usage = r.advanced.usage;
    let creator = usage >= CREATOR_USAGE && r.tracking.drives >= CREATOR_DRIVES;
    ctx.provide(Base::Creator, if creator { 1.0 } else { 0.0 });

    if creator {
        ctx.set("Set Up with Size Up", scaled(usage, 1.2, 20.0, 55.0));
        ctx.set("Set Up with Hesitation", scaled(usage, 1.1, 20.0, 55.0));
    } else {
        let setup = if r.position.is_big() { 15.0 } else { 20.0 };
        ctx.set("Set Up with Size Up", setup);
        ctx.set("Set Up with Hesitation", setup);
    }

    let dribbles = r
        .observed
        .avg_dribbles
        .unwrap_or(if creator { 1.5 } else { 3.0 });
    ctx.set("No Set Up Dribble", bounded((5.0 - dribbles) * 5.0 + 10.0, 15.0, 35.0));
}

/// Drive-move tendencies as offsets from the drive-move base.
const DRIVE_MOVE_OFFSETS: &[(&str, f64)] = &[
    ("Drive and Crossover", 0.0),
    ("Drive and Double Crossover", -10.0),
    ("Drive and Spin", -10.0),
    ("Drive and Half Spin", -5.0),
    ("Drive and Step Back", -5.0),
    ("Drive and Behind the Back", -10.0),
    ("Drive and Dribble Hesitation", -5.0),
    ("Drive and In and Out", -10.0),
];

pub(super) const DRIVE_MOVES: DerivationStep = DerivationStep {
    name: "drive_moves",
    produces: &[
        "Drive and Crossover",
        "Drive and Double Crossover",
        "Drive and Spin",
        "Drive and Half Spin",
        "Drive and Step Back",
        "Drive and Behind the Back",
        "Drive and Dribble Hesitation",
        "Drive and In and Out",
        "No Drive & Dribble Move",
    ],
    needs: &[Base::Creator],
    provides: &[],
    run: drive_moves,
};

fn drive_moves(ctx: &mut Derivation<'_>) {
    let pos = &ctx.record.position;
    let creator = ctx.is_creator();
    let base = if creator {
        30.0
    } else if pos.is_guard() {
        20.0
    } else if pos.is_wing() {
        15.0
    } else {
        10.0
    };
    let no_move = if pos.is_big() {
        60.0
    } else if creator {
        35.0
    } else if pos.is_guard() {
        40.0
    } else {
        50.0
    };

    for (name, offset) in DRIVE_MOVE_OFFSETS {
        ctx.set(*name, bounded(base + offset, 5.0, 55.0));
    }
    ctx.set("No Drive & Dribble Move", no_move);
}

pub(super) const PASSING: DerivationStep = DerivationStep {
    name: "passing",
    produces: &[
        "Attack Strong on Drive",
        "Dish to Open Man",
        "Flashy Pass",
        "Alley-Oop Pass",
        "Roll vs Pop",
        "Transition Spot Up vs Cut to Basket",
    ],
    needs: &[],
    provides: &[],
    run: passing,
};

fn passing(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    let big = r.position.is_big();
    ctx.set("Attack Strong on Drive", if big { 25.0 } else { 35.0 });
    ctx.set(
        "Dish to Open Man",
        ASSIST_RATE.tendency(r.advanced.assist_pct, 55, 15) as f64,
    );
    ctx.set("Flashy Pass", 15.0);
    ctx.set("Alley-Oop Pass", scaled(r.moves.alley_oop_pass, 50.0, 5.0, 55.0));

    let roll = match r.observed.roll_pct {
        Some(pct) => scaled(pct, 85.0, 20.0, 85.0),
        None if big => 60.0,
        None => 40.0,
    };
    ctx.set("Roll vs Pop", roll);

    let fg3a = r.box_score.fg3a;
    let spot_up_share = if fg3a > 0.0 {
        r.tracking.catch_shoot_three / fg3a.max(1.0)
    } else {
        0.5
    };
    ctx.set(
        "Transition Spot Up vs Cut to Basket",
        bounded(40.0 + spot_up_share * 40.0, 30.0, 85.0),
    );
}

/// Isolation tendency multipliers by defender quality.
const ISOLATION_TIERS: &[(&str, f64)] = &[
    ("Isolation vs Elite", 0.5),
    ("Isolation vs Good", 0.7),
    ("Isolation vs Average", 0.85),
    ("Isolation vs Poor", 1.0),
];

pub(super) const ISOLATION: DerivationStep = DerivationStep {
    name: "isolation",
    produces: &[
        "Isolation vs Elite",
        "Isolation vs Good",
        "Isolation vs Average",
        "Isolation vs Poor",
    ],
    needs: &[Base::Creator],
    provides: &[],
    run: isolation,
};

fn isolation(ctx: &mut Derivation<'_>) {
    let base = match ctx.record.observed.iso_freq {
        Some(freq) => (freq * 4.0).clamp(5.0, 55.0),
        None if ctx.is_creator() => 30.0,
        None => 15.0,
    };
    for (name, multiplier) in ISOLATION_TIERS {
        ctx.set(*name, bounded(base * multiplier, 5.0, 55.0));
    }
}

pub(super) const DISCIPLINE: DerivationStep = DerivationStep {
    name: "discipline",
    produces: &["Play Discipline"],
    needs: &[],
    provides: &[],
    run: discipline,
};

fn discipline(ctx: &mut Derivation<'_>) {
    let b = &ctx.record.box_score;
    let assist_to_turnover = b.ast / b.tov.max(0.1);
    ctx.set(
        "Play Discipline",
        bounded(40.0 + assist_to_turnover * 5.0, 35.0, 70.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::StatBundle;
    use crate::normalize::{normalize, PlayerRecord};
    use crate::position::Position;
    use crate::tendency::RawTendencies;
    use serde_json::json;

    fn run(steps: &[DerivationStep], v: serde_json::Value, pos: Position) -> RawTendencies {
        let r: PlayerRecord = normalize(&StatBundle::from_value(v), &pos);
        let mut ctx = Derivation::new(&r);
        for step in steps {
            (step.run)(&mut ctx);
        }
        ctx.into_raw()
    }

    fn creator_bundle() -> serde_json::Value {
        json!({"advanced": {"usg_pct": 30}, "tracking": {"drives_per_game": 12}})
    }

    #[test]
    fn creators_get_usage_scaled_setup() {
        let raw = run(&[CREATOR_PROFILE], creator_bundle(), Position::PG);
        assert_eq!(raw.get("Set Up with Size Up"), Some(35.0));
        assert_eq!(raw.get("Set Up with Hesitation"), Some(35.0));
        // 1.5 default dribbles -> (5 - 1.5) * 5 + 10 = 27.5 -> 30
        assert_eq!(raw.get("No Set Up Dribble"), Some(30.0));
    }

    #[test]
    fn non_creator_bigs_get_low_setup() {
        let raw = run(&[CREATOR_PROFILE], json!({}), Position::C);
        assert_eq!(raw.get("Set Up with Size Up"), Some(15.0));
        // 3.0 default dribbles -> 20
        assert_eq!(raw.get("No Set Up Dribble"), Some(20.0));
    }

    #[test]
    fn drive_moves_offset_from_base() {
        let raw = run(&[CREATOR_PROFILE, DRIVE_MOVES], creator_bundle(), Position::SG);
        assert_eq!(raw.get("Drive and Crossover"), Some(30.0));
        assert_eq!(raw.get("Drive and Spin"), Some(20.0));
        assert_eq!(raw.get("Drive and Half Spin"), Some(25.0));
        assert_eq!(raw.get("No Drive & Dribble Move"), Some(35.0));

        let raw = run(&[CREATOR_PROFILE, DRIVE_MOVES], json!({}), Position::PF);
        // base 10: offsets of -10 floor at 5
        assert_eq!(raw.get("Drive and In and Out"), Some(5.0));
        assert_eq!(raw.get("No Drive & Dribble Move"), Some(60.0));
    }

    #[test]
    fn isolation_tiers_scale_observed_frequency() {
        let raw = run(
            &[CREATOR_PROFILE, ISOLATION],
            json!({"tracking": {"iso_freq": 10}}),
            Position::SF,
        );
        // base 40: 20, 28 -> 30, 34 -> 35, 40
        assert_eq!(raw.get("Isolation vs Elite"), Some(20.0));
        assert_eq!(raw.get("Isolation vs Good"), Some(30.0));
        assert_eq!(raw.get("Isolation vs Average"), Some(35.0));
        assert_eq!(raw.get("Isolation vs Poor"), Some(40.0));
    }

    #[test]
    fn isolation_without_data_depends_on_creator_flag() {
        let raw = run(&[CREATOR_PROFILE, ISOLATION], creator_bundle(), Position::PG);
        assert_eq!(raw.get("Isolation vs Poor"), Some(30.0));
        let raw = run(&[CREATOR_PROFILE, ISOLATION], json!({}), Position::PG);
        assert_eq!(raw.get("Isolation vs Poor"), Some(15.0));
    }

    #[test]
    fn passing_reads_assist_rate_and_roll_data() {
        let raw = run(
            &[PASSING],
            json!({"advanced": {"ast_pct": 35}, "tracking": {"pnr_roll_pct": 0.5}}),
            Position::PG,
        );
        assert_eq!(raw.get("Dish to Open Man"), Some(50.0));
        // 0.5 * 85 = 42.5 -> 45
        assert_eq!(raw.get("Roll vs Pop"), Some(45.0));
        let raw = run(&[PASSING], json!({}), Position::C);
        assert_eq!(raw.get("Roll vs Pop"), Some(60.0));
        assert_eq!(raw.get("Attack Strong on Drive"), Some(25.0));
    }

    #[test]
    fn transition_spot_up_without_threes_is_neutral() {
        let raw = run(&[PASSING], json!({"per_game": {"fg3a": 0}}), Position::C);
        assert_eq!(raw.get("Transition Spot Up vs Cut to Basket"), Some(60.0));
    }

    #[test]
    fn discipline_guards_zero_turnovers() {
        let raw = run(&[DISCIPLINE], json!({"per_game": {"ast": 6, "tov": 0}}), Position::PG);
        assert_eq!(raw.get("Play Discipline"), Some(70.0));
        let raw = run(&[DISCIPLINE], json!({"per_game": {"ast": 2, "tov": 4}}), Position::PG);
        // 40 + 0.5 * 5 = 42.5 -> 45
        assert_eq!(raw.get("Play Discipline"), Some(45.0));
    }
}
