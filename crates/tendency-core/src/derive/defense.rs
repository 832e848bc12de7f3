// Defensive tendencies.

use super::{Derivation, DerivationStep};
use crate::numeric::scaled;
use crate::percentile::{BLOCKS, FOULS, STEALS};

pub(super) const DEFENSE: DerivationStep = DerivationStep {
    name: "defense",
    produces: &[
        "Takes Charge",
        "Foul",
        "Hard Foul",
        "Pass Interception",
        "On-Ball Steal",
        "Blocked Shot",
        "Contest Shot",
    ],
    needs: &[],
    provides: &[],
    run: defense,
};

fn defense(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    let (b, t) = (&r.box_score, &r.tracking);
    ctx.set("Takes Charge", scaled(t.charges, 100.0, 5.0, 60.0));
    ctx.set("Foul", FOULS.tendency(b.pf, 60, 10) as f64);
    ctx.set("Hard Foul", if b.pf < 3.0 { 15.0 } else { 20.0 });
    ctx.set("Pass Interception", scaled(t.deflections, 40.0, 10.0, 60.0));
    ctx.set("On-Ball Steal", STEALS.tendency(b.stl, 60, 10) as f64);
    ctx.set("Blocked Shot", BLOCKS.tendency(b.blk, 60, 5) as f64);
    ctx.set("Contest Shot", scaled(t.contested_shots, 8.0, 10.0, 60.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::StatBundle;
    use crate::normalize::normalize;
    use crate::position::Position;
    use serde_json::json;

    #[test]
    fn rim_protector_profile() {
        let r = normalize(
            &StatBundle::from_value(json!({"per_game": {"blk": 2.5, "stl": 0.6, "pf": 3.2}})),
            &Position::C,
        );
        let mut ctx = Derivation::new(&r);
        (DEFENSE.run)(&mut ctx);
        let raw = ctx.into_raw();
        // 6 of 7 block samples <= 2.5 -> 5 + 6/7 * 55 = 52.1 -> 50
        assert_eq!(raw.get("Blocked Shot"), Some(50.0));
        assert_eq!(raw.get("Hard Foul"), Some(20.0));
        // contest default: 2.5 * 2 + 0.6 = 5.6 -> * 8 = 44.8 -> 45
        assert_eq!(raw.get("Contest Shot"), Some(45.0));
        // default charges 0.1 -> 10
        assert_eq!(raw.get("Takes Charge"), Some(10.0));
    }
}
