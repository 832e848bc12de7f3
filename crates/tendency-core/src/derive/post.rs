// Post play: overall post-up frequency and the move mix distributed from it.

use super::{Base, Derivation, DerivationStep};
use crate::numeric::{bounded, round5};
use crate::position::Position;

pub(super) const POST_UP: DerivationStep = DerivationStep {
    name: "post_up",
    produces: &["Post Up"],
    needs: &[],
    provides: &[Base::PostUp],
    run: post_up,
};

fn post_up(ctx: &mut Derivation<'_>) {
    let r = ctx.record;
    let value = match r.observed.post_up_freq {
        Some(freq) => (freq * 100.0).clamp(5.0, 60.0),
        None => match r.position {
            Position::C => 40.0,
            Position::PF => 30.0,
            Position::SF => 15.0,
            _ => 10.0,
        },
    };
    ctx.provide(Base::PostUp, value);
    ctx.set("Post Up", round5(value));
}

/// Which share of the post-up base a move receives.
#[derive(Clone, Copy)]
enum Share {
    /// 70% of the base.
    Primary,
    /// 40% of the base, never below 10.
    Secondary,
    /// Primary for bigs, secondary for everyone else.
    BigPrimary,
}

const POST_MOVES_MIX: &[(&str, Share, f64)] = &[
    ("Post Back Down", Share::Primary, 60.0),
    ("Post Aggressive Back Down", Share::Secondary, 60.0),
    ("Post Face Up", Share::Secondary, 55.0),
    ("Post Spin", Share::Secondary, 60.0),
    ("Post Drive", Share::Secondary, 60.0),
    ("Post Drop Step", Share::BigPrimary, 60.0),
    ("Shoot From Post", Share::Primary, 60.0),
    ("Post Hook Left", Share::BigPrimary, 60.0),
    ("Post Hook Right", Share::BigPrimary, 60.0),
    ("Post Fade Left", Share::Secondary, 60.0),
    ("Post Fade Right", Share::Secondary, 60.0),
    ("Post Shimmy Shot", Share::Secondary, 60.0),
    ("Post Hop Shot", Share::Secondary, 60.0),
    ("Post Step Back Shot", Share::Secondary, 60.0),
    ("Post Up and Under", Share::Secondary, 60.0),
];

pub(super) const POST_MOVES: DerivationStep = DerivationStep {
    name: "post_moves",
    produces: &[
        "Post Back Down",
        "Post Aggressive Back Down",
        "Post Face Up",
        "Post Spin",
        "Post Drive",
        "Post Drop Step",
        "Shoot From Post",
        "Post Hook Left",
        "Post Hook Right",
        "Post Fade Left",
        "Post Fade Right",
        "Post Shimmy Shot",
        "Post Hop Shot",
        "Post Step Back Shot",
        "Post Up and Under",
    ],
    needs: &[Base::PostUp],
    provides: &[],
    run: post_moves,
};

fn post_moves(ctx: &mut Derivation<'_>) {
    let post_up = ctx.base(Base::PostUp);
    let big = ctx.record.position.is_big();
    let primary = round5(post_up * 0.7);
    let secondary = round5(post_up * 0.4).max(10.0);

    for (name, share, cap) in POST_MOVES_MIX {
        let value = match share {
            Share::Primary => primary,
            Share::Secondary => secondary,
            Share::BigPrimary if big => primary,
            Share::BigPrimary => secondary,
        };
        ctx.set(*name, bounded(value, 10.0, *cap));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::StatBundle;
    use crate::normalize::normalize;
    use crate::tendency::RawTendencies;
    use serde_json::json;

    fn run(v: serde_json::Value, pos: Position) -> RawTendencies {
        let r = normalize(&StatBundle::from_value(v), &pos);
        let mut ctx = Derivation::new(&r);
        (POST_UP.run)(&mut ctx);
        (POST_MOVES.run)(&mut ctx);
        ctx.into_raw()
    }

    #[test]
    fn mix_covers_declared_moves() {
        let names: Vec<&str> = POST_MOVES_MIX.iter().map(|(n, _, _)| *n).collect();
        assert_eq!(names, POST_MOVES.produces);
    }

    #[test]
    fn center_defaults_favor_power_moves() {
        let raw = run(json!({}), Position::C);
        assert_eq!(raw.get("Post Up"), Some(40.0));
        // primary 28 -> 30, secondary 16 -> 15
        assert_eq!(raw.get("Post Back Down"), Some(30.0));
        assert_eq!(raw.get("Post Hook Left"), Some(30.0));
        assert_eq!(raw.get("Post Fade Left"), Some(15.0));
    }

    #[test]
    fn guards_fall_to_the_floor() {
        let raw = run(json!({}), Position::PG);
        assert_eq!(raw.get("Post Up"), Some(10.0));
        assert_eq!(raw.get("Post Back Down"), Some(10.0));
        assert_eq!(raw.get("Post Hook Right"), Some(10.0));
    }

    #[test]
    fn observed_frequency_overrides_position() {
        let raw = run(json!({"tracking": {"post_up_freq": 0.5}}), Position::SF);
        assert_eq!(raw.get("Post Up"), Some(50.0));
        // primary 35, secondary 20; SF is not big
        assert_eq!(raw.get("Shoot From Post"), Some(35.0));
        assert_eq!(raw.get("Post Drop Step"), Some(20.0));
    }
}
