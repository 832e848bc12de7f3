// Attribute formula engine.
//
// Derivation is a constant, ordered plan of named steps. Each step writes a
// fixed set of raw tendencies and may publish intermediate bases (creator
// flag, post-up base, zone parents) that later steps read. Values
// written here are already rounded and range-clamped per formula; the caps
// enforcer applies the catalog ceilings afterwards.

mod defense;
mod drives;
mod playmaking;
mod post;
mod shooting;

use tracing::{debug, warn};

use crate::normalize::PlayerRecord;
use crate::tendency::RawTendencies;

// ---------------------------------------------------------------------------
// Intermediate bases
// ---------------------------------------------------------------------------

/// An intermediate value shared between derivation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    /// 1.0 when the player is a primary creator, else 0.0.
    Creator,
    PostUp,
    CloseParent,
    MidParent,
    ThreeParent,
}

impl Base {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        self as usize
    }

    /// Value used when a base is read before any step provided it.
    pub fn neutral(self) -> f64 {
        match self {
            Base::Creator => 0.0,
            Base::PostUp => 10.0,
            // Zero parents select the zone family default.
            Base::CloseParent | Base::MidParent | Base::ThreeParent => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Bases {
    values: [Option<f64>; Base::COUNT],
}

// ---------------------------------------------------------------------------
// Derivation context
// ---------------------------------------------------------------------------

/// Working state threaded through the derivation plan.
pub struct Derivation<'a> {
    pub record: &'a PlayerRecord,
    raw: RawTendencies,
    bases: Bases,
}

impl<'a> Derivation<'a> {
    pub fn new(record: &'a PlayerRecord) -> Self {
        Self {
            record,
            raw: RawTendencies::new(),
            bases: Bases::default(),
        }
    }

    pub fn set(&mut self, name: &'static str, value: f64) {
        if let Some(previous) = self.raw.set(name, value) {
            warn!(name, previous, value, "tendency derived twice, keeping the later value");
        }
    }

    /// Read a previously written raw tendency.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.raw.get(name)
    }

    pub fn provide(&mut self, base: Base, value: f64) {
        self.bases.values[base.index()] = Some(value);
    }

    /// Read a base, falling back to its neutral value if no earlier step
    /// provided it.
    pub fn base(&self, base: Base) -> f64 {
        match self.bases.values[base.index()] {
            Some(v) => v,
            None => {
                warn!(?base, "base read before it was provided, using neutral value");
                base.neutral()
            }
        }
    }

    pub fn is_creator(&self) -> bool {
        self.base(Base::Creator) > 0.0
    }

    pub fn into_raw(self) -> RawTendencies {
        self.raw
    }
}

// ---------------------------------------------------------------------------
// The plan
// ---------------------------------------------------------------------------

/// A named unit of the formula engine.
#[derive(Clone, Copy)]
pub struct DerivationStep {
    pub name: &'static str,
    pub produces: &'static [&'static str],
    pub needs: &'static [Base],
    pub provides: &'static [Base],
    pub run: fn(&mut Derivation<'_>),
}

impl std::fmt::Debug for DerivationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivationStep")
            .field("name", &self.name)
            .field("produces", &self.produces.len())
            .field("needs", &self.needs)
            .field("provides", &self.provides)
            .finish()
    }
}

/// Every derivation step, in execution order.
pub const DERIVATION_STEPS: &[DerivationStep] = &[
    shooting::SHOT_VOLUME,
    shooting::INSIDE_SHOTS,
    shooting::MID_RANGE,
    shooting::THREE_POINT,
    shooting::SHOT_ZONES,
    shooting::CONTESTED_JUMPERS,
    shooting::PULL_UPS,
    drives::DRIVING,
    drives::FINISHING,
    drives::DUNKS,
    playmaking::TRIPLE_THREAT,
    playmaking::CREATOR_PROFILE,
    playmaking::DRIVE_MOVES,
    playmaking::PASSING,
    playmaking::ISOLATION,
    playmaking::DISCIPLINE,
    post::POST_UP,
    post::POST_MOVES,
    defense::DEFENSE,
];

/// Run the full plan over a normalized record.
pub fn derive_raw(record: &PlayerRecord) -> RawTendencies {
    let mut ctx = Derivation::new(record);
    for step in DERIVATION_STEPS {
        (step.run)(&mut ctx);
        debug!(step = step.name, produced = step.produces.len(), "derivation step");
    }
    ctx.into_raw()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::StatBundle;
    use crate::catalog;
    use crate::normalize::normalize;
    use crate::position::Position;
    use serde_json::json;
    use std::collections::HashSet;

    fn record(v: serde_json::Value, pos: Position) -> PlayerRecord {
        normalize(&StatBundle::from_value(v), &pos)
    }

    #[test]
    fn every_canonical_name_is_produced_exactly_once() {
        let mut seen = HashSet::new();
        for step in DERIVATION_STEPS {
            for name in step.produces {
                assert!(seen.insert(*name), "{name} produced by more than one step");
                assert!(catalog::attribute(name).is_some(), "{name} is not canonical");
            }
        }
        assert_eq!(seen.len(), catalog::TENDENCIES.len());
    }

    #[test]
    fn needs_are_provided_by_earlier_steps() {
        let mut provided = HashSet::new();
        for step in DERIVATION_STEPS {
            for need in step.needs {
                assert!(provided.contains(need), "{} needs {need:?} too early", step.name);
            }
            provided.extend(step.provides.iter().copied());
        }
    }

    #[test]
    fn every_provided_base_is_needed_later() {
        for (i, step) in DERIVATION_STEPS.iter().enumerate() {
            for base in step.provides {
                let consumed = DERIVATION_STEPS[i + 1..]
                    .iter()
                    .any(|later| later.needs.contains(base));
                assert!(consumed, "{} provides {base:?} but no later step needs it", step.name);
            }
        }
    }

    #[test]
    fn steps_write_exactly_what_they_declare() {
        let r = record(json!({}), Position::SF);
        let mut ctx = Derivation::new(&r);
        for step in DERIVATION_STEPS {
            let before: HashSet<&str> = ctx.raw.iter().map(|(n, _)| n).collect();
            (step.run)(&mut ctx);
            let after: HashSet<&str> = ctx.raw.iter().map(|(n, _)| n).collect();
            let written: HashSet<&str> = after.difference(&before).copied().collect();
            let declared: HashSet<&str> = step.produces.iter().copied().collect();
            assert_eq!(written, declared, "step {}", step.name);
            for base in step.provides {
                assert!(ctx.bases.values[base.index()].is_some(), "{} {base:?}", step.name);
            }
        }
    }

    #[test]
    fn unprovided_base_reads_neutral() {
        let r = record(json!({}), Position::C);
        let ctx = Derivation::new(&r);
        assert_eq!(ctx.base(Base::PostUp), 10.0);
        assert!(!ctx.is_creator());
    }

    #[test]
    fn raw_values_are_finite_for_degenerate_input() {
        let r = record(json!({"per_game": {"fga": 0, "fg3a": 0, "ast": 0, "tov": 0}}), Position::PG);
        let raw = derive_raw(&r);
        assert_eq!(raw.len(), catalog::TENDENCIES.len());
        assert!(raw.iter().all(|(_, v)| v.is_finite()));
    }
}
