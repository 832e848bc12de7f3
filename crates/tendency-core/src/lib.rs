// Library root: the tendency derivation engine.
//
// Pipeline: StatBundle -> normalize -> derive (percentile + zones) -> enforce
// caps -> TendencyMap. Nothing in this crate performs I/O.

pub mod bundle;
pub mod caps;
pub mod catalog;
pub mod derive;
pub mod normalize;
pub mod numeric;
pub mod percentile;
pub mod position;
pub mod tendency;
pub mod zones;

pub use bundle::StatBundle;
pub use catalog::CATALOG_VERSION;
pub use position::Position;
pub use tendency::TendencyMap;

use tracing::debug;

/// Compute the full canonical tendency map for one player.
///
/// `position_label` is free text as delivered by the roster source ("Guard",
/// "F-C", "PG", ...). `None` or a blank label resolves to SG.
pub fn calculate_tendencies(bundle: &StatBundle, position_label: Option<&str>) -> TendencyMap {
    let position = Position::from_label(position_label);
    let record = normalize::normalize(bundle, &position);
    let raw = derive::derive_raw(&record);
    debug!(
        position = %position,
        derived = raw.len(),
        "raw tendencies derived, enforcing caps"
    );
    caps::enforce_caps(&raw)
}
