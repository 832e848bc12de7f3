// Generation orchestration: roster entry -> bundle -> tendency map.

use std::path::Path;

use serde::Serialize;
use tendency_core::{calculate_tendencies, Position, TendencyMap};
use thiserror::Error;
use tracing::{info, warn};

use crate::roster::{by_team, RosterEntry};
use crate::sources::load_bundle;

/// Default cap on players per bulk run.
pub const BULK_GENERATION_LIMIT: usize = 30;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid player id `{0}`")]
    InvalidPlayerId(String),
}

/// Generated tendencies for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerTendencies {
    pub player_id: String,
    pub name: String,
    pub team: String,
    /// Resolved position code.
    pub position: String,
    pub tendencies: TendencyMap,
}

/// Which players a bulk run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkSelection {
    Team(String),
    All,
}

/// Player ids name a directory under the bundles root, so they must be a
/// single plain path component.
fn validate_player_id(id: &str) -> Result<(), GenerateError> {
    let id_ok = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(|c: char| c == '/' || c == '\\');
    if id_ok {
        Ok(())
    } else {
        Err(GenerateError::InvalidPlayerId(id.to_string()))
    }
}

pub fn generate_for_player(
    entry: &RosterEntry,
    bundles_dir: &Path,
) -> Result<PlayerTendencies, GenerateError> {
    validate_player_id(&entry.player_id)?;
    let bundle = load_bundle(bundles_dir, &entry.player_id);
    let label = Some(entry.position.as_str()).filter(|p| !p.trim().is_empty());
    let tendencies = calculate_tendencies(&bundle, label);
    let position = Position::from_label(label);

    info!(player = %entry.name, id = %entry.player_id, %position, "tendencies generated");
    Ok(PlayerTendencies {
        player_id: entry.player_id.clone(),
        name: entry.name.clone(),
        team: entry.team.clone(),
        position: position.label().to_string(),
        tendencies,
    })
}

/// Generate for a team or the whole roster, at most `limit` players.
/// Players that fail are logged and skipped.
pub fn bulk_generate(
    roster: &[RosterEntry],
    selection: &BulkSelection,
    limit: usize,
    bundles_dir: &Path,
) -> Vec<PlayerTendencies> {
    let selected: Vec<&RosterEntry> = match selection {
        BulkSelection::Team(team) => by_team(roster, team),
        BulkSelection::All => roster.iter().collect(),
    };
    if selected.len() > limit {
        warn!(selected = selected.len(), limit, "bulk selection truncated");
    }

    let results: Vec<PlayerTendencies> = selected
        .into_iter()
        .take(limit)
        .filter_map(|entry| match generate_for_player(entry, bundles_dir) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(player = %entry.name, error = %e, "skipping player");
                None
            }
        })
        .collect();

    info!(generated = results.len(), ?selection, "bulk generation complete");
    results
}
