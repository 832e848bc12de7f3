// Player roster: source trait, CSV source, read-through snapshot cache and
// name search.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Queries shorter than this return no matches.
pub const MIN_QUERY_LEN: usize = 2;

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

const SNAPSHOT_FILE: &str = "roster_snapshot.json";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster source {path}: {source}")]
    Source { path: PathBuf, source: csv::Error },

    #[error("roster snapshot I/O error at {path}: {source}")]
    SnapshotIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode roster snapshot: {0}")]
    SnapshotEncode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Roster entries and sources
// ---------------------------------------------------------------------------

/// One player as listed by the roster source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: String,
    pub name: String,
    #[serde(default)]
    pub team: String,
    /// Free-text position label, resolved by the engine.
    #[serde(default)]
    pub position: String,
}

/// Anything that can list every player.
pub trait RosterSource {
    fn fetch_all(&self) -> Result<Vec<RosterEntry>, RosterError>;
}

/// Roster read from a CSV file with header `player_id,name,team,position`.
#[derive(Debug, Clone)]
pub struct CsvRosterSource {
    path: PathBuf,
}

impl CsvRosterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterSource for CsvRosterSource {
    fn fetch_all(&self) -> Result<Vec<RosterEntry>, RosterError> {
        let source_err = |source| RosterError::Source {
            path: self.path.clone(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)
            .map_err(source_err)?;

        let mut entries = Vec::new();
        for (row, record) in reader.deserialize::<RosterEntry>().enumerate() {
            match record {
                Ok(entry) if !entry.player_id.is_empty() && !entry.name.is_empty() => {
                    entries.push(entry)
                }
                Ok(_) => warn!(row, "roster row missing id or name, skipping"),
                Err(e) => warn!(row, error = %e, "unreadable roster row, skipping"),
            }
        }
        debug!(path = %self.path.display(), players = entries.len(), "roster loaded from CSV");
        Ok(entries)
    }
}

// ---------------------------------------------------------------------------
// Read-through cache
// ---------------------------------------------------------------------------

/// Roster contents with the time they were fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub players: Vec<RosterEntry>,
}

/// Read-through roster cache: memory, then an on-disk JSON snapshot if it is
/// fresh enough, then the source.
pub struct RosterCache<S: RosterSource> {
    source: S,
    snapshot_path: PathBuf,
    max_age: Duration,
    memory: Option<RosterSnapshot>,
}

impl<S: RosterSource> RosterCache<S> {
    pub fn new(source: S, cache_dir: &Path, max_age_hours: i64) -> Self {
        Self {
            source,
            snapshot_path: cache_dir.join(SNAPSHOT_FILE),
            max_age: Duration::hours(max_age_hours),
            memory: None,
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// The roster, fetching it only when no fresh copy is cached.
    pub fn get(&mut self) -> Result<&[RosterEntry], RosterError> {
        if self.memory.is_none() {
            let snapshot = match self.load_snapshot(Utc::now()) {
                Some(snapshot) => snapshot,
                None => self.fetch_and_store()?,
            };
            self.memory = Some(snapshot);
        }
        Ok(self
            .memory
            .as_ref()
            .map(|s| s.players.as_slice())
            .unwrap_or_default())
    }

    /// Drop both cache layers and refetch from the source. Returns the new
    /// player count.
    pub fn refresh(&mut self) -> Result<usize, RosterError> {
        self.memory = None;
        match std::fs::remove_file(&self.snapshot_path) {
            Ok(()) => debug!(path = %self.snapshot_path.display(), "roster snapshot removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(RosterError::SnapshotIo {
                    path: self.snapshot_path.clone(),
                    source,
                })
            }
        }
        let snapshot = self.fetch_and_store()?;
        let count = snapshot.players.len();
        self.memory = Some(snapshot);
        Ok(count)
    }

    /// Read the on-disk snapshot if it exists, parses and is younger than
    /// `max_age` at `now`.
    fn load_snapshot(&self, now: DateTime<Utc>) -> Option<RosterSnapshot> {
        let text = std::fs::read_to_string(&self.snapshot_path).ok()?;
        let snapshot: RosterSnapshot = match serde_json::from_str(&text) {
            Ok(s) => s,
            Err(e) => {
                warn!(path = %self.snapshot_path.display(), error = %e, "corrupt roster snapshot, refetching");
                return None;
            }
        };
        let age = now.signed_duration_since(snapshot.fetched_at);
        if age > self.max_age || snapshot.players.is_empty() {
            debug!(age_hours = age.num_hours(), "roster snapshot stale, refetching");
            return None;
        }
        debug!(players = snapshot.players.len(), "roster served from snapshot");
        Some(snapshot)
    }

    fn fetch_and_store(&self) -> Result<RosterSnapshot, RosterError> {
        let snapshot = RosterSnapshot {
            fetched_at: Utc::now(),
            players: self.source.fetch_all()?,
        };
        // An empty roster is returned but never persisted.
        if snapshot.players.is_empty() {
            warn!("roster source returned no players");
            return Ok(snapshot);
        }
        let io_err = |source| RosterError::SnapshotIo {
            path: self.snapshot_path.clone(),
            source,
        };
        if let Some(parent) = self.snapshot_path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string(&snapshot)?;
        std::fs::write(&self.snapshot_path, json).map_err(io_err)?;
        info!(players = snapshot.players.len(), "roster fetched and cached");
        Ok(snapshot)
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Case-insensitive substring search over player names.
///
/// Names starting with the query sort first, then alphabetically. Queries
/// shorter than `MIN_QUERY_LEN` characters return nothing.
pub fn search<'a>(players: &'a [RosterEntry], query: &str, limit: usize) -> Vec<&'a RosterEntry> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }
    let mut matches: Vec<(bool, &RosterEntry)> = players
        .iter()
        .filter_map(|p| {
            let name = p.name.to_lowercase();
            name.contains(&query).then(|| (!name.starts_with(&query), p))
        })
        .collect();
    matches.sort_by(|(a_later, a), (b_later, b)| a_later.cmp(b_later).then_with(|| a.name.cmp(&b.name)));
    matches.into_iter().take(limit).map(|(_, p)| p).collect()
}

/// Players on `team` (case-insensitive abbreviation match).
pub fn by_team<'a>(players: &'a [RosterEntry], team: &str) -> Vec<&'a RosterEntry> {
    players
        .iter()
        .filter(|p| p.team.eq_ignore_ascii_case(team.trim()))
        .collect()
}
