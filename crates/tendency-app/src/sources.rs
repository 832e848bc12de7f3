// Stat bundle assembly from per-player source files.
//
// Layout: `<bundles_dir>/<player_id>/{box_score,tracking,shot_zones,moves}.json`.
// Every file is optional and independent; a missing or malformed file is
// skipped and the remaining sources still contribute.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tendency_core::StatBundle;
use tracing::{debug, warn};

/// One input file and how its contents map onto the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFile {
    /// `per_game`, `advanced` and `shooting_splits` sections.
    BoxScore,
    /// Flat tracking metrics.
    Tracking,
    /// `shot_zones` counts and `zone_area_*` fractions.
    ShotZones,
    /// Flat move frequencies.
    Moves,
}

impl SourceFile {
    pub const ALL: [SourceFile; 4] = [
        SourceFile::BoxScore,
        SourceFile::Tracking,
        SourceFile::ShotZones,
        SourceFile::Moves,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            SourceFile::BoxScore => "box_score.json",
            SourceFile::Tracking => "tracking.json",
            SourceFile::ShotZones => "shot_zones.json",
            SourceFile::Moves => "moves.json",
        }
    }

    /// Wrap a file's contents into bundle shape.
    fn into_bundle(self, contents: Value) -> StatBundle {
        let shaped = match self {
            SourceFile::BoxScore | SourceFile::ShotZones => contents,
            SourceFile::Tracking => json!({ "tracking": contents }),
            SourceFile::Moves => json!({ "moves": contents }),
        };
        StatBundle::from_value(shaped)
    }
}

/// Directory holding one player's source files.
pub fn player_dir(bundles_dir: &Path, player_id: &str) -> PathBuf {
    bundles_dir.join(player_id)
}

/// Assemble a bundle for `player_id`. Never fails; with no usable files the
/// result is the empty bundle.
pub fn load_bundle(bundles_dir: &Path, player_id: &str) -> StatBundle {
    let dir = player_dir(bundles_dir, player_id);
    let mut bundle = StatBundle::default();
    let mut loaded = 0usize;

    for source in SourceFile::ALL {
        let path = dir.join(source.file_name());
        let Some(contents) = read_json(&path) else {
            continue;
        };
        bundle.merge(source.into_bundle(contents));
        loaded += 1;
    }

    if loaded == 0 {
        warn!(player_id, dir = %dir.display(), "no stat sources found, using defaults only");
    } else {
        debug!(player_id, loaded, "bundle assembled");
    }
    bundle
}

fn read_json(path: &Path) -> Option<Value> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "source file absent");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read source file, skipping");
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed source file, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn merges_all_four_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = player_dir(tmp.path(), "201939");
        write(
            &dir,
            "box_score.json",
            r#"{"per_game": {"pts": 26.4, "fg3a": 11.7}, "advanced": {"usg_pct": 30.1}}"#,
        );
        write(&dir, "tracking.json", r#"{"drives_per_game": 6.2, "touches_per_game": 70}"#);
        write(
            &dir,
            "shot_zones.json",
            r#"{"shot_zones": {"Above the Break 3|Center(C)": {"fga": 310, "fgm": 125}},
                "zone_area_three": {"Center(C)": 0.4}}"#,
        );
        write(&dir, "moves.json", r#"{"stepback_3": 1.8}"#);

        let bundle = load_bundle(tmp.path(), "201939");
        assert_eq!(bundle.per_game.pts, Some(26.4));
        assert_eq!(bundle.advanced.usg_pct, Some(30.1));
        assert_eq!(bundle.tracking.drives_per_game, Some(6.2));
        assert_eq!(bundle.shot_zones.len(), 1);
        assert_eq!(bundle.zone_area_three.get("Center(C)"), Some(&0.4));
        assert_eq!(bundle.moves.stepback_3, Some(1.8));
    }

    #[test]
    fn malformed_file_is_skipped_others_survive() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = player_dir(tmp.path(), "7");
        write(&dir, "box_score.json", "{ not json");
        write(&dir, "tracking.json", r#"{"iso_freq": 0.11}"#);

        let bundle = load_bundle(tmp.path(), "7");
        assert!(bundle.per_game.pts.is_none());
        assert_eq!(bundle.tracking.iso_freq, Some(0.11));
    }

    #[test]
    fn missing_player_dir_yields_empty_bundle() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = load_bundle(tmp.path(), "nobody");
        assert!(bundle.per_game.fga.is_none());
        assert!(bundle.shot_zones.is_empty());
    }

    #[test]
    fn absent_files_leave_present_ones_intact() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = player_dir(tmp.path(), "11");
        write(&dir, "moves.json", r#"{"floater": 0.9}"#);

        let bundle = load_bundle(tmp.path(), "11");
        assert_eq!(bundle.moves.floater, Some(0.9));
        assert!(bundle.per_game.pts.is_none());
        assert!(bundle.tracking.drives_per_game.is_none());
        assert!(bundle.shot_zones.is_empty());
    }

    #[test]
    fn non_object_tracking_file_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = player_dir(tmp.path(), "9");
        write(&dir, "tracking.json", "[1, 2, 3]");
        let bundle = load_bundle(tmp.path(), "9");
        assert!(bundle.tracking.drives_per_game.is_none());
    }
}
