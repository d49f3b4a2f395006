//! Directory ingestion: every `*.json` match file under a root, folded into one bundle.

use anyhow::{Context, Result};
use cricket_core::data::IngestCounts;
use cricket_core::{MatchFile, RoleTable, StatsBundle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// JSON files found under the root
    pub files: u64,
    /// Files folded into the books
    pub parsed: u64,
    /// Files skipped because they could not be read or parsed
    pub failed: u64,
    pub counts: IngestCounts,
}

fn is_match_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Walk `dir` (sorted by file name, so runs are reproducible) and ingest every
/// match file with `roles` deciding which deliveries count.
///
/// Unreadable or malformed files are logged and counted, never fatal.
pub fn ingest_dir(dir: &Path, roles: RoleTable) -> Result<(StatsBundle, IngestReport)> {
    if !dir.is_dir() {
        anyhow::bail!("Match directory not found: {}", dir.display());
    }

    let mut bundle = StatsBundle::new(roles);
    let mut report = IngestReport::default();

    let entries = WalkDir::new(dir).sort_by_file_name().into_iter().filter_map(|e| e.ok());
    for entry in entries {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_match_file(path) {
            continue;
        }
        report.files += 1;

        match read_match_file(path) {
            Ok(file) => {
                report.counts.merge(bundle.ingest_match(&file));
                report.parsed += 1;
            }
            Err(e) => {
                report.failed += 1;
                log::warn!("Skipping {}: {e:#}", path.display());
            }
        }
    }

    log::info!(
        "Ingested {}/{} match files ({} deliveries, {} wides skipped)",
        report.parsed,
        report.files,
        report.counts.deliveries,
        report.counts.wides_skipped
    );

    Ok((bundle, report))
}

fn read_match_file(path: &Path) -> Result<MatchFile> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read match file: {}", path.display()))?;
    serde_json::from_str(&json).context("Failed to parse match JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricket_core::models::{MatchupStats, PlayerRecord};
    use tempfile::TempDir;

    const MATCH_ONE: &str = r#"{"innings": [{"overs": [{"deliveries": [
        {"batter": "V Kohli", "bowler": "PJ Cummins", "runs": {"batter": 4, "total": 4}},
        {"batter": "V Kohli", "bowler": "PJ Cummins", "runs": {"batter": 0, "total": 1}, "extras": {"wides": 1}},
        {"batter": "V Kohli", "bowler": "PJ Cummins", "runs": {"batter": 0, "total": 0},
         "wickets": [{"player_out": "V Kohli"}]}
    ]}]}]}"#;

    const MATCH_TWO: &str = r#"{"innings": [{"overs": [{"deliveries": [
        {"batter": "V Kohli", "bowler": "PJ Cummins", "runs": {"batter": 2, "total": 2}}
    ]}]}]}"#;

    fn roles() -> RoleTable {
        [
            PlayerRecord::from_codes("V Kohli", "RHB", "RM"),
            PlayerRecord::from_codes("PJ Cummins", "RHB", "RF"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_ingest_dir_walks_nested_json() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("1001.json"), MATCH_ONE)?;
        fs::create_dir(dir.path().join("2023"))?;
        fs::write(dir.path().join("2023").join("1002.json"), MATCH_TWO)?;
        fs::write(dir.path().join("README.txt"), "not a match")?;
        fs::write(dir.path().join("broken.json"), "{ not json")?;

        let (bundle, report) = ingest_dir(dir.path(), roles())?;

        assert_eq!(report.files, 3);
        assert_eq!(report.parsed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.counts.deliveries, 4);
        assert_eq!(report.counts.wides_skipped, 1);
        assert_eq!(bundle.batting.get("V Kohli", "RF"), MatchupStats::new(3, 6, 1));
        assert_eq!(bundle.bowling.get("PJ Cummins", "RHB"), MatchupStats::new(3, 6, 1));
        Ok(())
    }

    #[test]
    fn test_missing_dir_is_error() {
        let err = ingest_dir(Path::new("/no/such/matches"), RoleTable::new()).unwrap_err();
        assert!(err.to_string().contains("Match directory not found"));
    }
}
