//! Player role table loader.
//!
//! Expected CSV layout (header row first):
//! - Column 0: row index (ignored)
//! - Column 1: player name, as it appears in the match files
//! - Column 2: batting hand (`LHB` / `RHB`)
//! - Column 3: bowling role code (`RF`, `ROS`, ...; blank for non-bowlers)

use anyhow::{Context, Result};
use cricket_core::models::PlayerRecord;
use cricket_core::RoleTable;
use std::path::Path;

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
    pub skipped_header: bool,
}

/// Parse the role CSV into a [`RoleTable`].
///
/// Rows with fewer than four columns or a blank name are counted as failed and
/// skipped. Unknown hand codes load as a missing hand.
pub fn load_roles_csv(csv_path: &Path) -> Result<(RoleTable, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut table = RoleTable::new();
    let mut stats = ParseStats { skipped_header: true, ..ParseStats::default() };

    for (row, record) in reader.records().enumerate() {
        stats.total_rows += 1;
        // +2: one for the header, one for 1-based line numbers
        let line = row + 2;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                stats.failed += 1;
                log::warn!("Line {line} - unreadable row: {e}");
                continue;
            }
        };

        if record.len() < 4 {
            stats.failed += 1;
            log::warn!("Line {line} - expected 4 columns, found {}", record.len());
            continue;
        }

        let name = record[1].trim();
        if name.is_empty() {
            stats.failed += 1;
            log::warn!("Line {line} - blank player name");
            continue;
        }

        table.insert(PlayerRecord::from_codes(name, &record[2], &record[3]));
        stats.parsed += 1;
    }

    log::info!(
        "Loaded {} player roles from {} (failed: {}, total rows: {})",
        table.len(),
        csv_path.display(),
        stats.failed,
        stats.total_rows
    );

    Ok((table, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricket_core::models::{BattingHand, BowlerCategory};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_roles_csv() -> Result<()> {
        let mut csv = NamedTempFile::new()?;
        writeln!(csv, ",name,batRole,bowlRole")?;
        writeln!(csv, "0,V Kohli,RHB,RM")?;
        writeln!(csv, "1,RA Jadeja,LHB,LOS")?;
        writeln!(csv, "2,KL Rahul,RHB,")?;
        writeln!(csv, "3,Short Row")?;
        writeln!(csv, "4,,RHB,RF")?;
        csv.flush()?;

        let (table, stats) = load_roles_csv(csv.path())?;

        assert_eq!(stats.total_rows, 5);
        assert_eq!(stats.parsed, 3);
        assert_eq!(stats.failed, 2);
        assert!(stats.skipped_header);

        assert_eq!(table.len(), 3);
        assert_eq!(table.batting_hand("RA Jadeja"), Some(BattingHand::Left));
        assert_eq!(table.get("RA Jadeja").map(|p| p.bowler_category()), Some(BowlerCategory::Spin));
        assert!(table.bowling_role("KL Rahul").is_none());
        Ok(())
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = load_roles_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }
}
