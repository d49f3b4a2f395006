//! Per-player "sim sheet": the shrunk rates the engine will actually use, one row per player.

use anyhow::{Context, Result};
use cricket_core::engine::config::ModelConfig;
use cricket_core::models::{BattingHand, MatchupStats};
use cricket_core::RateModel;
use rustc_hash::FxHashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Column order of the batting-side role blocks.
pub const ROLE_ORDER: [&str; 12] =
    ["RF", "LF", "RFM", "LFM", "RMF", "LMF", "RM", "LM", "ROS", "LOS", "RLS", "LLS"];

const HANDS: [BattingHand; 2] = [BattingHand::Left, BattingHand::Right];

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub fn header() -> Vec<String> {
    let mut header = vec!["Player".to_string()];
    for role in ROLE_ORDER {
        for column in ["Avg", "SR", "Adj_RPB", "Adj_WPB", "Balls"] {
            header.push(format!("{role} {column}"));
        }
    }
    for hand in HANDS {
        for column in ["Adj_RPB_Conceded", "Adj_WPB", "Balls"] {
            header.push(format!("{hand} {column}"));
        }
    }
    header
}

fn player_row(player: &str, model: &RateModel, config: &ModelConfig) -> Vec<String> {
    let mut row = vec![player.to_string()];

    for role in ROLE_ORDER {
        let stats = model.batting(player, role);
        let baseline = model.baseline().role_rate(role, config);
        row.push(round3(stats.batting_average()).to_string());
        row.push(round3(stats.batting_strike_rate()).to_string());
        push_adjusted(&mut row, &stats, baseline.runs_per_ball, baseline.wickets_per_ball, config);
    }

    for hand in HANDS {
        let stats = model.bowling(player, hand);
        let baseline = model.baseline().hand_rate(hand);
        push_adjusted(&mut row, &stats, baseline.runs_per_ball, baseline.wickets_per_ball, config);
    }

    row
}

fn push_adjusted(row: &mut Vec<String>, stats: &MatchupStats, rpb: f64, wpb: f64, config: &ModelConfig) {
    row.push(round3(stats.adjusted_runs_per_ball(rpb, config.confidence)).to_string());
    row.push(round3(stats.adjusted_wickets_per_ball(wpb, config.confidence)).to_string());
    row.push(stats.balls.to_string());
}

/// Every player in either book, A-Z.
fn players(model: &RateModel) -> Vec<&str> {
    let all: FxHashSet<&str> = model.batting_book().players().chain(model.bowling_book().players()).collect();
    let mut players: Vec<&str> = all.into_iter().collect();
    players.sort_unstable();
    players
}

/// Write the sheet as CSV. Returns the number of player rows.
pub fn write_sim_sheet<W: io::Write>(model: &RateModel, config: &ModelConfig, writer: W) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(header()).context("Failed to write sim sheet header")?;

    let players = players(model);
    for player in &players {
        csv.write_record(player_row(player, model, config))
            .with_context(|| format!("Failed to write sim sheet row for {player}"))?;
    }
    csv.flush().context("Failed to flush sim sheet")?;

    Ok(players.len())
}

pub fn export_sim_sheet(model: &RateModel, config: &ModelConfig, out: &Path) -> Result<usize> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let file = fs::File::create(out).with_context(|| format!("Failed to create sim sheet: {}", out.display()))?;
    let rows = write_sim_sheet(model, config, io::BufWriter::new(file))?;
    log::info!("Wrote {rows} players to {}", out.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricket_core::StatsBook;

    fn model() -> RateModel {
        let mut batting = StatsBook::new();
        batting.insert("Root", "RF", MatchupStats::new(500, 250, 5));
        batting.insert("Smith", "RF", MatchupStats::new(500, 350, 5));
        let mut bowling = StatsBook::new();
        bowling.insert("Anderson", "LHB", MatchupStats::new(300, 150, 6));
        bowling.insert("Anderson", "RHB", MatchupStats::new(300, 90, 6));
        RateModel::new(batting, bowling)
    }

    fn sheet(config: &ModelConfig) -> Vec<Vec<String>> {
        let mut bytes = Vec::new();
        write_sim_sheet(&model(), config, &mut bytes).unwrap();
        let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(bytes.as_slice());
        reader.records().map(|r| r.unwrap().iter().map(str::to_string).collect()).collect()
    }

    fn cell<'a>(rows: &'a [Vec<String>], player: &str, column: &str) -> &'a str {
        let idx = rows[0].iter().position(|c| c == column).unwrap();
        let row = rows.iter().find(|r| r[0] == player).unwrap();
        &row[idx]
    }

    #[test]
    fn test_header_layout() {
        let header = header();
        assert_eq!(header.len(), 1 + ROLE_ORDER.len() * 5 + 6);
        assert_eq!(header[1], "RF Avg");
        assert_eq!(header[5], "RF Balls");
        assert_eq!(header[61], "LHB Adj_RPB_Conceded");
        assert_eq!(header[66], "RHB Balls");
    }

    #[test]
    fn test_rows_sorted_over_both_books() {
        let rows = sheet(&ModelConfig::default());
        let players: Vec<&str> = rows[1..].iter().map(|r| r[0].as_str()).collect();
        assert_eq!(players, ["Anderson", "Root", "Smith"]);
        assert!(rows.iter().all(|r| r.len() == rows[0].len()));
    }

    #[test]
    fn test_values_shrunk_and_rounded() {
        let rows = sheet(&ModelConfig::default());

        // RF baseline is 600/1000 = 0.6; Root's 0.5 gets weight 500/1000
        assert_eq!(cell(&rows, "Root", "RF Adj_RPB"), "0.55");
        assert_eq!(cell(&rows, "Root", "RF Avg"), "50");
        assert_eq!(cell(&rows, "Root", "RF SR"), "50");
        assert_eq!(cell(&rows, "Root", "RF Balls"), "500");

        // never faced: exactly the fallback
        assert_eq!(cell(&rows, "Root", "ROS Adj_RPB"), "0.7");
        assert_eq!(cell(&rows, "Root", "ROS Balls"), "0");

        // Anderson is the whole LHB baseline, so shrinkage leaves him on it
        assert_eq!(cell(&rows, "Anderson", "LHB Adj_RPB_Conceded"), "0.5");
        assert_eq!(cell(&rows, "Anderson", "RHB Adj_WPB"), "0.02");
    }

    #[test]
    fn test_export_to_file() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let out = dir.path().join("sheets").join("sim_stats.csv");
        let rows = export_sim_sheet(&model(), &ModelConfig::default(), &out)?;
        assert_eq!(rows, 3);
        let text = fs::read_to_string(&out)?;
        assert!(text.starts_with("Player,RF Avg,RF SR"));
        Ok(())
    }
}
