// Baseline-only outcome distribution across seeds
// Run with: cargo run --bin outcome_distribution --release -- [matches]
//
// Every player falls back to role baselines, so this shows what the engine
// does with no history at all: how often matches finish, follow-ons, margins.

use cricket_core::api::{simulate_series, SimulationContext};
use cricket_core::{EngineConfig, MatchOutcome, MatchPlan, PitchState, Team};

fn xi(prefix: &str) -> Vec<String> {
    (1..=11).map(|i| format!("{prefix} {i}")).collect()
}

fn main() {
    let matches: u64 = std::env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(200);
    let ctx = SimulationContext::default();

    let pitches = [
        ("neutral", PitchState::neutral()),
        ("green", PitchState::new(1.4, 0.9, 1.3, 0.9, 1.0)),
        ("dust bowl", PitchState::new(0.7, 1.6, 0.9, 1.0, 0.9)),
        ("road", PitchState::new(0.8, 0.8, 0.9, 1.6, 1.2)),
    ];

    let seeds: Vec<u64> = (0..matches).collect();
    for (label, pitch) in pitches {
        for (preset, config) in [("realistic", EngineConfig::realistic()), ("legacy", EngineConfig::legacy())] {
            let plan = MatchPlan::new(Team::new("Home", xi("H")), Team::new("Away", xi("A")))
                .with_pitch(pitch)
                .with_config(config);
            let summary = match simulate_series(&ctx, &plan, &seeds) {
                Ok(summary) => summary,
                Err(e) => {
                    eprintln!("{label}/{preset}: {e}");
                    continue;
                }
            };

            let wicket_wins = summary
                .outcomes
                .iter()
                .filter(|(_, o)| matches!(o, MatchOutcome::WinByWickets { .. }))
                .count();
            println!(
                "{label:>10} {preset:>9}: home {:>4} away {:>4} draw {:>4} tie {:>2} | by wkts {:>4} by inns {:>4} | follow-ons {:>4} | avg overs {:.1}",
                summary.team_a_wins,
                summary.team_b_wins,
                summary.draws,
                summary.ties,
                wicket_wins,
                summary.innings_victories,
                summary.follow_ons,
                summary.average_balls / 6.0,
            );
        }
    }
}
