//! Stats Builder CLI
//!
//! Role CSV + match JSON → MessagePack+LZ4 stats cache
//! Stats cache → sim sheet CSV, pitch advice, single matches and seeded series

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "stats_builder")]
#[command(about = "Build cricket stats caches and run simulated Test matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Ingest a directory of match JSON files into a stats cache
    Ingest {
        /// Player role CSV (index, name, batting hand, bowling role)
        #[arg(long)]
        roles: PathBuf,

        /// Directory searched recursively for *.json match files
        #[arg(long)]
        matches: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Schema version (e.g., "v1")
        #[arg(long, default_value = "v1")]
        schema_version: String,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Export the per-player sim sheet CSV from a stats cache
    Export {
        /// Stats cache built by `ingest`
        #[arg(long)]
        cache: PathBuf,

        /// Output CSV file path
        #[arg(long, default_value = "sim_stats.csv")]
        out: PathBuf,

        /// Engine config (JSON or YAML) whose model settings shape the sheet
        #[arg(long)]
        engine_config: Option<PathBuf>,

        /// Use the legacy 1000-ball confidence instead of the default
        #[arg(long, default_value = "false")]
        legacy: bool,
    },

    /// Describe a pitch and recommend bowler types through an innings
    Pitch {
        #[arg(long, default_value = "1.0")]
        seam: f64,
        #[arg(long, default_value = "1.0")]
        dryness: f64,
        #[arg(long, default_value = "1.0")]
        bounce: f64,
        #[arg(long, default_value = "1.0")]
        flatness: f64,
        #[arg(long, default_value = "1.0")]
        boundary_speed: f64,

        /// Overs to advise for
        #[arg(long, value_delimiter = ',', default_value = "1,20,40,60,85")]
        overs: Vec<u32>,
    },

    /// Simulate one match from a JSON match request
    Simulate {
        /// Stats cache built by `ingest`
        #[arg(long)]
        cache: PathBuf,

        /// Match request JSON (teams, seed, optional pitch and engine config)
        #[arg(long)]
        request: PathBuf,

        /// Engine config file, overriding the request and the environment
        #[arg(long)]
        engine_config: Option<PathBuf>,

        /// Write the full JSON response here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Simulate the same fixture over a run of seeds
    Series {
        /// Stats cache built by `ingest`
        #[arg(long)]
        cache: PathBuf,

        /// Match request JSON; its seed is replaced by each series seed
        #[arg(long)]
        request: PathBuf,

        /// Engine config file, overriding the request and the environment
        #[arg(long)]
        engine_config: Option<PathBuf>,

        /// Number of matches
        #[arg(long, default_value = "100")]
        count: u64,

        /// First seed; matches use start_seed..start_seed + count
        #[arg(long, default_value = "0")]
        start_seed: u64,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest { roles, matches, out, schema_version, verify, metadata } => {
            println!("🔨 Building stats cache...");
            println!("   Roles:   {}", roles.display());
            println!("   Matches: {}", matches.display());
            println!("   Output:  {}", out.display());
            println!("   Schema:  {}", schema_version);

            let (table, parse_stats) = stats_builder::load_roles_csv(&roles)?;
            println!(
                "✅ Loaded {} player roles (failed: {}, total rows: {})",
                parse_stats.parsed, parse_stats.failed, parse_stats.total_rows
            );

            let (bundle, report) = stats_builder::ingest_dir(&matches, table)?;
            println!(
                "✅ Ingested {} match files (failed: {}, deliveries: {}, wides skipped: {})",
                report.parsed, report.failed, report.counts.deliveries, report.counts.wides_skipped
            );

            let mut meta = stats_builder::build_stats_cache(&bundle, &out, &schema_version)?;
            meta.ingest = Some(report);

            print_metadata(&meta);

            if verify {
                verify_cache_integrity(&out, &meta.checksum)?;
            }

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Export { cache, out, engine_config, legacy } => {
            println!("📊 Exporting sim sheet...");
            println!("   Cache:  {}", cache.display());
            println!("   Output: {}", out.display());

            let config = load_engine_config(engine_config.as_deref(), legacy)?.unwrap_or_default();
            let bundle = stats_builder::load_stats_cache(&cache, None)?.bundle;
            let (model, _) = bundle.into_model();

            let rows = stats_builder::export_sim_sheet(&model, &config.model, &out)?;
            println!("\n✅ Sim sheet written: {} players (confidence {})", rows, config.model.confidence);
        }

        Commands::Pitch { seam, dryness, bounce, flatness, boundary_speed, overs } => {
            let pitch = cricket_core::PitchState::try_new(seam, dryness, bounce, flatness, boundary_speed)?;
            let advisor = cricket_core::engine::PitchRecommender::new(pitch);

            println!("🏏 Pitch: {}", advisor.summary());
            for (name, value) in pitch.factors() {
                println!("   {:<15} {:.2}", name, value);
            }
            println!();
            for over in overs {
                let labels: Vec<&str> = advisor.recommended_categories(over).iter().map(|c| c.label()).collect();
                println!("   Over {:>3}: {}", over, labels.join(", "));
            }
        }

        Commands::Simulate { cache, request, engine_config, out } => {
            let ctx = load_context(&cache)?;
            let plan = load_plan(&request, engine_config.as_deref())?;

            let result = ctx.simulate(plan)?;
            println!("{}", result.summary());

            if let Some(out) = out {
                let response = cricket_core::MatchResponse {
                    schema_version: cricket_core::SCHEMA_VERSION,
                    summary: result.summary(),
                    result,
                };
                let json = serde_json::to_string_pretty(&response)?;
                std::fs::write(&out, json).with_context(|| format!("Failed to write {}", out.display()))?;
                println!("\n📄 Result saved to: {}", out.display());
            }
        }

        Commands::Series { cache, request, engine_config, count, start_seed } => {
            let ctx = load_context(&cache)?;
            let plan = load_plan(&request, engine_config.as_deref())?;
            let seeds: Vec<u64> = (start_seed..start_seed.saturating_add(count)).collect();

            println!("🎲 Simulating {} matches: {} vs {}", seeds.len(), plan.team_a.name, plan.team_b.name);
            let summary = cricket_core::simulate_series(&ctx, &plan, &seeds)?;

            println!("\n✅ Series complete");
            println!("   {:<20} {}", format!("{} wins", summary.team_a), summary.team_a_wins);
            println!("   {:<20} {}", format!("{} wins", summary.team_b), summary.team_b_wins);
            println!("   {:<20} {}", "Draws", summary.draws);
            println!("   {:<20} {}", "Ties", summary.ties);
            println!("   {:<20} {}", "Innings victories", summary.innings_victories);
            println!("   {:<20} {}", "Follow-ons", summary.follow_ons);
            println!("   {:<20} {:.1}", "Average overs", summary.average_balls / 6.0);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &stats_builder::CacheMetadata) {
    println!("\n✅ Cache built successfully!");
    println!("   Batters:         {}", meta.batters);
    println!("   Bowlers:         {}", meta.bowlers);
    println!(
        "   Original size:   {} bytes ({:.2} KB)",
        meta.original_size,
        meta.original_size as f64 / 1024.0
    );
    println!(
        "   Compressed size: {} bytes ({:.2} KB)",
        meta.compressed_size,
        meta.compressed_size as f64 / 1024.0
    );
    println!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_cache_integrity(cache_path: &Path, checksum: &str) -> Result<()> {
    println!("\n🔍 Verifying cache integrity...");
    let is_valid = stats_builder::verify_cache(cache_path, checksum)?;

    if is_valid {
        println!("✅ Cache verification passed");
        Ok(())
    } else {
        anyhow::bail!("❌ Cache verification failed - checksum mismatch!")
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &Path, meta: &stats_builder::CacheMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

/// `--engine-config` wins over `--legacy`; `None` leaves the choice to the request or environment.
#[cfg(feature = "cli")]
fn load_engine_config(path: Option<&Path>, legacy: bool) -> Result<Option<cricket_core::EngineConfig>> {
    match path {
        Some(path) => {
            let config = cricket_core::api::engine_config_from_path(path)?;
            config.validate()?;
            Ok(Some(config))
        }
        None if legacy => Ok(Some(cricket_core::EngineConfig::legacy())),
        None => Ok(None),
    }
}

#[cfg(feature = "cli")]
fn load_context(cache: &Path) -> Result<cricket_core::SimulationContext> {
    let stats = stats_builder::load_stats_cache(cache, None)?;
    log::info!("Loaded stats cache {} (schema {})", cache.display(), stats.schema_version);
    Ok(cricket_core::SimulationContext::from_bundle(stats.bundle))
}

#[cfg(feature = "cli")]
fn load_plan(request: &Path, engine_config: Option<&Path>) -> Result<cricket_core::MatchPlan> {
    let json = std::fs::read_to_string(request)
        .with_context(|| format!("Failed to read match request: {}", request.display()))?;
    let mut request: cricket_core::MatchRequest =
        serde_json::from_str(&json).context("Failed to parse match request JSON")?;

    if let Some(config) = load_engine_config(engine_config, false)? {
        request.engine_config = Some(config);
    }

    Ok(request.into_plan()?)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("stats_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
