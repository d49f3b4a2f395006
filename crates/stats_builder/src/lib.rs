//! Stats Builder Library
//!
//! Role CSV + match JSON directory → StatsBundle → MessagePack → LZ4 → SHA256
//! StatsBundle → sim sheet CSV

pub mod ingest;
pub mod roles;
pub mod sim_sheet;

use anyhow::{Context, Result};
use cricket_core::StatsBundle;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

pub use ingest::{ingest_dir, IngestReport};
pub use roles::{load_roles_csv, ParseStats};
pub use sim_sheet::{export_sim_sheet, write_sim_sheet, ROLE_ORDER};

/// Cache metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// Schema version (e.g. "v1")
    pub schema_version: String,
    /// SHA256 of the compressed file (hex)
    pub checksum: String,
    /// RFC3339
    pub created_at: String,
    /// MessagePack size before compression (bytes)
    pub original_size: u64,
    pub compressed_size: u64,
    /// compressed / original
    pub compression_ratio: f64,
    pub batters: usize,
    pub bowlers: usize,
    pub roles: usize,
    /// Present when the bundle came from a directory ingest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest: Option<IngestReport>,
}

/// What is written to disk: the bundle tagged with its schema version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsCache {
    pub schema_version: String,
    pub bundle: StatsBundle,
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Serialize a bundle to a MessagePack+LZ4 cache file.
///
/// # Returns
///
/// Metadata of the written cache (checksum covers the compressed bytes)
pub fn build_stats_cache(bundle: &StatsBundle, output_msgpack_lz4: &Path, schema_version: &str) -> Result<CacheMetadata> {
    let cache = StatsCache { schema_version: schema_version.to_string(), bundle: bundle.clone() };

    // 1. MessagePack
    let msgpack_bytes = rmp_serde::to_vec(&cache).context("Failed to serialize StatsBundle to MessagePack")?;
    let original_size = msgpack_bytes.len() as u64;

    // 2. LZ4 (size prepended)
    let compressed = lz4_flex::compress_prepend_size(&msgpack_bytes);
    let compressed_size = compressed.len() as u64;

    // 3. Checksum
    let checksum = sha256_hex(&compressed);

    // 4. Write
    if let Some(parent) = output_msgpack_lz4.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    fs::write(output_msgpack_lz4, &compressed)
        .with_context(|| format!("Failed to write output file: {}", output_msgpack_lz4.display()))?;

    let compression_ratio = if original_size == 0 { 1.0 } else { compressed_size as f64 / original_size as f64 };

    log::info!(
        "Cache written to {} ({} → {} bytes)",
        output_msgpack_lz4.display(),
        original_size,
        compressed_size
    );

    Ok(CacheMetadata {
        schema_version: schema_version.to_string(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        original_size,
        compressed_size,
        compression_ratio,
        batters: bundle.batting.len(),
        bowlers: bundle.bowling.len(),
        roles: bundle.roles.len(),
        ingest: None,
    })
}

/// Check a cache file against an expected SHA256 checksum.
pub fn verify_cache(cache_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes =
        fs::read(cache_file).with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;
    Ok(sha256_hex(&bytes) == expected_checksum.trim().to_lowercase())
}

/// Decompress and decode a cache file.
///
/// When `expected_checksum` is given the compressed bytes must match it.
pub fn load_stats_cache(cache_file: &Path, expected_checksum: Option<&str>) -> Result<StatsCache> {
    // 1. Read
    let compressed =
        fs::read(cache_file).with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;

    if let Some(expected) = expected_checksum {
        let actual = sha256_hex(&compressed);
        if actual != expected.trim().to_lowercase() {
            anyhow::bail!("Checksum mismatch for {}: expected {expected}, found {actual}", cache_file.display());
        }
    }

    // 2. LZ4
    let msgpack_bytes = lz4_flex::decompress_size_prepended(&compressed).context("Failed to decompress LZ4")?;

    // 3. MessagePack
    let cache: StatsCache =
        rmp_serde::from_slice(&msgpack_bytes).context("Failed to deserialize StatsBundle from MessagePack")?;

    Ok(cache)
}
