//! Feed document assembly and JSON output.
//!
//! This module builds the final feed document from the accumulated records
//! and writes it to disk as a single JSON file, fully overwriting any
//! previous snapshot.

use crate::analysis::aggregator;
use crate::cli::OutputFormat;
use crate::models::{FeedMetadata, FetchError, ModelFeed, NormalizedModel};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Assemble the feed document from sorted records and collected errors.
pub fn build_feed(
    models: Vec<NormalizedModel>,
    errors: Vec<FetchError>,
    now: DateTime<Utc>,
) -> ModelFeed {
    let architectures = aggregator::architecture_counts(&models);

    let metadata = FeedMetadata {
        total_models: models.len(),
        architectures,
        last_updated: now,
        errors,
    };

    ModelFeed { models, metadata }
}

/// Serialize the feed document.
pub fn generate_json(feed: &ModelFeed, format: OutputFormat) -> Result<String> {
    let json = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(feed)?,
        OutputFormat::Compact => serde_json::to_string(feed)?,
    };
    Ok(json)
}

/// Write the feed document, creating the destination directory if needed.
///
/// The file is fully overwritten on every run; there is no merge with a
/// previous snapshot.
pub fn write_feed(feed: &ModelFeed, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    let json = generate_json(feed, format)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write feed to {}", path.display()))?;

    Ok(())
}
