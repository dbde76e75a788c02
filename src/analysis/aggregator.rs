//! Record accumulation, ordering, and per-source statistics.
//!
//! This module folds the per-endpoint fetch outcomes into the single record
//! list the feed document is built from. Endpoint failures become error
//! entries; they never abort the run.

use crate::extract;
use crate::models::{ArchitectureCounts, FetchError, NormalizedModel, Source};
use crate::sources::FetchFailure;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

/// The result of visiting one endpoint.
pub struct EndpointOutcome {
    /// Which source was queried.
    pub source: Source,
    /// Decoded payload on success, typed failure otherwise.
    pub result: Result<Value, FetchFailure>,
}

/// Fold endpoint outcomes into accumulated record and error lists.
///
/// A failed endpoint contributes one error entry and no records. A payload
/// with no recognized list shape (or an empty list) contributes zero records
/// and no error; that case is only logged.
pub fn accumulate(
    outcomes: Vec<EndpointOutcome>,
    now: DateTime<Utc>,
) -> (Vec<NormalizedModel>, Vec<FetchError>) {
    let mut models = Vec::new();
    let mut errors = Vec::new();

    for outcome in outcomes {
        match outcome.result {
            Ok(payload) => {
                let (shape, records) = extract::extract_records(payload);
                if records.is_empty() {
                    warn!("{}: no models found (shape: {})", outcome.source, shape);
                    continue;
                }
                info!("{}: {} models (shape: {})", outcome.source, records.len(), shape);
                models.extend(
                    records
                        .into_iter()
                        .map(|raw| extract::normalize_record(raw, outcome.source, now)),
                );
            }
            Err(failure) => {
                errors.push(FetchError {
                    architecture: outcome.source,
                    error: failure.to_string(),
                });
            }
        }
    }

    (models, errors)
}

/// Sort records by creation time, most recent first.
///
/// The sort is stable: records with equal timestamps keep the order in which
/// they were accumulated (endpoint-visit order, then within-payload order).
pub fn sort_by_created_desc(models: &mut [NormalizedModel]) {
    models.sort_by(|a, b| b.created.cmp(&a.created));
}

/// Count records per source label.
pub fn architecture_counts(models: &[NormalizedModel]) -> ArchitectureCounts {
    let count = |source: Source| models.iter().filter(|m| m.architecture == source).count();

    ArchitectureCounts {
        gpt: count(Source::Gpt),
        claude: count(Source::Claude),
        gemini: count(Source::Gemini),
    }
}
