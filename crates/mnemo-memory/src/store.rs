// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The memory store: ingestion, re-ranked retrieval, and retention eviction.
//!
//! Ingestion runs admission -> summarize -> tag -> persist. Retrieval
//! oversamples nearest-neighbor candidates and re-ranks them with
//! multiplicative boosts for session affinity, recency, and context
//! overlap; the vector store's native distance order is only a recall
//! filter, never the final order.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use mnemo_config::MemoryConfig;
use mnemo_core::{Metadata, MnemoError, ProviderAdapter, VectorCollection};
use serde_json::json;
use tracing::{debug, info};

use crate::admission::is_worth_storing;
use crate::session::SessionTracker;
use crate::summary::generate_context_summary;
use crate::types::{KEY_CONTEXT, KEY_SESSION_ID, KEY_SOURCE, KEY_TIMESTAMP, MemorySource, meta_str};

/// Boost for candidates created in the caller's current session.
const SESSION_BOOST: f64 = 1.5;
/// Starting recency factor; decays by hours_ago/100 within the window.
const RECENCY_BASE: f64 = 1.2;
/// Hours within which the recency boost applies.
const RECENCY_WINDOW_HOURS: f64 = 24.0;
/// Boost when the query's context summary overlaps the stored one.
const CONTEXT_BOOST: f64 = 1.3;

/// Timestamp format with fixed fractional width, so lexicographic order on
/// the stored strings matches chronological order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Render a UTC instant in the stored timestamp format.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Outcome of an ingestion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The text was summarized, tagged, and persisted.
    Stored,
    /// The admission filter judged the text trivial; nothing was written.
    SkippedTrivial,
}

/// Long-term conversational memory over one vector collection.
///
/// Owns the lifecycle of its records: creation via [`ingest`](Self::ingest),
/// destruction via [`evict_older_than`](Self::evict_older_than). Records are
/// immutable in between.
pub struct MemoryStore {
    collection: Arc<dyn VectorCollection>,
    summarizer: Arc<dyn ProviderAdapter>,
    sessions: Arc<SessionTracker>,
    config: MemoryConfig,
}

impl MemoryStore {
    /// Creates a memory store over the given collection and summarizer.
    pub fn new(
        collection: Arc<dyn VectorCollection>,
        summarizer: Arc<dyn ProviderAdapter>,
        sessions: Arc<SessionTracker>,
        config: MemoryConfig,
    ) -> Self {
        Self {
            collection,
            summarizer,
            sessions,
            config,
        }
    }

    /// True once any interaction has touched the session tracker in this
    /// process. Gates opportunistic maintenance.
    pub fn session_started(&self) -> bool {
        self.sessions.has_started()
    }

    /// Ingest one utterance into long-term memory.
    ///
    /// Trivial text is skipped. The summarizer may fail or decline; either
    /// way the record is stored without a context tag. Caller-supplied
    /// metadata is preserved except for the reserved keys (`context`,
    /// `timestamp`, `session_id`, `source`), which the store always owns.
    /// Only a failed vector-store write surfaces as an error.
    pub async fn ingest(
        &self,
        text: &str,
        source: MemorySource,
        extra: Metadata,
    ) -> Result<IngestOutcome, MnemoError> {
        if !is_worth_storing(text) {
            debug!(text, "skipped storing trivial message");
            return Ok(IngestOutcome::SkippedTrivial);
        }

        let context =
            generate_context_summary(&*self.summarizer, &self.config.summary_model, text).await;

        let mut metadata = extra;
        match context {
            Some(context) => {
                metadata.insert(KEY_CONTEXT.into(), json!(context));
            }
            None => {
                metadata.remove(KEY_CONTEXT);
            }
        }
        metadata.insert(KEY_TIMESTAMP.into(), json!(format_timestamp(Utc::now())));
        metadata.insert(KEY_SESSION_ID.into(), json!(self.sessions.current_session()));
        metadata.insert(KEY_SOURCE.into(), json!(source.as_str()));

        self.collection
            .add(vec![text.to_string()], vec![metadata])
            .await?;
        debug!(source = source.as_str(), "stored memory");
        Ok(IngestOutcome::Stored)
    }

    /// Retrieve up to `k` memory texts ranked by relevance to `query`.
    ///
    /// Fetches `oversample_factor * k` nearest-neighbor candidates, scores
    /// each with the boost products, and truncates to `k`. Ties keep the
    /// vector store's native order. `score_threshold` is carried on the
    /// signature but not applied as a cutoff; ranking is truncation-only.
    pub async fn retrieve(
        &self,
        query: &str,
        k: usize,
        score_threshold: f64,
    ) -> Result<Vec<String>, MnemoError> {
        let _ = score_threshold;

        let candidates = self
            .collection
            .search(query, k * self.config.oversample_factor)
            .await?;

        let query_context =
            generate_context_summary(&*self.summarizer, &self.config.summary_model, query).await;
        let current_session = self.sessions.current_session();
        let now = Utc::now();

        let mut scored: Vec<_> = candidates
            .into_iter()
            .map(|hit| {
                let score = relevance_score(
                    &hit.metadata,
                    now,
                    &current_session,
                    query_context.as_deref(),
                );
                (hit, score)
            })
            .collect();

        // Stable sort: equal scores keep their vector-store order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        debug!(count = scored.len(), "retrieved relevant memories");
        Ok(scored.into_iter().map(|(hit, _)| hit.text).collect())
    }

    /// Retrieve with the configured `retrieval_k` and `score_threshold`.
    pub async fn retrieve_default(&self, query: &str) -> Result<Vec<String>, MnemoError> {
        self.retrieve(query, self.config.retrieval_k, self.config.score_threshold)
            .await
    }

    /// Delete every record older than `days`, returning how many were removed.
    ///
    /// Timestamps are compared as ISO-8601 strings against the cutoff;
    /// records without a string `timestamp` field are never evicted.
    pub async fn evict_older_than(&self, days: i64) -> Result<usize, MnemoError> {
        let cutoff = format_timestamp(Utc::now() - TimeDelta::days(days));

        let entries = self.collection.get_all().await?;
        let stale: Vec<String> = entries
            .into_iter()
            .filter(|entry| {
                meta_str(&entry.metadata, KEY_TIMESTAMP)
                    .is_some_and(|ts| ts < cutoff.as_str())
            })
            .map(|entry| entry.id)
            .collect();

        if stale.is_empty() {
            return Ok(0);
        }

        let removed = stale.len();
        self.collection.delete(&stale).await?;
        info!(removed, "cleaned up old memories");
        Ok(removed)
    }

    /// Delete every record older than the configured retention window.
    pub async fn evict_stale(&self) -> Result<usize, MnemoError> {
        self.evict_older_than(self.config.retention_days).await
    }
}

/// Score one candidate. Starts at 1.0 and applies independent
/// multiplicative boosts; the order of application does not matter.
fn relevance_score(
    meta: &Metadata,
    now: DateTime<Utc>,
    current_session: &str,
    query_context: Option<&str>,
) -> f64 {
    let mut score = 1.0;

    if meta_str(meta, KEY_SESSION_ID) == Some(current_session) {
        score *= SESSION_BOOST;
    }

    // Malformed timestamps get no adjustment, never an error.
    if let Some(ts) = meta_str(meta, KEY_TIMESTAMP)
        && let Ok(created) = DateTime::parse_from_rfc3339(ts)
    {
        let hours_ago =
            (now - created.with_timezone(&Utc)).num_seconds() as f64 / 3600.0;
        if hours_ago < RECENCY_WINDOW_HOURS {
            score *= RECENCY_BASE - hours_ago / 100.0;
        }
    }

    if let Some(query_context) = query_context {
        let stored = meta_str(meta, KEY_CONTEXT).unwrap_or("").to_lowercase();
        if !stored.is_empty() {
            let query_context = query_context.to_lowercase();
            if query_context
                .split_whitespace()
                .any(|token| stored.contains(token))
            {
                score *= CONTEXT_BOOST;
            }
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta_with(entries: &[(&str, &str)]) -> Metadata {
        let mut meta = Metadata::new();
        for (key, value) in entries {
            meta.insert((*key).into(), json!(value));
        }
        meta
    }

    #[test]
    fn base_score_is_one() {
        let score = relevance_score(&Metadata::new(), Utc::now(), "sess1234", None);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn session_match_boosts() {
        let meta = meta_with(&[(KEY_SESSION_ID, "sess1234")]);
        let matching = relevance_score(&meta, Utc::now(), "sess1234", None);
        let other = relevance_score(&meta, Utc::now(), "other000", None);
        assert!((matching - 1.5).abs() < 1e-9);
        assert_eq!(other, 1.0);
    }

    #[test]
    fn one_hour_old_outranks_thirty_hours_old() {
        let now = Utc::now();
        let recent = meta_with(&[(
            KEY_TIMESTAMP,
            &format_timestamp(now - TimeDelta::hours(1)),
        )]);
        let old = meta_with(&[(
            KEY_TIMESTAMP,
            &format_timestamp(now - TimeDelta::hours(30)),
        )]);

        let recent_score = relevance_score(&recent, now, "s", None);
        let old_score = relevance_score(&old, now, "s", None);
        assert!(recent_score > old_score);
        // 30h is outside the window entirely: no adjustment.
        assert_eq!(old_score, 1.0);
        // 1h inside the window: 1.2 - 1/100.
        assert!((recent_score - 1.19).abs() < 1e-3);
    }

    #[test]
    fn malformed_timestamp_gets_no_adjustment() {
        let meta = meta_with(&[(KEY_TIMESTAMP, "not-a-date")]);
        assert_eq!(relevance_score(&meta, Utc::now(), "s", None), 1.0);
    }

    #[test]
    fn context_overlap_boosts() {
        let meta = meta_with(&[(KEY_CONTEXT, "User shared their name is Ayush")]);
        let hit = relevance_score(&meta, Utc::now(), "s", Some("User asked about their name"));
        let miss = relevance_score(&meta, Utc::now(), "s", Some("weather forecast query"));
        assert!((hit - 1.3).abs() < 1e-9);
        assert_eq!(miss, 1.0);
    }

    #[test]
    fn empty_stored_context_never_matches() {
        let meta = meta_with(&[(KEY_CONTEXT, "")]);
        assert_eq!(
            relevance_score(&meta, Utc::now(), "s", Some("anything at all")),
            1.0
        );
    }

    #[test]
    fn boosts_multiply() {
        let now = Utc::now();
        let meta = meta_with(&[
            (KEY_SESSION_ID, "sess1234"),
            (KEY_TIMESTAMP, &format_timestamp(now - TimeDelta::minutes(6))),
            (KEY_CONTEXT, "user shared their name"),
        ]);
        let score = relevance_score(&meta, now, "sess1234", Some("name"));
        // 1.5 * (1.2 - 0.1/100) * 1.3
        let expected = 1.5 * (1.2 - 0.001) * 1.3;
        assert!((score - expected).abs() < 1e-6);
    }

    #[test]
    fn timestamp_format_sorts_lexicographically() {
        let earlier = format_timestamp(Utc::now() - TimeDelta::days(46));
        let later = format_timestamp(Utc::now() - TimeDelta::days(44));
        let cutoff = format_timestamp(Utc::now() - TimeDelta::days(45));
        assert!(earlier < cutoff);
        assert!(later > cutoff);
        // Fixed fractional width keeps the string length constant.
        assert_eq!(earlier.len(), later.len());
    }
}
