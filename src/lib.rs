//! # Unimail
//!
//! A streaming user-deduplication engine.
//!
//! Unimail groups user records that share at least one email address into
//! connected clusters and emits one consolidated record per cluster: a
//! representative user name plus the union of all emails reachable through
//! shared-email chains. Grouping is fully incremental; cluster state is
//! maintained record by record and never recomputed from scratch.

pub mod dsu;
pub mod index;
pub mod linker;
pub mod model;
pub mod parser;
pub mod report;
pub mod store;

// Re-export main types for convenience
pub use dsu::{Cluster, Clusters};
pub use linker::{GoldenRecord, StreamingLinker};
pub use model::{ClusterId, EmailId, UserId, UserRecord};
pub use parser::{parse_line, LineEvent, RawRecord, DELIM_EMAILS, DELIM_USER_EMAILS};
pub use store::Store;

use anyhow::Result;
use std::io::{BufRead, Write};

/// Assignment result for streaming grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupAssignment {
    pub user: UserId,
    pub cluster: ClusterId,
}

/// Main API for user deduplication
#[derive(Debug, Clone, Default)]
pub struct Unimail {
    store: Store,
    streaming: StreamingLinker,
}

impl Unimail {
    /// Create a new empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from an existing store snapshot, replaying its
    /// records through a fresh linker in first-seen order.
    pub fn with_store(store: Store) -> Result<Self> {
        let streaming = StreamingLinker::from_store(&store)?;
        Ok(Self { store, streaming })
    }

    /// Ingest one (user, emails) record.
    ///
    /// Upserts the user's record (the latest email set wins), fuses the
    /// user with every cluster that currently owns one of the emails, and
    /// takes over ownership of all of them. Returns the user's stable
    /// streaming cluster assignment.
    pub fn ingest<S: AsRef<str>>(&mut self, user: &str, emails: &[S]) -> Result<GroupAssignment> {
        let (user_id, _) = self.store.upsert_record(user, emails);
        let cluster = self.streaming.link_record(&self.store, user_id)?;
        Ok(GroupAssignment {
            user: user_id,
            cluster,
        })
    }

    /// Produce one golden record per cluster. May be called repeatedly;
    /// each call reflects all ingests so far.
    pub fn golden_records(&mut self) -> Result<Vec<GoldenRecord>> {
        self.streaming.golden_records(&self.store)
    }

    /// Snapshot the current clusters.
    pub fn clusters(&mut self) -> Clusters {
        self.streaming.clusters()
    }

    /// Number of users ingested so far
    pub fn user_count(&self) -> usize {
        self.store.len()
    }

    /// Current number of clusters
    pub fn cluster_count(&self) -> usize {
        self.streaming.cluster_count()
    }

    /// Get the underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Resolve a user ID back to its name
    pub fn resolve_user(&self, user: UserId) -> Option<&String> {
        self.store.resolve_user(user)
    }

    /// Resolve an email ID back to its address
    pub fn resolve_email(&self, email: EmailId) -> Option<&String> {
        self.store.resolve_email(email)
    }
}

/// Deduplicate a line-oriented stream.
///
/// Reads `user -> email1, email2` lines until a blank line or end of
/// input, skipping malformed lines, then writes one consolidated line per
/// cluster. Order across output lines is unspecified.
pub fn deduplicate<R: BufRead, W: Write>(input: R, mut output: W) -> Result<()> {
    let mut engine = Unimail::new();

    for line in input.lines() {
        let line = line?;
        match parser::parse_line(&line) {
            LineEvent::Record(record) => {
                engine.ingest(&record.user, &record.emails)?;
            }
            LineEvent::Skipped => {}
            LineEvent::Finished => break,
        }
    }

    let golden = engine.golden_records()?;
    report::write_report(&mut output, engine.store(), &golden)?;
    Ok(())
}
