//! # Streaming Linker Module
//!
//! Implements incremental grouping of users connected by shared emails.
//! Each incoming record is linked against the current email ownership
//! index and fused into the clusters of whichever users own its emails.
//! Fusion is transitive and monotonic: once two users share a cluster
//! they never separate, even if ownership of their emails later moves on.

use crate::dsu::{Clusters, Dsu};
use crate::index::EmailOwnerIndex;
use crate::model::{ClusterId, EmailId, UserId};
use crate::store::Store;
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};

/// One consolidated output record per cluster: a representative user plus
/// the union of all emails recorded for the cluster's current members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenRecord {
    /// Stable streaming cluster ID
    pub cluster: ClusterId,
    /// The first-seen member, used to label the cluster
    pub representative: UserId,
    /// All members, ordered by first appearance
    pub members: Vec<UserId>,
    /// Union of the members' recorded email sets
    pub emails: Vec<EmailId>,
}

/// Build the final clusters for a store snapshot.
///
/// Replays records in first-seen order through a fresh linker. A snapshot
/// only holds each user's latest email set, so replayed ownership follows
/// first-seen order over those final sets rather than the original
/// overwrite history; the resulting connectivity is the same.
pub fn build_clusters(store: &Store) -> Result<Clusters> {
    let mut linker = StreamingLinker::from_store(store)?;
    Ok(linker.clusters())
}

/// Build golden records for a store snapshot.
pub fn build_golden_records(store: &Store) -> Result<Vec<GoldenRecord>> {
    let mut linker = StreamingLinker::from_store(store)?;
    linker.golden_records(store)
}

/// Streaming linker for continuous grouping.
#[derive(Debug, Clone, Default)]
pub struct StreamingLinker {
    dsu: Dsu,
    email_index: EmailOwnerIndex,
    cluster_ids: HashMap<UserId, ClusterId>,
    next_cluster_id: u32,
}

impl StreamingLinker {
    /// Create an empty streaming linker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize a streaming linker from the current store snapshot.
    pub fn from_store(store: &Store) -> Result<Self> {
        let mut linker = Self::new();

        for user in store.user_ids_ordered() {
            linker.link_record(store, user)?;
        }

        Ok(linker)
    }

    /// Link a newly upserted record to existing clusters and return its
    /// cluster ID.
    ///
    /// The record's emails are looked up in the ownership index; the
    /// incoming user is fused with every distinct current owner, then
    /// takes over ownership of all its emails. An email set that touches
    /// no owned email leaves the user a singleton.
    pub fn link_record(&mut self, store: &Store, user: UserId) -> Result<ClusterId> {
        let record = store
            .get_record(user)
            .ok_or_else(|| anyhow!("record not found in store: {user}"))?;

        self.dsu.add_user(user);

        for owner in self.email_index.distinct_owners(&record.emails) {
            if owner == user {
                continue;
            }

            let root_a = self.dsu.find(user);
            let root_b = self.dsu.find(owner);
            if root_a == root_b {
                continue;
            }

            let new_root = self.dsu.union(user, owner);
            tracing::debug!(user = %user, owner = %owner, "fused clusters via shared email");
            reconcile_cluster_ids(
                &mut self.cluster_ids,
                &mut self.next_cluster_id,
                root_a,
                root_b,
                new_root,
            );
        }

        // Claim ownership after matching so the incoming record is the
        // last writer for every email it lists.
        self.email_index.claim_all(&record.emails, user);

        let root = self.dsu.find(user);
        Ok(self.get_or_assign_cluster_id(root))
    }

    /// Get clusters from the streaming DSU state.
    pub fn clusters(&mut self) -> Clusters {
        self.dsu.get_clusters()
    }

    /// Produce one golden record per cluster.
    ///
    /// Dedup is by cluster id, never object identity. The representative
    /// is the first-seen member; the email set is the union of the
    /// members' recorded sets at the time of the call. Order across
    /// clusters is unspecified. May be called repeatedly; each call
    /// reflects all records linked so far.
    pub fn golden_records(&mut self, store: &Store) -> Result<Vec<GoldenRecord>> {
        let clusters = self.dsu.get_clusters();
        let mut golden = Vec::with_capacity(clusters.len());

        for cluster in clusters.clusters {
            let mut members = cluster.members;
            members.sort();
            let representative = *members
                .first()
                .ok_or_else(|| anyhow!("empty cluster in snapshot"))?;

            let mut seen = HashSet::new();
            let mut emails = Vec::new();
            for &member in &members {
                let record = store
                    .get_record(member)
                    .ok_or_else(|| anyhow!("record not found in store: {member}"))?;
                for &email in &record.emails {
                    if seen.insert(email) {
                        emails.push(email);
                    }
                }
            }
            emails.sort();

            let root = self.dsu.find(representative);
            let cluster_id = self.get_or_assign_cluster_id(root);

            golden.push(GoldenRecord {
                cluster: cluster_id,
                representative,
                members,
                emails,
            });
        }

        Ok(golden)
    }

    /// Check whether two users are currently in the same cluster.
    pub fn same_cluster(&mut self, a: UserId, b: UserId) -> bool {
        self.dsu.same_cluster(a, b)
    }

    /// Current number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.dsu.cluster_count()
    }

    /// Current owner of an email, if any.
    pub fn email_owner(&self, email: EmailId) -> Option<UserId> {
        self.email_index.owner_of(email)
    }

    fn get_or_assign_cluster_id(&mut self, root: UserId) -> ClusterId {
        if let Some(cluster_id) = self.cluster_ids.get(&root) {
            return *cluster_id;
        }
        let cluster_id = ClusterId(self.next_cluster_id);
        self.next_cluster_id += 1;
        self.cluster_ids.insert(root, cluster_id);
        cluster_id
    }
}

fn reconcile_cluster_ids(
    cluster_ids: &mut HashMap<UserId, ClusterId>,
    next_cluster_id: &mut u32,
    root_a: UserId,
    root_b: UserId,
    new_root: UserId,
) {
    let id_a = cluster_ids.get(&root_a).copied();
    let id_b = cluster_ids.get(&root_b).copied();

    let chosen = match (id_a, id_b) {
        (Some(a), Some(b)) => {
            if a.0 <= b.0 {
                a
            } else {
                b
            }
        }
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => {
            let id = ClusterId(*next_cluster_id);
            *next_cluster_id += 1;
            id
        }
    };

    if root_a != new_root {
        cluster_ids.remove(&root_a);
    }
    if root_b != new_root {
        cluster_ids.remove(&root_b);
    }
    cluster_ids.insert(new_root, chosen);
}
