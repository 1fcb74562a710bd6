//! # Disjoint Set Union (DSU)
//!
//! Implements the Union-Find structure backing incremental user grouping.
//! Merges are unconditional: two users end up in the same set as soon as a
//! shared email connects them, and sets never split afterwards.

use crate::model::{ClusterId, UserId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Disjoint Set Union over users
#[derive(Debug, Clone, Default)]
pub struct Dsu {
    /// Parent array for Union-Find - uses FxHashMap for faster hashing
    parent: FxHashMap<UserId, UserId>,
    /// Rank array for union by rank - uses FxHashMap for faster hashing
    rank: FxHashMap<UserId, u32>,
    /// Next available snapshot cluster ID
    next_cluster_id: u32,
    /// Current number of disjoint sets
    cluster_count: usize,
}

impl Dsu {
    /// Create a new DSU
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user to the DSU as a fresh singleton.
    /// Adding a user that is already tracked is a no-op.
    pub fn add_user(&mut self, user: UserId) {
        if self.parent.contains_key(&user) {
            return;
        }
        self.parent.insert(user, user);
        self.rank.insert(user, 0);
        self.cluster_count += 1;
    }

    /// Check if a user exists in the DSU.
    pub fn has_user(&self, user: UserId) -> bool {
        self.parent.contains_key(&user)
    }

    /// Number of users tracked by the DSU.
    pub fn user_count(&self) -> usize {
        self.parent.len()
    }

    /// Find the root of a user (with path compression via path halving).
    /// Returns the user itself if not in the DSU (untracked users are self-roots).
    #[inline]
    pub fn find(&mut self, user: UserId) -> UserId {
        let Some(&initial_parent) = self.parent.get(&user) else {
            return user;
        };
        if initial_parent == user {
            return user;
        }

        self.find_root_with_path_halving(user, initial_parent)
    }

    /// Internal path-halving implementation - called when we know there's work to do
    #[inline]
    fn find_root_with_path_halving(&mut self, start: UserId, initial_parent: UserId) -> UserId {
        let mut current = start;
        let mut parent = initial_parent;

        // Path halving: point every other node to its grandparent
        loop {
            let grandparent = self.parent.get(&parent).copied().unwrap_or(parent);

            if grandparent == parent {
                break;
            }

            self.parent.insert(current, grandparent);
            current = grandparent;

            parent = self.parent.get(&current).copied().unwrap_or(current);
            if parent == current {
                break;
            }
        }

        parent
    }

    /// Check if two users are in the same cluster
    pub fn same_cluster(&mut self, a: UserId, b: UserId) -> bool {
        self.find(a) == self.find(b)
    }

    /// Union the clusters of two users and return the surviving root.
    /// Users not yet tracked are added first.
    pub fn union(&mut self, a: UserId, b: UserId) -> UserId {
        self.add_user(a);
        self.add_user(b);

        let root_a = self.find(a);
        let root_b = self.find(b);

        if root_a == root_b {
            return root_a;
        }

        let rank_a = self.rank.get(&root_a).copied().unwrap_or(0);
        let rank_b = self.rank.get(&root_b).copied().unwrap_or(0);

        let winner = if rank_a < rank_b {
            self.parent.insert(root_a, root_b);
            root_b
        } else if rank_a > rank_b {
            self.parent.insert(root_b, root_a);
            root_a
        } else {
            self.parent.insert(root_a, root_b);
            self.rank.insert(root_b, rank_b + 1);
            root_b
        };
        self.cluster_count = self.cluster_count.saturating_sub(1);

        winner
    }

    /// Get all clusters.
    /// Cluster IDs are assigned on demand and are not stable across calls.
    pub fn get_clusters(&mut self) -> Clusters {
        let num_users = self.parent.len();
        if num_users == 0 {
            return Clusters {
                clusters: Vec::new(),
            };
        }

        // We need to collect keys first since find() mutates parent
        let user_ids: Vec<UserId> = self.parent.keys().copied().collect();

        let estimated_clusters = self.cluster_count.max(1);
        let avg_cluster_size = (num_users / estimated_clusters).max(4);
        let mut cluster_map: HashMap<UserId, Vec<UserId>> =
            HashMap::with_capacity(estimated_clusters);

        for user in user_ids {
            let root = self.find(user);
            cluster_map
                .entry(root)
                .or_insert_with(|| Vec::with_capacity(avg_cluster_size))
                .push(user);
        }

        let mut clusters = Vec::with_capacity(cluster_map.len());
        for (root, members) in cluster_map {
            let cluster_id = ClusterId(self.next_cluster_id);
            self.next_cluster_id += 1;
            clusters.push(Cluster {
                id: cluster_id,
                root,
                members,
            });
        }

        Clusters { clusters }
    }

    /// Get the number of clusters
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }
}

/// A snapshot of one cluster of users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Snapshot identifier for this cluster
    pub id: ClusterId,
    /// The DSU root at snapshot time
    pub root: UserId,
    /// All users in the cluster, in DSU iteration order
    pub members: Vec<UserId>,
}

impl Cluster {
    /// Create a new cluster
    pub fn new(id: ClusterId, root: UserId, members: Vec<UserId>) -> Self {
        Self { id, root, members }
    }

    /// Get the number of members in the cluster
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the cluster is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if the cluster contains a user
    pub fn contains(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }
}

/// A collection of clusters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clusters {
    /// All clusters
    pub clusters: Vec<Cluster>,
}

impl Clusters {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cluster to the collection
    pub fn add_cluster(&mut self, cluster: Cluster) {
        self.clusters.push(cluster);
    }

    /// Get a cluster by ID
    pub fn get_cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id == id)
    }

    /// Get all clusters
    pub fn get_all_clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Get the cluster containing a user, if any
    pub fn cluster_of(&self, user: UserId) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.contains(user))
    }

    /// Get the number of clusters
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Check if there are no clusters
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
