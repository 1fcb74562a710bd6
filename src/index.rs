//! # Email Ownership Index
//!
//! Tracks which user currently owns each email address. Ownership is
//! last-writer-wins: the most recent record listing an email takes it over,
//! regardless of prior ownership. The linker consults this index to find
//! merge candidates before repointing ownership at the incoming user.

use crate::model::{EmailId, UserId};
use rustc_hash::FxHashMap;

/// Index from email address to its current owning user
#[derive(Debug, Clone, Default)]
pub struct EmailOwnerIndex {
    owners: FxHashMap<EmailId, UserId>,
}

impl EmailOwnerIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current owner of an email, if any
    pub fn owner_of(&self, email: EmailId) -> Option<UserId> {
        self.owners.get(&email).copied()
    }

    /// Collect the distinct current owners of an email set.
    /// Emails nobody owns yet contribute nothing. Order follows the first
    /// occurrence in `emails`.
    pub fn distinct_owners(&self, emails: &[EmailId]) -> Vec<UserId> {
        let mut owners = Vec::new();
        for &email in emails {
            if let Some(owner) = self.owner_of(email) {
                if !owners.contains(&owner) {
                    owners.push(owner);
                }
            }
        }
        owners
    }

    /// Point an email's ownership at a user, replacing any prior owner.
    pub fn claim(&mut self, email: EmailId, user: UserId) {
        self.owners.insert(email, user);
    }

    /// Point every email in the set at the incoming user.
    pub fn claim_all(&mut self, emails: &[EmailId], user: UserId) {
        for &email in emails {
            self.claim(email, user);
        }
    }

    /// Number of emails with a recorded owner
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_and_lookup() {
        let mut index = EmailOwnerIndex::new();
        assert!(index.is_empty());

        index.claim(EmailId(0), UserId(1));
        assert_eq!(index.owner_of(EmailId(0)), Some(UserId(1)));
        assert_eq!(index.owner_of(EmailId(9)), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_last_writer_wins() {
        let mut index = EmailOwnerIndex::new();

        index.claim(EmailId(0), UserId(1));
        index.claim(EmailId(0), UserId(2));
        assert_eq!(index.owner_of(EmailId(0)), Some(UserId(2)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_distinct_owners_dedups() {
        let mut index = EmailOwnerIndex::new();

        index.claim(EmailId(0), UserId(1));
        index.claim(EmailId(1), UserId(1));
        index.claim(EmailId(2), UserId(2));

        let owners = index.distinct_owners(&[EmailId(0), EmailId(1), EmailId(2), EmailId(3)]);
        assert_eq!(owners, vec![UserId(1), UserId(2)]);
    }

    #[test]
    fn test_claim_all_overwrites() {
        let mut index = EmailOwnerIndex::new();

        index.claim_all(&[EmailId(0), EmailId(1)], UserId(1));
        index.claim_all(&[EmailId(1), EmailId(2)], UserId(2));

        assert_eq!(index.owner_of(EmailId(0)), Some(UserId(1)));
        assert_eq!(index.owner_of(EmailId(1)), Some(UserId(2)));
        assert_eq!(index.owner_of(EmailId(2)), Some(UserId(2)));
    }
}
