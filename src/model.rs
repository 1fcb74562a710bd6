//! # Data Model
//!
//! Core data structures for user deduplication.
//! Includes compact user/email identification, user records, and string
//! interning for efficiency.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Compact identifier for users.
///
/// Ids are assigned densely in first-seen order, so ordering two `UserId`s
/// compares which user entered the stream first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{}", self.0)
    }
}

/// Compact identifier for email addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmailId(pub u32);

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Compact identifier for clusters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClusterId(pub u32);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// A user record: the email set given by the most recent ingestion for
/// that user. Re-ingesting a user name replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The user this record belongs to
    pub user: UserId,
    /// Interned emails, deduplicated, in first-listed order
    pub emails: Vec<EmailId>,
}

impl UserRecord {
    /// Create a new user record
    pub fn new(user: UserId, emails: Vec<EmailId>) -> Self {
        Self { user, emails }
    }

    /// Check whether the record lists a specific email
    pub fn contains_email(&self, email: EmailId) -> bool {
        self.emails.contains(&email)
    }
}

/// String interner for efficient storage of user names and email addresses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StringInterner {
    user_to_id: HashMap<String, UserId>,
    email_to_id: HashMap<String, EmailId>,
    id_to_user: HashMap<UserId, String>,
    id_to_email: HashMap<EmailId, String>,
    next_user_id: u32,
    next_email_id: u32,
}

impl StringInterner {
    /// Create a new string interner
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a user name and return its ID
    pub fn intern_user(&mut self, user: &str) -> UserId {
        if let Some(&id) = self.user_to_id.get(user) {
            return id;
        }

        let id = UserId(self.next_user_id);
        self.next_user_id += 1;

        self.user_to_id.insert(user.to_string(), id);
        self.id_to_user.insert(id, user.to_string());

        id
    }

    /// Intern an email address and return its ID
    pub fn intern_email(&mut self, email: &str) -> EmailId {
        if let Some(&id) = self.email_to_id.get(email) {
            return id;
        }

        let id = EmailId(self.next_email_id);
        self.next_email_id += 1;

        self.email_to_id.insert(email.to_string(), id);
        self.id_to_email.insert(id, email.to_string());

        id
    }

    /// Get the name for a user ID
    pub fn get_user(&self, id: UserId) -> Option<&String> {
        self.id_to_user.get(&id)
    }

    /// Get the address for an email ID
    pub fn get_email(&self, id: EmailId) -> Option<&String> {
        self.id_to_email.get(&id)
    }

    pub fn get_user_id(&self, user: &str) -> Option<UserId> {
        self.user_to_id.get(user).copied()
    }

    pub fn get_email_id(&self, email: &str) -> Option<EmailId> {
        self.email_to_id.get(email).copied()
    }

    /// Number of distinct user names seen so far
    pub fn user_count(&self) -> usize {
        self.id_to_user.len()
    }

    /// Number of distinct email addresses seen so far
    pub fn email_count(&self) -> usize {
        self.id_to_email.len()
    }

    /// Get all user IDs
    pub fn user_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.id_to_user.keys().copied()
    }

    /// Get all email IDs
    pub fn email_ids(&self) -> impl Iterator<Item = EmailId> + '_ {
        self.id_to_email.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_user_is_stable() {
        let mut interner = StringInterner::new();

        let alice = interner.intern_user("alice");
        let bob = interner.intern_user("bob");
        assert_ne!(alice, bob);
        assert_eq!(interner.intern_user("alice"), alice);
        assert_eq!(interner.get_user(alice), Some(&"alice".to_string()));
        assert_eq!(interner.user_count(), 2);
    }

    #[test]
    fn test_intern_email_is_stable() {
        let mut interner = StringInterner::new();

        let e1 = interner.intern_email("a@example.com");
        let e2 = interner.intern_email("b@example.com");
        assert_ne!(e1, e2);
        assert_eq!(interner.intern_email("a@example.com"), e1);
        assert_eq!(interner.get_email_id("b@example.com"), Some(e2));
    }

    #[test]
    fn test_user_ids_follow_first_seen_order() {
        let mut interner = StringInterner::new();

        let first = interner.intern_user("first");
        let second = interner.intern_user("second");
        interner.intern_user("first");
        assert!(first < second);
    }

    #[test]
    fn test_record_contains_email() {
        let record = UserRecord::new(UserId(0), vec![EmailId(1), EmailId(3)]);
        assert!(record.contains_email(EmailId(3)));
        assert!(!record.contains_email(EmailId(2)));
    }
}
