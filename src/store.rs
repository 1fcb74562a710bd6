//! # Store Module
//!
//! Provides storage for user records together with the string interner.
//! A user's record always holds the email set from the most recent
//! ingestion for that user name; earlier sets are replaced wholesale.

use crate::model::{EmailId, StringInterner, UserId, UserRecord};
use hashbrown::HashMap;

/// Main storage for user records and interned strings
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Latest record per user
    records: HashMap<UserId, UserRecord>,
    /// String interner for user names and email addresses
    interner: StringInterner,
}

impl Store {
    /// Create a new store
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the record for a user name.
    ///
    /// The name and emails are interned, the email list is deduplicated
    /// preserving first-listed order, and any prior record for the same
    /// user is replaced. Returns the user's ID and interned email set.
    pub fn upsert_record<S: AsRef<str>>(&mut self, user: &str, emails: &[S]) -> (UserId, Vec<EmailId>) {
        let user_id = self.interner.intern_user(user);

        let mut email_ids = Vec::with_capacity(emails.len());
        for email in emails {
            let email_id = self.interner.intern_email(email.as_ref());
            if !email_ids.contains(&email_id) {
                email_ids.push(email_id);
            }
        }

        self.records
            .insert(user_id, UserRecord::new(user_id, email_ids.clone()));

        (user_id, email_ids)
    }

    /// Get a record by user ID
    pub fn get_record(&self, user: UserId) -> Option<&UserRecord> {
        self.records.get(&user)
    }

    /// Get all records
    pub fn get_all_records(&self) -> Vec<&UserRecord> {
        self.records.values().collect()
    }

    /// All user IDs with a record, in first-seen order
    pub fn user_ids_ordered(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.records.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Number of users with a record
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the string interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Get a mutable reference to the string interner
    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve a user ID back to its name
    pub fn resolve_user(&self, user: UserId) -> Option<&String> {
        self.interner.get_user(user)
    }

    /// Resolve an email ID back to its address
    pub fn resolve_email(&self, email: EmailId) -> Option<&String> {
        self.interner.get_email(email)
    }
}
