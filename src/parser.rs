//! # Record Parser
//!
//! Turns one line of input into a (user, emails) record, skips lines that
//! do not split into exactly two parts, and signals end-of-input on a
//! blank line. The engine never sees malformed input; everything it gets
//! from here is a trimmed, deduplicated record with a non-empty user name.

/// Delimiter between the user name and the email list
pub const DELIM_USER_EMAILS: &str = " -> ";
/// Delimiter between emails in the list
pub const DELIM_EMAILS: &str = ", ";

/// A parsed input record before interning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub user: String,
    pub emails: Vec<String>,
}

/// Outcome of parsing one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A well-formed record
    Record(RawRecord),
    /// A malformed line, skipped silently
    Skipped,
    /// A blank line, ending the input
    Finished,
}

/// Parse a single input line.
///
/// Splitting uses the delimiter core without surrounding whitespace, so
/// `a->b@x.com` parses the same as `a -> b@x.com`. Email fragments are
/// trimmed and deduplicated; empty fragments are dropped. A line whose
/// user part trims to empty is skipped.
pub fn parse_line(line: &str) -> LineEvent {
    if line.trim().is_empty() {
        return LineEvent::Finished;
    }

    let parts: Vec<&str> = line.split(DELIM_USER_EMAILS.trim()).collect();
    if parts.len() != 2 {
        tracing::trace!(line, "skipping malformed line");
        return LineEvent::Skipped;
    }

    let user = parts[0].trim();
    if user.is_empty() {
        tracing::trace!(line, "skipping line with empty user");
        return LineEvent::Skipped;
    }

    let mut emails: Vec<String> = Vec::new();
    for fragment in parts[1].split(DELIM_EMAILS.trim()) {
        let email = fragment.trim();
        if email.is_empty() || emails.iter().any(|seen| seen == email) {
            continue;
        }
        emails.push(email.to_string());
    }

    LineEvent::Record(RawRecord {
        user: user.to_string(),
        emails,
    })
}
