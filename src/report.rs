//! # Report Formatter
//!
//! Renders golden records as output lines, one cluster per line, using the
//! same delimiters the parser accepts on input.

use crate::linker::GoldenRecord;
use crate::parser::{DELIM_EMAILS, DELIM_USER_EMAILS};
use crate::store::Store;
use anyhow::{anyhow, Result};
use std::io::Write;

/// Render one golden record as `representative -> email1, email2`.
pub fn render_golden_record(store: &Store, golden: &GoldenRecord) -> Result<String> {
    let name = store
        .resolve_user(golden.representative)
        .ok_or_else(|| anyhow!("unknown user id: {}", golden.representative))?;

    let mut emails = Vec::with_capacity(golden.emails.len());
    for &email in &golden.emails {
        let address = store
            .resolve_email(email)
            .ok_or_else(|| anyhow!("unknown email id: {email}"))?;
        emails.push(address.as_str());
    }

    Ok(format!(
        "{}{}{}",
        name,
        DELIM_USER_EMAILS,
        emails.join(DELIM_EMAILS)
    ))
}

/// Write one line per golden record. Order across clusters is whatever the
/// caller passed in; nothing here sorts or groups.
pub fn write_report<W: Write>(out: &mut W, store: &Store, golden: &[GoldenRecord]) -> Result<()> {
    for record in golden {
        writeln!(out, "{}", render_golden_record(store, record)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linker::StreamingLinker;

    #[test]
    fn test_render_uses_exact_delimiters() {
        let mut store = Store::new();
        let mut linker = StreamingLinker::new();

        let (user, _) = store.upsert_record("alice", &["a@x.com", "b@x.com"]);
        linker.link_record(&store, user).unwrap();

        let golden = linker.golden_records(&store).unwrap();
        let line = render_golden_record(&store, &golden[0]).unwrap();
        assert_eq!(line, "alice -> a@x.com, b@x.com");
    }

    #[test]
    fn test_render_empty_email_set() {
        let mut store = Store::new();
        let mut linker = StreamingLinker::new();

        let (user, _) = store.upsert_record::<&str>("loner", &[]);
        linker.link_record(&store, user).unwrap();

        let golden = linker.golden_records(&store).unwrap();
        let line = render_golden_record(&store, &golden[0]).unwrap();
        assert_eq!(line, "loner -> ");
    }

    #[test]
    fn test_write_report_emits_one_line_per_cluster() {
        let mut store = Store::new();
        let mut linker = StreamingLinker::new();

        for (user, emails) in [("alice", vec!["a@x.com"]), ("bob", vec!["b@x.com"])] {
            let (id, _) = store.upsert_record(user, &emails);
            linker.link_record(&store, id).unwrap();
        }

        let golden = linker.golden_records(&store).unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &store, &golden).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
