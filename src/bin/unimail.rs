//! Line-oriented stdin to stdout deduplication filter.
//!
//! Reads `user -> email1, email2` lines until a blank line or end of
//! input, then prints one consolidated line per cluster. Takes no flags.
//! Logging is controlled through `RUST_LOG` and goes to stderr so stdout
//! stays a clean data channel.

use std::io;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    unimail_rs::deduplicate(stdin.lock(), stdout.lock())
}
