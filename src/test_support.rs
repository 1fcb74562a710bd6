use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A generated input record before parsing/interning.
#[derive(Debug, Clone)]
pub struct GeneratedRecord {
    pub user: String,
    pub emails: Vec<String>,
}

/// Generate a seeded dataset of user records.
///
/// Each record carries 1..=3 emails; with `share_probability` an email is
/// drawn from a small shared pool (creating merge chains across users),
/// otherwise it is unique to the record.
pub fn generate_dataset(count: u32, share_probability: f64, seed: u64) -> Vec<GeneratedRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(count as usize);

    let pool_size = (count / 4).max(1);

    for i in 1..=count {
        let user = format!("user_{:06}", i);

        let email_count = rng.random_range(1..=3);
        let mut emails = Vec::with_capacity(email_count);
        for slot in 0..email_count {
            if rng.random_bool(share_probability) {
                let shared = rng.random_range(0..pool_size);
                emails.push(format!("shared_{:04}@example.com", shared));
            } else {
                emails.push(format!("user_{:06}_{}@example.com", i, slot));
            }
        }

        records.push(GeneratedRecord { user, emails });
    }

    records
}

/// Render a dataset as filter input, terminated by a blank line.
#[allow(dead_code)]
pub fn to_input_text(records: &[GeneratedRecord]) -> String {
    let mut text = String::new();
    for record in records {
        text.push_str(&record.user);
        text.push_str(" -> ");
        text.push_str(&record.emails.join(", "));
        text.push('\n');
    }
    text.push('\n');
    text
}
