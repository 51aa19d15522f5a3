//! Main generator producing contact records.

use crate::source::{FakeSource, FakerSource};
use contact_core::{ContactField, ContactRecord, FieldProbabilities, RecordSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Substituted when the source yields an address without `@`.
pub const FALLBACK_EMAIL: &str = "user@example.com";

/// Offsets the inclusion RNG seed from the fake source seed.
const INCLUSION_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// Generator that fills contact fields according to inclusion probabilities.
///
/// Each field gets its own independent draw from the inclusion RNG; the fake
/// source is only consulted for fields that are included.
pub struct ContactGenerator<S, R> {
    /// Per-field inclusion probabilities
    probabilities: FieldProbabilities,
    /// Raw value source
    source: S,
    /// RNG used for inclusion draws only
    rng: R,
    /// Number of records produced so far
    generated: u64,
}

impl<S: FakeSource, R: Rng> ContactGenerator<S, R> {
    /// Create a generator from a value source and an inclusion RNG.
    pub fn new(probabilities: FieldProbabilities, source: S, rng: R) -> Self {
        Self {
            probabilities,
            source,
            rng,
            generated: 0,
        }
    }

    /// Number of records generated so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    pub fn probabilities(&self) -> &FieldProbabilities {
        &self.probabilities
    }

    /// Generate the next contact record.
    pub fn next_record(&mut self) -> ContactRecord {
        let mut record = ContactRecord::default();

        for field in ContactField::ALL {
            let probability = self.probabilities.probability_for(field);
            if !self.rng.gen_bool(probability) {
                continue;
            }

            if field == ContactField::DateOfBirth {
                record.date_of_birth = Some(self.source.date_of_birth());
                continue;
            }

            let value = self.text_value(field);
            if let (Some(slot), false) = (record.text_slot(field), value.is_empty()) {
                *slot = Some(value);
            }
        }

        self.generated += 1;
        record
    }

    /// Pull a raw value for a text field and apply that field's policy.
    fn text_value(&mut self, field: ContactField) -> String {
        let raw = match field {
            ContactField::FirstName => self.source.first_name(),
            ContactField::LastName => self.source.last_name(),
            ContactField::Email => self.source.email(),
            ContactField::Phone => self.source.phone_number(),
            ContactField::StreetAddress1 => self.source.street_address(),
            ContactField::StreetAddress2 => self.source.secondary_address(),
            ContactField::City => self.source.city(),
            ContactField::StateProvince => self.source.state(),
            ContactField::PostalCode => self.source.postal_code(),
            ContactField::Country => self.source.country(),
            ContactField::DateOfBirth => return String::new(),
        };

        match field {
            ContactField::Email => sanitize_email(raw),
            ContactField::Phone => sanitize_phone(&raw),
            other => truncate(raw, other.max_length()),
        }
    }
}

impl ContactGenerator<FakerSource<StdRng>, StdRng> {
    /// Reproducible generator: the same seed always yields the same records.
    pub fn seeded(probabilities: FieldProbabilities, seed: u64) -> Self {
        Self::new(
            probabilities,
            FakerSource::new(StdRng::seed_from_u64(seed)),
            StdRng::seed_from_u64(seed ^ INCLUSION_SEED_OFFSET),
        )
    }

    /// Generator seeded from OS entropy.
    pub fn from_entropy(probabilities: FieldProbabilities) -> Self {
        Self::new(
            probabilities,
            FakerSource::new(StdRng::from_entropy()),
            StdRng::from_entropy(),
        )
    }
}

impl<S: FakeSource, R: Rng> RecordSource for ContactGenerator<S, R> {
    fn next_record(&mut self) -> ContactRecord {
        ContactGenerator::next_record(self)
    }
}

/// Keep at most `max` characters.
fn truncate(value: String, max: Option<usize>) -> String {
    match max {
        Some(max) if value.chars().count() > max => value.chars().take(max).collect(),
        _ => value,
    }
}

fn sanitize_email(raw: String) -> String {
    let email = truncate(raw, ContactField::Email.max_length());
    if email.contains('@') {
        email
    } else {
        FALLBACK_EMAIL.to_string()
    }
}

fn sanitize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    truncate(digits, ContactField::Phone.max_length())
}
