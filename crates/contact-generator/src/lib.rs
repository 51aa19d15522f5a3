//! Fake contact generator for contact-synth.
//!
//! This crate provides the [`ContactGenerator`], which produces one
//! [`ContactRecord`](contact_core::ContactRecord) per call. For every field it
//! independently decides, with the configured inclusion probability, whether
//! to populate the field from a [`FakeSource`] or leave it absent.
//!
//! # Architecture
//!
//! ```text
//!  FieldProbabilities      FakeSource (fake crate)     inclusion RNG
//!          │                        │                        │
//!          └────────────┬───────────┴────────────────────────┘
//!                       ▼
//!             ┌───────────────────┐
//!             │ ContactGenerator  │  per field: draw → fill → truncate
//!             └─────────┬─────────┘
//!                       ▼
//!                ContactRecord
//! ```
//!
//! Both sources of randomness are injected, so a seeded generator is fully
//! reproducible:
//!
//! ```rust
//! use contact_core::FieldProbabilities;
//! use contact_generator::ContactGenerator;
//!
//! let probabilities = FieldProbabilities::new([("email", 0.5)]).unwrap();
//! let mut gen1 = ContactGenerator::seeded(probabilities.clone(), 42);
//! let mut gen2 = ContactGenerator::seeded(probabilities, 42);
//!
//! assert_eq!(gen1.next_record(), gen2.next_record());
//! ```

pub mod generator;
pub mod source;

pub use generator::{ContactGenerator, FALLBACK_EMAIL};
pub use source::{FakeSource, FakerSource};
