//! Raw fake-value sources.

use chrono::{Datelike, NaiveDate};
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, SecondaryAddress, StateName, StreetName, ZipCode,
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;

/// Capability that yields plausible raw values for each contact field.
///
/// Values are returned as the source produces them; length limits and
/// per-field clean-up are applied by the generator.
pub trait FakeSource {
    fn first_name(&mut self) -> String;
    fn last_name(&mut self) -> String;
    fn date_of_birth(&mut self) -> NaiveDate;
    fn email(&mut self) -> String;
    fn phone_number(&mut self) -> String;
    fn street_address(&mut self) -> String;
    fn secondary_address(&mut self) -> String;
    fn city(&mut self) -> String;
    fn state(&mut self) -> String;
    fn postal_code(&mut self) -> String;
    fn country(&mut self) -> String;
}

/// [`FakeSource`] backed by the `fake` crate's English locale.
pub struct FakerSource<R> {
    rng: R,
}

impl<R: Rng> FakerSource<R> {
    /// Create a source drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

/// Earliest and latest generated date of birth.
fn birth_date_bounds() -> (NaiveDate, NaiveDate) {
    let earliest = NaiveDate::from_ymd_opt(1940, 1, 1).unwrap_or(NaiveDate::MIN);
    let latest = NaiveDate::from_ymd_opt(2005, 12, 31).unwrap_or(NaiveDate::MAX);
    (earliest, latest)
}

impl<R: Rng> FakeSource for FakerSource<R> {
    fn first_name(&mut self) -> String {
        FirstName().fake_with_rng(&mut self.rng)
    }

    fn last_name(&mut self) -> String {
        LastName().fake_with_rng(&mut self.rng)
    }

    fn date_of_birth(&mut self) -> NaiveDate {
        let (earliest, latest) = birth_date_bounds();
        let day = self
            .rng
            .gen_range(earliest.num_days_from_ce()..=latest.num_days_from_ce());
        NaiveDate::from_num_days_from_ce_opt(day).unwrap_or(earliest)
    }

    fn email(&mut self) -> String {
        SafeEmail().fake_with_rng(&mut self.rng)
    }

    fn phone_number(&mut self) -> String {
        PhoneNumber().fake_with_rng(&mut self.rng)
    }

    fn street_address(&mut self) -> String {
        let number: String = BuildingNumber().fake_with_rng(&mut self.rng);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        format!("{number} {street}")
    }

    fn secondary_address(&mut self) -> String {
        SecondaryAddress().fake_with_rng(&mut self.rng)
    }

    fn city(&mut self) -> String {
        CityName().fake_with_rng(&mut self.rng)
    }

    fn state(&mut self) -> String {
        StateName().fake_with_rng(&mut self.rng)
    }

    fn postal_code(&mut self) -> String {
        ZipCode().fake_with_rng(&mut self.rng)
    }

    fn country(&mut self) -> String {
        CountryName().fake_with_rng(&mut self.rng)
    }
}
