//! Generated contact records.

use crate::field::ContactField;
use chrono::NaiveDate;
use serde::Serialize;
use std::borrow::Cow;

/// Date format used whenever a date of birth is rendered as text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single generated contact.
///
/// Every field is optional; `None` means the generator decided not to
/// populate it. Populated text fields are never empty. Field order matches
/// [`ContactField::ALL`], which is also the serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street_address_1: Option<String>,
    pub street_address_2: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl ContactRecord {
    /// Text value of a field, with the date of birth rendered as `YYYY-MM-DD`.
    pub fn get(&self, field: ContactField) -> Option<Cow<'_, str>> {
        if field == ContactField::DateOfBirth {
            return self
                .date_of_birth
                .map(|d| Cow::Owned(d.format(DATE_FORMAT).to_string()));
        }
        self.text(field).map(Cow::Borrowed)
    }

    /// Borrow a text field. Always `None` for `date_of_birth`.
    pub fn text(&self, field: ContactField) -> Option<&str> {
        let value = match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::DateOfBirth => return None,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::StreetAddress1 => &self.street_address_1,
            ContactField::StreetAddress2 => &self.street_address_2,
            ContactField::City => &self.city,
            ContactField::StateProvince => &self.state_province,
            ContactField::PostalCode => &self.postal_code,
            ContactField::Country => &self.country,
        };
        value.as_deref()
    }

    /// Mutable slot for a text field. `None` for `date_of_birth`.
    pub fn text_slot(&mut self, field: ContactField) -> Option<&mut Option<String>> {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::DateOfBirth => return None,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::StreetAddress1 => &mut self.street_address_1,
            ContactField::StreetAddress2 => &mut self.street_address_2,
            ContactField::City => &mut self.city,
            ContactField::StateProvince => &mut self.state_province,
            ContactField::PostalCode => &mut self.postal_code,
            ContactField::Country => &mut self.country,
        };
        Some(slot)
    }

    /// Whether the field was populated.
    pub fn is_present(&self, field: ContactField) -> bool {
        match field {
            ContactField::DateOfBirth => self.date_of_birth.is_some(),
            other => self.text(other).is_some(),
        }
    }
}

/// A supplier of contact records, pulled one at a time by a sink.
pub trait RecordSource {
    /// Produce the next record.
    fn next_record(&mut self) -> ContactRecord;
}

impl<T: RecordSource + ?Sized> RecordSource for Box<T> {
    fn next_record(&mut self) -> ContactRecord {
        (**self).next_record()
    }
}
