//! The fixed set of contact fields and their column metadata.

use std::fmt;
use std::str::FromStr;

/// Storage type of a contact column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Variable-length text with a maximum length in characters.
    VarChar { length: u32 },
    /// Calendar date.
    Date,
}

/// One column of a contact record.
///
/// The declaration order is the column order used by every sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactField {
    FirstName,
    LastName,
    DateOfBirth,
    Email,
    Phone,
    StreetAddress1,
    StreetAddress2,
    City,
    StateProvince,
    PostalCode,
    Country,
}

impl ContactField {
    /// All fields in column order.
    pub const ALL: [ContactField; 11] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::DateOfBirth,
        ContactField::Email,
        ContactField::Phone,
        ContactField::StreetAddress1,
        ContactField::StreetAddress2,
        ContactField::City,
        ContactField::StateProvince,
        ContactField::PostalCode,
        ContactField::Country,
    ];

    /// Column name, also used as the key in the `[probabilities]` section.
    pub fn name(self) -> &'static str {
        match self {
            ContactField::FirstName => "first_name",
            ContactField::LastName => "last_name",
            ContactField::DateOfBirth => "date_of_birth",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::StreetAddress1 => "street_address_1",
            ContactField::StreetAddress2 => "street_address_2",
            ContactField::City => "city",
            ContactField::StateProvince => "state_province",
            ContactField::PostalCode => "postal_code",
            ContactField::Country => "country",
        }
    }

    /// Maximum number of characters a generated value may hold.
    ///
    /// `None` for `date_of_birth`, which is not a string.
    pub fn max_length(self) -> Option<usize> {
        match self {
            ContactField::FirstName | ContactField::LastName => Some(20),
            ContactField::DateOfBirth => None,
            ContactField::Email => Some(255),
            ContactField::Phone => Some(10),
            ContactField::StreetAddress1 | ContactField::StreetAddress2 => Some(40),
            ContactField::City => Some(40),
            ContactField::StateProvince => Some(20),
            ContactField::PostalCode => Some(10),
            ContactField::Country => Some(40),
        }
    }

    /// Column type used by the relational sinks.
    pub fn column_type(self) -> ColumnType {
        match self {
            ContactField::DateOfBirth => ColumnType::Date,
            _ => ColumnType::VarChar { length: 255 },
        }
    }

    /// Column names in order, as written in the tabular header row.
    pub fn column_names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|f| f.name())
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContactField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown contact field '{s}'"))
    }
}
