// Data model for account records. These types are what gets written to the
// records file, so field names are kept stable via serde's camelCase rename.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried by an account and copied into the session on login.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Patient,
    Provider,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Patient, Role::Provider];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Provider => "Provider",
        }
    }
}

/// Fixed set of towns an account can live in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Nelson,
    Stoke,
    Richmond,
    Motueka,
    Brightwater,
    Wakefield,
}

impl City {
    pub const ALL: [City; 6] = [
        City::Nelson,
        City::Stoke,
        City::Richmond,
        City::Motueka,
        City::Brightwater,
        City::Wakefield,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            City::Nelson => "Nelson",
            City::Stoke => "Stoke",
            City::Richmond => "Richmond",
            City::Motueka => "Motueka",
            City::Brightwater => "Brightwater",
            City::Wakefield => "Wakefield",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Date of birth as entered (`dd.mm.yyyy`). Only range-checked, not
/// calendar-checked: 31.2.2000 is accepted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOfBirth {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl fmt::Display for DateOfBirth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.day, self.month, self.year)
    }
}

/// The two append-only list fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Conditions,
    Prescriptions,
}

impl RecordField {
    pub const ALL: [RecordField; 2] = [RecordField::Conditions, RecordField::Prescriptions];

    pub fn label(&self) -> &'static str {
        match self {
            RecordField::Conditions => "Conditions",
            RecordField::Prescriptions => "Prescriptions",
        }
    }
}

/// One patient's or provider's stored profile plus medical lists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub username: String,
    /// Argon2id hash in PHC format, never plaintext
    pub password_hash: String,
    pub password_salt: String,
    pub full_name: String,
    pub date_of_birth: DateOfBirth,
    pub address: String,
    pub city: City,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub prescriptions: Vec<String>,
    pub role: Role,
}

impl Account {
    pub fn field(&self, field: RecordField) -> &[String] {
        match field {
            RecordField::Conditions => &self.conditions,
            RecordField::Prescriptions => &self.prescriptions,
        }
    }

    pub(crate) fn field_mut(&mut self, field: RecordField) -> &mut Vec<String> {
        match field {
            RecordField::Conditions => &mut self.conditions,
            RecordField::Prescriptions => &mut self.prescriptions,
        }
    }
}
