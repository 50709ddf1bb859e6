// Record editing and the display projection of a record.

use serde::Serialize;

use crate::error::ValidationError;
use crate::model::{Account, City, DateOfBirth, RecordField, Role};

/// Everything about an account that may be shown to a user. Password hash
/// and salt have no field here.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary {
    pub username: String,
    pub full_name: String,
    pub date_of_birth: DateOfBirth,
    pub address: String,
    pub city: City,
    pub conditions: Vec<String>,
    pub prescriptions: Vec<String>,
    pub role: Role,
}

/// Append `entry` (trimmed) to the end of `field`. Blank entries are
/// rejected; existing entries are never touched.
pub fn append_to_field(
    account: &mut Account,
    field: RecordField,
    entry: &str,
) -> Result<(), ValidationError> {
    let entry = validate_entry(field, entry)?;
    account.field_mut(field).push(entry.to_string());
    Ok(())
}

pub fn validate_entry(field: RecordField, entry: &str) -> Result<&str, ValidationError> {
    let entry = entry.trim();
    if entry.is_empty() {
        return Err(ValidationError::new(
            field_name(field),
            format!("Please enter a {}", singular(field)),
        ));
    }
    Ok(entry)
}

pub fn view_summary(account: &Account) -> RecordSummary {
    RecordSummary {
        username: account.username.clone(),
        full_name: account.full_name.clone(),
        date_of_birth: account.date_of_birth,
        address: account.address.clone(),
        city: account.city,
        conditions: account.conditions.clone(),
        prescriptions: account.prescriptions.clone(),
        role: account.role,
    }
}

fn field_name(field: RecordField) -> &'static str {
    match field {
        RecordField::Conditions => "conditions",
        RecordField::Prescriptions => "prescriptions",
    }
}

fn singular(field: RecordField) -> &'static str {
    match field {
        RecordField::Conditions => "condition",
        RecordField::Prescriptions => "prescription",
    }
}
