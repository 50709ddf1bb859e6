// Account creation and login.
//
// The validators here are pure and field-scoped so the UI can re-prompt a
// single field until it passes. `sign_up` re-runs all of them, so a form
// that skipped the prompts still cannot store an invalid account.
//
// Passwords are hashed with Argon2id and a random per-account salt.

use argon2::{
    password_hash::{rand_core, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{info, warn};

use crate::error::{AuthError, SignUpError, ValidationError};
use crate::model::{Account, City, DateOfBirth, Role};
use crate::store::RecordStore;

pub const MIN_BIRTH_YEAR: u32 = 1910;
pub const MAX_BIRTH_YEAR: u32 = 2024;

/// Runtime identity of the authenticated user. Lives only as long as the
/// process; nothing about it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub account: usize,
    pub role: Role,
}

/// Raw answers collected by the signup flow.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub full_name: String,
    pub date_of_birth: String,
    pub address: String,
    pub city: City,
    pub conditions: Vec<String>,
    pub prescriptions: Vec<String>,
    pub username: String,
    pub password: String,
    pub role: Role,
}

pub fn validate_full_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("fullName", "Please enter a name"));
    }
    Ok(())
}

pub fn validate_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("address", "Please enter an address"));
    }
    Ok(())
}

/// Parse `dd.mm.yyyy`. Day 1-31, month 1-12, year 1910-2024; no check that
/// the day exists in that month.
pub fn parse_date_of_birth(value: &str) -> Result<DateOfBirth, ValidationError> {
    let invalid = || {
        ValidationError::new(
            "dateOfBirth",
            "The provided date is invalid... Try again.",
        )
    };
    let value = value.trim();
    if !(8..=10).contains(&value.len()) {
        return Err(invalid());
    }
    let parts: Vec<u32> = value
        .split('.')
        .map(|p| p.parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid())?;
    let [day, month, year] = parts[..] else {
        return Err(invalid());
    };
    if !(1..=31).contains(&day)
        || !(1..=12).contains(&month)
        || !(MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&year)
    {
        return Err(invalid());
    }
    Ok(DateOfBirth {
        day: day as u8,
        month: month as u8,
        year: year as u16,
    })
}

/// Usernames are compared and stored trimmed.
pub fn validate_new_username(store: &RecordStore, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(
            "username",
            "This username is not long enough",
        ));
    }
    if store.contains_username(value) {
        return Err(ValidationError::new(
            "username",
            "This username is already taken",
        ));
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("password", "Please enter a password"));
    }
    Ok(())
}

/// Split a comma separated answer into trimmed, non-blank entries.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Hash a password with Argon2id. Returns `(phc_hash, salt)`.
pub fn hash_password(password: &str) -> Result<(String, String), AuthError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashingFailed {
            reason: e.to_string(),
        })?
        .to_string();
    Ok((hash, salt.as_str().to_string()))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| {
        warn!("Stored password hash is malformed: {}", e);
        AuthError::BadPassword
    })?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::BadPassword)
}

/// Validate the form, hash the password, append the account and open a
/// session on it. The caller is responsible for saving the store.
pub fn sign_up(store: &mut RecordStore, form: SignUpForm) -> Result<Session, SignUpError> {
    validate_full_name(&form.full_name)?;
    let date_of_birth = parse_date_of_birth(&form.date_of_birth)?;
    validate_address(&form.address)?;
    validate_new_username(store, &form.username)?;
    validate_password(&form.password)?;

    let (password_hash, password_salt) = hash_password(&form.password)?;
    let account = Account {
        username: form.username.trim().to_string(),
        password_hash,
        password_salt,
        full_name: form.full_name.trim().to_string(),
        date_of_birth,
        address: form.address.trim().to_string(),
        city: form.city,
        conditions: clean(form.conditions),
        prescriptions: clean(form.prescriptions),
        role: form.role,
    };
    info!("Created {} account {}", account.role.label(), account.username);
    let role = account.role;
    let index = store.append(account);
    Ok(Session {
        account: index,
        role,
    })
}

fn clean(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Resolve a login username to its account index.
pub fn check_username(store: &RecordStore, username: &str) -> Result<usize, AuthError> {
    store
        .index_of(username.trim())
        .map_err(|_| AuthError::UnknownUser)
}

pub fn log_in(store: &RecordStore, username: &str, password: &str) -> Result<Session, AuthError> {
    let index = check_username(store, username).map_err(|e| {
        info!("Login attempt for unknown user {}", username);
        e
    })?;
    let account = &store.accounts()[index];
    verify_password(password, &account.password_hash).map_err(|e| {
        info!("Bad password for {}", username);
        e
    })?;
    info!("{} logged in", username);
    Ok(Session {
        account: index,
        role: account.role,
    })
}
