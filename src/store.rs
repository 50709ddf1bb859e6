// Flat-file record store.
//
// All accounts live in memory as an ordered `Vec` and are written back to a
// single pretty-printed JSON file on every save. Saves replace the whole
// file; there is no locking, so two processes pointed at the same file race
// and the last writer wins. Run one instance per records file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::editor;
use crate::error::{NotFoundError, PersistenceError, RecordError};
use crate::model::{Account, RecordField};

#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    accounts: Vec<Account>,
}

/// Read every account from `path`. A missing file is a first run and yields
/// an empty list; anything else that goes wrong is an error. Unlike a plain
/// "unreadable means empty" rule, an existing but unreadable or corrupt file
/// fails here, so the next save cannot overwrite it.
pub fn load(path: &Path) -> Result<Vec<Account>, PersistenceError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No records file at {:?}, starting with an empty store", path);
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(PersistenceError::Read {
                path: path.to_owned(),
                source,
            })
        }
    };
    let accounts: Vec<Account> =
        serde_json::from_str(&json).map_err(|source| PersistenceError::Parse {
            path: path.to_owned(),
            source,
        })?;
    debug!("Loaded {} accounts from {:?}", accounts.len(), path);
    Ok(accounts)
}

/// Overwrite `path` with `accounts`, creating parent directories as needed.
pub fn save(path: &Path, accounts: &[Account]) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
            path: parent.to_owned(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(accounts)
        .map_err(|source| PersistenceError::Serialise { source })?;
    std::fs::write(path, json).map_err(|source| PersistenceError::Write {
        path: path.to_owned(),
        source,
    })?;
    debug!("Saved {} accounts to {:?}", accounts.len(), path);
    Ok(())
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>, accounts: Vec<Account>) -> Self {
        RecordStore {
            path: path.into(),
            accounts,
        }
    }

    /// Load the store backing `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let accounts = load(&path)?;
        Ok(RecordStore { path, accounts })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        save(&self.path, &self.accounts)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains_username(&self, username: &str) -> bool {
        self.accounts.iter().any(|a| a.username == username)
    }

    pub fn index_of(&self, username: &str) -> Result<usize, NotFoundError> {
        self.accounts
            .iter()
            .position(|a| a.username == username)
            .ok_or_else(|| NotFoundError::Username {
                username: username.to_string(),
            })
    }

    pub fn find_by_username(&self, username: &str) -> Result<&Account, NotFoundError> {
        self.index_of(username).map(|i| &self.accounts[i])
    }

    pub fn get(&self, index: usize) -> Result<&Account, NotFoundError> {
        self.accounts
            .get(index)
            .ok_or(NotFoundError::Index { index })
    }

    /// Push a new account and return its index. Username uniqueness is
    /// checked by the signup validators before this point.
    pub fn append(&mut self, account: Account) -> usize {
        self.accounts.push(account);
        self.accounts.len() - 1
    }

    /// Append `entry` to one list field of the account at `index`.
    pub fn update(
        &mut self,
        index: usize,
        field: RecordField,
        entry: &str,
    ) -> Result<&Account, RecordError> {
        let account = self
            .accounts
            .get_mut(index)
            .ok_or(NotFoundError::Index { index })?;
        editor::append_to_field(account, field, entry)?;
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{City, DateOfBirth, Role};
    use tempfile::TempDir;

    fn account(username: &str) -> Account {
        Account {
            username: username.into(),
            password_hash: "hash".into(),
            password_salt: "salt".into(),
            full_name: "Madeline Yval".into(),
            date_of_birth: DateOfBirth {
                day: 1,
                month: 4,
                year: 1968,
            },
            address: "23 Churchill Road".into(),
            city: City::Nelson,
            conditions: vec![],
            prescriptions: vec![],
            role: Role::Provider,
        }
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("nope.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = RecordStore::open(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::Parse { .. }));
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("records.json");
        let accounts = vec![account("b"), account("a"), account("c")];
        save(&path, &accounts).unwrap();
        assert_eq!(load(&path).unwrap(), accounts);
    }

    #[test]
    fn save_of_loaded_content_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        save(&path, &[account("a"), account("b")]).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();
        save(&path, &load(&path).unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
        assert!(before.contains("\n  {\n    \"username\""));
    }

    #[test]
    fn lookup_by_username() {
        let mut store = RecordStore::new("unused.json", vec![]);
        store.append(account("a"));
        let idx = store.append(account("b"));
        assert_eq!(idx, 1);
        assert_eq!(store.find_by_username("b").unwrap().username, "b");
        assert_eq!(
            store.find_by_username("zed").unwrap_err(),
            NotFoundError::Username {
                username: "zed".into()
            }
        );
    }

    #[test]
    fn update_out_of_range_is_not_found() {
        let mut store = RecordStore::new("unused.json", vec![account("a")]);
        let err = store.update(3, RecordField::Conditions, "Asthma").unwrap_err();
        assert!(matches!(
            err,
            RecordError::NotFound(NotFoundError::Index { index: 3 })
        ));
    }

    #[test]
    fn update_appends_to_the_chosen_field() {
        let mut store = RecordStore::new("unused.json", vec![account("a")]);
        store.update(0, RecordField::Prescriptions, "Salbutamol").unwrap();
        assert_eq!(store.get(0).unwrap().prescriptions, vec!["Salbutamol"]);
        assert!(store.get(0).unwrap().conditions.is_empty());
    }
}
