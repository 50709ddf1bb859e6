// Guarded record operations. Each one authorizes against the policy first,
// then reads or edits, and mutating ones flush the store before returning.

use tracing::info;

use crate::auth::Session;
use crate::editor::{self, RecordSummary};
use crate::error::{RecordError, ValidationError};
use crate::model::RecordField;
use crate::policy::{self, Action};
use crate::store::RecordStore;

/// Resolve the account an action applies to: the session's own account, or
/// the account named by `username` for actions on other records. Actions
/// on other records require a username.
pub fn resolve_target(
    store: &RecordStore,
    session: &Session,
    action: Action,
    username: Option<&str>,
) -> Result<usize, RecordError> {
    if !action.targets_other() {
        return Ok(session.account);
    }
    match username.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => Ok(store.index_of(name)?),
        None => Err(ValidationError::new("username", "Please enter a username").into()),
    }
}

pub fn view_record(
    store: &RecordStore,
    session: &Session,
    target: usize,
    action: Action,
) -> Result<RecordSummary, RecordError> {
    policy::authorize(session, target, action)?;
    Ok(editor::view_summary(store.get(target)?))
}

/// Every record in store order.
pub fn view_all(store: &RecordStore, session: &Session) -> Result<Vec<RecordSummary>, RecordError> {
    (0..store.len())
        .map(|i| view_record(store, session, i, Action::ViewAll))
        .collect()
}

pub fn update_record(
    store: &mut RecordStore,
    session: &Session,
    target: usize,
    action: Action,
    field: RecordField,
    entry: &str,
) -> Result<RecordSummary, RecordError> {
    policy::authorize(session, target, action)?;
    let summary = editor::view_summary(store.update(target, field, entry)?);
    store.save()?;
    info!(
        "Account {} appended to {} of {}",
        session.account,
        field.label(),
        summary.username
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotFoundError;
    use crate::model::{Account, City, DateOfBirth, Role};
    use tempfile::TempDir;

    fn account(username: &str, role: Role) -> Account {
        Account {
            username: username.into(),
            password_hash: "hash".into(),
            password_salt: "salt".into(),
            full_name: username.to_uppercase(),
            date_of_birth: DateOfBirth {
                day: 1,
                month: 1,
                year: 1990,
            },
            address: "1 Main Road".into(),
            city: City::Stoke,
            conditions: vec![],
            prescriptions: vec![],
            role,
        }
    }

    fn store(dir: &TempDir) -> RecordStore {
        RecordStore::new(
            dir.path().join("records.json"),
            vec![
                account("doc", Role::Provider),
                account("pat", Role::Patient),
                account("other", Role::Patient),
            ],
        )
    }

    #[test]
    fn patient_cannot_update_another_record() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let session = Session {
            account: 1,
            role: Role::Patient,
        };
        let err = update_record(
            &mut store,
            &session,
            2,
            Action::UpdateOther,
            RecordField::Conditions,
            "Flu",
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::Denied(_)));
        assert!(!err.is_fatal());
        assert!(store.get(2).unwrap().conditions.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn update_is_saved_immediately() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let session = Session {
            account: 0,
            role: Role::Provider,
        };
        update_record(
            &mut store,
            &session,
            1,
            Action::UpdateOther,
            RecordField::Prescriptions,
            "Ibuprofen",
        )
        .unwrap();
        let reloaded = RecordStore::open(store.path()).unwrap();
        assert_eq!(reloaded.get(1).unwrap().prescriptions, vec!["Ibuprofen"]);
    }

    #[test]
    fn view_all_returns_every_record_for_providers_only() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let provider = Session {
            account: 0,
            role: Role::Provider,
        };
        let names: Vec<_> = view_all(&store, &provider)
            .unwrap()
            .into_iter()
            .map(|s| s.username)
            .collect();
        assert_eq!(names, vec!["doc", "pat", "other"]);

        let patient = Session {
            account: 1,
            role: Role::Patient,
        };
        assert!(matches!(
            view_all(&store, &patient),
            Err(RecordError::Denied(_))
        ));
    }

    #[test]
    fn unknown_target_username_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let provider = Session {
            account: 0,
            role: Role::Provider,
        };
        let err = resolve_target(&store, &provider, Action::ViewOther, Some("ghost")).unwrap_err();
        assert!(matches!(
            err,
            RecordError::NotFound(NotFoundError::Username { .. })
        ));
        assert_eq!(
            resolve_target(&store, &provider, Action::ViewOwn, Some("pat")).unwrap(),
            0
        );
        assert_eq!(
            resolve_target(&store, &provider, Action::ViewOther, Some(" pat ")).unwrap(),
            1
        );
    }

    #[test]
    fn other_target_without_username_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let provider = Session {
            account: 0,
            role: Role::Provider,
        };
        for name in [None, Some(""), Some("   ")] {
            let err = resolve_target(&store, &provider, Action::UpdateOther, name).unwrap_err();
            match err {
                RecordError::Validation(e) => assert_eq!(e.field, "username"),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }
}
