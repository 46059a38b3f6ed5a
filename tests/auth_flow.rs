use solveit::auth::{self, SessionStore};
use solveit::store::UserStore;
use solveit::{Error, StorageConfig};
use tempfile::TempDir;

fn setup() -> (TempDir, UserStore) {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::new(dir.path());
    let store = UserStore::open(&config).unwrap();
    (dir, store)
}

#[test]
fn signup_login_logout_round_trip() {
    let (_dir, users) = setup();
    let sessions = SessionStore::new();

    let user = auth::signup(&users, "ana", "ana@example.com", "secret1").unwrap();
    let token = sessions.create(&user.id);
    assert_eq!(sessions.resolve(&token), Some(user.id.clone()));

    sessions.revoke(&token);
    assert_eq!(sessions.resolve(&token), None);

    // the account survives the session
    let again = auth::login(&users, "ana", "secret1").unwrap();
    assert_eq!(again.id, user.id);
}

#[test]
fn second_signup_with_same_username_leaves_one_record() {
    let (_dir, users) = setup();
    auth::signup(&users, "ana", "ana@example.com", "secret1").unwrap();

    let err = auth::signup(&users, "ana", "elsewhere@example.com", "secret1").unwrap_err();
    assert!(matches!(err, Error::UsernameTaken));

    let all = users.load_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].email, "ana@example.com");
}

#[test]
fn stored_hash_is_opaque_and_salted() {
    let (_dir, users) = setup();
    auth::signup(&users, "ana", "ana@example.com", "secret1").unwrap();
    auth::signup(&users, "bob", "bob@example.com", "secret1").unwrap();

    let all = users.load_all();
    assert!(all.iter().all(|u| !u.password_hash.contains("secret1")));
    // same password, different salt, different digest
    assert_ne!(all[0].password_hash, all[1].password_hash);
}

#[test]
fn password_change_takes_effect_for_the_next_login() {
    let (_dir, users) = setup();
    let user = auth::signup(&users, "ana", "ana@example.com", "secret1").unwrap();

    auth::change_password(&users, &user, "secret1", "secret2").unwrap();

    assert!(matches!(
        auth::login(&users, "ana", "secret1"),
        Err(Error::InvalidCredentials)
    ));
    assert!(auth::login(&users, "ana", "secret2").is_ok());
}
