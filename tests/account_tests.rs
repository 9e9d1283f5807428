mod harness;

use std::sync::Arc;

use chrono::{Duration, Utc};
use harness::recording_notifier::RecordingNotifier;
use harness::temp_db::TempDb;
use seafood_api::adapter::outbound::sqlite::SqliteAccountStore;
use seafood_api::application::{AccountError, AccountService};
use seafood_api::domain::{NewUser, User};
use seafood_api::infrastructure::config::auth::AuthConfig;
use seafood_api::port::AccountStore;

fn store(db: &TempDb) -> SqliteAccountStore {
    SqliteAccountStore::new(db.pool().clone())
}

fn user(store: &SqliteAccountStore) -> User {
    store
        .create_user(NewUser {
            email: "ana@example.com",
            password_hash: "original-hash",
            name: "Ana",
        })
        .unwrap()
        .expect("fresh email")
}

fn service(store: SqliteAccountStore, notifier: &RecordingNotifier) -> AccountService {
    let auth = AuthConfig {
        bcrypt_cost: 4,
        ..AuthConfig::default()
    };
    AccountService::new(
        Arc::new(store),
        Arc::new(notifier.clone()),
        &auth,
        "test-signing-secret",
    )
}

#[test]
fn reset_token_can_only_be_claimed_once() {
    let db = TempDb::create();
    let store = store(&db);
    let ana = user(&store);
    let expires_at = Utc::now().naive_utc() + Duration::minutes(30);
    store.save_reset_token(ana.id, "tok-1", expires_at).unwrap();

    // Both redemptions read the token before either one commits.
    let first_read = store.find_reset_token("tok-1").unwrap().unwrap();
    let second_read = store.find_reset_token("tok-1").unwrap().unwrap();
    assert!(!first_read.used && !second_read.used);

    assert!(store.complete_reset(&first_read, "hash-a").unwrap());
    assert!(!store.complete_reset(&second_read, "hash-b").unwrap());

    let stored = store.find_user(ana.id).unwrap().unwrap();
    assert_eq!(stored.password_hash, "hash-a");
    assert!(store.find_reset_token("tok-1").unwrap().unwrap().used);
}

#[test]
fn redeemed_token_is_rejected_as_used() {
    let db = TempDb::create();
    let store = store(&db);
    let ana = user(&store);
    let expires_at = Utc::now().naive_utc() + Duration::minutes(30);
    store.save_reset_token(ana.id, "tok-2", expires_at).unwrap();
    let notifier = RecordingNotifier::new();
    let accounts = service(store, &notifier);

    accounts.reset_password("tok-2", "new-secret").unwrap();
    let err = accounts.reset_password("tok-2", "other-secret").unwrap_err();
    assert!(matches!(err, AccountError::ResetTokenUsed));
}

#[test]
fn expiry_is_reported_before_reuse() {
    let db = TempDb::create();
    let store = store(&db);
    let ana = user(&store);
    let expires_at = Utc::now().naive_utc() - Duration::minutes(5);
    store.save_reset_token(ana.id, "tok-3", expires_at).unwrap();
    let token = store.find_reset_token("tok-3").unwrap().unwrap();
    assert!(store.complete_reset(&token, "hash-a").unwrap());

    let notifier = RecordingNotifier::new();
    let err = service(store, &notifier)
        .reset_password("tok-3", "new-secret")
        .unwrap_err();
    assert!(matches!(err, AccountError::ResetTokenExpired));
    assert_eq!(notifier.len(), 0);
}
