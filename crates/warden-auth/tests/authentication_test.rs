//! Authentication flows over the in-memory store with a controllable clock.

use std::sync::Arc;

use chrono::{Duration, Utc};

use warden_auth::{AuthenticationService, CredentialStore};
use warden_core::config::AuthConfig;
use warden_core::{Clock, ErrorKind, ManualClock};
use warden_database::MemoryStore;
use warden_database::repositories::UserRepository;
use warden_entity::user::UpdateUser;

struct Harness {
    auth: AuthenticationService,
    store: MemoryStore,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    harness_with(AuthConfig::default())
}

fn harness_with(config: AuthConfig) -> Harness {
    let config = AuthConfig {
        kdf_memory_kib: 1024,
        kdf_iterations: 1,
        ..config
    };
    let store = MemoryStore::seeded();
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let auth = AuthenticationService::new(
        &config,
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        CredentialStore::new(&config).unwrap(),
        clock.clone(),
    );
    Harness { auth, store, clock }
}

#[tokio::test]
async fn test_end_to_end_session_lifecycle() {
    let h = harness();

    let profile = h.auth.register("a@x.com", "secret1", "A").await.unwrap();
    let payload = serde_json::to_value(&profile).unwrap();
    assert!(payload.get("password_hash").is_none());
    assert_eq!(payload["email"], "a@x.com");

    let login = h.auth.login("a@x.com", "secret1").await.unwrap();
    assert_eq!(login.user.id, profile.id);

    let err = h.auth.login("a@x.com", "wrong").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCredentials);

    let rotated = h.auth.refresh(&login.tokens.refresh_token).await.unwrap();
    assert_ne!(rotated.refresh_token, login.tokens.refresh_token);
    let err = h.auth.refresh(&login.tokens.refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenRevoked);

    h.auth.logout(profile.id).await.unwrap();
    let err = h.auth.refresh(&rotated.refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenRevoked);
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_look_the_same() {
    let h = harness();
    h.auth.register("a@x.com", "secret1", "A").await.unwrap();

    let unknown = h.auth.login("nobody@x.com", "secret1").await.unwrap_err();
    let wrong = h.auth.login("a@x.com", "secret2").await.unwrap_err();

    assert_eq!(unknown.kind, ErrorKind::InvalidCredentials);
    assert_eq!(unknown.kind, wrong.kind);
    assert_eq!(unknown.message, wrong.message);
}

#[tokio::test]
async fn test_inactive_account_checked_after_password() {
    let h = harness();
    let profile = h.auth.register("a@x.com", "secret1", "A").await.unwrap();
    h.store
        .update(
            profile.id,
            &UpdateUser {
                is_active: Some(false),
                ..UpdateUser::default()
            },
        )
        .await
        .unwrap();

    let wrong = h.auth.login("a@x.com", "nope").await.unwrap_err();
    assert_eq!(wrong.kind, ErrorKind::InvalidCredentials);

    let right = h.auth.login("a@x.com", "secret1").await.unwrap_err();
    assert_eq!(right.kind, ErrorKind::AccountInactive);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let h = harness();
    h.auth.register("a@x.com", "secret1", "A").await.unwrap();

    let err = h.auth.register("a@x.com", "secret2", "B").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::EmailTaken);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let h = harness();
    let err = h.auth.register("a@x.com", "12345", "A").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_has_one_winner() {
    let h = harness();

    let a = {
        let auth = h.auth.clone();
        tokio::spawn(async move { auth.register("race@x.com", "secret1", "A").await })
    };
    let b = {
        let auth = h.auth.clone();
        tokio::spawn(async move { auth.register("race@x.com", "secret1", "B").await })
    };
    let (a, b) = tokio::join!(a, b);
    let results = [a.unwrap(), b.unwrap()];

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let taken = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.kind == ErrorKind::EmailTaken))
        .count();
    assert_eq!(successes, 1);
    assert_eq!(taken, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rotation_is_single_use() {
    let h = harness();
    h.auth.register("a@x.com", "secret1", "A").await.unwrap();
    let login = h.auth.login("a@x.com", "secret1").await.unwrap();

    let attempts = (0..2).map(|_| {
        let auth = h.auth.clone();
        let token = login.tokens.refresh_token.clone();
        tokio::spawn(async move { auth.refresh(&token).await })
    });
    let results: Vec<_> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let revoked = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.kind == ErrorKind::TokenRevoked))
        .count();
    assert_eq!(successes, 1);
    assert_eq!(revoked, 1);
}

#[tokio::test]
async fn test_expired_refresh_token() {
    let h = harness();
    h.auth.register("a@x.com", "secret1", "A").await.unwrap();
    let login = h.auth.login("a@x.com", "secret1").await.unwrap();

    h.clock.advance(Duration::days(7) + Duration::seconds(1));

    let err = h.auth.refresh(&login.tokens.refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenExpired);

    let record = h
        .auth
        .ledger()
        .lookup(&login.tokens.refresh_token)
        .await
        .unwrap()
        .unwrap();
    assert!(!record.revoked);
}

#[tokio::test]
async fn test_refresh_expiry_is_seven_days_from_issue() {
    let h = harness();
    h.auth.register("a@x.com", "secret1", "A").await.unwrap();
    let login = h.auth.login("a@x.com", "secret1").await.unwrap();

    assert_eq!(
        login.tokens.refresh_expires_at,
        h.clock.now() + Duration::days(7)
    );
}

#[tokio::test]
async fn test_oversized_refresh_lifetime_fails_login_cleanly() {
    let h = harness_with(AuthConfig {
        refresh_token_ttl_days: 200_000_000,
        ..AuthConfig::default()
    });
    h.auth.register("a@x.com", "secret1", "A").await.unwrap();

    let err = h.auth.login("a@x.com", "secret1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[tokio::test]
async fn test_ledger_revoke_is_idempotent_and_blocks_consume() {
    let h = harness();
    h.auth.register("a@x.com", "secret1", "A").await.unwrap();
    let login = h.auth.login("a@x.com", "secret1").await.unwrap();
    let token = login.tokens.refresh_token;
    let ledger = h.auth.ledger();

    ledger.revoke(&token).await.unwrap();
    ledger.revoke(&token).await.unwrap();
    assert!(ledger.lookup(&token).await.unwrap().unwrap().revoked);

    let err = ledger.consume(&token, h.clock.now()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenRevoked);

    ledger.revoke("not-a-token").await.unwrap();
}

#[tokio::test]
async fn test_unknown_refresh_token() {
    let h = harness();
    let err = h.auth.refresh("not-a-token").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn test_logout_without_tokens_is_ok() {
    let h = harness();
    let profile = h.auth.register("a@x.com", "secret1", "A").await.unwrap();
    h.auth.logout(profile.id).await.unwrap();
    h.auth.logout(uuid_v4()).await.unwrap();
}

#[tokio::test]
async fn test_profile_resolves_role_permissions() {
    let h = harness();
    let profile = h.auth.register("a@x.com", "secret1", "A").await.unwrap();
    assert!(profile.role.is_none());

    let admin = warden_database::repositories::RoleRepository::find_by_name(&h.store, "admin")
        .await
        .unwrap()
        .unwrap();
    h.store
        .update(
            profile.id,
            &UpdateUser {
                role_id: Some(Some(admin.id)),
                ..UpdateUser::default()
            },
        )
        .await
        .unwrap();

    let profile = h.auth.get_profile(profile.id).await.unwrap();
    let role = profile.role.unwrap();
    assert_eq!(role.role.name, "admin");
    assert!(role.permission_names().contains("users:delete"));

    let err = h.auth.get_profile(uuid_v4()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::UserNotFound);
}

fn uuid_v4() -> uuid::Uuid {
    uuid::Uuid::new_v4()
}
