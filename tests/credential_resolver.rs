use std::sync::Arc;

use bazaar_core::application::error::{ApplicationError, INVALID_CREDENTIALS};
use bazaar_core::application::ports::security::PasswordHasher;
use bazaar_core::application::services::credentials::CredentialResolver;

mod support;

use support::{
    BrokenPasswordHasher, DEFAULT_PASSWORD, InMemoryUserRepo, StrictPasswordHasher, UserBuilder,
};

fn resolver(repo: InMemoryUserRepo) -> CredentialResolver {
    resolver_with(repo, Arc::new(StrictPasswordHasher))
}

fn resolver_with(repo: InMemoryUserRepo, hasher: Arc<dyn PasswordHasher>) -> CredentialResolver {
    CredentialResolver::new(Arc::new(repo), hasher)
}

fn assert_invalid_credentials(err: ApplicationError) {
    match err {
        ApplicationError::Unauthorized(msg) => assert_eq!(msg, INVALID_CREDENTIALS),
        other => panic!("expected invalid credentials, got {other:?}"),
    }
}

#[tokio::test]
async fn resolves_single_match_ignoring_case() {
    let repo = InMemoryUserRepo::with_users(vec![UserBuilder::new(1).email("Ada@Example.com").build()]);

    let user = resolver(repo)
        .resolve("  ada@EXAMPLE.com ", DEFAULT_PASSWORD)
        .await
        .expect("credentials should resolve");

    assert_eq!(user.id.0, 1);
    assert_eq!(user.email.as_str(), "Ada@example.com");
}

#[tokio::test]
async fn unknown_email_is_rejected() {
    let repo = InMemoryUserRepo::with_users(vec![UserBuilder::new(1).build()]);

    let err = resolver(repo)
        .resolve("nobody@example.com", DEFAULT_PASSWORD)
        .await
        .unwrap_err();

    assert_invalid_credentials(err);
}

#[tokio::test]
async fn emails_differing_only_in_case_are_ambiguous() {
    let repo = InMemoryUserRepo::with_users(vec![
        UserBuilder::new(1).email("dup@example.com").build(),
        UserBuilder::new(2).email("DUP@example.com").build(),
    ]);

    let err = resolver(repo)
        .resolve("dup@example.com", DEFAULT_PASSWORD)
        .await
        .unwrap_err();

    assert_invalid_credentials(err);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let repo = InMemoryUserRepo::with_users(vec![UserBuilder::new(1).build()]);

    let err = resolver(repo)
        .resolve("user1@example.com", "Not-The-Password-1")
        .await
        .unwrap_err();

    assert_invalid_credentials(err);
}

#[tokio::test]
async fn deactivated_account_is_rejected_even_with_right_password() {
    let repo = InMemoryUserRepo::with_users(vec![UserBuilder::new(1).inactive().build()]);

    let err = resolver(repo)
        .resolve("user1@example.com", DEFAULT_PASSWORD)
        .await
        .unwrap_err();

    assert_invalid_credentials(err);
}

#[tokio::test]
async fn unusable_stored_hash_is_treated_as_mismatch() {
    let repo = InMemoryUserRepo::with_users(vec![UserBuilder::new(1).build()]);

    let err = resolver_with(repo, Arc::new(BrokenPasswordHasher))
        .resolve("user1@example.com", DEFAULT_PASSWORD)
        .await
        .unwrap_err();

    assert_invalid_credentials(err);
}

#[tokio::test]
async fn blank_input_is_rejected_without_lookup() {
    // a failing repository proves no lookup happens
    let resolver = resolver(InMemoryUserRepo::failing());

    assert_invalid_credentials(resolver.resolve("", DEFAULT_PASSWORD).await.unwrap_err());
    assert_invalid_credentials(resolver.resolve("   ", DEFAULT_PASSWORD).await.unwrap_err());
    assert_invalid_credentials(resolver.resolve("user1@example.com", "").await.unwrap_err());
}

#[tokio::test]
async fn repository_failure_propagates() {
    let err = resolver(InMemoryUserRepo::failing())
        .resolve("user1@example.com", DEFAULT_PASSWORD)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ApplicationError::Infrastructure(_)),
        "unexpected error: {err:?}"
    );
}
