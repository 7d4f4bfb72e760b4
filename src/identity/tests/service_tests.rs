//! Service tests for registration and credential resolution.

use std::sync::Arc;

use crate::error::{ClassifyError, ErrorKind};
use crate::identity::{
    domain::{Cohort, Credential, PersistedUserData, Role, User, UserId},
    ports::UserDirectory,
    services::{IdentityError, IdentityResolver, RegisterUserRequest},
};
use crate::store::InMemoryStore;
use chrono::Utc;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestResolver = IdentityResolver<InMemoryStore, DefaultClock>;

struct Harness {
    store: Arc<InMemoryStore>,
    resolver: TestResolver,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let resolver = IdentityResolver::new(Arc::clone(&store), Arc::new(DefaultClock));
    Harness { store, resolver }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_user_resolves_with_stored_role(harness: Harness) {
    harness
        .resolver
        .register(RegisterUserRequest::new("26men001", Role::Mentor, "pw"))
        .await
        .expect("registration should succeed");

    let identity = harness
        .resolver
        .resolve("26MEN001", "pw")
        .await
        .expect("resolution should succeed");

    assert_eq!(identity.user_id().as_str(), "26MEN001");
    assert_eq!(identity.role(), Role::Mentor);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_with_disagreeing_prefix_is_invalid_input(harness: Harness) {
    let result = harness
        .resolver
        .register(RegisterUserRequest::new("26STD0001", Role::Mentor, "pw"))
        .await;

    let err = result.expect_err("prefix mismatch should be rejected");
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_registration_conflicts(harness: Harness) {
    let request = RegisterUserRequest::new("26STD0001", Role::Student, "pw");
    harness
        .resolver
        .register(request.clone())
        .await
        .expect("first registration should succeed");

    let err = harness
        .resolver
        .register(request)
        .await
        .expect_err("duplicate should be rejected");

    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[rstest]
#[case("26STD0001", "wrong", ErrorKind::Forbidden)]
#[case("26STD0099", "pw", ErrorKind::NotFound)]
#[case("26XYZ0001", "pw", ErrorKind::InvalidInput)]
#[case("", "pw", ErrorKind::InvalidInput)]
#[tokio::test(flavor = "multi_thread")]
async fn resolution_failures_are_classified(
    harness: Harness,
    #[case] user_id: &str,
    #[case] credential: &str,
    #[case] expected: ErrorKind,
) {
    harness
        .resolver
        .register(RegisterUserRequest::new("26STD0001", Role::Student, "pw"))
        .await
        .expect("registration should succeed");

    let err = harness
        .resolver
        .resolve(user_id, credential)
        .await
        .expect_err("resolution should fail");

    assert_eq!(err.kind(), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_role_disagreeing_with_prefix_conflicts(harness: Harness) {
    let legacy = User::from_persisted(PersistedUserData {
        user_id: UserId::new("26STD0005").expect("valid user ID"),
        role: Role::Mentor,
        credential: Credential::new("pw").expect("valid credential"),
        created_at: Utc::now(),
    });
    harness
        .store
        .register(&legacy)
        .await
        .expect("raw insert should succeed");

    let result = harness.resolver.resolve("26STD0005", "pw").await;

    assert!(matches!(
        result,
        Err(IdentityError::StoredRoleMismatch {
            stored: Role::Mentor,
            ..
        })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn allocation_continues_after_highest_sequence(harness: Harness) {
    let first = harness
        .resolver
        .allocate_user_id(Role::Student, Cohort::DEFAULT)
        .await
        .expect("allocation should succeed");
    assert_eq!(first.as_str(), "26STD0001");

    for raw in ["26STD0001", "26STD0007"] {
        harness
            .resolver
            .register(RegisterUserRequest::new(raw, Role::Student, "pw"))
            .await
            .expect("registration should succeed");
    }

    let next = harness
        .resolver
        .allocate_user_id(Role::Student, Cohort::DEFAULT)
        .await
        .expect("allocation should succeed");
    assert_eq!(next.as_str(), "26STD0008");
}
