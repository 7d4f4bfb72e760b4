//! Domain tests for user IDs, roles and identities.

use crate::identity::domain::{
    Cohort, Credential, Identity, IdentityDomainError, Role, User, UserId,
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("26STD0001", Role::Student)]
#[case(" 26men007 ", Role::Mentor)]
#[case("STD12", Role::Student)]
fn implied_role_ignores_cohort_digits(#[case] raw: &str, #[case] expected: Role) {
    let user_id = UserId::new(raw).expect("valid user ID");

    assert_eq!(user_id.implied_role(), Ok(expected));
}

#[rstest]
#[case("", IdentityDomainError::EmptyUserId)]
#[case("   ", IdentityDomainError::EmptyUserId)]
#[case("26-STD-0001", IdentityDomainError::InvalidUserId("26-STD-0001".to_owned()))]
fn malformed_user_ids_are_rejected(#[case] raw: &str, #[case] expected: IdentityDomainError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[test]
fn unknown_marker_has_no_role() {
    let user_id = UserId::new("26ADM0001").expect("well-formed user ID");

    assert!(matches!(
        user_id.implied_role(),
        Err(IdentityDomainError::UnknownRolePrefix(_))
    ));
    assert_eq!(user_id.sequence(), None);
}

#[test]
fn allocation_pads_sequence_and_prefixes_cohort() {
    let cohort = Cohort::new(7).expect("valid cohort");
    let user_id = UserId::allocate(Role::Student, cohort, 42);

    assert_eq!(user_id.as_str(), "07STD0042");
    assert_eq!(user_id.sequence(), Some(42));
    assert_eq!(UserId::prefix(Role::Mentor, Cohort::DEFAULT), "26MEN");
}

#[test]
fn cohort_above_two_digits_is_rejected() {
    assert_eq!(Cohort::new(100), Err(IdentityDomainError::InvalidCohort(100)));
}

#[test]
fn user_creation_rejects_prefix_disagreeing_with_role() {
    let user_id = UserId::new("26STD0001").expect("valid user ID");
    let credential = Credential::new("secret").expect("valid credential");

    let result = User::new(user_id, Role::Mentor, credential, &DefaultClock);

    assert!(matches!(
        result,
        Err(IdentityDomainError::RolePrefixMismatch {
            role: Role::Mentor,
            ..
        })
    ));
}

#[test]
fn credential_debug_output_is_redacted() {
    let credential = Credential::new("hunter2").expect("valid credential");

    assert!(!format!("{credential:?}").contains("hunter2"));
    assert!(credential.matches("hunter2"));
}

#[test]
fn identity_require_rejects_other_role() {
    let identity = Identity::new(UserId::new("26STD0001").expect("valid"), Role::Student);

    assert!(identity.require_student().is_ok());
    assert!(matches!(
        identity.require_mentor(),
        Err(IdentityDomainError::RoleNotPermitted {
            actual: Role::Student,
            required: Role::Mentor,
            ..
        })
    ));
}

#[rstest]
#[case("MENTOR", Role::Mentor)]
#[case(" student ", Role::Student)]
fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(Role::try_from(raw), Ok(expected));
}
