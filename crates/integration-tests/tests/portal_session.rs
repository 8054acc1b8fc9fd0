use ip_auth_simple::StaticAuthProvider;
use ip_core::seed::{SEED_COMPANY_ID, SEED_MANAGER_ID, SEED_STUDENT_ID};
use ip_core::{InternshipStore, MockAuthProvider, PortalError, Role, Session};

#[tokio::test]
async fn seeded_accounts_drive_the_seeded_store() {
    let mut store = InternshipStore::seeded();
    let mut session = Session::new(StaticAuthProvider::with_mock_users().unwrap());

    let student = session.login("qadis@student.com", "password").await.unwrap();
    assert_eq!(student.id, SEED_STUDENT_ID);
    assert_eq!(student.role, Role::Student);
    store.show_interest_in_internship(SEED_STUDENT_ID).unwrap();
    session.logout();

    session.login("nauman@admin.com", "password").await.unwrap();
    assert_eq!(session.role(), Some(Role::Admin));
    let a = store
        .assign_student_to_company(SEED_STUDENT_ID, SEED_COMPANY_ID)
        .unwrap();
    session.logout();

    let manager_id = session
        .login("manager@company.com", "password")
        .await
        .unwrap()
        .id;
    assert_eq!(manager_id, SEED_MANAGER_ID);
    let company = store.company_for_manager(manager_id).unwrap();
    assert_eq!(company.id, SEED_COMPANY_ID);

    let active = store.active_company_assignments(company.id);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, a.id);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let mut session = Session::new(StaticAuthProvider::with_mock_users().unwrap());
    let err = session
        .login("qadis@student.com", "letmein")
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::Unauthorized(_)));
    assert!(!session.is_authenticated());
}

#[test]
fn mocked_provider_is_consulted_once_per_login() {
    let mut auth = MockAuthProvider::new();
    auth.expect_authenticate().times(2).returning(|_, _| Ok(None));

    let mut session = Session::new(auth);
    tokio_test::block_on(async {
        assert!(session.login("a@b.c", "x").await.is_err());
        assert!(session.login("a@b.c", "y").await.is_err());
    });
    assert!(session.user().is_none());
}
