use configs::AppConfig;
use ip_auth_simple::StaticAuthProvider;
use ip_core::{Role, Session};
use secrecy::ExposeSecret;

const CONFIG: &str = r#"
[portal]
seed_mock_data = false

[[auth.users]]
id = "01910000-0000-7000-8000-0000000000aa"
name = "Ramish Wazir"
email = "ramish@student.com"
password = "flutter-rocks"
role = "student"
reg_no = "2021-Arid-4575"
technology = "Flutter"
"#;

#[tokio::test]
async fn configured_users_replace_the_demo_accounts() {
    let cfg = AppConfig::from_toml(CONFIG).unwrap();
    assert!(!cfg.portal.seed_mock_data);

    let auth = StaticAuthProvider::from_plaintext(
        cfg.auth
            .users
            .iter()
            .map(|u| (u.to_user(), u.password.expose_secret())),
    )
    .unwrap();
    assert_eq!(auth.len(), 1);

    let mut session = Session::new(auth);
    let user = session
        .login("ramish@student.com", "flutter-rocks")
        .await
        .unwrap();
    assert_eq!(user.role, Role::Student);
    assert_eq!(user.reg_no.as_deref(), Some("2021-Arid-4575"));

    assert!(session.login("qadis@student.com", "password").await.is_err());
}
