//! Tests for credential handling and grant selection.

use crate::reddit::Credentials;

#[test]
fn test_client_credentials_grant_without_user_pair() {
    let creds = Credentials {
        client_id: "cid".to_string(),
        client_secret: "sec".to_string(),
        username: None,
        password: None,
    };
    let form = creds.grant_form();
    assert_eq!(form, vec![("grant_type", "client_credentials".to_string())]);
}

#[test]
fn test_password_grant_with_user_pair() {
    let creds = Credentials {
        client_id: "cid".to_string(),
        client_secret: "sec".to_string(),
        username: Some("user".to_string()),
        password: Some("pass".to_string()),
    };
    let form = creds.grant_form();
    assert_eq!(form[0], ("grant_type", "password".to_string()));
    assert!(form.contains(&("username", "user".to_string())));
    assert!(form.contains(&("password", "pass".to_string())));
}

#[test]
fn test_lone_username_falls_back_to_client_credentials() {
    let creds = Credentials {
        client_id: "cid".to_string(),
        client_secret: "sec".to_string(),
        username: Some("user".to_string()),
        password: None,
    };
    assert_eq!(
        creds.grant_form(),
        vec![("grant_type", "client_credentials".to_string())]
    );
}
