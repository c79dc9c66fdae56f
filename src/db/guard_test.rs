//! Tests for the read-only statement guard.

use crate::db::guard::ensure_read_only;

#[test]
fn test_accepts_read_statements() {
    for sql in [
        "SELECT * FROM users",
        "select 1",
        "  WITH t AS (SELECT 1) SELECT * FROM t",
        "EXPLAIN SELECT * FROM users",
        "SHOW TABLES",
        "DESCRIBE users",
        "PRAGMA table_info(users)",
        "VALUES (1, 2)",
        "SELECT * FROM users;",
    ] {
        assert!(ensure_read_only(sql).is_ok(), "expected accept: {sql}");
    }
}

#[test]
fn test_rejects_destructive_statements() {
    for sql in [
        "DROP TABLE users",
        "DELETE FROM users",
        "UPDATE users SET name = 'x'",
        "INSERT INTO users VALUES (1)",
        "TRUNCATE users",
        "ALTER TABLE users ADD COLUMN x int",
        "CREATE TABLE t (id int)",
        "GRANT ALL ON users TO public",
    ] {
        let err = ensure_read_only(sql).unwrap_err();
        assert!(
            err.to_string().contains("not allowed"),
            "expected reject: {sql}"
        );
    }
}

#[test]
fn test_rejects_multiple_statements() {
    let err = ensure_read_only("SELECT 1; DROP TABLE users").unwrap_err();
    assert!(err.to_string().contains("multiple statements"));
}

#[test]
fn test_rejects_empty_and_non_keyword_input() {
    assert!(ensure_read_only("").is_err());
    assert!(ensure_read_only("   ").is_err());
    assert!(ensure_read_only("; ;").is_err());
    assert!(ensure_read_only("42").is_err());
}

#[test]
fn test_keyword_match_is_case_insensitive() {
    assert!(ensure_read_only("sElEcT 1").is_ok());
    assert!(ensure_read_only("dRoP TABLE t").is_err());
}
