use fieldgrid_demo::data::{filter_users, load_users, sample_users, DataError, Role, User};

fn names(users: &[User]) -> Vec<&str> {
    users.iter().map(|u| u.name.as_str()).collect()
}

#[test]
fn empty_query_keeps_everyone() {
    let users = sample_users();
    assert_eq!(filter_users(&users, ""), users);
}

#[test]
fn matches_name_ignoring_case() {
    let users = sample_users();
    assert_eq!(names(&filter_users(&users, "ALICE")), ["Alice Johnson"]);
    assert_eq!(names(&filter_users(&users, "smi")), ["Bob Smith"]);
}

#[test]
fn matches_email() {
    let users = sample_users();
    assert_eq!(names(&filter_users(&users, "cara@")), ["Cara Lee"]);
    assert_eq!(filter_users(&users, "example.com").len(), 3);
}

#[test]
fn no_match_is_empty() {
    assert!(filter_users(&sample_users(), "zed").is_empty());
}

#[test]
fn loads_users_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    std::fs::write(
        &path,
        r#"[{"id": 7, "name": "Dee Park", "email": "dee@example.com", "role": "Editor"}]"#,
    )
    .unwrap();

    let users = load_users(&path).unwrap();
    assert_eq!(users, [User::new(7, "Dee Park", "dee@example.com", Role::Editor)]);
}

#[test]
fn load_reports_missing_and_malformed_files() {
    let dir = tempfile::tempdir().unwrap();

    let missing = load_users(&dir.path().join("nope.json"));
    assert!(matches!(missing, Err(DataError::Io { .. })));

    let path = dir.path().join("bad.json");
    std::fs::write(&path, "[{").unwrap();
    assert!(matches!(load_users(&path), Err(DataError::Parse { .. })));
}
