use reviewers_core::db::open_db_in_memory;
use reviewers_core::{
    count_reviewers, Reviewer, ReviewerPatch, ReviewerService, ReviewerValidationError,
    ServiceError, SqliteReviewerRepository,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> ReviewerService<SqliteReviewerRepository<'_>> {
    ReviewerService::new(SqliteReviewerRepository::new(conn))
}

#[test]
fn create_ignores_client_supplied_id() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let input = Reviewer {
        id: Some(999),
        ..Reviewer::new("Ada", "ada@example.org")
    };
    let created = service.create_reviewer(&input).unwrap();

    assert_ne!(created.id, Some(999));
    assert!(service.get_reviewer(999).unwrap().is_none());
}

#[test]
fn create_with_duplicate_email_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .create_reviewer(&Reviewer::new("Ada", "ada@example.org"))
        .unwrap();
    let err = service
        .create_reviewer(&Reviewer::new("Other", "ada@example.org"))
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(err.to_string(), "Email already exists");
    assert_eq!(count_reviewers(&conn).unwrap(), 1);
}

#[test]
fn replace_forces_path_id_and_clears_omitted_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service
        .create_reviewer(
            &Reviewer::new("Ada", "ada@example.org")
                .with_affiliation("Analytical Society")
                .with_expertise("computing"),
        )
        .unwrap();
    let id = created.id.unwrap();

    let body = Reviewer {
        id: Some(id + 100),
        ..Reviewer::new("Ada K.", "ada.k@example.org")
    };
    let replaced = service.replace_reviewer(id, &body).unwrap();

    assert_eq!(replaced.id, Some(id));
    assert_eq!(replaced.name, "Ada K.");
    assert_eq!(replaced.affiliation, None);
    assert_eq!(replaced.expertise, None);
    assert!(service.get_reviewer(id + 100).unwrap().is_none());
}

#[test]
fn replace_missing_reviewer_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .replace_reviewer(3, &Reviewer::new("Ada", "ada@example.org"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(3)));
    assert_eq!(err.to_string(), "Reviewer with id 3 not found");
    assert_eq!(count_reviewers(&conn).unwrap(), 0);
}

#[test]
fn replace_onto_taken_email_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .create_reviewer(&Reviewer::new("Ada", "ada@example.org"))
        .unwrap();
    let grace = service
        .create_reviewer(&Reviewer::new("Grace", "grace@example.org"))
        .unwrap();

    let err = service
        .replace_reviewer(
            grace.id.unwrap(),
            &Reviewer::new("Grace", "ada@example.org"),
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[test]
fn patch_merges_only_supplied_keys() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service
        .create_reviewer(
            &Reviewer::new("Ada", "ada@example.org")
                .with_affiliation("Analytical Society")
                .with_expertise("computing"),
        )
        .unwrap();
    let id = created.id.unwrap();

    let patch = ReviewerPatch {
        expertise: Some(Some("mathematics".to_string())),
        ..ReviewerPatch::default()
    };
    let patched = service.patch_reviewer(id, &patch).unwrap();

    assert_eq!(patched.name, "Ada");
    assert_eq!(patched.email, "ada@example.org");
    assert_eq!(patched.affiliation.as_deref(), Some("Analytical Society"));
    assert_eq!(patched.expertise.as_deref(), Some("mathematics"));
}

#[test]
fn patch_with_null_name_fails_validation_and_keeps_row() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service
        .create_reviewer(&Reviewer::new("Ada", "ada@example.org"))
        .unwrap();
    let id = created.id.unwrap();

    let patch = ReviewerPatch {
        name: Some(None),
        ..ReviewerPatch::default()
    };
    let err = service.patch_reviewer(id, &patch).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ReviewerValidationError::NameRequired)
    ));
    assert_eq!(service.get_reviewer(id).unwrap().unwrap().name, "Ada");
}

#[test]
fn patch_missing_reviewer_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .patch_reviewer(8, &ReviewerPatch::default())
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(8)));
}

#[test]
fn delete_then_get_is_absent_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service
        .create_reviewer(&Reviewer::new("Ada", "ada@example.org"))
        .unwrap();
    let id = created.id.unwrap();

    service.delete_reviewer(id).unwrap();
    assert!(service.get_reviewer(id).unwrap().is_none());

    let err = service.delete_reviewer(id).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn list_returns_reviewers_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    for (name, email) in [("C", "c@example.org"), ("A", "a@example.org"), ("B", "b@example.org")] {
        service
            .create_reviewer(&Reviewer::new(name, email))
            .unwrap();
    }

    let names: Vec<_> = service
        .list_reviewers()
        .unwrap()
        .into_iter()
        .map(|reviewer| reviewer.name)
        .collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}
