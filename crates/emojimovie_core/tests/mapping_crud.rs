use emojimovie_core::db::open_db_in_memory;
use emojimovie_core::model::mapping::MappingValidationError;
use emojimovie_core::{MappingRepository, NewMapping, RepoError, SqliteMappingRepository};

#[test]
fn insert_and_list_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMappingRepository::new(&conn);

    let mapping = NewMapping::from_emoji("\u{1F680}\u{1F315}", "First Man", Some("Space"));
    let id = repo.insert_mapping(&mapping).unwrap();

    let rows = repo.list_mappings().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].emoji, "\u{1F680}\u{1F315}");
    assert_eq!(rows[0].unicode_seq, "U+1F680 U+1F315");
    assert_eq!(rows[0].movie_name, "First Man");
    assert_eq!(rows[0].hint.as_deref(), Some("Space"));
}

#[test]
fn list_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMappingRepository::new(&conn);

    let first = repo
        .insert_mapping(&NewMapping::from_emoji("\u{1F3AC}", "B movie", None))
        .unwrap();
    let second = repo
        .insert_mapping(&NewMapping::from_emoji("\u{1F37F}", "A movie", None))
        .unwrap();

    let ids: Vec<_> = repo.list_mappings().unwrap().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![first, second]);
    assert_eq!(repo.count_mappings().unwrap(), 2);
}

#[test]
fn duplicate_emoji_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMappingRepository::new(&conn);

    repo.insert_mapping(&NewMapping::from_emoji("\u{1F680}", "One", None))
        .unwrap();
    let err = repo
        .insert_mapping(&NewMapping::from_emoji("\u{1F680}", "Two", None))
        .unwrap_err();

    assert!(matches!(err, RepoError::DuplicateEmoji(ref emoji) if emoji == "\u{1F680}"));
}

#[test]
fn blank_fields_fail_validation_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMappingRepository::new(&conn);

    let err = repo
        .insert_mapping(&NewMapping::from_emoji("", "Nameless", None))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(MappingValidationError::EmptyField("emoji"))
    ));
    assert_eq!(repo.count_mappings().unwrap(), 0);
}

#[test]
fn batch_insert_is_atomic() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMappingRepository::new(&conn);

    let batch = vec![
        NewMapping::from_emoji("\u{1F680}", "One", None),
        NewMapping::from_emoji("\u{1F315}", "Two", None),
        NewMapping::from_emoji("\u{1F680}", "Duplicate", None),
    ];
    let err = repo.insert_mappings(&batch).unwrap_err();

    assert!(matches!(err, RepoError::DuplicateEmoji(_)));
    assert_eq!(repo.count_mappings().unwrap(), 0);
}

#[test]
fn blank_emoji_in_storage_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO emoji_mappings (emoji, unicode_seq, movie_name) VALUES ('  ', 'U+0020', 'Blank');",
        [],
    )
    .unwrap();

    let repo = SqliteMappingRepository::new(&conn);
    let err = repo.list_mappings().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
