use solveit::model::{Problem, ProblemPatch};
use solveit::store::{ProblemStore, UserStore};
use solveit::StorageConfig;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, StorageConfig, ProblemStore) {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::new(dir.path());
    let store = ProblemStore::open(&config).unwrap();
    (dir, config, store)
}

#[test]
fn store_creates_its_files_on_open() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::new(dir.path().join("data"));

    let _problems = ProblemStore::open(&config).unwrap();
    let _users = UserStore::open(&config).unwrap();

    assert_eq!(fs::read_to_string(config.problems_file()).unwrap(), "[]");
    assert_eq!(fs::read_to_string(config.users_file()).unwrap(), "[]");
}

#[test]
fn full_crud_cycle_survives_reopen() {
    let (_dir, config, store) = setup();

    let created = store
        .save_user_problem(
            Problem::new("borrow checker fight".into(), "clone it".into(), None),
            "u1",
        )
        .unwrap();

    // a different handle on the same files sees the same data
    let reopened = ProblemStore::open(&config).unwrap();
    let fetched = reopened
        .get_user_problem(&created.record.id, "u1")
        .expect("created row should be readable");
    assert_eq!(fetched.record.problem, "borrow checker fight");
    assert_eq!(fetched.record.category, "General");

    reopened
        .update_user_problem(
            &created.record.id,
            "u1",
            &ProblemPatch {
                category: Some("Rust".into()),
                ..Default::default()
            },
        )
        .unwrap()
        .expect("row should update");

    assert!(store.delete_user_problem(&created.record.id, "u1").unwrap());
    assert!(store.get_user_problem(&created.record.id, "u1").is_none());
}

#[test]
fn users_cannot_touch_each_others_records() {
    let (_dir, _config, store) = setup();

    let ana_row = store
        .save_user_problem(Problem::new("ana's".into(), "fix".into(), None), "ana")
        .unwrap();
    store
        .save_user_problem(Problem::new("bob's".into(), "fix".into(), None), "bob")
        .unwrap();

    // read, update, delete across the ownership boundary all come back empty
    assert!(store.get_user_problem(&ana_row.record.id, "bob").is_none());
    assert!(store
        .update_user_problem(&ana_row.record.id, "bob", &ProblemPatch::default())
        .unwrap()
        .is_none());
    assert!(!store.delete_user_problem(&ana_row.record.id, "bob").unwrap());

    // and nothing was lost in the process
    assert_eq!(store.load_all().len(), 2);
    assert_eq!(store.get_user_problems("ana").len(), 1);
    assert_eq!(store.get_user_problems("bob").len(), 1);
}

#[test]
fn statistics_report_exact_category_breakdown() {
    let (_dir, _config, store) = setup();
    for category in ["A", "A", "B"] {
        store
            .save_user_problem(
                Problem::new("p".into(), "s".into(), Some(category.into())),
                "u1",
            )
            .unwrap();
    }

    let stats = store.get_user_statistics("u1");
    assert_eq!(stats.total_problems, 3);
    assert_eq!(stats.total_categories, 2);
    assert_eq!(
        stats.categories.into_iter().collect::<Vec<_>>(),
        vec![("A".to_string(), 2), ("B".to_string(), 1)]
    );
}

#[test]
fn export_of_empty_user_is_a_valid_empty_array() {
    let (_dir, _config, store) = setup();
    let rows = store.get_user_problems("nobody");
    let exported = serde_json::to_string_pretty(&rows).unwrap();
    assert_eq!(exported, "[]");
}

#[test]
fn invalid_json_on_disk_reads_as_empty_not_a_crash() {
    let (_dir, config, store) = setup();
    store
        .save_user_problem(Problem::new("p".into(), "s".into(), None), "u1")
        .unwrap();

    fs::write(config.problems_file(), "{{{ definitely not json").unwrap();
    assert!(store.get_user_problems("u1").is_empty());

    // the next write heals the file
    store
        .save_user_problem(Problem::new("fresh".into(), "start".into(), None), "u1")
        .unwrap();
    assert_eq!(store.get_user_problems("u1").len(), 1);
}

#[test]
fn pretty_printed_files_stay_human_diffable() {
    let (_dir, config, store) = setup();
    store
        .save_user_problem(Problem::new("p".into(), "s".into(), None), "u1")
        .unwrap();

    let on_disk = fs::read_to_string(config.problems_file()).unwrap();
    assert!(on_disk.contains('\n'));
    assert!(on_disk.contains("  \"problem\""));
}
