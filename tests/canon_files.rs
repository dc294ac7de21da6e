//! Loading canons from disk

use std::io::Write;
use std::sync::Arc;
use versicle::testing::assert_locator;
use versicle::{parse_with, Canon, HierarchyError, HierarchyProvider};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_yaml_by_extension() {
    let file = write_temp(
        ".yml",
        "name: Minor\nbooks:\n  - name: Obadiah\n    abbreviation: Obad\n    chapters: [21]\n  - name: Jonah\n    chapters: [17, 10, 10, 11]\n",
    );
    let canon = Canon::load(file.path()).unwrap();
    assert_eq!(canon.name(), "Minor");

    let locator = parse_with("Obad 1:22", Arc::new(canon)).create();
    assert_locator(&locator).book("Obadiah").verses([21]);
}

#[test]
fn loads_json_with_explicit_ordinals() {
    let file = write_temp(
        ".json",
        r#"{"name": "Ordered", "books": [
            {"name": "Second", "ordinal": 2, "chapters": [3]},
            {"name": "First", "ordinal": 1, "chapters": [5]}
        ]}"#,
    );
    let canon = Canon::load(file.path()).unwrap();
    let names: Vec<&str> = canon.books().iter().map(|b| b.name()).collect();
    assert_eq!(names, ["First", "Second"]);
    assert_eq!(canon.book_at(2).unwrap().name(), "Second");
}

#[test]
fn rejects_unknown_extension() {
    let file = write_temp(".txt", "books: []");
    let err = Canon::load(file.path()).unwrap_err();
    assert!(matches!(err, HierarchyError::UnsupportedFormat(ext) if ext == "txt"));
}

#[test]
fn reports_missing_file() {
    let err = Canon::load("/nonexistent/canon.yaml").unwrap_err();
    assert!(matches!(err, HierarchyError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/canon.yaml"));
}

#[test]
fn reports_malformed_yaml() {
    let file = write_temp(".yaml", "books: [ { name: Broken");
    assert!(matches!(
        Canon::load(file.path()).unwrap_err(),
        HierarchyError::Yaml(_)
    ));
}

#[test]
fn accented_names_survive_a_round_trip() {
    let file = write_temp(
        ".yaml",
        "name: Français\nbooks:\n  - name: Genèse\n    chapters: [31, 25]\n  - name: Ésaïe\n    chapters: [66, 22]\n",
    );
    let hierarchy: Arc<dyn HierarchyProvider> = Arc::new(Canon::load(file.path()).unwrap());

    let locator = parse_with("ésaïe 2:3", hierarchy.clone()).create();
    assert_locator(&locator).book("Ésaïe").chapter(2).verses([3]);

    let rendered = locator.to_string();
    assert_eq!(rendered, "Ésaïe 2:3");
    assert_eq!(parse_with(&rendered, hierarchy).create(), locator);
}

#[test]
fn rejects_synthetic_ordinal_in_file() {
    let file = write_temp(
        ".json",
        r#"{"books": [{"name": "CCCCC", "ordinal": 0, "chapters": [99]}]}"#,
    );
    let err = Canon::load(file.path()).unwrap_err();
    assert!(matches!(err, HierarchyError::ReservedOrdinal { .. }));
    assert!(err.to_string().contains("reserved for synthetic books"));
}
