use std::fs;
use std::path::PathBuf;

use refmatch_cli::input::{load_candidates, load_terms};
use refmatch_map::find_bank_matches;

fn temp_input_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("refmatch_input_{}_{stamp}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn cleanup_dir(dir: &PathBuf) {
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn loads_candidates_with_optional_names() {
    let dir = temp_input_dir();
    let path = dir.join("banks.json");
    fs::write(
        &path,
        r#"[
            {"id": "014", "name": "Bank Central Asia", "alternateName": "BCA"},
            {"id": "147", "name": "Bank Muamalat Indonesia"},
            {"id": "999"},
            {"id": "1", "name": null}
        ]"#,
    )
    .expect("write candidates");

    let candidates = load_candidates(&path).expect("load candidates");
    assert_eq!(candidates.len(), 4);
    assert_eq!(candidates[0].alternate_name.as_deref(), Some("BCA"));
    assert_eq!(candidates[1].local_name, None);
    assert!(candidates[2].validate().is_err());
    assert!(candidates[3].validate().is_err());

    let matches = find_bank_matches("Muamalat", &candidates);
    assert_eq!(matches.first().map(|m| m.id.as_str()), Some("147"));

    cleanup_dir(&dir);
}

#[test]
fn loads_terms() {
    let dir = temp_input_dir();
    let path = dir.join("terms.json");
    fs::write(&path, r#"["jogja", "Kab Sleman", "", null]"#).expect("write terms");
    let terms = load_terms(&path).expect("load terms");
    assert_eq!(terms, vec!["jogja", "Kab Sleman", "", ""]);
    cleanup_dir(&dir);
}

#[test]
fn missing_file_reports_path() {
    let dir = temp_input_dir();
    let err = load_candidates(&dir.join("absent.json")).expect_err("should fail");
    assert!(format!("{err:#}").contains("absent.json"));
    cleanup_dir(&dir);
}

#[test]
fn malformed_json_is_an_error() {
    let dir = temp_input_dir();
    let path = dir.join("broken.json");
    fs::write(&path, r#"{"id": "1"}"#).expect("write file");
    assert!(load_terms(&path).is_err());
    assert!(load_candidates(&path).is_err());
    cleanup_dir(&dir);
}
