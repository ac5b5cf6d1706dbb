use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn docscan(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("docscan").unwrap();
    cmd.env("DOCSCAN_CONFIG_DIR", config_dir.path());
    cmd
}

#[test]
fn classify_grouped_iban() {
    let dir = TempDir::new().unwrap();
    docscan(&dir)
        .args(["classify", "--mode", "iban", "FR76 3000 6000 0112 3456 7890 189"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Iban detected"))
        .stdout(predicate::str::contains("FR7630006000011234567890189"))
        .stdout(predicate::str::contains("FR76 3000 6000 0112 3456 7890 189"));
}

#[test]
fn classify_json_no_match() {
    let dir = TempDir::new().unwrap();
    docscan(&dir)
        .args(["classify", "--json", "Hello World"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""result": "no_match""#));
}

#[test]
fn classify_checksum_rejects_bad_key() {
    let dir = TempDir::new().unwrap();
    docscan(&dir)
        .args(["classify", "--checksum", "FR7630006000011234567890188"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No iban detected, please try again!"));
}

#[test]
fn scan_document_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("frame.txt");
    fs::write(
        &input,
        "REPUBLIQUE FRANCAISE\nCARTE NATIONALE D'IDENTITE\n\nIDFRADUPONT<<JEAN<<<<<<<<<<<<<<<<<<<<<<<<<\n",
    )
    .unwrap();

    docscan(&dir)
        .args(["scan", "--mode", "document", "--format", "json"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""outcome": "matched""#))
        .stdout(predicate::str::contains("ID card detected"))
        .stdout(predicate::str::contains("DUPONT, JEAN (FRA)"));
}

#[test]
fn scan_without_match_prints_prompt() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("frame.txt");
    fs::write(&input, "nothing useful here\n").unwrap();

    docscan(&dir)
        .arg("scan")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("No iban detected, please try again!"));
}

#[test]
fn scan_json_pass_from_stdin() {
    let dir = TempDir::new().unwrap();
    docscan(&dir)
        .args(["scan", "-", "--format", "csv"])
        .write_stdin(r#"{"blocks":[{"lines":[{"text":"RIB"},{"text":"FR76 3000 6000 0112 3456 7890 189"}]}]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("source,mode,matched,kind,value,feedback"))
        .stdout(predicate::str::contains("-,iban,true,IBAN,FR7630006000011234567890189,Iban detected"));
}

#[test]
fn scan_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    docscan(&dir)
        .args(["scan", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_stops_at_first_match() {
    let dir = TempDir::new().unwrap();
    let frames = dir.path().join("frames");
    fs::create_dir(&frames).unwrap();
    fs::write(frames.join("01.txt"), "blurry\n").unwrap();
    fs::write(frames.join("02.txt"), "FR76 3000 6000 0112 3456 7890 189\n").unwrap();
    fs::write(frames.join("03.txt"), "FR14 2004 1010 0505 0001 3M02 606\n").unwrap();
    let report = dir.path().join("report.json");

    docscan(&dir)
        .arg("batch")
        .arg(format!("{}/*.txt", frames.display()))
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("FR76 3000 6000 0112 3456 7890 189"))
        .stdout(predicate::str::contains("FR1420041010050500013M02606").not());

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["stats"]["passes"], 2);
    assert_eq!(report["stats"]["matches"], 1);
    assert_eq!(report["first_match"], "FR7630006000011234567890189");
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();

    docscan(&dir)
        .args(["config", "set", "scan.default_mode", "document"])
        .assert()
        .success();

    docscan(&dir)
        .args(["config", "get", "scan.default_mode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"document\""));

    // The configured mode now applies when --mode is omitted.
    docscan(&dir)
        .args(["classify", "P<FRADUPONT<<JEAN<<<<<<<<<<<<<<<<<<<<<<<<<<<"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Passport detected"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    docscan(&dir)
        .args(["config", "set", "scan.nope", "1"])
        .assert()
        .failure();
}

#[test]
fn config_subcommands_follow_global_config_flag() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("custom.json");
    fs::write(&custom, r#"{"scan":{"default_mode":"document"}}"#).unwrap();

    docscan(&dir)
        .arg("--config")
        .arg(&custom)
        .args(["config", "get", "scan.default_mode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"document\""));

    docscan(&dir)
        .arg("--config")
        .arg(&custom)
        .args(["config", "set", "display.iban_group_size", "2"])
        .assert()
        .success();

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&custom).unwrap()).unwrap();
    assert_eq!(saved["display"]["iban_group_size"], 2);
    assert_eq!(saved["scan"]["default_mode"], "document");
    // The default location was left alone.
    assert!(!dir.path().join("config.json").exists());

    docscan(&dir)
        .arg("--config")
        .arg(&custom)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.json"));
}

#[test]
fn batch_all_scans_every_pass() {
    let dir = TempDir::new().unwrap();
    let frames = dir.path().join("frames");
    fs::create_dir(&frames).unwrap();
    fs::write(frames.join("01.txt"), "FR76 3000 6000 0112 3456 7890 189\n").unwrap();
    fs::write(frames.join("02.txt"), "FR14 2004 1010 0505 0001 3M02 606\n").unwrap();
    let report = dir.path().join("report.json");

    docscan(&dir)
        .arg("batch")
        .arg(format!("{}/*.txt", frames.display()))
        .args(["--all", "--report"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("FR14 2004 1010 0505 0001 3M02 606"));

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["stats"]["passes"], 2);
    assert_eq!(report["stats"]["matches"], 2);
    assert_eq!(report["first_match"], "FR7630006000011234567890189");
}
