use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_fixtures(dir: &Path) {
    std::fs::write(
        dir.join("inventory.csv"),
        "Model,Qty owned,Total cost\n\
         FR-D720S-5.5K,2,50000\n\
         FR-F840-37K,1,20000\n\
         FR-ZEROQTY-1K,0,100\n\
         FR-S520SE-0.2K-19,4,100\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("prices.csv"),
        "Material Name,List Price\n\
         FR-A820-5.5K-1,50000\n\
         FR-F840-37K,28000\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("secondary.csv"),
        "Material Name,1.27\nFR-E820S-5.5K-1,31000\n",
    )
    .unwrap();
}

fn cmd() -> Command {
    Command::cargo_bin("stocklist").unwrap()
}

fn file_args(dir: &Path) -> Vec<String> {
    vec![
        "--inventory".into(),
        dir.join("inventory.csv").display().to_string(),
        "--prices".into(),
        dir.join("prices.csv").display().to_string(),
        "--secondary".into(),
        dir.join("secondary.csv").display().to_string(),
    ]
}

#[test]
fn check_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    cmd()
        .arg("check")
        .args(file_args(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("4 rows"))
        .stdout(predicate::str::contains("2 records excluded"));
}

#[test]
fn check_fails_on_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    std::fs::write(
        dir.path().join("prices.csv"),
        "Material Name,Wholesale\nFR-A820-5.5K-1,50000\n",
    )
    .unwrap();
    cmd()
        .arg("check")
        .args(file_args(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot locate a list price column"));
}

#[test]
fn preview_prints_sorted_table() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    cmd()
        .arg("preview")
        .args(file_args(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("FR-D720S-5.5K"))
        .stdout(predicate::str::contains("50,000"))
        .stdout(predicate::str::contains("28.57%"));
}

#[test]
fn build_writes_pdf() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let out = dir.path().join("report.pdf");
    cmd()
        .arg("build")
        .args(file_args(dir.path()))
        .arg("--output")
        .arg(out.display().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rows"));
    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
