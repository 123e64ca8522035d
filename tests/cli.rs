//! End-to-end tests for the `pantry` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pantry(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pantry").unwrap();
    cmd.env("PANTRY_CLI_DATA_DIR", dir.path())
        .env_remove("PANTRY_LOG");
    cmd
}

fn add_milk(dir: &TempDir) {
    pantry(dir)
        .args([
            "product",
            "add",
            "Lait demi-écrémé",
            "--unit",
            "l",
            "--nutri",
            "B",
            "--barcode",
            "3017620422003",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created product: Lait demi-écrémé"));
}

#[test]
fn test_init_creates_layout() {
    let dir = TempDir::new().unwrap();

    pantry(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized PantryCLI"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").is_dir());

    pantry(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn test_product_and_item_flow() {
    let dir = TempDir::new().unwrap();
    add_milk(&dir);

    pantry(&dir)
        .args(["product", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lait demi-écrémé"))
        .stdout(predicate::str::contains("Total: 1 products"));

    pantry(&dir)
        .args(["item", "add", "Lait demi-écrémé", "2", "--expires", "2099-12-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2 L of Lait demi-écrémé"));

    // Scanned barcode resolves to the same product
    pantry(&dir)
        .args(["item", "add", "3017620422003"])
        .assert()
        .success();

    pantry(&dir)
        .args(["item", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 2 items"));
}

#[test]
fn test_unknown_product_fails() {
    let dir = TempDir::new().unwrap();

    pantry(&dir)
        .args(["item", "add", "Beurre"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Beurre"));
}

#[test]
fn test_invalid_nutri_grade_fails() {
    let dir = TempDir::new().unwrap();

    pantry(&dir)
        .args(["product", "add", "Chips", "--nutri", "F"])
        .assert()
        .failure();
}

#[test]
fn test_budget_and_expense_flow() {
    let dir = TempDir::new().unwrap();

    pantry(&dir)
        .args(["budget", "create", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created budget"));

    pantry(&dir)
        .args(["expense", "add", "100", "--source", "Marché"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25% used"));

    pantry(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25%"))
        .stdout(predicate::str::contains("oui"));

    pantry(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marché"));
}

#[test]
fn test_expense_without_budget_fails() {
    let dir = TempDir::new().unwrap();

    pantry(&dir)
        .args(["expense", "add", "12,50"])
        .assert()
        .failure();
}

#[test]
fn test_dashboard_json() {
    let dir = TempDir::new().unwrap();
    add_milk(&dir);
    pantry(&dir)
        .args(["item", "add", "Lait demi-écrémé", "--expires", "2099-12-31"])
        .assert()
        .success();

    let output = pantry(&dir)
        .args(["dashboard", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_items"], 1);
    assert!(json["budget"].is_null());
}

#[test]
fn test_export_json() {
    let dir = TempDir::new().unwrap();
    add_milk(&dir);
    let out = dir.path().join("export.json");

    pantry(&dir)
        .args(["export", "json"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Full database exported"));

    let content = std::fs::read_to_string(&out).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["schema_version"], "1.0.0");
    assert_eq!(json["metadata"]["product_count"], 1);
}

#[test]
fn test_export_csv_products() {
    let dir = TempDir::new().unwrap();
    add_milk(&dir);
    let out = dir.path().join("products.csv");

    pantry(&dir)
        .args(["export", "csv", "--data", "products"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 rows"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("3017620422003"));
}

#[test]
fn test_history_records_changes() {
    let dir = TempDir::new().unwrap();

    pantry(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet."));

    add_milk(&dir);

    pantry(&dir)
        .args(["history", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Product"));
}

#[test]
fn test_config_locale() {
    let dir = TempDir::new().unwrap();

    pantry(&dir)
        .args(["config", "--locale", "en-US"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved."));

    pantry(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("en-US"));

    pantry(&dir)
        .args(["config", "--locale", "de-DE"])
        .assert()
        .failure();
}

#[test]
fn test_config_rejects_out_of_range_utc_offset() {
    let dir = TempDir::new().unwrap();

    pantry(&dir)
        .args(["config", "--utc-offset", "40000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UTC offset"));

    // Nothing was persisted, later commands still work
    pantry(&dir)
        .arg("dashboard")
        .assert()
        .success();

    pantry(&dir)
        .args(["config", "--utc-offset", "-300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-300 min"));
}
