//! End-to-end tests for the `roster` binary.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn roster(data: &Path) -> Command {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.env_remove("ROSTER_DATA")
        .env_remove("RUST_LOG")
        .arg("--data")
        .arg(data);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_list_creates_missing_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data.json");

    let out = stdout_of(roster(&data).arg("list"));

    assert_eq!(out, "Total: 0\n");
    assert_eq!(read_json(&data), serde_json::json!({ "students": [] }));
}

#[test]
fn test_add_show_update_delete() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data.json");

    let out = stdout_of(roster(&data).args(["add", "Ada", "--age", "20"]));
    assert_eq!(out, "Added -> ID: 1 | Name: Ada | Age: 20 | Full-time: Yes\n");

    stdout_of(roster(&data).args(["add", "Grace", "--age", "31", "--full-time", "no"]));

    let out = stdout_of(roster(&data).args(["update", "2", "--age", "32"]));
    assert_eq!(out, "Updated -> ID: 2 | Name: Grace | Age: 32 | Full-time: No\n");

    let out = stdout_of(roster(&data).args(["toggle", "1"]));
    assert!(out.contains("Full-time: No"));

    let out = stdout_of(roster(&data).args(["show", "2"]));
    assert_eq!(out, "ID: 2 | Name: Grace | Age: 32 | Full-time: No\n");

    stdout_of(roster(&data).args(["delete", "1"]));
    let doc = read_json(&data);
    assert_eq!(
        doc,
        serde_json::json!({
            "students": [{ "id": 2, "name": "Grace", "age": 32, "full-time": false }]
        })
    );
}

#[test]
fn test_list_limit() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data.json");
    for name in ["Ada", "Grace", "Linus"] {
        stdout_of(roster(&data).args(["add", name, "--age", "20"]));
    }

    let out = stdout_of(roster(&data).args(["list", "--limit", "2", "--json"]));
    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(doc["count"], 2);
    assert_eq!(doc["total"], 3);

    let out = stdout_of(roster(&data).args(["list", "--limit", "0", "--json"]));
    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(doc["count"], 3);
    assert_eq!(doc["students"][2]["name"], "Linus");
}

#[test]
fn test_missing_student_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data.json");

    let assert = roster(&data).args(["show", "42"]).assert().failure().code(3);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Student not found: 42"));
}

#[test]
fn test_json_error_output() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data.json");

    let assert = roster(&data)
        .args(["--json", "delete", "7"])
        .assert()
        .failure()
        .code(3);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    let err: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert_eq!(err["error"]["code"], "STUDENT_NOT_FOUND");
}

#[test]
fn test_corrupt_data_file_is_not_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data.json");
    fs::write(&data, "{ broken").unwrap();

    roster(&data)
        .args(["add", "Ada", "--age", "20"])
        .assert()
        .failure()
        .code(8);

    assert_eq!(fs::read_to_string(&data).unwrap(), "{ broken");
}

#[test]
fn test_export_then_replace_import() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data.json");
    let csv = temp_dir.path().join("out.csv");

    stdout_of(roster(&data).args(["add", "Ada", "--age", "20"]));
    stdout_of(roster(&data).args(["add", "Bob", "--age", "22", "--full-time", "n"]));

    let out = stdout_of(roster(&data).arg("export").arg(&csv));
    assert!(out.starts_with("Exported to "));
    assert_eq!(
        fs::read_to_string(&csv).unwrap(),
        "id,name,age,full-time\n1,Ada,20,true\n2,Bob,22,false\n"
    );

    let incoming = temp_dir.path().join("in.csv");
    fs::write(&incoming, "id,name,age,full-time\n9,Zed,40,yes\n,,abc,no\n").unwrap();

    let out = stdout_of(
        roster(&data)
            .arg("import")
            .arg(&incoming)
            .args(["--mode", "replace"]),
    );
    assert!(out.starts_with("Imported 2 (replace)."));

    let doc = read_json(&data);
    assert_eq!(
        doc,
        serde_json::json!({
            "students": [
                { "id": 9, "name": "Zed", "age": 40, "full-time": true },
                { "id": 10, "name": "Student10", "age": 0, "full-time": false }
            ]
        })
    );
}

#[test]
fn test_import_missing_csv_reports_zero() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data.json");
    stdout_of(roster(&data).args(["add", "Ada", "--age", "20"]));
    let before = fs::read(&data).unwrap();

    let out = stdout_of(
        roster(&data)
            .arg("import")
            .arg(temp_dir.path().join("nope.csv")),
    );

    assert!(out.contains("CSV not found"));
    assert!(out.contains("Imported 0 (merge)."));
    assert_eq!(fs::read(&data).unwrap(), before);
}

#[test]
fn test_import_json_stats() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data.json");
    stdout_of(roster(&data).args(["add", "Ada", "--age", "20"]));

    let incoming = temp_dir.path().join("in.csv");
    fs::write(&incoming, "id,name,age,full-time\n1,Dup,30,y\n").unwrap();

    let out = stdout_of(roster(&data).arg("--json").arg("import").arg(&incoming));
    let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();

    assert_eq!(value["count"], 1);
    assert_eq!(value["stats"]["mode"], "merge");
    assert_eq!(value["stats"]["ids_reassigned"], 1);
    assert_eq!(value["stats"]["total"], 2);
}

#[test]
fn test_shell_session_over_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data.json");
    stdout_of(roster(&data).args(["add", "Ada", "--age", "20"]));

    let out = stdout_of(roster(&data).arg("shell").write_stdin("l\n\nq\ny\n\n"));

    assert!(out.contains("Total: 1"));
    assert!(out.contains("Saved."));
    assert!(out.contains("Goodbye."));
}
