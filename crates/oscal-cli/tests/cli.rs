//! Black-box tests of the `oscal-wizard` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("oscal-core")
        .join("tests")
        .join("fixtures")
}

fn wizard(store_root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("oscal-wizard").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("OSCAL_WIZARD_CATALOG_DIR")
        .arg("--store-root")
        .arg(store_root)
        .arg("--catalog-dir")
        .arg(fixtures().join("catalogs"));
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let out = cmd.arg("--json").output().unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn validate_fixture_workspace() {
    let dir = tempfile::tempdir().unwrap();
    let v = json_stdout(wizard(dir.path()).arg("validate").arg(fixtures().join("workspace.json")));
    assert_eq!(v["ok"], true);
    assert_eq!(v["kind"], "workspace");
}

#[test]
fn validate_reports_findings_with_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let mut ws: Value =
        serde_json::from_str(&fs::read_to_string(fixtures().join("workspace.json")).unwrap()).unwrap();
    ws["metadata"]["oscal_version"] = Value::from("1.0.0");
    let path = dir.path().join("ws.json");
    fs::write(&path, serde_json::to_vec(&ws).unwrap()).unwrap();

    let out = wizard(dir.path()).arg("--json").arg("validate").arg(&path).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["findings"][0]["location"], "metadata.oscal_version");
    assert_eq!(v["findings"][0]["message"], "Unsupported OSCAL version.");
}

#[test]
fn validate_detects_ssp_documents() {
    let dir = tempfile::tempdir().unwrap();
    let v = json_stdout(wizard(dir.path()).arg("validate").arg(fixtures().join("ssp.golden.json")));
    assert_eq!(v["kind"], "ssp");
    assert_eq!(v["ok"], true);
}

#[test]
fn validate_ssp_honours_size_limit() {
    let dir = tempfile::tempdir().unwrap();
    let golden = fixtures().join("ssp.golden.json");
    let v = json_stdout(wizard(dir.path()).arg("validate-ssp").arg(&golden));
    assert_eq!(v["ok"], true);

    let out = wizard(dir.path())
        .args(["--max-json-bytes", "10", "validate-ssp"])
        .arg(&golden)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("too large"));
}

#[test]
fn validate_ssp_locates_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut ssp: Value =
        serde_json::from_str(&fs::read_to_string(fixtures().join("ssp.golden.json")).unwrap()).unwrap();
    ssp["system-security-plan"]["metadata"]["roles"][0]["extra"] = Value::from(1);
    let path = dir.path().join("ssp.json");
    fs::write(&path, serde_json::to_vec(&ssp).unwrap()).unwrap();

    let out = wizard(dir.path()).arg("--json").arg("validate-ssp").arg(&path).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["findings"][0]["location"], "system-security-plan.metadata.roles.0.extra");
    assert_eq!(v["findings"][0]["message"], "Extra inputs are not permitted");
}

#[test]
fn export_ssp_matches_golden() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("out").join("ssp.json");
    wizard(dir.path())
        .arg("export-ssp")
        .arg(fixtures().join("workspace.json"))
        .arg("--out")
        .arg(&out_path)
        .assert()
        .success();
    let golden = fs::read_to_string(fixtures().join("ssp.golden.json")).unwrap();
    assert_eq!(fs::read_to_string(&out_path).unwrap(), golden.trim_end_matches('\n'));
}

#[test]
fn diff_reports_narratives() {
    let dir = tempfile::tempdir().unwrap();
    let before = dir.path().join("before.json");
    let after = dir.path().join("after.json");
    fs::write(&before, r#"{"control": {"narrative": "old"}}"#).unwrap();
    fs::write(&after, r#"{"control": {"narrative": "new"}}"#).unwrap();

    let v = json_stdout(wizard(dir.path()).arg("diff").arg(&before).arg(&after));
    assert_eq!(v["identical"], false);
    assert!(v["diff"].as_str().unwrap().contains("+    \"narrative\": \"new\""));
    assert_eq!(v["narrative_changes"][0]["path"], "$.control.narrative");
}

#[test]
fn diff_rejects_non_object_input() {
    let dir = tempfile::tempdir().unwrap();
    let before = dir.path().join("before.json");
    fs::write(&before, "[]").unwrap();
    let out = wizard(dir.path()).arg("diff").arg(&before).arg(&before).output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("before.json must be a JSON object."));
}

#[test]
fn catalog_lists_prefixed_controls() {
    let dir = tempfile::tempdir().unwrap();
    let v = json_stdout(wizard(dir.path()).args(["catalog", "--prefix", "AC", "--limit", "5"]));
    let ids: Vec<_> = v["controls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["control_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["ac-1", "ac-2", "ac-2.1"]);
}

#[test]
fn interview_requires_narratives() {
    let dir = tempfile::tempdir().unwrap();
    let responses = dir.path().join("responses.json");
    fs::write(
        &responses,
        r#"{"ac-1": {"selected": true, "narrative": "Done."}, "ac-2": {"selected": true}}"#,
    )
    .unwrap();
    let out = wizard(dir.path())
        .args(["--json", "interview", "--prefix", "ac"])
        .arg(&responses)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["findings"][0]["location"], "control_ac-2_narrative");
    assert_eq!(v["selected"], serde_json::json!(["ac-1", "ac-2"]));
}

#[test]
fn id_and_uuid_are_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let a = json_stdout(wizard(dir.path()).args(["id", "Example System"]));
    let b = json_stdout(wizard(dir.path()).args(["id", "Example System"]));
    assert_eq!(a, b);
    assert_eq!(a["id"].as_str().unwrap().len(), 32);

    let u = json_stdout(wizard(dir.path()).args(["uuid", "party", "person", "Ada", "ada@example.com"]));
    assert_eq!(u["id"].as_str().unwrap().len(), 36);
}

#[test]
fn components_import_into_workspace() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("ws.json");
    let v = json_stdout(
        wizard(dir.path())
            .arg("components")
            .arg(fixtures().join("components"))
            .arg("--workspace")
            .arg(fixtures().join("workspace.json"))
            .arg("--out")
            .arg(&out_path),
    );
    assert_eq!(v["inserted"], 3);
    let ws: Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(ws["components"].as_array().unwrap().len(), 4);
}

#[test]
fn inspect_classifies_documents() {
    let dir = tempfile::tempdir().unwrap();
    let v = json_stdout(wizard(dir.path()).arg("inspect").arg(fixtures().join("catalogs").join("manifest.json")));
    assert_eq!(v["kind"], "unknown");
    let v = json_stdout(wizard(dir.path()).arg("inspect").arg(fixtures().join("ssp.golden.json")));
    assert_eq!(v["kind"], "ssp");
    assert_eq!(v["sha256"].as_str().unwrap().len(), 64);
}

#[test]
fn workspace_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("store");

    let created = json_stdout(wizard(&root).args(["workspace", "create", "Demo System"]));
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["name"], "Demo System");

    json_stdout(wizard(&root).args(["workspace", "rename", id, "Renamed System"]));

    let export_path = dir.path().join("export.json");
    wizard(&root)
        .args(["workspace", "export", id, "--out"])
        .arg(&export_path)
        .assert()
        .success();
    let exported: Value = serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(exported["workspace"]["system_name"], "Renamed System");
    assert_eq!(exported["workspace"]["system_id"], created["system_id"]);

    let imported = json_stdout(wizard(&root).args(["workspace", "import"]).arg(&export_path));
    assert_ne!(imported["id"], created["id"]);

    let listed = json_stdout(wizard(&root).args(["workspace", "list"]));
    assert_eq!(listed.as_array().unwrap().len(), 2);

    json_stdout(wizard(&root).args(["workspace", "delete", id]));
    let out = wizard(&root).args(["workspace", "delete", id]).output().unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn workspace_create_rejects_blank_name() {
    let dir = tempfile::tempdir().unwrap();
    let out = wizard(dir.path()).args(["workspace", "create", "   "]).output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Workspace name is required."));
}
