//! Command line tests over model files in a temporary directory

use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wrapgen_family::DispatchPlan;

const MODEL: &str = r#"
headers:
  d3d12.h:
    interfaces:
      - name: IUnknown
        iid: "{00000000-0000-0000-c000-000000000046}"
      - name: ID3D12Object
        iid: "{c4fec28f-7966-4e95-9f94-f431cb56c3b8}"
        inherits: [IUnknown]
      - name: ID3D12Device
        iid: "{189819f1-1db6-4b57-be54-1821339b85f7}"
        inherits: [ID3D12Object]
      - name: ID3D12Device1
        iid: "{77acce80-638e-4e65-8895-c1f23386863e}"
        inherits: [ID3D12Device]
      - name: ID3D12Device2
        iid: "{30baa41e-b15b-475c-a0bb-1af5c5b64328}"
        inherits: [ID3D12Device1]
      - name: ID3D12Fence
        iid: "{0a753dcf-c4d8-4b91-adf6-be5a60d95a76}"
        inherits: [ID3D12Object]
    guids:
      - name: IID_ID3D12ObjectAlias
        iid: "{c4fec28f-7966-4e95-9f94-f431cb56c3b8}"
    enums:
      - name: D3D12_COMMAND_LIST_TYPE
        values:
          - { name: D3D12_COMMAND_LIST_TYPE_DIRECT, value: 0 }
          - { name: D3D12_COMMAND_LIST_TYPE_BUNDLE, value: 1 }
"#;

// ID3D12Device2 declared without ID3D12Device1
const GAPPED: &str = r#"
headers:
  d3d12.h:
    interfaces:
      - name: ID3D12Device
        iid: "{189819f1-1db6-4b57-be54-1821339b85f7}"
      - name: ID3D12Device2
        iid: "{30baa41e-b15b-475c-a0bb-1af5c5b64328}"
        inherits: [ID3D12Device]
"#;

fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn run(args: &[&str]) -> anyhow::Result<String> {
    let matches = wrapgen_cli::command().try_get_matches_from(std::iter::once("wrapgen").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    wrapgen_cli::run(&matches, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn validate_reports_counts() {
    let dir = TempDir::new().unwrap();
    let model = write(&dir, "d3d12.yaml", MODEL);

    let out = run(&["validate", arg(&model)]).unwrap();
    assert_eq!(out, "ok: 6 interfaces, 2 families, 4 dispatchable ids\n");
}

#[test]
fn families_lists_chains() {
    let dir = TempDir::new().unwrap();
    let model = write(&dir, "d3d12.yaml", MODEL);

    let out = run(&["families", arg(&model)]).unwrap();
    assert_eq!(
        out,
        "WrapID3D12Device: ID3D12Device -> ID3D12Device1 -> ID3D12Device2\n\
         WrapID3D12Fence: ID3D12Fence\n"
    );
}

#[test]
fn plan_writes_json_file() {
    let dir = TempDir::new().unwrap();
    let model = write(&dir, "d3d12.yaml", MODEL);
    let output = dir.path().join("plan.json");

    let out = run(&["plan", arg(&model), "--pretty", "--output", arg(&output)]).unwrap();
    assert!(out.is_empty());

    let plan = DispatchPlan::from_json(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(plan.families.len(), 2);
    assert_eq!(plan.families[0].constructor, "WrapID3D12Device");
    assert_eq!(plan.iid_count(), 4);
}

#[test]
fn gap_rejected_by_default_and_skipped_on_request() {
    let dir = TempDir::new().unwrap();
    let model = write(&dir, "gapped.yaml", GAPPED);
    let config = write(&dir, "skip.toml", "gap_policy = \"skip\"\n");

    let err = run(&["validate", arg(&model)]).unwrap_err();
    assert!(format!("{err:#}").contains("ID3D12Device1"));

    let out = run(&["families", arg(&model), "--config", arg(&config)]).unwrap();
    assert_eq!(out, "WrapID3D12Device: ID3D12Device -> ID3D12Device2\n");
}

#[test]
fn iid_to_text() {
    let dir = TempDir::new().unwrap();
    let model = write(&dir, "d3d12.yaml", MODEL);

    let out = run(&["iid", arg(&model), "189819f1-1db6-4b57-be54-1821339b85f7"]).unwrap();
    assert_eq!(out, "IID_ID3D12Device\n");

    // Standalone constant names win over interface names
    let out = run(&["iid", arg(&model), "{c4fec28f-7966-4e95-9f94-f431cb56c3b8}"]).unwrap();
    assert_eq!(out, "IID_ID3D12ObjectAlias\n");

    let out = run(&["iid", arg(&model), "{11111111-2222-3333-4444-555555555555}"]).unwrap();
    assert_eq!(out, "Invalid IID\n");
}

#[test]
fn enum_to_text() {
    let dir = TempDir::new().unwrap();
    let model = write(&dir, "d3d12.yaml", MODEL);

    let out = run(&["enum", arg(&model), "D3D12_COMMAND_LIST_TYPE", "1"]).unwrap();
    assert_eq!(out, "D3D12_COMMAND_LIST_TYPE_BUNDLE\n");

    let out = run(&["enum", arg(&model), "D3D12_COMMAND_LIST_TYPE", "-3"]).unwrap();
    assert_eq!(out, "Invalid D3D12_COMMAND_LIST_TYPE(-3)\n");

    assert!(run(&["enum", arg(&model), "D3D12_MISSING", "0"]).is_err());
}

#[test]
fn unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let model = write(&dir, "d3d12.txt", MODEL);
    assert!(run(&["validate", arg(&model)]).is_err());
}
