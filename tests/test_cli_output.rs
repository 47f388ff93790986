use cimgen::core::{ApiDescription, ArgDef, FuncDef, StructDescriptor};
use cimgen::frontend::{load_api, run_check, run_generate, run_init_config, Config};
use cimgen::GenError;
use std::fs;
use tempfile::TempDir;

const API_JSON: &str = r#"{
    "enums": [{"name": "ImGuiDir_", "values": [{"name": "ImGuiDir_Left", "value": 0}, {"name": "ImGuiDir_Right", "value": 1}]}],
    "structs": [{"name": "ImDrawList"}, {"name": "ImVec2"}],
    "funcs": [
        {"funcName": "igGetWindowDrawList", "args": [], "ret": "ImDrawList*"},
        {"funcName": "ImDrawList_AddLine", "args": [
            {"name": "self", "type": "ImDrawList*"},
            {"name": "p1", "type": "const ImVec2"},
            {"name": "p2", "type": "const ImVec2"},
            {"name": "col", "type": "ImU32"}
        ], "ret": "void"},
        {"funcName": "igArrowButton", "args": [{"name": "id", "type": "const char*"}, {"name": "dir", "type": "ImGuiDir"}], "ret": "bool"},
        {"funcName": "igPlotLines", "args": [{"name": "getter", "type": "float(*)(void*,int)"}], "ret": "void"}
    ]
}"#;

fn setup() -> (TempDir, Config, ApiDescription) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("api.json");
    fs::write(&input, API_JSON).unwrap();

    let mut config = Config::default();
    config.output.directory = dir.path().join("out");
    let api = load_api(&input).unwrap();
    (dir, config, api)
}

#[test]
fn test_generate_writes_all_artifacts() {
    let (_dir, config, api) = setup();
    let mut out = Vec::new();

    let report = run_generate(&config, &api, None, &mut out).unwrap();
    assert_eq!(report.converted, 3);

    let out_dir = &config.output.directory;
    for name in ["enums.go", "structs.go", "funcs.go", "value_types.go"] {
        assert!(out_dir.join(name).is_file(), "{} missing", name);
    }

    let funcs = fs::read_to_string(out_dir.join("funcs.go")).unwrap();
    assert!(funcs.starts_with("package cimgui\n\n// #include \"extra_type.h\"\n"));
    assert!(funcs.contains("func (self ImDrawList) AddLine(p1 ImVec2, p2 ImVec2, col uint32) {"));
    assert!(funcs.contains("func igArrowButton(id string, dir ImGuiDir) bool {"));
}

#[test]
fn test_console_output() {
    let (_dir, config, api) = setup();
    let mut out = Vec::new();

    run_generate(&config, &api, None, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text, "Unknown arg: float(*)(void*,int)\nConvert progress: 3/4\n");
}

#[test]
fn test_report_file() {
    let (dir, config, api) = setup();
    let report_path = dir.path().join("report.json");

    run_generate(&config, &api, Some(&report_path), &mut Vec::new()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["total"], 4);
    assert_eq!(json["converted"], 3);
    assert_eq!(json["stats"]["skipped_args"], 1);
    assert_eq!(json["coverage_gaps"]["arg_types"][0], "float(*)(void*,int)");
}

#[test]
fn test_support_file_disabled() {
    let (_dir, mut config, api) = setup();
    config.output.support_file = String::new();

    run_generate(&config, &api, None, &mut Vec::new()).unwrap();
    assert!(!config.output.directory.join("value_types.go").exists());
}

#[test]
fn test_write_failure_is_fatal() {
    let (dir, mut config, api) = setup();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    config.output.directory = blocker.join("out");

    let mut out = Vec::new();
    let err = run_generate(&config, &api, None, &mut out).unwrap_err();

    assert!(matches!(err, GenError::Write { .. }));
    assert!(out.is_empty(), "nothing is reported after a failed write");
}

#[test]
fn test_check_lists_gaps() {
    let (_dir, config, api) = setup();
    let mut out = Vec::new();

    let clean = run_check(&config, &api, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(!clean);
    assert!(text.starts_with("Unknown arg: float(*)(void*,int)"));
    assert!(text.ends_with("Convert progress: 3/4\n"));
    assert!(!config.output.directory.exists(), "check writes nothing");
}

#[test]
fn test_check_clean_input() {
    let (_dir, config, _) = setup();
    let api = ApiDescription {
        structs: vec![StructDescriptor::new("ImDrawList")],
        funcs: vec![FuncDef::new("ImDrawList_Clear", vec![ArgDef::new("self", "ImDrawList*")], "void")],
        ..Default::default()
    };

    assert!(run_check(&config, &api, &mut Vec::new()).unwrap());
}

#[test]
fn test_init_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cimgen.toml");

    run_init_config(&path, false).unwrap();
    assert_eq!(Config::load(&path).unwrap(), Config::default());

    assert!(run_init_config(&path, false).is_err());
    run_init_config(&path, true).unwrap();
}
