//! Integration tests for the pdv subcommand handlers.
//!
//! Reuses the VNFD fixtures from `pdv-schema/tests/fixtures/` and writes
//! scratch files (configurations, schemas, outputs) into temp directories.

use std::path::PathBuf;

use pdv_cli::synthesize::SynthesizeArgs;
use pdv_cli::tokens::TokensArgs;
use pdv_cli::validate::{run_check_params, run_validate, CheckParamsArgs, ValidateArgs};
use serde_json::Value;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../pdv-schema/tests/fixtures")
}

fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

fn output_of(result: anyhow::Result<()>, out: Vec<u8>) -> String {
    result.expect("command succeeds");
    String::from_utf8(out).expect("utf-8 output")
}

fn check_params_args(params: &str, config: Option<PathBuf>) -> CheckParamsArgs {
    CheckParamsArgs {
        params: fixture(params),
        template: fixture("parameterized_vnfd.yaml"),
        definitions: fixture("vnfd_define.json"),
        base: fixture("input_param.json"),
        config,
    }
}

// =========================================================================
// tokens
// =========================================================================

#[test]
fn test_tokens_lists_occurrences_and_bindings() {
    let args = TokensArgs {
        template: fixture("parameterized_vnfd.yaml"),
        pattern: None,
        config: None,
    };
    let mut out = Vec::new();
    let result = pdv_cli::tokens::run(&args, &mut out);
    let text = output_of(result, out);

    assert!(text.contains("- vcpus: $vcpus\n"));
    assert!(text.contains("ip_address: $cp0_ip\n"));
    assert!(text.contains("$disk -> disk_size\n"));
    assert!(text.contains("$cp0_ip -> ip_address\n"));
    assert!(text.contains("$max_instances -> maximum\n"));
    assert_eq!(text.matches(" -> ").count(), 6);
}

#[test]
fn test_tokens_invalid_pattern_fails() {
    let args = TokensArgs {
        template: fixture("parameterized_vnfd.yaml"),
        pattern: Some("(".to_string()),
        config: None,
    };
    let mut out = Vec::new();
    assert!(pdv_cli::tokens::run(&args, &mut out).is_err());
}

#[test]
fn test_tokens_missing_template_fails() {
    let args = TokensArgs {
        template: fixture("does_not_exist.yaml"),
        pattern: None,
        config: None,
    };
    let mut out = Vec::new();
    let err = pdv_cli::tokens::run(&args, &mut out).unwrap_err();
    assert!(format!("{err}").contains("cannot read"));
}

// =========================================================================
// synthesize
// =========================================================================

#[test]
fn test_synthesize_to_stdout() {
    let args = SynthesizeArgs {
        template: fixture("parameterized_vnfd.yaml"),
        definitions: fixture("vnfd_define.json"),
        base: fixture("input_param.json"),
        config: None,
        output: None,
    };
    let mut out = Vec::new();
    let result = pdv_cli::synthesize::run(&args, &mut out);
    let text = output_of(result, out);

    let schema: Value = serde_json::from_str(&text).expect("output is JSON");
    assert_eq!(schema["additionalProperties"], Value::Bool(false));
    assert!(schema["properties"]["vcpus"]["enum"].is_array());
    let required = schema["required"].as_array().expect("required array");
    assert!(required.contains(&Value::String("max_instances".into())));
    assert!(required.contains(&Value::String("vnfd_id".into())));
}

#[test]
fn test_synthesize_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("schema.json");
    let args = SynthesizeArgs {
        template: fixture("parameterized_vnfd.yaml"),
        definitions: fixture("vnfd_define.json"),
        base: fixture("input_param.json"),
        config: None,
        output: Some(output.clone()),
    };
    let mut out = Vec::new();
    let result = pdv_cli::synthesize::run(&args, &mut out);
    let text = output_of(result, out);
    assert!(text.is_empty());

    let written = std::fs::read_to_string(&output).unwrap();
    let schema: Value = serde_json::from_str(&written).unwrap();
    assert!(schema["properties"]["cp0_ip"]["oneOf"].is_array());
}

#[test]
fn test_synthesize_with_custom_root_key() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.yaml");
    std::fs::write(&base, "params:\n  type: object\n").unwrap();
    let config = dir.path().join("pdv.yaml");
    std::fs::write(
        &config,
        "synthesis:\n  root_key: params\n  extra_required: []\n",
    )
    .unwrap();

    let args = SynthesizeArgs {
        template: fixture("parameterized_vnfd.yaml"),
        definitions: fixture("vnfd_define.json"),
        base,
        config: Some(config),
        output: None,
    };
    let mut out = Vec::new();
    let result = pdv_cli::synthesize::run(&args, &mut out);
    let schema: Value = serde_json::from_str(&output_of(result, out)).unwrap();

    assert_eq!(schema["type"], "object");
    let required = schema["required"].as_array().unwrap();
    assert_eq!(required.len(), 6);
    assert!(!required.contains(&Value::String("vnfd_id".into())));
}

#[test]
fn test_synthesize_rejects_unknown_config_key() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("pdv.yaml");
    std::fs::write(&config, "synthesis:\n  seperator: \":\"\n").unwrap();

    let args = SynthesizeArgs {
        template: fixture("parameterized_vnfd.yaml"),
        definitions: fixture("vnfd_define.json"),
        base: fixture("input_param.json"),
        config: Some(config),
        output: None,
    };
    let mut out = Vec::new();
    let err = pdv_cli::synthesize::run(&args, &mut out).unwrap_err();
    assert!(format!("{err}").contains("invalid configuration"));
}

// =========================================================================
// validate
// =========================================================================

#[test]
fn test_validate_document_against_schema_file() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("server.json");
    std::fs::write(
        &schema,
        r#"{"type":"object","properties":{"port":{"type":"integer","minimum":1}},"required":["port"]}"#,
    )
    .unwrap();
    let instance = dir.path().join("server.yaml");
    std::fs::write(&instance, "port: 8080\n").unwrap();

    let args = ValidateArgs {
        instance: instance.clone(),
        schema,
        resource_id: None,
        config: None,
    };
    let mut out = Vec::new();
    let result = run_validate(&args, &mut out);
    let text = output_of(result, out);
    assert!(text.ends_with(": ok\n"));
}

#[test]
fn test_validate_reports_deepest_violation() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("server.json");
    std::fs::write(
        &schema,
        r#"{"type":"object","properties":{"port":{"type":"integer","minimum":1}}}"#,
    )
    .unwrap();
    let instance = dir.path().join("server.json.instance");
    std::fs::write(&instance, r#"{"port": 0}"#).unwrap();

    let args = ValidateArgs {
        instance,
        schema,
        resource_id: None,
        config: None,
    };
    let mut out = Vec::new();
    let err = run_validate(&args, &mut out).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("failed validation"));
    assert!(chain.contains("/port: "));
}

#[test]
fn test_validate_with_fragment_resource_id() {
    let args = ValidateArgs {
        instance: fixture("params/valid/dhcp.yaml"),
        schema: fixture("input_param.json"),
        resource_id: Some("input_param.json#/inputParam".to_string()),
        config: None,
    };
    let mut out = Vec::new();
    let err = run_validate(&args, &mut out).unwrap_err();
    // The base schema alone forbids the template parameters.
    assert!(format!("{err:#}").contains("(root): "));
}

#[test]
fn test_validate_malformed_instance_fails() {
    let dir = tempfile::tempdir().unwrap();
    let instance = dir.path().join("broken.yaml");
    std::fs::write(&instance, "key: [unclosed\n").unwrap();

    let args = ValidateArgs {
        instance,
        schema: fixture("input_param.json"),
        resource_id: None,
        config: None,
    };
    let mut out = Vec::new();
    assert!(run_validate(&args, &mut out).is_err());
}

// =========================================================================
// check-params
// =========================================================================

#[test]
fn test_check_params_valid_files() {
    for name in ["params/valid/dhcp.yaml", "params/valid/static_ip.json"] {
        let mut out = Vec::new();
        let result = run_check_params(&check_params_args(name, None), &mut out);
        let text = output_of(result, out);
        assert!(text.ends_with(": ok\n"), "{name}: {text}");
    }
}

#[test]
fn test_check_params_invalid_files() {
    for name in [
        "params/invalid/odd_maximum.yaml",
        "params/invalid/unknown_parameter.yaml",
        "params/invalid/bad_ip.yaml",
    ] {
        let mut out = Vec::new();
        let result = run_check_params(&check_params_args(name, None), &mut out);
        assert!(result.is_err(), "{name} should fail");
        assert!(out.is_empty());
    }
}

#[test]
fn test_check_params_rejects_ambiguous_definitions_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("pdv.yaml");
    std::fs::write(&config, "synthesis:\n  ambiguous_definitions: reject\n").unwrap();
    let definitions = dir.path().join("defs.json");
    std::fs::write(
        &definitions,
        r#"{"a":{"vcpus":{"type":"integer"}},"b":{"vcpus":{"type":"string"}}}"#,
    )
    .unwrap();
    let template = dir.path().join("template.yaml");
    std::fs::write(&template, "flavor:\n  - vcpus: $vcpus\n").unwrap();
    let params = dir.path().join("params.yaml");
    std::fs::write(&params, "vnfd_id: VNFD-0a1b2c3d\nname: n\nvcpus: 2\n").unwrap();

    let args = CheckParamsArgs {
        params,
        template,
        definitions,
        base: fixture("input_param.json"),
        config: Some(config),
    };
    let mut out = Vec::new();
    let err = run_check_params(&args, &mut out).unwrap_err();
    assert!(format!("{err:#}").contains("vcpus"));
}
