// Tests for report formatting and the output writer

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use shapeguard_core::{validate, SchemaSpec, ValueType};
use std::cell::RefCell;
use std::rc::Rc;

/// Writer that keeps everything written for inspection
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn sample_report() -> ValidationReport {
    let spec = SchemaSpec::mapping([
        ("hello", SchemaSpec::exact(ValueType::Int)),
        (
            "id",
            SchemaSpec::from((ValueType::Int, ValueType::Str)),
        ),
    ])
    .unwrap();

    let bad = json!({"hello": "x", "id": 1});
    let error = validate(&bad, &spec).unwrap_err();

    let mut report = ValidationReport::new(PathBuf::from("greeting.yaml"));
    report.documents.push(DocumentReport {
        path: PathBuf::from("good.json"),
        valid: true,
        errors: Vec::new(),
    });
    report.documents.push(DocumentReport {
        path: PathBuf::from("bad.json"),
        valid: false,
        errors: vec![error.diagnostic()],
    });
    report
}

#[test]
fn test_report_counts() {
    let report = sample_report();
    assert_eq!(report.total(), 2);
    assert_eq!(report.failed(), 1);
    assert!(!report.is_success());
}

#[test]
fn test_report_human_plain() {
    let formatted = OutputFormat::Human
        .format_report(&sample_report(), false, false)
        .unwrap();

    assert_eq!(
        formatted,
        "✓ good.json\n\
         ✗ bad.json\n  \
         1. at $['hello']: expected value of type int, but got \"x\" of type str\n\
         \n\
         1 of 2 document(s) failed validation against greeting.yaml"
    );
}

#[test]
fn test_report_human_detailed() {
    let formatted = OutputFormat::Human
        .format_report(&sample_report(), true, false)
        .unwrap();

    assert!(formatted.contains("     kind: type_mismatch"));
    assert!(formatted.contains("     expected: int"));
    assert!(formatted.contains("     actual type: str"));
}

#[test]
fn test_alternation_reasons_are_indented() {
    let spec = SchemaSpec::from((ValueType::Int, ValueType::Str));
    let error = validate(&json!(1.5), &spec).unwrap_err();

    let mut report = ValidationReport::new(PathBuf::from("id.yaml"));
    report.documents.push(DocumentReport {
        path: PathBuf::from("value.json"),
        valid: false,
        errors: vec![error.diagnostic()],
    });

    let formatted = OutputFormat::Human.format_report(&report, false, false).unwrap();
    let lines: Vec<&str> = formatted.lines().collect();
    assert_eq!(lines[1], "  1. at $: value did not match any of 2 alternatives:");
    assert!(lines[2].starts_with("       branch 0: at $[0]: expected value of type int"));
    assert!(lines[3].starts_with("       branch 1: at $[1]: expected value of type str"));
}

#[test]
fn test_report_json() {
    let formatted = OutputFormat::Json
        .format_report(&sample_report(), false, false)
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&formatted).unwrap();

    assert_eq!(parsed["schema"], "greeting.yaml");
    assert_eq!(parsed["documents"][0]["valid"], true);
    assert!(parsed["documents"][0].get("errors").is_none());
    assert_eq!(parsed["documents"][1]["errors"][0]["kind"], "type_mismatch");
    assert_eq!(parsed["documents"][1]["errors"][0]["path"], "$['hello']");
    assert_eq!(parsed["documents"][1]["errors"][0]["actual"], "x");
}

#[test]
fn test_report_yaml() {
    let formatted = OutputFormat::Yaml
        .format_report(&sample_report(), false, false)
        .unwrap();
    assert!(formatted.contains("schema: greeting.yaml"));
    assert!(formatted.contains("kind: type_mismatch"));
}

#[test]
fn test_writer_messages_human() {
    let buffer = SharedBuffer::default();
    let mut writer = OutputWriter::with_writer(OutputFormat::Human, false, false, Box::new(buffer.clone()));

    writer.info("loading").unwrap();
    writer.warning("careful").unwrap();
    writer.section("Schema").unwrap();

    assert_eq!(
        buffer.contents(),
        "INFO: loading\nWARNING: careful\n\n=== Schema ===\n"
    );
    assert!(writer.progress_bar(10, "validating").is_none());
}

#[test]
fn test_writer_quiet_and_machine_formats() {
    let buffer = SharedBuffer::default();
    let mut writer = OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));
    writer.info("hidden").unwrap();
    writer.success("hidden").unwrap();
    writer.warning("shown").unwrap();
    assert_eq!(buffer.contents(), "WARNING: shown\n");

    let buffer = SharedBuffer::default();
    let mut writer = OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(buffer.clone()));
    writer.info("hidden").unwrap();
    writer.data(&json!({"kind": "mapping"})).unwrap();
    assert_eq!(buffer.contents(), "{\"kind\":\"mapping\"}\n");
}
