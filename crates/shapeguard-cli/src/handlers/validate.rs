//! Validation command handler

use super::utils::{ensure_exists, resolve_schema_path};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{DocumentReport, OutputWriter, ValidationReport};
use shapeguard_core::{
    match_with_config, KeyPath, MatchConfig, MatchMode, SchemaError, SchemaSpec,
};
use shapeguard_schemas::SchemaLoader;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(
    skip(args, config, output),
    fields(schema = %args.schema, documents = args.values.len())
)]
pub fn handle_validate(
    args: ValidateArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("schema: {}", args.schema));
    let match_config = config.match_config(args.collect_all, args.max_errors)?;
    debug!(
        mode = ?match_config.mode,
        max_errors = match_config.max_errors,
        "Resolved match configuration"
    );

    let schema_path = resolve_schema_path(&args.schema, config)?;
    let mut loader = SchemaLoader::new();
    let spec = {
        let _load_timer = Timer::new("schema_loading");
        loader.load_schema(&schema_path)?
    };
    info!(schema = %schema_path.display(), kind = spec.kind_name(), "Schema loaded");
    output.info(&format!(
        "Validating {} document(s) against {}",
        args.values.len(),
        schema_path.display()
    ))?;

    let progress = if args.values.len() > 1 {
        output.progress_bar(args.values.len() as u64, "validating")
    } else {
        None
    };

    let mut report = ValidationReport::new(schema_path);
    for path in &args.values {
        let document = validate_document(&loader, path, &spec, &match_config)?;
        if !document.valid {
            warn!(
                document = %path.display(),
                errors = document.errors.len(),
                "Document failed validation"
            );
        }
        if hit_error_cap(&match_config, document.errors.len()) {
            output.warning(&format!(
                "{}: stopped after {} error(s); further errors not reported",
                path.display(),
                match_config.max_errors
            ))?;
        }
        report.documents.push(document);

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    output.report(&report, args.detailed)?;

    info!(failed = report.failed(), total = report.total(), "Validation finished");
    if report.is_success() {
        Ok(())
    } else {
        Err(Error::ValidationFailed {
            failed: report.failed(),
            total: report.total(),
        })
    }
}

fn hit_error_cap(config: &MatchConfig, errors: usize) -> bool {
    config.mode == MatchMode::CollectAll && config.max_errors > 0 && errors >= config.max_errors
}

/// Load one value document and match it against `spec`
fn validate_document(
    loader: &SchemaLoader,
    path: &Path,
    spec: &SchemaSpec,
    config: &MatchConfig,
) -> Result<DocumentReport> {
    ensure_exists(path)?;
    let value = loader.load_value(path)?;

    let errors = match match_with_config(&value, spec, &KeyPath::root(), config) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.iter().map(SchemaError::diagnostic).collect(),
    };
    debug!(document = %path.display(), errors = errors.len(), "Document matched");

    Ok(DocumentReport {
        path: path.to_path_buf(),
        valid: errors.is_empty(),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::fs;
    use tempfile::tempdir;

    fn args(schema: &Path, values: Vec<std::path::PathBuf>, collect_all: bool) -> ValidateArgs {
        ValidateArgs {
            schema: schema.display().to_string(),
            values,
            collect_all,
            max_errors: None,
            detailed: false,
        }
    }

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()))
    }

    #[test]
    fn test_valid_documents() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("greeting.yaml");
        fs::write(&schema, "hello: int\nworld: [str]\n").unwrap();
        let value = dir.path().join("value.json");
        fs::write(&value, r#"{"hello": 1, "world": ["a", "b"]}"#).unwrap();

        let result = handle_validate(args(&schema, vec![value], false), &Config::default(), &mut quiet_output());
        assert!(result.is_ok());
    }

    #[test]
    fn test_failed_documents_are_counted() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("greeting.yaml");
        fs::write(&schema, "hello: int\n").unwrap();
        let good = dir.path().join("good.yaml");
        fs::write(&good, "hello: 1\n").unwrap();
        let bad = dir.path().join("bad.yaml");
        fs::write(&bad, "hello: one\nextra: true\n").unwrap();

        let result = handle_validate(
            args(&schema, vec![good, bad], true),
            &Config::default(),
            &mut quiet_output(),
        );
        match result {
            Err(Error::ValidationFailed { failed, total }) => {
                assert_eq!(failed, 1);
                assert_eq!(total, 2);
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_collect_all_reports_every_failure() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("pair.json");
        fs::write(&schema, r#"{"a": "int", "b": "str"}"#).unwrap();
        let value = dir.path().join("value.json");
        fs::write(&value, r#"{"a": "x", "b": 2}"#).unwrap();

        let loader = SchemaLoader::new();
        let spec = SchemaLoader::new().load_schema(&schema).unwrap();

        let document = validate_document(&loader, &value, &spec, &MatchConfig::collect_all()).unwrap();
        assert!(!document.valid);
        assert_eq!(document.errors.len(), 2);
        assert_eq!(document.errors[0].path, "$['a']");
        assert_eq!(document.errors[1].path, "$['b']");

        let document = validate_document(&loader, &value, &spec, &MatchConfig::fail_fast()).unwrap();
        assert_eq!(document.errors.len(), 1);
    }

    #[test]
    fn test_error_cap_detection() {
        let capped = MatchConfig::collect_all().with_max_errors(2);
        assert!(hit_error_cap(&capped, 2));
        assert!(!hit_error_cap(&capped, 1));
        assert!(!hit_error_cap(&MatchConfig::collect_all(), 50));
        assert!(!hit_error_cap(&MatchConfig::fail_fast().with_max_errors(1), 1));
    }

    #[test]
    fn test_missing_value_document() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("value.yaml");
        fs::write(&schema, "int\n").unwrap();

        let result = handle_validate(
            args(&schema, vec![dir.path().join("missing.json")], false),
            &Config::default(),
            &mut quiet_output(),
        );
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_max_errors_requires_collect_all() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("value.yaml");
        fs::write(&schema, "int\n").unwrap();

        let mut validate_args = args(&schema, vec![dir.path().join("value.json")], false);
        validate_args.max_errors = Some(1);
        let result = handle_validate(validate_args, &Config::default(), &mut quiet_output());
        assert!(matches!(result, Err(Error::InvalidArgs(_))));
    }
}
