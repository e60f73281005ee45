//! Inspect command handler

use super::utils::resolve_schema_path;
use crate::cli::{InspectArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use serde::Serialize;
use serde_json::Value;
use shapeguard_core::SchemaSpec;
use shapeguard_schemas::{SchemaCompiler, SchemaLoader};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Structural summary of a compiled schema
#[derive(Debug, Serialize)]
struct SchemaSummary<'a> {
    path: PathBuf,
    kind: &'static str,
    depth: usize,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notation: Option<Value>,
    spec: &'a SchemaSpec,
}

/// Handle the inspect command
#[instrument(skip(args, config, output), fields(schema = %args.schema))]
pub fn handle_inspect(args: InspectArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let schema_path = resolve_schema_path(&args.schema, config)?;
    let spec = SchemaLoader::new().load_schema(&schema_path)?;
    info!(schema = %schema_path.display(), kind = spec.kind_name(), "Schema compiled");

    let summary = SchemaSummary {
        path: schema_path,
        kind: spec.kind_name(),
        depth: spec.depth(),
        description: spec.to_string(),
        notation: args.notation.then(|| SchemaCompiler::new().to_notation(&spec)),
        spec: spec.as_ref(),
    };

    if output.format() != OutputFormat::Human {
        return output.data(&summary);
    }

    output.success(&format!("✓ {} compiles", summary.path.display()))?;
    output.section("Schema")?;
    output.writeln(&format!("Kind:        {}", summary.kind))?;
    output.writeln(&format!("Depth:       {}", summary.depth))?;
    output.writeln(&format!("Description: {}", summary.description))?;

    if let Some(notation) = &summary.notation {
        output.section("Notation")?;
        output.data(notation)?;
    }

    Ok(())
}
