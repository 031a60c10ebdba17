//! pathex CLI — driving adapter for the pathex extraction engine.
//!
//! Subcommands:
//! - `extract <paths> <document>` — print every hit as `<name>\t<json>`
//! - `check <paths>` — validate a path config without reading any document
//!
//! Path configs and documents are JSON when the file ends in `.json`, YAML otherwise.
//! A JSON document may hold several top-level values; a YAML document holds one.

use std::path::Path;
use std::process;

use pathex::prelude::*;
use pathex::ExtractorConfig;
use tracing_subscriber::EnvFilter;

/// Hits collected during one extraction: `(label, value)`.
type Hits = Vec<(String, serde_json::Value)>;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "extract" => cmd_extract(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_extract(args: &[String]) -> Result<(), String> {
    let [config_path, document_path] = args else {
        return Err("extract requires a path config and a document".into());
    };

    let config = load_config(config_path)?;
    let documents = load_documents(document_path)?;
    for line in extract_lines(&config, documents)? {
        println!("{line}");
    }

    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let [config_path] = args else {
        return Err("check requires a path config".into());
    };

    let config = load_config(config_path)?;
    let extractor = build_extractor(&config)?;

    println!("Config valid: {} path(s)", extractor.len());
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Extraction (composition root)
// ═══════════════════════════════════════════════════════════════════════════════

/// Build an extractor whose callbacks record `(label, value)` and request the
/// configured step-out.
fn build_extractor(config: &ExtractorConfig) -> Result<PathExtractor<TreeCursor, Hits>, String> {
    PathExtractorBuilder::<TreeCursor, Hits>::from_config(config, |path| {
        let label = path.label().to_string();
        let step_out = path.step_out;
        move |cursor: &mut TreeCursor, hits: &mut Hits| -> Result<usize, TreeCursorError> {
            let value = cursor
                .current_element()
                .ok_or(TreeCursorError::NoCurrentValue)?;
            hits.push((label.clone(), value.to_json()));
            Ok(step_out)
        }
    })
    .map(PathExtractorBuilder::build)
    .map_err(|e| format!("config invalid: {e}"))
}

fn extract_lines(config: &ExtractorConfig, documents: Vec<Element>) -> Result<Vec<String>, String> {
    let extractor = build_extractor(config)?;
    tracing::info!(
        paths = extractor.len(),
        documents = documents.len(),
        "extracting"
    );

    let mut cursor = TreeCursor::new(documents);
    let mut hits = Hits::new();
    extractor
        .extract_with(&mut cursor, &mut hits)
        .map_err(|e| format!("extraction failed: {e}"))?;

    Ok(hits
        .into_iter()
        .map(|(label, value)| format!("{label}\t{value}"))
        .collect())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════════════════

fn read_file(path: &str) -> Result<(String, bool), String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    Ok((content, is_json))
}

fn load_config(path: &str) -> Result<ExtractorConfig, String> {
    let (content, is_json) = read_file(path)?;
    parse_config(&content, is_json)
}

fn parse_config(content: &str, is_json: bool) -> Result<ExtractorConfig, String> {
    if is_json {
        serde_json::from_str(content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

fn load_documents(path: &str) -> Result<Vec<Element>, String> {
    let (content, is_json) = read_file(path)?;
    parse_documents(&content, is_json)
}

/// Top-level values of a document. JSON may be a whitespace-separated stream.
fn parse_documents(content: &str, is_json: bool) -> Result<Vec<Element>, String> {
    if is_json {
        serde_json::Deserializer::from_str(content)
            .into_iter::<serde_json::Value>()
            .map(|value| {
                value
                    .map(|v| Element::from(&v))
                    .map_err(|e| format!("JSON parse error: {e}"))
            })
            .collect()
    } else {
        let value: serde_json::Value =
            serde_yaml::from_str(content).map_err(|e| format!("YAML parse error: {e}"))?;
        Ok(vec![Element::from(&value)])
    }
}

fn print_usage() {
    eprintln!(
        "Usage: pathex <command> [options]

Commands:
  extract <paths> <document>   Print each hit as <name>\\t<json>
  check <paths>                Validate a path config
  help                         Show this help

Logging is controlled by RUST_LOG (default: warn)."
    );
}
