//! Tag command implementation
//!
//! Embeds sampler metadata into one WAV file or every WAV file under a
//! directory and writes the tagged files to an output directory.

use anyhow::{Context, Result};
use colored::Colorize;
use maschine_codec::{tag_file, MetadataSource, SourceFile};
use maschine_meta::MetaError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use walkdir::WalkDir;

use super::json_output::{
    error_codes, meta_error_to_json, print_json, tag_error_to_json, JsonError, TagFileResult,
    TagOutput,
};
use super::metadata::{literal_source, load_metadata_value, sidecar_source, Overrides};
use super::reporting::print_error;

/// Arguments of the tag command.
#[derive(Debug, Clone, Copy)]
pub struct TagArgs<'a> {
    /// Path to the metadata JSON file
    pub metadata_path: &'a str,
    /// Single WAV file to tag
    pub input: Option<&'a str>,
    /// Directory to scan for WAV files
    pub input_dir: Option<&'a str>,
    /// Output directory
    pub out_dir: &'a str,
    /// Merge per-file sidecar metadata
    pub sidecar: bool,
    /// Keep every source chunk
    pub keep_chunks: bool,
    /// Keep the source file name
    pub keep_filename: bool,
    /// Whether to output machine-readable JSON
    pub json_output: bool,
}

/// Run the tag command
///
/// # Returns
/// Exit code: 0 if every file was tagged, 1 otherwise
pub fn run(args: TagArgs<'_>) -> Result<ExitCode> {
    let start = Instant::now();
    let overrides = Overrides {
        keep_chunks: args.keep_chunks,
        keep_filename: args.keep_filename,
    };

    let source = match build_source(args.metadata_path, args.sidecar, overrides) {
        Ok(source) => source,
        Err(errors) => return report_metadata_failure(args, errors),
    };

    let inputs = collect_inputs(args.input, args.input_dir)?;
    let out_dir = Path::new(args.out_dir);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", args.out_dir))?;

    if !args.json_output {
        println!("{} {}", "Metadata:".cyan().bold(), args.metadata_path);
        println!("{} {}", "Output directory:".cyan().bold(), args.out_dir);
        println!(
            "{} Found {} WAV file(s) to tag",
            "INFO".blue().bold(),
            inputs.len()
        );
    }

    let mut results = Vec::with_capacity(inputs.len());
    let mut written = HashSet::new();
    for input in &inputs {
        let result = tag_one(input, &source, out_dir, &mut written);
        if !args.json_output {
            print_file_result(&result);
        }
        results.push(result);
    }

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    let duration_ms = start.elapsed().as_millis() as u64;

    if args.json_output {
        print_json(&TagOutput {
            success: failed == 0,
            errors: Vec::new(),
            files: results,
        })?;
    } else if failed == 0 {
        println!(
            "\n{} Tagged {} file(s) ({}ms)",
            "SUCCESS".green().bold(),
            results.len(),
            duration_ms
        );
    } else {
        println!(
            "\n{} {} of {} file(s) failed ({}ms)",
            "FAILED".red().bold(),
            failed,
            results.len(),
            duration_ms
        );
    }

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn build_source(
    metadata_path: &str,
    sidecar: bool,
    overrides: Overrides,
) -> std::result::Result<MetadataSource, Vec<JsonError>> {
    let to_json = |e: MetaError| {
        meta_error_to_json(&e)
            .into_iter()
            .map(|err| err.with_file(metadata_path))
            .collect::<Vec<_>>()
    };
    let value = load_metadata_value(Path::new(metadata_path)).map_err(to_json)?;
    if sidecar {
        Ok(sidecar_source(value, overrides))
    } else {
        literal_source(value, overrides).map_err(to_json)
    }
}

fn report_metadata_failure(args: TagArgs<'_>, errors: Vec<JsonError>) -> Result<ExitCode> {
    if args.json_output {
        print_json(&TagOutput {
            success: false,
            errors,
            files: Vec::new(),
        })?;
    } else {
        println!("{} {}", "Metadata:".cyan().bold(), args.metadata_path);
        for error in &errors {
            print_error(error);
        }
        println!("\n{} Metadata is invalid", "FAILED".red().bold());
    }
    Ok(ExitCode::from(1))
}

/// Collects the WAV files to tag, sorted for a deterministic order.
pub fn collect_inputs(input: Option<&str>, input_dir: Option<&str>) -> Result<Vec<PathBuf>> {
    if let Some(input) = input {
        return Ok(vec![PathBuf::from(input)]);
    }
    let Some(dir) = input_dir else {
        anyhow::bail!("either --input or --input-dir is required");
    };
    if !Path::new(dir).is_dir() {
        anyhow::bail!("input directory does not exist: {}", dir);
    }

    let mut inputs: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| is_wav(path))
        .collect();
    inputs.sort();
    Ok(inputs)
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

/// Tags one input and writes it under `out_dir`.
///
/// An output path already written during this run is never overwritten.
fn tag_one(
    input: &Path,
    source: &MetadataSource,
    out_dir: &Path,
    written: &mut HashSet<PathBuf>,
) -> TagFileResult {
    let input_str = input.display().to_string();
    let failure = |errors: Vec<JsonError>| TagFileResult {
        input: input_str.clone(),
        output: None,
        errors,
    };

    let contents = match fs::read(input) {
        Ok(contents) => contents,
        Err(e) => {
            return failure(vec![JsonError::new(
                error_codes::FILE_READ,
                format!("Failed to read {}: {}", input_str, e),
            )])
        }
    };

    let tagged = match tag_file(&SourceFile::new(input, contents), source) {
        Ok(tagged) => tagged,
        Err(e) => {
            tracing::debug!(input = %input_str, error = %e, "tagging failed");
            return failure(tag_error_to_json(&e));
        }
    };

    let Some(file_name) = tagged.path.file_name() else {
        return failure(vec![JsonError::new(
            error_codes::FILE_WRITE,
            format!("Output path has no file name: {}", tagged.path.display()),
        )]);
    };
    let output = out_dir.join(file_name);
    if written.contains(&output) {
        return failure(vec![JsonError::new(
            error_codes::OUTPUT_COLLISION,
            format!(
                "Output {} was already written by an earlier input",
                output.display()
            ),
        )]);
    }
    if let Err(e) = fs::write(&output, &tagged.contents) {
        return failure(vec![JsonError::new(
            error_codes::FILE_WRITE,
            format!("Failed to write {}: {}", output.display(), e),
        )]);
    }
    written.insert(output.clone());

    TagFileResult {
        input: input_str,
        output: Some(output.display().to_string()),
        errors: Vec::new(),
    }
}

fn print_file_result(result: &TagFileResult) {
    match &result.output {
        Some(output) => println!("  {} {} -> {}", "✓".green(), result.input, output),
        None => {
            println!("  {} {}", "✗".red(), result.input);
            for error in &result.errors {
                print_error(error);
            }
        }
    }
}
