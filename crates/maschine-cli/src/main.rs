//! maschine-tag - Command-line interface for Maschine sampler metadata
//!
//! This binary tags WAV files with NKS and NISound soundinfo, inspects tagged
//! files and validates metadata files.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use maschine_cli::commands;

mod cli_args;

use cli_args::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Tag {
            metadata,
            input,
            input_dir,
            out_dir,
            sidecar,
            keep_chunks,
            keep_filename,
            json,
        } => commands::tag::run(commands::tag::TagArgs {
            metadata_path: &metadata,
            input: input.as_deref(),
            input_dir: input_dir.as_deref(),
            out_dir: &out_dir,
            sidecar,
            keep_chunks,
            keep_filename,
            json_output: json,
        }),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Validate { metadata, json } => commands::validate::run(&metadata, json),
        Commands::Flatten { modes, types, json } => commands::flatten::run(&modes, &types, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_tag_single_file() {
        let cli = Cli::try_parse_from([
            "maschine-tag",
            "tag",
            "--metadata",
            "meta.json",
            "--input",
            "kick.wav",
            "--out-dir",
            "out",
        ])
        .unwrap();
        match cli.command {
            Commands::Tag {
                metadata,
                input,
                input_dir,
                out_dir,
                sidecar,
                keep_chunks,
                keep_filename,
                json,
            } => {
                assert_eq!(metadata, "meta.json");
                assert_eq!(input.as_deref(), Some("kick.wav"));
                assert!(input_dir.is_none());
                assert_eq!(out_dir, "out");
                assert!(!sidecar && !keep_chunks && !keep_filename && !json);
            }
            _ => panic!("expected tag command"),
        }
    }

    #[test]
    fn test_cli_tag_requires_one_input() {
        let err = Cli::try_parse_from([
            "maschine-tag",
            "tag",
            "--metadata",
            "meta.json",
            "--out-dir",
            "out",
        ])
        .err()
        .unwrap();
        assert!(err.to_string().contains("--input"));

        assert!(Cli::try_parse_from([
            "maschine-tag",
            "tag",
            "--metadata",
            "meta.json",
            "--input",
            "a.wav",
            "--input-dir",
            "samples",
            "--out-dir",
            "out",
        ])
        .is_err());
    }

    #[test]
    fn test_cli_parses_tag_flags() {
        let cli = Cli::try_parse_from([
            "maschine-tag",
            "tag",
            "-m",
            "meta.json",
            "--input-dir",
            "samples",
            "-o",
            "out",
            "--sidecar",
            "--keep-chunks",
            "--keep-filename",
            "--json",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Tag {
                input_dir,
                sidecar,
                keep_chunks,
                keep_filename,
                json,
                ..
            } => {
                assert_eq!(input_dir.as_deref(), Some("samples"));
                assert!(sidecar && keep_chunks && keep_filename && json);
            }
            _ => panic!("expected tag command"),
        }
    }

    #[test]
    fn test_cli_parses_inspect() {
        let cli = Cli::try_parse_from(["maschine-tag", "inspect", "-i", "kick.wav"]).unwrap();
        match cli.command {
            Commands::Inspect { input, json } => {
                assert_eq!(input, "kick.wav");
                assert!(!json);
            }
            _ => panic!("expected inspect command"),
        }
    }

    #[test]
    fn test_cli_parses_validate() {
        let cli =
            Cli::try_parse_from(["maschine-tag", "validate", "--metadata", "m.json", "--json"])
                .unwrap();
        match cli.command {
            Commands::Validate { metadata, json } => {
                assert_eq!(metadata, "m.json");
                assert!(json);
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_cli_parses_flatten() {
        let cli = Cli::try_parse_from([
            "maschine-tag",
            "flatten",
            "--modes",
            "Additive,Analog",
            "--types",
            "Bass/Synth Bass",
            "Drums",
        ])
        .unwrap();
        match cli.command {
            Commands::Flatten { modes, types, json } => {
                assert_eq!(modes, vec!["Additive", "Analog"]);
                assert_eq!(types, vec!["Bass/Synth Bass", "Drums"]);
                assert!(!json);
            }
            _ => panic!("expected flatten command"),
        }
    }
}
