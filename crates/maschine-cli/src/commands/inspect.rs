//! Inspect command implementation
//!
//! Decodes the NKS and NISound soundinfo embedded in a tagged WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use maschine_codec::{inspect_wav, NiSoundInfo, NksSoundInfo, SoundInfo};
use std::fs;
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, InspectOutput, JsonError};
use super::reporting::{print_error, print_warning};

/// Run the inspect command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if soundinfo was found and decoded, 1 otherwise
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    let contents = fs::read(input).with_context(|| format!("Failed to read file: {}", input))?;
    let decoded = decode(&contents);

    if json_output {
        let output = match decoded {
            Ok(info) => InspectOutput {
                success: true,
                input: input.to_string(),
                soundinfo: Some(info),
                errors: Vec::new(),
            },
            Err(error) => InspectOutput {
                success: false,
                input: input.to_string(),
                soundinfo: None,
                errors: vec![error.with_file(input)],
            },
        };
        let success = output.success;
        print_json(&output)?;
        return Ok(exit_code(success));
    }

    println!("{} {}", "Inspecting:".cyan().bold(), input);
    match decoded {
        Ok(info) => {
            print_soundinfo(&info);
            let warnings = info.warning_count();
            if warnings == 0 {
                println!("\n{} Soundinfo decoded", "SUCCESS".green().bold());
            } else {
                println!(
                    "\n{} Soundinfo decoded with {} warning(s)",
                    "SUCCESS".green().bold(),
                    warnings
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            print_error(&error);
            println!("\n{} Could not decode soundinfo", "FAILED".red().bold());
            Ok(ExitCode::from(1))
        }
    }
}

fn decode(contents: &[u8]) -> std::result::Result<SoundInfo, JsonError> {
    match inspect_wav(contents) {
        Ok(Some(info)) if !info.is_empty() => Ok(info),
        Ok(_) => Err(JsonError::new(
            error_codes::NO_SOUNDINFO,
            "file carries no soundinfo",
        )),
        Err(e) => Err(JsonError::new(error_codes::DECODE, e.to_string())),
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn print_soundinfo(info: &SoundInfo) {
    if let Some(nks) = &info.nks {
        print_nks(nks);
    }
    if let Some(nisound) = &info.nisound {
        print_nisound(nisound);
    }
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<12} {}", format!("{}:", label).dimmed(), value);
}

fn print_nks(nks: &NksSoundInfo) {
    println!("\n{}", "NKS".bold());
    field("name", &nks.name);
    field("author", &nks.author);
    field("vendor", &nks.vendor);
    field("comment", &nks.comment);
    field("deviceType", &nks.device_type);
    field("bankchain", nks.bankchain.to_vec().join(" / "));
    field("modes", nks.modes.join(", "));
    let types: Vec<String> = nks.types.iter().map(|t| t.join(" / ")).collect();
    field("types", types.join(", "));
    field("tempo", nks.tempo);
}

fn print_nisound(nisound: &NiSoundInfo) {
    println!("\n{}", "NISound".bold());
    field("name", &nisound.name);
    field("author", &nisound.author);
    field("vendor", &nisound.vendor);
    field("comment", &nisound.comment);
    let device = nisound
        .device_type()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    field("device", format!("{} (flag {})", device, nisound.device_flag));
    field("bankchain", nisound.bankchain.join(" / "));
    field("categories", nisound.categories.join(", "));
    for (key, value) in &nisound.properties {
        field(key, value);
    }
    if !nisound.trailing.is_empty() {
        field("trailing", format!("{} byte(s)", nisound.trailing.len()));
    }
    for warning in &nisound.warnings {
        print_warning(&warning.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maschine_codec::riff::{FourCc, RiffBuilder};
    use maschine_codec::build_id3_chunk;
    use maschine_meta::MetadataRecord;
    use pretty_assertions::assert_eq;

    fn wav(id3: Option<Vec<u8>>) -> Vec<u8> {
        let mut riff = RiffBuilder::new(FourCc::WAVE);
        riff.push_chunk(FourCc::FMT, &[0; 16]).unwrap();
        riff.push_chunk(FourCc::DATA, &[0; 4]).unwrap();
        if let Some(id3) = id3 {
            riff.push_chunk(FourCc::ID3, &id3).unwrap();
        }
        riff.finish().unwrap()
    }

    #[test]
    fn test_decode_tagged() {
        let record = MetadataRecord::builder("Kick").build();
        let info = decode(&wav(Some(build_id3_chunk(&record).unwrap()))).unwrap();
        assert_eq!(info.nks.unwrap().name, "Kick");
    }

    #[test]
    fn test_decode_untagged() {
        let err = decode(&wav(None)).unwrap_err();
        assert_eq!(err.code, error_codes::NO_SOUNDINFO);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode(b"not a wav file").unwrap_err();
        assert_eq!(err.code, error_codes::DECODE);
    }
}
