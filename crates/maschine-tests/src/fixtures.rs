//! Test fixture utilities for creating sample libraries on disk.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use maschine_codec::riff::{FourCc, RiffBuilder};

/// Builds a WAVE buffer with a 16-byte `fmt ` chunk, a short `data` chunk and
/// any extra chunks, in that order.
pub fn sample_wav(extra: &[(&str, &[u8])]) -> Vec<u8> {
    let mut riff = RiffBuilder::new(FourCc::WAVE);
    riff.push_chunk(FourCc::FMT, &[0u8; 16]).expect("fmt chunk");
    riff.push_chunk(FourCc::DATA, &[1, 2, 3, 4, 5]).expect("data chunk");
    for (id, payload) in extra {
        riff.push_chunk_str(id, payload).expect("extra chunk");
    }
    riff.finish().expect("RIFF buffer")
}

/// A sample library with an input directory and an output directory.
pub struct SampleLibraryFixture {
    pub root: TempDir,
    pub input_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl SampleLibraryFixture {
    /// Create a new empty fixture.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let input_dir = root.path().join("samples");
        let out_dir = root.path().join("out");
        fs::create_dir_all(&input_dir).expect("Failed to create samples dir");
        Self {
            root,
            input_dir,
            out_dir,
        }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write a file relative to the input directory.
    pub fn add_file(&self, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.input_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Add a minimal WAV file.
    pub fn add_wav(&self, relative: &str) -> PathBuf {
        self.add_file(relative, &sample_wav(&[]))
    }

    /// Add a sidecar metadata file next to a WAV file.
    pub fn add_sidecar(&self, wav_relative: &str, json: &serde_json::Value) -> PathBuf {
        let relative = Path::new(wav_relative).with_extension("json");
        self.add_file(&relative.to_string_lossy(), json.to_string().as_bytes())
    }

    /// Write the shared metadata file at the fixture root.
    pub fn write_metadata(&self, json: &serde_json::Value) -> PathBuf {
        let path = self.root.path().join("metadata.json");
        fs::write(&path, serde_json::to_string_pretty(json).expect("JSON"))
            .expect("Failed to write metadata");
        path
    }

    /// File names in the output directory, sorted.
    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(&self.out_dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Read a file from the output directory.
    pub fn read_output(&self, name: &str) -> Vec<u8> {
        fs::read(self.out_dir.join(name)).expect("Failed to read output file")
    }
}

impl Default for SampleLibraryFixture {
    fn default() -> Self {
        Self::new()
    }
}
