//! Assembler smoke-test driver.
//!
//! The assembler is a black box reached through its command-line contract:
//! `<assembler> -o <output> <input>`, producing a binary file on success and
//! a non-zero exit code on failure.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub struct SmokeRunner {
    assembler: PathBuf,
    out_dir: PathBuf,
}

/// Outcome of assembling one smoke-test source.
#[derive(Debug)]
pub struct SmokeCase {
    pub source: PathBuf,
    pub output: PathBuf,
    pub passed: bool,
}

#[derive(Debug, Default)]
pub struct SmokeReport {
    pub cases: Vec<SmokeCase>,
}

impl SmokeReport {
    pub fn failed(&self) -> usize {
        self.cases.iter().filter(|case| !case.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

impl SmokeRunner {
    pub fn new(assembler: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            assembler: assembler.into(),
            out_dir: out_dir.into(),
        }
    }

    /// Assembles every `*.s` source under `test_dir`, one process per file.
    pub fn run_dir(&self, test_dir: &Path) -> Result<SmokeReport, SmokeError> {
        let mut report = SmokeReport::default();
        for source in collect_sources(test_dir)? {
            report.cases.push(self.run_case(&source)?);
        }
        Ok(report)
    }

    /// Runs the assembler over a single source, checking its exit status.
    pub fn run_case(&self, source: &Path) -> Result<SmokeCase, SmokeError> {
        fs::create_dir_all(&self.out_dir).map_err(SmokeError::Io)?;
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "out".to_string());
        let output = self.out_dir.join(format!("{stem}.bin"));
        let status = Command::new(&self.assembler)
            .arg("-o")
            .arg(&output)
            .arg(source)
            .status()
            .map_err(SmokeError::Io)?;
        Ok(SmokeCase {
            source: source.to_path_buf(),
            output,
            passed: status.success(),
        })
    }
}

/// All `*.s` files directly under `test_dir`, sorted for a deterministic
/// run order.
pub fn collect_sources(test_dir: &Path) -> Result<Vec<PathBuf>, SmokeError> {
    let mut sources = Vec::new();
    for entry in fs::read_dir(test_dir).map_err(SmokeError::Io)? {
        let path = entry.map_err(SmokeError::Io)?.path();
        if path.extension().is_some_and(|ext| ext == "s") {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

#[derive(Debug)]
pub enum SmokeError {
    Io(std::io::Error),
}

impl fmt::Display for SmokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmokeError::Io(err) => write!(f, "smoke runner I/O error: {err}"),
        }
    }
}

impl std::error::Error for SmokeError {}
