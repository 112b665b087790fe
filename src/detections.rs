// src/detections.rs
//
// Input side of the pipeline: detection records exported by the upstream
// model, one JSON record per line (JSONL), one file per recording.

use crate::types::Detection;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Find detection files under a directory, recursively.
pub fn find_detection_files(dir: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let detection_extensions = ["jsonl", "ndjson"];

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if detection_extensions.contains(&ext.to_ascii_lowercase().as_str()) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    info!("Found {} detection file(s)", files.len());
    Ok(files)
}

/// Streaming reader over one recording's detection records.
pub struct DetectionReader {
    lines: Lines<BufReader<File>>,
    path: PathBuf,
    line_number: usize,
}

impl DetectionReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open detection file: {}", path.display()))?;

        Ok(Self {
            lines: BufReader::new(file).lines(),
            path: path.to_path_buf(),
            line_number: 0,
        })
    }

    /// Next record, or `None` at end of file. Blank lines are skipped;
    /// a malformed line is an error.
    pub fn next_detection(&mut self) -> Result<Option<Detection>> {
        loop {
            let line = match self.lines.next() {
                Some(line) => line?,
                None => return Ok(None),
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            let detection: Detection = serde_json::from_str(&line).with_context(|| {
                format!(
                    "Malformed detection record at {}:{}",
                    self.path.display(),
                    self.line_number
                )
            })?;

            return Ok(Some(detection));
        }
    }
}
