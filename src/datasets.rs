use std::fs;
use std::path::Path;

use crate::error::{Result, SpkError};
use crate::matrix::PointMatrix;

const PERMITTED_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Reads headerless comma-separated point files.
#[derive(Debug, Default, Clone)]
pub struct DatasetLoader;

impl DatasetLoader {
    pub fn load(path: impl AsRef<Path>) -> Result<PointMatrix> {
        let path = path.as_ref();
        Self::check_path(path)?;
        let content = fs::read_to_string(path)
            .map_err(|err| SpkError::generic(format!("read {:?}: {err}", path)))?;
        Self::parse(&content)
    }

    /// Path must exist and end in one of the permitted extensions.
    pub fn check_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(SpkError::invalid(format!(
                "specified path does not exist - {:?}",
                path
            )));
        }
        let name = path.to_string_lossy().to_lowercase();
        if !PERMITTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            return Err(SpkError::invalid(format!(
                "specified path does not end in a permitted extension - {:?}",
                path
            )));
        }
        Ok(())
    }

    pub fn parse(content: &str) -> Result<PointMatrix> {
        let mut rows = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .split(',')
                .map(|cell| {
                    cell.trim().parse::<f64>().map_err(|err| {
                        SpkError::generic(format!(
                            "line {}: cannot parse {:?} as a number: {err}",
                            line_no + 1,
                            cell
                        ))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            rows.push(row);
        }
        PointMatrix::from_rows(&rows)
    }
}
