//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::CliError;

/// Reads values for batch coercion
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text; `-` reads standard input
    pub fn read_text(path: &Path) -> Result<String> {
        if path == Path::new("-") {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read standard input")?;
            return Ok(content);
        }

        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read one value per line
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped; other whitespace is
    /// kept, so a blank line is an empty value.
    pub fn read_lines(path: &Path) -> Result<Vec<String>> {
        let content = Self::read_text(path)?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("values.txt");

        let content = "42\nnotanumber\n";
        fs::write(&file_path, content).unwrap();

        let result = FileReader::read_text(&file_path).unwrap();
        assert_eq!(result, content);
    }

    #[test]
    fn test_read_text_nonexistent_file() {
        let path = Path::new("/nonexistent/file.txt");
        let result = FileReader::read_text(path);

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("File not found"));
    }

    #[test]
    fn test_read_lines_keeps_blank_and_padded_values() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("lines.txt");
        fs::write(&file_path, "1\r\n\n  3 \n").unwrap();

        let lines = FileReader::read_lines(&file_path).unwrap();
        assert_eq!(lines, vec!["1", "", "  3 "]);
    }

    #[test]
    fn test_read_lines_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("utf8.txt");
        fs::write(&file_path, "日付\n2024-01-01").unwrap();

        let lines = FileReader::read_lines(&file_path).unwrap();
        assert_eq!(lines, vec!["日付", "2024-01-01"]);
    }
}
