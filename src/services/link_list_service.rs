// src/services/link_list_service.rs
//
// Link list reading
//
// CRITICAL RULES:
// - Blank lines and `//` comments (even indented ones) never reach the classifier
// - A leading UTF-8 byte order mark is not part of the first line
// - `spotify:` lines lose everything from the first space on (annotation)
// - Every other line is passed on unmodified (only a trailing `\r` is cut)

use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};

const COMMENT_PREFIX: &str = "//";
const STREAMING_SCHEME: &str = "spotify:";
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Read the link list file and return the lines worth classifying
pub fn read_link_list(path: &Path) -> AppResult<Vec<String>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("Cannot read link list {}: {}", path.display(), e))
    })?;

    let lines = filter_lines(&raw);
    log::info!("Read {} reference(s) from {}", lines.len(), path.display());
    Ok(lines)
}

pub fn filter_lines(raw: &str) -> Vec<String> {
    let raw = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw);

    raw.lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| is_reference_line(line))
        .map(|line| strip_annotation(line).to_string())
        .collect()
}

/// `spotify:album:abc Greatest Hits` becomes `spotify:album:abc`
fn strip_annotation(line: &str) -> &str {
    if !line.starts_with(STREAMING_SCHEME) {
        return line;
    }
    match line.find(' ') {
        Some(index) => &line[..index],
        None => line,
    }
}

fn is_reference_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with(COMMENT_PREFIX)
}
