use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One row of the raw corpus, as produced by a successful fetch.
///
/// `title` / `body_text` are `None` when the page lacked the expected
/// structure; an empty CSV field round-trips as `None`, never as `""`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageRecord {
    pub url: String,
    pub title: Option<String>,
    pub body_text: Option<String>,
}

/// One row of the cleaned corpus. Rows whose `body_text` was absent are
/// dropped before this stage, so `body_text` is always present here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanedRecord {
    pub url: String,
    pub title: Option<String>,
    pub body_text: String,
    #[serde(with = "token_list")]
    pub cleaned_tokens: Vec<String>,
    pub cleaned_text: String,
}

/// One row of the scored corpus: all cleaned fields plus the detail score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredRecord {
    pub url: String,
    pub title: Option<String>,
    pub body_text: String,
    #[serde(with = "token_list")]
    pub cleaned_tokens: Vec<String>,
    pub cleaned_text: String,
    pub detail_score: u32,
}

/// The token column is stored as a JSON array of strings, so the ordered
/// list survives the flat CSV cell and parses back losslessly.
mod token_list {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(tokens: &[String], ser: S) -> Result<S::Ok, S::Error> {
        serde_json::to_string(tokens)
            .map_err(serde::ser::Error::custom)?
            .serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
        let raw = String::deserialize(de)?;
        serde_json::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// Read the target URL list: one absolute URL per line. Blank lines are not
/// valid entries and are skipped with a warning.
pub fn load_url_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("URL list not found: {}", path.display()))?;

    let mut urls = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            warn!("Skipping blank line {} in {}", lineno + 1, path.display());
            continue;
        }
        urls.push(line.to_string());
    }
    Ok(urls)
}

pub fn read_raw_corpus(path: &Path) -> Result<Vec<PageRecord>> {
    read_rows(path)
}

pub fn read_cleaned_corpus(path: &Path) -> Result<Vec<CleanedRecord>> {
    read_rows(path)
}

fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Corpus file not found: {}", path.display()))?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.with_context(|| format!("Malformed row in {}", path.display()))?);
    }
    Ok(rows)
}

pub fn write_raw_corpus(path: &Path, rows: &[PageRecord]) -> Result<()> {
    write_rows(path, rows)
}

pub fn write_cleaned_corpus(path: &Path, rows: &[CleanedRecord]) -> Result<()> {
    write_rows(path, rows)
}

pub fn write_scored_corpus(path: &Path, rows: &[ScoredRecord]) -> Result<()> {
    write_rows(path, rows)
}

/// Write the full artifact to a sibling temp file, then rename it into
/// place, so a crash mid-write never leaves a half-written corpus behind.
fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let tmp = temp_path(path);
    {
        let mut writer = csv::Writer::from_path(&tmp)
            .with_context(|| format!("Cannot create {}", tmp.display()))?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)
        .with_context(|| format!("Cannot move {} into place", tmp.display()))?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
