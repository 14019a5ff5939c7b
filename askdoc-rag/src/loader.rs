//! Corpus loading: directory enumeration and per-format document loaders.
//!
//! A [`DirectoryLoader`] enumerates the corpus directory and dispatches
//! each file to the [`DocumentLoader`] registered for its extension.
//! [`CsvLoader`] yields one document per data row; [`TextLoader`] yields
//! one document per file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::document::Document;
use crate::error::{RagError, Result};

fn load_error(path: &Path, message: impl std::fmt::Display) -> RagError {
    RagError::LoadError { path: path.display().to_string(), message: message.to_string() }
}

/// Loads the documents of one corpus file.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Load all documents contained in the file at `path`.
    async fn load(&self, path: &Path) -> Result<Vec<Document>>;
}

/// A source of corpus documents for the pipeline build.
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Load the entire corpus.
    async fn load(&self) -> Result<Vec<Document>>;
}

/// Loads a whole text file as a single [`Document`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLoader;

#[async_trait]
impl DocumentLoader for TextLoader {
    async fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| load_error(path, e))?;
        let id = document_id(path);

        Ok(vec![Document {
            id,
            text,
            metadata: HashMap::from([("source".to_string(), path.display().to_string())]),
            source_uri: Some(path.display().to_string()),
        }])
    }
}

/// Loads a CSV file as one [`Document`] per data row.
///
/// The first row is treated as the header. Each data row becomes a document
/// whose text is one `header: value` line per column, so column names stay
/// attached to their values through chunking and retrieval. Quoted fields
/// (including embedded commas, doubled quotes, and newlines) are handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLoader;

#[async_trait]
impl DocumentLoader for CsvLoader {
    async fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| load_error(path, e))?;
        let mut rows = parse_csv(&raw).into_iter();

        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let id_base = document_id(path);

        let documents = rows
            .enumerate()
            .map(|(row_index, fields)| {
                let text = header
                    .iter()
                    .zip(fields.iter())
                    .map(|(name, value)| format!("{name}: {value}"))
                    .collect::<Vec<_>>()
                    .join("\n");

                Document {
                    id: format!("{id_base}_row{row_index}"),
                    text,
                    metadata: HashMap::from([
                        ("source".to_string(), path.display().to_string()),
                        ("row".to_string(), row_index.to_string()),
                    ]),
                    source_uri: Some(path.display().to_string()),
                }
            })
            .collect();

        Ok(documents)
    }
}

/// Parse CSV text into rows of fields.
///
/// Minimal RFC 4180 handling: comma separation, CRLF or LF line endings,
/// double-quoted fields with `""` escapes and embedded separators. Blank
/// lines outside quotes are skipped.
fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                if row.len() > 1 || !row[0].is_empty() {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Derive a document ID from a file path (the file stem).
fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Enumerates a corpus directory and dispatches files to the loader
/// registered for their extension. Files with no registered loader are
/// skipped. Enumeration is non-recursive and sorted by file name so
/// ingestion order (and therefore index insertion order) is deterministic.
pub struct DirectoryLoader {
    root: PathBuf,
    loaders: HashMap<String, Arc<dyn DocumentLoader>>,
}

impl DirectoryLoader {
    /// Create a loader over `root` with no registered extensions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), loaders: HashMap::new() }
    }

    /// Register a [`DocumentLoader`] for an extension (without the dot,
    /// case-insensitive).
    pub fn with_loader(mut self, extension: &str, loader: Arc<dyn DocumentLoader>) -> Self {
        self.loaders.insert(extension.to_ascii_lowercase(), loader);
        self
    }
}

#[async_trait]
impl CorpusSource for DirectoryLoader {
    async fn load(&self) -> Result<Vec<Document>> {
        let mut dir =
            tokio::fs::read_dir(&self.root).await.map_err(|e| load_error(&self.root, e))?;

        let mut paths = Vec::new();
        while let Some(dir_entry) =
            dir.next_entry().await.map_err(|e| load_error(&self.root, e))?
        {
            let file_type =
                dir_entry.file_type().await.map_err(|e| load_error(&dir_entry.path(), e))?;
            if file_type.is_file() {
                paths.push(dir_entry.path());
            }
        }
        paths.sort();

        let mut documents = Vec::new();
        for path in paths {
            let extension = path
                .extension()
                .map(|e| e.to_string_lossy().to_ascii_lowercase())
                .unwrap_or_default();

            match self.loaders.get(&extension) {
                Some(loader) => {
                    let loaded = loader.load(&path).await?;
                    debug!(path = %path.display(), count = loaded.len(), "loaded documents");
                    documents.extend(loaded);
                }
                None => {
                    debug!(path = %path.display(), "no loader for extension, skipping");
                }
            }
        }

        info!(root = %self.root.display(), document_count = documents.len(), "corpus loaded");
        Ok(documents)
    }
}

/// A fixed in-memory corpus, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticCorpus {
    documents: Vec<Document>,
}

impl StaticCorpus {
    /// Create a corpus from pre-built documents.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl CorpusSource for StaticCorpus {
    async fn load(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_rows() {
        let rows = parse_csv("name,color\nsky,blue\ngrass,green\n");
        assert_eq!(
            rows,
            vec![
                vec!["name".to_string(), "color".to_string()],
                vec!["sky".to_string(), "blue".to_string()],
                vec!["grass".to_string(), "green".to_string()],
            ]
        );
    }

    #[test]
    fn parses_quoted_fields_with_commas_and_escapes() {
        let rows = parse_csv("a,b\n\"one, two\",\"he said \"\"hi\"\"\"\n");
        assert_eq!(rows[1], vec!["one, two".to_string(), "he said \"hi\"".to_string()]);
    }

    #[test]
    fn parses_newlines_inside_quotes() {
        let rows = parse_csv("a,b\n\"line1\nline2\",x\n");
        assert_eq!(rows[1][0], "line1\nline2");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn handles_crlf_and_missing_trailing_newline() {
        let rows = parse_csv("a,b\r\n1,2");
        assert_eq!(rows, vec![vec!["a".to_string(), "b".to_string()], vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn skips_blank_lines() {
        let rows = parse_csv("a,b\n\n1,2\n");
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn csv_loader_yields_one_document_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.csv");
        std::fs::write(&path, "subject,fact\nsky,The sky is blue\ngrass,Grass is green\n")
            .unwrap();

        let documents = CsvLoader.load(&path).await.unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, "facts_row0");
        assert_eq!(documents[0].text, "subject: sky\nfact: The sky is blue");
        assert_eq!(documents[1].metadata.get("row").map(String::as_str), Some("1"));
    }

    #[tokio::test]
    async fn text_loader_yields_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "plain note text").unwrap();

        let documents = TextLoader.load(&path).await.unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, "note");
        assert_eq!(documents[0].text, "plain note text");
    }

    #[tokio::test]
    async fn directory_loader_dispatches_by_extension_and_skips_others() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), "h\nrow\n").unwrap();
        std::fs::write(dir.path().join("b.txt"), "text file").unwrap();
        std::fs::write(dir.path().join("c.bin"), [0u8, 1, 2]).unwrap();

        let loader = DirectoryLoader::new(dir.path())
            .with_loader("csv", Arc::new(CsvLoader))
            .with_loader("txt", Arc::new(TextLoader));

        let documents = loader.load().await.unwrap();
        // a.csv has one data row, b.txt is one document, c.bin is skipped.
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, "a_row0");
        assert_eq!(documents[1].id, "b");
    }

    #[tokio::test]
    async fn missing_directory_is_a_load_error() {
        let loader = DirectoryLoader::new("/definitely/does/not/exist")
            .with_loader("csv", Arc::new(CsvLoader));
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, RagError::LoadError { .. }));
    }
}
