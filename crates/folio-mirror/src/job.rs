//! Mirroring a set of documents between locale directories.

use std::fs;
use std::path::PathBuf;

use crate::MirrorError;
use crate::convert::TextConverter;
use crate::document::{MirrorOptions, Outcome, mirror_document};

/// Documents to derive from one locale directory into another.
#[derive(Clone, Debug)]
pub struct MirrorJob {
    /// Directory holding the source locale's documents.
    pub source: PathBuf,
    /// Directory receiving the derived documents.
    pub target: PathBuf,
    /// Document paths relative to `source` (and `target`).
    pub documents: Vec<String>,
    pub options: MirrorOptions,
}

/// Result of a mirror run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MirrorReport {
    /// Documents whose prose was converted.
    pub converted: Vec<String>,
    /// Documents copied without conversion (leading marker).
    pub passed_through: Vec<String>,
}

impl MirrorReport {
    /// Total number of documents written.
    #[must_use]
    pub fn total(&self) -> usize {
        self.converted.len() + self.passed_through.len()
    }
}

impl MirrorJob {
    /// Mirror every document, writing to the same relative path under
    /// `target`. Missing target directories are created.
    ///
    /// Documents are processed in order; the first failure stops the run and
    /// earlier documents stay written.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Io`] if a source document cannot be read or a
    /// target document cannot be written.
    pub fn run(&self, converter: &dyn TextConverter) -> Result<MirrorReport, MirrorError> {
        let mut report = MirrorReport::default();

        for document in &self.documents {
            let source_path = self.source.join(document);
            let target_path = self.target.join(document);

            let text = fs::read_to_string(&source_path).map_err(|source| MirrorError::Io {
                path: source_path.clone(),
                source,
            })?;
            let (output, outcome) = mirror_document(&text, converter, &self.options);

            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent).map_err(|source| MirrorError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&target_path, output).map_err(|source| MirrorError::Io {
                path: target_path.clone(),
                source,
            })?;

            match outcome {
                Outcome::Converted => {
                    tracing::info!(document = %document, "Converted");
                    report.converted.push(document.clone());
                }
                Outcome::PassedThrough => {
                    tracing::info!(document = %document, "Passed through unconverted");
                    report.passed_through.push(document.clone());
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::convert::TableConverter;
    use crate::document::Rewrite;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn job(root: &Path, documents: &[&str]) -> MirrorJob {
        MirrorJob {
            source: root.join("src/zht"),
            target: root.join("src/zhs"),
            documents: documents.iter().map(|d| (*d).to_owned()).collect(),
            options: MirrorOptions {
                rewrites: vec![Rewrite::new("/zht/", "/zhs/")],
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_run_writes_converted_documents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "src/zht/index.md", "# 變數\n[下一頁](/zht/docs/types)\n");
        write(
            root,
            "src/zht/docs/types.md",
            "<!-- do not translate -->\n# 類型\n",
        );
        let converter = TableConverter::parse("變\t变\n數\t数\n").unwrap();

        let report = job(root, &["index.md", "docs/types.md"])
            .run(&converter)
            .unwrap();

        assert_eq!(
            report,
            MirrorReport {
                converted: vec!["index.md".to_owned()],
                passed_through: vec!["docs/types.md".to_owned()],
            }
        );
        assert_eq!(report.total(), 2);
        assert_eq!(
            fs::read_to_string(root.join("src/zhs/index.md")).unwrap(),
            "# 变数\n[下一頁](/zhs/docs/types)\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("src/zhs/docs/types.md")).unwrap(),
            "<!-- do not translate -->\n# 類型\n"
        );
    }

    #[test]
    fn test_run_missing_source_document() {
        let temp_dir = tempfile::tempdir().unwrap();
        let converter = TableConverter::default();

        let err = job(temp_dir.path(), &["missing.md"])
            .run(&converter)
            .unwrap_err();

        assert!(matches!(err, MirrorError::Io { ref path, .. } if path.ends_with("missing.md")));
    }

    #[test]
    fn test_run_overwrites_existing_target() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "src/zht/index.md", "新內容\n");
        write(root, "src/zhs/index.md", "stale\n");

        job(root, &["index.md"])
            .run(&TableConverter::default())
            .unwrap();

        assert_eq!(
            fs::read_to_string(root.join("src/zhs/index.md")).unwrap(),
            "新內容\n"
        );
    }
}
