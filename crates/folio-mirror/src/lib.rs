//! Locale mirroring for Folio content.
//!
//! Derives one locale's documents from another's: prose is converted with a
//! [`TextConverter`] (typically a [`TableConverter`] loaded from an OpenCC
//! dictionary), while code, HTML and marker-delimited regions are copied
//! verbatim. Locale link prefixes are then rewritten.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use folio_mirror::{MirrorOptions, Rewrite, TableConverter, mirror_document};
//!
//! let table = TableConverter::parse("變\t变\n數\t数\n")?;
//! let options = MirrorOptions {
//!     rewrites: vec![Rewrite::new("/zht/", "/zhs/")],
//!     ..MirrorOptions::default()
//! };
//!
//! let (output, _) = mirror_document("[變數](/zht/docs/variables) `變數`", &table, &options);
//! assert_eq!(output, "[变数](/zhs/docs/variables) `變數`");
//! # Ok(())
//! # }
//! ```

mod convert;
mod document;
mod job;
mod segment;

use std::path::PathBuf;

pub use convert::{IdentityConverter, TableConverter, TableError, TextConverter};
pub use document::{MirrorOptions, Outcome, Rewrite, mirror_document};
pub use job::{MirrorJob, MirrorReport};
pub use segment::{Segment, segments};

/// Default marker bounding regions that must not be converted.
pub const DEFAULT_MARKER: &str = "<!-- do not translate -->";

/// Error returned by mirror operations.
#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Conversion table is malformed.
    #[error("Invalid conversion table {}: {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: TableError,
    },
}
