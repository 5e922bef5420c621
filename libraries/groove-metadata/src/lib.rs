//! Groove Player Metadata
//!
//! Tag extraction and audio file discovery for imports.
//!
//! - `LoftyExtractor` implements `MetadataExtractor`: title, artist, album,
//!   duration, and embedded cover art as a `data:` URL
//! - `discover_audio_files` walks a directory for importable files
//!
//! Extraction is best-effort. Callers swallow failures and keep the
//! filename-derived defaults.
//!
//! # Example
//!
//! ```rust,no_run
//! use groove_core::MetadataExtractor;
//! use groove_metadata::{discover_audio_files, LoftyExtractor};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = LoftyExtractor::new();
//! for file in discover_audio_files(Path::new("/music"))? {
//!     let patch = extractor.extract(&file)?;
//!     println!("{}: {:?}", file.display(), patch.title);
//! }
//! # Ok(())
//! # }
//! ```

mod cover;
mod error;
mod extractor;
mod scanner;

pub use cover::{cover_from_bytes, sniff_mime, MAX_COVER_SIZE};
pub use error::{MetadataError, Result};
pub use extractor::LoftyExtractor;
pub use scanner::{discover_audio_files, is_audio_file, AUDIO_EXTENSIONS};
