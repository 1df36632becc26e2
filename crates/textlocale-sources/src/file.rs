// crates/textlocale-sources/src/file.rs
// ============================================================================
// Module: TextLocale File Source
// Description: File-backed dictionary source rooted at a directory.
// Purpose: Load dictionary documents from a local tree.
// Dependencies: textlocale-core, tokio
// ============================================================================

//! ## Overview
//! [`FileSource`] resolves pairs to files under a root directory using the
//! same [`UrlLayout`] as [`crate::HttpSource`].
//! Invariants:
//! - Paths never escape the root; segments are validated by the layout.
//! - Files larger than the limit are rejected before they are read.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use textlocale_core::Dictionary;
use textlocale_core::DictionarySource;
use textlocale_core::Domain;
use textlocale_core::LanguageTag;
use textlocale_core::LoadError;

use crate::MAX_DICTIONARY_BYTES;
use crate::layout::UrlLayout;
use crate::parse_dictionary;

// ============================================================================
// SECTION: File Source
// ============================================================================

/// File-backed dictionary source.
#[derive(Debug, Clone)]
pub struct FileSource {
    /// Root directory dictionaries are resolved under.
    root: PathBuf,
    /// Location scheme under `root`.
    layout: UrlLayout,
    /// Maximum accepted file size in bytes.
    max_bytes: usize,
}

impl FileSource {
    /// Creates a file source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, layout: UrlLayout) -> Self {
        Self {
            root: root.into(),
            layout,
            max_bytes: MAX_DICTIONARY_BYTES,
        }
    }

    /// Overrides the maximum accepted file size.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path a pair is loaded from.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidLocation`] when the pair cannot be mapped.
    pub fn dictionary_path(
        &self,
        domain: &Domain,
        tag: &LanguageTag,
    ) -> Result<PathBuf, LoadError> {
        let segments = self.layout.segments(domain, tag)?;
        Ok(segments.iter().fold(self.root.clone(), |path, segment| path.join(segment)))
    }
}

#[async_trait]
impl DictionarySource for FileSource {
    async fn fetch(&self, domain: &Domain, tag: &LanguageTag) -> Result<Dictionary, LoadError> {
        let path = self.dictionary_path(domain, tag)?;
        let metadata = tokio::fs::metadata(&path).await.map_err(|err| map_io(&path, &err))?;
        if !metadata.is_file() {
            return Err(LoadError::NotFound(path.display().to_string()));
        }
        if usize::try_from(metadata.len()).ok().is_none_or(|len| len > self.max_bytes) {
            return Err(LoadError::TooLarge {
                limit: self.max_bytes,
            });
        }
        let bytes = tokio::fs::read(&path).await.map_err(|err| map_io(&path, &err))?;
        parse_dictionary(&bytes, self.max_bytes)
    }
}

/// Maps an I/O failure, keeping missing files distinct.
fn map_io(path: &Path, err: &io::Error) -> LoadError {
    match err.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.display().to_string()),
        _ => LoadError::Io(format!("{}: {err}", path.display())),
    }
}
