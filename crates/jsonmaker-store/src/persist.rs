use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::document::Document;
use crate::error::{StoreError, StoreResult};

impl Document {
    /// Write the document to `path` as 4-space-indented UTF-8 JSON.
    ///
    /// An existing file is truncated. The file handle is closed on every
    /// exit path; buffered data is flushed before returning so write
    /// failures surface as [`StoreError::Io`].
    pub fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer).map_err(|e| io_err(e.into()))?;
        writer.flush().map_err(io_err)?;

        info!(path = %path.display(), entries = self.len(), "document saved");
        Ok(())
    }

    /// Replace the whole document with the contents of `path`.
    ///
    /// The file must hold a JSON object whose members are all strings,
    /// numbers or booleans. On any error the document is left unchanged.
    pub fn load(&mut self, path: impl AsRef<Path>) -> StoreResult<()> {
        let loaded = Self::open(path)?;
        *self = loaded;
        Ok(())
    }

    /// Read a document from `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match Self::from_json_str(&text) {
            Ok(doc) => {
                info!(path = %path.display(), entries = doc.len(), "document loaded");
                Ok(doc)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "rejected document");
                Err(e)
            }
        }
    }

    /// Like [`Document::open`], but a missing file yields an empty document.
    pub fn open_or_default(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::open(path)
        } else {
            debug!(path = %path.display(), "no file yet, starting empty");
            Ok(Self::new())
        }
    }
}
