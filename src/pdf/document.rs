use crate::error::{Error, Result};
use crate::pdf::removal::PageStore;
use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    /// Read the whole file and decode it
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(&bytes, path)
    }

    pub fn from_bytes<P: AsRef<Path>>(bytes: &[u8], path: P) -> Result<Self> {
        let path = path.as_ref();
        let doc = Document::load_mem(bytes).map_err(|e| Error::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(PdfDocument {
            doc,
            path: path.to_path_buf(),
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Delete the page at a zero-based index
    pub fn delete_page(&mut self, index: u32) -> Result<()> {
        let page_count = self.page_count();
        if index >= page_count {
            return Err(Error::PageIndexOutOfRange { index, page_count });
        }
        // lopdf numbers pages from 1
        self.doc.delete_pages(&[index + 1]);
        Ok(())
    }

    /// Encode the document, dropping objects no page references anymore
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.doc.prune_objects();
        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| self.persist_error(e))?;
        Ok(buffer)
    }

    /// Write the document back to its own path.
    ///
    /// The bytes go to a temporary file in the same directory which is then
    /// renamed over the original, so a failed write leaves the original intact.
    pub fn save(&mut self) -> Result<()> {
        let bytes = self.to_bytes()?;
        write_atomic(&self.path, &bytes)
    }

    fn persist_error(&self, e: impl std::fmt::Display) -> Error {
        Error::Persist {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        }
    }
}

impl PageStore for PdfDocument {
    fn page_count(&self) -> u32 {
        PdfDocument::page_count(self)
    }

    fn delete_page(&mut self, index: u32) -> Result<()> {
        PdfDocument::delete_page(self, index)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let persist_error = |e: &dyn std::fmt::Display| Error::Persist {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    // Replace the file a symlink points at, not the link itself
    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| persist_error(&e))?;
    tmp.write_all(bytes).map_err(|e| persist_error(&e))?;

    // Keep the original file's mode instead of the temp file's 0600
    if let Ok(metadata) = std::fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| persist_error(&e))?;
    }

    tmp.as_file().sync_all().map_err(|e| persist_error(&e))?;
    tmp.persist(&target).map_err(|e| persist_error(&e.error))?;
    Ok(())
}
