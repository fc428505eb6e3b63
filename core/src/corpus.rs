use crate::error::{QaError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Document name -> full text, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: BTreeMap<String, String>,
}

impl Corpus {
    /// Read every regular file directly inside `dir`; the file name is the document name.
    ///
    /// Any file that cannot be read or is not UTF-8 fails the whole load.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(QaError::NotADirectory { path: dir.to_path_buf() });
        }

        let mut documents = BTreeMap::new();
        for entry in fs::read_dir(dir).map_err(|e| QaError::io(dir, e))? {
            let entry = entry.map_err(|e| QaError::io(dir, e))?;
            let path = entry.path();
            if path.is_dir() {
                tracing::debug!(path = %path.display(), "skipping sub-directory");
                continue;
            }
            let bytes = fs::read(&path).map_err(|e| QaError::io(&path, e))?;
            let text = String::from_utf8(bytes).map_err(|_| QaError::Decode { path: path.clone() })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            documents.insert(name, text);
        }

        tracing::info!(dir = %dir.display(), num_docs = documents.len(), "loaded corpus");
        Ok(Self { documents })
    }

    /// Build a corpus from in-memory `(name, text)` pairs.
    pub fn from_documents<I, K, V>(documents: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { documents: documents.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.documents.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.documents.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
