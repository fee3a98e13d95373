//! Broken markers: `<id>.txt` files dropped into a directory by hand to
//! flag uploads that should not be trusted.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

const MARKER_SUFFIX: &str = ".txt";

#[derive(Debug, Clone, Default)]
pub struct BrokenMarkers {
    names: Vec<String>,
}

impl BrokenMarkers {
    /// List the directory once. Only entry names matter.
    pub fn read(dir: &Path) -> Result<Self> {
        let to_err = |source: std::io::Error| Error::ReadBroken {
            path: dir.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(to_err)? {
            let entry = entry.map_err(to_err)?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        debug!("Loaded {} broken markers from {}", names.len(), dir.display());
        Ok(Self { names })
    }

    pub fn is_broken(&self, id: &str) -> bool {
        self.names
            .iter()
            .any(|name| name.strip_suffix(MARKER_SUFFIX) == Some(id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
impl<S: Into<String>> FromIterator<S> for BrokenMarkers {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
