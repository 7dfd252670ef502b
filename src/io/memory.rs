// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    cell::RefCell,
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::trace;

use super::{Spectra, SpectraIoError, SpectraStore};

/// Spectrometer "files" kept in memory, keyed by path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<HashMap<PathBuf, Spectra>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn insert<P: Into<PathBuf>>(&self, path: P, spectra: Spectra) {
        self.files.borrow_mut().insert(path.into(), spectra);
    }

    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<Spectra> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
        self.files.borrow().contains_key(path.as_ref())
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.files.borrow().keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl SpectraStore for MemoryStore {
    fn open(&self, path: &Path) -> Result<Spectra, SpectraIoError> {
        trace!("Opening '{}' from memory", path.display());
        self.get(path)
            .ok_or_else(|| SpectraIoError::DoesNotExist(path.to_path_buf()))
    }

    fn write(&self, spectra: &Spectra, path: &Path) -> Result<(), SpectraIoError> {
        trace!("Writing '{}' to memory", path.display());
        self.insert(path, spectra.clone());
        Ok(())
    }
}
