// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to derive output filenames.
//!
//! Input cross-polarisation files are assumed to be named
//! `*.cross_pols.fil`. Output files replace this with a suffix describing the
//! data product, e.g. `*.SIQUV.polcal.fil`. Downstream tools rely on these
//! suffixes, so they must not change.

use std::path::{Path, PathBuf};

use log::debug;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

use crate::constants::CROSS_POLS_SUFFIX;

/// All the data products that can be written out.
#[derive(Debug, Display, Clone, Copy, EnumIter, PartialEq, Eq)]
pub enum OutputProduct {
    /// Calibrated Stokes I, Q, U and V in a single file.
    #[strum(serialize = ".SIQUV.polcal.fil")]
    CalibratedStokes,

    #[strum(serialize = ".SI.polcal.fil")]
    CalibratedI,

    #[strum(serialize = ".Q.polcal.fil")]
    CalibratedQ,

    #[strum(serialize = ".U.polcal.fil")]
    CalibratedU,

    #[strum(serialize = ".V.polcal.fil")]
    CalibratedV,

    #[strum(serialize = ".I.fil")]
    StokesI,

    #[strum(serialize = ".Q.fil")]
    StokesQ,

    #[strum(serialize = ".U.fil")]
    StokesU,

    #[strum(serialize = ".V.fil")]
    StokesV,

    /// Total linear polarisation, sqrt(Q^2 + U^2).
    #[strum(serialize = ".L.fil")]
    StokesL,

    /// Fractional linear polarisation, L/I.
    #[strum(serialize = ".linpol.fil")]
    FractionalLinear,

    /// Fractional circular polarisation, V/I.
    #[strum(serialize = ".circpol.fil")]
    FractionalCircular,
}

impl OutputProduct {
    /// The file-name suffix for this product.
    pub fn suffix(self) -> String {
        self.to_string()
    }
}

/// Get the path for an output product derived from the input
/// cross-polarisation file `cross_pols`. The last 15 characters of the input
/// path (normally ".cross_pols.fil") are replaced with the product's suffix.
pub fn output_path(cross_pols: &Path, product: OutputProduct) -> Result<PathBuf, FilenameError> {
    let input = cross_pols
        .to_str()
        .ok_or_else(|| FilenameError::NotUnicode(cross_pols.to_path_buf()))?;
    let num_chars = input.chars().count();
    let suffix_len = CROSS_POLS_SUFFIX.chars().count();
    if num_chars <= suffix_len {
        return Err(FilenameError::TooShort(input.to_string()));
    }
    if !input.ends_with(CROSS_POLS_SUFFIX) {
        debug!("'{input}' doesn't end with '{CROSS_POLS_SUFFIX}'; stripping the last {suffix_len} characters anyway");
    }

    let stem: String = input.chars().take(num_chars - suffix_len).collect();
    Ok(PathBuf::from(format!("{stem}{product}")))
}

#[derive(Error, Debug)]
pub enum FilenameError {
    #[error("Input file '{0}' has too short a name to derive output names from; it should end in '.cross_pols.fil'")]
    TooShort(String),

    #[error("Input file '{}' does not have a unicode name", .0.display())]
    NotUnicode(PathBuf),
}
