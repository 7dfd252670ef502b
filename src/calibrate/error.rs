// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalibrateError {
    #[error("Expected Stokes {stokes} noise-diode data to have a single polarisation, but it has {n}")]
    NonSingletonPolAxis { stokes: &'static str, n: usize },

    #[error(transparent)]
    Fold(#[from] crate::fold::FoldError),

    #[error(transparent)]
    Averaging(#[from] crate::averaging::AveragingError),

    #[error(transparent)]
    Stokes(#[from] crate::stokes::StokesError),
}
