// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all polarisation-calibration-related errors.

use thiserror::Error;

/// Every error this crate can produce. Each module has its own more specific
/// error type, which converts into this one.
#[derive(Error, Debug)]
pub enum PolCalError {
    #[error(transparent)]
    Params(#[from] crate::params::ParamsError),

    #[error(transparent)]
    Pipeline(#[from] crate::pipeline::PipelineError),

    #[error(transparent)]
    SpectraIo(#[from] crate::io::SpectraIoError),

    #[error(transparent)]
    Filename(#[from] crate::filenames::FilenameError),

    #[error(transparent)]
    Stokes(#[from] crate::stokes::StokesError),

    #[error(transparent)]
    FeedType(#[from] crate::stokes::FeedTypeParseError),

    #[error(transparent)]
    Averaging(#[from] crate::averaging::AveragingError),

    #[error(transparent)]
    Fold(#[from] crate::fold::FoldError),

    #[error(transparent)]
    Calibrate(#[from] crate::calibrate::CalibrateError),

    #[error(transparent)]
    Mueller(#[from] crate::mueller::MuellerError),
}
