// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from running the polarisation calibration pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("The noise-diode scan has {diode} fine channels per coarse channel, but the science scan has {science}; both scans must be channelised the same way")]
    ChannelisationMismatch { diode: usize, science: usize },

    #[error(transparent)]
    Filename(#[from] crate::filenames::FilenameError),

    #[error(transparent)]
    SpectraIo(#[from] crate::io::SpectraIoError),

    #[error(transparent)]
    Stokes(#[from] crate::stokes::StokesError),

    #[error(transparent)]
    Averaging(#[from] crate::averaging::AveragingError),

    #[error(transparent)]
    Calibrate(#[from] crate::calibrate::CalibrateError),

    #[error(transparent)]
    Mueller(#[from] crate::mueller::MuellerError),
}
