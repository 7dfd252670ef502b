// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MuellerError {
    #[error("Coarse channel {coarse_chan} has a differential gain of {gain}; gains must be finite and have a magnitude less than 1, otherwise the Mueller matrix is singular")]
    SingularGain { coarse_chan: usize, gain: f64 },

    #[error("Coarse channel {coarse_chan} has a non-finite phase offset ({phase})")]
    NonFinitePhase { coarse_chan: usize, phase: f64 },

    #[error("Got {gains} gain offsets but {phases} phase offsets; there must be one of each per coarse channel")]
    GainPhaseLengthMismatch { gains: usize, phases: usize },

    #[error("The data have {num_chans} fine channels with {chan_per_coarse} per coarse channel, but there are solutions for {num_solutions} coarse channels")]
    CoarseChanMismatch {
        num_chans: usize,
        chan_per_coarse: usize,
        num_solutions: usize,
    },

    #[error("The data have {data} fine channels per coarse channel, but the solutions were made from data with {solutions}")]
    ChanPerCoarseMismatch { data: usize, solutions: usize },

    #[error(transparent)]
    Averaging(#[from] crate::averaging::AveragingError),

    #[error(transparent)]
    Stokes(#[from] crate::stokes::StokesError),
}
