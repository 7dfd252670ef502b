// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AveragingError {
    #[error("The number of coarse channels was 0; this is not permitted")]
    NoCoarseChans,

    #[error("The number of fine channels per coarse channel was 0; this is not permitted")]
    ZeroChansPerCoarse,

    #[error("{num_chans} fine channels can't be evenly divided by {divisor}")]
    NotDivisible { num_chans: usize, divisor: usize },

    #[error("Coarse channels need at least 4 fine channels to be averaged (the first two and the last fine channels are excluded), but there are only {chan_per_coarse}")]
    TooFewChansPerCoarse { chan_per_coarse: usize },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}
