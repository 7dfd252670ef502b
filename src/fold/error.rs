// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoldError {
    #[error("The sample interval must be a positive number of seconds, but got {0}")]
    BadSampleInterval(f64),

    #[error("The noise diode period must be a positive number of seconds, but got {0}")]
    BadDiodePeriod(f64),

    #[error("The fold start offset must be a non-negative number of seconds, but got {0}")]
    BadStartOffset(f64),

    #[error("At least 3 diode switches are needed to fold data, but got {0}")]
    TooFewSwitches(usize),

    #[error("Could not find a complete noise diode cycle in {num_timesteps} timesteps of {sample_interval}s with a diode period of {diode_period}s")]
    DiodeNotFound {
        num_timesteps: usize,
        sample_interval: f64,
        diode_period: f64,
    },

    /// An error from a fold implementation outside of this crate.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
