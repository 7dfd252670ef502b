// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helper functions for averaging fine channels into coarse channels.

mod error;

pub use error::AveragingError;

use ndarray::prelude::*;

use crate::constants::{COARSE_CHAN_LEADING_TRIM, COARSE_CHAN_TRAILING_TRIM};

/// Given the total number of fine channels and the number of coarse channels
/// they're split into, get the number of fine channels per coarse channel.
/// The division must be exact.
pub fn chans_per_coarse(num_chans: usize, num_coarse_chans: usize) -> Result<usize, AveragingError> {
    if num_coarse_chans == 0 {
        return Err(AveragingError::NoCoarseChans);
    }
    if num_chans % num_coarse_chans != 0 {
        return Err(AveragingError::NotDivisible {
            num_chans,
            divisor: num_coarse_chans,
        });
    }
    Ok(num_chans / num_coarse_chans)
}

/// Check that `num_chans` fine channels can be split into coarse channels of
/// `chan_per_coarse` fine channels each, returning the number of coarse
/// channels.
pub(crate) fn num_coarse_chans(
    num_chans: usize,
    chan_per_coarse: usize,
) -> Result<usize, AveragingError> {
    if chan_per_coarse == 0 {
        return Err(AveragingError::ZeroChansPerCoarse);
    }
    if num_chans % chan_per_coarse != 0 {
        return Err(AveragingError::NotDivisible {
            num_chans,
            divisor: chan_per_coarse,
        });
    }
    Ok(num_chans / chan_per_coarse)
}

/// Average fine-channel `data` into coarse channels of `chan_per_coarse` fine
/// channels each.
///
/// The first two and the last fine channels of each coarse channel are
/// affected by the filterbank roll-off and don't contribute to the average;
/// `chan_per_coarse` must therefore be at least 4.
pub fn convert_to_coarse(
    data: ArrayView1<f64>,
    chan_per_coarse: usize,
) -> Result<Array1<f64>, AveragingError> {
    let num_coarse = num_coarse_chans(data.len(), chan_per_coarse)?;
    let trimmed_end = chan_per_coarse.saturating_sub(COARSE_CHAN_TRAILING_TRIM);
    if trimmed_end <= COARSE_CHAN_LEADING_TRIM {
        return Err(AveragingError::TooFewChansPerCoarse { chan_per_coarse });
    }

    let data = data.into_shape_with_order((num_coarse, chan_per_coarse))?;
    let averaged = data
        .slice(s![.., COARSE_CHAN_LEADING_TRIM..trimmed_end])
        .mean_axis(Axis(1))
        .ok_or(AveragingError::TooFewChansPerCoarse { chan_per_coarse })?;
    Ok(averaged)
}
