// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Estimate instrumental polarisation errors from noise-diode data.
//!
//! The differential gain between the two feeds is determined from Stokes I
//! and Q, and the differential phase from Stokes U and V, following Heiles
//! (2001). Both are estimated per fine channel and then averaged into coarse
//! channels.

mod error;

pub use error::CalibrateError;

use log::debug;
use ndarray::prelude::*;

use crate::{averaging::convert_to_coarse, fold::DiodeFold, stokes::Stokes};

/// Differential gain and phase offsets, one per coarse channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PolCalSolutions {
    /// The differential gain between the feeds (divided by 2, as defined in
    /// Heiles 2001).
    pub gain_offsets: Array1<f64>,

    /// The differential phase between the feeds \[radians\].
    pub phase_offsets: Array1<f64>,

    /// The number of fine channels per coarse channel in the data the
    /// solutions were estimated from.
    pub chan_per_coarse: usize,
}

impl PolCalSolutions {
    pub fn num_coarse_chans(&self) -> usize {
        self.gain_offsets.len()
    }
}

/// Stokes data are expected to have a singleton middle axis; get rid of it.
fn squeeze_pol_axis<'a>(
    data: &'a Array3<f64>,
    name: &'static str,
) -> Result<ArrayView2<'a, f64>, CalibrateError> {
    match data.len_of(Axis(1)) {
        1 => Ok(data.index_axis(Axis(1), 0)),
        n => Err(CalibrateError::NonSingletonPolAxis { stokes: name, n }),
    }
}

/// Determine the relative gain error of the two feeds from noise-diode Stokes
/// I and Q data with dimensions `[time, 1, freq]`. The result has one value
/// per coarse channel.
pub fn gain_offsets<F: DiodeFold + ?Sized>(
    i_dat: &Array3<f64>,
    q_dat: &Array3<f64>,
    sample_interval: f64,
    chan_per_coarse: usize,
    fold: &F,
) -> Result<Array1<f64>, CalibrateError> {
    let (i_off, i_on) = fold.fold(squeeze_pol_axis(i_dat, "I")?, sample_interval)?;
    let (q_off, q_on) = fold.fold(squeeze_pol_axis(q_dat, "Q")?, sample_interval)?;

    // Power in each feed with the diode on and off.
    let xx_on = (&i_on + &q_on) / 2.0;
    let xx_off = (&i_off + &q_off) / 2.0;
    let yy_on = (&i_on - &q_on) / 2.0;
    let yy_off = (&i_off - &q_off) / 2.0;
    debug!(
        "Mean diode-on feed powers: XX {:?}, YY {:?}",
        xx_on.mean(),
        yy_on.mean()
    );

    let g = (&xx_off - &yy_off) / (&xx_off + &yy_off);
    Ok(convert_to_coarse(g.view(), chan_per_coarse)?)
}

/// Determine the phase difference between the two feeds from noise-diode
/// Stokes U and V data with dimensions `[time, 1, freq]`. The result has one
/// value per coarse channel.
///
/// Fine-channel phases are combined with an arithmetic mean, which is only
/// meaningful when the phases within a coarse channel are similar and far
/// from the ±π wrap.
pub fn phase_offsets<F: DiodeFold + ?Sized>(
    u_dat: &Array3<f64>,
    v_dat: &Array3<f64>,
    sample_interval: f64,
    chan_per_coarse: usize,
    fold: &F,
) -> Result<Array1<f64>, CalibrateError> {
    let (u_off, u_on) = fold.fold(squeeze_pol_axis(u_dat, "U")?, sample_interval)?;
    let (v_off, v_on) = fold.fold(squeeze_pol_axis(v_dat, "V")?, sample_interval)?;
    let u_diff = u_on - u_off;
    let v_diff = v_on - v_off;

    let phases = ndarray::Zip::from(&v_diff)
        .and(&u_diff)
        .map_collect(|&v, &u| v.atan2(u));
    Ok(convert_to_coarse(phases.view(), chan_per_coarse)?)
}

/// Estimate both the gain and phase offsets from noise-diode Stokes data.
pub fn estimate_solutions<F: DiodeFold + ?Sized>(
    stokes: &Stokes,
    sample_interval: f64,
    chan_per_coarse: usize,
    fold: &F,
) -> Result<PolCalSolutions, CalibrateError> {
    stokes.check_shapes()?;
    let gain_offsets = gain_offsets(&stokes.i, &stokes.q, sample_interval, chan_per_coarse, fold)?;
    let phase_offsets =
        phase_offsets(&stokes.u, &stokes.v, sample_interval, chan_per_coarse, fold)?;
    Ok(PolCalSolutions {
        gain_offsets,
        phase_offsets,
        chan_per_coarse,
    })
}
