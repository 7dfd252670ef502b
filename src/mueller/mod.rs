// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mueller-matrix corrections of Stokes parameters.
//!
//! The instrument's electronics chain is modelled with a block-diagonal
//! Mueller matrix: a differential gain `g` mixes Stokes I and Q, and a
//! differential phase `ψ` rotates Stokes U into V. There is one (g, ψ) pair
//! per coarse channel, shared by all of its fine channels.
//!
//! ```text
//! [I_obs]   [1 g  0     0   ] [I]
//! [Q_obs] = [g 1  0     0   ] [Q]
//! [U_obs]   [0 0 cos ψ -sin ψ] [U]
//! [V_obs]   [0 0 sin ψ  cos ψ] [V]
//! ```

mod error;

pub use error::MuellerError;

use log::debug;
use ndarray::{prelude::*, Zip};

use crate::{averaging::num_coarse_chans, calibrate::PolCalSolutions, stokes::Stokes};

/// Check that the gain and phase offsets are usable with `stokes`, returning
/// the number of coarse channels.
fn validate(
    stokes: &Stokes,
    gain_offsets: ArrayView1<f64>,
    phase_offsets: ArrayView1<f64>,
    chan_per_coarse: usize,
) -> Result<usize, MuellerError> {
    stokes.check_shapes()?;
    if gain_offsets.len() != phase_offsets.len() {
        return Err(MuellerError::GainPhaseLengthMismatch {
            gains: gain_offsets.len(),
            phases: phase_offsets.len(),
        });
    }
    let num_chans = stokes.num_chans();
    let num_coarse = num_coarse_chans(num_chans, chan_per_coarse)?;
    if num_coarse != gain_offsets.len() {
        return Err(MuellerError::CoarseChanMismatch {
            num_chans,
            chan_per_coarse,
            num_solutions: gain_offsets.len(),
        });
    }

    for (i_coarse, (&g, &psi)) in gain_offsets.iter().zip(phase_offsets.iter()).enumerate() {
        // A gain of exactly ±1 makes the Mueller matrix singular.
        if !g.is_finite() || g.abs() >= 1.0 {
            return Err(MuellerError::SingularGain {
                coarse_chan: i_coarse,
                gain: g,
            });
        }
        if !psi.is_finite() {
            return Err(MuellerError::NonFinitePhase {
                coarse_chan: i_coarse,
                phase: psi,
            });
        }
    }

    Ok(num_coarse)
}

/// Apply the inverse of the electronics-chain Mueller matrix to `stokes`,
/// returning calibrated Stokes parameters.
///
/// The Stokes arrays are corrected in place and handed back; no other
/// data-sized buffers are allocated. `gain_offsets` and `phase_offsets` have
/// one value per coarse channel, and the Stokes arrays' frequency axis must
/// have exactly `gain_offsets.len() * chan_per_coarse` fine channels.
pub fn apply_mueller(
    mut stokes: Stokes,
    gain_offsets: ArrayView1<f64>,
    phase_offsets: ArrayView1<f64>,
    chan_per_coarse: usize,
) -> Result<Stokes, MuellerError> {
    let num_coarse = validate(&stokes, gain_offsets, phase_offsets, chan_per_coarse)?;
    debug!("Applying inverse Mueller matrices to {num_coarse} coarse channels");

    let Stokes { i, q, u, v } = &mut stokes;
    for (i_coarse, (&g, &psi)) in gain_offsets.iter().zip(phase_offsets.iter()).enumerate() {
        let chans = s![.., .., i_coarse * chan_per_coarse..(i_coarse + 1) * chan_per_coarse];

        // Top-left corner of the inverse Mueller matrix.
        let a = 1.0 / (1.0 - g * g);
        Zip::from(i.slice_mut(chans))
            .and(q.slice_mut(chans))
            .for_each(|i, q| {
                let (i0, q0) = (*i, *q);
                *i = a * (i0 - g * q0);
                *q = a * (-g * i0 + q0);
            });

        // Bottom-right corner.
        let (sin, cos) = psi.sin_cos();
        Zip::from(u.slice_mut(chans))
            .and(v.slice_mut(chans))
            .for_each(|u, v| {
                let (u0, v0) = (*u, *v);
                *u = u0 * cos + v0 * sin;
                *v = -u0 * sin + v0 * cos;
            });
    }

    Ok(stokes)
}

/// Convenience wrapper around [`apply_mueller`] for estimated solutions.
/// `chan_per_coarse` describes the data being corrected and must match the
/// channelisation the solutions were estimated at.
pub fn apply_solutions(
    stokes: Stokes,
    solutions: &PolCalSolutions,
    chan_per_coarse: usize,
) -> Result<Stokes, MuellerError> {
    if chan_per_coarse != solutions.chan_per_coarse {
        return Err(MuellerError::ChanPerCoarseMismatch {
            data: chan_per_coarse,
            solutions: solutions.chan_per_coarse,
        });
    }
    apply_mueller(
        stokes,
        solutions.gain_offsets.view(),
        solutions.phase_offsets.view(),
        chan_per_coarse,
    )
}

/// Corrupt `stokes` with the electronics-chain Mueller matrix, i.e. the
/// inverse of [`apply_mueller`]. This is useful for simulating what an
/// instrument with the given gain and phase offsets would observe.
pub fn apply_instrumental_mueller(
    mut stokes: Stokes,
    gain_offsets: ArrayView1<f64>,
    phase_offsets: ArrayView1<f64>,
    chan_per_coarse: usize,
) -> Result<Stokes, MuellerError> {
    validate(&stokes, gain_offsets, phase_offsets, chan_per_coarse)?;

    let Stokes { i, q, u, v } = &mut stokes;
    for (i_coarse, (&g, &psi)) in gain_offsets.iter().zip(phase_offsets.iter()).enumerate() {
        let chans = s![.., .., i_coarse * chan_per_coarse..(i_coarse + 1) * chan_per_coarse];
        Zip::from(i.slice_mut(chans))
            .and(q.slice_mut(chans))
            .for_each(|i, q| {
                let (i0, q0) = (*i, *q);
                *i = i0 + g * q0;
                *q = g * i0 + q0;
            });

        let (sin, cos) = psi.sin_cos();
        Zip::from(u.slice_mut(chans))
            .and(v.slice_mut(chans))
            .for_each(|u, v| {
                let (u0, v0) = (*u, *v);
                *u = u0 * cos - v0 * sin;
                *v = u0 * sin + v0 * cos;
            });
    }

    Ok(stokes)
}
