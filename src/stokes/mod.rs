// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Stokes parameters from spectrometer cross-polarisation products.
//!
//! A cross-polarisation spectrometer product has 4 "polarisations" per fine
//! channel. For linear feeds these are XX, YY, Re(XY) and Im(XY); for
//! circular feeds these are LL, RR, Re(LR) and Im(LR). The Stokes parameters
//! derived from them keep a singleton middle axis, so that they can be written
//! out with the same `[time, pol, freq]` indexing as the input data.

mod error;

pub use error::{FeedTypeParseError, StokesError};

use std::str::FromStr;

use itertools::Itertools;
use log::trace;
use ndarray::{concatenate, prelude::*, Zip};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The number of polarisation products needed to derive all 4 Stokes
/// parameters.
pub const NUM_CROSS_POLS: usize = 4;

lazy_static::lazy_static! {
    // Useful for error messages.
    pub(crate) static ref FEED_TYPES: String = FeedType::iter().join(", ");
}

/// The polarisation basis of a receiver's feeds.
#[derive(Debug, Display, Clone, Copy, EnumIter, EnumString, PartialEq, Eq, Default)]
pub enum FeedType {
    /// X and Y dipoles.
    #[default]
    #[strum(serialize = "linear")]
    Linear,

    /// Left- and right-hand circular feeds.
    #[strum(serialize = "circular")]
    Circular,
}

impl FeedType {
    /// Parse a feed type from a string, ignoring case.
    pub fn parse(value: &str) -> Result<FeedType, FeedTypeParseError> {
        Self::from_str(&value.to_lowercase()).map_err(|_| FeedTypeParseError {
            value: value.to_string(),
        })
    }

    /// Combine the 4 polarisation products `p` into (I, Q, U, V).
    fn stokes_from_products(
        self,
        p: [ArrayView2<f64>; 4],
    ) -> (Array2<f64>, Array2<f64>, Array2<f64>, Array2<f64>) {
        let [p0, p1, p2, p3] = p;
        match self {
            // I = XX + YY, Q = XX - YY, U = 2 Re(XY), V = -2 Im(XY)
            FeedType::Linear => (&p0 + &p1, &p0 - &p1, &p2 * 2.0, &p3 * -2.0),

            // I = LL + RR, Q = 2 Re(LR), U = -2 Im(LR), V = RR - LL
            FeedType::Circular => (&p0 + &p1, &p2 * 2.0, &p3 * -2.0, &p1 - &p0),
        }
    }
}

/// Stokes I, Q, U and V, each with dimensions `[time, 1, freq]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stokes {
    pub i: Array3<f64>,
    pub q: Array3<f64>,
    pub u: Array3<f64>,
    pub v: Array3<f64>,
}

impl Stokes {
    /// Bundle Stokes arrays together, checking that they all have the same
    /// shape.
    pub fn new(
        i: Array3<f64>,
        q: Array3<f64>,
        u: Array3<f64>,
        v: Array3<f64>,
    ) -> Result<Stokes, StokesError> {
        let stokes = Stokes { i, q, u, v };
        stokes.check_shapes()?;
        Ok(stokes)
    }

    pub(crate) fn check_shapes(&self) -> Result<(), StokesError> {
        let shape = self.i.shape();
        if self.q.shape() != shape || self.u.shape() != shape || self.v.shape() != shape {
            return Err(StokesError::MismatchedShapes {
                i: self.i.shape().to_vec(),
                q: self.q.shape().to_vec(),
                u: self.u.shape().to_vec(),
                v: self.v.shape().to_vec(),
            });
        }
        Ok(())
    }

    /// The shape shared by all the Stokes arrays.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.i.dim()
    }

    pub fn num_chans(&self) -> usize {
        self.i.len_of(Axis(2))
    }

    /// Total linear polarisation, L = sqrt(Q^2 + U^2).
    pub fn linear_polarisation(&self) -> Result<Array3<f64>, StokesError> {
        self.check_shapes()?;
        Ok(Zip::from(&self.q)
            .and(&self.u)
            .map_collect(|&q, &u| q.hypot(u)))
    }

    /// Stack I, Q, U and V along the polarisation axis, consuming `self`. The
    /// result has dimensions `[time, 4 * n, freq]`, where `n` is the size of
    /// the Stokes arrays' middle axis (normally 1).
    pub fn into_stacked(self) -> Result<Array3<f64>, StokesError> {
        self.check_shapes()?;
        let stacked = concatenate(
            Axis(1),
            &[self.i.view(), self.q.view(), self.u.view(), self.v.view()],
        )?;
        Ok(stacked)
    }
}

/// Derive Stokes parameters from cross-polarisation data with dimensions
/// `[time, pol, freq]`. Only the first 4 polarisation products are used.
pub fn get_stokes(cross_dat: ArrayView3<f64>, feed_type: FeedType) -> Result<Stokes, StokesError> {
    let num_pols = cross_dat.len_of(Axis(1));
    if num_pols < NUM_CROSS_POLS {
        return Err(StokesError::NotEnoughPols {
            expected: NUM_CROSS_POLS,
            got: num_pols,
        });
    }
    trace!("Deriving Stokes parameters for {feed_type} feeds");

    let (i, q, u, v) = feed_type.stokes_from_products([
        cross_dat.index_axis(Axis(1), 0),
        cross_dat.index_axis(Axis(1), 1),
        cross_dat.index_axis(Axis(1), 2),
        cross_dat.index_axis(Axis(1), 3),
    ]);

    // Add the middle dimension back to match the input data layout.
    Ok(Stokes {
        i: i.insert_axis(Axis(1)),
        q: q.insert_axis(Axis(1)),
        u: u.insert_axis(Axis(1)),
        v: v.insert_axis(Axis(1)),
    })
}

/// Fractional linear (L/I) and circular (V/I) polarisation.
///
/// Division follows IEEE semantics: where Stokes I is zero, the results are
/// infinite or NaN.
pub fn fractional_polarisations(
    stokes: &Stokes,
) -> Result<(Array3<f64>, Array3<f64>), StokesError> {
    let mut lin = stokes.linear_polarisation()?;
    lin /= &stokes.i;
    let circ = &stokes.v / &stokes.i;
    Ok((lin, circ))
}
