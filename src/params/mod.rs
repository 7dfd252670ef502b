// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters for polarisation calibration.
//!
//! [`PolCalArgs`] is unparsed, user-facing configuration that may be read from
//! an argument file; [`PolCalParams`] has been parsed and is ready to be used
//! directly by the pipeline.

mod args;
mod error;

pub use args::{ArgFileType, PolCalArgs};
pub use error::ParamsError;

use crate::{fold::PeriodicFold, stokes::FeedType};

/// How calibrated Stokes parameters are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One file with I, Q, U and V stacked along the polarisation axis.
    #[default]
    Combined,

    /// One file per Stokes parameter.
    Separate,
}

/// Everything needed to calibrate a science scan with a noise-diode scan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolCalParams {
    pub feed_type: FeedType,
    pub fold: PeriodicFold,
    pub output_mode: OutputMode,
}

/// Which uncalibrated Stokes products to write out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StokesSelection {
    pub i: bool,
    pub q: bool,
    pub u: bool,
    pub v: bool,
    /// Total linear polarisation.
    pub l: bool,
}

impl StokesSelection {
    pub fn all() -> StokesSelection {
        StokesSelection {
            i: true,
            q: true,
            u: true,
            v: true,
            l: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.i || self.q || self.u || self.v || self.l)
    }
}
