// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Polarisation calibration of radio-telescope spectrometer data.

Cross-polarisation products are converted to Stokes parameters. A scan with a
periodically-switched noise diode is folded to estimate the differential gain
and phase between the two feeds in each coarse channel, and the inverse
Mueller matrix built from those offsets is applied to a science scan.
 */

pub mod averaging;
pub mod calibrate;
pub mod constants;
mod error;
pub mod filenames;
pub mod fold;
pub mod io;
pub mod messages;
pub mod mueller;
pub mod params;
pub mod pipeline;
pub mod stokes;

// Re-exports.
pub use calibrate::{estimate_solutions, PolCalSolutions};
pub use error::PolCalError;
pub use fold::{DiodeFold, PeriodicFold};
pub use io::{MemoryStore, Spectra, SpectraHeader, SpectraStore};
pub use messages::{LogObserver, PipelineEvent, PipelineObserver, Silent};
pub use mueller::{apply_mueller, apply_solutions};
pub use params::{OutputMode, PolCalArgs, PolCalParams, StokesSelection};
pub use pipeline::{calibrate_pols, write_fracpol_files, write_stokes_files};
pub use stokes::{get_stokes, FeedType, Stokes};
