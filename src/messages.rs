// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Progress reporting.
//!
//! The calibration pipeline doesn't print anything itself. Instead, it
//! reports what it's doing to a [`PipelineObserver`]; [`Silent`] ignores
//! everything and [`LogObserver`] forwards events to the `log` crate.

use std::path::Path;

use log::info;
use strum_macros::Display;

use crate::{calibrate::PolCalSolutions, filenames::OutputProduct, stokes::FeedType};

/// The two observations used in polarisation calibration.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// An observation with a noise diode switching on and off.
    #[strum(serialize = "noise-diode")]
    Diode,

    /// The observation to be calibrated.
    #[strum(serialize = "science")]
    Science,
}

/// Something the pipeline did.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent<'a> {
    Opening {
        scan: Scan,
        path: &'a Path,
    },

    StokesDerived {
        scan: Scan,
        feed_type: FeedType,
        /// The dimensions of each Stokes array.
        dim: (usize, usize, usize),
    },

    SolutionsEstimated {
        solutions: &'a PolCalSolutions,
    },

    /// All buffers holding a scan's data have been freed.
    Released {
        scan: Scan,
    },

    ApplyingMueller {
        num_coarse_chans: usize,
        chan_per_coarse: usize,
    },

    Wrote {
        product: OutputProduct,
        path: &'a Path,
    },
}

/// Receives [`PipelineEvent`]s as the pipeline progresses.
pub trait PipelineObserver {
    fn on_event(&mut self, event: &PipelineEvent);
}

/// Ignores all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl PipelineObserver for Silent {
    fn on_event(&mut self, _event: &PipelineEvent) {}
}

/// Reports events as info-level log messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn on_event(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::Opening { scan, path } => {
                info!("Opening {scan} scan {}", path.display());
            }

            PipelineEvent::StokesDerived {
                scan,
                feed_type,
                dim: (num_timesteps, _, num_chans),
            } => {
                info!("Derived {scan} Stokes parameters ({feed_type} feeds)");
                info!("  {num_timesteps} timesteps, {num_chans} channels");
            }

            PipelineEvent::SolutionsEstimated { solutions } => {
                info!(
                    "Estimated Mueller matrix variables for {} coarse channels",
                    solutions.num_coarse_chans()
                );
                if let (Some(g), Some(psi)) = (
                    solutions.gain_offsets.mean(),
                    solutions.phase_offsets.mean(),
                ) {
                    info!("  mean differential gain: {g:.4}");
                    info!("  mean differential phase: {psi:.4} rad");
                }
            }

            PipelineEvent::Released { scan } => info!("Released {scan} scan data"),

            PipelineEvent::ApplyingMueller {
                num_coarse_chans,
                chan_per_coarse,
            } => {
                info!("Applying Mueller matrix ({num_coarse_chans} coarse channels x {chan_per_coarse} fine channels)");
            }

            PipelineEvent::Wrote { product, path } => {
                info!("Wrote {} ({product})", path.display());
            }
        }
    }
}
