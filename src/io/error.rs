// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from reading or writing spectrometer data.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpectraIoError {
    #[error("Spectrometer data '{}' does not exist", .0.display())]
    DoesNotExist(PathBuf),

    #[error("The header says there are {header} fine channels, but the data has {data}")]
    ChannelCountMismatch { header: usize, data: usize },

    #[error("Could not determine the number of coarse channels from {n_channels} fine channels of {foff_mhz} MHz and a coarse-channel bandwidth of {coarse_chan_bandwidth_mhz} MHz")]
    NoCoarseChannels {
        n_channels: usize,
        foff_mhz: f64,
        coarse_chan_bandwidth_mhz: f64,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),

    /// An error from a reader or writer outside of this crate.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
