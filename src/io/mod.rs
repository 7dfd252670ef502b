// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Spectrometer data handles and the interface used to read and write them.
//!
//! Parsing a spectrometer file format is not done in this crate; anything
//! implementing [`SpectraStore`] can supply data to the calibration pipeline.

mod error;
mod memory;

pub use error::SpectraIoError;
pub use memory::MemoryStore;

use std::path::Path;

use ndarray::prelude::*;

use crate::constants::DEFAULT_COARSE_CHAN_BANDWIDTH_MHZ;

/// Metadata describing spectrometer data.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectraHeader {
    /// The time between spectra \[seconds\].
    pub sample_interval: f64,

    /// The total number of fine channels.
    pub n_channels: usize,

    /// The width of a fine channel \[MHz\]. May be negative if the band is
    /// inverted.
    pub foff_mhz: f64,

    /// The width of a coarse channel \[MHz\].
    pub coarse_chan_bandwidth_mhz: f64,
}

impl SpectraHeader {
    /// A header with the default coarse-channel bandwidth.
    pub fn new(sample_interval: f64, n_channels: usize, foff_mhz: f64) -> SpectraHeader {
        SpectraHeader {
            sample_interval,
            n_channels,
            foff_mhz,
            coarse_chan_bandwidth_mhz: DEFAULT_COARSE_CHAN_BANDWIDTH_MHZ,
        }
    }

    /// The number of coarse channels spanned by the fine channels, determined
    /// from the fine-channel and coarse-channel bandwidths.
    pub fn n_coarse_channels(&self) -> Result<usize, SpectraIoError> {
        let SpectraHeader {
            n_channels,
            foff_mhz,
            coarse_chan_bandwidth_mhz,
            ..
        } = *self;
        let n = (n_channels as f64 * foff_mhz.abs() / coarse_chan_bandwidth_mhz).round();
        if !n.is_finite() || n < 1.0 {
            return Err(SpectraIoError::NoCoarseChannels {
                n_channels,
                foff_mhz,
                coarse_chan_bandwidth_mhz,
            });
        }
        Ok(n as usize)
    }
}

/// Spectrometer data with dimensions `[time, pol, freq]` and its header.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectra {
    pub header: SpectraHeader,
    pub data: Array3<f64>,
}

impl Spectra {
    pub fn new(header: SpectraHeader, data: Array3<f64>) -> Result<Spectra, SpectraIoError> {
        let data_chans = data.len_of(Axis(2));
        if data_chans != header.n_channels {
            return Err(SpectraIoError::ChannelCountMismatch {
                header: header.n_channels,
                data: data_chans,
            });
        }
        Ok(Spectra { header, data })
    }

    /// The number of coarse channels spanned by the data.
    pub fn n_coarse_channels(&self) -> Result<usize, SpectraIoError> {
        self.header.n_coarse_channels()
    }

    /// New spectra with the same header as `self`, but different data.
    pub fn with_data(&self, data: Array3<f64>) -> Result<Spectra, SpectraIoError> {
        Spectra::new(self.header.clone(), data)
    }
}

/// Something that can read and write spectrometer data.
pub trait SpectraStore {
    fn open(&self, path: &Path) -> Result<Spectra, SpectraIoError>;

    fn write(&self, spectra: &Spectra, path: &Path) -> Result<(), SpectraIoError>;
}
