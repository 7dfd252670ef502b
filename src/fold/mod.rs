// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Folding noise-diode data.
//!
//! A noise diode switched on and off with a known period injects a
//! calibration signal into the data. Synchronously averaging the time series
//! against that period separates the "diode off" and "diode on" states.

mod error;

pub use error::FoldError;

use log::{debug, trace};
use ndarray::prelude::*;

use crate::constants::{DEFAULT_DIODE_PERIOD, DEFAULT_NUM_SWITCHES, DEFAULT_START_OFFSET};

/// Anything that can separate noise-diode data into its "off" and "on"
/// states.
pub trait DiodeFold {
    /// Fold `series`, which has dimensions `[time, chan]`, against the diode
    /// period. Returns the per-channel mean of the diode-off state and the
    /// per-channel mean of the diode-on state, in that order.
    fn fold(
        &self,
        series: ArrayView2<f64>,
        sample_interval: f64,
    ) -> Result<(Array1<f64>, Array1<f64>), FoldError>;
}

/// Fold data against a diode with a fixed period, starting a fixed amount of
/// time into the data.
///
/// The first half period after the start is treated as diode-off, and the
/// following half period as diode-on. Set `switch` if the states are the
/// other way around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicFold {
    /// The period of the noise diode \[seconds\].
    pub diode_period: f64,

    /// The number of diode state changes to consider.
    pub num_switches: usize,

    /// How far into the data folding starts \[seconds\].
    pub start_offset: f64,

    /// Swap the "off" and "on" states.
    pub switch: bool,
}

impl Default for PeriodicFold {
    fn default() -> Self {
        PeriodicFold {
            diode_period: DEFAULT_DIODE_PERIOD,
            num_switches: DEFAULT_NUM_SWITCHES,
            start_offset: DEFAULT_START_OFFSET,
            switch: false,
        }
    }
}

impl PeriodicFold {
    /// Check that these parameters can be used to fold data.
    pub fn validate(&self) -> Result<(), FoldError> {
        if !(self.diode_period.is_finite() && self.diode_period > 0.0) {
            return Err(FoldError::BadDiodePeriod(self.diode_period));
        }
        if !(self.start_offset.is_finite() && self.start_offset >= 0.0) {
            return Err(FoldError::BadStartOffset(self.start_offset));
        }
        if self.num_switches < 3 {
            return Err(FoldError::TooFewSwitches(self.num_switches));
        }
        Ok(())
    }

    /// Get the timestep ranges for the two diode states. Every range is
    /// non-empty and lies within `num_timesteps`.
    fn state_ranges(
        &self,
        num_timesteps: usize,
        sample_interval: f64,
    ) -> Result<(Vec<std::ops::Range<usize>>, Vec<std::ops::Range<usize>>), FoldError> {
        if !(sample_interval.is_finite() && sample_interval > 0.0) {
            return Err(FoldError::BadSampleInterval(sample_interval));
        }
        self.validate()?;

        // The number of timesteps per diode state.
        let half_period = self.diode_period / 2.0 / sample_interval;
        let start = self.start_offset / sample_interval;
        trace!("Diode half period: {half_period} timesteps, starting at timestep {start}");
        // Switches are non-decreasing; none past the end of the data can
        // bound a usable range.
        let switches: Vec<usize> = (0..self.num_switches)
            .map(|k| (start + k as f64 * half_period).floor())
            .take_while(|&t| t <= num_timesteps as f64)
            .map(|t| t as usize)
            .collect();

        let to_range = |pair: &[usize]| {
            let range = pair[0] + 1..pair[1];
            (!range.is_empty()).then_some(range)
        };
        let first = switches.chunks_exact(2).filter_map(to_range).collect();
        let second = switches
            .get(1..)
            .unwrap_or(&[])
            .chunks_exact(2)
            .filter_map(to_range)
            .collect();
        Ok((first, second))
    }
}

/// Average the timesteps of each range, then average those averages. Every
/// range must be non-empty.
fn mean_over_ranges(series: ArrayView2<f64>, ranges: &[std::ops::Range<usize>]) -> Array1<f64> {
    let mut sum = Array1::zeros(series.len_of(Axis(1)));
    for range in ranges {
        sum += &(series.slice(s![range.clone(), ..]).sum_axis(Axis(0)) / range.len() as f64);
    }
    sum / ranges.len() as f64
}

impl DiodeFold for PeriodicFold {
    fn fold(
        &self,
        series: ArrayView2<f64>,
        sample_interval: f64,
    ) -> Result<(Array1<f64>, Array1<f64>), FoldError> {
        let num_timesteps = series.len_of(Axis(0));
        let (first, second) = self.state_ranges(num_timesteps, sample_interval)?;
        if first.is_empty() || second.is_empty() {
            return Err(FoldError::DiodeNotFound {
                num_timesteps,
                sample_interval,
                diode_period: self.diode_period,
            });
        }
        debug!(
            "Folding {num_timesteps} timesteps over {} and {} diode half periods",
            first.len(),
            second.len()
        );

        let first = mean_over_ranges(series, &first);
        let second = mean_over_ranges(series, &second);
        if self.switch {
            Ok((second, first))
        } else {
            Ok((first, second))
        }
    }
}
