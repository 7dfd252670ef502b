// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Spectrometer data may be stored in
single precision, but all calibration arithmetic happens in double precision.
 */

/// The number of fine channels at the start of every coarse channel that are
/// excluded when averaging to coarse-channel resolution. These channels are
/// affected by the polyphase filterbank's roll-off.
pub const COARSE_CHAN_LEADING_TRIM: usize = 2;

/// The number of fine channels at the end of every coarse channel that are
/// excluded when averaging to coarse-channel resolution.
pub const COARSE_CHAN_TRAILING_TRIM: usize = 1;

/// The default period of the noise diode \[seconds\].
pub const DEFAULT_DIODE_PERIOD: f64 = 0.04;

/// The default number of diode switches to consider when folding.
pub const DEFAULT_NUM_SWITCHES: usize = 1000;

/// The default amount of data skipped before folding starts \[seconds\].
pub const DEFAULT_START_OFFSET: f64 = 1.0;

/// The default bandwidth of a coarse channel \[MHz\]. This is 187.5 MHz split
/// into 64 coarse channels.
pub const DEFAULT_COARSE_CHAN_BANDWIDTH_MHZ: f64 = 187.5 / 64.0;

/// Input cross-polarisation files are expected to end in this string. This
/// many characters are stripped from the input file name before output
/// suffixes are appended.
pub const CROSS_POLS_SUFFIX: &str = ".cross_pols.fil";
