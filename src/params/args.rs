// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! User-facing polarisation calibration arguments.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.

use std::{fs::File, io::Read, path::Path, str::FromStr};

use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::{OutputMode, ParamsError, PolCalParams};
use crate::{fold::PeriodicFold, stokes::FeedType};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileType::iter().join(", ");
}

/// Supported argument-file formats.
#[derive(Debug, Display, Clone, Copy, EnumIter, EnumString, PartialEq, Eq)]
pub enum ArgFileType {
    #[strum(serialize = "toml")]
    Toml,

    #[strum(serialize = "json")]
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolCalArgs {
    /// The polarisation basis of the feeds ("linear" or "circular"). Default:
    /// linear
    pub feed_type: Option<String>,

    /// The period of the noise diode [seconds]. Default: 0.04
    pub diode_period: Option<f64>,

    /// The number of noise-diode switches to fold over. Default: 1000
    pub num_switches: Option<usize>,

    /// How far into the noise-diode scan folding starts [seconds]. Default: 1
    pub start_offset: Option<f64>,

    /// Treat the first half of each diode period as "on" rather than "off".
    #[serde(default)]
    pub switch: bool,

    /// Write each calibrated Stokes parameter to its own file, rather than
    /// all of them to a single file.
    #[serde(default)]
    pub separate_files: bool,
}

impl PolCalArgs {
    /// Read arguments from a toml or json file. The type of file is determined
    /// by its extension.
    pub fn from_arg_file(arg_file: &Path) -> Result<PolCalArgs, ParamsError> {
        debug!("Attempting to parse argument file {}", arg_file.display());

        let arg_file_type = arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileType::from_str(&e).ok())
            .ok_or_else(|| ParamsError::UnrecognisedArgFile(arg_file.to_path_buf()))?;

        let mut contents = String::new();
        File::open(arg_file)?.read_to_string(&mut contents)?;
        let file = arg_file.display().to_string();
        match arg_file_type {
            ArgFileType::Toml => {
                debug!("Parsing toml file...");
                toml::from_str(&contents).map_err(|err| ParamsError::Toml { file, err })
            }
            ArgFileType::Json => {
                debug!("Parsing json file...");
                serde_json::from_str(&contents).map_err(|err| ParamsError::Json { file, err })
            }
        }
    }

    /// Combine two sets of arguments, preferring those in `self` when both are
    /// specified.
    pub fn merge(self, other: PolCalArgs) -> PolCalArgs {
        PolCalArgs {
            feed_type: self.feed_type.or(other.feed_type),
            diode_period: self.diode_period.or(other.diode_period),
            num_switches: self.num_switches.or(other.num_switches),
            start_offset: self.start_offset.or(other.start_offset),
            switch: self.switch || other.switch,
            separate_files: self.separate_files || other.separate_files,
        }
    }

    /// Serialise these arguments so that they can be saved and used to
    /// reproduce a run.
    pub fn to_toml(&self) -> Result<String, ParamsError> {
        Ok(toml::to_string(self)?)
    }

    /// Validate these arguments, filling in defaults.
    pub fn parse(self) -> Result<PolCalParams, ParamsError> {
        trace!("{:#?}", self);

        let PolCalArgs {
            feed_type,
            diode_period,
            num_switches,
            start_offset,
            switch,
            separate_files,
        } = self;

        let feed_type = match feed_type {
            Some(f) => FeedType::parse(&f)?,
            None => FeedType::default(),
        };

        let default_fold = PeriodicFold::default();
        let fold = PeriodicFold {
            diode_period: diode_period.unwrap_or(default_fold.diode_period),
            num_switches: num_switches.unwrap_or(default_fold.num_switches),
            start_offset: start_offset.unwrap_or(default_fold.start_offset),
            switch,
        };
        fold.validate()?;

        let output_mode = if separate_files {
            OutputMode::Separate
        } else {
            OutputMode::Combined
        };

        Ok(PolCalParams {
            feed_type,
            fold,
            output_mode,
        })
    }
}
