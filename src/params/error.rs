// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use super::args::ARG_FILE_TYPES_COMMA_SEPARATED;

#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("Argument file '{}' doesn't have a recognised file extension! Valid extensions are: {}", .0.display(), *ARG_FILE_TYPES_COMMA_SEPARATED)]
    UnrecognisedArgFile(PathBuf),

    #[error("Couldn't decode toml structure from {file}:\n{err}")]
    Toml { file: String, err: toml::de::Error },

    #[error("Couldn't decode json structure from {file}:\n{err}")]
    Json {
        file: String,
        err: serde_json::Error,
    },

    #[error("Couldn't serialise arguments to toml: {0}")]
    TomlSerialise(#[from] toml::ser::Error),

    #[error(transparent)]
    FeedType(#[from] crate::stokes::FeedTypeParseError),

    #[error(transparent)]
    Fold(#[from] crate::fold::FoldError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
