// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use super::FEED_TYPES;

#[derive(Error, Debug)]
pub enum StokesError {
    #[error("Expected at least {expected} polarisation products in the cross-polarisation data, but found {got}")]
    NotEnoughPols { expected: usize, got: usize },

    #[error("Stokes parameters have mismatched shapes: I {i:?}, Q {q:?}, U {u:?}, V {v:?}")]
    MismatchedShapes {
        i: Vec<usize>,
        q: Vec<usize>,
        u: Vec<usize>,
        v: Vec<usize>,
    },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

#[derive(Error, Debug)]
#[error("Could not parse feed type '{value}'.\nSupported feed types are: {}", *FEED_TYPES)]
pub struct FeedTypeParseError {
    pub(super) value: String,
}
