// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod calibrate;
mod products;

use ndarray::prelude::*;

use polcal::{
    constants::DEFAULT_COARSE_CHAN_BANDWIDTH_MHZ, mueller::apply_instrumental_mueller, FeedType,
    Spectra, SpectraHeader, Stokes,
};

const CHAN_PER_COARSE: usize = 16;
const GAIN: f64 = 0.1;
const PHASE: f64 = 0.2;

/// A header for 4 coarse channels, sampled every quarter of a second. The
/// band is inverted, as it usually is.
fn header() -> SpectraHeader {
    SpectraHeader::new(
        0.25,
        4 * CHAN_PER_COARSE,
        -DEFAULT_COARSE_CHAN_BANDWIDTH_MHZ / CHAN_PER_COARSE as f64,
    )
}

/// Convert Stokes parameters to the cross-polarisation products a
/// spectrometer with the given feeds would record.
fn to_cross_pols(stokes: &Stokes, feed_type: FeedType) -> Array3<f64> {
    let (num_timesteps, _, num_chans) = stokes.dim();
    let mut cross = Array3::zeros((num_timesteps, 4, num_chans));
    let i = stokes.i.index_axis(Axis(1), 0);
    let q = stokes.q.index_axis(Axis(1), 0);
    let u = stokes.u.index_axis(Axis(1), 0);
    let v = stokes.v.index_axis(Axis(1), 0);
    let products = match feed_type {
        FeedType::Linear => [(&i + &q) / 2.0, (&i - &q) / 2.0, &u / 2.0, &v / -2.0],
        FeedType::Circular => [(&i - &v) / 2.0, (&i + &v) / 2.0, &q / 2.0, &u / -2.0],
    };
    for (p, product) in products.iter().enumerate() {
        cross.index_axis_mut(Axis(1), p).assign(product);
    }
    cross
}

/// What an instrument with a differential gain of [`GAIN`] and phase of
/// [`PHASE`] in every coarse channel observes.
fn observe(stokes: Stokes) -> Stokes {
    let num_coarse_chans = stokes.num_chans() / CHAN_PER_COARSE;
    let gains = Array1::from_elem(num_coarse_chans, GAIN);
    let phases = Array1::from_elem(num_coarse_chans, PHASE);
    apply_instrumental_mueller(stokes, gains.view(), phases.view(), CHAN_PER_COARSE).unwrap()
}

/// A 20 s noise-diode scan. The sky is unpolarised; the 1 s period diode is
/// 100% linearly polarised and on for the second half of each period.
fn diode_scan(feed_type: FeedType) -> Spectra {
    let header = header();
    let shape = (80, 1, header.n_channels);
    let diode = |t: usize| if (t / 2) % 2 == 1 { 25.0 } else { 0.0 };
    let stokes = Stokes::new(
        Array3::from_shape_fn(shape, |(t, _, f)| 200.0 + f as f64 + diode(t)),
        Array3::zeros(shape),
        Array3::from_shape_fn(shape, |(t, _, _)| diode(t)),
        Array3::zeros(shape),
    )
    .unwrap();
    let cross = to_cross_pols(&observe(stokes), feed_type);
    Spectra::new(header, cross).unwrap()
}

/// The Stokes parameters of a polarised source.
fn sky() -> Stokes {
    let shape = (12, 1, header().n_channels);
    Stokes::new(
        Array3::from_shape_fn(shape, |(t, _, f)| 80.0 + (t * f) as f64 * 0.01),
        Array3::from_shape_fn(shape, |(_, _, f)| 12.0 * (f as f64 * 0.1).cos()),
        Array3::from_shape_fn(shape, |(_, _, f)| 12.0 * (f as f64 * 0.1).sin()),
        Array3::from_shape_fn(shape, |(t, _, _)| 2.0 - 0.1 * t as f64),
    )
    .unwrap()
}

fn science_scan(feed_type: FeedType) -> Spectra {
    let cross = to_cross_pols(&observe(sky()), feed_type);
    Spectra::new(header(), cross).unwrap()
}
