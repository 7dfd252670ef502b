// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Uncalibrated Stokes and fractional polarisation products.

use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use ndarray::Zip;

use polcal::{
    pipeline::PipelineError, write_fracpol_files, write_stokes_files, MemoryStore, Silent,
    StokesSelection,
};

use super::*;

const INPUT: &str = "/mnt/data/spliced_diag_0002.cross_pols.fil";

#[test]
fn test_all_stokes_products() {
    let store = MemoryStore::new();
    store.insert(INPUT, science_scan(FeedType::Circular));
    let paths = write_stokes_files(
        &store,
        Path::new(INPUT),
        StokesSelection::all(),
        FeedType::Circular,
        &mut Silent,
    )
    .unwrap();
    assert_eq!(
        paths,
        [
            "/mnt/data/spliced_diag_0002.I.fil",
            "/mnt/data/spliced_diag_0002.Q.fil",
            "/mnt/data/spliced_diag_0002.U.fil",
            "/mnt/data/spliced_diag_0002.V.fil",
            "/mnt/data/spliced_diag_0002.L.fil",
        ]
        .map(PathBuf::from)
    );

    // No calibration is applied.
    let observed = observe(sky());
    for (path, expected) in paths
        .iter()
        .zip([&observed.i, &observed.q, &observed.u, &observed.v])
    {
        let written = store.get(path).unwrap();
        assert_eq!(written.header, header());
        assert_abs_diff_eq!(written.data, *expected, epsilon = 1e-10);
    }
    let l = Zip::from(&observed.q)
        .and(&observed.u)
        .map_collect(|&q, &u| (q * q + u * u).sqrt());
    assert_abs_diff_eq!(store.get(&paths[4]).unwrap().data, l, epsilon = 1e-10);
}

#[test]
fn test_fractional_polarisation() {
    let store = MemoryStore::new();
    store.insert(INPUT, science_scan(FeedType::Linear));
    let paths = write_fracpol_files(&store, Path::new(INPUT), FeedType::Linear, &mut Silent)
        .unwrap();
    assert_eq!(
        paths,
        [
            "/mnt/data/spliced_diag_0002.linpol.fil",
            "/mnt/data/spliced_diag_0002.circpol.fil",
        ]
        .map(PathBuf::from)
    );

    let observed = observe(sky());
    let lin = store.get(&paths[0]).unwrap().data;
    let circ = store.get(&paths[1]).unwrap().data;
    Zip::from(&lin)
        .and(&circ)
        .and(&observed.i)
        .and(&observed.q)
        .and(&observed.u)
        .and(&observed.v)
        .for_each(|&lin, &circ, &i, &q, &u, &v| {
            assert_abs_diff_eq!(lin, q.hypot(u) / i, epsilon = 1e-12);
            assert_abs_diff_eq!(circ, v / i, epsilon = 1e-12);
            assert!(lin < 1.0);
        });
}

#[test]
fn test_missing_input() {
    let store = MemoryStore::new();
    let result = write_fracpol_files(&store, Path::new(INPUT), FeedType::Linear, &mut Silent);
    assert!(matches!(result, Err(PipelineError::SpectraIo(_))));

    let result = write_stokes_files(
        &store,
        Path::new(INPUT),
        StokesSelection {
            v: true,
            ..Default::default()
        },
        FeedType::Linear,
        &mut Silent,
    );
    assert!(matches!(result, Err(PipelineError::SpectraIo(_))));
    assert!(store.paths().is_empty());
}
