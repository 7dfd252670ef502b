// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! End-to-end polarisation calibration.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use approx::assert_relative_eq;
use ndarray::prelude::*;
use tempfile::Builder;

use polcal::{
    calibrate_pols,
    io::SpectraIoError,
    pipeline::{run, PipelineError},
    LogObserver, MemoryStore, OutputMode, PolCalArgs, PolCalError, PolCalParams, Silent, Spectra,
    SpectraStore,
};

use super::*;

const SCIENCE: &str = "blc00_guppi_58331_12383_SGR_B2_0014.rawspec.0000.cross_pols.fil";
const DIODE: &str = "blc00_guppi_58331_12000_DIODE_0013.rawspec.0000.cross_pols.fil";

fn store(feed_type: FeedType) -> MemoryStore {
    let store = MemoryStore::new();
    store.insert(SCIENCE, science_scan(feed_type));
    store.insert(DIODE, diode_scan(feed_type));
    store
}

fn params(feed_type: FeedType, output_mode: OutputMode) -> PolCalParams {
    let mut params = PolCalParams {
        feed_type,
        output_mode,
        ..Default::default()
    };
    params.fold.diode_period = 1.0;
    params.fold.start_offset = 1.0;
    params
}

#[test]
fn test_recovers_sky_linear_feeds() {
    let store = store(FeedType::Linear);
    let paths = calibrate_pols(
        &store,
        Path::new(SCIENCE),
        Path::new(DIODE),
        &params(FeedType::Linear, OutputMode::Combined),
        &mut LogObserver,
    )
    .unwrap();
    assert_eq!(
        paths,
        vec![PathBuf::from(
            "blc00_guppi_58331_12383_SGR_B2_0014.rawspec.0000.SIQUV.polcal.fil"
        )]
    );

    let calibrated = store.get(&paths[0]).unwrap();
    assert_eq!(calibrated.header, header());
    let expected = sky().into_stacked().unwrap();
    assert_relative_eq!(calibrated.data, expected, max_relative = 1e-6, epsilon = 1e-9);
}

#[test]
fn test_recovers_sky_circular_feeds() {
    let store = store(FeedType::Circular);
    let paths = calibrate_pols(
        &store,
        Path::new(SCIENCE),
        Path::new(DIODE),
        &params(FeedType::Circular, OutputMode::Separate),
        &mut Silent,
    )
    .unwrap();
    assert_eq!(paths.len(), 4);

    let sky = sky();
    for (path, expected) in paths.iter().zip([&sky.i, &sky.q, &sky.u, &sky.v]) {
        let calibrated = store.get(path).unwrap();
        assert_eq!(calibrated.data.dim(), expected.dim());
        assert_relative_eq!(calibrated.data, *expected, max_relative = 1e-6, epsilon = 1e-9);
    }
}

#[test]
fn test_run_with_arg_file() {
    let mut arg_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        arg_file,
        r#"
diode_period = 1.0
start_offset = 1.0
separate_files = true
"#
    )
    .unwrap();
    arg_file.flush().unwrap();

    // Arguments given directly take precedence over those in the file.
    let args = PolCalArgs {
        separate_files: false,
        feed_type: Some("Linear".to_string()),
        ..Default::default()
    }
    .merge(PolCalArgs::from_arg_file(arg_file.path()).unwrap());
    assert!(args.separate_files);

    let store = store(FeedType::Linear);
    let paths = run(
        &store,
        Path::new(SCIENCE),
        Path::new(DIODE),
        args,
        &mut Silent,
    )
    .unwrap();
    let suffixes = paths
        .iter()
        .map(|p| p.to_str().unwrap().rsplit_once(".0000").unwrap().1.to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        suffixes,
        [".SI.polcal.fil", ".Q.polcal.fil", ".U.polcal.fil", ".V.polcal.fil"]
    );
    assert_relative_eq!(
        store.get(&paths[0]).unwrap().data,
        sky().i,
        max_relative = 1e-6
    );
}

#[test]
fn test_diode_scan_too_short() {
    let store = store(FeedType::Linear);
    // Only 1 s of data; folding starts 1 s in.
    let diode = store.get(DIODE).unwrap();
    let short = diode.with_data(diode.data.slice(s![..4, .., ..]).to_owned()).unwrap();
    store.insert(DIODE, short);

    let result = calibrate_pols(
        &store,
        Path::new(SCIENCE),
        Path::new(DIODE),
        &params(FeedType::Linear, OutputMode::Combined),
        &mut Silent,
    );
    assert!(matches!(result, Err(PipelineError::Calibrate(_))));
    assert_eq!(store.paths().len(), 2);
}

/// Reads from memory but can't write anything.
struct ReadOnlyStore(MemoryStore);

impl SpectraStore for ReadOnlyStore {
    fn open(&self, path: &Path) -> Result<Spectra, SpectraIoError> {
        self.0.open(path)
    }

    fn write(&self, _spectra: &Spectra, path: &Path) -> Result<(), SpectraIoError> {
        Err(SpectraIoError::Other(
            format!("{} is read only", path.display()).into(),
        ))
    }
}

#[test]
fn test_write_errors_are_propagated() {
    let store = ReadOnlyStore(store(FeedType::Linear));
    let result = run(
        &store,
        Path::new(SCIENCE),
        Path::new(DIODE),
        PolCalArgs {
            diode_period: Some(1.0),
            ..Default::default()
        },
        &mut Silent,
    );
    match result {
        Err(PolCalError::Pipeline(PipelineError::SpectraIo(SpectraIoError::Other(e)))) => {
            assert!(e.to_string().ends_with("SIQUV.polcal.fil is read only"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_stacked_output_order() {
    let store = store(FeedType::Linear);
    let paths = calibrate_pols(
        &store,
        Path::new(SCIENCE),
        Path::new(DIODE),
        &params(FeedType::Linear, OutputMode::Combined),
        &mut Silent,
    )
    .unwrap();
    let data = store.get(&paths[0]).unwrap().data;
    let sky = sky();
    // I, Q, U, V along the polarisation axis.
    for (pol, expected) in [&sky.i, &sky.q, &sky.u, &sky.v].into_iter().enumerate() {
        assert_relative_eq!(
            data.slice(s![.., pol..pol + 1, ..]),
            expected.view(),
            max_relative = 1e-6,
            epsilon = 1e-9
        );
    }
}
