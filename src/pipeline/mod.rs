// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Polarisation calibration of whole observations.
//!
//! Spectrometer data can be many gigabytes, so the noise-diode scan is
//! completely processed (and its data freed) before the science scan is
//! read. Nothing is written until every output product has been computed.

mod error;

pub use error::PipelineError;

use std::path::{Path, PathBuf};

use log::debug;

use crate::{
    averaging::chans_per_coarse,
    calibrate::{estimate_solutions, PolCalSolutions},
    filenames::{output_path, OutputProduct},
    fold::DiodeFold,
    io::{Spectra, SpectraHeader, SpectraStore},
    messages::{PipelineEvent, PipelineObserver, Scan},
    mueller::apply_solutions,
    params::{OutputMode, PolCalArgs, PolCalParams, StokesSelection},
    stokes::{fractional_polarisations, get_stokes, FeedType, Stokes},
    PolCalError,
};

/// Parse `args` and calibrate the science scan `cross_pols` with the
/// noise-diode scan `diode_cross`. Returns the paths written.
pub fn run<S, O>(
    store: &S,
    cross_pols: &Path,
    diode_cross: &Path,
    args: PolCalArgs,
    observer: &mut O,
) -> Result<Vec<PathBuf>, PolCalError>
where
    S: SpectraStore + ?Sized,
    O: PipelineObserver + ?Sized,
{
    let params = args.parse()?;
    Ok(calibrate_pols(
        store,
        cross_pols,
        diode_cross,
        &params,
        observer,
    )?)
}

/// Calibrate the science scan `cross_pols` with the noise-diode scan
/// `diode_cross`, using the fold described by `params`. Returns the paths
/// written.
pub fn calibrate_pols<S, O>(
    store: &S,
    cross_pols: &Path,
    diode_cross: &Path,
    params: &PolCalParams,
    observer: &mut O,
) -> Result<Vec<PathBuf>, PipelineError>
where
    S: SpectraStore + ?Sized,
    O: PipelineObserver + ?Sized,
{
    calibrate_pols_with_fold(
        store,
        cross_pols,
        diode_cross,
        params.feed_type,
        params.output_mode,
        &params.fold,
        observer,
    )
}

/// The same as [`calibrate_pols`], but with any noise-diode fold.
pub fn calibrate_pols_with_fold<S, F, O>(
    store: &S,
    cross_pols: &Path,
    diode_cross: &Path,
    feed_type: FeedType,
    output_mode: OutputMode,
    fold: &F,
    observer: &mut O,
) -> Result<Vec<PathBuf>, PipelineError>
where
    S: SpectraStore + ?Sized,
    F: DiodeFold + ?Sized,
    O: PipelineObserver + ?Sized,
{
    // Work out the output names before doing any work.
    let products: &[OutputProduct] = match output_mode {
        OutputMode::Combined => &[OutputProduct::CalibratedStokes],
        OutputMode::Separate => &[
            OutputProduct::CalibratedI,
            OutputProduct::CalibratedQ,
            OutputProduct::CalibratedU,
            OutputProduct::CalibratedV,
        ],
    };
    let output_paths = products
        .iter()
        .map(|&p| output_path(cross_pols, p))
        .collect::<Result<Vec<_>, _>>()?;

    let solutions = diode_solutions(store, diode_cross, feed_type, fold, observer)?;

    let (header, stokes) = open_stokes(store, cross_pols, feed_type, Scan::Science, observer)?;
    let chan_per_coarse = spectra_chan_per_coarse(&header)?;
    if chan_per_coarse != solutions.chan_per_coarse {
        return Err(PipelineError::ChannelisationMismatch {
            diode: solutions.chan_per_coarse,
            science: chan_per_coarse,
        });
    }
    observer.on_event(&PipelineEvent::ApplyingMueller {
        num_coarse_chans: solutions.num_coarse_chans(),
        chan_per_coarse,
    });
    let calibrated = apply_solutions(stokes, &solutions, chan_per_coarse)?;

    let outputs = match output_mode {
        OutputMode::Combined => vec![calibrated.into_stacked()?],
        OutputMode::Separate => {
            let Stokes { i, q, u, v } = calibrated;
            vec![i, q, u, v]
        }
    };
    let outputs = outputs
        .into_iter()
        .map(|data| Spectra::new(header.clone(), data))
        .collect::<Result<Vec<_>, _>>()?;

    write_all(store, products, &output_paths, outputs, observer)?;
    observer.on_event(&PipelineEvent::Released {
        scan: Scan::Science,
    });
    Ok(output_paths)
}

/// Write uncalibrated Stokes parameters (and/or total linear polarisation)
/// of `cross_pols` to their own files. Returns the paths written.
pub fn write_stokes_files<S, O>(
    store: &S,
    cross_pols: &Path,
    selection: StokesSelection,
    feed_type: FeedType,
    observer: &mut O,
) -> Result<Vec<PathBuf>, PipelineError>
where
    S: SpectraStore + ?Sized,
    O: PipelineObserver + ?Sized,
{
    if selection.is_empty() {
        debug!("No Stokes products selected; nothing to write");
        return Ok(vec![]);
    }

    let selected = [
        (selection.i, OutputProduct::StokesI),
        (selection.q, OutputProduct::StokesQ),
        (selection.u, OutputProduct::StokesU),
        (selection.v, OutputProduct::StokesV),
        (selection.l, OutputProduct::StokesL),
    ]
    .into_iter()
    .filter_map(|(wanted, product)| wanted.then_some(product))
    .collect::<Vec<_>>();
    let output_paths = selected
        .iter()
        .map(|&p| output_path(cross_pols, p))
        .collect::<Result<Vec<_>, _>>()?;

    let (header, stokes) = open_stokes(store, cross_pols, feed_type, Scan::Science, observer)?;
    let l = if selection.l {
        Some(stokes.linear_polarisation()?)
    } else {
        None
    };
    let Stokes { i, q, u, v } = stokes;
    let outputs = [
        (selection.i, Some(i)),
        (selection.q, Some(q)),
        (selection.u, Some(u)),
        (selection.v, Some(v)),
        (selection.l, l),
    ]
    .into_iter()
    .filter_map(|(wanted, data)| if wanted { data } else { None })
    .map(|data| Spectra::new(header.clone(), data))
    .collect::<Result<Vec<_>, _>>()?;

    write_all(store, &selected, &output_paths, outputs, observer)?;
    observer.on_event(&PipelineEvent::Released {
        scan: Scan::Science,
    });
    Ok(output_paths)
}

/// Write fractional linear (L/I) and circular (V/I) polarisation of
/// `cross_pols` to their own files. Returns the paths written.
///
/// Where Stokes I is zero, the fractions are infinite or NaN.
pub fn write_fracpol_files<S, O>(
    store: &S,
    cross_pols: &Path,
    feed_type: FeedType,
    observer: &mut O,
) -> Result<Vec<PathBuf>, PipelineError>
where
    S: SpectraStore + ?Sized,
    O: PipelineObserver + ?Sized,
{
    let products = [
        OutputProduct::FractionalLinear,
        OutputProduct::FractionalCircular,
    ];
    let output_paths = products
        .iter()
        .map(|&p| output_path(cross_pols, p))
        .collect::<Result<Vec<_>, _>>()?;

    let (header, stokes) = open_stokes(store, cross_pols, feed_type, Scan::Science, observer)?;
    let (lin, circ) = fractional_polarisations(&stokes)?;
    drop(stokes);
    let outputs = vec![
        Spectra::new(header.clone(), lin)?,
        Spectra::new(header, circ)?,
    ];

    write_all(store, &products, &output_paths, outputs, observer)?;
    observer.on_event(&PipelineEvent::Released {
        scan: Scan::Science,
    });
    Ok(output_paths)
}

/// Get the number of fine channels per coarse channel, insisting that the
/// fine channels divide evenly into the coarse channels.
fn spectra_chan_per_coarse(header: &SpectraHeader) -> Result<usize, PipelineError> {
    let n_coarse = header.n_coarse_channels()?;
    Ok(chans_per_coarse(header.n_channels, n_coarse)?)
}

/// Open `path` and derive its Stokes parameters. The raw cross-polarisation
/// data are freed before returning.
fn open_stokes<S, O>(
    store: &S,
    path: &Path,
    feed_type: FeedType,
    scan: Scan,
    observer: &mut O,
) -> Result<(SpectraHeader, Stokes), PipelineError>
where
    S: SpectraStore + ?Sized,
    O: PipelineObserver + ?Sized,
{
    observer.on_event(&PipelineEvent::Opening { scan, path });
    let Spectra { header, data } = store.open(path)?;
    let stokes = get_stokes(data.view(), feed_type)?;
    drop(data);
    observer.on_event(&PipelineEvent::StokesDerived {
        scan,
        feed_type,
        dim: stokes.dim(),
    });
    Ok((header, stokes))
}

/// Estimate the differential gain and phase from the noise-diode scan. All
/// of the scan's data are dropped when this function returns, whether it
/// succeeded or not.
fn diode_solutions<S, F, O>(
    store: &S,
    diode_cross: &Path,
    feed_type: FeedType,
    fold: &F,
    observer: &mut O,
) -> Result<PolCalSolutions, PipelineError>
where
    S: SpectraStore + ?Sized,
    F: DiodeFold + ?Sized,
    O: PipelineObserver + ?Sized,
{
    let (header, stokes) = open_stokes(store, diode_cross, feed_type, Scan::Diode, observer)?;
    // Usually 8 coarse channels in a noise-diode scan.
    let chan_per_coarse = spectra_chan_per_coarse(&header)?;
    debug!(
        "Noise-diode scan: {} channels, {chan_per_coarse} per coarse channel",
        header.n_channels
    );

    let solutions = estimate_solutions(&stokes, header.sample_interval, chan_per_coarse, fold)?;
    drop(stokes);
    observer.on_event(&PipelineEvent::Released { scan: Scan::Diode });
    observer.on_event(&PipelineEvent::SolutionsEstimated {
        solutions: &solutions,
    });
    Ok(solutions)
}

fn write_all<S, O>(
    store: &S,
    products: &[OutputProduct],
    paths: &[PathBuf],
    outputs: Vec<Spectra>,
    observer: &mut O,
) -> Result<(), PipelineError>
where
    S: SpectraStore + ?Sized,
    O: PipelineObserver + ?Sized,
{
    for ((&product, path), spectra) in products.iter().zip(paths).zip(outputs) {
        store.write(&spectra, path)?;
        observer.on_event(&PipelineEvent::Wrote { product, path });
    }
    Ok(())
}
