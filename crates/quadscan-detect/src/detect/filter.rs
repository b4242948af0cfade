// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour filter pipeline — perimeter bounds, corner reduction, opposite-side
// symmetry, and containment-based de-duplication.

use quadscan_core::error::{QuadScanError, Result};
use quadscan_core::geometry;
use quadscan_core::{Contour, LengthBounds, Quad};
use tracing::{debug, instrument};

use crate::detect::corners::extract_four_corners;

/// Parameters shared by every filter stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Accepted closed-perimeter range, in pixels.
    pub bounds: LengthBounds,
    /// Accepted range of opposite-side squared-length ratios.
    pub side_ratio_min: f64,
    pub side_ratio_max: f64,
}

/// Run the four rejection stages in order.
///
/// Each stage drops failing candidates for good; an empty list after any
/// stage is reported as [`QuadScanError::NoDocumentsFound`]. Survivors are
/// returned largest area first.
#[instrument(skip(contours, params), fields(candidates = contours.len()))]
pub fn filter_contours(contours: Vec<Contour>, params: &FilterParams) -> Result<Vec<Quad>> {
    let contours = retain_by_length(contours, &params.bounds);
    debug!(remaining = contours.len(), "Length filter applied");
    if contours.is_empty() {
        return Err(QuadScanError::NoDocumentsFound);
    }

    let quads = reduce_to_quads(&contours, &params.bounds);
    debug!(remaining = quads.len(), "Corner reduction applied");
    if quads.is_empty() {
        return Err(QuadScanError::NoDocumentsFound);
    }

    let quads = retain_symmetric(quads, params.side_ratio_min, params.side_ratio_max);
    debug!(remaining = quads.len(), "Side ratio filter applied");
    if quads.is_empty() {
        return Err(QuadScanError::NoDocumentsFound);
    }

    let quads = remove_nested(quads, &params.bounds);
    debug!(remaining = quads.len(), "Nested candidates removed");
    if quads.is_empty() {
        return Err(QuadScanError::NoDocumentsFound);
    }

    Ok(quads)
}

/// Stage 1: at least four points and a closed perimeter inside `bounds`.
pub fn retain_by_length(contours: Vec<Contour>, bounds: &LengthBounds) -> Vec<Contour> {
    contours
        .into_iter()
        .filter(|c| c.len() >= 4 && bounds.contains(geometry::perimeter(c)))
        .collect()
}

/// Stage 2: reduce each outline to four corners, dropping the ones that fail.
pub fn reduce_to_quads(contours: &[Contour], bounds: &LengthBounds) -> Vec<Quad> {
    contours
        .iter()
        .filter_map(|c| extract_four_corners(c, bounds).ok())
        .collect()
}

/// Stage 3: both opposite-side squared-length ratios inside `[min, max]`.
pub fn retain_symmetric(quads: Vec<Quad>, min: f64, max: f64) -> Vec<Quad> {
    let in_range = |ratio: f64| min <= ratio && ratio <= max;
    quads
        .into_iter()
        .filter(|q| {
            let (first, second) = q.opposite_side_ratios();
            in_range(first) && in_range(second)
        })
        .collect()
}

/// Stage 4: sort by area, largest first, then drop every smaller candidate
/// whose centroid lies inside a larger surviving one.
///
/// Runs as two passes over an explicit survivor mask so that removals never
/// disturb the indices being scanned. Only candidates whose own perimeter is
/// inside `bounds` may absorb others.
pub fn remove_nested(mut quads: Vec<Quad>, bounds: &LengthBounds) -> Vec<Quad> {
    quads.sort_by(|a, b| b.area().total_cmp(&a.area()));

    let mut kept = vec![true; quads.len()];
    for outer in 0..quads.len() {
        if !kept[outer] || !bounds.contains(quads[outer].perimeter()) {
            continue;
        }
        for inner in outer + 1..quads.len() {
            if kept[inner] && quads[outer].contains(quads[inner].centroid()) {
                kept[inner] = false;
            }
        }
    }

    quads
        .into_iter()
        .zip(kept)
        .filter_map(|(quad, keep)| keep.then_some(quad))
        .collect()
}
