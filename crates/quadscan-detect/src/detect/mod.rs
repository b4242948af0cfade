// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection pipeline stages (binarization, contour tracing, four-corner
// extraction, candidate filtering) and the independent edge-based strategy.

pub mod binarize;
pub mod contours;
pub mod corners;
pub mod edge;
pub mod filter;

pub use binarize::{ColorRange, binarize};
pub use contours::extract_contours;
pub use corners::extract_four_corners;
pub use edge::EdgeDetector;
pub use filter::{FilterParams, filter_contours};
