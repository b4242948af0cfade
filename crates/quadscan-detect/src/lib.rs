// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// quadscan-detect — Document detection for Quadscan.
//
// Finds document quadrilaterals against a known background color (binarization,
// contour tracing, four-corner extraction, shape filtering), rectifies the
// most central one, and offers an independent edge-based detector.

pub mod detect;
pub mod detector;
pub mod rectify;

// Re-export the primary entry points so callers can use `quadscan_detect::DocumentDetector` etc.
pub use detect::EdgeDetector;
pub use detector::DocumentDetector;
pub use rectify::rectify;
