// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Quadscan.

use thiserror::Error;

/// Top-level error type for all Quadscan operations.
///
/// Candidates rejected inside the filter pipeline are not errors; only the
/// outcome of a whole detection or extraction call is reported here.
#[derive(Debug, Error)]
pub enum QuadScanError {
    // -- Detection errors --
    #[error("invalid input image: {0}")]
    InvalidInput(String),

    #[error("no documents found")]
    NoDocumentsFound,

    #[error("could not isolate four distinct document corners")]
    DegenerateCorners,

    #[error("document quadrilateral is degenerate (zero width or height)")]
    DegenerateQuad,

    // -- Configuration --
    #[error("invalid detection configuration: {0}")]
    InvalidConfig(String),

    // -- Image codec / file boundary --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for every fallible Quadscan operation.
pub type Result<T> = std::result::Result<T, QuadScanError>;
