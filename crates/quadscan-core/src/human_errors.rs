// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for people pointing a camera at a document.
//
// Each error becomes a short message and one concrete thing to try.
// The severity drives whether the caller should simply grab another frame or
// ask the user to change something about the scene.

use crate::error::QuadScanError;

/// How the caller should react to a failed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Another frame will probably work; retry on the next capture.
    Transient,
    /// The user must change the scene (background, lighting, framing).
    ActionRequired,
    /// Retrying with the same input cannot succeed.
    Permanent,
}

/// Message and suggestion pair for one failed operation.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What to change before the next attempt.
    pub suggestion: String,
    /// Whether the caller should retry on the next captured frame.
    pub retriable: bool,
    /// How to react.
    pub severity: Severity,
}

/// Convert a `QuadScanError` into a `HumanError` suitable for end users.
pub fn humanize_error(err: &QuadScanError) -> HumanError {
    match err {
        // -- Detection errors --
        QuadScanError::InvalidInput(detail) => HumanError {
            message: "This picture can't be scanned.".into(),
            suggestion: format!("Use a colour photo with at least one pixel. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        QuadScanError::NoDocumentsFound => HumanError {
            message: "No document detected.".into(),
            suggestion: "Try adjusting the background colour or the lighting, and make sure the whole document is in view.".into(),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        QuadScanError::DegenerateCorners => HumanError {
            message: "The document's corners couldn't be found.".into(),
            suggestion: "Hold the camera steady and make sure all four corners of the document are visible.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        QuadScanError::DegenerateQuad => HumanError {
            message: "The document looks flat or folded from this angle.".into(),
            suggestion: "Point the camera more directly at the document and try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Configuration --
        QuadScanError::InvalidConfig(detail) => HumanError {
            message: "The detection settings are not valid.".into(),
            suggestion: format!("Check the configuration file and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Files and codecs --
        QuadScanError::ImageError(_) => HumanError {
            message: "The image file couldn't be decoded or saved.".into(),
            suggestion: "Re-export the picture as PNG or JPEG and check the output path.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        QuadScanError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "No file exists at that path.".into(),
                suggestion: "Check the spelling of the path.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Quadscan isn't allowed to open that file.".into(),
                suggestion: "Check the file permissions, or copy the file somewhere you own.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "Reading or writing a file failed.".into(),
                suggestion: "Try again; if it keeps failing, check free disk space.".into(),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        QuadScanError::Serialization(_) => HumanError {
            message: "A settings or results file couldn't be read or written.".into(),
            suggestion: "Make sure the file is valid JSON and try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}
