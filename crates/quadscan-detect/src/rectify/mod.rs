// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification — canonical corner ordering and perspective warping of a
// detected quadrilateral into an upright rectangle.

pub mod perspective;

pub use perspective::{rectify, target_size};
