// SPDX-License-Identifier: GPL-3.0-only

//! Dial overlays for zoom and exposure
//!
//! A dial fans its options out along a circular arc over the preview.
//! [`geometry`] holds the pure layout math, [`view`] renders it.

pub mod geometry;
pub mod view;
