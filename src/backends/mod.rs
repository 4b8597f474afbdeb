// SPDX-License-Identifier: GPL-3.0-only

//! Hardware access layer
//!
//! # Modules
//!
//! - [`camera`]: V4L2 device enumeration, controls, preview streaming,
//!   and photo encoding

pub mod camera;
