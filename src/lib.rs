// SPDX-License-Identifier: GPL-3.0-only

//! Obscura - a dial-controlled camera application for the COSMIC desktop
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Application state, message handlers, and UI
//! - [`backends`]: V4L2 device enumeration, control, and frame capture
//! - [`permissions`]: Capability probes behind the launch gate
//! - [`storage`]: Temporary captures and the photo library
//! - [`config`]: User configuration handling
//! - [`flash`]: LED flash and torch control via sysfs

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod flash;
pub mod i18n;
pub mod notify;
pub mod permissions;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, Message};
pub use backends::camera::{CameraFrame, DeviceSnapshot, Facing};
pub use config::Config;
