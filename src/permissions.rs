// SPDX-License-Identifier: GPL-3.0-only

//! Permission gate for the capture screen
//!
//! Queries three independent capability grants (camera, microphone,
//! library) and produces the single "ready" signal that gates routing to
//! the capture screen. On Linux the grants are probed from device-node
//! access: a capability is granted when the corresponding device (or
//! directory) can actually be opened by this process.

use std::path::Path;
use tracing::{debug, info, warn};

/// Tri-state permission status, `NotDetermined` until first requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    /// Capability was requested and granted
    Granted,
    /// Capability was requested and refused
    Denied,
    /// Capability has not been requested yet
    #[default]
    NotDetermined,
}

impl PermissionStatus {
    /// Whether the capability is granted
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

/// Grant status of the three capabilities the app depends on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionState {
    /// Camera device access
    pub camera: PermissionStatus,
    /// Microphone device access (recording is stubbed, the grant is not)
    pub microphone: PermissionStatus,
    /// Write access to the photo library directory
    pub library: bool,
}

impl PermissionState {
    /// Routing gate for the capture screen.
    ///
    /// The camera grant must be present and the microphone question must
    /// have been answered either way. Library access is checked separately
    /// before the shutter is usable, not here.
    pub fn is_ready(&self) -> bool {
        self.camera.is_granted() && self.microphone != PermissionStatus::NotDetermined
    }

    /// Whether every capability, library included, is granted
    pub fn all_granted(&self) -> bool {
        self.camera.is_granted() && self.microphone.is_granted() && self.library
    }

    /// Whether the shutter may fire: on top of [`Self::is_ready`], the
    /// library must be writable so the capture has somewhere to go
    pub fn shutter_allowed(&self) -> bool {
        self.is_ready() && self.library
    }
}

/// Request camera access by probing video device nodes.
///
/// Idempotent: safe to call repeatedly, only ever updates the camera
/// status. The XDG desktop portal is consulted first when one answers
/// on the session bus; otherwise `/dev/video*` is scanned directly and
/// `Granted` reported when at least one node opens read/write.
pub fn request_camera() -> PermissionStatus {
    if portal_camera_present() == Some(false) {
        warn!("Desktop portal reports no camera present");
        return PermissionStatus::Denied;
    }

    let status = probe_device_class(Path::new("/dev"), "video");
    info!(?status, "Camera permission requested");
    status
}

/// Ask the XDG desktop portal whether a camera exists.
///
/// `None` when no portal answers on the session bus; the caller then
/// falls back to probing device nodes directly.
fn portal_camera_present() -> Option<bool> {
    fn probe() -> zbus::Result<bool> {
        let connection = zbus::blocking::Connection::session()?;
        let proxy = zbus::blocking::Proxy::new(
            &connection,
            "org.freedesktop.portal.Desktop",
            "/org/freedesktop/portal/desktop",
            "org.freedesktop.portal.Camera",
        )?;
        proxy.get_property("IsCameraPresent")
    }

    match probe() {
        Ok(present) => {
            debug!(present, "Camera portal answered");
            Some(present)
        }
        Err(error) => {
            debug!(%error, "No camera portal on the session bus");
            None
        }
    }
}

/// Request microphone access by probing sound device nodes under `/dev/snd`
pub fn request_microphone() -> PermissionStatus {
    let snd_dir = Path::new("/dev/snd");
    if !snd_dir.exists() {
        warn!("No /dev/snd directory, microphone denied");
        return PermissionStatus::Denied;
    }
    let status = probe_device_class(snd_dir, "pcm");
    info!(?status, "Microphone permission requested");
    status
}

/// Request library access by ensuring the save directory exists and is
/// writable. Returns the resulting grant.
pub fn request_library(library_dir: &Path) -> bool {
    if let Err(error) = std::fs::create_dir_all(library_dir) {
        warn!(%error, path = %library_dir.display(), "Cannot create library directory");
        return false;
    }

    // A directory can exist yet be read-only for us; probe with a write
    let probe = library_dir.join(".obscura-write-probe");
    match std::fs::write(&probe, b"") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            info!(path = %library_dir.display(), "Library permission granted");
            true
        }
        Err(error) => {
            warn!(%error, path = %library_dir.display(), "Library directory not writable");
            false
        }
    }
}

/// Probe a class of device nodes (`<dir>/<prefix>*`) for open access
fn probe_device_class(dir: &Path, prefix: &str) -> PermissionStatus {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return PermissionStatus::Denied;
    };

    let mut found_any = false;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name_str) = name.to_str() else {
            continue;
        };
        if !name_str.starts_with(prefix) {
            continue;
        }
        found_any = true;

        match std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(entry.path())
        {
            Ok(_) => return PermissionStatus::Granted,
            Err(error) => {
                debug!(node = %entry.path().display(), %error, "Device node not openable");
            }
        }
    }

    if found_any {
        warn!(dir = %dir.display(), prefix, "Device nodes present but none openable");
    } else {
        warn!(dir = %dir.display(), prefix, "No matching device nodes found");
    }
    PermissionStatus::Denied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_undetermined() {
        let state = PermissionState::default();
        assert_eq!(state.camera, PermissionStatus::NotDetermined);
        assert_eq!(state.microphone, PermissionStatus::NotDetermined);
        assert!(!state.library);
        assert!(!state.is_ready());
    }

    #[test]
    fn test_ready_requires_camera_grant() {
        let state = PermissionState {
            camera: PermissionStatus::Denied,
            microphone: PermissionStatus::Granted,
            library: true,
        };
        assert!(!state.is_ready(), "denied camera must route to permissions");
    }

    #[test]
    fn test_ready_requires_answered_microphone() {
        let mut state = PermissionState {
            camera: PermissionStatus::Granted,
            microphone: PermissionStatus::NotDetermined,
            library: false,
        };
        assert!(!state.is_ready());

        // An answered microphone question is enough, even when denied
        state.microphone = PermissionStatus::Denied;
        assert!(state.is_ready());
        assert!(!state.all_granted());
    }

    #[test]
    fn test_all_granted_includes_library() {
        let mut state = PermissionState {
            camera: PermissionStatus::Granted,
            microphone: PermissionStatus::Granted,
            library: false,
        };
        assert!(state.is_ready());
        assert!(!state.all_granted());

        state.library = true;
        assert!(state.all_granted());
    }

    #[test]
    fn test_shutter_needs_library_on_top_of_readiness() {
        let mut state = PermissionState {
            camera: PermissionStatus::Granted,
            microphone: PermissionStatus::Denied,
            library: false,
        };
        assert!(state.is_ready());
        assert!(!state.shutter_allowed());

        state.library = true;
        assert!(state.shutter_allowed());
    }

    #[test]
    fn test_request_library_in_tempdir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let library = dir.path().join("pictures");
        assert!(request_library(&library));
        assert!(library.is_dir());
    }
}
