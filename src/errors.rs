// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera application

use std::fmt;

/// Photo capture errors
///
/// Capture failures are non-fatal to the session: they terminate the
/// capture attempt only and the user retries by pressing the shutter again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Camera controller absent or no frame has arrived yet
    NotInitialized,
    /// A capture is already in flight (shutter pressed twice)
    Busy,
    /// The device/backend raised an error while producing the photo
    DeviceFailure(String),
    /// Encoding the captured frame failed
    EncodingFailed(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NotInitialized => write!(f, "Camera is not initialized"),
            CaptureError::Busy => write!(f, "A capture is already in progress"),
            CaptureError::DeviceFailure(msg) => write!(f, "Device failure: {}", msg),
            CaptureError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for CaptureError {}

/// A capability the app depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Camera,
    Microphone,
    Library,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Camera => write!(f, "camera"),
            Capability::Microphone => write!(f, "microphone"),
            Capability::Library => write!(f, "photo library"),
        }
    }
}

/// Permission gate errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionError {
    /// The capability was requested and refused
    Denied(Capability),
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::Denied(capability) => {
                write!(f, "The {} capability was denied", capability)
            }
        }
    }
}

impl std::error::Error for PermissionError {}

/// Photo library persistence errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError(pub String);

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StorageError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_error_names_the_capability() {
        let error = PermissionError::Denied(Capability::Library);
        assert!(error.to_string().contains("photo library"));
    }
}
