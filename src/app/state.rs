// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::app::session::SessionParams;
use crate::backends::camera::{
    CameraController, CameraFrame, CapturedMedia, DeviceRegistry, DeviceSnapshot,
};
use crate::config::Config;
use crate::errors::CaptureError;
use crate::flash::FlashDevice;
use crate::permissions::PermissionState;
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use std::time::Instant;

/// Top-level screen the app is showing.
///
/// Acts as a tiny navigation stack: the permission gate precedes the
/// capture screen, and review temporarily replaces it until the user
/// saves or discards.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    /// Permission gate, shown until the required grants exist
    #[default]
    Permissions,
    /// Live preview with capture controls
    Capture,
    /// Reviewing a fresh capture before saving or discarding
    Review(CapturedMedia),
}

/// Which control overlay is expanded over the preview.
///
/// A single value rather than independent flags: opening one dial
/// structurally closes the other, so both can never show at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayMode {
    /// No dial expanded
    #[default]
    Normal,
    /// Zoom dial expanded
    ZoomDial,
    /// Exposure dial expanded
    ExposureDial,
}

impl OverlayMode {
    /// Toggle the zoom dial: opens from `Normal`, closes when already
    /// open. Inert while the exposure dial is up; a dial swap always
    /// passes through `Normal` first.
    pub fn toggle_zoom_dial(self) -> Self {
        match self {
            OverlayMode::Normal => OverlayMode::ZoomDial,
            OverlayMode::ZoomDial => OverlayMode::Normal,
            OverlayMode::ExposureDial => OverlayMode::ExposureDial,
        }
    }

    /// Toggle the exposure dial, inert while the zoom dial is up
    pub fn toggle_exposure_dial(self) -> Self {
        match self {
            OverlayMode::Normal => OverlayMode::ExposureDial,
            OverlayMode::ExposureDial => OverlayMode::Normal,
            OverlayMode::ZoomDial => OverlayMode::ZoomDial,
        }
    }

    /// Collapse any open dial
    pub fn close(self) -> Self {
        OverlayMode::Normal
    }

    pub fn is_normal(self) -> bool {
        self == OverlayMode::Normal
    }
}

/// Photo capture state machine.
///
/// A capture in flight blocks further shutter presses until it
/// resolves, so rapid presses cannot queue overlapping encodes.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum CaptureState {
    /// No capture running
    #[default]
    Idle,
    /// Encode task running since the given instant
    InFlight { started: Instant },
}

impl CaptureState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, CaptureState::InFlight { .. })
    }

    /// Mark a capture as started
    pub fn begin(&mut self) {
        *self = CaptureState::InFlight {
            started: Instant::now(),
        };
    }

    /// Resolve the in-flight capture (returns to Idle)
    pub fn finish(&mut self) {
        *self = CaptureState::Idle;
    }
}

/// Decide whether a shutter press may proceed.
///
/// A press is refused while a capture is already in flight, and fails
/// with [`CaptureError::NotInitialized`] before the preview has
/// delivered a frame.
pub fn plan_capture(has_frame: bool, state: &CaptureState) -> Result<(), CaptureError> {
    if state.is_in_flight() {
        return Err(CaptureError::Busy);
    }
    if !has_frame {
        return Err(CaptureError::NotInitialized);
    }
    Ok(())
}

/// How an accepted shutter press proceeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSequence {
    /// Encode the current frame right away
    Immediate,
    /// Fire the flash, then encode once the lead time elapsed
    FlashLead,
}

/// Validate a shutter press and arm the capture guard.
///
/// On acceptance the state moves to in-flight before the sequence is
/// returned, so a second press during the flash lead window is already
/// refused as busy. A refusal leaves the guard unarmed.
pub fn begin_capture(
    state: &mut CaptureState,
    has_frame: bool,
    flash_wanted: bool,
) -> Result<CaptureSequence, CaptureError> {
    plan_capture(has_frame, state)?;
    state.begin();
    Ok(if flash_wanted {
        CaptureSequence::FlashLead
    } else {
        CaptureSequence::Immediate
    })
}

/// Apply a finished library write to the navigation state.
///
/// Success returns to the capture screen with every dial closed;
/// failure stays on the review screen so the capture is not lost.
pub fn apply_save_outcome(screen: &mut Screen, overlay: &mut OverlayMode, saved: bool) {
    if saved {
        *screen = Screen::Capture;
        *overlay = overlay.close();
    }
}

/// The application model stores app-specific state used to describe its
/// interface and drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,
    /// Current screen
    pub screen: Screen,
    /// Capability grants, re-probed on entry to the permission gate
    pub permissions: PermissionState,
    /// Known capture devices
    pub registry: DeviceRegistry,
    /// Parameters for the active device, when one is open
    pub session: Option<SessionParams>,
    /// Control handle for the active device
    pub controller: Option<CameraController>,
    /// Latest preview frame
    pub current_frame: Option<CameraFrame>,
    /// Which dial overlay is expanded
    pub overlay: OverlayMode,
    /// Photo capture state machine
    pub capture: CaptureState,
    /// Transient confirmation notice shown on the capture screen
    pub notice: Option<String>,
    /// Discovered LED flash devices
    pub flash_devices: Vec<FlashDevice>,
    /// Frames received in the current FPS window
    pub frames_this_window: u32,
    /// Start of the current FPS window
    pub fps_window_start: Option<Instant>,
    /// Last completed FPS measurement
    pub measured_fps: u32,
}

impl AppModel {
    /// Record a preview frame arrival for the FPS readout
    pub fn record_frame_for_fps(&mut self) {
        let now = Instant::now();
        match self.fps_window_start {
            Some(start) if now.duration_since(start).as_secs() >= 1 => {
                self.measured_fps = self.frames_this_window;
                self.frames_this_window = 1;
                self.fps_window_start = Some(now);
            }
            Some(_) => self.frames_this_window += 1,
            None => {
                self.frames_this_window = 1;
                self.fps_window_start = Some(now);
            }
        }
    }

    /// Zoom dial options for the active device, clamped to its envelope
    pub fn zoom_options(&self) -> Vec<f32> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        zoom_options_for(session.device())
    }
}

/// Preset zoom factors offered by the dial, limited to the device
/// envelope. The neutral factor is always a member.
pub fn zoom_options_for(device: &DeviceSnapshot) -> Vec<f32> {
    const CANDIDATES: [f32; 6] = [1.0, 1.5, 2.0, 3.0, 5.0, 8.0];

    let mut options: Vec<f32> = CANDIDATES
        .iter()
        .copied()
        .filter(|z| *z >= device.min_zoom && *z <= device.max_zoom)
        .collect();

    if !options
        .iter()
        .any(|z| (*z - device.neutral_zoom).abs() < f32::EPSILON)
    {
        options.push(device.neutral_zoom);
    }
    options.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    options
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Messages emitted by the application and its widgets.
///
/// Messages are organized into logical groups:
/// - **UI Navigation**: Context pages, dial overlays, notices
/// - **Permissions**: Capability probes and the gate
/// - **Camera Control**: Device enumeration, frames, parameters
/// - **Capture Operations**: Shutter, review, save/discard
/// - **Settings**: Configuration updates
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page (About, Settings)
    ToggleContextPage(ContextPage),
    /// Toggle the zoom dial overlay
    ToggleZoomDial,
    /// Toggle the exposure dial overlay
    ToggleExposureDial,
    /// Collapse any open dial overlay
    CloseDial,
    /// Transient notice timed out
    NoticeExpired,

    // ===== Permissions =====
    /// Probe all capabilities and refresh the gate
    RefreshPermissions,
    /// Capability probes finished
    PermissionsProbed(PermissionState),
    /// Leave the gate for the capture screen (requires readiness)
    ContinueToCapture,

    // ===== Camera Control =====
    /// Device enumeration finished during startup
    DevicesEnumerated(Vec<DeviceSnapshot>),
    /// New preview frame received
    PreviewFrame(CameraFrame),
    /// Select a zoom factor from the dial
    SetZoom(f32),
    /// Reset zoom to the device's neutral factor
    ResetZoom,
    /// Select an exposure step from the dial
    SetExposure(i32),
    /// Reset exposure to the neutral step
    ResetExposure,
    /// Toggle flash for the next capture
    ToggleFlash,
    /// Toggle continuous torch illumination
    ToggleTorch,
    /// Switch between front and back cameras
    ToggleFacing,

    // ===== Capture Operations =====
    /// Shutter pressed
    Capture,
    /// Flash lead time elapsed, take the photo now
    FlashComplete,
    /// Photo encode finished
    CaptureFinished(Result<CapturedMedia, CaptureError>),
    /// Save the reviewed capture to the library
    SaveCapture,
    /// Library write finished
    SaveFinished(Result<String, crate::errors::StorageError>),
    /// Discard the reviewed capture
    DiscardCapture,
    /// Open the photo library in the file manager
    OpenGallery,

    // ===== Settings =====
    /// Configuration updated
    UpdateConfig(Config),
    /// Select the app theme
    SetTheme(crate::config::AppTheme),
    /// Flip the selfie mirror setting
    ToggleMirrorPreview,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::MediaKind;

    #[test]
    fn test_dial_swap_passes_through_normal() {
        let overlay = OverlayMode::Normal.toggle_zoom_dial();
        assert_eq!(overlay, OverlayMode::ZoomDial);
        // The other toggle is inert while a dial is up
        assert_eq!(overlay.toggle_exposure_dial(), OverlayMode::ZoomDial);
        assert_eq!(
            OverlayMode::ExposureDial.toggle_zoom_dial(),
            OverlayMode::ExposureDial
        );
        // Swapping dials means closing the open one first
        let overlay = overlay.toggle_zoom_dial().toggle_exposure_dial();
        assert_eq!(overlay, OverlayMode::ExposureDial);
    }

    #[test]
    fn test_toggling_open_dial_closes_it() {
        assert_eq!(
            OverlayMode::ZoomDial.toggle_zoom_dial(),
            OverlayMode::Normal
        );
        assert_eq!(
            OverlayMode::ExposureDial.toggle_exposure_dial(),
            OverlayMode::Normal
        );
    }

    #[test]
    fn test_close_collapses_any_dial() {
        assert_eq!(OverlayMode::ZoomDial.close(), OverlayMode::Normal);
        assert_eq!(OverlayMode::ExposureDial.close(), OverlayMode::Normal);
        assert_eq!(OverlayMode::Normal.close(), OverlayMode::Normal);
    }

    #[test]
    fn test_capture_refused_without_frame() {
        let state = CaptureState::default();
        assert_eq!(
            plan_capture(false, &state),
            Err(CaptureError::NotInitialized)
        );
    }

    #[test]
    fn test_capture_refused_while_in_flight() {
        let mut state = CaptureState::default();
        state.begin();
        assert_eq!(plan_capture(true, &state), Err(CaptureError::Busy));
        state.finish();
        assert_eq!(plan_capture(true, &state), Ok(()));
    }

    #[test]
    fn test_flash_lead_holds_the_capture_guard() {
        let mut state = CaptureState::default();
        assert_eq!(
            begin_capture(&mut state, true, true),
            Ok(CaptureSequence::FlashLead)
        );
        // A second press inside the lead window is refused
        assert_eq!(
            begin_capture(&mut state, true, true),
            Err(CaptureError::Busy)
        );
        assert_eq!(
            begin_capture(&mut state, true, false),
            Err(CaptureError::Busy)
        );

        state.finish();
        assert_eq!(
            begin_capture(&mut state, true, false),
            Ok(CaptureSequence::Immediate)
        );
    }

    #[test]
    fn test_refused_capture_leaves_guard_unarmed() {
        let mut state = CaptureState::default();
        assert_eq!(
            begin_capture(&mut state, false, false),
            Err(CaptureError::NotInitialized)
        );
        assert!(!state.is_in_flight());
    }

    #[test]
    fn test_save_success_returns_to_capture() {
        let media = CapturedMedia {
            path: "/tmp/capture.jpg".into(),
            kind: MediaKind::Photo,
        };
        let mut screen = Screen::Review(media);
        let mut overlay = OverlayMode::ZoomDial;
        apply_save_outcome(&mut screen, &mut overlay, true);
        assert_eq!(screen, Screen::Capture);
        assert_eq!(overlay, OverlayMode::Normal);
    }

    #[test]
    fn test_save_failure_keeps_review() {
        let media = CapturedMedia {
            path: "/tmp/capture.jpg".into(),
            kind: MediaKind::Photo,
        };
        let mut screen = Screen::Review(media.clone());
        let mut overlay = OverlayMode::Normal;
        apply_save_outcome(&mut screen, &mut overlay, false);
        assert_eq!(screen, Screen::Review(media));
    }

    #[test]
    fn test_zoom_options_respect_envelope() {
        let device = DeviceSnapshot {
            min_zoom: 1.0,
            neutral_zoom: 1.0,
            max_zoom: 3.0,
            ..DeviceSnapshot::default()
        };
        let options = zoom_options_for(&device);
        assert_eq!(options, vec![1.0, 1.5, 2.0, 3.0]);
    }

    #[test]
    fn test_zoom_options_include_neutral() {
        let device = DeviceSnapshot {
            min_zoom: 1.0,
            neutral_zoom: 2.5,
            max_zoom: 10.0,
            ..DeviceSnapshot::default()
        };
        let options = zoom_options_for(&device);
        assert!(options.contains(&2.5));
        assert!(options.windows(2).all(|w| w[0] < w[1]));
    }
}
