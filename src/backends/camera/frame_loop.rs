// SPDX-License-Identifier: GPL-3.0-only

//! Blocking preview capture loop
//!
//! Runs on a dedicated thread: pulls frames from the device, decodes
//! them to RGBA, and hands them to the UI over an async channel. The
//! loop reopens the device after transient failures and exits when the
//! receiving side is dropped.

use crate::backends::camera::types::CameraFrame;
use crate::backends::camera::v4l2;
use crate::constants::preview;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;

/// Spawn the preview loop for a device path.
///
/// Frames arrive on the returned receiver; dropping it stops the loop.
/// The channel is shallow so a slow UI drops frames rather than
/// building latency.
pub fn spawn(device_path: String) -> mpsc::Receiver<CameraFrame> {
    let (sender, receiver) = mpsc::channel(2);

    std::thread::Builder::new()
        .name("camera-preview".into())
        .spawn(move || run_loop(&device_path, sender))
        .ok();

    receiver
}

fn run_loop(device_path: &str, sender: mpsc::Sender<CameraFrame>) {
    info!(path = %device_path, "Preview loop starting");

    while !sender.is_closed() {
        match stream_until_error(device_path, &sender) {
            Ok(()) => break,
            Err(e) => {
                warn!(path = %device_path, error = %e, "Preview stream lost, retrying");
                std::thread::sleep(Duration::from_millis(preview::RETRY_DELAY_MS));
            }
        }
    }

    info!(path = %device_path, "Preview loop stopped");
}

/// Stream frames until the receiver goes away or the device fails.
///
/// `Ok(())` means the receiver was dropped; any device failure is an
/// `Err` and the caller decides whether to retry.
fn stream_until_error(device_path: &str, sender: &mpsc::Sender<CameraFrame>) -> Result<(), String> {
    let dev =
        Device::with_path(device_path).map_err(|e| format!("Cannot open {}: {}", device_path, e))?;
    let format = v4l2::configure_stream_format(&dev)?;

    let mut stream = Stream::with_buffers(&dev, Type::VideoCapture, preview::BUFFER_COUNT)
        .map_err(|e| format!("Failed to create stream: {}", e))?;

    let mut warmup = preview::WARMUP_FRAMES;

    loop {
        if sender.is_closed() {
            return Ok(());
        }

        let (buf, meta) = stream
            .next()
            .map_err(|e| format!("Failed to capture frame: {}", e))?;

        if warmup > 0 {
            warmup -= 1;
            continue;
        }

        let used = (meta.bytesused as usize).min(buf.len());
        let data = if used > 0 { &buf[..used] } else { buf };

        let Some(frame) = v4l2::decode_frame(data, &format) else {
            debug!("Undecodable frame dropped");
            continue;
        };

        // The UI holds only the latest frame; if the channel is full
        // the frame is simply dropped.
        match sender.try_send(frame) {
            Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => {}
            Err(mpsc::error::TrySendError::Closed(_)) => return Ok(()),
        }
    }
}
