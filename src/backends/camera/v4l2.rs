// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 device access: enumeration, capability snapshots, controls, and
//! single-frame capture
//!
//! The capability envelope the rest of the app consumes (zoom bounds,
//! exposure scale, photo formats) is derived here from what the driver
//! reports, once per device. Zoom factors are expressed on a 1.0..10.0
//! display scale mapped onto the hardware control range.

use crate::backends::camera::types::{
    CameraFormat, CameraFrame, ControlRange, DeviceSnapshot, ExposureScale, Facing,
};
use crate::constants::{exposure, preview, zoom};
use std::sync::Arc;
use tracing::{debug, info, warn};
use v4l::FourCC;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;

// ===== V4L2 control IDs (camera class) =====
const V4L2_CTRL_CLASS_CAMERA: u32 = 0x009a0000;
const V4L2_CID_CAMERA_CLASS_BASE: u32 = V4L2_CTRL_CLASS_CAMERA | 0x900;

/// Exposure compensation (EV bias)
pub const V4L2_CID_AUTO_EXPOSURE_BIAS: u32 = V4L2_CID_CAMERA_CLASS_BASE + 19;
/// Absolute zoom position
pub const V4L2_CID_ZOOM_ABSOLUTE: u32 = V4L2_CID_CAMERA_CLASS_BASE + 13;

/// Display zoom scale the hardware range is mapped onto
const HW_ZOOM_DISPLAY_MAX: f32 = 10.0;

/// Enumerate capture devices under `/dev/video*`, largest formats first
pub fn enumerate_devices() -> Vec<DeviceSnapshot> {
    let Ok(entries) = std::fs::read_dir("/dev") else {
        warn!("Cannot read /dev, no cameras found");
        return Vec::new();
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|n| n.starts_with("video"))
                .unwrap_or(false)
        })
        .map(|e| e.path())
        .collect();
    paths.sort();

    let mut snapshots = Vec::new();
    for path in paths {
        let path_str = path.to_string_lossy().to_string();
        match snapshot_device(&path_str) {
            Some(snapshot) => {
                info!(
                    name = %snapshot.name,
                    path = %snapshot.path,
                    facing = %snapshot.facing,
                    "Found camera"
                );
                snapshots.push(snapshot);
            }
            None => debug!(path = %path_str, "Not a capture device, skipped"),
        }
    }

    snapshots
}

/// Build the immutable capability snapshot for one device node.
///
/// Returns `None` for nodes that are not usable capture devices
/// (metadata nodes, outputs, devices with no frame formats).
pub fn snapshot_device(path: &str) -> Option<DeviceSnapshot> {
    let dev = Device::with_path(path).ok()?;
    let caps = dev.query_caps().ok()?;

    let formats = enumerate_formats(&dev);
    if formats.is_empty() {
        return None;
    }

    let zoom_control = query_control_range(&dev, V4L2_CID_ZOOM_ABSOLUTE);
    let exposure_control = query_control_range(&dev, V4L2_CID_AUTO_EXPOSURE_BIAS);

    // Wide bias ranges get the coarse dial steps
    let exposure_scale = match exposure_control {
        Some(range) if range.span() >= exposure::COARSE_RANGE_SPAN => ExposureScale::Coarse,
        _ => ExposureScale::default(),
    };

    // Map the hardware zoom range onto the 1.0..10.0 display scale;
    // devices without a zoom control get the documented defaults.
    let (min_zoom, neutral_zoom, max_zoom) = match zoom_control {
        Some(range) => {
            let normalized = (range.default - range.min) as f32 / range.span().max(1) as f32;
            (
                1.0,
                1.0 + normalized * (HW_ZOOM_DISPLAY_MAX - 1.0),
                HW_ZOOM_DISPLAY_MAX,
            )
        }
        None => (zoom::DEFAULT_MIN, zoom::DEFAULT_NEUTRAL, zoom::DEFAULT_MAX),
    };

    Some(DeviceSnapshot {
        name: caps.card.clone(),
        facing: classify_facing(&caps.card),
        path: path.to_string(),
        min_zoom,
        neutral_zoom,
        max_zoom,
        zoom_control,
        exposure_control,
        exposure_scale,
        formats,
    })
}

/// Classify a device as front or back facing from its card name.
///
/// Desktop webcams rarely say; integrated "user facing" cameras and
/// anything self-describing as front count as front, the rest as back.
fn classify_facing(card: &str) -> Facing {
    let lower = card.to_lowercase();
    if lower.contains("front") || lower.contains("user") {
        Facing::Front
    } else {
        Facing::Back
    }
}

/// Enumerate discrete photo formats with their frame-rate bounds
fn enumerate_formats(dev: &Device) -> Vec<CameraFormat> {
    let mut formats = Vec::new();

    let Ok(descriptions) = dev.enum_formats() else {
        return formats;
    };

    for desc in descriptions {
        let Ok(sizes) = dev.enum_framesizes(desc.fourcc) else {
            continue;
        };
        for size in sizes {
            let v4l::framesize::FrameSizeEnum::Discrete(discrete) = size.size else {
                continue;
            };

            let (mut min_fps, mut max_fps) = (u32::MAX, 0u32);
            if let Ok(intervals) =
                dev.enum_frameintervals(desc.fourcc, discrete.width, discrete.height)
            {
                for interval in intervals {
                    if let v4l::frameinterval::FrameIntervalEnum::Discrete(frac) =
                        interval.interval
                    {
                        if frac.numerator > 0 {
                            let fps = frac.denominator / frac.numerator;
                            min_fps = min_fps.min(fps);
                            max_fps = max_fps.max(fps);
                        }
                    }
                }
            }
            if max_fps == 0 {
                min_fps = 30;
                max_fps = 30;
            }

            let format = CameraFormat {
                photo_width: discrete.width,
                photo_height: discrete.height,
                min_fps,
                max_fps,
            };
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
    }

    // Largest first so best_format() is the highest resolution
    formats.sort_by_key(|f| std::cmp::Reverse(f.photo_width * f.photo_height));
    formats
}

/// Query the range of a single control, `None` when the device lacks it
pub fn query_control_range(dev: &Device, control_id: u32) -> Option<ControlRange> {
    let controls = dev.query_controls().ok()?;
    controls.into_iter().find(|c| c.id == control_id).map(|c| {
        ControlRange::new(
            c.minimum as i64,
            c.maximum as i64,
            c.step as i64,
            c.default as i64,
        )
    })
}

/// Set an integer control on an open device
pub fn set_control_value(dev: &Device, control_id: u32, value: i64) -> Result<(), String> {
    dev.set_control(v4l::control::Control {
        id: control_id,
        value: v4l::control::Value::Integer(value),
    })
    .map_err(|e| format!("Cannot set control {:#x}: {}", control_id, e))
}

/// Configure the device for streaming, preferring MJPG at the preferred
/// preview resolution. Returns the negotiated format.
pub fn configure_stream_format(dev: &Device) -> Result<v4l::Format, String> {
    let (width, height) = preview::PREFERRED_RESOLUTION;

    for fourcc in [b"MJPG", b"YUYV"] {
        let requested = v4l::Format::new(width, height, FourCC::new(fourcc));
        if let Ok(actual) = dev.set_format(&requested) {
            if actual.fourcc == FourCC::new(fourcc) {
                debug!(
                    width = actual.width,
                    height = actual.height,
                    fourcc = %actual.fourcc,
                    "Stream format negotiated"
                );
                return Ok(actual);
            }
        }
    }

    // Fall back to whatever the driver is currently configured for
    dev.format()
        .map_err(|e| format!("Cannot query device format: {}", e))
}

/// Decode one raw buffer into an RGBA frame.
///
/// MJPG goes through the JPEG decoder; YUYV is converted in place.
/// Unknown layouts return `None` and the frame is dropped.
pub fn decode_frame(data: &[u8], format: &v4l::Format) -> Option<CameraFrame> {
    let fourcc_mjpg = FourCC::new(b"MJPG");
    let fourcc_yuyv = FourCC::new(b"YUYV");

    if format.fourcc == fourcc_mjpg {
        let image = image::load_from_memory(data).ok()?;
        let rgba = image.to_rgba8();
        let (width, height) = (rgba.width(), rgba.height());
        return Some(CameraFrame {
            rgba: Arc::from(rgba.into_raw().into_boxed_slice()),
            width,
            height,
        });
    }

    if format.fourcc == fourcc_yuyv {
        return yuyv_to_rgba(data, format.width, format.height);
    }

    None
}

/// Convert packed YUYV 4:2:2 to RGBA using BT.601 coefficients
fn yuyv_to_rgba(data: &[u8], width: u32, height: u32) -> Option<CameraFrame> {
    let pixel_count = (width * height) as usize;
    if data.len() < pixel_count * 2 {
        return None;
    }

    let mut rgba = vec![0u8; pixel_count * 4];
    for (i, chunk) in data[..pixel_count * 2].chunks_exact(4).enumerate() {
        let [y0, u, y1, v] = [chunk[0], chunk[1], chunk[2], chunk[3]];
        let out = &mut rgba[i * 8..i * 8 + 8];
        out[..4].copy_from_slice(&yuv_to_rgba_pixel(y0, u, v));
        out[4..].copy_from_slice(&yuv_to_rgba_pixel(y1, u, v));
    }

    Some(CameraFrame {
        rgba: Arc::from(rgba.into_boxed_slice()),
        width,
        height,
    })
}

fn yuv_to_rgba_pixel(y: u8, u: u8, v: u8) -> [u8; 4] {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;

    let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
    let g = (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8;
    let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;
    [r, g, b, 255]
}

/// Open a device and grab a single decoded frame.
///
/// Used by the CLI photo command; the GUI captures from the running
/// preview stream instead.
pub fn grab_frame(path: &str) -> Result<CameraFrame, String> {
    let dev = Device::with_path(path).map_err(|e| format!("Cannot open {}: {}", path, e))?;
    let format = configure_stream_format(&dev)?;

    let mut stream = Stream::with_buffers(&dev, Type::VideoCapture, preview::BUFFER_COUNT)
        .map_err(|e| format!("Failed to create stream: {}", e))?;

    // Discard the first frames while auto-exposure settles
    for _ in 0..preview::WARMUP_FRAMES {
        stream
            .next()
            .map_err(|e| format!("Failed to capture frame: {}", e))?;
    }

    let (buf, meta) = stream
        .next()
        .map_err(|e| format!("Failed to capture frame: {}", e))?;
    let used = (meta.bytesused as usize).min(buf.len());
    let data = if used > 0 { &buf[..used] } else { buf };

    decode_frame(data, &format).ok_or_else(|| {
        format!(
            "Cannot decode frame ({} bytes, {})",
            data.len(),
            format.fourcc
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_facing() {
        assert_eq!(classify_facing("Integrated Camera"), Facing::Back);
        assert_eq!(classify_facing("USB2.0 Front Camera"), Facing::Front);
        assert_eq!(classify_facing("User Facing: Integrated"), Facing::Front);
    }

    #[test]
    fn test_yuyv_conversion_dimensions() {
        // 2x2 frame: 4 pixels, 8 bytes YUYV in, 16 bytes RGBA out
        let data = [128u8; 8];
        let frame = yuyv_to_rgba(&data, 2, 2).expect("frame");
        assert_eq!(frame.rgba.len(), 16);
        assert_eq!((frame.width, frame.height), (2, 2));
    }

    #[test]
    fn test_yuyv_rejects_short_buffer() {
        assert!(yuyv_to_rgba(&[0u8; 4], 2, 2).is_none());
    }

    #[test]
    fn test_grey_yuv_pixel_is_grey() {
        // Y=128, U=V=128 is mid grey in BT.601
        let [r, g, b, a] = yuv_to_rgba_pixel(128, 128, 128);
        assert_eq!((r, g, b, a), (128, 128, 128, 255));
    }
}
