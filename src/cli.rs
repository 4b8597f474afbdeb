// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for headless camera operations
//!
//! - Listing available cameras, optionally as JSON
//! - Taking a single photo without the UI

use chrono::Local;
use obscura::backends::camera::{DeviceRegistry, DeviceSnapshot, Facing, capture_one_shot, v4l2};
use obscura::config::Config;
use obscura::storage;
use std::path::PathBuf;

/// List all available cameras
pub fn list_cameras(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = DeviceRegistry::new(v4l2::enumerate_devices());

    if json {
        let entries: Vec<serde_json::Value> = registry.devices().iter().map(device_json).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if registry.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for device in registry.devices() {
        println!("  {} ({}, {})", device.path, device.name, device.facing);
        println!(
            "      Zoom: {:.1}x-{:.1}x{}",
            device.min_zoom,
            device.max_zoom,
            if device.zoom_control.is_some() {
                ""
            } else {
                " (digital)"
            }
        );
        println!("      Exposure dial: {:?}", device.exposure_scale.options());

        // Show top 3 resolutions, formats are already sorted largest first
        let res_strs: Vec<String> = device
            .formats
            .iter()
            .take(3)
            .map(|f| {
                format!(
                    "{}x{}@{}fps",
                    f.photo_width, f.photo_height, f.max_fps
                )
            })
            .collect();
        if !res_strs.is_empty() {
            println!("      Formats: {}", res_strs.join(", "));
        }
        println!();
    }

    Ok(())
}

fn device_json(device: &DeviceSnapshot) -> serde_json::Value {
    serde_json::json!({
        "path": device.path,
        "name": device.name,
        "facing": device.facing.to_string(),
        "zoom": {
            "min": device.min_zoom,
            "neutral": device.neutral_zoom,
            "max": device.max_zoom,
            "hardware": device.zoom_control.is_some(),
        },
        "exposure_options": device.exposure_scale.options(),
        "formats": device
            .formats
            .iter()
            .map(|f| {
                serde_json::json!({
                    "width": f.photo_width,
                    "height": f.photo_height,
                    "max_fps": f.max_fps,
                })
            })
            .collect::<Vec<_>>(),
    })
}

/// Take a photo using the specified (or default) camera
pub fn take_photo(
    device: Option<String>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = DeviceRegistry::new(v4l2::enumerate_devices());
    if registry.is_empty() {
        return Err("No cameras found".into());
    }

    let snapshot = match device.as_deref() {
        Some(path) => registry
            .by_path(path)
            .ok_or_else(|| format!("No camera at {path} (see 'obscura list')"))?,
        None => registry
            .device_for(Facing::Back)
            .ok_or("No cameras found")?,
    };
    println!("Using camera: {} ({})", snapshot.name, snapshot.path);

    let output_path = match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            path
        }
        None => {
            let dir = storage::library_dir(&Config::default().save_folder_name);
            std::fs::create_dir_all(&dir)?;
            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            dir.join(format!("IMG_{timestamp}.jpg"))
        }
    };

    println!("Capturing...");
    let saved = capture_one_shot(&snapshot.path, output_path)?;
    println!("Photo saved: {}", saved.display());

    Ok(())
}
