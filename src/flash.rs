// SPDX-License-Identifier: GPL-3.0-only

//! LED flash and torch control via Linux sysfs
//!
//! Flash LEDs show up under `/sys/class/leds/` with a `:flash` suffix.
//! Writing the `brightness` attribute drives torch mode, which is
//! group-writable on mobile distributions; the strobe interface is
//! root-only and not used here. The same LEDs serve both the torch
//! toggle and the pre-capture flash pulse.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const LEDS_ROOT: &str = "/sys/class/leds";

/// A controllable flash LED
#[derive(Debug, Clone)]
pub struct FlashDevice {
    name: String,
    brightness_path: PathBuf,
    max_brightness: u32,
}

impl FlashDevice {
    /// Find every writable `*:flash` LED on the system
    pub fn discover() -> Vec<FlashDevice> {
        discover_in(Path::new(LEDS_ROOT))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Drive the LED at a fraction of its maximum brightness
    pub fn torch(&self, intensity: f32) -> io::Result<()> {
        let value = (intensity.clamp(0.0, 1.0) * self.max_brightness as f32).round() as u32;
        std::fs::write(&self.brightness_path, value.to_string())
    }

    pub fn off(&self) -> io::Result<()> {
        self.torch(0.0)
    }
}

fn discover_in(root: &Path) -> Vec<FlashDevice> {
    let Ok(entries) = std::fs::read_dir(root) else {
        debug!(root = %root.display(), "No LED class directory, flash unavailable");
        return Vec::new();
    };

    let mut devices: Vec<FlashDevice> = entries
        .flatten()
        .filter_map(|entry| probe_led(&entry.path()))
        .collect();

    // Deterministic ordering, "white:flash" before "yellow:flash"
    devices.sort_by(|a, b| a.name.cmp(&b.name));
    devices
}

/// Check one LED directory and build a device for it if it is a
/// writable flash LED
fn probe_led(led_path: &Path) -> Option<FlashDevice> {
    let name = led_path.file_name()?.to_str()?.to_string();
    if !name.ends_with(":flash") {
        return None;
    }

    let raw = std::fs::read_to_string(led_path.join("max_brightness")).ok()?;
    let max_brightness: u32 = match raw.trim().parse() {
        Ok(v) if v > 0 => v,
        _ => {
            warn!(led = name, "Unusable max_brightness value");
            return None;
        }
    };

    let brightness_path = led_path.join("brightness");
    if let Err(error) = std::fs::OpenOptions::new()
        .write(true)
        .open(&brightness_path)
    {
        warn!(led = name, %error, "Flash LED found but brightness is not writable");
        return None;
    }

    info!(led = name, max_brightness, "Discovered flash LED");
    Some(FlashDevice {
        name,
        brightness_path,
        max_brightness,
    })
}

/// Fire every flash LED at full brightness
pub fn all_on(devices: &[FlashDevice]) {
    for device in devices {
        if let Err(error) = device.torch(1.0) {
            warn!(led = device.name(), %error, "Could not fire flash LED");
        }
    }
}

/// Switch every flash LED off
pub fn all_off(devices: &[FlashDevice]) {
    for device in devices {
        if let Err(error) = device.off() {
            warn!(led = device.name(), %error, "Could not switch off flash LED");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_led(root: &Path, name: &str, max: &str) -> PathBuf {
        let led = root.join(name);
        std::fs::create_dir_all(&led).expect("led dir");
        std::fs::write(led.join("max_brightness"), max).expect("max_brightness");
        std::fs::write(led.join("brightness"), "0").expect("brightness");
        led
    }

    #[test]
    fn test_discover_picks_only_flash_leds() {
        let root = tempfile::tempdir().expect("tempdir");
        fake_led(root.path(), "white:flash", "255");
        fake_led(root.path(), "yellow:flash", "255");
        fake_led(root.path(), "input0::capslock", "1");

        let devices = discover_in(root.path());
        let names: Vec<&str> = devices.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["white:flash", "yellow:flash"]);
    }

    #[test]
    fn test_discover_skips_zero_max_brightness() {
        let root = tempfile::tempdir().expect("tempdir");
        fake_led(root.path(), "broken:flash", "0");
        assert!(discover_in(root.path()).is_empty());
    }

    #[test]
    fn test_torch_scales_and_clamps() {
        let root = tempfile::tempdir().expect("tempdir");
        let led = fake_led(root.path(), "white:flash", "200");
        let device = discover_in(root.path()).remove(0);

        device.torch(0.5).expect("half");
        assert_eq!(std::fs::read_to_string(led.join("brightness")).unwrap(), "100");

        device.torch(2.0).expect("over");
        assert_eq!(std::fs::read_to_string(led.join("brightness")).unwrap(), "200");

        device.off().expect("off");
        assert_eq!(std::fs::read_to_string(led.join("brightness")).unwrap(), "0");
    }

    #[test]
    fn test_missing_root_is_empty() {
        assert!(discover_in(Path::new("/nonexistent/leds")).is_empty());
    }
}
