//! PNG screenshots of the rendered frame

use chrono::{Local, NaiveDateTime};
use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};
use twobe_core::{Error, Result};
use twobe_gpu::CapturedFrame;

/// Screenshots go to `~/Documents/TwoBe` unless configured otherwise
pub fn default_screenshot_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Documents").join("TwoBe"))
}

/// `twobe_screenshot_YYYYMMDD_HHMMSS.png`
pub fn screenshot_file_name(at: &NaiveDateTime) -> String {
    format!("twobe_screenshot_{}.png", at.format("%Y%m%d_%H%M%S"))
}

/// Write `frame` as an RGB PNG into `dir`, creating it if needed
pub fn save_screenshot(frame: &CapturedFrame, dir: &Path, at: &NaiveDateTime) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone()).ok_or_else(|| {
        Error::InvalidData(format!(
            "Frame of {}x{} holds {} bytes",
            frame.width,
            frame.height,
            frame.rgba.len()
        ))
    })?;
    let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();

    let path = dir.join(screenshot_file_name(at));
    rgb.save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| Error::Visualization(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(path)
}

/// Save with the current local time as the file stamp
pub fn save_screenshot_now(frame: &CapturedFrame, dir: &Path) -> Result<PathBuf> {
    save_screenshot(frame, dir, &Local::now().naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 42)
            .unwrap()
    }

    #[test]
    fn test_file_name_format() {
        assert_eq!(screenshot_file_name(&stamp()), "twobe_screenshot_20240307_090542.png");
    }

    #[test]
    fn test_default_dir_under_documents() {
        if let Some(dir) = default_screenshot_dir() {
            assert!(dir.ends_with("Documents/TwoBe"));
        }
    }

    #[test]
    fn test_save_writes_rgb_png() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("shots");
        let frame = CapturedFrame {
            width: 2,
            height: 1,
            rgba: vec![255, 0, 0, 255, 0, 0, 255, 128],
        };

        let path = save_screenshot(&frame, &target, &stamp()).unwrap();
        assert_eq!(path, target.join("twobe_screenshot_20240307_090542.png"));

        let image = image::open(&path).unwrap();
        assert_eq!(image.color(), image::ColorType::Rgb8);
        let rgb = image.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [0, 0, 255]);
    }

    #[test]
    fn test_save_rejects_short_frame() {
        let dir = tempdir().unwrap();
        let frame = CapturedFrame {
            width: 4,
            height: 4,
            rgba: vec![0; 10],
        };
        assert!(save_screenshot(&frame, dir.path(), &stamp()).is_err());
    }
}
