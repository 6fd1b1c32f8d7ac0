//! I/O helpers around the analysis core.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/etc. into an owned 8-bit gray buffer.
//! - `load_normalized_image`: decode, reduce to one channel and normalize to `[0, 1]`.
//! - `save_grayscale_f32`: write an `ImageF32` to a grayscale PNG.
//! - `save_accumulator` / `load_accumulator`: persist a Hough accumulator so
//!   later runs can skip the transform.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageU8, ImageView};
use crate::raster;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(GrayImageU8::new(width, height, img.into_raw()))
}

/// Load an image as the single-channel `[0, 1]` raster the analyser expects.
pub fn load_normalized_image(path: &Path) -> Result<ImageF32, String> {
    let gray = load_grayscale_image(path)?;
    let mut img = ImageF32::from_u8(&gray.as_view());
    raster::normalize(&mut img, 0.0, 1.0);
    Ok(img)
}

/// Save a float image to a grayscale PNG, clamping values in [0, 255].
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        for (x, &px) in image.row(y).iter().enumerate() {
            let v = (px * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Write an accumulator as `width: u32`, `height: u32`, then row-major `f32`
/// values, all little-endian.
pub fn save_accumulator(acc: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    fs::write(path, encode_accumulator(acc))
        .map_err(|e| format!("Failed to write accumulator {}: {e}", path.display()))
}

pub fn load_accumulator(path: &Path) -> Result<ImageF32, String> {
    let bytes = fs::read(path)
        .map_err(|e| format!("Failed to read accumulator {}: {e}", path.display()))?;
    decode_accumulator(&bytes).map_err(|e| format!("Invalid accumulator {}: {e}", path.display()))
}

fn encode_accumulator(acc: &ImageF32) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + acc.w * acc.h * 4);
    out.extend_from_slice(&(acc.w as u32).to_le_bytes());
    out.extend_from_slice(&(acc.h as u32).to_le_bytes());
    for y in 0..acc.h {
        for v in acc.row(y) {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }
    out
}

fn decode_accumulator(bytes: &[u8]) -> Result<ImageF32, String> {
    let header = |i: usize| -> Result<usize, String> {
        bytes
            .get(i..i + 4)
            .and_then(|b| b.try_into().ok())
            .map(|b: [u8; 4]| u32::from_le_bytes(b) as usize)
            .ok_or_else(|| "truncated header".to_string())
    };
    let (w, h) = (header(0)?, header(4)?);
    let expected = w
        .checked_mul(h)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| format!("{w}x{h} is too large"))?;
    let body = &bytes[8..];
    if body.len() != expected {
        return Err(format!(
            "expected {expected} bytes of data for {w}x{h}, found {}",
            body.len()
        ));
    }
    let data = body
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    ImageF32::from_vec(w, h, data).ok_or_else(|| "size mismatch".to_string())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
