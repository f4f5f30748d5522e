//! Frame readback

use twobe_core::{Error, Result};

/// A rendered frame read back from the GPU
///
/// Pixels are tightly packed RGBA8, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Row pitch of a texture-to-buffer copy for `width` pixels of 4 bytes
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Strip row padding and convert to RGBA for the given texture format
pub fn unpack_rows(
    data: &[u8],
    width: u32,
    height: u32,
    padded_row: u32,
    format: wgpu::TextureFormat,
) -> Result<Vec<u8>> {
    let swap_red_blue = match format {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => false,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => true,
        other => {
            return Err(Error::Gpu(format!("Cannot capture frames in format {:?}", other)));
        }
    };

    let row_len = (width * 4) as usize;
    let padded_row = padded_row as usize;
    if data.len() < padded_row * height as usize {
        return Err(Error::Gpu(format!(
            "Readback buffer holds {} bytes, expected {}",
            data.len(),
            padded_row * height as usize
        )));
    }

    let mut rgba = Vec::with_capacity(row_len * height as usize);
    for row in data.chunks(padded_row).take(height as usize) {
        rgba.extend_from_slice(&row[..row_len]);
    }

    if swap_red_blue {
        for pixel in rgba.chunks_exact_mut(4) {
            pixel.swap(0, 2);
        }
    }

    Ok(rgba)
}
