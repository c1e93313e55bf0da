//! Linear RGB output buffer and PNG export.

use std::io::Write;
use std::path::Path;

use glam::Vec3;

use crate::error::RenderError;

/// Row-major linear RGB pixels, row 0 at the bottom of the image.
#[derive(Clone, Debug)]
pub struct ColorBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl ColorBuffer {
    /// A black buffer. Zero dimensions are rejected.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Vec3] {
        &mut self.pixels
    }

    /// 8-bit RGBA, top row first, each channel clamped to `[0, 1]`.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() * 4);
        for row in self.pixels.chunks_exact(self.width as usize).rev() {
            for pixel in row {
                let [r, g, b] = pixel.to_array().map(to_unorm8);
                rgba.extend_from_slice(&[r, g, b, u8::MAX]);
            }
        }
        rgba
    }

    /// Encode as an 8-bit RGBA PNG into `out`.
    pub fn encode_png<W: Write>(&self, out: W) -> Result<(), RenderError> {
        let mut encoder = png::Encoder::new(out, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.to_rgba8())?;
        writer.finish()?;
        Ok(())
    }

    /// Write the buffer as a PNG file at `path`.
    pub fn write_png(&self, path: &Path) -> Result<(), RenderError> {
        let file = std::fs::File::create(path)?;
        self.encode_png(std::io::BufWriter::new(file))
    }
}

fn to_unorm8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            ColorBuffer::new(4, 0),
            Err(RenderError::InvalidViewport { width: 4, height: 0 })
        ));
    }

    #[test]
    fn test_rgba8_flips_rows_and_clamps() {
        let mut buffer = ColorBuffer::new(2, 2).unwrap();
        // Bottom-left red (overbright), top-right half grey.
        buffer.pixels_mut()[0] = Vec3::new(4.0, -1.0, f32::NAN);
        buffer.pixels_mut()[3] = Vec3::splat(0.5);
        let rgba = buffer.to_rgba8();
        assert_eq!(rgba.len(), 16);
        // Top row comes first: (0,1) black, (1,1) grey.
        assert_eq!(&rgba[0..4], &[0, 0, 0, 255]);
        assert_eq!(&rgba[4..8], &[128, 128, 128, 255]);
        // Bottom row: (0,0) red.
        assert_eq!(&rgba[8..12], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_encode_png_has_signature() {
        let buffer = ColorBuffer::new(3, 2).unwrap();
        let mut bytes = Vec::new();
        buffer.encode_png(&mut bytes).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_write_png_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut buffer = ColorBuffer::new(4, 4).unwrap();
        buffer.pixels_mut().fill(Vec3::new(0.2, 0.4, 0.6));
        buffer.write_png(&path).unwrap();

        let decoder = png::Decoder::new(std::fs::File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 4);
        assert_eq!(reader.info().height, 4);
    }

    #[test]
    fn test_write_png_to_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = ColorBuffer::new(1, 1).unwrap();
        let err = buffer.write_png(&dir.path().join("missing").join("f.png")).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
