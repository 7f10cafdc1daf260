//! Pixel and raster types
//!
//! Pixels are plain `#[repr(C)]` byte structs so whole rasters can be viewed
//! as byte slices for the external display surface.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::RasterError;

/// Opaque RGB pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// RGB pixel with straight (non-premultiplied) alpha
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// Row-major 2D pixel grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster<P> {
    width: usize,
    height: usize,
    pixels: Vec<P>,
}

/// Target buffer for a composited frame
pub type FrameBuffer = Raster<Rgb>;

impl<P: Pod> Raster<P> {
    /// A raster filled with one pixel value
    pub fn filled(width: usize, height: usize, pixel: P) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    /// Wrap tightly packed bytes (e.g. a decoded image or a camera frame)
    pub fn from_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, RasterError> {
        let channels = std::mem::size_of::<P>();
        let expected = width * height * channels;
        if bytes.len() != expected {
            return Err(RasterError::SizeMismatch {
                width,
                height,
                channels,
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(channels)
            .map(bytemuck::pod_read_unaligned)
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Overwrite every pixel
    pub fn fill(&mut self, pixel: P) {
        self.pixels.fill(pixel);
    }

    /// Raw bytes, row-major, tightly packed
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    /// Pixel at (x, y), None when outside
    pub fn get(&self, x: usize, y: usize) -> Option<P> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Pixel at signed coordinates, None when outside
    pub fn get_signed(&self, x: i64, y: i64) -> Option<P> {
        if x < 0 || y < 0 {
            return None;
        }
        self.get(x as usize, y as usize)
    }

    /// Overwrite a pixel, ignoring writes outside the raster
    pub fn put(&mut self, x: i64, y: i64, pixel: P) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.pixels[idx] = pixel;
    }

    /// Mutable row slice
    pub fn row_mut(&mut self, y: usize) -> &mut [P] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    pub fn row(&self, y: usize) -> &[P] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Nearest-neighbour resample (used for tutorial icons)
    pub fn resized(&self, width: usize, height: usize) -> Self {
        if self.width == 0 || self.height == 0 {
            return Self {
                width,
                height,
                pixels: vec![P::zeroed(); width * height],
            };
        }
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let sy = y * self.height / height;
            for x in 0..width {
                let sx = x * self.width / width;
                pixels.push(self.pixels[sy * self.width + sx]);
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// A sprite image, either fully opaque or carrying an alpha channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sprite {
    /// 3-channel: overwrites its destination region
    Opaque(Raster<Rgb>),
    /// 4-channel: alpha blended onto the destination
    Transparent(Raster<Rgba>),
}

impl Sprite {
    pub fn width(&self) -> usize {
        match self {
            Sprite::Opaque(r) => r.width(),
            Sprite::Transparent(r) => r.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Sprite::Opaque(r) => r.height(),
            Sprite::Transparent(r) => r.height(),
        }
    }

    pub fn resized(&self, width: usize, height: usize) -> Self {
        match self {
            Sprite::Opaque(r) => Sprite::Opaque(r.resized(width, height)),
            Sprite::Transparent(r) => Sprite::Transparent(r.resized(width, height)),
        }
    }
}
