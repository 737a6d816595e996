use std::{fs, path::Path};

use image::{ImageBuffer, Rgb, RgbImage};
use thiserror::Error;

use crate::math::Color;

// PPM readers choke on long lines
const PPM_LINE_LENGTH: usize = 70;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

/// A grid of linear colors indexed from the top left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black `Canvas`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::black(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at (`x`, `y`).
    ///
    /// Panics if the pixel is out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Sets the pixel at (`x`, `y`).
    ///
    /// Panics if the pixel is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "Pixel ({}, {}) is outside the {}x{} canvas",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Returns the pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Serializes this `Canvas` as a plain-text PPM.
    pub fn to_ppm(&self) -> String {
        let mut ret = format!("P3\n{} {}\n255\n", self.width, self.height);
        for row in self.pixels.chunks(self.width.max(1)) {
            let mut line = String::new();
            for value in row.iter().flat_map(|c| c.to_rgb8()) {
                let token = value.to_string();
                if !line.is_empty() && line.len() + 1 + token.len() > PPM_LINE_LENGTH {
                    ret.push_str(&line);
                    ret.push('\n');
                    line.clear();
                }
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&token);
            }
            ret.push_str(&line);
            ret.push('\n');
        }
        ret
    }

    /// Converts this `Canvas` to an 8-bit image.
    pub fn to_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            Rgb(self.get(x as usize, y as usize).to_rgb8())
        })
    }

    /// Writes this `Canvas` to `path`, as PPM if the extension is `ppm` and
    /// in the format the extension implies otherwise.
    pub fn write(&self, path: &Path) -> Result<(), OutputError> {
        let is_ppm = path
            .extension()
            .map_or(false, |e| e.eq_ignore_ascii_case("ppm"));
        if is_ppm {
            fs::write(path, self.to_ppm())?;
        } else {
            self.to_image().save(path)?;
        }
        Ok(())
    }
}
