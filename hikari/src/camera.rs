use std::time::Instant;

use rand::{distributions::Standard, Rng};
use rand_pcg::Pcg32;
use rayon::prelude::*;

use crate::{
    canvas::Canvas,
    hikari_info, hikari_trace,
    math::{Color, Point3, Ray, Transform},
    world::{World, MAX_DEPTH},
};

// Fixed so that renders are reproducible
const JITTER_SEED: u64 = 0x73B9642E74AC471C;
const ONE_MINUS_EPSILON: f64 = 1.0 - f64::EPSILON;

/// A pinhole camera looking down -z in its own space.
#[derive(Clone, Debug)]
pub struct Camera {
    hsize: usize,
    vsize: usize,
    field_of_view: f64,
    camera_to_world: Transform,
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
    samples_per_pixel: u32,
    depth: u32,
}

impl Camera {
    /// Creates a new `Camera` with a `hsize` by `vsize` pixel image.
    ///
    /// `field_of_view` is in radians and spans the longer image axis. `view`
    /// orients the world relative to the camera, like [view_transform](crate::math::transforms::view_transform) gives.
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64, view: &Transform) -> Self {
        assert!(hsize > 0 && vsize > 0, "Camera resolution has to be non-zero");

        let half_view = (field_of_view / 2.0).tan();
        let aspect = hsize as f64 / vsize as f64;
        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Self {
            hsize,
            vsize,
            field_of_view,
            camera_to_world: view.inverted(),
            half_width,
            half_height,
            pixel_size: half_width * 2.0 / hsize as f64,
            samples_per_pixel: 1,
            depth: MAX_DEPTH,
        }
    }

    /// Returns this `Camera` taking `samples` jittered rays per pixel.
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples_per_pixel = samples.max(1);
        self
    }

    /// Returns this `Camera` following at most `depth` bounces.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn hsize(&self) -> usize {
        self.hsize
    }

    pub fn vsize(&self) -> usize {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Creates a new [Ray] through the center of pixel (`px`, `py`).
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        self.ray_for_sample(px as f64 + 0.5, py as f64 + 0.5)
    }

    /// Creates a new [Ray] through the continuous raster position (`x`, `y`).
    pub fn ray_for_sample(&self, x: f64, y: f64) -> Ray {
        // The canvas is one unit in front of the eye
        let world_x = self.half_width - x * self.pixel_size;
        let world_y = self.half_height - y * self.pixel_size;

        let pixel = &self.camera_to_world * Point3::new(world_x, world_y, -1.0);
        let origin = &self.camera_to_world * Point3::origin();
        Ray::new(origin, (pixel - origin).normalize())
    }

    /// Renders `world` into a new [Canvas] using the current rayon pool.
    pub fn render(&self, world: &World) -> Canvas {
        hikari_info!(
            "Rendering {}x{} with {} sample(s) per pixel",
            self.hsize,
            self.vsize,
            self.samples_per_pixel
        );
        let render_start = Instant::now();

        let mut canvas = Canvas::new(self.hsize, self.vsize);
        canvas
            .pixels_mut()
            .par_chunks_mut(self.hsize)
            .enumerate()
            .for_each(|(y, row)| {
                hikari_trace!("Row {}", y);
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = self.render_pixel(world, x, y);
                }
            });

        hikari_info!(
            "Render took {:.2}s",
            render_start.elapsed().as_secs_f32()
        );
        canvas
    }

    /// Finds the color of pixel (`x`, `y`).
    pub fn render_pixel(&self, world: &World, x: usize, y: usize) -> Color {
        if self.samples_per_pixel == 1 {
            return world.color_at(&self.ray_for_pixel(x, y), self.depth);
        }

        // Stratified on a square grid, one stream per pixel
        let n = self.samples_per_pixel;
        let strata = (n as f64).sqrt().ceil() as u32;
        let mut rng = Pcg32::new(JITTER_SEED, (y * self.hsize + x) as u64);
        let sum: Color = (0..n)
            .map(|i| {
                let jx: f64 = rng.sample(Standard);
                let jy: f64 = rng.sample(Standard);
                let sx = (((i % strata) as f64 + jx) / strata as f64).min(ONE_MINUS_EPSILON);
                let sy = (((i / strata) as f64 + jy) / strata as f64).min(ONE_MINUS_EPSILON);
                let ray = self.ray_for_sample(x as f64 + sx, y as f64 + sy);
                world.color_at(&ray, self.depth)
            })
            .sum();
        sum / n as f64
    }
}
