//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket writes a disjoint region of the
//! output, and every pixel seeds its own generator, so the result matches
//! the sequential renderer exactly.

use std::time::Instant;

use rayon::prelude::*;
use umbra_core::{Color, Scene};

use crate::camera::Camera;
use crate::renderer::{ImageBuffer, RenderConfig, RenderContext, RenderError};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets near the centre of the frame come first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    if bucket_size == 0 {
        return buckets;
    }
    let mut index = 0;

    // Generate grid of buckets
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the bucket's pixels into their region of `image`.
    pub fn write_into(&self, image: &mut ImageBuffer) {
        let b = &self.bucket;
        for local_y in 0..b.height {
            for local_x in 0..b.width {
                let color = self.pixels[(local_y * b.width + local_x) as usize];
                image.set(b.x + local_x, b.y + local_y, color);
            }
        }
    }
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, context: &RenderContext) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            pixels.push(context.render_pixel(bucket.x + local_x, bucket.y + local_y));
        }
    }

    log::debug!(
        "Bucket {} done ({}x{} at {},{})",
        bucket.index,
        bucket.width,
        bucket.height,
        bucket.x,
        bucket.y
    );
    BucketResult::new(*bucket, pixels)
}

/// Render the scene across the rayon thread pool, one bucket per task.
pub fn render_parallel(
    scene: &Scene,
    camera: &dyn Camera,
    config: &RenderConfig,
) -> Result<ImageBuffer, RenderError> {
    let context = RenderContext::new(scene, camera, config)?;
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    log::info!(
        "Rendering {}x{} ({}) in {} buckets on {} threads",
        config.width,
        config.height,
        config.algorithm,
        buckets.len(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, &context))
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        result.write_into(&mut image);
    }

    log::info!("Render time: {:.2?}", start.elapsed());
    Ok(image)
}
