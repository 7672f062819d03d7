/// Framebuffer for software rendering
/// Stores color and depth information
///
/// Color and depth live in separate Vecs so the presenter can take the color
/// plane as one contiguous slice.
use crate::meshing::Color;
use crate::perf::FUNCTION_COUNTERS;
use crate::count_call;

pub struct Framebuffer {
    // Hot data: used for every bounds check and index calculation
    width: usize,
    height: usize,
    color_buffer: Vec<u32>, // 0xAARRGGBB
    depth_buffer: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_count = width * height;
        Self {
            width,
            height,
            color_buffer: vec![0; pixel_count],
            depth_buffer: vec![f32::INFINITY; pixel_count],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Fill every color cell. Depth is left alone.
    pub fn clear(&mut self, color: Color) {
        count_call!(FUNCTION_COUNTERS.framebuffer_clear_calls);
        self.color_buffer.fill(color.pack());
    }

    /// Fill every depth cell, typically with a large far sentinel once per frame.
    pub fn clear_depth(&mut self, depth: f32) {
        self.depth_buffer.fill(depth);
    }

    /// Depth-tested write. Returns true when the pixel was written.
    ///
    /// Out-of-range coordinates are ignored. The test is strict, so an equal
    /// depth keeps whatever was written first.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, depth: f32, color: Color) -> bool {
        count_call!(FUNCTION_COUNTERS.set_pixel_attempts);
        let Some(index) = self.index_of(x, y) else {
            return false;
        };

        if depth < self.depth_buffer[index] {
            count_call!(FUNCTION_COUNTERS.set_pixel_depth_passed);
            self.depth_buffer[index] = depth;
            self.color_buffer[index] = color.pack();
            true
        } else {
            count_call!(FUNCTION_COUNTERS.set_pixel_depth_failed);
            false
        }
    }

    #[inline]
    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.index_of(x, y).map(|i| Color::unpack(self.color_buffer[i]))
    }

    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index_of(x, y).map(|i| self.depth_buffer[i])
    }

    /// Get color buffer as slice, packed 0xAARRGGBB, row-major from the top-left.
    pub fn color_buffer_slice(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer_slice(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// Number of pixels whose color differs from `background`.
    pub fn count_not(&self, background: Color) -> usize {
        let packed = background.pack();
        self.color_buffer.iter().filter(|&&c| c != packed).count()
    }

    /// Reallocate for new dimensions. Previous contents are discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        log::debug!(
            "framebuffer resize {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        *self = Self::new(width, height);
    }
}
