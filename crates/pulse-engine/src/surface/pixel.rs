use bytemuck::{Pod, Zeroable};

use crate::coords::SurfaceSize;

use super::RenderSurface;

/// One RGBA8 pixel, sRGB encoded, non-premultiplied.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// CPU pixel buffer used as the native render surface.
///
/// Rows are tightly packed, top row first. A resize reallocates the buffer as
/// fully transparent.
#[derive(Debug, Clone, Default)]
pub struct PixelSurface {
    size: SurfaceSize,
    pixels: Vec<Rgba8>,
}

impl PixelSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            pixels: vec![Rgba8::TRANSPARENT; size.pixel_count()],
        }
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, suitable for a texture upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Writes one pixel. Out-of-bounds coordinates are ignored.
    pub fn put(&mut self, x: u32, y: u32, color: Rgba8) {
        if x >= self.size.width || y >= self.size.height {
            return;
        }
        let idx = y as usize * self.size.width as usize + x as usize;
        self.pixels[idx] = color;
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.size.width as usize + x as usize)
            .copied()
    }

    pub fn fill(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    /// Mutable rows, top first.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Rgba8]> {
        // chunks_exact_mut panics on 0; an empty surface has no rows anyway.
        let width = (self.size.width as usize).max(1);
        self.pixels.chunks_exact_mut(width)
    }
}

impl RenderSurface for PixelSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.pixel_count(), Rgba8::TRANSPARENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_discards_content() {
        let mut s = PixelSurface::new(SurfaceSize::new(2, 2));
        s.fill(Rgba8::opaque(255, 0, 0));
        s.resize(SurfaceSize::new(2, 2));
        assert!(s.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn resize_changes_buffer_length() {
        let mut s = PixelSurface::default();
        assert!(s.size().is_empty());
        s.resize(SurfaceSize::new(3, 2));
        assert_eq!(s.pixels().len(), 6);
        assert_eq!(s.as_bytes().len(), 24);
    }

    #[test]
    fn put_ignores_out_of_bounds() {
        let mut s = PixelSurface::new(SurfaceSize::new(2, 1));
        s.put(1, 0, Rgba8::opaque(1, 2, 3));
        s.put(2, 0, Rgba8::opaque(9, 9, 9));
        s.put(0, 1, Rgba8::opaque(9, 9, 9));
        assert_eq!(s.get(1, 0), Some(Rgba8::opaque(1, 2, 3)));
        assert_eq!(s.get(0, 0), Some(Rgba8::TRANSPARENT));
        assert_eq!(s.get(2, 0), None);
    }

    #[test]
    fn bytes_are_rgba_order() {
        let mut s = PixelSurface::new(SurfaceSize::new(1, 1));
        s.put(0, 0, Rgba8::new(10, 20, 30, 40));
        assert_eq!(s.as_bytes(), &[10, 20, 30, 40]);
    }

    #[test]
    fn rows_follow_width() {
        let mut s = PixelSurface::new(SurfaceSize::new(3, 2));
        assert_eq!(s.rows_mut().count(), 2);
        assert!(s.rows_mut().all(|row| row.len() == 3));
    }
}
