use super::ViewportState;

/// Content-box size of an observed layout region.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LayoutSize {
    pub width: f64,
    pub height: f64,
}

impl LayoutSize {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Backing pixel dimensions of a render surface.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Backing size for a render resolution.
    ///
    /// Fractional dimensions are truncated toward zero, the same conversion a
    /// canvas applies to its `width`/`height` attributes. Values below zero or
    /// NaN map to 0; values beyond `u32::MAX` saturate.
    #[inline]
    pub fn from_viewport(viewport: ViewportState) -> Self {
        Self::new(viewport.width as u32, viewport.height as u32)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_viewport_truncates() {
        let s = SurfaceSize::from_viewport(ViewportState::new(266.67, 199.99));
        assert_eq!(s, SurfaceSize::new(266, 199));
    }

    #[test]
    fn from_viewport_integral_is_exact() {
        let s = SurfaceSize::from_viewport(ViewportState::new(300.0, 200.0));
        assert_eq!(s, SurfaceSize::new(300, 200));
    }

    #[test]
    fn from_viewport_sub_pixel_is_empty() {
        let s = SurfaceSize::from_viewport(ViewportState::new(0.4, 10.0));
        assert!(s.is_empty());
        assert_eq!(s.pixel_count(), 0);
    }
}
