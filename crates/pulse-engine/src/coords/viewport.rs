use super::LayoutSize;

/// Target render resolution, in device pixels of the drawing surface.
///
/// `(0, 0)` is the sentinel meaning "not yet measured". The frame loop refuses
/// to render while the state is not valid.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ViewportState {
    pub width: f64,
    pub height: f64,
}

impl ViewportState {
    /// Sentinel held until the first layout measurement is applied.
    pub const UNMEASURED: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Divides an observed layout size by `factor`. No rounding is applied.
    #[inline]
    pub fn downscaled(observed: LayoutSize, factor: f64) -> Self {
        Self::new(observed.width / factor, observed.height / factor)
    }

    #[inline]
    pub fn is_unmeasured(self) -> bool {
        self == Self::UNMEASURED
    }

    /// Strictly positive and finite in both dimensions.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_sentinel() {
        assert!(ViewportState::default().is_unmeasured());
        assert!(!ViewportState::default().is_valid());
    }

    #[test]
    fn downscaled_keeps_fractions() {
        let v = ViewportState::downscaled(LayoutSize::new(800.0, 601.0), 3.0);
        assert_eq!(v.width, 800.0 / 3.0);
        assert_eq!(v.height, 601.0 / 3.0);
    }

    #[test]
    fn validity_rejects_degenerate_values() {
        assert!(!ViewportState::new(0.0, 10.0).is_valid());
        assert!(!ViewportState::new(10.0, -1.0).is_valid());
        assert!(!ViewportState::new(f64::NAN, 10.0).is_valid());
        assert!(!ViewportState::new(10.0, f64::INFINITY).is_valid());
        assert!(ViewportState::new(0.5, 0.5).is_valid());
    }
}
