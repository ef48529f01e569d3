//! Demo render routine: an animated plasma field.

use pulse_engine::render::RenderRoutine;
use pulse_engine::surface::{PixelSurface, Rgba8};

/// Every call repaints the whole surface from `(x / width, y / height, t)`;
/// nothing carries over between frames.
pub struct Plasma {
    speed: f64,
}

impl Plasma {
    pub fn new() -> Self {
        Self { speed: 1.0 / 1500.0 }
    }
}

impl Default for Plasma {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderRoutine<PixelSurface> for Plasma {
    fn render(
        &mut self,
        surface: &mut PixelSurface,
        width: f64,
        height: f64,
        timestamp_ms: f64,
    ) -> anyhow::Result<()> {
        let t = timestamp_ms * self.speed;

        for (y, row) in surface.rows_mut().enumerate() {
            let v = y as f64 / height;
            for (x, px) in row.iter_mut().enumerate() {
                let u = x as f64 / width;
                let field = (u * 10.0 + t).sin()
                    + ((v * 10.0 + t) * 0.5).sin()
                    + ((u * 10.0 + v * 10.0 + t) * 0.5).sin()
                    + (((u - 0.5).powi(2) + (v - 0.5).powi(2)).sqrt() * 20.0 - t).sin();
                *px = palette(field * 0.25);
            }
        }

        Ok(())
    }
}

fn palette(s: f64) -> Rgba8 {
    use std::f64::consts::PI;
    let channel = |phase: f64| ((s * PI + phase).sin() * 0.5 + 0.5) * 255.0;
    Rgba8::opaque(
        channel(0.0) as u8,
        channel(2.0 * PI / 3.0) as u8,
        channel(4.0 * PI / 3.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_engine::coords::SurfaceSize;

    #[test]
    fn paints_every_pixel_opaque() {
        let mut surface = PixelSurface::new(SurfaceSize::new(8, 5));
        Plasma::new().render(&mut surface, 8.4, 5.2, 1234.0).unwrap();
        assert!(surface.pixels().iter().all(|p| p.a == 255));
    }

    #[test]
    fn empty_surface_is_a_no_op() {
        let mut surface = PixelSurface::default();
        Plasma::new().render(&mut surface, 0.3, 0.3, 0.0).unwrap();
        assert!(surface.pixels().is_empty());
    }
}
