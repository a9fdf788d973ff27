//! RasterSurface: an in-memory RGB canvas.
//!
//! Pixels are stored row-major in a contiguous `Vec`, `index = y * width + x`.
//! Paint operations behave like a 2D canvas context: anything outside the
//! raster is silently dropped.

use super::traits::{Surface, SurfaceSize};
use crate::error::Result;
use crate::frame::Rgb;
use crate::layout::Rect;

/// An in-memory RGB raster.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterSurface {
    pixels: Vec<Rgb>,
    width: u32,
    height: u32,
    background: Rgb,
}

impl RasterSurface {
    /// Create a black raster of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Rgb::BLACK)
    }

    /// Create a raster filled with `background`.
    pub fn with_background(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            pixels: vec![background; (width as usize) * (height as usize)],
            width,
            height,
            background,
        }
    }

    /// Get the raster width.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the raster height.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The whole raster as a rectangle.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Get the underlying pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get the color at (x, y), or `None` out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Set the color at (x, y). Returns `false` out of bounds.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) -> bool {
        if let Some(i) = self.index_of(x, y) {
            self.pixels[i] = color;
            true
        } else {
            false
        }
    }

    /// Resize, preserving content where possible.
    ///
    /// New pixels take the background color.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut pixels = vec![self.background; (new_width as usize) * (new_height as usize)];
        let copy_width = self.width.min(new_width) as usize;
        let copy_height = self.height.min(new_height) as usize;

        for y in 0..copy_height {
            let old_start = y * (self.width as usize);
            let new_start = y * (new_width as usize);
            pixels[new_start..new_start + copy_width]
                .copy_from_slice(&self.pixels[old_start..old_start + copy_width]);
        }

        self.pixels = pixels;
        self.width = new_width;
        self.height = new_height;
    }

    /// Average color of the pixels inside `rect` (clipped), if any.
    pub fn average(&self, rect: Rect) -> Option<Rgb> {
        let area = rect.intersection(&self.bounds());
        Rgb::average(
            (area.y..area.bottom())
                .flat_map(|y| (area.x..area.right()).map(move |x| (x, y)))
                .filter_map(|(x, y)| self.get(x, y)),
        )
    }
}

impl Surface for RasterSurface {
    fn size(&mut self) -> Result<SurfaceSize> {
        Ok(SurfaceSize::new(self.width, self.height))
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let area = rect.intersection(&self.bounds());
        let width = self.width as usize;
        for y in area.y..area.bottom() {
            let start = (y as usize) * width + area.x as usize;
            self.pixels[start..start + area.width as usize].fill(color);
        }
    }

    fn fill_circle(&mut self, cx: u32, cy: u32, radius: u32, color: Rgb) {
        // A pixel is covered when its centre lies inside the circle; in
        // doubled coordinates that keeps everything integral.
        let (cx2, cy2) = (2 * i64::from(cx), 2 * i64::from(cy));
        let r2 = 4 * i64::from(radius) * i64::from(radius);
        let area = Rect::new(
            cx.saturating_sub(radius),
            cy.saturating_sub(radius),
            2 * radius + 1,
            2 * radius + 1,
        )
        .intersection(&self.bounds());

        for y in area.y..area.bottom() {
            let dy = 2 * i64::from(y) + 1 - cy2;
            for x in area.x..area.right() {
                let dx = 2 * i64::from(x) + 1 - cx2;
                if dx * dx + dy * dy <= r2 {
                    self.set(x, y, color);
                }
            }
        }
    }
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("background", &self.background)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_new() {
        let raster = RasterSurface::new(80, 130);
        assert_eq!(raster.width(), 80);
        assert_eq!(raster.height(), 130);
        assert_eq!(raster.pixels().len(), 80 * 130);
        assert_eq!(raster.get(79, 129), Some(Rgb::BLACK));
        assert_eq!(raster.get(80, 0), None);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut raster = RasterSurface::new(20, 20);
        raster.fill_rect(Rect::square(15, 15, 10), Rgb::RED);
        assert_eq!(raster.get(15, 15), Some(Rgb::RED));
        assert_eq!(raster.get(19, 19), Some(Rgb::RED));
        assert_eq!(raster.get(14, 15), Some(Rgb::BLACK));
    }

    #[test]
    fn test_fill_rect_exact_cell() {
        let mut raster = RasterSurface::new(30, 30);
        raster.fill_rect(Rect::square(10, 10, 10), Rgb::GREEN);
        assert_eq!(raster.get(10, 10), Some(Rgb::GREEN));
        assert_eq!(raster.get(19, 19), Some(Rgb::GREEN));
        assert_eq!(raster.get(20, 19), Some(Rgb::BLACK));
        assert_eq!(raster.get(19, 20), Some(Rgb::BLACK));
        assert_eq!(raster.get(9, 10), Some(Rgb::BLACK));
    }

    #[test]
    fn test_fill_circle_in_cell() {
        let mut raster = RasterSurface::new(10, 10);
        raster.fill_circle(5, 5, 3, Rgb::WHITE);

        // Centre and the four extremes of a radius-3 disc.
        assert_eq!(raster.get(5, 5), Some(Rgb::WHITE));
        assert_eq!(raster.get(2, 4), Some(Rgb::WHITE));
        assert_eq!(raster.get(7, 4), Some(Rgb::WHITE));
        assert_eq!(raster.get(4, 2), Some(Rgb::WHITE));
        assert_eq!(raster.get(4, 7), Some(Rgb::WHITE));

        // Corners of the cell stay untouched.
        assert_eq!(raster.get(0, 0), Some(Rgb::BLACK));
        assert_eq!(raster.get(9, 9), Some(Rgb::BLACK));
        assert_eq!(raster.get(2, 2), Some(Rgb::BLACK));

        let lit = raster.pixels().iter().filter(|&&c| c == Rgb::WHITE).count();
        assert!(lit > 20 && lit < 36, "disc covers {lit} pixels");
    }

    #[test]
    fn test_fill_circle_near_origin_clips() {
        let mut raster = RasterSurface::new(4, 4);
        raster.fill_circle(0, 0, 3, Rgb::BLUE);
        assert_eq!(raster.get(0, 0), Some(Rgb::BLUE));
        assert_eq!(raster.get(3, 3), Some(Rgb::BLACK));
    }

    #[test]
    fn test_resize_preserves() {
        let mut raster = RasterSurface::new(10, 10);
        raster.set(3, 3, Rgb::RED);
        raster.resize(20, 5);
        assert_eq!(raster.get(3, 3), Some(Rgb::RED));
        assert_eq!(raster.get(15, 4), Some(Rgb::BLACK));
        assert_eq!(raster.get(3, 7), None);
    }

    #[test]
    fn test_average() {
        let mut raster = RasterSurface::new(2, 2);
        raster.set(0, 0, Rgb::WHITE);
        raster.set(1, 0, Rgb::WHITE);
        assert_eq!(raster.average(Rect::new(0, 0, 2, 1)), Some(Rgb::WHITE));
        assert_eq!(raster.average(Rect::new(0, 0, 2, 2)), Some(Rgb::new(127, 127, 127)));
        assert_eq!(raster.average(Rect::new(5, 5, 1, 1)), None);
    }
}
