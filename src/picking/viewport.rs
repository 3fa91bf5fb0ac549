use crate::math::{Matrix4, Vector3};

/// Pixel size of the widget that shows the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The square render viewport for this widget.
    ///
    /// The square has the widget's larger side. A wide widget gets the
    /// square shifted down so the mesh stays vertically centered; a tall
    /// widget gets it anchored at the bottom-left corner.
    #[must_use]
    pub fn gl_viewport(&self) -> Viewport {
        let side = self.width.max(self.height);
        let shift = if self.width > self.height {
            (self.width - self.height) / 2
        } else {
            0
        };
        Viewport {
            x: 0.0,
            y: -f64::from(shift),
            width: f64::from(side),
            height: f64::from(side),
        }
    }
}

/// Render viewport in window coordinates, origin at the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Square pick window in window coordinates (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRegion {
    /// Window center, x.
    pub x: f64,
    /// Window center, y.
    pub y: f64,
    /// Side length in pixels.
    pub size: f64,
}

impl PickRegion {
    /// Region centered on a cursor given with a top-left origin.
    #[must_use]
    pub fn around_cursor(cursor_x: f64, cursor_y: f64, size: u32, widget: ViewportSize) -> Self {
        Self {
            x: cursor_x,
            y: f64::from(widget.height) - cursor_y,
            size: f64::from(size),
        }
    }

    /// Matrix that, applied after the projection, stretches this region over
    /// the whole clip volume.
    ///
    /// Returns `None` for an empty region.
    #[must_use]
    pub fn pick_matrix(&self, viewport: &Viewport) -> Option<Matrix4> {
        if self.size <= 0.0 {
            return None;
        }
        let tx = (viewport.width - 2.0 * (self.x - viewport.x)) / self.size;
        let ty = (viewport.height - 2.0 * (self.y - viewport.y)) / self.size;
        let translate = Matrix4::new_translation(&Vector3::new(tx, ty, 0.0));
        let scale = Matrix4::new_nonuniform_scaling(&Vector3::new(
            viewport.width / self.size,
            viewport.height / self.size,
            1.0,
        ));
        Some(translate * scale)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use approx::assert_relative_eq;

    #[test]
    fn wide_widget_gets_shifted_square() {
        let vp = ViewportSize::new(800, 600).gl_viewport();
        assert_relative_eq!(vp.width, 800.0);
        assert_relative_eq!(vp.height, 800.0);
        assert_relative_eq!(vp.y, -100.0);
    }

    #[test]
    fn tall_widget_gets_anchored_square() {
        let vp = ViewportSize::new(300, 500).gl_viewport();
        assert_relative_eq!(vp.width, 500.0);
        assert_relative_eq!(vp.x, 0.0);
        assert_relative_eq!(vp.y, 0.0);
    }

    #[test]
    fn cursor_y_is_flipped() {
        let region = PickRegion::around_cursor(10.0, 30.0, 4, ViewportSize::new(100, 100));
        assert_relative_eq!(region.y, 70.0);
        assert_relative_eq!(region.size, 4.0);
    }

    #[test]
    fn pick_matrix_maps_region_onto_unit_square() {
        let vp = ViewportSize::new(200, 200).gl_viewport();
        let region = PickRegion {
            x: 150.0,
            y: 50.0,
            size: 10.0,
        };
        let m = region.pick_matrix(&vp).unwrap();
        // Window (150, 50) is NDC (0.5, -0.5); the region's corner is 5 px away.
        let center = m.transform_point(&Point3::new(0.5, -0.5, 0.3));
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(center.z, 0.3, epsilon = 1e-12);
        let corner = m.transform_point(&Point3::new(0.55, -0.45, 0.0));
        assert_relative_eq!(corner.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(corner.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_region_has_no_matrix() {
        let vp = ViewportSize::new(200, 200).gl_viewport();
        let region = PickRegion::around_cursor(10.0, 10.0, 0, ViewportSize::new(200, 200));
        assert!(region.pick_matrix(&vp).is_none());
    }
}
