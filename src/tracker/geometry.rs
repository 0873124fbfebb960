//! Camera projection for placing the examination cursor
//!
//! The examined object and the cursor are rendered by different cameras.
//! A hotspot center is projected to screen pixels through the object
//! camera, then mapped into the cursor camera's orthographic space.

use crate::probe::StateProbe;

/// Perspective camera looking at the examined object
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Column-major 4x4 view-projection matrix
    pub view_projection: [f64; 16],
    /// Viewport size in pixels
    pub viewport: [f64; 2],
}

/// Orthographic space the examination cursor lives in
#[derive(Debug, Clone, PartialEq)]
pub struct CursorSpace {
    /// Cursor-space position of the screen center
    pub origin: [f64; 2],
    pub units_per_pixel: f64,
    /// Depth at which the cursor is drawn
    pub depth: f64,
}

const MIN_CLIP_W: f64 = 1e-6;

impl Camera {
    pub fn from_probe(probe: &dyn StateProbe, prefix: &str) -> Option<Self> {
        let matrix = probe.read(&format!("{prefix}.view_projection")).found()?;
        let view_projection = matrix.as_vector::<16>().found()?;
        let viewport = probe.read(&format!("{prefix}.viewport")).found()?.as_vector::<2>().found()?;
        if viewport[0] <= 0.0 || viewport[1] <= 0.0 {
            return None;
        }
        Some(Self {
            view_projection,
            viewport,
        })
    }

    /// Screen position in pixels (origin bottom-left), or `None` when the
    /// point is behind the camera
    pub fn world_to_screen(&self, point: [f64; 3]) -> Option<[f64; 2]> {
        let m = &self.view_projection;
        let v = [point[0], point[1], point[2], 1.0];
        let clip = |row: usize| (0..4).map(|col| m[col * 4 + row] * v[col]).sum::<f64>();

        let w = clip(3);
        if !(w > MIN_CLIP_W) {
            return None;
        }
        let ndc_x = clip(0) / w;
        let ndc_y = clip(1) / w;
        let screen = [
            (ndc_x + 1.0) * 0.5 * self.viewport[0],
            (ndc_y + 1.0) * 0.5 * self.viewport[1],
        ];
        screen.iter().all(|c| c.is_finite()).then_some(screen)
    }
}

impl CursorSpace {
    pub fn from_probe(probe: &dyn StateProbe, prefix: &str) -> Option<Self> {
        let origin = probe.read(&format!("{prefix}.origin")).found()?.as_vector::<2>().found()?;
        let units_per_pixel = probe.read_f64(&format!("{prefix}.units_per_pixel")).found()?;
        let depth = probe.read_f64(&format!("{prefix}.depth")).found()?;
        Some(Self {
            origin,
            units_per_pixel,
            depth,
        })
    }

    pub fn screen_to_cursor(&self, screen: [f64; 2], viewport: [f64; 2]) -> [f64; 3] {
        [
            self.origin[0] + (screen[0] - viewport[0] * 0.5) * self.units_per_pixel,
            self.origin[1] + (screen[1] - viewport[1] * 0.5) * self.units_per_pixel,
            self.depth,
        ]
    }
}

/// Where the cursor must go to sit over `point`
pub fn project_to_cursor(camera: &Camera, space: &CursorSpace, point: [f64; 3]) -> Option<[f64; 3]> {
    let screen = camera.world_to_screen(point)?;
    let target = space.screen_to_cursor(screen, camera.viewport);
    target.iter().all(|c| c.is_finite()).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Looks down -z from the origin; clip w is -z
    fn simple_camera() -> Camera {
        #[rustfmt::skip]
        let view_projection = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, -1.0,
            0.0, 0.0, 0.0, 0.0,
        ];
        Camera {
            view_projection,
            viewport: [800.0, 600.0],
        }
    }

    #[test]
    fn test_center_projects_to_screen_center() {
        let camera = simple_camera();
        assert_eq!(camera.world_to_screen([0.0, 0.0, -5.0]), Some([400.0, 300.0]));
        assert_eq!(camera.world_to_screen([2.0, 0.0, -2.0]), Some([800.0, 300.0]));
    }

    #[test]
    fn test_behind_camera_fails() {
        let camera = simple_camera();
        assert_eq!(camera.world_to_screen([0.0, 0.0, 5.0]), None);
        assert_eq!(camera.world_to_screen([0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn test_cursor_space_mapping() {
        let camera = simple_camera();
        let space = CursorSpace {
            origin: [0.0, 0.0],
            units_per_pixel: 0.01,
            depth: 10.0,
        };
        let target = project_to_cursor(&camera, &space, [1.0, 0.0, -1.0]).unwrap();
        assert_eq!(target, [4.0, 0.0, 10.0]);
    }
}
