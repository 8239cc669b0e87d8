//! Perspective camera projecting world points onto terminal cells.

use ratatui::layout::Rect;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 2.0;

/// Points closer than this to the camera plane are culled.
const NEAR_PLANE: f32 = 0.1;

/// A world point mapped to a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Absolute column of the cell.
    pub column: u16,
    /// Absolute row of the cell.
    pub row: u16,
    /// Distance along the view direction.
    pub depth: f32,
}

/// Pinhole camera described by its position, orientation and vertical
/// field of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: [f32; 3],
    right: [f32; 3],
    up: [f32; 3],
    forward: [f32; 3],
    /// `tan(fov / 2)`.
    tan_half_fov: f32,
}

impl Camera {
    /// Camera at `position` looking at `target` with a vertical field of
    /// view of `fov_degrees`, world +y up.
    pub fn look_at(position: [f32; 3], target: [f32; 3], fov_degrees: f32) -> Self {
        let forward = normalize(sub(target, position)).unwrap_or([0.0, 0.0, -1.0]);
        let right = normalize(cross(forward, [0.0, 1.0, 0.0])).unwrap_or([1.0, 0.0, 0.0]);
        let up = cross(right, forward);
        Self {
            position,
            right,
            up,
            forward,
            tan_half_fov: (fov_degrees.to_radians() / 2.0).tan(),
        }
    }

    /// The particle field's landscape view: above and in front of the
    /// lattice, looking down at its centre.
    pub fn field() -> Self {
        Self::look_at([0.0, 15.0, 20.0], [0.0, 0.0, 0.0], 45.0)
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    /// Project `point` into `area`, or `None` if it falls behind the camera
    /// or outside the area.
    pub fn project(&self, point: [f32; 3], area: Rect) -> Option<Projected> {
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let d = sub(point, self.position);
        let depth = dot(d, self.forward);
        if depth.is_nan() || depth < NEAR_PLANE {
            return None;
        }

        let aspect = area.width as f32 / (area.height as f32 * CELL_ASPECT);
        let ndc_x = dot(d, self.right) / (depth * self.tan_half_fov * aspect);
        let ndc_y = dot(d, self.up) / (depth * self.tan_half_fov);

        let column = ((ndc_x + 1.0) / 2.0 * area.width as f32).floor();
        let row = ((1.0 - ndc_y) / 2.0 * area.height as f32).floor();
        // Rejects NaN as well as out-of-range cells.
        if !(column >= 0.0 && column < area.width as f32 && row >= 0.0 && row < area.height as f32)
        {
            return None;
        }

        Some(Projected {
            column: area.x + column as u16,
            row: area.y + row as u16,
            depth,
        })
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> Option<[f32; 3]> {
    let len = dot(v, v).sqrt();
    (len > f32::EPSILON).then(|| [v[0] / len, v[1] / len, v[2] / len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_camera_basis() {
        let camera = Camera::field();
        let close = |a: [f32; 3], b: [f32; 3]| (0..3).all(|i| (a[i] - b[i]).abs() < 1e-5);
        assert!(close(camera.forward, [0.0, -0.6, -0.8]));
        assert!(close(camera.right, [1.0, 0.0, 0.0]));
        assert!(close(camera.up, [0.0, 0.8, -0.6]));
    }

    #[test]
    fn test_target_projects_to_centre() {
        let camera = Camera::field();
        let area = Rect::new(0, 0, 81, 41);
        let p = camera.project([0.0, 0.0, 0.0], area).unwrap();
        assert_eq!((p.column, p.row), (40, 20));
        assert!((p.depth - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_projection_respects_area_offset() {
        let camera = Camera::field();
        let p = camera.project([0.0, 0.0, 0.0], Rect::new(10, 5, 81, 41)).unwrap();
        assert_eq!((p.column, p.row), (50, 25));
    }

    #[test]
    fn test_behind_camera_is_culled() {
        let camera = Camera::field();
        let area = Rect::new(0, 0, 80, 40);
        assert!(camera.project([0.0, 15.0, 30.0], area).is_none());
        assert!(camera.project([0.0, 15.0, 20.0], area).is_none());
    }

    #[test]
    fn test_outside_frustum_is_culled() {
        let camera = Camera::field();
        let area = Rect::new(0, 0, 80, 40);
        assert!(camera.project([500.0, 0.0, 0.0], area).is_none());
        assert!(camera.project([f32::NAN, 0.0, 0.0], area).is_none());
        assert!(camera.project([0.0, 0.0, 0.0], Rect::new(0, 0, 0, 10)).is_none());
    }

    #[test]
    fn test_orientation() {
        let camera = Camera::field();
        let area = Rect::new(0, 0, 81, 41);
        let centre = camera.project([0.0, 0.0, 0.0], area).unwrap();
        let right = camera.project([5.0, 0.0, 0.0], area).unwrap();
        let far = camera.project([0.0, 0.0, -10.0], area).unwrap();
        let raised = camera.project([0.0, 3.0, 0.0], area).unwrap();
        assert!(right.column > centre.column);
        assert!(far.row < centre.row);
        assert!(far.depth > centre.depth);
        assert!(raised.row < centre.row);
    }
}
