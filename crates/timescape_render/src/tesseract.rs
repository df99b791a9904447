//! Tesseract layer
//!
//! Spins the hypercube in the ZW and XY planes, projects it to 3D and
//! strokes it as glowing double-edged wireframe with beads on the
//! vertices. The same draw path feeds either the live view or the art
//! buffer; only the target surface and viewport differ.

use timescape_math::{hypercube, Hypercube, Vec3};

use crate::color::Color;
use crate::surface::Surface;
use crate::viewport::{orbit, Viewport};

/// Half-gap between the two parallel strokes of an edge
const EDGE_OFFSET: f32 = 4.0;
/// Vertex bead radius
const BEAD_RADIUS: f32 = 6.0;

/// Hypercube spin state and drawing
pub struct TesseractLayer {
    cube: Hypercube,
    angle: f32,
    rotation_increment: f32,
    time_scaled_spin: bool,
    camera_distance: f32,
}

impl Default for TesseractLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl TesseractLayer {
    pub fn new() -> Self {
        Self {
            cube: Hypercube::new(),
            angle: 0.0,
            rotation_increment: 0.02,
            time_scaled_spin: false,
            camera_distance: hypercube::DEFAULT_CAMERA_DISTANCE,
        }
    }

    /// Builder: radians of ZW spin per frame (the XY spin runs at half)
    pub fn with_rotation_increment(mut self, increment: f32) -> Self {
        self.rotation_increment = increment;
        self
    }

    /// Builder: scale the spin by elapsed time instead of per frame.
    /// The default stays frame-locked: the spin speeds up and slows down
    /// with the frame rate, which is part of the original feel.
    pub fn with_time_scaled_spin(mut self, enabled: bool) -> Self {
        self.time_scaled_spin = enabled;
        self
    }

    /// Builder: 4D camera pseudo-distance for the perspective divide
    pub fn with_camera_distance(mut self, distance: f32) -> Self {
        self.camera_distance = distance;
        self
    }

    /// Advance the spin. Called once per frame, and only on frames where
    /// the tesseract is actually drawn, so the figure freezes when no
    /// hands are present.
    pub fn advance(&mut self, dt: f32) {
        if self.time_scaled_spin {
            self.angle += self.rotation_increment * dt * 60.0;
        } else {
            self.angle += self.rotation_increment;
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Project and stroke the hypercube.
    ///
    /// `rotation` is the smoothed hand-driven model rotation, `view` the
    /// accumulated free-look orbit, `scale` the pixel size of one model
    /// unit and `tick` the frame counter driving the edge color wave.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        surface: &mut Surface,
        viewport: &Viewport,
        view: (f32, f32),
        rotation: (f32, f32, f32),
        scale: f32,
        opacity: f32,
        tick: u64,
    ) {
        let (rot_x, rot_y, rot_z) = rotation;
        let (yaw, pitch) = view;

        // Rotate in 4D, perspective-divide to 3D, then apply the model
        // rotation in the same axis order the smoothing state is built for
        let world: Vec<Vec3> = self
            .cube
            .vertices()
            .iter()
            .map(|&v| {
                let spun = hypercube::rotate(v, self.angle, self.angle * 0.5);
                let p = hypercube::project(spun, self.camera_distance) * scale;
                orbit(
                    p.rotated_z(rot_z).rotated_y(rot_y).rotated_x(rot_x),
                    yaw,
                    pitch,
                )
            })
            .collect();

        // Vertex beads
        let bead = Color::hsba(200.0, 10.0, 80.0, opacity);
        for &p in &world {
            if let Some(screen) = viewport.project(p) {
                surface.disc(screen, BEAD_RADIUS, bead);
            }
        }

        // Double-stroked edges with the hue oscillating between cyan and
        // purple across vertices and time
        let t = tick as f32;
        for &(i, j) in self.cube.edges() {
            let a = world[i];
            let b = world[j];

            let wave = (t * 0.02 + i as f32 * 0.5).sin();
            let hue = 190.0 + (wave + 1.0) * 0.5 * (290.0 - 190.0);
            let sat = 80.0 + ((t * 0.03 + j as f32).cos() + 1.0) * 0.5 * 20.0;
            let color = Color::hsba(hue, sat, 100.0, opacity);

            let along = b - a;
            let mut offset = along.cross(Vec3::Y);
            if offset.length_squared() < 0.001 {
                // Edge parallel to the up axis: fall back to another
                // reference so the offset never collapses
                offset = along.cross(Vec3::Z);
            }
            let offset = offset.normalized() * EDGE_OFFSET;

            for side in [offset, -offset] {
                if let (Some(pa), Some(pb)) =
                    (viewport.project(a + side), viewport.project(b + side))
                {
                    surface.line(pa, pb, 1.0, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_frame_locked_by_default() {
        let mut layer = TesseractLayer::new();
        // Wildly different frame times advance the same amount
        layer.advance(1.0 / 240.0);
        layer.advance(1.0 / 15.0);
        assert!((layer.angle() - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_time_scaled_spin_follows_dt() {
        let mut layer = TesseractLayer::new().with_time_scaled_spin(true);
        layer.advance(1.0 / 60.0);
        assert!((layer.angle() - 0.02).abs() < 1e-6);
        layer.advance(1.0 / 30.0);
        assert!((layer.angle() - 0.06).abs() < 1e-6);
    }

    #[test]
    fn test_draw_leaves_marks_on_the_surface() {
        let mut surface = Surface::new(200, 200);
        let viewport = Viewport::new(200, 200);
        let mut layer = TesseractLayer::new();
        layer.advance(1.0 / 60.0);
        layer.draw(
            &mut surface,
            &viewport,
            (0.0, 0.0),
            (0.0, 0.0, 0.0),
            50.0,
            100.0,
            1,
        );

        let lit = (0..200)
            .flat_map(|y| (0..200).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y) != [0, 0, 0, 255])
            .count();
        assert!(lit > 100, "only {} pixels drawn", lit);
    }

    #[test]
    fn test_draw_respects_zero_opacity() {
        let mut surface = Surface::new(100, 100);
        let viewport = Viewport::new(100, 100);
        let layer = TesseractLayer::new();
        layer.draw(
            &mut surface,
            &viewport,
            (0.0, 0.0),
            (0.0, 0.0, 0.0),
            30.0,
            0.0,
            0,
        );
        for y in 0..100 {
            for x in 0..100 {
                assert_eq!(surface.pixel(x, y), [0, 0, 0, 255]);
            }
        }
    }
}
