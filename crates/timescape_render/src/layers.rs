//! Scene layer drawing: stars, lightning, hands and the hold ring
//!
//! Every function here takes the target surface, the viewport and the
//! accumulated free-look orbit, and scales its output by the global scene
//! opacity so the capture fade dims the whole scene in lockstep.

use rand::Rng;

use timescape_input::{landmarks, HandPose};
use timescape_math::Vec3;
use timescape_particles::{LightningSystem, StarField};

use crate::color::Color;
use crate::surface::Surface;
use crate::viewport::{orbit, Viewport};

/// Zoom speed beyond which stars render as warp streaks
const WARP_THRESHOLD: f32 = 0.5;

/// The five neon passes per hand: widest and faintest first, finishing
/// with a thin desaturated core. The stacking is what reads as bloom.
const NEON_PASSES: [(f32, f32, f32); 5] = [
    (60.0, 100.0, 1.0),
    (40.0, 100.0, 2.0),
    (25.0, 100.0, 4.0),
    (14.0, 80.0, 10.0),
    (7.0, 0.0, 20.0),
];

/// Hold ring geometry
const RING_RADIUS: f32 = 120.0;
const RING_MARKERS: usize = 12;

/// Draw the star field with windowed neighbor links and the zoom warp
pub fn draw_stars(
    surface: &mut Surface,
    viewport: &Viewport,
    view: (f32, f32),
    stars: &StarField,
    opacity: f32,
    zoom_speed: f32,
    rng: &mut impl Rng,
) {
    let (yaw, pitch) = view;
    let opacity_scale = opacity / 100.0;

    // Links first so the stars themselves sit on top
    for link in stars.links() {
        let s1 = stars.stars()[link.a];
        let s2 = stars.stars()[link.b];
        let flicker = rng.gen_range(0.5..1.0);
        // Brightness falls off linearly with distance
        let falloff = 50.0 * (1.0 - link.distance / stars.link_range());
        let alpha = falloff * opacity_scale * flicker;
        let color = Color::hsba(200.0, 50.0, 100.0, alpha);

        let a = orbit(Vec3::new(s1.x, s1.y, s1.z), yaw, pitch);
        let b = orbit(Vec3::new(s2.x, s2.y, s2.z), yaw, pitch);
        if let (Some(pa), Some(pb)) = (viewport.project(a), viewport.project(b)) {
            surface.line(pa, pb, 1.0, color);
        }
    }

    for star in stars.stars() {
        let jittered = star.brightness + rng.gen_range(-20.0..20.0);
        let brightness = (jittered / 255.0 * 100.0).clamp(0.0, 100.0);
        let color = Color::hsba(0.0, 0.0, brightness, opacity);

        let p = Vec3::new(star.x, star.y, star.z);
        if zoom_speed.abs() > WARP_THRESHOLD {
            // Hyperspace streak along the travel direction
            let tail = Vec3::new(star.x, star.y, star.z - zoom_speed * 10.0);
            if let (Some(pa), Some(pb)) = (
                viewport.project(orbit(p, yaw, pitch)),
                viewport.project(orbit(tail, yaw, pitch)),
            ) {
                surface.line(pa, pb, 2.0, color);
            }
        } else if let Some(screen) = viewport.project(orbit(p, yaw, pitch)) {
            surface.disc(screen, 1.5, color);
        }
    }
}

/// Draw every live bolt as a wide glow pass under a thin hot core
pub fn draw_lightning(
    surface: &mut Surface,
    viewport: &Viewport,
    view: (f32, f32),
    lightning: &LightningSystem,
    opacity: f32,
) {
    let (yaw, pitch) = view;
    let opacity_scale = opacity / 100.0;

    for bolt in lightning.bolts() {
        let screen: Vec<_> = bolt
            .points()
            .iter()
            .filter_map(|&p| viewport.project(orbit(p, yaw, pitch)))
            .collect();
        if screen.len() < 2 {
            continue;
        }

        let intensity = bolt.intensity();
        let glow = Color::hsba(200.0, 80.0, 100.0, intensity * 50.0 * opacity_scale);
        surface.polyline(&screen, 15.0, glow);
        let core = Color::hsba(200.0, 0.0, 100.0, intensity * 100.0 * opacity_scale);
        surface.polyline(&screen, 5.0, core);
    }
}

/// Draw each hand as a layered neon skeleton
pub fn draw_neon_hands(
    surface: &mut Surface,
    viewport: &Viewport,
    view: (f32, f32),
    hands: &[HandPose],
    input_size: (f32, f32),
    opacity: f32,
) {
    let (yaw, pitch) = view;
    let opacity_scale = opacity / 100.0;

    for hand in hands {
        for chain in &landmarks::FINGER_CHAINS {
            let screen: Vec<_> = chain
                .iter()
                .filter_map(|&i| {
                    let world = viewport.map_detector(hand.keypoint(i), input_size.0, input_size.1);
                    viewport.project(orbit(world, yaw, pitch))
                })
                .collect();
            if screen.len() < 2 {
                continue;
            }
            for &(weight, sat, alpha) in &NEON_PASSES {
                let color = Color::hsba(190.0, sat, 100.0, alpha * opacity_scale);
                surface.polyline(&screen, weight, color);
            }
        }
    }
}

/// Draw the circular hold-progress indicator over the holding hand's palm.
///
/// Twelve pulsing markers form the ring; the progress arc is a polyline
/// through the completed markers with a fractional segment interpolated
/// toward the next one.
pub fn draw_hold_ring(
    surface: &mut Surface,
    viewport: &Viewport,
    view: (f32, f32),
    hand: &HandPose,
    input_size: (f32, f32),
    progress: f32,
    tick: u64,
) {
    let (yaw, pitch) = view;
    let progress = progress.clamp(0.0, 1.0);

    let wrist = hand.keypoint(landmarks::WRIST);
    let middle = hand.keypoint(landmarks::MIDDLE_MCP);
    let palm = timescape_input::Keypoint::new(
        (wrist.x + middle.x) * 0.5,
        (wrist.y + middle.y) * 0.5,
    );
    let center = viewport.map_detector(palm, input_size.0, input_size.1);

    let angle_step = std::f32::consts::TAU / RING_MARKERS as f32;
    let marker_at = |index: f32| -> Vec3 {
        let a = index * angle_step;
        center + Vec3::new(a.cos() * RING_RADIUS, a.sin() * RING_RADIUS, 0.0)
    };

    // Pulsing marker dots
    for i in 0..RING_MARKERS {
        let pulse = 4.0 + ((tick as f32) * 0.2 + i as f32).sin() * 2.0;
        if let Some(screen) = viewport.project(orbit(marker_at(i as f32), yaw, pitch)) {
            surface.disc(screen, pulse * 0.5, Color::WHITE);
        }
    }

    if progress <= 0.0 {
        return;
    }

    // Completed markers, then the fractional tip between the last full
    // marker and the next
    let steps = progress * RING_MARKERS as f32;
    let full = steps.floor() as usize;
    let partial = steps - full as f32;

    let mut arc = Vec::with_capacity(full + 2);
    for i in 0..=full.min(RING_MARKERS) {
        arc.push(marker_at(i as f32));
    }
    if progress < 1.0 {
        let from = marker_at(full as f32);
        let to = marker_at(full as f32 + 1.0);
        arc.push(from.lerp(to, partial));
    }

    let screen: Vec<_> = arc
        .into_iter()
        .filter_map(|p| viewport.project(orbit(p, yaw, pitch)))
        .collect();
    surface.polyline(&screen, 2.0, Color::hsba(200.0, 80.0, 100.0, 100.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use timescape_input::Keypoint;

    fn lit_pixels(surface: &Surface) -> usize {
        let mut count = 0;
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                if surface.pixel(x, y) != [0, 0, 0, 255] {
                    count += 1;
                }
            }
        }
        count
    }

    fn open_hand_centered() -> HandPose {
        // Spread the keypoints so every finger chain has visible extent
        let mut keypoints = [Keypoint::default(); landmarks::KEYPOINT_COUNT];
        for (i, kp) in keypoints.iter_mut().enumerate() {
            *kp = Keypoint::new(300.0 + (i as f32) * 3.0, 220.0 + (i as f32 % 5.0) * 10.0);
        }
        HandPose::new(keypoints)
    }

    #[test]
    fn test_stars_draw_and_scale_with_opacity() {
        let mut rng = StdRng::seed_from_u64(1);
        let stars = StarField::new(150, 300.0, 300.0, &mut rng);

        let mut surface = Surface::new(300, 300);
        draw_stars(&mut surface, &Viewport::new(300, 300), (0.0, 0.0), &stars, 100.0, 0.0, &mut rng);
        assert!(lit_pixels(&surface) > 50);

        let mut dark = Surface::new(300, 300);
        draw_stars(&mut dark, &Viewport::new(300, 300), (0.0, 0.0), &stars, 0.0, 0.0, &mut rng);
        assert_eq!(lit_pixels(&dark), 0);
    }

    #[test]
    fn test_lightning_glow_and_core() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut lightning = LightningSystem::new().with_spawn_probability(1.0);
        lightning.maybe_spawn(Vec3::new(0.0, 0.0, -50.0), &mut rng);

        let mut surface = Surface::new(400, 400);
        draw_lightning(&mut surface, &Viewport::new(400, 400), (0.0, 0.0), &lightning, 100.0);
        assert!(lit_pixels(&surface) > 100);
    }

    #[test]
    fn test_neon_hand_renders() {
        let mut surface = Surface::new(640, 480);
        draw_neon_hands(
            &mut surface,
            &Viewport::new(640, 480),
            (0.0, 0.0),
            &[open_hand_centered()],
            (640.0, 480.0),
            100.0,
        );
        assert!(lit_pixels(&surface) > 500);
    }

    #[test]
    fn test_hold_ring_arc_grows_with_progress() {
        let viewport = Viewport::new(640, 480);
        let hand = open_hand_centered();

        let mut early = Surface::new(640, 480);
        draw_hold_ring(&mut early, &viewport, (0.0, 0.0), &hand, (640.0, 480.0), 0.1, 0);
        let mut late = Surface::new(640, 480);
        draw_hold_ring(&mut late, &viewport, (0.0, 0.0), &hand, (640.0, 480.0), 0.9, 0);

        assert!(lit_pixels(&late) > lit_pixels(&early));
    }
}
