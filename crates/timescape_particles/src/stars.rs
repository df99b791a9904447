//! Ambient star field
//!
//! A fixed set of stars scattered behind the scene. Depth advances with
//! the zoom gesture so pulling hands apart reads as warping forward, and
//! each star wraps within a fixed depth band to keep the travel endless.
//!
//! Neighbor linking is deliberately windowed: star i only checks the next
//! few stars by index, an O(n·k) stand-in for full proximity linking.
//! The windowed policy is part of the look (link density stays constant)
//! and must not be widened to an exhaustive scan.

use rand::Rng;

/// Near edge of the depth band (just behind the viewer plane)
pub const DEPTH_NEAR: f32 = 0.0;
/// Far edge of the depth band
pub const DEPTH_FAR: f32 = -1000.0;

/// Link squared-distance threshold (150 px)
const LINK_DISTANCE_SQ: f32 = 150.0 * 150.0;
/// How many following stars each star checks for links
const LINK_WINDOW: usize = 5;
/// Depth advance per unit of zoom speed
const WARP_FACTOR: f32 = 4.0;

/// One background star
#[derive(Clone, Copy, Debug)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub brightness: f32,
}

/// A drawable link between two nearby stars
#[derive(Clone, Copy, Debug)]
pub struct StarLink {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

/// Fixed-size star set; stars are never added or removed after creation
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    /// Scatter `count` stars over ±spread_x, ±spread_y and the far half of
    /// the depth band
    pub fn new(count: usize, spread_x: f32, spread_y: f32, rng: &mut impl Rng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(-spread_x..spread_x),
                y: rng.gen_range(-spread_y..spread_y),
                z: rng.gen_range(DEPTH_FAR..DEPTH_FAR * 0.5),
                brightness: rng.gen_range(100.0..255.0),
            })
            .collect();
        Self { stars }
    }

    /// Advance depth by the zoom speed and wrap within the band
    pub fn advance(&mut self, zoom_speed: f32) {
        for star in &mut self.stars {
            star.z += zoom_speed * WARP_FACTOR;
            if star.z > DEPTH_NEAR {
                star.z = DEPTH_FAR;
            }
            if star.z < DEPTH_FAR {
                star.z = DEPTH_NEAR;
            }
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// The index window star `i` checks for links: the next
    /// [`LINK_WINDOW`] stars, truncated at the end of the set
    pub fn candidate_window(&self, i: usize) -> std::ops::Range<usize> {
        (i + 1)..(i + 1 + LINK_WINDOW).min(self.stars.len())
    }

    /// Enumerate links between window-adjacent stars closer than the
    /// threshold. The square root is only taken for pairs that pass the
    /// squared-distance test.
    pub fn links(&self) -> Vec<StarLink> {
        let mut links = Vec::new();
        for i in 0..self.stars.len() {
            let s1 = self.stars[i];
            for j in self.candidate_window(i) {
                let s2 = self.stars[j];
                let dx = s1.x - s2.x;
                let dy = s1.y - s2.y;
                let dz = s1.z - s2.z;
                let dist_sq = dx * dx + dy * dy + dz * dz;
                if dist_sq < LINK_DISTANCE_SQ {
                    links.push(StarLink {
                        a: i,
                        b: j,
                        distance: dist_sq.sqrt(),
                    });
                }
            }
        }
        links
    }

    /// Distance at which a link fades to nothing
    pub fn link_range(&self) -> f32 {
        LINK_DISTANCE_SQ.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field(count: usize) -> StarField {
        let mut rng = StdRng::seed_from_u64(7);
        StarField::new(count, 640.0, 360.0, &mut rng)
    }

    #[test]
    fn test_count_is_fixed() {
        let mut stars = field(200);
        assert_eq!(stars.len(), 200);
        for _ in 0..100 {
            stars.advance(12.0);
        }
        assert_eq!(stars.len(), 200);
    }

    #[test]
    fn test_depth_wraps_within_band() {
        let mut stars = field(50);
        for _ in 0..500 {
            stars.advance(37.0);
            for star in stars.stars() {
                assert!(star.z <= DEPTH_NEAR && star.z >= DEPTH_FAR, "z = {}", star.z);
            }
        }
        // And in the other direction
        for _ in 0..500 {
            stars.advance(-37.0);
            for star in stars.stars() {
                assert!(star.z <= DEPTH_NEAR && star.z >= DEPTH_FAR, "z = {}", star.z);
            }
        }
    }

    #[test]
    fn test_zero_zoom_is_static() {
        let mut stars = field(20);
        let before: Vec<f32> = stars.stars().iter().map(|s| s.z).collect();
        stars.advance(0.0);
        let after: Vec<f32> = stars.stars().iter().map(|s| s.z).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_candidate_window_is_bounded() {
        let stars = field(100);
        for i in 0..stars.len() {
            let window = stars.candidate_window(i);
            assert!(window.start == i + 1);
            assert!(window.end - window.start <= LINK_WINDOW);
            assert!(window.end <= stars.len());
        }
        // The windowed policy caps total candidate pairs at n·k
        let total: usize = (0..stars.len())
            .map(|i| stars.candidate_window(i).len())
            .sum();
        assert!(total <= stars.len() * LINK_WINDOW);
    }

    #[test]
    fn test_links_respect_window_and_threshold() {
        let stars = field(200);
        for link in stars.links() {
            assert!(link.b > link.a);
            assert!(link.b - link.a <= LINK_WINDOW, "link spans outside window");
            assert!(link.distance < stars.link_range());
        }
    }
}
