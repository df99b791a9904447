//! Fingertip lightning
//!
//! Bolts spawn stochastically at fingertips, shoot off in a random
//! direction as a jagged polyline, and burn out over a handful of frames.
//! Ownership is strictly local: the system creates bolts, decays them, and
//! drops them once their life runs out.

use rand::Rng;
use timescape_math::Vec3;

/// Points per bolt (origin plus [`SEGMENT_COUNT`] steps)
const SEGMENT_COUNT: usize = 10;
/// Base step length along the bolt direction
const STEP_SIZE: f32 = 20.0;
/// Per-axis jitter added to every step
const JITTER: f32 = 15.0;
/// Starting life value
const LIFE_START: f32 = 255.0;
/// Life lost per frame
const LIFE_DECAY: f32 = 15.0;

/// Default spawn chance per fingertip per frame
pub const DEFAULT_SPAWN_PROBABILITY: f64 = 0.002;

/// One jagged decaying polyline
#[derive(Clone, Debug)]
pub struct LightningBolt {
    points: Vec<Vec3>,
    life: f32,
}

impl LightningBolt {
    /// Grow a bolt from `origin` along `direction` (unit length), stepping
    /// a fixed distance with random jitter on every axis
    pub fn new(origin: Vec3, direction: Vec3, rng: &mut impl Rng) -> Self {
        let mut points = Vec::with_capacity(SEGMENT_COUNT + 1);
        let mut cursor = origin;
        points.push(cursor);

        for _ in 0..SEGMENT_COUNT {
            cursor += direction * STEP_SIZE
                + Vec3::new(
                    rng.gen_range(-JITTER..JITTER),
                    rng.gen_range(-JITTER..JITTER),
                    rng.gen_range(-JITTER..JITTER),
                );
            points.push(cursor);
        }

        Self {
            points,
            life: LIFE_START,
        }
    }

    /// Burn down one frame's worth of life
    pub fn decay(&mut self) {
        self.life -= LIFE_DECAY;
    }

    pub fn is_dead(&self) -> bool {
        self.life < 0.0
    }

    /// Remaining life in [0, 255] while alive
    pub fn life(&self) -> f32 {
        self.life
    }

    /// Fraction of starting life remaining, for render intensity
    pub fn intensity(&self) -> f32 {
        (self.life / LIFE_START).clamp(0.0, 1.0)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

/// Owns every live bolt
pub struct LightningSystem {
    bolts: Vec<LightningBolt>,
    spawn_probability: f64,
}

impl Default for LightningSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl LightningSystem {
    pub fn new() -> Self {
        Self {
            bolts: Vec::new(),
            spawn_probability: DEFAULT_SPAWN_PROBABILITY,
        }
    }

    /// Builder: per-fingertip per-frame spawn chance
    pub fn with_spawn_probability(mut self, probability: f64) -> Self {
        self.spawn_probability = probability;
        self
    }

    /// Roll the spawn die for one fingertip position
    pub fn maybe_spawn(&mut self, fingertip: Vec3, rng: &mut impl Rng) {
        if rng.gen_bool(self.spawn_probability) {
            self.bolts
                .push(LightningBolt::new(fingertip, random_unit(rng), rng));
        }
    }

    /// Decay all bolts and drop the dead ones
    pub fn advance(&mut self) {
        for bolt in &mut self.bolts {
            bolt.decay();
        }
        self.bolts.retain(|bolt| !bolt.is_dead());
    }

    pub fn bolts(&self) -> &[LightningBolt] {
        &self.bolts
    }
}

/// Uniform-ish random unit direction; re-rolls the rare degenerate sample
fn random_unit(rng: &mut impl Rng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0f32),
            rng.gen_range(-1.0..1.0f32),
            rng.gen_range(-1.0..1.0f32),
        );
        if v.length_squared() > 1e-6 {
            return v.normalized();
        }
    }
}
