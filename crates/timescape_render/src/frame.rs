//! Per-frame orchestration
//!
//! One [`FrameRenderer::render`] call is one engine tick. The draw order
//! is fixed: capture machine first, background and depth reset, art-buffer
//! accumulation and compositing, stars, interaction, hand overlays, then
//! the live tesseract. The art buffer deliberately consumes the previous
//! frame's interaction state while the live view uses the fresh one, which
//! matches where each sits relative to the interaction update.

use std::path::PathBuf;
use std::time::Instant;

use rand::Rng;

use timescape_core::{CapturePhase, CaptureStateMachine, CaptureTransition};
use timescape_input::{landmarks, FreeLookCamera, HandPose, InteractionController};
use timescape_particles::{LightningSystem, StarField};

use crate::color::Color;
use crate::layers;
use crate::surface::Surface;
use crate::tesseract::TesseractLayer;
use crate::viewport::Viewport;

/// Alpha of the full-screen black quad that produces motion trails
const TRAIL_FADE_ALPHA: f32 = 0.1;

/// What one tick produced
pub struct FrameOutput {
    /// Path of a snapshot written this frame, if the recording ended
    pub saved: Option<PathBuf>,
    /// Whether mouse-drag free look may consume input this frame
    pub free_look_active: bool,
}

/// Owns the two render targets and the fixed draw order
pub struct FrameRenderer {
    live: Surface,
    art: Surface,
    live_viewport: Viewport,
    art_viewport: Viewport,
    tesseract: TesseractLayer,
    input_size: (f32, f32),
    tick: u64,
}

impl FrameRenderer {
    /// Create the live surface plus an art buffer `art_multiplier` times
    /// larger, so trails can run past the visible edges of the snapshot
    pub fn new(
        width: u32,
        height: u32,
        art_multiplier: u32,
        tesseract: TesseractLayer,
        input_size: (f32, f32),
    ) -> Self {
        let art_w = width * art_multiplier.max(1);
        let art_h = height * art_multiplier.max(1);
        let mut art = Surface::new(art_w, art_h);
        art.clear_transparent();

        Self {
            live: Surface::new(width, height),
            art,
            live_viewport: Viewport::new(width, height),
            art_viewport: Viewport::new(art_w, art_h),
            tesseract,
            input_size,
            tick: 0,
        }
    }

    /// The composited live view, ready for presentation
    pub fn live(&self) -> &Surface {
        &self.live
    }

    /// Mutable live view for overlays drawn after the scene (HUD)
    pub fn live_mut(&mut self) -> &mut Surface {
        &mut self.live
    }

    /// The accumulating art buffer
    pub fn art(&self) -> &Surface {
        &self.art
    }

    /// Advance and draw one frame
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        capture: &mut CaptureStateMachine,
        interaction: &mut InteractionController,
        stars: &mut StarField,
        lightning: &mut LightningSystem,
        free_look: &FreeLookCamera,
        hands: &[HandPose],
        now: Instant,
        dt: f32,
        rng: &mut impl Rng,
    ) -> FrameOutput {
        let mut saved = None;

        // Capture lifecycle first; everything below reads its opacity
        match capture.update(now) {
            CaptureTransition::RecordingStarted | CaptureTransition::Finished => {
                self.art.clear_transparent();
                self.art.reset_depth();
            }
            CaptureTransition::SaveRequested { path } => {
                match self.art.save_png(&path) {
                    Ok(()) => {
                        log::info!("Snapshot saved to {}", path.display());
                        saved = Some(path);
                    }
                    // A failed write must not stall the lifecycle
                    Err(e) => log::error!("Failed to save snapshot {}: {}", path.display(), e),
                }
            }
            CaptureTransition::None => {}
        }
        let opacity = capture.scene_opacity();
        let view = (free_look.yaw(), free_look.pitch());

        // Background: opaque while the scene is hidden or hiding, a faint
        // black quad otherwise so moving geometry leaves trails
        if matches!(
            capture.phase(),
            CapturePhase::Active | CapturePhase::Entering
        ) {
            self.live.clear(Color::BLACK);
        } else {
            self.live.overlay(Color::BLACK.with_alpha(TRAIL_FADE_ALPHA));
        }
        self.live.reset_depth();

        // Art buffer: accumulate while recording, composite while it shows
        match capture.phase() {
            CapturePhase::Active => {
                if !hands.is_empty() {
                    self.tesseract.advance(dt);
                    self.tesseract.draw(
                        &mut self.art,
                        &self.art_viewport,
                        view,
                        interaction.rotation(),
                        interaction.scale(),
                        100.0,
                        self.tick,
                    );
                }
                self.live.composite_centered(&self.art, 1.0);
            }
            CapturePhase::Exiting => {
                // The frozen trails dissolve as the scene fades back in
                self.live.composite_centered(&self.art, 1.0 - opacity / 100.0);
            }
            _ => {}
        }

        // Stars, driven by the previous frame's zoom delta
        if opacity > 0.0 {
            stars.advance(interaction.zoom_speed());
            layers::draw_stars(
                &mut self.live,
                &self.live_viewport,
                view,
                stars,
                opacity,
                interaction.zoom_speed(),
                rng,
            );
        }

        // Interaction smoothing and the fist-hold trigger
        if interaction.update(hands, capture.is_idle(), now, dt) {
            capture.trigger(now);
        }

        // Hand overlays, lightning and the hold ring
        if opacity > 0.0 {
            layers::draw_neon_hands(
                &mut self.live,
                &self.live_viewport,
                view,
                hands,
                self.input_size,
                opacity,
            );

            for hand in hands {
                for &tip in &landmarks::FINGERTIPS {
                    let world = self.live_viewport.map_detector(
                        hand.keypoint(tip),
                        self.input_size.0,
                        self.input_size.1,
                    );
                    lightning.maybe_spawn(world, rng);
                }
            }
            lightning.advance();
            layers::draw_lightning(&mut self.live, &self.live_viewport, view, lightning, opacity);

            if let (Some(progress), Some(index)) =
                (interaction.hold_progress(now), interaction.hold_hand())
            {
                if let Some(hand) = hands.get(index) {
                    layers::draw_hold_ring(
                        &mut self.live,
                        &self.live_viewport,
                        view,
                        hand,
                        self.input_size,
                        progress,
                        self.tick,
                    );
                }
            }
        }

        // Live tesseract on top of everything else
        if !capture.is_active() && !hands.is_empty() && opacity > 0.0 {
            self.live.reset_depth();
            self.tesseract.advance(dt);
            self.tesseract.draw(
                &mut self.live,
                &self.live_viewport,
                view,
                interaction.rotation(),
                interaction.scale(),
                opacity,
                self.tick,
            );
        }

        self.tick += 1;

        FrameOutput {
            saved,
            free_look_active: capture.is_idle() && hands.is_empty(),
        }
    }
}
