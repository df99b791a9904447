//! Application shell
//!
//! Owns the window, wires the engine components together and runs the
//! frame loop. Key commands: `D` toggles the HUD, `S` manually begins a
//! capture (honored only while idle), `Escape` quits. Hold `Space` to put
//! a simulated hand under the cursor, add the left button for a fist and
//! `Tab` for a mirrored second hand.

use std::time::{Duration, Instant};

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;

use timescape_core::{CaptureStateMachine, FileCounterStore};
use timescape_input::{FreeLookCamera, InteractionController, PoseReceiver, PoseSender, pose_channel};
use timescape_particles::{LightningSystem, StarField};
use timescape_render::{hud, FrameRenderer, TesseractLayer};

use crate::config::AppConfig;
use crate::pose_sim::PoseSimulator;

/// Everything the frame loop touches
pub struct App {
    config: AppConfig,
    window: Window,
    renderer: FrameRenderer,
    capture: CaptureStateMachine,
    interaction: InteractionController,
    stars: StarField,
    lightning: LightningSystem,
    free_look: FreeLookCamera,
    pose_tx: PoseSender,
    pose_rx: PoseReceiver,
    sim: PoseSimulator,
    rng: StdRng,
    show_hud: bool,
    present_buffer: Vec<u32>,
    last_frame: Instant,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, String> {
        let width = config.window.width;
        let height = config.window.height;

        let mut window = Window::new(
            &config.window.title,
            width as usize,
            height as usize,
            WindowOptions::default(),
        )
        .map_err(|e| format!("Failed to create window: {}", e))?;
        window.limit_update_rate(Some(Duration::from_micros(
            1_000_000 / config.window.target_fps.max(1) as u64,
        )));

        let now = Instant::now();
        let mut rng = StdRng::from_entropy();

        // Snapshots land in the configured directory; a missing directory
        // is created up front so the save path only has to write
        if let Err(e) = std::fs::create_dir_all(&config.capture.output_dir) {
            log::warn!(
                "Could not create output directory {}: {}",
                config.capture.output_dir,
                e
            );
        }

        let tesseract = TesseractLayer::new()
            .with_camera_distance(config.projection.camera_distance)
            .with_rotation_increment(config.projection.rotation_increment)
            .with_time_scaled_spin(config.projection.time_scaled_spin);

        let renderer = FrameRenderer::new(
            width,
            height,
            config.capture.art_multiplier,
            tesseract,
            (config.detector.input_width, config.detector.input_height),
        );

        let capture = CaptureStateMachine::new(
            Box::new(FileCounterStore::new(&config.capture.counter_path)),
            now,
        )
        .with_durations(
            Duration::from_millis(config.capture.enter_ms),
            Duration::from_millis(config.capture.record_ms),
            Duration::from_millis(config.capture.exit_ms),
        )
        .with_output_dir(&config.capture.output_dir);

        // Base scale follows the window, a quarter of the short side
        let base_scale = (width.min(height) as f32) / 4.0;
        let interaction = InteractionController::new(base_scale)
            .with_input_size(config.detector.input_width, config.detector.input_height)
            .with_smoothing_factor(config.interaction.smoothing_factor)
            .with_time_scaled_smoothing(config.interaction.time_scaled_smoothing)
            .with_hold_duration(Duration::from_millis(config.interaction.hold_ms))
            .with_cooldown(Duration::from_millis(config.interaction.cooldown_ms));

        let stars = StarField::new(
            config.particles.star_count,
            width as f32,
            height as f32,
            &mut rng,
        );
        let lightning =
            LightningSystem::new().with_spawn_probability(config.particles.lightning_probability);

        let (pose_tx, pose_rx) = pose_channel();
        let sim = PoseSimulator::new(
            config.detector.input_width,
            config.detector.input_height,
            config.detector.sim_cadence,
        );

        let show_hud = config.debug.show_overlay;

        Ok(Self {
            config,
            window,
            renderer,
            capture,
            interaction,
            stars,
            lightning,
            free_look: FreeLookCamera::new(),
            pose_tx,
            pose_rx,
            sim,
            rng,
            show_hud,
            present_buffer: Vec::new(),
            last_frame: now,
        })
    }

    /// Run until the window closes or Escape is pressed
    pub fn run(&mut self) {
        let width = self.config.window.width as usize;
        let height = self.config.window.height as usize;

        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            let now = Instant::now();
            // Cap dt so a stall does not fling the time-scaled variants
            let dt = (now - self.last_frame).as_secs_f32().min(1.0 / 30.0);
            self.last_frame = now;

            if self.window.is_key_pressed(Key::D, KeyRepeat::No) {
                self.show_hud = !self.show_hud;
            }
            if self.window.is_key_pressed(Key::S, KeyRepeat::No) {
                // Manual trigger, honored only while idle
                self.capture.trigger(now);
            }

            // Simulated detector delivery (replaces the camera callback)
            let cursor = self.window.get_mouse_pos(MouseMode::Clamp);
            let hand_active = self.window.is_key_down(Key::Space);
            let fist = hand_active && self.window.get_mouse_down(MouseButton::Left);
            let second_hand = hand_active && self.window.is_key_down(Key::Tab);
            self.sim.update(
                cursor,
                (width as f32, height as f32),
                hand_active,
                fist,
                second_hand,
                &self.pose_tx,
            );

            let hands = self.pose_rx.latest().to_vec();

            let output = self.renderer.render(
                &mut self.capture,
                &mut self.interaction,
                &mut self.stars,
                &mut self.lightning,
                &self.free_look,
                &hands,
                now,
                dt,
                &mut self.rng,
            );

            // Free look consumes the mouse only when idle with no hands
            if output.free_look_active && !hand_active && self.window.get_mouse_down(MouseButton::Left)
            {
                if let Some((x, y)) = cursor {
                    self.free_look.drag(x, y);
                }
            } else {
                self.free_look.end_drag();
            }

            if self.show_hud {
                hud::draw_overlay(
                    self.renderer.live_mut(),
                    self.pose_rx.status(),
                    self.capture.phase(),
                    self.capture.counter(),
                );
            }

            self.renderer.live().to_argb(&mut self.present_buffer);
            if let Err(e) = self
                .window
                .update_with_buffer(&self.present_buffer, width, height)
            {
                log::warn!("Framebuffer update failed: {}", e);
            }
        }

        log::info!("Shutting down");
    }
}
