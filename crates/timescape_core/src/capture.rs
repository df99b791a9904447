//! Capture lifecycle state machine
//!
//! Governs the idle → entering → active → exiting loop of a snapshot and
//! the global scene opacity that fades the live scene out while the art
//! buffer records. All transitions are wall-clock driven and checked once
//! per frame; ramps clamp at their endpoints and never extrapolate.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::counter::CounterStore;

/// Phase of the snapshot lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapturePhase {
    /// Normal interactive rendering, full opacity
    Idle,
    /// Scene fading out before recording begins
    Entering,
    /// Art buffer accumulating, scene invisible
    Active,
    /// Art buffer frozen and fading, scene fading back in
    Exiting,
}

/// What the frame loop must do after a tick
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureTransition {
    /// Nothing changed phase this tick
    None,
    /// Entering finished: clear the art buffer, recording starts now
    RecordingStarted,
    /// Active finished: save the art buffer to `path`, then let it fade
    SaveRequested { path: PathBuf },
    /// Exiting finished: clear the art buffer, back to idle
    Finished,
}

/// Wall-clock driven capture state
pub struct CaptureStateMachine {
    phase: CapturePhase,
    phase_started: Instant,
    scene_opacity: f32,
    counter: u64,
    store: Box<dyn CounterStore>,

    // Configuration
    enter_duration: Duration,
    record_duration: Duration,
    exit_duration: Duration,
    output_dir: PathBuf,
}

impl CaptureStateMachine {
    /// Create an idle machine, loading the persisted snapshot counter once
    pub fn new(store: Box<dyn CounterStore>, now: Instant) -> Self {
        let counter = store.load();
        log::info!("Snapshot counter starts at {}", counter);
        Self {
            phase: CapturePhase::Idle,
            phase_started: now,
            scene_opacity: 100.0,
            counter,
            store,

            enter_duration: Duration::from_millis(1000),
            record_duration: Duration::from_millis(10000),
            exit_duration: Duration::from_millis(2000),
            output_dir: PathBuf::from("."),
        }
    }

    /// Builder: phase durations (enter fade, recording window, exit fade)
    pub fn with_durations(mut self, enter: Duration, record: Duration, exit: Duration) -> Self {
        self.enter_duration = enter;
        self.record_duration = record;
        self.exit_duration = exit;
        self
    }

    /// Builder: directory snapshots are written into
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Request a capture. Honored only while idle; requests during any
    /// other phase are ignored. Both the gesture hold and the manual
    /// command arrive here (the gesture path enforces its own cooldown).
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.phase != CapturePhase::Idle {
            log::debug!("Capture trigger ignored during {:?}", self.phase);
            return false;
        }
        self.phase = CapturePhase::Entering;
        self.phase_started = now;
        log::info!("Capture sequence starting");
        true
    }

    /// Advance the lifecycle one frame
    pub fn update(&mut self, now: Instant) -> CaptureTransition {
        match self.phase {
            CapturePhase::Idle => {
                self.scene_opacity = 100.0;
                CaptureTransition::None
            }
            CapturePhase::Entering => {
                let progress = self.phase_progress(now, self.enter_duration);
                self.scene_opacity = 100.0 * (1.0 - progress);
                if progress >= 1.0 {
                    self.phase = CapturePhase::Active;
                    self.phase_started = now;
                    self.scene_opacity = 0.0;
                    CaptureTransition::RecordingStarted
                } else {
                    CaptureTransition::None
                }
            }
            CapturePhase::Active => {
                self.scene_opacity = 0.0;
                if now.duration_since(self.phase_started) >= self.record_duration {
                    let path = self.snapshot_path();
                    self.counter += 1;
                    if let Err(e) = self.store.store(self.counter) {
                        // Losing the counter is survivable; the lifecycle goes on
                        log::warn!("Failed to persist snapshot counter: {}", e);
                    }
                    self.phase = CapturePhase::Exiting;
                    self.phase_started = now;
                    CaptureTransition::SaveRequested { path }
                } else {
                    CaptureTransition::None
                }
            }
            CapturePhase::Exiting => {
                let progress = self.phase_progress(now, self.exit_duration);
                self.scene_opacity = 100.0 * progress;
                if progress >= 1.0 {
                    self.phase = CapturePhase::Idle;
                    self.scene_opacity = 100.0;
                    CaptureTransition::Finished
                } else {
                    CaptureTransition::None
                }
            }
        }
    }

    /// Elapsed fraction of the current phase, clamped to [0, 1]
    fn phase_progress(&self, now: Instant, duration: Duration) -> f32 {
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.duration_since(self.phase_started).as_secs_f32();
        (elapsed / duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn snapshot_path(&self) -> PathBuf {
        // Offset keeps filenames sorting lexicographically for a long while
        self.output_dir
            .join(format!("timescape_{}.png", 1000 + self.counter))
    }

    /// Current phase
    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == CapturePhase::Idle
    }

    pub fn is_active(&self) -> bool {
        self.phase == CapturePhase::Active
    }

    /// Global scene opacity in [0, 100]
    pub fn scene_opacity(&self) -> f32 {
        self.scene_opacity
    }

    /// Current snapshot counter value
    pub fn counter(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::{FileCounterStore, MemoryCounterStore};

    fn machine(now: Instant) -> CaptureStateMachine {
        CaptureStateMachine::new(Box::new(MemoryCounterStore::new()), now)
    }

    #[test]
    fn test_full_lifecycle() {
        let start = Instant::now();
        let mut capture = machine(start);
        assert!(capture.is_idle());
        assert_eq!(capture.scene_opacity(), 100.0);

        assert!(capture.trigger(start));
        assert_eq!(capture.phase(), CapturePhase::Entering);

        // Mid-fade the opacity is half way down
        let mid = start + Duration::from_millis(500);
        assert_eq!(capture.update(mid), CaptureTransition::None);
        assert!((capture.scene_opacity() - 50.0).abs() < 1.0);

        // Fade complete: recording begins
        let entered = start + Duration::from_millis(1000);
        assert_eq!(capture.update(entered), CaptureTransition::RecordingStarted);
        assert!(capture.is_active());
        assert_eq!(capture.scene_opacity(), 0.0);

        // During recording the opacity is pinned at zero
        let recording = entered + Duration::from_millis(5000);
        assert_eq!(capture.update(recording), CaptureTransition::None);
        assert_eq!(capture.scene_opacity(), 0.0);

        // Recording window elapsed: exactly one save with the pre-increment name
        let done = entered + Duration::from_millis(10000);
        let transition = capture.update(done);
        match transition {
            CaptureTransition::SaveRequested { path } => {
                assert_eq!(path.file_name().unwrap(), "timescape_1001.png");
            }
            other => panic!("expected save request, got {:?}", other),
        }
        assert_eq!(capture.counter(), 2);
        assert_eq!(capture.phase(), CapturePhase::Exiting);

        // Exit fade brings opacity back up
        let half_out = done + Duration::from_millis(1000);
        assert_eq!(capture.update(half_out), CaptureTransition::None);
        assert!((capture.scene_opacity() - 50.0).abs() < 1.0);

        let finished = done + Duration::from_millis(2000);
        assert_eq!(capture.update(finished), CaptureTransition::Finished);
        assert!(capture.is_idle());
        assert_eq!(capture.scene_opacity(), 100.0);
    }

    #[test]
    fn test_trigger_ignored_outside_idle() {
        let start = Instant::now();
        let mut capture = machine(start);
        assert!(capture.trigger(start));

        // Entering
        assert!(!capture.trigger(start + Duration::from_millis(100)));

        // Active
        capture.update(start + Duration::from_millis(1000));
        assert!(capture.is_active());
        assert!(!capture.trigger(start + Duration::from_millis(1500)));

        // Exiting
        capture.update(start + Duration::from_millis(11000));
        assert_eq!(capture.phase(), CapturePhase::Exiting);
        assert!(!capture.trigger(start + Duration::from_millis(11500)));
    }

    #[test]
    fn test_opacity_ramp_is_clamped() {
        let start = Instant::now();
        let mut capture = machine(start).with_durations(
            Duration::from_millis(1000),
            Duration::from_millis(10000),
            Duration::from_millis(2000),
        );
        capture.trigger(start);
        // Way past the fade duration the ramp clamps rather than going negative
        capture.update(start + Duration::from_millis(50000));
        assert_eq!(capture.scene_opacity(), 0.0);
    }

    #[test]
    fn test_counter_survives_via_file_store() {
        let path = std::env::temp_dir().join(format!(
            "timescape_capture_counter_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let start = Instant::now();
        let store = Box::new(FileCounterStore::new(&path));
        let mut capture = CaptureStateMachine::new(store, start)
            .with_output_dir(std::env::temp_dir());
        capture.trigger(start);
        capture.update(start + Duration::from_millis(1000));
        capture.update(start + Duration::from_millis(11000));
        assert_eq!(capture.counter(), 2);

        // A fresh machine over the same file resumes from the stored value
        let reloaded =
            CaptureStateMachine::new(Box::new(FileCounterStore::new(&path)), Instant::now());
        assert_eq!(reloaded.counter(), 2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_custom_durations() {
        let start = Instant::now();
        let mut capture = machine(start).with_durations(
            Duration::from_millis(100),
            Duration::from_millis(200),
            Duration::from_millis(100),
        );
        capture.trigger(start);
        assert_eq!(
            capture.update(start + Duration::from_millis(100)),
            CaptureTransition::RecordingStarted
        );
        assert!(matches!(
            capture.update(start + Duration::from_millis(300)),
            CaptureTransition::SaveRequested { .. }
        ));
        assert_eq!(
            capture.update(start + Duration::from_millis(400)),
            CaptureTransition::Finished
        );
    }
}
