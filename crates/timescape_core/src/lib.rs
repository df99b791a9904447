//! Core lifecycle types for the Timescape engine
//!
//! This crate owns the capture state machine and the snapshot counter:
//!
//! - [`CapturePhase`] - Idle / Entering / Active / Exiting
//! - [`CaptureStateMachine`] - wall-clock driven phase transitions and the
//!   scene opacity ramp
//! - [`CaptureTransition`] - what the frame loop must do after a tick
//! - [`CounterStore`] - persistence seam for the snapshot counter
//! - [`FileCounterStore`] / [`MemoryCounterStore`] - disk and test stores

mod capture;
mod counter;

pub use capture::{CapturePhase, CaptureStateMachine, CaptureTransition};
pub use counter::{CounterStore, FileCounterStore, MemoryCounterStore};
