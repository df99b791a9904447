//! Latest-observation pose channel
//!
//! The landmark detector runs at its own cadence, often slower than the
//! render loop. Only the newest delivery matters, so the channel is a
//! drain-and-keep-last wrapper over `mpsc`: the render tick reads the most
//! recent hand set without ever blocking, and a slow detector simply means
//! the same set is read again.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::pose::HandPose;

/// Whether the detector has delivered anything yet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorStatus {
    /// No delivery received; rendering proceeds with an empty hand set
    Loading,
    /// At least one delivery has arrived
    Ready,
}

/// Sending half handed to the detector callback
#[derive(Clone)]
pub struct PoseSender {
    tx: Sender<Vec<HandPose>>,
}

impl PoseSender {
    /// Replace the active hand set. Never blocks; a dropped receiver is
    /// ignored since the app is shutting down at that point.
    pub fn send(&self, hands: Vec<HandPose>) {
        let _ = self.tx.send(hands);
    }
}

/// Receiving half owned by the render loop
pub struct PoseReceiver {
    rx: Receiver<Vec<HandPose>>,
    latest: Vec<HandPose>,
    status: DetectorStatus,
}

impl PoseReceiver {
    /// Drain pending deliveries and return the newest hand set.
    ///
    /// Stale-but-available: with nothing pending, the previous set is
    /// returned unchanged.
    pub fn latest(&mut self) -> &[HandPose] {
        for hands in self.rx.try_iter() {
            self.latest = hands;
            self.status = DetectorStatus::Ready;
        }
        &self.latest
    }

    pub fn status(&self) -> DetectorStatus {
        self.status
    }
}

/// Create a connected sender/receiver pair
pub fn pose_channel() -> (PoseSender, PoseReceiver) {
    let (tx, rx) = mpsc::channel();
    (
        PoseSender { tx },
        PoseReceiver {
            rx,
            latest: Vec::new(),
            status: DetectorStatus::Loading,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_loading_and_empty() {
        let (_tx, mut rx) = pose_channel();
        assert_eq!(rx.status(), DetectorStatus::Loading);
        assert!(rx.latest().is_empty());
    }

    #[test]
    fn test_keeps_newest_delivery() {
        let (tx, mut rx) = pose_channel();
        tx.send(vec![HandPose::default()]);
        tx.send(vec![HandPose::default(), HandPose::default()]);
        assert_eq!(rx.latest().len(), 2);
        assert_eq!(rx.status(), DetectorStatus::Ready);
    }

    #[test]
    fn test_stale_read_returns_previous_set() {
        let (tx, mut rx) = pose_channel();
        tx.send(vec![HandPose::default()]);
        assert_eq!(rx.latest().len(), 1);
        // No new delivery: the old set is still readable
        assert_eq!(rx.latest().len(), 1);
    }
}
