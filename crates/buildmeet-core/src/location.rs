//! Live position feed, marshaled onto the interaction thread.
//!
//! Position fixes originate on whatever thread the platform location
//! callback runs on. The producer half is `Send` and pushes into a channel;
//! the screen drains the consumer half during its tick, so shared state is
//! only ever mutated on the interaction thread.

use crate::geo::GeoPoint;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};

/// Producer half handed to the thread sourcing position fixes.
#[derive(Debug, Clone)]
pub struct LocationHandle {
    tx: Sender<GeoPoint>,
}

impl LocationHandle {
    /// Push a fix. Silently dropped once the feed is gone.
    pub fn push(&self, coordinate: GeoPoint) {
        if self.tx.send(coordinate).is_err() {
            log::debug!("location feed closed; fix dropped");
        }
    }
}

/// Consumer half owned by the screen.
#[derive(Debug)]
pub struct LocationFeed {
    tx: Sender<GeoPoint>,
    rx: Receiver<GeoPoint>,
}

impl Default for LocationFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationFeed {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    /// A new producer handle for this feed.
    pub fn handle(&self) -> LocationHandle {
        LocationHandle { tx: self.tx.clone() }
    }

    /// Drain every fix pushed since the last call, oldest first.
    pub fn poll(&self) -> Vec<GeoPoint> {
        let mut fixes = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(coordinate) => fixes.push(coordinate),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        fixes
    }

    /// The most recent pending fix, discarding older ones.
    pub fn latest(&self) -> Option<GeoPoint> {
        self.poll().pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_poll_drains_in_order() {
        let feed = LocationFeed::new();
        let handle = feed.handle();

        handle.push(GeoPoint::new(1.0, 1.0));
        handle.push(GeoPoint::new(2.0, 2.0));

        let fixes = feed.poll();
        assert_eq!(fixes.len(), 2);
        assert!((fixes[0].latitude - 1.0).abs() < f64::EPSILON);
        assert!((fixes[1].latitude - 2.0).abs() < f64::EPSILON);
        assert!(feed.poll().is_empty());
    }

    #[test]
    fn test_latest_discards_stale_fixes() {
        let feed = LocationFeed::new();
        let handle = feed.handle();

        handle.push(GeoPoint::new(1.0, 1.0));
        handle.push(GeoPoint::new(2.0, 2.0));
        handle.push(GeoPoint::new(3.0, 3.0));

        let latest = feed.latest().unwrap();
        assert!((latest.latitude - 3.0).abs() < f64::EPSILON);
        assert!(feed.latest().is_none());
    }

    #[test]
    fn test_fixes_cross_threads() {
        let feed = LocationFeed::new();
        let handle = feed.handle();

        let producer = thread::spawn(move || {
            handle.push(GeoPoint::new(37.7749, -122.4194));
        });
        producer.join().unwrap();

        let fixes = feed.poll();
        assert_eq!(fixes.len(), 1);
    }

    #[test]
    fn test_push_after_feed_dropped_is_silent() {
        let feed = LocationFeed::new();
        let handle = feed.handle();
        drop(feed);

        handle.push(GeoPoint::new(0.0, 0.0));
    }
}
