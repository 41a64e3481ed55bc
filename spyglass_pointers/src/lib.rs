// Copyright 2026 the Spyglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=spyglass_pointers --heading-base-level=0

//! Spyglass Pointers: active contact tracking for multi-touch gestures.
//!
//! Touch and pen contacts start and end asynchronously, and platform pointer
//! APIs report them one at a time. [`PointerTracker`] keeps the set of
//! currently active contacts for one widget, keyed by the platform's pointer
//! identifier, so that an input normalizer can reconstruct multi-touch
//! geometry (midpoint, contact distance) from single-pointer notifications.
//!
//! ## Usage
//!
//! 1) On a pointer-down notification, call [`PointerTracker::add`].
//! 2) On a pointer-move notification, call [`PointerTracker::update`].
//! 3) On pointer-up/cancel, call [`PointerTracker::remove`].
//! 4) Snapshot the active contacts with [`PointerTracker::contacts`] or
//!    [`PointerTracker::pair`] and derive the gesture geometry with
//!    [`midpoint`] and [`contact_distance`].
//!
//! ```rust
//! use kurbo::Point;
//! use spyglass_pointers::{PointerTracker, contact_distance, midpoint};
//!
//! let mut tracker = PointerTracker::new();
//! tracker.add(7_u64, Point::new(10.0, 10.0));
//! tracker.add(9_u64, Point::new(40.0, 50.0));
//!
//! let (a, b) = tracker.pair().unwrap();
//! assert_eq!(contact_distance(a, b), 50.0);
//! assert_eq!(midpoint(a, b), Point::new(25.0, 30.0));
//!
//! tracker.remove(7_u64);
//! assert_eq!(tracker.len(), 1);
//! ```
//!
//! The tracker does not interpret events; pairing it with an event source and
//! feeding the derived geometry into `spyglass_gestures` is the caller's
//! business.
//!
//! This crate is `no_std`.

#![no_std]

use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;

/// The set of currently active contacts for one widget.
///
/// Keys are platform pointer identifiers; values are the last known
/// client-space positions. The set size equals the number of physically
/// active contacts between their start and end/cancel notifications.
#[derive(Clone, Debug)]
pub struct PointerTracker<K = u64> {
    contacts: HashMap<K, Point>,
}

impl<K> Default for PointerTracker<K> {
    fn default() -> Self {
        Self {
            contacts: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq + Copy> PointerTracker<K> {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a contact's position, overwriting any previous entry for `id`.
    pub fn add(&mut self, id: K, position: Point) {
        self.contacts.insert(id, position);
    }

    /// Records a new position for an already-tracked contact.
    ///
    /// Identical in effect to [`PointerTracker::add`]; kept as a distinct
    /// call site for "a tracked pointer moved".
    pub fn update(&mut self, id: K, position: Point) {
        self.add(id, position);
    }

    /// Removes the contact for `id`. No-op if it is not tracked.
    pub fn remove(&mut self, id: K) {
        self.contacts.remove(&id);
    }

    /// Returns whether `id` is currently tracked.
    #[must_use]
    pub fn exists(&self, id: K) -> bool {
        self.contacts.contains_key(&id)
    }

    /// Returns the number of active contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Returns whether no contacts are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Drops all tracked contacts.
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    /// Returns a snapshot of all active contact positions.
    ///
    /// Iteration over the current set is deterministic, but no ordering is
    /// guaranteed beyond "first" and "second" observed entries at query time.
    #[must_use]
    pub fn contacts(&self) -> SmallVec<[Point; 2]> {
        self.contacts.values().copied().collect()
    }

    /// Returns the first two active contacts at query time, if present.
    #[must_use]
    pub fn pair(&self) -> Option<(Point, Point)> {
        let mut values = self.contacts.values();
        let first = *values.next()?;
        let second = *values.next()?;
        Some((first, second))
    }
}

/// Returns the point midway between two contacts.
///
/// This is the target point a normalizer reports for a two-finger event.
#[must_use]
pub fn midpoint(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

/// Returns the Euclidean distance between two contacts.
///
/// This is the `distance` a normalizer reports for a two-finger event.
#[must_use]
pub fn contact_distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}
