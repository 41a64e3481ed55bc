// Copyright 2026 the Spyglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device-agnostic input notifications.
//!
//! A normalizer sits between the platform's input APIs and the classifier and
//! translates every physical notification — mouse, touch, pen, or wheel —
//! into one [`NormalizedEvent`]. Pen contacts are reported as
//! [`PointerKind::Touch`]; the classifier does not distinguish them.

use kurbo::Point;

/// What a normalized event reports happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// A contact or button went down.
    Start,
    /// A contact or the cursor moved.
    Move,
    /// A contact or button was released or canceled.
    End,
    /// A scroll-wheel or trackpad scroll notification.
    Wheel,
}

/// Which input modality produced an event.
///
/// A gesture never spans modalities; the classifier resets its history when
/// the modality changes mid-stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse buttons and motion.
    Mouse,
    /// Touch or pen contacts.
    Touch,
    /// Scroll-wheel input.
    Wheel,
}

/// One device-agnostic input notification in widget-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedEvent {
    /// What happened.
    pub kind: EventKind,
    /// The modality that produced the event.
    pub pointer: PointerKind,
    /// Target point in widget-local coordinates. For a two-contact touch
    /// event this is the midpoint between the contacts.
    pub target: Point,
    /// `1.0` for single-contact and mouse events; the Euclidean distance
    /// between the two contacts for multi-touch events.
    pub distance: f64,
    /// Signed horizontal scroll direction; meaningful only for wheel events.
    pub spin_x: f64,
    /// Signed vertical scroll direction; meaningful only for wheel events.
    pub spin_y: f64,
}

impl NormalizedEvent {
    fn new(kind: EventKind, pointer: PointerKind, target: Point) -> Self {
        Self {
            kind,
            pointer,
            target,
            distance: 1.0,
            spin_x: 0.0,
            spin_y: 0.0,
        }
    }

    /// A contact or button went down at `target`.
    #[must_use]
    pub fn start(pointer: PointerKind, target: Point) -> Self {
        Self::new(EventKind::Start, pointer, target)
    }

    /// A contact or the cursor moved to `target`.
    #[must_use]
    pub fn move_to(pointer: PointerKind, target: Point) -> Self {
        Self::new(EventKind::Move, pointer, target)
    }

    /// A contact or button was released at `target`.
    #[must_use]
    pub fn end(pointer: PointerKind, target: Point) -> Self {
        Self::new(EventKind::End, pointer, target)
    }

    /// A wheel notification at `target` with signed spin directions.
    #[must_use]
    pub fn wheel(target: Point, spin_x: f64, spin_y: f64) -> Self {
        Self {
            spin_x,
            spin_y,
            ..Self::new(EventKind::Wheel, PointerKind::Wheel, target)
        }
    }

    /// Sets the contact distance reported with this event.
    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }
}
