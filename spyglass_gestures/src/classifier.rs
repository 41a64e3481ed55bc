// Copyright 2026 the Spyglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture state machine: one [`NormalizedEvent`] in, at most one
//! transform commit out.
//!
//! [`GestureClassifier`] consumes the event stream for one widget and
//! disambiguates the gestures whose signatures overlap:
//!
//! - **drag** — a press followed by displaced moves at contact distance 1.
//! - **pinch-to-zoom** — moves whose contact distance differs from the
//!   distance captured at gesture start.
//! - **double-tap zoom** — two clean taps; steps the scale by
//!   [`DOUBLE_TAP_STEP`].
//! - **one-touch zoom** — tap, press again, then drag vertically
//!   (touch only); drives the scale by [`ONE_TOUCH_ZOOM_RATE`] per image
//!   height.
//! - **wheel zoom** — multiplies or divides the scale by
//!   [`WHEEL_ZOOM_FACTOR`] depending on the dominant spin axis.
//!
//! Classification is an explicit finite-state machine over press/release
//! order rather than a log of past events. Each accepted event advances a
//! phase; displaced moves are classified by the phase they arrive in, and
//! zero-displacement moves (common with imprecise taps) drive the current
//! phase's transform without advancing it.
//!
//! ## Tap disambiguation deadline
//!
//! A lone tap and the first half of a double-tap look identical, so the
//! classifier leans on the host's clock: the first event after a reset hands
//! back a [`DeadlineRequest`], and the host must call
//! [`GestureClassifier::on_deadline`] with it [`DOUBLE_TAP_WINDOW_MS`]
//! milliseconds later. The request carries a generation stamp; any reset in
//! between makes it a no-op, so a deadline armed for an abandoned gesture can
//! never truncate the one that follows it.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use spyglass_gestures::classifier::GestureClassifier;
//! use spyglass_gestures::event::{NormalizedEvent, PointerKind};
//! use spyglass_view::{View, ViewState};
//!
//! struct ImageView {
//!     state: ViewState,
//!     size: Size,
//! }
//!
//! impl View for ImageView {
//!     fn state(&self) -> ViewState {
//!         self.state
//!     }
//!     fn set_state(&mut self, state: ViewState) {
//!         self.state = state;
//!     }
//!     fn image_size(&self) -> Size {
//!         self.size
//!     }
//! }
//!
//! let view = ImageView {
//!     state: ViewState::default(),
//!     size: Size::new(200.0, 200.0),
//! };
//! let mut gestures = GestureClassifier::new(view);
//!
//! // Press, then drag 50px to the right.
//! let deadline =
//!     gestures.handle_event(NormalizedEvent::start(PointerKind::Touch, Point::new(100.0, 100.0)));
//! let _ =
//!     gestures.handle_event(NormalizedEvent::move_to(PointerKind::Touch, Point::new(150.0, 100.0)));
//! assert_eq!(gestures.view().state().position, Vec2::new(50.0, 0.0));
//!
//! // 500ms later the host delivers the armed deadline; the drag has long
//! // been classified, so this only re-arms tap tracking.
//! if let Some(deadline) = deadline {
//!     gestures.on_deadline(deadline);
//! }
//! ```

use kurbo::Point;
use spyglass_view::{View, ViewState};

use crate::event::{EventKind, NormalizedEvent, PointerKind};

/// Scale increment applied by a double-tap.
pub const DOUBLE_TAP_STEP: f64 = 0.2;

/// Multiplicative scale factor for one wheel step.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.1;

/// One-touch zoom rate: scale change per vertical drag of one image height.
pub const ONE_TOUCH_ZOOM_RATE: f64 = 2.0;

/// Milliseconds the host should wait before delivering a [`DeadlineRequest`].
///
/// A double-tap or one-touch zoom must get underway within this window or
/// the pending tap sequence is abandoned.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 500;

/// Where the classifier stands in the press/release order since the last
/// reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Nothing classified since the last reset.
    Idle,
    /// A press is in progress with no completed tap before it.
    Pressed,
    /// One clean tap completed.
    Tapped,
    /// Second press after a clean tap: double-tap and one-touch zoom are
    /// both still possible.
    PressedAgain,
    /// One-touch zoom in progress (touch only).
    OneTouchZoom,
    /// Drag or pinch in progress.
    Moving,
    /// A contact ended outside a tap chain (stray release, drag or pinch
    /// release). The next displaced move re-anchors before dragging.
    Released,
}

/// Generation-stamped handle for the tap-disambiguation check.
///
/// Returned by [`GestureClassifier::handle_event`] when a fresh gesture
/// sequence begins; the host schedules it and calls
/// [`GestureClassifier::on_deadline`] after [`DOUBLE_TAP_WINDOW_MS`]. A
/// request outlived by any history reset is silently ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use = "schedule this and deliver it via `on_deadline` after DOUBLE_TAP_WINDOW_MS"]
pub struct DeadlineRequest {
    generation: u64,
}

/// View-state/event snapshot captured at gesture start; the reference for
/// all delta computation during moves.
#[derive(Clone, Copy, Debug)]
struct Anchor {
    state: ViewState,
    event: NormalizedEvent,
}

/// The gesture state machine for one widget.
///
/// Owns the [`View`] collaborator it drives. One instance per tracked
/// widget; instances share no state. See the [module docs](self) for the
/// event contract.
#[derive(Debug)]
pub struct GestureClassifier<V> {
    view: V,
    phase: Phase,
    pointer: Option<PointerKind>,
    anchor: Option<Anchor>,
    generation: u64,
}

impl<V: View> GestureClassifier<V> {
    /// Creates a classifier driving `view`.
    pub fn new(view: V) -> Self {
        Self {
            view,
            phase: Phase::Idle,
            pointer: None,
            anchor: None,
            generation: 0,
        }
    }

    /// Returns the driven view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Returns the driven view mutably.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Consumes the classifier and hands the view back.
    ///
    /// Any in-flight [`DeadlineRequest`] is inert once the classifier is
    /// gone; there is nothing else to tear down.
    pub fn into_view(self) -> V {
        self.view
    }

    /// Classifies one event, committing at most one transform to the view.
    ///
    /// Events must arrive in chronological order. Returns a
    /// [`DeadlineRequest`] when this event begins a fresh gesture sequence;
    /// the host must deliver it back via
    /// [`on_deadline`](Self::on_deadline) after [`DOUBLE_TAP_WINDOW_MS`].
    pub fn handle_event(&mut self, event: NormalizedEvent) -> Option<DeadlineRequest> {
        // A gesture never spans input modalities.
        if self.pointer.is_some_and(|pointer| pointer != event.pointer) {
            self.reset();
        }

        // The first event after a reset arms the tap-disambiguation check.
        let deadline = self.pointer.is_none().then_some(DeadlineRequest {
            generation: self.generation,
        });

        // A move can only be interpreted relative to a gesture start.
        if event.kind == EventKind::Move && self.anchor.is_none() {
            return deadline;
        }

        // Imprecise taps produce zero-displacement moves. Those still drive
        // the current phase's transform, but never advance the phase.
        let accepted = event.kind != EventKind::Move
            || self
                .anchor
                .is_some_and(|anchor| event.target != anchor.event.target);
        if accepted {
            self.pointer = Some(event.pointer);
        }

        match (self.phase, event.kind) {
            // Second clean tap completed: double-tap zoom at the tap point.
            (Phase::PressedAgain, EventKind::End) => {
                self.reset();
                let scale = self.view.state().scale + DOUBLE_TAP_STEP;
                self.zoom_to(event.target, scale);
            }
            // The driving finger lifted: one-touch zoom is complete.
            (Phase::OneTouchZoom, EventKind::End) => self.reset(),
            // Anything else from the same modality keeps driving the zoom.
            (Phase::OneTouchZoom, EventKind::Start | EventKind::Move) => {
                self.one_touch_zoom(&event);
            }
            // A displaced touch move after tap-then-press arms one-touch zoom.
            (Phase::PressedAgain, EventKind::Move)
                if accepted && event.pointer == PointerKind::Touch =>
            {
                self.phase = Phase::OneTouchZoom;
                self.one_touch_zoom(&event);
            }
            (_, EventKind::Wheel) => {
                self.reset();
                // Prefer the vertical axis; a wheel with no spin on either
                // axis is a no-op.
                let spin = if event.spin_y != 0.0 {
                    event.spin_y
                } else {
                    event.spin_x
                };
                if spin != 0.0 {
                    let scale = self.view.state().scale;
                    let scale = if spin < 0.0 {
                        scale * WHEEL_ZOOM_FACTOR
                    } else {
                        scale / WHEEL_ZOOM_FACTOR
                    };
                    self.zoom_to(event.target, scale);
                }
            }
            (_, EventKind::Move) => {
                self.classify_move(&event, accepted);
            }
            // A fresh press or release: capture the anchor for whatever
            // comes next and advance the tap chain.
            (phase, kind) => {
                self.anchor = Some(Anchor {
                    state: self.view.state(),
                    event,
                });
                self.phase = match (phase, kind) {
                    (Phase::Tapped, EventKind::Start) => Phase::PressedAgain,
                    (_, EventKind::Start) => Phase::Pressed,
                    (Phase::Pressed, EventKind::End) => Phase::Tapped,
                    (_, EventKind::End) => Phase::Released,
                    // Moves and wheels never reach this arm.
                    _ => phase,
                };
            }
        }

        deadline
    }

    /// Delivers a previously armed [`DeadlineRequest`].
    ///
    /// Resets the gesture history unless the request went stale (any reset
    /// since it was armed) or a one-touch zoom is in progress — a slow but
    /// valid one-touch sequence must not be truncated mid-gesture. The
    /// anchor survives, so a drag interrupted by the deadline continues
    /// seamlessly.
    pub fn on_deadline(&mut self, request: DeadlineRequest) {
        if request.generation != self.generation || self.phase == Phase::OneTouchZoom {
            return;
        }
        self.reset();
    }

    /// Drag or pinch, decided by the contact distance.
    fn classify_move(&mut self, event: &NormalizedEvent, accepted: bool) {
        let Some(anchor) = self.anchor else {
            return;
        };

        if event.distance > 1.0 && event.distance != anchor.event.distance {
            // Pinch: scale by the contact-distance ratio since gesture start.
            let scale = anchor.state.scale * (event.distance / anchor.event.distance);
            self.zoom_to(event.target, scale);
        } else {
            // A pinch can end with the fingers lifting at different times.
            // When the surviving contact keeps moving right after a release,
            // re-anchor so the image does not jump to the stale reference.
            let anchor = if accepted && matches!(self.phase, Phase::Tapped | Phase::Released) {
                let fresh = Anchor {
                    state: self.view.state(),
                    event: *event,
                };
                self.anchor = Some(fresh);
                fresh
            } else {
                anchor
            };

            let state = self.view.state();
            let position = anchor.state.position + (event.target - anchor.event.target);
            self.view.set_state(ViewState { position, ..state });
        }

        if accepted {
            self.phase = Phase::Moving;
        }
    }

    /// Vertical displacement from the anchor drives the scale, pivoting on
    /// the anchor's own target point.
    fn one_touch_zoom(&mut self, event: &NormalizedEvent) {
        let Some(anchor) = self.anchor else {
            return;
        };
        let delta = event.target.y - anchor.event.target.y;
        let image_height = self.view.image_size().height;
        let scale = anchor.state.scale + delta * ONE_TOUCH_ZOOM_RATE / image_height;
        self.zoom_to(anchor.event.target, scale);
    }

    /// Commits a zoom to `scale` pivoting on `target`; clamping happens in
    /// the view-state math.
    fn zoom_to(&mut self, target: Point, scale: f64) {
        let image_size = self.view.image_size();
        let state = self.view.state();
        self.view.set_state(state.zoomed_about(image_size, target, scale));
    }

    /// Forgets the gesture history and invalidates any in-flight deadline.
    /// The anchor is deliberately retained.
    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.pointer = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};
    use spyglass_view::{View, ViewState};

    use super::{GestureClassifier, Phase};
    use crate::event::{NormalizedEvent, PointerKind};

    struct FixedView(ViewState);

    impl View for FixedView {
        fn state(&self) -> ViewState {
            self.0
        }
        fn set_state(&mut self, state: ViewState) {
            self.0 = state;
        }
        fn image_size(&self) -> Size {
            Size::new(200.0, 200.0)
        }
    }

    fn classifier() -> GestureClassifier<FixedView> {
        GestureClassifier::new(FixedView(ViewState::default()))
    }

    #[test]
    fn presses_and_releases_walk_the_tap_chain() {
        let mut g = classifier();
        let p = Point::new(10.0, 10.0);

        let _ = g.handle_event(NormalizedEvent::start(PointerKind::Touch, p));
        assert_eq!(g.phase, Phase::Pressed);
        let _ = g.handle_event(NormalizedEvent::end(PointerKind::Touch, p));
        assert_eq!(g.phase, Phase::Tapped);
        let _ = g.handle_event(NormalizedEvent::start(PointerKind::Touch, p));
        assert_eq!(g.phase, Phase::PressedAgain);
        let _ = g.handle_event(NormalizedEvent::end(PointerKind::Touch, p));
        assert_eq!(g.phase, Phase::Idle, "double-tap must reset the chain");
    }

    #[test]
    fn second_finger_press_stays_pressed() {
        let mut g = classifier();
        let _ = g.handle_event(NormalizedEvent::start(PointerKind::Touch, Point::new(0.0, 0.0)));
        let _ = g.handle_event(NormalizedEvent::start(PointerKind::Touch, Point::new(9.0, 0.0)));
        assert_eq!(g.phase, Phase::Pressed);
    }

    #[test]
    fn stray_release_breaks_the_chain() {
        let mut g = classifier();
        let p = Point::new(10.0, 10.0);
        let _ = g.handle_event(NormalizedEvent::start(PointerKind::Touch, p));
        let _ = g.handle_event(NormalizedEvent::end(PointerKind::Touch, p));
        let _ = g.handle_event(NormalizedEvent::end(PointerKind::Touch, p));
        assert_eq!(g.phase, Phase::Released);
    }

    #[test]
    fn displaced_move_leaves_the_chain_for_moving() {
        let mut g = classifier();
        let _ = g.handle_event(NormalizedEvent::start(PointerKind::Touch, Point::new(0.0, 0.0)));
        let _ = g.handle_event(NormalizedEvent::move_to(PointerKind::Touch, Point::new(5.0, 0.0)));
        assert_eq!(g.phase, Phase::Moving);
    }

    #[test]
    fn zero_displacement_move_does_not_advance_the_phase() {
        let mut g = classifier();
        let p = Point::new(10.0, 10.0);
        let _ = g.handle_event(NormalizedEvent::start(PointerKind::Touch, p));
        let _ = g.handle_event(NormalizedEvent::move_to(PointerKind::Touch, p));
        assert_eq!(g.phase, Phase::Pressed);
        // The no-op drag still committed the anchor position back.
        assert_eq!(g.view().state().position, Vec2::ZERO);
    }

    #[test]
    fn modality_switch_resets_history_before_classifying() {
        let mut g = classifier();
        let p = Point::new(10.0, 10.0);
        let _ = g.handle_event(NormalizedEvent::start(PointerKind::Touch, p));
        let _ = g.handle_event(NormalizedEvent::end(PointerKind::Touch, p));
        assert_eq!(g.phase, Phase::Tapped);

        // Mouse press while a touch tap is pending: fresh chain, not
        // `PressedAgain`.
        let _ = g.handle_event(NormalizedEvent::start(PointerKind::Mouse, p));
        assert_eq!(g.phase, Phase::Pressed);
        assert_eq!(g.pointer, Some(PointerKind::Mouse));
    }

    #[test]
    fn deadline_is_armed_once_per_sequence() {
        let mut g = classifier();
        let p = Point::new(10.0, 10.0);
        let first = g.handle_event(NormalizedEvent::start(PointerKind::Touch, p));
        assert!(first.is_some());
        let second = g.handle_event(NormalizedEvent::end(PointerKind::Touch, p));
        assert!(second.is_none());

        // After the deadline resets the history, the next event re-arms.
        g.on_deadline(first.unwrap());
        assert_eq!(g.phase, Phase::Idle);
        let third = g.handle_event(NormalizedEvent::start(PointerKind::Touch, p));
        assert!(third.is_some());
        assert_ne!(third, first, "generations must differ across resets");
    }

    #[test]
    fn anchorless_move_is_dropped() {
        let mut g = classifier();
        let deadline =
            g.handle_event(NormalizedEvent::move_to(PointerKind::Mouse, Point::new(5.0, 5.0)));
        assert!(deadline.is_some(), "the deadline is still armed");
        assert_eq!(g.phase, Phase::Idle);
        assert_eq!(g.view().state(), ViewState::default());
    }
}
