// Copyright 2026 the Spyglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=spyglass_gestures --heading-base-level=0

//! Spyglass Gestures: classify normalized pointer input into pan/zoom
//! gestures for an image view.
//!
//! This crate is the translation layer between a stream of device-agnostic
//! input notifications and a 2D view transform. It consumes
//! [`NormalizedEvent`](event::NormalizedEvent) values — produced by an
//! external input normalizer — one at a time, recognizes which gesture is in
//! progress, and commits the resulting transform through the
//! [`View`](spyglass_view::View) contract:
//!
//! - [`event`]: the [`NormalizedEvent`](event::NormalizedEvent) schema and
//!   its modality/kind enums.
//! - [`classifier`]: the [`GestureClassifier`](classifier::GestureClassifier)
//!   state machine recognizing drag, pinch-to-zoom, double-tap zoom,
//!   one-touch zoom, and wheel zoom.
//!
//! ## Design Philosophy
//!
//! The classifier is headless and single-threaded. It does not subscribe to
//! platform input, own a clock, or render anything:
//!
//! - **Events are pushed in**: the embedder's normalizer calls
//!   [`handle_event`](classifier::GestureClassifier::handle_event) in
//!   chronological order, one widget per classifier instance.
//! - **Time is borrowed from the host**: tap disambiguation needs a single
//!   deferred check, expressed as a
//!   [`DeadlineRequest`](classifier::DeadlineRequest) value the host
//!   schedules and hands back.
//! - **Transforms are values**: every commit is a freshly built
//!   [`ViewState`](spyglass_view::ViewState); the scale invariant lives in
//!   `spyglass_view`.
//!
//! ## Feeding the classifier
//!
//! A normalizer reconstructs multi-touch geometry from per-pointer
//! notifications, typically with `spyglass_pointers`:
//!
//! ```rust
//! use kurbo::Point;
//! use spyglass_gestures::event::{NormalizedEvent, PointerKind};
//! use spyglass_pointers::{PointerTracker, contact_distance, midpoint};
//!
//! let mut tracker = PointerTracker::new();
//! tracker.add(1_u64, Point::new(100.0, 100.0));
//! tracker.add(2_u64, Point::new(140.0, 130.0));
//!
//! // Two active contacts become one normalized move event: target at the
//! // midpoint, distance between the contacts.
//! let (a, b) = tracker.pair().unwrap();
//! let event = NormalizedEvent::move_to(PointerKind::Touch, midpoint(a, b))
//!     .with_distance(contact_distance(a, b));
//! assert_eq!(event.distance, 50.0);
//! ```
//!
//! See the [`classifier`] module docs for the full event contract and a
//! driving example.
//!
//! This crate is `no_std`.

#![no_std]

pub mod classifier;
pub mod event;
