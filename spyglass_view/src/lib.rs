// Copyright 2026 the Spyglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=spyglass_view --heading-base-level=0

//! Spyglass View: the view-transform value model for a pan/zoom image view.
//!
//! This crate provides a small, headless model of the transform an image view
//! applies to its content: a uniform scale, a position offset in widget
//! coordinates, and the pivot point of the most recent zoom. It focuses on:
//! - [`ViewState`], an immutable snapshot of that transform.
//! - Pivot-preserving zoom math ([`ViewState::zoomed_about`]).
//! - The [`View`] trait through which a gesture layer reads and commits
//!   transforms.
//!
//! It does **not** own any visual element or rendering backend. Callers are
//! expected to:
//! - Implement [`View`] on whatever owns their pixels and report the natural
//!   image dimensions through it.
//! - Drive transform updates from a higher layer (for example
//!   `spyglass_gestures`).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use spyglass_view::ViewState;
//!
//! // 200x200 image at its natural size, untranslated.
//! let state = ViewState::default();
//! let image = Size::new(200.0, 200.0);
//!
//! // Zoom in 10% around (150, 100); the image pixel under that point
//! // stays put.
//! let pivot = Point::new(150.0, 100.0);
//! let before = state.image_point_at(pivot);
//! let zoomed = state.zoomed_about(image, pivot, state.scale * 1.1);
//! let after = zoomed.image_point_at(pivot);
//! assert!((before - after).hypot() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - [`ViewState`] is a `Copy` value. [`View::set_state`] always receives a
//!   freshly constructed state, so a retrieved snapshot can never alias a
//!   later mutation.
//! - The scale is clamped to [`SCALE_MIN`]`..=`[`SCALE_MAX`] on every path
//!   that constructs a state; out-of-range requests are saturated, not
//!   rejected.
//! - Rotation is intentionally left out; the transform is axis-aligned with
//!   a uniform scale.
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Point, Size, Vec2};

/// Smallest committable scale factor.
pub const SCALE_MIN: f64 = 0.02;

/// Largest committable scale factor.
pub const SCALE_MAX: f64 = 10.0;

/// Clamps a requested scale into the committable range.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(SCALE_MIN, SCALE_MAX)
}

/// Immutable snapshot of an image view's transform.
///
/// `position` is the offset of the image origin in widget coordinates at the
/// current scale. `pivot` records the widget-space anchor of the last zoom;
/// it is diagnostic state and does not participate in coordinate conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Uniform scale factor, always within [`SCALE_MIN`]`..=`[`SCALE_MAX`].
    pub scale: f64,
    /// Offset of the image origin in widget coordinates.
    pub position: Vec2,
    /// Widget-space anchor point of the most recent zoom.
    pub pivot: Point,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            position: Vec2::ZERO,
            pivot: Point::ORIGIN,
        }
    }
}

impl ViewState {
    /// Creates a state with the scale clamped into the committable range.
    #[must_use]
    pub fn new(scale: f64, position: Vec2, pivot: Point) -> Self {
        Self {
            scale: clamp_scale(scale),
            position,
            pivot,
        }
    }

    /// Returns the image-space coordinate currently under a widget-space point.
    #[must_use]
    pub fn image_point_at(&self, widget_point: Point) -> Point {
        let origin = (widget_point - self.position).to_vec2();
        (origin / self.scale).to_point()
    }

    /// Returns this state zoomed to `new_scale` around `target`.
    ///
    /// The position is recomputed so that the image pixel under `target`
    /// remains visually stationary across the zoom, and `target` is recorded
    /// as the new pivot. `new_scale` is clamped into
    /// [`SCALE_MIN`]`..=`[`SCALE_MAX`]; `image_size` is the natural pixel
    /// size of the content and must be non-degenerate.
    #[must_use]
    pub fn zoomed_about(self, image_size: Size, target: Point, new_scale: f64) -> Self {
        let new_scale = clamp_scale(new_scale);

        // Touch position relative to the image origin at the current scale.
        let origin = (target - self.position).to_vec2();
        // The same touch position as a fraction of the scaled image.
        let scaled = image_size.to_vec2() * self.scale;
        let fraction = Vec2::new(origin.x / scaled.x, origin.y / scaled.y);
        // Re-derive the offset so the fraction lands back under `target`
        // at the new scale.
        let rescaled = image_size.to_vec2() * new_scale;
        let shift = origin - Vec2::new(rescaled.x * fraction.x, rescaled.y * fraction.y);

        Self {
            scale: new_scale,
            position: self.position + shift,
            pivot: target,
        }
    }
}

/// The rendering collaborator a gesture layer drives.
///
/// Implementors own the visual element, apply committed transforms to pixels
/// at their own pace, and report the natural dimensions of the loaded image.
pub trait View {
    /// Returns the current transform snapshot.
    fn state(&self) -> ViewState;

    /// Commits a new transform.
    fn set_state(&mut self, state: ViewState);

    /// Returns the natural pixel dimensions of the loaded image.
    fn image_size(&self) -> Size;
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{SCALE_MAX, SCALE_MIN, ViewState, clamp_scale};

    #[test]
    fn default_state_is_identity() {
        let state = ViewState::default();
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.position, Vec2::ZERO);
        assert_eq!(state.pivot, Point::ORIGIN);
    }

    #[test]
    fn constructor_and_helper_clamp_scale() {
        assert_eq!(clamp_scale(0.0), SCALE_MIN);
        assert_eq!(clamp_scale(1e6), SCALE_MAX);
        assert_eq!(clamp_scale(3.5), 3.5);

        let state = ViewState::new(-2.0, Vec2::ZERO, Point::ORIGIN);
        assert_eq!(state.scale, SCALE_MIN);
    }

    #[test]
    fn zoomed_about_clamps_requested_scale() {
        let image = Size::new(200.0, 200.0);
        let state = ViewState::default();

        let out = state.zoomed_about(image, Point::new(10.0, 10.0), 1e9);
        assert_eq!(out.scale, SCALE_MAX);

        let out = state.zoomed_about(image, Point::new(10.0, 10.0), -1.0);
        assert_eq!(out.scale, SCALE_MIN);
    }

    #[test]
    fn zoomed_about_keeps_pivot_pixel_fixed() {
        let image = Size::new(200.0, 200.0);
        let mut state = ViewState::new(1.0, Vec2::new(50.0, 0.0), Point::ORIGIN);
        let pivot = Point::new(150.0, 100.0);

        for factor in [1.1, 0.5, 3.0, 1.0 / 1.1] {
            let before = state.image_point_at(pivot);
            state = state.zoomed_about(image, pivot, state.scale * factor);
            let after = state.image_point_at(pivot);
            assert!(
                (before - after).hypot() < 1e-9,
                "pivot drifted at factor {factor}: {before:?} vs {after:?}"
            );
        }
    }

    #[test]
    fn zoomed_about_records_pivot_and_position() {
        // Worked example: 200x200 image, scale 1 -> 1.1 around (150, 100)
        // from position (50, 0).
        let image = Size::new(200.0, 200.0);
        let state = ViewState::new(1.0, Vec2::new(50.0, 0.0), Point::ORIGIN);

        let out = state.zoomed_about(image, Point::new(150.0, 100.0), 1.1);
        assert!((out.scale - 1.1).abs() < 1e-12);
        assert!((out.position.x - 40.0).abs() < 1e-9);
        assert!((out.position.y - (-10.0)).abs() < 1e-9);
        assert_eq!(out.pivot, Point::new(150.0, 100.0));
    }

    #[test]
    fn image_point_at_inverts_the_transform() {
        let state = ViewState::new(2.0, Vec2::new(-30.0, 12.0), Point::ORIGIN);
        let widget_point = Point::new(70.0, 12.0);
        let image_point = state.image_point_at(widget_point);

        // Forward mapping: image point * scale + position.
        let back = (image_point.to_vec2() * state.scale + state.position).to_point();
        assert!((back - widget_point).hypot() < 1e-9);
    }
}
