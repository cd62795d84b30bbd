//! Horizontal swipe tracking for domain cards.
//!
//! Distance is sampled continuously while the finger is down; a direction is
//! only committed on release, against a fixed threshold.

use crate::config::DEFAULT_SWIPE_THRESHOLD_PX;

/// Committed swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved toward negative x. Advances the view mode.
    Left,
    /// Finger moved toward positive x. Retreats the view mode.
    Right,
}

impl SwipeDirection {
    /// Classifies a released horizontal distance.
    ///
    /// Distances strictly inside `(-threshold, threshold)` are not swipes.
    /// A threshold that is not finite and positive commits nothing.
    pub fn classify(dx: f32, threshold: f32) -> Option<Self> {
        if !dx.is_finite() || !threshold.is_finite() || threshold <= 0.0 {
            return None;
        }
        if dx <= -threshold {
            Some(Self::Left)
        } else if dx >= threshold {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Tracks one in-flight horizontal gesture.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    origin_x: Option<f32>,
    dx: f32,
}

impl SwipeTracker {
    /// Tracker committing past `threshold`. An invalid threshold falls back
    /// to [`DEFAULT_SWIPE_THRESHOLD_PX`].
    pub fn new(threshold: f32) -> Self {
        let threshold = if threshold.is_finite() && threshold > 0.0 {
            threshold
        } else {
            DEFAULT_SWIPE_THRESHOLD_PX
        };
        Self {
            threshold,
            origin_x: None,
            dx: 0.0,
        }
    }

    /// Starts tracking at the touch-down position.
    pub fn begin(&mut self, x: f32) {
        self.origin_x = Some(x);
        self.dx = 0.0;
    }

    /// Records the current finger position. Ignored when not tracking.
    pub fn sample(&mut self, x: f32) {
        if let Some(origin) = self.origin_x {
            self.dx = x - origin;
        }
    }

    /// Current distance from the touch-down position.
    pub fn distance(&self) -> f32 {
        self.dx
    }

    pub fn is_tracking(&self) -> bool {
        self.origin_x.is_some()
    }

    /// Ends the gesture and returns the committed direction, if any.
    pub fn release(&mut self) -> Option<SwipeDirection> {
        self.origin_x.take()?;
        let dx = std::mem::take(&mut self.dx);
        SwipeDirection::classify(dx, self.threshold)
    }

    /// Drops the gesture without committing.
    pub fn cancel(&mut self) {
        self.origin_x = None;
        self.dx = 0.0;
    }
}
