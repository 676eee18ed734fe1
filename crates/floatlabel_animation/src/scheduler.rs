//! Animation scheduler
//!
//! A single-threaded scheduler for fixed-duration transitions. Owners
//! register a [`Transition`], keep the returned [`AnimationId`], read eased
//! progress while it runs, and advance the clock with [`Animator::tick`].
//! There is no background thread: the host drives time explicitly, which
//! keeps layout deterministic under test.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::easing::Easing;

new_key_type! {
    /// Handle to a registered transition
    pub struct AnimationId;
}

/// Timing parameters for a fixed-duration animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Ease-in-out transition over `seconds`
    pub fn ease_in_out(seconds: f32) -> Self {
        Self::new(whole_millis(seconds), Easing::EaseInOut)
    }

    /// Spring-curve transition over `seconds`
    pub fn spring(seconds: f32, damping_ratio: f32, initial_velocity: f32) -> Self {
        Self::new(
            whole_millis(seconds),
            Easing::spring(damping_ratio, initial_velocity),
        )
    }
}

/// `0.4f32` is not exactly 400ms; round so frame-stepped ticks land on the end
fn whole_millis(seconds: f32) -> Duration {
    Duration::from_millis((seconds.max(0.0) * 1000.0).round() as u64)
}

impl Default for Transition {
    fn default() -> Self {
        Self::ease_in_out(0.25)
    }
}

#[derive(Clone, Debug)]
struct RunningAnimation {
    transition: Transition,
    elapsed: Duration,
}

impl RunningAnimation {
    fn linear_progress(&self) -> f32 {
        if self.transition.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.transition.duration.as_secs_f32()).min(1.0)
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.transition.duration
    }
}

/// Ticks registered transitions and reports which ones completed
#[derive(Debug, Default)]
pub struct Animator {
    animations: SlotMap<AnimationId, RunningAnimation>,
}

impl Animator {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
        }
    }

    /// Register a transition starting at progress 0
    pub fn start(&mut self, transition: Transition) -> AnimationId {
        let id = self.animations.insert(RunningAnimation {
            transition,
            elapsed: Duration::ZERO,
        });
        tracing::debug!(
            "Animator: started {:?} ({:?}, {:?})",
            id,
            transition.duration,
            transition.easing
        );
        id
    }

    /// Eased progress of a running transition
    pub fn progress(&self, id: AnimationId) -> Option<f32> {
        self.animations
            .get(id)
            .map(|anim| anim.transition.easing.apply(anim.linear_progress()))
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.animations.contains_key(id)
    }

    /// Remove a transition without completing it. Returns false if unknown.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        let removed = self.animations.remove(id).is_some();
        if removed {
            tracing::debug!("Animator: cancelled {:?}", id);
        }
        removed
    }

    /// Advance every transition by `dt`; finished ones are removed and returned
    pub fn tick(&mut self, dt: Duration) -> SmallVec<[AnimationId; 4]> {
        let mut finished = SmallVec::new();
        for (id, anim) in self.animations.iter_mut() {
            anim.elapsed = anim.elapsed.saturating_add(dt);
            if anim.is_finished() {
                finished.push(id);
            }
        }
        for id in &finished {
            self.animations.remove(*id);
            tracing::debug!("Animator: finished {:?}", id);
        }
        finished
    }

    pub fn has_running(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}
