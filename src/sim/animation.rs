//! Frame-based sprite animation
//!
//! Each animated entity owns one [`Animation`] per state. Instead of storing
//! callbacks, a non-looping animation carries an optional *cue* that the
//! [`Animator`] hands back when the animation runs out; the owning entity
//! matches on it to perform the follow-up transition.

use std::collections::HashMap;
use std::hash::Hash;

use crate::assets::ImageName;
use crate::consts::ANIMATION_FRAME_SPEED_MS;

/// An ordered image sequence for one entity state
#[derive(Debug, Clone, PartialEq)]
pub struct Animation<C> {
    images: &'static [ImageName],
    looping: bool,
    on_finish: Option<C>,
}

impl<C: Copy> Animation<C> {
    pub fn new(images: &'static [ImageName], looping: bool, on_finish: Option<C>) -> Self {
        debug_assert!(!images.is_empty(), "animation needs at least one frame");
        Self {
            images,
            looping,
            on_finish,
        }
    }

    /// Animation that wraps back to its first frame forever
    pub fn repeating(images: &'static [ImageName]) -> Self {
        Self::new(images, true, None)
    }

    /// Animation that plays once and then reports `cue`
    pub fn once(images: &'static [ImageName], cue: C) -> Self {
        Self::new(images, false, Some(cue))
    }

    pub fn images(&self) -> &'static [ImageName] {
        self.images
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn on_finish(&self) -> Option<C> {
        self.on_finish
    }
}

/// Outcome of a frame-advance attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep<C> {
    /// No active animation, or not enough time has passed
    Idle,
    /// Moved to the next frame (or wrapped)
    Advanced,
    /// A non-looping animation ran out; carries its cue, if any
    Finished(Option<C>),
}

/// Per-entity animation state: current state tag, active animation,
/// frame index and timing.
#[derive(Debug, Clone)]
pub struct Animator<S, C> {
    state: S,
    animations: HashMap<S, Animation<C>>,
    /// State whose animation is playing; `None` once finished or undefined
    active: Option<S>,
    frame: usize,
    last_frame_time: f64,
    image: ImageName,
}

impl<S, C> Animator<S, C>
where
    S: Copy + Eq + Hash,
    C: Copy,
{
    /// Build an animator and enter `initial` straight away.
    ///
    /// `image` is shown until an animation provides a frame.
    pub fn new(
        initial: S,
        image: ImageName,
        animations: HashMap<S, Animation<C>>,
        now: f64,
    ) -> Self {
        let mut animator = Self {
            state: initial,
            animations,
            active: None,
            frame: 0,
            last_frame_time: now,
            image,
        };
        animator.set_state(initial);
        animator
    }

    pub fn state(&self) -> S {
        self.state
    }

    /// Image currently displayed
    pub fn image(&self) -> ImageName {
        self.image
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn last_frame_time(&self) -> f64 {
        self.last_frame_time
    }

    pub fn animation(&self) -> Option<&Animation<C>> {
        self.active.and_then(|state| self.animations.get(&state))
    }

    pub fn is_animating(&self) -> bool {
        self.animation().is_some()
    }

    /// Enter `state` and restart its animation from the first frame.
    ///
    /// A state with no animation clears the active one and keeps the
    /// current image.
    pub fn set_state(&mut self, state: S) {
        self.state = state;
        self.active = self.animations.contains_key(&state).then_some(state);
        self.frame = 0;
        if let Some(first) = self.animation().map(|animation| animation.images()[0]) {
            self.image = first;
        }
    }

    /// Advance one frame if more than a frame's duration has passed since
    /// the last advance
    pub fn animate(&mut self, now: f64) -> FrameStep<C> {
        if self.active.is_none() {
            return FrameStep::Idle;
        }
        if now - self.last_frame_time > ANIMATION_FRAME_SPEED_MS {
            self.next_frame(now)
        } else {
            FrameStep::Idle
        }
    }

    /// Advance one frame unconditionally
    pub fn next_frame(&mut self, now: f64) -> FrameStep<C> {
        let Some(animation) = self.animation() else {
            return FrameStep::Idle;
        };
        let images = animation.images();
        let looping = animation.looping();
        let cue = animation.on_finish();

        self.last_frame_time = now;
        self.frame += 1;
        if self.frame >= images.len() {
            if !looping {
                // Clearing first guarantees the cue is reported only once
                self.active = None;
                return FrameStep::Finished(cue);
            }
            self.frame = 0;
        }

        self.image = images[self.frame];
        FrameStep::Advanced
    }
}
