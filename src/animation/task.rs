//! In-flight property animations.

use std::fmt;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::animation::sequencer::SequenceId;
use crate::animation::transform_anim::TransformAnimation;
use crate::foundation::core::ObjectId;
use crate::scene::object::PropValue;
use crate::style::color::Color;

/// Relative clock slack when checking whether a task reached its end.
const END_TOLERANCE: f64 = 1e-9;

/// Clock slack at `time`: how close to its end a task must be to count as finished.
pub(crate) fn end_tolerance(time: f64) -> f64 {
    END_TOLERANCE * time.abs().max(1.0)
}

/// Called with `(value, value_progress, duration_progress)`.
pub type AnimationCallback = Rc<dyn Fn(&PropValue, f64, f64)>;
/// Same arguments as [`AnimationCallback`]; returning `true` stops the task before the value
/// is applied.
pub type AbortPredicate = Rc<dyn Fn(&PropValue, f64, f64) -> bool>;

/// Registry-unique handle of a task.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TaskId(pub u64);

/// Configuration shared by every property of one `animate` call.
#[derive(Clone)]
pub struct AnimationOptions {
    /// Seconds.
    pub duration: f64,
    pub easing: Ease,
    /// Overrides the object's current value as the start value.
    pub start_value: Option<PropValue>,
    pub on_change: Option<AnimationCallback>,
    pub on_complete: Option<AnimationCallback>,
    pub abort: Option<AbortPredicate>,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration: 0.5,
            easing: Ease::default(),
            start_value: None,
            on_change: None,
            on_complete: None,
            abort: None,
        }
    }
}

impl fmt::Debug for AnimationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("start_value", &self.start_value)
            .field("on_change", &self.on_change.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("abort", &self.abort.is_some())
            .finish()
    }
}

impl AnimationOptions {
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_easing(mut self, easing: Ease) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_start_value(mut self, value: impl Into<PropValue>) -> Self {
        self.start_value = Some(value.into());
        self
    }

    pub fn on_change(mut self, f: impl Fn(&PropValue, f64, f64) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl Fn(&PropValue, f64, f64) + 'static) -> Self {
        self.on_complete = Some(Rc::new(f));
        self
    }

    pub fn abort_when(mut self, f: impl Fn(&PropValue, f64, f64) -> bool + 'static) -> Self {
        self.abort = Some(Rc::new(f));
        self
    }
}

/// Value strategy of a task, chosen from the property and the end value.
#[derive(Clone, Debug, PartialEq)]
pub enum Interpolation {
    Number { start: f64, delta: f64 },
    List { start: Vec<f64>, delta: Vec<f64> },
    /// Channel-wise RGBA, serialized back to `rgba(...)` text.
    Color { start: Color, end: Color },
    Transform(TransformAnimation),
}

impl Interpolation {
    pub fn value_at(&self, elapsed: f64, duration: f64, easing: Ease) -> PropValue {
        match self {
            Self::Number { start, delta } => {
                PropValue::Number(easing.interpolate(elapsed, *start, *delta, duration))
            }
            Self::List { start, delta } => PropValue::List(
                start
                    .iter()
                    .zip(delta)
                    .map(|(s, d)| easing.interpolate(elapsed, *s, *d, duration))
                    .collect(),
            ),
            Self::Color { start, end } => {
                let t = easing.interpolate(elapsed, 0.0, 1.0, duration);
                PropValue::Text(start.lerp(end, t).to_rgba_string())
            }
            Self::Transform(anim) => PropValue::Matrix(anim.value_at(elapsed, duration, easing)),
        }
    }
}

/// One running interpolation, owned by an [`crate::AnimationRegistry`].
#[derive(Clone)]
pub struct AnimationTask {
    pub(crate) id: TaskId,
    pub(crate) target: ObjectId,
    pub(crate) key: String,
    pub(crate) interpolation: Interpolation,
    pub(crate) duration: f64,
    pub(crate) easing: Ease,
    /// Registry clock time at which the task starts.
    pub(crate) start_time: f64,
    pub(crate) progress: f64,
    pub(crate) on_change: Option<AnimationCallback>,
    pub(crate) on_complete: Option<AnimationCallback>,
    pub(crate) abort: Option<AbortPredicate>,
    pub(crate) sequence: Option<SequenceId>,
}

impl fmt::Debug for AnimationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationTask")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("key", &self.key)
            .field("interpolation", &self.interpolation)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("start_time", &self.start_time)
            .field("progress", &self.progress)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

/// What one tick computed for a task.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TaskFrame {
    pub(crate) value: PropValue,
    pub(crate) value_progress: f64,
    pub(crate) duration_progress: f64,
    pub(crate) finished: bool,
}

impl AnimationTask {
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn target(&self) -> ObjectId {
        self.target
    }

    /// Property name or dotted key path being animated.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn easing(&self) -> Ease {
        self.easing
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration.max(0.0)
    }

    /// Fraction of the duration covered at the last tick.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn interpolation(&self) -> &Interpolation {
        &self.interpolation
    }

    /// Sequence this task is a step of, if any.
    pub fn sequence(&self) -> Option<SequenceId> {
        self.sequence
    }

    /// Steps start at computed times, so a task counts as finished once the clock is within
    /// rounding distance of its end.
    pub(crate) fn frame_at(&self, now: f64) -> TaskFrame {
        let finished = now + end_tolerance(now) >= self.end_time();
        let elapsed = if finished {
            self.duration.max(0.0)
        } else {
            (now - self.start_time).clamp(0.0, self.duration.max(0.0))
        };
        let duration_progress = if self.duration > 0.0 {
            elapsed / self.duration
        } else {
            1.0
        };
        TaskFrame {
            value: self
                .interpolation
                .value_at(elapsed, self.duration, self.easing),
            value_progress: self.easing.interpolate(elapsed, 0.0, 1.0, self.duration),
            duration_progress,
            finished,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/task.rs"]
mod tests;
