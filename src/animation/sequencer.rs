//! Step-wise playback of `<animate>` value lists.
//!
//! A sequence never schedules ahead: the registry asks it for the next step only when the
//! running step's task completes, so dropping the task (or the sequence) stops the chain.

use crate::foundation::core::ObjectId;
use crate::scene::animate_element::RepeatCount;
use crate::scene::object::PropValue;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SequenceId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SequenceState {
    /// A step toward `values[value_index]` is running.
    Playing,
    /// A cycle ended and repeats remain; the first value must be re-applied.
    AwaitingRestart,
    Done,
}

/// Result of [`Sequencer::advance`].
#[derive(Clone, Debug, PartialEq)]
pub enum SequenceStep {
    /// Animate toward this value next.
    Next(PropValue),
    /// The cycle ended; call [`Sequencer::restart`].
    Restart,
    Finished,
}

/// Keyframe state machine for one directive.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequencer {
    target: ObjectId,
    key: String,
    values: Vec<PropValue>,
    step_duration: f64,
    /// `None` plays forever.
    remaining: Option<u32>,
    value_index: usize,
    state: SequenceState,
    /// Clock time at which the first step started.
    started_at: f64,
    /// Completed cycles, skipped ones included.
    cycle: u64,
}

impl Sequencer {
    /// A sequence positioned on its first step (toward `values[1]`).
    ///
    /// `values` needs at least two entries; shorter lists start out [`SequenceState::Done`].
    pub fn new(
        target: ObjectId,
        key: impl Into<String>,
        values: Vec<PropValue>,
        step_duration: f64,
        repeat: RepeatCount,
    ) -> Self {
        let remaining = match repeat {
            RepeatCount::Count(n) => Some(n.max(1)),
            RepeatCount::Indefinite => None,
        };
        let state = if values.len() >= 2 {
            SequenceState::Playing
        } else {
            SequenceState::Done
        };
        Self {
            target,
            key: key.into(),
            values,
            step_duration,
            remaining,
            value_index: 1,
            state,
            started_at: 0.0,
            cycle: 0,
        }
    }

    /// Anchor the schedule: the first step starts at `time`.
    pub fn starting_at(mut self, time: f64) -> Self {
        self.started_at = time;
        self
    }

    pub fn target(&self) -> ObjectId {
        self.target
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn step_duration(&self) -> f64 {
        self.step_duration
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn value_index(&self) -> usize {
        self.value_index
    }

    /// Repeats left including the current one; `None` for indefinite playback.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Scheduled start of the running step.
    ///
    /// Computed from the anchor and the step count rather than summed step by step, so the
    /// last step of a cycle ends at `started_at + cycle_length` up to rounding.
    pub fn step_start(&self) -> f64 {
        let per_cycle = self.values.len().saturating_sub(1) as f64;
        let steps = self.cycle as f64 * per_cycle + self.value_index.saturating_sub(1) as f64;
        self.started_at + steps * self.step_duration
    }

    pub fn first_value(&self) -> Option<&PropValue> {
        self.values.first()
    }

    /// Target value of the running step.
    pub fn current_value(&self) -> Option<&PropValue> {
        match self.state {
            SequenceState::Playing => self.values.get(self.value_index),
            _ => None,
        }
    }

    /// Transition taken when the running step completes.
    pub fn advance(&mut self) -> SequenceStep {
        if self.state != SequenceState::Playing {
            return SequenceStep::Finished;
        }
        self.value_index += 1;
        if let Some(value) = self.values.get(self.value_index) {
            return SequenceStep::Next(value.clone());
        }
        if let Some(n) = self.remaining.as_mut() {
            *n = n.saturating_sub(1);
            if *n == 0 {
                self.state = SequenceState::Done;
                return SequenceStep::Finished;
            }
        }
        self.state = SequenceState::AwaitingRestart;
        SequenceStep::Restart
    }

    /// Leave [`SequenceState::AwaitingRestart`]: returns the value to re-apply to the
    /// property and the first step's target.
    pub fn restart(&mut self) -> Option<(PropValue, PropValue)> {
        if self.state != SequenceState::AwaitingRestart {
            return None;
        }
        self.state = SequenceState::Playing;
        self.value_index = 1;
        self.cycle += 1;
        Some((self.values[0].clone(), self.values[1].clone()))
    }

    /// Drop whole cycles that ended before `now` without playing them.
    ///
    /// Only acts at the start of a cycle. A counted sequence always keeps its last cycle, so
    /// it still ends on its final value.
    pub fn catch_up(&mut self, now: f64) {
        if self.state != SequenceState::Playing || self.value_index != 1 {
            return;
        }
        let cycle_length = self.step_duration * self.values.len().saturating_sub(1) as f64;
        let behind = ((now - self.step_start()) / cycle_length).floor();
        if !(behind >= 1.0) {
            return;
        }
        let mut skip = if behind >= u64::MAX as f64 {
            u64::MAX
        } else {
            behind as u64
        };
        if let Some(n) = self.remaining.as_mut() {
            skip = skip.min(u64::from(n.saturating_sub(1)));
            *n -= skip as u32;
        }
        self.cycle = self.cycle.saturating_add(skip);
    }

    pub fn cancel(&mut self) {
        self.state = SequenceState::Done;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequencer.rs"]
mod tests;
