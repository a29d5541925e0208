//! Owner of every running animation task and keyframe sequence.

use std::collections::BTreeMap;

use crate::animation::animatable::{TRANSFORM_MATRIX_KEY, interpolation_for, is_transform_key};
use crate::animation::ease::Ease;
use crate::animation::sequencer::{SequenceId, SequenceStep, Sequencer};
use crate::animation::task::{
    AnimationOptions, AnimationTask, Interpolation, TaskId, end_tolerance,
};
use crate::foundation::core::ObjectId;
use crate::foundation::error::{SvgMotionError, SvgMotionResult};
use crate::scene::animate_element::RepeatCount;
use crate::scene::graph::SceneGraph;
use crate::scene::object::PropValue;

/// Scheduler context for property animations.
///
/// The registry owns its clock. Nothing advances on its own: the caller drives time with
/// [`AnimationRegistry::tick`] or [`AnimationRegistry::advance`] and passes the scene graph
/// whose objects the tasks write to. Independent registries never observe each other.
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    now: f64,
    next_task: u64,
    next_sequence: u64,
    tasks: Vec<AnimationTask>,
    sequences: BTreeMap<SequenceId, Sequencer>,
}

/// Key under which a property is stored, with the transform key case folded.
fn canonical_key(key: &str) -> &str {
    if is_transform_key(key) {
        TRANSFORM_MATRIX_KEY
    } else {
        key
    }
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry clock in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of running tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &AnimationTask> + '_ {
        self.tasks.iter()
    }

    pub fn task(&self, id: TaskId) -> Option<&AnimationTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn sequences(&self) -> impl Iterator<Item = (SequenceId, &Sequencer)> + '_ {
        self.sequences.iter().map(|(id, s)| (*id, s))
    }

    pub fn sequence(&self, id: SequenceId) -> Option<&Sequencer> {
        self.sequences.get(&id)
    }

    /// Start one task per `(key, end value)` entry on `target`, beginning at the current
    /// clock. Nothing is started when any entry is rejected.
    pub fn animate<K, I>(
        &mut self,
        scene: &SceneGraph,
        target: ObjectId,
        props: I,
        options: AnimationOptions,
    ) -> SvgMotionResult<Vec<TaskId>>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PropValue)>,
    {
        let object = scene
            .get(target)
            .filter(|o| o.is_animatable())
            .ok_or_else(|| {
                SvgMotionError::animation(format!("object {} is not animatable", target.0))
            })?;

        let mut prepared = Vec::new();
        for (key, end) in props {
            let key: String = key.into();
            let key = canonical_key(&key).to_owned();
            let start = match &options.start_value {
                Some(v) => Some(v.clone()),
                None => object.get_path(&key),
            };
            let interpolation = interpolation_for(&key, start.as_ref(), &end)?;
            prepared.push((key, interpolation));
        }

        let start_time = self.now;
        Ok(prepared
            .into_iter()
            .map(|(key, interpolation)| {
                self.push_task(target, key, interpolation, &options, start_time, None)
            })
            .collect())
    }

    fn push_task(
        &mut self,
        target: ObjectId,
        key: String,
        interpolation: Interpolation,
        options: &AnimationOptions,
        start_time: f64,
        sequence: Option<SequenceId>,
    ) -> TaskId {
        self.next_task += 1;
        let id = TaskId(self.next_task);
        tracing::trace!(task = id.0, target = target.0, key = %key, "animation task started");
        self.tasks.push(AnimationTask {
            id,
            target,
            key,
            interpolation,
            duration: options.duration,
            easing: options.easing,
            start_time,
            progress: 0.0,
            on_change: options.on_change.clone(),
            on_complete: options.on_complete.clone(),
            abort: options.abort.clone(),
            sequence,
        });
        id
    }

    /// Play `values` on `target.key` one step at a time, `step_duration` seconds per step,
    /// linearly. The property is first set to `values[0]`.
    pub fn start_sequence(
        &mut self,
        scene: &mut SceneGraph,
        target: ObjectId,
        key: &str,
        values: Vec<PropValue>,
        step_duration: f64,
        repeat: RepeatCount,
    ) -> SvgMotionResult<SequenceId> {
        if values.len() < 2 {
            return Err(SvgMotionError::animation(format!(
                "\"{key}\" needs at least two values, got {}",
                values.len()
            )));
        }
        if !(step_duration.is_finite() && step_duration > 0.0) {
            return Err(SvgMotionError::animation(format!(
                "\"{key}\" step duration must be positive, got {step_duration}"
            )));
        }
        let key = canonical_key(key);
        let object = scene
            .get_mut(target)
            .and_then(|o| o.as_animatable_mut())
            .ok_or_else(|| {
                SvgMotionError::animation(format!("object {} is not animatable", target.0))
            })?;
        object.apply_animated_value(key, values[0].clone())?;

        self.next_sequence += 1;
        let id = SequenceId(self.next_sequence);
        let sequencer =
            Sequencer::new(target, key, values, step_duration, repeat).starting_at(self.now);
        let first = sequencer.current_value().cloned();
        let start_time = sequencer.step_start();
        self.sequences.insert(id, sequencer);
        if let Some(first) = first
            && let Err(err) = self.start_step(scene, id, first, start_time)
        {
            self.sequences.remove(&id);
            return Err(err);
        }
        Ok(id)
    }

    fn start_step(
        &mut self,
        scene: &SceneGraph,
        id: SequenceId,
        value: PropValue,
        start_time: f64,
    ) -> SvgMotionResult<TaskId> {
        let Some(seq) = self.sequences.get(&id) else {
            return Err(SvgMotionError::animation("sequence is gone"));
        };
        // A step the clock cannot resolve would finish as soon as it starts, forever.
        if seq.step_duration() <= 4.0 * end_tolerance(start_time) {
            return Err(SvgMotionError::animation(format!(
                "step of {}s is below clock resolution at {start_time}s",
                seq.step_duration()
            )));
        }
        let (target, key) = (seq.target(), seq.key().to_owned());
        let options = AnimationOptions::default()
            .with_duration(seq.step_duration())
            .with_easing(Ease::Linear);
        let start = scene.get(target).and_then(|o| o.get_path(&key));
        let interpolation = interpolation_for(&key, start.as_ref(), &value)?;
        Ok(self.push_task(target, key, interpolation, &options, start_time, Some(id)))
    }

    /// Move the sequence past its completed step and start the next one at its scheduled time.
    fn advance_sequence(&mut self, scene: &mut SceneGraph, id: SequenceId) {
        let now = self.now;
        let Some(seq) = self.sequences.get_mut(&id) else {
            return;
        };
        let next = match seq.advance() {
            SequenceStep::Next(value) => Ok(value),
            SequenceStep::Restart => match seq.restart() {
                Some((seed, value)) => {
                    seq.catch_up(now);
                    let (target, key) = (seq.target(), seq.key().to_owned());
                    match scene.get_mut(target).and_then(|o| o.as_animatable_mut()) {
                        Some(object) => object.apply_animated_value(&key, seed).map(|_| value),
                        None => Err(SvgMotionError::animation("sequence target is gone")),
                    }
                }
                None => Err(SvgMotionError::animation("sequence could not restart")),
            },
            SequenceStep::Finished => {
                tracing::trace!(sequence = id.0, "animation sequence finished");
                self.sequences.remove(&id);
                return;
            }
        };
        let at = seq.step_start();
        if let Err(err) = next.and_then(|value| self.start_step(scene, id, value, at)) {
            tracing::debug!(sequence = id.0, error = %err, "animation sequence stopped");
            self.sequences.remove(&id);
        }
    }

    /// Advance the clock to `now` and step every task.
    ///
    /// A task that completes writes its end value, recomputes its object's coordinates, then
    /// fires its completion callback. Sequence steps that follow a completed step start at that
    /// step's scheduled end, so a large jump plays through as many steps as fit. Whole cycles of
    /// a repeating sequence that lie entirely before `now` are skipped.
    pub fn tick(&mut self, now: f64, scene: &mut SceneGraph) {
        if now > self.now {
            self.now = now;
        }
        let now = self.now;
        let mut i = 0;
        while i < self.tasks.len() {
            let frame = self.tasks[i].frame_at(now);
            let task = &mut self.tasks[i];
            task.progress = frame.duration_progress;

            if task
                .abort
                .as_ref()
                .is_some_and(|abort| abort(&frame.value, frame.value_progress, frame.duration_progress))
            {
                tracing::trace!(task = task.id.0, "animation task aborted");
                let task = self.tasks.remove(i);
                if let Some(seq) = task.sequence {
                    self.sequences.remove(&seq);
                }
                continue;
            }

            let applied = match scene.get_mut(task.target).and_then(|o| o.as_animatable_mut()) {
                Some(object) => object.apply_animated_value(&task.key, frame.value.clone()),
                None => Err(SvgMotionError::animation(format!(
                    "object {} is no longer animatable",
                    task.target.0
                ))),
            };
            if let Err(err) = applied {
                tracing::warn!(task = task.id.0, key = %task.key, error = %err, "dropping animation task");
                let task = self.tasks.remove(i);
                if let Some(seq) = task.sequence {
                    self.sequences.remove(&seq);
                }
                continue;
            }
            if let Some(cb) = &task.on_change {
                cb(&frame.value, frame.value_progress, frame.duration_progress);
            }

            if !frame.finished {
                i += 1;
                continue;
            }

            let task = self.tasks.remove(i);
            if let Some(object) = scene.get_mut(task.target).and_then(|o| o.as_animatable_mut()) {
                object.animation_finished();
            }
            if let Some(cb) = &task.on_complete {
                cb(&frame.value, 1.0, 1.0);
            }
            if let Some(seq) = task.sequence {
                self.advance_sequence(scene, seq);
            }
        }
    }

    /// Advance the clock by `dt` seconds.
    pub fn advance(&mut self, dt: f64, scene: &mut SceneGraph) {
        self.tick(self.now + dt.max(0.0), scene);
    }

    /// Stop one task. A sequence the task belongs to stops with it.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        let task = self.tasks.remove(pos);
        if let Some(seq) = task.sequence
            && let Some(mut s) = self.sequences.remove(&seq)
        {
            s.cancel();
        }
        true
    }

    /// Stop a sequence and its running step.
    pub fn cancel_sequence(&mut self, id: SequenceId) -> bool {
        let Some(mut seq) = self.sequences.remove(&id) else {
            return false;
        };
        seq.cancel();
        self.tasks.retain(|t| t.sequence != Some(id));
        true
    }

    /// Stop every task and sequence animating `target`. Returns the number of tasks removed.
    pub fn cancel_by_target(&mut self, target: ObjectId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.target != target);
        self.sequences.retain(|_, s| s.target() != target);
        before - self.tasks.len()
    }

    /// Stop everything. No chained step can start afterwards.
    pub fn cancel_all(&mut self) -> usize {
        let removed = self.tasks.len();
        tracing::debug!(tasks = removed, sequences = self.sequences.len(), "cancelling all animations");
        self.tasks.clear();
        for seq in self.sequences.values_mut() {
            seq.cancel();
        }
        self.sequences.clear();
        removed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/registry.rs"]
mod tests;
