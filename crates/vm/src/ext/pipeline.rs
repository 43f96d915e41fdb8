//! Chains of interpreters where each stage's outputs become the next stage's inputs.
//!
//! Stages can be driven in-place on the calling thread ([`Pipeline::run_once`],
//! [`Pipeline::run_feedback`]) or each on its own thread, exchanging values over channels
//! ([`Pipeline::run_threaded`]). Interpreters never share state, so no locking is involved.

use std::{
    panic,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use crossbeam_channel::{select, unbounded, Receiver, Sender};
use tracing::{debug, trace};

use crate::{core::vm::Interpreter, error::Error};

/// How the last stage of a pipeline is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// The last stage's outputs leave the pipeline.
    Linear,

    /// The last stage's outputs are fed back into the first stage.
    Feedback,
}

/// An ordered chain of interpreters.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    stages: Vec<Interpreter>,
}

impl Pipeline {
    /// Builds one stage per phase setting, each loading `program` and seeded with its phase as
    /// the first input.
    ///
    /// ```
    /// use intcode_vm::ext::pipeline::Pipeline;
    ///
    /// let program = [3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0];
    /// let mut pipeline = Pipeline::new(&program, &[4, 3, 2, 1, 0]);
    /// assert_eq!(pipeline.run_once(0).unwrap(), Some(43210));
    /// ```
    pub fn new(program: &[i64], phases: &[i64]) -> Pipeline {
        let stages = phases
            .iter()
            .map(|&phase| {
                let mut vm = Interpreter::load(program);
                vm.push_input(phase);
                vm
            })
            .collect();
        Pipeline { stages }
    }

    /// Builds a pipeline from already prepared interpreters.
    pub fn from_stages(stages: Vec<Interpreter>) -> Pipeline {
        Pipeline { stages }
    }

    /// Returns the stages in order.
    pub fn stages(&self) -> &[Interpreter] {
        &self.stages
    }

    /// Returns the number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Passes `signal` through every stage once, in order. Each stage runs until it halts or
    /// starves, and all of its outputs are queued into the next stage. Returns the last value
    /// output by the final stage.
    pub fn run_once(&mut self, signal: i64) -> Result<Option<i64>, Error> {
        let mut pending = vec![signal];
        for (index, stage) in self.stages.iter_mut().enumerate() {
            pending = stage.run_with_inputs(pending)?;
            trace!(stage = index, outputs = pending.len(), "stage finished");
        }
        Ok(pending.last().copied())
    }

    /// Like [`run_once`](Pipeline::run_once), but loops the final stage's outputs back into the
    /// first stage until the final stage halts. Returns the last value it output.
    ///
    /// Fails with [`Error::PipelineStalled`] if a full round completes without any stage
    /// producing output while the final stage is still running.
    pub fn run_feedback(&mut self, signal: i64) -> Result<Option<i64>, Error> {
        let mut pending = vec![signal];
        let mut last = None;
        let mut round = 0usize;

        loop {
            let mut produced = false;
            for stage in self.stages.iter_mut() {
                pending = stage.run_with_inputs(pending)?;
                produced |= !pending.is_empty();
            }
            if let Some(&value) = pending.last() {
                last = Some(value);
            }
            round += 1;

            match self.stages.last() {
                None => return Ok(last),
                Some(stage) if stage.is_halted() => {
                    debug!(rounds = round, "feedback pipeline halted");
                    return Ok(last);
                }
                Some(_) if !produced => return Err(Error::PipelineStalled),
                Some(_) => {}
            }
        }
    }

    /// Runs every stage on its own thread, connected by channels according to `topology`.
    /// Returns the last value output by the final stage.
    ///
    /// A stage that needs input after its upstream stage has finished fails with
    /// [`Error::Disconnected`]. If every stage is waiting for input with no value in flight,
    /// every stage fails with [`Error::PipelineStalled`]. Outputs sent to a stage that
    /// has already halted are dropped.
    pub fn run_threaded(&mut self, signal: i64, topology: Topology) -> Result<Option<i64>, Error> {
        let count = self.stages.len();
        if count == 0 {
            return Ok(Some(signal));
        }

        let (senders, receivers): (Vec<Sender<i64>>, Vec<Receiver<i64>>) =
            (0..count).map(|_| unbounded()).unzip();
        let downstream: Vec<Option<Sender<i64>>> = (0..count)
            .map(|index| match topology {
                Topology::Linear if index + 1 == count => None,
                _ => Some(senders[(index + 1) % count].clone()),
            })
            .collect();

        // every stage starts out running, plus the initial signal in flight
        let activity = Activity::new(count, count + 1);
        senders[0].send(signal).map_err(|_| Error::Disconnected { stage: 0 })?;
        drop(senders);

        let results: Vec<Result<Option<i64>, Error>> = thread::scope(|scope| {
            let activity = &activity;
            let handles: Vec<_> = self
                .stages
                .iter_mut()
                .zip(receivers)
                .zip(downstream)
                .enumerate()
                .map(|(index, ((vm, input), output))| {
                    let stage = Stage { index, input, output, activity };
                    scope.spawn(move || stage.run(vm))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
                .collect()
        });

        let mut last = None;
        for result in results {
            last = result?;
        }
        Ok(last)
    }
}

/// Tracks how many stages are running plus how many values are in flight between stages.
/// Finished stages stay counted, so a stall is only reported while every stage is alive. Once a
/// stage finishes, the stages waiting behind it see their input disconnect instead.
#[derive(Debug)]
struct Activity {
    active: AtomicUsize,
    stages: usize,
    stalled: (Sender<()>, Receiver<()>),
}

impl Activity {
    fn new(stages: usize, active: usize) -> Activity {
        Activity { active: AtomicUsize::new(active), stages, stalled: unbounded() }
    }

    fn sent(&self) {
        self.active.fetch_add(1, Ordering::SeqCst);
    }

    /// Marks a stage as waiting. Returns `true` if that stalled the pipeline, in which case
    /// every other waiting stage is woken up.
    fn waiting(&self) -> bool {
        if self.active.fetch_sub(1, Ordering::SeqCst) != 1 {
            return false;
        }
        for _ in 0..self.stages {
            let _ = self.stalled.0.send(());
        }
        true
    }
}

/// A single pipeline stage running on its own thread.
struct Stage<'a> {
    index: usize,
    input: Receiver<i64>,
    output: Option<Sender<i64>>,
    activity: &'a Activity,
}

impl Stage<'_> {
    /// Drives `vm` until it halts, fails, or the pipeline stalls.
    fn run(self, vm: &mut Interpreter) -> Result<Option<i64>, Error> {
        let mut last = None;
        loop {
            match vm.run_until_output_or_halt()? {
                Some(value) => {
                    last = Some(value);
                    if let Some(output) = &self.output {
                        self.activity.sent();
                        if output.send(value).is_err() {
                            trace!(
                                stage = self.index,
                                value,
                                "downstream stage finished, dropping output"
                            );
                        }
                    }
                }
                None if vm.is_halted() => {
                    debug!(stage = self.index, "stage halted");
                    return Ok(last);
                }
                None => {
                    if self.activity.waiting() {
                        debug!(stage = self.index, "pipeline stalled");
                        return Err(Error::PipelineStalled);
                    }

                    select! {
                        recv(self.input) -> value => {
                            // the received value hands its slot back to this stage
                            let value = value
                                .map_err(|_| Error::Disconnected { stage: self.index })?;
                            vm.push_input(value);
                        }
                        recv(self.activity.stalled.1) -> _ => return Err(Error::PipelineStalled),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINEAR: [i64; 17] = [3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0];

    const FEEDBACK: [i64; 29] = [
        3, 26, 1001, 26, -4, 26, 3, 27, 1002, 27, 2, 27, 1, 27, 26, 27, 4, 27, 1001, 28, -1, 28,
        1005, 28, 6, 99, 0, 0, 5,
    ];

    #[test]
    fn test_run_once() {
        let mut pipeline = Pipeline::new(&LINEAR, &[4, 3, 2, 1, 0]);
        assert_eq!(pipeline.run_once(0).expect("pipeline failed"), Some(43210));
        assert!(pipeline.stages().iter().all(Interpreter::is_halted));
    }

    #[test]
    fn test_run_feedback() {
        let mut pipeline = Pipeline::new(&FEEDBACK, &[9, 8, 7, 6, 5]);
        assert_eq!(pipeline.run_feedback(0).expect("pipeline failed"), Some(139629729));
    }

    #[test]
    fn test_run_threaded_linear() {
        let mut pipeline = Pipeline::new(&LINEAR, &[4, 3, 2, 1, 0]);
        assert_eq!(
            pipeline.run_threaded(0, Topology::Linear).expect("pipeline failed"),
            Some(43210)
        );
    }

    #[test]
    fn test_run_threaded_feedback() {
        let mut pipeline = Pipeline::new(&FEEDBACK, &[9, 8, 7, 6, 5]);
        assert_eq!(
            pipeline.run_threaded(0, Topology::Feedback).expect("pipeline failed"),
            Some(139629729)
        );
        assert!(pipeline.stages().iter().all(Interpreter::is_halted));
    }

    #[test]
    fn test_empty_pipeline_passes_signal() {
        let mut pipeline = Pipeline::default();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.run_once(7).expect("pipeline failed"), Some(7));
        assert_eq!(pipeline.run_feedback(7).expect("pipeline failed"), Some(7));
        assert_eq!(pipeline.run_threaded(7, Topology::Linear).expect("pipeline failed"), Some(7));
    }

    #[test]
    fn test_feedback_stall_detected() {
        // reads forever, never outputs
        let mut pipeline = Pipeline::from_stages(vec![Interpreter::load(&[3, 5, 1105, 1, 0, 0])]);
        assert!(matches!(pipeline.run_feedback(1), Err(Error::PipelineStalled)));
    }

    #[test]
    fn test_threaded_disconnected_upstream() {
        // stage 0 halts immediately, stage 1 wants two inputs
        let stages = vec![Interpreter::load(&[99]), Interpreter::load(&[3, 0, 3, 0, 99])];
        let mut pipeline = Pipeline::from_stages(stages);
        assert!(matches!(
            pipeline.run_threaded(5, Topology::Linear),
            Err(Error::Disconnected { stage: 1 })
        ));
    }

    #[test]
    fn test_threaded_feedback_stall_detected() {
        let starving = [3, 5, 1105, 1, 0, 0];

        let mut pipeline = Pipeline::from_stages(vec![Interpreter::load(&starving)]);
        assert!(matches!(
            pipeline.run_threaded(1, Topology::Feedback),
            Err(Error::PipelineStalled)
        ));

        let stages = vec![Interpreter::load(&starving), Interpreter::load(&starving)];
        let mut pipeline = Pipeline::from_stages(stages);
        assert!(matches!(pipeline.clone().run_feedback(1), Err(Error::PipelineStalled)));
        assert!(matches!(
            pipeline.run_threaded(1, Topology::Feedback),
            Err(Error::PipelineStalled)
        ));
    }

    #[test]
    fn test_stage_error_propagates() {
        let stages = vec![Interpreter::load(&[104, 1, 99]), Interpreter::load(&[3, 0, 42])];
        let mut pipeline = Pipeline::from_stages(stages);
        assert!(matches!(pipeline.run_once(0), Err(Error::InvalidOpcode { opcode: 42, .. })));
    }
}
