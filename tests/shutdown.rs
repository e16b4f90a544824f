use std::{
    error::Error,
    fmt::{self, Display},
    num::NonZeroU64,
    sync::{
        Arc, Barrier,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use global_aggregator::{Aggregator, AggregatorConfig, AggregatorErr, Model, StopReason};
use tokio::task;

#[derive(Debug, PartialEq)]
enum GateErr {
    Rejected(u64),
    Exhausted,
}

impl Display for GateErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(id) => write!(f, "update {id} rejected"),
            Self::Exhausted => f.write_str("no memory left for a snapshot"),
        }
    }
}

impl Error for GateErr {}

/// What the gate model does with an update.
enum Gate {
    Pass(u64),
    /// Meets the test twice on the barrier, once when entering the apply and once before leaving.
    Hold(u64, Arc<Barrier>),
    Reject(u64),
}

#[derive(Debug, Clone)]
struct GateModel {
    applied: Vec<u64>,
    fail_clone: Arc<AtomicBool>,
}

impl GateModel {
    fn new() -> Self {
        Self {
            applied: Vec::new(),
            fail_clone: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Model for GateModel {
    type Update = Gate;
    type Error = GateErr;

    fn try_clone(&self) -> Result<Self, Self::Error> {
        if self.fail_clone.load(Ordering::Acquire) {
            return Err(GateErr::Exhausted);
        }

        Ok(self.clone())
    }

    fn apply_update(&mut self, update: Gate, _: NonZeroU64) -> Result<(), Self::Error> {
        match update {
            Gate::Pass(id) => self.applied.push(id),
            Gate::Hold(id, barrier) => {
                barrier.wait();
                self.applied.push(id);
                barrier.wait();
            }
            Gate::Reject(id) => return Err(GateErr::Rejected(id)),
        }

        Ok(())
    }
}

fn steps(n: u64) -> NonZeroU64 {
    NonZeroU64::new(n).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stop_while_idle() {
    let config = AggregatorConfig::new(100, Some(10)).unwrap();
    let aggregator = Aggregator::new(GateModel::new(), config).unwrap();
    let handle = aggregator.handle();
    let task = aggregator.start();

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(handle.is_running());

    let termination = task.stop().await.unwrap();
    assert_eq!(termination.reason, StopReason::StopRequested);
    assert_eq!(termination.total_steps, 0);
    assert!(!handle.is_running());
    assert!(!handle.is_training_complete());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stop_finishes_the_in_flight_update_and_keeps_the_rest() {
    let config = AggregatorConfig::new(100, Some(10)).unwrap();
    let aggregator = Aggregator::new(GateModel::new(), config).unwrap();
    let handle = aggregator.handle();
    let barrier = Arc::new(Barrier::new(2));

    handle.enqueue(Gate::Hold(1, Arc::clone(&barrier)), steps(2));
    handle.enqueue(Gate::Pass(2), steps(3));
    handle.enqueue(Gate::Pass(3), steps(4));

    let task = aggregator.start();

    // The loop is now inside the first apply.
    let entered = Arc::clone(&barrier);
    task::spawn_blocking(move || entered.wait()).await.unwrap();
    handle.request_stop();
    handle.enqueue(Gate::Pass(4), steps(1));

    let leave = Arc::clone(&barrier);
    task::spawn_blocking(move || leave.wait()).await.unwrap();

    let termination = task.join().await.unwrap();
    assert_eq!(termination.reason, StopReason::StopRequested);
    assert_eq!(termination.total_steps, 2);
    assert_eq!(handle.clone_current_model().unwrap().applied, vec![1]);

    assert_eq!(handle.pending_updates(), 3);
    let pending: Vec<_> = handle
        .drain_pending()
        .into_iter()
        .map(|envelope| {
            let (update, n) = envelope.into_parts();
            let Gate::Pass(id) = update else {
                panic!("unexpected pending update");
            };
            (id, n.get())
        })
        .collect();

    assert_eq!(pending, vec![(2, 3), (3, 4), (4, 1)]);
    assert_eq!(handle.pending_updates(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn apply_failure_stops_the_loop() {
    let config = AggregatorConfig::new(100, Some(1)).unwrap();
    let aggregator = Aggregator::new(GateModel::new(), config).unwrap();
    let handle = aggregator.handle();

    handle.enqueue(Gate::Pass(1), steps(5));
    handle.enqueue(Gate::Reject(2), steps(3));
    handle.enqueue(Gate::Pass(3), steps(1));

    let err = aggregator.start().join().await.unwrap_err();
    match err {
        AggregatorErr::ApplyFailure {
            total_steps,
            steps,
            source,
        } => {
            assert_eq!(total_steps, 5);
            assert_eq!(steps, 3);
            assert_eq!(source, GateErr::Rejected(2));
        }
        other => panic!("unexpected error: {other}"),
    }

    // The failed envelope isn't counted and nothing after it is consumed.
    assert_eq!(handle.total_steps(), 5);
    assert_eq!(handle.pending_updates(), 1);
    assert_eq!(handle.clone_current_model().unwrap().applied, vec![1]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn clone_failure_only_affects_the_caller() {
    let config = AggregatorConfig::new(4, Some(2)).unwrap();
    let model = GateModel::new();
    let fail_clone = Arc::clone(&model.fail_clone);

    let aggregator = Aggregator::new(model, config).unwrap();
    let handle = aggregator.handle();

    fail_clone.store(true, Ordering::Release);
    assert!(matches!(
        handle.clone_current_model(),
        Err(AggregatorErr::CloneFailure(GateErr::Exhausted))
    ));
    assert!(matches!(
        handle.clone_target_model(),
        Err(AggregatorErr::CloneFailure(GateErr::Exhausted))
    ));

    handle.enqueue(Gate::Pass(1), steps(2));
    handle.enqueue(Gate::Pass(2), steps(2));

    let termination = aggregator.start().join().await.unwrap();
    assert_eq!(termination.reason, StopReason::Completed);
    assert_eq!(termination.total_steps, 4);
    assert_eq!(termination.metrics.target_refreshes, 0);
    assert_eq!(termination.metrics.skipped_refreshes, 2);

    // The target is still the initial snapshot.
    fail_clone.store(false, Ordering::Release);
    assert!(handle.clone_target_model().unwrap().applied.is_empty());
    assert_eq!(handle.clone_current_model().unwrap().applied, vec![1, 2]);
}

#[test]
fn construction_fails_when_the_target_cannot_be_cloned() {
    let config = AggregatorConfig::new(4, Some(2)).unwrap();
    let model = GateModel::new();
    model.fail_clone.store(true, Ordering::Release);

    let res = Aggregator::new(model, config);
    assert!(matches!(
        res,
        Err(AggregatorErr::CloneFailure(GateErr::Exhausted))
    ));
}
