use std::{
    error::Error,
    fmt::{self, Display},
    num::NonZeroU64,
    time::Duration,
};

use futures::future;
use global_aggregator::{Aggregator, AggregatorConfig, AggregatorHandle, Model};
use log::info;

const PARAMS: usize = 4;
const WORKERS: usize = 4;
const MAX_STEPS: u64 = 2_000;
const SYNC_INTERVAL: u64 = 250;
const GOAL: f32 = 1.0;

/// Error returned when a gradient doesn't match the size of the parameters.
#[derive(Debug)]
struct SizeMismatchErr;

impl Display for SizeMismatchErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the gradient length doesn't match the amount of parameters")
    }
}

impl Error for SizeMismatchErr {}

/// A flat parameter vector trained with plain gradient descent.
#[derive(Debug, Clone)]
struct Parameters {
    weights: Vec<f32>,
    learning_rate: f32,
}

impl Parameters {
    /// The gradient of the squared distance between every weight and `GOAL`.
    fn gradient(&self) -> Vec<f32> {
        self.weights.iter().map(|w| 2.0 * (w - GOAL)).collect()
    }
}

impl Model for Parameters {
    type Update = Vec<f32>;
    type Error = SizeMismatchErr;

    fn try_clone(&self) -> Result<Self, Self::Error> {
        Ok(self.clone())
    }

    fn apply_update(&mut self, grad: Vec<f32>, _: NonZeroU64) -> Result<(), Self::Error> {
        if grad.len() != self.weights.len() {
            return Err(SizeMismatchErr);
        }

        let lr = self.learning_rate;
        self.weights
            .iter_mut()
            .zip(grad)
            .for_each(|(w, g)| *w -= lr * g);

        Ok(())
    }
}

/// Pulls snapshots of the current model and submits gradients until training is over.
async fn worker(id: usize, handle: AggregatorHandle<Parameters>) -> anyhow::Result<u64> {
    let steps = NonZeroU64::MIN.saturating_add(id as u64 % 3);
    let mut submitted = 0;

    while handle.is_running() && !handle.is_training_complete() {
        let local = handle.pull_current_model().await?;
        handle.enqueue(local.gradient(), steps);
        submitted += 1;

        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    info!(worker_id = id, submitted = submitted; "worker finished");
    Ok(submitted)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AggregatorConfig::new(MAX_STEPS, Some(SYNC_INTERVAL))?;
    let initial = Parameters {
        weights: vec![0.0; PARAMS],
        learning_rate: 0.01,
    };

    let aggregator = Aggregator::new(initial, config)?;
    let handle = aggregator.handle();
    let task = aggregator.start();

    let workers = (0..WORKERS).map(|id| tokio::spawn(worker(id, handle.clone())));
    for submitted in future::join_all(workers).await {
        submitted??;
    }

    let termination = task.join().await?;
    let current = handle.clone_current_model()?;
    let target = handle.clone_target_model()?;
    let leftover = handle.drain_pending();

    println!(
        "stopped ({}) at {} steps after {} updates and {} target refreshes",
        termination.reason,
        termination.total_steps,
        termination.metrics.updates,
        termination.metrics.target_refreshes,
    );
    println!("current: {:?}", current.weights);
    println!("target:  {:?}", target.weights);
    println!("left unapplied: {}", leftover.len());

    Ok(())
}
