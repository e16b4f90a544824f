use std::{
    num::NonZeroU64,
    sync::atomic::{AtomicUsize, Ordering},
};

use tokio::sync::{
    Mutex, MutexGuard,
    mpsc::{self, UnboundedReceiver, UnboundedSender},
};

use super::UpdateEnvelope;

/// An unbounded multi-producer, single-consumer queue of update envelopes.
///
/// There is no backpressure: a consumer slower than its producers makes the queue grow
/// without limit. Each producer's envelopes are received in the order it submitted them.
///
/// The receiving end is owned by the queue itself, so submissions never fail and whatever
/// wasn't consumed is still available once the consumer is released.
#[derive(Debug)]
pub struct UpdateQueue<U> {
    tx: UnboundedSender<UpdateEnvelope<U>>,
    rx: Mutex<UnboundedReceiver<UpdateEnvelope<U>>>,
    len: AtomicUsize,
}

impl<U> Default for UpdateQueue<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> UpdateQueue<U> {
    /// Creates a new empty `UpdateQueue`.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            tx,
            rx: Mutex::new(rx),
            len: AtomicUsize::new(0),
        }
    }

    /// Submits a new update, never blocks.
    ///
    /// # Arguments
    /// * `update` - The update, its ownership is transferred to the queue.
    /// * `steps` - The amount of steps `update` represents.
    pub fn enqueue(&self, update: U, steps: NonZeroU64) {
        // Counted before sending so the consumer can never observe a negative length.
        self.len.fetch_add(1, Ordering::AcqRel);

        // The receiver lives as long as `self` and is never closed.
        let _ = self.tx.send(UpdateEnvelope::new(update, steps));
    }

    /// Returns the amount of envelopes waiting to be consumed.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    /// Returns whether there are no envelopes waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Waits until the consumer side is free and takes it.
    ///
    /// # Returns
    /// The single consumer of this queue.
    pub async fn consumer(&self) -> UpdateConsumer<'_, U> {
        UpdateConsumer {
            rx: self.rx.lock().await,
            len: &self.len,
        }
    }

    /// Takes the consumer side if nobody else is holding it.
    ///
    /// # Returns
    /// The single consumer of this queue or `None` if it's already taken.
    pub fn try_consumer(&self) -> Option<UpdateConsumer<'_, U>> {
        let rx = self.rx.try_lock().ok()?;
        Some(UpdateConsumer { rx, len: &self.len })
    }

    /// Removes every pending envelope in queue order.
    ///
    /// # Returns
    /// The pending envelopes, or an empty list if the consumer is currently taken.
    pub fn drain(&self) -> Vec<UpdateEnvelope<U>> {
        let Some(mut consumer) = self.try_consumer() else {
            return Vec::new();
        };

        let mut envelopes = Vec::with_capacity(self.len());
        while let Some(envelope) = consumer.try_dequeue() {
            envelopes.push(envelope);
        }

        envelopes
    }
}

/// Exclusive receiving end of an `UpdateQueue`, released on drop.
pub struct UpdateConsumer<'a, U> {
    rx: MutexGuard<'a, UnboundedReceiver<UpdateEnvelope<U>>>,
    len: &'a AtomicUsize,
}

impl<U> UpdateConsumer<'_, U> {
    /// Waits for the next envelope without spinning.
    ///
    /// This is cancel safe, if the future is dropped before completion no envelope is lost.
    ///
    /// # Returns
    /// The next envelope, `None` only if every sender is gone.
    pub async fn recv(&mut self) -> Option<UpdateEnvelope<U>> {
        let envelope = self.rx.recv().await?;
        self.len.fetch_sub(1, Ordering::AcqRel);
        Some(envelope)
    }

    /// Takes the next envelope if there is one.
    ///
    /// # Returns
    /// The next envelope or `None` if the queue is empty.
    pub fn try_dequeue(&mut self) -> Option<UpdateEnvelope<U>> {
        let envelope = self.rx.try_recv().ok()?;
        self.len.fetch_sub(1, Ordering::AcqRel);
        Some(envelope)
    }
}
