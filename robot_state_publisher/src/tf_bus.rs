//! In-process publish/subscribe transport for transform batches.
//!
//! Topics are created lazily by whichever of [TfBus::advertise] or
//! [TfBus::subscribe] names them first. Each topic is a bounded broadcast
//! channel: a subscriber that falls more than the queue size behind skips the
//! oldest batches.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use futures::Stream;
use log::*;
use tf_core::TFMessage;
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};

use crate::tf_error::TfError;

/// Topic transforms are broadcast on.
pub const TF_TOPIC: &str = "/tf";
/// Number of batches a subscriber may fall behind before it starts skipping.
pub const TF_QUEUE_SIZE: usize = 5;

/// Anything a batch of transforms can be published through.
pub trait TfPublish {
    fn publish(&self, msg: &TFMessage) -> Result<(), TfError>;
}

/// A shared table of named topics. Cloning yields another handle to the same topics.
#[derive(Clone, Debug, Default)]
pub struct TfBus {
    topics: Arc<RwLock<BTreeMap<String, broadcast::Sender<TFMessage>>>>,
}

impl TfBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn channel(
        &self,
        topic: &str,
        queue_size: usize,
    ) -> Result<broadcast::Sender<TFMessage>, TfError> {
        // Check if we already have this channel
        {
            let topics = self
                .topics
                .read()
                .map_err(|_| TfError::CouldNotAcquireLock)?;
            if let Some(sender) = topics.get(topic) {
                return Ok(sender.clone());
            }
        } // Drop read lock here
        let mut topics = self
            .topics
            .write()
            .map_err(|_| TfError::CouldNotAcquireLock)?;
        let sender = topics.entry(topic.to_string()).or_insert_with(|| {
            debug!("Created new channel for topic {topic} with queue size {queue_size}");
            broadcast::channel(queue_size.max(1)).0
        });
        Ok(sender.clone())
    }

    /// Get a publisher for `topic`. The queue size only applies if this call creates the topic.
    pub fn advertise(&self, topic: &str, queue_size: usize) -> Result<TfPublisher, TfError> {
        let sender = self.channel(topic, queue_size)?;
        Ok(TfPublisher {
            topic: topic.to_string(),
            sender,
        })
    }

    /// Subscribe to `topic`. Only batches published after this call are received.
    pub fn subscribe(&self, topic: &str) -> Result<TfSubscriber, TfError> {
        let receiver = self.channel(topic, TF_QUEUE_SIZE)?.subscribe();
        Ok(TfSubscriber {
            topic: topic.to_string(),
            receiver,
        })
    }

    pub fn topics(&self) -> Result<Vec<String>, TfError> {
        let topics = self
            .topics
            .read()
            .map_err(|_| TfError::CouldNotAcquireLock)?;
        Ok(topics.keys().cloned().collect())
    }
}

/// The publisher type returned by calling [TfBus::advertise].
#[derive(Clone, Debug)]
pub struct TfPublisher {
    topic: String,
    sender: broadcast::Sender<TFMessage>,
}

impl TfPublisher {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn num_subscribers(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl TfPublish for TfPublisher {
    /// Publishing without subscribers is not an error, the batch is dropped.
    fn publish(&self, msg: &TFMessage) -> Result<(), TfError> {
        match self.sender.send(msg.clone()) {
            Ok(subscribers) => debug!(
                "Sent {} transforms on topic {} to {subscribers} subscribers",
                msg.len(),
                self.topic
            ),
            Err(_) => debug!(
                "No subscribers on topic {}, dropped {} transforms",
                self.topic,
                msg.len()
            ),
        }
        Ok(())
    }
}

/// The subscriber type returned by calling [TfBus::subscribe].
#[derive(Debug)]
pub struct TfSubscriber {
    topic: String,
    receiver: broadcast::Receiver<TFMessage>,
}

impl TfSubscriber {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Wait for the next batch. Fails with [TfError::Disconnected] once the bus
    /// and every publisher on the topic have been dropped.
    pub async fn next(&mut self) -> Result<TFMessage, TfError> {
        loop {
            match self.receiver.recv().await {
                Ok(msg) => return Ok(msg),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(
                        "Subscriber on {} lagged, skipped {skipped} messages",
                        self.topic
                    );
                }
                Err(RecvError::Closed) => return Err(TfError::Disconnected(self.topic.clone())),
            }
        }
    }

    /// The next batch if one is already queued.
    pub fn try_next(&mut self) -> Result<Option<TFMessage>, TfError> {
        loop {
            match self.receiver.try_recv() {
                Ok(msg) => return Ok(Some(msg)),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(
                        "Subscriber on {} lagged, skipped {skipped} messages",
                        self.topic
                    );
                }
                Err(TryRecvError::Closed) => {
                    return Err(TfError::Disconnected(self.topic.clone()));
                }
            }
        }
    }

    /// Received batches as a stream.
    ///
    /// The bus keeps a sender for every topic it has seen, so the stream only
    /// ends once the bus and every publisher on the topic have been dropped.
    pub fn into_stream(self) -> impl Stream<Item = TFMessage> {
        futures::stream::unfold(self, |mut subscriber| async move {
            let msg = subscriber.next().await.ok()?;
            Some((msg, subscriber))
        })
    }
}
