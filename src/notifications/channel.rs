//! Broadcast channel with independent per-subscriber buffers

use crate::notifications::error::NotificationError;
use crate::notifications::gate::DistinctGate;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Publishing side of a notification channel
///
/// Each call to [`Broadcaster::subscribe`] registers a fresh unbounded
/// buffer; [`Broadcaster::publish`] clones the event into every live buffer.
/// Subscribers that dropped their [`Subscription`] are pruned on the next
/// publish. Once [`Broadcaster::close`] has run the channel stays closed:
/// publishing is ignored and late subscribers receive an already-closed
/// subscription.
///
/// The broadcaster itself is not synchronised. Owners serialise access (the
/// handoff queue keeps its broadcasters behind the same lock as its state),
/// which is what gives subscribers a single global order of events.
#[derive(Debug)]
pub struct Broadcaster<E> {
    subscribers: Vec<UnboundedSender<E>>,
    closed: bool,
}

impl<E> Default for Broadcaster<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            closed: false,
        }
    }
}

impl<E: Clone> Broadcaster<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    ///
    /// The subscription only sees events published after this call.
    pub fn subscribe(&mut self) -> Subscription<E> {
        let (sender, receiver) = unbounded_channel();
        if !self.closed {
            self.subscribers.push(sender);
        }
        // On a closed channel the sender is dropped here, closing the receiver
        Subscription { receiver }
    }

    /// Deliver an event to every live subscriber
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&mut self, event: E) -> usize {
        if self.closed {
            return 0;
        }
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
        self.subscribers.len()
    }

    /// Permanently close the channel
    ///
    /// Subscribers can still drain what was buffered before the close, after
    /// which they observe end-of-stream.
    pub fn close(&mut self) {
        self.closed = true;
        self.subscribers.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Broadcaster whose subscribers never see the same value twice in a row
///
/// Every subscriber has its own [`DistinctGate`], so a subscriber that joins
/// late always receives the first value published after it joined, even if
/// that value repeats what earlier subscribers last saw.
#[derive(Debug)]
pub struct DistinctBroadcaster<E> {
    subscribers: Vec<(DistinctGate<E>, UnboundedSender<E>)>,
    closed: bool,
}

impl<E> Default for DistinctBroadcaster<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            closed: false,
        }
    }
}

impl<E: Clone + PartialEq> DistinctBroadcaster<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription<E> {
        let (sender, receiver) = unbounded_channel();
        if !self.closed {
            self.subscribers.push((DistinctGate::new(), sender));
        }
        Subscription { receiver }
    }

    /// Deliver `event` to every subscriber whose last value differs
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&mut self, event: E) -> usize {
        if self.closed {
            return 0;
        }
        let mut delivered = 0;
        self.subscribers.retain_mut(|(gate, subscriber)| {
            if !gate.admit(&event) {
                return !subscriber.is_closed();
            }
            match subscriber.send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => false,
            }
        });
        delivered
    }

    pub fn close(&mut self) {
        self.closed = true;
        self.subscribers.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Receiving side of a notification channel
///
/// Usable either through [`Subscription::recv`] or as a [`futures::Stream`].
#[derive(Debug)]
pub struct Subscription<E> {
    receiver: UnboundedReceiver<E>,
}

impl<E> Subscription<E> {
    /// Wait for the next event; `None` once the channel is closed and drained
    pub async fn recv(&mut self) -> Option<E> {
        self.receiver.recv().await
    }

    /// Take the next buffered event without waiting
    pub fn try_recv(&mut self) -> Result<E, NotificationError> {
        self.receiver.try_recv().map_err(|e| match e {
            TryRecvError::Empty => NotificationError::Empty,
            TryRecvError::Disconnected => NotificationError::Closed,
        })
    }

    /// Take every event buffered so far
    pub fn drain(&mut self) -> Vec<E> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// True once the publisher closed the channel and nothing is left to read
    pub fn is_terminated(&self) -> bool {
        self.receiver.is_closed() && self.receiver.is_empty()
    }
}

impl<E> Stream for Subscription<E> {
    type Item = E;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<E>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}
