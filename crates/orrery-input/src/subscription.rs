use tokio::sync::mpsc;

/// Producer half of an event subscription.
///
/// Sources keep one of these per subscriber and stop producing once
/// [`Publisher::is_closed`] reports the subscriber went away.
#[derive(Debug)]
pub struct Publisher<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Publisher<T> {
    /// Deliver an event. Returns `false` if the subscription was cancelled.
    pub fn publish(&self, event: T) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Resolves once the subscriber has been dropped or cancelled.
    pub async fn closed(&self) {
        self.tx.closed().await
    }
}

/// Consumer half of an event subscription.
///
/// Dropping it is the unsubscribe: anything still buffered is discarded
/// together with the receiver.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    /// Create a connected publisher/subscription pair.
    pub fn channel() -> (Publisher<T>, Subscription<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Publisher { tx }, Subscription { rx })
    }

    /// Next pending event, if any (non-blocking).
    pub fn try_next(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Take every pending event in arrival order.
    pub fn drain(&mut self) -> Vec<T> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Whether the producer side has gone away and nothing is left to read.
    pub fn is_finished(&self) -> bool {
        self.rx.is_closed() && self.rx.is_empty()
    }

    /// Explicit unsubscribe.
    pub fn cancel(mut self) {
        self.rx.close();
    }
}
