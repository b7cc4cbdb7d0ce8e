//! Fire-and-forget events kept apart from durable controller state.

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream},
    Stream, StreamExt,
};
use tracing::{debug, warn};

/// Delivers each event only to subscribers attached when it is emitted.
///
/// Nothing is buffered for future subscribers, so replaying state can never
/// redeliver an event. Each live subscriber queues at most `capacity` events;
/// a subscriber that falls further behind loses the oldest ones and sees the
/// loss through [`SignalSubscription::missed`].
pub struct OneShotSignal<E: Clone> {
    name: &'static str,
    tx: broadcast::Sender<E>,
}

impl<E: Clone + Send + 'static> OneShotSignal<E> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { name, tx }
    }

    /// Returns how many subscribers received the event.
    pub fn emit(&self, event: E) -> usize {
        match self.tx.send(event) {
            Ok(delivered) => {
                debug!(signal = self.name, delivered, "signal emitted");
                delivered
            }
            Err(_) => {
                debug!(signal = self.name, "signal emitted with no subscriber; dropped");
                0
            }
        }
    }

    pub fn subscribe(&self) -> SignalSubscription<E> {
        SignalSubscription {
            name: self.name,
            rx: self.tx.subscribe(),
            missed: 0,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

pub struct SignalSubscription<E: Clone> {
    name: &'static str,
    rx: broadcast::Receiver<E>,
    missed: u64,
}

impl<E: Clone + Send + 'static> SignalSubscription<E> {
    /// Waits for the next event. `None` once the owning signal is gone.
    pub async fn recv(&mut self) -> Option<E> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking poll; `None` when nothing is pending.
    pub fn try_recv(&mut self) -> Option<E> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Events dropped because this subscriber fell more than `capacity` behind.
    pub fn missed(&self) -> u64 {
        self.missed
    }

    fn record_lag(&mut self, skipped: u64) {
        self.missed += skipped;
        warn!(signal = self.name, skipped, missed = self.missed, "signal subscriber lagged");
    }

    pub fn into_stream(self) -> impl Stream<Item = E> {
        let name = self.name;
        BroadcastStream::new(self.rx).filter_map(move |item| match item {
            Ok(event) => Some(event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(signal = name, skipped, "signal stream lagged");
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Ping(u32);

    #[test]
    fn emission_without_subscriber_is_not_replayed() {
        let signal = OneShotSignal::new("ping", 4);
        assert_eq!(signal.emit(Ping(1)), 0);

        let mut late = signal.subscribe();
        assert_eq!(late.try_recv(), None);

        assert_eq!(signal.emit(Ping(2)), 1);
        assert_eq!(late.try_recv(), Some(Ping(2)));
        assert_eq!(late.try_recv(), None);
    }

    #[test]
    fn every_active_subscriber_gets_the_event_once() {
        let signal = OneShotSignal::new("ping", 4);
        let mut first = signal.subscribe();
        let mut second = signal.subscribe();
        assert_eq!(signal.subscriber_count(), 2);

        assert_eq!(signal.emit(Ping(9)), 2);
        assert_eq!(first.try_recv(), Some(Ping(9)));
        assert_eq!(second.try_recv(), Some(Ping(9)));
        assert_eq!(first.try_recv(), None);
    }

    #[test]
    fn overflow_beyond_capacity_is_counted_not_hidden() {
        let signal = OneShotSignal::new("ping", 16);
        let mut sub = signal.subscribe();
        for n in 0..20 {
            assert_eq!(signal.emit(Ping(n)), 1);
        }

        let mut delivered = Vec::new();
        while let Some(Ping(n)) = sub.try_recv() {
            delivered.push(n);
        }
        assert_eq!(delivered, (4..20).collect::<Vec<_>>());
        assert_eq!(sub.missed(), 4);
        assert_eq!(delivered.len() as u64 + sub.missed(), 20);
    }

    #[tokio::test]
    async fn recv_counts_lag_before_returning_next_event() {
        let signal = OneShotSignal::new("ping", 2);
        let mut sub = signal.subscribe();
        for n in 0..5 {
            signal.emit(Ping(n));
        }
        assert_eq!(sub.recv().await, Some(Ping(3)));
        assert_eq!(sub.missed(), 3);
        assert_eq!(sub.recv().await, Some(Ping(4)));
        assert_eq!(sub.missed(), 3);
    }

    #[tokio::test]
    async fn recv_ends_when_signal_is_dropped() {
        let signal = OneShotSignal::new("ping", 4);
        let mut sub = signal.subscribe();
        signal.emit(Ping(3));
        drop(signal);
        assert_eq!(sub.recv().await, Some(Ping(3)));
        assert_eq!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn stream_yields_emitted_events() {
        let signal = OneShotSignal::new("ping", 4);
        let stream = signal.subscribe().into_stream();
        signal.emit(Ping(1));
        signal.emit(Ping(2));
        drop(signal);
        let collected: Vec<Ping> = stream.collect().await;
        assert_eq!(collected, vec![Ping(1), Ping(2)]);
    }
}
