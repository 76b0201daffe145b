use std::sync::{Arc, Mutex};

use cssclock_core::event_bus::{BusEvent, EventReceiver};
use log::error;

#[derive(Debug, Clone)]
pub(crate) struct BusFlushOutcome {
    events: Vec<BusEvent>,
    had_error: bool,
}

impl BusFlushOutcome {
    pub(super) fn with_events(events: Vec<BusEvent>, had_error: bool) -> Self {
        Self { events, had_error }
    }

    pub(super) fn had_error(&self) -> bool {
        self.had_error
    }

    pub(super) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(super) fn into_events(self) -> Vec<BusEvent> {
        self.events
    }
}

/// Pull every queued event off the bus without blocking.
pub(super) async fn drain_bus(receiver: Arc<Mutex<EventReceiver>>) -> BusFlushOutcome {
    let mut guard = match receiver.lock() {
        Ok(guard) => guard,
        Err(err) => {
            error!("event bus receiver poisoned: {err}");
            return BusFlushOutcome::with_events(Vec::new(), true);
        }
    };

    let mut events = Vec::new();
    let mut had_error = false;

    loop {
        match guard.try_recv() {
            Ok(Some(event)) => events.push(event),
            Ok(None) => break,
            Err(err) => {
                error!("failed to read event bus payload: {err}");
                had_error = true;
                break;
            }
        }
    }

    BusFlushOutcome::with_events(events, had_error)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use cssclock_core::{
        event_bus::{EventBus, ModuleEvent},
        modules::clock,
    };

    use super::*;

    #[tokio::test]
    async fn drain_collects_queued_events() {
        let bus = EventBus::new(NonZeroUsize::new(4).expect("capacity"));
        bus.publish(BusEvent::Module(ModuleEvent::Clock(clock::Message::Tick)))
            .expect("tick queued");
        bus.publish(BusEvent::Redraw).expect("redraw queued");

        let outcome = drain_bus(Arc::new(Mutex::new(bus.receiver()))).await;

        assert!(!outcome.had_error());
        assert_eq!(outcome.into_events().len(), 2);
    }

    #[tokio::test]
    async fn drain_of_empty_bus_is_empty() {
        let bus = EventBus::new(NonZeroUsize::new(4).expect("capacity"));

        let outcome = drain_bus(Arc::new(Mutex::new(bus.receiver()))).await;

        assert!(outcome.is_empty());
        assert!(!outcome.had_error());
    }
}
