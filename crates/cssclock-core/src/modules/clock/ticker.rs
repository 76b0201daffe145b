use std::time::Duration;

use log::{debug, error};
use tokio::{
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

use super::Message;
use crate::{ModuleContext, ModuleEventSender};

/// Cadence of the clock re-render.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the background task that publishes a [`Message::Tick`] every
/// [`TICK_INTERVAL`].
///
/// The task lives until [`TickTask::abort`] is called or the owner is dropped.
#[derive(Debug, Default)]
pub struct TickTask {
    handle: Option<JoinHandle<()>>,
}

impl TickTask {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Abort any in-flight tick loop.
    pub fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("clock tick task aborted");
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Spawn the tick loop on the context's runtime, replacing any previous one.
    ///
    /// The interval's immediate first tick is skipped; the owner renders
    /// synchronously before spawning. Late ticks are skipped rather than
    /// replayed because each tick re-samples absolute time anyway.
    pub fn spawn(&mut self, ctx: &ModuleContext, sender: ModuleEventSender<Message>) {
        self.abort();

        let handle = ctx.runtime_handle().spawn(async move {
            let mut ticker = interval(TICK_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let _ = ticker.tick().await;

            loop {
                ticker.tick().await;

                if let Err(err) = sender.try_send(Message::Tick) {
                    error!("failed to publish clock tick: {err}");
                }
            }
        });

        self.handle = Some(handle);
    }
}

impl Drop for TickTask {
    fn drop(&mut self) {
        self.abort();
    }
}
