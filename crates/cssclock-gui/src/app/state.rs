use std::sync::{Arc, Mutex};

use cssclock_core::{
    ModuleContext,
    event_bus::{EventReceiver, EventSender},
    modules::clock::{self, ClockWidget},
};
use cssclock_proto::{config::Config, ports::wall_clock::WallClock};
use flexi_logger::LoggerHandle;
use iced::Task;
use tokio::runtime::Handle;

use super::{bus::BusFlushOutcome, micro_ticker::MicroTicker};

pub struct App {
    pub(super) logger: LoggerHandle,
    pub(super) bus_receiver: Arc<Mutex<EventReceiver>>,
    pub(super) micro_ticker: MicroTicker,
    pub config: Config,
    pub clock: ClockWidget,
}

#[derive(Debug, Clone)]
pub enum Message {
    None,
    MicroTick,
    BusFlushed(BusFlushOutcome),
    Clock(clock::Message),
}

impl App {
    pub fn new(
        (logger, config, wall_clock, event_sender, runtime_handle, bus_receiver): (
            LoggerHandle,
            Config,
            Arc<dyn WallClock>,
            EventSender,
            Handle,
            EventReceiver,
        ),
    ) -> impl FnOnce() -> (Self, Task<Message>) {
        move || {
            let module_context = ModuleContext::new(event_sender, runtime_handle);
            let clock = ClockWidget::create(&module_context, config.clock.clone(), wall_clock);

            let app = App {
                logger,
                bus_receiver: Arc::new(Mutex::new(bus_receiver)),
                micro_ticker: MicroTicker::default(),
                config,
                clock,
            };

            (app, Task::none())
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.clock.dispose();
        self.logger.flush();
    }
}
