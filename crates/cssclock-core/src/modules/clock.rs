use std::sync::Arc;

use cssclock_proto::{config::ClockConfig, ports::wall_clock::WallClock};
use log::{debug, info, warn};

use crate::{ModuleContext, event_bus::ModuleEvent};

pub mod angles;
pub mod layers;
pub mod ticker;

use angles::HandAngles;
use layers::ClockLayers;
use ticker::TickTask;

/// Message type for GUI communication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Tick,
}

/// Analog clock assembled from four stacked image layers.
///
/// The three hands are re-rotated from a fresh [`WallClock`] sample on every
/// tick. The widget owns its tick task; [`ClockWidget::dispose`] or dropping
/// the widget stops it.
#[derive(Debug)]
pub struct ClockWidget {
    config: ClockConfig,
    layers: ClockLayers,
    wall_clock: Arc<dyn WallClock>,
    ticker: TickTask,
    ctx: Option<ModuleContext>,
}

impl ClockWidget {
    /// Assemble the layers, render once, and start ticking on the context's
    /// runtime.
    pub fn create(ctx: &ModuleContext, config: ClockConfig, wall_clock: Arc<dyn WallClock>) -> Self {
        let mut widget = Self::assemble(config, wall_clock);

        widget
            .ticker
            .spawn(ctx, ctx.module_sender(ModuleEvent::Clock));
        widget.ctx = Some(ctx.clone());
        info!(
            "clock started ({}px, images from {})",
            widget.config.size,
            widget.config.image_dir().display()
        );

        widget
    }

    /// Assemble the layers and render once without starting the tick task.
    pub fn assemble(config: ClockConfig, wall_clock: Arc<dyn WallClock>) -> Self {
        let layers = ClockLayers::assemble(&config);
        let mut widget = Self {
            config,
            layers,
            wall_clock,
            ticker: TickTask::new(),
            ctx: None,
        };

        widget.render();
        widget
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn layers(&self) -> &ClockLayers {
        &self.layers
    }

    pub fn angles(&self) -> HandAngles {
        self.layers.angles()
    }

    /// Whether the tick task is still running.
    pub fn is_running(&self) -> bool {
        self.ticker.is_active()
    }

    /// Sample the wall clock and rotate the hands to match.
    pub fn render(&mut self) -> HandAngles {
        let now = self.wall_clock.now();
        let angles = HandAngles::from_time(now, self.config.hour_hand);

        self.layers.apply(&angles);
        debug!(
            "clock rendered {now}: hours {}, minutes {}, seconds {}",
            angles.hours, angles.minutes, angles.seconds
        );

        angles
    }

    /// Update clock state from GUI message
    pub fn update(&mut self, message: Message) {
        match message {
            Message::Tick => {
                self.render();
            }
        }
    }

    /// Stop the tick task and ask the surface to redraw once more. The
    /// layers keep their last rotation.
    pub fn dispose(&mut self) {
        if !self.ticker.is_active() {
            return;
        }

        self.ticker.abort();
        info!("clock disposed");

        if let Some(ctx) = self.ctx.take() {
            if let Err(err) = ctx.request_redraw() {
                warn!("failed to request redraw after dispose: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{num::NonZeroUsize, path::Path, time::Duration};

    use cssclock_proto::{
        config::HourHandMode,
        ports::wall_clock::{WallClock, WallTime},
    };
    use tokio::{task::yield_now, time::advance};

    use super::{
        angles::Degrees,
        layers::{LayerRole, LayerSize},
        ticker::TICK_INTERVAL,
        *,
    };
    use crate::{
        event_bus::{BusEvent, EventBus, EventReceiver},
        test_utils::{FixedWallClock, PausedWallClock},
    };

    fn time(hour: u8, minute: u8, second: u8) -> WallTime {
        WallTime::new(hour, minute, second).expect("valid time")
    }

    fn module_context() -> (ModuleContext, EventBus) {
        let bus = EventBus::new(NonZeroUsize::new(16).expect("non-zero capacity"));
        let ctx = ModuleContext::new(bus.sender(), tokio::runtime::Handle::current());

        (ctx, bus)
    }

    fn drain_into(widget: &mut ClockWidget, receiver: &mut EventReceiver) -> usize {
        let mut handled = 0;
        while let Some(event) = receiver.try_recv().expect("queue readable") {
            if let BusEvent::Module(ModuleEvent::Clock(message)) = event {
                widget.update(message);
                handled += 1;
            }
        }
        handled
    }

    #[test]
    fn assemble_renders_immediately() {
        let clock = Arc::new(FixedWallClock::new(time(3, 0, 0)));
        let widget = ClockWidget::assemble(ClockConfig::default(), clock);

        assert_eq!(
            widget.angles(),
            HandAngles {
                hours: Degrees(90.0),
                minutes: Degrees::ZERO,
                seconds: Degrees::ZERO,
            }
        );
        assert!(!widget.is_running());
    }

    #[test]
    fn default_construction_uses_documented_defaults() {
        let clock = Arc::new(FixedWallClock::new(WallTime::MIDNIGHT));
        let widget = ClockWidget::assemble(ClockConfig::default(), clock);
        let layers = widget.layers();

        assert_eq!(widget.config().size, 256);
        for layer in layers.iter() {
            assert_eq!(layer.size(), LayerSize::square(256));
        }
        assert_eq!(
            layers.get(LayerRole::Background).source(),
            Path::new("images/clock-background.png")
        );
        assert_eq!(
            layers.get(LayerRole::Hours).source(),
            Path::new("images/clock-hours.png")
        );
        assert_eq!(
            layers.get(LayerRole::Minutes).source(),
            Path::new("images/clock-minutes.png")
        );
        assert_eq!(
            layers.get(LayerRole::Seconds).source(),
            Path::new("images/clock-seconds.png")
        );
    }

    #[test]
    fn render_tracks_the_current_sample() {
        let clock = Arc::new(FixedWallClock::new(time(0, 15, 30)));
        let mut widget = ClockWidget::assemble(ClockConfig::default(), clock.clone());

        assert_eq!(widget.angles().hours, Degrees(6.0));
        assert_eq!(widget.angles().minutes, Degrees(90.0));
        assert_eq!(widget.angles().seconds, Degrees(180.0));

        clock.set(time(12, 0, 0));
        let angles = widget.render();

        assert_eq!(angles.hours, Degrees(360.0));
        assert_eq!(angles, widget.angles());
    }

    #[test]
    fn rendering_twice_in_one_second_is_idempotent() {
        let clock = Arc::new(FixedWallClock::new(time(9, 41, 7)));
        let mut widget = ClockWidget::assemble(ClockConfig::default(), clock);

        let first = widget.render();
        let second = widget.render();

        assert_eq!(first, second);
    }

    #[test]
    fn whole_hour_mode_is_honoured() {
        let clock = Arc::new(FixedWallClock::new(time(14, 50, 0)));
        let config = ClockConfig {
            hour_hand: HourHandMode::Whole,
            ..ClockConfig::default()
        };
        let widget = ClockWidget::assemble(config, clock);

        assert_eq!(widget.angles().hours, Degrees(60.0));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_follow_wall_clock_without_drift() {
        let (ctx, bus) = module_context();
        let mut receiver = bus.receiver();
        let clock = Arc::new(PausedWallClock::starting_at(time(11, 59, 30)));
        let mut widget = ClockWidget::create(&ctx, ClockConfig::default(), clock.clone());
        yield_now().await;

        assert!(widget.is_running());

        for _ in 0..75 {
            advance(TICK_INTERVAL).await;
            yield_now().await;

            assert_eq!(drain_into(&mut widget, &mut receiver), 1);

            let expected = HandAngles::from_time(clock.now(), HourHandMode::Quantized);
            assert_eq!(widget.angles(), expected);
        }

        assert_eq!(clock.now(), time(12, 0, 45));
        widget.dispose();
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_ticks_self_correct() {
        let (ctx, bus) = module_context();
        let mut receiver = bus.receiver();
        let clock = Arc::new(PausedWallClock::starting_at(time(8, 0, 0)));
        let mut widget = ClockWidget::create(&ctx, ClockConfig::default(), clock.clone());
        yield_now().await;

        advance(Duration::from_millis(4_500)).await;
        yield_now().await;

        assert_eq!(drain_into(&mut widget, &mut receiver), 1);
        assert_eq!(widget.angles().seconds, Degrees(24.0));
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_stops_rendering() {
        let (ctx, bus) = module_context();
        let mut receiver = bus.receiver();
        let clock = Arc::new(PausedWallClock::starting_at(time(1, 2, 3)));
        let mut widget = ClockWidget::create(&ctx, ClockConfig::default(), clock);
        yield_now().await;

        widget.dispose();
        assert!(!widget.is_running());
        let frozen = widget.angles();

        advance(TICK_INTERVAL * 5).await;
        yield_now().await;

        assert_eq!(drain_into(&mut widget, &mut receiver), 0);
        assert_eq!(widget.angles(), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_requests_one_redraw() {
        let (ctx, bus) = module_context();
        let clock = Arc::new(FixedWallClock::new(time(4, 0, 0)));
        let mut widget = ClockWidget::create(&ctx, ClockConfig::default(), clock);
        yield_now().await;

        widget.dispose();
        widget.dispose();

        let events = bus.drain().expect("drain");
        let redraws = events
            .iter()
            .filter(|event| matches!(event, BusEvent::Redraw))
            .count();
        assert_eq!(redraws, 1);
    }
}
