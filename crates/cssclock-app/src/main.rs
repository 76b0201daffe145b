use std::{backtrace::Backtrace, num::NonZeroUsize, panic, path::PathBuf, sync::Arc};

use clap::Parser;
use cssclock_core::{
    adapters::system_clock::SystemWallClock,
    config::{Config, expand_image_path, get_config},
    event_bus::EventBus,
    modules::clock::ClockWidget,
};
use cssclock_gui::{App, get_log_spec};
use cssclock_proto::ports::wall_clock::WallClock;
use flexi_logger::{Age, Cleanup, Criterion, FileSpec, LogSpecBuilder, Logger, Naming};
use log::{debug, error, info};
use masterror::AppError;

const EVENT_BUS_CAPACITY: usize = 16;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    config_path: Option<PathBuf>,

    /// Edge length of the clock face in pixels
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    size: Option<u32>,

    /// Directory holding the clock images
    #[arg(short, long)]
    image_path: Option<String>,

    /// Print the layer layout as CSS for the current time and exit
    #[arg(long)]
    print_layout: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(size) = self.size {
            config.clock.size = size;
        }

        if let Some(image_path) = &self.image_path {
            config.clock.image_path = image_path.clone();
            expand_image_path(&mut config.clock);
        }
    }
}

#[tokio::main]
async fn main() -> iced::Result {
    let args = Args::parse();

    let logger = Logger::with(
        LogSpecBuilder::new()
            .default(log::LevelFilter::Info)
            .build(),
    )
    .log_to_file(FileSpec::default().directory(std::env::temp_dir().join("cssclock")))
    .rotate(
        Criterion::Age(Age::Day),
        Naming::Timestamps,
        Cleanup::KeepLogFiles(7),
    );
    let logger = if cfg!(debug_assertions) {
        logger.duplicate_to_stdout(flexi_logger::Duplicate::All)
    } else {
        logger
    };
    let logger = match logger.start() {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            std::process::exit(1);
        }
    };
    panic::set_hook(Box::new(|info| {
        let b = Backtrace::capture();
        error!("Panic: {info} \n {b}");
    }));
    debug!("args: {args:?}");

    let (mut config, config_path) =
        get_config(args.config_path.clone()).unwrap_or_else(|err: AppError| {
            error!("Failed to read config: {err}");

            std::process::exit(1);
        });
    info!("Using config {config_path:?}");

    args.apply_overrides(&mut config);
    logger.set_new_spec(get_log_spec(&config.log_level));

    let wall_clock: Arc<dyn WallClock> = Arc::new(SystemWallClock);

    if args.print_layout {
        let widget = ClockWidget::assemble(config.clock.clone(), wall_clock);
        print!("{}", widget.layers().css());
        return Ok(());
    }

    let bus = EventBus::new(NonZeroUsize::new(EVENT_BUS_CAPACITY).unwrap_or(NonZeroUsize::MIN));
    let padding = f32::from(config.window.padding) * 2.0;
    let window_size = (
        config.clock.size as f32 + padding,
        config.clock.size as f32 + padding,
    );

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .window_size(window_size)
        .run_with(App::new((
            logger,
            config,
            wall_clock,
            bus.sender(),
            tokio::runtime::Handle::current(),
            bus.receiver(),
        )))
}
