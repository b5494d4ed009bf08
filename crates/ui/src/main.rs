use anyhow::anyhow;
use clap::Parser;
use tzclock_core::Settings;
use tzclock_ui::TzClockApp;

/// Side-by-side hour timelines for several timezones, in a window
#[derive(Parser, Debug)]
#[command(name = "tzclock-gui", version, about, long_about = None)]
struct Args {
    /// Comma-separated IANA zone ids, left to right
    #[arg(
        short = 't',
        long = "timezones",
        env = "TZCLOCK_TIMEZONES",
        default_value = "UTC",
        value_name = "ZONES"
    )]
    timezones: String,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = tzclock_core::logging::default_filter(args.verbosity);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .filter_module("egui", log::LevelFilter::Info)
        .filter_module("eframe", log::LevelFilter::Info)
        .format_timestamp_millis()
        .init();

    let settings = Settings::from_csv(&args.timezones);
    log::info!("starting with {}", settings.to_csv());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([780.0, 630.0])
            .with_title("Timezone Clock"),
        ..Default::default()
    };

    eframe::run_native(
        "tzclock",
        options,
        Box::new(|_cc| Ok(Box::new(TzClockApp::new(settings)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
