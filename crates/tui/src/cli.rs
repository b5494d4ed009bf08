use std::path::PathBuf;

use clap::Parser;

/// Side-by-side hour timelines for several timezones
#[derive(Parser, Debug)]
#[command(name = "tzclock", version, about, long_about = None)]
pub struct Args {
    /// Comma-separated IANA zone ids, left to right
    #[arg(
        short = 't',
        long = "timezones",
        env = "TZCLOCK_TIMEZONES",
        default_value = "UTC",
        value_name = "ZONES"
    )]
    pub timezones: String,

    /// Initial wheel ticks (25 minutes each, negative scrolls back)
    #[arg(long = "scroll", value_name = "TICKS", default_value_t = 0.0, allow_hyphen_values = true)]
    pub scroll: f64,

    /// Render one frame to an SVG file and exit
    #[arg(long = "svg", value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// Print one frame's render commands as JSON and exit
    #[arg(long = "dump-json")]
    pub dump_json: bool,

    /// Frame width in pixels for --svg and --dump-json
    #[arg(long = "width", default_value_t = 780.0, value_parser = parse_extent)]
    pub width: f64,

    /// Frame height in pixels for --svg and --dump-json
    #[arg(long = "height", default_value_t = 630.0, value_parser = parse_extent)]
    pub height: f64,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

// Largest frame side accepted, in pixels.
const MAX_EXTENT: f64 = 100_000.0;

fn parse_extent(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && v > 0.0 && v <= MAX_EXTENT {
        Ok(v)
    } else {
        Err(format!("expected a size in (0, {MAX_EXTENT}] pixels, got {s}"))
    }
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        tzclock_core::logging::default_filter(self.verbosity)
    }
}
