mod cli;
mod renderer;

use std::io::{Write, stdout};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tzclock_core::{Drawable, Scrollable, Settings, TimelineView, svg::render_svg};
use tzclock_protocol::Viewport;

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .format_timestamp_millis()
        .init();
    log::debug!("command-line args: {args:?}");

    let settings = Settings::from_csv(&args.timezones);
    let mut view = TimelineView::new(&settings);
    if args.scroll != 0.0 && !view.scroll(args.scroll) {
        log::warn!("ignoring initial scroll of {} ticks", args.scroll);
    }

    if args.svg.is_some() || args.dump_json {
        let viewport = Viewport::new(args.width, args.height);
        let commands = view.draw(Utc::now(), &viewport);
        log::info!("rendered {} commands", commands.len());

        if let Some(path) = &args.svg {
            std::fs::write(path, render_svg(&commands, viewport.width, viewport.height))
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        if args.dump_json {
            let mut out = stdout().lock();
            serde_json::to_writer_pretty(&mut out, &commands)?;
            writeln!(out)?;
        }
        return Ok(());
    }

    renderer::run_tui(&mut view)
}
