mod canvas;
mod config;
mod core;
mod domain;
mod export;
mod localize;
mod placement;
mod render;
mod session;
mod widget;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::config::FlyArConfig;
use crate::core::app::{self, App};
use crate::core::console::Console;

#[derive(Parser, Debug)]
#[command(name = "flyar", about = "Place circles and squares on an image and export them as AR objects")]
struct Cli {
    /// Config file (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Object export file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Initial viewport width
    #[arg(long)]
    width: Option<u32>,

    /// Initial viewport height
    #[arg(long)]
    height: Option<u32>,

    /// Image to open on startup
    #[arg(long)]
    image: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    localize::localize();

    let cli = Cli::parse();

    let mut config = FlyArConfig::load(cli.config.as_deref());
    if let Some(output) = cli.output {
        config.export_path = output;
    }
    if let Some(width) = cli.width {
        config.canvas_width = width;
    }
    if let Some(height) = cli.height {
        config.canvas_height = height;
    }

    let mut app = App::new(config, cli.config);
    if let Some(image) = &cli.image {
        app::open_initial(&mut app, image);
    }

    match cli.script {
        Some(script) => {
            let file = File::open(&script)
                .with_context(|| format!("opening script {}", script.display()))?;
            let mut console = Console::new(BufReader::new(file), io::stdout().lock(), false);
            app.run(&mut console)
        }
        None => {
            let mut console = Console::new(io::stdin().lock(), io::stdout().lock(), true);
            app.run(&mut console)
        }
    }
}
