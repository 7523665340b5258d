mod render;

use anyhow::Result;
use clap::Parser;
use edfalign_lib::{
    config::Settings,
    io::edf::load_recording,
    plot::{Figure, PlotBackend},
    series::SeriesBuilder,
};
use env_logger::Env;
use log::info;
use render::PngBackend;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "edfalign",
    version,
    about = "Align EDF recordings on a trigger edge and overlay them in one plot"
)]
struct Cli {
    /// Path to the .toml configuration file
    config: PathBuf,
    /// Output image, overriding `general.filename`
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Figure caption
    #[arg(long)]
    title: Option<String>,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::load(&cli.config)?;
    let builder = SeriesBuilder::from_settings(&settings);
    let mut figure = Figure::new(cli.title.clone()).with_axis_labels(
        settings.general.x_label.clone(),
        settings.general.y_label.clone(),
    );

    for descriptor in settings.recordings() {
        let recording = load_recording(&descriptor)?;
        let series = builder.build(recording);
        figure.add_plot_series(&series);
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| settings.general.filename.clone());
    PngBackend::new(&output, (cli.width, cli.height)).draw(&figure)?;
    info!("Plot saved to: {}", output.display());
    Ok(())
}
