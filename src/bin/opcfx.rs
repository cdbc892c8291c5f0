use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

use opcfx::{EffectRunner, LinearRgb, effects};

#[derive(Parser, Debug)]
#[command(name = "opcfx", version)]
struct Cli {
    /// Pixel layout JSON (array of `{"point": [x, y, z], ...}` entries).
    #[arg(long)]
    layout: PathBuf,

    /// OPC server, `HOST` or `HOST:PORT` (default port 7890).
    #[arg(long, default_value = "localhost")]
    server: String,

    /// Maximum frame rate in frames per second. Unlimited if omitted.
    #[arg(long)]
    fps: Option<f32>,

    /// Effect to run.
    #[arg(long, value_enum, default_value_t = EffectChoice::Rainbow)]
    effect: EffectChoice,

    /// Color for the `solid` and `wave` effects, as `R,G,B` floats in [0,1].
    #[arg(long, default_value = "1,1,1", value_parser = parse_color)]
    color: LinearRgb,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EffectChoice {
    Solid,
    Wave,
    Rainbow,
}

fn parse_color(s: &str) -> Result<LinearRgb, String> {
    let parts: Vec<&str> = s.split(',').collect();
    let [r, g, b] = parts.as_slice() else {
        return Err("expected three comma-separated values".to_string());
    };
    let chan = |p: &str| p.trim().parse::<f32>().map_err(|e| e.to_string());
    Ok(LinearRgb::new(chan(r)?, chan(g)?, chan(b)?))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut effect: Box<dyn opcfx::Effect> = match cli.effect {
        EffectChoice::Solid => Box::new(effects::Solid::new(cli.color)),
        EffectChoice::Wave => Box::new(effects::Wave::new(cli.color, 0.5, 4.0)),
        EffectChoice::Rainbow => Box::new(effects::Rainbow::default()),
    };

    let mut runner = EffectRunner::new();
    runner
        .set_server(&cli.server)
        .with_context(|| format!("set server '{}'", cli.server))?;
    runner
        .set_layout(&cli.layout)
        .with_context(|| format!("load layout '{}'", cli.layout.display()))?;
    if let Some(fps) = cli.fps {
        runner.set_max_frame_rate(fps).context("set frame rate")?;
    }
    runner.set_effect(effect.as_mut());

    runner.run()
}
