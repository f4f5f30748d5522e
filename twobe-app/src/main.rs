//! TwoBe: open an OBJ model and orbit around it

use anyhow::Context;
use tracing::info;
use twobe_visualization::{InteractiveViewer, ViewerConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twobe=info,twobe_visualization=info,twobe_io=info".into()),
        )
        .init();

    info!("Starting TwoBe by Adobo");
    info!("Controls: Left-click drag to rotate, Scroll to zoom, Click camera icon to screenshot, 'O' to open file");

    InteractiveViewer::new(ViewerConfig::default())
        .run()
        .context("viewer exited with an error")?;

    Ok(())
}
