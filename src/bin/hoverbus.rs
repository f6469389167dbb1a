use anyhow::Context;
use hoverbus::{config::ViewerConfig, HoverbusApp};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = HoverbusApp::new(ViewerConfig::default()).context("failed to create the viewer")?;
    app.run().context("viewer stopped with an error")?;
    Ok(())
}
