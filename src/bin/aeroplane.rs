use anyhow::Context;
use hoverbus::{aeroplane::AeroplaneApp, config::AeroplaneConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = AeroplaneApp::new(AeroplaneConfig::default()).context("failed to create the window")?;
    app.run().context("aeroplane demo stopped with an error")?;
    Ok(())
}
