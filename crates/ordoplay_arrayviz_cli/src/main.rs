// SPDX-License-Identifier: MIT OR Apache-2.0
//! `OrdoPlay` ArrayViz - script driver
//!
//! Runs a visualization script and writes the recorded timeline:
//!
//! ```text
//! ordoplay-arrayviz <script.ron> [output.ron|output.json]
//! ```
//!
//! Without an output path the timeline is printed to stdout as RON.
//! Logging goes to stderr and honors `RUST_LOG`.

mod script;

use ordoplay_arrayviz::Timeline;
use script::{Script, ScriptError};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ordoplay_arrayviz=info,ordoplay_arrayviz_cli=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(script_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: ordoplay-arrayviz <script.ron> [output.ron|output.json]");
        std::process::exit(2);
    };
    let output = args.next().map(PathBuf::from);

    if let Err(e) = run(&script_path, output.as_deref()) {
        tracing::error!("Visualization failed: {e}");
        std::process::exit(1);
    }
}

fn run(script_path: &Path, output: Option<&Path>) -> Result<(), ScriptError> {
    tracing::info!("Loading script {}", script_path.display());
    let script = Script::load(script_path)?;
    let (_, timeline) = script.run()?;

    match output {
        Some(path) => {
            std::fs::write(path, render(&timeline, path)?)?;
            tracing::info!(
                frames = timeline.frame_count(),
                "Wrote timeline to {}",
                path.display()
            );
        }
        None => println!("{}", render(&timeline, Path::new("-.ron"))?),
    }
    Ok(())
}

/// Serialize the timeline in the format picked by the output extension
fn render(timeline: &Timeline, path: &Path) -> Result<String, ScriptError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::to_string_pretty(timeline)?)
    } else {
        Ok(ron::ser::to_string_pretty(
            timeline,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}
