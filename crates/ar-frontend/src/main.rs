//! AR placement replay entry point

use std::path::PathBuf;

use ar_core::{ReferenceSpace, ReferenceSpaceKind, Scene};
use ar_frontend::{ArApp, ConfigManager, ReplayScript};
use clap::Parser;

/// Renderer space handed to the app by the scripted runtime
const RENDERER_SPACE: ReferenceSpace = ReferenceSpace {
    id: 0,
    kind: ReferenceSpaceKind::Local,
};

/// Replay a scripted AR placement session
#[derive(Parser, Debug)]
#[command(name = "ar-place", version)]
struct Args {
    /// RON replay script; the built-in demo runs when omitted
    #[arg(long)]
    script: Option<PathBuf>,

    /// Config file to use instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> std::process::ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ar_frontend=debug,ar_core=info,ar_gestures=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let manager = match args.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    tracing::info!("Using config {:?}", manager.config_file_path());
    tracing::info!("Model asset: {}", manager.config().asset.model_path);

    let script = match args.script {
        Some(path) => match ReplayScript::load(&path) {
            Ok(script) => script,
            Err(e) => {
                tracing::error!("Could not load {:?}: {}", path, e);
                return std::process::ExitCode::FAILURE;
            }
        },
        None => ReplayScript::demo(),
    };

    tracing::info!("Replaying {} steps", script.steps.len());
    let mut app = ArApp::new(manager.config(), Scene::new(), RENDERER_SPACE);
    ar_frontend::replay(&mut app, &script);

    match app.placement().object() {
        Some(object) => tracing::info!(
            state = ?app.placement().state(),
            visible = object.visible(),
            position = ?object.transform().position,
            scale = ?object.transform().scale,
            rotation = ?object.transform().rotation,
            "Replay finished"
        ),
        None => tracing::info!("Replay finished without a loaded object"),
    }
    std::process::ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_script_and_config() {
        let args = Args::try_parse_from(["ar-place", "--script", "demo.ron", "--config", "cfg.ron"]).unwrap();
        assert_eq!(args.script, Some(PathBuf::from("demo.ron")));
        assert_eq!(args.config, Some(PathBuf::from("cfg.ron")));

        let args = Args::try_parse_from(["ar-place"]).unwrap();
        assert!(args.script.is_none() && args.config.is_none());
    }

    #[test]
    fn test_missing_path_is_rejected() {
        assert!(Args::try_parse_from(["ar-place", "--script"]).is_err());
        assert!(Args::try_parse_from(["ar-place", "--replay", "x.ron"]).is_err());
    }
}
