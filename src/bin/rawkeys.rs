// Rawkeys CLI
// Replays recorded raw input and inspects configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use rawkeys_core::{registration_requests, KeyEvent, RawInputProcessor, Settings, Trace};

/// Raw device input normalizer
#[derive(Parser, Debug)]
#[command(name = "rawkeys")]
#[command(version)]
#[command(about = "Normalize raw keyboard and mouse input", long_about = None)]
struct Args {
    /// Settings file (defaults to ~/.config/rawkeys/settings.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a TOML trace of raw notifications and print normalized events
    Replay {
        #[arg(value_name = "TRACE")]
        trace: PathBuf,
    },
    /// Validate the settings file and print the resolved configuration
    CheckSettings,
    /// Print the device registration requests that would be issued
    Registration,
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Settings::load_default().context("failed to load default settings"),
    }
}

fn replay(settings: &Settings, path: &Path) -> anyhow::Result<()> {
    let trace = Trace::from_file(path)
        .with_context(|| format!("failed to load trace {}", path.display()))?;
    let mut processor = RawInputProcessor::from_settings(settings);

    let mut events: Vec<KeyEvent> = Vec::new();
    let summary = trace.replay(&mut processor, &mut events);
    for event in &events {
        println!("{}", event);
    }

    let (dx, dy) = processor.take_motion();
    println!("motion: dx={} dy={}", dx, dy);
    println!(
        "{} decoded, {} ignored, {} released on focus loss",
        summary.decoded, summary.ignored, summary.released
    );
    Ok(())
}

fn check_settings(settings: &Settings) {
    match settings.source_path() {
        Some(path) => println!("Settings: {}", path.display()),
        None => println!("Settings: built-in defaults"),
    }
    println!("  ignore_windows_key = {}", settings.ignore_windows_key());
    let buttons: Vec<String> = settings
        .pointer_buttons()
        .iter()
        .map(|b| b.to_string())
        .collect();
    println!("  pointer buttons = [{}]", buttons.join(", "));
    println!("  keymap overrides = {}", settings.keymap_overrides().len());
    for (vk, key) in settings.keymap_overrides() {
        println!("    {} -> {}", vk, key);
    }
    println!(
        "  mapped virtual keys = {}",
        settings.translation_table().mapped_count()
    );
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let settings = load_settings(args.settings.as_ref())?;
    log::debug!("loaded settings: {:?}", settings);

    match &args.command {
        Command::Replay { trace } => replay(&settings, trace)?,
        Command::CheckSettings => check_settings(&settings),
        Command::Registration => {
            for request in registration_requests(settings.ignore_windows_key()) {
                println!("{}", request);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_replay() {
        let args = Args::parse_from(["rawkeys", "replay", "/tmp/trace.toml"]);
        assert!(!args.verbose);
        assert!(args.settings.is_none());
        match args.command {
            Command::Replay { trace } => assert_eq!(trace, PathBuf::from("/tmp/trace.toml")),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_args_global_options() {
        let args = Args::parse_from([
            "rawkeys",
            "check-settings",
            "--settings",
            "/tmp/settings.toml",
            "--verbose",
        ]);
        assert!(args.verbose);
        assert_eq!(args.settings, Some(PathBuf::from("/tmp/settings.toml")));
        assert!(matches!(args.command, Command::CheckSettings));
    }

    #[test]
    fn test_args_registration() {
        let args = Args::parse_from(["rawkeys", "registration"]);
        assert!(matches!(args.command, Command::Registration));
    }
}
