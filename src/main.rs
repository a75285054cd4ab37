//! Gesture Recognizer - stroke gesture store and recognizer
//!
//! Stores labeled freehand gestures and classifies new input against them.

use std::path::Path;

use gesture_recognizer::app::cli::{Cli, Commands, ConfigAction};
use gesture_recognizer::app::config::Config;
use gesture_recognizer::model::{Gesture, GestureIdGenerator, Stroke, TimedPoint};
use gesture_recognizer::store::{FileProvider, GestureLibrary};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Add { label, input } => {
            run_add(&label, &input, &config)?;
        }
        Commands::Recognize { input, top, json } => {
            run_recognize(&input, top, json, &config)?;
        }
        Commands::List { detailed } => {
            run_list(detailed, &config)?;
        }
        Commands::Remove { label, id } => {
            run_remove(&label, id, &config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

/// Open the configured library, loading the store file when it exists.
fn open_library(config: &Config) -> anyhow::Result<GestureLibrary<FileProvider>> {
    let provider = FileProvider::new(&config.store.path);
    let library = GestureLibrary::new(
        provider,
        config.store.orientation_style,
        config.store.sequence_type,
    );
    if library.provider().exists() {
        library.load()?;
    }
    Ok(library)
}

/// Read a gesture from a JSON file holding strokes of timed points:
/// `[[{"x":0.0,"y":0.0,"timestamp":0}, ...], ...]`.
fn read_gesture_file(path: &Path, ids: &GestureIdGenerator) -> anyhow::Result<Gesture> {
    if !path.exists() {
        anyhow::bail!("Gesture file not found: {:?}", path);
    }
    let content = std::fs::read_to_string(path)?;
    let strokes: Vec<Vec<TimedPoint>> = serde_json::from_str(&content)?;
    if strokes.is_empty() {
        anyhow::bail!("Gesture file {:?} contains no strokes", path);
    }
    let mut gesture = Gesture::new(ids);
    for points in strokes {
        gesture.add_stroke(Stroke::new(points)?);
    }
    Ok(gesture)
}

fn run_add(label: &str, input: &Path, config: &Config) -> anyhow::Result<()> {
    let ids = GestureIdGenerator::new();
    let gesture = read_gesture_file(input, &ids)?;
    let gesture_id = gesture.id();
    let stroke_count = gesture.stroke_count();

    let library = open_library(config)?;
    library.add_gesture(label, gesture)?;
    library.save()?;

    info!(label, gesture_id, stroke_count, "gesture added");
    println!(
        "Added gesture {} under '{}' ({} stroke{})",
        gesture_id,
        label,
        stroke_count,
        if stroke_count == 1 { "" } else { "s" }
    );
    Ok(())
}

fn run_recognize(
    input: &Path,
    top: Option<usize>,
    json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let ids = GestureIdGenerator::new();
    let gesture = read_gesture_file(input, &ids)?;

    let library = open_library(config)?;
    if library.get_gesture_entries().is_empty() {
        anyhow::bail!("The store is empty; add gestures with 'gesture-rec add' first");
    }

    let mut predictions = library.recognize(&gesture)?;
    predictions.retain(|p| p.score >= config.recognition.min_score);
    predictions.truncate(top.unwrap_or(config.recognition.top_k));

    if json {
        println!("{}", serde_json::to_string_pretty(&predictions)?);
        return Ok(());
    }

    if predictions.is_empty() {
        println!("No match");
    } else {
        for (rank, prediction) in predictions.iter().enumerate() {
            println!("{:>2}. {}  ({:.4})", rank + 1, prediction.label, prediction.score);
        }
    }
    Ok(())
}

fn run_list(detailed: bool, config: &Config) -> anyhow::Result<()> {
    let library = open_library(config)?;
    let labels = library.get_gesture_entries();

    if labels.is_empty() {
        println!("No gestures stored in {:?}", config.store.path);
        println!("Add one with: gesture-rec add --label <name> --input <file>");
        return Ok(());
    }

    println!("Gestures in {:?}:", config.store.path);
    for label in &labels {
        let gestures = library.get_gestures(label).unwrap_or_default();
        println!("  {}  ({} example{})", label, gestures.len(), if gestures.len() == 1 { "" } else { "s" });
        if detailed {
            for gesture in &gestures {
                let points: usize = gesture.strokes().iter().map(|s| s.point_count()).sum();
                println!(
                    "    id {}  {} stroke(s), {} point(s)",
                    gesture.id(),
                    gesture.stroke_count(),
                    points
                );
            }
        }
    }
    Ok(())
}

fn run_remove(label: &str, id: Option<u64>, config: &Config) -> anyhow::Result<()> {
    let library = open_library(config)?;

    let removed = match id {
        Some(gesture_id) => library.remove_gesture(label, gesture_id),
        None => library.remove_entry(label),
    };
    if !removed {
        anyhow::bail!("Nothing matched '{}' in the store", label);
    }
    library.save()?;

    match id {
        Some(gesture_id) => println!("Removed gesture {} from '{}'", gesture_id, label),
        None => println!("Removed '{}' and all its gestures", label),
    }
    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    let library = open_library(config)?;
    library.save_forced()?;
    println!("Created store at {:?}", config.store.path);

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
