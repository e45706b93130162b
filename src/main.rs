//! Gesture Fuzzy - Motion Gesture Classifier
//!
//! Classifies motion-sensor frames into gestures with a Mamdani fuzzy
//! controller.

use gesture_fuzzy::app::cli::{Cli, Commands, ConfigAction};
use gesture_fuzzy::app::config::Config;
use gesture_fuzzy::gesture::{GestureClassifier, GestureType, SensorFrame, INPUT_NAMES};
use gesture_fuzzy::stream::{ClassificationSlot, FrameRingBuffer, Recording};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Frames drained from the ring buffer per loop iteration
const BATCH_SIZE: usize = 64;

/// Interval between stream status reports
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config. Every command that writes config uses the same path.
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = match &cli.config {
        Some(path) if path.exists() => Config::load(path)?,
        Some(path) => {
            warn!("No config file at {:?}, using defaults", path);
            Config::default()
        }
        None => Config::load_default()?,
    };

    // Execute command
    match cli.command {
        Commands::Classify { input, raw } => {
            run_classify(&input, raw, &config)?;
        }
        Commands::Eval {
            acc_x,
            acc_y,
            acc_z,
            angle_x,
            angle_y,
            angle_z,
            magnitude,
        } => {
            let frame = SensorFrame {
                acceleration_x: acc_x,
                acceleration_y: acc_y,
                acceleration_z: acc_z,
                angle_x,
                angle_y,
                angle_z,
                magnitude,
            };
            run_eval(&frame, &config)?;
        }
        Commands::Stream { raw } => {
            run_stream(raw, &config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config, &config_path)?;
        }
        Commands::Config { action } => {
            run_config(action, &config, &config_path)?;
        }
    }

    Ok(())
}

/// Copy of `config` with smoothing switched off when `raw` is set
fn classifier_config(config: &Config, raw: bool) -> Config {
    let mut config = config.clone();
    if raw {
        config.filter.enabled = false;
    }
    config
}

fn run_classify(input: &std::path::Path, raw: bool, config: &Config) -> anyhow::Result<()> {
    let path = Cli::resolve_recording(input);
    if !path.exists() {
        anyhow::bail!("Recording file not found: {:?}", path);
    }

    let recording = Recording::load(&path)?;
    info!(
        "Loaded recording '{}' with {} frames at {} Hz",
        recording.metadata.name,
        recording.len(),
        recording.metadata.tick_hz
    );

    let mut classifier = GestureClassifier::new(&classifier_config(config, raw))?;
    let mut counts = [0usize; GestureType::ALL.len()];

    for frame in &recording.frames {
        let result = classifier.classify(frame)?;
        println!("{:>6}  {:>8.4}  {}", result.tick, result.score, result.gesture);
        if let Some(index) = GestureType::ALL.iter().position(|g| *g == result.gesture) {
            counts[index] += 1;
        }
    }

    println!("\nSummary ({} frames):", recording.len());
    for (gesture, count) in GestureType::ALL.iter().zip(counts) {
        if count > 0 {
            println!("  {:<13} {}", gesture, count);
        }
    }

    Ok(())
}

fn run_eval(frame: &SensorFrame, config: &Config) -> anyhow::Result<()> {
    let mut classifier = GestureClassifier::new(&classifier_config(config, true))?;
    let result = classifier.classify(frame)?;

    for name in INPUT_NAMES {
        let variable = classifier.controller().input(name)?;
        let memberships: Vec<String> = variable
            .memberships()
            .into_iter()
            .filter(|(_, degree)| *degree > 0.0)
            .map(|(set, degree)| format!("{}={:.3}", set, degree))
            .collect();
        let shown = if memberships.is_empty() {
            "-".to_string()
        } else {
            memberships.join(" ")
        };
        println!("  {:<16} {:>9.3}  {}", name, variable.input(), shown);
    }

    println!("\nScore:   {:.4}", result.score);
    println!("Gesture: {}", result.gesture);

    Ok(())
}

fn run_stream(raw: bool, config: &Config) -> anyhow::Result<()> {
    let mut classifier = GestureClassifier::new(&classifier_config(config, raw))?;

    let buffer = FrameRingBuffer::with_capacity(config.stream.ring_buffer_size)?;
    let stats = buffer.stats();
    let (mut producer, mut consumer) = buffer.split();

    // Set up Ctrl+C handler
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_handler = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_handler.store(true, Ordering::SeqCst);
    })?;

    // Reader thread: stdin -> ring buffer. Dropping the producer on EOF
    // tells the consumer no more frames are coming.
    let reader_stop = stop_flag.clone();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for (line_no, line) in stdin.lock().lines().enumerate() {
            if reader_stop.load(Ordering::SeqCst) {
                break;
            }
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SensorFrame>(&line) {
                Ok(frame) => {
                    if !producer.push(frame) {
                        warn!(line = line_no + 1, "Ring buffer full, dropping frame");
                    }
                }
                Err(e) => warn!(line = line_no + 1, "Skipping malformed frame: {}", e),
            }
        }
        debug!("Sensor input closed");
    });

    // Status reporter reads only the newest completed result
    let slot = ClassificationSlot::new();
    let reporter_slot = slot.clone();
    let reporter_stop = stop_flag.clone();
    let reporter_stats = stats.clone();
    let reporter = std::thread::spawn(move || {
        let mut last_report = Instant::now();
        while !reporter_stop.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(50));
            if last_report.elapsed() < REPORT_INTERVAL {
                continue;
            }
            last_report = Instant::now();
            if let Some(latest) = reporter_slot.latest() {
                info!(
                    tick = latest.tick,
                    gesture = %latest.gesture,
                    dropped = reporter_stats.dropped(),
                    "Stream status"
                );
            }
        }
    });

    info!("Reading frames from stdin... Press Ctrl+C to stop");

    let idle = Duration::from_secs_f64(1.0 / f64::from(config.stream.tick_hz));
    let start_time = Instant::now();

    loop {
        if stop_flag.load(Ordering::SeqCst) {
            break;
        }

        let batch = consumer.pop_batch(BATCH_SIZE);
        if batch.is_empty() {
            if consumer.is_abandoned() && consumer.is_empty() {
                break;
            }
            std::thread::sleep(idle);
            continue;
        }

        for slot_frame in batch {
            match classifier.classify(&slot_frame.frame) {
                Ok(result) => {
                    println!("{}", serde_json::to_string(&result)?);
                    slot.publish(result);
                }
                Err(e) => warn!(sequence = slot_frame.sequence, "Skipping frame: {}", e),
            }
        }
    }

    stop_flag.store(true, Ordering::SeqCst);
    let _ = reporter.join();

    info!(
        "Stream stopped after {:.1}s: {} frames classified, {} dropped, peak occupancy {}",
        start_time.elapsed().as_secs_f64(),
        classifier.ticks(),
        stats.dropped(),
        stats.peak()
    );

    Ok(())
}

fn run_init(force: bool, config: &Config, config_path: &PathBuf) -> anyhow::Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save(config_path)?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    std::fs::create_dir_all(Cli::recordings_dir())?;
    println!("Recordings directory: {:?}", Cli::recordings_dir());

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config, config_path: &PathBuf) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", config_path);
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let value = config.get_value(&key)?;
            println!("{} = {}", key, value);
        }
        ConfigAction::Set { key, value } => {
            if !config_path.exists() {
                anyhow::bail!(
                    "No config file found at {:?}. Run 'gesture-fuzzy init' first.",
                    config_path
                );
            }

            // Nothing is written unless the edited config validates
            let updated = Config::load(config_path)?.with_value(&key, &value)?;
            updated.save(config_path)?;
            println!("Set {} = {}", key, updated.get_value(&key)?);
        }
        ConfigAction::Reset { force } => {
            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            Config::default().save(config_path)?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}
