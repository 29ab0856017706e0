//! `enroll` — terminal registration wizard.
//!
//! # Usage
//!
//! ```
//! enroll --endpoint http://localhost:5000
//! enroll --config ~/.config/enroll/config.toml --camera ./frame.jpg
//! ```

mod app;
mod camera;
mod ui;

use std::{io, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use camera::AnyCamera;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use enroll_client::{ApiClient, ApiConfig};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "enroll", about = "Terminal registration wizard")]
struct Args {
  /// Path to a TOML config file (endpoint, camera, log_file).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the registration service (default: http://localhost:5000).
  #[arg(long, env = "ENROLL_ENDPOINT")]
  endpoint: Option<String>,

  /// Camera source: an image file standing in for the live feed, or "none".
  #[arg(long, env = "ENROLL_CAMERA")]
  camera: Option<String>,

  /// Log file path; the UI owns the terminal, so logs never go to stdout.
  #[arg(long, value_name = "FILE")]
  log_file: Option<std::path::PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  endpoint: String,
  #[serde(default)]
  camera:   String,
  #[serde(default)]
  log_file: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let endpoint = args
    .endpoint
    .or_else(|| (!file_cfg.endpoint.is_empty()).then(|| file_cfg.endpoint.clone()))
    .unwrap_or_else(|| "http://localhost:5000".to_string());
  let camera_source = args
    .camera
    .or_else(|| (!file_cfg.camera.is_empty()).then(|| file_cfg.camera.clone()))
    .unwrap_or_else(|| "none".to_string());
  let log_file = args.log_file.or_else(|| {
    (!file_cfg.log_file.is_empty()).then(|| file_cfg.log_file.clone().into())
  });

  init_logging(log_file.as_deref()).context("initialising logging")?;

  let client = ApiClient::new(ApiConfig { base_url: endpoint })
    .context("building HTTP client")?;
  let mut app = App::new(client, AnyCamera::from_source(&camera_source));

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

fn init_logging(log_file: Option<&std::path::Path>) -> Result<()> {
  use tracing_subscriber::EnvFilter;

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new("info"));

  match log_file {
    Some(path) => {
      let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    }
    None => {
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::sink)
        .init();
    }
  }
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    // Pick up results from any spawned submission task first, so a finished
    // submit is reflected in the very next frame.
    app.poll_outcomes();

    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) if key.kind != event::KeyEventKind::Release => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
