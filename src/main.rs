// SPDX-License-Identifier: MPL-2.0
//! Headless shell around the media session.
//!
//! Reads commands from stdin, one per line, and prints the session state
//! whenever it changes. Timers and backend signals are served on the same
//! single-threaded loop.

use pinview::animation::FrameInterval;
use pinview::config::{self, Config};
use pinview::input::{command_for_key, Key};
use pinview::media::{extensions, FsMediaLoader};
use pinview::session::{Command, MediaSession, SessionSettings};
use pinview::topmost::HeadlessWindow;
use pinview::video_player::ClockBackend;
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type Session = MediaSession<FsMediaLoader, ClockBackend, HeadlessWindow>;

const COMMANDS: &str = "\
commands:
  next | prev                 navigate
  play                        toggle play/pause (video)
  seek <secs>                 jump
  scrub | scrub-to <secs> | release
  speed <x> | faster | slower | loop on|off | interval <ms>
  move | resize-start | resize-end
  top on|off | activate | deactivate | drift
  open <path> | info | fit <height> <screen-width>
  key <left|right|a|d|space>
  quit";

fn help_text() -> String {
    let intervals: Vec<String> = FrameInterval::presets()
        .map(|interval| interval.millis().to_string())
        .collect();
    format!(
        "{COMMANDS}\nintervals (ms): {}\nformats: {}",
        intervals.join(", "),
        extensions::all_supported_extensions().join(", ")
    )
}

struct Args {
    config_path: Option<PathBuf>,
    topmost: bool,
    file: Option<PathBuf>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let config_path = args.opt_value_from_str("--config")?;
    let topmost = args.contains("--topmost");
    let file = args.finish().into_iter().next().map(PathBuf::from);
    Ok(Args {
        config_path,
        topmost,
        file,
    })
}

/// One parsed stdin line.
#[derive(Debug, Clone, PartialEq)]
enum ShellInput {
    Command(Command),
    Key(Key),
    Info,
    Fit { height: f64, screen_width: f64 },
    Drift,
    /// Next or previous speed preset.
    StepSpeed { faster: bool },
    Help,
    Quit,
}

fn parse_switch(value: Option<&str>) -> Result<bool, String> {
    match value {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err("expected on|off".to_string()),
    }
}

fn parse_number<T: std::str::FromStr>(value: Option<&str>) -> Result<T, String> {
    value
        .ok_or_else(|| "missing argument".to_string())?
        .parse()
        .map_err(|_| "invalid number".to_string())
}

fn parse_line(line: &str) -> Result<Option<ShellInput>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let input = match verb {
        "next" => ShellInput::Command(Command::NavigateNext),
        "prev" => ShellInput::Command(Command::NavigatePrevious),
        "play" => ShellInput::Command(Command::TogglePlayPause),
        "seek" => ShellInput::Command(Command::SeekTo(parse_number(arg)?)),
        "scrub" => ShellInput::Command(Command::BeginScrub),
        "scrub-to" => ShellInput::Command(Command::ScrubTo(parse_number(arg)?)),
        "release" => ShellInput::Command(Command::EndScrub),
        "speed" => ShellInput::Command(Command::SetSpeed(parse_number(arg)?)),
        "faster" => ShellInput::StepSpeed { faster: true },
        "slower" => ShellInput::StepSpeed { faster: false },
        "loop" => ShellInput::Command(Command::SetLoop(parse_switch(arg)?)),
        "interval" => ShellInput::Command(Command::SetFrameInterval(parse_number(arg)?)),
        "move" => ShellInput::Command(Command::ActivityPing),
        "resize-start" => ShellInput::Command(Command::BeginResize),
        "resize-end" => ShellInput::Command(Command::EndResize),
        "top" => ShellInput::Command(Command::SetTopmostIntent(parse_switch(arg)?)),
        "activate" => ShellInput::Command(Command::WindowActivated),
        "deactivate" => ShellInput::Command(Command::WindowDeactivated),
        "open" => {
            // Paths may contain spaces
            let path = line.trim_start().strip_prefix("open").unwrap_or_default().trim();
            if path.is_empty() {
                return Err("missing path".to_string());
            }
            ShellInput::Command(Command::OpenWithArgument(PathBuf::from(path)))
        }
        "key" => ShellInput::Key(
            arg.ok_or_else(|| "missing key".to_string())?
                .parse()
                .map_err(|e: pinview::input::UnknownKey| e.to_string())?,
        ),
        "info" => ShellInput::Info,
        "fit" => ShellInput::Fit {
            height: parse_number(arg)?,
            screen_width: parse_number(words.next())?,
        },
        "drift" => ShellInput::Drift,
        "help" | "?" => ShellInput::Help,
        "quit" | "exit" => ShellInput::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(input))
}

/// Applies one stdin line. Returns `false` when the shell should exit.
fn handle_line(session: &mut Session, line: &str) -> bool {
    let input = match parse_line(line) {
        Ok(Some(input)) => input,
        Ok(None) => return true,
        Err(message) => {
            eprintln!("{message} (type `help`)");
            return true;
        }
    };

    let now = Instant::now();
    let command = match input {
        ShellInput::Command(command) => Some(command),
        ShellInput::Key(key) => command_for_key(key, session.current_kind()),
        ShellInput::Info => {
            match session.media_info() {
                Some(info) => println!("{info}"),
                None => println!("nothing displayed"),
            }
            None
        }
        ShellInput::Fit {
            height,
            screen_width,
        } => {
            match session.fitted_window_size(height, screen_width) {
                Some(size) => println!("window {:.0} x {:.0}", size.width, size.height),
                None => println!("size unknown"),
            }
            None
        }
        ShellInput::Drift => {
            session.window_mut().drop_topmost();
            None
        }
        ShellInput::StepSpeed { faster } => {
            let speed = session.preferences().speed;
            let stepped = if faster {
                speed.increase()
            } else {
                speed.decrease()
            };
            Some(Command::SetSpeed(stepped.value()))
        }
        ShellInput::Help => {
            println!("{}", help_text());
            None
        }
        ShellInput::Quit => return false,
    };

    if let Some(command) = command {
        // Failures are already in the snapshot
        if let Err(err) = session.dispatch(command, now) {
            tracing::debug!("command failed: {}", err);
        }
    }
    true
}

async fn run(settings: SessionSettings, file: Option<PathBuf>) {
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let backend = ClockBackend::new(events_tx, Handle::current());
    let mut session: Session = MediaSession::new(
        FsMediaLoader,
        backend,
        HeadlessWindow::new(),
        settings,
        Instant::now(),
    );

    if let Some(file) = file {
        if let Err(err) = session.dispatch(Command::OpenWithArgument(file), Instant::now()) {
            tracing::debug!("initial open failed: {}", err);
        }
    }

    let mut last_printed = session.snapshot().to_string();
    println!("{last_printed}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let deadline = session.next_deadline();
        let timer = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !handle_line(&mut session, &line) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::error!("stdin closed: {}", err);
                    break;
                }
            },
            Some(event) = events_rx.recv() => {
                session.handle_backend_event(event);
            }
            () = timer => {
                session.advance(Instant::now());
            }
        }

        let rendered = session.snapshot().to_string();
        if rendered != last_printed {
            println!("{rendered}");
            last_printed = rendered;
        }
    }

    session.shutdown();
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    loaded.unwrap_or_else(|err| {
        tracing::warn!("Using default settings: {}", err);
        Config::default()
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pinview=info")))
        .init();

    let args = parse_args()?;
    let config = load_config(args.config_path.as_ref());
    let mut settings = SessionSettings::from_config(&config);
    if args.topmost {
        settings.topmost = true;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(settings, args.file));
    Ok(())
}
