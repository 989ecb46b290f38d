//! Command-line front end.
//!
//! Every command takes or prints a location/query string, so the output of one
//! command can be pasted straight into the next or into a browser.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::{debug, info, warn};

use crate::constants::{EVENT_SEPARATOR, TICK_INTERVAL_MS};
use crate::core::playback::{ManualTickScheduler, PlaybackClock, TickScheduler, TokioTickScheduler};
use crate::core::state_codec::{decode, encode, query_from_location};
use crate::core::url_state::UrlStateStore;
use crate::state::{Event, Mode, StateUpdate, TimelineState};
use crate::timeline::{css_percent, event_position, format_time};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("event {0:?} must look like <timestamp>:<text>")]
    MalformedEvent(String),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid state JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duration {0:?} is not a positive number of seconds")]
    UnplayableDuration(String),
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "url-timeline", version, about = "Annotate a timeline and keep the whole session in a URL")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the state stored in a URL or query string
    Decode {
        location: String,
        /// Print the state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a query string from flags or a JSON state file
    Encode {
        #[arg(long, default_value_t = Mode::Editor)]
        mode: Mode,
        #[arg(long, default_value = "")]
        duration: String,
        /// Event as <timestamp>:<text>; repeatable
        #[arg(long = "event", short = 'e')]
        events: Vec<String>,
        /// Read the whole state from a JSON file instead
        #[arg(long, conflicts_with_all = ["events"])]
        from_json: Option<PathBuf>,
    },
    /// Apply one edit to the state in a URL and print the new query
    Edit {
        location: String,
        #[command(subcommand)]
        op: EditOp,
    },
    /// Play the timeline, printing the playhead once per second
    Play {
        location: String,
        /// Stop after this many seconds even if the timeline is longer
        #[arg(long)]
        limit_seconds: Option<u64>,
        /// Deliver ticks immediately instead of waiting on the wall clock
        #[arg(long)]
        simulate: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum EditOp {
    /// Append an empty row one second after the last event
    AddRow,
    SetMode { mode: Mode },
    SetDuration { duration: String },
    /// Replace every event at OLD with TIMESTAMP:TEXT
    Update { old: String, event: String },
    /// Remove every event at OLD
    Remove { old: String },
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Decode { location, json } => decode_command(&location, json),
        Command::Encode {
            mode,
            duration,
            events,
            from_json,
        } => encode_command(mode, duration, &events, from_json),
        Command::Edit { location, op } => edit_command(&location, op),
        Command::Play {
            location,
            limit_seconds,
            simulate,
        } => play_command(&location, limit_seconds, simulate),
    }
}

fn decode_command(location: &str, json: bool) -> Result<(), CliError> {
    let state = decode(query_from_location(location));
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!("mode: {}", state.mode);
    println!("duration: {} ({})", format_time(state.duration.as_str()), state.duration);
    for evt in &state.events {
        println!(
            "  {}  @ {}",
            evt.summary_line(),
            css_percent(event_position(evt, &state.duration))
        );
    }
    Ok(())
}

fn encode_command(
    mode: Mode,
    duration: String,
    events: &[String],
    from_json: Option<PathBuf>,
) -> Result<(), CliError> {
    let state = match from_json {
        Some(path) => {
            let json = fs::read_to_string(&path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str::<TimelineState>(&json)?
        }
        None => {
            let events = events
                .iter()
                .map(|arg| parse_event_arg(arg))
                .collect::<Result<Vec<_>, _>>()?;
            TimelineState::new(duration, events, mode)
        }
    };
    println!("?{}", encode(&state));
    Ok(())
}

fn edit_command(location: &str, op: EditOp) -> Result<(), CliError> {
    let mut store = UrlStateStore::new(location);
    store.subscribe(|state| {
        info!(
            "State now has {} event(s), mode {}, duration {:?}",
            state.events.len(),
            state.mode,
            state.duration
        )
    });

    match op {
        EditOp::AddRow => store.edit(TimelineState::add_row),
        EditOp::SetMode { mode } => store.apply(StateUpdate::mode(mode)),
        EditOp::SetDuration { duration } => store.apply(StateUpdate::duration(duration)),
        EditOp::Update { old, event } => {
            let replacement = parse_event_arg(&event)?;
            store.edit(|state| state.update_row(&old, Some(replacement)));
        }
        EditOp::Remove { old } => store.edit(|state| state.remove_row(&old)),
    }

    println!("?{}", store.query());
    Ok(())
}

fn play_command(location: &str, limit_seconds: Option<u64>, simulate: bool) -> Result<(), CliError> {
    let state = decode(query_from_location(location));
    let duration = state.duration_seconds();
    if duration.is_nan() || duration <= 0.0 {
        return Err(CliError::UnplayableDuration(state.duration));
    }
    if !state.mode.is_timeline_view() {
        info!("Editor mode: playing its horizontal preview");
    }

    let full_ms = (duration * 1000.0) as u64;
    let stop_ms = limit_seconds
        .map(|secs| secs.saturating_mul(1000).min(full_ms))
        .unwrap_or(full_ms);

    if simulate {
        let scheduler = ManualTickScheduler::new();
        let mut playback = Playback::new(&state, PlaybackClock::new(scheduler.clone()));
        playback.clock.play();
        while playback.clock.elapsed_ms() < stop_ms {
            scheduler.fire(1);
            playback.report(duration);
        }
        debug!("Simulated playback stopped: {:?}", playback.clock.state());
        playback.clock.reset();
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, async {
        let mut playback = Playback::new(&state, PlaybackClock::new(TokioTickScheduler::new()));
        playback.clock.play();
        while playback.clock.elapsed_ms() < stop_ms {
            tokio::time::sleep(Duration::from_millis(TICK_INTERVAL_MS)).await;
            playback.report(duration);
        }
        debug!("Playback stopped: {:?}", playback.clock.state());
        playback.clock.reset();
    });
    Ok(())
}

/// Prints events as the playhead passes them, plus the time once per second.
struct Playback<'a, S: TickScheduler> {
    clock: PlaybackClock<S>,
    upcoming: std::iter::Peekable<std::slice::Iter<'a, Event>>,
    last_second: Option<u64>,
}

impl<'a, S: TickScheduler> Playback<'a, S> {
    fn new(state: &'a TimelineState, clock: PlaybackClock<S>) -> Self {
        Self {
            clock,
            upcoming: state.events.iter().peekable(),
            last_second: None,
        }
    }

    fn report(&mut self, duration: f64) {
        let elapsed_ms = self.clock.elapsed_ms() as f64;
        while let Some(evt) = self
            .upcoming
            .next_if(|evt| evt.timestamp_seconds() * 1000.0 <= elapsed_ms)
        {
            println!("      {}", evt.summary_line());
        }

        let second = self.clock.elapsed_seconds();
        if self.last_second != Some(second) {
            self.last_second = Some(second);
            println!(
                "{:>6} {}",
                format_time(second),
                css_percent(self.clock.position_percent(duration))
            );
        }
    }
}

fn parse_event_arg(arg: &str) -> Result<Event, CliError> {
    let (timestamp, text) = arg
        .split_once(EVENT_SEPARATOR)
        .ok_or_else(|| CliError::MalformedEvent(arg.to_string()))?;
    if text.contains(EVENT_SEPARATOR) {
        warn!(
            "Event text {:?} contains {:?}; it will be cut there when the URL is read back",
            text, EVENT_SEPARATOR
        );
    }
    Ok(Event::new(timestamp, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_arg() {
        assert_eq!(parse_event_arg("10:Start").unwrap(), Event::new("10", "Start"));
        assert_eq!(parse_event_arg("10:a:b").unwrap(), Event::new("10", "a:b"));
        assert!(matches!(
            parse_event_arg("10"),
            Err(CliError::MalformedEvent(arg)) if arg == "10"
        ));
    }

    #[test]
    fn test_cli_parses_encode_flags() {
        let cli = Cli::parse_from([
            "url-timeline",
            "encode",
            "--mode",
            "vertical",
            "--duration",
            "90",
            "-e",
            "5:Intro",
        ]);
        match cli.command {
            Command::Encode { mode, duration, events, from_json } => {
                assert_eq!(mode, Mode::Vertical);
                assert_eq!(duration, "90");
                assert_eq!(events, vec!["5:Intro".to_string()]);
                assert!(from_json.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        let result = Cli::try_parse_from(["url-timeline", "encode", "--mode", "diagonal"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_play_rejects_unplayable_duration() {
        assert!(matches!(
            play_command("?duration=abc", None, true),
            Err(CliError::UnplayableDuration(duration)) if duration == "abc"
        ));
        assert!(matches!(
            play_command("?duration=0", None, true),
            Err(CliError::UnplayableDuration(_))
        ));
    }

    #[test]
    fn test_simulated_play_finishes() {
        play_command("?mode=horizontal&duration=3&e=1%3AOne", Some(2), true).unwrap();
    }
}
