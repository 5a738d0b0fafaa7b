//! Transcript interpretation
//!
//! An ordered rule table maps a free-text transcript to exactly one
//! [`Command`]. The first matching rule wins, so the table order is the
//! priority order and must not be reshuffled: the search trigger
//! ("search ..." / "play ...") is tested before the bare player commands,
//! which means "play it" is a search for "it" rather than a play command,
//! and "exit fullscreen" must be tested before "fullscreen".

use std::sync::OnceLock;

use regex::Regex;

use super::time::parse_time;
use super::{clamp_rate, Command, SEEK_STEP_SECS};

static SEARCH: OnceLock<Regex> = OnceLock::new();
static SEEK_TO: OnceLock<Regex> = OnceLock::new();
static SPEED: OnceLock<Regex> = OnceLock::new();

fn search_re() -> &'static Regex {
    SEARCH.get_or_init(|| Regex::new(r"^(?:search|play)\s+(.+)$").unwrap())
}

fn seek_to_re() -> &'static Regex {
    SEEK_TO.get_or_init(|| Regex::new(r"(?:go to|skip to|jump to)\s+(.+)$").unwrap())
}

fn speed_re() -> &'static Regex {
    SPEED.get_or_init(|| Regex::new(r"speed\s+(\d+(?:\.\d+)?)").unwrap())
}

/// One interpretation rule: a name for diagnostics and a predicate that
/// either claims the transcript or passes it on.
type Rule = (&'static str, fn(&str) -> Option<Command>);

/// Priority-ordered rule table. Earlier entries shadow later ones.
static RULES: &[Rule] = &[
    ("search", rule_search),
    ("seek-to", rule_seek_to),
    ("play", rule_play),
    ("pause", rule_pause),
    ("exit-fullscreen", rule_exit_fullscreen),
    ("fullscreen", rule_fullscreen),
    ("unmute", rule_unmute),
    ("mute", rule_mute),
    ("volume-up", rule_volume_up),
    ("volume-down", rule_volume_down),
    ("seek-forward", rule_seek_forward),
    ("seek-back", rule_seek_back),
    ("next", rule_next),
    ("previous", rule_previous),
    ("faster", rule_faster),
    ("slower", rule_slower),
    ("speed", rule_speed),
];

/// Interpret one finalized transcript as a [`Command`].
///
/// Total: every input produces a command, with `Unknown` as the fallback.
pub fn interpret(transcript: &str) -> Command {
    let text = transcript.trim().to_lowercase();

    for (name, rule) in RULES {
        if let Some(command) = rule(&text) {
            tracing::debug!(rule = *name, command = %command, "matched transcript");
            return command;
        }
    }

    Command::Unknown {
        raw: transcript.trim().to_string(),
    }
}

fn rule_search(text: &str) -> Option<Command> {
    let caps = search_re().captures(text)?;
    Some(Command::Search {
        query: caps[1].trim().to_string(),
    })
}

fn rule_seek_to(text: &str) -> Option<Command> {
    let caps = seek_to_re().captures(text)?;
    let phrase = caps[1].trim();
    match parse_time(phrase) {
        Some(secs) => Some(Command::SeekTo { secs }),
        None => Some(Command::Unknown {
            raw: text.to_string(),
        }),
    }
}

fn rule_play(text: &str) -> Option<Command> {
    text.contains("play").then_some(Command::Play)
}

fn rule_pause(text: &str) -> Option<Command> {
    (text.contains("pause") || text.contains("stop")).then_some(Command::Pause)
}

fn rule_exit_fullscreen(text: &str) -> Option<Command> {
    (text.contains("exit fullscreen") || text.contains("close fullscreen"))
        .then_some(Command::ExitFullscreen)
}

fn rule_fullscreen(text: &str) -> Option<Command> {
    (text.contains("fullscreen") || text.contains("full screen")).then_some(Command::Fullscreen)
}

fn rule_unmute(text: &str) -> Option<Command> {
    (text.contains("unmute") || text.contains("sound on") || text.contains("turn on sound"))
        .then_some(Command::Unmute)
}

fn rule_mute(text: &str) -> Option<Command> {
    text.contains("mute").then_some(Command::Mute)
}

fn rule_volume_up(text: &str) -> Option<Command> {
    text.contains("volume up").then_some(Command::VolumeUp)
}

fn rule_volume_down(text: &str) -> Option<Command> {
    text.contains("volume down").then_some(Command::VolumeDown)
}

fn rule_seek_forward(text: &str) -> Option<Command> {
    (text.contains("skip") || text.contains("forward")).then_some(Command::Seek {
        delta_secs: SEEK_STEP_SECS,
    })
}

fn rule_seek_back(text: &str) -> Option<Command> {
    (text.contains("back") || text.contains("rewind")).then_some(Command::Seek {
        delta_secs: -SEEK_STEP_SECS,
    })
}

fn rule_next(text: &str) -> Option<Command> {
    text.contains("next").then_some(Command::Next)
}

fn rule_previous(text: &str) -> Option<Command> {
    text.contains("previous").then_some(Command::Previous)
}

fn rule_faster(text: &str) -> Option<Command> {
    text.contains("faster").then_some(Command::SpeedUp)
}

fn rule_slower(text: &str) -> Option<Command> {
    text.contains("slower").then_some(Command::SpeedDown)
}

fn rule_speed(text: &str) -> Option<Command> {
    let caps = speed_re().captures(text)?;
    let rate: f64 = caps[1].parse().ok()?;
    Some(Command::SetSpeed {
        rate: clamp_rate(rate),
    })
}
