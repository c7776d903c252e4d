//! Keyboard line parsing for the interactive player

use crate::error::{CliError, Result};
use melody_playback::PlayerCommand;

/// Help text shown by `help` / `?`
pub const HELP: &str = "\
Commands:
  p, play, pause     toggle play/pause
  n, next            next track
  b, prev, previous  previous track (restarts after 3s)
  seek <secs>        jump to a position
  r, repeat          cycle repeat (off -> context -> track)
  s, shuffle         toggle shuffle
  l, like            toggle like
  bg / fg            simulate losing / regaining focus
  q, quit            leave the player";

/// What a typed line asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Forward to the player
    Command(PlayerCommand),
    /// Print help
    Help,
    /// Blank line
    Nothing,
}

/// Parse one line of player input
pub fn parse_line(line: &str) -> Result<Input> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Input::Nothing);
    };
    let head = head.to_ascii_lowercase();

    let command = match head.as_str() {
        "p" | "play" | "pause" => PlayerCommand::TogglePlayPause,
        "n" | "next" => PlayerCommand::Next,
        "b" | "prev" | "previous" => PlayerCommand::Previous,
        "r" | "repeat" => PlayerCommand::CycleRepeat,
        "s" | "shuffle" => PlayerCommand::ToggleShuffle,
        "l" | "like" => PlayerCommand::ToggleLiked,
        "bg" | "blur" => PlayerCommand::FocusLost,
        "fg" | "focus" => PlayerCommand::FocusGained,
        "q" | "quit" | "exit" => PlayerCommand::Close,
        "seek" => {
            let raw = words
                .next()
                .ok_or_else(|| CliError::InvalidArgument("seek needs a position".into()))?;
            PlayerCommand::Seek(parse_position(raw)?)
        }
        "h" | "help" | "?" => return Ok(Input::Help),
        other => return Err(CliError::UnknownCommand(other.to_string())),
    };

    Ok(Input::Command(command))
}

/// Accept plain seconds or `M:SS`
fn parse_position(raw: &str) -> Result<f64> {
    let invalid = || CliError::InvalidArgument(format!("not a position: {}", raw));

    let secs = match raw.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
            let seconds: f64 = seconds.parse().map_err(|_| invalid())?;
            f64::from(minutes) * 60.0 + seconds
        }
        None => raw.parse().map_err(|_| invalid())?,
    };

    if secs.is_finite() {
        Ok(secs)
    } else {
        Err(invalid())
    }
}
