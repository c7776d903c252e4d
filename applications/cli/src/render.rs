//! Text rendering of player state and catalog lists

use melody_core::{format_time, CatalogList};
use melody_playback::{PlaybackState, SessionSnapshot};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// One status line for the player
pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    if snapshot.state == PlaybackState::Failed {
        let reason = snapshot
            .last_error
            .as_ref()
            .map_or_else(|| "unknown error".to_string(), ToString::to_string);
        return format!("Error: {}. Go back and pick another track.", reason);
    }

    let Some(track) = &snapshot.current_track else {
        return "Nothing playing".to_string();
    };

    let icon = if snapshot.is_playing { ">" } else { "||" };
    let mut line = format!(
        "{} {} - {}  [{}] {} / {}",
        icon,
        track.title,
        track.display_artist(),
        progress_bar(snapshot.progress()),
        snapshot.elapsed_display(),
        snapshot.duration_display(),
    );

    let _ = write!(line, "  repeat:{}", snapshot.repeat_mode.icon_name());
    if snapshot.shuffle_enabled {
        line.push_str("  shuffle");
    }
    if snapshot.liked {
        line.push_str("  liked");
    }
    line
}

fn progress_bar(progress: f64) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Catalog overview, one block per list
pub fn render_lists(lists: &[CatalogList]) -> String {
    let mut out = String::new();
    for list in lists {
        let _ = writeln!(out, "{} ({})", list.list_type.display_name(), list.list_type);
        for track in &list.tracks {
            let duration = if track.has_known_duration() {
                format_time(f64::from(track.duration_secs))
            } else {
                "--:--".to_string()
            };
            let _ = writeln!(
                out,
                "  {:<8} {:<32} {:<24} {}",
                track.id.as_str(),
                track.title,
                track.display_artist(),
                duration
            );
        }
    }
    out
}
