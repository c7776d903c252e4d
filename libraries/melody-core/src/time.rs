//! Playback time display helpers

/// Format seconds as `M:SS`
///
/// Negative or non-finite input renders as `00:00`.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "00:00".to_string();
    }
    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.0), "0:09");
        assert_eq!(format_time(200.0), "3:20");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(format_time(59.999), "0:59");
    }

    #[test]
    fn invalid_input_renders_zero() {
        assert_eq!(format_time(-1.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
    }
}
