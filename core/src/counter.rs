use crate::task::{FrameTask, TaskStatus};

pub const COUNTER_START_DELAY_MS: u32 = 300;
pub const COUNTER_DURATION_MS: f64 = 4000.0;

pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// Formats `value` with `,` thousands separators and a trailing `+`.
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('+');
    out
}

/// Reads a base-10 integer prefix the way `parseInt(raw, 10)` does: leading
/// whitespace and one sign are accepted, anything after the digits is ignored.
/// Magnitudes past `i64::MAX` saturate.
pub fn parse_target(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: i64,
    duration_ms: f64,
    start_ms: Option<f64>,
    text: String,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            start_ms: None,
            text: format_count(0),
        }
    }

    /// Text to display after the most recent tick.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn progress(&self, now_ms: f64) -> f64 {
        let Some(start) = self.start_ms else {
            return 0.0;
        };
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - start).max(0.0) / self.duration_ms).min(1.0)
    }

    pub fn value_at(&self, progress: f64) -> i64 {
        (self.target as f64 * ease_out_quart(progress)).floor() as i64
    }
}

impl FrameTask for CounterAnimation {
    fn tick(&mut self, timestamp_ms: f64) -> TaskStatus {
        if self.start_ms.is_none() {
            self.start_ms = Some(timestamp_ms);
        }
        let progress = self.progress(timestamp_ms);
        if progress < 1.0 {
            self.text = format_count(self.value_at(progress));
            TaskStatus::Continue
        } else {
            self.text = format_count(self.target);
            TaskStatus::Done
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_group_by_thousands() {
        assert_eq!(format_count(0), "0+");
        assert_eq!(format_count(999), "999+");
        assert_eq!(format_count(1000), "1,000+");
        assert_eq!(format_count(1_234_567), "1,234,567+");
        assert_eq!(format_count(-1234), "-1,234+");
    }

    #[test]
    fn parse_target_matches_parse_int_prefix() {
        assert_eq!(parse_target("42"), Some(42));
        assert_eq!(parse_target(" 42px"), Some(42));
        assert_eq!(parse_target("-7"), Some(-7));
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("-"), None);
        assert_eq!(parse_target("12345678901234567890"), Some(i64::MAX));
        assert_eq!(parse_target("-12345678901234567890"), Some(-i64::MAX));
    }

    #[test]
    fn easing_hits_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!(ease_out_quart(0.5) > 0.9);
    }
}
