use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;

const MOTIVATIONAL_MESSAGES: [&str; 5] = [
    "You're making great progress! Keep pushing forward! 🚀",
    "Every practice test brings you closer to success! 📚",
    "Small steps lead to big achievements! 🎯",
    "Your dedication today shapes your tomorrow! ⭐",
    "Keep going! You're getting better every day! 💪",
];

/// Formats a timestamp the way the history and analysis pages show it, e.g. `Mar 7, 2025`.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Formats a countdown as `m:ss`. Minutes are not capped at 59.
pub fn format_countdown(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn motivational_message() -> &'static str {
    MOTIVATIONAL_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(MOTIVATIONAL_MESSAGES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2025, 3, 7, 18, 30, 0).unwrap();
        assert_eq!(format_date(date), "Mar 7, 2025");
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "0:00");
        assert_eq!(format_countdown(65), "1:05");
        assert_eq!(format_countdown(3600), "60:00");
    }

    #[test]
    fn test_motivational_message_is_from_list() {
        let msg = motivational_message();
        assert!(MOTIVATIONAL_MESSAGES.contains(&msg));
    }
}
