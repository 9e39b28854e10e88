use chrono::TimeDelta;

pub trait FormatHM {
    fn format_hm(&self) -> String;
}

/// Whole hours and minutes. Hours are not wrapped at a day, so a 25 hour
/// total prints as `25:00`.
impl FormatHM for TimeDelta {
    fn format_hm(&self) -> String {
        let sign = if *self < TimeDelta::zero() { "-" } else { "" };
        let minutes = self.num_minutes().unsigned_abs();
        format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60)
    }
}
