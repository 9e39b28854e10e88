use chrono::{DateTime, Utc};

use crate::DecodeError;

/// Query window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DecodeError> {
        if start >= end {
            return Err(DecodeError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time < self.end
    }

    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn window_is_half_open() {
        let window = TimeWindow::new(at(1), at(3)).unwrap();
        assert!(window.contains(at(1)));
        assert!(!window.contains(at(3)));
        assert!(window.overlaps(at(0), at(2)));
        assert!(!window.overlaps(at(3), at(4)));
        assert!(!window.overlaps(at(0), at(1)));
    }

    #[test]
    fn empty_window_is_rejected() {
        assert!(matches!(
            TimeWindow::new(at(2), at(2)),
            Err(DecodeError::InvalidWindow { .. })
        ));
    }
}
