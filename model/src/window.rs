use serde::{Deserialize, Serialize};

use crate::time::{TimeOffset, MINUTES_PER_DAY};

/// True if `current` is inside `[begin, end]`. If `end < begin`, the window crosses midnight and
/// includes both sides of the seam.
pub fn is_visible(current: TimeOffset, begin: TimeOffset, end: TimeOffset) -> bool {
    (current >= begin && current <= end) || (end < begin && (current >= begin || current <= end))
}

/// A closed interval of the timeline, possibly wrapping past the end of the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub begin: TimeOffset,
    pub end: TimeOffset,
}

impl Window {
    pub fn new(begin: TimeOffset, end: TimeOffset) -> Self {
        Self { begin, end }
    }

    pub fn contains(&self, current: TimeOffset) -> bool {
        is_visible(current, self.begin, self.end)
    }

    pub fn wraps(&self) -> bool {
        self.end < self.begin
    }

    /// In minutes
    pub fn duration(&self) -> u32 {
        if self.wraps() {
            self.end.inner() + MINUTES_PER_DAY as u32 - self.begin.inner()
        } else {
            self.end.inner() - self.begin.inner()
        }
    }

    /// Minutes since the window began, going around the seam if needed. Only meaningful when the
    /// window contains `current`.
    pub fn elapsed(&self, current: TimeOffset) -> u32 {
        if current >= self.begin {
            current.inner() - self.begin.inner()
        } else {
            current.inner() + MINUTES_PER_DAY as u32 - self.begin.inner()
        }
    }

    /// How far through the window `current` is, in [0, 1]. A single-instant window is always at
    /// the start.
    pub fn progress(&self, current: TimeOffset) -> f64 {
        let duration = self.duration();
        if duration == 0 {
            return 0.0;
        }
        (self.elapsed(current) as f64 / duration as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_time;
    use rstest::rstest;

    fn t(minutes: u32) -> TimeOffset {
        TimeOffset::new(minutes).unwrap()
    }

    #[rstest]
    #[case(100, 100, 200, true)]
    #[case(200, 100, 200, true)]
    #[case(150, 100, 200, true)]
    #[case(99, 100, 200, false)]
    #[case(201, 100, 200, false)]
    #[case(1430, 1400, 30, true)]
    #[case(10, 1400, 30, true)]
    #[case(1400, 1400, 30, true)]
    #[case(30, 1400, 30, true)]
    #[case(1000, 1400, 30, false)]
    #[case(31, 1400, 30, false)]
    #[case(500, 500, 500, true)]
    #[case(501, 500, 500, false)]
    fn membership(
        #[case] current: u32,
        #[case] begin: u32,
        #[case] end: u32,
        #[case] expected: bool,
    ) {
        assert_eq!(is_visible(t(current), t(begin), t(end)), expected);
    }

    #[test]
    fn window_past_midnight() {
        // The timeline only wraps at 06:00, so this is an ordinary window
        let window = Window::new(parse_time("23:00").unwrap(), parse_time("01:00").unwrap());
        assert!(!window.wraps());
        assert_eq!(window.duration(), 120);
        assert!(window.contains(parse_time("00:30").unwrap()));
        assert!(!window.contains(parse_time("12:00").unwrap()));
        assert_eq!(window.elapsed(parse_time("00:30").unwrap()), 90);
        assert_eq!(window.progress(parse_time("00:00").unwrap()), 0.5);
    }

    #[test]
    fn window_crossing_the_seam() {
        // 05:00 to 07:00 spans the end of the cycle
        let window = Window::new(parse_time("05:00").unwrap(), parse_time("07:00").unwrap());
        assert!(window.wraps());
        assert_eq!(window.duration(), 120);
        assert!(window.contains(parse_time("05:30").unwrap()));
        assert!(window.contains(parse_time("06:30").unwrap()));
        assert_eq!(window.progress(parse_time("06:00").unwrap()), 0.5);
    }

    #[test]
    fn instant_window() {
        let window = Window::new(t(42), t(42));
        assert_eq!(window.duration(), 0);
        assert_eq!(window.progress(t(42)), 0.0);
    }
}
