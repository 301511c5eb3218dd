//! One-shot tick timers scoped to the stage that started them
//!
//! A timer is a plain value: whoever owns it ticks it, and dropping it is
//! the cancellation. Nothing can fire after the owner is gone.

/// Counts down a fixed number of simulation ticks, fires once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTimer {
    remaining: u32,
    fired: bool,
}

impl StageTimer {
    pub fn new(ticks: u32) -> Self {
        Self {
            remaining: ticks,
            fired: false,
        }
    }

    /// Advance one tick. Returns true on the tick the timer expires.
    pub fn tick(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.fired = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_exact_ticks() {
        let mut timer = StageTimer::new(3);
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());
        assert!(timer.fired);
        assert!(!timer.tick());
        assert_eq!(timer.remaining, 0);
    }
}
