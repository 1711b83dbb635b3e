/// Per-question remaining time plus the attempt-wide elapsed total, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    elapsed: u32,
}

impl Countdown {
    pub fn new(duration: u32) -> Self {
        Self {
            remaining: duration,
            elapsed: 0,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// One tick: remaining floors at zero, elapsed always advances
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        self.elapsed = self.elapsed.saturating_add(1);
    }

    /// Time spent under a timer that has since been replaced
    pub fn add_elapsed(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    /// New question: only the per-question counter starts over
    pub fn reset(&mut self, duration: u32) {
        self.remaining = duration;
    }

    /// New attempt: both counters start over
    pub fn restart(&mut self, duration: u32) {
        *self = Self::new(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick() {
        let mut countdown = Countdown::new(300);
        for _ in 0..10 {
            countdown.tick();
        }
        assert_eq!(countdown.remaining(), 290);
        assert_eq!(countdown.elapsed(), 10);
    }

    #[test]
    fn test_floors_at_zero() {
        let mut countdown = Countdown::new(2);
        for _ in 0..5 {
            countdown.tick();
        }
        assert_eq!(countdown.remaining(), 0);
        assert_eq!(countdown.elapsed(), 5);
    }

    #[test]
    fn test_add_elapsed_leaves_remaining() {
        let mut countdown = Countdown::new(300);
        countdown.add_elapsed();
        assert_eq!(countdown.remaining(), 300);
        assert_eq!(countdown.elapsed(), 1);
    }

    #[test]
    fn test_reset_keeps_elapsed() {
        let mut countdown = Countdown::new(300);
        countdown.tick();
        countdown.tick();
        countdown.reset(300);
        assert_eq!(countdown.remaining(), 300);
        assert_eq!(countdown.elapsed(), 2);

        countdown.restart(300);
        assert_eq!(countdown.elapsed(), 0);
    }
}
