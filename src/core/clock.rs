use super::config::DayConfig;

/// Day timer.
///
/// Frame counting and game-seconds are kept apart: `advance_frame` reports when a
/// game-second is due, `tick_second` spends one second of the day. Tests drive
/// `tick_second` directly without any frames.
#[derive(Debug, Clone)]
pub struct DayClock {
    frames_per_second: u32,
    frame_counter: u32,
    day_length: u32,
    remaining: u32,
}

impl DayClock {
    pub fn new(config: &DayConfig) -> Self {
        Self {
            frames_per_second: config.frames_per_second.max(1),
            frame_counter: 0,
            day_length: config.day_length_secs,
            remaining: config.day_length_secs,
        }
    }

    /// Count one render frame. Returns true when a game-second is due.
    pub fn advance_frame(&mut self) -> bool {
        self.frame_counter += 1;
        if self.frame_counter >= self.frames_per_second {
            self.frame_counter = 0;
            return true;
        }
        false
    }

    pub fn tick_second(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn elapsed(&self) -> u32 {
        self.day_length - self.remaining
    }

    pub fn is_over(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_every_n_frames() {
        let mut clock = DayClock::new(&DayConfig::default());
        let due: Vec<bool> = (0..48).map(|_| clock.advance_frame()).collect();
        assert_eq!(due.iter().filter(|d| **d).count(), 2);
        assert!(due[23]);
        assert!(due[47]);
        assert!(!due[22]);
    }

    #[test]
    fn test_countdown() {
        let mut clock = DayClock::new(&DayConfig {
            day_length_secs: 2,
            frames_per_second: 24,
        });
        clock.tick_second();
        assert_eq!(clock.remaining(), 1);
        assert_eq!(clock.elapsed(), 1);
        clock.tick_second();
        clock.tick_second();
        assert!(clock.is_over());
        assert_eq!(clock.remaining(), 0);
    }
}
