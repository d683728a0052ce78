//! Frame-delta timers
//!
//! Nothing here reads a clock: callers feed the frame delta (seconds) in,
//! which keeps timers deterministic and trivially testable.

/// Accumulated time in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    time: f32,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, delta: f32) {
        self.time += delta;
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }

    pub fn secs(&self) -> f32 {
        self.time
    }

    pub fn millis(&self) -> f32 {
        self.time * 1_000.0
    }

    pub fn micros(&self) -> f32 {
        self.time * 1_000_000.0
    }
}

/// Fires every `period` seconds, or once when one-shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alarm {
    timer: Timer,
    period: f32,
    one_shot: bool,
    fired: bool,
}

impl Alarm {
    pub fn repeating(period: f32) -> Self {
        Self {
            timer: Timer::new(),
            period,
            one_shot: false,
            fired: false,
        }
    }

    pub fn one_shot(period: f32) -> Self {
        Self {
            one_shot: true,
            ..Self::repeating(period)
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Time accumulated towards the next firing
    pub fn elapsed(&self) -> f32 {
        self.timer.secs()
    }

    /// Advance by `delta`; true on the tick the period is reached.
    ///
    /// Overshoot carries into the next period. A one-shot alarm stops
    /// ticking after it fires.
    pub fn on_alarm(&mut self, delta: f32) -> bool {
        if self.one_shot && self.fired {
            return false;
        }
        self.timer.tick(delta);
        if self.timer.secs() >= self.period {
            self.timer.time -= self.period;
            self.fired = true;
            return true;
        }
        false
    }

    /// Start over, re-arming a one-shot alarm
    pub fn reset(&mut self) {
        self.timer.reset();
        self.fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_units() {
        let mut timer = Timer::new();
        timer.tick(0.25);
        timer.tick(0.25);
        assert_eq!(timer.secs(), 0.5);
        assert_eq!(timer.millis(), 500.0);
        assert_eq!(timer.micros(), 500_000.0);
        timer.reset();
        assert_eq!(timer.secs(), 0.0);
    }

    #[test]
    fn test_repeating_alarm_carries_overshoot() {
        let mut alarm = Alarm::repeating(1.0);
        assert!(!alarm.on_alarm(0.75));
        assert!(alarm.on_alarm(0.5));
        assert_eq!(alarm.elapsed(), 0.25);
        assert!(!alarm.on_alarm(0.5));
        assert!(alarm.on_alarm(0.25));
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut alarm = Alarm::one_shot(0.5);
        assert!(alarm.on_alarm(0.5));
        assert!(!alarm.on_alarm(0.5));
        assert!(!alarm.on_alarm(10.0));
        assert_eq!(alarm.elapsed(), 0.0);

        alarm.reset();
        assert!(alarm.on_alarm(1.0));
    }
}
