use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub trait TimeSource {
    fn now(&self) -> Duration;
}

pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[derive(Clone, Default)]
pub struct ManualTime {
    millis: Arc<AtomicU64>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Duration) {
        self.millis.store(now.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

#[derive(Clone, Debug, Default)]
pub struct PausableClock {
    paused_total: Duration,
    paused_at: Option<Duration>,
    resume_pending: bool,
    last_raw: Duration,
}

impl PausableClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, raw: Duration) -> Duration {
        let raw = raw.max(self.last_raw);
        self.last_raw = raw;
        if self.resume_pending
            && let Some(paused_at) = self.paused_at.take()
        {
            self.paused_total += raw - paused_at;
            self.resume_pending = false;
        }
        self.now()
    }

    pub fn now(&self) -> Duration {
        let reference = self.paused_at.unwrap_or(self.last_raw);
        reference.saturating_sub(self.paused_total)
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some() && !self.resume_pending
    }

    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(self.last_raw);
        }
        self.resume_pending = false;
    }

    pub fn resume(&mut self) {
        if self.paused_at.is_some() {
            self.resume_pending = true;
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TickGate {
    last_tick: Option<Duration>,
}

impl TickGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.last_tick = None;
    }

    /// The first call only arms the gate.
    pub fn should_tick(&mut self, now: Duration, interval: Duration) -> bool {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return false;
        };
        if now.saturating_sub(last) >= interval {
            self.last_tick = Some(now);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_clock_runs_with_frames() {
        let mut clock = PausableClock::new();
        assert_eq!(clock.observe(ms(100)), ms(100));
        assert_eq!(clock.observe(ms(250)), ms(250));
    }

    #[test]
    fn test_clock_freezes_while_paused() {
        let mut clock = PausableClock::new();
        clock.observe(ms(1_000));
        clock.pause();
        assert!(clock.is_paused());
        assert_eq!(clock.observe(ms(5_000)), ms(1_000));
        assert_eq!(clock.observe(ms(60_000)), ms(1_000));

        clock.resume();
        assert_eq!(clock.observe(ms(61_000)), ms(1_000));
        assert_eq!(clock.observe(ms(61_500)), ms(1_500));
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_clock_ignores_time_going_backwards() {
        let mut clock = PausableClock::new();
        clock.observe(ms(500));
        assert_eq!(clock.observe(ms(400)), ms(500));
    }

    #[test]
    fn test_tick_gate_arms_then_fires_on_interval() {
        let mut gate = TickGate::new();
        let interval = ms(100);
        assert!(!gate.should_tick(ms(0), interval));
        assert!(!gate.should_tick(ms(99), interval));
        assert!(gate.should_tick(ms(100), interval));
        assert!(!gate.should_tick(ms(150), interval));
        assert!(gate.should_tick(ms(216), interval));
        gate.reset();
        assert!(!gate.should_tick(ms(1_000), interval));
    }

    #[test]
    fn test_manual_time_is_shared_between_clones() {
        let time = ManualTime::new();
        let other = time.clone();
        time.set(ms(40));
        other.advance(ms(2));
        assert_eq!(time.now(), ms(42));
    }
}
