//! Narrow interfaces to the collaborators that live outside the engine: painting, audio and periodic ticks.

use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    Explode,
    Reveal,
    Flag,
    SolvedNeat,
    SolvedEasy,
    SolvedAwesome,
    ResetGame,
    BadChord,
    SolvedSlow,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repaint {
    All,
    Region(Region),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clock {
    /// One tick per elapsed second of play.
    Game,
    /// Frame clock of the explosion after a mine went off.
    Explosion,
}

impl Clock {
    pub const fn interval(self) -> Duration {
        match self {
            Self::Game => Duration::from_millis(1000),
            Self::Explosion => Duration::from_millis(120),
        }
    }
}

pub trait Renderer {
    fn request_repaint(&mut self, repaint: Repaint);
}

/// Fire and forget.
pub trait AudioService {
    fn play(&mut self, sound: Sound);
}

pub trait TickSource {
    fn start(&mut self, clock: Clock);
    fn stop(&mut self, clock: Clock);
    fn is_running(&self, clock: Clock) -> bool;
}

/// Everything the controller talks to while handling an event.
pub trait Host: Renderer + AudioService + TickSource {}

impl<T: Renderer + AudioService + TickSource> Host for T {}

/// Periodic timer that is polled instead of calling back.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntervalTimer {
    interval: Duration,
    started_at: Option<Instant>,
    delivered: u64,
}

impl IntervalTimer {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            started_at: None,
            delivered: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn start_at(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.delivered = 0;
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Number of ticks that came due since the previous poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let interval = self.interval.as_nanos().max(1);
        let due = (now.saturating_duration_since(started_at).as_nanos() / interval) as u64;
        let fresh = due.saturating_sub(self.delivered);
        self.delivered = due;
        fresh.try_into().unwrap_or(u32::MAX)
    }
}

/// Ticks gathered by one [`Clocks::poll`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClockTicks {
    pub game: u32,
    pub explosion: u32,
}

/// Game and explosion clocks driven from the host's event loop.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Clocks {
    game: IntervalTimer,
    explosion: IntervalTimer,
}

impl Clocks {
    pub fn new() -> Self {
        Self {
            game: IntervalTimer::new(Clock::Game.interval()),
            explosion: IntervalTimer::new(Clock::Explosion.interval()),
        }
    }

    pub fn timer(&self, clock: Clock) -> &IntervalTimer {
        match clock {
            Clock::Game => &self.game,
            Clock::Explosion => &self.explosion,
        }
    }

    pub fn timer_mut(&mut self, clock: Clock) -> &mut IntervalTimer {
        match clock {
            Clock::Game => &mut self.game,
            Clock::Explosion => &mut self.explosion,
        }
    }

    pub fn poll(&mut self, now: Instant) -> ClockTicks {
        ClockTicks {
            game: self.game.poll(now),
            explosion: self.explosion.poll(now),
        }
    }
}

impl Default for Clocks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for Clocks {
    fn start(&mut self, clock: Clock) {
        self.timer_mut(clock).start_at(Instant::now());
    }

    fn stop(&mut self, clock: Clock) {
        self.timer_mut(clock).stop();
    }

    fn is_running(&self, clock: Clock) -> bool {
        self.timer(clock).is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_only_reports_new_ticks() {
        let start = Instant::now();
        let mut timer = IntervalTimer::new(Clock::Game.interval());
        assert_eq!(timer.poll(start), 0);

        timer.start_at(start);
        assert_eq!(timer.poll(start + Duration::from_millis(999)), 0);
        assert_eq!(timer.poll(start + Duration::from_millis(2500)), 2);
        assert_eq!(timer.poll(start + Duration::from_millis(2900)), 0);
        assert_eq!(timer.poll(start + Duration::from_millis(3000)), 1);
    }

    #[test]
    fn stopped_timer_is_silent() {
        let start = Instant::now();
        let mut timer = IntervalTimer::new(Clock::Explosion.interval());
        timer.start_at(start);
        timer.stop();

        assert!(!timer.is_running());
        assert_eq!(timer.poll(start + Duration::from_secs(5)), 0);
    }

    #[test]
    fn clocks_run_independently() {
        let mut clocks = Clocks::new();
        let start = Instant::now();
        clocks.timer_mut(Clock::Explosion).start_at(start);

        assert!(clocks.is_running(Clock::Explosion));
        assert!(!clocks.is_running(Clock::Game));
        assert_eq!(
            clocks.poll(start + Duration::from_millis(360)),
            ClockTicks {
                game: 0,
                explosion: 3
            }
        );
    }
}
