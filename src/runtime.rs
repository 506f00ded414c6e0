use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Redraw cadence of the front end.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    /// A frame deadline passed.
    Frame,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait GameEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Production event source: a crossterm reader thread feeding a channel.
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Windows reports releases too; only presses type.
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx.send(GameEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(GameEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::error!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that yields the next event, or `Frame` once the frame deadline
/// passes. Deadlines are absolute, so a burst of keystrokes cannot starve
/// or stretch the frame cadence.
pub struct Runner<E: GameEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_frame: Instant,
}

impl<E: GameEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_frame = Instant::now() + ticker.interval();
        Self {
            event_source,
            ticker,
            next_frame,
        }
    }

    pub fn step(&mut self) -> GameEvent {
        let now = Instant::now();
        if now >= self.next_frame {
            return self.frame(now);
        }
        match self.event_source.recv_timeout(self.next_frame - now) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.frame(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(self.next_frame.saturating_duration_since(Instant::now()));
                self.frame(Instant::now())
            }
        }
    }

    fn frame(&mut self, now: Instant) -> GameEvent {
        self.next_frame += self.ticker.interval();
        // Fell behind by more than a frame: resync instead of bursting.
        if self.next_frame <= now {
            self.next_frame = now + self.ticker.interval();
        }
        GameEvent::Frame
    }
}

/// Turns frames into one-second pulses for the countdown.
#[derive(Debug, Clone)]
pub struct SecondPulse {
    frames_per_second: u32,
    frames: u32,
}

impl SecondPulse {
    pub fn new(frame_interval: Duration) -> Self {
        let millis = frame_interval.as_millis().max(1);
        let frames_per_second = (1000 / millis).max(1) as u32;
        Self {
            frames_per_second,
            frames: 0,
        }
    }

    /// Count a frame; true when it completes a second.
    pub fn on_frame(&mut self) -> bool {
        self.frames += 1;
        if self.frames >= self.frames_per_second {
            self.frames = 0;
            true
        } else {
            false
        }
    }

    /// Restart the current second, e.g. when a session starts.
    pub fn reset(&mut self) {
        self.frames = 0;
    }
}

impl Default for SecondPulse {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::mpsc;

    #[test]
    fn step_returns_frame_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let mut runner = Runner::new(es, FixedTicker::new(Duration::from_millis(1)));
        assert_matches!(runner.step(), GameEvent::Frame);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Resize).unwrap();
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        tx.send(GameEvent::Key(key)).unwrap();
        let es = TestEventSource::new(rx);
        let mut runner = Runner::new(es, FixedTicker::new(Duration::from_millis(200)));

        assert_matches!(runner.step(), GameEvent::Resize);
        assert_matches!(runner.step(), GameEvent::Key(k) if k.code == KeyCode::Char('a'));
    }

    #[test]
    fn disconnected_source_still_yields_frames() {
        let (tx, rx) = mpsc::channel::<GameEvent>();
        drop(tx);
        let mut runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(2)),
        );
        for _ in 0..3 {
            assert_matches!(runner.step(), GameEvent::Frame);
        }
    }

    #[test]
    fn pulse_fires_every_ten_frames() {
        let mut pulse = SecondPulse::default();
        let fired: Vec<bool> = (0..20).map(|_| pulse.on_frame()).collect();
        assert_eq!(fired.iter().filter(|f| **f).count(), 2);
        assert!(fired[9]);
        assert!(fired[19]);
    }

    #[test]
    fn pulse_reset_restarts_the_second() {
        let mut pulse = SecondPulse::new(Duration::from_millis(250));
        pulse.on_frame();
        pulse.on_frame();
        pulse.reset();
        assert!(!pulse.on_frame());
        assert!(!pulse.on_frame());
        assert!(!pulse.on_frame());
        assert!(pulse.on_frame());
    }
}
