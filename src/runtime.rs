use std::sync::mpsc::{self, Receiver, RecvError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum PlinkEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
}

/// Source of input and tick events
pub trait PlinkEventSource: Send + 'static {
    /// Block until the next event. Err means the source is exhausted.
    fn recv(&self) -> Result<PlinkEvent, RecvError>;
}

/// Production event source: one channel fed by a crossterm reader thread
/// and a fixed-interval ticker thread. Ticks arrive in-band, so a flood of
/// mouse movement cannot starve the countdown.
pub struct CrosstermEventSource {
    rx: Receiver<PlinkEvent>,
}

impl CrosstermEventSource {
    pub fn new(tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let tick_tx = tx.clone();
        thread::spawn(move || loop {
            if tick_tx.send(PlinkEvent::Tick).is_err() {
                break;
            }
            thread::sleep(tick_interval);
        });

        thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => Some(PlinkEvent::Key(key)),
                Ok(CtEvent::Mouse(mouse)) => Some(PlinkEvent::Mouse(mouse)),
                Ok(CtEvent::Resize(_, _)) => Some(PlinkEvent::Resize),
                Ok(_) => None,
                Err(_) => break,
            };

            if let Some(evt) = evt {
                if tx.send(evt).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl PlinkEventSource for CrosstermEventSource {
    fn recv(&self) -> Result<PlinkEvent, RecvError> {
        self.rx.recv()
    }
}

/// Test event source fed by hand through an mpsc sender
pub struct TestEventSource {
    rx: Receiver<PlinkEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<PlinkEvent>) -> Self {
        Self { rx }
    }
}

impl PlinkEventSource for TestEventSource {
    fn recv(&self) -> Result<PlinkEvent, RecvError> {
        self.rx.recv()
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: PlinkEventSource> {
    event_source: E,
}

impl<E: PlinkEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Blocks for the next event; `None` once the source hangs up.
    pub fn step(&self) -> Option<PlinkEvent> {
        self.event_source.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_passes_through_events_in_order() {
        let (tx, rx) = mpsc::channel();
        tx.send(PlinkEvent::Resize).unwrap();
        tx.send(PlinkEvent::Tick).unwrap();
        let runner = Runner::new(TestEventSource::new(rx));

        assert!(matches!(runner.step(), Some(PlinkEvent::Resize)));
        assert!(matches!(runner.step(), Some(PlinkEvent::Tick)));
    }

    #[test]
    fn step_returns_none_when_the_source_hangs_up() {
        let (tx, rx) = mpsc::channel();
        tx.send(PlinkEvent::Tick).unwrap();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx));

        assert!(matches!(runner.step(), Some(PlinkEvent::Tick)));
        assert!(runner.step().is_none());
    }

    #[test]
    fn crossterm_source_ticks_without_a_terminal() {
        // No raw mode here; the reader thread may exit immediately, but
        // the ticker keeps the channel alive.
        let source = CrosstermEventSource::new(Duration::from_millis(1));
        let runner = Runner::new(source);
        assert!(matches!(runner.step(), Some(_)));
    }
}
