//! Terminal event abstraction.
//!
//! A background task polls crossterm and forwards input over a channel so
//! the UI loop can multiplex it with scroll requests and frame timers.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// Input the UI loop reacts to.
#[derive(Debug)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    /// Nothing arrived within the poll interval.
    Idle,
}

impl InputEvent {
    /// Map a raw crossterm event; key releases and repeats-as-release are
    /// dropped so each press acts once.
    fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) if k.kind != KeyEventKind::Release => Some(InputEvent::Key(k)),
            CtEvent::Mouse(m) => Some(InputEvent::Mouse(m)),
            CtEvent::Resize(..) => Some(InputEvent::Resize),
            _ => None,
        }
    }
}

/// Spawn the polling task.  It stops once the receiver is dropped.
pub fn spawn_input_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<InputEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let next = match event::poll(poll_interval) {
            Ok(true) => match event::read() {
                Ok(ev) => InputEvent::from_crossterm(ev),
                Err(err) => {
                    tracing::warn!(%err, "terminal read failed");
                    None
                }
            },
            Ok(false) => Some(InputEvent::Idle),
            Err(err) => {
                tracing::warn!(%err, "terminal poll failed; stopping input reader");
                break;
            }
        };
        if let Some(ev) = next {
            if tx.send(ev).is_err() {
                break; // UI loop gone
            }
        }
    });

    rx
}
