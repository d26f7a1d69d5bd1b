use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::clock::{Clock, SystemClock};
use crate::stopwatch::{Channel, Stopwatch};

pub const MSG_INVALID: &str = "Invalid Command! Please use S, T, R, or Q.";

/// A single-key command recognised by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    Quit,
}

impl Command {
    /// Map a key press to a command. Keys are matched case-insensitively.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match (key.code, key.modifiers) {
            // Raw mode swallows SIGINT, so Ctrl+C has to quit explicitly.
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Self::Quit),
            (KeyCode::Char(c), _) => match c.to_ascii_lowercase() {
                's' => Some(Self::Start),
                't' => Some(Self::Stop),
                'r' => Some(Self::Reset),
                'q' => Some(Self::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}

/// How a status message should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Started,
    Stopped,
    Reset,
    Invalid,
}

impl From<Channel> for MessageKind {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Started => Self::Started,
            Channel::Stopped => Self::Stopped,
            Channel::Reset => Self::Reset,
        }
    }
}

/// The most recent message shown under the elapsed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

/// Central application state, owned exclusively by the main thread.
pub struct App<C: Clock = SystemClock> {
    /// Whether the app should exit on the next loop iteration.
    pub should_quit: bool,
    pub stopwatch: Stopwatch<C>,
    /// Written by the stopwatch observers, read by the renderer.
    status: Rc<RefCell<Option<StatusMessage>>>,
}

impl App<SystemClock> {
    pub fn new() -> Self {
        Self::with_stopwatch(Stopwatch::new())
    }
}

impl<C: Clock> App<C> {
    /// Wrap a stopwatch and subscribe to all three of its channels.
    pub fn with_stopwatch(mut stopwatch: Stopwatch<C>) -> Self {
        let status = Rc::new(RefCell::new(None));
        for channel in [Channel::Started, Channel::Stopped, Channel::Reset] {
            let status = Rc::clone(&status);
            stopwatch.subscribe(channel, move |text| {
                *status.borrow_mut() = Some(StatusMessage {
                    kind: channel.into(),
                    text: text.to_string(),
                });
            });
        }

        Self {
            should_quit: false,
            stopwatch,
            status,
        }
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.status.borrow().clone()
    }

    /// Dispatch a key press. Unrecognised keys only post a message.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match Command::from_key(key) {
            Some(command) => self.dispatch(command),
            None => {
                warn!(key = ?key.code, "invalid command key");
                *self.status.borrow_mut() = Some(StatusMessage {
                    kind: MessageKind::Invalid,
                    text: MSG_INVALID.to_string(),
                });
            }
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Start => self.stopwatch.start(),
            Command::Stop => self.stopwatch.stop(),
            Command::Reset => self.stopwatch.reset(),
            Command::Quit => self.should_quit = true,
        }
    }

    /// Refresh the live elapsed time before a redraw.
    pub fn on_tick(&mut self) {
        if self.stopwatch.is_running() {
            self.stopwatch.tick();
        }
    }
}
