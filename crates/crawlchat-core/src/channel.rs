//! Status Channel Manager — owns the one live status connection.
//!
//! ```text
//! Closed ──open()──▶ Connecting ──Opened──▶ Open ──terminal event / fault──▶ Closed
//!                        │
//!                        └──TimedOut / fault──▶ Closed
//! ```
//!
//! Every open bumps the generation; signals from older generations are
//! dropped, so a late timer or a message racing a close cannot touch the
//! current crawl.

use std::rc::Rc;
use std::time::Duration;

use crawlchat_types::{
    ClientError, Result,
    event::{ChannelSignal, SignalKind, StatusEvent},
};
use crate::event_bus::EventBus;
use crate::ports::{ChannelHandle, StatusChannelPort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Closed,
    Connecting,
    Open,
}

/// What an accepted signal means for the session.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelUpdate {
    Opened,
    Event(StatusEvent),
    /// The channel has been closed because of this error
    Fault(ClientError),
}

pub struct StatusChannelManager {
    port: Rc<dyn StatusChannelPort>,
    handle: Option<Box<dyn ChannelHandle>>,
    state: ChannelState,
    generation: u64,
    timeout: Duration,
}

impl StatusChannelManager {
    pub fn new(port: Rc<dyn StatusChannelPort>) -> Self {
        Self {
            port,
            handle: None,
            state: ChannelState::Closed,
            generation: 0,
            timeout: Duration::ZERO,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_closed(&self) -> bool {
        self.state == ChannelState::Closed
    }

    /// Open a channel to `url`, closing whatever was open before.
    pub fn open(&mut self, url: &str, timeout: Duration, bus: &EventBus) -> Result<()> {
        self.close();
        self.generation += 1;
        self.timeout = timeout;

        log::info!("Opening status channel #{} to {}", self.generation, url);
        let handle = self.port.open(url, self.generation, timeout, bus.clone())?;
        self.handle = Some(handle);
        self.state = ChannelState::Connecting;
        Ok(())
    }

    /// Release the connection. Closing a closed channel is a no-op.
    pub fn close(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.close();
            log::info!("Status channel #{} closed", self.generation);
        }
        self.state = ChannelState::Closed;
    }

    /// Apply one signal from the adapter. Returns `None` for signals that
    /// are stale or meaningless in the current state.
    pub fn accept(&mut self, signal: ChannelSignal) -> Option<ChannelUpdate> {
        if signal.generation != self.generation || self.state == ChannelState::Closed {
            log::debug!(
                "Ignoring signal from channel #{} (current #{}, {:?})",
                signal.generation,
                self.generation,
                self.state
            );
            return None;
        }

        match signal.kind {
            SignalKind::Opened => {
                if self.state != ChannelState::Connecting {
                    return None;
                }
                self.state = ChannelState::Open;
                log::info!("Status channel #{} open", self.generation);
                Some(ChannelUpdate::Opened)
            }
            SignalKind::TimedOut => {
                if self.state != ChannelState::Connecting {
                    return None;
                }
                log::warn!(
                    "Status channel #{} did not open within {:?}",
                    self.generation,
                    self.timeout
                );
                self.close();
                Some(ChannelUpdate::Fault(ClientError::Timeout(self.timeout.as_secs())))
            }
            SignalKind::Message(raw) => {
                // A message proves the connection is up even if the
                // open notification was lost.
                self.state = ChannelState::Open;
                match StatusEvent::parse(&raw) {
                    Ok(event) => {
                        if event.is_terminal() {
                            self.close();
                        }
                        Some(ChannelUpdate::Event(event))
                    }
                    Err(e) => {
                        log::warn!("Dropping status channel: {}", e);
                        self.close();
                        Some(ChannelUpdate::Fault(e))
                    }
                }
            }
            SignalKind::Fault(reason) => {
                log::warn!("Status channel #{} fault: {}", self.generation, reason);
                self.close();
                Some(ChannelUpdate::Fault(ClientError::Channel(reason)))
            }
        }
    }
}

impl Drop for StatusChannelManager {
    fn drop(&mut self) {
        self.close();
    }
}
