//! Single-threaded queue that carries async completions back to the UI.
//!
//! HTTP tasks, channel callbacks, and timers all `emit` here; the app
//! drains the bus once per frame and feeds each event to the controller,
//! so session state has exactly one writer.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use crawlchat_types::event::{ChannelSignal, ClientEvent, SignalKind};

/// Shared event bus — clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<ClientEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn emit(&self, event: ClientEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Shorthand used by status channel adapters.
    pub fn signal(&self, generation: u64, kind: SignalKind) {
        self.emit(ClientEvent::Channel(ChannelSignal { generation, kind }));
    }

    /// Drain all pending events, oldest first.
    pub fn drain(&self) -> Vec<ClientEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
