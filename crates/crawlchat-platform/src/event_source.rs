//! Status channel adapter over the browser's `EventSource`.
//!
//! Each `open` creates one `EventSource` plus a gloo-timers `Timeout` that
//! acts as the connect guard. The JS callbacks only push signals onto the
//! event bus; state changes happen when the app drains it.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventSource, MessageEvent};

use crawlchat_core::event_bus::EventBus;
use crawlchat_core::ports::{ChannelHandle, StatusChannelPort};
use crawlchat_types::{ClientError, Result, event::SignalKind};

#[derive(Default)]
pub struct EventSourceChannel;

impl EventSourceChannel {
    pub fn new() -> Self {
        Self
    }
}

impl StatusChannelPort for EventSourceChannel {
    fn open(
        &self,
        url: &str,
        generation: u64,
        timeout: Duration,
        bus: EventBus,
    ) -> Result<Box<dyn ChannelHandle>> {
        let source = EventSource::new(url)
            .map_err(|e| ClientError::JsInterop(format!("EventSource({}): {:?}", url, e)))?;

        let guard: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

        let on_open = {
            let bus = bus.clone();
            let guard = guard.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                // Dropping the Timeout cancels it
                guard.borrow_mut().take();
                bus.signal(generation, SignalKind::Opened);
            }) as Box<dyn FnMut(Event)>)
        };

        let on_message = {
            let bus = bus.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                let kind = match event.data().as_string() {
                    Some(data) => SignalKind::Message(data),
                    None => SignalKind::Fault("status event payload is not text".to_string()),
                };
                bus.signal(generation, kind);
            }) as Box<dyn FnMut(MessageEvent)>)
        };

        let on_error = {
            let bus = bus.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                bus.signal(
                    generation,
                    SignalKind::Fault("connection to the status stream was lost".to_string()),
                );
            }) as Box<dyn FnMut(Event)>)
        };

        source.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        *guard.borrow_mut() = Some(Timeout::new(millis, move || {
            bus.signal(generation, SignalKind::TimedOut);
        }));

        log::debug!("EventSource #{} connecting to {}", generation, url);

        Ok(Box::new(EventSourceHandle {
            generation,
            source: Some(source),
            guard,
            callbacks: Some(Callbacks {
                _on_open: on_open,
                _on_message: on_message,
                _on_error: on_error,
            }),
        }))
    }
}

/// Keeps the JS callbacks alive exactly as long as the connection.
struct Callbacks {
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

struct EventSourceHandle {
    generation: u64,
    source: Option<EventSource>,
    guard: Rc<RefCell<Option<Timeout>>>,
    callbacks: Option<Callbacks>,
}

impl ChannelHandle for EventSourceHandle {
    fn close(&mut self) {
        self.guard.borrow_mut().take();
        if let Some(source) = self.source.take() {
            // Detach before the closures are dropped so JS never calls
            // into freed memory.
            source.set_onopen(None);
            source.set_onmessage(None);
            source.set_onerror(None);
            source.close();
            log::debug!("EventSource #{} closed", self.generation);
        }
        self.callbacks = None;
    }
}

impl Drop for EventSourceHandle {
    fn drop(&mut self) {
        self.close();
    }
}
