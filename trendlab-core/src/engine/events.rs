//! Synchronous, single-threaded event bus — no channels, no async runtime.
//! Handlers run in registration order before `publish` returns.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Bar,
    Tick,
    OrderSubmitted,
    OrderFilled,
    OrderCancelled,
    OrderRejected,
    PositionChanged,
    RiskBreach,
    SessionStart,
    SessionEnd,
}

#[derive(Debug, Clone)]
pub enum EventPayload {
    Text(String),
    None,
}

type Handler = Box<dyn FnMut(&EventPayload)>;

#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(EventKind, Handler)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&EventPayload) + 'static,
    {
        self.handlers.push((kind, Box::new(handler)));
    }

    pub fn publish(&mut self, kind: EventKind, payload: EventPayload) {
        for (registered_kind, handler) in self.handlers.iter_mut() {
            if *registered_kind == kind {
                handler(&payload);
            }
        }
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}
