//! Monotonic id generation for order ids.
//!
//! Adapted from the teacher's `IdGen` pattern: a single counter handed out in
//! increasing order, stamped into a human-readable string id rather than a
//! raw integer, since `OrderRequest::id` is a string on the wire.

pub struct IdGen {
    next: u64,
    prefix: &'static str,
}

impl IdGen {
    pub fn new(prefix: &'static str) -> Self {
        Self { next: 0, prefix }
    }

    pub fn next_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        format!("{}-{id}", self.prefix)
    }
}
