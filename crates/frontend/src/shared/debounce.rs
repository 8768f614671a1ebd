use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Runs only the last scheduled action once `delay_ms` passes without a new one
#[derive(Clone, Copy)]
pub struct Debouncer {
    pending: StoredValue<Option<Timeout>, LocalStorage>,
    delay_ms: u32,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            pending: StoredValue::new_local(None),
            delay_ms,
        }
    }

    pub fn schedule(&self, action: impl FnOnce() + 'static) {
        // dropping the previous Timeout cancels it
        self.pending
            .set_value(Some(Timeout::new(self.delay_ms, action)));
    }

    pub fn cancel(&self) {
        self.pending.set_value(None);
    }
}
