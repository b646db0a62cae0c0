use chrono::{DateTime, Utc};

/// Source of the `updatedAt` stamp put on saved templates.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock. On wasm32 chrono reads it through `js_sys::Date`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
