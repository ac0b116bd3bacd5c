//! Mock event injector for unit testing.
//!
//! # Why a mock injector?
//!
//! A real injector backend delivers events to the operating system: it
//! actually touches the screen and presses keys on the machine it runs on,
//! needs an injection permission to do so, and offers no way to observe the
//! result from test code.
//!
//! The `MockEventInjector` replaces the OS call with in-memory recording.
//! Every event is pushed into a `Mutex<Vec<InjectedEvent>>` in delivery
//! order, so assertions can inspect exactly what a gesture expanded to.
//!
//! # Usage in tests
//!
//! ```ignore
//! let injector = Arc::new(MockEventInjector::new());
//! let mut dispatcher = InputDispatcher::new(
//!     Arc::new(StaticCapability::granted()),
//!     Arc::clone(&injector),
//!     Arc::new(AndroidKeymap),
//!     ScreenScale::new(1.0),
//!     GestureTiming::default(),
//! );
//!
//! dispatcher.handle_pointer(&message)?;
//!
//! let events = injector.injected.lock().unwrap();
//! assert_eq!(events.len(), 1);
//! ```
//!
//! # `should_fail` flag
//!
//! Call `set_should_fail(true)` to make every `inject` call report
//! rejection, the way the OS does when the injection permission is missing
//! or an event is inconsistent. The flag is atomic so tests can flip it
//! mid-scenario through a shared `Arc` and exercise partial-failure paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tap_core::domain::injected::InjectedEvent;

use crate::application::dispatch_input::{InjectCapability, RawEventInjector};

/// An injector that records all events without performing OS calls.
#[derive(Default)]
pub struct MockEventInjector {
    /// Records every accepted event, in delivery order.
    pub injected: Mutex<Vec<InjectedEvent>>,
    /// When `true`, every `inject` call reports rejection and records
    /// nothing.
    pub should_fail: AtomicBool,
}

impl MockEventInjector {
    /// Creates a new `MockEventInjector` with empty records and
    /// `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failure flag; callable through a shared `Arc`.
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }
}

impl RawEventInjector for MockEventInjector {
    /// Records the event, or rejects it if `should_fail` is set.
    fn inject(&self, event: InjectedEvent) -> bool {
        if self.should_fail.load(Ordering::SeqCst) {
            return false;
        }
        self.injected.lock().unwrap().push(event);
        true
    }
}

/// An [`InjectCapability`] with a fixed answer, for tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct StaticCapability {
    allowed: bool,
}

impl StaticCapability {
    /// A capability that always permits injection.
    pub fn granted() -> Self {
        Self { allowed: true }
    }

    /// A capability that always denies injection.
    pub fn denied() -> Self {
        Self { allowed: false }
    }
}

impl InjectCapability for StaticCapability {
    fn can_inject(&self) -> bool {
        self.allowed
    }
}
