//! Host test interface consumed by the assertion facade.

use std::cell::{Cell, RefCell};

/// Capability set the facade requires from the surrounding test framework.
///
/// The crate never constructs the host itself; tests supply one. Fatal
/// signals are expected to stop the current test (by panicking, as
/// [`PanicHost`] does, or by whatever mechanism the framework provides).
/// Implementations that merely record signals keep executing, which is
/// exactly what makes assertion helpers themselves testable.
pub trait TestHost {
    /// Record a log line.
    fn log(&self, message: &str);
    /// Record a non-fatal failure and continue.
    fn error(&self, message: &str);
    /// Abort the current test immediately, without a message.
    fn fail_now(&self);
    /// Record a fatal failure with a formatted message and abort.
    fn fatal(&self, message: &str);
    /// Whether any failure has been recorded so far.
    fn failed(&self) -> bool;
    /// Mark the current call frame as a helper for stack-trace attribution.
    fn helper(&self);
}

/// Adapter for Rust's built-in test runner.
///
/// Fatal signals panic, which the `#[test]` harness reports as a failure at
/// the panic site. Non-fatal failures are printed and remembered so the
/// failed-state query works inside lax scopes.
#[derive(Debug, Default)]
pub struct PanicHost {
    failed: Cell<bool>,
}

impl PanicHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TestHost for PanicHost {
    fn log(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        self.failed.set(true);
        eprintln!("{message}");
    }

    fn fail_now(&self) {
        self.failed.set(true);
        panic!("test failed");
    }

    fn fatal(&self, message: &str) {
        self.failed.set(true);
        panic!("{message}");
    }

    fn failed(&self) -> bool {
        self.failed.get()
    }

    fn helper(&self) {}
}

/// A single signal received by a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Log(String),
    Error(String),
    Fatal(String),
    FailNow,
}

/// Host that records every signal instead of acting on it.
///
/// Execution continues after fatal signals, so a test can drive the facade
/// through a failure path and then inspect exactly what was reported.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: RefCell<Vec<HostEvent>>,
    failed: Cell<bool>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// All signals received so far, in order.
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    /// Messages of every `Error` signal received so far.
    pub fn error_messages(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                HostEvent::Error(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    /// Messages of every `Fatal` signal received so far.
    pub fn fatal_messages(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                HostEvent::Fatal(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }
}

impl TestHost for RecordingHost {
    fn log(&self, message: &str) {
        self.events
            .borrow_mut()
            .push(HostEvent::Log(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.failed.set(true);
        self.events
            .borrow_mut()
            .push(HostEvent::Error(message.to_string()));
    }

    fn fail_now(&self) {
        self.failed.set(true);
        self.events.borrow_mut().push(HostEvent::FailNow);
    }

    fn fatal(&self, message: &str) {
        self.failed.set(true);
        self.events
            .borrow_mut()
            .push(HostEvent::Fatal(message.to_string()));
    }

    fn failed(&self) -> bool {
        self.failed.get()
    }

    fn helper(&self) {}
}
