//! Assertion facade: named assertions over the equality engine.

use crate::convert::{type_name_of, ToValue};
use crate::engine;
use crate::host::TestHost;
use crate::render;
use crate::value::{Repr, Value};
use std::backtrace::Backtrace;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// Facade configuration.
#[derive(Debug, Clone)]
pub struct AsserterConfig {
    /// Poll interval for [`Asserter::retry`].
    pub retry_interval: Duration,
}

impl Default for AsserterConfig {
    fn default() -> Self {
        Self {
            retry_interval: Duration::from_millis(100),
        }
    }
}

/// Stateful assertion wrapper bound to a host test interface.
///
/// Starts in strict mode, where a failed assertion reports fatally and the
/// host aborts the test. A lax child created by [`Asserter::lax`] reports
/// failures non-fatally instead, and the parent escalates once the lax scope
/// returns. Strictness is monotonic: a child never relaxes its parent.
pub struct Asserter<'a> {
    host: &'a dyn TestHost,
    config: AsserterConfig,
    lax: bool,
    failed: Cell<bool>,
}

impl<'a> Asserter<'a> {
    /// Create a strict asserter with default configuration.
    pub fn new(host: &'a dyn TestHost) -> Self {
        Self::with_config(host, AsserterConfig::default())
    }

    /// Create a strict asserter with custom configuration.
    pub fn with_config(host: &'a dyn TestHost, config: AsserterConfig) -> Self {
        Self {
            host,
            config,
            lax: false,
            failed: Cell::new(false),
        }
    }

    /// Assert that `x` and `y` are structurally equal under relaxed numeric
    /// conversion. Embeds a structural diff in the failure message when the
    /// values render differently.
    pub fn equal(&self, x: impl ToValue, y: impl ToValue) {
        let x = x.to_value();
        let y = y.to_value();
        if !engine::equal(&x, &y) {
            self.fail(failure_with_diff("Objects should be equal", &x, &y));
        }
    }

    /// Assert that at least one candidate equals `x`.
    pub fn equals_any<T: ToValue>(&self, x: impl ToValue, candidates: &[T]) {
        let x = x.to_value();
        let candidates: Vec<Value> = candidates.iter().map(ToValue::to_value).collect();
        if candidates.iter().any(|y| engine::equal(&x, y)) {
            return;
        }
        let list = Value::seq(type_name_of::<[T]>(), Some(candidates));
        self.fail(failure_with_diff(
            "One of the list of objects should be equal to the first argument",
            &x,
            &list,
        ));
    }

    /// Assert that `x` and `y` are not structurally equal.
    pub fn not_equal(&self, x: impl ToValue, y: impl ToValue) {
        let x = x.to_value();
        let y = y.to_value();
        if engine::equal(&x, &y) {
            self.fail(failure_with_values("Objects should not be equal", &x, &y));
        }
    }

    /// Assert that a result is an error.
    pub fn err<T: fmt::Debug, E: fmt::Debug>(&self, result: &Result<T, E>) {
        if result.is_ok() {
            self.fail(format!(
                "({}) Error should not be nil ({:?})",
                type_name_of::<Result<T, E>>(),
                result
            ));
        }
    }

    /// Assert that a result is not an error.
    pub fn not_err<T: fmt::Debug, E: fmt::Debug>(&self, result: &Result<T, E>) {
        if result.is_err() {
            self.fail(format!(
                "({}) Error should be nil ({:?})",
                type_name_of::<Result<T, E>>(),
                result
            ));
        }
    }

    /// Assert that a value is nil.
    pub fn nil(&self, object: impl ToValue) {
        let v = object.to_value();
        if !engine::is_nil(&v) {
            self.fail(failure_with_value("Object should be nil", &v));
        }
    }

    /// Assert that a value is not nil.
    pub fn not_nil(&self, object: impl ToValue) {
        let v = object.to_value();
        if engine::is_nil(&v) {
            self.fail(failure_with_value("Object should not be nil", &v));
        }
    }

    /// Assert that a condition holds.
    pub fn is_true(&self, condition: bool) {
        if !condition {
            self.fail(failure_with_value(
                "Bool should be true",
                &condition.to_value(),
            ));
        }
    }

    /// Assert that a condition does not hold.
    pub fn is_false(&self, condition: bool) {
        if condition {
            self.fail(failure_with_value(
                "Bool should not be true",
                &condition.to_value(),
            ));
        }
    }

    /// Assert that a value is the zero value of its type.
    pub fn zero(&self, object: impl ToValue) {
        let v = object.to_value();
        if !engine::is_zero(&v) {
            self.fail(failure_with_value("Object should be zero value", &v));
        }
    }

    /// Assert that a value is not the zero value of its type.
    pub fn not_zero(&self, object: impl ToValue) {
        let v = object.to_value();
        if engine::is_zero(&v) {
            self.fail(failure_with_value("Object should not be zero value", &v));
        }
    }

    /// Assert that a sequence contains an element equal to `object`.
    ///
    /// Passing a non-sequence is a misuse of the assertion, not a false
    /// condition, and reports fatally regardless of strictness mode.
    pub fn contained_by_slice(&self, object: impl ToValue, sequence: impl ToValue) {
        let object = object.to_value();
        let sequence = sequence.to_value();

        let Repr::Seq(elems) = &sequence.repr else {
            self.host.helper();
            self.host
                .fatal("contained_by_slice received a non-sequence argument");
            return;
        };

        if let Some(elems) = elems {
            if elems.iter().any(|e| engine::equal(e, &object)) {
                return;
            }
        }

        self.fail(failure_with_values(
            "Slice does not contain object",
            &sequence,
            &object,
        ));
    }

    /// Assert that a sequence, mapping or channel has the given length.
    pub fn len(&self, object: impl ToValue, length: usize) {
        let v = object.to_value();
        match engine::get_len(&v) {
            Some(actual) if actual == length => {}
            Some(actual) => {
                let msg = format!("Expected object of length {actual} to be length {length}");
                self.fail(failure_with_value(&msg, &v));
            }
            None => {
                self.fail(failure_with_value(
                    "Object was not of a sequence, mapping or channel kind",
                    &v,
                ));
            }
        }
    }

    /// Assert that invoking `f` panics.
    pub fn panics(&self, f: impl FnOnce()) {
        if panic::catch_unwind(AssertUnwindSafe(f)).is_ok() {
            self.fail("Expected function to panic".to_string());
        }
    }

    /// Assert that `f` returns true within `timeout`, polling at the
    /// configured interval. This is the only blocking operation; it sleeps
    /// cooperatively between polls and cancels on timeout expiry only.
    pub fn retry(&self, timeout: Duration, mut f: impl FnMut() -> bool) {
        let start = Instant::now();
        loop {
            if f() {
                return;
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                self.fail(format!(
                    "Expected function to return true within {timeout:?}"
                ));
                return;
            }
            std::thread::sleep(self.config.retry_interval.min(timeout - elapsed));
        }
    }

    /// Run a batch of soft assertions exhaustively.
    ///
    /// The child shares the host but reports non-fatally, so every failing
    /// assertion inside the scope emits its message. Once the scope returns,
    /// any child failure escalates into one immediate abort on the parent's
    /// host.
    pub fn lax(&self, f: impl FnOnce(&Asserter<'_>)) {
        let child = Asserter {
            host: self.host,
            config: self.config.clone(),
            lax: true,
            failed: Cell::new(false),
        };
        f(&child);

        if child.failed.get() {
            self.host.helper();
            self.host.fail_now();
        }
    }

    fn fail(&self, message: String) {
        self.host.helper();
        if self.lax {
            self.failed.set(true);
            self.host.error(&message);
        } else {
            self.host.fatal(&message);
        }
    }
}

/// Guard an assertion body against panics.
///
/// Runs `f` and catches any unwind. If the host has not already recorded
/// failure, the panic payload and a captured backtrace are logged and the
/// host is marked failed non-fatally (a further abort during recovery would
/// be unsafe). The panic never propagates past this call.
pub fn recover(host: &dyn TestHost, f: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
        if !host.failed() {
            host.helper();
            // Deref past the Box: `&payload` would downcast against the Box
            // itself and never match the payload inside.
            host.log(&format!("panic: {} [recovered]", panic_message(&*payload)));
            host.log(&Backtrace::force_capture().to_string());
            host.error("test panicked");
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn failure_with_value(message: &str, object: &Value) -> String {
    format!(
        "({}) {} ({})",
        object.type_name,
        message,
        render::compact(object)
    )
}

fn failure_with_values(message: &str, x: &Value, y: &Value) -> String {
    format!(
        "({}, {}) {} ({}, {})",
        x.type_name,
        y.type_name,
        message,
        render::compact(x),
        render::compact(y)
    )
}

fn failure_with_diff(message: &str, x: &Value, y: &Value) -> String {
    let diff = engine::diff(x, y);
    let mut s = format!("({}, {}) {}", x.type_name, y.type_name, message);
    if !diff.is_empty() {
        s.push_str(":\n");
        s.push_str(&diff);
    }
    s
}
