//! attest - structural assertion toolkit for test suites.
//!
//! A relaxed structural-equality engine (cross-width numeric equality,
//! uniform nil/zero classification, human-readable diffs) behind a thin
//! assertion facade that reports through a pluggable host test interface.

pub mod asserter;
pub mod convert;
pub mod engine;
pub mod host;
pub mod render;
pub mod value;

pub use asserter::{recover, Asserter, AsserterConfig};
pub use convert::{type_name_of, ToValue};
pub use engine::{diff, equal, get_len, is_nil, is_zero};
pub use host::{HostEvent, PanicHost, RecordingHost, TestHost};
pub use value::{Kind, Repr, Value};
