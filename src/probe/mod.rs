//! Read-only probing of host-owned state
//!
//! Trackers never touch the host directly. Every query goes through
//! [`StateProbe`], which answers with [`Probe::Found`] or
//! [`Probe::NotAvailable`] and never fails. Narrowing a weakly typed
//! [`ProbeValue`] to the shape a caller wants is also a `Probe`, so a
//! wrong shape and a missing field look the same to the caller.

mod pointer;
mod snapshot;
mod value;

pub use pointer::{HostPointer, PointerTarget};
pub use snapshot::SnapshotProbe;
pub use value::ProbeValue;

/// Outcome of a single host query
#[derive(Debug, Clone, PartialEq)]
pub enum Probe<T> {
    /// The field exists and has the expected shape
    Found(T),
    /// The field is missing, mid-transition, or of an unexpected shape
    NotAvailable,
}

impl<T> Probe<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Probe::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Probe::Found(value) => Some(value),
            Probe::NotAvailable => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Probe<U> {
        match self {
            Probe::Found(value) => Probe::Found(f(value)),
            Probe::NotAvailable => Probe::NotAvailable,
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Probe<U>) -> Probe<U> {
        match self {
            Probe::Found(value) => f(value),
            Probe::NotAvailable => Probe::NotAvailable,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Probe::Found(value) => value,
            Probe::NotAvailable => default,
        }
    }

    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or(T::default())
    }
}

impl<T> From<Option<T>> for Probe<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Probe::Found(value),
            None => Probe::NotAvailable,
        }
    }
}

/// Path-based, failure-tolerant view of the host
///
/// Paths are dotted field names (`"exam.camera.viewport"`). Numeric path
/// segments index into lists. Implementations must catch every host-side
/// failure and report it as [`Probe::NotAvailable`].
pub trait StateProbe {
    fn read(&self, path: &str) -> Probe<ProbeValue>;

    fn read_bool(&self, path: &str) -> Probe<bool> {
        self.read(path).and_then(|value| value.as_bool())
    }

    fn read_f64(&self, path: &str) -> Probe<f64> {
        self.read(path).and_then(|value| value.as_f64())
    }

    fn read_i64(&self, path: &str) -> Probe<i64> {
        self.read(path).and_then(|value| value.as_i64())
    }

    fn read_usize(&self, path: &str) -> Probe<usize> {
        self.read(path).and_then(|value| value.as_usize())
    }

    fn read_text(&self, path: &str) -> Probe<String> {
        self.read(path).and_then(|value| value.into_text())
    }

    fn read_list(&self, path: &str) -> Probe<Vec<ProbeValue>> {
        self.read(path).and_then(|value| value.into_list())
    }

    /// Mode predicates treat anything but an explicit `true` as inactive
    fn is_true(&self, path: &str) -> bool {
        self.read_bool(path).unwrap_or(false)
    }
}
