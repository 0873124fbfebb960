//! JSON-snapshot probe
//!
//! Backs the replay driver and the tests: the host state is a single JSON
//! document that gets swapped out wholesale between ticks.

use std::cell::RefCell;

use serde_json::Value;
use tracing::trace;

use super::{Probe, ProbeValue, StateProbe};

#[derive(Debug, Default)]
pub struct SnapshotProbe {
    state: RefCell<Value>,
}

impl SnapshotProbe {
    pub fn new(state: Value) -> Self {
        Self {
            state: RefCell::new(state),
        }
    }

    /// Replace the whole host snapshot
    pub fn replace(&self, state: Value) {
        *self.state.borrow_mut() = state;
    }

    /// Set a single dotted path, creating intermediate objects as needed.
    /// Numeric segments index into existing lists; a segment that does not
    /// name an existing element leaves the list untouched.
    pub fn set(&self, path: &str, value: Value) {
        let mut state = self.state.borrow_mut();
        let mut node = &mut *state;
        for segment in path.split('.') {
            if !node.is_object() && !node.is_array() {
                *node = Value::Object(Default::default());
            }
            node = match node {
                Value::Array(items) => match segment.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
                    Some(item) => item,
                    None => {
                        trace!(path, segment, "set skipped, no such list element");
                        return;
                    }
                },
                Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
                _ => return,
            };
        }
        *node = value;
    }
}

impl StateProbe for SnapshotProbe {
    fn read(&self, path: &str) -> Probe<ProbeValue> {
        let state = self.state.borrow();
        let mut node = &*state;
        for segment in path.split('.') {
            let next = match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            match next {
                Some(child) => node = child,
                None => {
                    trace!(path, segment, "probe miss");
                    return Probe::NotAvailable;
                }
            }
        }

        if node.is_null() {
            return Probe::NotAvailable;
        }
        Probe::Found(ProbeValue::from(node))
    }
}
