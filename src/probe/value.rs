//! Weakly typed values returned by the host

use std::collections::BTreeMap;

use super::Probe;

/// A value read from the host, before the caller narrows it
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<ProbeValue>),
    Record(BTreeMap<String, ProbeValue>),
}

impl ProbeValue {
    pub fn as_bool(&self) -> Probe<bool> {
        match self {
            ProbeValue::Bool(b) => Probe::Found(*b),
            _ => Probe::NotAvailable,
        }
    }

    pub fn as_f64(&self) -> Probe<f64> {
        match self {
            ProbeValue::Number(n) if n.is_finite() => Probe::Found(*n),
            _ => Probe::NotAvailable,
        }
    }

    /// Integral numbers only; `2.5` is not an index
    pub fn as_i64(&self) -> Probe<i64> {
        self.as_f64().and_then(|n| {
            if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
                Probe::Found(n as i64)
            } else {
                Probe::NotAvailable
            }
        })
    }

    pub fn as_usize(&self) -> Probe<usize> {
        self.as_i64()
            .and_then(|n| usize::try_from(n).ok().into())
    }

    pub fn as_str(&self) -> Probe<&str> {
        match self {
            ProbeValue::Text(s) => Probe::Found(s.as_str()),
            _ => Probe::NotAvailable,
        }
    }

    pub fn into_text(self) -> Probe<String> {
        match self {
            ProbeValue::Text(s) => Probe::Found(s),
            _ => Probe::NotAvailable,
        }
    }

    pub fn into_list(self) -> Probe<Vec<ProbeValue>> {
        match self {
            ProbeValue::List(items) => Probe::Found(items),
            _ => Probe::NotAvailable,
        }
    }

    /// Look up a field of a record
    pub fn field(&self, name: &str) -> Probe<&ProbeValue> {
        match self {
            ProbeValue::Record(fields) => fields.get(name).into(),
            _ => Probe::NotAvailable,
        }
    }

    /// A list of exactly `N` finite numbers, or a record with `x`/`y`/`z`
    /// fields for the first `N` axes
    pub fn as_vector<const N: usize>(&self) -> Probe<[f64; N]> {
        let mut out = [0.0; N];
        match self {
            ProbeValue::List(items) if items.len() == N => {
                for (slot, item) in out.iter_mut().zip(items) {
                    match item.as_f64() {
                        Probe::Found(n) => *slot = n,
                        Probe::NotAvailable => return Probe::NotAvailable,
                    }
                }
                Probe::Found(out)
            }
            ProbeValue::Record(_) => {
                for (slot, axis) in out.iter_mut().zip(["x", "y", "z", "w"]) {
                    match self.field(axis).and_then(|v| v.as_f64()) {
                        Probe::Found(n) => *slot = n,
                        Probe::NotAvailable => return Probe::NotAvailable,
                    }
                }
                Probe::Found(out)
            }
            _ => Probe::NotAvailable,
        }
    }
}

impl From<&serde_json::Value> for ProbeValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ProbeValue::Null,
            Value::Bool(b) => ProbeValue::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map(ProbeValue::Number)
                .unwrap_or(ProbeValue::Null),
            Value::String(s) => ProbeValue::Text(s.clone()),
            Value::Array(items) => ProbeValue::List(items.iter().map(ProbeValue::from).collect()),
            Value::Object(fields) => ProbeValue::Record(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), ProbeValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_narrowing_numbers() {
        let whole = ProbeValue::Number(4.0);
        let half = ProbeValue::Number(2.5);
        assert_eq!(whole.as_i64(), Probe::Found(4));
        assert_eq!(half.as_i64(), Probe::NotAvailable);
        assert_eq!(ProbeValue::Number(-1.0).as_usize(), Probe::NotAvailable);
        assert_eq!(ProbeValue::Text("4".into()).as_f64(), Probe::NotAvailable);
    }

    #[test]
    fn test_vector_from_list_and_record() {
        let list = ProbeValue::from(&json!([1.0, 2.0, 3.0]));
        let record = ProbeValue::from(&json!({"x": 1, "y": 2, "z": 3}));
        assert_eq!(list.as_vector::<3>(), Probe::Found([1.0, 2.0, 3.0]));
        assert_eq!(record.as_vector::<3>(), Probe::Found([1.0, 2.0, 3.0]));
        assert_eq!(list.as_vector::<2>(), Probe::NotAvailable);
        assert_eq!(
            ProbeValue::from(&json!([1, "a"])).as_vector::<2>(),
            Probe::NotAvailable
        );
    }
}
