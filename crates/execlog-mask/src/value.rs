//! Value model for rendered fields, parameters and return values

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::{MaskDirective, Result};

/// Broad category of a runtime value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Decimal,
    Date,
    DateTime,
    Boolean,
    Integer,
    Float,
    Char,
    Null,
    Collection,
    Object,
}

/// Kinds whose values may be masked
pub const MASKABLE_KINDS: &[ValueKind] = &[
    ValueKind::Text,
    ValueKind::Decimal,
    ValueKind::Date,
    ValueKind::DateTime,
    ValueKind::Boolean,
    ValueKind::Integer,
    ValueKind::Float,
    ValueKind::Char,
];

impl ValueKind {
    pub fn is_maskable(self) -> bool {
        MASKABLE_KINDS.contains(&self)
    }
}

/// A value that can be written into a log record.
pub trait LogValue {
    fn kind(&self) -> ValueKind;

    /// Natural string form, as it appears in logs when left unmasked
    fn log_string(&self) -> Result<String>;
}

/// Whether a field holding `value` gets masked.
///
/// Needs both a directive and a maskable value kind: fields without a
/// directive, or holding collections and nested objects, are never masked.
pub fn is_maskable(directive: Option<&MaskDirective>, value: &dyn LogValue) -> bool {
    directive.is_some() && value.kind().is_maskable()
}

macro_rules! display_value {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl LogValue for $ty {
                fn kind(&self) -> ValueKind {
                    $kind
                }

                fn log_string(&self) -> Result<String> {
                    Ok(self.to_string())
                }
            }
        )+
    };
}

display_value!(ValueKind::Text => str, String);
display_value!(ValueKind::Boolean => bool);
display_value!(ValueKind::Char => char);
display_value!(ValueKind::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
display_value!(ValueKind::Float => f32, f64);
display_value!(ValueKind::Date => Date);

impl LogValue for PrimitiveDateTime {
    fn kind(&self) -> ValueKind {
        ValueKind::DateTime
    }

    fn log_string(&self) -> Result<String> {
        let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
        Ok(self.format(format)?)
    }
}

impl LogValue for OffsetDateTime {
    fn kind(&self) -> ValueKind {
        ValueKind::DateTime
    }

    fn log_string(&self) -> Result<String> {
        Ok(self.format(&Rfc3339)?)
    }
}

/// Methods returning nothing log `null`
impl LogValue for () {
    fn kind(&self) -> ValueKind {
        ValueKind::Null
    }

    fn log_string(&self) -> Result<String> {
        Ok("null".to_string())
    }
}

impl<T: LogValue> LogValue for Option<T> {
    fn kind(&self) -> ValueKind {
        match self {
            Some(value) => value.kind(),
            None => ValueKind::Null,
        }
    }

    fn log_string(&self) -> Result<String> {
        match self {
            Some(value) => value.log_string(),
            None => Ok("null".to_string()),
        }
    }
}

macro_rules! forward_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<T: LogValue + ?Sized> LogValue for $ty {
                fn kind(&self) -> ValueKind {
                    (**self).kind()
                }

                fn log_string(&self) -> Result<String> {
                    (**self).log_string()
                }
            }
        )+
    };
}

forward_value!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

fn join_items<'a, I>(items: I) -> Result<String>
where
    I: IntoIterator<Item = &'a dyn LogValue>,
{
    let rendered = items
        .into_iter()
        .map(|item| item.log_string())
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("[{}]", rendered.join(", ")))
}

impl<T: LogValue> LogValue for [T] {
    fn kind(&self) -> ValueKind {
        ValueKind::Collection
    }

    fn log_string(&self) -> Result<String> {
        join_items(self.iter().map(|item| item as &dyn LogValue))
    }
}

impl<T: LogValue, const N: usize> LogValue for [T; N] {
    fn kind(&self) -> ValueKind {
        ValueKind::Collection
    }

    fn log_string(&self) -> Result<String> {
        self.as_slice().log_string()
    }
}

impl<T: LogValue> LogValue for Vec<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Collection
    }

    fn log_string(&self) -> Result<String> {
        self.as_slice().log_string()
    }
}

fn join_entries<'a, I>(entries: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a dyn LogValue, &'a dyn LogValue)>,
{
    let rendered = entries
        .into_iter()
        .map(|(key, value)| -> Result<String> {
            Ok(format!("{}={}", key.log_string()?, value.log_string()?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("{{{}}}", rendered.join(", ")))
}

impl<K: LogValue, V: LogValue> LogValue for BTreeMap<K, V> {
    fn kind(&self) -> ValueKind {
        ValueKind::Collection
    }

    fn log_string(&self) -> Result<String> {
        join_entries(
            self.iter()
                .map(|(key, value)| (key as &dyn LogValue, value as &dyn LogValue)),
        )
    }
}

impl<K: LogValue, V: LogValue, S> LogValue for HashMap<K, V, S> {
    fn kind(&self) -> ValueKind {
        ValueKind::Collection
    }

    fn log_string(&self) -> Result<String> {
        join_entries(
            self.iter()
                .map(|(key, value)| (key as &dyn LogValue, value as &dyn LogValue)),
        )
    }
}

impl LogValue for serde_json::Value {
    fn kind(&self) -> ValueKind {
        match self {
            serde_json::Value::Null => ValueKind::Null,
            serde_json::Value::Bool(_) => ValueKind::Boolean,
            serde_json::Value::Number(_) => ValueKind::Decimal,
            serde_json::Value::String(_) => ValueKind::Text,
            serde_json::Value::Array(_) => ValueKind::Collection,
            serde_json::Value::Object(_) => ValueKind::Object,
        }
    }

    fn log_string(&self) -> Result<String> {
        match self {
            serde_json::Value::String(text) => Ok(text.clone()),
            other => Ok(other.to_string()),
        }
    }
}

/// Logs any serializable value as compact JSON.
///
/// Serialization failures surface as errors from [`LogValue::log_string`].
#[derive(Debug, Clone, Copy)]
pub struct Json<T>(pub T);

impl<T: Serialize> LogValue for Json<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Object
    }

    fn log_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}
