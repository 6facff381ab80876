//! Object rendering with field-level masking
//!
//! Output format is `TypeName{field1=value1, field2=value2}` with fields in
//! declaration order. Fields carrying a [`MaskDirective`] are masked when their
//! value kind allows it; every other field is rendered in its natural form.

use crate::value::{LogValue, ValueKind, is_maskable};
use crate::{MaskDirective, MaskError, Result};

/// One declared field of a [`LogMask`] type
pub struct FieldEntry<'a> {
    pub name: &'static str,
    pub value: &'a dyn LogValue,
    pub directive: Option<MaskDirective>,
}

impl<'a> FieldEntry<'a> {
    pub fn new(name: &'static str, value: &'a dyn LogValue) -> Self {
        Self {
            name,
            value,
            directive: None,
        }
    }

    pub fn masked(mut self, directive: impl Into<MaskDirective>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    /// Rendered value, masked when eligible
    pub fn render_value(&self) -> Result<String> {
        let raw = self.value.log_string()?;
        match &self.directive {
            Some(directive) if is_maskable(Some(directive), self.value) => directive.apply(&raw),
            _ => Ok(raw),
        }
    }
}

/// Types that declare their fields for masked rendering.
///
/// Usually implemented with `#[derive(LogMask)]`:
///
/// ```
/// use execlog_mask::LogMask;
///
/// #[derive(LogMask)]
/// struct User {
///     #[mask(pattern = "name")]
///     name: String,
///     #[mask]
///     password: String,
///     age: u32,
/// }
///
/// let user = User { name: "John Doe".into(), password: "hunter2".into(), age: 42 };
/// assert_eq!(user.render().unwrap(), "User{name=*hn*oe, password=*******, age=42}");
/// ```
pub trait LogMask {
    fn type_name(&self) -> &'static str;

    fn fields(&self) -> Vec<FieldEntry<'_>>;

    fn render(&self) -> Result<String> {
        render(self)
    }
}

/// Render `object` as `TypeName{field=value, ...}`.
///
/// A field whose value cannot be read fails the whole render.
pub fn render<T: LogMask + ?Sized>(object: &T) -> Result<String> {
    let type_name = object.type_name();
    let rendered = object
        .fields()
        .iter()
        .map(|field| -> Result<String> {
            let value = field
                .render_value()
                .map_err(|source| MaskError::FieldRead {
                    type_name,
                    field: field.name,
                    source: Box::new(source),
                })?;
            Ok(format!("{}={}", field.name, value))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(format!("{}{{{}}}", type_name, rendered.join(", ")))
}

/// Lets a masked type appear as a nested field, parameter or return value.
///
/// Nested objects are rendered with their own directives but are never masked
/// as a whole.
pub struct Masked<'a, T: ?Sized>(pub &'a T);

impl<T: LogMask + ?Sized> LogValue for Masked<'_, T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Object
    }

    fn log_string(&self) -> Result<String> {
        self.0.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Json, MaskedType};
    use std::collections::HashMap;

    struct Customer {
        name: String,
        email: String,
        document: Option<String>,
        tags: Vec<String>,
        nickname: String,
    }

    impl LogMask for Customer {
        fn type_name(&self) -> &'static str {
            "Customer"
        }

        fn fields(&self) -> Vec<FieldEntry<'_>> {
            vec![
                FieldEntry::new("name", &self.name).masked(MaskedType::Name),
                FieldEntry::new("email", &self.email).masked(MaskedType::Email),
                FieldEntry::new("document", &self.document).masked(MaskedType::Document),
                FieldEntry::new("tags", &self.tags).masked(MaskedType::All),
                FieldEntry::new("nickname", &self.nickname),
            ]
        }
    }

    fn customer() -> Customer {
        Customer {
            name: "John Doe".to_string(),
            email: "john.doe@gmail.com".to_string(),
            document: Some("12345678911".to_string()),
            tags: vec!["vip".to_string()],
            nickname: "johnny".to_string(),
        }
    }

    #[test]
    fn test_render_masks_eligible_fields() {
        assert_eq!(
            customer().render().unwrap(),
            "Customer{name=*hn*oe, email=**.doe***.com, document=********911, tags=[vip], nickname=johnny}"
        );
    }

    #[test]
    fn test_absent_value_renders_null() {
        let mut customer = customer();
        customer.document = None;
        let rendered = customer.render().unwrap();
        assert!(rendered.contains("document=null"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let customer = customer();
        assert_eq!(customer.render().unwrap(), customer.render().unwrap());
    }

    #[test]
    fn test_render_does_not_mutate() {
        let customer = customer();
        customer.render().unwrap();
        assert_eq!(customer.email, "john.doe@gmail.com");
    }

    struct Empty;

    impl LogMask for Empty {
        fn type_name(&self) -> &'static str {
            "Empty"
        }

        fn fields(&self) -> Vec<FieldEntry<'_>> {
            Vec::new()
        }
    }

    #[test]
    fn test_render_without_fields() {
        assert_eq!(Empty.render().unwrap(), "Empty{}");
    }

    struct Broken {
        payload: Json<HashMap<Vec<u8>, u8>>,
    }

    impl LogMask for Broken {
        fn type_name(&self) -> &'static str {
            "Broken"
        }

        fn fields(&self) -> Vec<FieldEntry<'_>> {
            vec![FieldEntry::new("payload", &self.payload)]
        }
    }

    #[test]
    fn test_field_read_failure_propagates() {
        let mut payload = HashMap::new();
        payload.insert(vec![1], 1);
        let broken = Broken {
            payload: Json(payload),
        };

        let err = broken.render().unwrap_err();
        match err {
            MaskError::FieldRead {
                type_name,
                field,
                source,
            } => {
                assert_eq!(type_name, "Broken");
                assert_eq!(field, "payload");
                assert!(matches!(*source, MaskError::Serialization(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    struct BadRegex {
        code: String,
    }

    impl LogMask for BadRegex {
        fn type_name(&self) -> &'static str {
            "BadRegex"
        }

        fn fields(&self) -> Vec<FieldEntry<'_>> {
            vec![FieldEntry::new("code", &self.code).masked(MaskDirective::default().with_regex("("))]
        }
    }

    #[test]
    fn test_invalid_regex_fails_render() {
        let err = BadRegex {
            code: "abc".to_string(),
        }
        .render()
        .unwrap_err();
        assert!(matches!(err, MaskError::FieldRead { field: "code", .. }));
    }

    #[test]
    fn test_masked_wrapper_nests() {
        let customer = customer();
        let nested = Masked(&customer);
        assert_eq!(nested.kind(), ValueKind::Object);
        assert_eq!(nested.log_string().unwrap(), customer.render().unwrap());
    }
}
