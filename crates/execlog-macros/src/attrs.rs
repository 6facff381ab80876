//! Parsing of `#[mask(...)]` attributes.

use syn::{Attribute, Ident, LitStr, Path};

const PATTERNS: [(&str, &str); 9] = [
    ("ALL", "All"),
    ("EMAIL", "Email"),
    ("DOCUMENT", "Document"),
    ("NAME", "Name"),
    ("DATE", "Date"),
    ("ADDRESS", "Address"),
    ("ZIP_CODE", "ZipCode"),
    ("NUMBER", "Number"),
    ("TELEPHONE", "Telephone"),
];

/// Container attributes: `#[mask(rename = "Name", crate = "path")]`
#[derive(Default)]
pub struct ContainerAttrs {
    pub rename: Option<String>,
    /// Path the generated code reaches `execlog_mask` through
    pub krate: Option<Path>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut container = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("mask")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    container.rename = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("crate") {
                    let value: LitStr = meta.value()?.parse()?;
                    container.krate = Some(value.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported container attribute, expected `rename` or `crate`"))
                }
            })?;
        }

        Ok(container)
    }
}

/// Masking declared on one field
pub struct Directive {
    /// Variant name of `MaskedType`
    pub pattern: Ident,
    pub regex: Option<LitStr>,
}

pub enum FieldMode {
    Plain,
    Masked(Directive),
    Flatten,
    Skip,
}

pub fn parse_field(attrs: &[Attribute]) -> syn::Result<FieldMode> {
    let mut mode = FieldMode::Plain;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("mask")) {
        if !matches!(mode, FieldMode::Plain) {
            return Err(syn::Error::new_spanned(attr, "duplicate `mask` attribute"));
        }

        // Bare `#[mask]` masks with the ALL pattern
        if matches!(attr.meta, syn::Meta::Path(_)) {
            mode = FieldMode::Masked(Directive {
                pattern: Ident::new("All", proc_macro2::Span::call_site()),
                regex: None,
            });
            continue;
        }

        let mut pattern = None;
        let mut regex = None;
        let mut flatten = false;
        let mut skip = false;

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("pattern") {
                let value: LitStr = meta.value()?.parse()?;
                pattern = Some(resolve_pattern(&value)?);
                Ok(())
            } else if meta.path.is_ident("regex") {
                regex = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else if meta.path.is_ident("flatten") {
                flatten = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported mask attribute, expected `pattern`, `regex`, `flatten` or `skip`",
                ))
            }
        })?;

        let masking = pattern.is_some() || regex.is_some();
        mode = match (skip, flatten) {
            (true, true) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "`skip` and `flatten` cannot be combined",
                ));
            }
            (true, false) if masking => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "a skipped field cannot declare a mask pattern",
                ));
            }
            (false, true) if masking => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "a flattened field is rendered with its own directives",
                ));
            }
            (true, false) => FieldMode::Skip,
            (false, true) => FieldMode::Flatten,
            (false, false) => FieldMode::Masked(Directive {
                pattern: pattern
                    .unwrap_or_else(|| Ident::new("All", proc_macro2::Span::call_site())),
                regex,
            }),
        };
    }

    Ok(mode)
}

fn resolve_pattern(value: &LitStr) -> syn::Result<Ident> {
    let normalized: String = value
        .value()
        .trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    PATTERNS
        .iter()
        .find(|(name, _)| name.replace('_', "") == normalized)
        .map(|(_, variant)| Ident::new(variant, value.span()))
        .ok_or_else(|| {
            let known: Vec<&str> = PATTERNS.iter().map(|(name, _)| *name).collect();
            syn::Error::new_spanned(
                value,
                format!(
                    "unknown mask pattern `{}`, expected one of: {}",
                    value.value(),
                    known.join(", ")
                ),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_container_crate_path() {
        let attrs: Vec<Attribute> =
            vec![parse_quote!(#[mask(rename = "User", crate = "execlog_intercept::mask")])];
        let container = ContainerAttrs::parse(&attrs).unwrap();

        assert_eq!(container.rename.as_deref(), Some("User"));
        let expected: Path = parse_quote!(execlog_intercept::mask);
        assert_eq!(container.krate, Some(expected));
    }

    #[test]
    fn test_container_crate_path_must_be_a_path() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[mask(crate = "not a path")])];
        assert!(ContainerAttrs::parse(&attrs).is_err());
    }

    #[test]
    fn test_unknown_pattern_is_rejected() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[mask(pattern = "passport")])];
        assert!(parse_field(&attrs).is_err());
    }
}
