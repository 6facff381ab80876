//! # execlog-macros
//!
//! `#[derive(LogMask)]` declares, per field, how a struct is rendered into
//! execution logs. Re-exported by `execlog-mask`; use it from there.
//!
//! `#[log_execution]` wraps a function so every call writes an `init` and a
//! `finish` record. Re-exported by `execlog-intercept`.
//!
//! ## Attributes
//!
//! ### Container
//!
//! - `#[mask(rename = "Name")]` - Type name used in the rendered output
//! - `#[mask(crate = "path")]` - Where generated code finds `execlog_mask`
//!   (default `::execlog_mask`), e.g. `"execlog_intercept::mask"`
//!
//! ### Field
//!
//! - `#[mask]` - Mask with the `ALL` pattern
//! - `#[mask(pattern = "email")]` - Mask with a catalog pattern
//! - `#[mask(regex = "\\d")]` - Mask with a custom regex (wins over `pattern`)
//! - `#[mask(flatten)]` - Splice the fields of an embedded `LogMask` value
//! - `#[mask(skip)]` - Leave the field out of the rendered output
//!
//! Unknown pattern names and malformed attributes are compile errors.
//!
//! ## `#[log_execution]` arguments
//!
//! - `log_return = false` - Leave the return value out of the finish record
//! - `log_parameters = false` - Leave the arguments out of both records
//! - `class = "Name"` - Declaring type to report. Defaults to `Self` for
//!   methods with a receiver and to the enclosing module otherwise
//!
//! Functions returning `Result` only write a finish record for `Ok`.

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn};

mod attrs;
mod execution;
mod expand;

#[proc_macro_derive(LogMask, attributes(mask))]
pub fn derive_log_mask(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match expand::derive(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

#[proc_macro_attribute]
pub fn log_execution(args: TokenStream, item: TokenStream) -> TokenStream {
    let mut parsed = execution::ExecutionArgs::default();
    let parser = parsed.parser();
    syn::parse_macro_input!(args with parser);
    let function = syn::parse_macro_input!(item as ItemFn);

    match execution::expand(parsed, function) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
