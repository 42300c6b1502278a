#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the simulator.
//! This crate provides the error-enum attribute used by every crate in the workspace and the
//! derives that turn plain structs into reflectable records and managed objects.
//!
//! ## Usage
//! Generated reflection code refers to `::vsim_domain::reflect`, so consumers of
//! [`macro@Reflect`] and [`macro@ManagedObject`] must depend on `vsim-domain`:
//! ```toml
//! [dependencies]
//! vsim-derive.workspace = true
//! vsim-domain.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait adding `.context()` to
///   `Result<T, Name>` and to `Result<T, Source>` for every variant with a source field.
/// * **Standard Conversions**: `From<Source>` for variants with a `source` field (or one marked
///   `#[source]`/`#[from]`), so `?` lifts upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant
///   with a `message` field exists.
///
/// # Requirements
///
/// Variants use named fields. Variants with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[vsim_derive::vsim_error]
/// pub enum LoadError {
///     #[error("Read failed{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, LoadError> {
///     std::fs::read_to_string(path).context("reading model file")
/// }
/// ```
#[proc_macro_attribute]
pub fn vsim_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Derives `Describe` and `Reflect` for a record.
///
/// Field attributes (`#[reflect(...)]`):
///
/// * `embed`: the field is a composed base record; its fields are promoted into this type and
///   its type name becomes one of this type's bases.
/// * `record`: the field holds a nested record, `Option<Record>` or `Vec<Record>`.
/// * `rename = "memoryMB"`: overrides the wire name.
/// * `reference`: the object's own reference; excluded from reflection.
/// * `skip`: excluded from reflection.
///
/// Other fields must implement `vsim_domain::reflect::AsField`. The type attribute
/// `#[reflect(type_name = "...")]` overrides the descriptor name.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::reflect::expand_reflect(input).into()
}

/// Derives `ManagedObject` for a reflectable record.
///
/// The reference is read from the `#[reflect(reference)]` field, or delegated to the first
/// `#[reflect(embed)]` base, which must be a managed object itself.
#[proc_macro_derive(ManagedObject, attributes(reflect))]
pub fn derive_managed_object(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::reflect::expand_managed_object(input).into()
}
