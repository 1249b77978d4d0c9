// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Boilerplate macros shared by the tw crates.
//!
//! - [`simple_display!`]: `Display` for enums whose variants print as fixed strings
//! - [`setters!`]: chained by-value setters for option and descriptor structs

/// `Display` for an enum, one string literal per variant.
///
/// Variants with fields take `(..)` after the name.
///
/// ```ignore
/// tw_core::simple_display! {
///     Command {
///         Request => "REQUEST",
///         Schedule => "SCHEDULE",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident $(( $($fields:tt)* ))? => $text:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let text = match self {
                    $( Self::$variant $(( $($fields)* ))? => $text, )+
                };
                f.write_str(text)
            }
        }
    };
}

/// Chained setters, expanded inside an existing `impl` block.
///
/// `set` fields are assigned as given; `option` fields are `Option<T>` and
/// the setter stores `Some(v.into())`.
///
/// ```ignore
/// impl DeferOptions {
///     tw_core::setters! {
///         set { guarantee: bool }
///         option { queue: String }
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    (
        $(set { $( $field:ident : $ty:ty ),* $(,)? })?
        $(option { $( $opt_field:ident : $opt_ty:ty ),* $(,)? })?
    ) => {
        $($(
            pub fn $field(mut self, value: $ty) -> Self {
                self.$field = value;
                self
            }
        )*)?
        $($(
            pub fn $opt_field(mut self, value: impl Into<$opt_ty>) -> Self {
                self.$opt_field = Some(value.into());
                self
            }
        )*)?
    };
}
