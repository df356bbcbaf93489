//! # Keyword Token Handling
//!
//! The trigger language reserves only its literal words: `true`, `false`,
//! `null` and `undefined`. Everything else that looks like a word is an
//! identifier and is resolved against the evaluation context.
//!
//! Keywords are recognized by the identifier scanner in [`super::token`]:
//! a whole word is read first and then looked up here, so `nullable` or
//! `trueSight` stay identifiers.

/// Represents the reserved words of the trigger language.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    /// Boolean `true`.
    True,
    /// Boolean `false`.
    False,
    /// The `null` value.
    Null,
    /// The absent value, written `undefined`.
    Undefined,
}
