/// Runtime values.
///
/// Defines `Object`, its type tags and the closure representation.
pub mod core;
/// Hash values.
///
/// Insertion-ordered map keyed by canonical `"<TYPE>:<value>"` strings.
pub mod hash;
