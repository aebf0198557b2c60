//! Value setter: resolves a reference and mutates a form control with
//! type-specific validation, then dispatches the bubbling `change` and
//! `input` events a page's listeners expect. Dispatch on control kind
//! is a closed enum match, so adding a control kind is an
//! exhaustiveness-checked change.

pub mod model;
pub mod runner;

pub use model::{classify, ControlKind, SetValueOutcome, SetValueReport};
pub use runner::set_value;
