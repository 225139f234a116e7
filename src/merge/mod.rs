//! Complement merging of configuration trees
//!
//! Default values only ever fill gaps; a value already present on the target
//! is never replaced unless a custom [`MergeFunction`] says otherwise.

pub mod complement;

pub use complement::{complement, complemented, merge_function, MergeFunction};
