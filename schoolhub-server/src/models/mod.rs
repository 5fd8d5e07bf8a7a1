//! Domain models with validation at construction
//!
//! All user input is checked against the rule sets in [`rules`] when these
//! types are built. Invalid input returns [`ValidationErrors`], not panic.

pub mod rules;
pub mod school;
pub mod validation;

pub use school::{NewSchool, ReferencePoint, School, SchoolId, SchoolPatch, UpdateSchool};
pub use validation::{Location, ValidationErrors, Violation};
