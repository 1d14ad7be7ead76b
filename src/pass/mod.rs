//! Password assembly and the stateful generator.

mod assemble;
mod case;
mod generator;

pub use assemble::{Draws, assemble};
pub use case::{capitalise, invert};
pub use generator::Generator;
