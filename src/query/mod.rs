//! Query builder state and pattern synthesis.

mod selection;
mod synth;

pub use selection::{Role, SelectionState, Side};
pub use synth::{DEFAULT_LIMIT, synthesize};
