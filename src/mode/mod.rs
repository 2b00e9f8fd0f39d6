pub mod args;
pub mod error;
pub mod state;

pub use args::{LabelTable, ModeArg};
pub use error::ModeError;
pub use state::{Current, Mode, ModeKind};
