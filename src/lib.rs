//! Named behavioral switches: boolean toggles and cyclable label lists.
//!
//! [`Mode`] is the core type. [`ModeSet`], [`Command`] and [`driver`] are the
//! pieces the `modeswitch` binary uses to drive modes from text commands.

pub mod command;
pub mod config;
pub mod driver;
pub mod mode;
pub mod modeset;
pub mod utils;

pub use command::{Command, CommandError};
pub use mode::{Current, LabelTable, Mode, ModeArg, ModeError, ModeKind};
pub use modeset::{ModeSet, ModeSetError, Outcome};
