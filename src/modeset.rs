//! Named collection of modes, owned by the code that drives them.

use thiserror::Error;
use tracing::{debug, info};

use crate::command::Command;
use crate::mode::{Current, Mode, ModeArg, ModeError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModeSetError {
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    #[error("{name}: {source}")]
    Mode {
        name: String,
        #[source]
        source: ModeError,
    },
}

/// What a [`Command`] did, for the caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Defined { name: String, replaced: bool },
    Changed { name: String, current: Current },
    Described(String),
    Removed(String),
    ResetAll(usize),
    /// Rendered `name: mode` lines.
    Listing(Vec<String>),
    Help,
    Quit,
}

/// Modes keyed by name, in insertion order. Names compare case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ModeSet {
    modes: Vec<(String, Mode)>,
}

impl ModeSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.modes
            .iter()
            .position(|(existing, _)| existing.to_lowercase() == name)
    }

    /// Add a mode, replacing (and returning) any mode already under that name.
    /// A replaced mode keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, mode: Mode) -> Option<Mode> {
        let name = name.into();
        match self.position(&name) {
            Some(i) => Some(std::mem::replace(&mut self.modes[i].1, mode)),
            None => {
                self.modes.push((name, mode));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Mode> {
        self.position(name).map(|i| &self.modes[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Mode> {
        self.position(name).map(|i| &mut self.modes[i].1)
    }

    pub fn remove(&mut self, name: &str) -> Option<Mode> {
        self.position(name).map(|i| self.modes.remove(i).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mode)> {
        self.modes.iter().map(|(name, mode)| (name.as_str(), mode))
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Reset every mode to its default. Returns how many were reset.
    pub fn reset_all(&mut self) -> usize {
        for (_, mode) in &mut self.modes {
            mode.reset();
        }
        self.modes.len()
    }

    fn require_mut(&mut self, name: &str) -> Result<&mut Mode, ModeSetError> {
        self.get_mut(name)
            .ok_or_else(|| ModeSetError::UnknownMode(name.to_string()))
    }

    fn render(name: &str, mode: &Mode) -> String {
        format!("{}: {}", name, mode)
    }

    pub fn apply(&mut self, command: &Command) -> Result<Outcome, ModeSetError> {
        let outcome = match command {
            Command::New { name, labels } => {
                let mode = Mode::list(labels.iter().cloned()).map_err(in_mode(name))?;
                self.define(name, mode)
            }
            Command::Bool {
                name,
                default,
                description,
            } => {
                let mut mode = Mode::boolean(*default);
                if let Some(description) = description {
                    mode.describe(description.as_str());
                }
                self.define(name, mode)
            }
            Command::Json { name, args } => {
                let mode = ModeArg::parse_json(args)
                    .and_then(Mode::from_args)
                    .map_err(in_mode(name))?;
                self.define(name, mode)
            }
            Command::Cycle(name) => {
                let current = self.require_mut(name)?.cycle();
                Outcome::Changed {
                    name: name.clone(),
                    current,
                }
            }
            Command::Back(name) => {
                let current = self.require_mut(name)?.cycleback();
                Outcome::Changed {
                    name: name.clone(),
                    current,
                }
            }
            Command::Toggle(name) => {
                let current = self.require_mut(name)?.toggle().map_err(in_mode(name))?;
                Outcome::Changed {
                    name: name.clone(),
                    current,
                }
            }
            Command::Set { name, value } => {
                let current = self
                    .require_mut(name)?
                    .set(value.as_str())
                    .map_err(in_mode(name))?;
                Outcome::Changed {
                    name: name.clone(),
                    current,
                }
            }
            Command::Reset(name) => {
                let current = self.require_mut(name)?.reset();
                Outcome::Changed {
                    name: name.clone(),
                    current,
                }
            }
            Command::ResetAll => Outcome::ResetAll(self.reset_all()),
            Command::Describe { name, text } => {
                self.require_mut(name)?.describe(text.as_str());
                Outcome::Described(name.clone())
            }
            Command::Show(Some(name)) => {
                let mode = self
                    .get(name)
                    .ok_or_else(|| ModeSetError::UnknownMode(name.clone()))?;
                Outcome::Listing(vec![Self::render(name, mode)])
            }
            Command::Show(None) => Outcome::Listing(
                self.iter()
                    .map(|(name, mode)| Self::render(name, mode))
                    .collect(),
            ),
            Command::Remove(name) => {
                self.remove(name)
                    .ok_or_else(|| ModeSetError::UnknownMode(name.clone()))?;
                Outcome::Removed(name.clone())
            }
            Command::Help => Outcome::Help,
            Command::Quit => Outcome::Quit,
        };

        debug!(command = %command, "applied command");
        Ok(outcome)
    }

    fn define(&mut self, name: &str, mode: Mode) -> Outcome {
        let replaced = self.insert(name, mode).is_some();
        info!(name, replaced, "defined mode");
        Outcome::Defined {
            name: name.to_string(),
            replaced,
        }
    }
}

/// Attach the mode name to a [`ModeError`].
fn in_mode(name: &str) -> impl FnOnce(ModeError) -> ModeSetError {
    let name = name.to_string();
    move |source| ModeSetError::Mode { name, source }
}
