use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

use super::args::ModeArg;
use super::error::ModeError;

/// Which variant a [`Mode`] is. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    List,
    Boolean,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeKind::List => write!(f, "List"),
            ModeKind::Boolean => write!(f, "Boolean"),
        }
    }
}

/// The live value of a mode, as returned by reads and mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Current {
    Bool(bool),
    Label(String),
}

impl Current {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Current::Bool(b) => Some(*b),
            Current::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Current::Label(label) => Some(label),
            Current::Bool(_) => None,
        }
    }
}

impl fmt::Display for Current {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Current::Bool(b) => write!(f, "{}", b),
            Current::Label(label) => write!(f, "{}", label),
        }
    }
}

impl PartialEq<bool> for Current {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<&str> for Current {
    fn eq(&self, other: &&str) -> bool {
        self.as_label() == Some(*other)
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ModeState {
    List {
        labels: Vec<String>,
        /// Label -> position. Built front to back, so a duplicated label
        /// resolves to its last position.
        lookup: HashMap<String, usize>,
        index: usize,
    },
    Boolean {
        value: bool,
        default: bool,
    },
}

/// A named behavioral switch: either a boolean toggle or a selection from an
/// ordered list of labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    state: ModeState,
    description: Option<String>,
}

impl Default for Mode {
    fn default() -> Self {
        Self::boolean(false)
    }
}

impl Mode {
    /// Create a list mode. The first label is both the default and the
    /// initial selection.
    pub fn list<I, S>(labels: I) -> Result<Self, ModeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        let lookup: HashMap<String, usize> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();

        if lookup.len() < 2 {
            return Err(ModeError::TooFewLabels(lookup.len()));
        }

        debug!(labels = ?labels, "created list mode");

        Ok(Self {
            state: ModeState::List {
                labels,
                lookup,
                index: 0,
            },
            description: None,
        })
    }

    /// Create a boolean mode starting at (and resetting to) `default`.
    pub fn boolean(default: bool) -> Self {
        debug!(default, "created boolean mode");

        Self {
            state: ModeState::Boolean {
                value: default,
                default,
            },
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build a mode from dynamically shaped arguments.
    ///
    /// Shapes are tried in order:
    /// 1. a single label table with at least 2 labels, or 2+ positional
    ///    text arguments: a list mode (only the table can carry a
    ///    description);
    /// 2. nothing, or a boolean optionally followed by a text description:
    ///    a boolean mode;
    /// 3. a single text argument: an `off` boolean mode described by it.
    pub fn from_args(args: Vec<ModeArg>) -> Result<Self, ModeError> {
        if args.len() >= 2 && args.iter().all(|arg| matches!(arg, ModeArg::Text(_))) {
            let labels = args.into_iter().filter_map(|arg| match arg {
                ModeArg::Text(label) => Some(label),
                _ => None,
            });
            return Self::list(labels);
        }

        let shape = format!(
            "({})",
            args.iter()
                .map(ModeArg::type_name)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut args = args.into_iter();
        match (args.next(), args.next(), args.next()) {
            (Some(ModeArg::Labels(table)), None, None) => {
                let mode = Self::list(table.values)?;
                Ok(match table.description {
                    Some(description) => mode.with_description(description),
                    None => mode,
                })
            }
            (None, _, _) => Ok(Self::boolean(false)),
            (Some(ModeArg::Bool(default)), None, None) => Ok(Self::boolean(default)),
            (Some(ModeArg::Bool(default)), Some(ModeArg::Text(description)), None) => {
                Ok(Self::boolean(default).with_description(description))
            }
            (Some(ModeArg::Text(description)), None, None) => {
                Ok(Self::boolean(false).with_description(description))
            }
            _ => Err(ModeError::Construction(shape)),
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self.state {
            ModeState::List { .. } => ModeKind::List,
            ModeState::Boolean { .. } => ModeKind::Boolean,
        }
    }

    pub fn current(&self) -> Current {
        match &self.state {
            ModeState::List { labels, index, .. } => Current::Label(labels[*index].clone()),
            ModeState::Boolean { value, .. } => Current::Bool(*value),
        }
    }

    /// The current value as text: the selected label, or `on`/`off`.
    pub fn value(&self) -> &str {
        match &self.state {
            ModeState::List { labels, index, .. } => labels[*index].as_str(),
            ModeState::Boolean { value, .. } => on_off(*value),
        }
    }

    /// True for a boolean mode that is currently on.
    pub fn is_on(&self) -> bool {
        matches!(self.state, ModeState::Boolean { value: true, .. })
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// All labels of a list mode, in order.
    pub fn labels(&self) -> Option<&[String]> {
        match &self.state {
            ModeState::List { labels, .. } => Some(labels),
            ModeState::Boolean { .. } => None,
        }
    }

    /// Label at a 0-based position.
    pub fn label(&self, position: usize) -> Option<&str> {
        self.labels()
            .and_then(|labels| labels.get(position))
            .map(String::as_str)
    }

    /// 0-based position of the current label.
    pub fn index(&self) -> Option<usize> {
        match self.state {
            ModeState::List { index, .. } => Some(index),
            ModeState::Boolean { .. } => None,
        }
    }

    /// Number of options: the label count, or 2 for a boolean mode.
    pub fn option_count(&self) -> usize {
        match &self.state {
            ModeState::List { labels, .. } => labels.len(),
            ModeState::Boolean { .. } => 2,
        }
    }

    /// Advance to the next label, wrapping to the first. Toggles a boolean mode.
    pub fn cycle(&mut self) -> Current {
        match &mut self.state {
            ModeState::List { labels, index, .. } => *index = (*index + 1) % labels.len(),
            ModeState::Boolean { value, .. } => *value = !*value,
        }
        trace!(current = %self.value(), "cycled mode");
        self.current()
    }

    /// Step back to the previous label, wrapping to the last. Toggles a
    /// boolean mode.
    pub fn cycleback(&mut self) -> Current {
        match &mut self.state {
            ModeState::List { labels, index, .. } => {
                *index = (*index + labels.len() - 1) % labels.len()
            }
            ModeState::Boolean { value, .. } => *value = !*value,
        }
        trace!(current = %self.value(), "cycled mode back");
        self.current()
    }

    pub fn toggle(&mut self) -> Result<Current, ModeError> {
        match &mut self.state {
            ModeState::Boolean { value, .. } => *value = !*value,
            ModeState::List { .. } => {
                return Err(ModeError::InvalidOperation("cannot toggle a list mode"));
            }
        }
        trace!(current = %self.value(), "toggled mode");
        Ok(self.current())
    }

    /// Select a value.
    ///
    /// Boolean modes take a boolean or one of `on`/`true`/`off`/`false` in any
    /// case. List modes take a label: an exact match wins, otherwise the first
    /// label equal ignoring case.
    pub fn set(&mut self, val: impl Into<ModeArg>) -> Result<Current, ModeError> {
        let val = val.into();

        match &mut self.state {
            ModeState::Boolean { value, .. } => {
                *value = match &val {
                    ModeArg::Bool(b) => *b,
                    ModeArg::Text(text) => parse_switch(text)
                        .ok_or_else(|| ModeError::UnrecognizedValue(text.clone()))?,
                    other => return Err(ModeError::UnrecognizedValue(other.to_string())),
                };
            }
            ModeState::List {
                labels,
                lookup,
                index,
            } => {
                let Some(wanted) = val.as_text() else {
                    return Err(ModeError::UnrecognizedValue(val.to_string()));
                };
                *index = match lookup.get(wanted) {
                    Some(position) => *position,
                    None => {
                        let wanted_lower = wanted.to_lowercase();
                        labels
                            .iter()
                            .position(|label| label.to_lowercase() == wanted_lower)
                            .ok_or_else(|| ModeError::UnknownLabel(wanted.to_string()))?
                    }
                };
            }
        }

        trace!(current = %self.value(), "set mode");
        Ok(self.current())
    }

    /// Return to the value the mode was constructed with.
    pub fn reset(&mut self) -> Current {
        match &mut self.state {
            ModeState::List { index, .. } => *index = 0,
            ModeState::Boolean { value, default } => *value = *default,
        }
        trace!(current = %self.value(), "reset mode");
        self.current()
    }

    /// Unlike the other mutators this returns nothing: the description is not
    /// part of the current value.
    pub fn describe(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Dynamic form of [`Mode::describe`]; anything but text is rejected.
    pub fn describe_arg(&mut self, description: ModeArg) -> Result<(), ModeError> {
        match description {
            ModeArg::Text(text) => {
                self.describe(text);
                Ok(())
            }
            other => Err(ModeError::NotText(other.type_name().to_string())),
        }
    }
}

/// Case-insensitive boolean synonyms.
fn parse_switch(text: &str) -> Option<bool> {
    match text.to_lowercase().as_str() {
        "on" | "true" => Some(true),
        "off" | "false" => Some(false),
        _ => None,
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(description) = &self.description {
            write!(f, "{}: ", description)?;
        }
        match &self.state {
            ModeState::List { labels, .. } => write!(f, "[{}]", labels.join(", "))?,
            ModeState::Boolean { .. } => write!(f, "{}", ModeKind::Boolean)?,
        }
        write!(f, " ({})", self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::LabelTable;
    use pretty_assertions::assert_eq;

    fn melee() -> Mode {
        Mode::list(["Normal", "Acc", "Att"]).unwrap()
    }

    #[test]
    fn test_list_starts_at_first_label() {
        let mode = melee();
        assert_eq!(mode.kind(), ModeKind::List);
        assert_eq!(mode.current(), "Normal");
        assert_eq!(mode.index(), Some(0));
        assert_eq!(mode.option_count(), 3);
    }

    #[test]
    fn test_cycle_wraps_around() {
        let mut mode = melee();
        assert_eq!(mode.cycle(), "Acc");
        assert_eq!(mode.cycle(), "Att");
        assert_eq!(mode.cycle(), "Normal");
    }

    #[test]
    fn test_cycle_len_times_returns_to_first() {
        for n in 2..8 {
            let labels: Vec<String> = (0..n).map(|i| format!("opt{}", i)).collect();
            let mut mode = Mode::list(labels).unwrap();
            for _ in 0..n {
                mode.cycle();
            }
            assert_eq!(mode.current(), "opt0");
        }
    }

    #[test]
    fn test_cycleback_wraps_to_last() {
        let mut mode = melee();
        assert_eq!(mode.cycleback(), "Att");
        assert_eq!(mode.cycleback(), "Acc");
    }

    #[test]
    fn test_cycle_and_cycleback_are_inverse() {
        let mut mode = melee();
        mode.set("Att").unwrap();
        mode.cycle();
        assert_eq!(mode.cycleback(), "Att");
        mode.cycleback();
        assert_eq!(mode.cycle(), "Att");

        let mut toggle = Mode::boolean(true);
        toggle.cycle();
        assert_eq!(toggle.cycleback(), true);
        toggle.cycleback();
        assert_eq!(toggle.cycle(), true);
    }

    #[test]
    fn test_boolean_cycle_toggles() {
        let mut mode = Mode::boolean(false);
        assert_eq!(mode.cycle(), true);
        assert_eq!(mode.cycleback(), false);
    }

    #[test]
    fn test_toggle_boolean() {
        let mut mode = Mode::default();
        assert_eq!(mode.toggle().unwrap(), true);
        assert_eq!(mode.value(), "on");
        assert_eq!(mode.reset(), false);
        assert_eq!(mode.value(), "off");
    }

    #[test]
    fn test_toggle_list_fails_without_change() {
        let mut mode = melee();
        mode.cycle();
        assert_eq!(
            mode.toggle(),
            Err(ModeError::InvalidOperation("cannot toggle a list mode"))
        );
        assert_eq!(mode.current(), "Acc");
    }

    #[test]
    fn test_value_matches_current_for_boolean() {
        let mut mode = Mode::boolean(false);
        for _ in 0..4 {
            let expected = if mode.current() == true { "on" } else { "off" };
            assert_eq!(mode.value(), expected);
            assert_eq!(mode.is_on(), mode.current() == true);
            mode.toggle().unwrap();
        }
    }

    #[test]
    fn test_value_is_label_for_list() {
        let mut mode = melee();
        mode.cycle();
        assert_eq!(mode.value(), "Acc");
        assert!(!mode.is_on());
    }

    #[test]
    fn test_set_list_exact_and_case_insensitive() {
        let mut mode = melee();
        assert_eq!(mode.set("Att").unwrap(), "Att");
        assert_eq!(mode.set("acc").unwrap(), "Acc");
        assert_eq!(mode.set("NORMAL").unwrap(), "Normal");
    }

    #[test]
    fn test_set_list_prefers_exact_match() {
        let mut mode = Mode::list(["acc", "Acc"]).unwrap();
        assert_eq!(mode.set("Acc").unwrap(), "Acc");
        assert_eq!(mode.index(), Some(1));
        // No exact match for "ACC": first case-insensitive hit wins.
        assert_eq!(mode.set("ACC").unwrap(), "acc");
        assert_eq!(mode.index(), Some(0));
    }

    #[test]
    fn test_set_list_unknown_label() {
        let mut mode = melee();
        mode.cycle();
        assert_eq!(
            mode.set("Tank"),
            Err(ModeError::UnknownLabel("Tank".to_string()))
        );
        assert!(matches!(
            mode.set(true),
            Err(ModeError::UnrecognizedValue(_))
        ));
        assert_eq!(mode.current(), "Acc");
    }

    #[test]
    fn test_set_boolean_synonyms() {
        let mut mode = Mode::boolean(false);
        for on in [ModeArg::from("On"), ModeArg::from("TRUE"), ModeArg::from(true)] {
            mode.reset();
            assert_eq!(mode.set(on).unwrap(), true);
        }
        for off in [ModeArg::from("off"), ModeArg::from("false"), ModeArg::from(false)] {
            mode.set(true).unwrap();
            assert_eq!(mode.set(off).unwrap(), false);
        }
    }

    #[test]
    fn test_set_boolean_rejects_other_values() {
        let mut mode = Mode::boolean(true);
        assert_eq!(
            mode.set("maybe"),
            Err(ModeError::UnrecognizedValue("maybe".to_string()))
        );
        assert!(matches!(
            mode.set(1_i64),
            Err(ModeError::UnrecognizedValue(_))
        ));
        assert_eq!(mode.current(), true);
    }

    #[test]
    fn test_reset_restores_construction_value() {
        let mut mode = melee();
        mode.cycle();
        mode.set("att").unwrap();
        mode.cycleback();
        mode.cycleback();
        assert_eq!(mode.reset(), "Normal");

        let mut toggle = Mode::boolean(true);
        toggle.set("off").unwrap();
        toggle.cycle();
        toggle.cycle();
        assert_eq!(toggle.reset(), true);
    }

    #[test]
    fn test_list_needs_two_distinct_labels() {
        assert_eq!(Mode::list(Vec::<String>::new()), Err(ModeError::TooFewLabels(0)));
        assert_eq!(Mode::list(["Only"]), Err(ModeError::TooFewLabels(1)));
        assert_eq!(Mode::list(["Same", "Same"]), Err(ModeError::TooFewLabels(1)));
    }

    #[test]
    fn test_duplicate_label_resolves_to_last_position() {
        let mut mode = Mode::list(["A", "B", "A"]).unwrap();
        assert_eq!(mode.set("A").unwrap(), "A");
        assert_eq!(mode.index(), Some(2));
        assert_eq!(mode.reset(), "A");
        assert_eq!(mode.index(), Some(0));
    }

    #[test]
    fn test_positional_access() {
        let mode = melee();
        assert_eq!(mode.label(1), Some("Acc"));
        assert_eq!(mode.label(3), None);
        assert_eq!(
            mode.labels().unwrap(),
            &["Normal".to_string(), "Acc".to_string(), "Att".to_string()]
        );
        assert_eq!(Mode::boolean(false).labels(), None);
    }

    #[test]
    fn test_describe() {
        let mut mode = melee();
        assert_eq!(mode.description(), None);
        mode.describe("Melee Mode");
        assert_eq!(mode.description(), Some("Melee Mode"));
        assert!(mode.to_string().starts_with("Melee Mode"));
    }

    #[test]
    fn test_describe_arg_requires_text() {
        let mut mode = Mode::boolean(false);
        assert_eq!(
            mode.describe_arg(ModeArg::Bool(true)),
            Err(ModeError::NotText("boolean".to_string()))
        );
        assert_eq!(mode.description(), None);
        mode.describe_arg(ModeArg::from("Kiting")).unwrap();
        assert_eq!(mode.description(), Some("Kiting"));
    }

    #[test]
    fn test_describe_keeps_default() {
        let mut mode = Mode::boolean(true);
        mode.toggle().unwrap();
        mode.describe("Kiting");
        assert_eq!(mode.reset(), true);
    }

    #[test]
    fn test_display() {
        let mut mode = melee();
        mode.cycle();
        assert_eq!(mode.to_string(), "[Normal, Acc, Att] (Acc)");
        mode.describe("Melee Mode");
        assert_eq!(mode.to_string(), "Melee Mode: [Normal, Acc, Att] (Acc)");

        let toggle = Mode::boolean(true).with_description("Kiting");
        assert_eq!(toggle.to_string(), "Kiting: Boolean (true)");
        assert_eq!(Mode::default().to_string(), "Boolean (false)");
    }

    #[test]
    fn test_display_shows_current_for_boolean() {
        let mut mode = Mode::boolean(true);
        assert_eq!(mode.current(), true);
        assert!(mode.to_string().ends_with("(true)"));
        mode.toggle().unwrap();
        assert!(mode.to_string().ends_with("(false)"));
        assert_eq!(mode.value(), "off");
    }

    #[test]
    fn test_from_args_no_args_is_off() {
        let mode = Mode::from_args(vec![]).unwrap();
        assert_eq!(mode.kind(), ModeKind::Boolean);
        assert_eq!(mode.current(), false);
        assert_eq!(mode.description(), None);
    }

    #[test]
    fn test_from_args_boolean() {
        let mode = Mode::from_args(vec![true.into()]).unwrap();
        assert_eq!(mode.current(), true);

        let mode = Mode::from_args(vec![false.into(), "Kiting".into()]).unwrap();
        assert_eq!(mode.current(), false);
        assert_eq!(mode.description(), Some("Kiting"));
    }

    #[test]
    fn test_from_args_single_text_is_description() {
        let mode = Mode::from_args(vec!["Kiting".into()]).unwrap();
        assert_eq!(mode.kind(), ModeKind::Boolean);
        assert_eq!(mode.current(), false);
        assert_eq!(mode.description(), Some("Kiting"));
    }

    #[test]
    fn test_from_args_positional_labels() {
        let mode = Mode::from_args(vec!["Normal".into(), "Acc".into(), "Att".into()]).unwrap();
        assert_eq!(mode.kind(), ModeKind::List);
        assert_eq!(mode.current(), "Normal");
        assert_eq!(mode.description(), None);
    }

    #[test]
    fn test_from_args_label_table_with_description() {
        let table = LabelTable::new(["Normal", "Acc"]).described("Melee");
        let mode = Mode::from_args(vec![table.into()]).unwrap();
        assert_eq!(mode.kind(), ModeKind::List);
        assert_eq!(mode.description(), Some("Melee"));
        assert_eq!(mode.to_string(), "Melee: [Normal, Acc] (Normal)");
    }

    #[test]
    fn test_from_args_short_label_table() {
        let table = LabelTable::new(["Normal"]);
        assert_eq!(
            Mode::from_args(vec![table.into()]),
            Err(ModeError::TooFewLabels(1))
        );
    }

    #[test]
    fn test_from_args_unrecognized_shapes() {
        assert_eq!(
            Mode::from_args(vec![ModeArg::Number(3.0)]),
            Err(ModeError::Construction("(number)".to_string()))
        );
        assert_eq!(
            Mode::from_args(vec![true.into(), false.into()]),
            Err(ModeError::Construction("(boolean, boolean)".to_string()))
        );
        assert!(matches!(
            Mode::from_args(vec![true.into(), "a".into(), "b".into()]),
            Err(ModeError::Construction(_))
        ));
        assert!(matches!(
            Mode::from_args(vec!["a".into(), true.into()]),
            Err(ModeError::Construction(_))
        ));
    }

    #[test]
    fn test_from_args_json() {
        let mode = Mode::from_args(ModeArg::parse_json(r#"["Normal", "Acc"]"#).unwrap()).unwrap();
        assert_eq!(mode.kind(), ModeKind::List);

        let mode = Mode::from_args(ModeArg::parse_json(r#"[true, "Kiting"]"#).unwrap()).unwrap();
        assert_eq!(mode.to_string(), "Kiting: Boolean (true)");
    }
}
