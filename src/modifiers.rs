use thiserror::Error;
use tracing::debug;

/// The four stat categories a scoring modifier can apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    Goal,
    Assist,
    ShortHandedGoal,
    GameWinningGoal,
}

impl ModifierKey {
    pub fn all() -> [Self; 4] {
        [
            Self::Goal,
            Self::Assist,
            Self::ShortHandedGoal,
            Self::GameWinningGoal,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Goal => "Goals",
            Self::Assist => "Assists",
            Self::ShortHandedGoal => "Short Handed Goals",
            Self::GameWinningGoal => "Game Winning Goals",
        }
    }
}

/// One committed scoring modifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifier {
    pub value: f64,
    pub enabled: bool,
}

impl Default for Modifier {
    fn default() -> Self {
        Modifier {
            value: 1.0,
            enabled: true,
        }
    }
}

/// Committed modifier state consumed by the projection calculator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Modifiers {
    pub goal: Modifier,
    pub assist: Modifier,
    pub short_handed_goal: Modifier,
    pub game_winning_goal: Modifier,
}

impl Modifiers {
    pub fn get(&self, key: ModifierKey) -> &Modifier {
        match key {
            ModifierKey::Goal => &self.goal,
            ModifierKey::Assist => &self.assist,
            ModifierKey::ShortHandedGoal => &self.short_handed_goal,
            ModifierKey::GameWinningGoal => &self.game_winning_goal,
        }
    }

    fn get_mut(&mut self, key: ModifierKey) -> &mut Modifier {
        match key {
            ModifierKey::Goal => &mut self.goal,
            ModifierKey::Assist => &mut self.assist,
            ModifierKey::ShortHandedGoal => &mut self.short_handed_goal,
            ModifierKey::GameWinningGoal => &mut self.game_winning_goal,
        }
    }
}

/// Edit staged against one modifier; the value stays a string so that
/// intermediate keystrokes like "1." remain representable.
#[derive(Debug, Clone, PartialEq)]
struct StagedModifier {
    value: String,
    enabled: bool,
}

/// Staged counterpart of [`Modifiers`].
#[derive(Debug, Clone, PartialEq)]
struct StagedModifiers {
    goal: StagedModifier,
    assist: StagedModifier,
    short_handed_goal: StagedModifier,
    game_winning_goal: StagedModifier,
}

impl StagedModifiers {
    fn from_committed(committed: &Modifiers) -> Self {
        let stage = |m: &Modifier| StagedModifier {
            value: m.value.to_string(),
            enabled: m.enabled,
        };
        StagedModifiers {
            goal: stage(&committed.goal),
            assist: stage(&committed.assist),
            short_handed_goal: stage(&committed.short_handed_goal),
            game_winning_goal: stage(&committed.game_winning_goal),
        }
    }

    fn get(&self, key: ModifierKey) -> &StagedModifier {
        match key {
            ModifierKey::Goal => &self.goal,
            ModifierKey::Assist => &self.assist,
            ModifierKey::ShortHandedGoal => &self.short_handed_goal,
            ModifierKey::GameWinningGoal => &self.game_winning_goal,
        }
    }

    fn get_mut(&mut self, key: ModifierKey) -> &mut StagedModifier {
        match key {
            ModifierKey::Goal => &mut self.goal,
            ModifierKey::Assist => &mut self.assist,
            ModifierKey::ShortHandedGoal => &mut self.short_handed_goal,
            ModifierKey::GameWinningGoal => &mut self.game_winning_goal,
        }
    }
}

/// Outcome of staging an edit. Invalid input never changes staged state,
/// but the rejection is reported rather than silently swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommitError {
    #[error("{} modifier value {value:?} is not a number", .key.label())]
    NotNumeric { key: ModifierKey, value: String },
}

/// Whether a string is a valid in-progress numeric entry: empty, a lone
/// decimal point, or unsigned digits with at most one decimal point.
fn is_partial_number(s: &str) -> bool {
    let mut seen_dot = false;
    for c in s.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    true
}

/// Holds the committed scoring modifiers plus the staged edits being typed
/// into the settings form. Staged state only becomes visible to projection
/// consumers through [`ModifierStore::commit`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierStore {
    committed: Modifiers,
    staged: StagedModifiers,
    active: bool,
}

impl Default for ModifierStore {
    fn default() -> Self {
        let committed = Modifiers::default();
        let staged = StagedModifiers::from_committed(&committed);
        ModifierStore {
            committed,
            staged,
            active: true,
        }
    }
}

impl ModifierStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current committed state, as published by the last successful commit.
    pub fn modifiers(&self) -> &Modifiers {
        &self.committed
    }

    pub fn staged_value(&self, key: ModifierKey) -> &str {
        &self.staged.get(key).value
    }

    pub fn staged_enabled(&self, key: ModifierKey) -> bool {
        self.staged.get(key).enabled
    }

    /// Stage a raw value edit. Anything that is not a valid in-progress
    /// numeric entry is rejected and leaves staged state unchanged.
    pub fn stage_edit(&mut self, key: ModifierKey, raw: &str) -> EditOutcome {
        if !is_partial_number(raw) {
            debug!(?key, raw, "Rejected modifier edit");
            return EditOutcome::Rejected;
        }
        self.staged.get_mut(key).value = raw.to_string();
        EditOutcome::Accepted
    }

    /// Flip the staged enabled flag for one modifier.
    pub fn toggle_enabled(&mut self, key: ModifierKey) {
        let staged = self.staged.get_mut(key);
        staged.enabled = !staged.enabled;
    }

    /// Parse every staged value and publish all four modifiers atomically.
    ///
    /// A staged value with no parseable number (empty string or a lone
    /// decimal point) rejects the whole commit and leaves committed state
    /// untouched.
    pub fn commit(&mut self) -> Result<(), CommitError> {
        let mut parsed = [0.0f64; 4];
        for (slot, key) in parsed.iter_mut().zip(ModifierKey::all()) {
            let staged = self.staged.get(key);
            *slot = match staged.value.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    return Err(CommitError::NotNumeric {
                        key,
                        value: staged.value.clone(),
                    })
                }
            };
        }

        for (value, key) in parsed.into_iter().zip(ModifierKey::all()) {
            let modifier = self.committed.get_mut(key);
            modifier.value = value;
            modifier.enabled = self.staged.get(key).enabled;
        }
        debug!(modifiers = ?self.committed, "Committed modifiers");
        Ok(())
    }

    /// Throw away staged edits and reset them to committed state.
    pub fn discard(&mut self) {
        self.staged = StagedModifiers::from_committed(&self.committed);
    }

    /// Global activation switch. When false, projections behave as if every
    /// modifier were disabled, regardless of individual flags.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
