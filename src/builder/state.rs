//! Builder for constructing states.

use crate::action::Action;
use crate::builder::error::BuildError;
use crate::machine::{EntryHook, Guard, NamedAction, State, Transition};

/// Builder for constructing a [`State`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use tickwise::builder::StateBuilder;
/// use tickwise::machine::State;
///
/// let idle = StateBuilder::new("Idle")
///     .when(|| true, "Drive")
///     .on_entry(|previous: &State| println!("left {}", previous.name()))
///     .build()
///     .unwrap();
///
/// assert_eq!(idle.transitions().len(), 1);
/// ```
pub struct StateBuilder {
    name: String,
    actions: Vec<NamedAction>,
    transitions: Vec<Transition>,
    on_entry: Option<EntryHook>,
}

impl StateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
            transitions: Vec::new(),
            on_entry: None,
        }
    }

    /// Add an action under `id`. Actions update in the order they are added.
    pub fn action<A: Action>(self, id: impl Into<String>, action: A) -> Self {
        self.boxed_action(id, Box::new(action))
    }

    /// Add an already boxed action.
    pub fn boxed_action(mut self, id: impl Into<String>, action: Box<dyn Action>) -> Self {
        self.actions.push(NamedAction {
            id: id.into(),
            action,
        });
        self
    }

    /// Append a transition. Earlier transitions take precedence.
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Append a transition guarded by a closure.
    pub fn when<F>(self, predicate: F, next_state: impl Into<String>) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.transition(Transition::new(Guard::new(predicate), next_state))
    }

    /// Set the entry hook, run with the previous state on every entry.
    pub fn on_entry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&State) + 'static,
    {
        self.on_entry = Some(Box::new(hook));
        self
    }

    /// Build the state.
    /// Returns an error if an action id is used twice.
    pub fn build(self) -> Result<State, BuildError> {
        for (position, slot) in self.actions.iter().enumerate() {
            if self.actions[..position].iter().any(|earlier| earlier.id == slot.id) {
                return Err(BuildError::DuplicateAction {
                    state: self.name.clone(),
                    action: slot.id.clone(),
                });
            }
        }

        Ok(State::from_parts(
            self.name,
            self.actions,
            self.transitions,
            self.on_entry,
        ))
    }
}
