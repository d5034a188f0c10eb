//! Named states: a bundle of actions, outgoing transitions and an entry hook.

use crate::action::{Action, ActionError};
use crate::machine::transition::Transition;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Callback run when a state becomes current; receives the previous state.
///
/// Runs once per transition into the state. The initial state's hook also
/// runs once when the machine starts, with the initial state itself as
/// `previous`; that call is not a transition and is not recorded in the
/// history. Self-transitions likewise pass the state itself.
pub type EntryHook = Box<dyn Fn(&State)>;

/// One action of a state that failed during `update_actions`.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Action '{action}' failed: {error}")]
pub struct ActionFault {
    pub action: String,
    pub error: ActionError,
}

pub(crate) struct NamedAction {
    pub(crate) id: String,
    pub(crate) action: Box<dyn Action>,
}

/// A named grouping of actions plus outgoing transitions and an entry hook.
///
/// Action ids are unique within a state and actions are updated in the order
/// they were added. Transitions are evaluated in order; the first one whose
/// guard is true wins. States are built with
/// [`StateBuilder`](crate::builder::StateBuilder).
pub struct State {
    name: String,
    actions: Vec<NamedAction>,
    transitions: Vec<Transition>,
    on_entry: Option<EntryHook>,
}

impl State {
    pub(crate) fn from_parts(
        name: String,
        actions: Vec<NamedAction>,
        transitions: Vec<Transition>,
        on_entry: Option<EntryHook>,
    ) -> Self {
        Self {
            name,
            actions,
            transitions,
            on_entry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Update every action of this state, in insertion order.
    ///
    /// A failing action does not stop the others; every failure is reported.
    pub fn update_actions(&mut self) -> Validation<(), NonEmptyVec<ActionFault>> {
        let checks: Vec<Validation<(), NonEmptyVec<ActionFault>>> = self
            .actions
            .iter_mut()
            .map(|slot| match slot.action.update() {
                Ok(_) => Validation::success(()),
                Err(error) => Validation::fail(ActionFault {
                    action: slot.id.clone(),
                    error,
                }),
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Run the entry hook with the state that was current before this one.
    pub fn on_state_entry(&self, previous: &State) {
        if let Some(hook) = &self.on_entry {
            hook(previous);
        }
    }

    pub fn has_action(&self, id: &str) -> bool {
        self.actions.iter().any(|slot| slot.id == id)
    }

    /// Action ids in update order.
    pub fn action_ids(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|slot| slot.id.as_str())
    }

    /// Look up an action by id.
    ///
    /// # Panics
    ///
    /// If this state has no action named `id`. Asking for an action that was
    /// never registered is a wiring bug, not a runtime condition.
    pub fn action(&self, id: &str) -> &dyn Action {
        match self.actions.iter().find(|slot| slot.id == id) {
            Some(slot) => slot.action.as_ref(),
            None => self.missing_action(id),
        }
    }

    /// Mutable lookup; panics like [`State::action`].
    pub fn action_mut(&mut self, id: &str) -> &mut dyn Action {
        let position = self.actions.iter().position(|slot| slot.id == id);
        match position {
            Some(index) => self.actions[index].action.as_mut(),
            None => self.missing_action(id),
        }
    }

    /// Typed lookup.
    ///
    /// # Panics
    ///
    /// If the action is missing or is not a `T`.
    pub fn action_as<T: Action>(&self, id: &str) -> &T {
        match self.action(id).as_any().downcast_ref::<T>() {
            Some(action) => action,
            None => panic!(
                "action '{}' in state '{}' is not a {}",
                id,
                self.name,
                std::any::type_name::<T>()
            ),
        }
    }

    /// Typed mutable lookup; panics like [`State::action_as`].
    pub fn action_as_mut<T: Action>(&mut self, id: &str) -> &mut T {
        let state = self.name.clone();
        match self.action_mut(id).as_any_mut().downcast_mut::<T>() {
            Some(action) => action,
            None => panic!(
                "action '{}' in state '{}' is not a {}",
                id,
                state,
                std::any::type_name::<T>()
            ),
        }
    }

    /// Outgoing transitions in evaluation order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Destination of the first transition whose guard fires, if any.
    pub fn next_state(&self) -> Option<&str> {
        self.transitions
            .iter()
            .find(|transition| transition.should_change_state())
            .map(Transition::next_state)
    }

    fn missing_action(&self, id: &str) -> ! {
        panic!("state '{}' has no action '{}'", self.name, id)
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("actions", &self.action_ids().collect::<Vec<_>>())
            .field("transitions", &self.transitions)
            .field("has_entry_hook", &self.on_entry.is_some())
            .finish()
    }
}
