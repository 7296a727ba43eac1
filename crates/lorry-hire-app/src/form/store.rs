//! Form state container

use chrono::NaiveDate;

use lorry_hire_domain::service::Totals;

use super::action::FormAction;
use super::reducer::reduce;
use super::state::FormState;

type TotalsListener = Box<dyn FnMut(&Totals) + Send>;

/// Holds the current [`FormState`] and routes every change through [`reduce`]
pub struct FormStore {
    state: FormState,
    listeners: Vec<TotalsListener>,
}

impl FormStore {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_state(FormState::new(today))
    }

    pub fn with_state(state: FormState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn into_state(self) -> FormState {
        self.state
    }

    /// Called with the new totals whenever an action changes them
    pub fn on_totals_changed<F>(&mut self, listener: F)
    where
        F: FnMut(&Totals) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn dispatch(&mut self, action: FormAction) -> &FormState {
        tracing::trace!(?action, "form action");
        let next = reduce(&self.state, action);
        let changed = next.totals != self.state.totals;
        self.state = next;

        if changed {
            let totals = self.state.totals;
            for listener in &mut self.listeners {
                listener(&totals);
            }
        }
        &self.state
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
