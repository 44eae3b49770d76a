//! Contains helper functions to reduce boilerplate code in other `app` modules.

use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::generate_ui_state;

/// Locks the `AppState`, performs a mutation, and then sends a `StateUpdate`
/// event to the UI if the mutation reports a change.
pub fn with_state_and_notify<F, P: EventProxy>(state: &Arc<Mutex<AppState>>, proxy: &P, update_fn: F)
where
    F: FnOnce(&mut AppState) -> bool,
{
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    if update_fn(&mut state_guard) {
        notify_state(&state_guard, proxy);
    }
}

/// Sends the current state to the UI.
pub fn notify_state<P: EventProxy>(state: &AppState, proxy: &P) {
    let ui_state = generate_ui_state(state);
    proxy.send_event(UserEvent::StateUpdate(Box::new(ui_state)));
}
