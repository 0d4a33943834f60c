//! Message processing: run update() and dispatch the resulting actions

use redline_client::ReviewApi;

use crate::actions::{handle_action, ActionContext};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function, following any
/// chained messages and dispatching every action
pub fn process_message<A>(state: &mut AppState, message: Message, ctx: &ActionContext<A>)
where
    A: ReviewApi + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, ctx);
        }

        msg = result.message;
    }
}
