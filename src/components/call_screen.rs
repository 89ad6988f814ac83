use dioxus::prelude::*;
use crate::call_session::CallSession;
use crate::components::{CallStatus, CallControlButtons};
use crate::components::call_control_state::CallControlState;

/// Full-screen incoming/active call view
#[component]
pub fn CallScreen(
    session: CallSession,
    on_answer: EventHandler<()>,
    on_decline: EventHandler<()>,
    on_mute_toggle: EventHandler<()>,
    on_end_call: EventHandler<()>
) -> Element {
    let control_state = CallControlState::from_call_state(session.state, session.muted);

    rsx! {
        div {
            class: "flex flex-col justify-between h-full bg-black text-white px-8 pb-16",

            CallStatus {
                session: session.clone()
            }

            CallControlButtons {
                control_state: control_state,
                on_accept: move |_| on_answer.call(()),
                on_decline: move |_| on_decline.call(()),
                on_mute_toggle: move |_| {
                    log::info!("Mute button clicked");
                    on_mute_toggle.call(())
                },
                on_end_call: move |_| on_end_call.call(())
            }
        }
    }
}
