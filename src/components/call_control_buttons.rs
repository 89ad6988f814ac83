use dioxus::prelude::*;
use crate::components::call_control_state::{CallControlState, ButtonStyle};

#[component]
pub fn CallControlButtons(
    control_state: CallControlState,
    on_accept: EventHandler<()>,
    on_decline: EventHandler<()>,
    on_mute_toggle: EventHandler<()>,
    on_end_call: EventHandler<()>
) -> Element {
    rsx! {
        div {
            class: "flex flex-col gap-8 items-center",

            // Ringing: decline on the left, accept on the right
            if control_state.decline_visible || control_state.accept_visible {
                div {
                    class: "flex gap-16 justify-center",

                    if control_state.decline_visible {
                        button {
                            class: control_state.get_button_class(&ButtonStyle::Danger),
                            onclick: move |_| on_decline.call(()),
                            "Decline"
                        }
                    }

                    if control_state.accept_visible {
                        button {
                            class: control_state.get_button_class(&ButtonStyle::Accept),
                            onclick: move |_| on_accept.call(()),
                            "Accept"
                        }
                    }
                }
            }

            if control_state.mute_visible {
                button {
                    class: control_state.get_button_class(&control_state.mute_style),
                    onclick: move |_| on_mute_toggle.call(()),
                    "{control_state.mute_label}"
                }
            }

            if control_state.end_call_visible {
                button {
                    class: format!("w-full {}", control_state.get_button_class(&control_state.end_call_style)),
                    onclick: move |_| on_end_call.call(()),
                    "{control_state.end_call_label}"
                }
            }
        }
    }
}
