use dioxus::prelude::*;
use crate::call_session::{CallSession, CallState};

#[component]
pub fn CallStatus(
    session: CallSession
) -> Element {
    let initial = session.caller.initial();
    let status_text = session.status_label();

    rsx! {
        div {
            class: "text-center pt-16",

            span {
                class: if session.state == CallState::Ringing {
                    "text-lg text-gray-300 animate-pulse"
                } else {
                    "text-lg text-gray-300 tabular-nums"
                },
                "{status_text}"
            }

            div {
                class: "w-32 h-32 mx-auto my-8 rounded-full bg-gray-600 flex items-center justify-center",
                span {
                    class: "text-6xl font-light text-white",
                    "{initial}"
                }
            }

            h2 {
                class: "text-4xl font-light text-white mb-4 capitalize",
                "{session.caller.id}"
            }

            p {
                class: "text-gray-400 text-lg font-light",
                "Mobile"
            }

            if session.muted {
                div {
                    class: "mt-2",
                    span {
                        class: "inline-flex items-center px-3 py-1 rounded-full text-sm font-medium bg-red-100 text-red-800",
                        "🔇 Muted"
                    }
                }
            }
        }
    }
}
