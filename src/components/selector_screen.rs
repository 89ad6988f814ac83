use dioxus::prelude::*;
use crate::components::TitleBanner;
use crate::roster::{Caller, Roster};

#[component]
pub fn SelectorScreen(
    roster: Roster,
    selected: Option<String>,
    on_select: EventHandler<String>,
    on_call: EventHandler<()>
) -> Element {
    let can_call = selected.is_some();

    rsx! {
        div {
            class: "flex flex-col gap-6 h-full",

            TitleBanner {}

            p {
                class: "text-center text-gray-600",
                "Who should be calling?"
            }

            div {
                class: "grid grid-cols-3 gap-3",
                for caller in roster.iter().cloned() {
                    CallerButton {
                        key: "{caller.id}",
                        is_selected: selected.as_deref() == Some(caller.id.as_str()),
                        caller: caller.clone(),
                        on_select: on_select,
                    }
                }
            }

            button {
                class: if can_call {
                    "w-full py-4 bg-green-600 hover:bg-green-700 text-white rounded-lg font-semibold text-lg shadow-md"
                } else {
                    "w-full py-4 bg-gray-200 text-gray-400 rounded-lg font-semibold text-lg cursor-not-allowed"
                },
                disabled: !can_call,
                onclick: move |_| on_call.call(()),
                "Call me now"
            }
        }
    }
}

#[component]
fn CallerButton(
    caller: Caller,
    is_selected: bool,
    on_select: EventHandler<String>
) -> Element {
    let id = caller.id.clone();

    rsx! {
        button {
            class: if is_selected {
                "flex flex-col items-center gap-1 p-4 rounded-xl border-2 border-green-600 bg-green-50"
            } else {
                "flex flex-col items-center gap-1 p-4 rounded-xl border border-gray-200 bg-white hover:bg-gray-50"
            },
            onclick: move |_| on_select.call(id.clone()),

            if let Some(glyph) = &caller.glyph {
                span {
                    class: "text-lg",
                    "{glyph}"
                }
            }
            span {
                class: "capitalize font-medium text-gray-800",
                "{caller.id}"
            }
        }
    }
}
