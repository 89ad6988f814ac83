use dioxus::prelude::*;
use log::info;
use futures_util::StreamExt;
use crate::audio::RingtoneHandle;
use crate::call_controller::CallController;
use crate::call_session::CallSession;
use crate::commands::CallCommand;
use crate::config::AppConfig;
use crate::event_channel::EventChannel;
use super::{SelectorScreen, CallScreen};

pub fn App() -> Element {
    let config = use_context::<AppConfig>();

    // Snapshots published by the call coroutine
    let selected_caller = use_signal(|| None::<String>);
    let current_call = use_signal(|| None::<CallSession>);

    // The coroutine owns the CallController and with it the ringtone.
    // When the app unmounts the coroutine is dropped, which stops the
    // ringtone and cancels any running timer.
    let call_coroutine = use_coroutine({
        let config = config.clone();
        let mut selected_caller = selected_caller.clone();
        let mut current_call = current_call.clone();

        move |mut rx: UnboundedReceiver<CallCommand>| {
            let config = config.clone();
            async move {
                let EventChannel { sender, mut receiver } = EventChannel::new();
                let mut controller = CallController::new(&config, sender);
                controller.attach_ringtone(RingtoneHandle::from_config(&config.ringtone));
                info!("Call coroutine ready with {} callers", controller.roster().len());
    
                loop {
                    tokio::select! {
                        command = rx.next() => {
                            let Some(command) = command else {
                                break;
                            };
                            info!("Call coroutine: processing command {:?}", command);
                            controller.handle_command(command);
                        }
    
                        Some(event) = receiver.recv() => {
                            controller.handle_event(event);
                        }
                    }
    
                    let selected = controller.selected().map(|c| c.id.clone());
                    if *selected_caller.peek() != selected {
                        selected_caller.set(selected);
                    }
                    let session = controller.session().cloned();
                    if *current_call.peek() != session {
                        current_call.set(session);
                    }
                }
    
                controller.release_ringtone();
            }
        }
    });

    let on_select = move |id: String| {
        call_coroutine.send(CallCommand::SelectCaller { id });
    };

    let on_call = move |_| {
        info!("Call me now clicked");
        call_coroutine.send(CallCommand::StartCall);
    };

    let on_answer = move |_| {
        info!("Answering call");
        call_coroutine.send(CallCommand::Answer);
    };

    let on_decline = move |_| {
        info!("Declining call");
        call_coroutine.send(CallCommand::Decline);
    };

    let on_mute_toggle = move |_| {
        call_coroutine.send(CallCommand::ToggleMute);
    };

    let on_end_call = move |_| {
        info!("Ending call");
        call_coroutine.send(CallCommand::EndCall);
    };

    // Render based on whether a call is up
    let session = current_call.read().clone();

    rsx! {
        div {
            class: "font-sans h-screen bg-gray-50 m-0 p-0 flex flex-col",

            div {
                class: "px-5 pt-6 pb-6 flex-grow flex flex-col",
                match session {
                    None => rsx! {
                        SelectorScreen {
                            roster: config.roster.clone(),
                            selected: selected_caller.read().clone(),
                            on_select: on_select,
                            on_call: on_call,
                        }
                    },
                    Some(session) => rsx! {
                        CallScreen {
                            session: session,
                            on_answer: on_answer,
                            on_decline: on_decline,
                            on_mute_toggle: on_mute_toggle,
                            on_end_call: on_end_call,
                        }
                    },
                }
            }
        }
    }
}
