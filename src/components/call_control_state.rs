use crate::call_session::CallState;

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonStyle {
    Normal,
    Highlighted,
    Accept,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallControlState {
    pub accept_visible: bool,
    pub decline_visible: bool,
    pub mute_visible: bool,
    pub mute_label: &'static str,
    pub mute_style: ButtonStyle,
    pub end_call_visible: bool,
    pub end_call_label: &'static str,
    pub end_call_style: ButtonStyle,
}

impl CallControlState {
    pub fn from_call_state(call_state: CallState, is_muted: bool) -> Self {
        match call_state {
            CallState::Ringing => Self {
                accept_visible: true,
                decline_visible: true,
                mute_visible: false,
                mute_label: "Mute 🔇",
                mute_style: ButtonStyle::Normal,
                end_call_visible: false,
                end_call_label: "End Call",
                end_call_style: ButtonStyle::Danger,
            },

            CallState::Connected => Self {
                accept_visible: false,
                decline_visible: false,
                mute_visible: true,
                mute_label: if is_muted { "Unmute 🔊" } else { "Mute 🔇" },
                mute_style: if is_muted { ButtonStyle::Highlighted } else { ButtonStyle::Normal },
                end_call_visible: true,
                end_call_label: "End Call",
                end_call_style: ButtonStyle::Danger,
            },
        }
    }

    pub fn get_button_class(&self, style: &ButtonStyle) -> &'static str {
        match style {
            ButtonStyle::Normal => "px-6 py-4 bg-gray-700 hover:bg-gray-600 text-white rounded-full font-medium transition-all duration-200",
            ButtonStyle::Highlighted => "px-6 py-4 bg-white text-black rounded-full font-medium transition-all duration-200",
            ButtonStyle::Accept => "px-6 py-4 bg-green-500 hover:bg-green-600 text-white rounded-full font-medium transition-all duration-200 shadow-lg",
            ButtonStyle::Danger => "px-6 py-4 bg-red-500 hover:bg-red-600 text-white rounded-full font-medium transition-all duration-200 shadow-lg",
        }
    }
}
