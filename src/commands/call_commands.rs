/// Commands sent from UI components to the call coroutine
#[derive(Debug, Clone, PartialEq)]
pub enum CallCommand {
    /// Choose who the fake call appears to come from
    SelectCaller {
        id: String,
    },

    /// Start ringing with the selected caller
    StartCall,

    /// Pick up the ringing call
    Answer,

    /// Reject the ringing call
    Decline,

    /// Toggle the (cosmetic) mute state
    ToggleMute,

    /// Hang up the current call
    EndCall,
}
