// Command pattern for call lifecycle operations
// This module defines commands sent from UI to the call coroutine

pub mod call_commands;

pub use call_commands::CallCommand;
