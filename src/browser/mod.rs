//! Browser automation collaborator reached through debug mode.
//!
//! Nothing here drives a browser. The chat loop hands debug-mode input to
//! [`DebugConsole`], which can plan action sequences with the model and
//! inspect the click recorder's output file.

mod actions;
mod debug;
mod recording;

#[allow(unused_imports)]
pub use actions::{
    parse_action_sequence, ActionParseError, ActionSequence, ActionType, BrowserAction,
    ACTION_PARSER_PROMPT,
};
pub use debug::DebugConsole;
#[allow(unused_imports)]
pub use debug::Capability;
#[allow(unused_imports)]
pub use recording::{ClickEvent, ClickRecording};

#[cfg(test)]
mod tests;
