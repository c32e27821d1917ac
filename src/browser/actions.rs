//! Browser action schema the model is asked to produce.
//!
//! An action sequence is a planning artifact: it is parsed and displayed by the
//! debug console but never executed against a browser.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// System prompt asking the model to decompose a request into browser actions.
pub const ACTION_PARSER_PROMPT: &str = r#"You are a browser automation assistant. Break the user's request down into a sequence of concrete browser actions.

## Output format
Reply with JSON only, no other text:

```json
[
  {
    "action": "action type",
    "target": "target element or page",
    "value": "input value or parameter",
    "description": "what this step does",
    "wait": 1000
  }
]
```

`wait` is an optional delay in milliseconds after the step.

## Action types
- Navigation: navigate, back, forward, refresh
- Interaction: click, type, select, check, uncheck, hover, scroll
- Waiting and assertions: wait, waitForElement, waitForText, assertText, assertElement
- Data: extractText, extractAttribute, screenshot, download

## Target selectors
- id:elementId
- class:className
- tag:tagName
- text:visible text
- xpath:expression
- css:selector

## Example
Request: "log in to the admin page"
```json
[
  {"action": "navigate", "target": "https://example.com/admin", "value": "", "description": "open the login page", "wait": 2000},
  {"action": "type", "target": "css:input[name='user']", "value": "{username}", "description": "enter the user name", "wait": 500},
  {"action": "type", "target": "css:input[type='password']", "value": "{password}", "description": "enter the password", "wait": 500},
  {"action": "click", "target": "css:button[type='submit']", "value": "", "description": "submit the form", "wait": 3000}
]
```

## Guidelines
1. Describe every step.
2. Add waits between steps that trigger page loads.
3. Prefer precise selectors.
4. Account for loading delays and pop-ups.

Now produce the JSON action sequence for the user's request."#;

/// Supported browser action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    Navigate,
    Back,
    Forward,
    Refresh,
    Click,
    Type,
    Select,
    Check,
    Uncheck,
    Hover,
    Scroll,
    Wait,
    WaitForElement,
    WaitForText,
    AssertText,
    AssertElement,
    ExtractText,
    ExtractAttribute,
    Screenshot,
    Download,
}

impl ActionType {
    pub const ALL: [ActionType; 20] = [
        Self::Navigate,
        Self::Back,
        Self::Forward,
        Self::Refresh,
        Self::Click,
        Self::Type,
        Self::Select,
        Self::Check,
        Self::Uncheck,
        Self::Hover,
        Self::Scroll,
        Self::Wait,
        Self::WaitForElement,
        Self::WaitForText,
        Self::AssertText,
        Self::AssertElement,
        Self::ExtractText,
        Self::ExtractAttribute,
        Self::Screenshot,
        Self::Download,
    ];

    /// Wire name as it appears in the model's JSON.
    pub fn name(self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Refresh => "refresh",
            Self::Click => "click",
            Self::Type => "type",
            Self::Select => "select",
            Self::Check => "check",
            Self::Uncheck => "uncheck",
            Self::Hover => "hover",
            Self::Scroll => "scroll",
            Self::Wait => "wait",
            Self::WaitForElement => "waitForElement",
            Self::WaitForText => "waitForText",
            Self::AssertText => "assertText",
            Self::AssertElement => "assertElement",
            Self::ExtractText => "extractText",
            Self::ExtractAttribute => "extractAttribute",
            Self::Screenshot => "screenshot",
            Self::Download => "download",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Navigate => "go to a URL",
            Self::Back => "go back one page",
            Self::Forward => "go forward one page",
            Self::Refresh => "reload the page",
            Self::Click => "click an element",
            Self::Type => "type text into an element",
            Self::Select => "pick a dropdown option",
            Self::Check => "tick a checkbox",
            Self::Uncheck => "clear a checkbox",
            Self::Hover => "hover over an element",
            Self::Scroll => "scroll the page",
            Self::Wait => "pause for a duration",
            Self::WaitForElement => "wait until an element appears",
            Self::WaitForText => "wait until text appears",
            Self::AssertText => "check an element's text",
            Self::AssertElement => "check that an element exists",
            Self::ExtractText => "read an element's text",
            Self::ExtractAttribute => "read an element attribute",
            Self::Screenshot => "capture the page",
            Self::Download => "download a file",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// One step of a planned browser interaction.
///
/// `action` stays free text so plans naming unknown actions still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserAction {
    pub action: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<u64>,
}

pub type ActionSequence = Vec<BrowserAction>;

impl BrowserAction {
    /// The recognised action kind, if any.
    pub fn kind(&self) -> Option<ActionType> {
        ActionType::from_name(&self.action)
    }
}

impl fmt::Display for BrowserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action)?;
        if !self.target.is_empty() {
            write!(f, " {}", self.target)?;
        }
        if !self.value.is_empty() {
            write!(f, " = {:?}", self.value)?;
        }
        if self.kind().is_none() {
            write!(f, " (unsupported)")?;
        }
        if !self.description.is_empty() {
            write!(f, " - {}", self.description)?;
        }
        if let Some(ms) = self.wait {
            write!(f, " [wait {}ms]", ms)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ActionParseError {
    #[error("model returned an empty action sequence")]
    Empty,
    #[error("invalid action sequence: {0}")]
    Json(#[from] serde_json::Error),
}

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid fence pattern"));

/// Parses a model reply into an action sequence.
///
/// Accepts a bare JSON array or the first fenced code block in the reply.
pub fn parse_action_sequence(reply: &str) -> Result<ActionSequence, ActionParseError> {
    let body = FENCED_BLOCK
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map_or(reply, |m| m.as_str())
        .trim();

    let actions: ActionSequence = serde_json::from_str(body)?;
    if actions.is_empty() {
        return Err(ActionParseError::Empty);
    }
    Ok(actions)
}
