//! Debug console: the free-text handler used while debug mode is on.
//!
//! Input is `<capability> [args]`. Capabilities form a fixed table; anything
//! not in it is rejected rather than looked up dynamically.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::actions::{parse_action_sequence, ActionType, ACTION_PARSER_PROMPT};
use super::recording::ClickRecording;
use crate::message::Message;
use crate::output::Renderer;
use crate::provider::TextGenerator;

/// Operations reachable from the debug console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Capabilities,
    Actions,
    Plan,
    Recording,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Self::Capabilities,
        Self::Actions,
        Self::Plan,
        Self::Recording,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Capabilities => "capabilities",
            Self::Actions => "actions",
            Self::Plan => "plan",
            Self::Recording => "recording",
        }
    }

    fn usage(self) -> &'static str {
        match self {
            Self::Capabilities => "capabilities",
            Self::Actions => "actions",
            Self::Plan => "plan <request>",
            Self::Recording => "recording [import <file> | clear]",
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Self::Capabilities => "list debug capabilities",
            Self::Actions => "list supported browser actions",
            Self::Plan => "ask the model for an action plan (not executed)",
            Self::Recording => "show, import or clear the click recording",
        }
    }

    /// Case-insensitive lookup in the capability table.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|cap| cap.name().eq_ignore_ascii_case(name))
    }
}

/// Routes debug-mode input to browser tooling.
#[derive(Debug, Clone)]
pub struct DebugConsole {
    recording_path: PathBuf,
}

impl DebugConsole {
    pub fn new(recording_path: PathBuf) -> Self {
        Self { recording_path }
    }

    pub fn recording_path(&self) -> &Path {
        &self.recording_path
    }

    /// Handles one line of debug input. Failures are rendered, never returned.
    pub async fn handle(
        &self,
        input: &str,
        generator: &dyn TextGenerator,
        renderer: &mut dyn Renderer,
    ) {
        let input = input.trim();
        let (name, args) = match input.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (input, ""),
        };

        let Some(capability) = Capability::from_name(name) else {
            let available: Vec<&str> = Capability::ALL.iter().map(|c| c.name()).collect();
            renderer.render_error(&format!(
                "unknown capability '{}'; available: {}",
                name,
                available.join(", ")
            ));
            return;
        };
        debug!(capability = capability.name(), "debug console");

        match capability {
            Capability::Capabilities => {
                renderer.render_notice("Debug capabilities:");
                for cap in Capability::ALL {
                    renderer.render_notice(&format!("  {:<36} - {}", cap.usage(), cap.summary()));
                }
            }
            Capability::Actions => {
                renderer.render_notice("Browser actions:");
                for kind in ActionType::ALL {
                    renderer.render_notice(&format!("  {:<18} - {}", kind.name(), kind.summary()));
                }
            }
            Capability::Plan => self.plan(args, generator, renderer).await,
            Capability::Recording => self.recording(args, renderer),
        }
    }

    async fn plan(&self, request: &str, generator: &dyn TextGenerator, renderer: &mut dyn Renderer) {
        if request.is_empty() {
            renderer.render_error(&format!("usage: {}", Capability::Plan.usage()));
            return;
        }

        let messages = [Message::system(ACTION_PARSER_PROMPT), Message::user(request)];
        let reply = match generator.ask(&messages).await {
            Ok(reply) => reply,
            Err(err) => {
                renderer.render_error(&err.to_string());
                return;
            }
        };

        match parse_action_sequence(&reply) {
            Ok(actions) => {
                renderer.render_notice(&format!(
                    "Action plan ({} steps, not executed):",
                    actions.len()
                ));
                for (i, action) in actions.iter().enumerate() {
                    renderer.render_notice(&format!("  {}. {}", i + 1, action));
                }
            }
            Err(err) => renderer.render_error(&err.to_string()),
        }
    }

    fn recording(&self, args: &str, renderer: &mut dyn Renderer) {
        let path = self.recording_path.as_path();
        let (sub, rest) = match args.split_once(char::is_whitespace) {
            Some((sub, rest)) => (sub, rest.trim()),
            None => (args, ""),
        };

        let result = match sub.to_ascii_lowercase().as_str() {
            "" => Self::show_recording(path, renderer),
            "clear" => ClickRecording::clear(path).map(|removed| {
                if removed {
                    renderer.render_notice(&format!("Removed recording {}", path.display()));
                } else {
                    renderer.render_notice(&format!("No recording found at {}", path.display()));
                }
            }),
            "import" if !rest.is_empty() => Self::import_recording(Path::new(rest), path, renderer),
            _ => {
                renderer.render_error(&format!("usage: {}", Capability::Recording.usage()));
                Ok(())
            }
        };

        if let Err(err) = result {
            renderer.render_error(&format!("{:#}", err));
        }
    }

    fn show_recording(path: &Path, renderer: &mut dyn Renderer) -> anyhow::Result<()> {
        match ClickRecording::load(path)? {
            None => {
                renderer.render_notice(&format!("No recording found at {}", path.display()));
            }
            Some(recording) if recording.is_empty() => {
                renderer.render_notice(&format!("Recording {} is empty", path.display()));
            }
            Some(recording) => {
                renderer.render_notice(&format!(
                    "Recording {} ({} events):",
                    path.display(),
                    recording.len()
                ));
                for event in &recording.events {
                    renderer.render_notice(&format!("  {}", event));
                }
            }
        }
        Ok(())
    }

    fn import_recording(
        source: &Path,
        target: &Path,
        renderer: &mut dyn Renderer,
    ) -> anyhow::Result<()> {
        let Some(recording) = ClickRecording::load(source)? else {
            anyhow::bail!("No recording found at {}", source.display());
        };
        recording.save(target)?;
        renderer.render_notice(&format!(
            "Imported {} events into {}",
            recording.len(),
            target.display()
        ));
        Ok(())
    }
}
