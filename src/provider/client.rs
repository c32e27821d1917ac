//! LLM provider client and streaming implementation.
//!
//! Contains the [`Provider`] struct which wraps rig-core's DeepSeek client and
//! adapts it to the [`TextGenerator`] seam. Agents are built per request since
//! they are cheap to create and the preamble depends on the conversation.

use anyhow::{Context, Result};
use futures::StreamExt;
use rig::agent::MultiTurnStreamItem;
use rig::client::CompletionClient;
use rig::completion::Chat;
use rig::message::{Message as RigMessage, Text};
use rig::providers::deepseek;
use rig::streaming::{StreamedAssistantContent, StreamingChat};
use tracing::{debug, warn};

use super::resolve::GenerationSettings;
use super::{FragmentStream, TextGenerator};
use crate::error::GenerationError;
use crate::message::{Message, Role};

/// A configured LLM provider ready to handle completion requests.
#[derive(Clone)]
pub struct Provider {
    client: deepseek::Client,
    settings: GenerationSettings,
}

/// Builds an agent from the given client, settings, and optional system prompt,
/// then executes the provided block with the agent bound to `$agent`.
macro_rules! with_agent {
    ($client:expr, $settings:expr, $sys:expr, |$agent:ident| $body:expr) => {{
        let $agent = if let Some(sys) = $sys {
            $client
                .agent(&$settings.model)
                .preamble(sys)
                .temperature($settings.temperature)
                .max_tokens($settings.max_tokens)
                .build()
        } else {
            $client
                .agent(&$settings.model)
                .temperature($settings.temperature)
                .max_tokens($settings.max_tokens)
                .build()
        };
        $body
    }};
}

/// A conversation split into the pieces a rig agent takes.
struct Turn {
    preamble: Option<String>,
    prompt: String,
    history: Vec<RigMessage>,
}

/// Splits `messages` into preamble, prompt and chat history.
///
/// The first system message becomes the preamble, the last message is the
/// prompt, and everything in between (system messages excluded) is history.
fn split_conversation(messages: &[Message]) -> Result<Turn, GenerationError> {
    let (last, earlier) = messages
        .split_last()
        .ok_or(GenerationError::EmptyConversation)?;

    let preamble = messages
        .iter()
        .find(|m| m.role == Role::System)
        .map(|m| m.text().to_string());

    let history = earlier
        .iter()
        .filter_map(|m| match m.role {
            Role::User => Some(RigMessage::user(m.text())),
            Role::Assistant => Some(RigMessage::assistant(m.text())),
            Role::System => None,
        })
        .collect();

    Ok(Turn {
        preamble,
        prompt: last.text().to_string(),
        history,
    })
}

impl Provider {
    /// Creates a new [`Provider`] for DeepSeek.
    ///
    /// Uses the vendor's default endpoint unless `base_url` is given.
    ///
    /// # Errors
    ///
    /// Returns an error if client construction fails.
    pub fn new(api_key: &str, base_url: Option<&str>, settings: GenerationSettings) -> Result<Self> {
        let client = match base_url {
            Some(url) => deepseek::Client::builder()
                .api_key(api_key)
                .base_url(url)
                .build(),
            None => deepseek::Client::new(api_key),
        }
        .context("Failed to create DeepSeek client")?;

        debug!(model = %settings.model, base_url = ?base_url, "provider ready");
        Ok(Self { client, settings })
    }
}

#[async_trait::async_trait]
impl TextGenerator for Provider {
    async fn ask(&self, messages: &[Message]) -> Result<String, GenerationError> {
        let Turn {
            preamble,
            prompt,
            history,
        } = split_conversation(messages)?;

        with_agent!(self.client, self.settings, preamble.as_deref(), |agent| {
            agent
                .chat(prompt, history)
                .await
                .map_err(|err| GenerationError::Request(err.to_string()))
        })
    }

    fn stream_ask(&self, messages: &[Message]) -> FragmentStream {
        let turn = split_conversation(messages);
        let client = self.client.clone();
        let settings = self.settings.clone();

        Box::pin(async_stream::stream! {
            let Turn { preamble, prompt, history } = match turn {
                Ok(turn) => turn,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            };
            debug!(model = %settings.model, history = history.len(), "opening stream");

            let mut stream = with_agent!(client, settings, preamble.as_deref(), |agent| {
                agent.stream_chat(prompt, history).await
            });

            while let Some(chunk) = stream.next().await {
                match chunk {
                    Ok(MultiTurnStreamItem::StreamAssistantItem(StreamedAssistantContent::Text(
                        Text { text },
                    ))) => {
                        yield Ok(text);
                    }
                    Ok(MultiTurnStreamItem::FinalResponse(_)) => {
                        // Stream complete
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "stream broke");
                        yield Err(GenerationError::Stream(err.to_string()));
                        break;
                    }
                    _ => {
                        // Reasoning and tool items are not shown
                    }
                }
            }
        })
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}
