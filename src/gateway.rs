//! Resource acquisition gateway
//!
//! The gateway mediates between callers and the generative service. Every
//! public operation is total: it always produces a usable value. Failures are
//! logged and degrade in one direction only, live service to local fallback.
//! Each call attempts the live service at most once.

use crate::config::{Config, GatewayConfig};
use crate::error::{DecodeError, Result, StudyScoutError};
use crate::fallback;
use crate::prompts::{
    decode_resources, decode_summary, excerpt, generate_resource_prompt, generate_summary_prompt,
    summary_prompt::SUMMARY_UNAVAILABLE,
    tutor_prompt::{APOLOGY_REPLY, DEMO_MODE_REPLY, EMPTY_REPLY},
};
use crate::providers::{self, CompletionResponse, GenerationRequest, Message, Provider};
use crate::resource::LearningResource;
use crate::tutor::{Session, SessionHandle};
use std::sync::Arc;

/// Entry point for searches, tutor chat, and summaries
///
/// Cloning is cheap; clones share the same provider.
///
/// # Examples
///
/// ```
/// use studyscout::config::GatewayConfig;
/// use studyscout::gateway::Gateway;
///
/// # tokio_test::block_on(async {
/// let gateway = Gateway::offline(GatewayConfig::immediate());
/// assert!(gateway.start_session("Rust").is_none());
///
/// let batch = gateway.fetch_resources("rust").await;
/// assert_eq!(batch.len(), 6);
/// # });
/// ```
#[derive(Clone)]
pub struct Gateway {
    provider: Option<Arc<dyn Provider>>,
    settings: GatewayConfig,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("live", &self.is_live())
            .field("settings", &self.settings)
            .finish()
    }
}

impl Gateway {
    /// Creates a gateway over an optional provider
    pub fn new(provider: Option<Arc<dyn Provider>>, settings: GatewayConfig) -> Self {
        Self { provider, settings }
    }

    /// Creates a gateway with no provider; every call takes the fallback path
    pub fn offline(settings: GatewayConfig) -> Self {
        Self::new(None, settings)
    }

    /// Creates a gateway from loaded configuration
    ///
    /// A missing credential yields an offline gateway. Any other provider
    /// construction failure is logged and also yields an offline gateway.
    pub fn from_config(config: &Config) -> Self {
        let provider: Option<Arc<dyn Provider>> =
            match providers::create_provider(&config.provider) {
                Ok(provider) => Some(Arc::from(provider)),
                Err(e) => {
                    match e.downcast_ref::<StudyScoutError>() {
                        Some(StudyScoutError::MissingCredentials(_)) => tracing::warn!(
                            "Gemini API key not found. Using simulated responses where possible."
                        ),
                        _ => tracing::error!(
                            "Failed to initialize provider, running offline: {}",
                            e
                        ),
                    }
                    None
                }
            };
        Self::new(provider, config.gateway)
    }

    /// Returns true when requests go to the live service
    pub fn is_live(&self) -> bool {
        self.provider.is_some()
    }

    /// Timing settings in effect
    pub fn settings(&self) -> GatewayConfig {
        self.settings
    }

    /// Starts a tutor session for `topic`
    ///
    /// Returns `None` when no credential is configured. The caller replaces
    /// any session it held for a previous topic with the returned handle.
    pub fn start_session(&self, topic: &str) -> Option<SessionHandle> {
        if self.provider.is_none() {
            tracing::debug!("No provider configured; chat for '{}' runs in demo mode", topic);
            return None;
        }
        let session = Arc::new(Session::new(topic));
        tracing::info!(
            "Started tutor session {} for topic '{}'",
            session.id(),
            session.topic()
        );
        Some(session)
    }

    /// Sends one chat message and returns the reply text
    ///
    /// Without a session the configured demo delay elapses and the fixed
    /// demo-mode reply is returned. With a session the full history plus the
    /// new message is sent; on success both turns are appended to that
    /// session. On failure the fixed apology is returned and the history is
    /// left unchanged.
    ///
    /// Concurrent calls on the same session run one after another, so each
    /// request sees every earlier exchange.
    pub async fn send_message(&self, session: Option<&SessionHandle>, text: &str) -> String {
        let (Some(session), Some(provider)) = (session, self.provider.as_ref()) else {
            tokio::time::sleep(self.settings.demo_reply_delay()).await;
            return DEMO_MODE_REPLY.to_string();
        };

        let _turn = session.begin_turn().await;
        let user_turn = Message::user(text.trim());
        let mut messages = session.history().await;
        messages.push(user_turn.clone());
        let request = GenerationRequest::conversation(session.system_instruction(), messages);

        match provider.generate(&request).await {
            Ok(response) => {
                log_usage("chat turn", &response);
                let reply = response
                    .text
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| EMPTY_REPLY.to_string());
                session
                    .record_exchange(user_turn, Message::model(reply.clone()))
                    .await;
                tracing::debug!(
                    "Session {} now holds {} turns",
                    session.id(),
                    session.turn_count().await
                );
                reply
            }
            Err(e) => {
                tracing::error!("Error sending message to AI (session {}): {}", session.id(), e);
                APOLOGY_REPLY.to_string()
            }
        }
    }

    /// Returns a batch of learning resources for `topic`
    ///
    /// Never empty and never an error: any live-path failure falls back to
    /// [`fallback::generate`].
    pub async fn fetch_resources(&self, topic: &str) -> Vec<LearningResource> {
        let topic = topic.trim();
        let Some(provider) = self.provider.as_ref() else {
            tokio::time::sleep(self.settings.simulated_latency()).await;
            return fallback::generate(topic);
        };

        match self.request_resources(provider.as_ref(), topic).await {
            Ok(resources) => {
                tracing::info!(
                    "Fetched {} resources for '{}' from {}",
                    resources.len(),
                    topic,
                    provider.model()
                );
                resources
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch AI resources for '{}', falling back to simulation: {}",
                    topic,
                    e
                );
                fallback::generate(topic)
            }
        }
    }

    async fn request_resources(
        &self,
        provider: &dyn Provider,
        topic: &str,
    ) -> Result<Vec<LearningResource>> {
        let request = GenerationRequest::prompt(generate_resource_prompt(topic)).json();
        let response = provider.generate(&request).await?;
        log_usage("resource batch", &response);
        let text = response.text.ok_or(DecodeError::EmptyResponse)?;
        Ok(decode_resources(&text)?)
    }

    /// Returns summary bullets for a resource
    ///
    /// Offline, the simulated bullets are returned after the configured
    /// latency. A reply without a JSON array is reduced to a short excerpt.
    pub async fn summarize_resource(&self, title: &str, context: &str) -> Vec<String> {
        let Some(provider) = self.provider.as_ref() else {
            tokio::time::sleep(self.settings.simulated_latency()).await;
            return fallback::simulated_summary();
        };

        let request = GenerationRequest::prompt(generate_summary_prompt(title, context));
        let text = match provider.generate(&request).await {
            Ok(response) => {
                log_usage("summary", &response);
                response.text.unwrap_or_default()
            }
            Err(e) => {
                tracing::error!("Summary generation failed: {}", e);
                return vec![SUMMARY_UNAVAILABLE.to_string()];
            }
        };

        match decode_summary(&text) {
            Ok(bullets) => bullets,
            Err(DecodeError::NoArray) | Err(DecodeError::EmptyResponse) => vec![excerpt(&text)],
            Err(e) => {
                tracing::warn!("Summary reply could not be decoded: {}", e);
                vec![SUMMARY_UNAVAILABLE.to_string()]
            }
        }
    }
}

fn log_usage(call: &str, response: &CompletionResponse) {
    if let Some(usage) = response.usage {
        tracing::debug!(
            "{} used {} tokens ({} prompt, {} completion)",
            call,
            usage.total_tokens,
            usage.prompt_tokens,
            usage.completion_tokens
        );
    }
}
