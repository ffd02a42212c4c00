//! Advice Resolver
//!
//! Turns plant facts into one display string. The provider is tried at most
//! once per resolution under a hard deadline; every failure mode falls back
//! to the configured local strategy. Resolution never returns an error.

use std::sync::Arc;

use super::fallback::CHAT_FALLBACK;
use super::policy::AdvicePolicy;
use super::prompt::Prompt;
use super::provider::{AdviceProvider, ProviderError};
use super::request::{AdviceRequest, AdviceResult};

#[derive(Clone)]
pub struct AdviceResolver {
    provider: Option<Arc<dyn AdviceProvider>>,
    policy: AdvicePolicy,
}

impl AdviceResolver {
    pub fn new(provider: Option<Arc<dyn AdviceProvider>>, policy: AdvicePolicy) -> Self {
        Self { provider, policy }
    }

    /// Resolver with no provider; every answer is local.
    pub fn offline(policy: AdvicePolicy) -> Self {
        Self::new(None, policy)
    }

    pub fn policy(&self) -> &AdvicePolicy {
        &self.policy
    }

    pub fn provider_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Resolve advice for one plant.
    ///
    /// Returns `None` only when the call policy says this plant needs no
    /// advice; in that case the provider is not contacted.
    pub async fn resolve(&self, request: &AdviceRequest) -> Option<AdviceResult> {
        if !self.policy.call.wants_advice(request.moisture_percent) {
            tracing::debug!(
                "Skipping advice for {} at {}% moisture (policy {:?})",
                request.species, request.moisture_percent, self.policy.call
            );
            return None;
        }

        let prompt = self.policy.prompt.plant_prompt(request);
        match self.generate(&prompt).await {
            Ok(text) => Some(AdviceResult::generated(text)),
            Err(e) => {
                log_failure(&e);
                Some(AdviceResult::fallback(self.policy.fallback.advise(request)))
            }
        }
    }

    /// Answer a free-text question with one short tip.
    ///
    /// Blank questions and any provider failure get the fixed chat reminder.
    /// The call policy does not apply here.
    pub async fn resolve_chat(&self, question: &str, location: &str) -> String {
        if question.trim().is_empty() {
            return CHAT_FALLBACK.to_string();
        }

        let prompt = self.policy.prompt.chat_prompt(question, location);
        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                log_failure(&e);
                CHAT_FALLBACK.to_string()
            }
        }
    }

    /// Single provider attempt bounded by the policy timeout.
    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let provider = self.provider.as_ref().ok_or(ProviderError::Unavailable)?;

        let text = tokio::time::timeout(self.policy.timeout, provider.generate(prompt))
            .await
            .map_err(|_| ProviderError::Timeout(self.policy.timeout))??;

        let text = text.trim();
        if text.is_empty() {
            return Err(ProviderError::BadResponse("empty text".to_string()));
        }
        tracing::debug!("Advice generated by {}", provider.name());
        Ok(text.to_string())
    }
}

fn log_failure(e: &ProviderError) {
    match e {
        ProviderError::Unavailable => tracing::debug!("Using local advice: {}", e),
        _ => tracing::warn!("Using local advice: {}", e),
    }
}
