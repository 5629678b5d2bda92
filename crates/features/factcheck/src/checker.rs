use crate::matcher::{normalize, token_set_ratio};
use crate::prompt::{FACT_CHECKER_SYSTEM, fact_check_user};
use crate::verdict::{FactCheckReport, NO_DIRECT_EVIDENCE, VerdictLabel};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tscope_llm::{ChatModel, ChatRequest, complete_with_fallback};
use tscope_news::{Article, ArticleQuery, HeadlineSource, TrustedFeed};

pub(crate) const NO_MODEL: &str = "OpenAI client not available or OPENAI_API_KEY not set.";

/// Chat model settings shared by the checker and the assistant.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub fallback_model: Option<String>,
    pub max_tokens: u32,
}

/// Provider search settings for evidence gathering.
#[derive(Debug, Clone, Copy)]
pub struct EvidenceSettings {
    /// RSS headlines must score strictly above this similarity.
    pub match_threshold: f64,
    pub limit: u32,
    pub timeout: Duration,
}

/// Verifies a claim against trusted headlines, provider search and a chat model.
#[derive(Debug, Clone)]
pub struct FactChecker {
    feed: TrustedFeed,
    providers: Vec<Arc<dyn HeadlineSource>>,
    model: Option<Arc<dyn ChatModel>>,
    model_settings: ModelSettings,
    evidence: EvidenceSettings,
}

impl FactChecker {
    #[must_use]
    pub const fn new(
        feed: TrustedFeed,
        providers: Vec<Arc<dyn HeadlineSource>>,
        model: Option<Arc<dyn ChatModel>>,
        model_settings: ModelSettings,
        evidence: EvidenceSettings,
    ) -> Self {
        Self { feed, providers, model, model_settings, evidence }
    }

    /// Runs the full check. Upstream failures become evidence or explanation lines.
    pub async fn check(&self, claim: &str) -> FactCheckReport {
        self.feed.refresh().await;

        let mut evidence = self.rss_evidence(claim);
        let rss_matches = evidence.len();
        self.provider_evidence(claim, &mut evidence).await;

        let explanation = self.verdict_text(claim, &evidence).await;
        let verdict = VerdictLabel::classify(&explanation);

        info!(rss_matches, evidence = evidence.len(), ?verdict, "Headline checked");

        if evidence.is_empty() {
            evidence.push(NO_DIRECT_EVIDENCE.to_owned());
        }
        FactCheckReport { verdict, evidence, explanation }
    }

    /// Cached trusted items whose normalized headline resembles the claim.
    #[must_use]
    pub fn rss_evidence(&self, claim: &str) -> Vec<String> {
        let claim = normalize(claim);
        self.feed
            .snapshot()
            .into_iter()
            .filter(|item| {
                token_set_ratio(&claim, &normalize(&item.headline)) > self.evidence.match_threshold
            })
            .map(|item| format!("{} ({})", item.headline, item.link))
            .collect()
    }

    async fn provider_evidence(&self, claim: &str, evidence: &mut Vec<String>) {
        let query = ArticleQuery {
            text: claim,
            limit: self.evidence.limit,
            language: Some("en"),
            sort_by: None,
            timeout: self.evidence.timeout,
        };

        for provider in &self.providers {
            match provider.search(&query).await {
                Ok(articles) => {
                    debug!(provider = provider.label(), count = articles.len(), "Provider evidence");
                    evidence.extend(articles.iter().map(Article::evidence_line));
                },
                Err(err) => {
                    warn!(provider = provider.label(), error = %err, "Evidence search failed");
                    evidence.push(format!("⚠ {} error: {err}", provider.label()));
                },
            }
        }
    }

    async fn verdict_text(&self, claim: &str, evidence: &[String]) -> String {
        let Some(model) = &self.model else {
            return format!("⚠ {NO_MODEL}");
        };

        let request = ChatRequest::new(&self.model_settings.model)
            .system(FACT_CHECKER_SYSTEM)
            .user(fact_check_user(claim, evidence))
            .max_tokens(self.model_settings.max_tokens);

        match complete_with_fallback(
            model.as_ref(),
            &request,
            self.model_settings.fallback_model.as_deref(),
        )
        .await
        {
            Ok(text) => text.trim().to_owned(),
            Err(err) => {
                warn!(error = %err, "Fact-check model failed");
                format!("⚠ OpenAI error: {err}")
            },
        }
    }
}
