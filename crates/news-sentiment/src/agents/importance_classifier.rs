//! LLM importance triage

use news_llm::{CompletionRequest, LLMProvider, ResponseSchema, complete_structured, schema};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::config::SentimentConfig;
use crate::error::Result;
use crate::models::{ImportanceDecision, ImportanceResponse, NewsBundle};
use crate::prompts::{self, system};

/// Schema of the classifier response: ticker plus one decision per article
pub fn importance_schema() -> ResponseSchema {
    let decision = schema::object(
        json!({
            "articleIndex": schema::non_negative_integer(
                "The index of the news article in the array (0-based index)"
            ),
            "importance": schema::boolean("Whether the news article is important"),
            "reason": schema::string("The reason why the news article is important or not"),
        }),
        vec!["articleIndex", "importance", "reason"],
    );

    ResponseSchema::new(
        "news_importance",
        schema::object(
            json!({
                "ticker": schema::string("The stock ticker symbol"),
                "decisions": schema::array("List of decisions for each news article", decision),
            }),
            vec!["ticker", "decisions"],
        ),
    )
    .with_description("Importance decision for every article in the bundle")
}

/// Decides which articles are worth reading in full
pub struct ImportanceClassifier {
    provider: Arc<dyn LLMProvider>,
    config: Arc<SentimentConfig>,
}

impl ImportanceClassifier {
    pub fn new(provider: Arc<dyn LLMProvider>, config: Arc<SentimentConfig>) -> Self {
        Self { provider, config }
    }

    /// One structured completion covering every article of `bundle`
    ///
    /// An empty bundle yields no decisions without calling the model.
    #[instrument(skip_all, fields(ticker = bundle.ticker(), articles = bundle.total_articles()))]
    pub async fn classify(&self, bundle: &NewsBundle) -> Result<Vec<ImportanceDecision>> {
        if bundle.is_empty() {
            debug!("No articles to classify");
            return Ok(Vec::new());
        }

        let request = CompletionRequest::new(&self.config.model)
            .with_system(system::IMPORTANCE_CLASSIFIER)
            .with_user(prompts::importance_prompt(bundle)?)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);

        let response: ImportanceResponse =
            complete_structured(self.provider.as_ref(), request, &importance_schema()).await?;

        if !response.ticker.eq_ignore_ascii_case(bundle.ticker()) {
            warn!(returned = %response.ticker, "Classifier answered for a different ticker");
        }

        debug!(
            decisions = response.decisions.len(),
            important = response.decisions.iter().filter(|d| d.importance).count(),
            "Classified articles"
        );
        Ok(response.decisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::testing::ScriptedProvider;
    use crate::error::SentimentError;
    use crate::models::Article;
    use news_llm::LLMError;

    fn bundle(n: usize) -> NewsBundle {
        let articles = (0..n)
            .map(|i| Article {
                id: Some(i.to_string()),
                title: Some(format!("Headline {i}")),
                summary: None,
                pub_date: None,
                provider: None,
                url: String::new(),
                editors_pick: None,
            })
            .collect();
        NewsBundle::new("AAPL", articles)
    }

    fn classifier(provider: Arc<ScriptedProvider>) -> ImportanceClassifier {
        ImportanceClassifier::new(provider, Arc::new(SentimentConfig::default()))
    }

    #[tokio::test]
    async fn test_classify_returns_decisions() {
        let provider = Arc::new(ScriptedProvider::new(vec![json!({
            "ticker": "AAPL",
            "decisions": [
                {"articleIndex": 0, "importance": true, "reason": "relevant"},
                {"articleIndex": 1, "importance": false, "reason": "not relevant"}
            ]
        })
        .to_string()]));

        let decisions = classifier(Arc::clone(&provider))
            .classify(&bundle(2))
            .await
            .unwrap();

        assert_eq!(
            decisions,
            vec![
                ImportanceDecision::new(0, true, "relevant"),
                ImportanceDecision::new(1, false, "not relevant"),
            ]
        );

        let request = provider.last_request().unwrap();
        assert_eq!(request.system.as_deref(), Some(system::IMPORTANCE_CLASSIFIER));
        assert_eq!(
            request.response_schema.as_ref().map(|s| s.name.as_str()),
            Some("news_importance")
        );
        assert!(request.messages[0].content.contains("Headline 1"));
    }

    #[tokio::test]
    async fn test_schema_violation_is_fatal() {
        let provider = Arc::new(ScriptedProvider::new(vec![json!({
            "ticker": "AAPL",
            "decisions": [{"articleIndex": 0, "importance": "yes", "reason": "?"}]
        })
        .to_string()]));

        let result = classifier(provider).classify(&bundle(1)).await;
        assert!(matches!(
            result,
            Err(SentimentError::Llm(LLMError::SchemaValidation { .. }))
        ));
    }

    #[tokio::test]
    async fn test_empty_bundle_skips_model() {
        let provider = Arc::new(ScriptedProvider::new(Vec::new()));
        let decisions = classifier(Arc::clone(&provider))
            .classify(&bundle(0))
            .await
            .unwrap();

        assert!(decisions.is_empty());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_negative_index_is_a_schema_violation() {
        let provider = Arc::new(ScriptedProvider::new(vec![json!({
            "ticker": "AAPL",
            "decisions": [{"articleIndex": -1, "importance": true, "reason": "relevant"}]
        })
        .to_string()]));

        let err = classifier(provider).classify(&bundle(1)).await.unwrap_err();
        match err {
            SentimentError::Llm(LLMError::SchemaValidation { violation, .. }) => {
                assert_eq!(violation.path, "$.decisions[0].articleIndex");
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn test_schema_rejects_missing_reason() {
        let schema = importance_schema();
        let value = json!({
            "ticker": "AAPL",
            "decisions": [{"articleIndex": 0, "importance": true}]
        });
        let violation = schema.validate(&value).unwrap_err();
        assert!(violation.path.starts_with("$.decisions[0]"));
    }
}
