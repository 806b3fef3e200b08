//! LLM aggregate sentiment scoring

use news_llm::{CompletionRequest, LLMProvider, ResponseSchema, complete_structured, schema};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::SentimentConfig;
use crate::error::Result;
use crate::models::{Confidence, MergedBundle, ScoreVerdict, Sentiment};
use crate::prompts::{self, system};

/// Schema of the analyzer response
pub fn verdict_schema() -> ResponseSchema {
    ResponseSchema::new(
        "news_sentiment_score",
        schema::object(
            json!({
                "ticker": schema::string("The stock ticker symbol"),
                "score": schema::integer_range(
                    "Sentiment score from 0 (very bearish) to 100 (very bullish)",
                    0,
                    100,
                ),
                "sentiment": schema::enum_string("Overall market sentiment", &Sentiment::ALL),
                "confidence": schema::enum_string("Confidence in the score", &Confidence::ALL),
                "reason": schema::string("Reasoning behind the score"),
            }),
            vec!["ticker", "score", "sentiment", "confidence", "reason"],
        ),
    )
    .with_description("Aggregate news sentiment verdict for one ticker")
}

/// Produces the final [`ScoreVerdict`] from an enriched bundle
pub struct ScoreAnalyzer {
    provider: Arc<dyn LLMProvider>,
    config: Arc<SentimentConfig>,
}

impl ScoreAnalyzer {
    pub fn new(provider: Arc<dyn LLMProvider>, config: Arc<SentimentConfig>) -> Self {
        Self { provider, config }
    }

    #[instrument(skip_all, fields(ticker = bundle.ticker(), articles = bundle.total_articles()))]
    pub async fn score(&self, bundle: &MergedBundle) -> Result<ScoreVerdict> {
        let request = CompletionRequest::new(&self.config.model)
            .with_system(system::SCORE_ANALYZER)
            .with_user(prompts::score_prompt(bundle)?)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);

        let verdict: ScoreVerdict =
            complete_structured(self.provider.as_ref(), request, &verdict_schema()).await?;

        info!(
            score = verdict.score,
            sentiment = %verdict.sentiment,
            confidence = %verdict.confidence,
            "Scored news sentiment"
        );
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::testing::ScriptedProvider;
    use crate::error::SentimentError;
    use crate::models::{Article, ImportanceDecision, MergedArticle};
    use news_llm::LLMError;

    fn merged() -> MergedBundle {
        let article = Article {
            id: None,
            title: Some("Apple raises dividend".into()),
            summary: None,
            pub_date: None,
            provider: Some("Reuters".into()),
            url: "https://news.test/0".into(),
            editors_pick: None,
        };
        let decision = ImportanceDecision::new(0, true, "capital return");
        MergedBundle::new(
            "AAPL",
            vec![MergedArticle::new(&article, &decision, "Dividend up 4%.\n".into())],
        )
    }

    fn analyzer(provider: Arc<ScriptedProvider>) -> ScoreAnalyzer {
        ScoreAnalyzer::new(provider, Arc::new(SentimentConfig::default()))
    }

    #[tokio::test]
    async fn test_score_parses_verdict() {
        let provider = Arc::new(ScriptedProvider::new(vec![json!({
            "ticker": "AAPL",
            "score": 66,
            "sentiment": "Bullish",
            "confidence": "Medium",
            "reason": "Dividend increase signals confidence"
        })
        .to_string()]));

        let verdict = analyzer(Arc::clone(&provider)).score(&merged()).await.unwrap();

        assert_eq!(verdict.score, 66);
        assert_eq!(verdict.sentiment, Sentiment::Bullish);
        assert_eq!(verdict.confidence, Confidence::Medium);

        let request = provider.last_request().unwrap();
        assert_eq!(request.system.as_deref(), Some(system::SCORE_ANALYZER));
        assert!(request.messages[0].content.contains("Dividend up 4%."));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_fatal() {
        let provider = Arc::new(ScriptedProvider::new(vec![json!({
            "ticker": "AAPL",
            "score": 140,
            "sentiment": "Bullish",
            "confidence": "High",
            "reason": "Too good"
        })
        .to_string()]));

        let err = analyzer(provider).score(&merged()).await.unwrap_err();
        match err {
            SentimentError::Llm(LLMError::SchemaValidation { violation, .. }) => {
                assert_eq!(violation.path, "$.score");
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_sentiment_label_is_fatal() {
        let provider = Arc::new(ScriptedProvider::new(vec![json!({
            "ticker": "AAPL",
            "score": 50,
            "sentiment": "Sideways",
            "confidence": "Low",
            "reason": "Mixed"
        })
        .to_string()]));

        let result = analyzer(provider).score(&merged()).await;
        assert!(matches!(
            result,
            Err(SentimentError::Llm(LLMError::SchemaValidation { .. }))
        ));
    }
}
