//! LLM-backed pipeline stages
//!
//! - [`ImportanceClassifier`]: decides which articles deserve a full read
//! - [`ScoreAnalyzer`]: turns the enriched bundle into a [`ScoreVerdict`](crate::models::ScoreVerdict)

pub mod importance_classifier;
pub mod score_analyzer;

pub use importance_classifier::{ImportanceClassifier, importance_schema};
pub use score_analyzer::{ScoreAnalyzer, verdict_schema};

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use news_llm::{CompletionRequest, CompletionResponse, LLMError, LLMProvider, StopReason};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider replaying canned payloads in order and recording requests
    pub(crate) struct ScriptedProvider {
        replies: Mutex<VecDeque<String>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        pub(crate) fn new(replies: Vec<String>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub(crate) fn last_request(&self) -> Option<CompletionRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, request: CompletionRequest) -> news_llm::Result<CompletionResponse> {
            self.requests.lock().unwrap().push(request);
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| LLMError::RequestFailed("script exhausted".to_string()))?;

            Ok(CompletionResponse::from_text(reply, StopReason::EndTurn))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }
}
