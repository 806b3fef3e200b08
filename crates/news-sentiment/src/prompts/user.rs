//! User message templates
//!
//! Both templates receive the bundle pretty-printed as JSON so the model sees
//! exactly the field names the response schema refers to.

use serde_json::json;

use super::render;
use crate::error::Result;
use crate::models::{Confidence, MergedBundle, NewsBundle, Sentiment};

const IMPORTANCE_TEMPLATE: &str = r#"Here are the titles and summaries of {{ total }} news articles for {{ ticker }}.

{{ articles }}

Please analyze EACH article and decide if it is worth reading based on the title and summary.
For each article, provide:
1. The articleIndex (0-based index matching the array position)
2. A boolean indicating if it is important (true or false)
3. A brief reason for your decision

Decide based on the following criteria:
- The relevance of the news article to {{ ticker }}
- The credibility of the news source
- The potential market impact of the news on {{ ticker }}
- Whether the news is an analyst's opinion or a reported fact
- Whether the news is an editor's pick

You must provide exactly one decision for ALL {{ total }} articles."#;

const SCORE_TEMPLATE: &str = r#"Here are {{ total }} news articles for {{ ticker }}. Each article carries the importance decision made earlier, the reason for it and, for important articles, the scraped article text.

{{ articles }}

Give {{ ticker }} a single sentiment score from 0 to 100 using this scale:
- 0-20: very bearish
- 21-40: bearish
- 41-59: neutral
- 60-79: bullish
- 80-100: very bullish

When weighing the articles, explicitly consider:
- Relevance of each article to {{ ticker }}
- Credibility of the source
- Whether the content is fact or opinion
- How surprising the news is relative to expectations
- The magnitude of the likely impact
- How recent the news is

Do not fabricate financial data that is not in the articles. If the articles are mostly irrelevant to {{ ticker }}, keep the score in the 45-55 neutral range.

Respond with the ticker, the score, a sentiment of {{ sentiments }}, a confidence of {{ confidences }} and a concise reason that cites the articles that drove the score."#;

/// Render the importance classification request for `bundle`
pub fn importance_prompt(bundle: &NewsBundle) -> Result<String> {
    render(
        "importance",
        IMPORTANCE_TEMPLATE,
        json!({
            "ticker": bundle.ticker(),
            "total": bundle.total_articles(),
            "articles": serde_json::to_string_pretty(bundle)?,
        }),
    )
}

/// Render the sentiment scoring request for `bundle`
pub fn score_prompt(bundle: &MergedBundle) -> Result<String> {
    render(
        "score",
        SCORE_TEMPLATE,
        json!({
            "ticker": bundle.ticker(),
            "total": bundle.total_articles(),
            "articles": serde_json::to_string_pretty(bundle)?,
            "sentiments": Sentiment::ALL.join(", "),
            "confidences": Confidence::ALL.join(", "),
        }),
    )
}
