//! News sentiment CLI
//!
//! Scores the latest news of a ticker and prints the verdict.
//!
//! # Usage
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."
//! # Any OpenAI-compatible endpoint works
//! export OPENAI_API_BASE="https://api.x.ai/v1"
//! export OPENAI_MODEL="grok-3-mini"
//!
//! cargo run --bin news-sentiment -- AAPL --articles 10 --verbose
//! ```

use clap::Parser;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use news_sentiment::{
    AnalysisContext, NewsAnalysis, NewsAnalysisEngine, SentimentConfig, Sentiment,
};
use news_utils::{LogFormat, init_tracing_with, load_dotenv};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "news-sentiment")]
#[command(about = "Score the recent news sentiment of a stock ticker", long_about = None)]
struct Args {
    /// Ticker symbol (e.g. AAPL, TSLA, BTC-USD)
    ticker: String,

    /// Number of articles to fetch and analyze
    #[arg(short = 'n', long)]
    articles: Option<usize>,

    /// Report pipeline progress
    #[arg(short, long)]
    verbose: bool,

    /// Print the full analysis as JSON
    #[arg(long)]
    json: bool,

    /// Maximum concurrent article scrapes
    #[arg(long)]
    concurrency: Option<usize>,

    /// LLM model name
    #[arg(long)]
    model: Option<String>,

    /// Emit log lines as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn config(&self) -> news_sentiment::Result<SentimentConfig> {
        let mut config = SentimentConfig::from_env()?;
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.scrape_concurrency = concurrency;
        }
        config.validate()?;
        Ok(config)
    }
}

fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Bullish => Color::Green,
        Sentiment::Bearish => Color::Red,
        Sentiment::Neutral => Color::Yellow,
    }
}

fn render_table(analysis: &NewsAnalysis) -> Table {
    let verdict = &analysis.verdict;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);

    table.add_row(vec![Cell::new("Ticker"), Cell::new(&verdict.ticker)]);
    table.add_row(vec![
        Cell::new("Score"),
        Cell::new(format!("{}/100 ({})", verdict.score, verdict.band().label())),
    ]);
    table.add_row(vec![
        Cell::new("Sentiment"),
        Cell::new(verdict.sentiment).fg(sentiment_color(verdict.sentiment)),
    ]);
    table.add_row(vec![Cell::new("Confidence"), Cell::new(verdict.confidence)]);
    table.add_row(vec![
        Cell::new("Articles"),
        Cell::new(format!(
            "{} analyzed, {} important, {} enriched",
            analysis.articles_analyzed, analysis.important_articles, analysis.enriched_articles
        )),
    ]);
    table.add_row(vec![Cell::new("Reason"), Cell::new(&verdict.reason)]);
    table.add_row(vec![
        Cell::new("Analyzed at"),
        Cell::new(analysis.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")),
    ]);

    table
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let dotenv = load_dotenv();

    let default_filter = if args.verbose {
        "warn,news_sentiment=info,news_llm=info"
    } else {
        "warn"
    };
    let format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing_with(default_filter, format);
    debug!(?dotenv, "Environment loaded");

    let config = args.config()?;
    let num_articles = args.articles.unwrap_or(config.default_articles);

    let ctx = AnalysisContext::from_config(config)?;
    let analysis = NewsAnalysisEngine::new(&ctx)
        .analyze_detailed(&args.ticker, num_articles, args.verbose)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}", render_table(&analysis));
    }

    Ok(())
}
