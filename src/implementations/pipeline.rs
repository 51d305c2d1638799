use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use log::{ error, info, warn };

use crate::errors::{ FactCheckError, FactCheckResult };
use crate::implementations::config::{ render, CheckerConfig };
use crate::implementations::content_extractor::ContentExtractor;
use crate::implementations::context_refiner::ContextRefiner;
use crate::implementations::evidence_discovery::EvidenceDiscovery;
use crate::implementations::llm_client::ChatCompletionsClient;
use crate::implementations::news_feed::NewsFeedSearch;
use crate::implementations::page_fetcher::LlmPageExtractor;
use crate::implementations::verifier::Verifier;
use crate::models::report::fact_check_resources;
use crate::models::{ Claim, RefinedContext, Report };
use crate::traits::{ FactChecker, FeedSearch, LanguageModel, PageExtractor };

/// Runs refine -> discover -> extract -> verify for one claim at a time.
///
/// Holds no per-run state; the model and HTTP clients are shared read-only
/// across the concurrent calls of a run.
///
/// # Usage Example
/// ```rust,no_run
/// use factcheck::{ CheckerConfig, Claim, FactCheckPipeline, FactChecker };
///
/// async fn check() -> Result<(), Box<dyn std::error::Error>> {
///     let pipeline = FactCheckPipeline::new(CheckerConfig::default())?;
///     let report = pipeline
///         .run_fact_check(&Claim::new("Water boils at 100 degrees Celsius at sea level"))
///         .await;
///     println!("{:?}", report.verdict);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct FactCheckPipeline {
    refiner: ContextRefiner,
    discovery: EvidenceDiscovery,
    extractor: ContentExtractor,
    verifier: Verifier,
    model: Arc<dyn LanguageModel>,
    model_id: String,
    max_tokens: usize,
    summarize_template: String,
    summarize_temperature: f32,
    deadline: Option<Duration>,
}

impl FactCheckPipeline {
    /// Build the production pipeline: chat-completions model, news RSS search
    /// and HTTP page extraction
    pub fn new(config: CheckerConfig) -> FactCheckResult<Self> {
        let model: Arc<dyn LanguageModel> = Arc::new(ChatCompletionsClient::new(&config)?);
        let search: Arc<dyn FeedSearch> = Arc::new(NewsFeedSearch::new(&config)?);
        let extractor: Arc<dyn PageExtractor> = Arc::new(
            LlmPageExtractor::new(Arc::clone(&model), &config)?
        );
        Self::from_parts(model, search, extractor, &config)
    }

    /// Build a pipeline over caller-supplied collaborators
    pub fn from_parts(
        model: Arc<dyn LanguageModel>,
        search: Arc<dyn FeedSearch>,
        extractor: Arc<dyn PageExtractor>,
        config: &CheckerConfig
    ) -> FactCheckResult<Self> {
        Ok(Self {
            refiner: ContextRefiner::new(Arc::clone(&model), config)?,
            discovery: EvidenceDiscovery::new(search, config.pipeline.max_links),
            extractor: ContentExtractor::new(extractor, config)?,
            verifier: Verifier::new(Arc::clone(&model), config)?,
            model_id: config.model(),
            max_tokens: config.max_tokens(),
            summarize_template: config.template("summarize")?,
            summarize_temperature: config.summarize_temperature.unwrap_or(0.3),
            deadline: config.pipeline.deadline(),
            model,
        })
    }

    /// Bound the whole run; link extraction still in flight at the deadline is
    /// abandoned
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub async fn run(&self, claim: &Claim) -> Report {
        let started = std::time::Instant::now();
        let deadline = self.deadline.map(|d| tokio::time::Instant::now() + d);

        let mut report = Report {
            claim: claim.clone(),
            refined: RefinedContext::fallback(claim),
            articles: Vec::new(),
            verdict: Err("pipeline did not reach verification".to_string()),
            resources: fact_check_resources(),
            checked_at: chrono::Utc::now(),
            elapsed: Duration::ZERO,
        };

        if let Err(e) = self.run_stages(claim, deadline, &mut report).await {
            error!("Fact check aborted: {}", e);
            report.verdict = Err(e.to_string());
        }

        report.elapsed = started.elapsed();
        info!("Fact check finished in {:?}", report.elapsed);
        report
    }

    async fn run_stages(
        &self,
        claim: &Claim,
        deadline: Option<tokio::time::Instant>,
        report: &mut Report
    ) -> FactCheckResult<()> {
        if claim.is_blank() {
            return Err(FactCheckError::InvalidInput("claim is empty".to_string()));
        }

        info!("Stage 1: refining claim");
        report.refined = match
            guarded("refine", within(deadline, self.refiner.refine(claim))).await?
        {
            Some(refined) => refined,
            None => {
                warn!("Deadline reached during refinement");
                RefinedContext::fallback(claim)
            }
        };

        info!("Stage 2: discovering evidence for {:?}", report.refined.keywords);
        let links = guarded(
            "discover",
            within(deadline, self.discovery.discover(&report.refined.keywords))
        ).await?.unwrap_or_default();

        info!("Stage 3: extracting content from {} links", links.len());
        report.articles = guarded(
            "extract",
            self.extractor.extract_until(&links, &report.refined.keywords, deadline)
        ).await?;

        info!("Stage 4: verifying against {} usable articles", report.usable_evidence_count());
        let verdict = guarded("verify", self.verifier.verify(&report.refined, &report.articles)).await?;
        report.verdict = Ok(verdict);
        Ok(())
    }
}

/// `None` once the deadline passes
async fn within<F: Future>(deadline: Option<tokio::time::Instant>, fut: F) -> Option<F::Output> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fut).await.ok(),
        None => Some(fut.await),
    }
}

/// Turn a panic inside a stage into a fatal error instead of unwinding the run
async fn guarded<F: Future>(stage: &str, fut: F) -> FactCheckResult<F::Output> {
    AssertUnwindSafe(fut)
        .catch_unwind().await
        .map_err(|_| FactCheckError::System(format!("stage '{}' panicked", stage)))
}

#[async_trait]
impl FactChecker for FactCheckPipeline {
    async fn run_fact_check(&self, claim: &Claim) -> Report {
        self.run(claim).await
    }

    async fn summarize(&self, transcript: &str) -> FactCheckResult<String> {
        if transcript.trim().is_empty() {
            return Err(FactCheckError::InvalidInput("transcript is empty".to_string()));
        }

        info!("Summarizing transcript ({} characters)", transcript.len());
        let prompt = render(&self.summarize_template, &[("transcript", transcript)]);
        let summary = self.model.complete(
            &prompt,
            &self.model_id,
            self.summarize_temperature,
            self.max_tokens
        ).await?;
        Ok(summary.trim().to_string())
    }
}
