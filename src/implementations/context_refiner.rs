use std::sync::Arc;

use log::{ debug, info, warn };
use serde::Deserialize;
use serde_json::Value;

use crate::errors::FactCheckResult;
use crate::implementations::config::{ render, CheckerConfig };
use crate::implementations::response_parser::parse_or_default;
use crate::models::{ Claim, RefinedContext };
use crate::traits::LanguageModel;

/// Shape the model is asked to produce; every field is optional because the
/// model is not guaranteed to follow instructions
#[derive(Debug, Deserialize, Default)]
struct RefineAnswer {
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    keywords: Vec<Value>,
}

/// Expands a claim into a richer statement plus search keywords
#[derive(Clone)]
pub struct ContextRefiner {
    model: Arc<dyn LanguageModel>,
    model_id: String,
    temperature: f32,
    max_tokens: usize,
    template: String,
}

impl ContextRefiner {
    pub fn new(model: Arc<dyn LanguageModel>, config: &CheckerConfig) -> FactCheckResult<Self> {
        Ok(Self {
            model,
            model_id: config.model(),
            temperature: config.refine_temperature.unwrap_or(0.3),
            max_tokens: config.max_tokens(),
            template: config.template("refine")?,
        })
    }

    /// Never fails: a failed call or an unparseable answer yields the claim
    /// itself with no keywords
    pub async fn refine(&self, claim: &Claim) -> RefinedContext {
        info!("Refining claim ({} characters)", claim.as_str().len());
        let prompt = render(&self.template, &[("claim", claim.as_str())]);

        let response = match
            self.model.complete(&prompt, &self.model_id, self.temperature, self.max_tokens).await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Context refinement failed, continuing with the raw claim: {}", e);
                return RefinedContext::fallback(claim);
            }
        };

        let parsed = parse_or_default(&response, RefineAnswer::default());
        if parsed.degraded {
            warn!("ParseDegraded: refinement answer carried no JSON record");
            return RefinedContext::fallback(claim);
        }

        let refined = into_refined(parsed.value, claim);
        debug!("Refined context: {} keywords {:?}", refined.context.len(), refined.keywords);
        refined
    }
}

fn into_refined(answer: RefineAnswer, claim: &Claim) -> RefinedContext {
    let context = answer.context
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| claim.as_str().to_string());

    let keywords = answer.keywords
        .into_iter()
        .filter_map(|k| match k {
            Value::String(s) => Some(s.trim().to_string()),
            _ => None,
        })
        .filter(|k| !k.is_empty())
        .collect();

    RefinedContext { context, keywords }
}
