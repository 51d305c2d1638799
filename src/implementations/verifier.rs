use std::sync::Arc;

use log::{ debug, info, warn };
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{ ErrorClass, FactCheckResult };
use crate::implementations::config::{ render, CheckerConfig };
use crate::implementations::response_parser::parse_or_default;
use crate::models::{ ArticleContent, RefinedContext, Verdict };
use crate::traits::LanguageModel;

#[derive(Debug, Deserialize)]
struct VerdictAnswer {
    #[serde(alias = "factually_correct")]
    supported: bool,
    #[serde(default)]
    confidence: Value,
    #[serde(default)]
    explanation: String,
}

/// Asks the model whether the gathered evidence supports the refined claim
#[derive(Clone)]
pub struct Verifier {
    model: Arc<dyn LanguageModel>,
    model_id: String,
    temperature: f32,
    max_tokens: usize,
    template: String,
}

impl Verifier {
    pub fn new(model: Arc<dyn LanguageModel>, config: &CheckerConfig) -> FactCheckResult<Self> {
        Ok(Self {
            model,
            model_id: config.model(),
            temperature: config.verify_temperature.unwrap_or(0.2),
            max_tokens: config.max_tokens(),
            template: config.template("verify")?,
        })
    }

    /// Always produces a verdict. An empty evidence set is still judged;
    /// the model is expected to answer with low confidence.
    pub async fn verify(&self, refined: &RefinedContext, contents: &[ArticleContent]) -> Verdict {
        let evidence = evidence_blob(contents);
        if evidence.is_empty() {
            let class = ErrorClass::NoEvidenceFound;
            info!("{:?}: {}", class, class.recovery_strategy().unwrap_or("abort"));
        } else {
            debug!("Evidence blob: {} characters", evidence.len());
        }

        let prompt = render(
            &self.template,
            &[
                ("context", refined.context.as_str()),
                ("evidence", evidence.as_str()),
            ]
        );

        let response = match
            self.model.complete(&prompt, &self.model_id, self.temperature, self.max_tokens).await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Verification request failed: {}", e);
                return Verdict::Unparseable {
                    raw: format!("verification request failed: {}", e),
                };
            }
        };

        parse_verdict(&response)
    }
}

/// Text of every usable article, newline separated; failed and empty
/// entries contribute nothing
pub fn evidence_blob(contents: &[ArticleContent]) -> String {
    contents
        .iter()
        .filter(|c| c.is_usable() && !c.text.is_empty())
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Recover a verdict from model text, clamping confidence into `[0, 1]`
pub fn parse_verdict(response: &str) -> Verdict {
    let parsed = parse_or_default::<Option<VerdictAnswer>>(response, None);
    match parsed.value {
        Some(answer) => {
            let confidence = confidence_value(&answer.confidence);
            info!("Verdict: supported={} confidence={:.2}", answer.supported, confidence);
            Verdict::judged(answer.supported, confidence, answer.explanation.trim())
        }
        None => {
            warn!("ParseDegraded: verdict answer carried no usable JSON record");
            Verdict::Unparseable { raw: response.to_string() }
        }
    }
}

fn confidence_value(value: &Value) -> f32 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0) as f32,
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f32>().map(|v| {
            if s.trim().ends_with('%') { v / 100.0 } else { v }
        }).unwrap_or(0.0),
        _ => 0.0,
    }
}
