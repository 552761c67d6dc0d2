//! Generation pipeline orchestration

use crate::config::ExtractorConfig;
use crate::cutoff::count_field_headers;
use crate::error::ExtractorError;
use crate::normalize::normalize;
use crate::parser::parse_generated_fields;
use crate::prompt::PromptBuilder;
use crate::reduce::{reduce_normalized, ReductionStats};
use crate::types::{
    GenerationInput, GenerationOutcome, GenerationRequest, GenerationStage, GenerationWarning,
};
use fieldsmith_domain::traits::GenerationProvider;
use fieldsmith_domain::{check_field, FieldSpec};
use std::fmt::Display;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Turns documents into field specifications through a generation service
///
/// One request is in flight per call to [`FieldGenerator::generate`]. A
/// failure at any stage ends that invocation; nothing is retried.
pub struct FieldGenerator<P>
where
    P: GenerationProvider,
{
    provider: P,
    config: ExtractorConfig,
    stage: watch::Sender<GenerationStage>,
}

impl<P> FieldGenerator<P>
where
    P: GenerationProvider,
    P::Error: Display,
{
    /// Create a new generator
    pub fn new(provider: P, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let (stage, _) = watch::channel(GenerationStage::Idle);
        Ok(Self {
            provider,
            config,
            stage,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Current stage
    pub fn stage(&self) -> GenerationStage {
        *self.stage.borrow()
    }

    /// Receiver for stage changes
    pub fn subscribe(&self) -> watch::Receiver<GenerationStage> {
        self.stage.subscribe()
    }

    /// Generate fields for a document
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationOutcome, ExtractorError> {
        let result = self.run(request).await;
        match &result {
            Ok(outcome) => {
                info!(
                    "Generated {} fields for '{}' ({} warnings)",
                    outcome.fields.len(),
                    outcome.object_name,
                    outcome.warnings.len()
                );
                self.set_stage(GenerationStage::Done);
            }
            Err(e) => {
                warn!("Generation failed: {}", e);
                self.set_stage(GenerationStage::Failed(e.kind()));
            }
        }
        result
    }

    async fn run(&self, request: GenerationRequest) -> Result<GenerationOutcome, ExtractorError> {
        self.set_stage(GenerationStage::Normalizing);
        let (text, reduction) = match &request.input {
            GenerationInput::Document(raw) => {
                let normalized = normalize(raw);
                self.set_stage(GenerationStage::Extracting);
                let reduced = reduce_normalized(raw.chars().count(), &normalized);
                (reduced.text, reduced.stats)
            }
            GenerationInput::Reduced(text) => {
                let normalized = normalize(text);
                let chars = normalized.chars().count();
                let stats = ReductionStats {
                    original_chars: text.chars().count(),
                    normalized_chars: chars,
                    cutoff_chars: chars,
                    extracted_chars: chars,
                    field_headers: count_field_headers(&normalized),
                };
                (normalized, stats)
            }
        };

        let fallback_name = request
            .object_name
            .as_deref()
            .unwrap_or(&self.config.default_object_name);
        let prompt = PromptBuilder::new(text)
            .with_default_object_name(fallback_name)
            .build();
        debug!("Prompt length: {} chars", prompt.len());

        self.set_stage(GenerationStage::AwaitingResponse);
        let response = timeout(
            self.config.generation_timeout(),
            self.provider.generate(&prompt),
        )
        .await
        .map_err(|_| {
            ExtractorError::ServiceFailure(format!(
                "generation timed out after {}s",
                self.config.generation_timeout_secs
            ))
        })?
        .map_err(|e| ExtractorError::ServiceFailure(e.to_string()))?;
        debug!(
            "{} response length: {} chars",
            self.provider.name(),
            response.len()
        );

        self.set_stage(GenerationStage::Parsing);
        let document = parse_generated_fields(&response)?;
        info!("Parsed {} fields", document.fields.len());

        let object_name = document
            .object_name
            .or(request.object_name)
            .unwrap_or_else(|| self.config.default_object_name.clone());
        let warnings = collect_warnings(&document.fields, reduction.field_headers);

        Ok(GenerationOutcome {
            object_name,
            fields: document.fields,
            warnings,
            reduction,
        })
    }

    fn set_stage(&self, stage: GenerationStage) {
        debug!("Generation stage: {}", stage);
        self.stage.send_replace(stage);
    }
}

fn collect_warnings(fields: &[FieldSpec], expected: usize) -> Vec<GenerationWarning> {
    let mut warnings = Vec::new();

    if expected > fields.len() {
        warn!(
            "Possible truncation: {} field headers, {} fields generated",
            expected,
            fields.len()
        );
        warnings.push(GenerationWarning::PossibleTruncation {
            expected,
            received: fields.len(),
        });
    }

    warnings.extend(fields.iter().filter_map(|field| {
        let issues = check_field(field);
        (!issues.is_empty()).then(|| GenerationWarning::FieldIssues {
            api_name: field.api_name.clone(),
            issues,
        })
    }));

    warnings
}
