/*!
 * Passage generation for shadowing practice.
 *
 * Builds a genre-specific prompt around the learner's topic, sends it to
 * the text-generation provider, and parses the raw response into aligned
 * sentence pairs. The prompt demands alternating English/Japanese lines,
 * which is exactly the shape the content parser consumes.
 */

use anyhow::{Result, anyhow};
use log::{debug, warn};

use crate::app_config::GenerationConfig;
use crate::content_parser::{SentencePair, parse_generated_content};
use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::gemini::{Gemini, GeminiRequest};

/// Reading passage genre selectable by the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    // @genre: Technology and companies
    Technology,
    // @genre: Science and discoveries
    Science,
    // @genre: Historical events
    History,
    // @genre: Environmental topics
    Environment,
    // @genre: Business and economics
    Business,
    // @genre: Culture and society
    Culture,
}

impl Genre {
    /// All selectable genres, in menu order
    pub const ALL: [Genre; 6] = [
        Genre::Technology,
        Genre::Science,
        Genre::History,
        Genre::Environment,
        Genre::Business,
        Genre::Culture,
    ];

    // @returns: Capitalized genre name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Technology => "Technology",
            Self::Science => "Science",
            Self::History => "History",
            Self::Environment => "Environment",
            Self::Business => "Business",
            Self::Culture => "Culture",
        }
    }

    // @returns: Genre-specific angle spliced into the prompt
    fn focus(&self) -> &str {
        match self {
            Self::Technology => "a technology company, product, or trend and its impact",
            Self::Science => "a scientific discovery or concept and why it matters",
            Self::History => "a historical event or period and its consequences",
            Self::Environment => "an environmental issue and current efforts around it",
            Self::Business => "a business or economic development and what drives it",
            Self::Culture => "a cultural phenomenon or tradition and its background",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name().to_lowercase())
    }
}

impl std::str::FromStr for Genre {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "technology" | "tech" => Ok(Self::Technology),
            "science" => Ok(Self::Science),
            "history" => Ok(Self::History),
            "environment" => Ok(Self::Environment),
            "business" => Ok(Self::Business),
            "culture" => Ok(Self::Culture),
            _ => Err(anyhow!("Invalid genre: {}", s)),
        }
    }
}

/// Prompt template for shadowing passages.
#[derive(Debug, Clone)]
pub struct PassagePrompt {
    /// The template string with placeholders
    template: String,
}

impl PassagePrompt {
    /// The default passage prompt.
    ///
    /// Placeholders: {focus}, {topic}. The output-format section pins the
    /// alternating-line shape the parser relies on.
    pub const SHADOWING_PASSAGE: &'static str = r#"You are an English tutor writing shadowing material for an intermediate Japanese learner.

Write a short article (8 to 12 sentences) about {focus}, on the specific theme: {topic}.

## Output format (strict)
- Write exactly one English sentence per line.
- Immediately after each English sentence, write its natural Japanese translation on the next line.
- Do not number the lines, do not add headings, bullet points, or commentary.
- Every English sentence starts with a capital letter and ends with a period.

## Style
- Clear, natural English at CEFR B1-B2 level.
- Concrete facts over vague generalities.
- Each sentence short enough to repeat aloud in one breath."#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Render the template for a genre and topic.
    pub fn render(&self, genre: Genre, topic: &str) -> String {
        self.template
            .replace("{focus}", genre.focus())
            .replace("{topic}", topic)
    }
}

impl Default for PassagePrompt {
    fn default() -> Self {
        Self::new(Self::SHADOWING_PASSAGE)
    }
}

/// Run one request through a provider and parse the result.
///
/// Provider failures surface as errors; a response that parses to nothing
/// yields an empty vector and the caller decides how loudly to complain.
pub async fn generate_with<P: Provider>(
    provider: &P,
    request: P::Request,
) -> Result<Vec<SentencePair>, ProviderError> {
    let response = provider.complete(request).await?;
    let raw = P::extract_text(&response);
    debug!("Provider returned {} bytes of generated text", raw.len());

    let pairs = parse_generated_content(&raw);
    if pairs.is_empty() && !raw.trim().is_empty() {
        warn!("Generated text did not parse into any sentence pairs");
    }
    Ok(pairs)
}

/// Passage generation service backed by the Gemini provider.
#[derive(Debug)]
pub struct GenerationService {
    /// Provider client
    provider: Gemini,
    /// Generation settings
    config: GenerationConfig,
    /// Prompt template
    prompt: PassagePrompt,
}

impl GenerationService {
    /// Create a service from generation settings
    pub fn new(config: GenerationConfig) -> Self {
        let provider = Gemini::with_timeout(
            config.resolved_api_key(),
            config.endpoint.clone(),
            std::time::Duration::from_secs(config.timeout_secs),
        );
        Self {
            provider,
            config,
            prompt: PassagePrompt::default(),
        }
    }

    /// True when the underlying provider has credentials
    pub fn is_configured(&self) -> bool {
        self.provider.has_api_key()
    }

    /// Build the request for a genre and topic
    pub fn build_request(&self, genre: Genre, topic: &str) -> GeminiRequest {
        GeminiRequest::new(self.config.model.clone())
            .add_prompt(self.prompt.render(genre, topic))
            .temperature(self.config.temperature)
            .max_output_tokens(self.config.max_output_tokens)
    }

    /// Generate a shadowing passage and parse it into sentence pairs.
    pub async fn generate(
        &self,
        genre: Genre,
        topic: &str,
    ) -> Result<Vec<SentencePair>, ProviderError> {
        let request = self.build_request(genre, topic);
        generate_with(&self.provider, request).await
    }
}
