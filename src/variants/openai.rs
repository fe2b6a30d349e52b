// OpenAI chat-completions variant generator.
//
// Works with any OpenAI-compatible endpoint; the base URL and model come
// from config.
//
// API docs: https://platform.openai.com/docs/api-reference/chat

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parse::parse_variants;
use super::traits::{GeneratedVariant, VariantGenerator};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

pub struct OpenAiVariantGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiVariantGenerator {
    pub fn new(api_key: String, base_url: &str, model: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("qamus/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

fn prompt(term: &str) -> String {
    format!(
        "Generate grammatical variants for the Hassaniya word \"{term}\".\n\
         \n\
         Provide the following forms where they apply:\n\
         1. Conjugations (for verbs)\n\
         2. Plural forms (for nouns)\n\
         3. Feminine/masculine forms\n\
         4. Diminutive forms\n\
         5. Related derived words\n\
         \n\
         Answer with a JSON array of objects, each with:\n\
         - \"variant\": the variant form of the word\n\
         - \"type\": one of \"conjugation\", \"plural\", \"feminine\", \"masculine\", \"diminutive\", \"derivative\"\n\
         \n\
         Example: [{{\"variant\": \"example1\", \"type\": \"plural\"}}]\n\
         \n\
         Only include variants that apply to this word. Reply with the JSON array only."
    )
}

#[async_trait]
impl VariantGenerator for OpenAiVariantGenerator {
    async fn generate(&self, term: &str) -> Result<Vec<GeneratedVariant>> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt(term),
            }],
            temperature: 0.3,
        };

        debug!(term, model = %self.model, "Requesting variants");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to call chat completions API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat completions API returned {}: {}", status, body);
        }

        let result: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat completions response")?;

        let content = result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .context("Chat completions response had no content")?;

        let variants = parse_variants(&content)?;
        debug!(term, count = variants.len(), "Parsed variants");
        Ok(variants)
    }
}

// --- Chat completions request/response types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
