//! Model registry: builds the ordered roster of target configurations for a
//! benchmark mode.
//!
//! Rosters are static, hand-maintained tables of provider/model/endpoint
//! combinations. Provider families that serve many models through one
//! OpenAI-compatible endpoint are represented by the [`Provider`] enum and a
//! table-driven factory rather than one type per provider. Credentials are
//! resolved once at startup into a [`Credentials`] snapshot so roster
//! construction never touches the process environment.

use std::collections::HashMap;

use crate::cli::Mode;

/// Provider families with a fixed serving endpoint and credential source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Anyscale,
    Fireworks,
    Groq,
    OctoAi,
    Perplexity,
    Together,
}

impl Provider {
    fn base_url(self) -> &'static str {
        match self {
            Provider::Anyscale => "https://api.endpoints.anyscale.com/v1",
            Provider::Fireworks => "https://api.fireworks.ai/inference/v1",
            Provider::Groq => "https://api.groq.com/openai/v1",
            Provider::OctoAi => "https://text.octoai.run/v1",
            Provider::Perplexity => "https://api.perplexity.ai",
            Provider::Together => "https://api.together.xyz/v1",
        }
    }

    fn key_var(self) -> &'static str {
        match self {
            Provider::Anyscale => "ANYSCALE_API_KEY",
            Provider::Fireworks => "FIREWORKS_API_KEY",
            Provider::Groq => "GROQ_API_KEY",
            Provider::OctoAi => "OCTOML_API_KEY",
            Provider::Perplexity => "PERPLEXITY_API_KEY",
            Provider::Together => "TOGETHER_API_KEY",
        }
    }
}

/// Environment variables consulted when snapshotting credentials.
const KEY_VARS: &[&str] = &[
    "ANYSCALE_API_KEY",
    "FIREWORKS_API_KEY",
    "GROQ_API_KEY",
    "OCTOML_API_KEY",
    "PERPLEXITY_API_KEY",
    "TOGETHER_API_KEY",
    "AZURE_EASTUS2_OPENAI_API_KEY",
    "AZURE_SCENTRALUS_OPENAI_API_KEY",
    "AZURE_FRCENTRAL_OPENAI_API_KEY",
    "AZURE_SECENTRAL_OPENAI_API_KEY",
    "AZURE_UKSOUTH_OPENAI_API_KEY",
    "AZURE_EASTUS2_MISTRAL_API_KEY",
    "AZURE_WESTUS3_LLAMA2_API_KEY",
    "AZURE_EASTUS2_LLAMA2_API_KEY",
];

/// Snapshot of per-provider credentials, captured once at run start.
///
/// Keeps the core testable without process environment dependencies: tests
/// construct one with [`Credentials::with`] instead of setting env vars.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    vars: HashMap<String, String>,
}

impl Credentials {
    /// An empty snapshot; targets resolve with no credential attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures every known credential variable from the process environment.
    pub fn from_env() -> Self {
        let mut vars = HashMap::new();
        for var in KEY_VARS {
            if let Ok(value) = std::env::var(var) {
                vars.insert((*var).to_string(), value);
            }
        }
        Self { vars }
    }

    /// Adds or replaces one credential; used by tests and embedders.
    pub fn with(mut self, var: &str, secret: &str) -> Self {
        self.vars.insert(var.to_string(), secret.to_string());
        self
    }

    fn get(&self, var: &str) -> Option<String> {
        self.vars.get(var).cloned()
    }
}

/// One entry in the roster: a model, where to reach it, and how to
/// authenticate.
///
/// `model` may be empty when the model identity is carried entirely by the
/// endpoint (Azure serverless deployments). The same model may appear more
/// than once with different endpoints; `model` + `base_url` together identify
/// an entry. Entries are immutable after roster construction; the
/// configuration builder produces a new resolved argument set per run rather
/// than mutating them.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// Ordered provider-specific overrides. Every entry carries
    /// `("format", "none")`, the sentinel telling the runner to suppress its
    /// own per-run formatting.
    pub extra: Vec<(String, String)>,
}

impl TargetConfig {
    /// A model served through the runner's default routing.
    fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            api_key: None,
            base_url: None,
            extra: vec![("format".to_string(), "none".to_string())],
        }
    }

    /// A model pinned to a specific endpoint, optionally with its own key.
    fn at(model: &str, key_var: &str, base_url: &str, creds: &Credentials) -> Self {
        Self {
            api_key: creds.get(key_var),
            base_url: Some(base_url.to_string()),
            ..Self::new(model)
        }
    }

    /// An endpoint-only entry where the key comes from the default provider.
    fn endpoint(model: &str, base_url: &str) -> Self {
        Self {
            base_url: Some(base_url.to_string()),
            ..Self::new(model)
        }
    }

    /// A model served by one of the fixed provider families.
    fn via(provider: Provider, model: &str, creds: &Credentials) -> Self {
        Self::at(model, provider.key_var(), provider.base_url(), creds)
    }
}

/// Builds the ordered roster for `mode`, optionally narrowed by `filter`.
///
/// `filter` is a case-sensitive substring test against the model identifier;
/// it preserves relative order and may legitimately produce an empty roster.
/// Mode validation happens on the string-parsing seam ([`Mode`] is already a
/// closed enum here), so this function cannot fail.
pub fn build_roster(mode: Mode, filter: Option<&str>, creds: &Credentials) -> Vec<TargetConfig> {
    let roster = match mode {
        Mode::Text => text_roster(creds),
        Mode::Image => image_roster(creds),
        Mode::Audio | Mode::Video => av_roster(),
    };
    match filter {
        Some(f) if !f.is_empty() => roster.into_iter().filter(|t| t.model.contains(f)).collect(),
        _ => roster,
    }
}

fn text_roster(creds: &Credentials) -> Vec<TargetConfig> {
    vec![
        // GPT-4
        TargetConfig::new("gpt-4-turbo"),
        TargetConfig::new("gpt-4-0125-preview"),
        TargetConfig::at(
            "gpt-4-0125-preview",
            "AZURE_SCENTRALUS_OPENAI_API_KEY",
            "https://fixie-scentralus.openai.azure.com",
            creds,
        ),
        TargetConfig::new("gpt-4-1106-preview"),
        TargetConfig::endpoint("gpt-4-1106-preview", "https://fixie-westus.openai.azure.com"),
        TargetConfig::at(
            "gpt-4-1106-preview",
            "AZURE_EASTUS2_OPENAI_API_KEY",
            "https://fixie-openai-sub-with-gpt4.openai.azure.com",
            creds,
        ),
        TargetConfig::at(
            "gpt-4-1106-preview",
            "AZURE_FRCENTRAL_OPENAI_API_KEY",
            "https://fixie-frcentral.openai.azure.com",
            creds,
        ),
        TargetConfig::at(
            "gpt-4-1106-preview",
            "AZURE_SECENTRAL_OPENAI_API_KEY",
            "https://fixie-secentral.openai.azure.com",
            creds,
        ),
        TargetConfig::at(
            "gpt-4-1106-preview",
            "AZURE_UKSOUTH_OPENAI_API_KEY",
            "https://fixie-uksouth.openai.azure.com",
            creds,
        ),
        // GPT-3.5
        TargetConfig::new("gpt-3.5-turbo-0125"),
        TargetConfig::new("gpt-3.5-turbo-1106"),
        TargetConfig::endpoint("gpt-3.5-turbo-1106", "https://fixie-westus.openai.azure.com"),
        TargetConfig::at(
            "gpt-3.5-turbo",
            "AZURE_EASTUS2_OPENAI_API_KEY",
            "https://fixie-openai-sub-with-gpt4.openai.azure.com",
            creds,
        ),
        // Claude
        TargetConfig::new("claude-3-opus-20240229"),
        TargetConfig::new("claude-3-sonnet-20240229"),
        TargetConfig::new("claude-3-haiku-20240307"),
        TargetConfig::new("claude-2.1"),
        TargetConfig::new("claude-instant-1.2"),
        // Cohere
        TargetConfig::new("command-r-plus"),
        TargetConfig::new("command-r"),
        TargetConfig::new("command-light"),
        // Gemini
        TargetConfig::new("gemini-pro"),
        TargetConfig::new("gemini-1.5-pro-preview-0409"),
        // Mistral
        TargetConfig::at(
            "",
            "AZURE_EASTUS2_MISTRAL_API_KEY",
            "https://fixie-mistral-serverless.eastus2.inference.ai.azure.com/v1",
            creds,
        ),
        TargetConfig::via(Provider::Anyscale, "mistralai/Mixtral-8x7B-Instruct-v0.1", creds),
        TargetConfig::via(
            Provider::Fireworks,
            "accounts/fireworks/models/mixtral-8x7b-instruct",
            creds,
        ),
        TargetConfig::via(Provider::Groq, "mixtral-8x7b-32768", creds),
        TargetConfig::via(Provider::OctoAi, "mixtral-8x7b-instruct", creds),
        TargetConfig::via(Provider::Perplexity, "mixtral-8x7b-instruct", creds),
        TargetConfig::via(Provider::Perplexity, "sonar-medium-chat", creds),
        // Llama 3 70b
        TargetConfig::via(Provider::Anyscale, "meta-llama/Llama-3-70b-chat-hf", creds),
        TargetConfig::via(
            Provider::Fireworks,
            "accounts/fireworks/models/llama-v3-70b-instruct",
            creds,
        ),
        TargetConfig::via(Provider::Groq, "llama3-70b-8192", creds),
        TargetConfig::via(Provider::Perplexity, "llama-3-70b-instruct", creds),
        TargetConfig::via(Provider::Together, "meta-llama/Llama-3-70b-chat-hf", creds),
        // Llama 2 70b
        TargetConfig::at(
            "",
            "AZURE_WESTUS3_LLAMA2_API_KEY",
            "https://fixie-llama-2-70b-serverless.westus3.inference.ai.azure.com/v1",
            creds,
        ),
        TargetConfig::at(
            "",
            "AZURE_EASTUS2_LLAMA2_API_KEY",
            "https://fixie-llama-2-70b-serverless.eastus2.inference.ai.azure.com/v1",
            creds,
        ),
        TargetConfig::via(Provider::Anyscale, "meta-llama/Llama-2-70b-chat-hf", creds),
        TargetConfig::via(
            Provider::Fireworks,
            "accounts/fireworks/models/llama-v2-70b-chat",
            creds,
        ),
        TargetConfig::via(Provider::Groq, "llama2-70b-4096", creds),
        TargetConfig::via(Provider::OctoAi, "llama-2-70b-chat-fp16", creds),
        TargetConfig::via(Provider::Together, "togethercomputer/llama-2-70b-chat", creds),
        TargetConfig::via(
            Provider::Fireworks,
            "accounts/fireworks/models/llama-v2-13b-chat",
            creds,
        ),
        // Llama 2 13b
        TargetConfig::via(Provider::Anyscale, "meta-llama/Llama-2-13b-chat-hf", creds),
        TargetConfig::via(Provider::Together, "togethercomputer/llama-2-13b-chat", creds),
        TargetConfig::via(Provider::OctoAi, "llama-2-13b-chat-fp16", creds),
        // Llama 3 8b
        TargetConfig::via(Provider::Anyscale, "meta-llama/Llama-3-8b-chat-hf", creds),
        TargetConfig::via(
            Provider::Fireworks,
            "accounts/fireworks/models/llama-v3-8b-instruct",
            creds,
        ),
        TargetConfig::via(Provider::Groq, "llama3-8b-8192", creds),
        TargetConfig::via(Provider::Perplexity, "llama-3-8b-instruct", creds),
        TargetConfig::via(Provider::Together, "meta-llama/Llama-3-8b-chat-hf", creds),
        // Llama 2 7b
        TargetConfig::via(Provider::Anyscale, "meta-llama/Llama-2-7b-chat-hf", creds),
        TargetConfig::via(
            Provider::Fireworks,
            "accounts/fireworks/models/llama-v2-7b-chat",
            creds,
        ),
        TargetConfig::via(Provider::Together, "togethercomputer/llama-2-7b-chat", creds),
        TargetConfig::new("@cf/meta/llama-2-7b-chat-fp16"),
        TargetConfig::new("@cf/meta/llama-2-7b-chat-int8"),
    ]
}

fn image_roster(creds: &Credentials) -> Vec<TargetConfig> {
    vec![
        TargetConfig::new("gpt-4-turbo"),
        TargetConfig::endpoint("gpt-4-vision-preview", "https://fixie-westus.openai.azure.com"),
        TargetConfig::new("claude-3-opus-20240229"),
        TargetConfig::new("claude-3-sonnet-20240229"),
        TargetConfig::new("gemini-pro-vision"),
        TargetConfig::new("gemini-1.5-pro-preview-0409"),
    ]
}

// Audio and video currently share a single roster.
fn av_roster() -> Vec<TargetConfig> {
    vec![TargetConfig::new("gemini-1.5-pro-preview-0409")]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_is_deterministic() {
        let creds = Credentials::new();
        let a = build_roster(Mode::Text, None, &creds);
        let b = build_roster(Mode::Text, None, &creds);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_every_mode_has_a_roster() {
        let creds = Credentials::new();
        for mode in [Mode::Text, Mode::Image, Mode::Audio, Mode::Video] {
            assert!(!build_roster(mode, None, &creds).is_empty());
        }
    }

    #[test]
    fn test_filter_is_substring_and_order_preserving() {
        let creds = Credentials::new();
        let full = build_roster(Mode::Text, None, &creds);
        let filtered = build_roster(Mode::Text, Some("claude-3"), &creds);

        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|t| t.model.contains("claude-3")));

        // Relative order matches the unfiltered roster.
        let expected: Vec<_> = full
            .iter()
            .filter(|t| t.model.contains("claude-3"))
            .cloned()
            .collect();
        assert_eq!(filtered, expected);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let creds = Credentials::new();
        assert!(build_roster(Mode::Text, Some("CLAUDE"), &creds).is_empty());
    }

    #[test]
    fn test_empty_filter_means_no_filtering() {
        let creds = Credentials::new();
        let full = build_roster(Mode::Image, None, &creds);
        assert_eq!(build_roster(Mode::Image, Some(""), &creds), full);
    }

    #[test]
    fn test_filter_may_empty_the_roster() {
        let creds = Credentials::new();
        assert!(build_roster(Mode::Image, Some("no-such-model"), &creds).is_empty());
    }

    #[test]
    fn test_provider_entries_carry_endpoint_and_credential() {
        let creds = Credentials::new().with("GROQ_API_KEY", "gsk-test");
        let roster = build_roster(Mode::Text, Some("llama3-70b"), &creds);

        assert_eq!(roster.len(), 1);
        let target = &roster[0];
        assert_eq!(target.base_url.as_deref(), Some("https://api.groq.com/openai/v1"));
        assert_eq!(target.api_key.as_deref(), Some("gsk-test"));
    }

    #[test]
    fn test_missing_credential_resolves_to_none() {
        let creds = Credentials::new();
        let roster = build_roster(Mode::Text, Some("llama3-70b"), &creds);
        assert_eq!(roster[0].api_key, None);
    }

    #[test]
    fn test_duplicate_models_differ_by_endpoint() {
        let creds = Credentials::new();
        let roster = build_roster(Mode::Text, Some("gpt-4-1106-preview"), &creds);

        assert!(roster.len() > 1);
        let endpoints: Vec<_> = roster.iter().map(|t| t.base_url.clone()).collect();
        let mut deduped = endpoints.clone();
        deduped.dedup();
        assert_eq!(endpoints, deduped, "consecutive duplicates share an endpoint");
    }

    #[test]
    fn test_every_entry_suppresses_runner_formatting() {
        let creds = Credentials::new();
        for target in build_roster(Mode::Text, None, &creds) {
            assert!(target
                .extra
                .iter()
                .any(|(k, v)| k == "format" && v == "none"));
        }
    }
}
