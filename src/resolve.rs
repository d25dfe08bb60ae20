//! Configuration builder: merges a roster entry with run-wide options and
//! caller pass-through tokens into the final argument set for one invocation.
//!
//! Precedence, lowest to highest: shared options, then the target's own
//! fields (its endpoint and credential are part of its identity), then
//! pass-through tokens appended verbatim at the end. The merge produces a new
//! [`ResolvedInvocation`]; roster entries are never mutated and are reused
//! across repeated runs.

use crate::registry::TargetConfig;

/// Run-wide options applied uniformly to every target, lowest precedence in
/// the merge (e.g. a prompt override, global output suppression).
#[derive(Clone, Debug, Default)]
pub struct SharedOptions(Vec<(String, String)>);

impl SharedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one option, replacing any earlier value for the same key.
    pub fn set(mut self, key: &str, value: &str) -> Self {
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value.to_string();
        } else {
            self.0.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The final, ready-to-run argument set for one roster entry.
///
/// Owned by the dispatcher for the duration of one invocation and dropped
/// when it settles.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedInvocation {
    /// Display identifier: the model name, or the endpoint when the model
    /// string is empty (Azure serverless entries).
    pub model: String,
    pub argv: Vec<String>,
}

/// Ordered insert-or-replace map; replacement keeps the original position so
/// the rendered flag order is stable.
#[derive(Default)]
struct ArgMap(Vec<(String, String)>);

impl ArgMap {
    fn set(&mut self, key: &str, value: &str) {
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value.to_string();
        } else {
            self.0.push((key.to_string(), value.to_string()));
        }
    }

    fn into_argv(self) -> Vec<String> {
        self.0.into_iter().map(|(k, v)| render_flag(&k, &v)).collect()
    }
}

/// Renders one `--key=value` token, mapping `_` to `-` in the key.
fn render_flag(key: &str, value: &str) -> String {
    format!("--{}={}", key.replace('_', "-"), value)
}

/// Merges `target` with `shared` options and `pass_args` into the final
/// argument set. Same-named shared options lose to the target's own fields;
/// pass-through tokens are opaque and appended last.
pub fn resolve(
    target: &TargetConfig,
    shared: &SharedOptions,
    pass_args: &[String],
) -> ResolvedInvocation {
    let mut args = ArgMap::default();
    for (k, v) in shared.pairs() {
        args.set(k, v);
    }
    args.set("model", &target.model);
    if let Some(key) = &target.api_key {
        args.set("api_key", key);
    }
    if let Some(url) = &target.base_url {
        args.set("base_url", url);
    }
    for (k, v) in &target.extra {
        args.set(k, v);
    }

    let mut argv = args.into_argv();
    argv.extend(pass_args.iter().cloned());

    let model = if target.model.is_empty() {
        target.base_url.clone().unwrap_or_default()
    } else {
        target.model.clone()
    };
    ResolvedInvocation { model, argv }
}

/// Reconstructs the human-auditable command line recorded in the report: the
/// rendered shared options followed by the pass-through tokens, verbatim.
pub fn command_line(shared: &SharedOptions, pass_args: &[String]) -> String {
    let mut tokens: Vec<String> = shared
        .pairs()
        .iter()
        .map(|(k, v)| render_flag(k, v))
        .collect();
    tokens.extend(pass_args.iter().cloned());
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{build_roster, Credentials};
    use crate::cli::Mode;

    fn target(model: &str, api_key: Option<&str>, base_url: Option<&str>) -> TargetConfig {
        TargetConfig {
            model: model.to_string(),
            api_key: api_key.map(str::to_string),
            base_url: base_url.map(str::to_string),
            extra: vec![("format".to_string(), "none".to_string())],
        }
    }

    #[test]
    fn test_basic_argv_rendering() {
        let inv = resolve(&target("gpt-4-turbo", None, None), &SharedOptions::new(), &[]);
        assert_eq!(inv.model, "gpt-4-turbo");
        assert_eq!(inv.argv, vec!["--model=gpt-4-turbo", "--format=none"]);
    }

    #[test]
    fn test_underscores_become_dashes() {
        let shared = SharedOptions::new().set("max_tokens", "100");
        let inv = resolve(&target("m", None, None), &shared, &[]);
        assert!(inv.argv.contains(&"--max-tokens=100".to_string()));
    }

    #[test]
    fn test_target_credential_beats_shared_option() {
        let shared = SharedOptions::new()
            .set("api_key", "shared-key")
            .set("base_url", "https://shared.example.com");
        let inv = resolve(
            &target("m", Some("target-key"), Some("https://target.example.com")),
            &shared,
            &[],
        );

        assert!(inv.argv.contains(&"--api-key=target-key".to_string()));
        assert!(inv.argv.contains(&"--base-url=https://target.example.com".to_string()));
        assert!(!inv.argv.iter().any(|a| a.contains("shared-key")));
        assert!(!inv.argv.iter().any(|a| a.contains("shared.example.com")));
    }

    #[test]
    fn test_shared_option_survives_when_target_has_no_override() {
        let shared = SharedOptions::new().set("api_key", "shared-key");
        let inv = resolve(&target("m", None, None), &shared, &[]);
        assert!(inv.argv.contains(&"--api-key=shared-key".to_string()));
    }

    #[test]
    fn test_pass_args_appended_last_and_verbatim() {
        let shared = SharedOptions::new().set("prompt", "hello");
        let pass = vec!["--model=override".to_string(), "-x".to_string()];
        let inv = resolve(&target("m", None, None), &shared, &pass);

        let n = inv.argv.len();
        assert_eq!(&inv.argv[n - 2..], &pass[..]);
        // The merge does not interpret pass-through tokens; the earlier
        // --model flag is still present, the override merely comes later.
        assert!(inv.argv.contains(&"--model=m".to_string()));
    }

    #[test]
    fn test_override_replacement_keeps_position() {
        let shared = SharedOptions::new().set("api_key", "shared").set("prompt", "hi");
        let inv = resolve(&target("m", Some("real"), None), &shared, &[]);
        assert_eq!(
            inv.argv,
            vec!["--api-key=real", "--prompt=hi", "--model=m", "--format=none"]
        );
    }

    #[test]
    fn test_endpoint_only_target_displays_endpoint() {
        let inv = resolve(
            &target("", Some("k"), Some("https://serverless.example.com/v1")),
            &SharedOptions::new(),
            &[],
        );
        assert_eq!(inv.model, "https://serverless.example.com/v1");
        assert!(inv.argv.contains(&"--model=".to_string()));
    }

    #[test]
    fn test_resolving_does_not_mutate_roster_entries() {
        let creds = Credentials::new();
        let roster = build_roster(Mode::Image, None, &creds);
        let before = roster.clone();
        let shared = SharedOptions::new().set("prompt", "describe");
        for t in &roster {
            let _ = resolve(t, &shared, &["--extra".to_string()]);
        }
        assert_eq!(roster, before);
    }

    #[test]
    fn test_command_line_reconstruction() {
        let shared = SharedOptions::new().set("display_length", "32");
        let pass = vec!["--num-requests=5".to_string()];
        assert_eq!(
            command_line(&shared, &pass),
            "--display-length=32 --num-requests=5"
        );
        assert_eq!(command_line(&SharedOptions::new(), &[]), "");
    }
}
