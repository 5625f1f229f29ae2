//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod children;
pub(crate) mod links;
pub(crate) mod show;
pub(crate) mod tag;

pub(crate) use check::CheckArgs;
pub(crate) use children::ChildrenArgs;
pub(crate) use links::LinksArgs;
pub(crate) use show::ShowArgs;
pub(crate) use tag::TagArgs;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use wikisnap_config::{CliSettings, Config, OverrideRuleConfig};
use wikisnap_model::{
    ChildrenStrategy, OverrideKind, OverrideRegistry, OverrideRule, Session, SessionConfig,
    join_url,
};
use wikisnap_store::MemoryStore;

use crate::error::CliError;

/// Snapshot selection shared by every command.
#[derive(Args)]
pub(crate) struct SnapshotArgs {
    /// Path to configuration file (default: auto-discover wikisnap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snapshot dump to read (overrides config).
    #[arg(short, long, env = "WIKISNAP_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Base url of the captured wiki (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SnapshotArgs {
    /// Load configuration and open a session over the snapshot.
    pub(crate) fn open(&self) -> Result<Session, CliError> {
        let cli_settings = CliSettings {
            snapshot: self.snapshot.clone(),
            base_url: self.base_url.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        tracing::info!(
            path = %config.snapshot_resolved.path.display(),
            base_url = %config.snapshot_resolved.base_url,
            "Opening snapshot"
        );
        let store = MemoryStore::load(&config.snapshot_resolved.path)?;
        let session_config = SessionConfig {
            base_url: config.snapshot_resolved.base_url.clone(),
            overrides: registry_from_config(&config),
        };
        Ok(Session::new(Arc::new(store), session_config)?)
    }
}

/// Build the override table: the curated rules if enabled, then configured rules.
pub(crate) fn registry_from_config(config: &Config) -> OverrideRegistry {
    let base_url = &config.snapshot_resolved.base_url;
    let mut registry = if config.overrides.builtin {
        OverrideRegistry::builtin(base_url)
    } else {
        OverrideRegistry::new()
    };
    for rule in &config.overrides.rules {
        registry.insert(override_rule(rule, base_url));
    }
    registry
}

fn override_rule(rule: &OverrideRuleConfig, base_url: &str) -> OverrideRule {
    let kind = match rule {
        OverrideRuleConfig::Content { value, .. } => OverrideKind::Content(value.clone()),
        OverrideRuleConfig::ChildrenRange { start, end, .. } => {
            OverrideKind::Children(ChildrenStrategy::Range {
                start: *start,
                end: *end,
            })
        }
        OverrideRuleConfig::ChildrenExclude { exclude, .. } => {
            OverrideKind::Children(ChildrenStrategy::Exclude(join_url(base_url, exclude)))
        }
        OverrideRuleConfig::ChildrenEmpty { .. } => OverrideKind::Children(ChildrenStrategy::Empty),
    };
    OverrideRule::new(join_url(base_url, rule.url()), kind)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wikisnap_config::CONFIG_FILENAME;

    use super::*;

    fn config(toml: &str) -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, toml).unwrap();
        Config::load(Some(&path), None).unwrap()
    }

    #[test]
    fn test_builtin_rules_included_by_default() {
        let registry = registry_from_config(&config(""));

        assert_eq!(
            registry.children("http://www.scp-wiki.net/chicago-spirit-hub"),
            ChildrenStrategy::Empty
        );
    }

    #[test]
    fn test_configured_rules_join_base_url() {
        let registry = registry_from_config(&config(
            r#"
[overrides]
builtin = false

[[overrides.rules]]
kind = "children-exclude"
url = "some-hub"
exclude = "/other-hub"
"#,
        ));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.children("http://www.scp-wiki.net/some-hub"),
            ChildrenStrategy::Exclude("http://www.scp-wiki.net/other-hub".to_owned())
        );
    }

    #[test]
    fn test_configured_rule_replaces_builtin() {
        let registry = registry_from_config(&config(
            r#"
[[overrides.rules]]
kind = "children-range"
url = "http://www.scp-wiki.net/scp-2998"
start = 3
end = 5
"#,
        ));

        assert_eq!(
            registry.children("http://www.scp-wiki.net/scp-2998"),
            ChildrenStrategy::Range { start: 3, end: 5 }
        );
        assert_eq!(registry.len(), 5);
    }
}
