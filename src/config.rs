//! Rc-file discovery for the CLI.
//!
//! The client library takes a fully resolved configuration; everything about
//! where those values come from lives here. Values are merged weakest first:
//! `~/.beaconrc`, then `./.beaconrc`, then an explicit `--config` path, then
//! command line flags.

use anyhow::{bail, Context, Result};
use beacon_client::ClientConfig;
use serde::Deserialize;

use std::fs;
use std::path::Path;

pub const RC_FILE: &str = ".beaconrc";

#[derive(Debug, Deserialize)]
struct RcFile {
    beacon: Option<RcSection>,
}

#[derive(Debug, Default, Deserialize)]
struct RcSection {
    token: Option<String>,
    base_url: Option<String>,
}

/// Resolve the client configuration from rc files and command line overrides.
pub fn resolve(
    token: Option<String>,
    host: Option<String>,
    config: Option<&Path>,
    debug: bool,
) -> Result<ClientConfig> {
    let mut resolved = RcSection::default();

    if let Some(home) = dirs::home_dir() {
        merge(&mut resolved, load(&home.join(RC_FILE), false)?);
    }
    merge(&mut resolved, load(Path::new(RC_FILE), false)?);
    if let Some(path) = config {
        merge(&mut resolved, load(path, true)?);
    }

    Ok(ClientConfig {
        token: token.or(resolved.token),
        base_url: host.or(resolved.base_url),
        debug,
    })
}

/// Load the `[beacon]` table from one rc file. Implicit locations are
/// skipped silently when absent; an explicitly named file must exist.
fn load(path: &Path, required: bool) -> Result<Option<RcSection>> {
    if !path.exists() {
        if required {
            bail!("config file {} not found", path.display());
        }
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rc: RcFile = toml::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(rc.beacon)
}

fn merge(into: &mut RcSection, from: Option<RcSection>) {
    if let Some(section) = from {
        if section.token.is_some() {
            into.token = section.token;
        }
        if section.base_url.is_some() {
            into.base_url = section.base_url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc_file_parses_token_and_base_url() {
        let rc: RcFile = toml::from_str(
            "[beacon]\ntoken = \"abc123\"\nbase_url = \"https://example.test/api/notify/\"\n",
        )
        .unwrap();

        let section = rc.beacon.unwrap();
        assert_eq!(section.token.as_deref(), Some("abc123"));
        assert_eq!(
            section.base_url.as_deref(),
            Some("https://example.test/api/notify/")
        );
    }

    #[test]
    fn later_sources_override_earlier_ones() {
        let mut resolved = RcSection {
            token: Some("home".into()),
            base_url: Some("https://home.test/".into()),
        };

        merge(
            &mut resolved,
            Some(RcSection {
                token: Some("cwd".into()),
                base_url: None,
            }),
        );

        assert_eq!(resolved.token.as_deref(), Some("cwd"));
        assert_eq!(resolved.base_url.as_deref(), Some("https://home.test/"));
    }

    #[test]
    fn missing_section_leaves_values_untouched() {
        let rc: RcFile = toml::from_str("").unwrap();
        assert!(rc.beacon.is_none());
    }
}
