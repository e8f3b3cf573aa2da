use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

use super::loader::{LoadedConfig, ProfileConfig, RenteaseConfig};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PASSWORD: &str = "TestPass123!";

/// Values supplied on the command line (or via clap's env fallback).
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HarnessSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub password: String,
    pub default_headers: Vec<(String, String)>,
    pub profile_name: Option<String>,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            password: DEFAULT_PASSWORD.to_string(),
            default_headers: Vec::new(),
            profile_name: None,
        }
    }
}

impl HarnessSettings {
    /// Layers command-line overrides over the selected profile over built-in defaults.
    pub fn resolve(
        config: Option<&LoadedConfig>,
        requested_profile: Option<&str>,
        overrides: SettingsOverrides,
    ) -> Result<Self> {
        let profile = match config {
            Some(loaded) => resolve_profile(&loaded.config, requested_profile)
                .with_context(|| format!("selecting profile from {}", loaded.path.display()))?,
            None => {
                if let Some(name) = requested_profile {
                    bail!("Unknown profile: {name} (no configuration file found)");
                }
                None
            }
        };

        let mut settings = HarnessSettings::default();

        if let Some(resolved) = &profile {
            settings.profile_name = Some(resolved.name.clone());
            if let Some(base_url) = &resolved.config.base_url {
                settings.base_url = base_url.clone();
            }
            if let Some(secs) = resolved.config.timeout_secs {
                settings.timeout = Duration::from_secs(secs);
            }
            if let Some(password) = &resolved.config.password {
                settings.password = password.clone();
            }
            let mut headers: Vec<(String, String)> = resolved
                .config
                .default_headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect();
            headers.sort();
            settings.default_headers = headers;
        }

        if let Some(base_url) = overrides.base_url {
            settings.base_url = base_url;
        }
        if let Some(secs) = overrides.timeout_secs {
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(password) = overrides.password {
            settings.password = password;
        }

        settings.base_url = normalize_base_url(&settings.base_url)?;
        if settings.timeout.is_zero() {
            bail!("Timeout must be at least one second");
        }

        Ok(settings)
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).with_context(|| format!("invalid base URL {trimmed}"))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => bail!("Unsupported base URL scheme {other}: {trimmed}"),
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

struct ResolvedProfile<'a> {
    name: String,
    config: &'a ProfileConfig,
}

fn resolve_profile<'a>(
    config: &'a RenteaseConfig,
    requested: Option<&str>,
) -> Result<Option<ResolvedProfile<'a>>> {
    if let Some(name) = requested {
        if let Some(profile) = config.profiles.get(name) {
            return Ok(Some(ResolvedProfile {
                name: name.to_string(),
                config: profile,
            }));
        }
        bail!("Unknown profile: {}", name);
    }

    if let Some(default) = &config.default_profile {
        if let Some(profile) = config.profiles.get(default) {
            return Ok(Some(ResolvedProfile {
                name: default.to_string(),
                config: profile,
            }));
        }
        bail!("Default profile {} is not defined", default);
    }

    // A lone profile is unambiguous; several without a default are not.
    if config.profiles.len() == 1 {
        if let Some((name, profile)) = config.profiles.iter().next() {
            return Ok(Some(ResolvedProfile {
                name: name.to_string(),
                config: profile,
            }));
        }
    }

    if config.profiles.len() > 1 {
        bail!("Several profiles defined but no defaultProfile; pass --profile");
    }

    Ok(None)
}
