use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{bail, Context};
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "meublehub.toml";

/// Which identity the objects page compares against `reservedBy` before
/// offering "Cancel Reservation".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationOwnership {
    /// `reservedBy` holds the reserving user's id; compare it to the session id.
    #[default]
    UserId,
    /// Resolve `reservedBy` to a username and compare usernames.
    Username,
}

impl FromStr for ReservationOwnership {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user_id" | "userid" | "id" => Ok(Self::UserId),
            "username" | "name" => Ok(Self::Username),
            other => bail!("unknown reservation ownership policy '{other}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub users_url: String,
    pub homes_url: String,
    pub rooms_url: String,
    pub objects_url: String,
    pub session_path: Option<PathBuf>,
    pub reservation_ownership: ReservationOwnership,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            users_url: "http://localhost:8083".into(),
            homes_url: "http://localhost:8081".into(),
            rooms_url: "http://localhost:8082".into(),
            objects_url: "http://localhost:8080".into(),
            session_path: default_session_path(),
            reservation_ownership: ReservationOwnership::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults, then `meublehub.toml` in the working directory, then env.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// A missing file is skipped; any other read failure is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let mut config = Self::default();

        let raw = match fs::read_to_string(path) {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read config file '{}'", path.display()))
            }
        };
        if let Some(raw) = raw {
            let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            config.apply_pairs(file_cfg.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn apply_pairs<'a>(
        &mut self,
        pairs: impl Iterator<Item = (&'a str, &'a str)>,
    ) -> anyhow::Result<()> {
        for (key, value) in pairs {
            match key {
                "user_service_url" | "users_url" => self.users_url = value.to_string(),
                "home_service_url" | "homes_url" => self.homes_url = value.to_string(),
                "room_service_url" | "rooms_url" => self.rooms_url = value.to_string(),
                "object_service_url" | "objects_url" => self.objects_url = value.to_string(),
                "session_path" => self.session_path = Some(PathBuf::from(value)),
                "reservation_ownership" => self.reservation_ownership = value.parse()?,
                other => tracing::warn!(key = other, "ignoring unknown config key"),
            }
        }
        Ok(())
    }

    /// Plain names first, `APP__`-prefixed names win when both are set.
    pub(crate) fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        let pick = |name: &str| lookup(&format!("APP__{name}")).or_else(|| lookup(name));

        if let Some(v) = pick("USER_SERVICE_URL") {
            self.users_url = v;
        }
        if let Some(v) = pick("HOME_SERVICE_URL") {
            self.homes_url = v;
        }
        if let Some(v) = pick("ROOM_SERVICE_URL") {
            self.rooms_url = v;
        }
        if let Some(v) = pick("OBJECT_SERVICE_URL") {
            self.objects_url = v;
        }
        if let Some(v) = lookup("MEUBLEHUB_SESSION_PATH") {
            self.session_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("MEUBLEHUB_RESERVATION_OWNERSHIP") {
            self.reservation_ownership = v.parse()?;
        }
        Ok(())
    }

    /// Rejects unparseable base URLs and strips trailing slashes.
    pub fn validate(&mut self) -> anyhow::Result<()> {
        for (name, url) in [
            ("user service", &mut self.users_url),
            ("home service", &mut self.homes_url),
            ("room service", &mut self.rooms_url),
            ("object service", &mut self.objects_url),
        ] {
            let normalized = normalize_base_url(url)
                .with_context(|| format!("invalid {name} url '{url}'"))?;
            *url = normalized;
        }
        Ok(())
    }
}

fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("unsupported scheme '{}'", parsed.scheme());
    }
    Ok(trimmed.to_string())
}

fn default_session_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("meublehub").join("session.json"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
