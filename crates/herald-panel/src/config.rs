use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};

use crate::notifier::{DesktopNotifier, NativeNotifier, PolicyNotifier, SilentNotifier};

pub const DEFAULT_ICON: &str = "/icons/icon128.png";

/// How native notifications are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeMode {
    /// OS desktop notifications, permission always granted
    Desktop,
    /// Permission starts unset; the first request is granted
    Grant,
    /// Permission starts unset; the first request is declined
    Deny,
    /// No native notifications on this host
    Off,
}

impl FromStr for NativeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "desktop" => Ok(Self::Desktop),
            "grant" => Ok(Self::Grant),
            "deny" => Ok(Self::Deny),
            "off" => Ok(Self::Off),
            other => Err(anyhow!(
                "invalid native mode '{}' (expected desktop, grant, deny or off)",
                other
            )),
        }
    }
}

impl NativeMode {
    pub fn notifier(self) -> Arc<dyn NativeNotifier> {
        match self {
            Self::Desktop => Arc::new(DesktopNotifier),
            Self::Grant => Arc::new(PolicyNotifier::new(true, Arc::new(DesktopNotifier))),
            Self::Deny => Arc::new(PolicyNotifier::new(false, Arc::new(DesktopNotifier))),
            Self::Off => Arc::new(SilentNotifier),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub icon: String,
    pub native: NativeMode,
}

impl PanelConfig {
    /// Read `HERALD_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("HERALD_PORT", "3000");
        let native = var("HERALD_NATIVE", "desktop");

        Ok(Self {
            db_path: PathBuf::from(var("HERALD_DB_PATH", "herald.db")),
            host: var("HERALD_HOST", "0.0.0.0"),
            port: port
                .parse()
                .with_context(|| format!("HERALD_PORT '{}' is not a port number", port))?,
            icon: var("HERALD_ICON", DEFAULT_ICON),
            native: native.parse()?,
        })
    }
}
