//! Best-effort loading of the optional icon-font stylesheet and utility-CSS
//! script.
//!
//! Toasts render without either asset, only unstyled. [`ensure_assets`]
//! injects whatever is missing, then polls a bounded number of times and
//! always resolves.

use std::fmt::{self, Display};
use std::time::Duration;

use backoff::backoff::{Backoff, Constant};
use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_POLL_ATTEMPTS: u32 = 50;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_ICON_FONT_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css";
pub const DEFAULT_UTILITY_CSS_URL: &str = "https://cdn.tailwindcss.com";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    IconFont,
    UtilityCss,
}

impl AssetKind {
    pub const ALL: [Self; 2] = [Self::IconFont, Self::UtilityCss];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IconFont => "icon-font",
            Self::UtilityCss => "utility-css",
        }
    }
}

impl Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-side view of the optional assets.
pub trait AssetProbe: Send + Sync {
    fn is_present(&self, kind: AssetKind) -> bool;

    /// Start loading `kind` from `url`. Presence may lag behind.
    fn inject(&self, kind: AssetKind, url: &Url);
}

#[derive(Clone, Debug)]
pub struct AssetSettings {
    pub enabled: bool,
    pub icon_font_url: Url,
    pub utility_css_url: Url,
    pub poll_attempts: u32,
    pub poll_interval: Duration,
}

impl AssetSettings {
    #[must_use]
    pub const fn url_for(&self, kind: AssetKind) -> &Url {
        match kind {
            AssetKind::IconFont => &self.icon_font_url,
            AssetKind::UtilityCss => &self.utility_css_url,
        }
    }
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            icon_font_url: Url::parse(DEFAULT_ICON_FONT_URL).unwrap_or_else(|_| unreachable!()),
            utility_css_url: Url::parse(DEFAULT_UTILITY_CSS_URL)
                .unwrap_or_else(|_| unreachable!()),
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssetReadiness {
    /// Every asset reported present after `attempts` polls.
    Ready { attempts: u32 },
    /// The attempt budget ran out with these assets still missing.
    TimedOut { missing: Vec<AssetKind> },
    Skipped,
}

impl AssetReadiness {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Inject missing assets and wait for them, bounded by the poll budget.
pub async fn ensure_assets<P>(probe: &P, settings: &AssetSettings) -> AssetReadiness
where
    P: AssetProbe + ?Sized,
{
    if !settings.enabled {
        debug!("asset probe disabled");
        return AssetReadiness::Skipped;
    }

    for kind in AssetKind::ALL {
        if !probe.is_present(kind) {
            let url = settings.url_for(kind);
            info!(asset = %kind, %url, "injecting missing asset");
            probe.inject(kind, url);
        }
    }

    let mut interval = Constant::new(settings.poll_interval);
    let budget = settings.poll_attempts.max(1);
    let mut missing = Vec::new();

    for attempt in 1..=budget {
        missing = missing_assets(probe);
        if missing.is_empty() {
            debug!(attempt, "assets ready");
            return AssetReadiness::Ready { attempts: attempt };
        }
        if attempt == budget {
            break;
        }
        if let Some(delay) = interval.next_backoff() {
            sleep(delay).await;
        }
    }

    warn!(
        attempts = budget,
        missing = ?missing,
        "assets did not load in time; continuing without them"
    );
    AssetReadiness::TimedOut { missing }
}

fn missing_assets<P>(probe: &P) -> Vec<AssetKind>
where
    P: AssetProbe + ?Sized,
{
    AssetKind::ALL
        .into_iter()
        .filter(|kind| !probe.is_present(*kind))
        .collect()
}
