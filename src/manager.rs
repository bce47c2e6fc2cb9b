//! Toast lifecycle and auto-dismiss sequencing.
//!
//! Every toast walks `created -> visible -> closing -> removed`, each step
//! exactly once. Each step after `created` is driven by one spawned timer
//! task. A timer that wakes up to find its toast in an unexpected state does
//! nothing, which is what makes [`ToastManager::close`] idempotent and safe
//! to race with auto-close.

use std::fmt::{self, Display};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::{Notify, broadcast};
use tokio::time::sleep;
use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::Result;
use crate::assets::{AssetProbe, AssetReadiness, AssetSettings, ensure_assets};
use crate::error::Error;
use crate::host::{ContainerSpec, PresentationHost, SHOW_CLASS};
use crate::toast::{STYLESHEET, ToastConfig, ToastOptions, ToastView};
use crate::types::Severity;

/// Delay between mounting a toast and making it visible, so the slide-in
/// transition has a starting frame.
pub const SHOW_DELAY: Duration = Duration::from_millis(10);
/// Delay between `closing` and `removed`; matches the slide-out transition.
pub const REMOVAL_DELAY: Duration = Duration::from_millis(1_000);

pub const DEFAULT_CONTAINER_ID: &str = "toster-container";
pub const DEFAULT_STYLE_ID: &str = "toster-styles";
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 80;

const EVENT_CAPACITY: usize = 256;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagerSettings {
    pub container_id: String,
    pub style_id: String,
    pub max_message_len: usize,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            style_id: DEFAULT_STYLE_ID.to_string(),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ToastId(Uuid);

impl ToastId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn element_id(self) -> String {
        format!("toster-toast-{}", self.0.simple())
    }
}

impl Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Handle returned by `show`; only good for closing and inspecting a toast.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ToastHandle {
    id: ToastId,
}

impl ToastHandle {
    #[must_use]
    pub const fn id(self) -> ToastId {
        self.id
    }
}

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastState {
    Created,
    Visible,
    Closing,
    Removed,
}

impl ToastState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Visible => "visible",
            Self::Closing => "closing",
            Self::Removed => "removed",
        }
    }
}

impl Display for ToastState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lifecycle transition, as seen through [`ToastManager::subscribe`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ToastEvent {
    pub id: ToastId,
    pub state: ToastState,
}

#[derive(Clone)]
pub struct ToastManager {
    inner: Arc<Inner>,
}

struct Inner {
    host: Arc<dyn PresentationHost>,
    runtime: Handle,
    defaults: ToastConfig,
    settings: ManagerSettings,
    container: Mutex<Vec<ToastEntry>>,
    events: broadcast::Sender<ToastEvent>,
    idle: Notify,
}

struct ToastEntry {
    id: ToastId,
    element_id: String,
    state: ToastState,
    config: ToastConfig,
}

impl ToastManager {
    /// Create a manager bound to `host` and initialize its container.
    ///
    /// # Errors
    ///
    /// Returns an error when called outside a Tokio runtime; the manager
    /// needs one to schedule its timers.
    pub fn new(
        host: Arc<dyn PresentationHost>,
        defaults: ToastConfig,
        settings: ManagerSettings,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|err| Error::Runtime(err.to_string()))?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let manager = Self {
            inner: Arc::new(Inner {
                host,
                runtime,
                defaults,
                settings,
                container: Mutex::new(Vec::new()),
                events,
                idle: Notify::new(),
            }),
        };
        manager.initialize();
        Ok(manager)
    }

    /// (Re)create the container and inject the style block once.
    ///
    /// A container already present in the host is removed first, together
    /// with its toasts, so the host never holds two. Toasts dropped this way
    /// still report `closing` before `removed`; their pending timers find
    /// nothing left to do.
    pub fn initialize(&self) {
        let inner = &self.inner;
        let settings = &inner.settings;

        let mut toasts = inner.lock();
        let dropped = toasts.len();
        for entry in toasts.drain(..) {
            if entry.state < ToastState::Closing {
                inner.emit(entry.id, ToastState::Closing);
            }
            inner.emit(entry.id, ToastState::Removed);
        }
        drop(toasts);

        if inner.host.contains(&settings.container_id) {
            debug!(
                container_id = %settings.container_id,
                dropped,
                "replacing existing toast container"
            );
            inner.host.remove(&settings.container_id);
        }
        inner.host.create_container(&ContainerSpec::new(
            settings.container_id.clone(),
            inner.defaults.position,
        ));

        if inner.host.contains(&settings.style_id) {
            trace!(style_id = %settings.style_id, "styles already present");
        } else {
            inner.host.inject_style(&settings.style_id, STYLESHEET);
        }
        inner.idle.notify_waiters();
    }

    /// Run the optional asset probe against `probe`. Never fails; the result
    /// only says whether styling assets showed up in time.
    pub async fn prepare_assets<P>(&self, probe: &P, settings: &AssetSettings) -> AssetReadiness
    where
        P: AssetProbe + ?Sized,
    {
        let readiness = ensure_assets(probe, settings).await;
        debug!(?readiness, "asset probe finished");
        readiness
    }

    #[must_use]
    pub fn defaults(&self) -> &ToastConfig {
        &self.inner.defaults
    }

    #[must_use]
    pub fn settings(&self) -> &ManagerSettings {
        &self.inner.settings
    }

    /// Merge `options` over the defaults, mount the toast and schedule its
    /// transitions.
    pub fn show(&self, options: ToastOptions) -> ToastHandle {
        let inner = &self.inner;
        let config = inner.defaults.merge(options);
        let id = ToastId::new();
        let element_id = id.element_id();
        let view = ToastView::build(element_id.clone(), &config, inner.settings.max_message_len);

        info!(
            toast_id = %id,
            title = %config.title,
            theme = %config.theme,
            auto_close = config.auto_close,
            "showing toast"
        );

        let auto_close = config.auto_close.then_some(config.auto_close_delay);
        inner.host.mount_toast(&inner.settings.container_id, &view);
        {
            let mut toasts = inner.lock();
            toasts.push(ToastEntry {
                id,
                element_id,
                state: ToastState::Created,
                config,
            });
            inner.emit(id, ToastState::Created);
        }

        let handle = ToastHandle { id };

        let manager = self.clone();
        inner.runtime.spawn(async move {
            sleep(SHOW_DELAY).await;
            manager.reveal(id);
        });

        if let Some(delay) = auto_close {
            let manager = self.clone();
            inner.runtime.spawn(async move {
                sleep(delay).await;
                trace!(toast_id = %id, "auto-close timer fired");
                manager.close(handle);
            });
        }

        handle
    }

    /// Same as [`show`](Self::show); kept for callers that build the whole
    /// config themselves.
    pub fn custom(&self, options: ToastOptions) -> ToastHandle {
        self.show(options)
    }

    /// Start closing a toast. Returns `false`, and does nothing, when the
    /// toast is already closing, already removed, or unknown.
    pub fn close(&self, handle: ToastHandle) -> bool {
        let inner = &self.inner;
        let mut toasts = inner.lock();
        let Some(entry) = toasts.iter_mut().find(|e| e.id == handle.id) else {
            trace!(toast_id = %handle.id, "close ignored: unknown toast");
            return false;
        };
        if !matches!(entry.state, ToastState::Created | ToastState::Visible) {
            trace!(toast_id = %handle.id, state = %entry.state, "close ignored");
            return false;
        }
        entry.state = ToastState::Closing;
        let element_id = entry.element_id.clone();
        inner.emit(handle.id, ToastState::Closing);
        drop(toasts);

        inner.host.set_class(&element_id, SHOW_CLASS, false);
        info!(toast_id = %handle.id, "closing toast");

        let manager = self.clone();
        inner.runtime.spawn(async move {
            sleep(REMOVAL_DELAY).await;
            manager.remove(handle.id);
        });
        true
    }

    /// Close the toast rendered under `element_id`, as a host does when its
    /// close button is clicked. Same semantics as [`close`](Self::close).
    pub fn close_element(&self, element_id: &str) -> bool {
        match self.handle_for_element(element_id) {
            Some(handle) => self.close(handle),
            None => {
                trace!(element_id, "close ignored: no toast with this element id");
                false
            }
        }
    }

    /// Handle of the toast mounted under `element_id`, if it is still in the
    /// container.
    #[must_use]
    pub fn handle_for_element(&self, element_id: &str) -> Option<ToastHandle> {
        self.inner
            .lock()
            .iter()
            .find(|e| e.element_id == element_id)
            .map(|e| ToastHandle { id: e.id })
    }

    /// Close every toast that is not already closing.
    pub fn close_all(&self) -> usize {
        self.active()
            .into_iter()
            .filter(|handle| self.close(*handle))
            .count()
    }

    pub fn success(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        overrides: ToastOptions,
    ) -> ToastHandle {
        self.notify(Severity::Success, message, title, overrides)
    }

    pub fn error(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        overrides: ToastOptions,
    ) -> ToastHandle {
        self.notify(Severity::Error, message, title, overrides)
    }

    pub fn warning(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        overrides: ToastOptions,
    ) -> ToastHandle {
        self.notify(Severity::Warning, message, title, overrides)
    }

    pub fn info(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        overrides: ToastOptions,
    ) -> ToastHandle {
        self.notify(Severity::Info, message, title, overrides)
    }

    /// Severity preset, then `title` and `message`, then `overrides`; later
    /// layers win.
    pub fn notify(
        &self,
        severity: Severity,
        message: impl Into<String>,
        title: Option<&str>,
        overrides: ToastOptions,
    ) -> ToastHandle {
        let mut options = ToastOptions::for_severity(severity).message(message);
        if let Some(title) = title {
            options = options.title(title);
        }
        self.show(options.overlay(overrides))
    }

    /// Current state, or `None` once the toast has been removed (or was
    /// never shown by this manager).
    #[must_use]
    pub fn state(&self, handle: ToastHandle) -> Option<ToastState> {
        self.inner
            .lock()
            .iter()
            .find(|e| e.id == handle.id)
            .map(|e| e.state)
    }

    /// Resolved configuration of a toast still in the container.
    #[must_use]
    pub fn config(&self, handle: ToastHandle) -> Option<ToastConfig> {
        self.inner
            .lock()
            .iter()
            .find(|e| e.id == handle.id)
            .map(|e| e.config.clone())
    }

    /// Handles of every toast in the container, in insertion order.
    #[must_use]
    pub fn active(&self) -> Vec<ToastHandle> {
        self.inner
            .lock()
            .iter()
            .map(|e| ToastHandle { id: e.id })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.inner.events.subscribe()
    }

    /// Resolve once the container holds no toast.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.is_empty() {
                return;
            }
            notified.await;
        }
    }

    fn reveal(&self, id: ToastId) {
        let inner = &self.inner;
        let mut toasts = inner.lock();
        let Some(entry) = toasts.iter_mut().find(|e| e.id == id) else {
            return;
        };
        if entry.state != ToastState::Created {
            trace!(toast_id = %id, state = %entry.state, "reveal skipped");
            return;
        }
        entry.state = ToastState::Visible;
        let element_id = entry.element_id.clone();
        inner.emit(id, ToastState::Visible);
        drop(toasts);

        inner.host.set_class(&element_id, SHOW_CLASS, true);

        // a close that ran between the unlock and set_class above must win
        if self.state(ToastHandle { id }) != Some(ToastState::Visible) {
            inner.host.set_class(&element_id, SHOW_CLASS, false);
        }
    }

    fn remove(&self, id: ToastId) {
        let inner = &self.inner;
        let mut toasts = inner.lock();
        let Some(idx) = toasts
            .iter()
            .position(|e| e.id == id && e.state == ToastState::Closing)
        else {
            return;
        };
        let entry = toasts.remove(idx);
        inner.emit(id, ToastState::Removed);
        let idle = toasts.is_empty();
        drop(toasts);

        inner.host.remove(&entry.element_id);
        if idle {
            inner.idle.notify_waiters();
        }
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Vec<ToastEntry>> {
        self.container.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, id: ToastId, state: ToastState) {
        debug!(toast_id = %id, %state, "toast transition");
        let _ = self.events.send(ToastEvent { id, state });
    }
}

#[cfg(test)]
mod tests {
    use super::{ManagerSettings, ToastId, ToastState};

    #[test]
    fn element_ids_are_unique_and_prefixed() {
        let a = ToastId::new();
        let b = ToastId::new();
        assert_ne!(a.element_id(), b.element_id());
        assert!(a.element_id().starts_with("toster-toast-"));
    }

    #[test]
    fn states_are_ordered_along_the_lifecycle() {
        assert!(ToastState::Created < ToastState::Visible);
        assert!(ToastState::Visible < ToastState::Closing);
        assert!(ToastState::Closing < ToastState::Removed);
    }

    #[test]
    fn default_settings_match_browser_ids() {
        let settings = ManagerSettings::default();
        assert_eq!(settings.container_id, "toster-container");
        assert_eq!(settings.style_id, "toster-styles");
        assert_eq!(settings.max_message_len, 80);
    }
}
