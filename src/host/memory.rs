use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use url::Url;

use crate::assets::{AssetKind, AssetProbe};
use crate::toast::ToastView;

use super::{ContainerSpec, PresentationHost};

/// In-process element tree. Embedders use it to drive their own renderer;
/// tests use it to observe what the manager did.
#[derive(Debug, Default)]
pub struct MemoryHost {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    containers: Vec<MemoryContainer>,
    styles: Vec<(String, String)>,
    assets: HashMap<AssetKind, AssetLoad>,
    asset_latency: u32,
}

#[derive(Debug)]
struct MemoryContainer {
    spec: ContainerSpec,
    toasts: Vec<ToastView>,
}

#[derive(Debug)]
struct AssetLoad {
    url: Option<Url>,
    polls_left: u32,
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Injected assets only report present after `polls` presence checks.
    /// `u32::MAX` keeps them loading forever.
    #[must_use]
    pub fn with_asset_latency(polls: u32) -> Self {
        let host = Self::default();
        host.lock().asset_latency = polls;
        host
    }

    /// Mark an asset as already present, as if the page shipped it.
    pub fn preload(&self, kind: AssetKind) {
        self.lock().assets.insert(
            kind,
            AssetLoad {
                url: None,
                polls_left: 0,
            },
        );
    }

    #[must_use]
    pub fn injected_url(&self, kind: AssetKind) -> Option<Url> {
        self.lock().assets.get(&kind).and_then(|load| load.url.clone())
    }

    #[must_use]
    pub fn container_count(&self) -> usize {
        self.lock().containers.len()
    }

    #[must_use]
    pub fn style_count(&self) -> usize {
        self.lock().styles.len()
    }

    /// Toast element ids in mount order, across all containers.
    #[must_use]
    pub fn toast_ids(&self) -> Vec<String> {
        self.lock()
            .containers
            .iter()
            .flat_map(|c| c.toasts.iter().map(|t| t.element_id.clone()))
            .collect()
    }

    #[must_use]
    pub fn toast(&self, element_id: &str) -> Option<ToastView> {
        self.lock()
            .containers
            .iter()
            .flat_map(|c| c.toasts.iter())
            .find(|t| t.element_id == element_id)
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MemoryState {
    fn toast_mut(&mut self, element_id: &str) -> Option<&mut ToastView> {
        self.containers
            .iter_mut()
            .flat_map(|c| c.toasts.iter_mut())
            .find(|t| t.element_id == element_id)
    }
}

impl PresentationHost for MemoryHost {
    fn contains(&self, element_id: &str) -> bool {
        let state = self.lock();
        state.styles.iter().any(|(id, _)| id == element_id)
            || state.containers.iter().any(|c| {
                c.spec.element_id == element_id
                    || c.toasts.iter().any(|t| t.element_id == element_id)
            })
    }

    fn remove(&self, element_id: &str) -> bool {
        let mut state = self.lock();

        let before = state.containers.len();
        state.containers.retain(|c| c.spec.element_id != element_id);
        if state.containers.len() != before {
            return true;
        }

        let before = state.styles.len();
        state.styles.retain(|(id, _)| id != element_id);
        if state.styles.len() != before {
            return true;
        }

        for container in &mut state.containers {
            if let Some(idx) = container
                .toasts
                .iter()
                .position(|t| t.element_id == element_id)
            {
                container.toasts.remove(idx);
                return true;
            }
        }
        false
    }

    fn create_container(&self, container: &ContainerSpec) {
        self.lock().containers.push(MemoryContainer {
            spec: container.clone(),
            toasts: Vec::new(),
        });
    }

    fn inject_style(&self, style_id: &str, css: &str) {
        self.lock()
            .styles
            .push((style_id.to_string(), css.to_string()));
    }

    fn mount_toast(&self, container_id: &str, view: &ToastView) {
        let mut state = self.lock();
        if let Some(container) = state
            .containers
            .iter_mut()
            .find(|c| c.spec.element_id == container_id)
        {
            container.toasts.push(view.clone());
        }
    }

    fn set_class(&self, element_id: &str, class: &str, enabled: bool) {
        let mut state = self.lock();
        let Some(toast) = state.toast_mut(element_id) else {
            return;
        };
        let has = toast.has_class(class);
        if enabled && !has {
            toast.classes.push(class.to_string());
        } else if !enabled && has {
            toast.classes.retain(|c| c != class);
        }
    }
}

impl AssetProbe for MemoryHost {
    fn is_present(&self, kind: AssetKind) -> bool {
        let mut state = self.lock();
        let Some(load) = state.assets.get_mut(&kind) else {
            return false;
        };
        if load.polls_left == 0 {
            return true;
        }
        if load.polls_left != u32::MAX {
            load.polls_left -= 1;
        }
        false
    }

    fn inject(&self, kind: AssetKind, url: &Url) {
        let mut state = self.lock();
        let polls_left = state.asset_latency;
        state.assets.entry(kind).or_insert(AssetLoad {
            url: Some(url.clone()),
            polls_left,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryHost;
    use crate::host::{ContainerSpec, PresentationHost};
    use crate::toast::{ToastConfig, ToastView};
    use crate::types::Position;

    fn view(id: &str) -> ToastView {
        ToastView::build(id.to_string(), &ToastConfig::default(), 80)
    }

    #[test]
    fn toasts_keep_mount_order() {
        let host = MemoryHost::new();
        host.create_container(&ContainerSpec::new("box", Position::BottomRight));
        host.mount_toast("box", &view("a"));
        host.mount_toast("box", &view("b"));
        assert_eq!(host.toast_ids(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn removing_container_drops_children() {
        let host = MemoryHost::new();
        host.create_container(&ContainerSpec::new("box", Position::BottomRight));
        host.mount_toast("box", &view("a"));
        assert!(host.remove("box"));
        assert!(!host.contains("a"));
        assert!(!host.remove("box"));
    }

    #[test]
    fn set_class_toggles_once() {
        let host = MemoryHost::new();
        host.create_container(&ContainerSpec::new("box", Position::BottomRight));
        host.mount_toast("box", &view("a"));
        host.set_class("a", "show", true);
        host.set_class("a", "show", true);
        let classes = host.toast("a").map(|t| t.classes).unwrap_or_default();
        assert_eq!(classes.iter().filter(|c| *c == "show").count(), 1);
        host.set_class("a", "show", false);
        assert!(host.toast("a").is_some_and(|t| !t.has_class("show")));
    }

    #[test]
    fn mount_into_missing_container_is_ignored() {
        let host = MemoryHost::new();
        host.mount_toast("nowhere", &view("a"));
        assert!(host.toast_ids().is_empty());
    }
}
