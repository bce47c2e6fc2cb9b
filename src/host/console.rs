use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};
use url::Url;

use crate::assets::{AssetKind, AssetProbe};
use crate::toast::{ToastView, strip_markup};
use crate::util::time::now_local;

use super::{ContainerSpec, PresentationHost, SHOW_CLASS};

/// Host that prints toasts as lines on a terminal.
///
/// A toast is printed when it becomes visible and again when it starts
/// closing. Terminals have no stylesheets, so every asset counts as present.
pub struct ConsoleHost<W: Write + Send + 'static = io::Stdout> {
    state: Mutex<ConsoleState<W>>,
}

struct ConsoleState<W> {
    out: W,
    container: Option<String>,
    elements: HashSet<String>,
    toasts: HashMap<String, ToastView>,
}

impl ConsoleHost<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> ConsoleHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(ConsoleState {
                out,
                container: None,
                elements: HashSet::new(),
                toasts: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ConsoleState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> ConsoleState<W> {
    fn print(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!(error = %err, "failed to write toast to console");
        }
    }
}

impl<W: Write + Send + 'static> PresentationHost for ConsoleHost<W> {
    fn contains(&self, element_id: &str) -> bool {
        self.lock().elements.contains(element_id)
    }

    fn remove(&self, element_id: &str) -> bool {
        let mut state = self.lock();
        if state.container.as_deref() == Some(element_id) {
            state.container = None;
            let children: Vec<String> = state.toasts.drain().map(|(id, _)| id).collect();
            for id in children {
                state.elements.remove(&id);
            }
        } else if state.toasts.remove(element_id).is_some() {
            trace!(element_id, "toast element removed");
        }
        state.elements.remove(element_id)
    }

    fn create_container(&self, container: &ContainerSpec) {
        debug!(
            element_id = %container.element_id,
            position = %container.position,
            "console container ready"
        );
        let mut state = self.lock();
        state.elements.insert(container.element_id.clone());
        state.container = Some(container.element_id.clone());
    }

    fn inject_style(&self, style_id: &str, css: &str) {
        trace!(style_id, bytes = css.len(), "style block ignored by console host");
        self.lock().elements.insert(style_id.to_string());
    }

    fn mount_toast(&self, container_id: &str, view: &ToastView) {
        let mut state = self.lock();
        if state.container.as_deref() != Some(container_id) {
            warn!(container_id, "container missing; toast not mounted");
            return;
        }
        state.elements.insert(view.element_id.clone());
        state.toasts.insert(view.element_id.clone(), view.clone());
    }

    fn set_class(&self, element_id: &str, class: &str, enabled: bool) {
        if class != SHOW_CLASS {
            return;
        }
        let mut state = self.lock();
        let Some(view) = state.toasts.get_mut(element_id) else {
            return;
        };
        if view.has_class(class) == enabled {
            return;
        }
        let line = if enabled {
            view.classes.push(class.to_string());
            format!(
                "[{}] {}: {}",
                now_local(),
                view.title,
                strip_markup(&view.message_html)
            )
        } else {
            view.classes.retain(|c| c != class);
            format!("[{}] {} (dismissed)", now_local(), view.title)
        };
        state.print(&line);
    }
}

impl<W: Write + Send + 'static> AssetProbe for ConsoleHost<W> {
    fn is_present(&self, _kind: AssetKind) -> bool {
        true
    }

    fn inject(&self, kind: AssetKind, url: &Url) {
        debug!(asset = %kind, %url, "console host has no use for web assets");
    }
}

#[cfg(test)]
mod tests {
    use super::ConsoleHost;
    use crate::host::{ContainerSpec, PresentationHost, SHOW_CLASS};
    use crate::toast::{ToastConfig, ToastOptions, ToastView};
    use crate::types::Position;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            match self.0.lock() {
                Ok(mut inner) => inner.write(buf),
                Err(_) => Err(io::Error::other("poisoned")),
            }
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            self.0
                .lock()
                .map(|inner| String::from_utf8_lossy(&inner).into_owned())
                .unwrap_or_default()
        }
    }

    #[test]
    fn prints_on_show_and_dismiss() {
        let buf = SharedBuf::default();
        let host = ConsoleHost::new(buf.clone());
        host.create_container(&ContainerSpec::new("box", Position::TopLeft));

        let config = ToastConfig::default()
            .merge(ToastOptions::new().title("Saved").message("<i>all good</i>"));
        let view = ToastView::build("t1".to_string(), &config, 80);
        host.mount_toast("box", &view);
        assert!(buf.text().is_empty());

        host.set_class("t1", SHOW_CLASS, true);
        host.set_class("t1", SHOW_CLASS, false);
        let text = buf.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Saved: all good"));
        assert!(lines[1].ends_with("Saved (dismissed)"));
    }

    #[test]
    fn repeated_class_changes_print_once() {
        let buf = SharedBuf::default();
        let host = ConsoleHost::new(buf.clone());
        host.create_container(&ContainerSpec::new("box", Position::TopLeft));
        let view = ToastView::build("t1".to_string(), &ToastConfig::default(), 80);
        host.mount_toast("box", &view);

        host.set_class("t1", SHOW_CLASS, false);
        host.set_class("t1", SHOW_CLASS, true);
        host.set_class("t1", SHOW_CLASS, true);
        host.set_class("t1", SHOW_CLASS, false);
        host.set_class("t1", SHOW_CLASS, false);
        assert_eq!(buf.text().lines().count(), 2);
    }

    #[test]
    fn tracks_element_ids() {
        let host = ConsoleHost::new(SharedBuf::default());
        assert!(!host.contains("box"));
        host.create_container(&ContainerSpec::new("box", Position::BottomRight));
        host.inject_style("styles", "");
        assert!(host.contains("box"));
        assert!(host.contains("styles"));
        assert!(host.remove("box"));
        assert!(!host.contains("box"));
    }
}
