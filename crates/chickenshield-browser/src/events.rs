//! Page events and the in-page mutation bridge.

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::cdp::{CdpError, CdpResponse, PageSession};

/// Binding the in-page observer calls.
pub const MUTATION_BINDING: &str = "chickenshieldMutation";

/// Installs a `MutationObserver` on `document.body` that reports through
/// the binding, at most once per 100 ms.
const OBSERVER_SCRIPT: &str = r#"(() => {
  if (window.__chickenshieldObserver) return;
  const start = () => {
    if (!document.body || window.__chickenshieldObserver) return;
    let queued = false;
    const observer = new MutationObserver(() => {
      if (queued) return;
      queued = true;
      setTimeout(() => { queued = false; window.chickenshieldMutation(''); }, 100);
    });
    observer.observe(document.body, { childList: true, subtree: true });
    window.__chickenshieldObserver = observer;
  };
  if (document.body) start(); else document.addEventListener('DOMContentLoaded', start);
})()"#;

/// What happened on a page, as far as the scanners care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The DOM changed.
    Mutation,
    /// A document finished loading.
    Loaded,
}

/// Map a raw CDP event to a [`PageEvent`].
pub fn classify(event: &CdpResponse) -> Option<PageEvent> {
    match event.method.as_deref()? {
        "Runtime.bindingCalled" => {
            let name = event.params.as_ref().and_then(|p| p.get("name")).and_then(Value::as_str);
            (name == Some(MUTATION_BINDING)).then_some(PageEvent::Mutation)
        }
        "Page.loadEventFired" => Some(PageEvent::Loaded),
        _ => None,
    }
}

/// Turn a session's raw events into [`PageEvent`]s. The returned stream
/// ends when the session is released.
pub fn page_events(mut raw: mpsc::UnboundedReceiver<CdpResponse>) -> mpsc::UnboundedReceiver<PageEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Some(event) = raw.recv().await {
            if let Some(page_event) = classify(&event) {
                trace!("Page event: {:?}", page_event);
                if tx.send(page_event).is_err() {
                    break;
                }
            }
        }
    });
    rx
}

/// Install the mutation observer in the current document and every
/// document loaded after it.
pub async fn install_mutation_bridge(session: &PageSession) -> Result<(), CdpError> {
    session.add_binding(MUTATION_BINDING).await?;
    session.add_script_on_new_document(OBSERVER_SCRIPT).await?;
    session.evaluate(OBSERVER_SCRIPT).await?;
    debug!("Mutation bridge installed on {}", session.target_id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(json: &str) -> CdpResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_classify_binding_call() {
        let e = event(r#"{"method": "Runtime.bindingCalled", "params": {"name": "chickenshieldMutation", "payload": "", "executionContextId": 3}}"#);
        assert_eq!(classify(&e), Some(PageEvent::Mutation));
    }

    #[test]
    fn test_classify_foreign_binding() {
        let e = event(r#"{"method": "Runtime.bindingCalled", "params": {"name": "somethingElse", "payload": ""}}"#);
        assert_eq!(classify(&e), None);
    }

    #[test]
    fn test_classify_load() {
        let e = event(r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.0}}"#);
        assert_eq!(classify(&e), Some(PageEvent::Loaded));
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(classify(&event(r#"{"method": "Runtime.consoleAPICalled", "params": {}}"#)), None);
        assert_eq!(classify(&event(r#"{"id": 4, "result": {}}"#)), None);
    }

    #[test]
    fn test_observer_script_uses_binding() {
        assert!(OBSERVER_SCRIPT.contains(&format!("window.{}(", MUTATION_BINDING)));
        assert!(OBSERVER_SCRIPT.contains("subtree: true"));
    }

    #[tokio::test]
    async fn test_event_pipeline() {
        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let mut events = page_events(raw_rx);

        raw_tx.send(event(r#"{"method": "Page.loadEventFired", "params": {}}"#)).unwrap();
        raw_tx.send(event(r#"{"method": "Runtime.consoleAPICalled", "params": {}}"#)).unwrap();
        raw_tx
            .send(event(r#"{"method": "Runtime.bindingCalled", "params": {"name": "chickenshieldMutation"}}"#))
            .unwrap();
        drop(raw_tx);

        assert_eq!(events.recv().await, Some(PageEvent::Loaded));
        assert_eq!(events.recv().await, Some(PageEvent::Mutation));
        assert_eq!(events.recv().await, None);
    }
}
