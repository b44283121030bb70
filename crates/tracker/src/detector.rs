use waitdash_core::{Site, SiteRules};

use crate::events::{PageEvent, Signal};

/// Turns generic page events into submit/response signals using the active
/// site's rule table. Matching is heuristic and best-effort: sites change
/// their markup, and detection then silently degrades rather than erroring.
#[derive(Debug, Clone, Copy)]
pub struct SignalDetector {
    rules: &'static SiteRules,
}

impl SignalDetector {
    pub fn new(site: Site) -> Self {
        Self {
            rules: site.rules(),
        }
    }

    pub fn classify(&self, event: &PageEvent) -> Option<Signal> {
        match event {
            PageEvent::Key {
                key,
                shift,
                editable_target,
            } => self.classify_key(key, *shift, *editable_target),
            PageEvent::Click { label, classes } => self.classify_click(label, classes),
            PageEvent::Mutation { classes, text_len } => {
                self.classify_mutation(classes, *text_len)
            }
            _ => None,
        }
    }

    /// Enter without shift (or an explicit Submit key) inside an editable
    /// element is treated as a submit.
    fn classify_key(&self, key: &str, shift: bool, editable_target: bool) -> Option<Signal> {
        if !editable_target {
            return None;
        }
        if (key == "Enter" && !shift) || key == "Submit" {
            return Some(Signal::Submit);
        }
        None
    }

    fn classify_click(&self, label: &str, classes: &[String]) -> Option<Signal> {
        let label = label.to_lowercase();
        if self
            .rules
            .submit_labels
            .iter()
            .any(|keyword| label.contains(keyword))
        {
            return Some(Signal::Submit);
        }
        if classes.iter().any(|class| {
            self.rules
                .submit_classes
                .iter()
                .any(|keyword| class.contains(keyword))
        }) {
            return Some(Signal::Submit);
        }
        None
    }

    /// A response is a node carrying one of the site's response markers with
    /// enough text to matter. Short nodes are typing indicators, toolbars,
    /// and other noise.
    fn classify_mutation(&self, classes: &[String], text_len: usize) -> Option<Signal> {
        if text_len <= self.rules.min_response_len {
            return None;
        }
        if classes
            .iter()
            .any(|class| self.rules.response_markers.contains(&class.as_str()))
        {
            return Some(Signal::Response);
        }
        None
    }
}
