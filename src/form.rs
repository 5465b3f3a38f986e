use crate::discord::{self, Embed, WebhookMessage};
use anyhow::Result;

/// All mutable form state: the target URL, the message draft, and the last
/// failed send's message. One instance exists per run and every mutation
/// goes through the methods below.
#[derive(Debug, Default)]
pub struct FormState {
    webhook_url: String,
    draft: WebhookMessage,
    last_error: Option<String>,
}

/// What became of one call to `submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The webhook URL was empty, so no request was issued.
    NotAttempted,
    Sent,
    Failed,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn draft(&self) -> &WebhookMessage {
        &self.draft
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_webhook_url(&mut self, url: impl Into<String>) {
        self.webhook_url = url.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.draft.username = username.into();
    }

    pub fn set_avatar_url(&mut self, avatar_url: impl Into<String>) {
        self.draft.avatar_url = avatar_url.into();
    }

    /// Append a fresh embed with the default accent color.
    pub fn add_embed(&mut self) {
        self.draft.embeds.push(Embed::new());
    }

    /// Remove the embed at `index`, keeping the rest in order.
    /// Out-of-bounds indices are ignored.
    pub fn remove_embed(&mut self, index: usize) {
        if index < self.draft.embeds.len() {
            self.draft.embeds.remove(index);
        }
    }

    /// Replace the embed at `index` wholesale. Out-of-bounds indices are
    /// ignored.
    pub fn update_embed(&mut self, index: usize, embed: Embed) {
        if let Some(slot) = self.draft.embeds.get_mut(index) {
            *slot = embed;
        }
    }

    /// Admission check: a submit needs a destination, nothing more.
    pub fn can_submit(&self) -> bool {
        !self.webhook_url.is_empty()
    }

    /// Start a submit attempt: clear the previous error and hand back the
    /// URL and a snapshot of the draft for the sender. `None` means the
    /// admission check failed and no request should be issued.
    pub fn begin_submit(&mut self) -> Option<(String, WebhookMessage)> {
        self.last_error = None;

        if !self.can_submit() {
            return None;
        }

        Some((self.webhook_url.clone(), self.draft.clone()))
    }

    /// Record the sender's result. The draft is never touched, so a failed
    /// send can be edited and retried as-is.
    pub fn finish_submit(&mut self, result: Result<()>) -> SubmitOutcome {
        match result {
            Ok(()) => SubmitOutcome::Sent,
            Err(e) => {
                self.last_error = Some(e.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Synchronous submit: one POST to the webhook URL, with the outcome
    /// folded back into `last_error`.
    pub fn submit(&mut self) -> SubmitOutcome {
        let Some((url, message)) = self.begin_submit() else {
            return SubmitOutcome::NotAttempted;
        };

        self.finish_submit(discord::execute_webhook(&url, &message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn embed_titled(title: &str) -> Embed {
        Embed {
            title: title.to_string(),
            ..Embed::new()
        }
    }

    fn titles(form: &FormState) -> Vec<&str> {
        form.draft()
            .embeds
            .iter()
            .map(|e| e.title.as_str())
            .collect()
    }

    #[test]
    fn test_remove_preserves_order_of_remaining_embeds() {
        let mut form = FormState::new();

        for title in ["a", "b", "c"] {
            form.add_embed();
            let index = form.draft().embeds.len() - 1;
            form.update_embed(index, embed_titled(title));
        }

        form.remove_embed(1);

        assert_eq!(titles(&form), vec!["a", "c"]);
    }

    #[test]
    fn test_update_replaces_only_the_targeted_embed() {
        let mut form = FormState::new();
        form.add_embed();
        form.add_embed();

        form.update_embed(1, embed_titled("second"));

        assert_eq!(titles(&form), vec!["", "second"]);
    }

    #[test]
    fn test_out_of_bounds_indices_are_ignored() {
        let mut form = FormState::new();
        form.add_embed();
        form.add_embed();

        form.remove_embed(5);
        form.update_embed(2, embed_titled("nope"));

        assert_eq!(form.draft().embeds.len(), 2);
        assert_eq!(titles(&form), vec!["", ""]);
    }

    #[test]
    fn test_submit_is_gated_on_a_nonempty_url() {
        let mut form = FormState::new();
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), None);

        form.set_webhook_url("https://example.com/hook");
        assert!(form.can_submit());
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn test_begin_submit_clears_the_previous_error() {
        let mut form = FormState::new();
        form.set_webhook_url("https://example.com/hook");
        form.finish_submit(Err(anyhow!("boom")));
        assert_eq!(form.last_error(), Some("boom"));

        form.begin_submit();

        assert_eq!(form.last_error(), None);
    }

    #[test]
    fn test_submit_snapshot_matches_the_raw_projection() {
        let mut form = FormState::new();
        form.set_webhook_url("https://example.com/hook");
        form.set_content("hi");
        form.add_embed();

        let (_, snapshot) = form.begin_submit().unwrap();

        let raw = crate::render::raw_json(form.draft());
        let reparsed: WebhookMessage = serde_json::from_str(&raw).unwrap();
        assert_eq!(reparsed, snapshot);
    }

    /// Accept one HTTP request and answer it with the given status line.
    /// Returns the URL to aim at.
    fn stub_webhook(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();

            // Read until the request body has arrived, then respond.
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                if request_is_complete(&request) || n == 0 {
                    break;
                }
            }

            stream.write_all(response.as_bytes()).unwrap();
        });

        url
    }

    fn request_is_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };

        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);

        body.len() >= content_length
    }

    #[test]
    fn test_submit_success_leaves_no_error() {
        let mut form = FormState::new();
        form.set_webhook_url(stub_webhook(
            "HTTP/1.1 204 No Content\r\nconnection: close\r\n\r\n",
        ));
        form.set_content("hi");

        let outcome = form.submit();

        assert_eq!(outcome, SubmitOutcome::Sent);
        assert_eq!(form.last_error(), None);
    }

    #[test]
    fn test_submit_rejection_surfaces_the_fixed_message() {
        let mut form = FormState::new();
        form.set_webhook_url(stub_webhook(
            "HTTP/1.1 400 Bad Request\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        ));
        form.set_content("hi");
        let draft_before = form.draft().clone();

        let outcome = form.submit();

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(form.last_error(), Some(discord::SEND_FAILED_MESSAGE));
        assert_eq!(form.draft(), &draft_before);
    }

    #[test]
    fn test_transport_failure_surfaces_the_underlying_message() {
        let mut form = FormState::new();
        // Nothing is listening on this port.
        form.set_webhook_url("http://127.0.0.1:1/");

        let outcome = form.submit();

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(form.last_error().is_some_and(|e| !e.is_empty()));
    }
}
