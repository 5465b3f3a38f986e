use crate::config::Config;
use crate::discord;
use crate::form::{FormState, SubmitOutcome};
use crate::log::Logger;
use crate::render;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

const FLASH_DURATION: Duration = Duration::from_secs(3);

/// Which input currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    WebhookUrl,
    Content,
    Username,
    AvatarUrl,
    Embed(usize, EmbedInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedInput {
    Title,
    Description,
    Color,
}

/// One-shot success notice, cleared after a few seconds.
pub struct Flash {
    pub text: String,
    shown_at: Instant,
}

impl Flash {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            shown_at: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.shown_at.elapsed() >= FLASH_DURATION
    }
}

/// The running application: the one `FormState`, the focus model over its
/// fields, and the channel that in-flight sends report back on.
pub struct App {
    pub form: FormState,
    pub focus: Field,
    pub flash: Option<Flash>,
    /// Hex text being edited per embed; parsed into the draft on change so
    /// half-typed values don't wipe the stored color.
    color_inputs: Vec<String>,
    should_quit: bool,
    results_tx: Sender<Result<()>>,
    results_rx: Receiver<Result<()>>,
    log: Box<dyn Logger>,
}

impl App {
    pub fn new(config: Config, log: Box<dyn Logger>) -> Self {
        let mut form = FormState::new();
        if let Some(url) = config.webhook_url {
            form.set_webhook_url(url);
        }

        let (results_tx, results_rx) = mpsc::channel();

        Self {
            form,
            focus: Field::WebhookUrl,
            flash: None,
            color_inputs: Vec::new(),
            should_quit: false,
            results_tx,
            results_rx,
            log,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn color_input(&self, index: usize) -> &str {
        self.color_inputs.get(index).map_or("", String::as_str)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => self.quit(),
                KeyCode::Char('n') => self.add_embed(),
                KeyCode::Char('d') => self.remove_focused_embed(),
                KeyCode::Char('s') => self.submit(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::Enter if self.focused_field_is_multiline() => self.push_char('\n'),
            KeyCode::Char(c) => self.push_char(c),
            KeyCode::Backspace => self.pop_char(),
            _ => {}
        }
    }

    /// Drain finished sends and expire the flash. Called once per event-loop
    /// turn, so results land between keystrokes rather than during them.
    pub fn pump(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            match self.form.finish_submit(result) {
                SubmitOutcome::Sent => {
                    self.log.info("Webhook sent");
                    self.flash = Some(Flash::new("Webhook sent successfully!"));
                }
                SubmitOutcome::Failed => {
                    let error = self.form.last_error().unwrap_or("unknown error");
                    self.log.error(&format!("Webhook send failed: {error}"));
                }
                SubmitOutcome::NotAttempted => {}
            }
        }

        if self.flash.as_ref().is_some_and(Flash::expired) {
            self.flash = None;
        }
    }

    /// Kick off a send on a worker thread so the form stays editable while
    /// the request is in flight. Does nothing while the URL field is empty.
    pub fn submit(&mut self) {
        let Some((url, message)) = self.form.begin_submit() else {
            return;
        };

        self.log.info(&format!("Submitting webhook to {url}"));

        let tx = self.results_tx.clone();
        std::thread::spawn(move || {
            _ = tx.send(discord::execute_webhook(&url, &message));
        });
    }

    fn quit(&mut self) {
        self.log.info("Stopping");
        self.should_quit = true;
    }

    fn add_embed(&mut self) {
        self.form.add_embed();
        self.color_inputs
            .push(render::color_hex(discord::DEFAULT_EMBED_COLOR));
        self.focus = Field::Embed(self.form.draft().embeds.len() - 1, EmbedInput::Title);
    }

    fn remove_focused_embed(&mut self) {
        let Field::Embed(index, _) = self.focus else {
            return;
        };

        self.form.remove_embed(index);
        if index < self.color_inputs.len() {
            self.color_inputs.remove(index);
        }

        let remaining = self.form.draft().embeds.len();
        self.focus = if remaining == 0 {
            Field::AvatarUrl
        } else {
            Field::Embed(index.min(remaining - 1), EmbedInput::Title)
        };
    }

    fn focus_order(&self) -> Vec<Field> {
        let mut order = vec![
            Field::WebhookUrl,
            Field::Content,
            Field::Username,
            Field::AvatarUrl,
        ];

        for index in 0..self.form.draft().embeds.len() {
            order.push(Field::Embed(index, EmbedInput::Title));
            order.push(Field::Embed(index, EmbedInput::Description));
            order.push(Field::Embed(index, EmbedInput::Color));
        }

        order
    }

    fn focus_next(&mut self) {
        self.move_focus(1);
    }

    fn focus_previous(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = (current as isize + step).rem_euclid(order.len() as isize);
        self.focus = order[next as usize];
    }

    fn focused_field_is_multiline(&self) -> bool {
        matches!(
            self.focus,
            Field::Content | Field::Embed(_, EmbedInput::Description)
        )
    }

    fn push_char(&mut self, c: char) {
        self.edit_focused(|text| text.push(c));
    }

    fn pop_char(&mut self) {
        self.edit_focused(|text| {
            text.pop();
        });
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        match self.focus {
            Field::WebhookUrl => {
                let mut url = self.form.webhook_url().to_string();
                edit(&mut url);
                self.form.set_webhook_url(url);
            }
            Field::Content => {
                let mut content = self.form.draft().content.clone();
                edit(&mut content);
                self.form.set_content(content);
            }
            Field::Username => {
                let mut username = self.form.draft().username.clone();
                edit(&mut username);
                self.form.set_username(username);
            }
            Field::AvatarUrl => {
                let mut avatar_url = self.form.draft().avatar_url.clone();
                edit(&mut avatar_url);
                self.form.set_avatar_url(avatar_url);
            }
            Field::Embed(index, input) => self.edit_embed(index, input, edit),
        }
    }

    fn edit_embed(&mut self, index: usize, input: EmbedInput, edit: impl FnOnce(&mut String)) {
        let Some(mut embed) = self.form.draft().embeds.get(index).cloned() else {
            return;
        };

        match input {
            EmbedInput::Title => edit(&mut embed.title),
            EmbedInput::Description => edit(&mut embed.description),
            EmbedInput::Color => {
                let Some(text) = self.color_inputs.get_mut(index) else {
                    return;
                };
                edit(text);

                // Only a fully valid 24-bit value reaches the draft.
                match u32::from_str_radix(text.trim_start_matches('#'), 16) {
                    Ok(color) if color <= 0x00FF_FFFF => embed.color = color,
                    _ => return,
                }
            }
        }

        self.form.update_embed(index, embed);
    }
}
