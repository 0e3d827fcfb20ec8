//! Interactive tour of every dialog kind, presented with ratatui

use anyhow::Result;
use clap::Args;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Alignment;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::DialogSettings;
use crate::dialog::{
    ButtonStyle, ConfirmOptions, CustomDialog, DialogButton, DialogResult, FromOutcome, ListOption,
    PendingDialog, PromptOptions, Severity, WaitStrategy,
};
use crate::reactive::{render, DialogAction, DialogSnapshot, DialogStore};
use crate::tui::{self, Backend, DialogWidget, Event, EventHandler, KeyOutcome, Theme};

const NAME_LIMIT: usize = 32;

/// Run the dialog tour in the terminal
#[derive(Debug, Default, Args)]
pub struct DemoCommand {
    /// How closing dialogs wait for their exit animation
    /// (animation-end, immediate, timeout:<duration>)
    #[arg(short, long)]
    pub wait: Option<WaitStrategy>,

    /// Terminal poll interval, e.g. 30ms
    #[arg(long, value_parser = humantime::parse_duration)]
    pub tick: Option<Duration>,
}

/// Answers collected by the tour
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourSummary {
    pub name: Option<String>,
    pub theme: Option<String>,
    pub size: Option<String>,
    pub reset: bool,
}

impl DemoCommand {
    pub async fn execute(&self, mut settings: DialogSettings) -> Result<()> {
        if let Some(wait) = self.wait {
            settings.store_wait = wait;
            settings.validate()?;
        }
        info!(wait = %settings.store_wait, "Starting dialog tour");

        let store = Arc::new(Mutex::new(DialogStore::new(settings.clone())));
        let snapshots = store.lock().await.mount();
        let events = EventHandler::new(self.tick.unwrap_or(Duration::from_millis(30)));

        let mut terminal = tui::init_terminal()?;
        let result = run(&mut terminal, store, snapshots, events, &settings).await;
        tui::restore_terminal(&mut terminal)?;

        match result? {
            Some(summary) => println!("{}", describe(&summary)),
            None => println!("Tour cancelled"),
        }
        Ok(())
    }
}

/// Present the store until the tour finishes or the user quits
async fn run(
    terminal: &mut Terminal<Backend>,
    store: Arc<Mutex<DialogStore>>,
    mut snapshots: watch::Receiver<DialogSnapshot>,
    mut events: EventHandler,
    settings: &DialogSettings,
) -> Result<Option<TourSummary>> {
    let mut changes = store.lock().await.mount();
    let redraw = events.sender();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            if redraw.send(Event::Redraw).is_err() {
                break;
            }
        }
    });

    let script: JoinHandle<Result<TourSummary>> = tokio::spawn(tour(store.clone()));
    let mut widget = DialogWidget::new(Theme::default());
    let mut animation = Animation::default();

    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        let tree = render(&snapshot);
        if let Some(tree) = &tree {
            widget.sync(&snapshot, tree);
        }
        animation.observe(&snapshot, settings.animation_duration());

        terminal.draw(|frame| {
            let area = frame.size();
            match &tree {
                Some(tree) => widget.render(frame, area, tree),
                None => frame.render_widget(
                    Paragraph::new("dialog-replace tour - Ctrl+C to quit").alignment(Alignment::Center),
                    area,
                ),
            }
        })?;

        if script.is_finished() {
            break;
        }

        let now = Instant::now();
        {
            let mut store = store.lock().await;
            if animation.take_finished(now) {
                store.animation_end();
            }
            store.tick(now);
        }

        let outcome = match events.next().await? {
            Event::Key(key) => match &tree {
                Some(tree) => widget.handle_key(key, tree),
                None if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) => {
                    KeyOutcome::Quit
                }
                None => KeyOutcome::Ignored,
            },
            Event::Paste(text) => match &tree {
                Some(tree) => widget.handle_paste(&text, tree),
                None => KeyOutcome::Ignored,
            },
            Event::Resize(..) | Event::Tick | Event::Redraw => KeyOutcome::Redraw,
        };

        match outcome {
            KeyOutcome::Action(action) => {
                let handled = store.lock().await.dispatch(action.clone());
                debug!(?action, handled, "dialog action");
            }
            KeyOutcome::Quit => {
                script.abort();
                return Ok(None);
            }
            KeyOutcome::Redraw | KeyOutcome::Ignored => {}
        }
    }

    let summary = script.await??;
    Ok(Some(summary))
}

/// Reports the end of each applied animation once its duration has passed
#[derive(Debug, Default)]
struct Animation {
    current: Option<(u64, String)>,
    deadline: Option<Instant>,
}

impl Animation {
    fn observe(&mut self, snapshot: &DialogSnapshot, duration: Duration) {
        let key = (snapshot.sequence, snapshot.animation_class.clone());
        if self.current.as_ref() == Some(&key) {
            return;
        }
        self.deadline = (!key.1.is_empty()).then(|| Instant::now() + duration);
        self.current = Some(key);
    }

    fn take_finished(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Show one dialog and wait for its answer without holding the store lock
async fn ask<T, F>(store: &Mutex<DialogStore>, show: F) -> Result<T>
where
    T: FromOutcome,
    F: FnOnce(&mut DialogStore) -> DialogResult<PendingDialog<T>>,
{
    let pending = show(&mut *store.lock().await)?;
    Ok(pending.await?)
}

/// The scripted sequence of dialogs; each step awaits the previous answer
pub async fn tour(store: Arc<Mutex<DialogStore>>) -> Result<TourSummary> {
    let mut summary = TourSummary::default();

    ask(&store, |store| {
        store.show_alert("Dialogs here never block the caller. Press Enter to continue.", Severity::Info)
    })
    .await?;

    let proceed = ask(&store, |store| {
        store.show_confirm(
            "Take the tour of the remaining dialogs?",
            ConfirmOptions::new()
                .with_confirm_label("Continue")
                .with_cancel_label("Skip"),
        )
    })
    .await?;
    if !proceed {
        ask(&store, |store| store.show_alert("Tour skipped.", Severity::Info)).await?;
        return Ok(summary);
    }

    summary.name = ask(&store, |store| {
        store.show_prompt(
            "What should we call you?",
            PromptOptions::new()
                .with_placeholder("Your name")
                .with_validator(validate_name),
        )
    })
    .await?;

    summary.theme = ask(&store, |store| {
        store.show_dialog(
            CustomDialog::new()
                .with_title("Theme")
                .with_html("<p>Pick a <strong>theme</strong> for this session.</p>")
                .with_button(DialogButton::new("Light").with_style(ButtonStyle::Light).with_value("light"))
                .with_button(DialogButton::new("Dark").with_style(ButtonStyle::Dark).with_value("dark"))
                .with_button(DialogButton::new("Keep current").with_style(ButtonStyle::Secondary)),
            CustomDialog::new(),
        )
    })
    .await?;

    summary.size = ask(&store, |store| {
        store.show_dialog(
            "Which font size do you prefer?",
            CustomDialog::new().with_title("Font size").with_options(vec![
                ListOption::new("s", "Small").with_icon("·"),
                ListOption::new("m", "Medium").with_icon("•"),
                ListOption::new("l", "Large").with_icon("●"),
            ]),
        )
    })
    .await?;

    summary.reset = ask(&store, |store| {
        store.show_confirm("Reset every answer you just gave?", ConfirmOptions::danger())
    })
    .await?;

    let (message, severity) = if summary.reset {
        summary = TourSummary {
            reset: true,
            ..TourSummary::default()
        };
        ("Answers reset.".to_string(), Severity::Error)
    } else {
        (describe(&summary), Severity::Success)
    };
    ask(&store, |store| store.show_alert(&message, severity)).await?;

    Ok(summary)
}

fn validate_name(value: &str) -> Option<String> {
    let name = value.trim();
    if name.is_empty() {
        Some("A name is required".to_string())
    } else if name.chars().count() > NAME_LIMIT {
        Some(format!("Keep it under {} characters", NAME_LIMIT))
    } else {
        None
    }
}

fn describe(summary: &TourSummary) -> String {
    if summary.reset {
        return "Answers were reset".to_string();
    }
    format!(
        "name: {}, theme: {}, size: {}",
        summary.name.as_deref().unwrap_or("(cancelled)"),
        summary.theme.as_deref().unwrap_or("(cancelled)"),
        summary.size.as_deref().unwrap_or("(cancelled)"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogRole;

    async fn next_dialog(
        snapshots: &mut watch::Receiver<DialogSnapshot>,
        after: u64,
    ) -> DialogSnapshot {
        loop {
            {
                let snapshot = snapshots.borrow_and_update();
                if snapshot.is_open && !snapshot.is_closing && snapshot.sequence > after {
                    return snapshot.clone();
                }
            }
            snapshots.changed().await.unwrap();
        }
    }

    fn immediate_store() -> Arc<Mutex<DialogStore>> {
        let settings = DialogSettings {
            store_wait: WaitStrategy::Immediate,
            ..DialogSettings::default()
        };
        Arc::new(Mutex::new(DialogStore::new(settings)))
    }

    #[tokio::test]
    async fn test_tour_collects_answers() {
        let store = immediate_store();
        let mut snapshots = store.lock().await.mount();
        let script = tokio::spawn(tour(store.clone()));

        let step = next_dialog(&mut snapshots, 0).await;
        assert_eq!(step.dialog_type, DialogRole::Alert);
        assert!(store.lock().await.dispatch(DialogAction::AlertOk));

        let step = next_dialog(&mut snapshots, step.sequence).await;
        assert_eq!(step.dialog_type, DialogRole::Confirm);
        assert_eq!(step.config.confirm_text, "Continue");
        assert!(store.lock().await.dispatch(DialogAction::ConfirmOk));

        let step = next_dialog(&mut snapshots, step.sequence).await;
        assert_eq!(step.dialog_type, DialogRole::Prompt);
        {
            let mut store = store.lock().await;
            store.prompt_ok();
            assert_eq!(store.snapshot().config.error_message, "A name is required");
            store.input_change("Ada");
            assert!(store.prompt_ok());
        }

        let step = next_dialog(&mut snapshots, step.sequence).await;
        assert_eq!(step.dialog_type, DialogRole::Custom);
        assert!(!step.config.is_list_mode);
        assert!(store
            .lock()
            .await
            .dispatch(DialogAction::ButtonClick(Some("dark".to_string()))));

        let step = next_dialog(&mut snapshots, step.sequence).await;
        assert!(step.config.is_list_mode);
        assert_eq!(step.config.message, "Which font size do you prefer?");
        assert!(store
            .lock()
            .await
            .dispatch(DialogAction::ListItemClick("m".to_string())));

        let step = next_dialog(&mut snapshots, step.sequence).await;
        assert!(step.config.is_danger);
        assert!(store.lock().await.dispatch(DialogAction::ConfirmCancel));

        let step = next_dialog(&mut snapshots, step.sequence).await;
        assert_eq!(step.config.alert_type, Severity::Success);
        assert!(step.config.message.contains("Ada"));
        assert!(store.lock().await.dispatch(DialogAction::AlertOk));

        let summary = script.await.unwrap().unwrap();
        assert_eq!(
            summary,
            TourSummary {
                name: Some("Ada".to_string()),
                theme: Some("dark".to_string()),
                size: Some("m".to_string()),
                reset: false,
            }
        );
    }

    #[tokio::test]
    async fn test_tour_skip() {
        let store = immediate_store();
        let mut snapshots = store.lock().await.mount();
        let script = tokio::spawn(tour(store.clone()));

        let step = next_dialog(&mut snapshots, 0).await;
        store.lock().await.alert_ok();
        let step = next_dialog(&mut snapshots, step.sequence).await;
        store.lock().await.confirm_cancel();
        let step = next_dialog(&mut snapshots, step.sequence).await;
        assert_eq!(step.config.message, "Tour skipped.");
        store.lock().await.alert_ok();

        assert_eq!(script.await.unwrap().unwrap(), TourSummary::default());
    }

    #[tokio::test]
    async fn test_tour_fails_without_mounted_store() {
        let store = immediate_store();
        assert!(tour(store).await.is_err());
    }

    #[tokio::test]
    async fn test_wait_override_is_validated() {
        let command = DemoCommand {
            wait: Some(WaitStrategy::Timeout { millis: 7_200_000 }),
            tick: None,
        };
        let err = command.execute(DialogSettings::default()).await.unwrap_err();
        assert!(err.to_string().contains("exit timeout"));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  "), Some("A name is required".to_string()));
        assert_eq!(validate_name("Grace"), None);
        assert!(validate_name(&"x".repeat(NAME_LIMIT + 1)).is_some());
    }

    #[test]
    fn test_animation_reports_once_per_class() {
        let mut animation = Animation::default();
        let mut snapshot = DialogSnapshot {
            sequence: 1,
            animation_class: "animate__animated animate__fadeIn".to_string(),
            ..DialogSnapshot::default()
        };
        animation.observe(&snapshot, Duration::ZERO);
        assert!(animation.take_finished(Instant::now()));
        assert!(!animation.take_finished(Instant::now()));

        animation.observe(&snapshot, Duration::ZERO);
        assert!(!animation.take_finished(Instant::now()));

        snapshot.animation_class.clear();
        animation.observe(&snapshot, Duration::ZERO);
        assert!(!animation.take_finished(Instant::now()));
    }
}
