// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use std::{collections::VecDeque, sync::Arc, thread};

use crossbeam::channel;
use eframe::{egui, App, Frame, NativeOptions};
use egui::{Button, FontId, RichText};
use egui_dialogs::{DialogDetails, Dialogs, StandardDialog, StandardReply};
use indexmap::IndexMap;
use strum::IntoEnumIterator;
use tracing::Level;
use tunex::{
    apps::{self, AppRecord},
    backend::select_backend,
    config::AppConfig,
    constants::{
        APP_NAME, COLUMN_COUNT, LABEL_FONT_SIZE, TWEAK_CONTAINER_HEIGHT, TWEAK_CONTAINER_WIDTH,
        UI_PADDING, UI_SPACING, WINDOW_HEIGHT, WINDOW_WIDTH,
    },
    dispatcher::{KeyLocks, ToggleDispatcher},
    errors::{ConfigError, MutationError},
    executor::{RevertExecutor, RevertReport},
    ledger::RevertLedger,
    orchestrator::{TaskOrchestrator, TaskResult, TweakTask},
    settings::{self, open_store, MemoryStore, SettingsStore},
    tweaks::{
        catalog::Catalog,
        method::{ActionRunner, StepRunner},
        ToggleEntry, TweakCategory,
    },
    ui::{switch::ToggleSwitch, ToggleStatus},
};

const BUTTON_SIZE: [f32; 2] = [140.0, 24.0];

/// A toggle as shown in the window.
struct ToggleView {
    entry: &'static ToggleEntry,
    on: bool,
    status: ToggleStatus,
}

/// Something the user has to acknowledge or answer. Only one is on screen at a time.
enum Prompt {
    Notice {
        title: String,
        message: String,
        is_error: bool,
    },
    ConfirmToggle {
        key: &'static str,
        on: bool,
        question: &'static str,
    },
    ConfirmRevertAll {
        pending: usize,
    },
}

pub struct MyApp {
    config: AppConfig,
    catalog: Arc<Catalog>,
    store: Arc<dyn SettingsStore>,
    ledger: Arc<RevertLedger>,

    /// Toggles in catalog order, indexed by key
    toggles: IndexMap<&'static str, ToggleView>,

    /// Task orchestrator running toggle changes and revert sweeps
    orchestrator: TaskOrchestrator,

    pending_reverts: usize,
    revert_in_progress: bool,

    prompts: VecDeque<Prompt>,
    active_prompt: Option<Prompt>,
    dialogs: Dialogs<'static>,

    apps_window_open: bool,
    apps: Vec<AppRecord>,
    apps_receiver: Option<channel::Receiver<anyhow::Result<Vec<AppRecord>>>>,
}

impl MyApp {
    fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        config_error: Option<ConfigError>,
    ) -> Self {
        let app_span = tracing::span!(Level::INFO, "App Initialization");
        let _app_guard = app_span.enter();

        let mut prompts = VecDeque::new();

        if let Some(e) = config_error {
            prompts.push_back(Prompt::Notice {
                title: "Configuration".to_string(),
                message: format!("{}\n\nDefault settings are used instead.", e),
                is_error: true,
            });
        }

        if !is_elevated() && !config.dry_run {
            prompts.push_back(Prompt::Notice {
                title: "Warning".to_string(),
                message: "This program must be run in administrator mode.".to_string(),
                is_error: false,
            });
        }

        let store: Arc<dyn SettingsStore> = match open_store(config.settings_backend) {
            Ok(store) => store,
            Err(e) => {
                tracing::error!("Failed to open settings store: {:#}", e);
                prompts.push_back(Prompt::Notice {
                    title: "Settings".to_string(),
                    message: format!(
                        "Failed to open the settings store: {:#}\n\nChanges made in this session will not be remembered.",
                        e
                    ),
                    is_error: true,
                });
                Arc::new(MemoryStore::default())
            }
        };

        let catalog = Catalog::builtin();
        let ledger = Arc::new(
            RevertLedger::new(store.clone()).with_persist_attempts(config.persist_attempts()),
        );
        let backend = select_backend(config.dry_run, config.command_timeout());
        let runner: Arc<dyn ActionRunner> = Arc::new(StepRunner::new(backend));
        let locks = Arc::new(KeyLocks::for_catalog(&catalog));

        let dispatcher = Arc::new(ToggleDispatcher::new(
            catalog.clone(),
            runner.clone(),
            ledger.clone(),
            locks.clone(),
        ));
        if let Err(e) = dispatcher.migrate_legacy_entries() {
            tracing::warn!("Failed to migrate legacy revert list entries: {}", e);
        }
        let executor = Arc::new(RevertExecutor::new(
            catalog.clone(),
            runner,
            ledger.clone(),
            locks,
        ));

        let toggles = catalog
            .entries()
            .map(|entry| {
                let on = initial_state(store.as_ref(), &dispatcher, entry);
                (
                    entry.key,
                    ToggleView {
                        entry,
                        on,
                        status: ToggleStatus::Idle,
                    },
                )
            })
            .collect();

        let orchestrator = TaskOrchestrator::new(dispatcher, executor);

        let mut app = Self {
            config,
            catalog,
            store,
            ledger,
            toggles,
            orchestrator,
            pending_reverts: 0,
            revert_in_progress: false,
            prompts,
            active_prompt: None,
            dialogs: Dialogs::new(),
            apps_window_open: false,
            apps: Vec::new(),
            apps_receiver: None,
        };
        app.refresh_pending_reverts();
        app
    }

    fn refresh_pending_reverts(&mut self) {
        match self.ledger.list_all() {
            Ok(pending) => self.pending_reverts = pending.len(),
            Err(e) => tracing::error!("Failed to read revert ledger: {}", e),
        }
    }

    fn notify(&mut self, title: &str, message: String, is_error: bool) {
        self.prompts.push_back(Prompt::Notice {
            title: title.to_string(),
            message,
            is_error,
        });
    }

    fn remember_state(&self, key: &str, on: bool) {
        if let Err(e) = settings::save_toggle_state(self.store.as_ref(), key, on) {
            tracing::warn!("{} -> Failed to save UI state: {:#}", key, e);
        }
    }

    fn submit_toggle(&mut self, key: &'static str, on: bool) {
        if let Some(view) = self.toggles.get_mut(key) {
            view.on = on;
            view.status = ToggleStatus::Busy;
        }
        self.orchestrator.submit(TweakTask::Set {
            key: key.to_string(),
            on,
        });
    }

    /// Applies results received from the orchestrator.
    fn update_toggle_states(&mut self) {
        while let Some(result) = self.orchestrator.try_recv_result() {
            match result {
                TaskResult::Toggled { key, on, result } => self.finish_toggle(&key, on, result),
                TaskResult::Reverted { report, settled } => {
                    self.revert_in_progress = false;
                    match report {
                        Ok(report) => self.finish_revert(&report),
                        Err(e) => {
                            tracing::error!("Revert failed: {}", e);
                            self.notify("Revert", e.to_string(), true);
                        }
                    }
                    if let Err(e) = settled {
                        tracing::error!("Failed to update revert list after sweep: {}", e);
                        self.notify("Revert", e.to_string(), true);
                    }
                }
            }
            self.refresh_pending_reverts();
        }
    }

    fn finish_toggle(&mut self, key: &str, on: bool, result: Result<(), MutationError>) {
        let Some(view) = self.toggles.get_mut(key) else {
            tracing::error!("{} -> Result for a toggle that is not shown.", key);
            return;
        };

        match result {
            Ok(()) => {
                view.on = on;
                view.status = ToggleStatus::Idle;
                tracing::debug!("{} -> Successfully set to {}.", key, on);
                self.remember_state(key, on);
            }
            Err(e @ MutationError::LedgerPersistFailure { .. }) => {
                // the system change went through, only the revert entry is missing
                view.on = on;
                view.status = ToggleStatus::Failed(e.to_string());
                self.remember_state(key, on);
                self.notify("Revert list", e.to_string(), true);
            }
            Err(e) => {
                view.on = !on;
                view.status = ToggleStatus::Failed(e.to_string());
            }
        }
    }

    fn finish_revert(&mut self, report: &RevertReport) {
        for name in &report.succeeded {
            let Some((entry, _)) = self.catalog.action(name) else {
                continue;
            };
            if let Some(view) = self.toggles.get_mut(entry.key) {
                view.on = entry.default_state;
                view.status = ToggleStatus::Idle;
            }
            self.remember_state(entry.key, entry.default_state);
        }

        for (name, error) in &report.failed {
            if let Some((entry, _)) = self.catalog.action(name) {
                if let Some(view) = self.toggles.get_mut(entry.key) {
                    view.status = ToggleStatus::Failed(error.to_string());
                }
            }
        }

        match report.ensure_complete() {
            Ok(()) => self.notify(
                "Revert",
                format!("Reverted {} change(s).", report.succeeded.len()),
                false,
            ),
            Err(e) => {
                let details: Vec<String> = report
                    .failed
                    .iter()
                    .map(|(name, error)| format!("{}: {}", name, error))
                    .collect();
                self.notify("Revert", format!("{}.\n\n{}", e, details.join("\n")), true);
            }
        }
    }

    fn update_apps(&mut self) {
        let Some(receiver) = &self.apps_receiver else {
            return;
        };
        if let Ok(result) = receiver.try_recv() {
            self.apps_receiver = None;
            match result {
                Ok(apps) => {
                    tracing::debug!("Found {} installed apps.", apps.len());
                    self.apps = apps;
                }
                Err(e) => {
                    tracing::error!("Failed to list installed apps: {:#}", e);
                    self.notify("Installed apps", format!("{:#}", e), true);
                }
            }
        }
    }

    fn load_apps(&mut self) {
        let (sender, receiver) = channel::bounded(1);
        thread::spawn(move || {
            if let Err(e) = sender.send(apps::installed_apps(false)) {
                tracing::error!("Failed to send installed apps: {:?}", e);
            }
        });
        self.apps_receiver = Some(receiver);
    }

    /// Shows the next queued prompt and handles the reply to the current one.
    fn process_dialogs(&mut self, ctx: &egui::Context) {
        if self.active_prompt.is_none() {
            if let Some(prompt) = self.prompts.pop_front() {
                add_dialog(&mut self.dialogs, &prompt);
                self.active_prompt = Some(prompt);
            }
        }

        if self.dialogs.dialogs().is_empty() {
            return;
        }
        let Some(res) = self.dialogs.show(ctx) else {
            return;
        };
        let confirmed = matches!(res.reply(), Ok(StandardReply::Yes));

        match self.active_prompt.take() {
            Some(Prompt::ConfirmToggle { key, on, .. }) if confirmed => {
                self.submit_toggle(key, on);
            }
            Some(Prompt::ConfirmRevertAll { .. }) if confirmed => {
                self.revert_in_progress = true;
                self.orchestrator.submit(TweakTask::RevertAll {
                    policy: self.config.after_revert,
                });
            }
            Some(Prompt::ConfirmToggle { key, .. }) => {
                tracing::debug!("{} -> Change cancelled.", key);
            }
            _ => {}
        }
    }

    fn draw_ui(&mut self, ui: &mut egui::Ui) {
        ui.columns(COLUMN_COUNT, |columns| {
            for (i, category) in TweakCategory::iter().enumerate() {
                self.draw_category_section(&mut columns[i % COLUMN_COUNT], category);
            }
        });
    }

    fn draw_category_section(&mut self, ui: &mut egui::Ui, category: TweakCategory) {
        let keys: Vec<&'static str> = self
            .toggles
            .values()
            .filter(|view| view.entry.category == category)
            .map(|view| view.entry.key)
            .collect();

        if keys.is_empty() {
            return;
        }

        ui.heading(category.to_string());
        ui.separator();

        for key in keys {
            egui::Frame::none()
                .fill(egui::Color32::TRANSPARENT)
                .stroke(egui::Stroke::NONE)
                .show(ui, |ui| {
                    ui.set_width(TWEAK_CONTAINER_WIDTH);
                    self.draw_toggle_row(ui, key);
                });
        }

        ui.add_space(UI_SPACING);
    }

    fn draw_toggle_row(&mut self, ui: &mut egui::Ui, key: &'static str) {
        let Some(view) = self.toggles.get(key) else {
            return;
        };
        let name = view.entry.name;
        let error = match &view.status {
            ToggleStatus::Failed(err) => Some(err.clone()),
            _ => None,
        };

        egui::Grid::new(format!("toggle_grid_{}", key))
            .num_columns(2)
            .striped(false)
            .min_col_width(TWEAK_CONTAINER_WIDTH - BUTTON_SIZE[0] - UI_SPACING * 2.0)
            .spacing([UI_SPACING, 0.0])
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(name).on_hover_text(key);
                    if let Some(err) = &error {
                        ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    self.draw_toggle_widget(ui, key);
                });

                ui.end_row();
            });
    }

    fn draw_toggle_widget(&mut self, ui: &mut egui::Ui, key: &'static str) {
        let Some(view) = self.toggles.get(key) else {
            return;
        };

        let mut is_enabled = view.on;
        let has_error = matches!(view.status, ToggleStatus::Failed(_));
        let busy = view.status == ToggleStatus::Busy || self.revert_in_progress;

        let response = ui.add(
            ToggleSwitch::new(&mut is_enabled)
                .with_error(has_error)
                .busy(busy),
        );
        if busy {
            ui.add(egui::widgets::Spinner::new());
        }

        if response.changed() {
            let entry = view.entry;
            match entry.confirmation {
                Some(question) if entry.leaves_default(is_enabled) => {
                    self.prompts.push_back(Prompt::ConfirmToggle {
                        key,
                        on: is_enabled,
                        question,
                    });
                }
                _ => self.submit_toggle(key, is_enabled),
            }
        }
    }

    fn draw_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(TWEAK_CONTAINER_HEIGHT)
            .max_height(TWEAK_CONTAINER_HEIGHT)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .inner_margin(egui::Margin::same(UI_PADDING))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                                    .font(FontId::proportional(LABEL_FONT_SIZE)),
                            );
                            ui.separator();

                            let pending = self.pending_reverts;
                            ui.label(
                                RichText::new(format!(
                                    "{} change{} pending revert",
                                    pending,
                                    if pending != 1 { "s" } else { "" }
                                ))
                                .font(FontId::proportional(LABEL_FONT_SIZE)),
                            );
                            if self.config.dry_run {
                                ui.separator();
                                ui.label(
                                    RichText::new("Dry run")
                                        .font(FontId::proportional(LABEL_FONT_SIZE)),
                                );
                            }

                            ui.separator();
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    let revert_button = Button::new(if self.revert_in_progress {
                                        "Reverting..."
                                    } else {
                                        "Revert all changes"
                                    })
                                    .min_size(BUTTON_SIZE.into());
                                    if ui
                                        .add_enabled(
                                            pending > 0 && !self.revert_in_progress,
                                            revert_button,
                                        )
                                        .clicked()
                                    {
                                        self.prompts
                                            .push_back(Prompt::ConfirmRevertAll { pending });
                                    }

                                    if ui
                                        .add(Button::new("Installed apps").min_size(BUTTON_SIZE.into()))
                                        .clicked()
                                    {
                                        self.apps_window_open = true;
                                        if self.apps.is_empty() && self.apps_receiver.is_none() {
                                            self.load_apps();
                                        }
                                    }
                                },
                            );
                        });
                    });
            });
    }

    fn draw_apps_window(&mut self, ctx: &egui::Context) {
        let loading = self.apps_receiver.is_some();
        let apps = &self.apps;
        egui::Window::new("Installed apps")
            .open(&mut self.apps_window_open)
            .default_height(WINDOW_HEIGHT / 2.0)
            .show(ctx, |ui| {
                if loading {
                    ui.add(egui::widgets::Spinner::new());
                    return;
                }
                if apps.is_empty() {
                    ui.label("No applications found.");
                    return;
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for app in apps {
                        ui.horizontal(|ui| {
                            ui.label(app.name.as_str());
                            ui.weak(if app.is_win32 { "desktop" } else { "store" });
                        });
                    }
                });
            });
    }
}

impl App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.update_toggle_states();
        self.update_apps();

        self.process_dialogs(ctx);

        self.draw_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.draw_ui(ui);
                });
        });
        if self.apps_window_open {
            self.draw_apps_window(ctx);
        }

        if self.revert_in_progress
            || self.apps_receiver.is_some()
            || self.toggles.values().any(|view| view.status == ToggleStatus::Busy)
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

fn add_dialog(dialogs: &mut Dialogs<'static>, prompt: &Prompt) {
    match prompt {
        Prompt::Notice {
            title,
            message,
            is_error: true,
        } => {
            dialogs.add(DialogDetails::new(
                StandardDialog::error(title.clone(), message.clone())
                    .buttons(vec![("OK".into(), StandardReply::Ok)]),
            ));
        }
        Prompt::Notice { title, message, .. } => {
            dialogs.add(DialogDetails::new(
                StandardDialog::info(title.clone(), message.clone())
                    .buttons(vec![("OK".into(), StandardReply::Ok)]),
            ));
        }
        Prompt::ConfirmToggle { question, .. } => {
            dialogs.add(DialogDetails::new(
                StandardDialog::confirm("Confirm", *question).buttons(vec![
                    ("Continue".into(), StandardReply::Yes),
                    ("Cancel".into(), StandardReply::Cancel),
                ]),
            ));
        }
        Prompt::ConfirmRevertAll { pending } => {
            dialogs.add(DialogDetails::new(
                StandardDialog::confirm(
                    "Revert all changes",
                    format!(
                        "Restore Windows defaults for {} pending change{}?",
                        pending,
                        if *pending != 1 { "s" } else { "" }
                    ),
                )
                .buttons(vec![
                    ("Revert".into(), StandardReply::Yes),
                    ("Cancel".into(), StandardReply::Cancel),
                ]),
            ));
        }
    }
}

/// Stored UI state if there is one, else what the revert ledger implies.
fn initial_state(
    store: &dyn SettingsStore,
    dispatcher: &ToggleDispatcher,
    entry: &ToggleEntry,
) -> bool {
    match settings::load_toggle_state(store, entry.key) {
        Ok(Some(on)) => return on,
        Ok(None) => {}
        Err(e) => tracing::warn!("{} -> Failed to read stored UI state: {:#}", entry.key, e),
    }
    match dispatcher.current_state(entry.key) {
        Ok(Some(on)) => on,
        Ok(None) => entry.default_state,
        Err(e) => {
            tracing::warn!("{} -> {}", entry.key, e);
            entry.default_state
        }
    }
}

#[cfg(windows)]
fn is_elevated() -> bool {
    tunex::utils::windows::is_elevated()
}

#[cfg(not(windows))]
fn is_elevated() -> bool {
    true
}

fn main() -> eframe::Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging based on build mode
    #[cfg(debug_assertions)]
    {
        tracing_subscriber::fmt()
            .with_max_level(config.tracing_level())
            .with_target(false)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        // In release mode, set up a no-op subscriber to disable logging
        use tracing_subscriber::Registry;
        let noop_subscriber = Registry::default();
        tracing::subscriber::set_global_default(noop_subscriber)
            .expect("Failed to set global subscriber.");
    }

    if let Some(e) = &config_error {
        tracing::error!("{}", e);
    }
    tracing::debug!("Loaded config: {:?}", config);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT / 2.0]),
        ..Default::default()
    };

    let run_span = tracing::span!(Level::INFO, "Run Native");
    run_span.in_scope(|| {
        eframe::run_native(
            APP_NAME,
            options,
            Box::new(|cc| Ok(Box::new(MyApp::new(cc, config, config_error)))),
        )
    })
}
