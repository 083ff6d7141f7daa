//! Main window

use crate::app::StoriesApp;
use crate::client::StoryFetcher;
use crate::config::AppConfig;
use crate::gui::storage::EframeStore;
use crate::list::StoryList;
use crate::story::Story;
use eframe::egui;
use std::sync::Arc;

pub struct StoriesGui {
    stories: StoriesApp<EframeStore>,
    /// Focus the search input on the first frame
    focus_pending: bool,
}

impl StoriesGui {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        fetcher: Arc<dyn StoryFetcher>,
    ) -> Self {
        let store = EframeStore::restore(cc.storage, &[config.storage_key.as_str()]);

        // Wake the UI when a worker posts its result
        let ctx = cc.egui_ctx.clone();
        let mut stories = StoriesApp::new(store, config, fetcher)
            .with_notifier(Arc::new(move || ctx.request_repaint()));
        stories.mount();

        Self {
            stories,
            focus_pending: config.auto_focus,
        }
    }

    fn render_search_form(&mut self, ui: &mut egui::Ui) {
        let mut submitted = false;
        ui.horizontal(|ui| {
            ui.strong("Search:");

            let mut term = self.stories.term().to_string();
            let response = ui.add(
                egui::TextEdit::singleline(&mut term)
                    .desired_width(ui.available_width() - 90.0)
                    .hint_text("Type to search..."),
            );
            if self.focus_pending {
                response.request_focus();
                self.focus_pending = false;
            }
            if response.changed() {
                self.stories.search_mut().input(term);
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = true;
            }

            let can_submit = self.stories.search().can_submit();
            if ui.add_enabled(can_submit, egui::Button::new("Submit")).clicked() {
                submitted = true;
            }
        });

        if submitted {
            self.stories.submit();
        }
    }

    fn render_stories(&mut self, ui: &mut egui::Ui) {
        let mut removed: Option<Story> = None;
        {
            let mut list = StoryList::new(&self.stories.state().data, |story: &Story| {
                removed = Some(story.clone());
            });

            let mut dismiss_index = None;
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("stories")
                    .striped(true)
                    .num_columns(5)
                    .show(ui, |ui| {
                        for (index, row) in list.rows().enumerate() {
                            if row.url.is_empty() {
                                ui.label(row.title);
                            } else {
                                ui.hyperlink_to(row.title, row.url);
                            }
                            ui.label(row.author);
                            ui.label(row.num_comments.to_string());
                            ui.label(row.points.to_string());
                            if ui.button("Dismiss").clicked() {
                                dismiss_index = Some(index);
                            }
                            ui.end_row();
                        }
                    });
            });

            if let Some(index) = dismiss_index {
                list.dismiss(index);
            }
        }

        if let Some(story) = removed {
            self.stories.dismiss(&story);
        }
    }
}

impl eframe::App for StoriesGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.stories.process_messages();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("My Hacker Stories");
            self.render_search_form(ui);
            ui.separator();

            let state = self.stories.state();
            if state.is_error() {
                ui.colored_label(egui::Color32::RED, "Something went wrong ...");
            }
            if state.is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading ...");
                });
            } else {
                self.render_stories(ui);
            }
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.stories.search_mut().store_mut().save_into(storage);
    }
}
