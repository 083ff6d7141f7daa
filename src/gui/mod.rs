pub mod app;
pub mod storage;

use crate::client::StoryFetcher;
use crate::config::AppConfig;
use crate::StoriesError;
use std::sync::Arc;

/// Entry point: launch the native window
pub fn run(config: AppConfig, fetcher: Arc<dyn StoryFetcher>) -> crate::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("My Hacker Stories")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "hacker-stories",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::StoriesGui::new(cc, &config, fetcher)))),
    )
    .map_err(|e| StoriesError::Terminal(format!("GUI error: {}", e)))
}
