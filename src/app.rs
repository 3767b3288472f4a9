use std::sync::Arc;

use anyhow::{Context, Result};

use crate::catalog::{self, CatalogService};
use crate::comments::{CommentSource, FixtureCommentSource};
use crate::config;
use crate::controller::Controller;
use crate::notify::{self, Notify};
use crate::session;
use crate::storage;
use crate::ui;

pub fn run() -> Result<()> {
    let cfg = config::load(config::LoadOptions::default()).context("load config")?;
    let config_path = config::default_path();
    let display_path = friendly_path(config_path.as_ref());

    // Storage is best-effort: without it the session simply is not
    // remembered across restarts.
    let store = storage::Store::open(storage::Options {
        path: cfg.storage.path.clone(),
    })
    .map(Arc::new)
    .ok();

    let session = session::Manager::new(store);
    let catalog: Arc<dyn CatalogService> =
        Arc::new(catalog::MockCatalogService::new(cfg.catalog.shuffle_recommended));
    let comment_source: Arc<dyn CommentSource> = Arc::new(FixtureCommentSource);
    let notifications = notify::Notifications::new();
    let notifier: Arc<dyn Notify> = Arc::new(notifications.clone());

    let mut controller = Controller::new(
        catalog,
        comment_source,
        notifier,
        session,
        cfg.catalog.recommended_limit,
    );
    controller.initialize();

    let options = ui::Options {
        controller,
        notifications,
        toast_ttl: cfg.ui.toast_ttl,
        theme: cfg.ui.theme.clone(),
        config_path: display_path,
    };

    let mut model = ui::Model::new(options);
    model.run()?;

    Ok(())
}

fn friendly_path(path: Option<&std::path::PathBuf>) -> String {
    if let Some(path) = path {
        if let Some(home) = dirs::home_dir() {
            if let Ok(stripped) = path.strip_prefix(&home) {
                let mut display = String::from("~");
                if !stripped.as_os_str().is_empty() {
                    display.push_str(&format!("/{}", stripped.display()));
                }
                return display;
            }
        }
        path.display().to_string()
    } else {
        "~/.config/vidstream/config.yaml".to_string()
    }
}
