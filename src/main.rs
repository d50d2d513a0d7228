use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use nujan::kernel::services::adapters::{ensure_settings_file, SettingsService};
use nujan::kernel::{ActivityLog, LogKind, WorkspaceStore};
use nujan::models::{default_template, template_from_dir, Project};
use serde_json::json;
use uuid::Uuid;

mod logging;

fn project_name(dir: Option<&Path>) -> String {
    dir.and_then(|d| d.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string())
}

fn run(dir: Option<&Path>, activity: &mut ActivityLog) -> Result<serde_json::Value, Box<dyn Error>> {
    let settings = match ensure_settings_file().and_then(|path| SettingsService::load_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "settings unavailable, using defaults");
            SettingsService::new()
        }
    };

    let template = match dir {
        Some(dir) => template_from_dir(dir)?,
        None => default_template(),
    };

    let mut store = WorkspaceStore::new();
    store.subscribe(|state| {
        tracing::debug!(
            projects = state.projects().len(),
            open_files = state.open_files().len(),
            "workspace changed"
        );
    });

    let project = Project::new(Uuid::new_v4().to_string(), project_name(dir));
    let project_id = project.id.clone();
    store.create_new_project(project, template)?;
    activity.create_log(
        format!("Project {} created", project_name(dir)),
        LogKind::Success,
    );

    let first_file = store
        .project_files(&project_id)
        .iter()
        .find(|node| !node.is_dir())
        .map(|node| node.id.clone());
    if let Some(id) = first_file {
        store.open_file(&id, &project_id)?;
    }

    Ok(json!({
        "workspace": store.state(),
        "settings": settings.settings(),
    }))
}

fn main() -> ExitCode {
    let mut logging = logging::init();
    let activity_rx = logging.as_mut().and_then(|guard| guard.take_activity_rx());

    let dir = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let mut activity = ActivityLog::default();

    let result = run(dir.as_deref(), &mut activity);
    if let Some(rx) = activity_rx.as_ref() {
        activity.drain_channel(rx);
    }

    match result {
        Ok(mut snapshot) => {
            snapshot["activity"] = json!(activity.entries().collect::<Vec<_>>());
            if let Some(logging) = logging.as_ref() {
                snapshot["logDir"] = json!(logging.dir().display().to_string());
            }
            match serde_json::to_string_pretty(&snapshot) {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("nujan: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("nujan: {e}");
            ExitCode::FAILURE
        }
    }
}
