//! Application shell: configuration, persistence and the final frame.

use crate::AppError;
use crate::replay::{Replay, Script};
use seatplan_core::{Editor, EditorConfig, FileStorage, FloorPlan, Storage};
use seatplan_render::{GridStyle, RecordingRenderer, RenderContext, Renderer, Scene, color_or};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Session script to replay.
    pub script: PathBuf,
    /// Editor config file; defaults when absent.
    pub config: Option<PathBuf>,
    /// Plan directory; the platform data dir when absent.
    pub out: Option<PathBuf>,
    /// Name the plan is stored under.
    pub name: String,
    /// Hex background color of the final frame.
    pub background: Option<String>,
    /// Draw the grid in the final frame.
    pub grid: bool,
}

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub plan: FloorPlan,
    pub scene: Scene,
    pub saves: usize,
    pub location: PathBuf,
}

impl RunSummary {
    pub fn describe(&self) -> String {
        format!(
            "{} seats, {} shapes, {} texts; {} draw commands; saved {} time(s) to {}",
            self.plan.seats.len(),
            self.plan.shapes.len(),
            self.plan.texts.len(),
            self.scene.len(),
            self.saves,
            self.location.display()
        )
    }
}

/// The replay application.
pub struct App;

impl App {
    /// Load config, resume the stored plan if any, replay the script, save
    /// and render the final frame.
    pub fn run(config: &AppConfig) -> Result<RunSummary, AppError> {
        let editor_config = match &config.config {
            Some(path) => EditorConfig::load(path)?,
            None => EditorConfig::default(),
        };
        let script = Script::load(&config.script)?;

        let storage = match &config.out {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        let location = storage.base_path().to_path_buf();

        let plan = if pollster::block_on(storage.exists(&config.name))? {
            log::info!("Resuming plan '{}' from {}", config.name, location.display());
            pollster::block_on(storage.load(&config.name))?
        } else {
            FloorPlan::with_name(config.name.clone())
        };

        let mut replay = Replay::new(Editor::with_plan(plan, editor_config), Some(&storage), config.name.clone());
        replay.run(&script)?;
        replay.save_all()?;
        let saves = replay.saves();
        let editor = replay.into_editor();

        let grid = if config.grid { GridStyle::Lines } else { GridStyle::None };
        let ctx = RenderContext::new(&editor).with_grid(grid);
        let background = color_or(config.background.as_deref(), ctx.background_color);
        let mut renderer = RecordingRenderer::new();
        renderer.build_scene(&ctx.with_background(background));
        let scene = renderer.take_scene()?;

        Ok(RunSummary {
            plan: editor.plan,
            scene,
            saves,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatplan_render::Layer;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn config(dir: &TempDir, script: &str) -> AppConfig {
        AppConfig {
            script: write(dir, "session.json", script),
            config: None,
            out: Some(dir.path().join("plans")),
            name: "hall".to_string(),
            background: None,
            grid: true,
        }
    }

    const SEATS: &str = r#"{ "steps": [
        { "op": "tool", "tool": "PlaceSeat" },
        { "op": "click", "at": { "x": 50.0, "y": 50.0 } },
        { "op": "click", "at": { "x": 100.0, "y": 50.0 } }
    ] }"#;

    #[test]
    fn test_run_saves_and_renders() {
        let dir = TempDir::new().unwrap();
        let summary = App::run(&config(&dir, SEATS)).unwrap();
        assert_eq!(summary.plan.seats.len(), 2);
        assert_eq!(summary.saves, 1);
        assert!(!summary.scene.is_empty());
        assert!(dir.path().join("plans").join("hall.json").exists());
        assert!(summary.describe().starts_with("2 seats"));
    }

    #[test]
    fn test_run_frame_options() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, SEATS);
        config.background = Some("#202020".to_string());
        config.grid = false;
        let summary = App::run(&config).unwrap();
        let bg = summary.scene.background.to_rgba8();
        assert_eq!((bg.r, bg.g, bg.b, bg.a), (0x20, 0x20, 0x20, 0xff));
        assert_eq!(summary.scene.layer(Layer::Grid).count(), 0);
        assert_eq!(summary.scene.layer(Layer::Seats).count(), 2);
    }

    #[test]
    fn test_run_resumes_stored_plan() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, SEATS);
        App::run(&config).unwrap();
        let summary = App::run(&config).unwrap();
        assert_eq!(summary.plan.seats.len(), 4);
        let ids: std::collections::HashSet<u64> = summary.plan.seats.iter().map(|s| s.id.0).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_run_with_config_file() {
        let dir = TempDir::new().unwrap();
        let script = r#"{ "steps": [
            { "op": "tool", "tool": "PlaceSeat" },
            { "op": "click", "at": { "x": 70.0, "y": 30.0 } }
        ] }"#;
        let mut config = config(&dir, script);
        config.config = Some(write(&dir, "editor.json", r#"{ "grid_size": 50.0 }"#));
        let summary = App::run(&config).unwrap();
        assert_eq!(summary.plan.seats[0].position, kurbo::Point::new(50.0, 50.0));
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, SEATS);
        config.config = Some(write(&dir, "editor.json", r#"{ "min_scale": 0.0 }"#));
        assert!(matches!(App::run(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_run_missing_script() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, SEATS);
        config.script = dir.path().join("nope.json");
        assert!(matches!(App::run(&config), Err(AppError::ScriptIo { .. })));
    }
}
