//! Headless run: load, optionally replay pointer input, report.

use crate::cli::CliArgs;
use kurbo::Size;
use serde::Serialize;
use std::path::{Path, PathBuf};
use symdock_core::input::parse_script;
use symdock_core::{
    ActionEntry, DisplayList, EditorConfig, EditorError, EditorState, RecordingHost, Session,
};
use thiserror::Error;

/// Errors that stop a headless run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(serde_json::Error),
    #[error("Invalid pointer script: {0}")]
    Script(serde_json::Error),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("Failed to write output: {0}")]
    Output(serde_json::Error),
}

/// What a run prints.
#[derive(Debug, Serialize)]
pub struct Report {
    pub state: EditorState,
    pub actions: Vec<ActionEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paint: Option<DisplayList>,
}

fn read(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Execute one run and return the report.
pub fn run(args: &CliArgs) -> Result<Report, AppError> {
    let mut config = match &args.config {
        Some(path) => EditorConfig::from_json(&read(path)?).map_err(AppError::Config)?,
        None => EditorConfig::default(),
    };
    let script = match &args.script {
        Some(path) => parse_script(&read(path)?).map_err(AppError::Script)?,
        None => Vec::new(),
    };
    // pointer input is only wired up when there is some to replay
    config.text_entry = script.is_empty();

    let mut session = Session::new(config, RecordingHost::default())?;
    if let Some(path) = &args.spec {
        session.forest_mut().load_json(&read(path)?);
    }
    log::info!("Loaded {} roots", session.forest().roots().len());

    for event in script {
        session.handle_pointer(event);
    }
    if args.centre {
        session.centre(Size::new(args.width, args.height));
    }
    let state = match &args.input {
        Some(text) => session.set_user_input(text.clone()),
        None => session.update_state(),
    };
    let paint = args.paint.then(|| {
        let mut list = DisplayList::default();
        session.paint(&mut list);
        list
    });
    Ok(Report {
        state,
        actions: session.host().actions.clone(),
        paint,
    })
}

/// Run and render the report as pretty JSON.
pub fn run_to_json(args: &CliArgs) -> Result<String, AppError> {
    let report = run(args)?;
    serde_json::to_string_pretty(&report).map_err(AppError::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;
    use symdock_core::ActionEvent;

    const TREE: &str = r#"{"type": "Num", "properties": {"significand": "2"},
        "children": {"right": {"type": "Symbol", "properties": {"letter": "x"}}},
        "position": {"x": 100.0, "y": 100.0}}"#;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_run_renders_spec() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            spec: Some(write(dir.path(), "tree.json", TREE)),
            ..CliArgs::default()
        };
        let report = run(&args).unwrap();
        let result = report.state.result.unwrap();
        assert_eq!(result.python, "2*x");
        assert_eq!(result.tex, "2 x");
        assert!(report.state.text_entry);
        assert!(report.paint.is_none());
    }

    #[test]
    fn test_malformed_spec_gives_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            spec: Some(write(dir.path(), "tree.json", "[{\"type\": ")),
            ..CliArgs::default()
        };
        let json: Value = serde_json::from_str(&run_to_json(&args).unwrap()).unwrap();
        assert!(json["state"]["result"].is_null());
        assert_eq!(json["state"]["symbols"], Value::Array(vec![]));
    }

    #[test]
    fn test_config_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            config: Some(write(dir.path(), "config.json", "{\"mode\": 7}")),
            ..CliArgs::default()
        };
        assert!(matches!(run(&args), Err(AppError::Config(_))));

        let args = CliArgs {
            spec: Some(dir.path().join("absent.json")),
            ..CliArgs::default()
        };
        assert!(matches!(run(&args), Err(AppError::Io { .. })));

        let args = CliArgs {
            config: Some(write(
                dir.path(),
                "fonts.json",
                r#"{"italic_font": "/nonexistent/i.ttf", "regular_font": "/nonexistent/r.ttf"}"#,
            )),
            ..CliArgs::default()
        };
        assert!(matches!(run(&args), Err(AppError::Editor(EditorError::FontLoad { .. }))));
    }

    #[test]
    fn test_script_replay_drops_widget() {
        let dir = tempfile::tempdir().unwrap();
        let tree = r#"{"type": "Symbol", "properties": {"letter": "y"}, "position": {"x": 100.0, "y": 100.0}}"#;
        // grab just right of the anchor, inside the glyph box
        let script = r#"[{"Down": {"position": {"x": 105.0, "y": 100.0}}},
            {"Move": {"position": {"x": 305.0, "y": 200.0}}},
            {"Up": {"position": {"x": 305.0, "y": 200.0}}}]"#;
        let args = CliArgs {
            spec: Some(write(dir.path(), "tree.json", tree)),
            script: Some(write(dir.path(), "script.json", script)),
            ..CliArgs::default()
        };
        let report = run(&args).unwrap();
        let events: Vec<ActionEvent> = report.actions.iter().map(|a| a.event).collect();
        assert_eq!(events, vec![ActionEvent::DragStart, ActionEvent::DropSymbol]);
        assert!(!report.state.text_entry);
        let position = report.state.symbols[0].position.unwrap();
        assert!((position.x - 300.0).abs() < 1e-9);
        assert!((position.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_paint_and_input() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            spec: Some(write(dir.path(), "tree.json", TREE)),
            paint: true,
            centre: true,
            width: 1280.0,
            height: 800.0,
            input: Some("2x".into()),
            ..CliArgs::default()
        };
        let report = run(&args).unwrap();
        assert_eq!(report.state.user_input.as_deref(), Some("2x"));
        assert!(!report.paint.unwrap().commands.is_empty());
        assert_eq!(report.actions.last().map(|a| a.event), Some(ActionEvent::CentreSymbols));
    }
}
