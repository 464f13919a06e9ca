//! Gesture scripts: pointer steps addressed by card and column names
//!
//! ```yaml
//! - press: Quiz engine
//! - move: In Progress
//! - release
//! ```

use crate::layout::BoardLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use taskdeck_board::{BoardStore, ColumnId, TaskId};
use taskdeck_drag::Point;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("no task or column named '{0}'")]
    UnknownName(String),

    #[error("no card under the pointer at ({x}, {y})")]
    NothingToPress { x: f64, y: f64 },

    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML script: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Where a step points: raw coordinates, or a task/column by id or title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Locator {
    Point { x: f64, y: f64 },
    Name(String),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Point { x, y } => write!(f, "({x}, {y})"),
            Locator::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureStep {
    Press(Locator),
    Move(Locator),
    /// Move to the locator, then release there
    Drop(Locator),
    Release,
    Cancel,
}

impl fmt::Display for GestureStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureStep::Press(at) => write!(f, "press {at}"),
            GestureStep::Move(at) => write!(f, "move {at}"),
            GestureStep::Drop(at) => write!(f, "drop {at}"),
            GestureStep::Release => f.write_str("release"),
            GestureStep::Cancel => f.write_str("cancel"),
        }
    }
}

/// Steps read as single-key maps (`press: t1`) in YAML as well as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GestureScript {
    #[serde(with = "serde_yaml_ng::with::singleton_map_recursive")]
    pub steps: Vec<GestureStep>,
}

impl GestureScript {
    pub fn from_yaml(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a script file, JSON for `.json` and YAML otherwise
    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&text),
            _ => Self::from_yaml(&text),
        }
    }
}

/// What a name refers to on the current board
#[derive(Debug, Clone, PartialEq)]
pub enum Named {
    Task(TaskId),
    Column(ColumnId),
}

/// Look a name up as a task id, column id, task title, then column title.
/// Titles match case-insensitively; the first in board order wins.
pub fn lookup(store: &BoardStore, name: &str) -> Option<Named> {
    let task_id = TaskId::from(name);
    if store.task(&task_id).is_some() {
        return Some(Named::Task(task_id));
    }
    let column_id = ColumnId::from(name);
    if store.column(&column_id).is_some() {
        return Some(Named::Column(column_id));
    }
    let columns: Vec<_> = store
        .projects()
        .flat_map(|project| store.project_columns(&project.id))
        .collect();
    let task = columns
        .iter()
        .flat_map(|column| store.column_tasks(&column.id))
        .find(|task| task.title.eq_ignore_ascii_case(name));
    if let Some(task) = task {
        return Some(Named::Task(task.id.clone()));
    }
    columns
        .iter()
        .find(|column| column.title.eq_ignore_ascii_case(name))
        .map(|column| Named::Column(column.id.clone()))
}

/// Screen point for a locator: a card's center, or the center of a column's free slot
pub fn locate(store: &BoardStore, layout: &BoardLayout, at: &Locator) -> Result<Point, ScriptError> {
    match at {
        Locator::Point { x, y } => Ok(Point::new(*x, *y)),
        Locator::Name(name) => {
            let rect = match lookup(store, name) {
                Some(Named::Task(task)) => layout.card_rect(&task),
                Some(Named::Column(column)) => layout.slot_rect(&column),
                None => None,
            };
            rect.map(|rect| rect.center())
                .ok_or_else(|| ScriptError::UnknownName(name.clone()))
        }
    }
}

/// The card a press lands on and the point it lands at
pub fn press_target(
    store: &BoardStore,
    layout: &BoardLayout,
    at: &Locator,
) -> Result<(TaskId, Point), ScriptError> {
    match at {
        Locator::Point { x, y } => {
            let point = Point::new(*x, *y);
            layout
                .card_at(point)
                .map(|task| (task, point))
                .ok_or(ScriptError::NothingToPress { x: *x, y: *y })
        }
        Locator::Name(name) => match lookup(store, name) {
            Some(Named::Task(task)) => {
                let rect = layout
                    .card_rect(&task)
                    .ok_or_else(|| ScriptError::UnknownName(name.clone()))?;
                Ok((task, rect.center()))
            }
            _ => Err(ScriptError::UnknownName(name.clone())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutConfig;
    use taskdeck_board::BoardSeed;

    fn store() -> BoardStore {
        BoardSeed::from_yaml(
            r#"
projects:
  - name: Board
    columns:
      - id: todo
        title: To Do
        tasks:
          - id: t1
            title: Write docs
          - title: Done
      - id: done
        title: Done
"#,
        )
        .unwrap()
        .build()
        .unwrap()
    }

    #[test]
    fn test_parse_yaml_script() {
        let script = GestureScript::from_yaml(
            "- press: Write docs\n- move: {x: 300, y: 60}\n- drop: done\n- release\n- cancel\n",
        )
        .unwrap();
        assert_eq!(
            script.steps,
            vec![
                GestureStep::Press(Locator::Name("Write docs".into())),
                GestureStep::Move(Locator::Point { x: 300.0, y: 60.0 }),
                GestureStep::Drop(Locator::Name("done".into())),
                GestureStep::Release,
                GestureStep::Cancel,
            ]
        );
    }

    #[test]
    fn test_yaml_script_file_with_map_steps() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("drag.yaml");
        std::fs::write(&path, "- press: t1\n- move:\n    x: 320\n    y: 65\n- drop: done\n- release\n").unwrap();

        let script = GestureScript::from_path(&path).unwrap();

        assert_eq!(script.steps[0], GestureStep::Press(Locator::Name("t1".into())));
        assert_eq!(script.steps[1], GestureStep::Move(Locator::Point { x: 320.0, y: 65.0 }));
        assert_eq!(script.steps[2], GestureStep::Drop(Locator::Name("done".into())));
        assert_eq!(script.steps[3], GestureStep::Release);
    }

    #[test]
    fn test_parse_json_script() {
        let script = GestureScript::from_json(r#"[{"press": "t1"}, "release"]"#).unwrap();
        assert_eq!(script.steps.len(), 2);
        assert_eq!(script.steps[1].to_string(), "release");
    }

    #[test]
    fn test_lookup_prefers_ids_then_titles() {
        let store = store();
        assert_eq!(lookup(&store, "t1"), Some(Named::Task("t1".into())));
        assert_eq!(lookup(&store, "write DOCS"), Some(Named::Task("t1".into())));
        // a task titled "Done" shadows the column title, but not the column id
        assert!(matches!(lookup(&store, "Done"), Some(Named::Task(_))));
        assert_eq!(lookup(&store, "done"), Some(Named::Column("done".into())));
        assert_eq!(lookup(&store, "nothing"), None);
    }

    #[test]
    fn test_locate_column_uses_free_slot() {
        let store = store();
        let layout = BoardLayout::build(&store, &LayoutConfig::default());
        let point = locate(&store, &layout, &Locator::Name("To Do".into())).unwrap();
        assert_eq!(point, layout.slot_rect(&"todo".into()).unwrap().center());
    }

    #[test]
    fn test_press_needs_a_card() {
        let store = store();
        let layout = BoardLayout::build(&store, &LayoutConfig::default());

        let (task, point) = press_target(&store, &layout, &Locator::Name("t1".into())).unwrap();
        assert_eq!(task, TaskId::from("t1"));
        assert_eq!(point, layout.card_rect(&task).unwrap().center());

        let err = press_target(&store, &layout, &Locator::Name("done".into())).unwrap_err();
        assert!(matches!(err, ScriptError::UnknownName(_)));
        let err = press_target(&store, &layout, &Locator::Point { x: 5000.0, y: 0.0 }).unwrap_err();
        assert!(matches!(err, ScriptError::NothingToPress { .. }));
    }
}
