//! Board output in table, JSON or YAML form

use crate::cli::OutputFormat;
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;
use taskdeck_board::store::ProjectView;
use taskdeck_board::{BoardSnapshot, Task};

/// Write `value` as JSON or YAML, or hand off to `table` for the table format
pub fn write_output<T, F>(out: &mut dyn Write, format: OutputFormat, value: &T, table: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        OutputFormat::Yaml => write!(out, "{}", serde_yaml_ng::to_string(value)?)?,
        OutputFormat::Table => table(out)?,
    }
    Ok(())
}

/// One table per project: a column per board column, a row per card position
pub fn write_board(out: &mut dyn Write, board: &BoardSnapshot) -> Result<()> {
    if board.projects.is_empty() {
        writeln!(out, "Board is empty")?;
        return Ok(());
    }
    for project in &board.projects {
        writeln!(out, "{} ({})", project.name, project.id)?;
        writeln!(out, "{}", project_table(project))?;
    }
    Ok(())
}

fn project_table(project: &ProjectView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        project
            .columns
            .iter()
            .map(|column| Cell::new(format!("{} ({})", column.title, column.tasks.len()))),
    );

    let rows = project
        .columns
        .iter()
        .map(|column| column.tasks.len())
        .max()
        .unwrap_or(0);
    for row in 0..rows {
        table.add_row(project.columns.iter().map(|column| {
            column
                .tasks
                .get(row)
                .map(card_label)
                .unwrap_or_default()
        }));
    }
    table
}

fn card_label(task: &Task) -> String {
    let mut label = format!("{} [{}]", task.title, task.priority);
    if !task.subtasks.is_empty() {
        let done = task.subtasks.iter().filter(|s| s.completed).count();
        label.push_str(&format!(" {done}/{}", task.subtasks.len()));
    }
    label
}
