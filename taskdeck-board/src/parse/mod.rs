//! Forgiving input parsing for board operations
//!
//! Accepts a single JSON object or an array of them and normalizes each into a
//! [`BoardOp`]. The operation may be named by an `"op": "verb noun"` string, by separate
//! `verb`/`noun` fields, by shorthand (`{"move": "task", ...}`), or inferred from the
//! keys present.

use crate::column::{AddColumn, DeleteColumn, ListColumns, UpdateColumn};
use crate::command::CommandResult;
use crate::error::{BoardError, Result};
use crate::project::{AddProject, DeleteProject};
use crate::store::BoardStore;
use crate::task::{AddTask, DeleteTask, GetTask, ListTasks, MoveTask, UpdateTask};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use taskdeck_operations::{Execute, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Add,
    Update,
    Delete,
    Get,
    List,
    Move,
}

impl Verb {
    /// Resolve a verb or one of its aliases
    pub fn from_alias(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "add" | "create" | "new" => Some(Verb::Add),
            "update" | "edit" | "set" | "rename" => Some(Verb::Update),
            "delete" | "remove" | "rm" | "del" => Some(Verb::Delete),
            "get" | "show" | "read" => Some(Verb::Get),
            "list" | "ls" => Some(Verb::List),
            "move" | "mv" => Some(Verb::Move),
            _ => None,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verb::Add => "add",
            Verb::Update => "update",
            Verb::Delete => "delete",
            Verb::Get => "get",
            Verb::List => "list",
            Verb::Move => "move",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Noun {
    Project,
    Column,
    Columns,
    Task,
    Tasks,
}

impl FromStr for Noun {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "project" | "board" => Ok(Noun::Project),
            "column" | "col" => Ok(Noun::Column),
            "columns" | "cols" => Ok(Noun::Columns),
            "task" | "card" => Ok(Noun::Task),
            "tasks" | "cards" => Ok(Noun::Tasks),
            other => Err(BoardError::parse(format!("unknown noun: {}", other))),
        }
    }
}

impl fmt::Display for Noun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Noun::Project => "project",
            Noun::Column => "column",
            Noun::Columns => "columns",
            Noun::Task => "task",
            Noun::Tasks => "tasks",
        })
    }
}

/// A parsed, ready-to-run board command
#[derive(Debug, Clone)]
pub enum BoardOp {
    AddProject(AddProject),
    DeleteProject(DeleteProject),
    AddColumn(AddColumn),
    UpdateColumn(UpdateColumn),
    DeleteColumn(DeleteColumn),
    ListColumns(ListColumns),
    AddTask(AddTask),
    UpdateTask(UpdateTask),
    DeleteTask(DeleteTask),
    GetTask(GetTask),
    ListTasks(ListTasks),
    MoveTask(MoveTask),
}

macro_rules! dispatch {
    ($self:expr, $op:ident => $body:expr) => {
        match $self {
            BoardOp::AddProject($op) => $body,
            BoardOp::DeleteProject($op) => $body,
            BoardOp::AddColumn($op) => $body,
            BoardOp::UpdateColumn($op) => $body,
            BoardOp::DeleteColumn($op) => $body,
            BoardOp::ListColumns($op) => $body,
            BoardOp::AddTask($op) => $body,
            BoardOp::UpdateTask($op) => $body,
            BoardOp::DeleteTask($op) => $body,
            BoardOp::GetTask($op) => $body,
            BoardOp::ListTasks($op) => $body,
            BoardOp::MoveTask($op) => $body,
        }
    };
}

impl Operation for BoardOp {
    fn verb(&self) -> &'static str {
        dispatch!(self, op => op.verb())
    }

    fn noun(&self) -> &'static str {
        dispatch!(self, op => op.noun())
    }

    fn description(&self) -> &'static str {
        dispatch!(self, op => op.description())
    }
}

impl Execute<BoardStore, BoardError> for BoardOp {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        dispatch!(self, op => op.execute(ctx))
    }
}

impl BoardOp {
    /// Build the command for a verb/noun pair from normalized parameters
    pub fn from_parts(verb: Verb, noun: Noun, params: Map<String, Value>) -> Result<Self> {
        let params = Value::Object(params);
        let op = match (verb, noun) {
            (Verb::Add, Noun::Project) => BoardOp::AddProject(build(verb, noun, params)?),
            (Verb::Delete, Noun::Project) => BoardOp::DeleteProject(build(verb, noun, params)?),
            (Verb::Add, Noun::Column) => BoardOp::AddColumn(build(verb, noun, params)?),
            (Verb::Update, Noun::Column) => BoardOp::UpdateColumn(build(verb, noun, params)?),
            (Verb::Delete, Noun::Column) => BoardOp::DeleteColumn(build(verb, noun, params)?),
            (Verb::List, Noun::Column | Noun::Columns) => {
                BoardOp::ListColumns(build(verb, noun, params)?)
            }
            (Verb::Add, Noun::Task) => BoardOp::AddTask(build(verb, noun, params)?),
            (Verb::Update, Noun::Task) => BoardOp::UpdateTask(build(verb, noun, params)?),
            (Verb::Delete, Noun::Task) => BoardOp::DeleteTask(build(verb, noun, params)?),
            (Verb::Get, Noun::Task) => BoardOp::GetTask(build(verb, noun, params)?),
            (Verb::List, Noun::Task | Noun::Tasks) => BoardOp::ListTasks(build(verb, noun, params)?),
            (Verb::Move, Noun::Task) => BoardOp::MoveTask(build(verb, noun, params)?),
            _ => {
                return Err(BoardError::InvalidOperation {
                    verb: verb.to_string(),
                    noun: noun.to_string(),
                })
            }
        };
        Ok(op)
    }
}

fn build<T: DeserializeOwned>(verb: Verb, noun: Noun, params: Value) -> Result<T> {
    serde_json::from_value(params)
        .map_err(|e| BoardError::parse(format!("{} {}: {}", verb, noun, e)))
}

/// Parse input JSON into one or more operations
pub fn parse_input(input: Value) -> Result<Vec<BoardOp>> {
    match input {
        Value::Array(arr) => arr.into_iter().map(parse_single).collect(),
        Value::Object(_) => Ok(vec![parse_single(input)?]),
        _ => Err(BoardError::parse("input must be an object or array")),
    }
}

fn parse_single(input: Value) -> Result<BoardOp> {
    let Value::Object(obj) = input else {
        return Err(BoardError::parse("operation must be an object"));
    };

    let (verb, noun, mut params) = extract_operation(&obj)?;
    normalize_params(noun, &mut params);
    BoardOp::from_parts(verb, noun, params)
}

/// Find the verb and noun, returning the remaining parameters
fn extract_operation(obj: &Map<String, Value>) -> Result<(Verb, Noun, Map<String, Value>)> {
    // "op": "move task"
    if let Some(op_str) = obj.get("op").or_else(|| obj.get("operation")).and_then(Value::as_str) {
        let (verb, noun) = parse_op_string(op_str)?;
        return Ok((verb, noun, without(obj, &["op", "operation"])));
    }

    // "verb": "move", "noun": "task"
    if let (Some(v), Some(n)) = (
        obj.get("verb").and_then(Value::as_str),
        obj.get("noun").and_then(Value::as_str),
    ) {
        let verb = Verb::from_alias(v).ok_or_else(|| BoardError::parse(format!("unknown verb: {}", v)))?;
        let noun = n.parse()?;
        return Ok((verb, noun, without(obj, &["verb", "noun"])));
    }

    // "move": "task"
    for (key, value) in obj {
        if let (Some(verb), Some(noun_str)) = (Verb::from_alias(key), value.as_str()) {
            if let Ok(noun) = noun_str.parse() {
                return Ok((verb, noun, without(obj, &[key.as_str()])));
            }
        }
    }

    if let Some((verb, noun)) = infer_operation(obj) {
        return Ok((verb, noun, without(obj, &[])));
    }

    Err(BoardError::parse("cannot determine operation from input"))
}

fn parse_op_string(s: &str) -> Result<(Verb, Noun)> {
    let mut parts = s.split_whitespace();
    let (Some(verb), Some(noun), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(BoardError::parse(format!("expected \"verb noun\", got {:?}", s)));
    };
    let verb = Verb::from_alias(verb).ok_or_else(|| BoardError::parse(format!("unknown verb: {}", verb)))?;
    Ok((verb, noun.parse()?))
}

/// Guess the operation from the keys present
fn infer_operation(obj: &Map<String, Value>) -> Option<(Verb, Noun)> {
    let has = |keys: &[&str]| keys.iter().any(|k| obj.contains_key(*k));
    let has_id = has(&["id", "task_id", "taskId"]);
    let has_column = has(&["column", "column_id", "columnId"]);

    if has(&["title"]) && has_column && !has_id {
        return Some((Verb::Add, Noun::Task));
    }
    if has_id && has_column {
        return Some((Verb::Move, Noun::Task));
    }
    if has_id && obj.len() == 1 {
        return Some((Verb::Get, Noun::Task));
    }
    None
}

/// Copy `obj` minus the naming keys and metadata
fn without(obj: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    obj.iter()
        .filter(|(k, _)| !keys.contains(&k.as_str()) && !matches!(k.as_str(), "actor" | "note"))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Rename keys to the command field names
fn normalize_params(noun: Noun, params: &mut Map<String, Value>) {
    let keys: Vec<String> = params.keys().cloned().collect();
    for key in keys {
        let snake = to_snake_case(&key);
        if snake != key {
            if let Some(value) = params.remove(&key) {
                params.entry(snake).or_insert(value);
            }
        }
    }

    let aliases: &[(&[&str], &str)] = match noun {
        Noun::Task => &[
            (&["task_id", "task"], "id"),
            (&["column_id", "col", "dest_column", "dest_column_id"], "column"),
            (&["dest_index", "idx", "position"], "index"),
            (&["desc", "body"], "description"),
        ],
        Noun::Tasks => &[(&["column_id", "col", "id"], "column")],
        Noun::Column => &[(&["column_id"], "id"), (&["project_id"], "project"), (&["name"], "title")],
        Noun::Columns => &[(&["project_id", "id"], "project")],
        Noun::Project => &[(&["project_id"], "id"), (&["title"], "name")],
    };
    for (from_keys, to_key) in aliases {
        for from_key in *from_keys {
            if let Some(value) = params.remove(*from_key) {
                params.entry(to_key.to_string()).or_insert(value);
            }
        }
    }

    // Out-of-range indexes clamp rather than fail
    if let Some(index) = params.get_mut("index") {
        if index.as_i64().is_some_and(|i| i < 0) {
            *index = Value::from(0);
        }
    }
}

/// Simple camelCase to snake_case conversion
fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn single(input: Value) -> BoardOp {
        let mut ops = parse_input(input).unwrap();
        assert_eq!(ops.len(), 1);
        ops.remove(0)
    }

    #[test]
    fn test_parse_explicit_op() {
        let op = single(json!({ "op": "add task", "column": "todo", "title": "Test" }));
        assert_eq!(op.op_string(), "add task");
        let BoardOp::AddTask(cmd) = op else { panic!("wrong op") };
        assert_eq!(cmd.fields.title, "Test");
    }

    #[test]
    fn test_parse_verb_noun_fields() {
        let op = single(json!({ "verb": "delete", "noun": "column", "id": "c1" }));
        assert!(matches!(op, BoardOp::DeleteColumn(ref cmd) if cmd.id.as_str() == "c1"));
    }

    #[test]
    fn test_parse_shorthand_with_camel_case() {
        let op = single(json!({ "move": "task", "taskId": "t1", "columnId": "b", "destIndex": 0 }));
        let BoardOp::MoveTask(cmd) = op else { panic!("wrong op") };
        assert_eq!(cmd.id.as_str(), "t1");
        assert_eq!(cmd.column.as_str(), "b");
        assert_eq!(cmd.index, Some(0));
    }

    #[test]
    fn test_parse_verb_aliases() {
        assert!(matches!(
            single(json!({ "op": "rm task", "id": "abc" })),
            BoardOp::DeleteTask(_)
        ));
        assert!(matches!(
            single(json!({ "op": "mv task", "id": "abc", "column": "x" })),
            BoardOp::MoveTask(_)
        ));
        assert!(matches!(
            single(json!({ "op": "create column", "project": "p", "title": "Q" })),
            BoardOp::AddColumn(_)
        ));
        assert!(matches!(
            single(json!({ "op": "edit task", "id": "abc", "title": "t" })),
            BoardOp::UpdateTask(_)
        ));
    }

    #[test]
    fn test_negative_index_clamps_to_zero() {
        let BoardOp::MoveTask(cmd) = single(json!({ "op": "move task", "id": "t", "column": "c", "index": -3 })) else {
            panic!("wrong op")
        };
        assert_eq!(cmd.index, Some(0));
    }

    #[test]
    fn test_infer_move_and_get() {
        assert!(matches!(single(json!({ "id": "t", "column": "c" })), BoardOp::MoveTask(_)));
        assert!(matches!(single(json!({ "id": "t" })), BoardOp::GetTask(_)));
        assert!(matches!(single(json!({ "title": "x", "column": "c" })), BoardOp::AddTask(_)));
    }

    #[test]
    fn test_batch_operations() {
        let ops = parse_input(json!([
            { "op": "add project", "name": "P" },
            { "op": "list columns", "projectId": "p" }
        ]))
        .unwrap();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[1], BoardOp::ListColumns(_)));
    }

    #[test]
    fn test_invalid_combinations() {
        assert!(matches!(
            parse_input(json!({ "op": "move column", "id": "c" })),
            Err(BoardError::InvalidOperation { .. })
        ));
        assert!(matches!(parse_input(json!("move task")), Err(BoardError::Parse { .. })));
        assert!(matches!(parse_input(json!({ "what": 1 })), Err(BoardError::Parse { .. })));
        assert!(matches!(
            parse_input(json!({ "op": "move task", "column": "c" })),
            Err(BoardError::Parse { .. })
        ));
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("destIndex"), "dest_index");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }
}
