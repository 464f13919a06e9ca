//! Project commands

mod add;
mod delete;

pub use add::AddProject;
pub use delete::DeleteProject;
