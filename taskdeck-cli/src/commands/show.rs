use super::CommandContext;
use crate::render::{write_board, write_output};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

pub fn run(context: &CommandContext, seed: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let board = context.load_board(seed)?.snapshot();
    write_output(out, context.format, &board, |out| write_board(out, &board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::config::TaskdeckConfig;

    #[test]
    fn test_show_demo_board() {
        let context = CommandContext::new(TaskdeckConfig::default(), OutputFormat::Table);
        let mut out = Vec::new();
        run(&context, None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Academy Portal"));
        assert!(text.contains("In Progress (2)"));
        assert!(text.contains("Video player [urgent]"));
    }
}
