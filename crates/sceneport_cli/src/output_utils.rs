use crate::util::CommandContext;
use log::error;
use serde::Serialize;
use text_trees::{FormatCharacters, StringTreeNode, TreeFormatting};

/// Utility functions for consistent output formatting across commands
pub struct OutputUtils;

impl OutputUtils {
    /// Serialize data to pretty JSON and print it, logging failures
    pub fn try_print_json<T: Serialize + ?Sized>(data: &T, ctx: &CommandContext, type_name: &str) {
        match serde_json::to_string_pretty(data) {
            Ok(json) => ctx.output.print_result(&json),
            Err(e) => error!("Failed to serialize {type_name} to JSON: {e}"),
        }
    }

    /// Print a formatted header for command output
    pub fn print_header(ctx: &CommandContext, title: &str) {
        ctx.output.print_info(title);
    }

    /// Print a formatted summary with key-value pairs
    pub fn print_summary(ctx: &CommandContext, items: &[(&str, String)]) {
        for (key, value) in items {
            ctx.output.print_result_fmt(format_args!("  {key}: {value}"));
        }
    }
}

/// Tree formatter for consistent tree output across commands
pub struct TreeFormatter {
    ascii: bool,
}

impl TreeFormatter {
    pub fn new(ascii: bool) -> Self {
        Self { ascii }
    }

    /// Format a StringTreeNode into a string with consistent styling
    pub fn format_tree(&self, tree: &StringTreeNode) -> Result<String, Box<dyn std::error::Error>> {
        let format_chars = if self.ascii {
            FormatCharacters::ascii()
        } else {
            FormatCharacters::box_chars()
        };
        let formatting = TreeFormatting::dir_tree(format_chars);
        Ok(tree.to_string_with_format(&formatting)?)
    }

    /// Print a tree directly to output with error handling
    pub fn print_tree(&self, tree: &StringTreeNode, ctx: &CommandContext) {
        match self.format_tree(tree) {
            Ok(output) => ctx.output.print_result(output.trim_end()),
            Err(e) => error!("Failed to format tree: {e}"),
        }
    }
}

/// Utility for consistent command summary display
pub struct CommandSummary<'a> {
    title: &'a str,
    items: Vec<(&'a str, String)>,
}

impl<'a> CommandSummary<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            items: Vec::new(),
        }
    }

    pub fn add_item(mut self, key: &'a str, value: String) -> Self {
        self.items.push((key, value));
        self
    }

    pub fn add_count(self, key: &'a str, count: usize) -> Self {
        self.add_item(key, count.to_string())
    }

    pub fn print(self, ctx: &CommandContext) {
        if ctx.output.is_quiet() {
            return;
        }
        OutputUtils::print_header(ctx, self.title);
        OutputUtils::print_summary(ctx, &self.items);
        ctx.output.print_result("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_summary_builder() {
        let summary = CommandSummary::new("Export")
            .add_item("Root", "Export".to_string())
            .add_count("Copied", 42)
            .add_count("Missing", 3);

        assert_eq!(summary.title, "Export");
        assert_eq!(summary.items.len(), 3);
        assert_eq!(summary.items[0], ("Root", "Export".to_string()));
        assert_eq!(summary.items[1], ("Copied", "42".to_string()));
        assert_eq!(summary.items[2], ("Missing", "3".to_string()));
    }

    #[test]
    fn test_ascii_tree() {
        let tree = StringTreeNode::with_child_nodes(
            "Water.shader".to_string(),
            vec![StringTreeNode::new("Lib.hlsl".to_string())].into_iter(),
        );
        let text = TreeFormatter::new(true).format_tree(&tree).unwrap();
        assert!(text.starts_with("Water.shader"));
        assert!(text.contains("Lib.hlsl"));
    }
}
