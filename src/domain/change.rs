/// Number of diff lines kept per file in the prompt.
pub const MAX_DIFF_LINES: usize = 50;

const TRUNCATION_MARKER: &str = "\n... (diff truncated for brevity)\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    pub from: String,
    pub to: String,
}

impl RevisionRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The `from..to` form git expects.
    pub fn as_git_range(&self) -> String {
        format!("{}..{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub file: String,
    pub diff: String,
}

/// Concatenates per-file diffs under `File:` headers, keeping at most
/// [`MAX_DIFF_LINES`] lines of each.
pub fn summarize_changes(changes: &[FileChange]) -> String {
    let mut summary = String::new();

    for change in changes {
        summary.push_str("\nFile: ");
        summary.push_str(&change.file);
        summary.push('\n');

        let body = change.diff.strip_suffix('\n').unwrap_or(&change.diff);
        let lines = body.split('\n').collect::<Vec<_>>();

        if lines.len() > MAX_DIFF_LINES {
            summary.push_str(&lines[..MAX_DIFF_LINES].join("\n"));
            summary.push('\n');
            summary.push_str(TRUNCATION_MARKER);
        } else {
            summary.push_str(body);
            summary.push('\n');
        }
    }

    summary
}
