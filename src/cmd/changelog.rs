use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::context::AppContext;
use crate::domain::change::RevisionRange;
use crate::domain::prompt::ChangelogStyle;
use crate::error::AppResult;
use crate::workflow::changelog::generate_changelog;

#[derive(Debug, Clone)]
pub struct ChangelogCommandArgs {
    pub range: RevisionRange,
    pub style: ChangelogStyle,
    pub output: Option<PathBuf>,
}

pub async fn run(ctx: &AppContext, args: ChangelogCommandArgs) -> AppResult<()> {
    let changelog = generate_changelog(ctx, &args.range, args.style).await?;
    emit(&changelog, args.output.as_deref(), &mut io::stdout().lock())
}

/// Writes the changelog to `output` when given, otherwise to `out`.
fn emit(changelog: &str, output: Option<&Path>, out: &mut impl Write) -> AppResult<()> {
    match output {
        Some(path) => {
            fs::write(path, changelog)?;
            debug!(path = %path.display(), bytes = changelog.len(), "wrote changelog");
            writeln!(out, "Changelog has been written to {}", path.display())?;
        }
        None => writeln!(out, "{changelog}")?,
    }
    Ok(())
}
