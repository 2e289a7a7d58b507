use tracing::{debug, warn};

use crate::context::AppContext;
use crate::domain::change::{FileChange, RevisionRange, summarize_changes};
use crate::domain::prompt::{ChangelogStyle, Prompt, PromptInput};
use crate::error::{AppError, AppResult};
use crate::services::{CompletionRequest, VersionControlService};

/// Fetches the diff of every changed file. A file whose diff cannot be read
/// is logged and skipped; only a failure to list the files is fatal.
pub async fn collect_file_changes(
    version_control: &dyn VersionControlService,
    range: &RevisionRange,
) -> AppResult<Vec<FileChange>> {
    let files = version_control.changed_files(range).await?;
    let mut changes = Vec::with_capacity(files.len());

    for file in files {
        match version_control.file_diff(range, &file).await {
            Ok(diff) if diff.is_empty() => {
                debug!(file = %file, "skipping file with empty diff");
            }
            Ok(diff) => changes.push(FileChange { file, diff }),
            Err(err) => warn!(file = %file, error = %err, "failed to get diff for file"),
        }
    }

    Ok(changes)
}

pub async fn generate_changelog(
    ctx: &AppContext,
    range: &RevisionRange,
    style: ChangelogStyle,
) -> AppResult<String> {
    let vcs = ctx.version_control.as_ref();

    let file_status = vcs.name_status(range).await?;
    let commits = vcs.commit_log(range).await?;
    let changes = collect_file_changes(vcs, range).await?;
    debug!(
        files = changes.len(),
        range = %range.as_git_range(),
        model = %ctx.config.model,
        "collected file changes"
    );

    let input = PromptInput {
        file_status,
        code_changes: summarize_changes(&changes),
        commits,
    };
    let prompt = Prompt::build(&input, style);

    let request = CompletionRequest {
        system: prompt.system.clone(),
        user: prompt.user_message(),
    };
    let changelog = ctx.language_model.complete(&request).await?;
    if changelog.trim().is_empty() {
        return Err(AppError::LanguageModel(
            "language model returned an empty changelog".to_string(),
        ));
    }

    Ok(changelog)
}
