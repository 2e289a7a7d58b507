#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangelogStyle {
    Detailed,
    Concise,
}

impl ChangelogStyle {
    pub fn from_detailed_flag(detailed: bool) -> Self {
        if detailed {
            ChangelogStyle::Detailed
        } else {
            ChangelogStyle::Concise
        }
    }

    fn persona(self) -> &'static str {
        match self {
            ChangelogStyle::Detailed => "You are a technical writer creating detailed changelogs.",
            ChangelogStyle::Concise => {
                "You are a technical writer creating concise, user-friendly release notes. \
                 Keep the output brief and focused on key changes."
            }
        }
    }

    fn instructions(self) -> &'static str {
        match self {
            ChangelogStyle::Detailed => {
                "Please analyze these git changes and generate a detailed technical changelog \
                 in markdown format."
            }
            ChangelogStyle::Concise => {
                "Please analyze these git changes and generate a concise, high-level changelog \
                 in markdown format. Focus only on the most important changes and keep each \
                 entry brief (1-2 lines max)."
            }
        }
    }

    fn depth_guideline(self) -> &'static str {
        match self {
            ChangelogStyle::Detailed => "Provide technical details and impact",
            ChangelogStyle::Concise => "Keep it brief and high-level",
        }
    }
}

/// Inputs gathered from version control for one revision range.
#[derive(Debug, Clone, Default)]
pub struct PromptInput {
    pub file_status: String,
    pub code_changes: String,
    pub commits: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub instructions: String,
    pub details: String,
}

impl Prompt {
    pub fn build(input: &PromptInput, style: ChangelogStyle) -> Self {
        let mut details = String::new();
        details.push_str("\n\nGit diff summary (files changed):\n");
        details.push_str(input.file_status.trim_end());
        details.push_str("\n\n");

        if style == ChangelogStyle::Detailed {
            details.push_str("Detailed code changes:\n");
            details.push_str(&input.code_changes);
            details.push_str("\n\n");
        }

        details.push_str("Commits:\n");
        details.push_str(input.commits.trim_end());
        details.push_str("\n\nGuidelines:\n");
        details.push_str("- Focus on user-facing changes and significant technical updates\n");
        details.push_str("- Use clear, non-technical language where possible\n");
        details.push_str("- Group similar changes together\n");
        details.push_str(&format!("- {}\n", style.depth_guideline()));
        details.push_str("- Use bullet points for better readability");

        Self {
            system: style.persona().to_string(),
            instructions: style.instructions().to_string(),
            details,
        }
    }

    pub fn user_message(&self) -> String {
        format!("{}{}", self.instructions, self.details)
    }
}
