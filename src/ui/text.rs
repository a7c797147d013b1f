use crate::github::{Emphasis, RepositorySummary, UserProfile};
use crate::state::ViewState;

/// Marker printed in front of a repository line.
///
fn emphasis_marker(emphasis: Emphasis) -> char {
    match emphasis {
        Emphasis::High => '*',
        Emphasis::Normal => ' ',
        Emphasis::Muted => '-',
    }
}

/// Render the user lookup state as status lines.
///
pub fn profile(state: &ViewState<UserProfile>) -> Vec<String> {
    let mut lines = Vec::new();
    if state.is_loading {
        lines.push("Loading user...".to_string());
    }
    if let Some(message) = &state.message {
        lines.push(message.clone());
    }
    if let Some(error) = &state.error_message {
        lines.push(format!("Error: {} (type 'dismiss' to clear)", error));
    }
    match &state.data {
        Some(profile) if profile.id != 0 => {
            let name = if profile.display_name.is_empty() {
                "(no name)"
            } else {
                profile.display_name.as_str()
            };
            lines.push(format!("User #{}: {}", profile.id, name));
            if !profile.avatar_url.is_empty() {
                lines.push(format!("  avatar: {}", profile.avatar_url));
            }
        }
        _ => {}
    }
    lines
}

/// Render one repository as a list row.
///
pub fn repo_row(repo: &RepositorySummary) -> String {
    format!(
        "{} [{}] {}  forks {}  watchers {}  stars {}  {}",
        emphasis_marker(repo.emphasis),
        repo.id,
        repo.name,
        repo.fork_count,
        repo.watch_count,
        repo.star_count,
        repo.visibility
    )
}

/// Render the repository list state.
///
pub fn repos(state: &ViewState<Vec<RepositorySummary>>) -> Vec<String> {
    let mut lines = Vec::new();
    if state.is_loading {
        lines.push("Loading repositories...".to_string());
    }
    if let Some(error) = &state.error_message {
        lines.push(format!("Error: {}", error));
    }
    if let Some(repos) = &state.data {
        lines.extend(repos.iter().map(repo_row));
    }
    lines
}

/// Render the detail view of the selected repository.
///
pub fn repo_detail(repo: Option<&RepositorySummary>) -> Vec<String> {
    match repo {
        None => vec!["No repository selected.".to_string()],
        Some(repo) => {
            let mut lines = vec![
                format!("{} ({})", repo.name, repo.visibility),
                format!(
                    "forks {}  watchers {}  stars {}",
                    repo.fork_count, repo.watch_count, repo.star_count
                ),
            ];
            if let Some(description) = &repo.description {
                lines.push(description.clone());
            }
            if !repo.owner_avatar_url.is_empty() {
                lines.push(format!("owner avatar: {}", repo.owner_avatar_url));
            }
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Visibility;
    use crate::state::{DataState, ViewStatePatch};

    fn summary(emphasis: Emphasis) -> RepositorySummary {
        RepositorySummary {
            id: 1296269,
            name: "Hello-World".to_string(),
            owner_avatar_url: String::new(),
            fork_count: "9.5k".to_string(),
            watch_count: "80".to_string(),
            star_count: "2.1M".to_string(),
            description: Some("My first repository on GitHub!".to_string()),
            visibility: Visibility::Public,
            emphasis,
        }
    }

    #[test]
    fn default_profile_renders_nothing() {
        assert!(profile(&ViewState::default()).is_empty());
    }

    #[test]
    fn profile_error_over_last_good_data() {
        let mut state = ViewState::new(UserProfile {
            id: 1,
            avatar_url: String::new(),
            display_name: "The Octocat".to_string(),
        });
        ViewStatePatch::from(DataState::error("Not Found")).apply_to(&mut state);

        let lines = profile(&state);
        assert_eq!(lines[0], "Error: Not Found (type 'dismiss' to clear)");
        assert_eq!(lines[1], "User #1: The Octocat");
    }

    #[test]
    fn repo_row_marks_emphasis() {
        assert!(repo_row(&summary(Emphasis::High)).starts_with("* [1296269] Hello-World"));
        assert!(repo_row(&summary(Emphasis::Muted)).starts_with("- "));
        assert!(repo_row(&summary(Emphasis::Normal)).ends_with("stars 2.1M  Public"));
    }

    #[test]
    fn repos_loading_keeps_rows() {
        let mut state = ViewState::new(vec![summary(Emphasis::Normal)]);
        ViewStatePatch::from(DataState::loading(true)).apply_to(&mut state);
        let lines = repos(&state);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Loading repositories...");
    }

    #[test]
    fn detail_of_missing_selection() {
        assert_eq!(repo_detail(None), vec!["No repository selected.".to_string()]);
        let repo = summary(Emphasis::High);
        let lines = repo_detail(Some(&repo));
        assert_eq!(lines[0], "Hello-World (Public)");
        assert_eq!(lines[2], "My first repository on GitHub!");
    }
}
