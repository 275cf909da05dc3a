use crate::error::{NavError, Result};
use crate::model::Repository;

/// The type of action available in the actions menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    OpenInBrowser,
    CopyUrl,
    SearchSimilar,
    Details,
}

/// Actions popup menu state
pub struct ActionsMenu {
    pub items: Vec<(&'static str, ActionKind)>,
    pub selected: usize,
}

impl ActionsMenu {
    pub fn new() -> Self {
        Self {
            items: vec![
                ("Open in Browser", ActionKind::OpenInBrowser),
                ("Copy URL", ActionKind::CopyUrl),
                ("Search Similar", ActionKind::SearchSimilar),
                ("Details", ActionKind::Details),
            ],
            selected: 0,
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected < self.items.len() - 1 {
            self.selected += 1;
        }
    }

    pub fn selected_action(&self) -> ActionKind {
        self.items[self.selected].1
    }
}

impl Default for ActionsMenu {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only popup with repository details
pub struct InfoDialog {
    pub title: String,
    pub lines: Vec<String>,
}

impl InfoDialog {
    pub fn for_repository(repo: &Repository) -> Self {
        let mut lines = vec![
            repo.description_or_placeholder().to_string(),
            String::new(),
            format!("URL:       {}", repo.url),
            format!("Stars:     {}", crate::format_count(repo.stars)),
            format!("Forks:     {}", crate::format_count(repo.forks)),
            format!("Watchers:  {}", crate::format_count(repo.watchers)),
        ];
        if let Some(score) = repo.skill_match_score {
            lines.push(format!("Match:     {}", crate::format_score(Some(score))));
        }
        if let Some(difficulty) = &repo.difficulty {
            lines.push(format!("Level:     {}", difficulty));
        }
        if !repo.tags.is_empty() {
            lines.push(format!("Tags:      {}", repo.tag_line()));
        }
        Self {
            title: repo.title.clone(),
            lines,
        }
    }
}

/// Which popup is open over the current page
pub enum ActiveMenu {
    None,
    Actions(ActionsMenu),
    Info(InfoDialog),
}

/// Query used by "Search Similar": the repository's leading tags
pub fn similar_query(repo: &Repository) -> String {
    if repo.tags.is_empty() {
        repo.title.clone()
    } else {
        repo.tags.iter().take(3).cloned().collect::<Vec<_>>().join(" ")
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| NavError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| NavError::Clipboard(e.to_string()))
}

pub fn open_in_browser(url: &str) -> Result<()> {
    open::that(url)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(tags: &[&str]) -> Repository {
        Repository {
            title: "smr".into(),
            description: "Space Merchant Realms".into(),
            url: "https://github.com/smrealms/smr".into(),
            stars: 26,
            forks: 16,
            watchers: 0,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            skill_match_score: Some(0.5),
            difficulty: None,
        }
    }

    #[test]
    fn similar_query_uses_first_three_tags() {
        assert_eq!(similar_query(&repo(&["docker", "foss", "mmo", "mysql"])), "docker foss mmo");
        assert_eq!(similar_query(&repo(&[])), "smr");
    }

    #[test]
    fn menu_navigation_is_clamped() {
        let mut menu = ActionsMenu::new();
        menu.move_up();
        assert_eq!(menu.selected_action(), ActionKind::OpenInBrowser);
        for _ in 0..10 {
            menu.move_down();
        }
        assert_eq!(menu.selected_action(), ActionKind::Details);
    }

    #[test]
    fn details_include_score_and_tags() {
        let info = InfoDialog::for_repository(&repo(&["docker"]));
        assert_eq!(info.title, "smr");
        assert!(info.lines.iter().any(|l| l.contains("0.50")));
        assert!(info.lines.iter().any(|l| l.contains("docker")));
    }
}
