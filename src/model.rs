//! Repository summaries returned by the Search API

use serde::{Deserialize, Serialize};

/// One repository in a result list
///
/// Counters default to zero and tags to empty when the backend omits them.
/// Older records carry their tags as `topics`, and some carry both keys;
/// `topics` only fills in when `tags` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RepositoryRecord")]
pub struct Repository {
    pub title: String,
    pub description: String,
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub tags: Vec<String>,
    /// Pre-computed by the backend; never derived client-side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_match_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

/// Wire shape of a repository as the backend stores it
#[derive(Deserialize)]
struct RepositoryRecord {
    title: String,
    #[serde(default)]
    description: String,
    url: String,
    #[serde(default)]
    stars: u64,
    #[serde(default)]
    forks: u64,
    #[serde(default)]
    watchers: u64,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    skill_match_score: Option<f64>,
    #[serde(default)]
    difficulty: Option<String>,
}

impl From<RepositoryRecord> for Repository {
    fn from(record: RepositoryRecord) -> Self {
        let tags = if record.tags.is_empty() {
            record.topics
        } else {
            record.tags
        };
        Self {
            title: record.title,
            description: record.description,
            url: record.url,
            stars: record.stars,
            forks: record.forks,
            watchers: record.watchers,
            tags,
            skill_match_score: record.skill_match_score,
            difficulty: record.difficulty,
        }
    }
}

impl Repository {
    /// Description or a placeholder for repositories without one
    pub fn description_or_placeholder(&self) -> &str {
        if self.description.trim().is_empty() {
            "No description provided"
        } else {
            &self.description
        }
    }

    /// Tags joined for single-line display
    pub fn tag_line(&self) -> String {
        self.tags.join(", ")
    }
}

/// Decode a JSON array of repositories
pub fn parse_repositories(body: &str) -> serde_json::Result<Vec<Repository>> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_record() {
        let body = r#"[{
            "title": "ripgrep",
            "description": "fast grep",
            "url": "https://github.com/BurntSushi/ripgrep",
            "stars": 45000,
            "forks": 1900,
            "watchers": 300,
            "tags": ["rust", "cli"],
            "skill_match_score": 0.82
        }]"#;
        let repos = parse_repositories(body).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].stars, 45000);
        assert_eq!(repos[0].tags, vec!["rust", "cli"]);
        assert_eq!(repos[0].skill_match_score, Some(0.82));
    }

    #[test]
    fn missing_counters_and_topics_alias() {
        let body = r#"[{"title": "bspwm", "url": "https://github.com/x/bspwm", "topics": ["x11"]}]"#;
        let repos = parse_repositories(body).unwrap();
        assert_eq!(repos[0].watchers, 0);
        assert_eq!(repos[0].tags, vec!["x11"]);
        assert_eq!(repos[0].description_or_placeholder(), "No description provided");
        assert!(repos[0].skill_match_score.is_none());
    }

    #[test]
    fn backend_record_with_tags_and_topics() {
        let body = r#"[{
            "title": "bspwm",
            "description": "A tiling window manager based on binary space partitioning",
            "url": "https://github.com/baskerville/bspwm",
            "stars": 7700,
            "forks": 420,
            "topics": ["x11", "window-manager"],
            "tags": ["x11", "foss"],
            "text": "bspwm A tiling window manager x11 foss"
        }]"#;
        let repos = parse_repositories(body).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].tags, vec!["x11", "foss"]);
        assert_eq!(repos[0].forks, 420);
    }

    #[test]
    fn serialized_form_has_no_topics_key() {
        let body = r#"[{"title": "smr", "url": "https://github.com/smrealms/smr", "topics": ["mmo"]}]"#;
        let repos = parse_repositories(body).unwrap();
        let json = serde_json::to_string(&repos).unwrap();
        assert!(json.contains(r#""tags":["mmo"]"#));
        assert!(!json.contains("topics"));

        let again = parse_repositories(&json).unwrap();
        assert_eq!(again, repos);
    }

    #[test]
    fn rejects_non_array_payload() {
        assert!(parse_repositories(r#"{"error": "Empty query"}"#).is_err());
    }
}
