use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{
    leetcode::{ProblemAnalysis, ProfileSummary},
    Difficulty,
};

const BASE_URL: &str = "https://leetcode.com";

/// Tag names looked for in pasted problem pages.
const COMMON_TAGS: &[&str] = &[
    "Array",
    "String",
    "Hash Table",
    "Dynamic Programming",
    "Math",
    "Two Pointers",
    "Binary Search",
    "Sorting",
    "Greedy",
    "Tree",
    "Binary Tree",
    "Binary Search Tree",
    "Breadth-First Search",
    "Depth-First Search",
    "Backtracking",
    "Sliding Window",
    "Graph",
    "Linked List",
    "Stack",
    "Queue",
    "Heap",
    "Trie",
    "Union Find",
    "Bit Manipulation",
    "Recursion",
    "Divide and Conquer",
];

const CATEGORY_MAP: &[(&str, &[&str])] = &[
    (
        "Data Structures",
        &[
            "Array",
            "String",
            "Linked List",
            "Stack",
            "Queue",
            "Tree",
            "Graph",
            "Hash Table",
            "Heap",
            "Trie",
        ],
    ),
    (
        "Algorithms",
        &[
            "Sorting",
            "Binary Search",
            "Two Pointers",
            "Sliding Window",
            "Greedy",
            "Divide and Conquer",
        ],
    ),
    (
        "Search & Traversal",
        &["Breadth-First Search", "Depth-First Search", "Backtracking"],
    ),
    ("Dynamic Programming", &["Dynamic Programming"]),
    ("Math & Logic", &["Math", "Bit Manipulation"]),
    ("Tree Problems", &["Binary Tree", "Binary Search Tree"]),
    ("Graph Problems", &["Graph", "Union Find"]),
];

pub const FALLBACK_CATEGORY: &str = "General";
const DESCRIPTION_LIMIT: usize = 500;

lazy_static! {
    static ref PROBLEM_URL: Regex =
        Regex::new(r"^https?://(www\.)?leetcode\.com/problems/[^/]+/?$").unwrap();
    static ref PROBLEM_NUMBER: Regex = Regex::new(r"problems/[^/]+/(\d+)").unwrap();
    static ref TITLE: Regex = Regex::new(r"(?i)<h1[^>]*>([^<]+)</h1>").unwrap();
    static ref DIFFICULTY: Regex =
        Regex::new(r"(?i)difficulty[^>]*>\s*(Easy|Medium|Hard)").unwrap();
    static ref DESCRIPTION: Regex =
        Regex::new(r#"(?i)<div[^>]*class="[^"]*description[^"]*"[^>]*>([\s\S]*?)</div>"#).unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref PROFILE_SOLVED: Regex = Regex::new(r"(?i)solved[^>]*>\s*(\d+)").unwrap();
    static ref PROFILE_TOTAL: Regex = Regex::new(r"(?i)total[^>]*>\s*(\d+)").unwrap();
    static ref PROFILE_RANKING: Regex = Regex::new(r"(?i)ranking[^>]*>\s*(\d+)").unwrap();
}

pub fn validate_problem_url(url: &str) -> bool {
    PROBLEM_URL.is_match(url.trim())
}

pub fn extract_problem_number(url: &str) -> Option<u64> {
    PROBLEM_NUMBER
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn problem_url(number: u64) -> String {
    format!("{}/problems/{}/", BASE_URL, number)
}

pub fn profile_url(username: &str) -> String {
    format!("{}/{}/", BASE_URL, username)
}

fn first_capture<'a>(pattern: &Regex, content: &'a str) -> Option<&'a str> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn extract_title(content: &str) -> Option<String> {
    first_capture(&TITLE, content)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
}

pub fn extract_difficulty(content: &str) -> Difficulty {
    first_capture(&DIFFICULTY, content)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(Difficulty::Medium)
}

/// Text of the description block with markup stripped, cut to 500
/// characters plus an ellipsis.
pub fn extract_description(content: &str) -> Option<String> {
    let inner = first_capture(&DESCRIPTION, content)?;
    let text = HTML_TAG.replace_all(inner, "");
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.chars().count() > DESCRIPTION_LIMIT {
        let cut: String = text.chars().take(DESCRIPTION_LIMIT).collect();
        Some(format!("{}...", cut))
    } else {
        Some(text.to_string())
    }
}

/// Known tags mentioned anywhere in `content`, case-insensitively.
pub fn extract_tags(content: &str) -> Vec<String> {
    let haystack = content.to_lowercase();
    COMMON_TAGS
        .iter()
        .filter(|tag| haystack.contains(&tag.to_lowercase()))
        .map(|tag| tag.to_string())
        .collect()
}

/// Category groups touched by `tags`; falls back to "General".
pub fn infer_categories(tags: &[String]) -> Vec<String> {
    let categories: Vec<String> = CATEGORY_MAP
        .iter()
        .filter(|(_, members)| members.iter().any(|m| tags.iter().any(|t| t == m)))
        .map(|(category, _)| category.to_string())
        .collect();

    if categories.is_empty() {
        vec![FALLBACK_CATEGORY.to_string()]
    } else {
        categories
    }
}

pub fn analyze(url: &str, content: Option<&str>) -> ProblemAnalysis {
    let content = content.unwrap_or_default();
    let tags = extract_tags(content);
    let categories = infer_categories(&tags);

    ProblemAnalysis {
        url: url.trim().to_string(),
        valid_url: validate_problem_url(url),
        problem_number: extract_problem_number(url),
        title: extract_title(content),
        difficulty: extract_difficulty(content),
        description: extract_description(content),
        tags,
        categories,
    }
}

fn capture_number<T: std::str::FromStr + Default>(pattern: &Regex, content: &str) -> T {
    first_capture(pattern, content)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

/// Reads solved/total/ranking counters from a pasted profile page.
pub fn parse_profile(username: &str, content: &str) -> ProfileSummary {
    let username = username.trim();
    ProfileSummary {
        username: username.to_string(),
        profile_url: profile_url(username),
        solved_problems: capture_number(&PROFILE_SOLVED, content),
        total_problems: capture_number(&PROFILE_TOTAL, content),
        ranking: capture_number(&PROFILE_RANKING, content),
    }
}
