//! Filename generator.

use regex::Regex;
use std::sync::LazyLock;

/// Characters that are not allowed in generated filenames.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Episode number patterns, most specific first.
static EPISODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)s\d{1,2}[\s._-]?e(\d{1,3})",
        r"(?i)(?:^|[^a-z\d])\d{1,2}x(\d{2,3})(?:[^\d]|$)",
        r"(?i)(?:^|[^a-z\d])episode[\s._-]*(\d{1,3})(?:[^\d]|$)",
        r"(?i)(?:^|[^a-z\d])ep?[\s._-]?(\d{1,3})(?:[^\d]|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Failed to create regex pattern for episode number"))
    .collect()
});

/// Extract the episode number embedded in an existing filename.
///
/// Detects patterns like: S01E02, s1.e2, 1x02, Episode 2, E02, Ep 2.
pub fn extract_episode_number(filename: &str) -> Option<u16> {
    EPISODE_PATTERNS.iter().find_map(|re| {
        re.captures(filename)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// Generate TV episode filename.
///
/// Format: `S${seasonNr2}E${episodeNr2} - ${title}( - ${info}).${extension}`
pub fn generate_episode_filename(
    season: u16,
    episode: u16,
    title: &str,
    info: Option<&str>,
    extension: &str,
) -> String {
    let mut name = format!("S{:02}E{:02} - {}", season, episode, sanitize_filename(title));

    if let Some(info) = info.filter(|i| !i.is_empty()) {
        name.push_str(" - ");
        name.push_str(info);
    }

    format!("{}.{}", name, extension)
}

/// Remove characters that are not allowed in filenames.
pub fn sanitize_filename(s: &str) -> String {
    s.chars().filter(|c| !FORBIDDEN_CHARS.contains(c)).collect()
}
