//! Filename normalizer.
//!
//! Turns raw video filenames into readable titles:
//! - Recognizes media files by their extension (case-insensitive)
//! - Capitalizes the first letter and drops the extension
//! - Replaces dots with spaces
//! - Optionally strips release tags after the release year

use regex::Regex;
use std::sync::LazyLock;

/// Recognized video container and transport-stream extensions.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    // Common formats
    "mp4", "mkv", "avi", "ts", "mov", "wmv", "flv", "webm", "m4v", // Less common
    "mpg", "3gp", "3g2", "ogv", "vob", "rm", "rmvb", "asf", "m2ts", "mxf", "divx", "xvid", "f4v",
    "mpe", "drc", "qt", "svi", "bik",
];

/// Four digits at the very start of a name, e.g. "1984 (1956)".
static RE_LEADING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}").expect("Failed to create regex pattern for leading year"));

/// Shortest prefix ending in an optionally bracketed year followed by a delimiter.
static RE_TITLE_WITH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?[(\[]?\d{4}[)\]]?)(?:[.\s]|$)")
        .expect("Failed to create regex pattern for title with year")
});

/// Return the extension of `name` if it is a recognized media extension.
///
/// Only the last dot-separated component is considered, so `Cats.mkv.part`
/// is not a media file and a name merely ending in the letters "ts" is not
/// mistaken for a transport stream.
pub fn media_extension(name: &str) -> Option<&str> {
    let (_, ext) = name.rsplit_once('.')?;
    let ext_lower = ext.to_lowercase();
    MEDIA_EXTENSIONS
        .contains(&ext_lower.as_str())
        .then_some(ext)
}

/// Check if a filename has a recognized media extension.
pub fn is_media_file(name: &str) -> bool {
    media_extension(name).is_some()
}

/// Normalize a filename into a display title.
///
/// Names without a media extension are returned unchanged. With `strip`
/// enabled, everything after the first release year is dropped unless the
/// name itself starts with a four digit number.
///
/// # Examples
/// ```
/// use mediafiletools::core::normalizer::normalize;
///
/// assert_eq!(normalize("the.matrix.1999.1080p.mkv", false), "The matrix 1999 1080p");
/// assert_eq!(normalize("the.matrix.1999.1080p.mkv", true), "The matrix 1999");
/// assert_eq!(normalize("notes.txt", true), "notes.txt");
/// ```
pub fn normalize(name: &str, strip: bool) -> String {
    let Some(ext) = media_extension(name) else {
        return name.to_string();
    };

    let capitalized = capitalize_first(name);
    let stem = &capitalized[..capitalized.len() - ext.len() - 1];

    if strip && !RE_LEADING_YEAR.is_match(stem) {
        if let Some(caps) = RE_TITLE_WITH_YEAR.captures(stem) {
            return caps[1].replace('.', " ");
        }
    }

    stem.replace('.', " ")
}

/// Uppercase the first character if it is a lowercase letter.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_extension() {
        assert_eq!(media_extension("movie.mkv"), Some("mkv"));
        assert_eq!(media_extension("movie.MKV"), Some("MKV"));
        assert_eq!(media_extension("clip.ts"), Some("ts"));
        assert_eq!(media_extension("movie.srt"), None);
        assert_eq!(media_extension("movie"), None);
    }

    #[test]
    fn test_bare_ts_suffix_is_not_media() {
        // Only a real ".ts" extension counts.
        assert!(!is_media_file("Cats"));
        assert!(!is_media_file("Credits"));
        assert!(!is_media_file("movie.mkv.parts"));
        assert!(is_media_file("Cats.ts"));
    }

    #[test]
    fn test_normalize_removes_only_extension() {
        assert_eq!(normalize("Alien 1979.mkv", false), "Alien 1979");
        assert_eq!(normalize("Alien.1979.BluRay.x264.mkv", false), "Alien 1979 BluRay x264");
        assert_eq!(normalize("Heat (1995) [1080p].mp4", false), "Heat (1995) [1080p]");
    }

    #[test]
    fn test_normalize_capitalizes_first_letter_only() {
        assert_eq!(normalize("fargo 1996.avi", false), "Fargo 1996");
        assert_eq!(normalize("fargo the FILM.avi", false), "Fargo the FILM");
        assert_eq!(normalize("12 angry men.avi", false), "12 angry men");
    }

    #[test]
    fn test_normalize_passes_non_media_through() {
        assert_eq!(normalize("readme.txt", false), "readme.txt");
        assert_eq!(normalize("movie.nfo", true), "movie.nfo");
        assert_eq!(normalize("Breaking Bad", true), "Breaking Bad");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize("", false), "");
        assert_eq!(normalize("", true), "");
    }

    #[test]
    fn test_strip_after_year() {
        assert_eq!(
            normalize("Alien.1979.Directors.Cut.1080p.BluRay.x264-GRP.mkv", true),
            "Alien 1979"
        );
        assert_eq!(normalize("Heat (1995) [1080p] x265.mp4", true), "Heat (1995)");
        assert_eq!(normalize("Heat [1995].mp4", true), "Heat [1995]");
        assert_eq!(normalize("Blade.Runner.2049.mkv", true), "Blade Runner 2049");
    }

    #[test]
    fn test_strip_skips_resolution_tokens() {
        // "1080p" is not followed by a delimiter, so the real year wins.
        assert_eq!(normalize("Heat.1080p.1995.mkv", true), "Heat 1080p 1995");
    }

    #[test]
    fn test_strip_keeps_leading_year() {
        assert_eq!(normalize("1984 (1956).mkv", true), "1984 (1956)");
        assert_eq!(normalize("2012.2009.720p.mkv", true), "2012 2009 720p");
    }

    #[test]
    fn test_strip_without_year_falls_back() {
        assert_eq!(normalize("Some.Home.Video.mkv", true), "Some Home Video");
    }
}
