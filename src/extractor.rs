//! Music mention extraction.
//!
//! Scans free text (video transcripts, scraped web pages, pasted notes) for
//! phrases that look like references to a record, such as
//! `"Thriller" by Michael Jackson` or `Nirvana - "Nevermind"`, and recovers
//! them as `(artist, title)` pairs.
//!
//! Extraction runs a small, fixed battery of [`MentionPattern`]s over the
//! input. Every pattern scans the whole text independently, so one phrase can
//! be found by more than one pattern; results are therefore deduplicated across
//! the whole call by a case-insensitive `artist::title` key, and the first
//! occurrence wins.
//!
//! The "artist" side of each pattern is a *capitalized run*: a span starting
//! with an uppercase letter and bounded by a maximum length (and, for some
//! patterns, by sentence punctuation). This is a heuristic. Long names, names
//! that start lowercase, or names containing punctuation may be truncated or
//! missed, and a run may swallow words preceding the real name when nothing
//! separates them.
//!
//! All patterns compile to the `regex` crate's finite automata, so matching
//! cost stays linear in the input length regardless of the text.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use crate::types::MentionCandidate;

/// Characters accepted as an opening or closing quote.
const QUOTES: &str = "\"'\u{201C}\u{201D}\u{2018}\u{2019}";

/// Characters that end a punctuation-bounded capitalized run.
const RUN_STOPS: &str = r"\n,.:;!?";

/// Hyphen-minus plus the Unicode dash variants (hyphen … horizontal bar, minus).
const DASHES: &str = r"\-\x{2010}-\x{2015}\x{2212}";

/// Which capture of a pattern holds the title and which holds the artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleMapping {
    /// The first capture is the title, the second the artist.
    TitleThenArtist,
    /// The first capture is the artist, the second the title.
    ArtistThenTitle,
}

impl RoleMapping {
    /// Splits an ordered `(first, second)` capture pair into `(title, artist)`.
    pub fn assign<'t>(self, first: &'t str, second: &'t str) -> (&'t str, &'t str) {
        match self {
            RoleMapping::TitleThenArtist => (first, second),
            RoleMapping::ArtistThenTitle => (second, first),
        }
    }
}

/// One surface pattern of the extraction battery.
///
/// Every pattern has exactly two named captures, `first` and `second`, in
/// textual order; `roles` says which of them is the artist.
pub struct MentionPattern {
    pub name: &'static str,
    pub roles: RoleMapping,
    regex: Regex,
}

impl MentionPattern {
    fn new(name: &'static str, roles: RoleMapping, pattern: &str) -> Self {
        let regex = Regex::new(pattern).expect("mention pattern must compile");
        Self { name, roles, regex }
    }

    /// Yields every non-overlapping `(title, artist)` match in `text`, untrimmed.
    pub fn matches<'t>(&'t self, text: &'t str) -> impl Iterator<Item = (&'t str, &'t str)> + 't {
        self.regex.captures_iter(text).filter_map(move |caps| {
            let first = caps.name("first")?.as_str();
            let second = caps.name("second")?.as_str();
            Some(self.roles.assign(first, second))
        })
    }
}

/// A quoted span of `min..=max` characters captured as `group`.
fn quoted(group: &str, min: usize, max: usize) -> String {
    format!(
        "[{q}](?P<{group}>[^{q}]{{{min},{max}}})[{q}]",
        q = QUOTES,
        group = group,
        min = min,
        max = max
    )
}

/// The battery, in evaluation order. Order only matters for which occurrence
/// of a duplicate pair is kept.
static PATTERNS: LazyLock<Vec<MentionPattern>> = LazyLock::new(|| {
    vec![
        // "Title" by Artist
        MentionPattern::new(
            "quoted-by",
            RoleMapping::TitleThenArtist,
            &format!(
                r"{title}\s+(?i:by)\s+(?P<second>\p{{Lu}}[^{stops}]{{1,59}})",
                title = quoted("first", 3, 80),
                stops = RUN_STOPS
            ),
        ),
        // Artist - "Title"
        MentionPattern::new(
            "artist-dash-quoted",
            RoleMapping::ArtistThenTitle,
            &format!(
                r"(?P<first>\p{{Lu}}[^{stops}]{{1,49}})\s*[{dashes}]\s*{title}",
                stops = RUN_STOPS,
                dashes = DASHES,
                title = quoted("second", 3, 80)
            ),
        ),
        // Artist's "Title"
        MentionPattern::new(
            "possessive-quoted",
            RoleMapping::ArtistThenTitle,
            &format!(
                r"(?P<first>\p{{Lu}}[\p{{L}} ]{{1,49}})['\x{{2019}}]s\s+{title}",
                title = quoted("second", 3, 80)
            ),
        ),
        // "Title" off/from/on [the] [album] Artist
        MentionPattern::new(
            "off-from-on-album",
            RoleMapping::TitleThenArtist,
            &format!(
                r"{title}\s+(?i:off|from|on)\s+(?:(?i:the)\s+)??(?:(?i:album)\s+)??(?P<second>\p{{Lu}}[\p{{L}}\p{{N}}& ]{{1,59}})",
                title = quoted("first", 3, 60)
            ),
        ),
    ]
});

/// Returns the pattern battery in evaluation order.
pub fn patterns() -> &'static [MentionPattern] {
    &PATTERNS
}

/// Case-insensitive identity of a mention: `artist::title`, lowercased.
pub fn dedup_key(artist: &str, title: &str) -> String {
    format!("{}::{}", artist.to_lowercase(), title.to_lowercase())
}

/// Extracts the ordered, deduplicated music mentions found in `text`.
///
/// Never fails: text without recognizable mentions (including the empty
/// string) yields an empty vector. Candidates whose title or artist is blank
/// after trimming are skipped.
///
/// # Example
///
/// ```
/// use musicfinder::extractor::extract;
///
/// let found = extract(r#""Thriller" by Michael Jackson"#);
/// assert_eq!(found[0].artist, "Michael Jackson");
/// assert_eq!(found[0].title, "Thriller");
/// ```
pub fn extract(text: &str) -> Vec<MentionCandidate> {
    let mut found: Vec<MentionCandidate> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for pattern in patterns() {
        for (title, artist) in pattern.matches(text) {
            let title = title.trim();
            let artist = artist.trim();
            if title.is_empty() || artist.is_empty() {
                continue;
            }

            if seen.insert(dedup_key(artist, title)) {
                found.push(MentionCandidate {
                    title: title.to_string(),
                    artist: artist.to_string(),
                });
            }
        }
    }

    found
}
