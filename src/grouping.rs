//! Layout-mode detection and work grouping.
//!
//! Classical releases tend to encode works as repeated title stems
//! ("Sonata No. 2 in B-flat Minor: I. Grave"). The grouping pass partitions
//! a side into `Group`/`Single` nodes by detecting those shared stems; mode
//! detection scores keyword density and stem repetition to decide whether
//! the pass should run at all.

use crate::model::{AlbumMeta, GroupNode, LayoutMode, LayoutNode, SingleNode, Track};

/// Minimum shared-prefix length (in characters) before two adjacent titles
/// are considered part of the same work.
const MIN_GROUP_PREFIX_CHARS: usize = 15;

/// Fraction of keyword-bearing titles above which a release reads as
/// classical.
const CLASSICAL_SCORE_THRESHOLD: f32 = 0.3;

/// Number of detected adjacent stems above which a release reads as
/// classical even without keyword hits.
const MIN_GROUPING_COUNT: usize = 2;

/// Title substrings that mark classical naming conventions.
const CLASSICAL_KEYWORDS: &[&str] = &[
    "Op.", "No.", "Major", "Minor", "Sonata", "Concerto", "Symphony", "BWV", "HWV", "KV",
];

/// Longest common literal prefix of two titles, in characters.
fn common_prefix(a: &str, b: &str) -> String {
    a.chars()
        .zip(b.chars())
        .take_while(|(ca, cb)| ca == cb)
        .map(|(ca, _)| ca)
        .collect()
}

/// Decide the layout mode for a release.
///
/// Compilation signals win outright; otherwise classical keyword density and
/// adjacent-stem repetition are scored. Empty track lists default to
/// [`LayoutMode::Standard`].
pub fn detect_mode(meta: &AlbumMeta, tracks: &[Track]) -> LayoutMode {
    if meta.artist == "Various Artists"
        || meta.secondary_types.iter().any(|t| t == "Compilation")
    {
        return LayoutMode::Compilation;
    }
    if tracks.is_empty() {
        return LayoutMode::Standard;
    }

    let classical_score = tracks
        .iter()
        .filter(|t| CLASSICAL_KEYWORDS.iter().any(|k| t.title.contains(k)))
        .count();

    // Count adjacent pairs sharing a long prefix, skipping the second title
    // of a matched pair so one work is not counted twice.
    let mut grouping_count = 0usize;
    let mut i = 0usize;
    while i + 1 < tracks.len() {
        let prefix = common_prefix(&tracks[i].title, &tracks[i + 1].title);
        if prefix.chars().count() > MIN_GROUP_PREFIX_CHARS {
            grouping_count += 1;
            i += 1;
        }
        i += 1;
    }

    let score_ratio = classical_score as f32 / tracks.len() as f32;
    let mode = if score_ratio > CLASSICAL_SCORE_THRESHOLD || grouping_count >= MIN_GROUPING_COUNT {
        LayoutMode::Classical
    } else {
        LayoutMode::Standard
    };
    log::debug!(
        "mode detection: score {classical_score}/{} groups {grouping_count} -> {mode:?}",
        tracks.len()
    );
    mode
}

/// Locate the work stem inside a shared prefix.
///
/// A prefix only qualifies when it contains a `:` or `-` immediately
/// followed by whitespace; the stem is everything before the last such
/// delimiter. The common prefix of two movement titles usually extends past
/// the delimiter into the first shared letters of the movement names, so the
/// delimiter is rarely at the very end.
fn stem_of(prefix: &str) -> Option<&str> {
    let chars: Vec<char> = prefix.chars().collect();
    let mut stem_end = None;
    let mut byte_pos = 0usize;
    for window in chars.windows(2) {
        if matches!(window[0], ':' | '-') && window[1].is_whitespace() {
            stem_end = Some(byte_pos);
        }
        byte_pos += window[0].len_utf8();
    }
    stem_end.map(|end| &prefix[..end])
}

/// Strip the stem off a member title, leaving the movement name.
fn display_suffix(title: &str, stem: &str) -> String {
    let suffix = title.strip_prefix(stem).unwrap_or(title).trim();
    let suffix = match suffix.strip_prefix([':', '-']) {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => suffix,
    };
    match suffix.strip_prefix('.') {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start().to_string(),
        _ => suffix.to_string(),
    }
}

/// Partition a side into `Group`/`Single` nodes.
///
/// The scan is strictly left to right with no backtracking: once a group
/// boundary is fixed the group extends while titles keep the stem, then the
/// scan resumes after it. Flattening the result reproduces the input
/// exactly.
pub fn group_nested(tracks: &[Track]) -> Vec<LayoutNode> {
    let mut result = Vec::new();
    let mut i = 0usize;
    while i < tracks.len() {
        let stem = tracks.get(i + 1).and_then(|next| {
            let prefix = common_prefix(&tracks[i].title, &next.title);
            if prefix.chars().count() > MIN_GROUP_PREFIX_CHARS {
                stem_of(&prefix).map(str::to_string)
            } else {
                None
            }
        });

        match stem {
            Some(stem) => {
                let mut j = i + 1;
                while j < tracks.len() && tracks[j].title.starts_with(&stem) {
                    j += 1;
                }
                let trimmed = stem.trim();
                let title = trimmed
                    .strip_suffix([':', '-'])
                    .unwrap_or(trimmed)
                    .to_string();
                let members = tracks[i..j]
                    .iter()
                    .map(|t| SingleNode {
                        track: t.clone(),
                        display_title: display_suffix(&t.title, &stem),
                    })
                    .collect();
                result.push(LayoutNode::Group(GroupNode {
                    title,
                    tracks: members,
                }));
                i = j;
            }
            None => {
                result.push(LayoutNode::Single(SingleNode {
                    track: tracks[i].clone(),
                    display_title: tracks[i].title.clone(),
                }));
                i += 1;
            }
        }
    }
    result
}

/// Wrap every track as an ungrouped single, for the non-classical modes.
pub fn singles_only(tracks: &[Track]) -> Vec<LayoutNode> {
    tracks
        .iter()
        .map(|t| {
            LayoutNode::Single(SingleNode {
                track: t.clone(),
                display_title: t.title.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(titles: &[&str]) -> Vec<Track> {
        titles
            .iter()
            .map(|t| Track::new(*t, "Artist", 180_000))
            .collect()
    }

    #[test]
    fn common_prefix_is_literal_and_char_based() {
        assert_eq!(common_prefix("Sonata Op.1: I.", "Sonata Op.1: II."), "Sonata Op.1: I");
        assert_eq!(common_prefix("abc", "xyz"), "");
        assert_eq!(common_prefix("", "anything"), "");
    }

    #[test]
    fn stem_uses_last_delimiter_followed_by_whitespace() {
        assert_eq!(stem_of("Concerto in D - I: A"), Some("Concerto in D - I"));
        assert_eq!(stem_of("Chapter One Suite: D"), Some("Chapter One Suite"));
        assert_eq!(stem_of("No delimiter here"), None);
        // A dash not followed by whitespace does not qualify.
        assert_eq!(stem_of("Self-titled track"), None);
    }

    #[test]
    fn display_suffix_strips_stem_and_leading_delimiters() {
        assert_eq!(display_suffix("Suite: II. Dance", "Suite"), "II. Dance");
        assert_eq!(display_suffix("Suite - Finale", "Suite"), "Finale");
        assert_eq!(display_suffix("Suite. Coda", "Suite"), "Coda");
        assert_eq!(display_suffix("Unrelated", "Suite"), "Unrelated");
    }

    #[test]
    fn short_shared_prefix_stays_ungrouped() {
        // "Chapter One: " is 13 characters, under the grouping threshold.
        let tracks = titled(&["Chapter One: Dawn", "Chapter One: Noon"]);
        let nodes = group_nested(&tracks);
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| matches!(n, LayoutNode::Single(_))));
    }

    #[test]
    fn group_extends_while_stem_matches() {
        let tracks = titled(&[
            "Intro",
            "Chapter One Suite: Dawn",
            "Chapter One Suite: Noon",
            "Chapter One Suite: Dusk",
            "Outro",
        ]);
        let nodes = group_nested(&tracks);
        assert_eq!(nodes.len(), 3);
        match &nodes[1] {
            LayoutNode::Group(group) => {
                assert_eq!(group.title, "Chapter One Suite");
                let titles: Vec<&str> =
                    group.tracks.iter().map(|t| t.display_title.as_str()).collect();
                assert_eq!(titles, ["Dawn", "Noon", "Dusk"]);
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn detect_mode_prefers_compilation_signal() {
        let meta = AlbumMeta {
            artist: "Various Artists".to_string(),
            ..AlbumMeta::default()
        };
        let tracks = titled(&["Sonata Op.1: I. Allegro", "Sonata Op.1: II. Adagio"]);
        assert_eq!(detect_mode(&meta, &tracks), LayoutMode::Compilation);
    }

    #[test]
    fn detect_mode_handles_empty_track_list() {
        assert_eq!(detect_mode(&AlbumMeta::default(), &[]), LayoutMode::Standard);
    }
}
