//! Plain data model consumed by the layout engine.
//!
//! Everything here is an already-resolved value: the metadata-import and
//! content-enhancement collaborators run upstream and hand the engine plain
//! strings and durations. Layout never mutates these types; each recompute
//! receives a fresh [`CardInput`] snapshot and derives everything from it.

use serde::{Deserialize, Serialize};

/// One track as it appears in print order.
///
/// Identity is positional: a track has no stable id beyond its index within
/// its side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track title as imported (or edited upstream).
    pub title: String,
    /// Track artist; meaningful on compilations.
    pub artist: String,
    /// Preformatted `m:ss` duration string.
    pub duration: String,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Optional free-text note supplied by the enhancement collaborator.
    pub note: String,
}

impl Track {
    /// Build a track from title/artist and a millisecond duration.
    pub fn new(title: impl Into<String>, artist: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            duration: crate::duration::format_duration_ms(duration_ms),
            duration_ms,
            note: String::new(),
        }
    }
}

/// Which physical side of the tape a sequence belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideLabel {
    A,
    B,
}

impl SideLabel {
    /// Single-letter form used on the printed side badge.
    pub fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

/// Ordered track sequence for one side. Insertion order is print order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Side {
    pub tracks: Vec<Track>,
}

impl Side {
    /// Wrap an ordered track list.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Total running time in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.tracks.iter().map(|t| t.duration_ms).sum()
    }

    /// Total running time as a `m:ss` string.
    pub fn total_formatted(&self) -> String {
        crate::duration::format_duration_ms(self.total_ms())
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Album-level metadata used only by mode detection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumMeta {
    pub title: String,
    /// Album artist credit. The literal "Various Artists" marks a compilation.
    pub artist: String,
    /// Release-group secondary types, e.g. "Compilation", "Live".
    pub secondary_types: Vec<String>,
    /// Release date, when known.
    pub date: Option<String>,
}

/// Free-standing style data consumed by the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Card background color (hex string, opaque to the engine).
    pub background: String,
    /// Accent color used for track numbers and the spine.
    pub accent: String,
    /// Optional mood line appended after the artist on the front panel.
    pub mood_description: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#121212".to_string(),
            accent: "#cc3300".to_string(),
            mood_description: String::new(),
        }
    }
}

/// Per-card appearance flags and the active layout mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutPrefs {
    /// Short note printed near the top of the spine (often the release year).
    pub note_upper: String,
    /// Short note printed near the bottom of the spine.
    pub note_lower: String,
    /// Uppercase spine and label text.
    pub force_caps: bool,
    /// Render the spine without the accent fill.
    pub minimal_spine: bool,
    /// Active mode; detected at import, overridable upstream.
    pub mode: LayoutMode,
}

impl Default for LayoutPrefs {
    fn default() -> Self {
        Self {
            note_upper: String::new(),
            note_lower: String::new(),
            force_caps: true,
            minimal_spine: false,
            mode: LayoutMode::Standard,
        }
    }
}

/// Recording metadata shown on the classical compact flap.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingInfo {
    /// Deck / chain description, wrapped onto the spec panel.
    pub equipment: String,
    /// Dolby/bias mode marker, e.g. "AAA".
    pub mode: String,
    /// Overrides the tape subtitle as the spec-panel label.
    pub label_override: String,
    /// Source medium, e.g. "VINYL", "FLAC".
    pub source: String,
    /// Recording date, preformatted upstream.
    pub rec_date: String,
}

/// The externally-owned snapshot handed to the engine on every recompute.
///
/// The engine holds no state between calls: identical snapshots produce
/// identical layouts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardInput {
    pub title: String,
    pub artist: String,
    /// Catalog/tape identifier printed on the spine.
    pub tape_id: String,
    /// Label line, e.g. "STEREO" or the record label.
    pub tape_subtitle: String,
    /// Optional blurb/slogan under the front title.
    pub cover_badge: String,
    pub side_a: Side,
    pub side_b: Side,
    pub prefs: LayoutPrefs,
    pub theme: Theme,
    pub recording: RecordingInfo,
}

/// How the tracklist is interpreted and printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutMode {
    /// One numbered line per track.
    #[default]
    Standard,
    /// Work-grouped hierarchy with movement lines.
    Classical,
    /// Various-artists release; track lines carry per-track artists.
    Compilation,
}

/// A grouped tracklist entry: either a standalone track or a work with
/// member movements.
///
/// Flattening the node sequence in order reproduces the source side exactly;
/// grouping is a pure partition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LayoutNode {
    Single(SingleNode),
    Group(GroupNode),
}

/// A standalone track (or a movement inside a group).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SingleNode {
    pub track: Track,
    /// Title as printed: the original title for top-level singles, the
    /// de-prefixed suffix for group members.
    pub display_title: String,
}

/// A detected work: shared title stem plus its member movements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    /// Shared stem with the trailing delimiter stripped.
    pub title: String,
    pub tracks: Vec<SingleNode>,
}

impl LayoutNode {
    /// Number of source tracks this node covers.
    pub fn track_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Group(group) => group.tracks.len(),
        }
    }
}
