//! Two-pass panel size solving.
//!
//! Pass one estimates line count without wrapping to pick a rough line
//! height and fix the note-visibility gate. Pass two recounts lines with
//! real wrapping under the active render strategy and derives the final
//! clamped line height and font sizes. The second pass is a refinement,
//! not a fixed-point iteration: its wrap thresholds depend only on
//! compactness, so one refinement is all the original design ever does,
//! and pathological inputs near a wrap-threshold boundary can leave the
//! pass-one note gate at odds with the pass-two count. That divergence is
//! a known limitation of the tuned layout, kept as-is.

use serde::{Deserialize, Serialize};
use tapecard::model::{GroupNode, LayoutMode, LayoutNode};

use crate::measure;

/// Line-height share consumed by each wrapped continuation line.
pub(crate) const WRAP_CONTINUATION: f32 = 0.85;
/// Estimated weight of one group-header line.
const HEADER_LINE_WEIGHT: f32 = 0.9;
/// Extra estimated gap after an inline-compact movement block.
const INLINE_TAIL: f32 = 0.3;
/// Estimated trailer under a work-only group header.
pub(crate) const WORK_ONLY_TAIL: f32 = 0.2;
/// Estimated weight of one note line.
const NOTE_LINE_WEIGHT: f32 = 0.6;
/// Notes never occupy more than this many lines.
pub(crate) const MAX_NOTE_LINES: usize = 2;
/// Rough line height above which per-track notes fit comfortably.
const NOTE_GATE_LINE_HEIGHT: f32 = 45.0;
/// Rough-pass fallback when a panel has no lines at all.
const ROUGH_FALLBACK_LINE_HEIGHT: f32 = 50.0;
/// Font size as a share of line height.
const FONT_RATIO: f32 = 0.55;
/// Group headers render this much larger than track lines.
const HEADER_FONT_STEP: f32 = 2.0;
/// Floor for note text legibility.
const MIN_NOTE_FONT: f32 = 8.0;

/// Textual strategy for the tracklist, decided by mode × compactness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderStrategy {
    /// One line per track.
    Standard,
    /// Group header plus one joined, wrapped line of all movements.
    InlineCompact,
    /// Group headers only; movements collapse into a small trailer.
    WorkOnly,
}

impl RenderStrategy {
    /// The strategy table. Classical releases compress on compact panels
    /// and inline their movements elsewhere; everything else lists tracks.
    pub fn for_panel(mode: LayoutMode, compact: bool) -> Self {
        match (mode, compact) {
            (LayoutMode::Classical, true) => Self::WorkOnly,
            (LayoutMode::Classical, false) => Self::InlineCompact,
            (LayoutMode::Standard | LayoutMode::Compilation, _) => Self::Standard,
        }
    }
}

/// Per-compactness layout bounds and wrap thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Tightened bounds for the narrow flap panel.
    pub compact: bool,
    /// Top margin above the Side A header.
    pub margin_y: f32,
    /// Height reserved for each side header row.
    pub header_height: f32,
    /// Bottom footer reserve.
    pub footer_height: f32,
    /// Vertical gap between Side A content and the Side B header.
    pub gap_between_sides: f32,
    /// Left inset for list content.
    pub side_padding: f32,
    /// Final line-height clamp.
    pub min_line_height: f32,
    pub max_line_height: f32,
    /// Final track-font clamp.
    pub min_font: f32,
    pub max_font: f32,
    /// Wrap budget for titles and group headers, in measure units.
    pub header_wrap_units: f32,
    /// Wrap budget for joined movement lines.
    pub content_wrap_units: f32,
    /// Wrap budget for note lines.
    pub note_wrap_units: f32,
}

impl PanelConfig {
    /// Bounds for the full-width back panel.
    pub const fn full() -> Self {
        Self {
            compact: false,
            margin_y: 80.0,
            header_height: 50.0,
            footer_height: 60.0,
            gap_between_sides: 60.0,
            side_padding: 40.0,
            min_line_height: 30.0,
            max_line_height: 110.0,
            min_font: 12.0,
            max_font: 25.0,
            header_wrap_units: 55.0,
            content_wrap_units: 95.0,
            note_wrap_units: 60.0,
        }
    }

    /// Bounds for the short-back flap.
    pub const fn compact() -> Self {
        Self {
            compact: true,
            margin_y: 60.0,
            header_height: 25.0,
            footer_height: 40.0,
            gap_between_sides: 20.0,
            side_padding: 40.0,
            min_line_height: 16.0,
            max_line_height: 50.0,
            min_font: 8.0,
            max_font: 15.0,
            header_wrap_units: 18.0,
            content_wrap_units: 28.0,
            note_wrap_units: 40.0,
        }
    }

    /// Vertical pixels left for track lines after fixed chrome.
    ///
    /// Chrome is the top margin, one header row per side, the inter-side
    /// gap, and the footer reserve.
    pub fn available_height(&self, sheet_height: f32) -> f32 {
        let chrome = self.margin_y
            + self.header_height
            + self.gap_between_sides
            + self.header_height
            + self.footer_height;
        sheet_height - chrome
    }
}

/// Solved metrics for one panel.
///
/// Purely a function of (node sequences, budget, compactness, strategy);
/// identical inputs always produce identical results.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub line_height: f32,
    pub track_font_size: f32,
    pub group_header_font_size: f32,
    pub note_font_size: f32,
    /// Whether per-track note lines render on this panel. Fixed by the
    /// rough pass; compact panels never show notes.
    pub show_notes: bool,
}

/// Sizing plus the per-side estimated line counts the renderer needs for
/// the divider position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelMetrics {
    pub sizing: SizingResult,
    pub visual_lines_a: f32,
    pub visual_lines_b: f32,
}

/// Rough pass: one line per single, header plus one line per member for
/// groups, wrapping ignored.
fn rough_line_count(nodes: &[LayoutNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            LayoutNode::Single(_) => 1,
            LayoutNode::Group(group) => 1 + group.tracks.len(),
        })
        .sum()
}

/// Strip a roman-numeral movement prefix like `II. `.
///
/// The sizing estimate strips pure roman prefixes; rendering also accepts
/// digits (`2. `). Both behaviors are tuned-in, so the accepted alphabet is
/// a parameter.
pub(crate) fn strip_movement_prefix(title: &str, accept_digits: bool) -> &str {
    let mut run_len = 0usize;
    for (idx, ch) in title.char_indices() {
        let is_prefix_char = matches!(ch, 'I' | 'V' | 'X') || (accept_digits && ch.is_ascii_digit());
        if is_prefix_char {
            run_len = idx + ch.len_utf8();
        } else if ch == '.' && run_len > 0 {
            return title[idx + 1..].trim_start();
        } else {
            return title;
        }
    }
    title
}

/// Roman numeral for a movement index, falling back to arabic numbers past
/// eight movements.
pub(crate) fn movement_numeral(index: usize) -> String {
    const ROMAN: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];
    ROMAN
        .get(index)
        .map(|r| (*r).to_string())
        .unwrap_or_else(|| (index + 1).to_string())
}

/// Joined movement line used by the sizing estimate.
///
/// Estimation always includes the numeral prefixes even though classical
/// rendering drops them; the estimate was tuned against the prefixed form.
fn estimated_joined_movements(group: &GroupNode) -> String {
    group
        .tracks
        .iter()
        .enumerate()
        .map(|(idx, member)| {
            let clean = strip_movement_prefix(&member.display_title, false);
            format!("{}. {}", movement_numeral(idx), clean)
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Real pass: visual line count for one side under the active strategy,
/// in line-height units.
pub(crate) fn estimated_visual_lines(
    nodes: &[LayoutNode],
    cfg: &PanelConfig,
    strategy: RenderStrategy,
    show_notes: bool,
) -> f32 {
    nodes
        .iter()
        .map(|node| match node {
            LayoutNode::Group(group) => {
                let header_lines =
                    measure::wrapped_line_count(&group.title, cfg.header_wrap_units) as f32;
                let mut height = header_lines * HEADER_LINE_WEIGHT;
                match strategy {
                    RenderStrategy::InlineCompact => {
                        let joined = estimated_joined_movements(group);
                        let content_lines =
                            measure::wrapped_line_count(&joined, cfg.content_wrap_units) as f32;
                        height += content_lines * WRAP_CONTINUATION + INLINE_TAIL;
                    }
                    RenderStrategy::WorkOnly => {
                        height += WORK_ONLY_TAIL;
                    }
                    RenderStrategy::Standard => {
                        height += group.tracks.len() as f32;
                    }
                }
                height
            }
            LayoutNode::Single(single) => {
                let title_lines =
                    measure::wrapped_line_count(&single.display_title, cfg.header_wrap_units)
                        as f32;
                let note_height = if show_notes && !single.track.note.is_empty() {
                    let note_lines =
                        measure::wrapped_line_count(&single.track.note, cfg.note_wrap_units);
                    note_lines.min(MAX_NOTE_LINES) as f32 * NOTE_LINE_WEIGHT
                } else {
                    0.0
                };
                1.0 + (title_lines - 1.0) * WRAP_CONTINUATION + note_height
            }
        })
        .sum()
}

/// Solve line height and font sizes for one panel.
pub fn solve_panel(
    nodes_a: &[LayoutNode],
    nodes_b: &[LayoutNode],
    cfg: &PanelConfig,
    strategy: RenderStrategy,
    available_height: f32,
) -> PanelMetrics {
    // Pass one: wrapping-free estimate fixes the note gate for good.
    let rough_total = rough_line_count(nodes_a) + rough_line_count(nodes_b);
    let rough_line_height = if rough_total > 0 {
        available_height / rough_total as f32
    } else {
        ROUGH_FALLBACK_LINE_HEIGHT
    };
    let show_notes = !cfg.compact && rough_line_height > NOTE_GATE_LINE_HEIGHT;

    // Pass two: recount with real wrapping under the active strategy.
    let visual_lines_a = estimated_visual_lines(nodes_a, cfg, strategy, show_notes);
    let visual_lines_b = estimated_visual_lines(nodes_b, cfg, strategy, show_notes);
    let total_lines = visual_lines_a + visual_lines_b;

    let line_height = if total_lines > 0.0 {
        (available_height / total_lines).clamp(cfg.min_line_height, cfg.max_line_height)
    } else {
        log::warn!("panel has no visual lines, falling back to max line height");
        cfg.max_line_height
    };

    let track_font_size = (line_height * FONT_RATIO)
        .floor()
        .clamp(cfg.min_font, cfg.max_font);
    let group_header_font_size =
        (track_font_size + HEADER_FONT_STEP).min(cfg.max_font + HEADER_FONT_STEP);
    let note_font_size = (track_font_size * 0.6).max(MIN_NOTE_FONT);

    log::debug!(
        "panel sizing: rough {rough_total} lines, real {total_lines:.2}, \
         line height {line_height:.1}, font {track_font_size}, notes {show_notes}"
    );

    PanelMetrics {
        sizing: SizingResult {
            line_height,
            track_font_size,
            group_header_font_size,
            note_font_size,
            show_notes,
        },
        visual_lines_a,
        visual_lines_b,
    }
}
