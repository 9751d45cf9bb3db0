//! Cursor-based tracklist placement.
//!
//! The renderer walks a node sequence top to bottom, emitting absolute
//! positions and advancing a vertical cursor by the exact height each node
//! consumes, so nodes never overlap regardless of wrap counts. Side B's
//! header position derives from Side A's solved line count, and track
//! numbering runs continuously across the whole release.

use tapecard::model::{
    GroupNode, LayoutMode, LayoutNode, LayoutPrefs, RecordingInfo, SideLabel, SingleNode,
};

use crate::measure;
use crate::render_ir::{
    DrawCommand, FontWeight, RectCommand, RectRole, RuleCommand, TextAnchor, TextCommand,
    TextRole, TextRotation,
};
use crate::sizing::{
    movement_numeral, strip_movement_prefix, PanelConfig, PanelMetrics, RenderStrategy,
    MAX_NOTE_LINES, WORK_ONLY_TAIL, WRAP_CONTINUATION,
};

/// Inset applied to the duration/divider edge when a spine note reserves
/// room on that side of the panel.
const NOTE_EDGE_INSET: f32 = 20.0;
/// Side badge chip size.
const BADGE_WIDTH: f32 = 40.0;
const BADGE_HEIGHT: f32 = 20.0;
/// Note lines step at this multiple of the note font size.
const NOTE_LINE_STEP: f32 = 1.2;
/// Continuation lines of a wrapped track title indent by this much.
const TITLE_CONTINUATION_INDENT: f32 = 28.0;

/// One side's content and its printed total duration.
pub struct SideContent<'a> {
    pub label: SideLabel,
    pub nodes: &'a [LayoutNode],
    pub duration: &'a str,
    /// Track-number offset: Side B passes Side A's track count so printed
    /// numbering stays unique and monotonic across the release.
    pub number_offset: usize,
}

/// Renders a two-side tracklist panel.
pub struct TrackListRenderer<'a> {
    cfg: &'a PanelConfig,
    metrics: PanelMetrics,
    strategy: RenderStrategy,
    mode: LayoutMode,
    panel_width: f32,
    prefs: &'a LayoutPrefs,
}

impl<'a> TrackListRenderer<'a> {
    pub fn new(
        cfg: &'a PanelConfig,
        metrics: PanelMetrics,
        strategy: RenderStrategy,
        mode: LayoutMode,
        panel_width: f32,
        prefs: &'a LayoutPrefs,
    ) -> Self {
        Self {
            cfg,
            metrics,
            strategy,
            mode,
            panel_width,
            prefs,
        }
    }

    /// Lay out both sides plus headers and the divider.
    pub fn render(&self, side_a: &SideContent<'_>, side_b: &SideContent<'_>) -> Vec<DrawCommand> {
        let cfg = self.cfg;
        let line_height = self.metrics.sizing.line_height;

        let y_header_a = cfg.margin_y;
        let y_list_a = y_header_a + cfg.header_height;
        // Side A's solved line count, not the rough estimate, fixes the
        // divider so Side B can never start above Side A's last line.
        let height_a = self.metrics.visual_lines_a * line_height;
        let y_divider = y_list_a + height_a + cfg.gap_between_sides / 2.0;
        let y_header_b = y_divider + cfg.gap_between_sides / 2.0;
        let y_list_b = y_header_b + cfg.header_height;

        let mut commands = Vec::new();
        self.push_side_header(&mut commands, side_a, y_header_a);
        self.push_side(&mut commands, side_a, y_list_a);

        commands.push(DrawCommand::Rule(RuleCommand {
            x1: cfg.side_padding,
            y1: y_divider,
            x2: self.duration_edge_x() - self.trailing_gap(),
            y2: y_divider,
        }));

        self.push_side_header(&mut commands, side_b, y_header_b);
        self.push_side(&mut commands, side_b, y_list_b);
        commands
    }

    /// Right edge for right-anchored chrome, inset for spine notes.
    fn duration_edge_x(&self) -> f32 {
        let mut edge = self.panel_width - self.cfg.side_padding;
        if !self.prefs.note_lower.is_empty() {
            edge -= NOTE_EDGE_INSET;
        }
        if !self.prefs.note_upper.is_empty() {
            edge -= NOTE_EDGE_INSET;
        }
        edge
    }

    fn trailing_gap(&self) -> f32 {
        self.cfg.side_padding
    }

    fn push_side_header(
        &self,
        commands: &mut Vec<DrawCommand>,
        side: &SideContent<'_>,
        y_header: f32,
    ) {
        let cfg = self.cfg;
        commands.push(DrawCommand::Rect(RectCommand {
            x: cfg.side_padding,
            y: y_header - BADGE_HEIGHT * 0.75,
            width: BADGE_WIDTH,
            height: BADGE_HEIGHT,
            role: RectRole::SideBadgeChip,
        }));
        commands.push(DrawCommand::Text(TextCommand {
            x: cfg.side_padding + BADGE_WIDTH / 2.0,
            y: y_header,
            text: side.label.letter().to_string(),
            font_size: 14.0,
            weight: FontWeight::Bold,
            anchor: TextAnchor::Middle,
            role: TextRole::SideBadge,
            rotation: TextRotation::None,
        }));
        if !cfg.compact {
            commands.push(DrawCommand::Text(TextCommand {
                x: cfg.side_padding + BADGE_WIDTH + 10.0,
                y: y_header,
                text: format!("SIDE {}", side.label.letter()),
                font_size: 14.0,
                weight: FontWeight::Bold,
                anchor: TextAnchor::Start,
                role: TextRole::SideLabel,
                rotation: TextRotation::None,
            }));
        }
        let extra = if cfg.compact { 0.0 } else { NOTE_EDGE_INSET };
        commands.push(DrawCommand::Text(TextCommand {
            x: self.duration_edge_x() - extra,
            y: y_header,
            text: side.duration.to_string(),
            font_size: 12.0,
            weight: FontWeight::Regular,
            anchor: TextAnchor::End,
            role: TextRole::SideDuration,
            rotation: TextRotation::None,
        }));
    }

    fn push_side(&self, commands: &mut Vec<DrawCommand>, side: &SideContent<'_>, y_list: f32) {
        let mut cursor = 0.0f32;
        let mut index = side.number_offset;
        for node in side.nodes {
            match node {
                LayoutNode::Group(group) => {
                    self.push_group(commands, group, y_list, &mut cursor);
                    index += group.tracks.len();
                }
                LayoutNode::Single(single) => {
                    index += 1;
                    self.push_single(commands, single, index, y_list, &mut cursor);
                }
            }
        }
    }

    fn push_group(
        &self,
        commands: &mut Vec<DrawCommand>,
        group: &GroupNode,
        y_list: f32,
        cursor: &mut f32,
    ) {
        let cfg = self.cfg;
        let sizing = self.metrics.sizing;
        let lh = sizing.line_height;

        let header_lines = measure::wrap(&group.title, cfg.header_wrap_units);
        for (line_idx, line) in header_lines.iter().enumerate() {
            commands.push(DrawCommand::Text(TextCommand {
                x: cfg.side_padding - 5.0,
                y: y_list + *cursor + lh * 0.6 + line_idx as f32 * lh * WRAP_CONTINUATION,
                text: line.clone(),
                font_size: sizing.group_header_font_size,
                weight: FontWeight::Bold,
                anchor: TextAnchor::Start,
                role: TextRole::GroupHeader,
                rotation: TextRotation::None,
            }));
        }
        *cursor += lh + (header_lines.len() as f32 - 1.0) * lh * WRAP_CONTINUATION;

        match self.strategy {
            RenderStrategy::InlineCompact => {
                let joined = self.rendered_joined_movements(group);
                let content_lines = measure::wrap(&joined, cfg.content_wrap_units);
                for (line_idx, line) in content_lines.iter().enumerate() {
                    commands.push(DrawCommand::Text(TextCommand {
                        x: cfg.side_padding,
                        y: y_list + *cursor + lh * 0.5 + line_idx as f32 * lh * WRAP_CONTINUATION,
                        text: line.clone(),
                        font_size: sizing.track_font_size - 1.0,
                        weight: FontWeight::Regular,
                        anchor: TextAnchor::Start,
                        role: TextRole::GroupContent,
                        rotation: TextRotation::None,
                    }));
                }
                *cursor += content_lines.len() as f32 * lh * WRAP_CONTINUATION + lh * 0.3;
            }
            RenderStrategy::WorkOnly => {
                *cursor += lh * WORK_ONLY_TAIL;
            }
            RenderStrategy::Standard => {
                for member in &group.tracks {
                    commands.push(DrawCommand::Text(TextCommand {
                        x: cfg.side_padding + 15.0,
                        y: y_list + *cursor + lh * 0.5,
                        text: format!("\u{2022} {}", member.display_title),
                        font_size: sizing.track_font_size,
                        weight: FontWeight::Regular,
                        anchor: TextAnchor::Start,
                        role: TextRole::Track,
                        rotation: TextRotation::None,
                    }));
                    *cursor += lh;
                }
            }
        }
    }

    /// Movement line as printed. Classical panels drop the numeral prefix
    /// (the header already names the work); the sizing estimate keeps it.
    fn rendered_joined_movements(&self, group: &GroupNode) -> String {
        group
            .tracks
            .iter()
            .enumerate()
            .map(|(idx, member)| {
                let clean = strip_movement_prefix(&member.display_title, true);
                if self.mode == LayoutMode::Classical {
                    clean.to_string()
                } else {
                    format!("{}. {}", movement_numeral(idx), clean)
                }
            })
            .collect::<Vec<_>>()
            .join(" / ")
    }

    fn push_single(
        &self,
        commands: &mut Vec<DrawCommand>,
        single: &SingleNode,
        number: usize,
        y_list: f32,
        cursor: &mut f32,
    ) {
        let cfg = self.cfg;
        let sizing = self.metrics.sizing;
        let lh = sizing.line_height;
        let this_y = *cursor;

        let has_note = sizing.show_notes && !single.track.note.is_empty();
        let note_lines = if has_note {
            measure::wrap(&single.track.note, cfg.note_wrap_units)
        } else {
            Vec::new()
        };
        let title_lines = measure::wrap(&single.display_title, cfg.header_wrap_units);
        let first_line_center = if has_note { 0.35 } else { 0.5 };

        for (line_idx, line) in title_lines.iter().enumerate() {
            let (x, text) = if line_idx == 0 {
                let mut text = format!("{number:02}. {line}");
                if self.mode == LayoutMode::Compilation && !cfg.compact {
                    text.push_str(&format!(" - {}", single.track.artist));
                }
                if !cfg.compact {
                    text.push_str(&format!(" ({})", single.track.duration));
                }
                (cfg.side_padding, text)
            } else {
                (cfg.side_padding + TITLE_CONTINUATION_INDENT, line.clone())
            };
            commands.push(DrawCommand::Text(TextCommand {
                x,
                y: y_list
                    + this_y
                    + lh * first_line_center
                    + line_idx as f32 * lh * WRAP_CONTINUATION,
                text,
                font_size: sizing.track_font_size,
                weight: FontWeight::Regular,
                anchor: TextAnchor::Start,
                role: TextRole::Track,
                rotation: TextRotation::None,
            }));
        }

        *cursor += lh + (title_lines.len() as f32 - 1.0) * lh * WRAP_CONTINUATION;

        if has_note {
            let shown = note_lines.len().min(MAX_NOTE_LINES);
            let note_base =
                y_list + this_y + lh * 0.7 + (title_lines.len() as f32 - 1.0) * lh * WRAP_CONTINUATION;
            for (note_idx, line) in note_lines.iter().take(shown).enumerate() {
                commands.push(DrawCommand::Text(TextCommand {
                    x: cfg.side_padding + 25.0,
                    y: note_base + note_idx as f32 * sizing.note_font_size * NOTE_LINE_STEP,
                    text: line.clone(),
                    font_size: sizing.note_font_size,
                    weight: FontWeight::Regular,
                    anchor: TextAnchor::Start,
                    role: TextRole::Note,
                    rotation: TextRotation::None,
                }));
            }
            *cursor += shown as f32 * sizing.note_font_size * NOTE_LINE_STEP;
        }
    }
}

/// Recording-spec panel replacing the tracklist on classical compact flaps.
///
/// Commands are rotated a quarter turn clockwise; coordinates run along the
/// card's long edge, origin at the panel's top-right corner.
pub fn render_spec_panel(
    recording: &RecordingInfo,
    tape_subtitle: &str,
    note_upper: &str,
    sheet_height: f32,
) -> Vec<DrawCommand> {
    const EDGE_MARGIN: f32 = 50.0;
    const EQUIPMENT_X: f32 = 380.0;
    const EQUIPMENT_WRAP_UNITS: f32 = 54.0;
    const DATE_BLOCK_SPAN: f32 = 140.0;

    let spec_text = |x: f32, y: f32, text: String, size: f32, weight, anchor, role| {
        DrawCommand::Text(TextCommand {
            x,
            y,
            text,
            font_size: size,
            weight,
            anchor,
            role,
            rotation: TextRotation::Cw90,
        })
    };

    let label = if !recording.label_override.is_empty() {
        recording.label_override.as_str()
    } else if !tape_subtitle.is_empty() {
        tape_subtitle
    } else {
        "LABEL INFO"
    };
    let source = if recording.source.is_empty() {
        "N/A"
    } else {
        recording.source.as_str()
    };
    let released = if note_upper.is_empty() { "2024" } else { note_upper };
    let recorded = if recording.rec_date.is_empty() {
        "2025.01.01"
    } else {
        recording.rec_date.as_str()
    };
    let equipment = if recording.equipment.is_empty() {
        "N/A"
    } else {
        recording.equipment.as_str()
    };

    let mut commands = vec![
        spec_text(
            EDGE_MARGIN,
            40.0,
            label.to_uppercase(),
            24.0,
            FontWeight::Bold,
            TextAnchor::Start,
            TextRole::SpecValue,
        ),
        spec_text(
            EDGE_MARGIN,
            90.0,
            "SOURCE".to_string(),
            14.0,
            FontWeight::Regular,
            TextAnchor::Start,
            TextRole::SpecLabel,
        ),
        spec_text(
            EDGE_MARGIN + 90.0,
            90.0,
            source.to_string(),
            18.0,
            FontWeight::Bold,
            TextAnchor::Start,
            TextRole::SpecValue,
        ),
        DrawCommand::Rule(RuleCommand {
            x1: EDGE_MARGIN,
            y1: 130.0,
            x2: sheet_height - EDGE_MARGIN,
            y2: 130.0,
        }),
        spec_text(
            EQUIPMENT_X,
            40.0,
            "EQUIPMENT".to_string(),
            14.0,
            FontWeight::Regular,
            TextAnchor::Start,
            TextRole::SpecLabel,
        ),
    ];

    for (idx, line) in measure::wrap(equipment, EQUIPMENT_WRAP_UNITS).iter().enumerate() {
        commands.push(spec_text(
            EQUIPMENT_X,
            70.0 + idx as f32 * 24.0,
            line.clone(),
            18.0,
            FontWeight::Bold,
            TextAnchor::Start,
            TextRole::SpecValue,
        ));
    }

    let date_x = sheet_height - EDGE_MARGIN;
    commands.extend([
        spec_text(
            date_x,
            40.0,
            "RELEASED".to_string(),
            14.0,
            FontWeight::Regular,
            TextAnchor::End,
            TextRole::SpecLabel,
        ),
        spec_text(
            date_x,
            70.0,
            released.to_string(),
            24.0,
            FontWeight::Bold,
            TextAnchor::End,
            TextRole::SpecValue,
        ),
        spec_text(
            date_x - DATE_BLOCK_SPAN,
            40.0,
            "RECORDED".to_string(),
            14.0,
            FontWeight::Regular,
            TextAnchor::End,
            TextRole::SpecLabel,
        ),
        spec_text(
            date_x - DATE_BLOCK_SPAN,
            70.0,
            recorded.to_string(),
            24.0,
            FontWeight::Bold,
            TextAnchor::End,
            TextRole::SpecValue,
        ),
    ]);

    commands
}
