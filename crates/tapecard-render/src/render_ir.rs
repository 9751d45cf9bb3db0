//! Backend-agnostic draw commands and card geometry.
//!
//! The engine's sole output is a set of positioned commands per panel; it
//! never touches a drawing surface. The presentation collaborator maps
//! roles/weights to concrete fonts and colors.

use serde::{Deserialize, Serialize};
use tapecard::model::LayoutMode;

use crate::sizing::SizingResult;

/// Semantic role of a text line, used by the presentation layer for font
/// family, color, and emphasis decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextRole {
    /// Numbered track line.
    Track,
    /// Work/group header.
    GroupHeader,
    /// Joined movement line under a group header.
    GroupContent,
    /// Per-track note line.
    Note,
    /// `A`/`B` letter inside the side badge chip.
    SideBadge,
    /// `SIDE A` / `SIDE B` label next to the chip.
    SideLabel,
    /// Right-anchored side duration.
    SideDuration,
    /// Front title line.
    Title,
    /// Front badge/blurb line.
    Badge,
    /// Front artist line.
    Artist,
    /// Rotated spine title.
    SpineTitle,
    /// Rotated spine catalog id.
    SpineId,
    /// Rotated spine artist.
    SpineArtist,
    /// Rotated spine upper/lower note.
    SpineNote,
    /// Small caps label on the recording-spec panel.
    SpecLabel,
    /// Value text on the recording-spec panel.
    SpecValue,
}

/// Font weight hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Horizontal anchor of a text command relative to its `x`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Rotation applied around the command's anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextRotation {
    #[default]
    None,
    /// Counter-clockwise quarter turn (spine text reads bottom-up).
    Ccw90,
    /// Clockwise quarter turn (flap spec panel reads top-down).
    Cw90,
}

/// One positioned text line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextCommand {
    /// Anchor x within the panel.
    pub x: f32,
    /// Anchor y within the panel.
    pub y: f32,
    /// Line content.
    pub text: String,
    /// Size in pixels.
    pub font_size: f32,
    pub weight: FontWeight,
    pub anchor: TextAnchor,
    pub role: TextRole,
    pub rotation: TextRotation,
}

/// A straight rule (side divider, spec-panel separator).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleCommand {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Fill role for rectangles, resolved to a color by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RectRole {
    /// Side badge chip behind the `A`/`B` letter.
    SideBadgeChip,
}

/// A filled rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectCommand {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub role: RectRole,
}

/// Layout output commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Text(TextCommand),
    Rule(RuleCommand),
    Rect(RectCommand),
}

impl DrawCommand {
    /// Text payload, when this is a text command.
    pub fn as_text(&self) -> Option<&TextCommand> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// The four physical panels of a J-card, left to right on the print sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelKind {
    /// Narrow flap folded behind the tape (compact tracklist or spec panel).
    ShortBack,
    Spine,
    Front,
    /// Main tracklist panel.
    Back,
}

/// One panel's commands, positioned in panel-local coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub kind: PanelKind,
    /// Panel origin on the sheet.
    pub origin_x: f32,
    pub width: f32,
    pub commands: Vec<DrawCommand>,
}

impl Panel {
    /// Iterate text commands in emission order.
    pub fn text_commands(&self) -> impl Iterator<Item = &TextCommand> {
        self.commands.iter().filter_map(DrawCommand::as_text)
    }
}

/// Fixed print-sheet geometry (Canon 4×6 full bleed, 148×100 mm).
///
/// Arbitrary paper sizes are out of scope; these constants are the whole
/// contract.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardGeometry {
    pub width: f32,
    pub height: f32,
    pub short_back_width: f32,
    pub spine_width: f32,
    pub front_width: f32,
    pub back_width: f32,
}

impl CardGeometry {
    /// The fixed sheet used by every layout.
    pub const fn sheet_defaults() -> Self {
        Self {
            width: 1748.0,
            height: 1181.0,
            short_back_width: 200.0,
            spine_width: 150.0,
            front_width: 780.0,
            back_width: 618.0,
        }
    }

    pub fn short_back_x(&self) -> f32 {
        0.0
    }

    pub fn spine_x(&self) -> f32 {
        self.short_back_width
    }

    pub fn front_x(&self) -> f32 {
        self.short_back_width + self.spine_width
    }

    pub fn back_x(&self) -> f32 {
        self.short_back_width + self.spine_width + self.front_width
    }
}

impl Default for CardGeometry {
    fn default() -> Self {
        Self::sheet_defaults()
    }
}

/// Complete layout for one card: per-panel commands plus the sizing and
/// mode the presentation layer needs for style decisions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    pub geometry: CardGeometry,
    pub mode: LayoutMode,
    /// Sizing solved for the full back panel.
    pub sizing_back: SizingResult,
    /// Sizing solved for the compact short-back flap.
    pub sizing_flap: SizingResult,
    pub panels: Vec<Panel>,
}

impl CardLayout {
    /// Find a panel by kind.
    pub fn panel(&self, kind: PanelKind) -> Option<&Panel> {
        self.panels.iter().find(|p| p.kind == kind)
    }
}
