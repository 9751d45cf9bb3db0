//! Front-panel title stack and spine line placement.
//!
//! The front title uses a single bold display font, so wrapping here counts
//! characters instead of weighted widths. Presets tighten as the title
//! grows, and the artist line is clamped down to a minimum baseline so
//! short stacks don't float under the cover image.

use smallvec::SmallVec;

use crate::render_ir::{
    CardGeometry, DrawCommand, FontWeight, TextAnchor, TextCommand, TextRole, TextRotation,
};

/// At most this many title lines render.
const MAX_TITLE_LINES: usize = 4;
/// Bottom edge of the fixed cover-image area on the front panel.
const IMAGE_BOTTOM: f32 = 780.0;
/// Gap from the image bottom to the first title baseline.
const IMAGE_TITLE_GAP: f32 = 110.0;
/// Gap between the title block and the badge block.
const TITLE_BADGE_GAP: f32 = 20.0;
/// Gap between the badge block and the artist line.
const BADGE_ARTIST_GAP: f32 = 30.0;
/// The artist baseline never sits above this line.
const MIN_ARTIST_Y: f32 = 1120.0;
/// Badge wrap budget in measure units and its fixed line height.
const BADGE_WRAP_UNITS: f32 = 38.0;
const BADGE_LINE_HEIGHT: f32 = 26.0;
const BADGE_FONT_SIZE: f32 = 20.0;
const BADGE_PADDING: f32 = 10.0;
const ARTIST_FONT_SIZE: f32 = 24.0;

/// Solved title typography and wrapped lines.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleLayout {
    pub lines: SmallVec<[String; MAX_TITLE_LINES]>,
    pub font_size: f32,
    pub line_height: f32,
    /// Stack height charged to the title block. Counts every wrapped line,
    /// including ones dropped by the four-line cap; the front stack was
    /// tuned against that accounting.
    pub total_height: f32,
}

/// Pick a preset and wrap the title into at most four lines.
pub fn title_layout(title: &str) -> TitleLayout {
    if title.is_empty() {
        return TitleLayout {
            lines: SmallVec::new(),
            font_size: 64.0,
            line_height: 72.0,
            total_height: 0.0,
        };
    }

    let char_count = title.chars().count();
    let (font_size, line_height, max_chars) = if char_count > 40 {
        (42.0, 48.0, 24)
    } else if char_count > 20 {
        (56.0, 64.0, 16)
    } else {
        (72.0, 80.0, 12)
    };

    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;
    for word in title.split_whitespace() {
        let sep = usize::from(!current.is_empty());
        if current_len + word.chars().count() + sep > max_chars && !current.is_empty() {
            lines.push(current.join(" "));
            current.clear();
            current_len = 0;
        }
        current.push(word);
        current_len += word.chars().count() + 1;
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    let total_height = lines.len() as f32 * line_height;
    TitleLayout {
        lines: lines.into_iter().take(MAX_TITLE_LINES).collect(),
        font_size,
        line_height,
        total_height,
    }
}

/// Vertical anchors of the front stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontStack {
    /// Baseline of the first title line.
    pub title_start_y: f32,
    /// Baseline of the first badge line.
    pub badge_y: f32,
    /// Artist baseline, clamped to [`MIN_ARTIST_Y`].
    pub artist_y: f32,
}

/// Stack title, badge, and artist below the image area.
pub fn front_stack(title: &TitleLayout, badge_line_count: usize) -> FrontStack {
    let badge_height = if badge_line_count > 0 {
        badge_line_count as f32 * BADGE_LINE_HEIGHT + BADGE_PADDING
    } else {
        0.0
    };

    let mut current_y = IMAGE_BOTTOM + IMAGE_TITLE_GAP;
    let title_start_y = current_y;
    current_y += title.total_height + TITLE_BADGE_GAP;

    let badge_y = current_y + 20.0;
    if badge_height > 0.0 {
        current_y += badge_height + BADGE_ARTIST_GAP;
    } else {
        current_y += BADGE_ARTIST_GAP;
    }

    let artist_y = (current_y + 10.0).max(MIN_ARTIST_Y);
    FrontStack {
        title_start_y,
        badge_y,
        artist_y,
    }
}

/// Wrap the badge/blurb text. Empty badges produce no lines (and therefore
/// a zero-height block in the stack).
pub fn badge_lines(badge: &str) -> Vec<String> {
    if badge.is_empty() {
        return Vec::new();
    }
    crate::measure::wrap(badge, BADGE_WRAP_UNITS)
}

/// Emit the front panel's title/badge/artist commands, centered on the
/// panel.
pub fn render_front(
    geometry: &CardGeometry,
    title_text: &str,
    badge_text: &str,
    artist_line: &str,
) -> Vec<DrawCommand> {
    let center_x = geometry.front_width / 2.0;
    let title = title_layout(title_text);
    let badge = badge_lines(badge_text);
    let stack = front_stack(&title, badge.len());

    let mut commands = Vec::new();
    for (idx, line) in title.lines.iter().enumerate() {
        commands.push(DrawCommand::Text(TextCommand {
            x: center_x,
            y: stack.title_start_y + idx as f32 * title.line_height,
            text: line.clone(),
            font_size: title.font_size,
            weight: FontWeight::Bold,
            anchor: TextAnchor::Middle,
            role: TextRole::Title,
            rotation: TextRotation::None,
        }));
    }
    for (idx, line) in badge.iter().enumerate() {
        commands.push(DrawCommand::Text(TextCommand {
            x: center_x,
            y: stack.badge_y + idx as f32 * BADGE_LINE_HEIGHT,
            text: line.clone(),
            font_size: BADGE_FONT_SIZE,
            weight: FontWeight::Bold,
            anchor: TextAnchor::Middle,
            role: TextRole::Badge,
            rotation: TextRotation::None,
        }));
    }
    commands.push(DrawCommand::Text(TextCommand {
        x: center_x,
        y: stack.artist_y,
        text: artist_line.to_string(),
        font_size: ARTIST_FONT_SIZE,
        weight: FontWeight::Regular,
        anchor: TextAnchor::Middle,
        role: TextRole::Artist,
        rotation: TextRotation::None,
    }));
    commands
}

/// Spine title size by length bucket.
pub fn spine_title_size(title: &str) -> f32 {
    let len = title.chars().count();
    if len > 30 {
        24.0
    } else if len > 20 {
        28.0
    } else {
        34.0
    }
}

/// Emit the rotated spine commands.
///
/// Every command anchors on the spine's horizontal center line and rotates
/// a quarter turn counter-clockwise, so text reads bottom-up: the title at
/// the vertical center, the catalog id near the top, the artist near the
/// bottom, optional notes tucked past each.
pub fn render_spine(
    geometry: &CardGeometry,
    title: &str,
    artist: &str,
    tape_id: &str,
    note_upper: &str,
    note_lower: &str,
) -> Vec<DrawCommand> {
    let center_x = geometry.spine_width / 2.0;
    let height = geometry.height;
    let spine_text = |y: f32, text: String, size: f32, weight, role| {
        DrawCommand::Text(TextCommand {
            x: center_x,
            y,
            text,
            font_size: size,
            weight,
            anchor: TextAnchor::Middle,
            role,
            rotation: TextRotation::Ccw90,
        })
    };

    let mut commands = vec![
        spine_text(
            height / 2.0,
            title.to_string(),
            spine_title_size(title),
            FontWeight::Bold,
            TextRole::SpineTitle,
        ),
        spine_text(
            100.0,
            tape_id.to_string(),
            14.0,
            FontWeight::Bold,
            TextRole::SpineId,
        ),
        spine_text(
            height - 150.0,
            artist.to_string(),
            18.0,
            FontWeight::Regular,
            TextRole::SpineArtist,
        ),
    ];
    if !note_upper.is_empty() {
        commands.push(spine_text(
            50.0,
            note_upper.to_string(),
            10.0,
            FontWeight::Regular,
            TextRole::SpineNote,
        ));
    }
    if !note_lower.is_empty() {
        commands.push(spine_text(
            height - 50.0,
            note_lower.to_string(),
            10.0,
            FontWeight::Regular,
            TextRole::SpineNote,
        ));
    }
    commands
}
