//! Render IR and layout engine for `tapecard`.
//!
//! Turns one [`CardInput`](tapecard::model::CardInput) snapshot into
//! positioned, backend-agnostic draw commands for the four panels of a
//! cassette J-card. Pure computation throughout: no I/O, no drawing
//! surface, no retained state between calls.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod card;
mod measure;
mod render_ir;
mod sizing;
pub mod snapshot;
mod title_block;
mod tracklist;

pub use card::CardLayoutEngine;
pub use measure::{char_weight, text_width, wrap, wrapped_line_count, SPACE_WIDTH};
pub use render_ir::{
    CardGeometry, CardLayout, DrawCommand, FontWeight, Panel, PanelKind, RectCommand, RectRole,
    RuleCommand, TextAnchor, TextCommand, TextRole, TextRotation,
};
pub use sizing::{solve_panel, PanelConfig, PanelMetrics, RenderStrategy, SizingResult};
pub use snapshot::{SnapshotError, SNAPSHOT_VERSION};
pub use title_block::{
    badge_lines, front_stack, render_front, render_spine, spine_title_size, title_layout,
    FrontStack, TitleLayout,
};
pub use tracklist::{render_spec_panel, SideContent, TrackListRenderer};
