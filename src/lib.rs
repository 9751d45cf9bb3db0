//! Track model, duration utilities, and grouping heuristics for cassette
//! J-card layout.
//!
//! This crate owns the plain data the layout engine consumes: tracks and
//! sides, album metadata, theme and appearance flags, and the grouping pass
//! that turns a flat track list into a `Group`/`Single` hierarchy for
//! classical releases. Rendering lives in the `tapecard-render` crate; all
//! I/O (catalog lookups, content enhancement, export) belongs to external
//! collaborators.

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

pub mod duration;
pub mod grouping;
pub mod model;

pub use duration::{format_duration_ms, parse_duration, split_for_sides, ParseDurationError};
pub use grouping::{detect_mode, group_nested, singles_only};
pub use model::{
    AlbumMeta, CardInput, GroupNode, LayoutMode, LayoutNode, LayoutPrefs, RecordingInfo, Side,
    SideLabel, SingleNode, Theme, Track,
};
