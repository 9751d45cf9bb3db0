//! Full-card assembly: one input snapshot in, four panels of commands out.

use tapecard::grouping;
use tapecard::model::{CardInput, LayoutMode, LayoutNode, SideLabel};

use crate::render_ir::{CardGeometry, CardLayout, DrawCommand, Panel, PanelKind};
use crate::sizing::{solve_panel, PanelConfig, PanelMetrics, RenderStrategy};
use crate::title_block;
use crate::tracklist::{render_spec_panel, SideContent, TrackListRenderer};

/// Stateless card layout engine.
///
/// Holds only the fixed sheet geometry; every call to [`layout`] derives the
/// complete output from the supplied snapshot, so identical inputs always
/// produce identical layouts and concurrent calls never interfere.
///
/// [`layout`]: CardLayoutEngine::layout
#[derive(Clone, Copy, Debug, Default)]
pub struct CardLayoutEngine {
    geometry: CardGeometry,
}

impl CardLayoutEngine {
    pub fn new(geometry: CardGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &CardGeometry {
        &self.geometry
    }

    /// Lay out the whole card.
    pub fn layout(&self, input: &CardInput) -> CardLayout {
        let mode = input.prefs.mode;
        let nodes_a = side_nodes(input, SideLabel::A);
        let nodes_b = side_nodes(input, SideLabel::B);

        let back_cfg = PanelConfig::full();
        let flap_cfg = PanelConfig::compact();
        let back_strategy = RenderStrategy::for_panel(mode, false);
        let flap_strategy = RenderStrategy::for_panel(mode, true);

        let back_metrics = solve_panel(
            &nodes_a,
            &nodes_b,
            &back_cfg,
            back_strategy,
            back_cfg.available_height(self.geometry.height),
        );
        let flap_metrics = solve_panel(
            &nodes_a,
            &nodes_b,
            &flap_cfg,
            flap_strategy,
            flap_cfg.available_height(self.geometry.height),
        );

        let back_commands = self.tracklist_commands(
            input,
            &nodes_a,
            &nodes_b,
            &back_cfg,
            back_metrics,
            back_strategy,
            self.geometry.back_width,
        );

        // Classical releases trade the flap tracklist for the rotated
        // recording-spec panel.
        let flap_commands = if mode == LayoutMode::Classical {
            render_spec_panel(
                &input.recording,
                &input.tape_subtitle,
                &input.prefs.note_upper,
                self.geometry.height,
            )
        } else {
            self.tracklist_commands(
                input,
                &nodes_a,
                &nodes_b,
                &flap_cfg,
                flap_metrics,
                flap_strategy,
                self.geometry.short_back_width,
            )
        };

        let front_commands = title_block::render_front(
            &self.geometry,
            &input.title,
            &input.cover_badge,
            &front_artist_line(input),
        );

        let caps = |text: &str| -> String {
            if input.prefs.force_caps {
                text.to_uppercase()
            } else {
                text.to_string()
            }
        };
        let spine_commands = title_block::render_spine(
            &self.geometry,
            &caps(&input.title),
            &caps(&input.artist),
            &input.tape_id,
            &caps(&input.prefs.note_upper),
            &caps(&input.prefs.note_lower),
        );

        CardLayout {
            geometry: self.geometry,
            mode,
            sizing_back: back_metrics.sizing,
            sizing_flap: flap_metrics.sizing,
            panels: vec![
                Panel {
                    kind: PanelKind::ShortBack,
                    origin_x: self.geometry.short_back_x(),
                    width: self.geometry.short_back_width,
                    commands: flap_commands,
                },
                Panel {
                    kind: PanelKind::Spine,
                    origin_x: self.geometry.spine_x(),
                    width: self.geometry.spine_width,
                    commands: spine_commands,
                },
                Panel {
                    kind: PanelKind::Front,
                    origin_x: self.geometry.front_x(),
                    width: self.geometry.front_width,
                    commands: front_commands,
                },
                Panel {
                    kind: PanelKind::Back,
                    origin_x: self.geometry.back_x(),
                    width: self.geometry.back_width,
                    commands: back_commands,
                },
            ],
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn tracklist_commands(
        &self,
        input: &CardInput,
        nodes_a: &[LayoutNode],
        nodes_b: &[LayoutNode],
        cfg: &PanelConfig,
        metrics: PanelMetrics,
        strategy: RenderStrategy,
        panel_width: f32,
    ) -> Vec<DrawCommand> {
        let renderer = TrackListRenderer::new(
            cfg,
            metrics,
            strategy,
            input.prefs.mode,
            panel_width,
            &input.prefs,
        );
        let duration_a = input.side_a.total_formatted();
        let duration_b = input.side_b.total_formatted();
        renderer.render(
            &SideContent {
                label: SideLabel::A,
                nodes: nodes_a,
                duration: &duration_a,
                number_offset: 0,
            },
            &SideContent {
                label: SideLabel::B,
                nodes: nodes_b,
                duration: &duration_b,
                number_offset: input.side_a.len(),
            },
        )
    }
}

/// Group a side only in classical mode; otherwise every track stands alone
/// with its original title.
fn side_nodes(input: &CardInput, label: SideLabel) -> Vec<LayoutNode> {
    let tracks = match label {
        SideLabel::A => &input.side_a.tracks,
        SideLabel::B => &input.side_b.tracks,
    };
    if input.prefs.mode == LayoutMode::Classical {
        grouping::group_nested(tracks)
    } else {
        grouping::singles_only(tracks)
    }
}

/// Front artist line, with the theme's mood appended when present.
fn front_artist_line(input: &CardInput) -> String {
    if input.theme.mood_description.is_empty() {
        input.artist.clone()
    } else {
        format!("{} \u{b7} {}", input.artist, input.theme.mood_description)
    }
}
