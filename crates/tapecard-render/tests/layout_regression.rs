use tapecard::model::{CardInput, LayoutMode, LayoutPrefs, Side, Track};
use tapecard_render::{
    snapshot, wrap, CardLayoutEngine, PanelConfig, PanelKind, RenderStrategy, TextRole,
};

fn track(title: &str, seconds: u64) -> Track {
    Track::new(title, "Artist", seconds * 1000)
}

fn numbered_tracks(count: usize, prefix: &str) -> Vec<Track> {
    (0..count)
        .map(|i| track(&format!("{prefix} {i}"), 180 + (i as u64 % 7) * 20))
        .collect()
}

fn build_input(side_a: Vec<Track>, side_b: Vec<Track>, mode: LayoutMode) -> CardInput {
    CardInput {
        title: "REGRESSION".to_string(),
        artist: "HARNESS".to_string(),
        tape_id: "RT-001".to_string(),
        tape_subtitle: "STEREO".to_string(),
        side_a: Side::new(side_a),
        side_b: Side::new(side_b),
        prefs: LayoutPrefs {
            mode,
            ..LayoutPrefs::default()
        },
        ..CardInput::default()
    }
}

fn panel_text_roles(layout: &tapecard_render::CardLayout, kind: PanelKind) -> Vec<TextRole> {
    layout
        .panel(kind)
        .into_iter()
        .flat_map(|p| p.text_commands())
        .map(|t| t.role)
        .collect()
}

#[test]
fn wrap_preserves_every_word_in_order() {
    let samples = [
        "one two three four five",
        "a mix of UPPERCASE and lowercase words",
        "multi\nparagraph\ninput with several words per line",
        "ｆｕｌｌｗｉｄｔｈ text 漢字まじり with wide glyphs",
    ];
    for text in samples {
        for width in [4.0f32, 8.0, 15.0, 60.0] {
            let lines = wrap(text, width);
            assert!(!lines.is_empty(), "wrap must never return an empty list");
            let rejoined: Vec<&str> = lines
                .iter()
                .flat_map(|l| l.split_whitespace())
                .collect();
            let original: Vec<&str> = text.split_whitespace().collect();
            assert_eq!(
                rejoined, original,
                "width {width}: words must survive wrapping of {text:?}"
            );
        }
    }
}

#[test]
fn wrap_termination_on_ten_thousand_chars() {
    let text: String = std::iter::repeat('x').take(10_000).collect();
    let lines = wrap(&text, 1.0);
    assert_eq!(lines.len(), 10_000);
}

#[test]
fn sizing_stays_in_bounds_across_track_counts() {
    let engine = CardLayoutEngine::default();
    for count in [0usize, 1, 3, 10, 25, 50] {
        for mode in [LayoutMode::Standard, LayoutMode::Classical, LayoutMode::Compilation] {
            let input = build_input(
                numbered_tracks(count, "Side A Track"),
                numbered_tracks(count, "Side B Track"),
                mode,
            );
            let layout = engine.layout(&input);

            let full = PanelConfig::full();
            assert!(
                layout.sizing_back.line_height >= full.min_line_height
                    && layout.sizing_back.line_height <= full.max_line_height,
                "count {count} mode {mode:?}: back line height {} out of bounds",
                layout.sizing_back.line_height
            );
            assert!(
                layout.sizing_back.track_font_size >= full.min_font
                    && layout.sizing_back.track_font_size <= full.max_font,
                "count {count} mode {mode:?}: back font {} out of bounds",
                layout.sizing_back.track_font_size
            );

            let compact = PanelConfig::compact();
            assert!(
                layout.sizing_flap.line_height >= compact.min_line_height
                    && layout.sizing_flap.line_height <= compact.max_line_height,
                "count {count} mode {mode:?}: flap line height {} out of bounds",
                layout.sizing_flap.line_height
            );
            assert!(!layout.sizing_flap.show_notes, "flap notes must stay off");
        }
    }
}

#[test]
fn side_b_never_overlaps_side_a() {
    let engine = CardLayoutEngine::default();
    for count_a in [0usize, 1, 2, 5, 10, 20, 35, 50] {
        for count_b in [0usize, 1, 10, 50] {
            let input = build_input(
                numbered_tracks(count_a, "Alpha"),
                numbered_tracks(count_b, "Beta"),
                LayoutMode::Standard,
            );
            let layout = engine.layout(&input);
            let back = layout.panel(PanelKind::Back).expect("back panel");

            let badge_ys: Vec<f32> = back
                .text_commands()
                .filter(|t| t.role == TextRole::SideBadge)
                .map(|t| t.y)
                .collect();
            assert_eq!(badge_ys.len(), 2, "both side headers must render");

            let side_a_bottom = back
                .text_commands()
                .filter(|t| t.role == TextRole::Track && t.y < badge_ys[1])
                .map(|t| t.y)
                .fold(badge_ys[0], f32::max);
            assert!(
                badge_ys[1] > side_a_bottom,
                "a={count_a} b={count_b}: side B header {} under side A bottom {side_a_bottom}",
                badge_ys[1]
            );
        }
    }
}

#[test]
fn identical_inputs_yield_identical_layouts() {
    let engine = CardLayoutEngine::default();
    let input = build_input(
        numbered_tracks(7, "Stability"),
        numbered_tracks(6, "Check"),
        LayoutMode::Compilation,
    );
    let first = engine.layout(&input);
    let second = engine.layout(&input);
    assert_eq!(first, second);
}

#[test]
fn compilation_lines_carry_artists_standard_lines_do_not() {
    let engine = CardLayoutEngine::default();
    let mut side_a = numbered_tracks(3, "Song");
    for (i, t) in side_a.iter_mut().enumerate() {
        t.artist = format!("Guest {i}");
    }

    let compilation = build_input(side_a.clone(), Vec::new(), LayoutMode::Compilation);
    let layout = engine.layout(&compilation);
    let back = layout.panel(PanelKind::Back).expect("back panel");
    assert!(
        back.text_commands()
            .filter(|t| t.role == TextRole::Track)
            .all(|t| t.text.contains(" - Guest ")),
        "compilation track lines must append per-track artists"
    );

    let standard = build_input(side_a, Vec::new(), LayoutMode::Standard);
    let layout = engine.layout(&standard);
    let back = layout.panel(PanelKind::Back).expect("back panel");
    assert!(back
        .text_commands()
        .filter(|t| t.role == TextRole::Track)
        .all(|t| !t.text.contains(" - Guest ")));
}

#[test]
fn classical_back_inlines_movements_under_headers() {
    let engine = CardLayoutEngine::default();
    let side_a = vec![
        track("Concerto for Tape in C Major: I. Grave", 300),
        track("Concerto for Tape in C Major: II. Presto", 280),
        track("Concerto for Tape in C Major: III. Largo", 310),
    ];
    let input = build_input(side_a, Vec::new(), LayoutMode::Classical);
    let layout = engine.layout(&input);
    assert_eq!(layout.mode, LayoutMode::Classical);

    let back_roles = panel_text_roles(&layout, PanelKind::Back);
    assert!(back_roles.contains(&TextRole::GroupHeader));
    assert!(back_roles.contains(&TextRole::GroupContent));

    let back = layout.panel(PanelKind::Back).expect("back panel");
    let content = back
        .text_commands()
        .find(|t| t.role == TextRole::GroupContent)
        .expect("joined movement line");
    assert!(
        content.text.contains(" / "),
        "movements join into one wrapped line: {}",
        content.text
    );
    assert!(
        !content.text.contains("I."),
        "classical movement lines drop numeral prefixes: {}",
        content.text
    );
}

#[test]
fn classical_flap_shows_spec_panel_instead_of_tracks() {
    let engine = CardLayoutEngine::default();
    let side_a = vec![
        track("Concerto for Tape in C Major: I. Grave", 300),
        track("Concerto for Tape in C Major: II. Presto", 280),
    ];
    let input = build_input(side_a, Vec::new(), LayoutMode::Classical);
    let layout = engine.layout(&input);
    let flap_roles = panel_text_roles(&layout, PanelKind::ShortBack);
    assert!(flap_roles.contains(&TextRole::SpecLabel));
    assert!(!flap_roles.contains(&TextRole::Track));
}

#[test]
fn numbering_continues_from_side_a_into_side_b() {
    let engine = CardLayoutEngine::default();
    let input = build_input(
        numbered_tracks(4, "First Half"),
        numbered_tracks(3, "Second Half"),
        LayoutMode::Standard,
    );
    let layout = engine.layout(&input);
    let back = layout.panel(PanelKind::Back).expect("back panel");
    let numbers: Vec<String> = back
        .text_commands()
        .filter(|t| t.role == TextRole::Track)
        .map(|t| t.text.chars().take(3).collect())
        .collect();
    assert_eq!(
        numbers,
        ["01.", "02.", "03.", "04.", "05.", "06.", "07."],
        "printed numbering must stay monotonic across the release"
    );
}

#[test]
fn strategy_table_matches_mode_and_compactness() {
    assert_eq!(
        RenderStrategy::for_panel(LayoutMode::Classical, true),
        RenderStrategy::WorkOnly
    );
    assert_eq!(
        RenderStrategy::for_panel(LayoutMode::Classical, false),
        RenderStrategy::InlineCompact
    );
    assert_eq!(
        RenderStrategy::for_panel(LayoutMode::Standard, false),
        RenderStrategy::Standard
    );
    assert_eq!(
        RenderStrategy::for_panel(LayoutMode::Compilation, true),
        RenderStrategy::Standard
    );
}

#[test]
fn snapshot_round_trip_is_lossless() {
    let engine = CardLayoutEngine::default();
    let input = build_input(
        numbered_tracks(12, "Encode"),
        numbered_tracks(9, "Decode"),
        LayoutMode::Standard,
    );
    let layout = engine.layout(&input);

    let binary = snapshot::encode(&layout).expect("binary encode");
    assert_eq!(snapshot::decode(&binary).expect("binary decode"), layout);

    let json = snapshot::encode_json(&layout).expect("json encode");
    assert_eq!(snapshot::decode_json(&json).expect("json decode"), layout);

    assert!(
        binary.len() < json.len(),
        "postcard form should be denser than JSON ({} vs {})",
        binary.len(),
        json.len()
    );
}
