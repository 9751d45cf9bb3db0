use tapecard::grouping::detect_mode;
use tapecard::model::{AlbumMeta, LayoutMode, Track};

fn tracks_from(titles: &[&str]) -> Vec<Track> {
    titles
        .iter()
        .map(|t| Track::new(*t, "Artist", 180_000))
        .collect()
}

#[test]
fn various_artists_always_reads_as_compilation() {
    let meta = AlbumMeta {
        artist: "Various Artists".to_string(),
        ..AlbumMeta::default()
    };
    let title_sets: [&[&str]; 3] = [
        &[],
        &["Plain Song", "Another Song"],
        &[
            "Sonata Op.1: I. Allegro",
            "Sonata Op.1: II. Adagio",
            "Sonata Op.2: I. Allegro",
        ],
    ];
    for titles in title_sets {
        assert_eq!(
            detect_mode(&meta, &tracks_from(titles)),
            LayoutMode::Compilation,
            "titles {titles:?} must not override the compilation signal"
        );
    }
}

#[test]
fn compilation_secondary_type_flag_fires() {
    let meta = AlbumMeta {
        artist: "One Artist".to_string(),
        secondary_types: vec!["Live".to_string(), "Compilation".to_string()],
        ..AlbumMeta::default()
    };
    let tracks = tracks_from(&["Plain Song"]);
    assert_eq!(detect_mode(&meta, &tracks), LayoutMode::Compilation);
}

#[test]
fn keyword_density_detects_classical() {
    let meta = AlbumMeta {
        artist: "Sviatoslav Richter".to_string(),
        ..AlbumMeta::default()
    };
    let tracks = tracks_from(&[
        "Sonata Op.1: I. Allegro",
        "Sonata Op.1: II. Adagio",
        "Sonata Op.2: I. Allegro",
    ]);
    assert_eq!(detect_mode(&meta, &tracks), LayoutMode::Classical);
}

#[test]
fn repeated_long_stems_detect_classical_without_keywords() {
    let meta = AlbumMeta::default();
    let tracks = tracks_from(&[
        "The Enfolding Garden Part One - Seed",
        "The Enfolding Garden Part One - Root",
        "The Enfolding Garden Part Two - Stem",
        "The Enfolding Garden Part Two - Leaf",
    ]);
    assert_eq!(detect_mode(&meta, &tracks), LayoutMode::Classical);
}

#[test]
fn sparse_keywords_stay_standard() {
    let meta = AlbumMeta::default();
    // One keyword hit in four tracks sits under the 0.3 density threshold.
    let tracks = tracks_from(&[
        "Sonata for a Rainy Day",
        "Summer Drive",
        "Night Bus",
        "Last Orders",
    ]);
    assert_eq!(detect_mode(&meta, &tracks), LayoutMode::Standard);
}

#[test]
fn single_long_stem_pair_is_not_enough() {
    let meta = AlbumMeta::default();
    // One grouped pair: grouping count 1, below the 2-pair threshold.
    let tracks = tracks_from(&[
        "An Unusually Long Shared Stem: Part A",
        "An Unusually Long Shared Stem: Part B",
        "Unrelated Closer",
    ]);
    assert_eq!(detect_mode(&meta, &tracks), LayoutMode::Standard);
}

#[test]
fn empty_track_list_defaults_to_standard() {
    assert_eq!(detect_mode(&AlbumMeta::default(), &[]), LayoutMode::Standard);
}

#[test]
fn detection_is_deterministic() {
    let meta = AlbumMeta::default();
    let tracks = tracks_from(&[
        "Concerto in D Minor BWV 1052: I.",
        "Concerto in D Minor BWV 1052: II.",
    ]);
    let first = detect_mode(&meta, &tracks);
    for _ in 0..10 {
        assert_eq!(detect_mode(&meta, &tracks), first);
    }
}
