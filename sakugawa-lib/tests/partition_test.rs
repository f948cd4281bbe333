use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use pretty_assertions::assert_eq;
use sakugawa_lib::parser::parse_stylesheet;
use sakugawa_lib::sheet::Construct;
use sakugawa_lib::style::counter::total_weight;
use sakugawa_lib::{partition, partition_bytes, MediaQueries, Options, SplitError};

// 20 selectors, 5 of them inside a media block.
const TWENTY: &str = include_str!("fixtures/twenty.css");
// 6 selectors behind a charset directive.
const CHARSET: &str = include_str!("fixtures/charset.css");

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn split(styles: &str, options: Options) -> Vec<String> {
    init_logging();
    partition(styles, &options).expect("styles should split")
}

/// Every selector list of a stylesheet in document order, media rules included.
fn selector_sequence(styles: &str) -> Vec<String> {
    let sheet = parse_stylesheet(styles);
    let mut sequence = Vec::new();
    for construct in &sheet.constructs {
        match construct {
            Construct::Rule(rule) => sequence.push(rule.selectors.join(",")),
            Construct::Media(media) => {
                for rule in &media.rules {
                    sequence.push(format!("@media {} {}", media.condition, rule.selectors.join(",")));
                }
            }
            Construct::Global(_) => {}
        }
    }
    sequence
}

fn assert_loadable(sheets: &[String]) {
    for sheet in sheets {
        assert!(
            StyleSheet::parse(sheet, ParserOptions::default()).is_ok(),
            "sheet does not parse:\n{}",
            sheet
        );
    }
}

#[test]
fn test_fixture_has_twenty_selectors() {
    let sheet = parse_stylesheet(TWENTY);
    assert_eq!(total_weight(&sheet, MediaQueries::Keep), 20);
    assert_eq!(total_weight(&sheet, MediaQueries::Ignore), 15);
}

#[test]
fn test_dummy_styles_untouched() {
    let styles = "body {\n  color: rebeccapurple;\n}";
    assert_eq!(split(styles, Options::default()), vec![styles.to_string()]);
}

#[test]
fn test_max_selectors_lower_than_total() {
    let sheets = split(TWENTY, Options::new().with_max_selectors(16));
    assert_eq!(sheets.len(), 2);

    let cut = TWENTY.find("\n\nul li").unwrap();
    assert_eq!(sheets[0], format!("{}\n", &TWENTY[..cut]));
    assert_eq!(sheets[1], &TWENTY[cut + 2..]);
    assert_loadable(&sheets);
}

#[test]
fn test_max_selectors_higher_than_total() {
    let sheets = split(TWENTY, Options::new().with_max_selectors(24));
    assert_eq!(sheets, vec![TWENTY.to_string()]);
}

#[test]
fn test_max_selectors_same_as_total() {
    assert_eq!(split(TWENTY, Options::new().with_max_selectors(20)).len(), 1);
}

#[test]
fn test_media_queries_separated() {
    let sheets = split(
        TWENTY,
        Options::new()
            .with_max_selectors(50)
            .with_media_queries(MediaQueries::Separate),
    );
    assert_eq!(sheets.len(), 2);
    assert!(!sheets[0].contains("@media"));
    assert!(sheets[1].starts_with("@media screen and (max-width: 600px) {"));
    assert_eq!(selector_sequence(&sheets[1]).len(), 3);
    assert_loadable(&sheets);
}

#[test]
fn test_media_queries_ignored() {
    let sheets = split(
        TWENTY,
        Options::new()
            .with_max_selectors(18)
            .with_media_queries(MediaQueries::Ignore),
    );
    assert_eq!(sheets.len(), 1);
}

#[test]
fn test_media_queries_kept_count_toward_budget() {
    let sheets = split(TWENTY, Options::new().with_max_selectors(18));
    assert_eq!(sheets.len(), 2);
}

#[test]
fn test_min_sheets_higher_than_resulting_number() {
    let sheets = split(
        TWENTY,
        Options::new().with_max_selectors(12).with_min_sheets(4),
    );
    assert_eq!(sheets.len(), 4);
    assert!(sheets.iter().all(|sheet| !sheet.trim().is_empty()));
    assert_loadable(&sheets);
}

#[test]
fn test_min_sheets_lower_than_resulting_number() {
    let sheets = split(TWENTY, Options::new().with_max_selectors(8).with_min_sheets(2));
    assert_eq!(sheets.len(), 3);
}

#[test]
fn test_min_sheets_same_as_resulting_number() {
    let sheets = split(TWENTY, Options::new().with_max_selectors(6).with_min_sheets(4));
    assert_eq!(sheets.len(), 4);
}

#[test]
fn test_min_sheets_beyond_rule_count_pads_with_empty_sheets() {
    let sheets = split("a {}\nb {}", Options::new().with_min_sheets(4));
    assert_eq!(sheets, vec!["a {}\n", "b {}", "", ""]);
}

#[test]
fn test_error_when_styles_empty() {
    init_logging();
    let err = partition("", &Options::default()).unwrap_err();
    assert_eq!(err, SplitError::InvalidInput("styles must not be empty".into()));
}

#[test]
fn test_error_when_styles_not_a_string() {
    init_logging();
    let err = partition_bytes(&[0xc3, 0x28], &Options::default()).unwrap_err();
    assert_eq!(err.to_string(), "styles must be a string");
}

#[test]
fn test_charset_preserved_in_all_sheets() {
    let sheets = split(CHARSET, Options::new().with_max_selectors(4));
    assert_eq!(sheets.len(), 2);
    for sheet in &sheets {
        assert_eq!(sheet.find("@charset"), Some(0));
        assert_eq!(sheet.matches("@charset").count(), 1);
    }
    assert_loadable(&sheets);
}

const MODES: [MediaQueries; 3] = [
    MediaQueries::Keep,
    MediaQueries::Separate,
    MediaQueries::Ignore,
];

/// Selector lists in the order a mode writes them: separate mode moves every
/// media rule after the normal rules.
fn expected_sequence(styles: &str, mode: MediaQueries) -> Vec<String> {
    let sequence = selector_sequence(styles);
    match mode {
        MediaQueries::Separate => {
            let (media, normal): (Vec<String>, Vec<String>) = sequence
                .into_iter()
                .partition(|entry| entry.starts_with("@media"));
            normal.into_iter().chain(media).collect()
        }
        MediaQueries::Keep | MediaQueries::Ignore => sequence,
    }
}

#[test]
fn test_rule_sequence_survives_splitting() {
    for mode in MODES {
        let expected = expected_sequence(TWENTY, mode);
        for max_selectors in 1..=20 {
            let sheets = split(
                TWENTY,
                Options::new()
                    .with_max_selectors(max_selectors)
                    .with_media_queries(mode),
            );
            let rejoined: Vec<String> = sheets
                .iter()
                .flat_map(|sheet| selector_sequence(sheet))
                .collect();
            assert_eq!(rejoined, expected, "{} mode, max selectors {}", mode, max_selectors);
        }
    }
}

#[test]
fn test_every_sheet_within_budget() {
    for mode in MODES {
        for max_selectors in 3..=20 {
            for min_sheets in 1..=6 {
                let sheets = split(
                    TWENTY,
                    Options::new()
                        .with_max_selectors(max_selectors)
                        .with_min_sheets(min_sheets)
                        .with_media_queries(mode),
                );
                assert!(sheets.len() >= min_sheets);
                for sheet in &sheets {
                    let weight = total_weight(&parse_stylesheet(sheet), mode);
                    assert!(
                        weight <= max_selectors,
                        "{} mode: {} selectors over a limit of {}:\n{}",
                        mode,
                        weight,
                        max_selectors,
                        sheet
                    );
                    if mode == MediaQueries::Separate && sheet.contains("@media") {
                        assert!(sheet.trim_start().starts_with("@media"), "mixed sheet:\n{}", sheet);
                    }
                }
            }
        }
    }
}

#[test]
fn test_min_sheets_shared_between_separate_streams() {
    let sheets = split(
        TWENTY,
        Options::new()
            .with_max_selectors(50)
            .with_min_sheets(5)
            .with_media_queries(MediaQueries::Separate),
    );

    let weights: Vec<usize> = sheets
        .iter()
        .map(|sheet| total_weight(&parse_stylesheet(sheet), MediaQueries::Keep))
        .collect();
    assert_eq!(weights, vec![6, 5, 4, 3, 2]);
    assert!(sheets[..3].iter().all(|sheet| !sheet.contains("@media")));
    assert!(sheets[3..]
        .iter()
        .all(|sheet| sheet.starts_with("@media screen and (max-width: 600px) {")));
    assert_loadable(&sheets);
}

#[test]
fn test_comment_before_charset_survives() {
    let styles = "/* license */\n@charset \"UTF-8\";\na {}";
    assert_eq!(split(styles, Options::default()), vec![styles.to_string()]);
}

#[test]
fn test_oversized_rule_gets_its_own_sheet() {
    let styles = "a {}\nb, c, d, e {}\nf {}";
    let sheets = split(styles, Options::new().with_max_selectors(2));
    assert_eq!(sheets, vec!["a {}\n", "b, c, d, e {}\n", "f {}"]);
}

#[test]
fn test_opaque_at_rules_travel_with_their_neighbours() {
    let styles = "@import url(\"base.css\");\n@font-face { font-family: Inter; }\na {}\nb {}";
    let sheets = split(styles, Options::new().with_max_selectors(2));
    assert_eq!(
        sheets,
        vec![
            "@import url(\"base.css\");\n@font-face { font-family: Inter; }\n",
            "a {}\nb {}",
        ]
    );
}
