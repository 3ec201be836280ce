use proptest::prelude::*;

use u_gantt::frontmatter::{self, generate_unique_name, Frontmatter};
use u_gantt::grammar::{parse_text, serialize_to_text};
use u_gantt::models::{normalize, parse_day, Assignment, DateToken, Phase, Project};
use u_gantt::scheduler::computed_phases;

fn date_token() -> impl Strategy<Value = DateToken> {
    prop_oneof![
        (2000i32..2040, 1u32..=12).prop_map(|(y, m)| DateToken::new(format!("{y:04}-{m:02}"))),
        (2000i32..2040, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| DateToken::new(format!("{y:04}-{m:02}-{d:02}"))),
    ]
}

fn assignment() -> impl Strategy<Value = Assignment> {
    ("[A-Z][a-z]{0,6}( [A-Z][a-z]{0,4})?", 0u32..=200)
        .prop_map(|(person, hundredths)| Assignment::new(person, f64::from(hundredths) / 100.0))
}

fn phase() -> impl Strategy<Value = Phase> {
    (
        "[A-Za-z][A-Za-z0-9/ ]{0,8}[A-Za-z0-9]",
        proptest::option::of(date_token()),
        date_token(),
        prop::collection::vec(assignment(), 0..4),
    )
        .prop_map(|(name, start_date, end_date, assignments)| Phase {
            name,
            start_date,
            end_date,
            assignments,
        })
}

fn project() -> impl Strategy<Value = Project> {
    (
        "[A-Za-z][A-Za-z0-9 /]{0,10}[A-Za-z0-9]",
        prop::collection::vec(phase(), 0..5),
    )
        .prop_map(|(name, phases)| Project { name, phases })
}

/// Any non-empty value, including quotes, escapes, padding and line breaks.
fn header_value() -> impl Strategy<Value = String> {
    "[a-z '\"\\\\:\t\n\r-]{1,12}"
}

proptest! {
    #[test]
    fn parse_never_panics(text in "\\PC{0,200}") {
        let _ = parse_text(&text);
        let _ = frontmatter::parse(&text);
    }

    #[test]
    fn parse_never_panics_on_line_soup(
        lines in prop::collection::vec(
            prop_oneof![
                Just("A:".to_string()),
                Just("- x, --, 2025-02: P 1".to_string()),
                Just("---".to_string()),
                Just("name: n".to_string()),
                "[-:, .0-9a-z]{0,20}",
            ],
            0..20,
        )
    ) {
        let text = lines.join("\n");
        let projects = parse_text(&text);
        let _ = computed_phases(&projects);
    }

    #[test]
    fn grammar_round_trip(projects in prop::collection::vec(project(), 0..4)) {
        let text = serialize_to_text(&projects);
        prop_assert_eq!(parse_text(&text), projects);
    }

    #[test]
    fn serialize_is_idempotent(projects in prop::collection::vec(project(), 0..4)) {
        let once = serialize_to_text(&projects);
        let twice = serialize_to_text(&parse_text(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn computed_phase_count_matches(projects in prop::collection::vec(project(), 0..4)) {
        let total: usize = projects.iter().map(|p| p.phases.len()).sum();
        let computed = computed_phases(&projects);
        prop_assert_eq!(computed.len(), total);
        for c in &computed {
            prop_assert_eq!(c.project_name.as_str(), projects[c.project_index].name.as_str());
        }
    }

    #[test]
    fn frontmatter_round_trip(
        name in header_value(),
        gist in proptest::option::of(header_value()),
        description in proptest::option::of(header_value()),
        created_at in proptest::option::of(header_value()),
        extra in prop::collection::vec(("x[a-z]{1,6}", header_value()), 0..3),
        body in "[A-Za-z0-9 :,\n-]{0,60}",
    ) {
        let mut fm = Frontmatter::new(name);
        fm.gist = gist;
        fm.description = description;
        fm.created_at = created_at;
        for (k, v) in extra {
            fm.set(k, v);
        }

        let text = frontmatter::serialize(&fm, &body);
        let parsed = frontmatter::parse(&text);
        prop_assert_eq!(parsed.frontmatter, Some(fm));
        prop_assert_eq!(parsed.content, body);
    }

    #[test]
    fn month_end_is_last_day(year in 1900i32..2100, month in 1u32..=12) {
        let token = format!("{year:04}-{month:02}");
        let end = parse_day(&normalize(&token, true)).unwrap();
        let next = end.succ_opt().unwrap();
        prop_assert_eq!(next.format("%d").to_string(), "01");
        prop_assert_eq!(normalize(&token, false), format!("{token}-01"));
    }

    #[test]
    fn unique_name_is_fresh(
        base in "[A-Za-z]{1,6}",
        taken in 0usize..5,
    ) {
        let mut existing = vec![base.clone()];
        existing.extend((1..=taken).map(|n| format!("{base} ({n})")));
        let unique = generate_unique_name(&base, &existing);
        prop_assert!(!existing.contains(&unique));
        prop_assert_eq!(unique, format!("{base} ({})", taken + 1));
    }
}
