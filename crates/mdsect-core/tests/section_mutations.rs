use mdsect_core::{mutate, AppendOptions, Document, MutationAction, SectionId};
use pretty_assertions::assert_eq;

fn id(level: u8, title: &str) -> SectionId {
    SectionId::compute(level, title, 0)
}

#[test]
fn shallow_write_under_nesting() {
    let doc = Document::parse("# A\nold\n## B\nkeep\n");
    let (text, _) = mutate::write(&doc, &id(1, "A"), "new", false).unwrap();
    assert_eq!(text, "# A\nnew\n## B\nkeep\n");
}

#[test]
fn deep_empty_clears_subtree() {
    let doc = Document::parse("# A\nx\n## B\ny\n");
    let (text, _) = mutate::empty(&doc, &id(1, "A"), true).unwrap();
    assert_eq!(text, "# A\n");
}

#[test]
fn remove_always_deep() {
    let doc = Document::parse("# A\nx\n## B\ny\n# C\nz\n");
    let (text, _) = mutate::remove(&doc, &id(1, "A")).unwrap();
    assert_eq!(text, "# C\nz\n");
}

#[test]
fn duplicate_titles_disambiguated() {
    let doc = Document::parse("# A\n1\n# A\n2\n");
    assert_eq!(doc.sections.len(), 2);
    assert_ne!(doc.sections[0].id, doc.sections[1].id);

    // Mutating the second occurrence leaves the first alone.
    let second = doc.sections[1].id.clone();
    let (text, _) = mutate::write(&doc, &second, "changed", false).unwrap();
    assert_eq!(text, "# A\n1\n# A\nchanged\n");
}

#[test]
fn append_before_creates_sibling_ahead() {
    let doc = Document::parse("# Entries\n## 2026-01-01\nfirst\n# Checkpoints\n");
    let checkpoints = id(1, "Checkpoints");
    let options = AppendOptions {
        deep: false,
        before: true,
    };
    let (text, result) =
        mutate::append(&doc, &checkpoints, "## 2026-01-02\nsecond", options).unwrap();
    assert_eq!(
        text,
        "# Entries\n## 2026-01-01\nfirst\n## 2026-01-02\nsecond\n# Checkpoints\n"
    );
    assert_eq!(result.action, MutationAction::Appended);
    assert_eq!(result.lines_added, 2);
}

#[test]
fn chained_mutations_via_reparse() {
    let mut text = String::from("# Log\n# Done\n");

    for day in 1..=3 {
        let doc = Document::parse(&text);
        let entry = format!("## day {day}");
        let options = AppendOptions {
            deep: true,
            before: false,
        };
        let (next, _) = mutate::append(&doc, &id(1, "Log"), &entry, options).unwrap();
        text = next;
    }

    assert_eq!(text, "# Log\n## day 1\n## day 2\n## day 3\n# Done\n");
}

#[test]
fn delta_accounting_across_operations() {
    let source = "# A\none\ntwo\n## B\nthree\n# C\nfour\n";

    let cases: Vec<(String, mdsect_core::MutationResult)> = vec![
        {
            let doc = Document::parse(source);
            mutate::write(&doc, &id(1, "A"), "x\ny\nz", false).unwrap()
        },
        {
            let doc = Document::parse(source);
            mutate::empty(&doc, &id(2, "B"), true).unwrap()
        },
        {
            let doc = Document::parse(source);
            mutate::remove(&doc, &id(1, "C")).unwrap()
        },
        {
            let doc = Document::parse(source);
            mutate::append(&doc, &id(1, "C"), "tail", AppendOptions::default()).unwrap()
        },
    ];

    let before = Document::parse(source).line_count() as isize;
    for (text, result) in cases {
        let after = Document::parse(&text).line_count() as isize;
        assert_eq!(
            result.lines_added as isize - result.lines_removed as isize,
            after - before,
            "delta mismatch for {:?}",
            result.action
        );
    }
}

#[test]
fn write_read_round_trip_is_identity() {
    let source = "---\nstatus: open\n---\n# A\nbody one\n\nbody two\n## B\nnested\n# C\ntail\n";
    let doc = Document::parse(source);

    for section in &doc.sections {
        for deep in [false, true] {
            let body = mutate::read(&doc, &section.id, deep).unwrap();
            let (text, _) = mutate::write(&doc, &section.id, &body, deep).unwrap();
            assert_eq!(text, source, "round trip failed for '{}'", section.title);
        }
    }
}

#[test]
fn heading_line_untouched_by_empty() {
    let doc = Document::parse("## Keep Me  \nbody\n");
    let section_id = doc.sections[0].id.clone();
    let (text, _) = mutate::empty(&doc, &section_id, false).unwrap();
    assert_eq!(text, "## Keep Me  \n");
}
