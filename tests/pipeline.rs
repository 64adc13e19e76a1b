use aigstats::model::{CommitStats, IdentityShape, LineCount};
use aigstats::parse::numstat::{is_file_change_line, parse_file_change};
use aigstats::parse::{split_commits, RecordParser, TagExtractor};
use aigstats::{aggregate, analyze_log, AuthorTotals, CommitParser, ExtensionFilter};
use pretty_assertions::assert_eq;

const ID_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const ID_B: &str = "0123456789abcdef0123456789abcdef01234567";
const ID_C: &str = "fedcba9876543210fedcba9876543210fedcba98";

fn name_parser() -> CommitParser {
    CommitParser::new(IdentityShape::Name, ExtensionFilter::default()).unwrap()
}

fn email_parser() -> CommitParser {
    CommitParser::new(IdentityShape::Email, ExtensionFilter::default()).unwrap()
}

#[test]
fn fix_commit_with_half_ai_ratio() {
    let chunk = format!("{ID_A} 'Alice' 2024-01-01 10:00:00 Fix bug AIG: 0.5\n10\t2\tmain.go");
    let commit = name_parser().parse(&chunk).unwrap();

    assert_eq!(
        commit.stats,
        CommitStats {
            added_lines: 10,
            deleted_lines: 2,
            ai_ratio: 0.5,
            is_fix: true,
        }
    );

    let totals = aggregate([&commit]);
    let alice = totals.get("Alice").unwrap();
    assert_eq!(alice.total_added, 10);
    assert_eq!(alice.total_deleted, 2);
    assert_eq!(alice.total_ai_added, 5);
    assert_eq!(alice.total_ai_deleted, 1);
    assert_eq!(alice.fix_count, 1);
    assert_eq!(alice.fix_and_aig_count, 1);
    assert_eq!(alice.email, None);
}

#[test]
fn split_empty_and_headerless_input() {
    assert!(split_commits("").is_empty());
    assert!(split_commits("\n\n").is_empty());
    assert!(split_commits("just some text\n1\t2\tfile.go\n").is_empty());
}

#[test]
fn split_separates_commits_and_drops_blank_lines() {
    let text = format!(
        "{ID_A} 'Alice' 2024-01-01 10:00:00 first\n\n3\t1\ta.go\n\n{ID_B} 'Bob' 2024-01-02 11:00:00 second\nbody line\n\n1\t0\tb.ts\n"
    );
    let chunks = split_commits(&text);
    assert_eq!(
        chunks,
        vec![
            format!("{ID_A} 'Alice' 2024-01-01 10:00:00 first\n3\t1\ta.go"),
            format!("{ID_B} 'Bob' 2024-01-02 11:00:00 second\nbody line\n1\t0\tb.ts"),
        ]
    );
}

#[test]
fn split_reproduces_joined_chunks() {
    let chunks = vec![
        format!("{ID_A} 'Alice' 2024-01-01 10:00:00 one\n1\t1\ta.go"),
        format!("{ID_B} 'Bob' 2024-01-02 10:00:00 two\nmore text\n2\t0\tb.vue\n-\t-\tlogo.png"),
        format!("{ID_C} 'Carol' 2024-01-03 10:00:00 three"),
    ];
    assert_eq!(split_commits(&chunks.join("\n")), chunks);
}

#[test]
fn split_treats_hex_looking_message_line_as_boundary() {
    let text = format!("{ID_A} 'Alice' 2024-01-01 10:00:00 revert\n{ID_B} was reverted\n1\t1\ta.go");
    assert_eq!(split_commits(&text).len(), 2);
}

#[test]
fn file_change_line_shape() {
    assert!(is_file_change_line("10\t2\tmain.go"));
    assert!(is_file_change_line("-\t-\timage.png"));
    assert!(is_file_change_line("0 0"));
    assert!(!is_file_change_line("10"));
    assert!(!is_file_change_line("3 files changed"));
    assert!(!is_file_change_line("-1\t2\tx.go"));
    assert!(!is_file_change_line("Fix bug AIG: 0.5"));
}

#[test]
fn rename_path_fields_are_joined() {
    let change = parse_file_change("4\t1\tsrc/{old.go => new.go}").unwrap();
    assert_eq!(change.added, LineCount::Lines(4));
    assert_eq!(change.deleted, LineCount::Lines(1));
    assert_eq!(change.path, "src/{old.go=>new.go}");
    assert!(!ExtensionFilter::default().accepts(&change.path));

    let chunk = format!("{ID_A} 'Alice' 2024-01-01 10:00:00 move\n4\t1\tsrc/{{old.go => new.go}}");
    let commit = name_parser().parse(&chunk).unwrap();
    assert!(!commit.files[0].counted);
    assert_eq!(commit.stats.added_lines, 0);
}

#[test]
fn extension_filter_precedence() {
    let filter = ExtensionFilter::default();
    assert!(filter.accepts("foo.go"));
    assert!(filter.accepts("web/src/App.vue"));
    assert!(!filter.accepts("foo.pb.go"));
    assert!(!filter.accepts("api/foo.pb.validate.go"));
    assert!(!filter.accepts("foo.md"));
    assert!(!filter.accepts("Makefile"));
    assert!(!filter.accepts(""));
}

#[test]
fn extension_filter_normalises_leading_dot() {
    let filter = ExtensionFilter::new(["rs", ".toml"], ["gen.rs"]);
    assert_eq!(filter.include(), [".rs".to_string(), ".toml".to_string()]);
    assert!(filter.accepts("src/lib.rs"));
    assert!(filter.accepts("Cargo.toml"));
    assert!(!filter.accepts("src/schema.gen.rs"));
}

#[test]
fn binary_changes_never_add_lines() {
    let filter = ExtensionFilter::new([".png", ".go"], Vec::<String>::new());
    let parser = CommitParser::new(IdentityShape::Name, filter).unwrap();
    let chunk = format!("{ID_A} 'Alice' 2024-01-01 10:00:00 add logo AIG: 1\n-\t-\timage.png\n5\t0\tmain.go");
    let commit = parser.parse(&chunk).unwrap();

    assert_eq!(commit.files.len(), 2);
    assert!(commit.files[0].counted);
    assert!(commit.files[0].change.is_binary());
    assert_eq!(commit.stats.added_lines, 5);
    assert_eq!(commit.stats.deleted_lines, 0);
}

#[test]
fn filtered_files_are_reported_but_not_counted() {
    let chunk = format!(
        "{ID_A} 'Alice' 2024-01-01 10:00:00 docs\n7\t3\tREADME.md\n2\t2\tapi/user.pb.go\n1\t1\tapi/user.go"
    );
    let commit = name_parser().parse(&chunk).unwrap();

    let verdicts: Vec<(&str, bool)> = commit
        .files
        .iter()
        .map(|f| (f.change.path.as_str(), f.counted))
        .collect();
    assert_eq!(
        verdicts,
        vec![
            ("README.md", false),
            ("api/user.pb.go", false),
            ("api/user.go", true),
        ]
    );
    assert_eq!(commit.stats.added_lines, 1);
    assert_eq!(commit.stats.deleted_lines, 1);
}

#[test]
fn aig_ratio_extraction() {
    let tags = TagExtractor::new(IdentityShape::Name).unwrap();
    assert_eq!(tags.ai_ratio("feat: x\nAIG: 0.75"), 0.75);
    assert_eq!(tags.ai_ratio("feat: x AIG:0.25"), 0.25);
    assert_eq!(tags.ai_ratio("feat: x AIG: -0.3"), 0.0);
    assert_eq!(tags.ai_ratio("feat: x AIG: 1.2.3"), 0.0);
    assert_eq!(tags.ai_ratio("feat: x AIG: none"), 0.0);
    assert_eq!(tags.ai_ratio("feat: x"), 0.0);
    assert_eq!(tags.ai_ratio("feat: x AIG: 1.5"), 1.5);
}

#[test]
fn negative_aig_tag_is_passed_over() {
    let tags = TagExtractor::new(IdentityShape::Name).unwrap();
    assert_eq!(tags.ai_ratio("feat: x AIG: -0.3\nsecond pass AIG: 0.5"), 0.5);
}

#[test]
fn aig_ratio_is_idempotent() {
    let tags = TagExtractor::new(IdentityShape::Email).unwrap();
    let message = "refactor parser\nAIG: 0.4";
    assert_eq!(tags.ai_ratio(message), tags.ai_ratio(message));
}

#[test]
fn fix_marker_follows_timestamp() {
    let tags = TagExtractor::new(IdentityShape::Name).unwrap();
    assert!(tags.is_fix(&format!("{ID_A} 'Alice' 2024-01-01 10:00:00 fix: null check")));
    assert!(tags.is_fix(&format!("{ID_A} 'Alice' 2024-01-01 10:00:00 Fix bug")));
    assert!(!tags.is_fix(&format!("{ID_A} 'Alice' 2024-01-01 10:00:00 feat: fix later")));
    assert!(!tags.is_fix(&format!("{ID_A} 'Alice' 2024-01-01 10:00:00 bugfix")));

    let tags = TagExtractor::new(IdentityShape::Email).unwrap();
    assert!(tags.is_fix(&format!(
        "{ID_A} 'Alice' alice@example.com 2024-01-01 10:00:00 fix(api): timeout"
    )));
    assert!(!tags.is_fix(&format!(
        "{ID_A} 'Alice' alice@example.com 2024-01-01 10:00:00 chore: bump"
    )));
}

#[test]
fn missing_aig_tag_keeps_fix_flag() {
    let chunk = format!("{ID_A} 'Alice' 2024-01-01 10:00:00 fix typo\n1\t1\tindex.html");
    let commit = name_parser().parse(&chunk).unwrap();
    assert_eq!(commit.stats.ai_ratio, 0.0);
    assert!(commit.stats.is_fix);

    let totals = aggregate([&commit]);
    let alice = totals.get("Alice").unwrap();
    assert_eq!(alice.fix_count, 1);
    assert_eq!(alice.fix_and_aig_count, 0);
}

#[test]
fn zero_aig_value_does_not_count_as_ai_fix() {
    let chunk = format!("{ID_A} 'Alice' 2024-01-01 10:00:00 fix crash AIG: 0\n4\t4\tapp.ts");
    let totals = aggregate([&name_parser().parse(&chunk).unwrap()]);
    let alice = totals.get("Alice").unwrap();
    assert_eq!(alice.fix_count, 1);
    assert_eq!(alice.fix_and_aig_count, 0);
    assert_eq!(alice.total_ai_added, 0);
}

#[test]
fn email_header_with_spaced_name_and_multiline_message() {
    let records = RecordParser::new(IdentityShape::Email).unwrap();
    let chunk = format!(
        "{ID_B} 'Ada Lovelace' ada@example.com 2024-02-03 04:05:06 feat: engine\nsecond line\nAIG: 0.3\n12\t0\tengine.go\n1\t1\tREADME.md"
    );
    let parsed = records.parse(&chunk).unwrap();

    assert_eq!(parsed.record.id(), ID_B);
    assert_eq!(parsed.record.author_name(), "Ada Lovelace");
    assert_eq!(parsed.record.author_email(), Some("ada@example.com"));
    assert_eq!(
        parsed.record.timestamp().format("%Y-%m-%d %H:%M:%S").to_string(),
        "2024-02-03 04:05:06"
    );
    assert_eq!(parsed.record.message(), "feat: engine\nsecond line\nAIG: 0.3");
    assert_eq!(parsed.file_lines, vec!["12\t0\tengine.go", "1\t1\tREADME.md"]);
    assert_eq!(parsed.record.identity_key(), "ada@example.com");
}

#[test]
fn commit_without_file_changes_has_empty_block() {
    let records = RecordParser::new(IdentityShape::Name).unwrap();
    let chunk = format!("{ID_A} 'Alice' 2024-01-01 10:00:00 empty commit\nwith a body");
    let parsed = records.parse(&chunk).unwrap();
    assert!(parsed.file_lines.is_empty());
    assert_eq!(parsed.record.message(), "empty commit\nwith a body");
}

#[test]
fn mismatched_identity_lines_are_rejected() {
    let name_line = format!("{ID_A} 'Alice' 2024-01-01 10:00:00 msg\n1\t1\ta.go");
    let email_line = format!("{ID_A} 'Alice' alice@example.com 2024-01-01 10:00:00 msg\n1\t1\ta.go");

    assert!(email_parser().parse(&name_line).is_none());
    assert!(name_parser().parse(&email_line).is_none());
    assert!(name_parser()
        .parse(&format!("{} 'Alice' 2024-01-01 10:00:00 msg", ID_A.to_uppercase()))
        .is_none());
    assert!(name_parser()
        .parse(&format!("{ID_A} 'Alice' 2024-13-01 10:00:00 msg"))
        .is_none());
}

#[test]
fn malformed_chunks_are_skipped() {
    let text = format!(
        "{ID_A} garbage header\n1\t1\ta.go\n{ID_B} 'Bob' 2024-01-02 09:00:00 ok AIG: 0.5\n2\t2\tb.go"
    );
    let analysis = analyze_log(&text, &name_parser());
    assert_eq!(analysis.skipped, 1);
    assert_eq!(analysis.commits.len(), 1);
    assert_eq!(analysis.totals.len(), 1);
    assert_eq!(analysis.totals.get("Bob").unwrap().total_ai_added, 1);
}

#[test]
fn aggregation_is_order_independent() {
    let text = format!(
        "{ID_A} 'Alice' alice@example.com 2024-01-01 10:00:00 fix a AIG: 0.5\n3\t1\ta.go\n\
         {ID_B} 'Bob' bob@example.com 2024-01-02 10:00:00 feat b AIG: 0.33\n9\t6\tb.ts\n\
         {ID_C} 'Alice' alice@example.com 2024-01-03 10:00:00 fix c\n5\t5\tc.vue"
    );
    let analysis = analyze_log(&text, &email_parser());

    let reversed = analysis
        .commits
        .iter()
        .rev()
        .fold(AuthorTotals::new(), |t, c| t.fold(&c.record, &c.stats));
    assert_eq!(reversed, analysis.totals);

    let alice = analysis.totals.get("alice@example.com").unwrap();
    assert_eq!(alice.total_added, 8);
    assert_eq!(alice.total_deleted, 6);
    assert_eq!(alice.total_ai_added, 2);
    assert_eq!(alice.total_ai_deleted, 1);
    assert_eq!(alice.fix_count, 2);
    assert_eq!(alice.fix_and_aig_count, 1);

    let bob = analysis.totals.get("bob@example.com").unwrap();
    assert_eq!(bob.total_ai_added, 3);
    assert_eq!(bob.total_ai_deleted, 2);
}

#[test]
fn mixed_identity_shapes_split_one_author() {
    let by_name = name_parser()
        .parse(&format!("{ID_A} 'Alice' 2024-01-01 10:00:00 one\n1\t0\ta.go"))
        .unwrap();
    let by_email = email_parser()
        .parse(&format!("{ID_B} 'Alice' alice@example.com 2024-01-02 10:00:00 two\n1\t0\ta.go"))
        .unwrap();

    let totals = aggregate([&by_name, &by_email]);
    assert_eq!(totals.len(), 2);
    assert!(totals.get("Alice").is_some());
    assert!(totals.get("alice@example.com").is_some());
    assert_eq!(totals.overall().total_added, 2);
}

#[test]
fn ratio_above_one_is_not_clamped() {
    let chunk = format!("{ID_A} 'Alice' 2024-01-01 10:00:00 gen AIG: 1.5\n10\t0\tgen.go");
    let commit = name_parser().parse(&chunk).unwrap();
    assert_eq!(commit.stats.ai_ratio, 1.5);
    assert_eq!(commit.stats.ai_added_lines(), 15);
    assert_eq!(commit.stats.ai_deleted_lines(), 0);
}

#[test]
fn huge_ratio_saturates_author_totals() {
    let text = format!(
        "{ID_A} 'Alice' 2024-01-01 10:00:00 gen AIG: 99999999999999999999\n10\t0\ta.go\n\
         {ID_B} 'Alice' 2024-01-02 10:00:00 tweak AIG: 0.5\n4\t0\ta.go\n\
         {ID_C} 'Bob' 2024-01-03 10:00:00 gen AIG: 99999999999999999999\n1\t0\tb.go"
    );
    let analysis = analyze_log(&text, &name_parser());

    let alice = analysis.totals.get("Alice").unwrap();
    assert_eq!(alice.total_added, 14);
    assert_eq!(alice.total_ai_added, u64::MAX);

    let overall = analysis.totals.overall();
    assert_eq!(overall.total_added, 15);
    assert_eq!(overall.total_ai_added, u64::MAX);
}

#[test]
fn ai_lines_round_half_away_from_zero() {
    let stats = CommitStats {
        added_lines: 3,
        deleted_lines: 1,
        ai_ratio: 0.5,
        is_fix: false,
    };
    assert_eq!(stats.ai_added_lines(), 2);
    assert_eq!(stats.ai_deleted_lines(), 1);

    let empty = CommitStats {
        ai_ratio: 0.9,
        ..CommitStats::default()
    };
    assert_eq!(empty.ai_added_lines(), 0);
}

#[test]
fn percentages_in_author_stats() {
    let chunk = format!("{ID_A} 'Alice' 2024-01-01 10:00:00 fix x AIG: 0.25\n8\t4\tx.go");
    let totals = aggregate([&name_parser().parse(&chunk).unwrap()]);
    let alice = totals.get("Alice").unwrap();
    assert_eq!(alice.ai_added_percent(), 25.0);
    assert_eq!(alice.ai_deleted_percent(), 25.0);
    assert_eq!(alice.ai_fix_percent(), 100.0);

    let none = AuthorTotals::new().overall();
    assert_eq!(none.ai_added_percent(), 0.0);
    assert_eq!(none.ai_fix_percent(), 0.0);
}
