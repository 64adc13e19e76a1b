use crate::aggregate::{aggregate, AuthorTotals};
use crate::cli::CommonArgs;
use crate::git::{GitLog, LogQuery};
use crate::parse::{split_commits, CommitAnalysis, CommitParser, ExtensionFilter};
use crate::period;
use crate::report;
use anyhow::Context;
use tracing::info;

/// Result of one pass over a log dump.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub commits: Vec<CommitAnalysis>,
    pub skipped: usize,
    pub totals: AuthorTotals,
}

/// Split, parse and aggregate a raw log dump. Chunks whose identity line
/// does not parse are counted in `skipped` and otherwise ignored.
pub fn analyze_log(text: &str, parser: &CommitParser) -> Analysis {
    let chunks = split_commits(text);
    let commits: Vec<CommitAnalysis> = chunks.iter().filter_map(|c| parser.parse(c)).collect();
    let skipped = chunks.len() - commits.len();
    let totals = aggregate(&commits);

    Analysis {
        commits,
        skipped,
        totals,
    }
}

pub fn exec(since: Option<&str>, until: Option<&str>, common: &CommonArgs) -> anyhow::Result<()> {
    let window = period::resolve_window(since, until, period::today())
        .context("Invalid date arguments")?;

    let filter = ExtensionFilter::new(&common.include_ext, &common.exclude_ext);
    let parser =
        CommitParser::new(common.identity, filter).context("Failed to build commit parser")?;

    let repo = GitLog::open(common.repo.as_ref()).context("Failed to locate repository")?;
    let query = LogQuery {
        window,
        shape: common.identity,
        author: common.author.as_deref(),
    };

    let machine_output = common.json || common.ndjson;
    let text = repo
        .fetch(&query, !machine_output)
        .context("Failed to read commit history")?;

    let analysis = analyze_log(&text, &parser);
    info!(
        commits = analysis.commits.len(),
        skipped = analysis.skipped,
        authors = analysis.totals.len(),
        "analysis finished"
    );

    if common.json {
        let output = report::build_output(
            repo.path().to_string_lossy().to_string(),
            &window,
            common.author.as_deref(),
            common.identity,
            &analysis.totals,
            analysis.commits.len(),
        );
        report::output_json(&output)?;
    } else if common.ndjson {
        report::output_ndjson(&analysis.totals)?;
    } else {
        if !common.summary_only {
            for commit in &analysis.commits {
                report::print_commit_trace(commit);
            }
        }
        report::print_summary(
            &window,
            common.author.as_deref(),
            &analysis.totals,
            analysis.commits.len(),
        );
    }

    Ok(())
}
