use crate::aggregate::AuthorTotals;
use crate::error::Result;
use crate::model::{
    AuthorReport, AuthorStats, DateWindow, IdentityShape, ReportOutput, SCHEMA_VERSION,
};
use crate::parse::CommitAnalysis;
use chrono::Utc;
use console::style;

const RULE_WIDTH: usize = 80;

pub fn print_commit_trace(commit: &CommitAnalysis) {
    let record = &commit.record;
    let stats = &commit.stats;

    println!("\n{}", style("Commit").bold());
    println!("  id:      {}", style(record.id()).yellow());
    println!("  author:  {}", record.author_name());
    if let Some(email) = record.author_email() {
        println!("  email:   {email}");
    }
    println!("  time:    {}", record.timestamp().format("%Y-%m-%d %H:%M:%S"));
    println!("  message:");
    for line in record.message().lines().filter(|l| !l.trim().is_empty()) {
        println!("    {line}");
    }
    println!("  AI ratio: {:.2}%", stats.ai_ratio * 100.0);
    println!("  fix:      {}", stats.is_fix);
    println!("  files:");

    for file in &commit.files {
        let change = &file.change;
        if file.counted {
            println!(
                "    - {} (added: {}, deleted: {})",
                change.path,
                style(change.added.count()).green(),
                style(change.deleted.count()).red()
            );
        } else {
            println!("    {} {} (filtered out)", style("[skip]").dim(), change.path);
        }
    }

    println!("  commit totals:");
    println!("    added:      {}", stats.added_lines);
    println!("    deleted:    {}", stats.deleted_lines);
    println!("    AI added:   {}", stats.ai_added_lines());
    println!("    AI deleted: {}", stats.ai_deleted_lines());
    println!("  {}", "-".repeat(RULE_WIDTH));
}

pub fn print_summary(
    window: &DateWindow,
    author_filter: Option<&str>,
    totals: &AuthorTotals,
    commits_analyzed: usize,
) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{}", style("Contribution summary").bold());
    println!("{}", "-".repeat(RULE_WIDTH));
    println!("  window:  {} to {}", window.since, window.until);
    println!("  author:  {}", author_filter.unwrap_or("(all)"));
    println!("  commits: {commits_analyzed}");

    if totals.is_empty() {
        println!("\nNo matching commits in this window");
        println!("{}", "=".repeat(RULE_WIDTH));
        return;
    }

    for (_, stats) in totals.iter() {
        print_author_block(stats);
    }
    print_author_block(&totals.overall());
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn print_author_block(stats: &AuthorStats) {
    match &stats.email {
        Some(email) => println!("\n  {} <{}>", style(&stats.name).cyan().bold(), email),
        None => println!("\n  {}", style(&stats.name).cyan().bold()),
    }
    println!("    lines added:        {}", style(stats.total_added).green());
    println!("    lines deleted:      {}", style(stats.total_deleted).red());
    println!(
        "    AI lines added:     {} ({:.2}%)",
        stats.total_ai_added,
        stats.ai_added_percent()
    );
    println!(
        "    AI lines deleted:   {} ({:.2}%)",
        stats.total_ai_deleted,
        stats.ai_deleted_percent()
    );
    println!("    fix commits:        {}", stats.fix_count);
    println!("    AI-assisted fixes:  {}", stats.fix_and_aig_count);
    println!("    AI fix share:       {:.2}%", stats.ai_fix_percent());
}

pub fn build_output(
    repository_path: String,
    window: &DateWindow,
    author_filter: Option<&str>,
    identity: IdentityShape,
    totals: &AuthorTotals,
    commits_analyzed: usize,
) -> ReportOutput {
    ReportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path,
        since: window.since,
        until: window.until,
        author_filter: author_filter.map(str::to_string),
        identity,
        commits_analyzed,
        authors: totals.iter().map(|(_, s)| AuthorReport::from(s)).collect(),
        overall: AuthorReport::from(&totals.overall()),
    }
}

pub fn output_json(output: &ReportOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

pub fn output_ndjson(totals: &AuthorTotals) -> Result<()> {
    for (_, stats) in totals.iter() {
        println!("{}", serde_json::to_string(&AuthorReport::from(stats))?);
    }
    Ok(())
}
