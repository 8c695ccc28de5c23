//! Read-only commands: `parse`, `search`, `cat`, `hash`.

use std::path::PathBuf;

use clap::Args;
use mdsect_core::{outline, DocumentInfo, DocumentOutline, SearchOptions, SectionId};

use super::{load, parse_id, print_json};

/// `mdsect parse` arguments.
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Document file.
    pub file: PathBuf,
}

/// `mdsect search` arguments.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Document file.
    pub file: PathBuf,

    /// Query text (or pattern with `--regex`).
    pub query: String,

    /// Treat the query as a regular expression.
    #[arg(long)]
    pub regex: bool,

    /// Case-insensitive matching.
    #[arg(long, short = 'i')]
    pub ignore_case: bool,

    /// Match whole words only.
    #[arg(long, short = 'w')]
    pub word: bool,

    /// Restrict the search to one section's region.
    #[arg(long)]
    pub section: Option<String>,

    /// With `--section`, widen the region to the whole subtree.
    #[arg(long)]
    pub deep: bool,
}

/// `mdsect cat` arguments.
#[derive(Debug, Args)]
pub struct CatArgs {
    /// Files to concatenate, in order. The first file keeps its
    /// frontmatter; later frontmatter blocks are dropped.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Deepen every heading of the appended files by this many levels.
    #[arg(long, default_value_t = 0)]
    pub shift: u8,
}

/// `mdsect hash` arguments.
#[derive(Debug, Args)]
pub struct HashArgs {
    /// Heading level (1 = top-level).
    pub level: u8,

    /// Heading title, whitespace-trimmed.
    pub title: String,

    /// Zero-based rank among sections sharing this level and title.
    #[arg(long, default_value_t = 0)]
    pub occurrence: usize,
}

/// Print the document's outline and metadata summary.
pub fn run_parse(args: ParseArgs, json: bool) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let info = DocumentInfo::of(&doc);
    let outline = DocumentOutline::build(&doc);

    if json {
        return print_json(&serde_json::json!({ "info": info, "outline": outline }));
    }

    if let Some(title) = &info.title {
        println!("{title}");
    }
    println!(
        "{} lines, {} sections, frontmatter: {}",
        info.lines,
        info.sections,
        if info.has_frontmatter { "yes" } else { "no" }
    );
    for node in outline.flatten_preorder() {
        println!(
            "{}  {}{} (line {})",
            node.id,
            "  ".repeat((node.level as usize).saturating_sub(1)),
            node.title,
            node.line
        );
    }
    Ok(())
}

/// Search the document and print hits with their enclosing section.
pub fn run_search(args: SearchArgs, json: bool) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let options = SearchOptions {
        case_sensitive: !args.ignore_case,
        whole_word: args.word,
        regex: args.regex,
    };

    let matches = match &args.section {
        Some(raw) => {
            let id = parse_id(raw)?;
            mdsect_core::search::find_in_section(&doc, &id, &args.query, options, args.deep)?
        }
        None => mdsect_core::search::find_all(&doc, &args.query, options)?,
    };

    if json {
        return print_json(&matches);
    }
    for m in &matches {
        let section = m
            .section
            .as_ref()
            .map(SectionId::to_string)
            .unwrap_or_else(|| "-".to_string());
        println!("{}:{}-{} [{}] {}", m.line, m.start, m.end, section, m.line_text);
    }
    Ok(())
}

/// Concatenate documents to stdout.
pub fn run_cat(args: CatArgs) -> anyhow::Result<()> {
    let docs = args
        .files
        .iter()
        .map(|f| load(f))
        .collect::<anyhow::Result<Vec<_>>>()?;
    print!("{}", outline::concat(&docs, args.shift));
    Ok(())
}

/// Print the id a heading would receive.
pub fn run_hash(args: HashArgs, json: bool) -> anyhow::Result<()> {
    let id = SectionId::compute(args.level, &args.title, args.occurrence);
    if json {
        return print_json(&serde_json::json!({ "id": id }));
    }
    println!("{id}");
    Ok(())
}
