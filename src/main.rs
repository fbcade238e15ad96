use clap::{Parser, Subcommand};
use folio::{Locale, Site, aggregate, check, config, output, page};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Resolve, list and check the content tree of a file-based website")]
#[command(long_about = "\
Resolve, list and check the content tree of a file-based website

The content directory is the database. Files become articles, directories
become sections, and an index file turns a directory into a single article.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── blog/
  │   ├── _index.mdx               # Section title/description
  │   ├── _index.gu.mdx            # ... in Gujarati
  │   ├── post-a.mdx               # Flat article
  │   ├── post-a.gu.mdx            # ... in Gujarati
  │   ├── post-b/                  # Bundle article (has index.mdx)
  │   │   ├── index.mdx
  │   │   └── diagram.png          # Linked as ./diagram.png
  │   └── cover.png                # Downloadable file
  └── resources/
      └── study-materials/
          └── 16-it/               # Section (no index.mdx)
              └── sem-1/...

Resolution order for a slug (first existing file wins):
  slug.gu.mdx → slug.mdx → slug/index.gu.mdx → slug/index.mdx
  (the .gu candidates only with --lang gu)

Run 'folio gen-config' to generate a documented config.toml.
Set RUST_LOG=debug to see resolution decisions.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Locale to resolve for (en, gu)
    #[arg(long, default_value = "en", global = true)]
    lang: Locale,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one slug in a directory
    Resolve { dir: String, slug: String },
    /// List a directory: sections, items and files
    List { dir: String },
    /// Build the breadcrumb trail for a base section and path segments
    Breadcrumbs { base: String, segments: Vec<String> },
    /// Items directly under a section, newest first
    All { section: String },
    /// Items at any depth under a directory, newest first
    AllRecursive {
        #[arg(default_value = "")]
        root: String,
    },
    /// Tag counts across a directory, or the items carrying one tag
    Tags {
        #[arg(default_value = "")]
        root: String,
        /// Show the items tagged with this tag instead of counts
        #[arg(long)]
        tag: Option<String>,
    },
    /// Resolve a page request to an article or a listing
    Page { base: String, segments: Vec<String> },
    /// Validate the content tree without serving it
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site = Site::open(&cli.source)?;
    let lang = cli.lang;

    match cli.command {
        Command::Resolve { dir, slug } => {
            let item = site
                .resolver()
                .resolve(&dir, &slug, lang)?
                .ok_or_else(|| format!("no content for '{slug}' in '{dir}' ({lang})"))?;
            emit(cli.json, &item, output::print_item)?;
        }
        Command::List { dir } => {
            let listing = site.lister().list(&dir, lang)?;
            emit(cli.json, &listing, output::print_listing)?;
        }
        Command::Breadcrumbs { base, segments } => {
            let crumbs = site.breadcrumbs().build(&base, &segments, lang);
            emit(cli.json, &crumbs, |c| output::print_breadcrumbs(c))?;
        }
        Command::All { section } => {
            let items = site.aggregator().list_all(&section, lang)?;
            emit(cli.json, &items, |i| output::print_items(i))?;
        }
        Command::AllRecursive { root } => {
            let items = site.aggregator().list_all_recursive(&root, lang)?;
            emit(cli.json, &items, |i| output::print_items(i))?;
        }
        Command::Tags { root, tag } => {
            let items = site.aggregator().list_all_recursive(&root, lang)?;
            match tag {
                Some(tag) => {
                    let tagged: Vec<_> = aggregate::with_tag(&items, &tag).into_iter().cloned().collect();
                    emit(cli.json, &tagged, |i| output::print_items(i))?;
                }
                None => {
                    let counts = aggregate::tag_counts(&items);
                    emit(cli.json, &counts, |c| output::print_tag_counts(c))?;
                }
            }
        }
        Command::Page { base, segments } => {
            let resolved = page::resolve_page(&site, &base, &segments, lang)?
                .ok_or_else(|| format!("no page at /{}/{} ({lang})", base, segments.join("/")))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                let siblings = match &resolved {
                    page::Page::Article { .. } => site.aggregator().list_all_recursive(&base, lang)?,
                    page::Page::Listing { .. } => Vec::new(),
                };
                let neighbours = aggregate::adjacent(&siblings, &segments.join("/"));
                output::print_page(&resolved, neighbours);
            }
        }
        Command::Check => {
            let report = check::check(&cli.source, site.config())?;
            emit(cli.json, &report, output::print_check_report)?;
            if !report.is_clean() {
                return Err(format!("{} content issue(s) found", report.issues.len()).into());
            }
        }
        // Printed above without opening the site.
        Command::GenConfig => {}
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for `--json`. `RUST_LOG` overrides
/// the default of warnings only.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, print: impl FnOnce(&T)) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print(value);
    }
    Ok(())
}
