use anyhow::{anyhow, Result};
use catalog_core::source::{load_dataset, load_dataset_dir};
use catalog_core::{
    academic_units, faculty_members, page_links, AcademicUnit, CategoryFilter, Dataset, FacultyMember, LabsLink,
    PageLabel, PageLink, PageWindow, QueryController, ResultState, Searchable, UnitCategory, DEFAULT_PAGE_SIZE,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

const PAGE_SIZE_ENV: &str = "CATALOG_PAGE_SIZE";

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Search and page through the academics hub and faculty directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ListingArgs {
    /// Dataset file or directory (.json / .jsonl); the built-in data when absent
    #[arg(long)]
    input: Option<PathBuf>,
    /// Case-insensitive substring to search for
    #[arg(long, default_value = "")]
    query: String,
    /// 1-based page to show
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Records per page (falls back to $CATALOG_PAGE_SIZE, then 6)
    #[arg(long)]
    page_size: Option<usize>,
    /// Print the page window as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List faculty members
    Faculty {
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// List departments and research centers
    Academics {
        #[command(flatten)]
        listing: ListingArgs,
        /// all, department or research_center
        #[arg(long, default_value = "all")]
        category: CategoryFilter<UnitCategory>,
    },
    /// Check a dataset file or directory for duplicate ids and empty records
    Validate {
        #[arg(long, value_enum)]
        kind: Kind,
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a single record by id
    Show {
        #[arg(long, value_enum)]
        kind: Kind,
        id: String,
        /// Dataset file or directory; the built-in data when absent
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the pagination bar for a page count
    Pages {
        #[arg(long)]
        total: usize,
        #[arg(long, default_value_t = 1)]
        current: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Faculty,
    Academics,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Faculty { listing } => {
            let loaded;
            let dataset = match &listing.input {
                Some(path) => {
                    loaded = load_input::<FacultyMember>(path)?;
                    &loaded
                }
                None => faculty_members(),
            };
            let empty = "No faculty members match your current search criteria.";
            run_listing(dataset, &listing, None, empty, faculty_line)
        }
        Commands::Academics { listing, category } => {
            let loaded;
            let dataset = match &listing.input {
                Some(path) => {
                    loaded = load_input::<AcademicUnit>(path)?;
                    &loaded
                }
                None => academic_units(),
            };
            if !listing.json {
                println!("{}", category.label());
            }
            let empty = "No programs or centers match your current search or filter.";
            run_listing(dataset, &listing, Some(category), empty, academic_line)
        }
        Commands::Validate { kind, input } => {
            let count = match kind {
                Kind::Faculty => load_input::<FacultyMember>(&input)?.len(),
                Kind::Academics => load_input::<AcademicUnit>(&input)?.len(),
            };
            println!("ok: {count} records in {}", input.display());
            Ok(())
        }
        Commands::Show { kind, id, input } => {
            let line = match kind {
                Kind::Faculty => match &input {
                    Some(path) => record_line(&load_input::<FacultyMember>(path)?, &id, faculty_line)?,
                    None => record_line(faculty_members(), &id, faculty_line)?,
                },
                Kind::Academics => match &input {
                    Some(path) => record_line(&load_input::<AcademicUnit>(path)?, &id, academic_line)?,
                    None => record_line(academic_units(), &id, academic_line)?,
                },
            };
            println!("{line}");
            Ok(())
        }
        Commands::Pages { total, current } => {
            println!("{}", render_links(&page_links(total, current)));
            Ok(())
        }
    }
}

fn load_input<R: Searchable + DeserializeOwned>(path: &Path) -> Result<Dataset<R>> {
    if path.is_dir() {
        load_dataset_dir(path)
    } else {
        load_dataset(path)
    }
}

fn record_line<R: Searchable>(dataset: &Dataset<R>, id: &str, line: fn(&R) -> String) -> Result<String> {
    let record = dataset.get(id).ok_or_else(|| anyhow!("no record with id `{id}`"))?;
    Ok(line(record))
}

fn run_listing<R>(
    dataset: &Dataset<R>,
    args: &ListingArgs,
    category: Option<CategoryFilter<R::Category>>,
    empty_message: &str,
    line: fn(&R) -> String,
) -> Result<()>
where
    R: Searchable + Serialize,
{
    let page_size = args.page_size.unwrap_or_else(|| page_size_from_env(std::env::var(PAGE_SIZE_ENV).ok().as_deref()));
    let mut controller = QueryController::new(dataset, page_size);
    if let Some(category) = category {
        controller.set_category(category);
    }
    controller.set_search_term(args.query.as_str());
    if args.page != 1 && !controller.go_to_page(args.page) {
        tracing::warn!(page = args.page, total_pages = controller.window().total_pages, "page out of range, showing page 1");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(controller.window())?);
        return Ok(());
    }

    let window = controller.window();
    match controller.result_state() {
        ResultState::NoMatches => println!("{empty_message}"),
        ResultState::Matches { total } => {
            if let (Some(first), Some(last)) =
                (window.first_item_number(controller.page_size()), window.last_item_number(controller.page_size()))
            {
                println!("Showing {first}-{last} of {total}");
            }
            for item in &window.items {
                println!("  {}", line(item));
            }
            if window.shows_controls() {
                println!("{}", pagination_bar(window));
            }
        }
    }
    Ok(())
}

fn page_size_from_env(raw: Option<&str>) -> usize {
    let Some(raw) = raw else { return DEFAULT_PAGE_SIZE };
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            tracing::warn!(var = PAGE_SIZE_ENV, value = raw, "invalid page size, using default");
            DEFAULT_PAGE_SIZE
        }
    }
}

fn faculty_line(member: &FacultyMember) -> String {
    let mut line = format!("{} - {}, {}", member.display_name(), member.title, member.department);
    if !member.research_interests.is_empty() {
        line.push_str(&format!(" [{}]", member.research_interests.join(", ")));
    }
    line.push_str(&format!(" {}", member.profile_anchor()));
    line
}

fn academic_line(unit: &AcademicUnit) -> String {
    let kind = unit.category.map(|c| c.label()).unwrap_or("Uncategorized");
    let labs = match unit.labs_link() {
        LabsLink::External(url) => format!("labs: {url} (external)"),
        LabsLink::Internal(path) => format!("labs: {path}"),
    };
    format!("{} ({kind}) {} {labs}", unit.display_name(), unit.page_path())
}

fn render_links(links: &[PageLink]) -> String {
    links
        .iter()
        .map(|l| match l.label {
            PageLabel::Number(n) if l.is_active => format!("[{n}]"),
            PageLabel::Number(n) => n.to_string(),
            PageLabel::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `‹ 1 … 5 [6] 7 … 10 ›`, with disabled arrows left out.
fn pagination_bar<R>(window: &PageWindow<'_, R>) -> String {
    let mut parts = Vec::with_capacity(3);
    if window.has_previous {
        parts.push("‹".to_string());
    }
    parts.push(render_links(&window.page_links));
    if window.has_next {
        parts.push("›".to_string());
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::paginate;

    #[test]
    fn env_page_size_falls_back_on_bad_values() {
        assert_eq!(page_size_from_env(None), DEFAULT_PAGE_SIZE);
        assert_eq!(page_size_from_env(Some("4")), 4);
        assert_eq!(page_size_from_env(Some("0")), DEFAULT_PAGE_SIZE);
        assert_eq!(page_size_from_env(Some("six")), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn bar_omits_disabled_arrows() {
        let data: Vec<u32> = (0..100).collect();
        let refs: Vec<&u32> = data.iter().collect();
        assert_eq!(pagination_bar(&paginate(&refs, 10, 6)), "‹ 1 … 5 [6] 7 … 10 ›");
        assert_eq!(pagination_bar(&paginate(&refs, 10, 1)), "[1] 2 3 4 … 10 ›");
        assert_eq!(pagination_bar(&paginate(&refs, 10, 10)), "‹ 1 … 7 8 9 [10]");
    }

    #[test]
    fn faculty_line_includes_anchor() {
        let member = &faculty_members().records()[2];
        let line = faculty_line(member);
        assert!(line.starts_with("Dr. Anya Sharma - Professor, Quantum Computing"));
        assert!(line.ends_with("/faculty-directory#dr-anya-sharma"));
    }

    #[test]
    fn academic_line_uses_name_and_links() {
        let unit = academic_units().get("ai-llm-research").expect("built-in unit");
        assert_eq!(
            academic_line(unit),
            "AI & LLM Research Center (Research Centers) /academics-hub/ai-llm-research labs: /research-and-innovation/ai-llm-center"
        );
    }

    #[test]
    fn show_finds_records_by_id() {
        let line = record_line(faculty_members(), "dr-olivia-lee", faculty_line).unwrap();
        assert!(line.starts_with("Dr. Olivia Lee - Associate Professor"));
        let err = record_line(academic_units(), "nope", academic_line).unwrap_err();
        assert_eq!(err.to_string(), "no record with id `nope`");
    }

    #[test]
    fn cli_parses_academics_category() {
        let cli = Cli::try_parse_from(["catalog", "academics", "--category", "research_center", "--query", "ai"]).unwrap();
        match cli.command {
            Commands::Academics { listing, category } => {
                assert_eq!(category, CategoryFilter::Only(UnitCategory::ResearchCenter));
                assert_eq!(listing.query, "ai");
                assert_eq!(listing.page, 1);
            }
            _ => panic!("expected academics"),
        }
        assert!(Cli::try_parse_from(["catalog", "academics", "--category", "labs"]).is_err());
    }
}
