//! Listings filter CLI
//!
//! Offline tooling for payloads captured from a newsletter page: summarise a
//! payload, run a filter over it, and replay a projection against a saved list
//! of listing links.

use std::fs;

use clap::{Parser, Subcommand, ValueEnum};

use lp_core::price::{format_price, PriceScale};
use lp_core::{
    derive_price_range, match_listings, Control, FilterState, LinkMatch, ListingsData, PriceDuration,
    VisibilityProjector,
};

mod logger;
mod payload;
mod replay;

#[derive(Parser)]
#[command(name = "lp-cli")]
#[command(about = "Listings Project filter payload tools")]
struct Cli {
    /// Log diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Category key ("all" for any)
    #[arg(long)]
    category: Option<String>,

    /// Pay frequency: /month, /week, /day ("all" for any)
    #[arg(long)]
    frequency: Option<String>,

    /// Maximum price label, e.g. "$1200"
    #[arg(long)]
    max_price: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LinkMode {
    Substring,
    PathSegment,
}

impl From<LinkMode> for LinkMatch {
    fn from(mode: LinkMode) -> Self {
        match mode {
            LinkMode::Substring => LinkMatch::Substring,
            LinkMode::PathSegment => LinkMatch::PathSegment,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a payload file (the JSON value of data-react-props)
    Info {
        #[arg(short, long)]
        input: String,
    },

    /// Print the listing identifiers matching a filter
    Filter {
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Emit JSON instead of one identifier per line
        #[arg(long)]
        json: bool,
    },

    /// Replay a projection against a file of listing hrefs (one per line)
    Project {
        #[arg(short, long)]
        input: String,

        /// File with one anchor href per line, in page order
        #[arg(long)]
        links: String,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, value_enum, default_value = "substring")]
        link_match: LinkMode,
    },
}

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let result = match cli.command {
        Commands::Info { input } => cmd_info(&input),
        Commands::Filter { input, filter, json } => cmd_filter(&input, &filter, json),
        Commands::Project {
            input,
            links,
            filter,
            link_match,
        } => cmd_project(&input, &links, &filter, link_match.into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn build_state(args: &FilterArgs) -> Result<FilterState, String> {
    let mut state = FilterState::default();
    let controls = [
        (Control::Category, &args.category),
        (Control::Frequency, &args.frequency),
        (Control::Price, &args.max_price),
    ];
    for (control, value) in controls {
        if let Some(value) = value {
            let update = control
                .update_for(value)
                .ok_or_else(|| format!("Invalid value for {:?}: '{}'", control, value))?;
            state.merge(update);
        }
    }
    Ok(state)
}

fn cmd_info(input: &str) -> Result<(), String> {
    let data = payload::load(input)?;

    println!("Payload: {}", input);
    println!("  Listings:    {}", data.listings.len());
    println!("  Categories:  {}", data.filterable_categories().len());
    for option in data.filterable_categories() {
        let count = data.listings.iter().filter(|l| l.category_key == option.key).count();
        println!("    {:<20} {:<24} {}", option.key, option.label, count);
    }

    println!("  Frequencies:");
    for duration in PriceDuration::SELECTABLE.iter().chain([PriceDuration::None].iter()) {
        let count = data.listings.iter().filter(|l| l.price_duration == *duration).count();
        println!("    {:<20} {}", duration.label(), count);
    }

    match derive_price_range(data.prices()) {
        Some(range) => {
            let scale = PriceScale::from_range(range);
            println!(
                "  Price range: {} - {} (slider midpoint {})",
                format_price(range.min_cents),
                format_price(range.max_cents),
                format_price(scale.mid_cents)
            );
        }
        None => println!("  Price range: none (price control disabled)"),
    }

    Ok(())
}

fn cmd_filter(input: &str, args: &FilterArgs, json: bool) -> Result<(), String> {
    let data = payload::load(input)?;
    let state = build_state(args)?;
    let result = match_listings(&state, &data.listings);

    if json {
        let out = serde_json::json!({
            "state": state,
            "total": data.listings.len(),
            "matches": result.ids(),
        });
        let text = serde_json::to_string_pretty(&out).map_err(|e| format!("Failed to encode result: {}", e))?;
        println!("{}", text);
    } else {
        for id in result.iter() {
            println!("{}", id);
        }
        eprintln!("{} of {} listings match", result.len(), data.listings.len());
    }

    Ok(())
}

fn cmd_project(input: &str, links: &str, args: &FilterArgs, link_match: LinkMatch) -> Result<(), String> {
    let data: ListingsData = payload::load(input)?;
    let state = build_state(args)?;
    let hrefs = fs::read_to_string(links).map_err(|e| format!("Failed to read '{}': {}", links, e))?;

    let mut page = replay::LinkList::from_lines(&hrefs);
    let result = match_listings(&state, &data.listings);
    let report = VisibilityProjector::new(link_match, 1).apply(&mut page, &result);

    for href in page.visible() {
        println!("{}", href);
    }
    println!();
    println!("Projection:");
    println!("  Matches:     {}", result.len());
    println!("  Hidden:      {}", report.hidden);
    println!("  Revealed:    {}", report.revealed);
    println!("  Missing:     {}", report.missing);

    let ambiguous = replay::ambiguous_ids(&data, page.hrefs(), link_match);
    if !ambiguous.is_empty() {
        println!("  Ambiguous:   {} identifiers match more than one link", ambiguous.len());
        for (id, count) in ambiguous {
            println!("    {} ({} links)", id, count);
        }
    }

    Ok(())
}
