//! MLB payroll atlas CLI - map, team and state views in the terminal

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use dialoguer::{theme::ColorfulTheme, Select};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use mlbpay::config::{
    DEFAULT_DETAIL_PAGE_URL, DEFAULT_PAYROLL_SOURCE, DEFAULT_PERFORMANCE_SOURCE,
};
use mlbpay::core::allocation::AllocationBreakdown;
use mlbpay::core::comparison::{ComparisonView, Rating, Scope, SortOrder};
use mlbpay::core::tiers::{legend, StateShade, Tier};
use mlbpay::core::timeline::TeamTimeline;
use mlbpay::data::roster::roster;
use mlbpay::data::DataSource;
use mlbpay::models::{Division, EfficiencyBand, League};
use mlbpay::view::{Dashboard, IntroState, MapFilter, MemoryStore, Panel, TeamQuery};

#[derive(Parser)]
#[command(name = "mlbpay")]
#[command(author, version, about = "MLB payroll atlas CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Payroll snapshot (CSV path or URL)
    #[arg(long, env = "PAYROLL_SOURCE", default_value = DEFAULT_PAYROLL_SOURCE)]
    payroll: String,

    /// Yearly performance export (UTF-16LE TSV path or URL)
    #[arg(long, env = "PERFORMANCE_SOURCE", default_value = DEFAULT_PERFORMANCE_SOURCE)]
    performance: String,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked roster with payroll tiers
    Map {
        /// Only show these leagues (AL, NL)
        #[arg(long)]
        league: Vec<League>,

        /// Only show these divisions ("AL East", ...)
        #[arg(long)]
        division: Vec<Division>,

        /// Only show these tiers (1-6)
        #[arg(long)]
        tier: Vec<u8>,
    },

    /// Detail view for one team
    Team {
        /// Team abbreviation, e.g. NYY
        abbr: String,

        /// Comparison scope: division, league or mlb
        #[arg(long, default_value = "division")]
        scope: Scope,

        /// Comparison order: spending-desc, spending-asc or alphabetical
        #[arg(long, default_value = "spending-desc")]
        sort: SortOrder,
    },

    /// Map shading per state
    States,

    /// Detail page link for a team
    Link {
        /// Team abbreviation
        abbr: String,

        /// Detail page base URL
        #[arg(long, env = "DETAIL_PAGE_URL", default_value = DEFAULT_DETAIL_PAGE_URL)]
        base: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let dashboard = load_dashboard(&cli.payroll, &cli.performance)?;

    if cli.interactive {
        run_interactive(&dashboard)?;
    } else if let Some(command) = cli.command {
        match command {
            Commands::Map {
                league,
                division,
                tier,
            } => {
                let filter = build_filter(&league, &division, &tier)?;
                show_map(&dashboard, &filter, cli.json)?;
            }
            Commands::Team { abbr, scope, sort } => {
                show_team(&dashboard, &abbr, scope, sort, cli.json)?;
            }
            Commands::States => {
                show_states(&dashboard, cli.json)?;
            }
            Commands::Link { abbr, base } => {
                show_link(&dashboard, &abbr, &base, cli.json)?;
            }
        }
    } else {
        println!("Use --help for usage information or --interactive for interactive mode.");
    }

    Ok(())
}

fn load_dashboard(payroll: &str, performance: &str) -> Result<Dashboard> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid spinner template")?,
    );
    pb.set_message("Loading payroll and performance data...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let dashboard = rt.block_on(Dashboard::load(
        &DataSource::parse(payroll),
        &DataSource::parse(performance),
    ));

    pb.finish_and_clear();
    Ok(dashboard)
}

fn build_filter(leagues: &[League], divisions: &[Division], tiers: &[u8]) -> Result<MapFilter> {
    let mut filter = MapFilter::default();

    if !leagues.is_empty() {
        for league in League::ALL {
            filter.set_league(league, leagues.contains(&league));
        }
    }
    if !divisions.is_empty() {
        for division in Division::ALL {
            filter.set_division(division, divisions.contains(&division));
        }
    }
    if !tiers.is_empty() {
        for value in tiers {
            Tier::new(*value).with_context(|| format!("Tier {} is not between 1 and 6", value))?;
        }
        for tier in Tier::ALL {
            filter.set_tier(tier, tiers.contains(&tier.value()));
        }
    }

    Ok(filter)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `#rrggbb` → truecolor text
fn paint(text: &str, hex: &str) -> ColoredString {
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(255)
    };
    text.truecolor(channel(1), channel(3), channel(5))
}

fn print_unavailable(title: &str, message: &str) {
    println!("{}", title.yellow().bold());
    println!("  {}", message.red());
    println!();
}

fn show_map(dashboard: &Dashboard, filter: &MapFilter, json: bool) -> Result<()> {
    let map = match dashboard.map() {
        Panel::Ready(map) => map,
        Panel::Unavailable(message) => {
            print_unavailable("Payroll map", &message);
            return Ok(());
        }
    };

    let visible: Vec<_> = map
        .teams()
        .iter()
        .filter(|team| filter.is_visible(team))
        .collect();

    if json {
        let cards: Vec<_> = visible.iter().map(|team| team.card()).collect();
        return print_json(&cards);
    }

    println!("{}", "Payroll tiers (ranked by average payroll)".yellow().bold());
    println!(
        "{:>4} {:<24} {:<5} {:<11} {:>4} {:>13} {:>16} {:>6}",
        "Rank", "Team", "Abbr", "Division", "Tier", "Avg. Wins", "Avg. Payroll", "W/$M"
    );
    println!("{}", "-".repeat(92));

    for (rank, team) in map.teams().iter().enumerate() {
        if !filter.is_visible(team) {
            continue;
        }
        let card = team.card();
        let efficiency = card.efficiency.to_string();
        let efficiency = match card.efficiency_band {
            EfficiencyBand::Unknown => efficiency.dimmed(),
            band => paint(&efficiency, band.color()),
        };

        println!(
            "{:>4} {:<24} {:<5} {:<11} {} {:>13} {:>16} {:>6}",
            rank + 1,
            card.name,
            card.abbreviation,
            card.division.name(),
            paint(&format!("{:>4}", card.tier), &card.tier_color),
            card.avg_wins,
            card.avg_payroll,
            efficiency
        );
    }
    println!();

    println!("{}", "Legend".yellow().bold());
    for entry in legend() {
        println!("  {} {}", paint("■", entry.color), entry.label);
    }
    println!();
    println!("Showing {} of {} teams", visible.len(), map.teams().len());

    Ok(())
}

fn show_team(
    dashboard: &Dashboard,
    abbr: &str,
    scope: Scope,
    sort: SortOrder,
    json: bool,
) -> Result<()> {
    let query = match dashboard.map().ready().and_then(|map| map.click(abbr)) {
        Some(link) => TeamQuery::from(link),
        None => TeamQuery {
            abbr: Some(abbr.trim().to_uppercase()),
            name: roster()
                .iter()
                .find(|t| t.abbreviation.eq_ignore_ascii_case(abbr.trim()))
                .map(|t| t.name.to_string()),
            ..TeamQuery::default()
        },
    };

    let detail = dashboard.team_detail(query, scope, sort);
    if json {
        return print_json(&detail);
    }

    let header = &detail.header;
    println!(
        "{} ({}) - {} / {}",
        header.name.cyan().bold(),
        header.abbr,
        header.league,
        header.division
    );
    match header.tier {
        Some(tier) => println!(
            "  Tier {}  |  Avg. wins {}  |  Avg. payroll {}",
            paint(&tier.to_string(), Tier::new(tier).map_or("#ffffff", |t| t.color())),
            header.wins,
            header.payroll
        ),
        None => println!("  Avg. wins {}  |  Avg. payroll {}", header.wins, header.payroll),
    }
    println!();

    match &detail.timeline {
        Panel::Ready(timeline) => print_timeline(timeline),
        Panel::Unavailable(message) => print_unavailable("Wins vs spending", message),
    }
    match &detail.allocation {
        Panel::Ready(breakdown) => print_allocation(breakdown),
        Panel::Unavailable(message) => print_unavailable("Payroll allocation", message),
    }
    match &detail.comparison {
        Panel::Ready(view) => print_comparison(view),
        Panel::Unavailable(message) => print_unavailable("Spending comparison", message),
    }

    Ok(())
}

fn print_timeline(timeline: &TeamTimeline) {
    println!("{}", "Wins vs spending".yellow().bold());
    println!("{:>6} {:>6} {:>12} {:>8} {:>10}", "Year", "Wins", "Spend ($M)", "W/$M", "Postseason");
    println!("{}", "-".repeat(46));

    for point in &timeline.points {
        let postseason = if point.postseason {
            "★".yellow()
        } else {
            "".normal()
        };
        println!(
            "{:>6} {:>6.0} {:>12.1} {:>8} {:>10}",
            point.year, point.wins, point.spending_millions, point.efficiency, postseason
        );
    }

    let summary = &timeline.summary;
    println!();
    println!(
        "  {} seasons, {} postseason appearances",
        summary.seasons, summary.postseason_appearances
    );
    println!("  Avg. wins: {:.1}", summary.avg_wins);
    println!("  Avg. payroll: {}", summary.avg_payroll_display());
    if let Some(per_win) = summary.spending_per_win_display() {
        println!("  Avg. spending per win: {}", per_win);
    }
    println!();
}

fn print_allocation(breakdown: &AllocationBreakdown) {
    println!("{}", "Payroll allocation".yellow().bold());
    for slice in breakdown.displayed() {
        let label = paint(&format!("{:<10}", slice.class.name()), slice.color);
        let marker = if slice.significant { " ⚠".red() } else { "".normal() };
        println!(
            "  {} {:>6.1}%  {:<45}{}",
            label,
            slice.percentage,
            slice.description.dimmed(),
            marker
        );
    }
    for alert in breakdown.alerts() {
        println!("  {} {}", "Warning:".red().bold(), alert);
    }
    println!();
}

fn print_comparison(view: &ComparisonView) {
    println!("{}", view.title.yellow().bold());
    println!("{:>4} {:<24} {:>10} {:>10} {:<10}", "Rank", "Team", "$M / win", "vs team", "Rating");
    println!("{}", "-".repeat(62));

    for row in &view.rows {
        let delta = row
            .delta_vs_selected
            .map(|d| format!("{:+.2}", d))
            .unwrap_or_else(|| "-".to_string());
        let rating = match row.rating {
            Rating::Excellent => row.rating.to_string().green(),
            Rating::Good => row.rating.to_string().yellow(),
            Rating::Poor => row.rating.to_string().red(),
        };
        let name = if row.is_selected {
            format!("{:<24}", row.name).bold()
        } else {
            format!("{:<24}", row.name).normal()
        };
        println!(
            "{:>4} {} {:>10.2} {:>10} {:<10}",
            row.rank, name, row.spending_per_win, delta, rating
        );
    }
    if view.rows.is_empty() {
        println!("  {}", "No teams in this scope.".dimmed());
    }
    println!();
}

fn show_states(dashboard: &Dashboard, json: bool) -> Result<()> {
    let map = match dashboard.map() {
        Panel::Ready(map) => map,
        Panel::Unavailable(message) => {
            print_unavailable("State shading", &message);
            return Ok(());
        }
    };

    let shades = map.state_shades();
    if json {
        return print_json(&shades);
    }

    println!("{}", "State shading (rounded mean tier)".yellow().bold());
    println!("{:<16} {:>6} {:>5}  {}", "State", "Mean", "Tier", "Teams");
    println!("{}", "-".repeat(50));
    for (state, shade) in &shades {
        if let StateShade::Teams {
            teams,
            mean_tier,
            tier,
        } = shade
        {
            println!(
                "{:<16} {:>6.2} {}  {}",
                state,
                mean_tier,
                paint(&format!("{:>5}", tier.value()), shade.color()),
                teams.join(", ")
            );
        }
    }

    Ok(())
}

fn show_link(dashboard: &Dashboard, abbr: &str, base: &str, json: bool) -> Result<()> {
    let base = Url::parse(base).with_context(|| format!("Invalid detail page URL {}", base))?;
    let map = match dashboard.map() {
        Panel::Ready(map) => map,
        Panel::Unavailable(message) => anyhow::bail!("{}", message),
    };
    let link = map
        .click(abbr)
        .with_context(|| format!("Unknown team {}", abbr))?;

    if json {
        return print_json(&link);
    }
    println!("{}", link.url(&base));
    Ok(())
}

fn run_interactive(dashboard: &Dashboard) -> Result<()> {
    let mut session = MemoryStore::default();
    let mut intro = IntroState::read(&session);

    println!("{}", "Interactive mode".green().bold());
    println!();

    let theme = ColorfulTheme::default();

    loop {
        if intro.should_play() {
            println!("{}", "MLB payroll atlas".cyan().bold());
            println!("Thirty clubs, six payroll tiers. Do bigger payrolls buy more wins?");
            println!("Pick the map for the league-wide picture or a team for the details.");
            println!();
            intro.dismiss(&mut session);
        }

        let options = vec!["Payroll map", "Team detail", "State shading", "Quit"];

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to see?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                println!();
                show_map(dashboard, &MapFilter::default(), false)?;
                println!();
            }
            1 => {
                let teams: Vec<String> = roster()
                    .iter()
                    .map(|t| format!("{} ({})", t.name, t.abbreviation))
                    .collect();
                let team = Select::with_theme(&theme)
                    .with_prompt("Team")
                    .items(&teams)
                    .default(0)
                    .interact()?;

                let scopes = [Scope::Division, Scope::League, Scope::Global];
                let scope = Select::with_theme(&theme)
                    .with_prompt("Compare against")
                    .items(&["Division", "League", "MLB"])
                    .default(0)
                    .interact()?;

                let sorts = [SortOrder::SpendingDesc, SortOrder::SpendingAsc, SortOrder::Alphabetical];
                let sort = Select::with_theme(&theme)
                    .with_prompt("Sort by")
                    .items(&["Spending (high to low)", "Spending (low to high)", "Team name"])
                    .default(0)
                    .interact()?;

                println!();
                show_team(
                    dashboard,
                    roster()[team].abbreviation,
                    scopes[scope],
                    sorts[sort],
                    false,
                )?;
            }
            2 => {
                println!();
                show_states(dashboard, false)?;
                println!();
            }
            3 => {
                println!("Goodbye!");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}
