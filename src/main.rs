use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use analyzer::SalesAnalyzer;

mod aggregate;
mod analyzer;
mod config;
mod debug_log;
mod error;
mod loader;
mod report;
#[cfg(test)]
mod test_fixtures;
mod types;
mod utils;

#[derive(Parser)]
#[command(name = "salesrail")]
#[command(version)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    report: DefaultReportArgs,

    /// Use comma-separated number formatting
    #[arg(long, global = true)]
    number_comma: Option<bool>,

    /// Locale for number formatting (en, de, fr, es, it, ja, ko, zh)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Number of decimal places for monetary amounts
    #[arg(long, global = true)]
    decimal_places: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full sales report for a CSV export
    Report(ReportArgs),
    /// List the best-selling products by revenue
    TopProducts(TopProductsArgs),
    /// List customers whose total spending reaches a threshold
    Customers(CustomersArgs),
    /// Print the records matching a filter
    Filter(FilterArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Sales CSV file, or `-` for stdin
    file: PathBuf,
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Number of products in the top-products section
    #[arg(long)]
    top: Option<usize>,

    /// Minimum total spending for the high-value customers section
    #[arg(long)]
    min_spending: Option<f64>,

    /// Output every report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Pretty-print JSON instead of a single line
    #[arg(long, default_value_t = false, requires = "json")]
    pretty: bool,
}

/// Report arguments accepted without a subcommand, so `salesrail sales.csv` prints the report.
#[derive(Args)]
struct DefaultReportArgs {
    /// Sales CSV file to report on, or `-` for stdin
    file: Option<PathBuf>,

    /// Number of products in the top-products section
    #[arg(long)]
    top: Option<usize>,

    /// Minimum total spending for the high-value customers section
    #[arg(long)]
    min_spending: Option<f64>,

    /// Output every report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Pretty-print JSON instead of a single line
    #[arg(long, default_value_t = false, requires = "json")]
    pretty: bool,
}

impl DefaultReportArgs {
    fn into_report(self) -> Option<ReportArgs> {
        let file = self.file?;
        Some(ReportArgs {
            source: SourceArgs { file },
            top: self.top,
            min_spending: self.min_spending,
            json: self.json,
            pretty: self.pretty,
        })
    }
}

#[derive(Args)]
struct TopProductsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Number of products to list
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

#[derive(Args)]
struct CustomersArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Minimum total spending
    #[arg(long)]
    min_spending: Option<f64>,
}

#[derive(Args)]
struct FilterArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    filter: FilterCommands,
}

#[derive(Subcommand)]
enum FilterCommands {
    /// Records in exactly this category (case-sensitive)
    Category { name: String },
    /// Records dated within START..=END (YYYY-MM-DD)
    Dates { start: String, end: String },
    /// Records whose total is at least AMOUNT
    MinAmount { amount: f64 },
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    subcommand: ConfigSubcommands,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Create default configuration file
    Init {
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (number-comma, locale, decimal-places, top-products,
        /// high-value-threshold, filter-category, filter-start, filter-end, minimum-amount)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() {
    debug_log::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load().unwrap_or_else(|e| {
        eprintln!("⚠️  Ignoring config file: {e:#}");
        None
    });
    let config = config.unwrap_or_default();

    let mut formatting = config.formatting.clone();
    if let Some(number_comma) = cli.number_comma {
        formatting.number_comma = number_comma;
    }
    if let Some(locale) = cli.locale {
        formatting.locale = locale;
    }
    if let Some(decimal_places) = cli.decimal_places {
        formatting.decimal_places = decimal_places;
    }
    let format_options = formatting.number_format_options();

    let command = match cli.command {
        Some(command) => command,
        None => Commands::Report(
            cli.report
                .into_report()
                .context("No sales file given. Usage: salesrail <FILE> or salesrail <COMMAND>")?,
        ),
    };

    match command {
        Commands::Report(args) => run_report(args, config.report.clone(), &format_options)?,
        Commands::TopProducts(args) => {
            let analyzer = load_analyzer(&args.source)?;
            let n = args.limit.unwrap_or(config.report.top_products);
            print!(
                "{}",
                report::render_products(&analyzer.top_products(n), &format_options)
            );
        }
        Commands::Customers(args) => {
            let analyzer = load_analyzer(&args.source)?;
            let threshold = args
                .min_spending
                .unwrap_or(config.report.high_value_threshold);
            print!(
                "{}",
                report::render_customers(&analyzer.high_value_customers(threshold), &format_options)
            );
        }
        Commands::Filter(args) => {
            let analyzer = load_analyzer(&args.source)?;
            let matched = match &args.filter {
                FilterCommands::Category { name } => analyzer.filter_by_category(name),
                FilterCommands::Dates { start, end } => analyzer
                    .filter_by_date_range(start, end)
                    .context("Failed to apply date filter")?,
                FilterCommands::MinAmount { amount } => analyzer.filter_by_minimum_amount(*amount),
            };
            print!("{}", report::render_records(&matched, &format_options));
        }
        Commands::Config(config_args) => handle_config_subcommand(config_args)?,
    }

    Ok(())
}

fn run_report(
    args: ReportArgs,
    mut report_config: config::ReportConfig,
    format_options: &utils::NumberFormatOptions,
) -> Result<()> {
    let analyzer = load_analyzer(&args.source)?;
    if let Some(top) = args.top {
        report_config.top_products = top;
    }
    if let Some(min_spending) = args.min_spending {
        report_config.high_value_threshold = min_spending;
    }

    if args.json {
        let summary =
            analyzer.summary(report_config.top_products, report_config.high_value_threshold);
        let json = if args.pretty {
            simd_json::to_string_pretty(&summary)?
        } else {
            simd_json::to_string(&summary)?
        };
        println!("{json}");
    } else {
        let _span = debug_log::TimedSpan::new("REPORT", "render");
        let text = report::render_report(&analyzer, &report_config, format_options)?;
        print!("{text}");
    }
    Ok(())
}

fn load_analyzer(source: &SourceArgs) -> Result<SalesAnalyzer> {
    if source.file.as_os_str() == "-" {
        let records = loader::load_from_reader(std::io::stdin().lock())
            .context("Failed to load sales data from stdin")?;
        return Ok(SalesAnalyzer::from(records));
    }

    let analyzer = SalesAnalyzer::from_csv_path(&source.file)
        .with_context(|| format!("Failed to load sales data from {}", source.file.display()))?;
    if analyzer.is_empty() {
        eprintln!("⚠️  {} contains no sales records", source.file.display());
    }
    Ok(analyzer)
}

fn handle_config_subcommand(config_args: ConfigArgs) -> Result<()> {
    match config_args.subcommand {
        ConfigSubcommands::Init { overwrite } => {
            config::create_default_config(overwrite).context("Error creating config")
        }
        ConfigSubcommands::Show => config::show_config().context("Error showing config"),
        ConfigSubcommands::Set { key, value } => {
            config::set_config_value(&key, &value).context("Error setting config")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_file_runs_the_report() {
        let cli = Cli::try_parse_from(["salesrail", "sales.csv", "--top", "3", "--json"]).unwrap();
        assert!(cli.command.is_none());

        let args = cli.report.into_report().expect("default report");
        assert_eq!(args.source.file, PathBuf::from("sales.csv"));
        assert_eq!(args.top, Some(3));
        assert!(args.json);
        assert!(!args.pretty);
    }

    #[test]
    fn stdin_dash_is_accepted_without_a_subcommand() {
        let cli = Cli::try_parse_from(["salesrail", "-"]).unwrap();
        let args = cli.report.into_report().expect("default report");
        assert_eq!(args.source.file.as_os_str(), "-");
    }

    #[test]
    fn no_file_and_no_subcommand_has_no_report() {
        let cli = Cli::try_parse_from(["salesrail"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.report.into_report().is_none());
    }

    #[test]
    fn report_subcommand_still_parses() {
        let cli = Cli::try_parse_from(["salesrail", "report", "sales.csv", "--json", "--pretty"])
            .unwrap();
        match cli.command {
            Some(Commands::Report(args)) => {
                assert_eq!(args.source.file, PathBuf::from("sales.csv"));
                assert!(args.pretty);
            }
            _ => panic!("expected the report subcommand"),
        }
    }

    #[test]
    fn pretty_without_json_is_rejected() {
        assert!(Cli::try_parse_from(["salesrail", "sales.csv", "--pretty"]).is_err());
    }
}
