use anyhow::{Context, Result, bail};
use clap::Parser;
use inputhelper_core::utils::{BoolLiterals, DatePattern, Terminal};
use log::info;

/// Interactive questionnaire exercising every inputhelper prompt.
#[derive(Parser, Debug)]
#[command(name = "inputhelper", version, about)]
struct Cli {
    /// Pattern dates are parsed with (`yyyy-MM-dd` style or strftime)
    #[arg(long, default_value = "yyyy-MM-dd")]
    date_pattern: String,

    /// Format hint shown next to the date question
    #[arg(long, default_value = "YYYY-MM-DD")]
    date_display: String,

    /// Lowest accepted rating
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    min: i32,

    /// Highest accepted rating
    #[arg(long, default_value_t = 10, allow_hyphen_values = true)]
    max: i32,

    /// Word meaning yes for the subscribe question
    #[arg(long, default_value = "y")]
    yes: String,

    /// Word meaning no for the subscribe question
    #[arg(long, default_value = "n")]
    no: String,

    /// Log refused answers to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn banner() {
    println!("------------------------------------------------------------");
    println!("                      INPUT HELPER                          ");
    println!("   VERSION: {:<48}", env!("CARGO_PKG_VERSION"));
    println!("------------------------------------------------------------");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let pattern: DatePattern = cli
        .date_pattern
        .parse()
        .with_context(|| format!("Invalid --date-pattern {:?}", cli.date_pattern))?;

    if cli.min > cli.max {
        bail!("--min ({}) must not be greater than --max ({})", cli.min, cli.max);
    }
    if cli.yes.is_empty() || cli.no.is_empty() || cli.yes.to_lowercase() == cli.no.to_lowercase() {
        bail!("--yes and --no must be two different, non-empty words");
    }
    let literals = BoolLiterals::new(cli.yes.as_str(), cli.no.as_str());

    info!("Starting questionnaire with date pattern {}", pattern.as_strftime());
    banner();

    let mut terminal = Terminal::stdio();

    let name = terminal
        .read_string_required("What is your name", Some("name"))
        .context("Reading name")?;
    let nickname = terminal
        .read_string("Nickname (leave blank for none)")
        .context("Reading nickname")?;
    let grade = terminal
        .read_character("Grade this tool (A-F)", Some("ABCDEF"))
        .context("Reading grade")?;
    let initial = terminal
        .read_character("Any single character", None)
        .context("Reading character")?;
    let rating = terminal
        .read_int::<i32>(&format!("Rating ({}-{})", cli.min, cli.max), cli.min..=cli.max)
        .context("Reading rating")?;
    let lucky = terminal
        .read_int::<i64>("Lucky number", ..)
        .context("Reading lucky number")?;
    let likes_rust = terminal
        .read_boolean("Do you like Rust? (true/false)", &BoolLiterals::default())
        .context("Reading Rust preference")?;
    let subscribe = terminal
        .read_boolean(&format!("Subscribe? ({}/{})", cli.yes, cli.no), &literals)
        .context("Reading subscription")?;
    let birthday = terminal
        .read_date("Birthday", &pattern, &cli.date_display)
        .context("Reading birthday")?;

    println!("------------------------------------------------------------");
    println!("Name:       {}", name);
    if !nickname.is_empty() {
        println!("Nickname:   {}", nickname);
    }
    println!("Grade:      {}", grade);
    println!("Character:  {}", initial);
    println!("Rating:     {}", rating);
    println!("Lucky:      {}", lucky);
    println!("Likes Rust: {}", likes_rust);
    println!("Subscribed: {}", subscribe);
    println!("Birthday:   {}", birthday.format("%A %-d %B %Y"));

    info!("Questionnaire complete");
    Ok(())
}
