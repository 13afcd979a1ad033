use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use robdd_equiv::checker::EquivalenceChecker;
use robdd_equiv::dot::DotConfig;
use robdd_equiv::parser::ParseOptions;
use robdd_equiv::robdd::{Robdd, RobddConfig};

#[derive(Parser)]
#[command(author, version, about = "Check two boolean expressions for equivalence using ROBDDs")]
struct Cli {
    /// First expression, e.g. "A & !B"
    lhs: String,

    /// Second expression, e.g. "X & !Y"
    rhs: String,

    /// Write the diagrams as fun_robdd_1.dot and fun_robdd_2.dot into this directory
    #[arg(long, value_name = "DIR")]
    dot_dir: Option<PathBuf>,

    /// Read `&~` and `|~` as AND NOT / OR NOT instead of NAND / NOR
    #[arg(long)]
    no_nand_sugar: bool,

    /// Upper bound on the number of diagram nodes
    #[arg(long, value_name = "INT")]
    max_nodes: Option<usize>,

    /// Logging level
    #[arg(long, value_name = "LEVEL", value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Copy, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for simplelog::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => simplelog::LevelFilter::Off,
            LogLevel::Error => simplelog::LevelFilter::Error,
            LogLevel::Warn => simplelog::LevelFilter::Warn,
            LogLevel::Info => simplelog::LevelFilter::Info,
            LogLevel::Debug => simplelog::LevelFilter::Debug,
            LogLevel::Trace => simplelog::LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        cli.log_level.into(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut config = RobddConfig::default();
    if let Some(limit) = cli.max_nodes {
        if limit < 2 {
            return Err(color_eyre::eyre::eyre!("--max-nodes must be at least 2, got {}", limit));
        }
        config = config.with_max_nodes(limit);
    }
    let options = ParseOptions::default().with_nand_nor_sugar(!cli.no_nand_sugar);

    let checker = EquivalenceChecker::with_robdd(Robdd::with_config(config), options);
    let report = checker.check(&cli.lhs, &cli.rhs)?;

    println!();
    print!("{}", report);
    println!();

    if let Some(dir) = &cli.dot_dir {
        fs::create_dir_all(dir).wrap_err_with(|| format!("Could not create {:?}", dir))?;
        let bdd = checker.robdd();
        for (i, side) in [&report.lhs, &report.rhs].into_iter().enumerate() {
            let path = dir.join(format!("fun_robdd_{}.dot", i + 1));
            let dot = bdd.to_dot_with_config(side.root, &DotConfig::default())?;
            fs::write(&path, dot).wrap_err_with(|| format!("Could not write {:?}", path))?;
            log::info!("Wrote {:?} ({} nodes)", path, side.size);
        }
    }

    Ok(())
}
