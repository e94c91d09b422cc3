//! jackson-schedule CLI: load an instance, schedule it, print the result.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jackson_schedule::dispatching::{rules, RuleEngine, TieBreaker};
use jackson_schedule::instance::{self, RandomInstance};
use jackson_schedule::models::{JobCollection, Time};
use jackson_schedule::report::{render_jobs, render_kpi};
use jackson_schedule::scheduler::{max_delivery_completion, JacksonScheduler, ScheduleKpi};

#[derive(Parser, Debug)]
#[command(name = "jackson-schedule")]
#[command(about = "Single-machine scheduling with release and delivery times", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: Source,

    /// Seed for the random generator
    #[arg(long, env = "JACKSON_SEED", default_value_t = 42)]
    seed: u64,

    /// Largest release time of random jobs
    #[arg(long, default_value_t = 20)]
    max_release: Time,

    /// Largest processing time of random jobs
    #[arg(long, default_value_t = 10)]
    max_processing: Time,

    /// Largest delivery time of random jobs
    #[arg(long, default_value_t = 20)]
    max_delivery: Time,

    /// Dispatching rule applied to the released jobs
    #[arg(long, value_enum, default_value_t = Rule::Ldt)]
    rule: Rule,

    /// How equally ranked jobs are separated
    #[arg(long, value_enum, default_value_t = TieBreak::First)]
    tie_break: TieBreak,

    /// Sort the instance by delivery time before dispatching
    #[arg(long)]
    presort: bool,

    /// Print a JSON document instead of text
    #[arg(long)]
    json: bool,
}

/// Where the jobs come from. Defaults to the built-in sample.
#[derive(Args, Debug)]
#[group(multiple = false)]
struct Source {
    /// JSON instance file
    #[arg(long, value_name = "FILE")]
    instance: Option<PathBuf>,

    /// Generate a random instance with N jobs
    #[arg(long, value_name = "N")]
    random: Option<usize>,

    /// Type the instance in on the console
    #[arg(long)]
    interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Rule {
    /// Largest delivery time (Jackson)
    Ldt,
    /// Earliest release date
    Erd,
    /// Shortest processing time
    Spt,
    /// Longest processing time
    Lpt,
}

impl Rule {
    fn engine(self) -> RuleEngine {
        match self {
            Rule::Ldt => RuleEngine::jackson(),
            Rule::Erd => RuleEngine::new().with_rule(rules::Erd),
            Rule::Spt => RuleEngine::new().with_rule(rules::Spt),
            Rule::Lpt => RuleEngine::new().with_rule(rules::Lpt),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TieBreak {
    /// First job met in instance order
    First,
    /// Smallest job id
    Id,
}

impl From<TieBreak> for TieBreaker {
    fn from(tie_break: TieBreak) -> Self {
        match tie_break {
            TieBreak::First => TieBreaker::FirstEncountered,
            TieBreak::Id => TieBreaker::ById,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    instance: &'a JobCollection,
    schedule: &'a JobCollection,
    objective: Time,
    kpi: &'a ScheduleKpi,
}

fn load_instance(cli: &Cli) -> anyhow::Result<JobCollection> {
    if let Some(path) = &cli.source.instance {
        return instance::load_json(path)
            .with_context(|| format!("failed to read instance {}", path.display()));
    }
    if let Some(jobs) = cli.source.random {
        let mut rng = SmallRng::seed_from_u64(cli.seed);
        let generator = RandomInstance::new(jobs)
            .with_max_release(cli.max_release)
            .with_max_processing(cli.max_processing)
            .with_max_delivery(cli.max_delivery);
        return Ok(generator.generate(&mut rng));
    }
    if cli.source.interactive {
        let mut input = io::stdin().lock();
        let mut output = io::stdout();
        return instance::read_interactive(&mut input, &mut output)
            .context("failed to read instance from the console");
    }
    Ok(instance::sample_instance())
}

fn build_scheduler(cli: &Cli) -> JacksonScheduler {
    JacksonScheduler::new()
        .with_rule_engine(cli.rule.engine())
        .with_tie_breaker(cli.tie_break.into())
        .with_presort(cli.presort)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let jobs = load_instance(cli)?;
    info!(jobs = jobs.len(), rule = ?cli.rule, "instance loaded");

    let schedule = build_scheduler(cli)
        .schedule(jobs.clone())
        .context("scheduling failed")?;
    let objective = max_delivery_completion(&schedule)?;
    let kpi = ScheduleKpi::calculate(&schedule)?;
    info!(objective, makespan = kpi.makespan, "schedule evaluated");

    if cli.json {
        let report = Report {
            instance: &jobs,
            schedule: &schedule,
            objective,
            kpi: &kpi,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_jobs("Instance", &jobs));
        println!("{}", render_jobs("Schedule", &schedule));
        print!("{}", render_kpi(&kpi));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_use_sample() {
        let cli = Cli::try_parse_from(["jackson-schedule"]).unwrap();
        assert_eq!(cli.rule, Rule::Ldt);
        assert_eq!(cli.tie_break, TieBreak::First);
        assert!(!cli.presort);

        let jobs = load_instance(&cli).unwrap();
        assert_eq!(jobs, instance::sample_instance());
    }

    #[test]
    fn test_random_source() {
        let cli = Cli::try_parse_from([
            "jackson-schedule",
            "--random",
            "12",
            "--seed",
            "5",
            "--max-processing",
            "3",
        ])
        .unwrap();
        let jobs = load_instance(&cli).unwrap();
        assert_eq!(jobs.len(), 12);
        assert!(jobs.iter().all(|j| (1..=3).contains(&j.processing())));
    }

    #[test]
    fn test_sources_are_exclusive() {
        let result = Cli::try_parse_from([
            "jackson-schedule",
            "--random",
            "3",
            "--instance",
            "jobs.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rule_and_tie_break_flags() {
        let cli = Cli::try_parse_from([
            "jackson-schedule",
            "--rule",
            "erd",
            "--tie-break",
            "id",
            "--presort",
        ])
        .unwrap();
        let scheduler = build_scheduler(&cli);
        assert_eq!(scheduler.rule_engine().rule_names(), vec!["ERD"]);
        assert_eq!(scheduler.rule_engine().final_tie_breaker(), TieBreaker::ById);

        let schedule = scheduler.schedule(instance::sample_instance()).unwrap();
        assert_eq!(max_delivery_completion(&schedule).unwrap(), 40);
    }

    #[test]
    fn test_missing_instance_file() {
        let cli = Cli::try_parse_from([
            "jackson-schedule",
            "--instance",
            "definitely/not/here.json",
        ])
        .unwrap();
        let err = load_instance(&cli).unwrap_err();
        assert!(err.to_string().contains("failed to read instance"));
    }
}
