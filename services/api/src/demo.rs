use crate::infra::build_engine;
use chrono::{Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Args;
use repair_readiness::assessment::report::export_filename;
use repair_readiness::assessment::{
    AssessmentHistory, AssessmentReport, AssessmentSession, AssessmentSubmission, GuideLink,
    PriorityPolicy, ReadinessEngine,
};
use repair_readiness::config::AppConfig;
use repair_readiness::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct RubricArgs {
    /// JSON rubric to list instead of the configured one
    #[arg(long)]
    pub(crate) rubric: Option<PathBuf>,
    /// Include every level description under each question
    #[arg(long)]
    pub(crate) levels: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Submission JSON with `responses` and optional `comments` maps
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Write the CSV export to this file, or into this directory with the dated name
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Priority policy for recommendations (graduated or broad)
    #[arg(long, value_parser = crate::infra::parse_policy)]
    pub(crate) policy: Option<PriorityPolicy>,
    /// Date used for the export filename (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// JSON rubric to score against instead of the configured one
    #[arg(long)]
    pub(crate) rubric: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date of the follow-up snapshot (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Priority policy for recommendations (graduated or broad)
    #[arg(long, value_parser = crate::infra::parse_policy)]
    pub(crate) policy: Option<PriorityPolicy>,
    /// Also write the final CSV export to this file or directory
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

fn cli_engine(
    rubric: Option<PathBuf>,
    policy: Option<PriorityPolicy>,
) -> Result<(Arc<ReadinessEngine>, GuideLink), AppError> {
    let mut config = AppConfig::load()?;
    if rubric.is_some() {
        config.assessment.rubric_path = rubric;
    }
    let engine = build_engine(&config.assessment, policy)?;
    Ok((engine, config.assessment.guide_link()))
}

pub(crate) fn run_rubric(args: RubricArgs) -> Result<(), AppError> {
    let (engine, _) = cli_engine(args.rubric, None)?;
    let rubric = engine.rubric();

    println!("Readiness assessment questions");
    for factor in rubric.factors() {
        println!("\n{}", factor.title);
        if !factor.description.is_empty() {
            println!("  {}", factor.description);
        }
        for entry in rubric
            .all_subfactors()
            .into_iter()
            .filter(|entry| entry.factor_id() == factor.id)
        {
            println!(
                "  {:>2}. [{}] {}",
                entry.position + 1,
                entry.subfactor.id,
                entry.subfactor.question
            );
            if args.levels {
                for level in &entry.subfactor.levels {
                    println!(
                        "        {} {}: {}",
                        level.value, level.label, level.description
                    );
                }
            }
        }
    }

    Ok(())
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        input,
        csv,
        policy,
        today,
        rubric,
    } = args;

    let (engine, guide) = cli_engine(rubric, policy)?;
    let submission = read_submission(&input)?;
    let (responses, comments) = submission.into_sets(engine.rubric())?;

    let report = engine.report(&responses, &comments)?;
    println!("Assessment: {}", input.display());
    render_report(&report, engine.policy());
    render_guide(&guide);

    if let Some(target) = csv {
        let today = today.unwrap_or_else(|| Local::now().date_naive());
        let path = csv_target(&target, today);
        fs::write(&path, engine.export_csv(&responses, &comments)?)?;
        println!("\nCSV export written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, policy, csv } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let baseline_day = today - Duration::days(90);
    let (engine, guide) = cli_engine(None, policy)?;

    println!("Home repair readiness demo");
    let mut session = AssessmentSession::new(Arc::clone(&engine));
    let mut history = AssessmentHistory::new();

    for (subfactor_id, value) in BASELINE_ANSWERS {
        session.respond(subfactor_id, *value)?;
    }
    session.comment(
        "startup_funding",
        "Pending decision on the county block grant, expected next quarter",
    )?;
    history.save(&session, start_of_day(baseline_day));

    println!("\nBaseline ({baseline_day})");
    render_report(&session.report()?, engine.policy());

    for (subfactor_id, value) in FOLLOW_UP_ANSWERS {
        session.respond(subfactor_id, *value)?;
    }
    session.comment("startup_funding", "Block grant awarded; match still open")?;
    history.save(&session, start_of_day(today));

    println!("\nFollow-up ({today})");
    render_report(&session.report()?, engine.policy());

    println!("\nSaved snapshots");
    for entry in history.entries() {
        println!(
            "- #{} {} | {}/{} answered | overall {:.1} ({})",
            entry.sequence,
            entry.saved_at.format("%Y-%m-%d"),
            entry.responses.answered_count(),
            engine.rubric().total_subfactors(),
            entry.overall_score,
            entry.level.label()
        );
    }
    if let [first, .., last] = history.entries() {
        println!(
            "Change since baseline: {:+.1}",
            last.overall_score - first.overall_score
        );
    }

    render_guide(&guide);

    if let Some(target) = csv {
        let path = csv_target(&target, today);
        fs::write(&path, session.export_csv()?)?;
        println!("\nCSV export written to {}", path.display());
    }

    Ok(())
}

const BASELINE_ANSWERS: &[(&str, i64)] = &[
    ("need_assessment", 3),
    ("target_population", 2),
    ("community_support", 4),
    ("board_commitment", 2),
    ("staffing", 1),
    ("startup_funding", 0),
    ("construction_expertise", 1),
    ("insurance_liability", 0),
];

const FOLLOW_UP_ANSWERS: &[(&str, i64)] = &[
    ("board_commitment", 4),
    ("staffing", 3),
    ("systems", 3),
    ("startup_funding", 3),
    ("sustainable_funding", 1),
    ("financial_management", 4),
    ("contractor_network", 2),
    ("volunteer_capacity", 5),
    ("insurance_liability", 2),
    ("regulatory_compliance", 3),
    ("quality_assurance", 1),
];

fn read_submission(path: &Path) -> Result<AssessmentSubmission, AppError> {
    let raw = fs::read_to_string(path)?;
    let submission: AssessmentSubmission =
        serde_json::from_str(&raw).map_err(std::io::Error::from)?;
    Ok(submission)
}

/// Directories receive the dated export name; anything else is used as the file path.
fn csv_target(target: &Path, today: NaiveDate) -> PathBuf {
    if target.is_dir() {
        target.join(export_filename(today))
    } else {
        target.to_path_buf()
    }
}

fn start_of_day(date: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

fn render_report(report: &AssessmentReport, policy: PriorityPolicy) {
    let dashboard = &report.dashboard;
    println!(
        "Overall readiness: {:.1} / 5 ({})",
        dashboard.overall_score, dashboard.level_label
    );
    println!(
        "Completion: {}/{} questions ({:.0}%){}",
        dashboard.answered,
        dashboard.total,
        dashboard.completion_pct,
        if dashboard.complete { "" } else { " - partial" }
    );

    println!("Factors");
    for factor in &dashboard.factors {
        match (factor.score, factor.level_label) {
            (Some(score), Some(label)) => println!(
                "- {}: {:.1} ({}) | {}/{} answered",
                factor.title, score, label, factor.answered, factor.total
            ),
            _ => println!("- {}: not started", factor.title),
        }
    }

    let distribution: Vec<String> = dashboard
        .distribution
        .iter()
        .filter(|entry| entry.count > 0)
        .map(|entry| format!("{} {}", entry.label, entry.count))
        .collect();
    if !distribution.is_empty() {
        println!("Answer spread: {}", distribution.join(", "));
    }
    if let Some(strongest) = &dashboard.strongest_factor {
        println!("Strongest area: {strongest}");
    }
    if let Some(focus) = &dashboard.focus_factor {
        println!("Focus area: {focus}");
    }

    if report.action_plan.is_empty() {
        println!("Action plan: answer at least one question to see next steps");
        return;
    }
    println!("Action plan ({} priorities)", policy.label());
    for section in &report.action_plan.sections {
        if section.items.is_empty() {
            continue;
        }
        println!("  {} priority", section.priority_label);
        for item in &section.items {
            println!(
                "  - {} / {} [{} {}]: {}",
                item.factor, item.subfactor, item.score, item.level, item.action
            );
        }
    }
}

fn render_guide(guide: &GuideLink) {
    match guide {
        GuideLink::Url { url } => println!("\nImplementation guide: {url}"),
        GuideLink::Unavailable { message } => println!("\nImplementation guide: {message}"),
    }
}
