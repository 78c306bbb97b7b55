use crate::infra::{seed_demo_directory, ConfiguredLeadPublisher, InMemoryStore, DEMO_ORG_CODE};
use clap::{Args, ValueEnum};
use kai_profile::advisor::{AdvisorService, RoadmapContext, RoadmapSource};
use kai_profile::assessment::catalog::ids;
use kai_profile::assessment::{
    AnswerMap, AnswerValue, ArchetypeRegistry, AssessmentMode, AssessmentPlan, AssessmentService,
    AssessmentSession, CompleteRequest, ProfileReport, Question, QuestionCatalog, QuestionType,
    ScoringEngine,
};
use kai_profile::directory::{DirectoryService, OrganizationDashboard};
use kai_profile::error::AppError;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON object mapping question ids to answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Only score the questions of the quick scan
    #[arg(long)]
    pub(crate) quick: bool,
    /// Load the question catalog from a JSON file instead of the built-in one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Scripted respondent to walk through the assessment
    #[arg(long, value_enum, default_value_t = Persona::Visionary)]
    pub(crate) persona: Persona,
    /// Use the quick scan instead of the full assessment
    #[arg(long)]
    pub(crate) quick: bool,
    /// Skip the organization dashboard at the end of the demo
    #[arg(long)]
    pub(crate) skip_dashboard: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Persona {
    /// Innovative and fluent with AI tools
    #[default]
    Visionary,
    /// Process-minded and fluent with AI tools
    Guardian,
    /// Anxious and inexperienced with AI tools
    Skeptic,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        quick,
        catalog,
        json,
    } = args;

    let catalog = load_catalog(catalog.as_deref())?;
    let mut answers: AnswerMap = serde_json::from_reader(File::open(answers)?)?;
    if quick {
        answers = quick_scan_answers(&catalog, &answers);
    }

    let report = ProfileReport::from_answers(
        &catalog,
        &ScoringEngine::standard(),
        &ArchetypeRegistry::standard(),
        &answers,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_profile(&report);
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        persona,
        quick,
        skip_dashboard,
    } = args;

    let catalog = Arc::new(QuestionCatalog::standard());
    let registry = Arc::new(ArchetypeRegistry::standard());
    let store = Arc::new(InMemoryStore::default());
    let directory = DirectoryService::new(store.clone());
    seed_demo_directory(&directory)?;

    let assessment = AssessmentService::new(
        catalog.clone(),
        registry.clone(),
        store.clone(),
        Arc::new(ConfiguredLeadPublisher::Disabled),
    );
    let advisor = AdvisorService::offline(registry);

    let mode = if quick {
        AssessmentMode::Quick
    } else {
        AssessmentMode::Full
    };
    let mut session = AssessmentSession::new(&catalog, AssessmentPlan { mode, limit: None });

    println!("KAI assessment demo ({persona:?} persona)");
    while let Some(question) = session.current_question() {
        let answer = scripted_answer(persona, question);
        println!(
            "[{:>2}/{}] {} -> {}",
            session.step() + 1,
            session.total(),
            question.text,
            describe_answer(question, &answer)
        );
        if let Err(err) = session.answer(answer) {
            println!("  Answer rejected: {err}");
            return Ok(());
        }
        if let Err(err) = session.advance(store.as_ref()) {
            println!("  Step rejected: {err}");
            return Ok(());
        }
    }

    let outcome = match assessment.complete(CompleteRequest {
        answers: session.into_answers(),
        progress_key: None,
    }) {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("  Completion failed: {err}");
            return Ok(());
        }
    };

    println!();
    render_profile(&outcome.report);
    if let Some(employee) = &outcome.employee {
        println!(
            "- Result stored as {} under organization {}",
            employee.id.0, employee.org_code
        );
    }

    let context = RoadmapContext::from_report(&outcome.report);
    let cancel = advisor.shutdown_token().child_token();
    match advisor.generate_roadmap(&context, &cancel).await {
        Ok(roadmap) => {
            let source = match roadmap.source {
                RoadmapSource::Generated => "generated",
                RoadmapSource::Fallback => "fallback",
            };
            println!("\n30/60/90-day roadmap ({source})");
            for (label, phase) in roadmap.roadmap.phases() {
                println!("- {label}: {}", phase.focus);
                for action in &phase.actions {
                    println!("    * {action}");
                }
            }
        }
        Err(err) => println!("\nRoadmap unavailable: {err}"),
    }

    if skip_dashboard {
        return Ok(());
    }

    let dashboard = directory.dashboard(DEMO_ORG_CODE)?;
    render_dashboard(&dashboard);
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<QuestionCatalog, AppError> {
    match path {
        Some(path) => Ok(QuestionCatalog::from_json_reader(File::open(path)?)?),
        None => Ok(QuestionCatalog::standard()),
    }
}

fn quick_scan_answers(catalog: &QuestionCatalog, answers: &AnswerMap) -> AnswerMap {
    catalog
        .active_questions(AssessmentMode::Quick, None)
        .into_iter()
        .filter_map(|question| {
            answers
                .get(&question.id)
                .map(|value| (question.id.clone(), value.clone()))
        })
        .collect()
}

fn scripted_answer(persona: Persona, question: &Question) -> AnswerValue {
    let fluent = persona != Persona::Skeptic;
    match question.question_type {
        QuestionType::Text => match question.id.as_str() {
            ids::NAME => "Demo Respondent".into(),
            ids::EMAIL => "respondent@demo.com".into(),
            ids::ORG_CODE => DEMO_ORG_CODE.into(),
            _ => "Marketing".into(),
        },
        QuestionType::Scenario => {
            let option = if persona == Persona::Visionary {
                question.options.last()
            } else {
                question.options.first()
            };
            option
                .map(|option| option.value.clone())
                .unwrap_or(AnswerValue::Number(0.0))
        }
        QuestionType::Select => {
            let option = if fluent || question.options.iter().all(|o| o.value.as_number().is_none()) {
                question.options.last()
            } else {
                question.options.first()
            };
            option
                .map(|option| option.value.clone())
                .unwrap_or(AnswerValue::Number(0.0))
        }
        QuestionType::Scale => match question.id.as_str() {
            ids::ANXIETY | ids::PRESSURE => AnswerValue::Number(if fluent { 1.0 } else { 5.0 }),
            _ => AnswerValue::Number(if fluent { 5.0 } else { 2.0 }),
        },
        QuestionType::Slider => AnswerValue::Number(50.0),
    }
}

fn describe_answer(question: &Question, answer: &AnswerValue) -> String {
    question
        .options
        .iter()
        .find(|option| &option.value == answer)
        .map(|option| option.label.clone())
        .unwrap_or_else(|| match answer {
            AnswerValue::Number(value) => format!("{value}"),
            AnswerValue::Text(text) => text.clone(),
        })
}

pub(crate) fn render_profile(report: &ProfileReport) {
    let scores = &report.scores;
    println!(
        "Profile for {} ({}, {})",
        report.context.display_name(),
        report.context.role,
        report.context.department
    );
    println!("- Archetype: {}", report.archetype.name);
    println!("  {}", report.archetype.description);
    println!(
        "- Style {:+.1} ({}) | readiness {:.0}% | automation exposure {}% | openness {:.0}%",
        scores.style_score,
        report.style_label,
        scores.readiness_score,
        scores.exposure_score,
        scores.sentiment_score
    );
    println!(
        "- Transformation difficulty {}/10 | risk: {}",
        report.archetype.transformation_difficulty, report.archetype.risk
    );
    println!("Radar:");
    for axis in &report.radar {
        println!("  - {}: {:.0}/{:.0}", axis.axis, axis.value, axis.full_mark);
    }
}

fn render_dashboard(dashboard: &OrganizationDashboard) {
    println!("\nOrganization dashboard {}", dashboard.org_code);
    println!(
        "- {} participants | avg style {:+.1} | avg readiness {:.0}% | avg exposure {:.0}%",
        dashboard.participants,
        dashboard.average_style,
        dashboard.average_readiness,
        dashboard.average_exposure
    );
    println!(
        "- {}% high risk | {}% pilot ready",
        dashboard.high_risk_percent, dashboard.pilot_ready_percent
    );
    println!("Archetypes:");
    for share in &dashboard.archetype_distribution {
        println!("  - {}: {}", share.archetype, share.count);
    }
}
