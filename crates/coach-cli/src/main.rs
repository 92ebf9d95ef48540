//! Command-line interface for coach-rs

use anyhow::Context;
use clap::{Parser, ValueEnum};
use coach_core::{BusinessContext, BusinessStage, CoachingRequest, CoachingResponse, SessionType};
use coach_engine::{CoachConfig, Conductor};
use coach_utils::{format_currency, format_percent};
use comfy_table::{Table, presets::UTF8_FULL};
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StageArg {
    Startup,
    Growth,
    Scale,
    Mature,
}

impl From<StageArg> for BusinessStage {
    fn from(stage: StageArg) -> Self {
        match stage {
            StageArg::Startup => Self::Startup,
            StageArg::Growth => Self::Growth,
            StageArg::Scale => Self::Scale,
            StageArg::Mature => Self::Mature,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SessionArg {
    Diagnostic,
    Strategic,
    Implementation,
}

impl From<SessionArg> for SessionType {
    fn from(session: SessionArg) -> Self {
        match session {
            SessionArg::Diagnostic => Self::Diagnostic,
            SessionArg::Strategic => Self::Strategic,
            SessionArg::Implementation => Self::Implementation,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "coach-cli")]
#[command(about = "Business coaching analysis from the command line", long_about = None)]
struct Args {
    /// The coaching question to analyze
    query: String,

    /// Customer acquisition cost in dollars
    #[arg(long)]
    cac: Option<f64>,

    /// Customer lifetime value in dollars
    #[arg(long)]
    ltv: Option<f64>,

    /// Annual revenue in dollars
    #[arg(long)]
    revenue: Option<f64>,

    /// Active customer count
    #[arg(long)]
    customers: Option<u64>,

    /// Gross margin percentage, 0-100
    #[arg(long)]
    margin: Option<f64>,

    /// Industry label
    #[arg(long)]
    industry: Option<String>,

    /// Growth stage of the business
    #[arg(long, value_enum, default_value_t = StageArg::Startup)]
    stage: StageArg,

    /// Kind of coaching session
    #[arg(long, value_enum, default_value_t = SessionArg::Diagnostic)]
    session_type: SessionArg,

    /// Session identifier for conversation memory
    #[arg(long, default_value = "cli")]
    user: String,

    /// Show the routing decision before the analysis
    #[arg(long)]
    show_routing: bool,

    /// Emit the raw response as JSON instead of tables
    #[arg(long)]
    json: bool,
}

impl Args {
    fn business_context(&self) -> BusinessContext {
        BusinessContext {
            industry: self.industry.clone(),
            current_revenue: self.revenue,
            customer_count: self.customers,
            cac: self.cac,
            ltv: self.ltv,
            gross_margin: self.margin,
            business_stage: self.stage.into(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    coach_utils::init_tracing();

    let args = Args::parse();

    info!("Starting coach-cli");

    let config = CoachConfig::default().with_env_endpoint();
    let conductor = Conductor::new(config).context("failed to build conductor")?;

    let request = CoachingRequest::new(args.query.clone(), args.business_context())
        .with_session_type(args.session_type.into())
        .with_user_id(args.user.clone());

    if args.show_routing {
        let decision = conductor.route(&request);
        println!("Routing: {}", decision.execution_plan);
        println!("  {}", decision.reasoning);
        println!();
    }

    let response = conductor
        .coach(&request)
        .await
        .context("coaching analysis failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        render(&args, &response);
    }

    Ok(())
}

fn render(args: &Args, response: &CoachingResponse) {
    println!("{}", context_summary(args));
    println!();
    println!("{}", response.synthesis);
    println!();

    let mut analyses = Table::new();
    analyses.load_preset(UTF8_FULL);
    analyses.set_header(vec!["Analyzer", "Confidence", "Top finding"]);
    for analysis in &response.analysis {
        analyses.add_row(vec![
            analysis.agent.to_string(),
            format_percent(analysis.confidence),
            analysis.findings.first().cloned().unwrap_or_default(),
        ]);
    }
    println!("{analyses}");
    println!();

    if !response.action_items.is_empty() {
        let mut actions = Table::new();
        actions.load_preset(UTF8_FULL);
        actions.set_header(vec!["Priority", "Action", "Timeline"]);
        for item in &response.action_items {
            actions.add_row(vec![
                format!("{:?}", item.priority).to_lowercase(),
                item.title.clone(),
                item.timeline.clone(),
            ]);
        }
        println!("{actions}");
        println!();
    }

    println!("Next steps:");
    for (i, step) in response.next_steps.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }

    if !response.frameworks.is_empty() {
        println!();
        println!("Frameworks applied: {}", response.frameworks.join(", "));
    }
}

fn context_summary(args: &Args) -> String {
    let mut parts = Vec::new();
    if let Some(cac) = args.cac {
        parts.push(format!("CAC {}", format_currency(cac)));
    }
    if let Some(ltv) = args.ltv {
        parts.push(format!("LTV {}", format_currency(ltv)));
    }
    if let Some(revenue) = args.revenue {
        parts.push(format!("revenue {}/yr", format_currency(revenue)));
    }
    if let Some(customers) = args.customers {
        parts.push(format!("{customers} customers"));
    }
    if let Some(margin) = args.margin {
        parts.push(format!("{} margin", format_percent(margin)));
    }

    if parts.is_empty() {
        "Context: none provided (analyzers use stage fallbacks)".to_string()
    } else {
        format!("Context: {}", parts.join(", "))
    }
}
