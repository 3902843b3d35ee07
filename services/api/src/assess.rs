use crate::infra::parse_timestamp;
use chrono::{DateTime, Utc};
use clap::Args;
use fraud_scoring::config::AppConfig;
use fraud_scoring::error::AppError;
use fraud_scoring::scoring::{
    AssessmentInputs, AssessmentRequest, AssessmentView, FraudAssessment, FraudAssessmentService,
    HistoryImporter, TransactionSubmission,
};
use fraud_scoring::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Transaction amount
    #[arg(long)]
    pub(crate) amount: f64,
    /// Location code of the transaction (e.g. SP)
    #[arg(long)]
    pub(crate) location: String,
    /// Transaction time as RFC 3339 (defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) timestamp: Option<DateTime<Utc>>,
    /// CSV file of previous transactions (amount,timestamp,location)
    #[arg(long)]
    pub(crate) history: Option<PathBuf>,
    /// Comma separated list of blacklisted location codes
    #[arg(long, value_delimiter = ',')]
    pub(crate) blacklist: Vec<String>,
    /// Print the assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let json = args.json;
    let assessment = assess_transaction(args, &config)?;

    if json {
        let view = AssessmentView::from(&assessment);
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_assessment(&assessment));
    }

    Ok(())
}

fn assess_transaction(args: AssessArgs, config: &AppConfig) -> Result<FraudAssessment, AppError> {
    let service = FraudAssessmentService::with_guard(config.guard(), config.rules.clone());

    let AssessArgs {
        amount,
        location,
        timestamp,
        history,
        blacklist,
        ..
    } = args;

    let history = match history {
        Some(path) => HistoryImporter::from_path_limited(path, service.guard().max_history())?,
        None => Vec::new(),
    };

    let request = AssessmentRequest {
        transaction: TransactionSubmission {
            amount,
            timestamp: Some(timestamp.unwrap_or_else(Utc::now)),
            location,
        },
        previous_transactions: Vec::new(),
        blacklisted_locations: blacklist,
    };

    let inputs = AssessmentInputs {
        previous_transactions: history,
        ..service.guard().inputs_from_request(request)?
    };

    Ok(service.assess_inputs(&inputs))
}

fn render_assessment(assessment: &FraudAssessment) -> String {
    let mut out = String::new();
    out.push_str("Fraud assessment\n");
    out.push_str(&format!("Risk score: {}\n", assessment.risk_score()));
    out.push_str(&format!(
        "Blocked: {} | Fraudulent: {} | Verification required: {}\n",
        yes_no(assessment.is_blocked()),
        yes_no(assessment.is_fraudulent()),
        yes_no(assessment.verification_required())
    ));
    out.push_str(&format!(
        "Recommended action: {}\n",
        assessment.recommended_action().label()
    ));

    if assessment.triggered().is_empty() {
        out.push_str("\nTriggered heuristics: none\n");
    } else {
        out.push_str("\nTriggered heuristics\n");
        for hit in assessment.triggered() {
            out.push_str(&format!(
                "- {} (+{}): {}\n",
                hit.heuristic.label(),
                hit.points,
                hit.notes
            ));
        }
    }

    out
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
