use std::fmt::Write;

use midtrade_models::{ConflictReport, LinearFit, LogisticFit, ModelOutcome, SideReport};

/// Print-ready text for a report, or pretty JSON when `json` is set.
pub fn format_output(report: &ConflictReport, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string_pretty(report)
    } else {
        Ok(format_report(report))
    }
}

pub fn format_report(report: &ConflictReport) -> String {
    let mut out = format!(
        "Conflict {} (began {}, trade year {})\n",
        report.conflict_id, report.start_year, report.trade_year
    );
    for side in &report.sides {
        out.push('\n');
        push_side(&mut out, side);
    }
    out
}

fn push_side(out: &mut String, side: &SideReport) {
    let _ = writeln!(out, "Side {}", side.side);
    let _ = writeln!(out, "  instigators:    {}", list(&side.instigators));
    let _ = writeln!(out, "  combatants:     {}", list(&side.combatants));
    let _ = writeln!(out, "  trade partners: {}", side.trade_partners.len());
    let _ = writeln!(out, "  linear:         {}", linear(&side.models.linear));
    let _ = writeln!(out, "  logistic:       {}", logistic(&side.models.logistic));
    for path in &side.rendered {
        let _ = writeln!(out, "  wrote {}", path.display());
    }
}

fn list(countries: &[String]) -> String {
    if countries.is_empty() {
        "(none)".to_string()
    } else {
        countries.join(", ")
    }
}

fn linear(outcome: &ModelOutcome<LinearFit>) -> String {
    match outcome {
        ModelOutcome::Fitted { fit } => format!(
            "joined = {:.4} * share {} {:.4}",
            fit.slope,
            sign(fit.intercept),
            fit.intercept.abs()
        ),
        ModelOutcome::Unavailable { reason } => format!("model not available: {reason}"),
    }
}

fn logistic(outcome: &ModelOutcome<LogisticFit>) -> String {
    match outcome {
        ModelOutcome::Fitted { fit } => format!(
            "P(joined) = 1 / (1 + exp(-({:.4} * share {} {:.4})))",
            fit.coefficient,
            sign(fit.intercept),
            fit.intercept.abs()
        ),
        ModelOutcome::Unavailable { reason } => format!("model not available: {reason}"),
    }
}

fn sign(value: f64) -> char {
    if value < 0.0 {
        '-'
    } else {
        '+'
    }
}
