use serde::{Deserialize, Serialize};

use crate::calculator::{AttendanceInput, AttendanceOutcome, Projection, Standing};
use crate::chart::BarChart;

pub const UNREACHABLE_WARNING: &str =
    "Target of 100% is only achievable if you have already attended all conducted classes.";
pub const UNREACHABLE_TIP: &str =
    "Tip: Speak to your instructor about make-up classes or policies for 100% requirements.";
pub const UNDETERMINED_WARNING: &str = "Cannot compute with the given inputs.";
pub const NO_MISSES_LEFT: &str =
    "You cannot afford to miss any more classes if you want to stay above the target.";

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct CalculateRequest {
    pub attended: i64,
    pub total: i64,
    pub target: f64,
}

impl From<CalculateRequest> for AttendanceInput {
    fn from(req: CalculateRequest) -> Self {
        AttendanceInput::new(req.attended, req.total, req.target)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Error,
    Warning,
    Success,
    Info,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Alert {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct CalculationReport {
    pub current_percent: f64,
    pub current_display: String,
    pub target: f64,
    pub status: &'static str,
    pub additional_needed: Option<u64>,
    pub missable: Option<u64>,
    pub progress: Option<f64>,
    pub projection: Option<Projection>,
    pub chart: Option<BarChart>,
    pub alerts: Vec<Alert>,
}

pub fn classes_word(count: u64) -> &'static str {
    if count == 1 {
        "class"
    } else {
        "classes"
    }
}

/// Fraction of the target already covered, for a progress bar.
pub fn progress_toward(current_percent: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 1.0;
    }
    (current_percent / target).clamp(0.0, 1.0)
}

impl CalculationReport {
    pub fn from_outcome(outcome: &AttendanceOutcome) -> Self {
        let current = outcome.current_percent;
        let target = outcome.target;
        let mut alerts = Vec::new();
        let mut additional_needed = None;
        let mut missable = None;

        match outcome.standing {
            Standing::Unreachable => {
                alerts.push(Alert::new(AlertLevel::Warning, UNREACHABLE_WARNING));
                alerts.push(Alert::new(AlertLevel::Info, UNREACHABLE_TIP));
            }
            Standing::AboveTarget { missable: can_miss } => {
                missable = Some(can_miss);
                alerts.push(Alert::new(
                    AlertLevel::Success,
                    format!(
                        "Great! Your current attendance ({:.2}%) meets or exceeds the target of {:.2}%.",
                        current, target
                    ),
                ));
                if can_miss > 0 {
                    alerts.push(Alert::new(
                        AlertLevel::Info,
                        format!(
                            "You can afford to miss {} more {} and still maintain at least {:.2}% attendance.",
                            can_miss,
                            classes_word(can_miss),
                            target
                        ),
                    ));
                } else {
                    alerts.push(Alert::new(AlertLevel::Info, NO_MISSES_LEFT));
                }
            }
            Standing::BelowTarget { needed } => {
                additional_needed = Some(needed);
                alerts.push(Alert::new(
                    AlertLevel::Warning,
                    format!(
                        "You need to attend at least {} more {} to reach {:.2}%.",
                        needed,
                        classes_word(needed),
                        target
                    ),
                ));
            }
            Standing::Undetermined => {
                alerts.push(Alert::new(AlertLevel::Warning, UNDETERMINED_WARNING));
            }
        }

        if let Some(projection) = &outcome.projection {
            alerts.push(Alert::new(
                AlertLevel::Info,
                format!(
                    "After attending {} more {}, your attendance would be {:.2}% (assuming no classes are missed).",
                    projection.additional,
                    classes_word(projection.additional),
                    projection.percent
                ),
            ));
        }

        let resolved = outcome.standing != Standing::Unreachable;

        CalculationReport {
            current_percent: current,
            current_display: format!("{:.2}%", current),
            target,
            status: outcome.standing.label(),
            additional_needed,
            missable,
            progress: resolved.then(|| progress_toward(current, target)),
            projection: outcome.projection,
            chart: resolved.then(|| BarChart::attendance_vs_target(current, target)),
            alerts,
        }
    }
}
