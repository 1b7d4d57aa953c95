use serde::{Deserialize, Serialize};

pub const MIN_TARGET: f64 = 1.0;
pub const MAX_TARGET: f64 = 100.0;

/// Targets within this distance of 100 are treated as "perfect attendance".
pub const FULL_TARGET_TOLERANCE: f64 = 1e-7;

/// Largest class count accepted as input; keeps `100 * count` exact in f64.
pub const MAX_CLASSES: i64 = 1_000_000_000_000;

/// Counts past 2^53 no longer have an exact f64 representation.
const MAX_EXACT_COUNT: i64 = 1 << 53;

pub const NEGATIVE_ATTENDED: &str = "Attended classes cannot be negative.";
pub const TOTAL_TOO_SMALL: &str = "Total classes must be at least 1.";
pub const ATTENDED_EXCEEDS_TOTAL: &str = "Attended classes cannot exceed total classes conducted.";
pub const TARGET_OUT_OF_RANGE: &str = "Target percentage must be between 1 and 100.";
pub const TOTAL_TOO_LARGE: &str = "Total classes cannot exceed 1000000000000.";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceInput {
    pub attended: i64,
    pub total: i64,
    pub target: f64,
}

impl AttendanceInput {
    pub fn new(attended: i64, total: i64, target: f64) -> Self {
        Self {
            attended,
            total,
            target,
        }
    }

    pub fn validate(&self) -> Vec<String> {
        validate(self.attended, self.total, self.target)
    }
}

/// Answer to "how many more classes must I attend?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "classes", rename_all = "snake_case")]
pub enum ClassesNeeded {
    Classes(u64),
    /// No number of extra classes gets there (100% after a miss).
    Unreachable,
    /// The closed form has no answer for these inputs.
    Undefined,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Standing {
    Unreachable,
    AboveTarget { missable: u64 },
    BelowTarget { needed: u64 },
    Undetermined,
}

impl Standing {
    pub fn label(&self) -> &'static str {
        match self {
            Standing::Unreachable => "unreachable",
            Standing::AboveTarget { .. } => "above_target",
            Standing::BelowTarget { .. } => "below_target",
            Standing::Undetermined => "undetermined",
        }
    }
}

/// Attendance after `additional` more classes, all of them attended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub additional: u64,
    pub attended: i64,
    pub total: i64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttendanceOutcome {
    pub current_percent: f64,
    pub target: f64,
    pub standing: Standing,
    pub projection: Option<Projection>,
}

/// Checks every rule and reports all violations in a fixed order.
pub fn validate(attended: i64, total: i64, target: f64) -> Vec<String> {
    let mut errors = Vec::new();

    if attended < 0 {
        errors.push(NEGATIVE_ATTENDED.to_string());
    }
    if total < 1 {
        errors.push(TOTAL_TOO_SMALL.to_string());
    }
    if attended > total {
        errors.push(ATTENDED_EXCEEDS_TOTAL.to_string());
    }
    // NaN falls outside the range as well
    if !(MIN_TARGET..=MAX_TARGET).contains(&target) {
        errors.push(TARGET_OUT_OF_RANGE.to_string());
    }
    if total > MAX_CLASSES {
        errors.push(TOTAL_TOO_LARGE.to_string());
    }

    errors
}

pub fn is_full_target(target: f64) -> bool {
    (target - MAX_TARGET).abs() <= FULL_TARGET_TOLERANCE
}

pub fn current_percent(attended: i64, total: i64) -> f64 {
    percent(attended as f64, total as f64)
}

fn percent(attended: f64, total: f64) -> f64 {
    100.0 * attended / total
}

fn reaches_after_attending(attended: i64, total: i64, extra: u64, target: f64) -> bool {
    percent(attended as f64 + extra as f64, total as f64 + extra as f64) >= target
}

fn counts_in_range(attended: i64, total: i64) -> bool {
    attended >= 0 && total >= 1 && attended <= MAX_EXACT_COUNT && total <= MAX_EXACT_COUNT
}

fn holds_after_missing(attended: i64, total: i64, missed: u64, target: f64) -> bool {
    percent(attended as f64, total as f64 + missed as f64) >= target
}

/// Smallest number of extra attended classes that lifts the percentage to `target`.
///
/// Counts outside `0..=2^53` and answers past 2^53 are `Undefined`.
pub fn additional_classes_needed(attended: i64, total: i64, target: f64) -> ClassesNeeded {
    if !target.is_finite() || !counts_in_range(attended, total) {
        return ClassesNeeded::Undefined;
    }
    if is_full_target(target) {
        return if attended == total {
            ClassesNeeded::Classes(0)
        } else {
            ClassesNeeded::Unreachable
        };
    }
    if target > MAX_TARGET {
        return ClassesNeeded::Unreachable;
    }

    let denominator = MAX_TARGET - target;
    if denominator == 0.0 {
        return ClassesNeeded::Undefined;
    }

    let x = (target * total as f64 - 100.0 * attended as f64) / denominator;
    if x.is_nan() || x > MAX_EXACT_COUNT as f64 {
        return ClassesNeeded::Undefined;
    }
    let mut needed = if x > 0.0 { x.ceil() as u64 } else { 0 };

    // Snap the closed form onto the exact inequality; rounding can leave it one off.
    while needed > 0 && reaches_after_attending(attended, total, needed - 1, target) {
        needed -= 1;
    }
    while !reaches_after_attending(attended, total, needed, target) {
        needed += 1;
        if needed > MAX_EXACT_COUNT as u64 {
            return ClassesNeeded::Undefined;
        }
    }

    ClassesNeeded::Classes(needed)
}

/// Largest number of extra missed classes that keeps the percentage at or above `target`.
///
/// `None` when there is no finite answer that fits in 2^53: a non-positive target,
/// counts outside `0..=2^53`, or a result past that bound.
pub fn classes_can_be_missed(attended: i64, total: i64, target: f64) -> Option<u64> {
    if target.is_nan() || target <= 0.0 || !counts_in_range(attended, total) {
        return None;
    }

    let missable = (100.0 * attended as f64 - target * total as f64) / target;
    if missable <= 0.0 {
        return Some(0);
    }
    if missable > MAX_EXACT_COUNT as f64 {
        return None;
    }

    let mut missed = missable.floor() as u64;
    while missed > 0 && !holds_after_missing(attended, total, missed, target) {
        missed -= 1;
    }
    while holds_after_missing(attended, total, missed + 1, target) {
        missed += 1;
        if missed > MAX_EXACT_COUNT as u64 {
            return None;
        }
    }

    Some(missed)
}

fn project(attended: i64, total: i64, additional: u64) -> Option<Projection> {
    let extra = i64::try_from(additional).ok()?;
    let attended = attended.checked_add(extra)?;
    let total = total.checked_add(extra)?;
    Some(Projection {
        additional,
        attended,
        total,
        percent: current_percent(attended, total),
    })
}

/// Validates the input and, if it is acceptable, works out where the student stands.
pub fn evaluate(input: &AttendanceInput) -> Result<AttendanceOutcome, Vec<String>> {
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(errors);
    }

    let AttendanceInput {
        attended,
        total,
        target,
    } = *input;
    let current = current_percent(attended, total);

    if is_full_target(target) && attended < total {
        return Ok(AttendanceOutcome {
            current_percent: current,
            target,
            standing: Standing::Unreachable,
            projection: None,
        });
    }

    let standing = if current >= target {
        match classes_can_be_missed(attended, total, target) {
            Some(missable) => Standing::AboveTarget { missable },
            None => Standing::Undetermined,
        }
    } else {
        match additional_classes_needed(attended, total, target) {
            ClassesNeeded::Classes(needed) => Standing::BelowTarget { needed },
            ClassesNeeded::Unreachable | ClassesNeeded::Undefined => Standing::Undetermined,
        }
    };

    let additional = match standing {
        Standing::BelowTarget { needed } => needed,
        _ => 0,
    };
    let (standing, projection) = match project(attended, total, additional) {
        Some(projection) => (standing, projection),
        None => (
            Standing::Undetermined,
            Projection {
                additional: 0,
                attended,
                total,
                percent: current,
            },
        ),
    };

    Ok(AttendanceOutcome {
        current_percent: current,
        target,
        standing,
        projection: Some(projection),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGETS: [f64; 10] = [1.0, 12.5, 33.3, 50.0, 66.67, 75.0, 80.0, 90.5, 99.0, 99.9];

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_valid_input_has_no_errors() {
        assert!(validate(0, 1, 80.0).is_empty());
        assert!(validate(40, 40, 100.0).is_empty());
        assert!(validate(3, 10, 1.0).is_empty());
    }

    #[test]
    fn test_validation_reports_every_problem_in_order() {
        assert_eq!(
            validate(-1, 0, 150.0),
            vec![NEGATIVE_ATTENDED, TOTAL_TOO_SMALL, TARGET_OUT_OF_RANGE]
        );
        assert_eq!(
            validate(2, 0, 0.5),
            vec![TOTAL_TOO_SMALL, ATTENDED_EXCEEDS_TOTAL, TARGET_OUT_OF_RANGE]
        );
    }

    #[test]
    fn test_attended_above_total_is_rejected() {
        for total in 1..20 {
            for attended in (total + 1)..(total + 5) {
                let errors = validate(attended, total, 80.0);
                assert!(errors.contains(&ATTENDED_EXCEEDS_TOTAL.to_string()));
            }
        }
    }

    #[test]
    fn test_target_out_of_range_is_flagged_regardless_of_counts() {
        for target in [0.0, 0.99, 100.01, -5.0, 250.0, f64::NAN] {
            assert!(validate(10, 20, target).contains(&TARGET_OUT_OF_RANGE.to_string()));
            assert!(validate(-3, 0, target).contains(&TARGET_OUT_OF_RANGE.to_string()));
        }
    }

    #[test]
    fn test_below_target_scenario() {
        let outcome = evaluate(&AttendanceInput::new(30, 40, 80.0)).unwrap();
        assert!(approx(outcome.current_percent, 75.0));
        assert_eq!(outcome.standing, Standing::BelowTarget { needed: 10 });

        let projection = outcome.projection.unwrap();
        assert_eq!(projection.additional, 10);
        assert_eq!((projection.attended, projection.total), (40, 50));
        assert!(approx(projection.percent, 80.0));
    }

    #[test]
    fn test_above_target_scenario() {
        let outcome = evaluate(&AttendanceInput::new(38, 40, 75.0)).unwrap();
        assert!(approx(outcome.current_percent, 95.0));
        assert_eq!(outcome.standing, Standing::AboveTarget { missable: 10 });

        let projection = outcome.projection.unwrap();
        assert_eq!(projection.additional, 0);
        assert!(approx(projection.percent, 95.0));
    }

    #[test]
    fn test_full_target_after_a_miss_is_unreachable() {
        let outcome = evaluate(&AttendanceInput::new(5, 10, 100.0)).unwrap();
        assert_eq!(outcome.standing, Standing::Unreachable);
        assert!(outcome.projection.is_none());
        assert_eq!(
            additional_classes_needed(5, 10, 100.0),
            ClassesNeeded::Unreachable
        );
    }

    #[test]
    fn test_full_target_with_perfect_record() {
        assert_eq!(additional_classes_needed(12, 12, 100.0), ClassesNeeded::Classes(0));
        assert_eq!(
            additional_classes_needed(12, 12, 100.0 - 1e-9),
            ClassesNeeded::Classes(0)
        );

        let outcome = evaluate(&AttendanceInput::new(12, 12, 100.0)).unwrap();
        assert_eq!(outcome.standing, Standing::AboveTarget { missable: 0 });
    }

    #[test]
    fn test_first_class_missed() {
        let outcome = evaluate(&AttendanceInput::new(0, 1, 50.0)).unwrap();
        assert!(approx(outcome.current_percent, 0.0));
        assert_eq!(outcome.standing, Standing::BelowTarget { needed: 1 });
        assert_eq!(additional_classes_needed(0, 1, 50.0), ClassesNeeded::Classes(1));
    }

    #[test]
    fn test_invalid_input_is_not_evaluated() {
        let errors = evaluate(&AttendanceInput::new(9, 4, 80.0)).unwrap_err();
        assert_eq!(errors, vec![ATTENDED_EXCEEDS_TOTAL]);
    }

    #[test]
    fn test_minimum_target_boundary() {
        assert_eq!(classes_can_be_missed(1, 1, 1.0), Some(99));
        assert_eq!(additional_classes_needed(0, 5, 1.0), ClassesNeeded::Classes(1));

        let outcome = evaluate(&AttendanceInput::new(0, 5, 1.0)).unwrap();
        assert_eq!(outcome.standing, Standing::BelowTarget { needed: 1 });
    }

    #[test]
    fn test_degenerate_targets_never_loop() {
        assert_eq!(additional_classes_needed(3, 4, f64::NAN), ClassesNeeded::Undefined);
        assert_eq!(additional_classes_needed(3, 4, 120.0), ClassesNeeded::Unreachable);
        assert_eq!(classes_can_be_missed(3, 4, 0.0), None);
        assert_eq!(classes_can_be_missed(3, 4, f64::NAN), None);
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let huge: i64 = 1_000_000_000_000_000_000;
        assert!(validate(0, huge, 99.99999).contains(&TOTAL_TOO_LARGE.to_string()));
        assert_eq!(
            additional_classes_needed(0, huge, 99.99999),
            ClassesNeeded::Undefined
        );
        assert_eq!(classes_can_be_missed(huge, huge, 1.0), None);
        assert_eq!(
            additional_classes_needed(0, i64::MAX, 50.0),
            ClassesNeeded::Undefined
        );
        assert_eq!(classes_can_be_missed(i64::MAX, i64::MAX, 1.0), None);
        assert_eq!(classes_can_be_missed(5, 10, 1e-300), None);
    }

    #[test]
    fn test_total_ceiling() {
        assert!(validate(MAX_CLASSES, MAX_CLASSES, 80.0).is_empty());
        assert_eq!(
            validate(0, MAX_CLASSES + 1, 80.0),
            vec![TOTAL_TOO_LARGE]
        );
        let errors = evaluate(&AttendanceInput::new(0, i64::MAX, 80.0)).unwrap_err();
        assert_eq!(errors, vec![TOTAL_TOO_LARGE]);
    }

    #[test]
    fn test_largest_accepted_counts() {
        assert_eq!(
            classes_can_be_missed(MAX_CLASSES, MAX_CLASSES, 1.0),
            Some(99 * MAX_CLASSES as u64)
        );
        let outcome = evaluate(&AttendanceInput::new(MAX_CLASSES, MAX_CLASSES, 1.0)).unwrap();
        assert_eq!(
            outcome.standing,
            Standing::AboveTarget {
                missable: 99 * MAX_CLASSES as u64
            }
        );
    }

    #[test]
    fn test_answer_past_exact_range_is_undetermined() {
        let outcome = evaluate(&AttendanceInput::new(0, MAX_CLASSES, 99.99999)).unwrap();
        assert_eq!(outcome.standing, Standing::Undetermined);

        let projection = outcome.projection.unwrap();
        assert_eq!(projection.additional, 0);
        assert_eq!((projection.attended, projection.total), (0, MAX_CLASSES));
    }

    #[test]
    fn test_needed_is_zero_once_target_is_met() {
        for total in 1..=30 {
            for attended in 0..=total {
                for target in TARGETS {
                    if current_percent(attended, total) >= target {
                        assert_eq!(
                            additional_classes_needed(attended, total, target),
                            ClassesNeeded::Classes(0),
                            "{attended}/{total} @ {target}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_needed_is_minimal() {
        for total in 1..=30 {
            for attended in 0..=total {
                for target in TARGETS {
                    let ClassesNeeded::Classes(x) = additional_classes_needed(attended, total, target)
                    else {
                        panic!("{attended}/{total} @ {target} has no answer");
                    };
                    if x == 0 {
                        continue;
                    }
                    let a = attended as f64;
                    let t = total as f64;
                    let x = x as f64;
                    assert!(100.0 * (a + x) / (t + x) >= target);
                    assert!(100.0 * (a + x - 1.0) / (t + x - 1.0) < target);
                }
            }
        }
    }

    #[test]
    fn test_missable_is_maximal() {
        for total in 1..=30 {
            for attended in 0..=total {
                for target in TARGETS {
                    let m = classes_can_be_missed(attended, total, target).unwrap();
                    if m == 0 {
                        continue;
                    }
                    let a = attended as f64;
                    let t = total as f64;
                    let m = m as f64;
                    assert!(100.0 * a / (t + m) >= target);
                    assert!(100.0 * a / (t + m + 1.0) < target);
                }
            }
        }
    }

    #[test]
    fn test_projection_reaches_target_when_below() {
        for total in 1..=25 {
            for attended in 0..=total {
                for target in TARGETS {
                    let outcome = evaluate(&AttendanceInput::new(attended, total, target)).unwrap();
                    if let Standing::BelowTarget { .. } = outcome.standing {
                        assert!(outcome.projection.unwrap().percent >= target);
                    }
                }
            }
        }
    }
}
