// 🏆 Points Rules - Loyalty score for a validated receipt
// Every rule reads the original receipt and contributes independently;
// the score is the plain sum with no cap.

use crate::amount::parse_amount;
use crate::receipt::Receipt;
use crate::validation::{parse_purchase_date, parse_purchase_time, ValidationError};
use chrono::{Datelike, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// ============================================================================
// SCORING ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Malformed amount in {field}: {value:?}")]
    MalformedAmount { field: String, value: String },

    #[error("Negative amount in {field}: {value:?}")]
    NegativeAmount { field: String, value: String },

    #[error("Amount in {field} is out of range")]
    AmountOutOfRange { field: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ScoringError {
    fn missing(field: impl Into<String>) -> Self {
        ScoringError::MissingField { field: field.into() }
    }
}

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsRule {
    RetailerAlphanumerics,
    RoundTotal,
    QuarterMultiple,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonWindow,
}

impl PointsRule {
    /// All rules in the order they are reported
    pub const ALL: [PointsRule; 7] = [
        PointsRule::RetailerAlphanumerics,
        PointsRule::RoundTotal,
        PointsRule::QuarterMultiple,
        PointsRule::ItemPairs,
        PointsRule::DescriptionLength,
        PointsRule::OddPurchaseDay,
        PointsRule::AfternoonWindow,
    ];

    /// Stable short code for output
    pub fn code(&self) -> &'static str {
        match self {
            PointsRule::RetailerAlphanumerics => "retailer_alphanumerics",
            PointsRule::RoundTotal => "round_total",
            PointsRule::QuarterMultiple => "quarter_multiple",
            PointsRule::ItemPairs => "item_pairs",
            PointsRule::DescriptionLength => "description_length",
            PointsRule::OddPurchaseDay => "odd_purchase_day",
            PointsRule::AfternoonWindow => "afternoon_window",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            PointsRule::RetailerAlphanumerics => "1 point per alphanumeric character in the retailer name",
            PointsRule::RoundTotal => "50 points if the total is a whole amount",
            PointsRule::QuarterMultiple => "25 points if the total is a multiple of 0.25",
            PointsRule::ItemPairs => "5 points for every two items",
            PointsRule::DescriptionLength => {
                "price * 0.2 rounded up for each item whose trimmed description length is a multiple of 3"
            }
            PointsRule::OddPurchaseDay => "6 points if the purchase day is odd",
            PointsRule::AfternoonWindow => "10 points if purchased after 14:00 and before 16:00",
        }
    }
}

// ============================================================================
// BREAKDOWN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub rule: PointsRule,
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub contributions: Vec<RuleContribution>,
    pub total: u64,
}

impl PointsBreakdown {
    /// Points earned by a single rule
    pub fn points_for(&self, rule: PointsRule) -> u64 {
        self.contributions
            .iter()
            .find(|c| c.rule == rule)
            .map_or(0, |c| c.points)
    }

    pub fn summary(&self) -> String {
        let earned = self.contributions.iter().filter(|c| c.points > 0).count();
        format!(
            "{} points ({} of {} rules earned points)",
            self.total,
            earned,
            self.contributions.len()
        )
    }
}

// ============================================================================
// RULES
// ============================================================================

const ROUND_TOTAL_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(char::is_ascii_alphanumeric).count() as u64
}

/// Whole by value, so "100" and "100.00" both count
fn round_total_points(total: Decimal) -> u64 {
    if total.fract().is_zero() {
        ROUND_TOTAL_POINTS
    } else {
        0
    }
}

fn quarter_multiple_points(total: Decimal) -> u64 {
    let quarter = Decimal::new(25, 2);
    if (total % quarter).is_zero() {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

fn item_pair_points(item_count: usize) -> u64 {
    (item_count / 2) as u64 * POINTS_PER_ITEM_PAIR
}

/// `ceil(price * 0.2)` on the integer mantissa.
///
/// price * 0.2 = mantissa / (5 * 10^scale); `Decimal` multiplication would
/// round once the product needs more than 28 fractional digits.
fn description_bonus(price: Decimal) -> Option<u64> {
    let mantissa = price.mantissa();
    if mantissa < 0 {
        return None;
    }

    let divisor = 10i128.checked_pow(price.scale())?.checked_mul(5)?;
    let bonus = mantissa / divisor + i128::from(mantissa % divisor != 0);

    u64::try_from(bonus).ok()
}

/// An empty trimmed description has length 0 and still qualifies.
fn description_points(receipt: &Receipt) -> Result<u64, ScoringError> {
    let items = receipt.items.as_deref().unwrap_or_default();
    let mut points: u64 = 0;

    for (index, item) in items.iter().enumerate() {
        let description = item
            .short_description
            .as_deref()
            .ok_or_else(|| ScoringError::missing(format!("items[{index}].shortDescription")))?;

        let price_field = format!("items[{index}].price");
        let raw_price = item
            .price
            .as_deref()
            .ok_or_else(|| ScoringError::missing(price_field.clone()))?;

        // Price is parsed for every item so malformed amounts are never skipped
        let price = parse_amount(&price_field, raw_price)?;

        if description.trim().chars().count() % 3 != 0 {
            continue;
        }

        let out_of_range = || ScoringError::AmountOutOfRange {
            field: price_field.clone(),
        };

        let bonus = description_bonus(price).ok_or_else(out_of_range)?;

        points = points.checked_add(bonus).ok_or_else(out_of_range)?;
    }

    Ok(points)
}

fn odd_day_points(day: u32) -> u64 {
    if day % 2 == 1 {
        ODD_DAY_POINTS
    } else {
        0
    }
}

/// Both ends excluded: 14:00 and 16:00 earn nothing
fn afternoon_points(time: NaiveTime) -> u64 {
    let minutes = time.hour() * 60 + time.minute();

    if minutes > 14 * 60 && minutes < 16 * 60 {
        AFTERNOON_POINTS
    } else {
        0
    }
}

// ============================================================================
// SCORER
// ============================================================================

/// Score a receipt rule by rule.
///
/// Expects a receipt that already passed [`crate::validate`]; unparseable
/// dates or times surface as [`ScoringError::Validation`].
pub fn score_breakdown(receipt: &Receipt) -> Result<PointsBreakdown, ScoringError> {
    let raw_total = receipt.total.as_deref().ok_or_else(|| ScoringError::missing("total"))?;
    let total = parse_amount("total", raw_total)?;

    let items = receipt.items.as_ref().ok_or_else(|| ScoringError::missing("items"))?;

    let date = parse_purchase_date(receipt.purchase_date.as_deref())?;
    let time = parse_purchase_time(receipt.purchase_time.as_deref())?;

    let mut contributions = Vec::with_capacity(PointsRule::ALL.len());
    for rule in PointsRule::ALL {
        let points = match rule {
            PointsRule::RetailerAlphanumerics => retailer_points(receipt.retailer_name()),
            PointsRule::RoundTotal => round_total_points(total),
            PointsRule::QuarterMultiple => quarter_multiple_points(total),
            PointsRule::ItemPairs => item_pair_points(items.len()),
            PointsRule::DescriptionLength => description_points(receipt)?,
            PointsRule::OddPurchaseDay => odd_day_points(date.day()),
            PointsRule::AfternoonWindow => afternoon_points(time),
        };

        debug!(rule = rule.code(), points, "rule evaluated");
        contributions.push(RuleContribution { rule, points });
    }

    let total = contributions
        .iter()
        .try_fold(0u64, |sum, c| sum.checked_add(c.points))
        .ok_or_else(|| ScoringError::AmountOutOfRange {
            field: "points".to_string(),
        })?;

    Ok(PointsBreakdown { contributions, total })
}

/// Total points for a receipt
pub fn score(receipt: &Receipt) -> Result<u64, ScoringError> {
    score_breakdown(receipt).map(|breakdown| breakdown.total)
}

// ============================================================================
// TESTS
// ============================================================================
