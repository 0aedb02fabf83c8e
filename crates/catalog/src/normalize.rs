use csv::StringRecord;

use crate::config::NumberPolicy;
use crate::model::{PriceRecord, ResolvedRoles, Role};

/// Why a data row was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFaultKind {
    /// Row is shorter than the column bound to `role`.
    MissingCell { role: Role },
    /// Product cell is blank after trimming.
    EmptyProduct,
    /// Price or weight is not a number under the active policy.
    Unparseable { role: Role, value: String },
    /// Price or weight parsed but is zero or negative.
    NonPositive { role: Role, value: String },
    /// Price divided by weight does not fit in an `f64`.
    MetricOutOfRange,
}

impl std::fmt::Display for RowFaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCell { role } => write!(f, "missing {role} value"),
            Self::EmptyProduct => write!(f, "empty product name"),
            Self::Unparseable { role, value } => write!(f, "cannot parse {role} '{value}'"),
            Self::NonPositive { role, value } => write!(f, "{role} must be positive, got '{value}'"),
            Self::MetricOutOfRange => write!(f, "price per kg is out of range"),
        }
    }
}

/// A rejected row with enough context to point at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFault {
    pub file: String,
    /// 1-based line in the source file; the header is line 1.
    pub line: u64,
    pub cells: Vec<String>,
    pub kind: RowFaultKind,
}

impl std::fmt::Display for RowFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, line {}: {} [{}]",
            self.file,
            self.line,
            self.kind,
            self.cells.join(",")
        )
    }
}

/// Parse a price or weight cell: `,` becomes `.`, then the policy decides.
pub fn parse_number(raw: &str, policy: NumberPolicy) -> Option<f64> {
    let text = raw.trim().replace(',', ".");
    match policy {
        NumberPolicy::Fractional => text.parse::<f64>().ok().filter(|v| v.is_finite()),
        NumberPolicy::Whole => text.parse::<i64>().ok().map(|v| v as f64),
    }
}

/// Turn one data row into a [`PriceRecord`].
pub fn normalize(
    record: &StringRecord,
    roles: &ResolvedRoles,
    source_file: &str,
    line: u64,
    policy: NumberPolicy,
) -> Result<PriceRecord, RowFault> {
    let fault = |kind: RowFaultKind| RowFault {
        file: source_file.to_string(),
        line,
        cells: record.iter().map(str::to_string).collect(),
        kind,
    };

    let cell = |role: Role, index: usize| record.get(index).ok_or(RowFaultKind::MissingCell { role });

    let product = cell(Role::Product, roles.product.index).map_err(fault)?.trim();
    let price_raw = cell(Role::Price, roles.price.index).map_err(fault)?;
    let weight_raw = cell(Role::Weight, roles.weight.index).map_err(fault)?;

    if product.is_empty() {
        return Err(fault(RowFaultKind::EmptyProduct));
    }

    let number = |role: Role, raw: &str| -> Result<f64, RowFaultKind> {
        let value = parse_number(raw, policy).ok_or_else(|| RowFaultKind::Unparseable {
            role,
            value: raw.to_string(),
        })?;
        if value <= 0.0 {
            return Err(RowFaultKind::NonPositive {
                role,
                value: raw.to_string(),
            });
        }
        Ok(value)
    };

    let price = number(Role::Price, price_raw).map_err(fault)?;
    let weight = number(Role::Weight, weight_raw).map_err(fault)?;

    let record = PriceRecord::new(product, price, weight, source_file);
    if !record.price_per_unit.is_finite() {
        return Err(fault(RowFaultKind::MetricOutOfRange));
    }
    Ok(record)
}
