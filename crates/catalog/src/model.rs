use serde::Serialize;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Semantic meaning assigned to a source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Product,
    Price,
    Weight,
}

impl Role {
    /// Classification priority: a header is tested against roles in this order.
    pub const ALL: [Role; 3] = [Role::Product, Role::Price, Role::Weight];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Product => write!(f, "product"),
            Self::Price => write!(f, "price"),
            Self::Weight => write!(f, "weight"),
        }
    }
}

/// A header bound to a role: its position in the header row and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub index: usize,
    pub name: String,
}

/// Result of classifying one file's header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub product: Option<ColumnRef>,
    pub price: Option<ColumnRef>,
    pub weight: Option<ColumnRef>,
}

/// All three roles bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoles {
    pub product: ColumnRef,
    pub price: ColumnRef,
    pub weight: ColumnRef,
}

impl ColumnRoles {
    pub fn get(&self, role: Role) -> Option<&ColumnRef> {
        match role {
            Role::Product => self.product.as_ref(),
            Role::Price => self.price.as_ref(),
            Role::Weight => self.weight.as_ref(),
        }
    }

    pub(crate) fn assign(&mut self, role: Role, column: ColumnRef) {
        let slot = match role {
            Role::Product => &mut self.product,
            Role::Price => &mut self.price,
            Role::Weight => &mut self.weight,
        };
        *slot = Some(column);
    }

    /// Unresolved roles, in priority order.
    pub fn missing(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }

    pub fn resolve(self) -> Result<ResolvedRoles, Vec<Role>> {
        match (self.product, self.price, self.weight) {
            (Some(product), Some(price), Some(weight)) => Ok(ResolvedRoles {
                product,
                price,
                weight,
            }),
            (product, price, weight) => Err(ColumnRoles {
                product,
                price,
                weight,
            }
            .missing()),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One normalized price-list row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    pub product: String,
    pub price: f64,
    pub weight: f64,
    pub source_file: String,
    pub price_per_unit: f64,
}

impl PriceRecord {
    /// Builds a record and derives `price_per_unit`. Callers validate inputs.
    pub fn new(product: impl Into<String>, price: f64, weight: f64, source_file: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            price,
            weight,
            source_file: source_file.into(),
            price_per_unit: round_to_tenth(price / weight),
        }
    }
}

/// Round half away from zero to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// All accepted records, in file discovery order then row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<PriceRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: PriceRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct source files that contributed records, first-seen order.
    pub fn sources(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.source_file.as_str()) {
                seen.push(&record.source_file);
            }
        }
        seen
    }
}

impl FromIterator<PriceRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = PriceRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PriceRecord;
    type IntoIter = std::slice::Iter<'a, PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
