//! Ledger records: raw sheet rows, typed movements and the submission form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, ProductId};

/// Date format used by the ledger's `DATE` column.
pub const LEDGER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Kind of stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransactionType {
    In,
    Out,
    Adjustment,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [Self::In, Self::Out, Self::Adjustment];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::In => "In",
            TransactionType::Out => "Out",
            TransactionType::Adjustment => "Adjustment",
        }
    }

    /// Signed contribution of `quantity` to a product balance.
    ///
    /// `None` when the contribution is not representable (`Out` of `i64::MIN`).
    pub fn signed(self, quantity: i64) -> Option<i64> {
        match self {
            TransactionType::In | TransactionType::Adjustment => Some(quantity),
            TransactionType::Out => quantity.checked_neg(),
        }
    }
}

impl core::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::invalid_type(format!("'{s}'")))
    }
}

/// Raw ledger row, exactly as a store hands it over.
///
/// Every column is text; nothing is validated until [`LedgerRow::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    #[serde(rename = "DATE")]
    pub date: String,
    #[serde(rename = "PRODUCT")]
    pub product: String,
    #[serde(rename = "TYPE")]
    pub kind: String,
    #[serde(rename = "QUANTITY")]
    pub quantity: String,
    #[serde(rename = "COMMENTS", default)]
    pub comment: Option<String>,
}

impl LedgerRow {
    /// Convert the raw row into a typed record.
    pub fn parse(&self) -> DomainResult<TransactionRecord> {
        let date = NaiveDate::parse_from_str(self.date.trim(), LEDGER_DATE_FORMAT)
            .map_err(|e| DomainError::invalid_date(format!("'{}': {e}", self.date)))?;
        let product = ProductId::new(&self.product)?;
        let kind: TransactionType = self.kind.parse()?;
        let quantity = parse_quantity(&self.quantity)?;

        Ok(TransactionRecord {
            date,
            product,
            kind,
            quantity,
            comment: normalize_comment(self.comment.as_deref()),
        })
    }
}

fn parse_quantity(raw: &str) -> DomainResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::invalid_quantity("missing quantity"));
    }
    raw.parse::<i64>()
        .map_err(|_| DomainError::invalid_quantity(format!("'{raw}' is not an integer")))
}

fn normalize_comment(comment: Option<&str>) -> Option<String> {
    comment
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// A recorded stock movement. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    date: NaiveDate,
    product: ProductId,
    kind: TransactionType,
    quantity: i64,
    comment: Option<String>,
}

impl TransactionRecord {
    pub fn new(
        date: NaiveDate,
        product: ProductId,
        kind: TransactionType,
        quantity: i64,
        comment: Option<String>,
    ) -> Self {
        Self {
            date,
            product,
            kind,
            quantity,
            comment: normalize_comment(comment.as_deref()),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn product(&self) -> &ProductId {
        &self.product
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Signed effect of this record on its product's balance.
    pub fn contribution(&self) -> Option<i64> {
        self.kind.signed(self.quantity)
    }

    pub fn to_row(&self) -> LedgerRow {
        LedgerRow {
            date: self.date.format(LEDGER_DATE_FORMAT).to_string(),
            product: self.product.to_string(),
            kind: self.kind.to_string(),
            quantity: self.quantity.to_string(),
            comment: self.comment.clone(),
        }
    }
}

/// Submission form for a new movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub product: String,
    pub kind: TransactionType,
    pub quantity: i64,
    pub comment: Option<String>,
}

impl NewRecord {
    /// Validate the submission and stamp it with `date`.
    ///
    /// `In`/`Out` quantities are counts and must be non-negative; only
    /// `Adjustment` may carry a sign.
    pub fn into_record(self, date: NaiveDate) -> DomainResult<TransactionRecord> {
        let product = ProductId::new(&self.product)?;
        if self.kind != TransactionType::Adjustment && self.quantity < 0 {
            return Err(DomainError::invalid_quantity(format!(
                "{} quantity cannot be negative (got {})",
                self.kind, self.quantity
            )));
        }
        Ok(TransactionRecord::new(
            date,
            product,
            self.kind,
            self.quantity,
            self.comment,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, product: &str, kind: &str, quantity: &str) -> LedgerRow {
        LedgerRow {
            date: date.to_string(),
            product: product.to_string(),
            kind: kind.to_string(),
            quantity: quantity.to_string(),
            comment: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
    }

    #[test]
    fn parses_well_formed_row() {
        let rec = row("05-11-2024", " Gloves ", "Out", " 3 ").parse().unwrap();
        assert_eq!(rec.date(), day(5));
        assert_eq!(rec.product().as_str(), "Gloves");
        assert_eq!(rec.kind(), TransactionType::Out);
        assert_eq!(rec.quantity(), 3);
        assert_eq!(rec.contribution(), Some(-3));
        assert_eq!(rec.comment(), None);
    }

    #[test]
    fn transaction_type_parsing_ignores_case() {
        assert_eq!("adjustment".parse::<TransactionType>().unwrap(), TransactionType::Adjustment);
        assert_eq!(" IN ".parse::<TransactionType>().unwrap(), TransactionType::In);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = row("05-11-2024", "Gloves", "Unknown", "3").parse().unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransactionType(_)));
    }

    #[test]
    fn missing_or_non_numeric_quantity_is_rejected() {
        for q in ["", "  ", "three", "1.5"] {
            let err = row("05-11-2024", "Gloves", "In", q).parse().unwrap_err();
            assert!(matches!(err, DomainError::InvalidQuantity(_)), "quantity {q:?}");
        }
    }

    #[test]
    fn negative_adjustment_parses() {
        let rec = row("05-11-2024", "Gloves", "Adjustment", "-1").parse().unwrap();
        assert_eq!(rec.contribution(), Some(-1));
    }

    #[test]
    fn out_of_min_quantity_has_no_contribution() {
        let rec = row("05-11-2024", "Gloves", "Out", "-9223372036854775808").parse().unwrap();
        assert_eq!(rec.quantity(), i64::MIN);
        assert_eq!(rec.contribution(), None);
        assert_eq!(TransactionType::In.signed(i64::MIN), Some(i64::MIN));
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = row("2024-11-05", "Gloves", "In", "1").parse().unwrap_err();
        assert!(matches!(err, DomainError::InvalidDate(_)));
    }

    #[test]
    fn blank_comment_collapses_to_none() {
        let mut r = row("05-11-2024", "Gloves", "In", "1");
        r.comment = Some("   ".to_string());
        assert_eq!(r.parse().unwrap().comment(), None);
    }

    #[test]
    fn to_row_uses_ledger_spelling() {
        let rec = TransactionRecord::new(
            day(1),
            ProductId::new("Fairy").unwrap(),
            TransactionType::Adjustment,
            -2,
            Some("recount".to_string()),
        );
        let r = rec.to_row();
        assert_eq!(r.date, "01-11-2024");
        assert_eq!(r.kind, "Adjustment");
        assert_eq!(r.quantity, "-2");
        assert_eq!(r.parse().unwrap(), rec);
    }

    #[test]
    fn submission_rejects_negative_in_and_out() {
        for kind in [TransactionType::In, TransactionType::Out] {
            let form = NewRecord {
                product: "Sponge".to_string(),
                kind,
                quantity: -1,
                comment: None,
            };
            assert!(matches!(form.into_record(day(2)), Err(DomainError::InvalidQuantity(_))));
        }
    }

    #[test]
    fn submission_allows_negative_adjustment() {
        let form = NewRecord {
            product: "Sponge".to_string(),
            kind: TransactionType::Adjustment,
            quantity: -4,
            comment: Some("damaged".to_string()),
        };
        let rec = form.into_record(day(2)).unwrap();
        assert_eq!(rec.quantity(), -4);
        assert_eq!(rec.comment(), Some("damaged"));
    }

    #[test]
    fn submission_requires_product() {
        let form = NewRecord {
            product: " ".to_string(),
            kind: TransactionType::In,
            quantity: 1,
            comment: None,
        };
        assert!(matches!(form.into_record(day(2)), Err(DomainError::Validation(_))));
    }
}
