//! # Validation Module
//!
//! Field validation and numeric coercion for product writes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Write Path                                         │
//! │                                                                         │
//! │  CLI argument / JSON payload                                           │
//! │  ├── price: "19.99" | 19.99                                            │
//! │  └── stock: "5"     | 5                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE (the only place numbers are coerced)                      │
//! │  ├── normalize_new()   ← used by ProductStore::add                     │
//! │  └── normalize_patch() ← used by ProductStore::update                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Product { price: Money, stock: i64, min_stock: i64 }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both entry points share the same field validators, so the
//! "always numeric, never negative" invariant holds for every stored record.

use crate::error::ValidationError;
use crate::money::{parse_decimal, Money, ParseMoneyError};
use crate::types::{NewProduct, NumericInput, ProductPatch};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_CATEGORY_LEN: usize = 100;
const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// Normalized Fields
// =============================================================================

/// Fully validated fields for a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub stock: i64,
    pub min_stock: i64,
}

/// Validated partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
}

/// Validates and coerces every field of a new product.
///
/// ## Example
/// ```rust
/// use stockroom_core::types::NewProduct;
/// use stockroom_core::validation::normalize_new;
///
/// let fields = normalize_new(&NewProduct::new("Pen", "Stationery", "19.99", "5", 2i64)).unwrap();
/// assert_eq!(fields.price.minor(), 1999);
/// assert_eq!(fields.stock, 5);
/// ```
pub fn normalize_new(input: &NewProduct) -> ValidationResult<ProductFields> {
    Ok(ProductFields {
        name: validate_product_name(&input.name)?,
        category: validate_category(&input.category)?,
        price: coerce_price(&input.price)?,
        stock: coerce_quantity("stock", &input.stock)?,
        min_stock: coerce_quantity("minStock", &input.min_stock)?,
    })
}

/// Validates and coerces only the fields present in a patch.
pub fn normalize_patch(patch: &ProductPatch) -> ValidationResult<NormalizedPatch> {
    Ok(NormalizedPatch {
        name: patch.name.as_deref().map(validate_product_name).transpose()?,
        category: patch.category.as_deref().map(validate_category).transpose()?,
        price: patch.price.as_ref().map(coerce_price).transpose()?,
        stock: patch
            .stock
            .as_ref()
            .map(|v| coerce_quantity("stock", v))
            .transpose()?,
        min_stock: patch
            .min_stock
            .as_ref()
            .map(|v| coerce_quantity("minStock", v))
            .transpose()?,
    })
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates a category label and returns it trimmed.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
pub fn validate_category(category: &str) -> ValidationResult<String> {
    validate_text("category", category, MAX_CATEGORY_LEN)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a table search term.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces a price to [`Money`].
///
/// ## Rules
/// - Text is parsed as a decimal (`"19.99"`, `"1.5e2"`)
/// - Numbers are rounded to the nearest minor unit
/// - Must be non-negative; zero is allowed
pub fn coerce_price(input: &NumericInput) -> ValidationResult<Money> {
    let price = match input {
        NumericInput::Integer(n) => n
            .checked_mul(100)
            .map(Money::from_minor)
            .ok_or_else(|| not_a_number("price", input))?,
        NumericInput::Float(n) => {
            Money::from_major_f64(*n).ok_or_else(|| not_a_number("price", input))?
        }
        NumericInput::Text(s) => Money::parse(s).map_err(|e| match e {
            ParseMoneyError::Empty => ValidationError::Required {
                field: "price".to_string(),
            },
            ParseMoneyError::Malformed | ParseMoneyError::Overflow => not_a_number("price", input),
        })?,
    };

    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(price)
}

/// Coerces a stock quantity or threshold to a whole number.
///
/// ## Rules
/// - Text follows the same grammar as prices (`"5"`, `"5.0"`, `"1e2"`)
/// - Must be whole and non-negative
pub fn coerce_quantity(field: &str, input: &NumericInput) -> ValidationResult<i64> {
    let value = match input {
        NumericInput::Integer(n) => *n,
        NumericInput::Float(n) => whole_number(field, *n, input)?,
        NumericInput::Text(s) => match parse_decimal(s, 0) {
            Ok((n, false)) => n,
            Ok((_, true)) => {
                return Err(ValidationError::NotAWholeNumber {
                    field: field.to_string(),
                    value: input.to_string(),
                })
            }
            Err(ParseMoneyError::Empty) => {
                return Err(ValidationError::Required {
                    field: field.to_string(),
                })
            }
            Err(ParseMoneyError::Malformed | ParseMoneyError::Overflow) => {
                return Err(not_a_number(field, input))
            }
        },
    };

    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(value)
}

fn whole_number(field: &str, n: f64, input: &NumericInput) -> ValidationResult<i64> {
    if !n.is_finite() || n.abs() >= i64::MAX as f64 {
        return Err(not_a_number(field, input));
    }
    if n.fract() != 0.0 {
        return Err(ValidationError::NotAWholeNumber {
            field: field.to_string(),
            value: input.to_string(),
        });
    }
    Ok(n as i64)
}

fn not_a_number(field: &str, input: &NumericInput) -> ValidationError {
    ValidationError::NotANumber {
        field: field.to_string(),
        value: input.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("  Pen ").unwrap(), "Pen");
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_category() {
        assert_eq!(validate_category("Stationery").unwrap(), "Stationery");
        assert_eq!(
            validate_category(""),
            Err(ValidationError::Required {
                field: "category".to_string()
            })
        );
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  pen ").unwrap(), "pen");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_coerce_price() {
        assert_eq!(coerce_price(&"19.99".into()).unwrap().minor(), 1999);
        assert_eq!(coerce_price(&19.99.into()).unwrap().minor(), 1999);
        assert_eq!(coerce_price(&NumericInput::Integer(10)).unwrap().minor(), 1000);
        assert_eq!(coerce_price(&"0".into()).unwrap().minor(), 0);

        assert!(matches!(
            coerce_price(&"-1".into()),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            coerce_price(&"ten".into()),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            coerce_price(&"".into()),
            Err(ValidationError::Required { .. })
        ));
        assert!(coerce_price(&f64::NAN.into()).is_err());
    }

    #[test]
    fn test_coerce_quantity() {
        assert_eq!(coerce_quantity("stock", &"5".into()).unwrap(), 5);
        assert_eq!(coerce_quantity("stock", &"5.0".into()).unwrap(), 5);
        assert_eq!(coerce_quantity("stock", &5.0.into()).unwrap(), 5);
        assert_eq!(coerce_quantity("stock", &NumericInput::Integer(0)).unwrap(), 0);

        assert!(matches!(
            coerce_quantity("stock", &"5.5".into()),
            Err(ValidationError::NotAWholeNumber { .. })
        ));
        assert!(matches!(
            coerce_quantity("stock", &NumericInput::Integer(-1)),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            coerce_quantity("minStock", &"many".into()),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_price_and_quantity_read_the_same_text() {
        for text in ["7", "+3", "1e2", "2.5E1", "70e-1", " 12.0 "] {
            let price = coerce_price(&text.into()).unwrap();
            let stock = coerce_quantity("stock", &text.into()).unwrap();
            assert_eq!(price.minor(), stock * 100, "{text}");
        }

        for text in ["abc", "1e", "e5", "1.2.3", "inf", "NaN", "0x10", "--1"] {
            assert!(
                matches!(coerce_price(&text.into()), Err(ValidationError::NotANumber { .. })),
                "price {text}"
            );
            assert!(
                matches!(
                    coerce_quantity("stock", &text.into()),
                    Err(ValidationError::NotANumber { .. })
                ),
                "stock {text}"
            );
        }
    }

    #[test]
    fn test_quantity_rejects_fractional_exponent_text() {
        assert!(matches!(
            coerce_quantity("stock", &"15e-1".into()),
            Err(ValidationError::NotAWholeNumber { .. })
        ));
        assert!(matches!(
            coerce_quantity("stock", &"-1e1".into()),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_normalize_new() {
        let fields = normalize_new(&NewProduct::new(" Pen ", "Stationery", "1.50", "12", "3")).unwrap();
        assert_eq!(fields.name, "Pen");
        assert_eq!(fields.price, Money::from_minor(150));
        assert_eq!(fields.stock, 12);
        assert_eq!(fields.min_stock, 3);

        assert!(normalize_new(&NewProduct::new("Pen", "", "1", "1", "1")).is_err());
    }

    #[test]
    fn test_normalize_patch_only_touches_present_fields() {
        let patch = normalize_patch(&ProductPatch::new().stock("7")).unwrap();
        assert_eq!(patch.stock, Some(7));
        assert_eq!(patch.price, None);
        assert_eq!(patch.name, None);

        assert!(normalize_patch(&ProductPatch::new().price("-3")).is_err());
    }
}
