use bigdecimal::rounding::RoundingMode;
use bigdecimal::BigDecimal;

use crate::domain::errors::DomainError;
use crate::domain::order::{LineItem, Product};
use crate::domain::ports::CatalogQuery;

/// A cart line with its product resolved against the current catalog.
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub product: Product,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct PricedCart {
    pub lines: Vec<PricedLine>,
    pub total: BigDecimal,
}

/// Price a cart against the current catalog snapshot.
///
/// Any unresolvable product id aborts the whole computation, so no partial
/// order can ever be created from it. The total is rounded half-up to two
/// decimal places once, at the final sum, to avoid compounding per-line
/// rounding error.
pub fn price_cart(
    catalog: &dyn CatalogQuery,
    items: &[LineItem],
) -> Result<PricedCart, DomainError> {
    if items.is_empty() {
        return Err(DomainError::InvalidInput(
            "order must contain at least one line item".to_string(),
        ));
    }

    let mut lines = Vec::with_capacity(items.len());
    let mut total = BigDecimal::from(0);

    for item in items {
        if item.quantity < 1 {
            return Err(DomainError::InvalidInput(format!(
                "quantity for '{}' must be at least 1",
                item.product_id
            )));
        }
        let product = catalog
            .resolve(&item.product_id)?
            .ok_or_else(|| DomainError::UnknownProduct(item.product_id.clone()))?;

        total += &product.price * BigDecimal::from(item.quantity);
        lines.push(PricedLine {
            product,
            quantity: item.quantity,
        });
    }

    Ok(PricedCart {
        lines,
        total: total.with_scale_round(2, RoundingMode::HalfUp),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::str::FromStr;

    use super::*;

    struct FixedCatalog {
        products: HashMap<String, Product>,
    }

    impl FixedCatalog {
        fn with_prices(prices: &[(&str, &str)]) -> Self {
            let products = prices
                .iter()
                .map(|(id, price)| {
                    (
                        id.to_string(),
                        Product {
                            id: id.to_string(),
                            name: format!("Product {id}"),
                            description: String::new(),
                            price: BigDecimal::from_str(price).unwrap(),
                            brand: String::new(),
                            category: String::new(),
                            image_url: String::new(),
                            rating: 0.0,
                            review_count: 0,
                        },
                    )
                })
                .collect();
            Self { products }
        }
    }

    impl CatalogQuery for FixedCatalog {
        fn resolve(&self, product_id: &str) -> Result<Option<Product>, DomainError> {
            Ok(self.products.get(product_id).cloned())
        }

        fn list(&self) -> Result<Vec<Product>, DomainError> {
            Ok(self.products.values().cloned().collect())
        }
    }

    fn line(product_id: &str, quantity: i32) -> LineItem {
        LineItem {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn sums_price_times_quantity() {
        let catalog = FixedCatalog::with_prices(&[("prod_1", "50.00")]);
        let cart = price_cart(&catalog, &[line("prod_1", 2)]).unwrap();
        assert_eq!(cart.total, BigDecimal::from_str("100.00").unwrap());
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 2);
    }

    #[test]
    fn rounds_half_up_at_the_sum_not_per_line() {
        // 0.335 * 3 = 1.005 -> 1.01 when rounded once at the end.
        // Rounding each line first would give 0.34 * 3 = 1.02.
        let catalog = FixedCatalog::with_prices(&[("prod_1", "0.335")]);
        let cart = price_cart(&catalog, &[line("prod_1", 3)]).unwrap();
        assert_eq!(cart.total, BigDecimal::from_str("1.01").unwrap());
    }

    #[test]
    fn unknown_product_aborts_whole_cart() {
        let catalog = FixedCatalog::with_prices(&[("prod_1", "50.00")]);
        let err = price_cart(&catalog, &[line("prod_1", 1), line("prod_9", 1)]).unwrap_err();
        assert!(matches!(err, DomainError::UnknownProduct(ref id) if id == "prod_9"));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let catalog = FixedCatalog::with_prices(&[("prod_1", "50.00")]);
        assert!(matches!(
            price_cart(&catalog, &[line("prod_1", 0)]),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_cart_is_rejected() {
        let catalog = FixedCatalog::with_prices(&[]);
        assert!(matches!(
            price_cart(&catalog, &[]),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn multi_line_total() {
        let catalog =
            FixedCatalog::with_prices(&[("prod_1", "1999.99"), ("prod_8", "399.99")]);
        let cart = price_cart(&catalog, &[line("prod_1", 1), line("prod_8", 2)]).unwrap();
        assert_eq!(cart.total, BigDecimal::from_str("2799.97").unwrap());
    }
}
