use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::Product;
use crate::domain::ports::CatalogQuery;
use crate::infrastructure::models::ProductRow;
use crate::schema::products;

/// Legacy storefront slugs that older clients still send in carts, mapped to
/// the canonical catalog ids. Resolution happens here, inside the catalog,
/// so order creation never sees a legacy id.
const PRODUCT_ALIASES: &[(&str, &str)] = &[
    ("turbocharger", "prod_1"),
    ("brake-kit", "prod_2"),
    ("suspension", "prod_3"),
    ("exhaust", "prod_4"),
    ("racing-seat", "prod_5"),
    ("carbon-hood", "prod_6"),
    ("intercooler", "prod_7"),
    ("racing-wheel", "prod_8"),
];

/// Map a possibly-legacy product id to its canonical form.
pub fn canonical_id(product_id: &str) -> &str {
    PRODUCT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == product_id)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(product_id)
}

pub struct DieselCatalog {
    pool: DbPool,
}

impl DieselCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogQuery for DieselCatalog {
    fn resolve(&self, product_id: &str) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = products::table
            .find(canonical_id(product_id))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Product::from))
    }

    fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = products::table
            .select(ProductRow::as_select())
            .order(products::id.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_slugs_map_to_canonical_ids() {
        assert_eq!(canonical_id("turbocharger"), "prod_1");
        assert_eq!(canonical_id("racing-wheel"), "prod_8");
    }

    #[test]
    fn canonical_ids_pass_through() {
        assert_eq!(canonical_id("prod_3"), "prod_3");
        assert_eq!(canonical_id("prod_42"), "prod_42");
    }
}
