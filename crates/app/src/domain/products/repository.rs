//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::products::{
    data::NewProduct,
    records::{ProductRecord, ProductUuid},
};

const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const FIND_SHORT_STOCK_SQL: &str = include_str!("sql/find_short_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.sku)
            .bind(&product.name)
            .bind(try_i64_from_u64(product.price, "price")?)
            .bind(try_i64_from_u64(product.stock, "stock")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// SKUs, in order, whose product is missing or holds less stock than requested.
    pub(crate) async fn find_short_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requested: &[(String, u64)],
    ) -> Result<Vec<String>, sqlx::Error> {
        let mut skus = Vec::with_capacity(requested.len());
        let mut quantities = Vec::with_capacity(requested.len());

        for (sku, quantity) in requested {
            skus.push(sku.clone());
            quantities.push(try_i64_from_u64(*quantity, "quantity")?);
        }

        query_scalar::<Postgres, String>(FIND_SHORT_STOCK_SQL)
            .bind(skus)
            .bind(quantities)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_amount(row, "stock")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

/// Read a non-negative `BIGINT` column as `u64`.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Convert a `u64` amount for binding to a `BIGINT` column.
pub(crate) fn try_i64_from_u64(value: u64, column: &'static str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
