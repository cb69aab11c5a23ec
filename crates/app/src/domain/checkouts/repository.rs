//! Checkouts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    carts::records::{CartUuid, OwnerUuid},
    checkouts::{
        data::NewCheckout,
        records::{
            AppliedPromotionRecord, CheckoutLineRecord, CheckoutRecord, CheckoutStatus,
            CheckoutUuid,
        },
    },
    products::{
        records::ProductUuid,
        repository::{try_get_amount, try_i64_from_u64},
    },
    promotions::records::PromotionUuid,
};

const CHECKOUT_EXISTS_FOR_CART_SQL: &str = include_str!("sql/checkout_exists_for_cart.sql");
const CREATE_CHECKOUT_SQL: &str = include_str!("sql/create_checkout.sql");
const CREATE_CHECKOUT_LINE_SQL: &str = include_str!("sql/create_checkout_line.sql");
const CREATE_CHECKOUT_PROMOTION_SQL: &str = include_str!("sql/create_checkout_promotion.sql");
const UPDATE_CHECKOUT_STATUS_SQL: &str = include_str!("sql/update_checkout_status.sql");
const GET_CHECKOUT_SQL: &str = include_str!("sql/get_checkout.sql");
const GET_CHECKOUT_LINES_SQL: &str = include_str!("sql/get_checkout_lines.sql");
const GET_CHECKOUT_PROMOTIONS_SQL: &str = include_str!("sql/get_checkout_promotions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCheckoutsRepository;

impl PgCheckoutsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn exists_for_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(CHECKOUT_EXISTS_FOR_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Write a pending checkout with its lines and applied promotions.
    pub(crate) async fn create_checkout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        checkout: &NewCheckout,
    ) -> Result<CheckoutRecord, sqlx::Error> {
        let mut created = query_as::<Postgres, CheckoutRecord>(CREATE_CHECKOUT_SQL)
            .bind(checkout.uuid.into_uuid())
            .bind(checkout.source_cart.into_uuid())
            .bind(checkout.owner.into_uuid())
            .bind(&checkout.currency)
            .bind(CheckoutStatus::Pending.as_str())
            .bind(try_i64_from_u64(checkout.subtotal, "subtotal")?)
            .bind(try_i64_from_u64(checkout.total_discount, "total_discount")?)
            .bind(try_i64_from_u64(checkout.total, "total")?)
            .fetch_one(&mut **tx)
            .await?;

        for (index, line) in checkout.lines.iter().enumerate() {
            query(CREATE_CHECKOUT_LINE_SQL)
                .bind(checkout.uuid.into_uuid())
                .bind(position(index)?)
                .bind(line.product.into_uuid())
                .bind(&line.sku)
                .bind(&line.name)
                .bind(try_i32_from_u32(line.quantity, "quantity")?)
                .bind(try_i64_from_u64(line.unit_price, "unit_price")?)
                .bind(try_i64_from_u64(line.subtotal, "subtotal")?)
                .bind(try_i64_from_u64(line.discount, "discount")?)
                .bind(try_i64_from_u64(line.total, "total")?)
                .execute(&mut **tx)
                .await?;
        }

        for (index, promotion) in checkout.promotions.iter().enumerate() {
            query(CREATE_CHECKOUT_PROMOTION_SQL)
                .bind(checkout.uuid.into_uuid())
                .bind(position(index)?)
                .bind(promotion.promotion.into_uuid())
                .bind(&promotion.kind)
                .bind(&promotion.description)
                .bind(try_i64_from_u64(promotion.discount, "discount")?)
                .execute(&mut **tx)
                .await?;
        }

        created.lines.clone_from(&checkout.lines);
        created.promotions.clone_from(&checkout.promotions);

        Ok(created)
    }

    /// Move a checkout to `status`, returning the header without lines.
    pub(crate) async fn update_checkout_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        checkout: CheckoutUuid,
        status: CheckoutStatus,
    ) -> Result<CheckoutRecord, sqlx::Error> {
        query_as::<Postgres, CheckoutRecord>(UPDATE_CHECKOUT_STATUS_SQL)
            .bind(checkout.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_checkout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        checkout: CheckoutUuid,
    ) -> Result<CheckoutRecord, sqlx::Error> {
        let mut record = query_as::<Postgres, CheckoutRecord>(GET_CHECKOUT_SQL)
            .bind(checkout.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        record.lines = query_as::<Postgres, CheckoutLineRecord>(GET_CHECKOUT_LINES_SQL)
            .bind(checkout.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        record.promotions = query_as::<Postgres, AppliedPromotionRecord>(GET_CHECKOUT_PROMOTIONS_SQL)
            .bind(checkout.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(record)
    }
}

impl<'r> FromRow<'r, PgRow> for CheckoutRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<CheckoutStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: CheckoutUuid::from_uuid(row.try_get("uuid")?),
            source_cart: CartUuid::from_uuid(row.try_get("source_cart_uuid")?),
            owner: OwnerUuid::from_uuid(row.try_get("owner_uuid")?),
            currency: row.try_get("currency")?,
            status,
            lines: Vec::new(),
            promotions: Vec::new(),
            subtotal: try_get_amount(row, "subtotal")?,
            total_discount: try_get_amount(row, "total_discount")?,
            total: try_get_amount(row, "total")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CheckoutLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            quantity,
            unit_price: try_get_amount(row, "unit_price")?,
            subtotal: try_get_amount(row, "subtotal")?,
            discount: try_get_amount(row, "discount")?,
            total: try_get_amount(row, "total")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AppliedPromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            promotion: PromotionUuid::from_uuid(row.try_get("promotion_uuid")?),
            kind: row.try_get("kind")?,
            description: row.try_get("description")?,
            discount: try_get_amount(row, "discount")?,
        })
    }
}

fn position(index: usize) -> Result<i32, sqlx::Error> {
    i32::try_from(index).map_err(|e| sqlx::Error::ColumnDecode {
        index: "position".to_string(),
        source: Box::new(e),
    })
}

fn try_i32_from_u32(value: u32, column: &'static str) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
