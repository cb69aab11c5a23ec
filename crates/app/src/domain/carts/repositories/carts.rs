//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::carts::records::{CartRecord, CartUuid, OwnerUuid};

const GET_ACTIVE_CART_SQL: &str = include_str!("../sql/get_active_cart.sql");
const LOCK_ACTIVE_CART_SQL: &str = include_str!("../sql/lock_active_cart.sql");
const LOCK_CART_SQL: &str = include_str!("../sql/lock_cart.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const DELETE_CART_SQL: &str = include_str!("../sql/delete_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// The owner's active cart, if any.
    pub(crate) async fn get_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: OwnerUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(GET_ACTIVE_CART_SQL)
            .bind(owner.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// The owner's active cart, locked until the transaction ends.
    ///
    /// A caller blocked behind a transaction that clears the cart gets `None` once that
    /// transaction commits.
    pub(crate) async fn lock_active_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: OwnerUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LOCK_ACTIVE_CART_SQL)
            .bind(owner.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Any cart by id, cleared or not, locked until the transaction ends.
    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LOCK_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        owner: OwnerUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(CREATE_CART_SQL)
            .bind(cart.into_uuid())
            .bind(owner.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            owner: OwnerUuid::from_uuid(row.try_get("owner_uuid")?),
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
