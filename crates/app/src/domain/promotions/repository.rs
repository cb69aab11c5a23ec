//! Promotions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::domain::promotions::{
    data::NewPromotion,
    records::{PromotionRecord, PromotionUuid},
};

const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const SET_PROMOTION_ACTIVE_SQL: &str = include_str!("sql/set_promotion_active.sql");
const LIST_ACTIVE_PROMOTIONS_SQL: &str = include_str!("sql/list_active_promotions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: &NewPromotion,
    ) -> Result<PromotionRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(CREATE_PROMOTION_SQL)
            .bind(promotion.uuid.into_uuid())
            .bind(&promotion.name)
            .bind(promotion.kind.as_str())
            .bind(Json(&promotion.parameters))
            .bind(promotion.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_promotion_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        active: bool,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PROMOTION_ACTIVE_SQL)
            .bind(promotion.into_uuid())
            .bind(active)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Active promotions in creation order.
    pub(crate) async fn list_active_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(LIST_ACTIVE_PROMOTIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PromotionUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            kind: row.try_get("kind")?,
            parameters: row.try_get::<Json<serde_json::Value>, _>("parameters")?.0,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
