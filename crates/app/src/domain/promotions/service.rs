//! Promotions service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::promotions::{
        data::NewPromotion,
        errors::PromotionsServiceError,
        records::{PromotionRecord, PromotionUuid},
        repository::PgPromotionsRepository,
    },
};

/// PostgreSQL-backed promotion rules.
#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    repository: PgPromotionsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromotionsRepository::new(),
        }
    }
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.create_promotion",
        skip(self, promotion),
        fields(promotion_uuid = %promotion.uuid, kind = %promotion.kind),
        err
    )]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_promotion(&mut tx, &promotion)
            .await?;

        tx.commit().await?;

        info!(promotion_uuid = %created.uuid, "created promotion");

        Ok(created)
    }

    #[tracing::instrument(
        name = "promotions.service.set_promotion_active",
        skip(self),
        fields(promotion_uuid = %promotion),
        err
    )]
    async fn set_promotion_active(
        &self,
        promotion: PromotionUuid,
        active: bool,
    ) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .set_promotion_active(&mut tx, promotion, active)
            .await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_active_promotions(&self) -> Result<Vec<PromotionRecord>, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promotions = self.repository.list_active_promotions(&mut tx).await?;

        tx.commit().await?;

        Ok(promotions)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Store a promotion. Its parameters are not validated until pricing.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Switch a promotion on or off.
    async fn set_promotion_active(
        &self,
        promotion: PromotionUuid,
        active: bool,
    ) -> Result<(), PromotionsServiceError>;

    /// All active promotions, oldest first.
    async fn list_active_promotions(&self) -> Result<Vec<PromotionRecord>, PromotionsServiceError>;
}
