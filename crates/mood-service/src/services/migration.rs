//! Migration service
//!
//! Imports the fallback file into the primary store. The import only runs
//! while the primary `moods` table is empty, so running it twice cannot
//! duplicate rows.

use tracing::{info, instrument, warn};

use crate::dto::MigrateResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Migration service
pub struct MigrationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MigrationService<'a> {
    /// Create a new MigrationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Report how many rows the primary store holds
    #[instrument(skip(self))]
    pub async fn status(&self) -> ServiceResult<MigrateResponse> {
        let existing = self.ctx.bounded(self.ctx.mood_repo().count()).await?;
        Ok(MigrateResponse::status(existing))
    }

    /// Copy every fallback entry into the primary store in one batch
    #[instrument(skip(self))]
    pub async fn run(&self) -> ServiceResult<MigrateResponse> {
        let existing = self.ctx.bounded(self.ctx.mood_repo().count()).await?;
        if existing > 0 {
            info!(existing, "Primary store already populated, skipping import");
            return Ok(MigrateResponse::already_populated(existing));
        }

        let records = self.ctx.bounded(self.ctx.fallback_store().load_all()).await?;
        if records.is_empty() {
            warn!(file = %self.ctx.fallback_location(), "Fallback file is empty");
            return Ok(MigrateResponse::empty_file(self.ctx.fallback_location()));
        }

        let inserted = self
            .ctx
            .bounded(self.ctx.mood_repo().insert_many(&records))
            .await?;
        info!(inserted, "Imported fallback entries into primary store");

        Ok(MigrateResponse::inserted(inserted))
    }
}
