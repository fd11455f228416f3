//! Upgrade-target activation logic
//!
//! Enforces the collection-wide invariant that at most one upgrade target is
//! active. Activation over a pair of independent PATCH calls has no
//! server-side transaction, so the sequence is deactivate-then-activate: a
//! failure between the steps leaves zero active targets (nothing is silently
//! served), never two.

use crate::client::RegistryApi;
use crate::domain::{CreateUpgradeTargetInput, UpgradeTarget};
use crate::error::{AppError, Result};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct ActivationService<R: RegistryApi> {
    registry: Arc<R>,
}

impl<R: RegistryApi> ActivationService<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    pub async fn list(&self) -> Result<Vec<UpgradeTarget>> {
        self.registry.list_upgrade_targets().await
    }

    pub async fn create(&self, input: &CreateUpgradeTargetInput) -> Result<UpgradeTarget> {
        input.validate()?;
        self.registry.create_upgrade_target(input).await
    }

    /// Toggle the active state of a target.
    ///
    /// If the target is already active this is a plain deactivation. If
    /// another target is currently active, it is deactivated first and the
    /// activation is issued only after the registry has acknowledged the
    /// deactivation. A failed first step aborts the sequence outright.
    ///
    /// The controller works from the snapshot it lists here; two
    /// administrators activating different targets concurrently from stale
    /// snapshots can still race (no server-side version check exists).
    pub async fn set_active(&self, id: Uuid) -> Result<Vec<UpgradeTarget>> {
        let targets = self.registry.list_upgrade_targets().await?;
        let target = targets
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Upgrade target {} not found", id)))?;

        if target.is_active {
            self.registry.set_upgrade_target_active(id, false).await?;
        } else {
            if let Some(current) = targets.iter().find(|t| t.is_active && t.id != id) {
                self.registry
                    .set_upgrade_target_active(current.id, false)
                    .await?;
            }
            self.registry.set_upgrade_target_active(id, true).await?;
        }

        self.registry.list_upgrade_targets().await
    }

    /// Delete a target. The active target is never deletable; the request is
    /// refused before any network call is constructed.
    pub async fn delete(&self, id: Uuid) -> Result<Vec<UpgradeTarget>> {
        let targets = self.registry.list_upgrade_targets().await?;
        let target = targets
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Upgrade target {} not found", id)))?;

        if target.is_active {
            return Err(AppError::Conflict(
                "The active upgrade target cannot be deleted; deactivate it first".to_string(),
            ));
        }

        self.registry.delete_upgrade_target(id).await?;
        self.registry.list_upgrade_targets().await
    }
}
