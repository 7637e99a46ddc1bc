//! Concurrent multi-category aggregation.

use std::collections::BTreeMap;

use tokio::sync::mpsc;

use crate::category::Category;
use crate::error::{CategoryError, PoiError};
use crate::geo::Location;
use crate::overpass::OverpassClient;
use crate::rank::rank_sites;
use crate::site::Site;

/// One request's combined result: ranked sites keyed by category.
pub type AggregateSites = BTreeMap<Category, Vec<Site>>;

impl OverpassClient {
    /// Fetches and ranks every requested category concurrently.
    ///
    /// Spawns one task per category; each task fetches its sites, sorts them
    /// by distance, and bearing-filters them before reporting over a shared
    /// channel. The per-task senders double as the completion count: the
    /// channel closes once the last task has reported, so receiving to
    /// closure is the fan-in join.
    ///
    /// **All-or-nothing semantics**: the first category failure becomes the
    /// overall result. Remaining tasks are still drained (their output is
    /// discarded) so no task is left blocked on a full channel and no
    /// partial aggregate is ever observable by the caller.
    ///
    /// # Errors
    ///
    /// Returns the first [`CategoryError`] reported by any category task.
    pub async fn aggregate(
        &self,
        center: Location,
        categories: &[Category],
    ) -> Result<AggregateSites, CategoryError> {
        let (tx, mut rx) =
            mpsc::channel::<(Category, Result<Vec<Site>, PoiError>)>(categories.len().max(1));

        for &category in categories {
            let client = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = client.fetch_category(category, center).await.map(
                    |mut sites| {
                        rank_sites(&mut sites);
                        sites
                    },
                );
                // The orchestrator receives until the channel closes, so a
                // send can only fail if the whole aggregate future was
                // dropped; nothing is waiting for the result then.
                let _ = tx.send((category, result)).await;
            });
        }
        // Only the task-held senders remain; the channel closes when the last
        // task reports.
        drop(tx);

        let mut collected = AggregateSites::new();
        let mut first_failure: Option<CategoryError> = None;

        while let Some((category, result)) = rx.recv().await {
            match result {
                Ok(sites) => {
                    tracing::debug!(category = %category, count = sites.len(), "category ranked");
                    collected.insert(category, sites);
                }
                Err(source) => {
                    tracing::warn!(category = %category, error = %source, "category fetch failed");
                    if first_failure.is_none() {
                        first_failure = Some(CategoryError { category, source });
                    }
                }
            }
        }

        match first_failure {
            Some(error) => Err(error),
            None => Ok(collected),
        }
    }
}
