use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::repository::Repository;
use crate::models::{push_unique, Document, Parent, Stored};

/// Maintains the reference array a parent keeps of its children.
///
/// Parent and child are written in separate steps. A failure between the
/// child insert and the parent update leaves an orphan, which `reconcile`
/// repairs from the child's back-reference.
pub struct Links<P> {
    parents: Repository<P>,
}

impl<P> Clone for Links<P> {
    fn clone(&self) -> Self {
        Self {
            parents: self.parents.clone(),
        }
    }
}

impl<P: Parent> Links<P> {
    pub fn new(parents: Repository<P>) -> Self {
        Self { parents }
    }

    /// Order assigned to the next child created under `parent`.
    pub fn next_order(parent: &P) -> i64 {
        parent.children().len() as i64 + 1
    }

    /// Append `child_id` to the parent's references unless already present.
    pub async fn attach_child(&self, parent_id: Uuid, child_id: Uuid) -> Result<Stored<P>, DatabaseError> {
        let mut parent = self.parents.select_404(parent_id).await?;
        if !push_unique(parent.children_mut(), child_id) {
            debug!("{} {} already references {}", P::LABEL, parent_id, child_id);
            return Ok(parent);
        }
        let parent = self.parents.save(&parent).await?;
        info!("Attached {} to {} {}", child_id, P::LABEL, parent_id);
        Ok(parent)
    }

    /// Remove every occurrence of `child_id`; an absent id is a no-op.
    pub async fn detach_child(&self, parent_id: Uuid, child_id: Uuid) -> Result<Stored<P>, DatabaseError> {
        let mut parent = self.parents.select_404(parent_id).await?;
        let before = parent.children().len();
        parent.children_mut().retain(|id| *id != child_id);
        if parent.children().len() == before {
            return Ok(parent);
        }
        let parent = self.parents.save(&parent).await?;
        info!("Detached {} from {} {}", child_id, P::LABEL, parent_id);
        Ok(parent)
    }

    /// Insert a child built with `order = children + 1`, then attach it.
    pub async fn create_child<C, F>(
        &self,
        parent_id: Uuid,
        children: &Repository<C>,
        build: F,
    ) -> Result<Stored<C>, DatabaseError>
    where
        C: Document,
        F: FnOnce(i64) -> C,
    {
        let parent = self.parents.select_404(parent_id).await?;
        let child = children.insert(&build(Self::next_order(&parent))).await?;
        self.attach_child(parent_id, child.id).await?;
        Ok(child)
    }

    /// Attach every child whose back-reference matches `back_reference` but
    /// is missing from the parent's array. The parent is written at most once.
    pub async fn reconcile<C: Document>(
        &self,
        parent_id: Uuid,
        children: &Repository<C>,
        back_reference: Value,
    ) -> Result<Stored<P>, DatabaseError> {
        let mut parent = self.parents.select_404(parent_id).await?;
        let referencing = children.select_where(back_reference).await?;

        let mut added = 0;
        for child in &referencing {
            if push_unique(parent.children_mut(), child.id) {
                added += 1;
            }
        }
        if added == 0 {
            debug!("{} {} is consistent with its children", P::LABEL, parent_id);
            return Ok(parent);
        }

        let parent = self.parents.save(&parent).await?;
        info!("Reconciled {} {}: attached {} orphaned children", P::LABEL, parent_id, added);
        Ok(parent)
    }
}

/// Resolve a reference array with one point lookup per id; the first missing
/// child aborts the whole batch.
pub async fn resolve_children<C: Document>(
    children: &Repository<C>,
    ids: &[Uuid],
) -> Result<Vec<Stored<C>>, DatabaseError> {
    try_join_all(ids.iter().map(|id| children.select_404(*id))).await
}
