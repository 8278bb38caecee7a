//! Category management and the referential rules tying categories to
//! transactions:
//!
//! - a category referenced by a transaction of its kind cannot be deleted;
//! - a rename rewrites every transaction of that kind carrying the old name,
//!   in the same commit as the list update.

use crate::{
    EngineError, Records, ResultEngine, TransactionKind, categories::normalize_category_name,
};

use super::Engine;

/// Whether any transaction of `kind` is tagged `name`, checked on the given (live) records.
fn in_use(records: &Records, kind: TransactionKind, name: &str) -> bool {
    records
        .transactions
        .iter()
        .any(|tx| tx.kind == kind && tx.category == name)
}

impl Engine {
    pub fn category_in_use(&self, kind: TransactionKind, name: &str) -> bool {
        in_use(&self.records, kind, name)
    }

    /// Append `name` to the `kind` list.
    pub fn add_category(&mut self, kind: TransactionKind, name: &str) -> ResultEngine<()> {
        let name = normalize_category_name(name)?;
        if self.records.categories.contains(kind, &name) {
            return Err(EngineError::Duplicate(name));
        }

        self.commit(|records| {
            records.categories.list_mut(kind).push(name.clone());
            Ok(())
        })?;
        tracing::info!("added {kind} category \"{name}\"");
        Ok(())
    }

    /// Rename a category in place and retag its transactions.
    ///
    /// Renaming a category to its current name is a no-op.
    pub fn rename_category(
        &mut self,
        kind: TransactionKind,
        old_name: &str,
        new_name: &str,
    ) -> ResultEngine<()> {
        let old_name = normalize_category_name(old_name)?;
        let new_name = normalize_category_name(new_name)?;

        let Some(index) = self.records.categories.position(kind, &old_name) else {
            return Err(EngineError::NotFound(old_name));
        };
        if old_name == new_name {
            return Ok(());
        }
        if self.records.categories.contains(kind, &new_name) {
            return Err(EngineError::Duplicate(new_name));
        }

        let retagged = self.commit(|records| {
            records.categories.list_mut(kind)[index] = new_name.clone();
            let mut retagged = 0usize;
            for tx in records
                .transactions
                .iter_mut()
                .filter(|tx| tx.kind == kind && tx.category == old_name)
            {
                tx.category = new_name.clone();
                retagged += 1;
            }
            Ok(retagged)
        })?;

        tracing::info!(
            "renamed {kind} category \"{old_name}\" to \"{new_name}\" ({retagged} transactions updated)"
        );
        Ok(())
    }

    /// Remove a category that no transaction of its kind references.
    pub fn delete_category(&mut self, kind: TransactionKind, name: &str) -> ResultEngine<()> {
        let name = normalize_category_name(name)?;

        if in_use(&self.records, kind, &name) {
            tracing::debug!("refusing to delete {kind} category \"{name}\": in use");
            return Err(EngineError::InUse(name));
        }
        let Some(index) = self.records.categories.position(kind, &name) else {
            return Err(EngineError::NotFound(name));
        };

        self.commit(|records| {
            records.categories.list_mut(kind).remove(index);
            Ok(())
        })?;
        tracing::info!("deleted {kind} category \"{name}\"");
        Ok(())
    }
}
