use crate::{Amount, EngineError, NewTransaction, ResultEngine, Transaction};

use super::Engine;

impl Engine {
    /// Record a new transaction and return it with its assigned id.
    ///
    /// The category is not checked against the taxonomy; only emptiness is rejected.
    pub fn add_transaction(&mut self, new: NewTransaction) -> ResultEngine<Transaction> {
        let category = new.validate()?;
        self.ensure_total_fits(&new)?;

        let tx = self.commit(|records| {
            let tx = new.into_transaction(records.next_id, category);
            records.next_id += 1;
            records.transactions.push(tx.clone());
            Ok(tx)
        })?;

        tracing::info!(
            "added {} transaction {}: {} in category {} on {}",
            tx.kind,
            tx.id,
            tx.amount,
            tx.category,
            tx.date
        );
        Ok(tx)
    }

    /// Reject a transaction that would push the total of its kind past `i64`.
    fn ensure_total_fits(&self, new: &NewTransaction) -> ResultEngine<()> {
        let total = self
            .records
            .transactions
            .iter()
            .filter(|tx| tx.kind == new.kind)
            .try_fold(new.amount, |acc: Amount, tx| acc.checked_add(tx.amount));
        if total.is_none() {
            tracing::warn!("rejected {} transaction: total would overflow", new.kind);
            return Err(EngineError::Validation(format!(
                "{} total would overflow",
                new.kind
            )));
        }
        Ok(())
    }

    /// Delete the transaction with `id`. Returns `false` when there was nothing to delete.
    pub fn delete_transaction(&mut self, id: u64) -> ResultEngine<bool> {
        if self.transaction(id).is_none() {
            tracing::debug!("delete of transaction {id} ignored: not found");
            return Ok(false);
        }

        self.commit(|records| {
            records.transactions.retain(|tx| tx.id != id);
            Ok(())
        })?;
        tracing::info!("deleted transaction {id}");
        Ok(true)
    }
}
