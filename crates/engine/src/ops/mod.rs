use chrono_tz::Tz;

use crate::{
    AvailableDates, Categories, MemoryStorage, Period, PeriodFilter, Records, ResultEngine,
    Storage, Summary, Transaction, available_dates, latest, query_transactions, summarize,
};

mod categories;
mod transactions;

/// The record store. Owns the live [`Records`] and the backend they persist to.
///
/// Mutations go through [`Engine::commit`], so a failed save leaves the live
/// state untouched. Queries are recomputed from the live state on every call.
pub struct Engine {
    records: Records,
    storage: Box<dyn Storage>,
    timezone: Tz,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("transactions", &self.records.transactions.len())
            .field("next_id", &self.records.next_id)
            .field("timezone", &self.timezone)
            .finish()
    }
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Apply `change` to a copy of the records, persist the copy, then adopt it.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Records) -> ResultEngine<T>,
    ) -> ResultEngine<T> {
        let mut next = self.records.clone();
        let value = change(&mut next)?;
        if let Err(err) = self.storage.save(&next) {
            tracing::error!("failed to persist records: {err}");
            return Err(err);
        }
        self.records = next;
        Ok(value)
    }

    /// Time zone used to place transactions on the calendar.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn categories(&self) -> &Categories {
        &self.records.categories
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.records.transactions.iter().find(|tx| tx.id == id)
    }

    /// Transactions inside `period` (all of them when `None`), in insertion order.
    pub fn transactions(&self, period: Option<Period>) -> Vec<Transaction> {
        query_transactions(&self.records.transactions, period, self.timezone)
    }

    /// Transactions picked by a query-string filter, in insertion order.
    pub fn select(&self, filter: PeriodFilter) -> Vec<Transaction> {
        match filter {
            PeriodFilter::Nothing => Vec::new(),
            PeriodFilter::All => self.transactions(None),
            PeriodFilter::Within(period) => self.transactions(Some(period)),
        }
    }

    /// Up to `limit` transactions inside `period`, newest first.
    pub fn latest_transactions(&self, period: Option<Period>, limit: usize) -> Vec<Transaction> {
        latest(self.transactions(period), limit)
    }

    pub fn available_dates(&self) -> AvailableDates {
        available_dates(&self.records.transactions, self.timezone)
    }

    pub fn summary(&self, period: Option<Period>) -> Summary {
        summarize(&self.transactions(period))
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    storage: Box<dyn Storage>,
    timezone: Tz,
    seed_demo: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            storage: Box::new(MemoryStorage::new()),
            timezone: Tz::UTC,
            seed_demo: false,
        }
    }
}

impl EngineBuilder {
    /// Pass the storage backend (in-memory by default).
    pub fn storage(mut self, storage: impl Storage + 'static) -> EngineBuilder {
        self.storage = Box::new(storage);
        self
    }

    /// Calendar used for year/month bucketing (UTC by default).
    pub fn timezone(mut self, timezone: Tz) -> EngineBuilder {
        self.timezone = timezone;
        self
    }

    /// Fill an empty store with demo transactions instead of just the default categories.
    pub fn seed_demo(mut self, seed_demo: bool) -> EngineBuilder {
        self.seed_demo = seed_demo;
        self
    }

    /// Construct `Engine`, initializing the backend when it holds no document yet.
    pub fn build(self) -> ResultEngine<Engine> {
        let records = match self.storage.load()? {
            Some(mut records) => {
                tracing::info!(
                    "loaded {} transactions from storage",
                    records.transactions.len()
                );
                let max_id = records.transactions.iter().map(|tx| tx.id).max().unwrap_or(0);
                if records.next_id <= max_id {
                    tracing::warn!(
                        "stored nextId {} is not above highest id {max_id}, bumping it",
                        records.next_id
                    );
                    records.next_id = max_id + 1;
                }
                records
            }
            None => {
                tracing::info!("initializing storage with default data");
                let records = if self.seed_demo {
                    Records::demo(self.timezone)
                } else {
                    Records::default()
                };
                self.storage.save(&records)?;
                records
            }
        };

        Ok(Engine {
            records,
            storage: self.storage,
            timezone: self.timezone,
        })
    }
}
