//! Budget engine: the record store for income/expense transactions and their
//! category taxonomy, plus the period and summary queries built on top of it.
//!
//! The entry point is [`Engine`], built through [`Engine::builder`]. The pure
//! query functions ([`query_transactions`], [`summarize`], [`available_dates`],
//! [`latest`]) are exported too, so they can be run over any snapshot.

pub use categories::Categories;
pub use error::EngineError;
pub use money::Amount;
pub use ops::{Engine, EngineBuilder};
pub use period::{AvailableDates, Period, PeriodFilter, available_dates, local_year_month};
pub use query::{Summary, latest, query_transactions, summarize};
pub use records::Records;
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use transactions::{NewTransaction, Transaction, TransactionKind};

pub use chrono_tz::Tz;

mod categories;
mod error;
mod money;
mod ops;
mod period;
mod query;
mod records;
mod storage;
mod transactions;

pub type ResultEngine<T> = Result<T, EngineError>;
