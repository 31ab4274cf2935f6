//! Durable storage for manually created and edited sailings.
//!
//! The engine only needs four calls from a store. Generated sailings never
//! reach the store until an operator saves one, at which point it is created
//! as a new persisted sailing sharing the generated departure window.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::entry::ScheduleEntry;
use crate::error::ScheduleResult;

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Every stored sailing, in store order. Callers pick out the month they need.
    async fn list(&self) -> ScheduleResult<Vec<ScheduleEntry>>;

    /// Store a new sailing. The returned entry carries the store-assigned id.
    async fn create(&self, entry: &ScheduleEntry) -> ScheduleResult<ScheduleEntry>;

    /// Replace the sailing stored under `id`.
    async fn update(&self, id: &str, entry: &ScheduleEntry) -> ScheduleResult<ScheduleEntry>;

    /// Remove the sailing stored under `id`. Returns false if there was none.
    async fn delete(&self, id: &str) -> ScheduleResult<bool>;
}
