/// Получение и формирование записей

pub mod dataset;
pub mod fetcher;
pub mod shaper;

pub use dataset::Dataset;
pub use fetcher::{HttpRecordFetcher, RecordSource, StaticRecords, DEFAULT_ENDPOINT};
pub use shaper::RecordShaper;
