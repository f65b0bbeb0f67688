mod in_process_dispatcher;
mod pg_conversion_queue;

pub use in_process_dispatcher::InProcessDispatcher;
pub use pg_conversion_queue::PgConversionQueue;
