//! Response Table Adapters
//!
//! Implementations of the `ResponseTableReader` and `ResponseTableWriter` ports.
//!
//! - **CsvResponseTable** - Reads and writes CSV survey exports
//! - **InMemoryResponseTable** - Holds tables in memory (testing/embedding)

mod csv_response_table;
mod in_memory_response_table;

pub use csv_response_table::{CsvOptions, CsvResponseTable};
pub use in_memory_response_table::InMemoryResponseTable;
