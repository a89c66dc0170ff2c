// Domain layer: doctor records, the filter pipeline, the search bar and the ports
// the adapters implement. No I/O here.

pub mod autocomplete;
pub mod filter;
pub mod model;
pub mod ports;
