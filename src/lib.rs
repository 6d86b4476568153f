pub mod config;
pub mod fetch;
pub mod geojson;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod reference;
pub mod source;
pub mod stats;
pub mod summary;
