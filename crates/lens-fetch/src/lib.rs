//! # lens-fetch
//!
//! Record sources and dataset loading for Marketlens.
//!
//! - [`RecordSource`]: the seam between derivation and transport, with an
//!   HTTP implementation over the analytics API ([`HttpSource`]) and a local
//!   JSON file reader ([`FileSource`])
//! - [`LiveDataset`]: last-issued-wins replacement of the working
//!   [`lens_core::RecordSet`], broadcast over a `watch` channel

mod error;
mod http;
pub mod live;
pub mod source;

pub use error::FetchError;
pub use http::parse_records;
pub use live::{LiveDataset, Outcome, RequestSequencer, RequestToken};
pub use source::{
    CredentialProvider, EnvToken, FileSource, HttpOptions, HttpSource, Query, RecordSource,
    StaticToken,
};
