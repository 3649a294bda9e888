//! # votelens-report
//!
//! The top of the Votelens pipeline: enriches decoded script calls with
//! account metadata, computes the vote tally, and assembles the final
//! `VoteReport`.

pub mod enricher;
pub mod pipeline;
pub mod tally;

pub use enricher::CallEnricher;
pub use pipeline::VoteInspector;
pub use tally::tally;
