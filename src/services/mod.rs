pub mod digest;
pub mod export;
pub mod listing;
pub mod profile;
pub mod stats;
pub mod transitions;
pub mod upstream;
pub mod watermark;
pub mod workflow;
