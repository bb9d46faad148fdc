pub mod dates;
pub mod rows;
pub mod detectors;
pub mod scoring;
pub mod slides;
pub mod headline;
pub mod roast;
