pub mod karaoke;
pub mod quiz;
pub mod sampler;
pub mod score;
