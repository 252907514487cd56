pub mod feedback;
pub mod racket;
