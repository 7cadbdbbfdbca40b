pub mod balloon_loan;

pub use balloon_loan::*;
