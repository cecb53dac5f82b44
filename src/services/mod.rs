pub mod candidates;
pub mod filter;
pub mod links;
pub mod pool;
pub mod providers;
pub mod ranker;
pub mod recommendations;
pub mod title_search;

pub use candidates::CandidateBuilder;
pub use pool::CandidatePool;
