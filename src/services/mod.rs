pub mod explanation;
pub mod interactions;
pub mod recommendations;
pub mod recommender;
pub mod similarity;
