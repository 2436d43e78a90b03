pub mod favorites;
pub mod github;
