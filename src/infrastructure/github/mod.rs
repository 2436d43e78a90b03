pub mod client;

pub use client::GithubSearchClient;
