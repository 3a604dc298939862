pub mod tweet_service;
pub mod user_service;

pub use tweet_service::TweetService;
pub use user_service::{LoginInput, LoginOutcome, RegisterInput, TokenPair, UserService};
