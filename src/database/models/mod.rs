pub mod tweet;
pub mod user;

pub use tweet::{NewTweet, Tweet, UserTweets};
pub use user::{NewUser, User};
