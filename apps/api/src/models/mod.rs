pub mod application;
pub mod company;
pub mod job;
pub mod matching;
pub mod message;
pub mod offer;
pub mod seeker;
pub mod user;
