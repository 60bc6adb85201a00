pub mod account;
pub mod achievements;
pub mod chat;
pub mod profile;
pub mod progress;
pub mod roadmap;
pub mod submissions;
pub mod topic_content;
