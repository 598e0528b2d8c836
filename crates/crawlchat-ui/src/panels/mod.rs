pub mod chat;
pub mod crawl;
pub mod notices;
pub mod results;
pub mod settings;
