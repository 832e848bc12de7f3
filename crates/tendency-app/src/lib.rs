// Library root for the tendgen application: configuration, stat source
// assembly, roster caching, generation and export around `tendency-core`.

pub mod config;
pub mod export;
pub mod generate;
pub mod roster;
pub mod sources;
