//! Mail module - Redis-backed mail queue
//!
//! The services enqueue mail jobs; a separate delivery worker drains the
//! queue and talks SMTP.

pub mod redis_queue;

pub use redis_queue::RedisMailQueue;
