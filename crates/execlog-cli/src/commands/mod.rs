pub mod config;
pub mod demo;
pub mod mask;
pub mod patterns;
pub mod serve;
