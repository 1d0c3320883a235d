//! HTTP 服务器中间件与提取器

pub mod extractor;
pub mod middleware;
