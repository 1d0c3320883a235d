//! 请求日志中间件
//!
//! 记录所有进入的 HTTP 请求，以及处理器返回的错误详情

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;
use std::time::Instant;
use tracing::{Instrument, error, info, info_span, warn};

/// 请求日志中间件
///
/// 每个请求在 `request` span 内执行 (request_id / method / path)，
/// 服务层日志因此带有请求上下文。结束时记录：
/// - 响应状态码与延迟 (毫秒)
/// - 错误响应附带的 [`AppError`] (业务错误 warn，系统错误 error)
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    // 从请求头获取 Request ID，如果不存在则生成一个
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let span = info_span!("request", request_id = %request_id, method = %method, path = %path);
    let response = next.run(req).instrument(span.clone()).await;
    let _guard = span.enter();

    let latency = start.elapsed();
    let status = response.status();

    match response.extensions().get::<AppError>() {
        Some(fault) if fault.is_system() => error!(
            uri = %uri,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            code = %fault.code,
            fault = %fault.message,
            details = ?fault.details,
            "Request failed with system error"
        ),
        Some(fault) => warn!(
            uri = %uri,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            code = %fault.code,
            fault = %fault.message,
            "Request rejected by business rule"
        ),
        None if status.is_client_error() || status.is_server_error() => warn!(
            uri = %uri,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request completed with error"
        ),
        None => info!(
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request completed successfully"
        ),
    }

    response
}
