//! 分发
//!
//! 统一记录操作耗时与结果。业务错误记为 warn，基础设施错误记为 error。

use std::time::Instant;

use authgate_errors::{AppError, AppResult};
use tracing::{Instrument, debug, error, info_span, warn};

use crate::{Command, CommandHandler, Query, QueryHandler};

/// 执行命令
pub async fn dispatch_command<C, H>(handler: &H, command: C) -> AppResult<C::Result>
where
    C: Command,
    H: CommandHandler<C> + ?Sized,
{
    let started = Instant::now();
    let result = handler
        .handle(command)
        .instrument(info_span!("command", name = C::NAME))
        .await;
    log_outcome(C::NAME, started, result.as_ref().err());
    result
}

/// 执行查询
pub async fn dispatch_query<Q, H>(handler: &H, query: Q) -> AppResult<Q::Result>
where
    Q: Query,
    H: QueryHandler<Q> + ?Sized,
{
    let started = Instant::now();
    let result = handler
        .handle(query)
        .instrument(info_span!("query", name = Q::NAME))
        .await;
    log_outcome(Q::NAME, started, result.as_ref().err());
    result
}

fn log_outcome(name: &str, started: Instant, err: Option<&AppError>) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match err {
        None => debug!(operation = name, elapsed_ms, "Operation succeeded"),
        Some(e) if e.is_retryable() => {
            error!(operation = name, elapsed_ms, error = %e, "Operation failed")
        }
        Some(e) => warn!(operation = name, elapsed_ms, error = %e, "Operation rejected"),
    }
}
