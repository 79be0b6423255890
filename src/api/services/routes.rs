//! 路由配置
//!
//! `/api/v1` 下按功能拆分，页面与健康检查挂在根路径。

use actix_web::web;

use super::charts::ChartService;
use super::dashboard::DashboardService;
use super::health::health_routes;
use super::metrics::MetricsService;

/// 指标路由 `/metrics`
///
/// 全部接受 `?start_date=&end_date=`
pub fn metrics_routes() -> actix_web::Scope {
    web::scope("/metrics")
        .route("/revenue", web::get().to(MetricsService::revenue))
        .route("/monthly", web::get().to(MetricsService::monthly))
        .route("/categories", web::get().to(MetricsService::categories))
        .route("/states", web::get().to(MetricsService::states))
        .route("/delivery", web::get().to(MetricsService::delivery))
        .route("/reviews", web::get().to(MetricsService::reviews))
}

/// 图表路由 `/charts/{name}`，返回 SVG
pub fn charts_routes() -> actix_web::Scope {
    web::scope("/charts").route("/{name}", web::get().to(ChartService::chart))
}

/// `/api/v1` 路由
pub fn api_v1_routes() -> actix_web::Scope {
    web::scope("/api/v1")
        .service(metrics_routes())
        .service(charts_routes())
}

/// 注册全部路由，服务器与集成测试共用
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_v1_routes())
        .service(web::scope("/health").service(health_routes()))
        .route(
            "/static/{path:.*}",
            web::get().to(DashboardService::handle_static),
        )
        .route("/", web::get().to(DashboardService::index))
        .route("/", web::head().to(DashboardService::index));
}
