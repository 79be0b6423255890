//! JSON metric endpoints under `/api/v1/metrics`.

use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::trace;

use crate::analytics::{
    CategoryRevenue, DeliveryMetrics, MonthlyRevenue, ReviewScoreShare, RevenueMetrics,
    StateMetrics,
};
use crate::data::ReportPeriod;
use crate::services::Report;

use super::helpers::api_result;
use super::state::{DashboardState, PeriodQuery};

/// Metric payload tagged with the period it was computed for
#[derive(Debug, Serialize)]
pub struct MetricsPayload<T> {
    pub period: ReportPeriod,
    pub metrics: T,
}

#[derive(Debug, Serialize)]
pub struct MonthlyMetrics {
    pub current: Vec<MonthlyRevenue>,
    pub comparison: Vec<MonthlyRevenue>,
    pub average_mom_growth: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct DeliveryComparison {
    pub current: DeliveryMetrics,
    pub comparison: DeliveryMetrics,
    pub delivery_days_trend: Option<f64>,
    pub review_score_trend: Option<f64>,
}

pub struct MetricsService;

impl MetricsService {
    fn respond<T, F>(state: &DashboardState, query: &PeriodQuery, pick: F) -> HttpResponse
    where
        T: Serialize,
        F: FnOnce(Report) -> T,
    {
        api_result(state.report(query).map(|(period, report)| MetricsPayload {
            period,
            metrics: pick(report),
        }))
    }

    pub async fn revenue(
        state: web::Data<DashboardState>,
        query: web::Query<PeriodQuery>,
    ) -> impl Responder {
        trace!("GET /api/v1/metrics/revenue {:?}", query);
        Self::respond(&state, &query, |r| -> RevenueMetrics { r.revenue })
    }

    pub async fn monthly(
        state: web::Data<DashboardState>,
        query: web::Query<PeriodQuery>,
    ) -> impl Responder {
        trace!("GET /api/v1/metrics/monthly {:?}", query);
        Self::respond(&state, &query, |r| MonthlyMetrics {
            average_mom_growth: r.average_mom_growth(),
            current: r.monthly_current,
            comparison: r.monthly_comparison,
        })
    }

    pub async fn categories(
        state: web::Data<DashboardState>,
        query: web::Query<PeriodQuery>,
    ) -> impl Responder {
        trace!("GET /api/v1/metrics/categories {:?}", query);
        Self::respond(&state, &query, |r| -> Vec<CategoryRevenue> { r.categories })
    }

    pub async fn states(
        state: web::Data<DashboardState>,
        query: web::Query<PeriodQuery>,
    ) -> impl Responder {
        trace!("GET /api/v1/metrics/states {:?}", query);
        Self::respond(&state, &query, |r| -> Vec<StateMetrics> { r.states })
    }

    pub async fn delivery(
        state: web::Data<DashboardState>,
        query: web::Query<PeriodQuery>,
    ) -> impl Responder {
        trace!("GET /api/v1/metrics/delivery {:?}", query);
        Self::respond(&state, &query, |r| DeliveryComparison {
            delivery_days_trend: r.delivery_days_trend(),
            review_score_trend: r.review_score_trend(),
            current: r.delivery,
            comparison: r.delivery_comparison,
        })
    }

    pub async fn reviews(
        state: web::Data<DashboardState>,
        query: web::Query<PeriodQuery>,
    ) -> impl Responder {
        trace!("GET /api/v1/metrics/reviews {:?}", query);
        Self::respond(&state, &query, |r| -> Vec<ReviewScoreShare> { r.reviews })
    }
}
