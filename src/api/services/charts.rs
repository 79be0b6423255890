//! SVG chart endpoint: `GET /api/v1/charts/{name}`

use actix_web::{HttpResponse, Responder, web};
use tracing::{error, trace};

use crate::charts::{ChartKind, render_chart};
use crate::errors::Result;

use super::helpers::error_from_salesboard;
use super::state::{DashboardState, PeriodQuery};

pub struct ChartService;

impl ChartService {
    pub async fn chart(
        state: web::Data<DashboardState>,
        name: web::Path<String>,
        query: web::Query<PeriodQuery>,
    ) -> impl Responder {
        trace!("GET /api/v1/charts/{} {:?}", name, query);

        match Self::render(&state, &name, &query) {
            Ok(svg) => HttpResponse::Ok()
                .content_type("image/svg+xml")
                .append_header(("Cache-Control", "no-cache"))
                .body(svg),
            Err(e) => {
                if e.http_status().is_server_error() {
                    error!("Chart '{}' failed: {}", name, e);
                }
                error_from_salesboard(&e)
            }
        }
    }

    fn render(state: &DashboardState, name: &str, query: &PeriodQuery) -> Result<String> {
        let kind = ChartKind::parse(name)?;
        let (_, report) = state.report(query)?;
        render_chart(
            kind,
            &report.chart_data(state.top_categories),
            state.chart_size,
        )
    }
}
