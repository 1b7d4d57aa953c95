use actix_web::{middleware, web, App, HttpResponse, HttpServer};

use crate::calculator::{self, AttendanceInput, AttendanceOutcome, Standing};
use crate::chart::BarChart;
use crate::config::{AppConfig, FormDefaults};
use crate::error::ApiError;
use crate::homepage;
use crate::model::{CalculateRequest, CalculationReport};

fn evaluate(req: CalculateRequest) -> Result<AttendanceOutcome, ApiError> {
    let input = AttendanceInput::from(req);
    calculator::evaluate(&input).map_err(|errors| {
        log::debug!("Rejected {:?}: {}", input, errors.join(" "));
        ApiError::Validation(errors)
    })
}

// Calculation endpoint
async fn calculate(req: web::Json<CalculateRequest>) -> Result<HttpResponse, ApiError> {
    let outcome = evaluate(req.into_inner())?;
    let report = CalculationReport::from_outcome(&outcome);
    log::debug!(
        "{} at {:.2}% against {:.2}%",
        report.status,
        report.current_percent,
        report.target
    );

    Ok(HttpResponse::Ok().json(report))
}

// Chart image for the same inputs the form posts
async fn chart_svg(query: web::Query<CalculateRequest>) -> Result<HttpResponse, ApiError> {
    let outcome = evaluate(query.into_inner())?;
    if outcome.standing == Standing::Unreachable {
        return Err(ApiError::Unreachable);
    }

    let chart = BarChart::attendance_vs_target(outcome.current_percent, outcome.target);
    Ok(HttpResponse::Ok()
        .content_type("image/svg+xml")
        .body(chart.render_svg()))
}

// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("Attendance Calculator is running!")
}

// Homepage endpoint
async fn serve_homepage(defaults: web::Data<FormDefaults>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(homepage::render(&defaults))
}

/// Routes and extractor settings; the caller supplies `web::Data<FormDefaults>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadPayload(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadPayload(err.to_string()).into()),
    )
    .route("/", web::get().to(serve_homepage))
    .route("/calculate", web::post().to(calculate))
    .route("/chart.svg", web::get().to(chart_svg))
    .route("/health", web::get().to(health_check));
}

pub async fn start_api(config: AppConfig) -> std::io::Result<()> {
    let defaults = web::Data::new(config.form.clone());

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(defaults.clone())
            .configure(configure)
    });
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server
        .bind((config.server.host.as_str(), config.server.port))?
        .run()
        .await
}
