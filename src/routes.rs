use crate::{
    api::{attendance, employee, statistics},
    error::AppError,
};
use actix_cors::Cors;
use actix_web::web;

/// `None` lets any origin in; otherwise only exact matches of the listed origins.
pub fn cors(allowed_origins: Option<Vec<String>>) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    match allowed_origins {
        None => cors.allow_any_origin(),
        Some(origins) => cors.supports_credentials().allowed_origin_fn(move |origin, _req| {
            origins.iter().any(|allowed| allowed.as_bytes() == origin.as_bytes())
        }),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    // Malformed bodies, queries and path segments are validation errors (422)
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    );

    cfg.service(
        web::scope(api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::create_attendance))
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    // /attendance/employee/{employee_id}
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(attendance::employee_attendance)),
                    )
                    // /attendance/date/{date}
                    .service(
                        web::resource("/date/{date}")
                            .route(web::get().to(attendance::attendance_on_date)),
                    )
                    // /attendance/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(attendance::update_attendance))
                            .route(web::delete().to(attendance::delete_attendance)),
                    ),
            )
            .service(
                web::scope("/statistics")
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(statistics::employee_statistics)),
                    )
                    .service(
                        web::resource("/dashboard")
                            .route(web::get().to(statistics::dashboard_statistics)),
                    ),
            ),
    );
}
