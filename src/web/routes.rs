use actix_web::web;

use crate::web::handlers;
use crate::web::profiles::EndpointProfile;

pub fn configure(cfg: &mut web::ServiceConfig, profiles: &[EndpointProfile]) {
    let mut api = web::scope("/api");
    for profile in profiles {
        api = api.service(
            web::resource(profile.path)
                .app_data(web::Data::new(profile.clone()))
                .route(web::post().to(handlers::chat))
                .default_service(web::to(handlers::method_not_allowed)),
        );
    }

    cfg.service(api)
        .route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health_check));
}
