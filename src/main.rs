use actix_files as fs;
use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};
use tera::Tera;

use portfolio_chat::config::AppConfig;
use portfolio_chat::model::Providers;
use portfolio_chat::persona;
use portfolio_chat::web::profiles::EndpointProfile;
use portfolio_chat::web::routes;
use portfolio_chat::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting portfolio chat server");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    if config.openai.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; /api/chat will fail until it is");
    }
    if config.gemini.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; Gemini-backed endpoints will fail until it is");
    }

    let cv = match persona::load_cv(config.cv_path.as_deref()) {
        Ok(cv) => cv,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    let providers = match Providers::from_config(&config) {
        Ok(providers) => providers,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize template engine
    let mut tera = match Tera::new(&format!("{}/**/*", config.templates_dir)) {
        Ok(t) => t,
        Err(e) => {
            error!("Template parsing error: {}", e);
            std::process::exit(1);
        }
    };
    tera.autoescape_on(vec![".html"]);

    let profiles = EndpointProfile::defaults(&config);
    for profile in &profiles {
        info!(
            "Serving {} at /api{} ({:?}, model {})",
            profile.name, profile.path, profile.provider, profile.model
        );
    }

    let app_state = Data::new(AppState {
        tera,
        providers,
        profiles: profiles.clone(),
        cv,
    });

    let static_dir = config.static_dir.clone();
    info!("Listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        let profiles = profiles.clone();
        App::new()
            .app_data(app_state.clone())
            .configure(move |cfg| routes::configure(cfg, &profiles))
            .service(fs::Files::new("/static", &static_dir))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
