use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use groupsplit::routes::{configure, AppState};
use groupsplit::settings::Settings;
use groupsplit::SplitError;

#[actix_web::main]
async fn main() -> Result<(), SplitError> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "groupsplit={level},actix_web={level}",
            level = settings.app.level
        ))
        .init();

    let state = web::Data::new(AppState {
        secret: settings.auth.secret,
        options: settings.balance,
    });

    let bind = settings.server.bind;
    let port = settings.server.port;
    tracing::info!("Server listening on {}:{}", bind, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
