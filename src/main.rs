// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa_swagger_ui::SwaggerUi;

// Declaración de nuestros módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa el logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() está bien acá: si la configuración falla, la app no debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Falló la inicialización del estado de la aplicación.");

    // Corre las migraciones de SQLx al arrancar
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallaron las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones de la base de datos ejecutadas con éxito!");

    // Rutas de autenticación (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rutas de usuario (protegidas por el middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let clientes_routes = Router::new()
        .route(
            "/",
            post(handlers::clientes::crear_cliente).get(handlers::clientes::listar_clientes),
        )
        .route("/{id}/pendientes", get(handlers::clientes::pendientes_cliente))
        .route("/modo-pago/reset", post(handlers::clientes::reset_modo_pago))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let casos_routes = Router::new()
        .route(
            "/",
            post(handlers::casos::crear_caso).get(handlers::casos::listar_casos),
        )
        .route(
            "/{id}",
            get(handlers::casos::obtener_caso)
                .put(handlers::casos::actualizar_caso)
                .delete(handlers::casos::eliminar_caso),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let comprobantes_routes = Router::new()
        .route(
            "/",
            post(handlers::comprobantes::crear_comprobante)
                .get(handlers::comprobantes::listar_comprobantes),
        )
        .route(
            "/{id}/aprobar",
            post(handlers::comprobantes::aprobar_comprobante),
        )
        .route(
            "/{id}/rechazar",
            post(handlers::comprobantes::rechazar_comprobante),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina todo en el router principal
    let app = Router::new()
        .route("/api/salud", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/clientes", clientes_routes)
        .nest("/api/casos", casos_routes)
        .nest("/api/comprobantes", comprobantes_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::openapi_con_seguridad()),
        )
        .with_state(app_state);

    // Inicia el servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falló el listener TCP");
    tracing::info!(
        "🚀 Servidor escuchando en {}",
        listener
            .local_addr()
            .expect("El listener debería tener dirección local")
    );
    axum::serve(listener, app).await.expect("Error en el servidor Axum");
}
