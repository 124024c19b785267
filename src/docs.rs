// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Clientes ---
        handlers::clientes::crear_cliente,
        handlers::clientes::listar_clientes,
        handlers::clientes::pendientes_cliente,
        handlers::clientes::reset_modo_pago,

        // --- Casos ---
        handlers::casos::crear_caso,
        handlers::casos::listar_casos,
        handlers::casos::obtener_caso,
        handlers::casos::actualizar_caso,
        handlers::casos::eliminar_caso,

        // --- Comprobantes ---
        handlers::comprobantes::crear_comprobante,
        handlers::comprobantes::listar_comprobantes,
        handlers::comprobantes::aprobar_comprobante,
        handlers::comprobantes::rechazar_comprobante,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Clientes ---
            models::clientes::TipoCliente,
            models::clientes::Cliente,
            models::clientes::CrearClientePayload,
            models::clientes::ResetModoPagoResponse,

            // --- Casos ---
            models::casos::EstadoCaso,
            models::casos::Caso,
            models::casos::CrearCasoPayload,
            models::casos::ActualizarCasoPayload,

            // --- Comprobantes ---
            models::pagos::EstadoComprobante,
            models::pagos::Comprobante,
            models::pagos::ResumenPendientes,
            models::pagos::CrearComprobantePayload,
            models::pagos::RevisarComprobantePayload,
            models::pagos::RevisionComprobante,
            models::pagos::RangoMes,
            models::pagos::PendientesCliente,
        )
    ),
    tags(
        (name = "Auth", description = "Registro, login y sesión"),
        (name = "Clientes", description = "Clientes del estudio y su modo pago"),
        (name = "Casos", description = "Casos legales"),
        (name = "Comprobantes", description = "Comprobantes de pago y su revisión")
    )
)]
pub struct ApiDoc;

// Agrega el esquema de seguridad Bearer-JWT al documento
pub fn openapi_con_seguridad() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if let Some(components) = doc.components.as_mut() {
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
    doc
}
