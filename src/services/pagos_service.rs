// src/services/pagos_service.rs

use std::str::FromStr;

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        fechas::{self, MesFacturacion},
    },
    db::{ClientesRepository, ComprobantesRepository, FinanzasRepository},
    models::pagos::{
        Comprobante, EstadoComprobante, PendientesCliente, RangoMes, ResumenPendientes,
        RevisionComprobante,
    },
};

/// Decide si la aprobación de un comprobante debe apagar el modo pago del
/// cliente. Función pura: el llamador arma el resumen de pendientes recortado
/// al MES ACTIVO (no al mes del comprobante) antes de llamar.
pub fn debe_desactivar_modo_pago(
    mes_comprobante: MesFacturacion,
    mes_activo: Option<MesFacturacion>,
    pendientes: &ResumenPendientes,
) -> bool {
    // Sin mes activo (cliente sin historial de reportes) no hay contra qué
    // razonar: conservamos el estado actual.
    let Some(mes_activo) = mes_activo else {
        return false;
    };

    // Pago adelantado: el comprobante cubre un mes futuro respecto del ciclo
    // en curso. Se da por saldado sin consultar pendientes. Caso raro.
    if mes_comprobante > mes_activo {
        return true;
    }

    // Comprobante del mes activo o de un mes viejo: el modo pago solo se
    // apaga si el mes activo quedó sin registros pendientes. Un cliente puede
    // saldar un mes viejo y seguir debiendo el ciclo en curso.
    !pendientes.tiene_datos()
}

#[derive(Clone)]
pub struct PagosService {
    comprobantes_repo: ComprobantesRepository,
    finanzas_repo: FinanzasRepository,
    clientes_repo: ClientesRepository,
    pool: sqlx::PgPool,
}

impl PagosService {
    pub fn new(
        comprobantes_repo: ComprobantesRepository,
        finanzas_repo: FinanzasRepository,
        clientes_repo: ClientesRepository,
        pool: sqlx::PgPool,
    ) -> Self {
        Self {
            comprobantes_repo,
            finanzas_repo,
            clientes_repo,
            pool,
        }
    }

    /// Aprueba un comprobante pendiente y, si corresponde, apaga el modo pago
    /// del cliente. Todo dentro de UNA transacción: el snapshot de pendientes
    /// y el update del flag no pueden ver estados distintos de la base.
    pub async fn aprobar_comprobante(
        &self,
        comprobante_id: Uuid,
        nota: Option<&str>,
    ) -> Result<RevisionComprobante, AppError> {
        let mut tx = self.pool.begin().await?;

        let comprobante = self
            .comprobantes_repo
            .find_by_id_for_update(&mut *tx, comprobante_id)
            .await?
            .ok_or(AppError::ComprobanteNoEncontrado)?;

        if comprobante.estado != EstadoComprobante::Pendiente {
            return Err(AppError::ComprobanteYaRevisado);
        }

        let mes_comprobante = MesFacturacion::from_str(&comprobante.mes)
            .map_err(|_| AppError::MesInvalido(comprobante.mes.clone()))?;

        // 1. Mes activo: el mes anterior a la fecha del último reporte
        let fecha_reporte = self
            .finanzas_repo
            .fecha_ultimo_reporte(&mut *tx, comprobante.cliente_id)
            .await?
            .map(|fecha| fecha.to_string());
        let mes_activo = fechas::mes_activo(fecha_reporte.as_deref());

        // 2. Snapshot de pendientes, recortado al mes activo. El comprobante
        //    en revisión se excluye del conteo (sigue PENDIENTE hasta el update).
        let pendientes = match mes_activo {
            Some(mes) => {
                self.finanzas_repo
                    .contar_pendientes(
                        &mut *tx,
                        comprobante.cliente_id,
                        &mes.to_string(),
                        Some(comprobante.id),
                    )
                    .await?
            }
            None => ResumenPendientes::default(),
        };

        // 3. La decisión en sí
        let desactivar = debe_desactivar_modo_pago(mes_comprobante, mes_activo, &pendientes);

        // 4. Persistir
        let comprobante = self
            .comprobantes_repo
            .marcar_revisado(
                &mut *tx,
                comprobante_id,
                EstadoComprobante::Aprobado,
                nota,
            )
            .await?;

        if desactivar {
            self.clientes_repo
                .set_modo_pago(&mut *tx, comprobante.cliente_id, false)
                .await?;
            tracing::info!(
                "🔕 Modo pago desactivado para el cliente {}",
                comprobante.cliente_id
            );
        }

        tx.commit().await?;

        let mes_activo = mes_activo.map(|mes| mes.to_string());
        let es_mes_anterior = mes_activo
            .as_deref()
            .is_some_and(|activo| fechas::es_mes_anterior(&comprobante.mes, activo));

        Ok(RevisionComprobante {
            comprobante,
            mes_activo,
            es_mes_anterior,
            modo_pago_desactivado: desactivar,
        })
    }


    /// Rechaza un comprobante pendiente. No toca el modo pago del cliente.
    pub async fn rechazar_comprobante(
        &self,
        comprobante_id: Uuid,
        nota: Option<&str>,
    ) -> Result<Comprobante, AppError> {
        let mut tx = self.pool.begin().await?;

        let comprobante = self
            .comprobantes_repo
            .find_by_id_for_update(&mut *tx, comprobante_id)
            .await?
            .ok_or(AppError::ComprobanteNoEncontrado)?;

        if comprobante.estado != EstadoComprobante::Pendiente {
            return Err(AppError::ComprobanteYaRevisado);
        }

        let comprobante = self
            .comprobantes_repo
            .marcar_revisado(
                &mut *tx,
                comprobante_id,
                EstadoComprobante::Rechazado,
                nota,
            )
            .await?;

        tx.commit().await?;

        Ok(comprobante)
    }

    /// Estado de deuda del cliente en su mes activo: el mismo snapshot que
    /// usa la aprobación, expuesto como consulta.
    pub async fn resumen_pendientes(
        &self,
        cliente_id: Uuid,
    ) -> Result<PendientesCliente, AppError> {
        let cliente = self
            .clientes_repo
            .find_by_id(cliente_id)
            .await?
            .ok_or(AppError::ClienteNoEncontrado)?;

        let fecha_reporte = self
            .finanzas_repo
            .fecha_ultimo_reporte(&self.pool, cliente.id)
            .await?
            .map(|fecha| fecha.to_string());

        match fechas::mes_activo(fecha_reporte.as_deref()) {
            Some(mes) => {
                let (inicio, fin) = mes.rango_fechas();
                let mut conn = self.pool.acquire().await?;
                let pendientes = self
                    .finanzas_repo
                    .contar_pendientes(&mut conn, cliente.id, &mes.to_string(), None)
                    .await?;
                let tiene_datos = pendientes.tiene_datos();

                Ok(PendientesCliente {
                    mes_activo: Some(mes.to_string()),
                    rango: Some(RangoMes { inicio, fin }),
                    pendientes,
                    tiene_datos,
                })
            }
            // Cliente sin reportes: no hay mes de referencia ni pendientes
            None => Ok(PendientesCliente {
                mes_activo: None,
                rango: None,
                pendientes: ResumenPendientes::default(),
                tiene_datos: false,
            }),
        }
    }

    /// Reset administrativo: apaga el modo pago de todos los clientes.
    pub async fn reset_modo_pago(&self) -> Result<u64, AppError> {
        let actualizados = self.clientes_repo.reset_modo_pago().await?;
        tracing::info!("🧹 Reset masivo de modo pago: {} clientes", actualizados);
        Ok(actualizados)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mes(s: &str) -> MesFacturacion {
        MesFacturacion::from_str(s).expect("mes de prueba válido")
    }

    fn sin_pendientes() -> ResumenPendientes {
        ResumenPendientes::default()
    }

    fn con_pendientes() -> ResumenPendientes {
        ResumenPendientes {
            trabajos_hora: 2,
            ..ResumenPendientes::default()
        }
    }

    #[test]
    fn sin_mes_activo_nunca_desactiva() {
        assert!(!debe_desactivar_modo_pago(
            mes("2026-01"),
            None,
            &sin_pendientes()
        ));
        assert!(!debe_desactivar_modo_pago(
            mes("2026-01"),
            None,
            &con_pendientes()
        ));
    }

    #[test]
    fn pago_adelantado_desactiva_sin_mirar_pendientes() {
        assert!(debe_desactivar_modo_pago(
            mes("2026-02"),
            Some(mes("2026-01")),
            &sin_pendientes()
        ));
        // Incluso con deuda en el mes activo: el pago adelantado manda
        assert!(debe_desactivar_modo_pago(
            mes("2026-02"),
            Some(mes("2026-01")),
            &con_pendientes()
        ));
    }

    #[test]
    fn mes_viejo_saldado_con_deuda_vigente_no_desactiva() {
        assert!(!debe_desactivar_modo_pago(
            mes("2025-12"),
            Some(mes("2026-01")),
            &con_pendientes()
        ));
    }

    #[test]
    fn mes_viejo_saldado_sin_deuda_vigente_desactiva() {
        assert!(debe_desactivar_modo_pago(
            mes("2025-12"),
            Some(mes("2026-01")),
            &sin_pendientes()
        ));
    }

    #[test]
    fn mes_activo_exacto_depende_de_los_pendientes() {
        assert!(debe_desactivar_modo_pago(
            mes("2026-01"),
            Some(mes("2026-01")),
            &sin_pendientes()
        ));
        assert!(!debe_desactivar_modo_pago(
            mes("2026-01"),
            Some(mes("2026-01")),
            &con_pendientes()
        ));
    }

    #[test]
    fn cualquier_conteo_distinto_de_cero_cuenta_como_deuda() {
        let casos = [
            ResumenPendientes {
                trabajos_hora: 1,
                ..ResumenPendientes::default()
            },
            ResumenPendientes {
                gastos: 1,
                ..ResumenPendientes::default()
            },
            ResumenPendientes {
                servicios: 1,
                ..ResumenPendientes::default()
            },
            ResumenPendientes {
                suscripciones_activas: 1,
                ..ResumenPendientes::default()
            },
            ResumenPendientes {
                comprobantes_pendientes: 1,
                ..ResumenPendientes::default()
            },
        ];

        for pendientes in casos {
            assert!(pendientes.tiene_datos());
            assert!(!debe_desactivar_modo_pago(
                mes("2026-01"),
                Some(mes("2026-01")),
                &pendientes
            ));
        }
    }

    #[test]
    fn la_decision_es_determinista() {
        let pendientes = con_pendientes();
        let primera = debe_desactivar_modo_pago(mes("2025-12"), Some(mes("2026-01")), &pendientes);
        let segunda = debe_desactivar_modo_pago(mes("2025-12"), Some(mes("2026-01")), &pendientes);
        assert_eq!(primera, segunda);
    }
}
