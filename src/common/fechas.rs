// src/common/fechas.rs

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

// Un mes de facturación ("YYYY-MM") como tipo propio.
// Derivamos Ord con `anio` primero: así el orden derivado coincide con el
// orden cronológico, sin depender de comparar strings crudos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MesFacturacion {
    anio: i32,
    mes: u32, // 1..=12, garantizado por los constructores
}

impl MesFacturacion {
    pub fn nuevo(anio: i32, mes: u32) -> Option<Self> {
        if (1..=12).contains(&mes) && (0..=9999).contains(&anio) {
            Some(Self { anio, mes })
        } else {
            None
        }
    }

    pub fn de_fecha(fecha: NaiveDate) -> Self {
        Self {
            anio: fecha.year(),
            mes: fecha.month(),
        }
    }

    // El mes calendario inmediatamente anterior. Enero envuelve a diciembre
    // del año previo.
    pub fn anterior(self) -> Self {
        if self.mes == 1 {
            Self {
                anio: self.anio - 1,
                mes: 12,
            }
        } else {
            Self {
                anio: self.anio,
                mes: self.mes - 1,
            }
        }
    }

    pub fn primer_dia(self) -> NaiveDate {
        // Seguro: mes ∈ 1..=12 y el día 1 existe en todos los meses.
        NaiveDate::from_ymd_opt(self.anio, self.mes, 1)
            .unwrap_or_else(|| unreachable!("mes de facturación fuera de rango"))
    }

    // Último día calendario del mes (28-31 según mes y año bisiesto).
    pub fn ultimo_dia(self) -> NaiveDate {
        let siguiente = if self.mes == 12 {
            Self {
                anio: self.anio + 1,
                mes: 1,
            }
        } else {
            Self {
                anio: self.anio,
                mes: self.mes + 1,
            }
        };
        siguiente.primer_dia() - chrono::Days::new(1)
    }

    // Rango inclusivo [primer día, último día] para consultas de libro mayor.
    pub fn rango_fechas(self) -> (NaiveDate, NaiveDate) {
        (self.primer_dia(), self.ultimo_dia())
    }
}

impl fmt::Display for MesFacturacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.anio, self.mes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MesInvalido;

impl FromStr for MesFacturacion {
    type Err = MesInvalido;

    // Formato estricto: exactamente "YYYY-MM", año de 4 dígitos, mes 01-12.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(MesInvalido);
        }
        if !bytes[..4].iter().all(u8::is_ascii_digit) || !bytes[5..].iter().all(u8::is_ascii_digit)
        {
            return Err(MesInvalido);
        }
        let anio: i32 = s[..4].parse().map_err(|_| MesInvalido)?;
        let mes: u32 = s[5..].parse().map_err(|_| MesInvalido)?;
        Self::nuevo(anio, mes).ok_or(MesInvalido)
    }
}

/// Deriva el mes de facturación "activo" a partir de la fecha del último
/// reporte del cliente: el mes calendario anterior a esa fecha.
///
/// Acepta fechas con o sin componente horario ("2026-02-03" o
/// "2026-02-03T10:00:00Z"); solo se mira la porción de fecha. Devuelve `None`
/// si la entrada falta, está vacía o no es una fecha válida. Nunca hace panic.
pub fn mes_activo(fecha_ultimo_reporte: Option<&str>) -> Option<MesFacturacion> {
    let fecha = fecha_ultimo_reporte?.trim();
    if fecha.is_empty() {
        return None;
    }
    // Recorta a los primeros 10 caracteres (la porción "YYYY-MM-DD").
    let solo_fecha = fecha.get(..10).unwrap_or(fecha);
    let fecha = NaiveDate::parse_from_str(solo_fecha, "%Y-%m-%d").ok()?;
    Some(MesFacturacion::de_fecha(fecha).anterior())
}

/// ¿`mes_a` es estrictamente anterior a `mes_b`?
///
/// Entradas vacías o mal formadas devuelven `false` (no hay caso especial que
/// disparar), nunca un error.
pub fn es_mes_anterior(mes_a: &str, mes_b: &str) -> bool {
    match (
        MesFacturacion::from_str(mes_a),
        MesFacturacion::from_str(mes_b),
    ) {
        (Ok(a), Ok(b)) => a < b,
        _ => false,
    }
}

/// Rango inclusivo de fechas [inicio, fin] para un mes "YYYY-MM".
/// `None` si el formato no es válido.
pub fn rango_fechas_mes(mes: &str) -> Option<(NaiveDate, NaiveDate)> {
    let mes = MesFacturacion::from_str(mes).ok()?;
    Some(mes.rango_fechas())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mes(s: &str) -> MesFacturacion {
        MesFacturacion::from_str(s).expect("mes de prueba válido")
    }

    #[test]
    fn mes_activo_resta_un_mes_calendario() {
        assert_eq!(mes_activo(Some("2026-02-03")), Some(mes("2026-01")));
        assert_eq!(mes_activo(Some("2026-06-30")), Some(mes("2026-05")));
    }

    #[test]
    fn mes_activo_envuelve_enero_a_diciembre() {
        assert_eq!(mes_activo(Some("2026-01-15")), Some(mes("2025-12")));
    }

    #[test]
    fn mes_activo_ignora_el_componente_horario() {
        assert_eq!(
            mes_activo(Some("2026-02-03T18:45:00.000Z")),
            Some(mes("2026-01"))
        );
    }

    #[test]
    fn mes_activo_sin_informacion_devuelve_none() {
        assert_eq!(mes_activo(None), None);
        assert_eq!(mes_activo(Some("")), None);
        assert_eq!(mes_activo(Some("   ")), None);
        assert_eq!(mes_activo(Some("no-es-fecha")), None);
        // Fecha calendario inexistente
        assert_eq!(mes_activo(Some("2026-02-30")), None);
    }

    #[test]
    fn comparador_de_meses() {
        assert!(es_mes_anterior("2025-12", "2026-01"));
        assert!(!es_mes_anterior("2026-01", "2026-01"));
        assert!(!es_mes_anterior("2026-02", "2026-01"));
    }

    #[test]
    fn comparador_con_entradas_invalidas_devuelve_false() {
        assert!(!es_mes_anterior("", "2026-01"));
        assert!(!es_mes_anterior("2026-01", ""));
        assert!(!es_mes_anterior("2026/01", "2026-02"));
    }

    #[test]
    fn orden_derivado_coincide_con_el_cronologico() {
        assert!(mes("2025-12") < mes("2026-01"));
        assert!(mes("2026-01") < mes("2026-02"));
        assert_eq!(mes("2026-01"), mes("2026-01"));
    }

    #[test]
    fn parseo_estricto_de_mes() {
        assert_eq!(mes("2026-02").to_string(), "2026-02");
        assert!(MesFacturacion::from_str("2026-13").is_err());
        assert!(MesFacturacion::from_str("2026-00").is_err());
        assert!(MesFacturacion::from_str("2026-2").is_err());
        assert!(MesFacturacion::from_str("202602").is_err());
        assert!(MesFacturacion::from_str("abcd-ef").is_err());
    }

    #[test]
    fn rango_de_fechas_del_mes() {
        let (inicio, fin) = rango_fechas_mes("2026-02").expect("mes válido");
        assert_eq!(inicio.to_string(), "2026-02-01");
        assert_eq!(fin.to_string(), "2026-02-28");
    }

    #[test]
    fn rango_respeta_anios_bisiestos() {
        let (_, fin) = rango_fechas_mes("2024-02").expect("mes válido");
        assert_eq!(fin.to_string(), "2024-02-29");
    }

    #[test]
    fn rango_de_diciembre_cruza_el_anio() {
        let (inicio, fin) = rango_fechas_mes("2025-12").expect("mes válido");
        assert_eq!(inicio.to_string(), "2025-12-01");
        assert_eq!(fin.to_string(), "2025-12-31");
    }

    #[test]
    fn rango_con_formato_invalido_devuelve_none() {
        assert_eq!(rango_fechas_mes("2026-13"), None);
        assert_eq!(rango_fechas_mes("2026-1"), None);
        assert_eq!(rango_fechas_mes(""), None);
    }
}
