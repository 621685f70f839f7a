// src/config/data_formatada.rs

use chrono::{Local, NaiveDateTime, SubsecRound};

pub const FORMATO_DATA: &str = "%Y-%m-%d %H:%M:%S";

/// Data e hora locais truncadas no segundo. Chamada uma única vez por
/// operação de criação ou atualização.
pub fn agora() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub fn formatar(data: &NaiveDateTime) -> String {
    data.format(FORMATO_DATA).to_string()
}

/// Serializa `NaiveDateTime` como `YYYY-MM-DD HH:mm:ss`.
pub mod formato_data {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(data: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::formatar(data))
    }
}

/// Variante de `formato_data` para colunas que aceitam nulo.
pub mod formato_data_opcional {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        data: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match data {
            Some(data) => serializer.serialize_str(&super::formatar(data)),
            None => serializer.serialize_none(),
        }
    }
}
