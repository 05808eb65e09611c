use crate::config::GroupLabels;
use crate::models::Record;
use crate::numeric::to_real;

pub const MAN: &str = "Män";
pub const SVARTA: &str = "Svarta";
pub const BONUS_DELTAGIT: &str = "Bonus deltagit";
pub const PERSONAL_DELTAGIT: &str = "Personal deltagit";
pub const TOTALT_MAN: &str = "Totalt Män";

pub const DP: &str = "DP";
pub const DPP: &str = "DPP";
pub const DAP: &str = "DAP";
pub const TAP: &str = "TAP";

pub const ALSKAR: &str = "Älskar";
pub const SOVER_MED: &str = "Sover med";
pub const NILS: &str = "Nils";

pub const SUMMA_TID_SEK: &str = "Summa tid (sek)";
pub const TID_D_SEK: &str = "Tid D (sek)";
pub const TPK_SEK: &str = "Tid per kille (sek)";
pub const HAND_SEK: &str = "Händer (sek)";
pub const HAK_SEK: &str = "Händer per kille (sek)";
pub const HANDER_AKTIV: &str = "Händer aktiv";

pub const PRENUMERANTER: &str = "Prenumeranter";
pub const INTAKTER: &str = "Intäkter";
pub const KOSTNAD_MAN: &str = "Kostnad män";
pub const INTAKT_KANNER: &str = "Intäkt känner";
pub const INTAKT_FORETAG: &str = "Intäkt företag";
pub const LON_MALIN: &str = "Lön Malin";
pub const VINST: &str = "Vinst";

pub const DATUM: &str = "Datum";

pub const DP_COLUMNS: [&str; 4] = [DP, DPP, DAP, TAP];

pub const ECONOMY_COLUMNS: [&str; 7] = [
    PRENUMERANTER,
    INTAKTER,
    KOSTNAD_MAN,
    INTAKT_KANNER,
    INTAKT_FORETAG,
    LON_MALIN,
    VINST,
];

#[derive(Debug, Clone, Copy)]
pub struct Columns<'a> {
    rows: &'a [Record],
}

impl<'a> Columns<'a> {
    pub fn new(rows: &'a [Record]) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has(&self, name: &str) -> bool {
        self.rows.iter().any(|row| row.contains_key(name))
    }

    pub fn get(&self, name: &str) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row.get(name).map(to_real).unwrap_or(0.0))
            .collect()
    }
}

pub fn positive(values: &[f64]) -> Vec<bool> {
    values.iter().map(|value| *value > 0.0).collect()
}

pub fn zip_add(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

pub fn masked(values: &[f64], mask: &[bool]) -> Vec<f64> {
    values
        .iter()
        .zip(mask)
        .map(|(value, keep)| if *keep { *value } else { 0.0 })
        .collect()
}

pub fn select(values: &[f64], mask: &[bool]) -> Vec<f64> {
    values
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(value, _)| *value)
        .collect()
}

pub fn input_columns(labels: &GroupLabels) -> Vec<String> {
    let mut columns: Vec<String> = vec![MAN.into(), SVARTA.into()];
    columns.extend([
        labels.pappan.clone(),
        labels.grannar.clone(),
        labels.nils_vanner.clone(),
        labels.nils_familj.clone(),
        labels.bekanta.clone(),
        labels.esk.clone(),
    ]);
    columns.extend([BONUS_DELTAGIT, PERSONAL_DELTAGIT].map(String::from));
    columns.extend(DP_COLUMNS.map(String::from));
    columns.extend([ALSKAR, SOVER_MED, NILS].map(String::from));
    columns.extend(
        [SUMMA_TID_SEK, TID_D_SEK, TPK_SEK, HAND_SEK, HAK_SEK, HANDER_AKTIV].map(String::from),
    );
    columns.extend(ECONOMY_COLUMNS.map(String::from));
    columns
}
