use crate::numeric::parse_text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_SUPER_BONUS_PCT: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigMap {
    values: BTreeMap<String, ConfigValue>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: ConfigValue) {
        self.values.insert(key.into(), value);
    }

    pub fn with(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value.into());
        self
    }

    pub fn number(&self, key: &str, default: f64) -> f64 {
        match self.values.get(key) {
            None => default,
            Some(ConfigValue::Number(value)) if value.is_finite() => *value,
            Some(ConfigValue::Text(text)) => parse_text(text),
            Some(_) => 0.0,
        }
    }

    pub fn label(&self, key: &str, default: &str) -> String {
        match self.values.get(key) {
            Some(ConfigValue::Text(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Some(ConfigValue::Number(value)) => value.to_string(),
            _ => default.to_string(),
        }
    }

    pub fn group_labels(&self) -> GroupLabels {
        GroupLabels {
            pappan: self.label("LBL_PAPPAN", "Pappans vänner"),
            grannar: self.label("LBL_GRANNAR", "Grannar"),
            nils_vanner: self.label("LBL_NILS_VANNER", "Nils vänner"),
            nils_familj: self.label("LBL_NILS_FAMILJ", "Nils familj"),
            bekanta: self.label("LBL_BEKANTA", "Bekanta"),
            esk: self.label("LBL_ESK", "Eskilstuna killar"),
        }
    }

    pub fn capacities(&self) -> Capacities {
        Capacities {
            pappan: self.number("MAX_PAPPAN", 0.0),
            grannar: self.number("MAX_GRANNAR", 0.0),
            nils_vanner: self.number("MAX_NILS_VANNER", 0.0),
            nils_familj: self.number("MAX_NILS_FAMILJ", 0.0),
            bekanta: self.number("MAX_BEKANTA", 0.0),
            staff: self.number("PROD_STAFF", 0.0),
        }
    }

    pub fn super_bonus_pct(&self) -> f64 {
        self.number("SUPER_BONUS_PCT", DEFAULT_SUPER_BONUS_PCT)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupLabels {
    pub pappan: String,
    pub grannar: String,
    pub nils_vanner: String,
    pub nils_familj: String,
    pub bekanta: String,
    pub esk: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacities {
    pub pappan: f64,
    pub grannar: f64,
    pub nils_vanner: f64,
    pub nils_familj: f64,
    pub bekanta: f64,
    pub staff: f64,
}

impl Capacities {
    pub fn kanner(&self) -> f64 {
        self.pappan + self.grannar + self.nils_vanner + self.nils_familj
    }
}
