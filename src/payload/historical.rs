//! Historical mode ("TIC historique") record.
//!
//! Older meters, and Linky meters left in historical mode, send one value per
//! group separated by spaces: `LABEL value checksum`.

use crate::payload::field::FieldLine;
use crate::payload::TicDecode;
use serde::Serialize;

/// One historical frame.
///
/// Fields not sent by the meter keep their zero value; a zero is therefore
/// either a reading of zero or a field this meter does not transmit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoricalRecord {
    /// Adresse du compteur
    pub adco: String,
    /// Option tarifaire choisie
    pub optarif: String,
    /// Intensité souscrite (A)
    pub isousc: u8,
    /// Index option Base (Wh)
    pub base: i32,
    /// Index option Heures Creuses, heures creuses (Wh)
    pub hchc: i32,
    /// Index option Heures Creuses, heures pleines (Wh)
    pub hchp: i32,
    /// Index option EJP, heures normales (Wh)
    pub ejphn: i32,
    /// Index option EJP, heures de pointe mobile (Wh)
    pub ejphpm: i32,
    /// Index option Tempo, heures creuses jours bleus (Wh)
    pub bbrhcjb: i32,
    /// Index option Tempo, heures pleines jours bleus (Wh)
    pub bbrhpjb: i32,
    /// Index option Tempo, heures creuses jours blancs (Wh)
    pub bbrhcjw: i32,
    /// Index option Tempo, heures pleines jours blancs (Wh)
    pub bbrhpjw: i32,
    /// Index option Tempo, heures creuses jours rouges (Wh)
    pub bbrhcjr: i32,
    /// Index option Tempo, heures pleines jours rouges (Wh)
    pub bbrhpjr: i32,
    /// Préavis début EJP (min)
    pub pejp: i8,
    /// Période tarifaire en cours
    pub ptec: String,
    /// Couleur du lendemain
    pub demain: String,
    /// Intensité instantanée (A)
    pub iinst: i16,
    pub iinst1: i16,
    pub iinst2: i16,
    pub iinst3: i16,
    /// Avertissement de dépassement de puissance souscrite (A)
    pub adps: i16,
    /// Intensité maximale appelée (A)
    pub imax: i16,
    pub imax1: i16,
    pub imax2: i16,
    pub imax3: i16,
    /// Puissance maximale triphasée atteinte (W)
    pub pmax: i32,
    /// Puissance apparente (VA)
    pub papp: i32,
    /// Horaire heures pleines / heures creuses
    pub hhphc: String,
    /// Mot d'état du compteur
    pub motdetat: String,
    /// Présence des potentiels
    pub ppot: String,
}

impl TicDecode for HistoricalRecord {
    fn apply(&mut self, field: &FieldLine<'_>) {
        match field.key().as_str() {
            "adco" => self.adco = field.text(),
            "optarif" => self.optarif = field.text(),
            "isousc" => self.isousc = field.number(0),
            "base" => self.base = field.number(0),
            "hchc" => self.hchc = field.number(0),
            "hchp" => self.hchp = field.number(0),
            "ejphn" => self.ejphn = field.number(0),
            "ejphpm" => self.ejphpm = field.number(0),
            "bbrhcjb" => self.bbrhcjb = field.number(0),
            "bbrhpjb" => self.bbrhpjb = field.number(0),
            "bbrhcjw" => self.bbrhcjw = field.number(0),
            "bbrhpjw" => self.bbrhpjw = field.number(0),
            "bbrhcjr" => self.bbrhcjr = field.number(0),
            "bbrhpjr" => self.bbrhpjr = field.number(0),
            "pejp" => self.pejp = field.number(0),
            "ptec" => self.ptec = field.text(),
            "demain" => self.demain = field.text(),
            "iinst" => self.iinst = field.number(0),
            "iinst1" => self.iinst1 = field.number(0),
            "iinst2" => self.iinst2 = field.number(0),
            "iinst3" => self.iinst3 = field.number(0),
            "adps" => self.adps = field.number(0),
            "imax" => self.imax = field.number(0),
            "imax1" => self.imax1 = field.number(0),
            "imax2" => self.imax2 = field.number(0),
            "imax3" => self.imax3 = field.number(0),
            "pmax" => self.pmax = field.number(0),
            "papp" => self.papp = field.number(0),
            "hhphc" => self.hhphc = field.text(),
            "motdetat" => self.motdetat = field.joined_text(),
            "ppot" => self.ppot = field.text(),
            _ => {}
        }
    }
}
