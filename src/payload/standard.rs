//! Standard mode ("TIC standard") record.
//!
//! Standard groups are tab separated. Horodated groups carry
//! `LABEL horodate value checksum`, so their value sits in the second token.
//!
//! STGE is sent as 8 hexadecimal digits and decoded into [`StatusRegister`];
//! RELAIS is a decimal byte decoded into [`RelayRegister`].

use crate::payload::date::decode_horodate;
use crate::payload::field::FieldLine;
use crate::payload::register::{RelayRegister, StatusRegister};
use crate::payload::TicDecode;
use chrono::{DateTime, FixedOffset};
use log::debug;
use serde::Serialize;

/// One standard frame.
///
/// Absent fields keep their zero value (empty string, Unix epoch for the
/// date). Status and relay sub-fields are flattened on serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StandardRecord {
    /// Adresse secondaire du compteur
    pub adsc: String,
    /// Version de la TIC
    pub vtic: String,
    /// Date et heure courante
    pub date: DateTime<FixedOffset>,
    /// Nom du calendrier tarifaire fournisseur
    pub ngtf: String,
    /// Libellé tarif fournisseur en cours
    pub ltarf: String,

    /// Energie active soutirée totale (Wh)
    pub east: u32,
    pub easf01: u32,
    pub easf02: u32,
    pub easf03: u32,
    pub easf04: u32,
    pub easf05: u32,
    pub easf06: u32,
    pub easf07: u32,
    pub easf08: u32,
    pub easf09: u32,
    pub easf10: u32,
    pub easd01: u32,
    pub easd02: u32,
    pub easd03: u32,
    pub easd04: u32,
    /// Energie active injectée totale (Wh)
    pub eait: u32,
    /// Energie réactive par quadrant (VArh)
    pub erq1: u32,
    pub erq2: u32,
    pub erq3: u32,
    pub erq4: u32,

    /// Courant efficace par phase (A)
    pub irms1: u16,
    pub irms2: u16,
    pub irms3: u16,
    /// Tension efficace par phase (V)
    pub urms1: u16,
    pub urms2: u16,
    pub urms3: u16,

    /// Puissance apparente de référence (kVA)
    pub pref: u8,
    /// Puissance apparente de coupure (kVA)
    pub pcoup: u8,

    /// Puissance apparente instantanée soutirée (VA)
    pub sinsts: u32,
    pub sinsts1: u32,
    pub sinsts2: u32,
    pub sinsts3: u32,
    /// Puissance apparente max. soutirée du jour
    pub smaxsn: u32,
    pub smaxsn1: u32,
    pub smaxsn2: u32,
    pub smaxsn3: u32,
    /// Puissance apparente max. soutirée de la veille
    pub smaxsn_ly: u32,
    pub smaxsn1_ly: u32,
    pub smaxsn2_ly: u32,
    pub smaxsn3_ly: u32,
    /// Puissance apparente instantanée injectée (VA)
    pub sinsti: u32,
    pub smaxin: u32,
    pub smaxin_ly: u32,

    /// Points de courbe de charge active, période en cours et précédente (W)
    pub ccasn: u32,
    pub ccasn_ly: u32,
    pub ccain: u32,
    pub ccain_ly: u32,

    /// Tension moyenne par phase (V)
    pub umoy1: u16,
    pub umoy2: u16,
    pub umoy3: u16,

    /// Registre de statuts, valeur brute
    pub stge: u32,
    #[serde(flatten)]
    pub status: StatusRegister,

    /// Début et fin des pointes mobiles
    pub dpm1: u8,
    pub fpm1: u8,
    pub dpm2: u8,
    pub fpm2: u8,
    pub dpm3: u8,
    pub fpm3: u8,

    /// Message court
    pub msg1: String,
    /// Message ultra court
    pub msg2: String,
    /// Point de référence mesure
    pub prm: String,

    #[serde(flatten)]
    pub relays: RelayRegister,

    /// Numéro de l'index tarifaire en cours
    pub ntarf: u8,
    /// Numéro du jour en cours, calendrier fournisseur
    pub njourf: u8,
    pub njourf_next_day: u8,
    /// Profil du prochain jour, calendrier fournisseur
    pub pjourf_next_day: String,
    /// Profil du prochain jour de pointe
    pub ppointe: String,
}

impl StandardRecord {
    fn set_status(&mut self, field: &FieldLine<'_>) {
        let raw = field
            .value(0)
            .and_then(|token| u32::from_str_radix(token, 16).ok())
            .unwrap_or_else(|| {
                debug!("Invalid status register {:?}, using zero", field.value(0));
                0
            });
        self.stge = raw;
        self.status = StatusRegister::decode(raw);
    }
}

impl TicDecode for StandardRecord {
    fn apply(&mut self, field: &FieldLine<'_>) {
        match field.key().as_str() {
            "adsc" => self.adsc = field.text(),
            "vtic" => self.vtic = field.text(),
            "date" => self.date = decode_horodate(field.value(0)),
            "ngtf" => self.ngtf = field.joined_text(),
            "ltarf" => self.ltarf = field.joined_text(),

            "east" => self.east = field.number(0),
            "easf01" => self.easf01 = field.number(0),
            "easf02" => self.easf02 = field.number(0),
            "easf03" => self.easf03 = field.number(0),
            "easf04" => self.easf04 = field.number(0),
            "easf05" => self.easf05 = field.number(0),
            "easf06" => self.easf06 = field.number(0),
            "easf07" => self.easf07 = field.number(0),
            "easf08" => self.easf08 = field.number(0),
            "easf09" => self.easf09 = field.number(0),
            "easf10" => self.easf10 = field.number(0),
            "easd01" => self.easd01 = field.number(0),
            "easd02" => self.easd02 = field.number(0),
            "easd03" => self.easd03 = field.number(0),
            "easd04" => self.easd04 = field.number(0),
            "eait" => self.eait = field.number(0),
            "erq1" => self.erq1 = field.number(0),
            "erq2" => self.erq2 = field.number(0),
            "erq3" => self.erq3 = field.number(0),
            "erq4" => self.erq4 = field.number(0),

            "irms1" => self.irms1 = field.number(0),
            "irms2" => self.irms2 = field.number(0),
            "irms3" => self.irms3 = field.number(0),
            "urms1" => self.urms1 = field.number(0),
            "urms2" => self.urms2 = field.number(0),
            "urms3" => self.urms3 = field.number(0),
            "pref" => self.pref = field.number(0),
            "pcoup" => self.pcoup = field.number(0),

            "sinsts" => self.sinsts = field.number(0),
            "sinsts1" => self.sinsts1 = field.number(0),
            "sinsts2" => self.sinsts2 = field.number(0),
            "sinsts3" => self.sinsts3 = field.number(0),
            "smaxsn" => self.smaxsn = field.number(1),
            "smaxsn1" => self.smaxsn1 = field.number(1),
            "smaxsn2" => self.smaxsn2 = field.number(1),
            "smaxsn3" => self.smaxsn3 = field.number(1),
            "smaxsn-1" => self.smaxsn_ly = field.number(1),
            "smaxsn1-1" => self.smaxsn1_ly = field.number(1),
            "smaxsn2-1" => self.smaxsn2_ly = field.number(1),
            "smaxsn3-1" => self.smaxsn3_ly = field.number(1),
            "sinsti" => self.sinsti = field.number(0),
            "smaxin" => self.smaxin = field.number(1),
            "smaxin-1" => self.smaxin_ly = field.number(1),

            "ccasn" => self.ccasn = field.number(1),
            "ccasn-1" => self.ccasn_ly = field.number(1),
            "ccain" => self.ccain = field.number(1),
            "ccain-1" => self.ccain_ly = field.number(1),
            "umoy1" => self.umoy1 = field.number(1),
            "umoy2" => self.umoy2 = field.number(1),
            "umoy3" => self.umoy3 = field.number(1),

            "stge" => self.set_status(field),

            "dpm1" => self.dpm1 = field.number(1),
            "fpm1" => self.fpm1 = field.number(1),
            "dpm2" => self.dpm2 = field.number(1),
            "fpm2" => self.fpm2 = field.number(1),
            "dpm3" => self.dpm3 = field.number(1),
            "fpm3" => self.fpm3 = field.number(1),

            "msg1" => self.msg1 = field.joined_text(),
            "msg2" => self.msg2 = field.joined_text(),
            "prm" => self.prm = field.text(),
            "relais" => self.relays = RelayRegister::decode(field.number(0)),

            "ntarf" => self.ntarf = field.number(0),
            "njourf" => self.njourf = field.number(0),
            "njourf+1" => self.njourf_next_day = field.number(0),
            "pjourf+1" => self.pjourf_next_day = field.joined_text(),
            "ppointe" => self.ppointe = field.joined_text(),
            _ => {}
        }
    }
}
