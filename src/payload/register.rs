//! # Packed Registers
//!
//! Standard mode packs meter state into two integers:
//!
//! - `STGE`, a 32-bit status register holding 18 sub-fields of 1 to 4 bits,
//! - `RELAIS`, an 8-bit register holding one bit per relay.
//!
//! The bit layout is declared once, in [`StatusField::bits`], and every
//! sub-field goes through the same [`BitSlice::extract`] shift-and-mask.
//!
//! ```text
//! 31 30|29 28|27 26|25 24|23|22 21|20 19|18|17|16|15 14|13 .. 10|9|8|7|6|5|4|3 2 1|0
//!  PM  | PMN | TMR | TDY |CS| CPL | EUR | -|TM|CK| DIST| SUPPLIER|D|P|R|S|-|T| CUT |C
//! ```

use bitflags::bitflags;
use serde::Serialize;

/// A contiguous bit range of a register, LSB numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSlice {
    pub offset: u8,
    pub width: u8,
}

impl BitSlice {
    pub const fn new(offset: u8, width: u8) -> Self {
        BitSlice { offset, width }
    }

    pub const fn mask(&self) -> u32 {
        ((1u64 << self.width) - 1) as u32
    }

    /// Largest value the slice can hold.
    pub const fn max(&self) -> u8 {
        self.mask() as u8
    }

    #[inline]
    pub const fn extract(&self, raw: u32) -> u8 {
        ((raw >> self.offset) & self.mask()) as u8
    }
}

/// Sub-fields of the STGE status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusField {
    /// Contact sec
    DryContact,
    /// Organe de coupure
    CutOffDevice,
    /// État du cache-bornes distributeur
    TerminalShield,
    /// Surtension sur une des phases
    Surge,
    /// Dépassement de la puissance de référence
    ReferencePowerExceeded,
    /// Fonctionnement producteur/consommateur
    Consumption,
    /// Sens de l'énergie active
    EnergyDirection,
    /// Tarif en cours sur le contrat fourniture
    ContractTypePrice,
    /// Tarif en cours sur le contrat distributeur
    ContractTypePriceDistributor,
    /// Mode dégradé de l'horloge
    Clock,
    /// État de la sortie télé-information (historique / standard)
    Tic,
    /// État de la sortie communication Euridis
    EuridisLink,
    /// Statut du CPL
    Cpl,
    /// Synchronisation CPL
    CplSync,
    /// Couleur du jour pour le contrat historique tempo
    TempoContractColor,
    /// Couleur du lendemain pour le contrat historique tempo
    TempoContractNextDayColor,
    /// Préavis pointes mobiles
    MovingPeakNotice,
    /// Pointe mobile
    MovingPeak,
}

impl StatusField {
    pub const ALL: [StatusField; 18] = [
        StatusField::DryContact,
        StatusField::CutOffDevice,
        StatusField::TerminalShield,
        StatusField::Surge,
        StatusField::ReferencePowerExceeded,
        StatusField::Consumption,
        StatusField::EnergyDirection,
        StatusField::ContractTypePrice,
        StatusField::ContractTypePriceDistributor,
        StatusField::Clock,
        StatusField::Tic,
        StatusField::EuridisLink,
        StatusField::Cpl,
        StatusField::CplSync,
        StatusField::TempoContractColor,
        StatusField::TempoContractNextDayColor,
        StatusField::MovingPeakNotice,
        StatusField::MovingPeak,
    ];

    /// Position of the sub-field in STGE. Bits 5 and 18 are unused.
    pub const fn bits(self) -> BitSlice {
        match self {
            StatusField::DryContact => BitSlice::new(0, 1),
            StatusField::CutOffDevice => BitSlice::new(1, 3),
            StatusField::TerminalShield => BitSlice::new(4, 1),
            StatusField::Surge => BitSlice::new(6, 1),
            StatusField::ReferencePowerExceeded => BitSlice::new(7, 1),
            StatusField::Consumption => BitSlice::new(8, 1),
            StatusField::EnergyDirection => BitSlice::new(9, 1),
            StatusField::ContractTypePrice => BitSlice::new(10, 4),
            StatusField::ContractTypePriceDistributor => BitSlice::new(14, 2),
            StatusField::Clock => BitSlice::new(16, 1),
            StatusField::Tic => BitSlice::new(17, 1),
            StatusField::EuridisLink => BitSlice::new(19, 2),
            StatusField::Cpl => BitSlice::new(21, 2),
            StatusField::CplSync => BitSlice::new(23, 1),
            StatusField::TempoContractColor => BitSlice::new(24, 2),
            StatusField::TempoContractNextDayColor => BitSlice::new(26, 2),
            StatusField::MovingPeakNotice => BitSlice::new(28, 2),
            StatusField::MovingPeak => BitSlice::new(30, 2),
        }
    }

    pub const fn extract(self, raw: u32) -> u8 {
        self.bits().extract(raw)
    }
}

/// Decoded STGE status register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusRegister {
    pub dry_contact_status: u8,
    pub cut_off_device_status: u8,
    pub linky_terminal_shield_status: u8,
    pub surge_status: u8,
    pub reference_power_exceeded_status: u8,
    pub consumption_status: u8,
    pub energy_direction_status: u8,
    pub contract_type_price_status: u8,
    pub contract_type_price_distributor_status: u8,
    pub clock_status: u8,
    pub tic_status: u8,
    pub euridis_link_status: u8,
    pub cpl_status: u8,
    pub cpl_sync_status: u8,
    pub tempo_contract_color_status: u8,
    pub tempo_contract_next_day_color_status: u8,
    pub moving_peak_notice_status: u8,
    pub moving_peak_status: u8,
}

impl StatusRegister {
    pub fn decode(raw: u32) -> Self {
        use StatusField::*;

        StatusRegister {
            dry_contact_status: DryContact.extract(raw),
            cut_off_device_status: CutOffDevice.extract(raw),
            linky_terminal_shield_status: TerminalShield.extract(raw),
            surge_status: Surge.extract(raw),
            reference_power_exceeded_status: ReferencePowerExceeded.extract(raw),
            consumption_status: Consumption.extract(raw),
            energy_direction_status: EnergyDirection.extract(raw),
            contract_type_price_status: ContractTypePrice.extract(raw),
            contract_type_price_distributor_status: ContractTypePriceDistributor.extract(raw),
            clock_status: Clock.extract(raw),
            tic_status: Tic.extract(raw),
            euridis_link_status: EuridisLink.extract(raw),
            cpl_status: Cpl.extract(raw),
            cpl_sync_status: CplSync.extract(raw),
            tempo_contract_color_status: TempoContractColor.extract(raw),
            tempo_contract_next_day_color_status: TempoContractNextDayColor.extract(raw),
            moving_peak_notice_status: MovingPeakNotice.extract(raw),
            moving_peak_status: MovingPeak.extract(raw),
        }
    }

    /// Decoded value of one sub-field.
    pub fn get(&self, field: StatusField) -> u8 {
        match field {
            StatusField::DryContact => self.dry_contact_status,
            StatusField::CutOffDevice => self.cut_off_device_status,
            StatusField::TerminalShield => self.linky_terminal_shield_status,
            StatusField::Surge => self.surge_status,
            StatusField::ReferencePowerExceeded => self.reference_power_exceeded_status,
            StatusField::Consumption => self.consumption_status,
            StatusField::EnergyDirection => self.energy_direction_status,
            StatusField::ContractTypePrice => self.contract_type_price_status,
            StatusField::ContractTypePriceDistributor => {
                self.contract_type_price_distributor_status
            }
            StatusField::Clock => self.clock_status,
            StatusField::Tic => self.tic_status,
            StatusField::EuridisLink => self.euridis_link_status,
            StatusField::Cpl => self.cpl_status,
            StatusField::CplSync => self.cpl_sync_status,
            StatusField::TempoContractColor => self.tempo_contract_color_status,
            StatusField::TempoContractNextDayColor => self.tempo_contract_next_day_color_status,
            StatusField::MovingPeakNotice => self.moving_peak_notice_status,
            StatusField::MovingPeak => self.moving_peak_status,
        }
    }
}

bitflags! {
    /// Raw RELAIS register, one bit per relay (bit 0 is relay 1).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Relays: u8 {
        const RELAY_1 = 1 << 0;
        const RELAY_2 = 1 << 1;
        const RELAY_3 = 1 << 2;
        const RELAY_4 = 1 << 3;
        const RELAY_5 = 1 << 4;
        const RELAY_6 = 1 << 5;
        const RELAY_7 = 1 << 6;
        const RELAY_8 = 1 << 7;
    }
}

/// Decoded RELAIS register, each relay as 0 (open) or 1 (closed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelayRegister {
    pub relay1: u8,
    pub relay2: u8,
    pub relay3: u8,
    pub relay4: u8,
    pub relay5: u8,
    pub relay6: u8,
    pub relay7: u8,
    pub relay8: u8,
}

impl RelayRegister {
    pub fn decode(raw: u8) -> Self {
        let relays = Relays::from_bits_retain(raw);
        let state = |relay: Relays| u8::from(relays.contains(relay));

        RelayRegister {
            relay1: state(Relays::RELAY_1),
            relay2: state(Relays::RELAY_2),
            relay3: state(Relays::RELAY_3),
            relay4: state(Relays::RELAY_4),
            relay5: state(Relays::RELAY_5),
            relay6: state(Relays::RELAY_6),
            relay7: state(Relays::RELAY_7),
            relay8: state(Relays::RELAY_8),
        }
    }

    /// Relay states in order, relay 1 first.
    pub fn as_array(&self) -> [u8; 8] {
        [
            self.relay1,
            self.relay2,
            self.relay3,
            self.relay4,
            self.relay5,
            self.relay6,
            self.relay7,
            self.relay8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_covers_all_but_unused_bits() {
        let mut used = 0u32;
        for field in StatusField::ALL {
            let bits = field.bits();
            let mask = bits.mask() << bits.offset;
            assert_eq!(used & mask, 0, "{field:?} overlaps another field");
            used |= mask;
        }
        assert_eq!(!used, (1 << 5) | (1 << 18));
    }

    #[test]
    fn test_field_widths() {
        let widths: Vec<u8> = StatusField::ALL.iter().map(|f| f.bits().width).collect();
        assert_eq!(widths, vec![1, 3, 1, 1, 1, 1, 1, 4, 2, 1, 1, 2, 2, 1, 2, 2, 2, 2]);
    }

    #[test]
    fn test_status_zero() {
        assert_eq!(StatusRegister::decode(0), StatusRegister::default());
    }

    #[test]
    fn test_status_all_ones() {
        let status = StatusRegister::decode(u32::MAX);
        for field in StatusField::ALL {
            assert_eq!(status.get(field), field.bits().max(), "{field:?}");
        }
        assert_eq!(status.contract_type_price_status, 15);
        assert_eq!(status.cut_off_device_status, 7);
        assert_eq!(status.moving_peak_status, 3);
    }

    #[test]
    fn test_status_single_bits() {
        assert_eq!(StatusRegister::decode(0x0000_0001).dry_contact_status, 1);
        assert_eq!(StatusRegister::decode(0x8000_0000).moving_peak_status, 2);
        assert_eq!(StatusRegister::decode(0xC000_0000).moving_peak_status, 3);
        // Unused bits decode to nothing
        assert_eq!(
            StatusRegister::decode((1 << 5) | (1 << 18)),
            StatusRegister::default()
        );
    }

    #[test]
    fn test_status_real_meter_value() {
        // STGE 003A4001 as sent by a Linky in standard mode
        let status = StatusRegister::decode(0x003A_4001);
        assert_eq!(status.dry_contact_status, 1);
        assert_eq!(status.cut_off_device_status, 0);
        assert_eq!(status.contract_type_price_status, 0);
        assert_eq!(status.contract_type_price_distributor_status, 1);
        assert_eq!(status.clock_status, 0);
        assert_eq!(status.tic_status, 1);
        assert_eq!(status.euridis_link_status, 3);
        assert_eq!(status.cpl_status, 1);
        assert_eq!(status.cpl_sync_status, 0);
    }

    #[test]
    fn test_relays() {
        assert_eq!(RelayRegister::decode(1).as_array(), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(RelayRegister::decode(2).as_array(), [0, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(RelayRegister::decode(140).as_array(), [0, 0, 1, 1, 0, 0, 0, 1]);
        assert_eq!(RelayRegister::decode(255).as_array(), [1; 8]);
        assert_eq!(RelayRegister::decode(0), RelayRegister::default());
    }
}
