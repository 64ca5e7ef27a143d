//! HCI command opcodes.
//!
//! An opcode is a little-endian `u16` on the wire: the upper 6 bits are
//! the opcode group field (OGF), the lower 10 bits the opcode command
//! field (OCF).

/// Opcode group fields.
pub mod ogf {
    pub const LINK_CONTROL: u8 = 0x01;
    pub const LINK_POLICY: u8 = 0x02;
    pub const CONTROLLER_BASEBAND: u8 = 0x03;
    pub const INFO_PARAM: u8 = 0x04;
    pub const STATUS_PARAM: u8 = 0x05;
    pub const TESTING: u8 = 0x06;
    pub const LE: u8 = 0x08;
    pub const VENDOR: u8 = 0x3F;
}

/// LE controller command fields (OGF 0x08).
pub mod ocf {
    pub const LE_SET_EVENT_MASK: u16 = 0x0001;
    pub const LE_RD_BUF_SIZE: u16 = 0x0002;
    pub const LE_RD_LOC_SUPP_FEAT: u16 = 0x0003;
    pub const LE_SET_RAND_ADDR: u16 = 0x0005;
    pub const LE_SET_ADV_PARAMS: u16 = 0x0006;
    pub const LE_RD_ADV_CHAN_TXPWR: u16 = 0x0007;
    pub const LE_SET_ADV_DATA: u16 = 0x0008;
    pub const LE_SET_SCAN_RSP_DATA: u16 = 0x0009;
    pub const LE_SET_ADV_ENABLE: u16 = 0x000A;
    pub const LE_SET_SCAN_PARAMS: u16 = 0x000B;
    pub const LE_SET_SCAN_ENABLE: u16 = 0x000C;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Opcode(pub u16);

impl Opcode {
    pub const fn new(ogf: u8, ocf: u16) -> Opcode {
        Opcode(((ogf as u16 & 0x3f) << 10) | (ocf & 0x03ff))
    }

    pub const fn ogf(self) -> u8 {
        (self.0 >> 10) as u8
    }

    pub const fn ocf(self) -> u16 {
        self.0 & 0x03ff
    }

    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub const fn from_le_bytes(bytes: [u8; 2]) -> Opcode {
        Opcode(u16::from_le_bytes(bytes))
    }
}

pub const LE_SET_EVENT_MASK: Opcode = Opcode::new(ogf::LE, ocf::LE_SET_EVENT_MASK);
pub const LE_READ_BUFFER_SIZE: Opcode = Opcode::new(ogf::LE, ocf::LE_RD_BUF_SIZE);
pub const LE_SET_RANDOM_ADDRESS: Opcode = Opcode::new(ogf::LE, ocf::LE_SET_RAND_ADDR);
pub const LE_SET_ADVERTISING_PARAMETERS: Opcode = Opcode::new(ogf::LE, ocf::LE_SET_ADV_PARAMS);
pub const LE_READ_ADVERTISING_CHANNEL_TX_POWER: Opcode =
    Opcode::new(ogf::LE, ocf::LE_RD_ADV_CHAN_TXPWR);
pub const LE_SET_ADVERTISING_DATA: Opcode = Opcode::new(ogf::LE, ocf::LE_SET_ADV_DATA);
pub const LE_SET_SCAN_RESPONSE_DATA: Opcode = Opcode::new(ogf::LE, ocf::LE_SET_SCAN_RSP_DATA);
pub const LE_SET_ADVERTISING_ENABLE: Opcode = Opcode::new(ogf::LE, ocf::LE_SET_ADV_ENABLE);
pub const LE_SET_SCAN_PARAMETERS: Opcode = Opcode::new(ogf::LE, ocf::LE_SET_SCAN_PARAMS);
pub const LE_SET_SCAN_ENABLE: Opcode = Opcode::new(ogf::LE, ocf::LE_SET_SCAN_ENABLE);
