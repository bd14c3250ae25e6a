//! Command frame parsing and opcode classification

use heapless::Vec;

/// Maximum payload carried after the opcode byte (SSID + password worst case)
pub const MAX_COMMAND_PAYLOAD: usize = 96;

// Motion opcodes
pub const OP_BACKWARD: u8 = 0x00;
pub const OP_FORWARD: u8 = 0x01;
pub const OP_STOP: u8 = 0x02;
pub const OP_TURN_RIGHT: u8 = 0x03;
pub const OP_TURN_LEFT: u8 = 0x04;
pub const OP_MANUAL_PWM: u8 = 0x05;

// LED opcodes (decimal values, fixed by the phone app)
pub const OP_LED_GREEN: u8 = 10;
pub const OP_LED_RED: u8 = 20;
pub const OP_LED_BLUE: u8 = 30;
pub const OP_LED_WHITE: u8 = 40;

// WiFi opcodes, forwarded to the network co-processor
pub const OP_WIFI_SET: u8 = 0x50;
pub const OP_WIFI_CONNECT: u8 = 0x51;
pub const OP_WIFI_DISCONNECT: u8 = 0x52;
pub const OP_WIFI_STATUS: u8 = 0x53;
pub const OP_WIFI_CLEAR: u8 = 0x54;

// OTA opcodes, forwarded to the network co-processor
pub const OP_OTA_UPDATE: u8 = 0x60;
pub const OP_OTA_CHECK: u8 = 0x61;
pub const OP_GET_VERSION: u8 = 0x62;
pub const OP_GET_INFO: u8 = 0x63;

/// Keepalive ping - resets the sleep timer, no reply
pub const OP_PING: u8 = 0x70;

/// A single received command: opcode plus the remaining frame bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    /// Command opcode (first byte of the frame)
    pub opcode: u8,
    /// Remaining bytes; truncated if the transport delivered more than fits
    pub payload: Vec<u8, MAX_COMMAND_PAYLOAD>,
}

/// Motion-class commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionCommand {
    /// Fixed-duty reverse on both channels
    Backward,
    /// Start (or continue) the forward acceleration ramp
    Forward,
    /// Zero duty on both channels
    Stop,
    TurnRight,
    TurnLeft,
    /// Differential steering around a center parameter of 50
    Manual(u8),
}

/// Tri-color LED selections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    Green,
    Red,
    Blue,
    /// All three channels on
    White,
}

/// Connectivity operations owned by the network co-processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectivityOp {
    WifiSet,
    WifiConnect,
    WifiDisconnect,
    WifiStatus,
    WifiClear,
    OtaUpdate,
    OtaCheck,
    Version,
    Info,
}

/// Dispatch class of an opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandClass {
    Motion(MotionCommand),
    Led(LedColor),
    Connectivity(ConnectivityOp),
    Keepalive,
    Unknown(u8),
}

impl CommandFrame {
    /// Parse a transport frame. Returns `None` for an empty frame.
    ///
    /// Payload bytes beyond [`MAX_COMMAND_PAYLOAD`] are dropped rather than
    /// rejected; no valid command carries that much data.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&opcode, rest) = bytes.split_first()?;
        let mut payload = Vec::new();
        let take = rest.len().min(MAX_COMMAND_PAYLOAD);
        // Length is bounded above, extend cannot fail
        let _ = payload.extend_from_slice(&rest[..take]);
        Some(Self { opcode, payload })
    }

    /// Single-byte parameter: first payload byte, defaulting to 0
    pub fn param(&self) -> u8 {
        self.payload.first().copied().unwrap_or(0)
    }

    /// Classify the opcode for dispatch
    pub fn classify(&self) -> CommandClass {
        match self.opcode {
            OP_BACKWARD => CommandClass::Motion(MotionCommand::Backward),
            OP_FORWARD => CommandClass::Motion(MotionCommand::Forward),
            OP_STOP => CommandClass::Motion(MotionCommand::Stop),
            OP_TURN_RIGHT => CommandClass::Motion(MotionCommand::TurnRight),
            OP_TURN_LEFT => CommandClass::Motion(MotionCommand::TurnLeft),
            OP_MANUAL_PWM => CommandClass::Motion(MotionCommand::Manual(self.param())),
            OP_LED_GREEN => CommandClass::Led(LedColor::Green),
            OP_LED_RED => CommandClass::Led(LedColor::Red),
            OP_LED_BLUE => CommandClass::Led(LedColor::Blue),
            OP_LED_WHITE => CommandClass::Led(LedColor::White),
            OP_WIFI_SET => CommandClass::Connectivity(ConnectivityOp::WifiSet),
            OP_WIFI_CONNECT => CommandClass::Connectivity(ConnectivityOp::WifiConnect),
            OP_WIFI_DISCONNECT => CommandClass::Connectivity(ConnectivityOp::WifiDisconnect),
            OP_WIFI_STATUS => CommandClass::Connectivity(ConnectivityOp::WifiStatus),
            OP_WIFI_CLEAR => CommandClass::Connectivity(ConnectivityOp::WifiClear),
            OP_OTA_UPDATE => CommandClass::Connectivity(ConnectivityOp::OtaUpdate),
            OP_OTA_CHECK => CommandClass::Connectivity(ConnectivityOp::OtaCheck),
            OP_GET_VERSION => CommandClass::Connectivity(ConnectivityOp::Version),
            OP_GET_INFO => CommandClass::Connectivity(ConnectivityOp::Info),
            OP_PING => CommandClass::Keepalive,
            other => CommandClass::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame_rejected() {
        assert_eq!(CommandFrame::parse(&[]), None);
    }

    #[test]
    fn test_opcode_only_frame() {
        let frame = CommandFrame::parse(&[OP_FORWARD]).unwrap();
        assert_eq!(frame.opcode, OP_FORWARD);
        assert_eq!(frame.param(), 0);
        assert_eq!(frame.classify(), CommandClass::Motion(MotionCommand::Forward));
    }

    #[test]
    fn test_manual_param() {
        let frame = CommandFrame::parse(&[OP_MANUAL_PWM, 80]).unwrap();
        assert_eq!(frame.param(), 80);
        assert_eq!(
            frame.classify(),
            CommandClass::Motion(MotionCommand::Manual(80))
        );
    }

    #[test]
    fn test_led_opcodes() {
        for (op, color) in [
            (OP_LED_GREEN, LedColor::Green),
            (OP_LED_RED, LedColor::Red),
            (OP_LED_BLUE, LedColor::Blue),
            (OP_LED_WHITE, LedColor::White),
        ] {
            let frame = CommandFrame::parse(&[op]).unwrap();
            assert_eq!(frame.classify(), CommandClass::Led(color));
        }
    }

    #[test]
    fn test_connectivity_range() {
        let connect = CommandFrame::parse(&[OP_WIFI_CONNECT]).unwrap();
        assert_eq!(
            connect.classify(),
            CommandClass::Connectivity(ConnectivityOp::WifiConnect)
        );

        let info = CommandFrame::parse(&[OP_GET_INFO]).unwrap();
        assert_eq!(
            info.classify(),
            CommandClass::Connectivity(ConnectivityOp::Info)
        );
    }

    #[test]
    fn test_wifi_set_payload_preserved() {
        let frame = CommandFrame::parse(&[OP_WIFI_SET, b'h', b'o', b'm', b'e', 0, b'p', b'w', 0])
            .unwrap();
        assert_eq!(frame.payload.as_slice(), b"home\0pw\0");
    }

    #[test]
    fn test_keepalive() {
        let frame = CommandFrame::parse(&[OP_PING]).unwrap();
        assert_eq!(frame.classify(), CommandClass::Keepalive);
    }

    #[test]
    fn test_unknown_opcode() {
        let frame = CommandFrame::parse(&[0x42]).unwrap();
        assert_eq!(frame.classify(), CommandClass::Unknown(0x42));
    }

    #[test]
    fn test_oversized_payload_truncated() {
        let mut buf = [0u8; MAX_COMMAND_PAYLOAD + 10];
        buf[0] = OP_WIFI_SET;
        let frame = CommandFrame::parse(&buf).unwrap();
        assert_eq!(frame.payload.len(), MAX_COMMAND_PAYLOAD);
    }
}
