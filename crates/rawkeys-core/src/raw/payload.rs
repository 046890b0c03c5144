// Rawkeys Raw Payload Layout
// Safe interpretation of the RAWINPUT byte layout (header + device block)
//
// All fields are little endian. The header carries two pointer-width
// fields, so its size depends on the target: 24 bytes on 64-bit, 16 on
// 32-bit.

use std::mem::size_of;

use crate::VirtualKey;

/// Header type tag for pointing devices
pub const RIM_TYPEMOUSE: u32 = 0;
/// Header type tag for keyboards
pub const RIM_TYPEKEYBOARD: u32 = 1;
/// Header type tag for every other HID device
pub const RIM_TYPEHID: u32 = 2;

pub const WM_KEYDOWN: u32 = 0x0100;
pub const WM_KEYUP: u32 = 0x0101;
pub const WM_SYSKEYDOWN: u32 = 0x0104;
pub const WM_SYSKEYUP: u32 = 0x0105;

pub const RI_KEY_BREAK: u16 = 0x0001;
pub const RI_KEY_E0: u16 = 0x0002;
pub const RI_KEY_E1: u16 = 0x0004;

pub const RI_MOUSE_LEFT_BUTTON_DOWN: u16 = 0x0001;
pub const RI_MOUSE_LEFT_BUTTON_UP: u16 = 0x0002;
pub const RI_MOUSE_RIGHT_BUTTON_DOWN: u16 = 0x0004;
pub const RI_MOUSE_RIGHT_BUTTON_UP: u16 = 0x0008;
pub const RI_MOUSE_MIDDLE_BUTTON_DOWN: u16 = 0x0010;
pub const RI_MOUSE_MIDDLE_BUTTON_UP: u16 = 0x0020;
pub const RI_MOUSE_BUTTON_4_DOWN: u16 = 0x0040;
pub const RI_MOUSE_BUTTON_4_UP: u16 = 0x0080;
pub const RI_MOUSE_BUTTON_5_DOWN: u16 = 0x0100;
pub const RI_MOUSE_BUTTON_5_UP: u16 = 0x0200;
pub const RI_MOUSE_WHEEL: u16 = 0x0400;

/// Size of RAWINPUTHEADER on this target
pub const HEADER_SIZE: usize = 8 + 2 * size_of::<usize>();
/// Size of RAWKEYBOARD
pub const KEYBOARD_SIZE: usize = 16;
/// Size of RAWMOUSE
pub const MOUSE_SIZE: usize = 24;

/// Device class declared in the payload header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Mouse,
    Keyboard,
    Hid,
    Other(u32),
}

impl From<u32> for DeviceType {
    fn from(tag: u32) -> Self {
        match tag {
            RIM_TYPEMOUSE => DeviceType::Mouse,
            RIM_TYPEKEYBOARD => DeviceType::Keyboard,
            RIM_TYPEHID => DeviceType::Hid,
            other => DeviceType::Other(other),
        }
    }
}

impl DeviceType {
    fn tag(self) -> u32 {
        match self {
            DeviceType::Mouse => RIM_TYPEMOUSE,
            DeviceType::Keyboard => RIM_TYPEKEYBOARD,
            DeviceType::Hid => RIM_TYPEHID,
            DeviceType::Other(tag) => tag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    pub device_type: DeviceType,
    /// Total payload size declared by the OS, header included
    pub size: u32,
    /// Opaque source device handle
    pub device: u64,
    pub wparam: u64,
}

/// Kind of keyboard message carried by a keyboard payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMessage {
    KeyDown,
    SysKeyDown,
    KeyUp,
    SysKeyUp,
}

impl KeyMessage {
    pub fn from_raw(message: u32) -> Option<Self> {
        match message {
            WM_KEYDOWN => Some(KeyMessage::KeyDown),
            WM_SYSKEYDOWN => Some(KeyMessage::SysKeyDown),
            WM_KEYUP => Some(KeyMessage::KeyUp),
            WM_SYSKEYUP => Some(KeyMessage::SysKeyUp),
            _ => None,
        }
    }

    pub fn to_raw(self) -> u32 {
        match self {
            KeyMessage::KeyDown => WM_KEYDOWN,
            KeyMessage::SysKeyDown => WM_SYSKEYDOWN,
            KeyMessage::KeyUp => WM_KEYUP,
            KeyMessage::SysKeyUp => WM_SYSKEYUP,
        }
    }

    pub fn is_down(self) -> bool {
        matches!(self, KeyMessage::KeyDown | KeyMessage::SysKeyDown)
    }
}

/// Keyboard block (RAWKEYBOARD)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardPayload {
    /// Hardware scan code
    pub make_code: u16,
    /// RI_KEY_* bits
    pub flags: u16,
    /// Generic virtual-key code as reported by the OS
    pub vkey: VirtualKey,
    /// Window message the keystroke would have produced
    pub message: u32,
    pub extra_information: u32,
}

impl KeyboardPayload {
    pub fn new(vkey: VirtualKey, make_code: u16, flags: u16, message: KeyMessage) -> Self {
        Self {
            make_code,
            flags,
            vkey,
            message: message.to_raw(),
            extra_information: 0,
        }
    }

    /// E0 prefix: distinguishes right Control/Alt and the navigation cluster
    pub fn is_extended(&self) -> bool {
        self.flags & RI_KEY_E0 != 0
    }

    pub fn message_kind(&self) -> Option<KeyMessage> {
        KeyMessage::from_raw(self.message)
    }
}

/// Mouse block (RAWMOUSE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MousePayload {
    /// MOUSE_* motion flags (relative vs absolute)
    pub flags: u16,
    /// RI_MOUSE_* transition bits
    pub button_flags: u16,
    /// Wheel delta when RI_MOUSE_WHEEL is set
    pub button_data: u16,
    pub raw_buttons: u32,
    pub last_x: i32,
    pub last_y: i32,
    pub extra_information: u32,
}

impl MousePayload {
    pub fn motion(dx: i32, dy: i32) -> Self {
        Self {
            last_x: dx,
            last_y: dy,
            ..Self::default()
        }
    }

    pub fn with_buttons(mut self, button_flags: u16) -> Self {
        self.button_flags = button_flags;
        self
    }

    pub fn has_flag(&self, flag: u16) -> bool {
        self.button_flags & flag != 0
    }
}

/// A classified payload, copied out of the decode buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedEvent {
    Keyboard(KeyboardPayload),
    Mouse(MousePayload),
}

fn read_u16(bytes: &[u8], offset: usize) -> Option<u16> {
    let raw = bytes.get(offset..offset + 2)?;
    Some(u16::from_le_bytes(raw.try_into().ok()?))
}

fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let raw = bytes.get(offset..offset + 4)?;
    Some(u32::from_le_bytes(raw.try_into().ok()?))
}

fn read_i32(bytes: &[u8], offset: usize) -> Option<i32> {
    read_u32(bytes, offset).map(|v| v as i32)
}

fn read_ptr(bytes: &[u8], offset: usize) -> Option<u64> {
    if size_of::<usize>() == 8 {
        let raw = bytes.get(offset..offset + 8)?;
        Some(u64::from_le_bytes(raw.try_into().ok()?))
    } else {
        read_u32(bytes, offset).map(u64::from)
    }
}

/// Read the header from the front of a payload
pub fn parse_header(bytes: &[u8]) -> Option<RawHeader> {
    let ptr = size_of::<usize>();
    Some(RawHeader {
        device_type: DeviceType::from(read_u32(bytes, 0)?),
        size: read_u32(bytes, 4)?,
        device: read_ptr(bytes, 8)?,
        wparam: read_ptr(bytes, 8 + ptr)?,
    })
}

fn parse_keyboard(block: &[u8]) -> Option<KeyboardPayload> {
    Some(KeyboardPayload {
        make_code: read_u16(block, 0)?,
        flags: read_u16(block, 2)?,
        vkey: VirtualKey(read_u16(block, 6)?),
        message: read_u32(block, 8)?,
        extra_information: read_u32(block, 12)?,
    })
}

fn parse_mouse(block: &[u8]) -> Option<MousePayload> {
    Some(MousePayload {
        flags: read_u16(block, 0)?,
        button_flags: read_u16(block, 4)?,
        button_data: read_u16(block, 6)?,
        raw_buttons: read_u32(block, 8)?,
        last_x: read_i32(block, 12)?,
        last_y: read_i32(block, 16)?,
        extra_information: read_u32(block, 20)?,
    })
}

/// Classify a payload. HID and unknown device types yield `None`, as do
/// payloads too short for their declared class.
pub fn parse(bytes: &[u8]) -> Option<DecodedEvent> {
    let header = parse_header(bytes)?;
    let block = bytes.get(HEADER_SIZE..)?;
    match header.device_type {
        DeviceType::Keyboard => parse_keyboard(block).map(DecodedEvent::Keyboard),
        DeviceType::Mouse => parse_mouse(block).map(DecodedEvent::Mouse),
        DeviceType::Hid | DeviceType::Other(_) => None,
    }
}

fn encode_header(out: &mut Vec<u8>, device_type: DeviceType, block_len: usize) {
    out.extend_from_slice(&device_type.tag().to_le_bytes());
    out.extend_from_slice(&((HEADER_SIZE + block_len) as u32).to_le_bytes());
    // hDevice and wParam are opaque; zero them
    out.resize(HEADER_SIZE, 0);
}

/// Serialize a payload in the same layout the OS hands out
pub fn encode(event: &DecodedEvent) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + MOUSE_SIZE);
    match event {
        DecodedEvent::Keyboard(kb) => {
            encode_header(&mut out, DeviceType::Keyboard, KEYBOARD_SIZE);
            out.extend_from_slice(&kb.make_code.to_le_bytes());
            out.extend_from_slice(&kb.flags.to_le_bytes());
            out.extend_from_slice(&0u16.to_le_bytes());
            out.extend_from_slice(&kb.vkey.0.to_le_bytes());
            out.extend_from_slice(&kb.message.to_le_bytes());
            out.extend_from_slice(&kb.extra_information.to_le_bytes());
        }
        DecodedEvent::Mouse(m) => {
            encode_header(&mut out, DeviceType::Mouse, MOUSE_SIZE);
            out.extend_from_slice(&m.flags.to_le_bytes());
            out.extend_from_slice(&0u16.to_le_bytes());
            out.extend_from_slice(&m.button_flags.to_le_bytes());
            out.extend_from_slice(&m.button_data.to_le_bytes());
            out.extend_from_slice(&m.raw_buttons.to_le_bytes());
            out.extend_from_slice(&m.last_x.to_le_bytes());
            out.extend_from_slice(&m.last_y.to_le_bytes());
            out.extend_from_slice(&m.extra_information.to_le_bytes());
        }
    }
    out
}

/// Serialize a generic HID payload (RAWHID: size, count, report bytes)
pub fn encode_hid(report: &[u8]) -> Vec<u8> {
    let block_len = 8 + report.len();
    let mut out = Vec::with_capacity(HEADER_SIZE + block_len);
    encode_header(&mut out, DeviceType::Hid, block_len);
    out.extend_from_slice(&(report.len() as u32).to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(report);
    out
}
