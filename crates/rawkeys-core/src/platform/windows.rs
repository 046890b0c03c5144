// Rawkeys Windows Backend
// GetRawInputData / RegisterRawInputDevices / MapVirtualKeyW bindings

use core::ffi::c_void;
use core::mem::size_of;

use windows_sys::Win32::Foundation::{GetLastError, HWND};
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{MapVirtualKeyW, MAPVK_VSC_TO_VK_EX};
use windows_sys::Win32::UI::Input::{
    GetRawInputData, RegisterRawInputDevices, HRAWINPUT, RAWINPUTDEVICE, RAWINPUTHEADER,
    RID_INPUT,
};

use crate::disambiguate::ScanCodeMap;
use crate::raw::{RawInputSource, SourceError};
use crate::registration::{DeviceRequest, Registrar, RegistrationError};
use crate::VirtualKey;

/// Raw input notifications delivered through WM_INPUT.
///
/// The handle is the message's LPARAM.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsRawInput;

impl RawInputSource for WindowsRawInput {
    type Handle = isize;

    fn required_size(&self, lparam: isize) -> Result<usize, SourceError> {
        let mut size: u32 = 0;
        // SAFETY: a null data pointer asks only for the size
        let result = unsafe {
            GetRawInputData(
                lparam as HRAWINPUT,
                RID_INPUT,
                core::ptr::null_mut(),
                &mut size,
                size_of::<RAWINPUTHEADER>() as u32,
            )
        };
        if result == u32::MAX {
            return Err(SourceError::SizeQuery {
                code: unsafe { GetLastError() },
            });
        }
        Ok(size as usize)
    }

    fn fetch(&self, lparam: isize, buf: &mut [u8]) -> Result<usize, SourceError> {
        let mut size = buf.len() as u32;
        // SAFETY: buf is valid for `size` bytes for the duration of the call
        let result = unsafe {
            GetRawInputData(
                lparam as HRAWINPUT,
                RID_INPUT,
                buf.as_mut_ptr() as *mut c_void,
                &mut size,
                size_of::<RAWINPUTHEADER>() as u32,
            )
        };
        if result == u32::MAX {
            return Err(SourceError::Fetch {
                code: unsafe { GetLastError() },
            });
        }
        Ok(result as usize)
    }
}

/// Registers devices for a target window (0 follows keyboard focus)
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsRegistrar {
    target: isize,
}

impl WindowsRegistrar {
    pub fn new(target: isize) -> Self {
        Self { target }
    }
}

impl Registrar for WindowsRegistrar {
    fn register(&mut self, requests: &[DeviceRequest]) -> Result<(), RegistrationError> {
        let devices: Vec<RAWINPUTDEVICE> = requests
            .iter()
            .map(|req| RAWINPUTDEVICE {
                usUsagePage: req.usage_page,
                usUsage: req.usage,
                dwFlags: req.flags,
                hwndTarget: self.target as HWND,
            })
            .collect();

        // SAFETY: devices outlives the call and the count matches
        let ok = unsafe {
            RegisterRawInputDevices(
                devices.as_ptr(),
                devices.len() as u32,
                size_of::<RAWINPUTDEVICE>() as u32,
            )
        };
        if ok == 0 {
            return Err(RegistrationError::Os {
                code: unsafe { GetLastError() },
            });
        }
        Ok(())
    }
}

/// Scan-code resolution through the active keyboard layout
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemScanCodeMap;

impl ScanCodeMap for SystemScanCodeMap {
    fn scan_to_virtual_key(&self, make_code: u16) -> VirtualKey {
        let vk = unsafe { MapVirtualKeyW(make_code as u32, MAPVK_VSC_TO_VK_EX) };
        VirtualKey(vk as u16)
    }
}
