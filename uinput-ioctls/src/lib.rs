// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

//! Request codes of the uinput ioctls, see `include/uapi/linux/uinput.h`.
//!
//! Only the commands that use the integer-argument or the no-argument calling
//! convention get wrappers. `UI_GET_VERSION` and `UI_DEV_SETUP` are kept as
//! request codes so that callers can recognize (and reject) the buffer-based ones.

use libc::{c_uint, uinput_setup};

use nix::{ioctl_none, ioctl_read, ioctl_write_int, request_code_none, request_code_read, request_code_write};

pub const UINPUT_IOCTL_BASE: u8 = b'U';

pub const UI_DEV_CREATE: u64 = request_code_none!(UINPUT_IOCTL_BASE, 1);
pub const UI_DEV_DESTROY: u64 = request_code_none!(UINPUT_IOCTL_BASE, 2);
pub const UI_DEV_SETUP: u64 =
    request_code_write!(UINPUT_IOCTL_BASE, 3, ::std::mem::size_of::<uinput_setup>());

pub const UI_GET_VERSION: u64 =
    request_code_read!(UINPUT_IOCTL_BASE, 45, ::std::mem::size_of::<c_uint>());

// The set-bit commands are declared as _IOW(..., int) in uinput.h although the
// kernel reads the value from the ioctl argument itself and not from user memory.
pub const UI_SET_EVBIT: u64 = request_code_write!(UINPUT_IOCTL_BASE, 100, std::mem::size_of::<c_uint>());
pub const UI_SET_KEYBIT: u64 = request_code_write!(UINPUT_IOCTL_BASE, 101, std::mem::size_of::<c_uint>());
pub const UI_SET_RELBIT: u64 = request_code_write!(UINPUT_IOCTL_BASE, 102, std::mem::size_of::<c_uint>());
pub const UI_SET_ABSBIT: u64 = request_code_write!(UINPUT_IOCTL_BASE, 103, std::mem::size_of::<c_uint>());
pub const UI_SET_MSCBIT: u64 = request_code_write!(UINPUT_IOCTL_BASE, 104, std::mem::size_of::<c_uint>());
pub const UI_SET_LEDBIT: u64 = request_code_write!(UINPUT_IOCTL_BASE, 105, std::mem::size_of::<c_uint>());
pub const UI_SET_SNDBIT: u64 = request_code_write!(UINPUT_IOCTL_BASE, 106, std::mem::size_of::<c_uint>());
pub const UI_SET_FFBIT: u64 = request_code_write!(UINPUT_IOCTL_BASE, 107, std::mem::size_of::<c_uint>());
pub const UI_SET_SWBIT: u64 = request_code_write!(UINPUT_IOCTL_BASE, 109, std::mem::size_of::<c_uint>());
pub const UI_SET_PROPBIT: u64 = request_code_write!(UINPUT_IOCTL_BASE, 110, std::mem::size_of::<c_uint>());

ioctl_none!(ui_dev_create, b'U', 1);
ioctl_none!(ui_dev_destroy, b'U', 2);

ioctl_read! { ui_get_version, b'U', 45, c_uint }

ioctl_write_int!(ui_set_evbit, b'U', 100);
ioctl_write_int!(ui_set_keybit, b'U', 101);
ioctl_write_int!(ui_set_relbit, b'U', 102);
ioctl_write_int!(ui_set_absbit, b'U', 103);
ioctl_write_int!(ui_set_mscbit, b'U', 104);
ioctl_write_int!(ui_set_ledbit, b'U', 105);
ioctl_write_int!(ui_set_sndbit, b'U', 106);
ioctl_write_int!(ui_set_ffbit, b'U', 107);
ioctl_write_int!(ui_set_swbit, b'U', 109);
ioctl_write_int!(ui_set_propbit, b'U', 110);

#[cfg(test)]
mod tests {
    use super::*;

    // Values as printed by a C program including <linux/uinput.h> on x86_64.
    #[test]
    fn request_codes_match_the_kernel_header() {
        assert_eq!(UI_DEV_CREATE, 0x5501);
        assert_eq!(UI_DEV_DESTROY, 0x5502);
        assert_eq!(UI_SET_EVBIT, 0x40045564);
        assert_eq!(UI_SET_KEYBIT, 0x40045565);
        assert_eq!(UI_SET_ABSBIT, 0x40045567);
        assert_eq!(UI_SET_FFBIT, 0x4004556b);
        assert_eq!(UI_SET_PROPBIT, 0x4004556e);
        assert_eq!(UI_DEV_SETUP, 0x405c5503);
        assert_eq!(UI_GET_VERSION, 0x8004552d);
    }
}
