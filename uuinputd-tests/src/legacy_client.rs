// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

//! A minimal uinput client that only uses the calling conventions uuinputd
//! forwards: set-bit ioctls, the legacy `uinput_user_dev` write, create/destroy
//! and event writes.

use libc::{input_event, timeval, uinput_user_dev};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::mem::size_of;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use uinput_ioctls::*;

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const SYN_REPORT: u16 = 0;
pub const BUS_USB: u16 = 0x03;
pub const KEY_A: u16 = 30;

pub struct LegacyClient {
    file: File,
}

impl LegacyClient {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)?;
        Ok(Self { file })
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn enable_key(&self, key: u16) -> nix::Result<()> {
        let fd = self.file.as_raw_fd();
        unsafe {
            ui_set_evbit(fd, EV_KEY.into())?;
            ui_set_keybit(fd, key.into())?;
        }
        Ok(())
    }

    /// Writes the `uinput_user_dev` structure that precedes UI_DEV_CREATE on
    /// kernels without UI_DEV_SETUP.
    pub fn write_user_dev(&mut self, name: &str) -> io::Result<usize> {
        let mut user_dev: uinput_user_dev = unsafe { std::mem::zeroed() };
        for (dst, src) in user_dev.name.iter_mut().zip(name.bytes().take(79)) {
            *dst = src as libc::c_char;
        }
        user_dev.id.bustype = BUS_USB;
        // test ids of pid.codes
        user_dev.id.vendor = 0x1209;
        user_dev.id.product = 0x0001;
        user_dev.id.version = 1;

        let bytes = unsafe {
            std::slice::from_raw_parts(
                &user_dev as *const uinput_user_dev as *const u8,
                size_of::<uinput_user_dev>(),
            )
        };
        self.file.write(bytes)
    }

    pub fn create(&self) -> nix::Result<i32> {
        unsafe { ui_dev_create(self.file.as_raw_fd()) }
    }

    pub fn destroy(&self) -> nix::Result<i32> {
        unsafe { ui_dev_destroy(self.file.as_raw_fd()) }
    }

    pub fn emit(&mut self, type_: u16, code: u16, value: i32) -> io::Result<usize> {
        let event = input_event {
            time: timeval {
                tv_sec: 0,
                tv_usec: 0,
            },
            type_,
            code,
            value,
        };
        let bytes = unsafe {
            std::slice::from_raw_parts(
                &event as *const input_event as *const u8,
                size_of::<input_event>(),
            )
        };
        self.file.write(bytes)
    }
}
