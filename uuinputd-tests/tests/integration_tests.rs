// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

#![allow(unused_imports)]

use nix::errno::Errno;
use std::io::Read;
use std::os::fd::AsRawFd;
use uuinputd_tests::legacy_client::*;
use uuinputd_tests::run_uuinputd::{self, TEST_DEVICE_PATH};
use uinput_ioctls::*;

#[cfg(all(feature = "requires-privileges", feature = "requires-uinput"))]
#[test]
fn test_keyboard_through_uuinput() {
    run_uuinputd::ensure_uuinputd_running();

    let mut client = LegacyClient::open(TEST_DEVICE_PATH)
        .unwrap_or_else(|e| panic!("failed to open {TEST_DEVICE_PATH}: {e}"));
    client.enable_key(KEY_A).expect("set-bit ioctls are forwarded");

    let written = client
        .write_user_dev("uuinputd-test-keyboard")
        .expect("legacy setup is written through");
    assert_eq!(written, std::mem::size_of::<libc::uinput_user_dev>());

    client.create().expect("UI_DEV_CREATE is forwarded");

    for value in [1, 0] {
        client.emit(EV_KEY, KEY_A, value).unwrap();
        client.emit(EV_SYN, SYN_REPORT, 0).unwrap();
    }

    client.destroy().expect("UI_DEV_DESTROY is forwarded");
}

#[cfg(all(feature = "requires-privileges", feature = "requires-uinput"))]
#[test]
fn test_unsupported_ioctl_is_rejected() {
    run_uuinputd::ensure_uuinputd_running();

    let client = LegacyClient::open(TEST_DEVICE_PATH).unwrap();
    let mut version = 0;
    let result = unsafe { ui_get_version(client.file().as_raw_fd(), &mut version) };

    // uuinputd answers ENOSYS, which the fuse ioctl path hands out as ENOTTY
    assert_eq!(result, Err(Errno::ENOTTY));
}

#[cfg(all(feature = "requires-privileges", feature = "requires-uinput"))]
#[test]
fn test_errors_of_uinput_are_passed_through() {
    run_uuinputd::ensure_uuinputd_running();

    let client = LegacyClient::open(TEST_DEVICE_PATH).unwrap();

    // creating without any setup is refused by uinput itself
    assert_eq!(client.create(), Err(Errno::EINVAL));

    // uinput opens its files with stream_open(), so the positioned read the proxy
    // issues is refused by the vfs with ESPIPE before uinput itself is asked
    let mut buf = vec![0u8; 100_000];
    let mut file = client.file();
    let err = file
        .read(&mut buf)
        .expect_err("uinput does not accept positioned reads");
    assert_eq!(err.raw_os_error().map(Errno::from_raw), Some(Errno::ESPIPE));
}
