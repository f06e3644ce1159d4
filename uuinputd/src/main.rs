// SPDX-License-Identifier: MIT
// uuinputd: user-space proxy for /dev/uinput
//
// - Exposes a synthetic character device (via CUSE).
// - Forwards open, read, write, ioctl and close to the real /dev/uinput.
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use ::cuse_lowlevel::*;
use anyhow::{bail, Context};
use log::info;
use std::ffi::CString;
use std::os::raw::c_char;

pub mod cuse_device;
pub mod global_config;
pub mod proxy;

use crate::cuse_device::state::{initialize_error_log_limiter, initialize_proxy};
use crate::cuse_device::uuinput_make_cuse_ops;
use crate::global_config::{GlobalConfig, DEFAULT_DEVNAME, REAL_DEVICE_PATH};
use crate::proxy::device::UinputDevice;

use clap::Parser;

const DEV_PREFIX: &str = "/dev/";
const DEVNAME_MAX_LEN: usize = 128 - DEV_PREFIX.len();

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Major device number
    #[arg(long)]
    major: Option<u32>,

    /// Minor device number
    #[arg(long)]
    minor: Option<u32>,

    /// Device name (without /dev/)
    #[arg(long)]
    devname: Option<String>,
}

fn validate_args(args: &Args) -> Result<(), String> {
    // major/minor must appear together
    match (&args.major, &args.minor) {
        (Some(_), Some(_)) | (None, None) => {}
        _ => {
            return Err("--major and --minor must be specified together or not at all".into());
        }
    }

    if let Some(devname) = &args.devname {
        if devname.is_empty() || devname.contains('/') || devname.contains('\0') {
            return Err("--devname must be a non-empty name without '/'".into());
        }
        if devname.len() >= DEVNAME_MAX_LEN {
            return Err(format!(
                "--devname must be shorter than {} bytes",
                DEVNAME_MAX_LEN
            ));
        }
    }

    Ok(())
}

fn config_from_args(args: &Args) -> GlobalConfig {
    // setting dev_major and dev_minor to 0 leads to a dynamic assignment of the major and minor, very likely beginning with 234:0
    // see  in https://www.kernel.org/doc/Documentation/admin-guide/devices.txt
    let (major, minor) = match (args.major, args.minor) {
        (Some(major), Some(minor)) => (major, minor),
        _ => (0, 0),
    };
    GlobalConfig {
        devname: args
            .devname
            .clone()
            .unwrap_or_else(|| DEFAULT_DEVNAME.to_string()),
        major,
        minor,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let args = Args::parse();
    let argv0 = std::env::args_os()
        .next()
        .context("couldn't retrieve program name")?;

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {e}");
        std::process::exit(2);
    }

    global_config::initialize_global_config(config_from_args(&args));
    let config = global_config::get_config().context("global config is not initialized")?;
    initialize_proxy(UinputDevice::new(REAL_DEVICE_PATH));
    initialize_error_log_limiter();

    info!(
        "Starting uuinputd: {}{} forwards to {}",
        DEV_PREFIX, config.devname, REAL_DEVICE_PATH
    );

    let cuse_ops = uuinput_make_cuse_ops();

    let devname = CString::new(format!("DEVNAME={}", config.devname))?;
    let mut dev_info_argv: Vec<*const c_char> = vec![
        devname.as_ptr(),  // pointer to the C string
        std::ptr::null(), // null terminator, often required by C APIs
    ];

    let ci = cuse_lowlevel::cuse_info {
        dev_major: config.major,
        dev_minor: config.minor,
        dev_info_argc: 1,
        dev_info_argv: dev_info_argv.as_mut_ptr(),
        // forwarded ioctls carry their argument as plain integer, which only
        // unrestricted ioctls deliver unchanged
        flags: cuse_lowlevel::CUSE_UNRESTRICTED_IOCTL,
    };

    // foreground and single-threaded: one request at a time, like the real device
    let program_name = CString::new(argv0.as_encoded_bytes())?;
    let foreground = CString::new("-f")?;
    let singlethreaded = CString::new("-s")?;
    let mut cuse_argv: Vec<*mut c_char> = vec![
        program_name.as_ptr() as *mut c_char,
        foreground.as_ptr() as *mut c_char,
        singlethreaded.as_ptr() as *mut c_char,
        std::ptr::null_mut(), // null terminator, often required by C APIs
    ];

    let ret = unsafe {
        cuse_lowlevel::cuse_lowlevel_main(
            3,
            cuse_argv.as_mut_ptr(),
            &ci,
            &cuse_ops,
            std::ptr::null_mut(),
        )
    };
    info!("Stopping uuinputd");

    if ret != 0 {
        bail!("cuse session ended with error code {}", ret);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("uuinputd").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_register_uuinput_with_dynamic_numbers() {
        let args = parse(&[]);
        assert!(validate_args(&args).is_ok());
        assert_eq!(
            config_from_args(&args),
            GlobalConfig {
                devname: "uuinput".to_string(),
                major: 0,
                minor: 0
            }
        );
    }

    #[test]
    fn major_and_minor_go_together() {
        assert!(validate_args(&parse(&["--major", "120"])).is_err());
        assert!(validate_args(&parse(&["--minor", "3"])).is_err());

        let args = parse(&["--major", "120", "--minor", "3", "--devname", "uuinput-test"]);
        assert!(validate_args(&args).is_ok());
        let config = config_from_args(&args);
        assert_eq!((config.major, config.minor), (120, 3));
        assert_eq!(config.devname, "uuinput-test");
    }

    #[test]
    fn devname_is_checked() {
        assert!(validate_args(&parse(&["--devname", "input/uuinput"])).is_err());
        assert!(validate_args(&parse(&["--devname", ""])).is_err());
        let too_long = "u".repeat(DEVNAME_MAX_LEN);
        assert!(validate_args(&parse(&["--devname", &too_long])).is_err());
    }
}
