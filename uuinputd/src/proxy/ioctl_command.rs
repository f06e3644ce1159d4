// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

// ioctls of uinput are listed on https://www.freedesktop.org/software/libevdev/doc/latest/ioctls.html
// Only the commands whose argument is a plain integer or which take no argument at all
// are forwarded. Everything that needs the in/out buffer convention of cuse
// (UI_DEV_SETUP, UI_ABS_SETUP, UI_GET_SYSNAME, UI_SET_PHYS, the ff upload/erase family, ...)
// falls into `Unsupported`.

use nix::sys::ioctl::ioctl_param_type;
use uinput_ioctls::*;

/// The capability bit set by one of the `UI_SET_*BIT` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityBit {
    Event,
    Key,
    Relative,
    Absolute,
    Misc,
    Led,
    Sound,
    ForceFeedback,
    Switch,
    Property,
}

impl CapabilityBit {
    pub const ALL: [CapabilityBit; 10] = [
        CapabilityBit::Event,
        CapabilityBit::Key,
        CapabilityBit::Relative,
        CapabilityBit::Absolute,
        CapabilityBit::Misc,
        CapabilityBit::Led,
        CapabilityBit::Sound,
        CapabilityBit::ForceFeedback,
        CapabilityBit::Switch,
        CapabilityBit::Property,
    ];

    pub fn request_code(&self) -> u64 {
        match self {
            CapabilityBit::Event => UI_SET_EVBIT,
            CapabilityBit::Key => UI_SET_KEYBIT,
            CapabilityBit::Relative => UI_SET_RELBIT,
            CapabilityBit::Absolute => UI_SET_ABSBIT,
            CapabilityBit::Misc => UI_SET_MSCBIT,
            CapabilityBit::Led => UI_SET_LEDBIT,
            CapabilityBit::Sound => UI_SET_SNDBIT,
            CapabilityBit::ForceFeedback => UI_SET_FFBIT,
            CapabilityBit::Switch => UI_SET_SWBIT,
            CapabilityBit::Property => UI_SET_PROPBIT,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CapabilityBit::Event => "UI_SET_EVBIT",
            CapabilityBit::Key => "UI_SET_KEYBIT",
            CapabilityBit::Relative => "UI_SET_RELBIT",
            CapabilityBit::Absolute => "UI_SET_ABSBIT",
            CapabilityBit::Misc => "UI_SET_MSCBIT",
            CapabilityBit::Led => "UI_SET_LEDBIT",
            CapabilityBit::Sound => "UI_SET_SNDBIT",
            CapabilityBit::ForceFeedback => "UI_SET_FFBIT",
            CapabilityBit::Switch => "UI_SET_SWBIT",
            CapabilityBit::Property => "UI_SET_PROPBIT",
        }
    }
}

/// Creation and teardown of the virtual input device as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Create,
    Destroy,
}

impl Lifecycle {
    pub fn request_code(&self) -> u64 {
        match self {
            Lifecycle::Create => UI_DEV_CREATE,
            Lifecycle::Destroy => UI_DEV_DESTROY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Lifecycle::Create => "UI_DEV_CREATE",
            Lifecycle::Destroy => "UI_DEV_DESTROY",
        }
    }
}

/// An ioctl command code sorted by its calling convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoctlCommand {
    SetBit(CapabilityBit),
    Lifecycle(Lifecycle),
    Unsupported(u64),
}

impl IoctlCommand {
    pub fn from_request_code(cmd: u64) -> IoctlCommand {
        match cmd {
            UI_SET_EVBIT => IoctlCommand::SetBit(CapabilityBit::Event),
            UI_SET_KEYBIT => IoctlCommand::SetBit(CapabilityBit::Key),
            UI_SET_RELBIT => IoctlCommand::SetBit(CapabilityBit::Relative),
            UI_SET_ABSBIT => IoctlCommand::SetBit(CapabilityBit::Absolute),
            UI_SET_MSCBIT => IoctlCommand::SetBit(CapabilityBit::Misc),
            UI_SET_LEDBIT => IoctlCommand::SetBit(CapabilityBit::Led),
            UI_SET_SNDBIT => IoctlCommand::SetBit(CapabilityBit::Sound),
            UI_SET_FFBIT => IoctlCommand::SetBit(CapabilityBit::ForceFeedback),
            UI_SET_SWBIT => IoctlCommand::SetBit(CapabilityBit::Switch),
            UI_SET_PROPBIT => IoctlCommand::SetBit(CapabilityBit::Property),
            UI_DEV_CREATE => IoctlCommand::Lifecycle(Lifecycle::Create),
            UI_DEV_DESTROY => IoctlCommand::Lifecycle(Lifecycle::Destroy),
            other => IoctlCommand::Unsupported(other),
        }
    }

    /// Pairs a forwardable command with the argument of the ioctl call.
    /// `None` for unsupported commands, which must never reach the real device.
    pub fn into_request(self, arg: ioctl_param_type) -> Option<UinputRequest> {
        match self {
            IoctlCommand::SetBit(bit) => Some(UinputRequest::SetBit(bit, arg)),
            IoctlCommand::Lifecycle(lifecycle) => Some(UinputRequest::Lifecycle(lifecycle)),
            IoctlCommand::Unsupported(_) => None,
        }
    }
}

/// An ioctl ready to be issued against the real device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UinputRequest {
    SetBit(CapabilityBit, ioctl_param_type),
    Lifecycle(Lifecycle),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_set_bit_code_maps_back_to_its_bit() {
        for bit in CapabilityBit::ALL {
            assert_eq!(
                IoctlCommand::from_request_code(bit.request_code()),
                IoctlCommand::SetBit(bit),
                "{}",
                bit.name()
            );
        }
    }

    #[test]
    fn lifecycle_codes_are_recognized() {
        assert_eq!(
            IoctlCommand::from_request_code(UI_DEV_CREATE),
            IoctlCommand::Lifecycle(Lifecycle::Create)
        );
        assert_eq!(
            IoctlCommand::from_request_code(UI_DEV_DESTROY),
            IoctlCommand::Lifecycle(Lifecycle::Destroy)
        );
    }

    #[test]
    fn buffer_based_commands_are_unsupported() {
        for cmd in [UI_DEV_SETUP, UI_GET_VERSION, 0, 0xdead_beef] {
            assert_eq!(
                IoctlCommand::from_request_code(cmd),
                IoctlCommand::Unsupported(cmd)
            );
            assert_eq!(IoctlCommand::from_request_code(cmd).into_request(7), None);
        }
    }

    #[test]
    fn set_bit_keeps_the_integer_argument() {
        let request = IoctlCommand::from_request_code(UI_SET_KEYBIT).into_request(30);
        assert_eq!(request, Some(UinputRequest::SetBit(CapabilityBit::Key, 30)));

        let request = IoctlCommand::from_request_code(UI_DEV_CREATE).into_request(30);
        assert_eq!(request, Some(UinputRequest::Lifecycle(Lifecycle::Create)));
    }
}
