//! Platform definitions for the supported network operating systems.
//!
//! This module defines per-OS configuration: prompt classification,
//! pager prompts, failure substrings and the terminal setup commands
//! used to disable output paging for clean scraping.

mod definition;
mod registry;
pub mod vendors;

pub use definition::{PlatformDefinition, PromptMode, PromptRule};
pub use registry::PlatformRegistry;

use std::fmt;

/// Network operating system detected from the `show version` banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkOs {
    /// Classic Cisco IOS.
    Ios,
    /// IOS-XE. Commands and templates follow the IOS set.
    IosXe,
    /// Cisco NX-OS (Nexus).
    NxOs,
    /// Cisco ASA.
    Asa,
    /// Anything we could not identify.
    Unknown,
}

impl NetworkOs {
    /// Detect the OS from `show version` output.
    ///
    /// The "IOS XE" check runs first: IOS-XE banners also contain
    /// "Cisco IOS Software".
    pub fn detect(show_version: &str) -> Self {
        if show_version.contains("IOS XE") {
            NetworkOs::IosXe
        } else if show_version.contains("Cisco IOS Software")
            || show_version.contains("Cisco Internetwork Operating System")
        {
            NetworkOs::Ios
        } else if show_version.contains("Cisco Nexus Operating System") {
            NetworkOs::NxOs
        } else if show_version.contains("Adaptive Security Appliance") {
            NetworkOs::Asa
        } else {
            NetworkOs::Unknown
        }
    }

    /// Whether this OS uses the IOS command set and templates.
    pub fn is_ios_family(&self) -> bool {
        matches!(self, NetworkOs::Ios | NetworkOs::IosXe)
    }

    /// The platform registry name serving this OS.
    pub fn platform_name(&self) -> &'static str {
        match self {
            NetworkOs::Ios | NetworkOs::IosXe | NetworkOs::Unknown => vendors::cisco_ios::NAME,
            NetworkOs::NxOs => vendors::cisco_nxos::NAME,
            NetworkOs::Asa => vendors::cisco_asa::NAME,
        }
    }
}

impl fmt::Display for NetworkOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkOs::Ios => "IOS",
            NetworkOs::IosXe => "IOS-XE",
            NetworkOs::NxOs => "NX-OS",
            NetworkOs::Asa => "ASA",
            NetworkOs::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_ios() {
        let banner = "Cisco IOS Software, C3750E Software (C3750E-UNIVERSALK9-M), Version 15.2(4)E10";
        assert_eq!(NetworkOs::detect(banner), NetworkOs::Ios);
    }

    #[test]
    fn test_detect_legacy_ios() {
        let banner = "Cisco Internetwork Operating System Software \nIOS (tm) C2950 Software";
        assert_eq!(NetworkOs::detect(banner), NetworkOs::Ios);
    }

    #[test]
    fn test_detect_ios_xe_before_ios() {
        let banner = "Cisco IOS Software [Everest], Catalyst L3 Switch Software, IOS XE Version 16.6.5";
        assert_eq!(NetworkOs::detect(banner), NetworkOs::IosXe);
        assert!(NetworkOs::detect(banner).is_ios_family());
    }

    #[test]
    fn test_detect_nxos() {
        let banner = "Cisco Nexus Operating System (NX-OS) Software";
        assert_eq!(NetworkOs::detect(banner), NetworkOs::NxOs);
    }

    #[test]
    fn test_detect_asa() {
        let banner = "Cisco Adaptive Security Appliance Software Version 9.8(4)";
        assert_eq!(NetworkOs::detect(banner), NetworkOs::Asa);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(NetworkOs::detect("JUNOS 20.4R3"), NetworkOs::Unknown);
    }
}
