//! Client address and user-agent inspection.

use std::net::IpAddr;

const UNKNOWN_IP: &str = "unknown";
const LOCAL_NETWORK: &str = "Local Network";
const UNKNOWN_LOCATION: &str = "Unknown Location";
/// Longer runs are not a real major version.
const MAX_VERSION_DIGITS: usize = 5;

/// Everything recorded about the submitting client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    /// Client IP address, or `unknown`.
    pub ip_address: String,
    /// Device, OS and browser labels.
    pub device: DeviceInfo,
    /// Location label.
    pub location: String,
}

impl ClientInfo {
    /// Gather client details from request metadata.
    #[must_use]
    pub fn from_request(
        forwarded_for: Option<&str>,
        remote: Option<IpAddr>,
        user_agent: Option<&str>,
    ) -> Self {
        let ip_address = client_ip(forwarded_for, remote);
        let location = location_for(&ip_address).to_string();
        Self {
            device: DeviceInfo::from_user_agent(user_agent.unwrap_or_default()),
            ip_address,
            location,
        }
    }
}

/// Coarse device, OS and browser labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Device class.
    pub device: String,
    /// Operating system family.
    pub os: String,
    /// Browser family and major version.
    pub browser: String,
}

impl DeviceInfo {
    /// Classify a `User-Agent` string. Unrecognized parts get `Unknown ...`.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        Self {
            device: device_of(user_agent).to_string(),
            os: os_of(user_agent).to_string(),
            browser: browser_of(user_agent),
        }
    }
}

/// First `X-Forwarded-For` entry, else the socket peer, in canonical form
/// (an IPv4-mapped `::ffff:a.b.c.d` becomes `a.b.c.d`).
///
/// A forwarded entry that is not an IP address is ignored.
#[must_use]
pub fn client_ip(forwarded_for: Option<&str>, remote: Option<IpAddr>) -> String {
    let forwarded = forwarded_for
        .and_then(|header| header.split(',').next())
        .and_then(|hop| hop.trim().parse::<IpAddr>().ok());

    forwarded
        .or(remote)
        .map_or_else(|| UNKNOWN_IP.to_string(), |ip| ip.to_canonical().to_string())
}

/// Location label for an address.
///
/// Loopback and private ranges are `Local Network`; everything else is
/// `Unknown Location` since no geolocation database is bundled.
#[must_use]
pub fn location_for(ip: &str) -> &'static str {
    match ip.parse::<IpAddr>() {
        Ok(addr) if is_local(addr) => LOCAL_NETWORK,
        _ => UNKNOWN_LOCATION,
    }
}

fn is_local(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => v4.is_loopback() || v4.is_private() || v4.is_link_local(),
        IpAddr::V6(v6) => {
            // fc00::/7 unique local
            v6.is_loopback() || (v6.segments()[0] & 0xfe00) == 0xfc00
        }
    }
}

fn device_of(ua: &str) -> &'static str {
    if ua.trim().is_empty() {
        "Unknown Device"
    } else if ua.contains("iPad") {
        "iPad"
    } else if ua.contains("iPhone") {
        "iPhone"
    } else if ua.contains("Android") {
        if ua.contains("Mobile") {
            "Android Phone"
        } else {
            "Android Tablet"
        }
    } else if ua.contains("Mobile") {
        "Mobile"
    } else if ua.contains("bot") || ua.contains("Bot") || ua.contains("Spider") {
        "Bot"
    } else {
        "Desktop"
    }
}

fn os_of(ua: &str) -> &'static str {
    // Order matters: iOS and Android UAs also mention "Mac OS X" and "Linux".
    if ua.contains("iPhone") || ua.contains("iPad") {
        "iOS"
    } else if ua.contains("Android") {
        "Android"
    } else if ua.contains("Windows") {
        "Windows"
    } else if ua.contains("CrOS") {
        "Chrome OS"
    } else if ua.contains("Mac OS X") || ua.contains("Macintosh") {
        "macOS"
    } else if ua.contains("Linux") {
        "Linux"
    } else {
        "Unknown OS"
    }
}

fn browser_of(ua: &str) -> String {
    // Chromium derivatives also carry "Chrome/" and "Safari/" tokens.
    const BROWSERS: [(&str, &str); 6] = [
        ("Edg/", "Edge"),
        ("OPR/", "Opera"),
        ("SamsungBrowser/", "Samsung Internet"),
        ("Firefox/", "Firefox"),
        ("CriOS/", "Chrome"),
        ("Chrome/", "Chrome"),
    ];

    for (token, name) in BROWSERS {
        if let Some(version) = major_version(ua, token) {
            return format!("{name} {version}");
        }
    }

    if ua.contains("Safari/") {
        return match major_version(ua, "Version/") {
            Some(version) => format!("Safari {version}"),
            None => "Safari".to_string(),
        };
    }

    "Unknown Browser".to_string()
}

fn major_version<'a>(ua: &'a str, token: &str) -> Option<&'a str> {
    let start = ua.find(token)? + token.len();
    let rest = &ua[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    (1..=MAX_VERSION_DIGITS).contains(&end).then(|| &rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::net::{Ipv4Addr, Ipv6Addr};

    const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1";
    const FIREFOX_LINUX: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const EDGE_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36";

    #[rstest]
    #[case(CHROME_WINDOWS, "Desktop", "Windows", "Chrome 120")]
    #[case(SAFARI_IPHONE, "iPhone", "iOS", "Safari 17")]
    #[case(FIREFOX_LINUX, "Desktop", "Linux", "Firefox 121")]
    #[case(EDGE_MAC, "Desktop", "macOS", "Edge 120")]
    #[case(ANDROID_CHROME, "Android Phone", "Android", "Chrome 120")]
    #[case("", "Unknown Device", "Unknown OS", "Unknown Browser")]
    #[case("curl/8.4.0", "Desktop", "Unknown OS", "Unknown Browser")]
    fn test_device_info(
        #[case] ua: &str,
        #[case] device: &str,
        #[case] os: &str,
        #[case] browser: &str,
    ) {
        let info = DeviceInfo::from_user_agent(ua);
        assert_eq!(info.device, device);
        assert_eq!(info.os, os);
        assert_eq!(info.browser, browser);
    }

    #[rstest]
    #[case(Some("203.0.113.7, 10.0.0.1"), None, "203.0.113.7")]
    #[case(Some(" 198.51.100.2 "), None, "198.51.100.2")]
    #[case(Some("::ffff:203.0.113.9"), None, "203.0.113.9")]
    #[case(None, Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 5))), "192.168.1.5")]
    #[case(Some(""), Some(IpAddr::V6(Ipv6Addr::LOCALHOST)), "::1")]
    #[case(None, None, "unknown")]
    #[case(Some("not-an-ip, 10.0.0.1"), Some(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 9))), "203.0.113.9")]
    #[case(Some("203.0.113.7:51234"), None, "unknown")]
    #[case(None, Some(IpAddr::V6(Ipv4Addr::new(198, 51, 100, 4).to_ipv6_mapped())), "198.51.100.4")]
    fn test_client_ip(
        #[case] forwarded: Option<&str>,
        #[case] remote: Option<IpAddr>,
        #[case] expected: &str,
    ) {
        assert_eq!(client_ip(forwarded, remote), expected);
    }

    #[rstest]
    #[case("127.0.0.1", "Local Network")]
    #[case("::1", "Local Network")]
    #[case("10.1.2.3", "Local Network")]
    #[case("172.16.0.4", "Local Network")]
    #[case("192.168.0.10", "Local Network")]
    #[case("fd12:3456::1", "Local Network")]
    #[case("172.32.0.1", "Unknown Location")]
    #[case("8.8.8.8", "Unknown Location")]
    #[case("unknown", "Unknown Location")]
    fn test_location_for(#[case] ip: &str, #[case] expected: &str) {
        assert_eq!(location_for(ip), expected);
    }

    #[test]
    fn test_garbage_forwarded_header_falls_back_to_peer() {
        let header = format!("{}, 10.0.0.1", "not-an-ip-".repeat(10));
        let ip = client_ip(Some(&header), Some(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 9))));
        assert_eq!(ip, "203.0.113.9");
        assert!(ip.len() <= 45);
    }

    #[test]
    fn test_oversized_browser_version_is_ignored() {
        let ua = format!("Mozilla/5.0 Firefox/{}", "9".repeat(300));
        assert_eq!(DeviceInfo::from_user_agent(&ua).browser, "Unknown Browser");
    }

    #[test]
    fn test_client_info_from_request() {
        let info = ClientInfo::from_request(
            Some("10.0.0.8"),
            Some(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            Some(CHROME_WINDOWS),
        );
        assert_eq!(info.ip_address, "10.0.0.8");
        assert_eq!(info.location, "Local Network");
        assert_eq!(info.device.browser, "Chrome 120");
    }
}
