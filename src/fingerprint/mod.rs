//! Browser Fingerprint Spoofing
//!
//! The listing site sits behind bot mitigation that rejects obvious
//! non-browser traffic with 403. Every outbound fetch therefore carries a
//! complete desktop-browser header set, picked fresh per request.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, USER_AGENT,
};

/// Chrome (major, full) versions in current circulation.
const CHROME_VERSIONS: &[(&str, &str)] = &[
    ("131", "131.0.6778.205"),
    ("132", "132.0.6834.160"),
    ("133", "133.0.6943.127"),
    ("134", "134.0.6998.89"),
];

const FIREFOX_VERSIONS: &[&str] = &["133.0", "134.0", "135.0", "136.0"];

/// Safari (version, WebKit build).
const SAFARI_VERSIONS: &[(&str, &str)] = &[
    ("17.6", "605.1.15"),
    ("18.2", "605.1.15"),
    ("18.3", "605.1.15"),
];

/// Browser profile with realistic fingerprint
#[derive(Debug, Clone)]
pub struct BrowserProfile {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub accept_encoding: String,
    pub sec_ch_ua: String,
    pub sec_ch_ua_mobile: String,
    pub sec_ch_ua_platform: String,
    pub sec_fetch_dest: String,
    pub sec_fetch_mode: String,
    pub sec_fetch_site: String,
    pub sec_fetch_user: String,
}

/// Platform configurations
#[derive(Debug, Clone, Copy)]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
}

impl Platform {
    fn random() -> Self {
        let mut rng = rand::thread_rng();
        // Realistic distribution: Windows 65%, macOS 20%, Linux 15%
        let roll: f32 = rng.gen();
        if roll < 0.65 {
            Platform::Windows
        } else if roll < 0.85 {
            Platform::MacOS
        } else {
            Platform::Linux
        }
    }

    fn os_string(self) -> &'static str {
        match self {
            Platform::MacOS => "Macintosh; Intel Mac OS X 10_15_7",
            Platform::Windows => "Windows NT 10.0; Win64; x64",
            Platform::Linux => "X11; Linux x86_64",
        }
    }

    fn sec_ch_platform(self) -> &'static str {
        match self {
            Platform::MacOS => "\"macOS\"",
            Platform::Windows => "\"Windows\"",
            Platform::Linux => "\"Linux\"",
        }
    }
}

/// Generate a realistic Chrome browser profile
#[must_use]
pub fn chrome_profile() -> BrowserProfile {
    let mut rng = rand::thread_rng();
    let platform = Platform::random();
    let &(major, full) = CHROME_VERSIONS
        .choose(&mut rng)
        .unwrap_or(&CHROME_VERSIONS[0]);

    let user_agent = format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
        platform.os_string(),
        full
    );

    let brands = [
        format!("\"Google Chrome\";v=\"{major}\""),
        format!("\"Chromium\";v=\"{major}\""),
        "\"Not_A Brand\";v=\"24\"".to_string(),
    ];

    BrowserProfile {
        user_agent,
        accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7".to_string(),
        accept_language: random_accept_language(),
        accept_encoding: "gzip, deflate, br, zstd".to_string(),
        sec_ch_ua: brands.join(", "),
        sec_ch_ua_mobile: "?0".to_string(),
        sec_ch_ua_platform: platform.sec_ch_platform().to_string(),
        sec_fetch_dest: "document".to_string(),
        sec_fetch_mode: "navigate".to_string(),
        sec_fetch_site: "none".to_string(),
        sec_fetch_user: "?1".to_string(),
    }
}

/// Generate a realistic Firefox browser profile
#[must_use]
pub fn firefox_profile() -> BrowserProfile {
    let mut rng = rand::thread_rng();
    let platform = Platform::random();
    let version = FIREFOX_VERSIONS
        .choose(&mut rng)
        .unwrap_or(&FIREFOX_VERSIONS[0]);

    let user_agent = format!(
        "Mozilla/5.0 ({}; rv:{version}) Gecko/20100101 Firefox/{version}",
        platform.os_string(),
    );

    BrowserProfile {
        user_agent,
        accept:
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
                .to_string(),
        accept_language: random_accept_language(),
        accept_encoding: "gzip, deflate, br, zstd".to_string(),
        // Firefox doesn't send Sec-CH-UA headers
        sec_ch_ua: String::new(),
        sec_ch_ua_mobile: String::new(),
        sec_ch_ua_platform: String::new(),
        sec_fetch_dest: "document".to_string(),
        sec_fetch_mode: "navigate".to_string(),
        sec_fetch_site: "none".to_string(),
        sec_fetch_user: "?1".to_string(),
    }
}

/// Generate a realistic Safari browser profile
#[must_use]
pub fn safari_profile() -> BrowserProfile {
    let mut rng = rand::thread_rng();
    let &(version, webkit) = SAFARI_VERSIONS
        .choose(&mut rng)
        .unwrap_or(&SAFARI_VERSIONS[0]);

    // Desktop Safari is macOS only
    let user_agent = format!(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/{webkit} (KHTML, like Gecko) Version/{version} Safari/{webkit}"
    );

    BrowserProfile {
        user_agent,
        accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
        accept_language: random_accept_language(),
        accept_encoding: "gzip, deflate, br".to_string(), // no zstd in Safari
        sec_ch_ua: String::new(),
        sec_ch_ua_mobile: String::new(),
        sec_ch_ua_platform: String::new(),
        sec_fetch_dest: "document".to_string(),
        sec_fetch_mode: "navigate".to_string(),
        sec_fetch_site: "none".to_string(),
        sec_fetch_user: "?1".to_string(),
    }
}

/// Generate a random browser profile (weighted by market share)
#[must_use]
pub fn random_profile() -> BrowserProfile {
    let mut rng = rand::thread_rng();
    // Chrome 65%, Safari 20%, Firefox 15%
    let roll: f32 = rng.gen();
    if roll < 0.65 {
        chrome_profile()
    } else if roll < 0.85 {
        safari_profile()
    } else {
        firefox_profile()
    }
}

/// Profile built around a user agent supplied by configuration.
///
/// Chrome-family agents get Chrome's accept header; client hints are left
/// out since their brand list could contradict the configured string.
#[must_use]
pub fn custom_profile(user_agent: &str) -> BrowserProfile {
    let mut profile = if user_agent.contains("Chrome/") {
        chrome_profile()
    } else {
        firefox_profile()
    };
    profile.user_agent = user_agent.to_string();
    profile.sec_ch_ua.clear();
    profile.sec_ch_ua_mobile.clear();
    profile.sec_ch_ua_platform.clear();
    profile
}

/// Generate random Accept-Language header
fn random_accept_language() -> String {
    let mut rng = rand::thread_rng();
    let languages = [
        "es-ES,es;q=0.9",
        "es-ES,es;q=0.9,en;q=0.8",
        "en-US,en;q=0.9",
        "en-US,en;q=0.9,es;q=0.8",
        "en-GB,en;q=0.9",
    ];
    languages
        .choose(&mut rng)
        .unwrap_or(&languages[0])
        .to_string()
}

/// Source of per-request browser profiles.
///
/// Either generates a fresh random profile every time, or rotates
/// round-robin through user agents from configuration.
#[derive(Debug, Default)]
pub struct ProfileRotation {
    user_agents: Vec<String>,
    cursor: AtomicUsize,
}

impl ProfileRotation {
    /// Rotation over generated profiles.
    #[must_use]
    pub fn generated() -> Self {
        Self::default()
    }

    /// Rotation over configured user agents. Blank entries are dropped; an
    /// empty list falls back to generated profiles.
    #[must_use]
    pub fn from_user_agents(user_agents: &[String]) -> Self {
        Self {
            user_agents: user_agents
                .iter()
                .map(|ua| ua.trim().to_string())
                .filter(|ua| !ua.is_empty())
                .collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Profile for the next request.
    pub fn next_profile(&self) -> BrowserProfile {
        if self.user_agents.is_empty() {
            return random_profile();
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.user_agents.len();
        custom_profile(&self.user_agents[idx])
    }

    /// Number of configured agents; zero when profiles are generated.
    pub fn configured_len(&self) -> usize {
        self.user_agents.len()
    }
}

impl BrowserProfile {
    /// Adjust the `Sec-Fetch-*` headers to look like an iframe load from a page on the same site.
    #[must_use]
    pub fn for_iframe(mut self) -> Self {
        self.sec_fetch_dest = "iframe".to_string();
        self.sec_fetch_site = "same-site".to_string();
        self.sec_fetch_user = String::new();
        self
    }

    /// Convert profile to reqwest `HeaderMap`.
    ///
    /// Values that aren't valid header text are skipped rather than sent mangled.
    pub fn to_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        insert(&mut headers, USER_AGENT, &self.user_agent);
        insert(&mut headers, ACCEPT, &self.accept);
        insert(&mut headers, ACCEPT_LANGUAGE, &self.accept_language);
        insert(&mut headers, ACCEPT_ENCODING, &self.accept_encoding);

        // Client hints are Chrome only
        if !self.sec_ch_ua.is_empty() {
            insert(&mut headers, HeaderName::from_static("sec-ch-ua"), &self.sec_ch_ua);
            insert(
                &mut headers,
                HeaderName::from_static("sec-ch-ua-mobile"),
                &self.sec_ch_ua_mobile,
            );
            insert(
                &mut headers,
                HeaderName::from_static("sec-ch-ua-platform"),
                &self.sec_ch_ua_platform,
            );
        }

        insert(&mut headers, HeaderName::from_static("sec-fetch-dest"), &self.sec_fetch_dest);
        insert(&mut headers, HeaderName::from_static("sec-fetch-mode"), &self.sec_fetch_mode);
        insert(&mut headers, HeaderName::from_static("sec-fetch-site"), &self.sec_fetch_site);
        insert(&mut headers, HeaderName::from_static("sec-fetch-user"), &self.sec_fetch_user);

        headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));
        headers.insert("cache-control", HeaderValue::from_static("max-age=0"));

        headers
    }
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    if value.is_empty() {
        return;
    }
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_profile() {
        let profile = chrome_profile();
        assert!(profile.user_agent.contains("Chrome"));
        assert!(!profile.sec_ch_ua.is_empty());
    }

    #[test]
    fn test_firefox_profile() {
        let profile = firefox_profile();
        assert!(profile.user_agent.contains("Firefox"));
        assert!(profile.sec_ch_ua.is_empty());
    }

    #[test]
    fn test_safari_only_macos() {
        let profile = safari_profile();
        assert!(profile.user_agent.contains("Macintosh"));
        assert!(profile.user_agent.contains("Safari"));
    }

    #[test]
    fn test_chrome_versions_format() {
        for (major, full) in CHROME_VERSIONS {
            assert!(full.starts_with(major), "Full version should start with major");
        }
    }

    #[test]
    fn test_profile_to_headers_includes_required() {
        let headers = chrome_profile().to_headers();
        assert!(headers.contains_key("user-agent"));
        assert!(headers.contains_key("accept"));
        assert!(headers.contains_key("accept-language"));
        assert!(headers.contains_key("accept-encoding"));
        assert!(headers.contains_key("sec-ch-ua"));
        assert!(headers.contains_key("sec-fetch-mode"));
    }

    #[test]
    fn test_firefox_headers_skip_client_hints() {
        let headers = firefox_profile().to_headers();
        assert!(!headers.contains_key("sec-ch-ua"));
        assert!(!headers.contains_key("sec-ch-ua-platform"));
    }

    #[test]
    fn test_iframe_profile() {
        let headers = chrome_profile().for_iframe().to_headers();
        assert_eq!(headers["sec-fetch-dest"], "iframe");
        assert_eq!(headers["sec-fetch-site"], "same-site");
        assert!(!headers.contains_key("sec-fetch-user"));
    }

    #[test]
    fn test_rotation_cycles_configured_agents() {
        let rotation = ProfileRotation::from_user_agents(&[
            "Agent/1".to_string(),
            "  ".to_string(),
            "Agent/2".to_string(),
        ]);
        assert_eq!(rotation.configured_len(), 2);
        assert_eq!(rotation.next_profile().user_agent, "Agent/1");
        assert_eq!(rotation.next_profile().user_agent, "Agent/2");
        assert_eq!(rotation.next_profile().user_agent, "Agent/1");
    }

    #[test]
    fn test_rotation_generates_when_empty() {
        let rotation = ProfileRotation::from_user_agents(&[]);
        assert_eq!(rotation.configured_len(), 0);
        assert!(rotation.next_profile().user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_custom_profile_drops_client_hints() {
        let profile = custom_profile("Mozilla/5.0 (X11; Linux x86_64) Chrome/120.0.0.0");
        assert!(profile.sec_ch_ua.is_empty());
        assert!(profile.accept.contains("signed-exchange"));
    }
}
