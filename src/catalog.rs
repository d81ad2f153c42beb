//! Preference catalog
//!
//! The curated settings ffopt knows how to apply, grouped into named
//! categories. The table is plain data: adding a setting or a whole category
//! never touches control flow elsewhere in the crate.
//!
//! # Example
//!
//! ```rust
//! use ffopt::Catalog;
//!
//! let catalog = Catalog::builtin();
//! let names = catalog.category_names();
//! assert_eq!(names[0], "Privacy Enhancements");
//!
//! let privacy = catalog.entries_for("Privacy Enhancements")?;
//! assert_eq!(privacy[0].key, "privacy.firstparty.isolate");
//! # Ok::<(), ffopt::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::types::PrefLiteral;

/// One preference the catalog can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefSetting {
    pub key: &'static str,
    pub value: PrefLiteral,
    /// Short human-readable summary shown in listings
    pub description: &'static str,
}

impl PrefSetting {
    /// Render this setting as a `user_pref(...)` directive (no trailing newline)
    pub fn directive(&self) -> String {
        format!("user_pref(\"{}\", {});", self.key, self.value)
    }
}

/// A named group of settings applied together
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub entries: &'static [PrefSetting],
}

/// Read-only view over a category table
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    categories: &'static [Category],
}

impl Catalog {
    /// Catalog over an arbitrary static table
    pub const fn new(categories: &'static [Category]) -> Self {
        Catalog { categories }
    }

    /// The catalog shipped with ffopt
    pub const fn builtin() -> Self {
        Catalog::new(BUILTIN)
    }

    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    /// Category names in display order
    pub fn category_names(&self) -> Vec<&'static str> {
        self.categories.iter().map(|c| c.name).collect()
    }

    /// Settings of one category, in catalog order
    pub fn entries_for(&self, name: &str) -> Result<&'static [PrefSetting]> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.entries)
            .ok_or_else(|| Error::UnknownCategory(name.to_string()))
    }

    /// Map 0-based menu indices to category names, keeping the caller's order
    pub fn select(&self, indices: &[usize]) -> Result<Vec<&'static str>> {
        indices
            .iter()
            .map(|&i| {
                self.categories
                    .get(i)
                    .map(|c| c.name)
                    .ok_or_else(|| Error::UnknownCategory(format!("#{}", i + 1)))
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

macro_rules! setting {
    ($key:literal, $value:expr, $description:literal) => {
        PrefSetting {
            key: $key,
            value: $value,
            description: $description,
        }
    };
}

use PrefLiteral::{Bool, Int, Str};

const BUILTIN: &[Category] = &[
    Category {
        name: "Privacy Enhancements",
        entries: PRIVACY,
    },
    Category {
        name: "Security Improvements",
        entries: SECURITY,
    },
    Category {
        name: "Performance Optimizations",
        entries: PERFORMANCE,
    },
    Category {
        name: "Disable Telemetry and Data Collection",
        entries: TELEMETRY,
    },
    Category {
        name: "Miscellaneous Settings",
        entries: MISC,
    },
];

const PRIVACY: &[PrefSetting] = &[
    setting!("privacy.firstparty.isolate", Bool(true), "Enable First-Party Isolation"),
    setting!("privacy.resistFingerprinting", Bool(true), "Resist Fingerprinting"),
    setting!("privacy.globalprivacycontrol.enabled", Bool(true), "Enable Global Privacy Control"),
    setting!("network.cookie.cookieBehavior", Int(1), "Block Third-Party Cookies"),
    setting!("network.cookie.thirdparty.nonsecureSessionOnly", Bool(true), "Block Third-Party Cookies"),
    setting!("beacon.enabled", Bool(false), "Disable Beacon API"),
    setting!("browser.search.suggest.enabled", Bool(false), "Disable Search Suggestions"),
    setting!("network.http.referer.XOriginPolicy", Int(2), "Enable Strict Referrer Policy"),
    setting!("network.predictor.enable-hover-on-ssl", Bool(false), "Disable Network Prediction"),
    setting!("browser.urlbar.suggest.searches", Bool(false), "Disable Search Suggestions in URL Bar"),
    setting!("toolkit.coverage.opt-out", Bool(true), "Disable Telemetry Coverage"),
    setting!("dom.battery.enabled", Bool(false), "Disable Battery Status API"),
    setting!("device.sensors.enabled", Bool(false), "Disable Sensor APIs"),
    setting!("dom.netinfo.enabled", Bool(false), "Disable Network Information API"),
    setting!("dom.enable_resource_timing", Bool(false), "Disable Resource Timing API"),
    setting!("dom.webaudio.enabled", Bool(false), "Disable Web Audio API"),
    setting!("dom.vr.enabled", Bool(false), "Disable Virtual Reality Devices"),
    setting!("dom.gamepad.enabled", Bool(false), "Disable Gamepad API"),
    setting!("camera.control.face_detection.enabled", Bool(false), "Disable Face Detection"),
];

const SECURITY: &[PrefSetting] = &[
    setting!("dom.security.https_only_mode", Bool(true), "Enable HTTPS Only Mode"),
    setting!("security.tls.version.min", Int(3), "Set Minimum TLS Version to 1.2"),
    setting!("media.peerconnection.enabled", Bool(false), "Disable WebRTC (Prevent IP Leak)"),
    setting!("media.peerconnection.use_document_iceservers", Bool(false), "Disable WebRTC (Prevent IP Leak)"),
    setting!("media.peerconnection.video.enabled", Bool(false), "Disable WebRTC (Prevent IP Leak)"),
    setting!("media.peerconnection.identity.timeout", Int(1), "Disable WebRTC (Prevent IP Leak)"),
    setting!("media.peerconnection.turn.disable", Bool(true), "Disable WebRTC (Prevent IP Leak)"),
    setting!("media.peerconnection.ice.no_host", Bool(true), "Disable WebRTC (Prevent IP Leak)"),
    setting!("geo.enabled", Bool(false), "Disable Geolocation"),
    setting!("geo.provider.use_corelocation", Bool(false), "Disable Geolocation"),
    setting!("geo.provider.ms-windows-location", Bool(false), "Disable Geolocation"),
    setting!("geo.provider.use_gpsd", Bool(false), "Disable Geolocation"),
    setting!("browser.search.geoip.url", Str(""), "Disable Geolocation"),
    setting!("permissions.default.geo", Int(2), "Disable Geolocation"),
    setting!("pdfjs.enableScripting", Bool(false), "Disable JavaScript in PDF Viewer"),
    setting!("network.jar.block-remote-files", Bool(true), "Disable Remote JAR Files"),
    setting!("security.ssl.disable_session_identifiers", Bool(true), "Disable SSL Session Identifiers"),
    setting!("signon.autofillForms", Bool(false), "Disable Password Manager Autofill"),
    setting!("network.http.sendRefererHeader", Int(0), "Disable Third-Party Credentials"),
    setting!("extensions.formautofill.creditCards.available", Bool(false), "Disable Form Autofill Credit Cards"),
    setting!("permissions.default.microphone", Int(2), "Disable Microphone Access"),
    setting!("permissions.default.camera", Int(2), "Disable Camera Access"),
    setting!("media.navigator.enabled", Bool(false), "Disable Media Device Enumeration"),
    setting!("media.navigator.permission.disabled", Bool(true), "Disable Media Device Enumeration"),
    setting!("media.navigator.video.enabled", Bool(false), "Disable Media Device Enumeration"),
    setting!("media.webspeech.recognition.enable", Bool(false), "Disable Speech Recognition"),
    setting!("media.webspeech.synth.enabled", Bool(false), "Disable Speech Synthesis"),
    setting!("webgl.enable-debug-renderer-info", Bool(false), "Disable WebGL Debug Info"),
];

const PERFORMANCE: &[PrefSetting] = &[
    setting!("network.prefetch-next", Bool(false), "Disable Prefetching and Speculative Connections"),
    setting!("network.predictor.enabled", Bool(false), "Disable Prefetching and Speculative Connections"),
    setting!("network.predictor.enable-prefetch", Bool(false), "Disable Prefetching and Speculative Connections"),
    setting!("network.http.speculative-parallel-limit", Int(0), "Disable Prefetching and Speculative Connections"),
    setting!("browser.urlbar.speculativeConnect.enabled", Bool(false), "Disable Prefetching and Speculative Connections"),
    setting!("network.dns.disablePrefetch", Bool(true), "Disable DNS Prefetching"),
    setting!("network.dns.disablePrefetchFromHTTPS", Bool(true), "Disable DNS Prefetching"),
    setting!("network.dns.disableIPv6", Bool(true), "Disable IPv6"),
    setting!("network.http.spdy.enabled", Bool(false), "Disable HTTP2"),
    setting!("network.http.altsvc.enabled", Bool(false), "Disable HTTP Alternative Services"),
    setting!("browser.cache.offline.enable", Bool(false), "Disable Offline Cache"),
    setting!("browser.cache.disk_cache_ssl", Bool(false), "Disable Browser Caching for SSL Content"),
];

const TELEMETRY: &[PrefSetting] = &[
    setting!("toolkit.telemetry.enabled", Bool(false), "Disable Telemetry and Data Collection"),
    setting!("toolkit.telemetry.unified", Bool(false), "Disable Telemetry and Data Collection"),
    setting!("toolkit.telemetry.archive.enabled", Bool(false), "Disable Telemetry and Data Collection"),
    setting!("datareporting.healthreport.uploadEnabled", Bool(false), "Disable Telemetry and Data Collection"),
    setting!("datareporting.policy.dataSubmissionEnabled", Bool(false), "Disable Telemetry and Data Collection"),
    setting!("browser.ping-centre.telemetry", Bool(false), "Disable Telemetry Pings"),
    setting!("browser.newtabpage.activity-stream.feeds.telemetry", Bool(false), "Disable Telemetry Pings"),
    setting!("browser.newtabpage.activity-stream.telemetry", Bool(false), "Disable Telemetry Pings"),
    setting!("browser.discovery.enabled", Bool(false), "Disable Telemetry and Data Collection"),
    setting!("browser.contentblocking.report.enabled", Bool(false), "Disable Telemetry and Data Collection"),
    setting!("app.shield.optoutstudies.enabled", Bool(false), "Disable Normandy/Shield"),
    setting!("browser.newtabpage.activity-stream.asrouter.userprefs.cfr", Bool(false), "Disable Extension Recommendations"),
    setting!("browser.newtabpage.activity-stream.asrouter.userprefs.cfr.addons", Bool(false), "Disable Contextual Feature Recommender"),
    setting!("toolkit.coverage.opt-out", Bool(true), "Disable Telemetry Coverage"),
    setting!("toolkit.coverage.endpoint.base", Str(""), "Disable Telemetry Coverage"),
    setting!("extensions.pocket.enabled", Bool(false), "Disable Pocket"),
    setting!("app.normandy.enabled", Bool(false), "Disable Normandy/Shield"),
    setting!("app.normandy.api_url", Str(""), "Disable Normandy/Shield"),
];

const MISC: &[PrefSetting] = &[
    setting!("signon.rememberSignons", Bool(false), "Disable Password Manager"),
    setting!("signon.autofillForms", Bool(false), "Disable Password Manager"),
    setting!("signon.formlessCapture.enabled", Bool(false), "Disable Password Manager"),
    setting!("browser.formfill.enable", Bool(false), "Disable Form Autofill"),
    setting!("extensions.formautofill.available", Str("off"), "Disable Form Autofill"),
    setting!("extensions.formautofill.addresses.enabled", Bool(false), "Disable Form Autofill"),
    setting!("extensions.formautofill.creditCards.enabled", Bool(false), "Disable Form Autofill"),
    setting!("dom.event.clipboardevents.enabled", Bool(false), "Disable Clipboard Events"),
    setting!("webgl.disabled", Bool(true), "Disable WebGL"),
    setting!("network.captive-portal-service.enabled", Bool(false), "Disable Captive Portal Detection"),
    setting!("privacy.clearOnShutdown.cache", Bool(true), "Clear Data on Shutdown"),
    setting!("privacy.clearOnShutdown.cookies", Bool(true), "Clear Data on Shutdown"),
    setting!("privacy.clearOnShutdown.downloads", Bool(true), "Clear Data on Shutdown"),
    setting!("privacy.clearOnShutdown.formdata", Bool(true), "Clear Data on Shutdown"),
    setting!("privacy.clearOnShutdown.history", Bool(true), "Clear Data on Shutdown"),
    setting!("privacy.clearOnShutdown.sessions", Bool(true), "Clear Data on Shutdown"),
    setting!("privacy.sanitize.sanitizeOnShutdown", Bool(true), "Clear Data on Shutdown"),
    setting!("middlemouse.contentLoadURL", Bool(false), "Disable Middle Mouse Paste"),
    setting!("device.sensors.enabled", Bool(false), "Disable Device Sensors"),
    setting!("dom.battery.enabled", Bool(false), "Disable Battery Status API"),
    setting!("dom.netinfo.enabled", Bool(false), "Disable Network Information API"),
    setting!("dom.enable_resource_timing", Bool(false), "Disable Resource Timing API"),
    setting!("dom.webaudio.enabled", Bool(false), "Disable Web Audio API"),
    setting!("dom.vr.enabled", Bool(false), "Disable Virtual Reality Devices"),
    setting!("dom.gamepad.enabled", Bool(false), "Disable Gamepad API"),
    setting!("camera.control.face_detection.enabled", Bool(false), "Disable Face Detection"),
];
