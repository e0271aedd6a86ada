// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// Device class a browser identity presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFamily {
    Chrome,
    Edge,
    Firefox,
    Safari,
}

impl BrowserFamily {
    /// Chromium-based browsers send `Sec-CH-UA*` client hints; others never do.
    pub fn sends_client_hints(self) -> bool {
        matches!(self, BrowserFamily::Chrome | BrowserFamily::Edge)
    }
}

/// A user-agent string together with the facts it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserIdentity {
    pub user_agent: &'static str,
    pub family: BrowserFamily,
    pub major_version: u16,
    /// Value for `Sec-CH-UA-Platform`, unquoted
    pub platform: &'static str,
    pub device: DeviceClass,
}

pub const IDENTITY_POOL: &[BrowserIdentity] = &[
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        family: BrowserFamily::Chrome,
        major_version: 120,
        platform: "Windows",
        device: DeviceClass::Desktop,
    },
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
        family: BrowserFamily::Chrome,
        major_version: 119,
        platform: "Windows",
        device: DeviceClass::Desktop,
    },
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        family: BrowserFamily::Chrome,
        major_version: 120,
        platform: "macOS",
        device: DeviceClass::Desktop,
    },
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
        family: BrowserFamily::Edge,
        major_version: 120,
        platform: "Windows",
        device: DeviceClass::Desktop,
    },
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
        family: BrowserFamily::Firefox,
        major_version: 121,
        platform: "Windows",
        device: DeviceClass::Desktop,
    },
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
        family: BrowserFamily::Safari,
        major_version: 17,
        platform: "macOS",
        device: DeviceClass::Desktop,
    },
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.210 Mobile Safari/537.36",
        family: BrowserFamily::Chrome,
        major_version: 120,
        platform: "Android",
        device: DeviceClass::Mobile,
    },
    BrowserIdentity {
        user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1",
        family: BrowserFamily::Safari,
        major_version: 17,
        platform: "iOS",
        device: DeviceClass::Mobile,
    },
];

const ACCEPT_LANGUAGES: &[&str] = &["en-US,en;q=0.9", "en-IN,en;q=0.9,hi;q=0.8", "en-GB,en;q=0.9"];

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

/// Inclusive pacing window a caller waits before issuing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkTime {
    pub min: Duration,
    pub max: Duration,
}

impl ThinkTime {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    pub fn sample(&self) -> Duration {
        random_duration(self.min, self.max)
    }
}

/// Random duration in `[min, max]`; collapses to `min` when the bounds cross.
pub fn random_duration(min: Duration, max: Duration) -> Duration {
    let min_ms = min.as_millis() as u64;
    let max_ms = (max.as_millis() as u64).max(min_ms);
    Duration::from_millis(rand::random_range(min_ms..=max_ms))
}

/// Immutable header set, identity and pacing for one request attempt.
#[derive(Debug, Clone)]
pub struct RequestProfile {
    identity: BrowserIdentity,
    headers: Vec<(&'static str, String)>,
    think_time: ThinkTime,
}

impl RequestProfile {
    pub fn identity(&self) -> &BrowserIdentity {
        &self.identity
    }

    pub fn user_agent(&self) -> &str {
        self.identity.user_agent
    }

    /// Headers in send order, `User-Agent` first.
    pub fn headers(&self) -> &[(&'static str, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn think_time(&self) -> ThinkTime {
        self.think_time
    }
}

/// Builds randomized, internally consistent request profiles.
#[derive(Debug, Clone)]
pub struct RequestProfileGenerator {
    identities: &'static [BrowserIdentity],
    think_min: Duration,
    think_max: Duration,
}

impl Default for RequestProfileGenerator {
    fn default() -> Self {
        Self::new(Duration::from_millis(1_000), Duration::from_millis(3_000))
    }
}

impl RequestProfileGenerator {
    pub fn new(think_min: Duration, think_max: Duration) -> Self {
        Self {
            identities: IDENTITY_POOL,
            think_min,
            think_max: think_max.max(think_min),
        }
    }

    /// Profile with an identity drawn from the whole pool.
    pub fn generate(&self) -> RequestProfile {
        let identity = self.identities[rand::random_range(0..self.identities.len())];
        self.build(identity)
    }

    /// Profile restricted to one device class, for mobile rendering surfaces.
    pub fn generate_for(&self, device: DeviceClass) -> RequestProfile {
        let candidates: Vec<&BrowserIdentity> =
            self.identities.iter().filter(|identity| identity.device == device).collect();

        match candidates.len() {
            0 => self.generate(),
            len => self.build(*candidates[rand::random_range(0..len)]),
        }
    }

    fn build(&self, identity: BrowserIdentity) -> RequestProfile {
        let language = ACCEPT_LANGUAGES[rand::random_range(0..ACCEPT_LANGUAGES.len())];

        let mut headers: Vec<(&'static str, String)> = vec![
            ("User-Agent", identity.user_agent.to_string()),
            ("Accept", ACCEPT.to_string()),
            ("Accept-Language", language.to_string()),
            ("Upgrade-Insecure-Requests", "1".to_string()),
            ("Sec-Fetch-Dest", "document".to_string()),
            ("Sec-Fetch-Mode", "navigate".to_string()),
            ("Sec-Fetch-Site", "none".to_string()),
            ("Sec-Fetch-User", "?1".to_string()),
            ("Cache-Control", "max-age=0".to_string()),
            ("DNT", "1".to_string()),
        ];

        if identity.family.sends_client_hints() {
            let brand = match identity.family {
                BrowserFamily::Edge => "Microsoft Edge",
                _ => "Google Chrome",
            };
            headers.push((
                "Sec-CH-UA",
                format!(
                    "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"{v}\", \"{brand}\";v=\"{v}\"",
                    v = identity.major_version
                ),
            ));
            headers.push((
                "Sec-CH-UA-Mobile",
                match identity.device {
                    DeviceClass::Mobile => "?1",
                    DeviceClass::Desktop => "?0",
                }
                .to_string(),
            ));
            headers.push(("Sec-CH-UA-Platform", format!("\"{}\"", identity.platform)));
        }

        // Jitter both ends so consecutive profiles never share an exact window.
        let min = self.think_min + Duration::from_millis(rand::random_range(0..=250));
        let max = self.think_max + Duration::from_millis(rand::random_range(0..=500));

        RequestProfile {
            identity,
            headers,
            think_time: ThinkTime::new(min, max),
        }
    }
}
