//! Random subdomain generation and custom-name validation.
//!
//! A [`SubdomainGenerator`] owns two pieces of immutable configuration: the
//! allowlist of registrable main domains offered by the provider, and a word
//! dictionary split into prefixes, core words, and suffixes. Labels are built
//! by joining dictionary tokens with `-`; full domains are `label.main_domain`.
//!
//! The generator itself holds no mutable state. Every randomized operation
//! takes the RNG as an argument, so callers can pass a seeded
//! [`StdRng`][rand::rngs::StdRng] for reproducible output in tests and
//! `thread_rng` everywhere else.

use crate::error::Error;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum length of a DNS label (RFC 1035).
pub const MAX_LABEL_LEN: usize = 63;

/// Main domains offered by the Dynu service, used when the configuration does
/// not override the allowlist.
const MAIN_DOMAINS: &[&str] = &[
    "accesscam.org",
    "camdvr.org",
    "casacam.net",
    "ddnsfree.com",
    "ddnsgeek.com",
    "freeddns.org",
    "giize.com",
    "gleeze.com",
    "kozow.com",
    "loseyourip.com",
    "mywire.org",
    "ooguy.com",
    "theworkpc.com",
    "webredirect.org",
    "1cooldns.com",
    "bumbleshrimp.com",
    "dynu.net",
    "dynuddns.com",
    "ddnsguru.com",
    "mysynology.net",
];

const PREFIXES: &[&str] = &[
    "my", "home", "office", "work", "dev", "test", "demo", "app", "web", "api", "secure",
    "private", "public", "main", "primary", "backup", "temp", "local", "remote", "cloud",
    "mobile", "desktop", "server", "client", "admin", "user", "guest", "live", "stage", "prod",
    "beta", "alpha", "v1", "v2", "new", "old",
];

const WORDS: &[&str] = &[
    "camera", "monitor", "device", "system", "network", "server", "client", "hub", "gateway",
    "router", "switch", "access", "control", "security", "stream", "video", "audio", "data",
    "file", "backup", "storage", "cloud", "sync", "share", "connect", "link", "bridge", "tunnel",
    "proxy", "cache", "queue", "service", "app", "tool", "utility", "helper", "manager",
    "viewer", "editor", "player", "recorder", "scanner", "detector", "sensor", "alarm", "alert",
    "notify", "message", "mail", "chat", "voice", "call", "meeting", "conference",
];

const SUFFIXES: &[&str] = &[
    "cam", "dvr", "nvr", "cctv", "ip", "hd", "4k", "pro", "plus", "max", "mini", "lite", "basic",
    "advanced", "premium", "standard", "custom", "special", "secure", "safe", "guard", "watch",
    "view", "see", "look", "eye", "lens", "focus", "zoom", "pan", "tilt", "fixed", "mobile",
    "wireless", "wired", "indoor", "outdoor", "night", "day", "auto", "manual", "smart", "ai",
    "cloud", "local", "remote", "direct", "live", "record", "playback", "archive",
];

pub(crate) fn default_main_domains() -> Vec<String> {
    MAIN_DOMAINS.iter().map(ToString::to_string).collect()
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(ToString::to_string).collect()
}

/// The word lists labels are assembled from. Every generated label contains at
/// least one token from `words`; `prefixes` and `suffixes` are optional
/// decorations. Empty prefix/suffix lists are tolerated and simply skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dictionary {
    #[serde(default)]
    pub prefixes: Vec<String>,
    pub words: Vec<String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Dictionary {
            prefixes: owned(PREFIXES),
            words: owned(WORDS),
            suffixes: owned(SUFFIXES),
        }
    }
}

/// A generated or suggested subdomain. `full_domain` is always
/// `label + "." + main_domain`. These values are never persisted; they live
/// for the duration of the call that produced them.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct Subdomain {
    pub label: String,
    pub main_domain: String,
    pub full_domain: String,
}

impl Subdomain {
    fn new(label: String, main_domain: &str) -> Self {
        let full_domain = format!("{label}.{main_domain}");
        Subdomain {
            label,
            main_domain: main_domain.to_string(),
            full_domain,
        }
    }
}

/// Generates randomized subdomain names and validates user-supplied ones
/// against the main-domain allowlist and DNS label rules.
#[derive(Debug, Clone)]
pub struct SubdomainGenerator {
    main_domains: Vec<String>,
    dictionary: Dictionary,
}

impl SubdomainGenerator {
    pub fn new(main_domains: Vec<String>, dictionary: Dictionary) -> Self {
        SubdomainGenerator {
            main_domains,
            dictionary,
        }
    }

    /// The allowlist of main domains, in its fixed configured order.
    #[must_use]
    pub fn main_domains(&self) -> Vec<String> {
        self.main_domains.clone()
    }

    fn check_main_domain(&self, main_domain: &str) -> Result<(), Error> {
        if self.main_domains.iter().any(|d| d == main_domain) {
            Ok(())
        } else {
            Err(Error::InvalidDomain(main_domain.to_string()))
        }
    }

    /// Build one hyphen-joined label from the dictionary. A core word is
    /// always included; when a flag is set an independent coin flip decides
    /// whether the matching decoration is used. Single-token results get one
    /// extra decoration so labels read as a compound name.
    pub fn generate_label<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        use_prefix: bool,
        use_suffix: bool,
    ) -> String {
        let dict = &self.dictionary;
        let mut parts: Vec<&str> = Vec::with_capacity(3);

        if use_prefix && rng.gen::<bool>() {
            if let Some(prefix) = dict.prefixes.choose(rng) {
                parts.push(prefix);
            }
        }

        // The core word is never optional.
        if let Some(word) = dict.words.choose(rng) {
            parts.push(word);
        }

        if use_suffix && rng.gen::<bool>() {
            if let Some(suffix) = dict.suffixes.choose(rng) {
                parts.push(suffix);
            }
        }

        if parts.len() == 1 {
            if rng.gen::<bool>() && !dict.prefixes.is_empty() {
                if let Some(prefix) = dict.prefixes.choose(rng) {
                    parts.insert(0, prefix);
                }
            } else if let Some(suffix) = dict.suffixes.choose(rng) {
                parts.push(suffix);
            }
        }

        parts.join("-")
    }

    /// Generate up to `count` distinct full domains under `main_domain`.
    ///
    /// Distinctness is evaluated on the full domain string within this call
    /// only. At most `3 * count` labels are attempted; if the dictionary's
    /// combinatorial space is too small the call returns fewer results rather
    /// than looping forever. Under-supply is deliberate degraded output, not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] if `main_domain` is not allowlisted.
    /// The check happens before any randomness is consumed.
    pub fn generate_subdomains<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        main_domain: &str,
        count: usize,
        use_prefix: bool,
        use_suffix: bool,
    ) -> Result<Vec<Subdomain>, Error> {
        self.check_main_domain(main_domain)?;

        let max_attempts = count.saturating_mul(3);
        let mut seen: HashSet<String> = HashSet::with_capacity(count);
        let mut results = Vec::with_capacity(count);
        let mut attempts = 0;

        while results.len() < count && attempts < max_attempts {
            let label = self.generate_label(rng, use_prefix, use_suffix);
            let subdomain = Subdomain::new(label, main_domain);
            if seen.insert(subdomain.full_domain.clone()) {
                results.push(subdomain);
            }
            attempts += 1;
        }

        Ok(results)
    }

    /// Validate and normalize a user-supplied label, returning the full
    /// domain `normalized.main_domain`.
    ///
    /// Normalization lower-cases the label, replaces every character outside
    /// `[a-z0-9-]` with `-`, collapses hyphen runs, and strips leading and
    /// trailing hyphens. Internationalized names are out of scope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] if `main_domain` is not allowlisted,
    /// [`Error::EmptyLabel`] if the label is empty before or after
    /// normalization, and [`Error::LabelTooLong`] if the normalized label
    /// exceeds [`MAX_LABEL_LEN`].
    pub fn create_custom_subdomain(&self, label: &str, main_domain: &str) -> Result<String, Error> {
        self.check_main_domain(main_domain)?;

        let trimmed = label.trim().to_lowercase();
        if trimmed.is_empty() {
            return Err(Error::EmptyLabel);
        }

        let mut normalized = String::with_capacity(trimmed.len());
        for c in trimmed.chars() {
            let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            };
            if c == '-' && normalized.ends_with('-') {
                continue;
            }
            normalized.push(c);
        }
        let normalized = normalized.trim_matches('-');

        if normalized.is_empty() {
            return Err(Error::EmptyLabel);
        }
        if normalized.len() > MAX_LABEL_LEN {
            return Err(Error::LabelTooLong(normalized.len()));
        }

        Ok(format!("{normalized}.{main_domain}"))
    }

    /// Produce `count` independent suggestions, each pairing a freshly
    /// generated label with a main domain drawn uniformly from the allowlist.
    /// Duplicates are allowed; there is no uniqueness contract here.
    pub fn random_suggestions<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Subdomain> {
        let mut suggestions = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(main_domain) = self.main_domains.choose(rng) else {
                break;
            };
            let main_domain = main_domain.clone();
            let label = self.generate_label(rng, true, true);
            suggestions.push(Subdomain::new(label, &main_domain));
        }
        suggestions
    }
}

impl Default for SubdomainGenerator {
    fn default() -> Self {
        SubdomainGenerator::new(default_main_domains(), Dictionary::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn tiny_generator() -> SubdomainGenerator {
        SubdomainGenerator::new(
            vec!["dynu.net".to_string(), "kozow.com".to_string()],
            Dictionary {
                prefixes: vec!["my".to_string(), "home".to_string()],
                words: vec!["camera".to_string(), "router".to_string()],
                suffixes: vec!["cam".to_string(), "hd".to_string()],
            },
        )
    }

    #[test]
    fn main_domains_returns_fixed_order_copy() {
        let gen = SubdomainGenerator::default();
        let first = gen.main_domains();
        let second = gen.main_domains();
        assert_eq!(first, second);
        assert_eq!(first[0], "accesscam.org");
        assert_eq!(first.len(), 20);
    }

    #[test]
    fn labels_always_contain_a_core_word() {
        let gen = tiny_generator();
        let mut rng = rng();
        for _ in 0..200 {
            let label = gen.generate_label(&mut rng, true, true);
            let has_word = label
                .split('-')
                .any(|tok| tok == "camera" || tok == "router");
            assert!(has_word, "label {label:?} missing a core word");
        }
    }

    #[test]
    fn labels_have_at_least_two_tokens() {
        let gen = tiny_generator();
        let mut rng = rng();
        for _ in 0..200 {
            let label = gen.generate_label(&mut rng, false, false);
            assert!(
                label.split('-').count() >= 2,
                "label {label:?} is a bare word"
            );
        }
    }

    #[test]
    fn degenerate_dictionary_yields_bare_words() {
        let gen = SubdomainGenerator::new(
            vec!["dynu.net".to_string()],
            Dictionary {
                prefixes: vec![],
                words: vec!["camera".to_string()],
                suffixes: vec![],
            },
        );
        let mut rng = rng();
        for _ in 0..20 {
            assert_eq!(gen.generate_label(&mut rng, true, true), "camera");
        }
    }

    #[test]
    fn generate_rejects_unknown_main_domain() {
        let gen = tiny_generator();
        let err = gen
            .generate_subdomains(&mut rng(), "not-a-real-domain.com", 5, true, true)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDomain(d) if d == "not-a-real-domain.com"));
    }

    #[test]
    fn generate_returns_distinct_full_domains() {
        let gen = SubdomainGenerator::default();
        let subdomains = gen
            .generate_subdomains(&mut rng(), "dynu.net", 25, true, true)
            .unwrap();
        assert_eq!(subdomains.len(), 25);
        let unique: HashSet<&str> = subdomains.iter().map(|s| s.full_domain.as_str()).collect();
        assert_eq!(unique.len(), 25);
        for s in &subdomains {
            assert!(s.full_domain.ends_with(".dynu.net"));
            assert_eq!(s.full_domain, format!("{}.{}", s.label, s.main_domain));
        }
    }

    #[test]
    fn generate_degrades_when_dictionary_is_exhausted() {
        // Label space: my-camera, camera-cam and my-camera-cam.
        let gen = SubdomainGenerator::new(
            vec!["dynu.net".to_string()],
            Dictionary {
                prefixes: vec!["my".to_string()],
                words: vec!["camera".to_string()],
                suffixes: vec!["cam".to_string()],
            },
        );
        let subdomains = gen
            .generate_subdomains(&mut rng(), "dynu.net", 100, true, true)
            .unwrap();
        assert!(!subdomains.is_empty());
        assert!(subdomains.len() <= 3, "space only holds 3 distinct labels");
        let unique: HashSet<&str> = subdomains.iter().map(|s| s.full_domain.as_str()).collect();
        assert_eq!(unique.len(), subdomains.len());
    }

    #[test]
    fn generate_zero_count_is_empty() {
        let gen = tiny_generator();
        let subdomains = gen
            .generate_subdomains(&mut rng(), "dynu.net", 0, true, true)
            .unwrap();
        assert!(subdomains.is_empty());
    }

    #[test]
    fn custom_subdomain_normalizes_messy_input() {
        let gen = SubdomainGenerator::default();
        assert_eq!(
            gen.create_custom_subdomain("My Cool Router!", "dynu.net")
                .unwrap(),
            "my-cool-router.dynu.net"
        );
        assert_eq!(
            gen.create_custom_subdomain("  office__CAM--42  ", "kozow.com")
                .unwrap(),
            "office-cam-42.kozow.com"
        );
    }

    #[test]
    fn custom_subdomain_rejects_empty_labels() {
        let gen = SubdomainGenerator::default();
        assert!(matches!(
            gen.create_custom_subdomain("", "dynu.net"),
            Err(Error::EmptyLabel)
        ));
        assert!(matches!(
            gen.create_custom_subdomain("   ", "dynu.net"),
            Err(Error::EmptyLabel)
        ));
        assert!(matches!(
            gen.create_custom_subdomain("---", "dynu.net"),
            Err(Error::EmptyLabel)
        ));
        assert!(matches!(
            gen.create_custom_subdomain("!!!", "dynu.net"),
            Err(Error::EmptyLabel)
        ));
    }

    #[test]
    fn custom_subdomain_rejects_overlong_labels() {
        let gen = SubdomainGenerator::default();
        let label = "a".repeat(64);
        assert!(matches!(
            gen.create_custom_subdomain(&label, "dynu.net"),
            Err(Error::LabelTooLong(64))
        ));
        // Exactly 63 characters is still legal.
        let label = "a".repeat(63);
        assert!(gen.create_custom_subdomain(&label, "dynu.net").is_ok());
    }

    #[test]
    fn custom_subdomain_rejects_unknown_main_domain() {
        let gen = SubdomainGenerator::default();
        assert!(matches!(
            gen.create_custom_subdomain("valid-name", "not-a-real-domain.com"),
            Err(Error::InvalidDomain(_))
        ));
    }

    #[test]
    fn suggestions_pick_main_domains_from_the_allowlist() {
        let gen = tiny_generator();
        let suggestions = gen.random_suggestions(&mut rng(), 5);
        assert_eq!(suggestions.len(), 5);
        for s in &suggestions {
            assert!(gen.main_domains().contains(&s.main_domain));
            assert_eq!(s.full_domain, format!("{}.{}", s.label, s.main_domain));
        }
    }

    #[test]
    fn zero_suggestions_is_empty() {
        let gen = tiny_generator();
        assert!(gen.random_suggestions(&mut rng(), 0).is_empty());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let gen = SubdomainGenerator::default();
        let a = gen
            .generate_subdomains(&mut StdRng::seed_from_u64(7), "gleeze.com", 10, true, false)
            .unwrap();
        let b = gen
            .generate_subdomains(&mut StdRng::seed_from_u64(7), "gleeze.com", 10, true, false)
            .unwrap();
        assert_eq!(a, b);
    }
}
