//! Random secrets for environment files.
//!
//! Values come from the operating system's CSPRNG and are rendered as
//! lowercase hex, two characters per byte.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Variable names and byte lengths, in output order.
pub const SECRET_KINDS: [(&str, usize); 6] = [
    ("JWT_ACCESS_SECRET", 64),
    ("JWT_REFRESH_SECRET", 64),
    ("JWT_SECRET", 64),
    ("COOKIE_SECRET", 32),
    ("SESSION_SECRET", 32),
    ("ENCRYPTION_KEY", 32),
];

/// One generated secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    /// Environment variable name.
    pub name: &'static str,
    /// Number of random bytes behind `value`.
    pub byte_len: usize,
    /// Lowercase hex encoding.
    pub value: String,
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("byte_len", &self.byte_len)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// The full set of secrets, in [`SECRET_KINDS`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSet {
    secrets: Vec<Secret>,
}

impl SecretSet {
    /// Generate a fresh set from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns an error if the operating system cannot supply random bytes.
    pub fn generate() -> Result<Self, rand::Error> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a fresh set from a caller-supplied cryptographic RNG.
    ///
    /// # Errors
    ///
    /// Returns an error if `rng` fails to fill a buffer.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, rand::Error> {
        let secrets = SECRET_KINDS
            .iter()
            .map(|&(name, byte_len)| {
                let mut buf = vec![0u8; byte_len];
                rng.try_fill_bytes(&mut buf)?;
                Ok(Secret {
                    name,
                    byte_len,
                    value: hex::encode(&buf),
                })
            })
            .collect::<Result<Vec<_>, rand::Error>>()?;

        Ok(Self { secrets })
    }

    /// Secrets in output order.
    #[must_use]
    pub fn secrets(&self) -> &[Secret] {
        &self.secrets
    }

    /// Look up a secret value by variable name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.secrets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.value.as_str())
    }

    /// Render the operator report: each secret as a `NAME:` line followed by
    /// its value, then a block of `NAME=value` lines for an env file.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for secret in &self.secrets {
            out.push_str(secret.name);
            out.push_str(":\n");
            out.push_str(&secret.value);
            out.push_str("\n\n");
        }
        out.push_str("# .env\n");
        out.push_str(&self.render_env());
        out
    }

    /// Render only the `NAME=value` block.
    #[must_use]
    pub fn render_env(&self) -> String {
        let mut out = String::new();
        for secret in &self.secrets {
            out.push_str(secret.name);
            out.push('=');
            out.push_str(&secret.value);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lengths_are_twice_byte_len() {
        let set = SecretSet::generate().unwrap();
        assert_eq!(set.secrets().len(), 6);
        for secret in set.secrets() {
            assert_eq!(secret.value.len(), secret.byte_len * 2, "{}", secret.name);
            assert!(secret
                .value
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
        assert_eq!(set.get("JWT_ACCESS_SECRET").unwrap().len(), 128);
        assert_eq!(set.get("ENCRYPTION_KEY").unwrap().len(), 64);
    }

    #[test]
    fn two_runs_share_no_values() {
        let a = SecretSet::generate().unwrap();
        let b = SecretSet::generate().unwrap();

        let mut seen = HashSet::new();
        for secret in a.secrets().iter().chain(b.secrets()) {
            assert!(seen.insert(secret.value.clone()), "duplicate secret value");
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn values_are_not_degenerate() {
        let set = SecretSet::generate().unwrap();
        let value = set.get("JWT_SECRET").unwrap();
        let distinct: HashSet<char> = value.chars().collect();
        // 128 uniform hex digits hitting fewer than 8 symbols is vanishingly unlikely.
        assert!(distinct.len() >= 8);
    }

    #[test]
    fn render_order_and_format() {
        let set = SecretSet::generate().unwrap();
        let rendered = set.render();
        let lines: Vec<&str> = rendered.lines().collect();

        let names: Vec<&str> = SECRET_KINDS.iter().map(|(n, _)| *n).collect();
        for (i, name) in names.iter().enumerate() {
            assert_eq!(lines[i * 3], format!("{name}:"));
            assert_eq!(lines[i * 3 + 1], set.get(name).unwrap());
            assert_eq!(lines[i * 3 + 2], "");
        }
        assert_eq!(lines[18], "# .env");
        for (i, name) in names.iter().enumerate() {
            assert_eq!(
                lines[19 + i],
                format!("{name}={}", set.get(name).unwrap())
            );
        }
        assert_eq!(lines.len(), 25);
    }

    #[test]
    fn debug_hides_values() {
        let set = SecretSet::generate().unwrap();
        let debug = format!("{set:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(set.get("COOKIE_SECRET").unwrap()));
    }
}
