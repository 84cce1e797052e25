//! Request signing for the catalog API.
//!
//! Every request carries a timestamp, the public key and
//! `md5(ts + private_key + public_key)` as lowercase hex. The private key
//! never leaves this module in clear text: it is held in a [`SecretBox`] and
//! the [`Credentials`] `Debug` output is redacted.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretBox};

/// Public/private key pair issued by the catalog developer portal
pub struct Credentials {
    public_key: String,
    private_key: SecretBox<String>,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: SecretBox::new(Box::new(private_key.into())),
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Sign a request issued at `ts`
    pub fn sign(&self, ts: &str) -> AuthParams {
        let mut hasher = Md5::new();
        hasher.update(ts.as_bytes());
        hasher.update(self.private_key.expose_secret().as_bytes());
        hasher.update(self.public_key.as_bytes());

        AuthParams {
            ts: ts.to_string(),
            apikey: self.public_key.clone(),
            hash: format!("{:x}", hasher.finalize()),
        }
    }

    /// Sign a request issued now
    pub fn sign_now(&self) -> AuthParams {
        self.sign(&current_timestamp())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self::new(self.public_key.clone(), self.private_key.expose_secret().clone())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Query parameters authenticating a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub ts: String,
    pub apikey: String,
    pub hash: String,
}

impl AuthParams {
    pub fn as_query(&self) -> [(&'static str, &str); 3] {
        [
            ("ts", self.ts.as_str()),
            ("apikey", self.apikey.as_str()),
            ("hash", self.hash.as_str()),
        ]
    }
}

/// Milliseconds since the Unix epoch, as a string
fn current_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
        .to_string()
}
