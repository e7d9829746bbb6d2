use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use types::{Result, err};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Uuids handed to the browser as `<simple uuid>.<base64 hmac>`, so a
/// cookie can't be forged by guessing ids.
pub trait SignedTokenExt: Sized {
    fn from_token(token: &str, secret: &SecretString) -> Result<Self>;
    fn as_token(&self, secret: &SecretString) -> Result<String>;
}

impl SignedTokenExt for Uuid {
    fn from_token(token: &str, secret: &SecretString) -> Result<Self> {
        let Some((uuid_simple, signature_b64)) = token.split_once('.') else {
            return Err(err!("invalid token format"));
        };

        let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())?;
        mac.update(uuid_simple.as_bytes());
        let signature = BASE64_URL_SAFE_NO_PAD.decode(signature_b64)?;
        mac.verify_slice(&signature)?;

        Ok(Uuid::parse_str(uuid_simple)?)
    }

    fn as_token(&self, secret: &SecretString) -> Result<String> {
        let id_str = self.simple().to_string();
        let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())?;
        mac.update(id_str.as_bytes());
        let signature = BASE64_URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{id_str}.{signature}"))
    }
}
