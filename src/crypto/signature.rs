//! RSA-PSS signing and verification with SHA-256 as both the hash and the
//! PSS MGF digest, per the crypto contract. Grounded in
//! `examples/lexe-app-lexe-public/sgxs-sign`'s real use of `rsa::RsaPrivateKey`
//! / `rsa::RsaPublicKey`, adapted from PKCS#1v1.5 to PSS padding.

use rsa::pkcs1::{
    DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey,
};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::{pss::Signature, pss::SigningKey, pss::VerifyingKey, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key encoding: {0}")]
    InvalidKey(String),
    #[error("invalid signature")]
    InvalidSignature,
}

pub struct KeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl KeyPair {
    pub fn generate<R: rand::CryptoRng + rand::RngCore>(
        rng: &mut R,
        bits: usize,
    ) -> Result<Self, CryptoError> {
        let private =
            RsaPrivateKey::new(rng, bits).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        let public = RsaPublicKey::from(&private);
        Ok(Self { private, public })
    }

    pub fn public_key_der(&self) -> Result<Vec<u8>, CryptoError> {
        self.public
            .to_pkcs1_der()
            .map(|d| d.as_bytes().to_vec())
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))
    }

    pub fn address(&self) -> [u8; 32] {
        let der = self.public_key_der().unwrap_or_default();
        super::hash::to_address(&der)
    }
}

/// Signs `message` with the given PKCS#1 DER-encoded RSA private key.
pub fn sign(private_key_der: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let private = RsaPrivateKey::from_pkcs1_der(private_key_der)
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let signing_key = SigningKey::<Sha256>::new(private);
    let mut rng = rand::thread_rng();
    let signature = signing_key.sign_with_rng(&mut rng, message);
    Ok(signature.to_bytes().to_vec())
}

/// Verifies `signature` over `message` against a PKCS#1 DER-encoded RSA
/// public key.
pub fn verify(public_key_der: &[u8], message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
    let public = RsaPublicKey::from_pkcs1_der(public_key_der)
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let verifying_key = VerifyingKey::<Sha256>::new(public);
    let signature =
        Signature::try_from(signature).map_err(|_| CryptoError::InvalidSignature)?;
    verifying_key
        .verify(message, &signature)
        .map_err(|_| CryptoError::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_round_trips() {
        let mut rng = rand::thread_rng();
        let pair = KeyPair::generate(&mut rng, 1024).expect("keygen");
        let der = pair.private.to_pkcs1_der().unwrap();
        let pub_der = pair.public_key_der().unwrap();
        let msg = b"weave transaction body";
        let sig = sign(der.as_bytes(), msg).expect("sign");
        assert!(verify(&pub_der, msg, &sig).is_ok());
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let mut rng = rand::thread_rng();
        let pair = KeyPair::generate(&mut rng, 1024).expect("keygen");
        let der = pair.private.to_pkcs1_der().unwrap();
        let pub_der = pair.public_key_der().unwrap();
        let sig = sign(der.as_bytes(), b"original").expect("sign");
        assert!(verify(&pub_der, b"tampered", &sig).is_err());
    }
}
