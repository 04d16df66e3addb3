// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::{WIF_COMPRESSED_FLAG, WIF_VERSION};
use k256::ecdsa::signature::Signer;
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use std::fmt::{Debug, Formatter};
use swaggersign_core::utils::Redact;
use swaggersign_core::{Error, Result, SigningCredential};

/// Public half of a [`SigningIdentity`], used by verifiers.
pub type PublicKey = VerifyingKey;

/// SigningIdentity is the secp256k1 key pair a client signs every request with.
///
/// It can be persisted across sessions through its WIF encoding.
#[derive(Clone)]
pub struct SigningIdentity {
    signing_key: SigningKey,
}

impl SigningIdentity {
    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::thread_rng()),
        }
    }

    /// Build an identity from 32 raw secret key bytes.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        let signing_key = SigningKey::from_slice(bytes).map_err(|e| {
            Error::credential_invalid("secret key is not a valid secp256k1 scalar").with_source(e)
        })?;
        Ok(Self { signing_key })
    }

    /// Decode an identity from a wallet-import-format string.
    ///
    /// Both compressed and uncompressed WIF strings are accepted.
    pub fn from_wif(wif: &str) -> Result<Self> {
        let decoded = bs58::decode(wif.trim())
            .with_check(Some(WIF_VERSION))
            .into_vec()
            .map_err(|e| Error::credential_invalid("invalid WIF private key").with_source(e))?;

        // decoded = version || key (|| compressed flag)
        match decoded.as_slice() {
            [_, key @ ..] if key.len() == 32 => Self::from_secret_bytes(key),
            [_, key @ .., flag] if key.len() == 32 && *flag == WIF_COMPRESSED_FLAG => {
                Self::from_secret_bytes(key)
            }
            _ => Err(Error::credential_invalid(format!(
                "WIF private key has unexpected payload length {}",
                decoded.len()
            ))),
        }
    }

    /// Encode the secret key as a compressed wallet-import-format string.
    pub fn to_wif(&self) -> String {
        let mut payload = self.signing_key.to_bytes().to_vec();
        payload.push(WIF_COMPRESSED_FLAG);
        bs58::encode(payload)
            .with_check_version(WIF_VERSION)
            .into_string()
    }

    /// The public key of this identity.
    pub fn public_key(&self) -> PublicKey {
        *self.signing_key.verifying_key()
    }

    /// SEC1 compressed public key bytes (33 bytes).
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.signing_key
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }

    /// Hex of the compressed public key, used as the JWS `kid`.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    /// Sign `message` with ECDSA/SHA-256, returning the 64-byte r||s form.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let signature: Signature = self.signing_key.sign(message);
        signature.to_bytes().to_vec()
    }
}

impl PartialEq for SigningIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.signing_key == other.signing_key
    }
}

impl Eq for SigningIdentity {}

impl Debug for SigningIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("private_key", &Redact::from(&self.to_wif()))
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}

impl SigningCredential for SigningIdentity {
    fn is_valid(&self) -> bool {
        true
    }
}
